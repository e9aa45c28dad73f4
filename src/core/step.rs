//! Step domain model

use crate::core::config::{scalar_to_string, JobConfig};
use serde_yaml::Value;

/// One concrete assignment of matrix parameters, in parameter order
pub type Combination = Vec<(String, String)>;

/// Parameter expansion settings for a step
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Matrix {
    /// Parameter name -> possible values, in declaration order
    pub parameters: Vec<(String, Vec<String>)>,

    /// Extra combinations appended after the cartesian product
    pub include: Vec<Combination>,

    /// Combinations to remove (matched on the exclusion's own keys only)
    pub exclude: Vec<Combination>,
}

impl Matrix {
    /// Read a `strategy.matrix` mapping. Anything that is not a mapping
    /// (e.g. an expression string) has nothing to expand.
    pub fn from_value(value: &Value) -> Option<Self> {
        let Value::Mapping(map) = value else {
            return None;
        };

        let mut matrix = Matrix::default();
        for (key, values) in map {
            let Some(key) = key.as_str() else {
                continue;
            };
            match key {
                "include" => matrix.include = combinations_from(values),
                "exclude" => matrix.exclude = combinations_from(values),
                _ => {
                    let values = match values {
                        Value::Sequence(seq) => seq.iter().map(scalar_to_string).collect(),
                        other => vec![scalar_to_string(other)],
                    };
                    matrix.parameters.push((key.to_string(), values));
                }
            }
        }

        Some(matrix)
    }
}

fn combinations_from(value: &Value) -> Vec<Combination> {
    let Value::Sequence(entries) = value else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| entry.as_mapping())
        .map(|map| {
            map.iter()
                .filter_map(|(k, v)| k.as_str().map(|k| (k.to_string(), scalar_to_string(v))))
                .collect()
        })
        .collect()
}

/// A single job in a pipeline
#[derive(Debug, Clone)]
pub struct Step {
    /// Identity key, unique across all pipelines
    pub key: String,

    /// Job id, unique within its pipeline
    pub id: String,

    /// Display name
    pub name: String,

    /// Sibling job ids this step depends on
    pub needs: Vec<String>,

    pub matrix: Option<Matrix>,
}

impl Step {
    /// Create a step from a job config
    pub fn from_config(pipeline_key: &str, id: &str, config: &JobConfig) -> Self {
        let matrix = config
            .strategy
            .as_ref()
            .and_then(|s| s.matrix.as_ref())
            .and_then(Matrix::from_value);

        Step {
            key: format!("{}#{}", pipeline_key, id),
            id: id.to_string(),
            name: config.name.clone().unwrap_or_else(|| id.to_string()),
            needs: config.needs.clone().into_vec(),
            matrix,
        }
    }
}
