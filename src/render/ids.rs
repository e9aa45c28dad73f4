//! Short, renderer-safe node identifiers

use std::collections::HashMap;

/// First identifier handed out: "a00". Everything below is reserved so ids
/// always start with a letter and never look like bare numbers or the
/// single-letter edge modifiers `o` and `x`.
const FIRST_ID: u64 = 10 * 36 * 36;

/// Flowchart keywords that would otherwise be produced by the sequence
const RESERVED: &[&str] = &["end", "graph", "click", "style", "class", "subgraph", "flowchart"];

/// Memoizes one identifier per key for the lifetime of a rendering pass
#[derive(Debug, Clone)]
pub struct IdAllocator {
    next: u64,
    ids: HashMap<String, usize>,
    /// (key, id) in allocation order
    entries: Vec<(String, String)>,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self {
            next: FIRST_ID,
            ids: HashMap::new(),
            entries: Vec::new(),
        }
    }
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Identifier for `key`, allocating the next one on first use
    pub fn get(&mut self, key: &str) -> String {
        if let Some(&i) = self.ids.get(key) {
            return self.entries[i].1.clone();
        }

        let id = loop {
            let candidate = to_base36(self.next);
            self.next += 1;
            if !RESERVED.contains(&candidate.as_str()) {
                break candidate;
            }
        };

        self.ids.insert(key.to_string(), self.entries.len());
        self.entries.push((key.to_string(), id.clone()));
        id
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// (key, id) pairs in allocation order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, id)| (k.as_str(), id.as_str()))
    }
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_sequence_starts_above_reserved_range() {
        let mut ids = IdAllocator::new();
        assert_eq!(ids.get("first"), "a00");
        assert_eq!(ids.get("second"), "a01");
    }

    #[test]
    fn test_same_key_same_id() {
        let mut ids = IdAllocator::new();
        let a = ids.get("pipeline:app/ci.yml");
        ids.get("other");
        assert_eq!(ids.get("pipeline:app/ci.yml"), a);
        assert_eq!(ids.len(), 2);
    }

    #[test]
    fn test_distinct_keys_never_collide() {
        let mut ids = IdAllocator::new();
        let allocated: HashSet<String> = (0..10_000).map(|i| ids.get(&format!("k{}", i))).collect();
        assert_eq!(allocated.len(), 10_000);
        assert!(!allocated.contains("end"));
    }

    #[test]
    fn test_base36() {
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(FIRST_ID), "a00");
    }
}
