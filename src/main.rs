use anyhow::{Context, Result};
use pipeline_graph::cli::output::{format_error, format_id_table};
use pipeline_graph::cli::Cli;
use pipeline_graph::{render_projects, Project, TriggerKind};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::from_args();

    if let Err(e) = init_logging(cli.verbose) {
        eprintln!("{}", format_error(&e));
        std::process::exit(1);
    }

    if let Err(e) = run(&cli) {
        eprintln!("{}", format_error(&e));
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set logging subscriber")?;
    Ok(())
}

fn run(cli: &Cli) -> Result<()> {
    let projects = cli
        .paths
        .iter()
        .map(|path| {
            Project::load(path)
                .with_context(|| format!("Failed to load project at {}", path.display()))
        })
        .collect::<Result<Vec<_>>>()?;

    let filter = cli.on.map(TriggerKind::from);
    let diagrams = render_projects(projects, filter).context("Failed to build pipeline graph")?;

    // Everything is rendered before anything is printed
    for (index, diagram) in diagrams.iter().enumerate() {
        println!("{}", diagram.text);
        if cli.debug {
            eprintln!("{}", format_id_table(index, &diagram.ids));
        }
    }

    Ok(())
}
