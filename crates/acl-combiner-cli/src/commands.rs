//! CLI command implementation

use std::path::Path;

use acl_combiner_core::{Combiner, CombinerConfig, ConfigLoader, Sink};
use anyhow::Result;
use tracing::debug;

use crate::Cli;
use crate::output::RunSummary;

/// Combine the base policy with every fragment and write the result
pub fn combine_command(cli: Cli) -> Result<()> {
    // clap enforces -d unless completions were requested
    let Some(dir) = cli.dir else {
        anyhow::bail!("no fragment directory given");
    };

    let config = load_config(cli.config.as_deref(), &dir, cli.allow, cli.exclude)?;
    debug!("Loaded configuration");

    let combiner = Combiner::from_config(&config, &dir);
    let outcome = combiner.run(cli.file.as_deref())?;

    // Only reached when every fragment merged cleanly
    let sink = Sink::from_path(cli.output);
    sink.write(&outcome.rendered)?;

    if cli.verbose > 0 {
        RunSummary::new(&outcome.report, &sink).print();
    }

    Ok(())
}

/// Load the config file, then apply CLI overrides on top of it
fn load_config(
    custom_path: Option<&Path>,
    dir: &Path,
    allow: Vec<String>,
    exclude: Vec<String>,
) -> Result<CombinerConfig> {
    let start_dir = if dir.is_dir() { dir } else { Path::new(".") };
    let mut config = ConfigLoader::load(custom_path, start_dir)?;

    if !allow.is_empty() {
        config.sections.get_or_insert_with(Default::default).allow = Some(allow);
    }
    if !exclude.is_empty() {
        config.files.get_or_insert_with(Default::default).exclude = Some(exclude);
    }

    Ok(config)
}
