use crate::cli::GrowArgs;
use crate::config::PartialGrowthConfig;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use lattix::{
    core::io::sites::SiteTable,
    engine::progress::ProgressReporter,
    workflows::{self, grow::GrowthResult},
};
use tracing::info;

pub fn run(args: GrowArgs) -> Result<()> {
    let partial_config = PartialGrowthConfig::load(args.config.as_deref())?;
    info!("Merging configuration from file and CLI arguments...");
    let config = partial_config.merge_with_cli(&args)?;

    let progress_handler = CliProgressHandler::new();
    let result = grow(&config, &progress_handler)?;

    let cells = result.population.count_occupants();
    info!("Writing {} cell(s) to {:?}", cells, &args.output);
    result
        .population
        .write_to_path(&args.output)
        .map_err(|source| CliError::SiteTable {
            path: args.output.clone(),
            source,
        })?;

    println!(
        "✓ Aggregate of {} cell(s) written to: {}",
        cells,
        args.output.display()
    );
    println!("  Seed: {}", result.seed);
    Ok(())
}

fn grow(
    config: &lattix::engine::config::GrowthConfig,
    progress_handler: &CliProgressHandler,
) -> Result<GrowthResult> {
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!(
        "Growing {} cell(s) on a {} lattice...",
        config.target_size, config.lattice.family
    );
    info!("Invoking the core growth workflow...");
    Ok(workflows::grow::run(config, &reporter)?)
}
