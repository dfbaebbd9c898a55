use crate::cli::SitesArgs;
use crate::config::PartialGrowthConfig;
use crate::error::{CliError, Result};
use lattix::core::io::sites::SiteTable;
use lattix::engine::error::EngineError;
use tracing::info;

pub fn run(args: SitesArgs) -> Result<()> {
    let partial_config = PartialGrowthConfig::load(args.config.as_deref())?;
    let lattice_config = partial_config.merge_lattice_with_cli(&args)?;
    let lattice = lattice_config.build().map_err(EngineError::from)?;

    info!(
        "Listing {} site(s) of the {} lattice with period {}",
        lattice.count_sites(),
        lattice.unit_cell().family(),
        lattice.period().lengths()
    );
    lattice
        .write_to_path(&args.output)
        .map_err(|source| CliError::SiteTable {
            path: args.output.clone(),
            source,
        })?;

    println!(
        "✓ {} site(s) written to: {}",
        lattice.count_sites(),
        args.output.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use std::fs;
    use tempfile::tempdir;

    fn sites_args(argv: &[&str]) -> SitesArgs {
        match Cli::parse_from(argv).command {
            Commands::Sites(args) => args,
            _ => panic!("Expected 'sites' subcommand"),
        }
    }

    #[test]
    fn lists_every_site_of_the_box() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("sites.csv");
        let args = sites_args(&[
            "lattix",
            "sites",
            "-o",
            output.to_str().unwrap(),
            "--cell",
            "fcc",
            "--side",
            "2.0",
            "-p",
            "3x3x3",
        ]);

        run(args).unwrap();

        let content = fs::read_to_string(&output).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("cell,x,y,z"));
        assert_eq!(lines.count(), 27);
    }

    #[test]
    fn dimension_mismatch_is_an_engine_error() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("sites.csv");
        let args = sites_args(&[
            "lattix",
            "sites",
            "-o",
            output.to_str().unwrap(),
            "--cell",
            "square",
            "-p",
            "3x3x3",
        ]);

        assert!(matches!(run(args), Err(CliError::Engine(EngineError::Lattice(_)))));
        assert!(!output.exists());
    }
}
