mod defaults;

use crate::cli::{GrowArgs, LatticeArgs, SitesArgs};
use crate::error::{CliError, Result};
use crate::utils::parser;
use defaults::DefaultsConfig;
use lattix::core::lattice::CellFamily;
use lattix::engine::config as core_config;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
struct PartialLatticeConfig {
    cell: Option<String>,
    side: Option<f64>,
    period: Option<Vec<i64>>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
struct PartialGrowthSettings {
    #[serde(rename = "target-size")]
    target_size: Option<usize>,
    seed: Option<u64>,
}

/// Configuration as read from a TOML file, before CLI overrides and
/// defaults are applied.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialGrowthConfig {
    lattice: Option<PartialLatticeConfig>,
    growth: Option<PartialGrowthSettings>,
}

impl PartialGrowthConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content).map_err(|source| CliError::ConfigFile {
            path: path.to_path_buf(),
            source,
        })
    }

    fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Loads the file if one was given, otherwise starts from an empty
    /// configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Resolves the final growth configuration. Precedence, highest first:
    /// `-S` assignments, dedicated CLI flags, the config file, defaults.
    pub fn merge_with_cli(mut self, args: &GrowArgs) -> Result<core_config::GrowthConfig> {
        self.apply_set_values(&args.set_values)?;
        let defaults = DefaultsConfig::default();

        let lattice = self.merge_lattice(&args.lattice, &args.set_values, &defaults)?;
        let growth = self.growth.take().unwrap_or_default();

        let mut builder = core_config::GrowthConfigBuilder::new()
            .family(lattice.family)
            .side(lattice.side)
            .period(lattice.period)
            .target_size(
                override_unless_set(&args.set_values, "growth.target-size", args.size)
                    .or(growth.target_size)
                    .unwrap_or(defaults.target_size),
            );
        if let Some(seed) =
            override_unless_set(&args.set_values, "growth.seed", args.seed).or(growth.seed)
        {
            builder = builder.seed(seed);
        }

        builder.build().map_err(|e| CliError::Config(e.to_string()))
    }

    /// Resolves only the lattice geometry, as needed by `sites`.
    pub fn merge_lattice_with_cli(mut self, args: &SitesArgs) -> Result<core_config::LatticeConfig> {
        self.apply_set_values(&args.set_values)?;
        let defaults = DefaultsConfig::default();
        self.merge_lattice(&args.lattice, &args.set_values, &defaults)
    }

    fn merge_lattice(
        &mut self,
        args: &LatticeArgs,
        set_values: &[String],
        defaults: &DefaultsConfig,
    ) -> Result<core_config::LatticeConfig> {
        let file = self.lattice.take().unwrap_or_default();

        let cell_name = override_unless_set(set_values, "lattice.cell", args.cell.clone())
            .or(file.cell)
            .unwrap_or_else(|| defaults.cell.clone());
        let family = CellFamily::from_name(&cell_name)
            .ok_or(core_config::ConfigError::UnknownCellFamily(cell_name))
            .map_err(|e| CliError::Config(e.to_string()))?;

        let side = override_unless_set(set_values, "lattice.side", args.side)
            .or(file.side)
            .unwrap_or(defaults.side);

        let cli_period = override_unless_set(set_values, "lattice.period", args.period.as_ref())
            .map(|text| parser::parse_period(text))
            .transpose()?;
        let period = cli_period
            .or(file.period)
            .unwrap_or_else(|| vec![defaults.period_length; family.dimensionality()]);

        Ok(core_config::LatticeConfig {
            family,
            side,
            period,
        })
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let (key, value_str) = kv_pair.split_once('=').ok_or_else(|| {
                CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                ))
            })?;
            let (key, value_str) = (key.trim(), value_str.trim());

            match key {
                "lattice.cell" => {
                    self.lattice_mut().cell = Some(value_str.to_string());
                }
                "lattice.side" => {
                    self.lattice_mut().side = Some(value_str.parse().map_err(|_| {
                        CliError::Config(format!("Invalid float value for {}: {}", key, value_str))
                    })?);
                }
                "lattice.period" => {
                    self.lattice_mut().period = Some(
                        parser::parse_period(value_str)
                            .map_err(|e| CliError::Config(format!("{}: {}", key, e)))?,
                    );
                }
                "growth.target-size" => {
                    self.growth_mut().target_size = Some(value_str.parse().map_err(|_| {
                        CliError::Config(format!(
                            "Invalid integer value for {}: {}",
                            key, value_str
                        ))
                    })?);
                }
                "growth.seed" => {
                    self.growth_mut().seed = Some(value_str.parse().map_err(|_| {
                        CliError::Config(format!(
                            "Invalid integer value for {}: {}",
                            key, value_str
                        ))
                    })?);
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }

    fn lattice_mut(&mut self) -> &mut PartialLatticeConfig {
        self.lattice.get_or_insert_with(Default::default)
    }

    fn growth_mut(&mut self) -> &mut PartialGrowthSettings {
        self.growth.get_or_insert_with(Default::default)
    }
}

/// Dedicated CLI flags outrank the file but not an explicit `-S` for the
/// same key, which has already been written into the file layer.
fn override_unless_set<T>(set_values: &[String], key: &str, cli_value: Option<T>) -> Option<T> {
    let assigned = set_values
        .iter()
        .any(|kv| kv.split_once('=').is_some_and(|(k, _)| k.trim() == key));
    if assigned { None } else { cli_value }
}
