use crate::core::lattice::{CellFamily, Lattice, LatticeError, Period, UnitCell};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Unknown unit cell family: '{0}'. Expected one of linear, square, sc, bcc, fcc")]
    UnknownCellFamily(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LatticeConfig {
    pub family: CellFamily,
    pub side: f64,
    pub period: Vec<i64>,
}

impl LatticeConfig {
    /// Validates the geometry and builds the periodic lattice it describes.
    pub fn build(&self) -> Result<Lattice, LatticeError> {
        let unit_cell = UnitCell::new(self.family, self.side)?;
        let period = Period::new(&self.period)?;
        Lattice::new(unit_cell, period)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GrowthConfig {
    pub lattice: LatticeConfig,
    pub target_size: usize,
    /// Seed for the growth RNG; `None` draws one from system entropy.
    pub seed: Option<u64>,
}

#[derive(Default)]
pub struct GrowthConfigBuilder {
    family: Option<CellFamily>,
    side: Option<f64>,
    period: Option<Vec<i64>>,
    target_size: Option<usize>,
    seed: Option<u64>,
}

impl GrowthConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn family(mut self, family: CellFamily) -> Self {
        self.family = Some(family);
        self
    }
    pub fn family_name(mut self, name: &str) -> Result<Self, ConfigError> {
        let family = CellFamily::from_name(name)
            .ok_or_else(|| ConfigError::UnknownCellFamily(name.to_string()))?;
        self.family = Some(family);
        Ok(self)
    }
    pub fn side(mut self, side: f64) -> Self {
        self.side = Some(side);
        self
    }
    pub fn period(mut self, lengths: Vec<i64>) -> Self {
        self.period = Some(lengths);
        self
    }
    pub fn target_size(mut self, size: usize) -> Self {
        self.target_size = Some(size);
        self
    }
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn build(self) -> Result<GrowthConfig, ConfigError> {
        let lattice = LatticeConfig {
            family: self.family.ok_or(ConfigError::MissingParameter("family"))?,
            side: self.side.ok_or(ConfigError::MissingParameter("side"))?,
            period: self
                .period
                .ok_or(ConfigError::MissingParameter("period"))?,
        };
        Ok(GrowthConfig {
            lattice,
            target_size: self
                .target_size
                .ok_or(ConfigError::MissingParameter("target_size"))?,
            seed: self.seed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_produces_complete_config() {
        let config = GrowthConfigBuilder::new()
            .family_name("bcc")
            .unwrap()
            .side(2.0)
            .period(vec![4, 4, 4])
            .target_size(10)
            .seed(7)
            .build()
            .unwrap();

        assert_eq!(config.lattice.family, CellFamily::BodyCenteredCubic);
        assert_eq!(config.target_size, 10);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.lattice.build().unwrap().count_sites(), 64);
    }

    #[test]
    fn builder_reports_first_missing_parameter() {
        let result = GrowthConfigBuilder::new()
            .family(CellFamily::Square)
            .period(vec![3, 3])
            .build();
        assert_eq!(result, Err(ConfigError::MissingParameter("side")));

        let result = GrowthConfigBuilder::new()
            .family(CellFamily::Square)
            .side(1.0)
            .period(vec![3, 3])
            .build();
        assert_eq!(result, Err(ConfigError::MissingParameter("target_size")));
    }

    #[test]
    fn unknown_family_names_are_rejected() {
        let result = GrowthConfigBuilder::new().family_name("hcp");
        assert!(matches!(result, Err(ConfigError::UnknownCellFamily(name)) if name == "hcp"));
    }

    #[test]
    fn lattice_config_validates_geometry() {
        let mismatched = LatticeConfig {
            family: CellFamily::FaceCenteredCubic,
            side: 1.0,
            period: vec![3, 3],
        };
        assert!(matches!(
            mismatched.build(),
            Err(LatticeError::DimensionMismatch { .. })
        ));

        let negative_side = LatticeConfig {
            family: CellFamily::Linear,
            side: -1.0,
            period: vec![3],
        };
        assert!(negative_side.build().is_err());
    }
}
