/// Values used when neither the config file nor the command line sets them.
pub struct DefaultsConfig {
    pub cell: String,
    pub side: f64,
    /// Cells per axis of the default periodic box, repeated for every axis
    /// of the chosen family.
    pub period_length: i64,
    pub target_size: usize,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            cell: "sc".to_string(),
            side: 1.0,
            period_length: 20,
            target_size: 100,
        }
    }
}
