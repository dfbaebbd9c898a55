use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Period cannot be empty. Expected lengths such as '20x20x20' or '20,20,20'.")]
    EmptyPeriod,

    #[error("Invalid period length '{length}' in '{period}'. Expected a whole number.")]
    InvalidLength { length: String, period: String },
}

/// Parses a periodic box size written as lengths joined by `x` or `,`
/// (e.g. `20x20x20`, `8,8`, `100`).
///
/// Only the syntax is checked here; non-positive lengths are rejected when
/// the lattice is built.
pub fn parse_period(text: &str) -> Result<Vec<i64>, ParseError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ParseError::EmptyPeriod);
    }
    trimmed
        .split(|c| c == 'x' || c == 'X' || c == ',')
        .map(|part| {
            part.trim()
                .parse::<i64>()
                .map_err(|_| ParseError::InvalidLength {
                    length: part.trim().to_string(),
                    period: text.to_string(),
                })
        })
        .collect()
}
