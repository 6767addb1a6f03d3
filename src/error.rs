use thiserror::Error;

/// Smallest price accepted by the input form
pub const MIN_PRICE: f64 = 0.001;

/// Errors returned by the position sizer
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SizingError {
    #[error(
        "Invalid price configuration: target ({target}) > entry ({entry}) > stop-loss ({stop}) required"
    )]
    InvalidPriceConfiguration { entry: f64, target: f64, stop: f64 },
}

/// Errors raised while collecting raw inputs, before any sizing happens
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("Funds must be a non-negative number, got {0}")]
    InvalidFunds(f64),

    #[error("{field} price must be at least {min}, got {value}")]
    InvalidPrice {
        field: &'static str,
        value: f64,
        min: f64,
    },

    #[error("Win probability must be between 1 and 99 percent, got {0}")]
    WinProbabilityOutOfRange(u32),

    #[error("Kelly fraction must be one of 0.25, 0.5, 1.0 (or quarter, half, full), got '{0}'")]
    UnsupportedKellyFraction(String),
}

/// Validation functions
pub fn validate_funds(funds: f64) -> Result<f64, InputError> {
    if !funds.is_finite() || funds < 0.0 {
        return Err(InputError::InvalidFunds(funds));
    }
    Ok(funds)
}

pub fn validate_price(field: &'static str, value: f64) -> Result<f64, InputError> {
    if !value.is_finite() || value < MIN_PRICE {
        return Err(InputError::InvalidPrice {
            field,
            value,
            min: MIN_PRICE,
        });
    }
    Ok(value)
}

pub fn validate_win_probability(percent: u32) -> Result<u8, InputError> {
    if !(1..=99).contains(&percent) {
        return Err(InputError::WinProbabilityOutOfRange(percent));
    }
    Ok(percent as u8)
}
