//! Error types shared by the rate clients, the converter and the service.

use std::fmt;

use rust_decimal::Decimal;

/// Boxed cause of a transport failure.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Which side of a conversion an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    From,
    To,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::From => f.write_str("from"),
            Side::To => f.write_str("to"),
        }
    }
}

/// Domain-level errors (validation and lookup failures).
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("{0}: currency not set")]
    CurrencyNotSet(Side),

    #[error("{0}: code not found in set")]
    CodeNotFound(String),

    #[error("{code}: unusable quote (rate {rate}, quantity {quantity})")]
    InvalidQuote {
        code: String,
        rate: Decimal,
        quantity: i64,
    },

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid year: {0}")]
    InvalidYear(String),

    #[error("Incorrect month: {0}")]
    InvalidMonth(String),

    #[error("Invalid day: {0}")]
    InvalidDay(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

/// Failures of a rates request.
#[derive(Debug, thiserror::Error)]
pub enum RatesError {
    /// The feed could not be reached or the body could not be read.
    #[error("send request")]
    Transport(#[source] BoxError),

    #[error("invalid response status: {0}")]
    Status(u16),

    #[error("unmarshal body to rates")]
    Decode(#[from] serde_json::Error),

    #[error("response contains {0} rate sets, expected at most one")]
    UnexpectedShape(usize),

    #[error("rates request cancelled")]
    Cancelled,
}

impl RatesError {
    pub fn transport(err: impl Into<BoxError>) -> Self {
        RatesError::Transport(err.into())
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, RatesError::Cancelled)
    }
}

/// Failures of a currency conversion.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("fetch rates")]
    Rates(#[from] RatesError),
}

impl ConvertError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ConvertError::Rates(e) if e.is_cancelled())
    }
}

/// Application-level errors reported to front ends.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Rate feed unavailable")]
    Upstream(#[source] RatesError),

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::CodeNotFound(code) => {
                AppError::NotFound(format!("Currency {} not published", code))
            }
            e @ DomainError::InvalidQuote { .. } => AppError::Internal(e.to_string()),
            e => AppError::BadRequest(e.to_string()),
        }
    }
}

impl From<RatesError> for AppError {
    fn from(err: RatesError) -> Self {
        match err {
            RatesError::Cancelled => AppError::Cancelled,
            e => AppError::Upstream(e),
        }
    }
}

impl From<ConvertError> for AppError {
    fn from(err: ConvertError) -> Self {
        match err {
            ConvertError::Domain(e) => e.into(),
            ConvertError::Rates(e) => e.into(),
        }
    }
}
