use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmiError {
    /// A required value is missing, non-numeric, non-finite, or outside its domain.
    #[error("invalid input: {field} {reason}")]
    InvalidInput {
        field: &'static str,
        reason: &'static str,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl EmiError {
    pub(crate) fn invalid(field: &'static str, reason: &'static str) -> Self {
        EmiError::InvalidInput { field, reason }
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, EmiError::InvalidInput { .. })
    }
}

pub type Result<T> = std::result::Result<T, EmiError>;
