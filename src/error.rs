use thiserror::Error;

/// Errors produced while handling a single command.
///
/// Validation failures carry the offending key so the caller sees which
/// parameter was missing or malformed. Everything from the capability layer
/// arrives as an `anyhow::Error` chain.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0} required")]
    MissingParam(&'static str),

    #[error("{0}")]
    InvalidParam(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn invalid(message: impl Into<String>) -> Self {
        AppError::InvalidParam(message.into())
    }

    /// Render the error for the wire, including the cause chain for
    /// capability-layer failures.
    pub fn message(&self) -> String {
        match self {
            AppError::Internal(err) => format!("{err:#}"),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_missing_param_names_the_key() {
        assert_eq!(
            AppError::MissingParam("imagePath").message(),
            "imagePath required"
        );
        assert_eq!(AppError::MissingParam("x").message(), "x required");
    }

    #[test]
    fn test_internal_error_includes_cause_chain() {
        let err = anyhow::anyhow!("device unavailable");
        let err = Err::<(), _>(err).context("failed to move mouse").unwrap_err();
        let msg = AppError::from(err).message();
        assert!(msg.contains("failed to move mouse"));
        assert!(msg.contains("device unavailable"));
    }
}
