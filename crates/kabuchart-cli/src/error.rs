use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] kabuchart_core::ValidationError),

    #[error("command error: {0}")]
    Command(String),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) | Self::Command(_) => 2,
            Self::Serialization(_) => 4,
            Self::Io(_) => 10,
        }
    }
}

impl From<kabuchart_core::CoreError> for CliError {
    fn from(error: kabuchart_core::CoreError) -> Self {
        match error {
            kabuchart_core::CoreError::Validation(error) => Self::Validation(error),
            kabuchart_core::CoreError::Serialization(error) => Self::Serialization(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_categories() {
        assert_eq!(
            CliError::from(kabuchart_core::ValidationError::EmptyQuery).exit_code(),
            2
        );
        assert_eq!(CliError::Command(String::from("bad")).exit_code(), 2);
        assert_eq!(
            CliError::from(std::io::Error::other("closed pipe")).exit_code(),
            10
        );
    }
}
