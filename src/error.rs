use async_graphql::ErrorExtensions;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Malformed record '{id}': field '{field}': {reason}")]
    MalformedRecord {
        id: String,
        field: &'static str,
        reason: String,
    },

    #[error("Missing reference on record '{record_id}': key '{key}' did not resolve")]
    MissingReference {
        record_id: String,
        key: &'static str,
    },

    #[error("Invalid date argument: {0}")]
    InvalidDate(String),
}

impl AppError {
    fn code(&self) -> &'static str {
        match self {
            AppError::Transport(_) => "TRANSPORT",
            AppError::MalformedRecord { .. } => "MALFORMED_RECORD",
            AppError::MissingReference { .. } => "MISSING_REFERENCE",
            AppError::InvalidDate(_) => "INVALID_DATE",
        }
    }
}

impl ErrorExtensions for AppError {
    fn extend(&self) -> async_graphql::Error {
        match self {
            AppError::Transport(e) => {
                tracing::error!("Transport error: {}", e);
            }
            AppError::MalformedRecord { id, field, reason } => {
                tracing::error!("Malformed record {}: field {}: {}", id, field, reason);
            }
            AppError::MissingReference { record_id, key } => {
                tracing::warn!("Missing reference on {}: {}", record_id, key);
            }
            AppError::InvalidDate(msg) => {
                tracing::warn!("Invalid date argument: {}", msg);
            }
        }

        async_graphql::Error::new(self.to_string())
            .extend_with(|_, e| e.set("code", self.code()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_reference_names_record_and_key() {
        let err = AppError::MissingReference {
            record_id: "v-1".to_string(),
            key: "clienteId",
        };
        let message = err.to_string();
        assert!(message.contains("v-1"));
        assert!(message.contains("clienteId"));
    }

    #[test]
    fn invalid_date_carries_the_offending_input() {
        let err = AppError::InvalidDate("not-a-date".to_string());
        assert!(err.to_string().contains("not-a-date"));
    }
}
