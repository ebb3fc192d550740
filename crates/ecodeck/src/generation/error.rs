use thiserror::Error;

/// Failure of a single generation request.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The service answered with a non-success status.
    #[error("{0}")]
    Service(String),

    /// The request never produced a readable answer (network, TLS, IO).
    #[error("{0}")]
    Transport(String),

    #[error("no response from generation service")]
    EmptyResponse,

    /// The text payload is not a well-formed slide array.
    #[error("malformed slide payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GenerationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_error_shows_message_verbatim() {
        let err =
            GenerationError::Service("API key not valid. Please pass a valid API key.".to_string());
        assert_eq!(
            err.to_string(),
            "API key not valid. Please pass a valid API key."
        );
    }

    #[test]
    fn test_empty_response_message() {
        assert_eq!(
            GenerationError::EmptyResponse.to_string(),
            "no response from generation service"
        );
    }

    #[test]
    fn test_malformed_includes_parse_error() {
        let parse_err = serde_json::from_str::<Vec<u8>>("[1,").unwrap_err();
        let detail = parse_err.to_string();
        let err = GenerationError::from(parse_err);
        assert!(err.to_string().starts_with("malformed slide payload: "));
        assert!(err.to_string().contains(&detail));
    }
}
