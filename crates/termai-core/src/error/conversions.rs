//! From implementations for external error types

use super::types::TermaiError;

impl From<reqwest::Error> for TermaiError {
    fn from(err: reqwest::Error) -> Self {
        TermaiError::Http {
            message: err.to_string(),
            status_code: err.status().map(|s| s.as_u16()),
        }
    }
}

impl From<serde_json::Error> for TermaiError {
    fn from(err: serde_json::Error) -> Self {
        TermaiError::Json {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for TermaiError {
    fn from(err: std::io::Error) -> Self {
        TermaiError::Io {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let error: TermaiError = json_error.into();
        assert!(matches!(error, TermaiError::Json { .. }));
        assert!(error.to_string().starts_with("JSON error:"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing binary");
        let error: TermaiError = io_error.into();
        assert!(matches!(error, TermaiError::Io { .. }));
        assert!(error.to_string().contains("missing binary"));
    }

    #[test]
    fn test_http_error_carries_status() {
        let error = TermaiError::http("OpenAI API error: quota exceeded", Some(429));
        match error {
            TermaiError::Http { status_code, .. } => assert_eq!(status_code, Some(429)),
            other => panic!("unexpected variant: {other:?}"),
        }
    }
}
