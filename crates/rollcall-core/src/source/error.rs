use thiserror::Error;

/// Failures while materializing the people table.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("No roster source configured (set a CSV path or a sheet export URL)")]
    NotConfigured,

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Unauthorized - the sheet export may not be published")]
    Unauthorized,

    #[error("Sheet not found: {0}")]
    NotFound(String),

    #[error("Rate limited - please wait before retrying")]
    RateLimited,

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Failed to read roster file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed roster CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing expected columns {missing:?}; present: {present:?}")]
    MissingColumns {
        missing: Vec<String>,
        present: Vec<String>,
    },
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl SourceError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            let mut cut = MAX_ERROR_BODY_LENGTH;
            while !body.is_char_boundary(cut) {
                cut -= 1;
            }
            format!("{}... (truncated, {} total bytes)", &body[..cut], body.len())
        }
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let truncated = Self::truncate_body(body);
        match status.as_u16() {
            401 => SourceError::Unauthorized,
            403 => SourceError::AccessDenied(truncated),
            404 => SourceError::NotFound(truncated),
            429 => SourceError::RateLimited,
            500..=599 => SourceError::ServerError(truncated),
            _ => SourceError::InvalidResponse(format!("Status {}: {}", status, truncated)),
        }
    }
}
