use axum::http::StatusCode;

/// Failures raised by the fuel log core.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum FuelError {
    /// A date or number in a record or request could not be read.
    #[error("parse error: {0}")]
    Parse(String),
    /// A projection input was not a finite positive number.
    #[error("{field} must be a finite positive number")]
    InvalidInput { field: &'static str },
    /// The query matched no trip entries.
    #[error("no data available")]
    NoData,
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<FuelError> for AppError {
    fn from(err: FuelError) -> Self {
        let status = match err {
            FuelError::Parse(_) | FuelError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            FuelError::NoData => StatusCode::NOT_FOUND,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::internal(err)
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
