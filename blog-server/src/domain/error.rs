use thiserror::Error;

pub const CLIENT_ERROR_MESSAGE: &str = "Undefined input";
pub const SERVER_ERROR_MESSAGE: &str = "Something went wrong with the server";

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Blog not found")]
    BlogNotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl DomainError {
    /// A missing blog is reported the same way as bad input.
    pub fn to_status_code(&self) -> u16 {
        match self {
            Self::InvalidInput(_) | Self::BlogNotFound => 400,
            Self::DatabaseError(_) => 500,
        }
    }

    /// Text sent to the client. Details stay in the logs.
    pub fn public_message(&self) -> &'static str {
        match self.to_status_code() {
            400 => CLIENT_ERROR_MESSAGE,
            _ => SERVER_ERROR_MESSAGE,
        }
    }
}

impl From<sqlx::Error> for DomainError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Self::BlogNotFound,
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_share_one_message() {
        let missing = DomainError::BlogNotFound;
        let invalid = DomainError::InvalidInput("title is required".to_string());

        assert_eq!(missing.to_status_code(), 400);
        assert_eq!(invalid.to_status_code(), 400);
        assert_eq!(missing.public_message(), "Undefined input");
        assert_eq!(invalid.public_message(), "Undefined input");
    }

    #[test]
    fn server_errors_hide_details() {
        let err = DomainError::DatabaseError("disk I/O error".to_string());

        assert_eq!(err.to_status_code(), 500);
        assert_eq!(err.public_message(), "Something went wrong with the server");
    }

    #[test]
    fn row_not_found_maps_to_missing_blog() {
        let err: DomainError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, DomainError::BlogNotFound));
    }
}
