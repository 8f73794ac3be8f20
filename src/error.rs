use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::Display;
use serde_json::json;
use sqlx::error::ErrorKind;

/// SQLite primary result code shared by every constraint failure.
const SQLITE_CONSTRAINT: i32 = 19;

#[derive(Debug, Display)]
pub enum StoreError {
    /// A required field was missing or empty.
    #[display(fmt = "{}", _0)]
    Validation(String),

    #[display(fmt = "Member not found")]
    NotFound,

    /// A constraint rejected an attendance write. `op` names the operation
    /// (`check-in` / `check-out`), `cause` is the driver's message.
    #[display(fmt = "Database integrity error during {}: {}", op, cause)]
    Integrity { op: &'static str, cause: String },

    #[display(fmt = "Database error: {}", _0)]
    Database(sqlx::Error),
}

impl StoreError {
    /// Classifies a failed attendance write: constraint violations become
    /// `Integrity`, anything else stays a plain database error.
    pub fn from_write(op: &'static str, e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &e {
            let is_constraint = db_err.kind() != ErrorKind::Other
                || db_err
                    .code()
                    .and_then(|code| code.parse::<i32>().ok())
                    .is_some_and(|code| code & 0xff == SQLITE_CONSTRAINT);

            if is_constraint {
                return StoreError::Integrity {
                    op,
                    cause: db_err.message().to_string(),
                };
            }
        }

        StoreError::Database(e)
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError::Database(e)
    }
}

impl ResponseError for StoreError {
    fn status_code(&self) -> StatusCode {
        match self {
            StoreError::Validation(_) => StatusCode::BAD_REQUEST,
            StoreError::NotFound => StatusCode::NOT_FOUND,
            StoreError::Integrity { .. } | StoreError::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let detail = match self {
            StoreError::Database(e) => {
                tracing::error!(error = %e, "Database error");
                "Internal Server Error".to_string()
            }
            StoreError::Integrity { op, cause } => {
                tracing::error!(cause = %cause, "Integrity error during {op}");
                self.to_string()
            }
            _ => self.to_string(),
        };

        HttpResponse::build(self.status_code()).json(json!({ "detail": detail }))
    }
}
