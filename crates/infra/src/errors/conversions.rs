//! Conversions from external infrastructure errors into domain errors.

use launchbot_domain::LaunchBotError;
use reqwest::Error as HttpError;
use rusqlite::Error as SqlError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub LaunchBotError);

impl From<InfraError> for LaunchBotError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<LaunchBotError> for InfraError {
    fn from(value: LaunchBotError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoLaunchBotError {
    fn into_launchbot(self) -> LaunchBotError;
}

/* -------------------------------------------------------------------------- */
/* rusqlite::Error → LaunchBotError */
/* -------------------------------------------------------------------------- */

impl IntoLaunchBotError for SqlError {
    fn into_launchbot(self) -> LaunchBotError {
        use rusqlite::ffi::ErrorCode;
        use rusqlite::Error as RE;

        match self {
            RE::SqliteFailure(err, maybe_message) => {
                let message = maybe_message.unwrap_or_default();
                match (err.code, err.extended_code) {
                    (ErrorCode::DatabaseBusy, _) => {
                        LaunchBotError::Database("database is busy".into())
                    }
                    (ErrorCode::DatabaseLocked, _) => {
                        LaunchBotError::Database("database is locked".into())
                    }
                    (ErrorCode::ConstraintViolation, 2067) => {
                        LaunchBotError::Database("unique constraint violation".into())
                    }
                    _ => LaunchBotError::Database(format!(
                        "sqlite failure {:?} (code {}): {}",
                        err.code, err.extended_code, message
                    )),
                }
            }
            RE::FromSqlConversionFailure(_, _, cause) => {
                LaunchBotError::Database(format!("failed to convert sqlite value: {cause}"))
            }
            RE::InvalidColumnType(_, name, ty) => {
                LaunchBotError::Database(format!("invalid column type for {name}: {ty}"))
            }
            RE::InvalidPath(path) => LaunchBotError::Database(format!(
                "invalid database path: {}",
                path.to_string_lossy()
            )),
            other => LaunchBotError::Database(other.to_string()),
        }
    }
}

impl From<SqlError> for InfraError {
    fn from(value: SqlError) -> Self {
        InfraError(value.into_launchbot())
    }
}

/* -------------------------------------------------------------------------- */
/* r2d2::Error → LaunchBotError */
/* -------------------------------------------------------------------------- */

impl From<r2d2::Error> for InfraError {
    fn from(value: r2d2::Error) -> Self {
        InfraError(LaunchBotError::Database(format!("connection pool: {value}")))
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → LaunchBotError */
/* -------------------------------------------------------------------------- */

impl From<serde_json::Error> for InfraError {
    fn from(value: serde_json::Error) -> Self {
        InfraError(LaunchBotError::Internal(format!("invalid stored document: {value}")))
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → LaunchBotError */
/* -------------------------------------------------------------------------- */

impl IntoLaunchBotError for HttpError {
    fn into_launchbot(self) -> LaunchBotError {
        if self.is_timeout() {
            return LaunchBotError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return LaunchBotError::Network("HTTP connection failure".into());
        }

        if self.is_decode() {
            return LaunchBotError::Provider(format!("unexpected response body: {self}"));
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return match code {
                401 | 403 => LaunchBotError::ProviderAuth(message),
                400..=499 => LaunchBotError::Provider(message),
                _ => LaunchBotError::Network(message),
            };
        }

        LaunchBotError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_launchbot())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
