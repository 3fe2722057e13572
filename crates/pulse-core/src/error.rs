use chrono::NaiveDateTime;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PulseError {
    #[error("User already exists: {0}")]
    DuplicateKey(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Invalid interval: login {login} is after logout {logout}")]
    InvalidInterval {
        login: NaiveDateTime,
        logout: NaiveDateTime,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, PulseError>;
