use std::fmt;

#[derive(Debug)]
pub enum Error {
    Connection(mongodb::error::Error),
    Write(mongodb::error::Error),
    Read(mongodb::error::Error),
    Parse(chrono::ParseError),
    JsonError(serde_json::Error),
    BsonSerError(bson::ser::Error),
    InvalidRequest(String),
    WriteRejected(String),
    UnexpectedError(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Connection(e) => write!(f, "Connection failed: {}", e),
            Error::Write(e) => write!(f, "Write failed: {}", e),
            Error::Read(e) => write!(f, "Read failed: {}", e),
            Error::Parse(e) => write!(f, "Invalid ISO-8601 date: {}", e),
            Error::JsonError(e) => write!(f, "{}", e),
            Error::BsonSerError(e) => write!(f, "{}", e),
            Error::InvalidRequest(reason)
            | Error::WriteRejected(reason)
            | Error::UnexpectedError(reason) => write!(f, "{}", reason),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Connection(e) | Error::Write(e) | Error::Read(e) => Some(e),
            Error::Parse(e) => Some(e),
            Error::JsonError(e) => Some(e),
            Error::BsonSerError(e) => Some(e),
            _ => None,
        }
    }
}

impl Error {
    /// Returns `true` for the failures of a write (insert or update), whether
    /// reported by the server or rejected by the in-process store.
    pub fn is_write_error(&self) -> bool {
        matches!(self, Error::Write(_) | Error::WriteRejected(_))
    }
}

impl From<chrono::ParseError> for Error {
    fn from(err: chrono::ParseError) -> Self {
        Error::Parse(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::JsonError(err)
    }
}

impl From<bson::ser::Error> for Error {
    fn from(err: bson::ser::Error) -> Self {
        Error::BsonSerError(err)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
