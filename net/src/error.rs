use std::io;

use thiserror::Error;

#[cfg(test)]
mod tests {
    use std::io;
    use super::*;

    #[test]
    fn it_maps_eof_to_end_of_input() {
        let err: Error = io::Error::new(io::ErrorKind::UnexpectedEof, "eof").into();
        assert!(matches!(err, Error::UnexpectedEof));
        assert!(!err.is_protocol_violation());
    }

    #[test]
    fn it_maps_write_zero_to_short_write() {
        let err: Error = io::Error::new(io::ErrorKind::WriteZero, "full").into();
        assert!(matches!(err, Error::ShortWrite));
    }

    #[test]
    fn it_keeps_other_io_errors() {
        let err: Error = io::Error::new(io::ErrorKind::ConnectionReset, "reset").into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn it_flags_message_errors_as_violations() {
        let err = Error::message("GetheadersMessage::decode", "too many locators");
        assert!(err.is_protocol_violation());
        assert_eq!(err.to_string(), "GetheadersMessage::decode: too many locators");
    }
}

/// Failures surfaced by every encode and decode operation.
///
/// Transport problems (`UnexpectedEof`, `ShortWrite`, `Io`) are kept apart from
/// `Message`, which means the peer sent something semantically invalid.
#[derive(Debug, Error)]
pub enum Error {
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("short write")]
    ShortWrite,
    #[error("{func}: {description}")]
    Message {
        func: &'static str,
        description: String,
    },
    #[error("io error: {0}")]
    Io(io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn message<S: Into<String>>(func: &'static str, description: S) -> Error {
        Error::Message {
            func,
            description: description.into(),
        }
    }

    /// True when the remote side broke the protocol, as opposed to the
    /// stream failing underneath us.
    pub fn is_protocol_violation(&self) -> bool {
        matches!(*self, Error::Message { .. })
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::UnexpectedEof => Error::UnexpectedEof,
            io::ErrorKind::WriteZero => Error::ShortWrite,
            _ => Error::Io(err),
        }
    }
}
