use core::fmt;
use std::{borrow::Cow, ops::Deref};

/// The category of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A requested output format or handler is not registered.
    UnsupportedFormat,
    /// The element tree is structurally valid but carries unusable input,
    /// e.g. an image without a source.
    Validation,
    /// Reading a resource or writing the package failed.
    Io,
    /// An embedded payload could not be decoded.
    Decode,
    /// Anything else.
    Other,
}

/// An error that can occur during the conversion process.
#[derive(Clone)]
pub struct Error(Box<Repr>);

#[derive(Clone)]
enum Repr {
    UnsupportedFormat(Cow<'static, str>),
    Validation(Cow<'static, str>),
    Io(Cow<'static, str>),
    Decode(Cow<'static, str>),
    Msg(Cow<'static, str>),
}

impl Error {
    /// Creates a configuration error for an unregistered output format.
    pub fn unsupported_format(format: impl fmt::Display) -> Self {
        Error(Box::new(Repr::UnsupportedFormat(
            format!("output format `{format}` is not registered").into(),
        )))
    }

    /// Creates an input validation error.
    pub fn validation(msg: impl Into<Cow<'static, str>>) -> Self {
        Error(Box::new(Repr::Validation(msg.into())))
    }

    /// Creates an I/O error.
    pub fn io(msg: impl Into<Cow<'static, str>>) -> Self {
        Error(Box::new(Repr::Io(msg.into())))
    }

    /// Creates a decoding error.
    pub fn decode(msg: impl Into<Cow<'static, str>>) -> Self {
        Error(Box::new(Repr::Decode(msg.into())))
    }

    /// Returns the category of the error.
    pub fn kind(&self) -> ErrorKind {
        match self.0.deref() {
            Repr::UnsupportedFormat(_) => ErrorKind::UnsupportedFormat,
            Repr::Validation(_) => ErrorKind::Validation,
            Repr::Io(_) => ErrorKind::Io,
            Repr::Decode(_) => ErrorKind::Decode,
            Repr::Msg(_) => ErrorKind::Other,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.deref() {
            Repr::UnsupportedFormat(s) => write!(f, "configuration error: {s}"),
            Repr::Validation(s) => write!(f, "invalid input: {s}"),
            Repr::Io(s) => write!(f, "I/O error: {s}"),
            Repr::Decode(s) => write!(f, "decoding error: {s}"),
            Repr::Msg(s) => write!(f, "{s}"),
        }
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        <Self as fmt::Display>::fmt(self, f)
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error(Box::new(Repr::Io(e.to_string().into())))
    }
}

impl From<fmt::Error> for Error {
    fn from(e: fmt::Error) -> Self {
        Error(Box::new(Repr::Msg(e.to_string().into())))
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error(Box::new(Repr::Msg(e.to_string().into())))
    }
}

impl From<base64::DecodeError> for Error {
    fn from(e: base64::DecodeError) -> Self {
        Error(Box::new(Repr::Decode(e.to_string().into())))
    }
}

impl From<&'static str> for Error {
    fn from(s: &'static str) -> Self {
        Error(Box::new(Repr::Msg(s.into())))
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error(Box::new(Repr::Msg(s.into())))
    }
}

impl From<Cow<'static, str>> for Error {
    fn from(s: Cow<'static, str>) -> Self {
        Error(Box::new(Repr::Msg(s)))
    }
}
