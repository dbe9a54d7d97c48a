use slot_buffer as buffer;
use std::error;
use std::fmt;

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Error {
    Underflow,
    Buffer(buffer::Error),
    Config(String),
}

impl error::Error for Error {}
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Underflow => return write!(f, "stack: underflow"),
            Error::Buffer(e) => return write!(f, "stack {}", e),
            Error::Config(e) => return write!(f, "stack config: {}", e),
        };
    }
}

impl From<buffer::Error> for Error {
    fn from(error: buffer::Error) -> Self {
        Error::Buffer(error)
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::Config(format!("{}", error))
    }
}
