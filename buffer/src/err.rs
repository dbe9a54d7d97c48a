use std::alloc::{handle_alloc_error, Layout};
use std::error;
use std::fmt;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    CapacityOverflow,
    AllocFailed { size: usize, align: usize },
}

impl Error {
    /// Reports the failure the way the standard collections do: capacity
    /// overflow panics, an exhausted allocator goes to `handle_alloc_error`.
    pub fn fail(self) -> ! {
        match self {
            Error::CapacityOverflow => panic!("capacity overflow"),
            Error::AllocFailed { size, align } => match Layout::from_size_align(size, align) {
                Ok(layout) => handle_alloc_error(layout),
                Err(_) => panic!("allocation of {} bytes failed", size),
            },
        }
    }
}

impl error::Error for Error {}
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::CapacityOverflow => return write!(f, "buffer: capacity overflow"),
            Error::AllocFailed { size, align } => {
                return write!(f, "buffer: allocation failed size={} align={}", size, align)
            }
        };
    }
}
