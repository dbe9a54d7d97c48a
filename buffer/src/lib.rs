pub mod err;
pub mod raw;

pub use err::Error;
pub use raw::RawBuffer;
