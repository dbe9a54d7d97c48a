//! A LIFO stack over manually managed slot storage.
//!
//! `Stack<T>` keeps its values in a `RawBuffer<T>` from the `slot-buffer`
//! crate and controls every slot's lifetime itself: values are written into
//! uninitialized slots on push, moved out on pop and dropped on clear or drop.

mod config;
mod err;
mod macros;
mod stack;

pub use config::{Config, GrowthPolicy};
pub use err::Error;
pub use slot_buffer as buffer;
pub use stack::Stack;
