use std::fmt;
use std::iter;
use std::mem;

use log::debug;
use slot_buffer as buffer;
use slot_buffer::RawBuffer;

use crate::config::{Config, GrowthPolicy};
use crate::err::Error;

/// A LIFO stack over a `RawBuffer`.
///
/// Slots `[0, len)` of the buffer are live, everything above is
/// uninitialized. Index 0 is the bottom, `len - 1` the top.
pub struct Stack<T> {
    buf: RawBuffer<T>,
    len: usize,
    policy: GrowthPolicy,
}

impl<T> Stack<T> {
    pub fn new() -> Self {
        Self::with_policy(GrowthPolicy::default())
    }

    pub fn with_policy(policy: GrowthPolicy) -> Self {
        Stack {
            buf: RawBuffer::new(),
            len: 0,
            policy,
        }
    }

    fn allocate(capacity: usize, policy: GrowthPolicy) -> Result<Self, buffer::Error> {
        Ok(Stack {
            buf: RawBuffer::allocate(capacity)?,
            len: 0,
            policy,
        })
    }

    /// Reserves exactly `capacity` slots. Zero reserves nothing.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::allocate(capacity, GrowthPolicy::default()).unwrap_or_else(|e| e.fail())
    }

    pub fn try_with_capacity(capacity: usize) -> Result<Self, Error> {
        Ok(Self::allocate(capacity, GrowthPolicy::default())?)
    }

    pub fn with_config(config: &Config) -> Result<Self, Error> {
        Ok(Self::allocate(config.initial_capacity, config.growth)?)
    }

    /// Builds a stack of exactly `capacity` slots from the first `capacity`
    /// values of `values`, bottom to top. A panic while producing a value drops
    /// the ones already written and frees the buffer.
    fn collect_exact<I>(capacity: usize, values: I) -> Result<Self, buffer::Error>
    where
        I: Iterator<Item = T>,
    {
        let mut stack = Self::allocate(capacity, GrowthPolicy::default())?;
        for value in values.take(capacity) {
            unsafe { stack.buf.write(stack.len, value) };
            stack.len += 1;
        }
        Ok(stack)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    pub fn policy(&self) -> GrowthPolicy {
        self.policy
    }

    pub fn as_ptr(&self) -> *const T {
        self.buf.as_ptr()
    }

    fn as_slice(&self) -> &[T] {
        unsafe { self.buf.as_slice(self.len) }
    }

    fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { self.buf.as_mut_slice(self.len) }
    }

    /// Makes room for `additional` more values, growing by policy. On `Err`
    /// the stack is unchanged.
    fn grow(&mut self, additional: usize) -> Result<(), buffer::Error> {
        let required = self
            .len
            .checked_add(additional)
            .ok_or(buffer::Error::CapacityOverflow)?;
        let capacity = self.buf.capacity();
        if required <= capacity {
            return Ok(());
        }
        let new_capacity = self.policy.next_capacity(capacity, required)?;
        debug!(
            "stack.grow policy={:?} len={} capacity={} -> {}",
            self.policy, self.len, capacity, new_capacity
        );
        unsafe { self.buf.relocate(self.len, new_capacity) }
    }

    pub fn reserve(&mut self, additional: usize) {
        self.grow(additional).unwrap_or_else(|e| e.fail())
    }

    pub fn try_reserve(&mut self, additional: usize) -> Result<(), Error> {
        Ok(self.grow(additional)?)
    }

    pub fn push(&mut self, value: T) {
        self.grow(1).unwrap_or_else(|e| e.fail());
        unsafe { self.buf.write(self.len, value) };
        self.len += 1;
    }

    pub fn try_push(&mut self, value: T) -> Result<(), Error> {
        self.grow(1)?;
        unsafe { self.buf.write(self.len, value) };
        self.len += 1;
        Ok(())
    }

    /// Pushes the value built by `make`, which runs once room for it exists.
    pub fn emplace<F>(&mut self, make: F)
    where
        F: FnOnce() -> T,
    {
        self.grow(1).unwrap_or_else(|e| e.fail());
        let value = make();
        unsafe { self.buf.write(self.len, value) };
        self.len += 1;
    }

    pub fn try_emplace<F>(&mut self, make: F) -> Result<(), Error>
    where
        F: FnOnce() -> T,
    {
        self.grow(1)?;
        let value = make();
        unsafe { self.buf.write(self.len, value) };
        self.len += 1;
        Ok(())
    }

    pub fn pop(&mut self) -> Result<T, Error> {
        if self.len == 0 {
            return Err(Error::Underflow);
        }
        self.len -= 1;
        Ok(unsafe { self.buf.read(self.len) })
    }

    pub fn top(&self) -> Result<&T, Error> {
        self.as_slice().last().ok_or(Error::Underflow)
    }

    pub fn top_mut(&mut self) -> Result<&mut T, Error> {
        self.as_mut_slice().last_mut().ok_or(Error::Underflow)
    }

    /// Drops every value, bottom to top. The buffer is kept.
    pub fn clear(&mut self) {
        let len = mem::replace(&mut self.len, 0);
        unsafe { self.buf.drop_range(len) }
    }

    /// Reallocates to exactly `len` slots. An empty stack gives its buffer
    /// back.
    pub fn shrink_to_fit(&mut self) {
        if !self.buf.is_allocated() || self.buf.capacity() <= self.len {
            return;
        }
        debug!("stack.shrink capacity={} -> {}", self.buf.capacity(), self.len);
        unsafe { self.buf.relocate(self.len, self.len) }.unwrap_or_else(|e| e.fail())
    }

    /// Moves everything out into a new stack, leaving this one empty and
    /// unallocated.
    pub fn take(&mut self) -> Self {
        Stack {
            buf: self.buf.take(),
            len: mem::replace(&mut self.len, 0),
            policy: self.policy,
        }
    }

    /// Drops this stack's values, frees its buffer and takes over `source`'s
    /// contents. `source` is left empty and unallocated.
    pub fn move_from(&mut self, source: &mut Self) {
        self.clear();
        self.buf = source.buf.take();
        self.len = mem::replace(&mut source.len, 0);
        self.policy = source.policy;
    }

    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other)
    }
}

impl<T: Clone> Stack<T> {
    pub fn from_slice(values: &[T]) -> Self {
        Self::collect_exact(values.len(), values.iter().cloned()).unwrap_or_else(|e| e.fail())
    }

    /// `n` clones of `value`.
    pub fn from_elem(value: T, n: usize) -> Self {
        Self::collect_exact(n, iter::repeat(value)).unwrap_or_else(|e| e.fail())
    }

    fn clone_exact(&self) -> Result<Self, buffer::Error> {
        let mut copy = Self::collect_exact(self.len, self.as_slice().iter().cloned())?;
        copy.policy = self.policy;
        Ok(copy)
    }

    /// Copies the live values into a buffer of exactly `len` slots. The
    /// source is only read.
    pub fn try_clone(&self) -> Result<Self, Error> {
        Ok(self.clone_exact()?)
    }

    /// Replaces this stack with a copy of `source`. The copy is built first,
    /// so on `Err` (or a panicking clone) this stack is untouched.
    pub fn try_assign_from(&mut self, source: &Self) -> Result<(), Error> {
        let mut copy = source.try_clone()?;
        self.swap(&mut copy);
        Ok(())
    }
}

impl<T> Drop for Stack<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for Stack<T> {
    fn clone(&self) -> Self {
        self.clone_exact().unwrap_or_else(|e| e.fail())
    }

    fn clone_from(&mut self, source: &Self) {
        let mut copy = source.clone();
        self.swap(&mut copy);
    }
}

impl<T, const N: usize> From<[T; N]> for Stack<T> {
    fn from(values: [T; N]) -> Self {
        Self::collect_exact(N, IntoIterator::into_iter(values)).unwrap_or_else(|e| e.fail())
    }
}

impl<T> From<Vec<T>> for Stack<T> {
    fn from(values: Vec<T>) -> Self {
        Self::collect_exact(values.len(), values.into_iter()).unwrap_or_else(|e| e.fail())
    }
}

impl<T: PartialEq> PartialEq for Stack<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for Stack<T> {}

impl<T: fmt::Debug> fmt::Debug for Stack<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}
