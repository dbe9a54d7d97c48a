use std::alloc::{self, Layout};
use std::marker::PhantomData;
use std::mem;
use std::ptr::{self, NonNull};
use std::slice;

use log::debug;

use crate::err::Error;

/// An owned region of `capacity` uninitialized slots for values of `T`.
///
/// The buffer tracks storage only. It never knows which slots are live, so it
/// never drops a `T` on its own: the owner decides which slots hold values and
/// says so through the `unsafe` slot methods. Dropping the buffer frees the
/// region and leaks whatever is still stored in it.
///
/// Zero-sized types never allocate and report a capacity of `usize::MAX`.
pub struct RawBuffer<T> {
    ptr: NonNull<T>,
    cap: usize,
    _marker: PhantomData<T>,
}

// SAFETY: the buffer uniquely owns its region, like `Box<[T]>`.
unsafe impl<T: Send> Send for RawBuffer<T> {}
unsafe impl<T: Sync> Sync for RawBuffer<T> {}

impl<T> RawBuffer<T> {
    const IS_ZST: bool = mem::size_of::<T>() == 0;

    pub fn new() -> Self {
        RawBuffer {
            ptr: NonNull::dangling(),
            cap: if Self::IS_ZST { usize::MAX } else { 0 },
            _marker: PhantomData,
        }
    }

    /// Allocates exactly `capacity` slots. Zero slots allocate nothing.
    pub fn allocate(capacity: usize) -> Result<Self, Error> {
        if Self::IS_ZST || capacity == 0 {
            return Ok(Self::new());
        }
        let layout = Self::layout(capacity)?;
        let raw = unsafe { alloc::alloc(layout) } as *mut T;
        let ptr = NonNull::new(raw).ok_or(Error::AllocFailed {
            size: layout.size(),
            align: layout.align(),
        })?;
        debug!("buffer.allocate capacity={} bytes={}", capacity, layout.size());
        Ok(RawBuffer {
            ptr,
            cap: capacity,
            _marker: PhantomData,
        })
    }

    fn layout(capacity: usize) -> Result<Layout, Error> {
        Layout::array::<T>(capacity).map_err(|_| Error::CapacityOverflow)
    }

    pub fn capacity(&self) -> usize {
        self.cap
    }

    pub fn is_allocated(&self) -> bool {
        !Self::IS_ZST && self.cap != 0
    }

    pub fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    /// Moves the first `len` slots into a fresh region of `new_capacity`
    /// slots and frees the old one.
    ///
    /// The new region is allocated before anything is touched, so on `Err`
    /// the buffer is exactly as it was.
    ///
    /// # Safety
    ///
    /// Slots `[0, len)` must be live and `len <= new_capacity`.
    pub unsafe fn relocate(&mut self, len: usize, new_capacity: usize) -> Result<(), Error> {
        debug_assert!(len <= self.cap && len <= new_capacity);
        if Self::IS_ZST || new_capacity == self.cap {
            return Ok(());
        }
        let mut fresh = Self::allocate(new_capacity)?;
        // Moves are bitwise. The old slots are dead afterwards and only their
        // storage is freed below.
        ptr::copy_nonoverlapping(self.ptr.as_ptr(), fresh.ptr.as_ptr(), len);
        mem::swap(self, &mut fresh);
        Ok(())
    }

    /// Frees the region. Live slots, if any, are leaked.
    pub fn release(&mut self) {
        *self = Self::new();
    }

    /// Leaves an empty, unallocated buffer behind and returns the old one.
    pub fn take(&mut self) -> Self {
        mem::replace(self, Self::new())
    }

    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other)
    }

    /// # Safety
    ///
    /// `index < capacity` and the slot must not be live.
    pub unsafe fn write(&mut self, index: usize, value: T) {
        debug_assert!(index < self.cap);
        ptr::write(self.ptr.as_ptr().add(index), value)
    }

    /// Moves the value out of a slot, which is dead afterwards.
    ///
    /// # Safety
    ///
    /// `index < capacity` and the slot must be live.
    pub unsafe fn read(&mut self, index: usize) -> T {
        debug_assert!(index < self.cap);
        ptr::read(self.ptr.as_ptr().add(index))
    }

    /// # Safety
    ///
    /// `index < capacity` and the slot must be live. It is dead afterwards.
    pub unsafe fn drop_slot(&mut self, index: usize) {
        debug_assert!(index < self.cap);
        ptr::drop_in_place(self.ptr.as_ptr().add(index))
    }

    /// Drops slots `[0, len)` bottom to top. A panicking destructor does not
    /// stop the rest from being dropped.
    ///
    /// # Safety
    ///
    /// Slots `[0, len)` must be live. They are dead afterwards, even when this
    /// unwinds.
    pub unsafe fn drop_range(&mut self, len: usize) {
        debug_assert!(len <= self.cap);
        ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.ptr.as_ptr(), len))
    }

    /// # Safety
    ///
    /// `index < capacity` and the slot must be live.
    pub unsafe fn slot(&self, index: usize) -> &T {
        debug_assert!(index < self.cap);
        &*self.ptr.as_ptr().add(index)
    }

    /// # Safety
    ///
    /// `index < capacity` and the slot must be live.
    pub unsafe fn slot_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self.cap);
        &mut *self.ptr.as_ptr().add(index)
    }

    /// # Safety
    ///
    /// Slots `[0, len)` must be live.
    pub unsafe fn as_slice(&self, len: usize) -> &[T] {
        debug_assert!(len <= self.cap);
        slice::from_raw_parts(self.ptr.as_ptr(), len)
    }

    /// # Safety
    ///
    /// Slots `[0, len)` must be live.
    pub unsafe fn as_mut_slice(&mut self, len: usize) -> &mut [T] {
        debug_assert!(len <= self.cap);
        slice::from_raw_parts_mut(self.ptr.as_ptr(), len)
    }
}

impl<T> Default for RawBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for RawBuffer<T> {
    fn drop(&mut self) {
        if !self.is_allocated() {
            return;
        }
        if let Ok(layout) = Self::layout(self.cap) {
            debug!("buffer.release capacity={}", self.cap);
            unsafe { alloc::dealloc(self.ptr.as_ptr() as *mut u8, layout) }
        }
    }
}
