extern crate slot_buffer;

use std::cell::Cell;
use std::rc::Rc;

use slot_buffer::*;

struct Counted {
    drops: Rc<Cell<usize>>,
}

impl Drop for Counted {
    fn drop(&mut self) {
        self.drops.set(self.drops.get() + 1);
    }
}

fn counted(drops: &Rc<Cell<usize>>) -> Counted {
    Counted { drops: drops.clone() }
}

#[test]
fn test_relocate_does_not_drop() {
    let _ = env_logger::builder().is_test(true).try_init();
    let drops = Rc::new(Cell::new(0));
    let mut buf: RawBuffer<Counted> = RawBuffer::allocate(1).unwrap();
    unsafe {
        buf.write(0, counted(&drops));
        buf.relocate(1, 2).unwrap();
        buf.write(1, counted(&drops));
        buf.relocate(2, 4).unwrap();
    }
    assert_eq!(drops.get(), 0);
    assert_eq!(buf.capacity(), 4);
    unsafe { buf.drop_range(2) };
    assert_eq!(drops.get(), 2);
}

#[test]
fn test_release_leaves_slots_alone() {
    let drops = Rc::new(Cell::new(0));
    let mut buf: RawBuffer<Counted> = RawBuffer::allocate(3).unwrap();
    let value = unsafe {
        buf.write(0, counted(&drops));
        buf.read(0)
    };
    buf.release();
    assert_eq!(buf.capacity(), 0);
    assert_eq!(drops.get(), 0);
    drop(value);
    assert_eq!(drops.get(), 1);
}

#[test]
fn test_drop_slot() {
    let drops = Rc::new(Cell::new(0));
    let mut buf: RawBuffer<Counted> = RawBuffer::allocate(2).unwrap();
    unsafe {
        buf.write(0, counted(&drops));
        buf.write(1, counted(&drops));
        buf.drop_slot(1);
        assert_eq!(drops.get(), 1);
        buf.drop_slot(0);
    }
    assert_eq!(drops.get(), 2);
}

#[test]
fn test_as_mut_slice() {
    let mut buf: RawBuffer<u32> = RawBuffer::allocate(3).unwrap();
    unsafe {
        for i in 0..3 {
            buf.write(i, i as u32);
        }
        buf.as_mut_slice(3).reverse();
        assert_eq!(buf.as_slice(3), &[2, 1, 0]);
    }
}

#[test]
fn test_error_display() {
    assert_eq!(format!("{}", Error::CapacityOverflow), "buffer: capacity overflow");
    assert_eq!(
        format!("{}", Error::AllocFailed { size: 64, align: 8 }),
        "buffer: allocation failed size=64 align=8"
    );
}

#[test]
#[should_panic(expected = "capacity overflow")]
fn test_error_fail_overflow() {
    Error::CapacityOverflow.fail();
}
