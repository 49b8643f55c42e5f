use ringlist::{AllocError, Allocator, StackAllocator, StackStorage};
use std::mem::{align_of, size_of};

fn addr<T>(ptr: std::ptr::NonNull<T>) -> usize {
    ptr.as_ptr() as usize
}

#[test]
fn test_mixed_types_share_storage() -> anyhow::Result<()> {
    let storage = StackStorage::<512>::new();
    let bytes = StackAllocator::<u8, 512>::new(&storage);
    let words: StackAllocator<'_, u64, 512> = bytes.rebind();
    let halves: StackAllocator<'_, u16, 512> = words.rebind();

    let mut spans = Vec::new();
    spans.push((addr(bytes.allocate(5)?), 5));
    spans.push((addr(words.allocate(3)?), 3 * size_of::<u64>()));
    spans.push((addr(halves.allocate(7)?), 7 * size_of::<u16>()));
    spans.push((addr(bytes.allocate(1)?), 1));
    spans.push((addr(words.allocate(1)?), size_of::<u64>()));

    assert_eq!(spans[1].0 % align_of::<u64>(), 0);
    assert_eq!(spans[2].0 % align_of::<u16>(), 0);
    assert_eq!(spans[4].0 % align_of::<u64>(), 0);

    // Spans come out in address order and never overlap.
    for pair in spans.windows(2) {
        let ((lo, len), (hi, _)) = (pair[0], pair[1]);
        assert!(lo + len <= hi, "{pair:?} overlap");
    }

    let payload: usize = spans.iter().map(|&(_, len)| len).sum();
    assert!(storage.used() >= payload);
    assert_eq!(storage.used() + storage.remaining(), storage.capacity());
    Ok(())
}

#[test]
fn test_exhaustion_reports_request_and_remaining() -> anyhow::Result<()> {
    let storage = StackStorage::<100>::new();
    let alloc = StackAllocator::<[u8; 30], 100>::new(&storage);

    for _ in 0..3 {
        alloc.allocate(1)?;
    }
    assert_eq!(storage.remaining(), 10);

    let err = alloc.allocate(1).unwrap_err();
    assert!(err.is_exhausted());
    assert_eq!(
        err,
        AllocError::Exhausted {
            requested: 30,
            remaining: 10
        }
    );
    assert_eq!(err.to_string(), "arena exhausted: requested 30 bytes, 10 remaining");

    // A smaller request still fits after the failure.
    let small: StackAllocator<'_, u8, 100> = alloc.rebind();
    small.allocate(10)?;
    assert_eq!(storage.remaining(), 0);
    assert!(small.allocate(1).is_err());
    Ok(())
}

#[test]
fn test_alignment_padding_counts_against_capacity() -> anyhow::Result<()> {
    let storage = StackStorage::<16>::new();
    let bytes = StackAllocator::<u8, 16>::new(&storage);
    let words: StackAllocator<'_, u64, 16> = bytes.rebind();

    bytes.allocate(1)?;
    // Padding up to the next word leaves no room for a second one.
    let before = storage.used();
    match words.allocate(2) {
        Err(err) => assert!(err.is_exhausted()),
        Ok(ptr) => panic!("16 bytes of words fit after a byte at {:#x}", addr(ptr)),
    }
    assert_eq!(storage.used(), before);
    Ok(())
}

#[test]
fn test_overflowing_count_is_not_exhaustion() {
    let storage = StackStorage::<64>::new();
    let alloc = StackAllocator::<u64, 64>::new(&storage);
    assert_eq!(alloc.allocate(usize::MAX).unwrap_err(), AllocError::CapacityOverflow);
    assert_eq!(storage.used(), 0);
}

#[test]
fn test_rebound_handles_are_equal_across_types() {
    let storage = StackStorage::<64>::new();
    let other = StackStorage::<32>::new();

    let a = StackAllocator::<u8, 64>::new(&storage);
    let b: StackAllocator<'_, (u32, char), 64> = a.rebind();
    let c: StackAllocator<'_, u8, 64> = b.rebind();
    let d = StackAllocator::<u8, 32>::new(&other);

    assert!(a == b);
    assert!(b == c);
    assert!(a == c);
    assert!(a != d);
    assert!(b != d);
}

#[test]
fn test_copies_share_the_offset() -> anyhow::Result<()> {
    let storage = StackStorage::<64>::new();
    let a = StackAllocator::<u32, 64>::new(&storage);
    let b = a;

    let first = a.allocate(2)?;
    let second = b.allocate(2)?;
    assert_eq!(addr(second), addr(first) + 8);
    assert!(storage.used() >= 16);
    Ok(())
}

#[test]
fn test_construct_and_destroy_in_arena() -> anyhow::Result<()> {
    let storage = StackStorage::<128>::new();
    let alloc = StackAllocator::<String, 128>::new(&storage);

    let slot = alloc.allocate(1)?;
    unsafe {
        alloc.construct(slot, String::from("arena"));
        assert_eq!(slot.as_ref(), "arena");
        alloc.destroy(slot);
        alloc.deallocate(slot, 1);
    }
    assert!(storage.used() >= size_of::<String>());
    Ok(())
}
