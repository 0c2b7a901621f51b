use anyhow::{Context, Result};
use dynamic_array::{ArrayError, DynamicArray};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

struct Tracked(usize, Arc<AtomicUsize>);

impl Drop for Tracked {
    fn drop(&mut self) {
        println!("Dropping element {}", self.0);
        self.1.fetch_add(1, Ordering::SeqCst);
    }
}

fn drain_one_too_many(drop_count: &Arc<AtomicUsize>) -> Result<(), ArrayError> {
    let mut arr = DynamicArray::new();
    for i in 0..3 {
        arr.push(Tracked(i, drop_count.clone()));
    }
    println!("Array created with 3 elements.");

    for _ in 0..4 {
        arr.pop()?;
    }
    Ok(())
}

fn main() -> Result<()> {
    println!("--- Scoped Release Example ---");
    let drop_count = Arc::new(AtomicUsize::new(0));

    {
        let mut arr = DynamicArray::new();
        for i in 0..3 {
            arr.push(Tracked(i, drop_count.clone()));
        }
        println!("Array created with 3 elements.");
        // Scope ends here, arr is dropped
    }
    println!("Total elements dropped: {}", drop_count.load(Ordering::SeqCst));
    assert_eq!(drop_count.load(Ordering::SeqCst), 3);

    // The error path releases the array exactly like the normal one.
    let err = drain_one_too_many(&drop_count).unwrap_err();
    println!("Propagated error: {err}");
    assert_eq!(err, ArrayError::EmptyContainer);
    assert_eq!(drop_count.load(Ordering::SeqCst), 6);

    let arr: DynamicArray<u8> = DynamicArray::new();
    if let Err(err) = arr.at(0).context("reading from an empty array") {
        println!("{err:#}");
    }
    Ok(())
}
