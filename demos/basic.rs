use anyhow::Result;
use dynamic_array::{dynamic_array, DynamicArray};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // RUST_LOG=dynamic_array=trace shows every reallocation.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("--- Basic Usage Example ---");
    let mut arr = DynamicArray::new();

    for i in 1..=6 {
        arr.push(i * 10);
        println!("Pushed: {}, len: {}, cap: {}", i * 10, arr.len(), arr.capacity());
    }
    println!("Elements: {arr}");

    let pos = (*arr.begin().advance()).position();
    let inserted = arr.insert(pos, 15)?;
    println!("Inserted: {:?}", inserted.get());
    println!("Elements: {arr}");

    let pos = arr.end().position();
    arr.insert(pos, 70)?;
    println!("Appended through end(): {arr}");

    let pos = arr.begin().position();
    arr.erase(pos)?;
    println!("Erased first: {arr}, cap: {}", arr.capacity());

    arr.shrink_to_fit();
    println!("After shrink_to_fit, cap: {}", arr.capacity());

    let copy = arr.clone();
    while let Ok(val) = arr.pop() {
        println!("Popped: {}, len: {}", val, arr.len());
    }
    println!("Copy is untouched: {copy}");

    let words = dynamic_array!["alpha", "beta", "gamma"];
    println!("Third word: {}", words.at(2)?);

    match words.at(3) {
        Ok(word) => println!("Fourth word: {word}"),
        Err(err) => println!("No fourth word: {err}"),
    }
    Ok(())
}
