//! Example showing how tombstones build up under insert/delete churn
//!
//! Run with `RUST_LOG=debug` to see every table rebuild.

use linmap::{HashMap, MapError, ResizePolicy, TombstonePolicy};

fn churn(name: &str, policy: ResizePolicy) -> Result<(), MapError> {
    let mut map = HashMap::with_policy(policy);

    for i in 0..1000u32 {
        map.set(format!("Element {i}"), i)?;
    }
    println!("[{name}] after 1000 inserts:\n{}\n", map.stats());

    for i in 0..1000u32 {
        map.delete(format!("Element {i}").as_str())?;
    }
    println!("[{name}] after deleting them all:\n{}\n", map.stats());

    for i in 0..10_000u32 {
        let key = format!("Fresh {i}");
        map.set(key.clone(), i)?;
        map.delete(key.as_str())?;
    }
    println!("[{name}] after 10000 set/delete pairs:\n{}\n", map.stats());

    match map.get("Element 0") {
        Err(MapError::KeyNotFound) => println!("[{name}] lookup of a deleted key: {}", MapError::KeyNotFound),
        other => println!("[{name}] unexpected lookup result: {other:?}"),
    }
    println!();
    Ok(())
}

fn main() -> Result<(), MapError> {
    env_logger::init();

    println!("=== linmap tombstone churn ===\n");

    churn("keep until grow", ResizePolicy::default())?;
    churn(
        "purge on load",
        ResizePolicy::new().with_tombstones(TombstonePolicy::PurgeOnLoad),
    )?;

    let small: HashMap<i32, &str> = HashMap::from([(1, "one"), (2, "two")]);
    println!("small map:\n{small}");
    println!("missing key with default: {}", small.get_or_default(&3, &"custom value"));
    Ok(())
}
