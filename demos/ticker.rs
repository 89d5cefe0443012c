//! A minimal display driver: ticks a minutes:seconds counter on an interval
//! and prints it.
//!
//! ```text
//! cargo run --example ticker -- 20 100
//! ```
//!
//! Arguments: number of ticks (default 10), interval in milliseconds
//! (default 500).

use std::thread;
use std::time::Duration;

use escalator::{Counter, CounterError, SectionSpec};

fn main() -> Result<(), CounterError> {
    let mut args = std::env::args().skip(1);
    let ticks: u32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(10);
    let interval: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(500);

    let mut counter = Counter::new([
        SectionSpec::new("minutes").range(60),
        SectionSpec::new("seconds").range(60),
    ])?;
    counter.set_expandable();

    for _ in 0..ticks {
        counter.increase("seconds", 1)?;
        println!("{counter}");
        thread::sleep(Duration::from_millis(interval));
    }

    Ok(())
}
