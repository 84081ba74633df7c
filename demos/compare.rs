//! Limiter comparison demo.
//!
//! Drives each strategy at a fixed synthetic request rate and prints the
//! accept/reject outcome of every request.
//!
//! Run with:
//! ```
//! cargo run --example compare --features all-limiters
//! ```

use std::thread;
use std::time::Duration;

use rategate::{FixedWindow, LeakyBucket, Limiter, SlidingLog, TokenBucket};

fn main() {
    println!("=== Limiter Comparison Demo ===\n");
    println!("Each limiter: ~5 requests/second sustained, driven at 200ms intervals\n");

    drive("Token Bucket", &TokenBucket::new(5.0, 2.0));
    drive("Leaky Bucket", &LeakyBucket::new(5.0, 1.0));
    drive("Fixed Window", &FixedWindow::new(5, Duration::from_secs(1)));
    drive("Sliding Log", &SlidingLog::new(5, Duration::from_secs(1)));

    println!("\n=== Strategy Characteristics ===\n");
    println!("| Limiter      | Memory | Burst Handling  | Best For            |");
    println!("|--------------|--------|-----------------|---------------------|");
    println!("| Token Bucket | Low    | Up to capacity  | Bursty traffic      |");
    println!("| Leaky Bucket | Low    | Smooths output  | Stable backend load |");
    println!("| Fixed Window | Low    | Boundary bursts | Simple use cases    |");
    println!("| Sliding Log  | High   | Strict rolling  | Precision critical  |");
}

/// Drive 15 requests, 200ms apart, against one limiter and print outcomes.
fn drive(name: &str, limiter: &dyn Limiter) {
    print!("{:13} | ", name);

    let mut results = Vec::new();
    for _ in 0..15 {
        results.push(if limiter.allow() { "✅" } else { "❌" });
        thread::sleep(Duration::from_millis(200));
    }

    println!("{}", results.join(" "));
}
