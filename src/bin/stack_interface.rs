//! Lesson: Race Conditions Inherent in Interfaces
//! Locking every method is not enough if callers combine them.
//!
//! Run with: cargo run --bin stack_interface

use colored::Colorize;
use std::thread;
use threading_basics::ThreadSafeStack;

/// Items a consumer took, or 0 (logged) if it panicked.
fn taken_or_log(id: usize, joined: thread::Result<usize>) -> usize {
    joined.unwrap_or_else(|_| {
        log::error!("consumer {} panicked", id);
        0
    })
}

fn drain_with_try_pop(stack: &ThreadSafeStack<u32>, consumers: usize) -> Vec<usize> {
    thread::scope(|s| {
        let handles: Vec<_> = (0..consumers)
            .map(|_| {
                s.spawn(|| {
                    let mut taken = 0;
                    // `is_empty()` followed by `pop()` could lose the last item to another
                    // consumer. `try_pop` checks and removes under one lock.
                    while stack.try_pop().is_some() {
                        taken += 1;
                    }
                    taken
                })
            })
            .collect();

        handles
            .into_iter()
            .enumerate()
            .map(|(id, h)| taken_or_log(id, h.join()))
            .collect()
    })
}

fn main() {
    threading_basics::init_logging("info");

    println!("{}\n", "=== Draining a Shared Stack ===".bold());
    let stack = ThreadSafeStack::new();
    for i in 0..10_000 {
        stack.push(i);
    }

    let per_consumer = drain_with_try_pop(&stack, 4);
    let total: usize = per_consumer.iter().sum();
    println!("Taken per consumer: {:?}", per_consumer);
    println!("Total taken: {} (stack now empty: {})", total, stack.is_empty());

    println!("\n{}\n", "=== Popping an Empty Stack ===".bold());
    match stack.pop() {
        Ok(v) => println!("Popped {}", v),
        Err(e) => println!("{}", e.to_string().yellow()),
    }

    println!("\n{}", "=== Key Points ===".bold());
    println!("1. The result of is_empty()/len() can be stale before you act on it");
    println!("2. Merge the check and the removal: try_pop() returns Option<T>");
    println!("3. pop() returns Result, so an empty stack is an error, not UB");
    println!("4. swap() locks both stacks in address order to avoid deadlock");
}
