//! Lesson: Protecting Shared Data with a Mutex
//! The lock is owned by the data it guards and released when the guard drops.
//!
//! Run with: cargo run --bin guarded_list

use colored::Colorize;
use std::sync::Arc;
use std::thread;
use threading_basics::GuardedList;

fn single_thread(list: &GuardedList<i32>) {
    list.add(1);
    list.add(2);
    list.add(3);

    for value in [1, 3, 4] {
        println!("contains({}) = {}", value, list.contains(&value));
    }
}

fn many_writers() {
    let list = Arc::new(GuardedList::new());
    let mut handles = vec![];

    for id in 0..4 {
        let list = Arc::clone(&list);
        handles.push(thread::spawn(move || {
            for i in 0..5 {
                list.add(id * 10 + i);
            }
            log::debug!("writer {} done", id);
        }));
    }

    for handle in handles {
        if handle.join().is_err() {
            log::error!("a writer thread panicked");
        }
    }

    let mut items = list.snapshot();
    items.sort();
    println!("{} items after 4 writers: {:?}", items.len(), items);
}

fn main() {
    threading_basics::init_logging("info");

    println!("{}\n", "=== Guarded List ===".bold());
    let list = GuardedList::new();
    single_thread(&list);

    println!("\n{}\n", "=== Shared Between Threads ===".bold());
    many_writers();

    println!("\n{}", "=== Key Points ===".bold());
    println!("1. The Mutex lives inside the list, not in a global next to it");
    println!("2. MutexGuard unlocks on drop, on every return path");
    println!("3. Share the list with & or Arc; the lock travels with it");
}
