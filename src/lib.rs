//! Small threading lessons: a parallel sum over scoped threads, a mutex-guarded list,
//! and a stack whose interface has no check-then-act race.

pub mod config;
pub mod error;
pub mod guarded_list;
pub mod partition;
pub mod reduce;
pub mod stack;

pub use config::SumConfig;
pub use error::{ConfigError, ReduceError, StackError};
pub use guarded_list::GuardedList;
pub use partition::{check_partitions, chunk_size, partition};
pub use reduce::{accumulate_sum, map_partitions, naive_sum, reduce_sum};
pub use stack::ThreadSafeStack;

/// Initialise `env_logger` with `default_filter` unless `RUST_LOG` says otherwise.
pub fn init_logging(default_filter: &str) {
    let env = env_logger::Env::default().default_filter_or(default_filter);
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .try_init();
}
