//! Spec execution engine
//!
//! Launches one JVM per spec and aggregates outcomes, sequentially or with
//! bounded concurrency.

mod invoker;
mod parallel;
mod runner;

pub use invoker::{InvocationOutcome, Invoker, JavaInvoker};
pub use parallel::ParallelExecutor;
pub use runner::SequentialRunner;
