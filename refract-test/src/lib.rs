pub mod helpers;
mod runner;
mod threshold;

pub use runner::{TestRunner, TestRunnerBuilder};
pub use threshold::Threshold;

/// Routes `log` output through the test harness. Safe to call repeatedly.
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
