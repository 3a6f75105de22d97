pub mod process_runner;
pub mod settlement;

pub use process_runner::{current_environment, Environment, ProcessRunner, ShellProcessRunner};
pub use settlement::SettleOnce;
