pub mod run_batched;
