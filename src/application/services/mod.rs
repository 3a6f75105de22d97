pub mod batcher;
pub mod path_classifier;
