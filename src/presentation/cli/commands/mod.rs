pub mod batch_run;

pub use batch_run::*;
