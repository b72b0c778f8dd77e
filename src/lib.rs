pub mod config;
pub mod data_loader;
pub mod error;
pub mod io;
pub mod merge;
pub mod positional;
pub mod prior;
pub mod reconstruction;
pub mod store;
pub mod tokenizer;

pub use error::{ExtrinsicsError, RecordDefect, Result};
pub use merge::{MergeOutcome, apply_extrinsics_prior};
pub use positional::{BindReport, BindStatus, bind_positionally};
pub use prior::{CameraExtrinsicsPrior, Prior};
pub use store::PriorStore;
