pub mod error;
pub mod format;
pub mod report;
pub mod resolve;
pub mod signal;
pub mod supervisor;

pub use error::{PtimeError, Result};
pub use signal::SignalRelay;
pub use supervisor::{ExecutionResult, Invocation};
