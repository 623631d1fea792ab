//! Logging utilities for output and progress tracking
//!
//! Operation logging, console summaries of the finished table and progress bars.

pub mod console;
pub mod log;
pub mod progress;

pub use log::{log_operation_complete, log_operation_start, log_warning};
pub use progress::{create_loading_spinner, create_patient_progress_bar, finish_progress_bar};
