//! Shared helpers: date arithmetic, numeric coercion and logging.

pub mod date_utils;
pub mod logging;
pub mod numeric;
