//! Algorithm implementations for the feature pipeline
//!
//! This module contains the pieces every feature group is built from:
//! index admission resolution, day-window aggregation over event offsets,
//! and the composite clinical score engines.

pub mod index_event;
pub mod scores;
pub mod window;

pub use index_event::{IndexAdmission, resolve_index_admission};
pub use window::{DayWindow, LabStatistics};
