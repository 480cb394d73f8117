//! Court and time-slot allocation.
//!
//! Fixtures are placed one at a time on whichever active court frees up
//! first. A placement waits for both competitors' rest periods and is kept
//! inside the venue's working hours, rolling to the next opening when needed.
//! Matches that cannot be placed are reported as conflicts alongside the ones
//! that were.

mod court_queue;
pub mod engine;
pub mod errors;
pub mod models;

pub use engine::SchedulingEngine;
pub use errors::{ConflictReason, SchedulingConflict};
pub use models::{PlayerRestState, ScheduleResult, ScheduledMatch, SchedulingConstraints};
