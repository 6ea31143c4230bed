//! Printable schedule layout engine.
//!
//! Turns a [`ScheduleRequest`](crate::models::shift::ScheduleRequest) into
//! pages of backend-neutral draw instructions. Components, leaf first:
//! geometry, classifier, identity, cell packing, week grid, pagination.
//! Layout is pure: no I/O, no clock, no shared state.

pub mod cell;
pub mod classifier;
pub mod geometry;
pub mod identity;
pub mod pagination;
pub mod text;
pub mod week_grid;

pub use classifier::{DayBucket, GridShift};
pub use geometry::PageGeometry;
pub use identity::{CaregiverIdentity, IdentityResolver};
pub use pagination::ScheduleLayoutService;
