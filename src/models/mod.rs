//! Data models for Foyer

pub mod enums;
pub mod visit;

// Re-export commonly used types
pub use enums::{Branch, Department, VisitStatus, VisitorType};
pub use visit::{CreateAdvanceVisit, CreateVisit, NewPending, NewWalkIn, Visit, NO_BADGE};
