//! Visit record model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Sentinel badge for visits that carry no physical badge.
///
/// Always assignable; never counted against the badge pool.
pub const NO_BADGE: &str = "No Badge";

/// Visit record from the database, one row per visit
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Visit {
    pub visitor_id: i32,
    pub guest_first_name: String,
    pub guest_last_name: String,
    pub visitor_type: String,
    pub branch: String,
    pub department_visited: String,
    pub vendor_name: Option<String>,
    pub badge_number: Option<String>,
    /// "Here to see"
    pub host_employee_name: Option<String>,
    pub comments: Option<String>,
    /// Set once, at the transition into CheckedIn
    pub check_in_time: Option<DateTime<Utc>>,
    /// Set once, at the transition into CheckedOut
    pub check_out_time: Option<DateTime<Utc>>,
    pub status: String,
    pub colleague_first_name: Option<String>,
    pub colleague_last_name: Option<String>,
    /// Expected arrival of a pre-registered visit
    pub advance_check_in_time: Option<DateTime<Utc>>,
    pub submission_time: Option<DateTime<Utc>>,
    pub is_advance_check_in: bool,
    pub submitter_ip_address: Option<String>,
}

/// Validated walk-in check-in, ready for insertion
#[derive(Debug, Clone)]
pub struct NewWalkIn {
    pub guest_first_name: String,
    pub guest_last_name: String,
    pub visitor_type: String,
    pub branch: String,
    pub department_visited: String,
    pub vendor_name: Option<String>,
    pub badge_number: String,
    pub host_employee_name: String,
    pub comments: Option<String>,
}

/// Validated pre-registration, ready for insertion
#[derive(Debug, Clone)]
pub struct NewPending {
    pub guest_first_name: String,
    pub guest_last_name: String,
    pub visitor_type: String,
    pub branch: String,
    pub department_visited: String,
    pub vendor_name: Option<String>,
    pub host_employee_name: Option<String>,
    pub comments: Option<String>,
    pub colleague_first_name: String,
    pub colleague_last_name: String,
    pub advance_check_in_time: DateTime<Utc>,
    pub submitter_ip_address: Option<String>,
}

/// Walk-in check-in request
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateVisit {
    pub guest_first_name: Option<String>,
    pub guest_last_name: Option<String>,
    pub visitor_type: Option<String>,
    pub branch: Option<String>,
    pub department: Option<String>,
    pub vendor_name: Option<String>,
    pub badge_number: Option<String>,
    /// "Here to see"
    pub here_to_see: Option<String>,
    pub comments: Option<String>,
}

/// Advance (pre-registration) check-in request
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateAdvanceVisit {
    pub guest_first_name: Option<String>,
    pub guest_last_name: Option<String>,
    pub visitor_type: Option<String>,
    pub branch: Option<String>,
    pub department: Option<String>,
    pub vendor_name: Option<String>,
    pub here_to_see: Option<String>,
    pub comments: Option<String>,
    /// Registering employee (or vendor contact on the vendor portal)
    pub colleague_first_name: Option<String>,
    pub colleague_last_name: Option<String>,
    /// Expected arrival, RFC 3339 or `YYYY-MM-DDTHH:MM` (assumed UTC)
    pub advance_check_in_time: Option<String>,
}
