//! Visitor lifecycle service
//!
//! Business rules for a visit record from creation to closure. Validation
//! happens entirely before any write; state transitions are delegated to the
//! repository's conditional updates, which are the sole concurrency guard.

use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::{Branch, Department, VisitorType},
        visit::{CreateAdvanceVisit, CreateVisit, NewPending, NewWalkIn, Visit, NO_BADGE},
    },
    repository::Repository,
    services::notifier::NotificationService,
};

/// Which pre-registration surface a submission came through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingMode {
    /// Employee pre-registering a guest
    Advance,
    /// Self-service vendor portal; visitor type is forced to Vendor
    VendorPortal,
}

#[derive(Clone)]
pub struct VisitsService {
    repository: Repository,
    notifier: NotificationService,
    badge_pool: Vec<String>,
}

impl VisitsService {
    pub fn new(repository: Repository, notifier: NotificationService, badge_pool: Vec<String>) -> Self {
        Self {
            repository,
            notifier,
            badge_pool,
        }
    }

    /// Walk-in check-in: insert a CheckedIn record, then fire the arrival
    /// notification. The notification outcome is reported but never fails
    /// the check-in.
    pub async fn create_walk_in(&self, request: CreateVisit) -> AppResult<(Visit, bool)> {
        let new = validate_walk_in(&request)?;

        tracing::info!("Checking in walk-in visitor: {}", new.guest_last_name);
        let visit = self.repository.visits.insert_checked_in(&new).await?;

        // Dispatch only after the insert is committed
        let notification_sent = self.notifier.notify_check_in(&visit).await;

        Ok((visit, notification_sent))
    }

    /// Employee pre-registration of an expected guest
    pub async fn create_advance(
        &self,
        request: CreateAdvanceVisit,
        submitter_ip: Option<String>,
    ) -> AppResult<Visit> {
        let new = validate_pending(&request, PendingMode::Advance, submitter_ip)?;

        tracing::info!("Pre-registering visitor: {}", new.guest_last_name);
        self.repository.visits.insert_pending(&new, NO_BADGE).await
    }

    /// Vendor-portal pre-registration; visitor type is always Vendor
    pub async fn create_vendor(
        &self,
        request: CreateAdvanceVisit,
        submitter_ip: Option<String>,
    ) -> AppResult<Visit> {
        let new = validate_pending(&request, PendingMode::VendorPortal, submitter_ip)?;

        tracing::info!("Pre-registering vendor visitor: {}", new.guest_last_name);
        self.repository.visits.insert_pending(&new, NO_BADGE).await
    }

    /// Promote a pending visit to checked-in, assigning the given badge
    pub async fn promote_pending(&self, visitor_id: i32, badge_number: &str) -> AppResult<()> {
        let badge = badge_number.trim();
        if badge.is_empty() {
            return Err(AppError::Validation(
                "Missing required fields: badge_number".to_string(),
            ));
        }

        tracing::info!("Checking in pending visitor {} with badge {}", visitor_id, badge);
        self.repository.visits.promote_pending(visitor_id, badge).await
    }

    /// Check out a visitor
    pub async fn checkout(&self, visitor_id: i32) -> AppResult<()> {
        tracing::info!("Checking out visitor {}", visitor_id);
        self.repository.visits.checkout(visitor_id).await
    }

    /// Live roster: all non-pending visits, most recent first
    pub async fn list_active(&self) -> AppResult<Vec<Visit>> {
        self.repository.visits.list_active().await
    }

    /// Pending pre-registrations, soonest expected arrival first
    pub async fn list_pending(&self) -> AppResult<Vec<Visit>> {
        self.repository.visits.list_pending().await
    }

    /// Badges currently offerable: the sentinel first, then the pool minus
    /// badges held by checked-in visitors
    pub async fn available_badges(&self) -> AppResult<Vec<String>> {
        let in_use = self.repository.visits.checked_in_badges().await?;
        Ok(available_from(&self.badge_pool, &in_use))
    }

    /// Count of visitors currently on-site; 0 when the query fails, with the
    /// failure logged rather than surfaced
    pub async fn current_occupancy(&self) -> i64 {
        match self.repository.visits.count_checked_in().await {
            Ok(count) => count,
            Err(e) => {
                tracing::error!("Failed to get current occupancy: {}", e);
                0
            }
        }
    }
}

fn take_required(
    value: &Option<String>,
    field: &'static str,
    missing: &mut Vec<&'static str>,
) -> String {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => {
            missing.push(field);
            String::new()
        }
    }
}

fn take_optional(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}

fn missing_fields_error(missing: &[&'static str]) -> AppError {
    AppError::Validation(format!("Missing required fields: {}", missing.join(", ")))
}

/// Parse a submitted enum label into its canonical form
fn parse_label<T: FromStr + ToString>(
    value: &str,
    field: &'static str,
    invalid: &mut Vec<String>,
) -> String {
    match value.parse::<T>() {
        Ok(parsed) => parsed.to_string(),
        Err(_) => {
            invalid.push(format!("{} '{}'", field, value));
            String::new()
        }
    }
}

fn invalid_values_error(invalid: &[String]) -> AppError {
    AppError::Validation(format!("Invalid values: {}", invalid.join(", ")))
}

/// Expected-arrival timestamps arrive as RFC 3339 or as the bare
/// `YYYY-MM-DDTHH:MM[:SS]` a datetime-local input produces (taken as UTC).
fn parse_expected_arrival(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    None
}

fn validate_walk_in(request: &CreateVisit) -> AppResult<NewWalkIn> {
    let mut missing = Vec::new();

    let guest_first_name = take_required(&request.guest_first_name, "guest_first_name", &mut missing);
    let guest_last_name = take_required(&request.guest_last_name, "guest_last_name", &mut missing);
    let visitor_type = take_required(&request.visitor_type, "visitor_type", &mut missing);
    let branch = take_required(&request.branch, "branch", &mut missing);
    let department = take_required(&request.department, "department", &mut missing);
    let badge_number = take_required(&request.badge_number, "badge_number", &mut missing);
    let host_employee_name = take_required(&request.here_to_see, "here_to_see", &mut missing);

    if !missing.is_empty() {
        return Err(missing_fields_error(&missing));
    }

    let mut invalid = Vec::new();
    let visitor_type = parse_label::<VisitorType>(&visitor_type, "visitor_type", &mut invalid);
    let branch = parse_label::<Branch>(&branch, "branch", &mut invalid);
    let department_visited = parse_label::<Department>(&department, "department", &mut invalid);

    if !invalid.is_empty() {
        return Err(invalid_values_error(&invalid));
    }

    Ok(NewWalkIn {
        guest_first_name,
        guest_last_name,
        visitor_type,
        branch,
        department_visited,
        vendor_name: take_optional(&request.vendor_name),
        badge_number,
        host_employee_name,
        comments: take_optional(&request.comments),
    })
}

fn validate_pending(
    request: &CreateAdvanceVisit,
    mode: PendingMode,
    submitter_ip: Option<String>,
) -> AppResult<NewPending> {
    let mut missing = Vec::new();

    let guest_first_name = take_required(&request.guest_first_name, "guest_first_name", &mut missing);
    let guest_last_name = take_required(&request.guest_last_name, "guest_last_name", &mut missing);
    let branch = take_required(&request.branch, "branch", &mut missing);
    let department = take_required(&request.department, "department", &mut missing);
    let colleague_first_name =
        take_required(&request.colleague_first_name, "colleague_first_name", &mut missing);
    let colleague_last_name =
        take_required(&request.colleague_last_name, "colleague_last_name", &mut missing);
    let arrival = take_required(&request.advance_check_in_time, "advance_check_in_time", &mut missing);

    let (visitor_type, vendor_name, host_employee_name) = match mode {
        PendingMode::Advance => (
            take_required(&request.visitor_type, "visitor_type", &mut missing),
            take_optional(&request.vendor_name),
            Some(take_required(&request.here_to_see, "here_to_see", &mut missing)),
        ),
        PendingMode::VendorPortal => (
            VisitorType::Vendor.to_string(),
            Some(take_required(&request.vendor_name, "vendor_name", &mut missing)),
            take_optional(&request.here_to_see),
        ),
    };

    if !missing.is_empty() {
        return Err(missing_fields_error(&missing));
    }

    let mut invalid = Vec::new();
    let visitor_type = parse_label::<VisitorType>(&visitor_type, "visitor_type", &mut invalid);
    let branch = parse_label::<Branch>(&branch, "branch", &mut invalid);
    let department_visited = parse_label::<Department>(&department, "department", &mut invalid);

    if !invalid.is_empty() {
        return Err(invalid_values_error(&invalid));
    }

    let advance_check_in_time = parse_expected_arrival(&arrival).ok_or_else(|| {
        AppError::Validation(format!("Invalid advance check-in time format: '{}'", arrival))
    })?;

    Ok(NewPending {
        guest_first_name,
        guest_last_name,
        visitor_type,
        branch,
        department_visited,
        vendor_name,
        host_employee_name,
        comments: take_optional(&request.comments),
        colleague_first_name,
        colleague_last_name,
        advance_check_in_time,
        submitter_ip_address: submitter_ip,
    })
}

/// Badge pool minus badges in use, with the no-badge sentinel always first
fn available_from(pool: &[String], in_use: &[String]) -> Vec<String> {
    let mut available = vec![NO_BADGE.to_string()];
    available.extend(
        pool.iter()
            .filter(|badge| !in_use.contains(badge))
            .cloned(),
    );
    available
}
