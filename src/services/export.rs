//! Date-ranged CSV export of visit records

use chrono::{DateTime, Days, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::{
    error::{AppError, AppResult},
    models::visit::Visit,
    repository::Repository,
};

const CSV_HEADER: &str = "VisitorID,GuestFirstName,GuestLastName,VisitorType,Branch,\
DepartmentVisited,VendorName,BadgeNumber,HostEmployeeName,Comments,CheckInTime,\
CheckOutTime,Status,ColleagueFirstName,ColleagueLastName,AdvanceCheckInTime,\
SubmissionTime,IsAdvanceCheckIn,SubmitterIPAddress";

/// Marker for optional fields with no value
const NOT_AVAILABLE: &str = "N/A";

/// Result of an export request; an empty range is a normal outcome, not an
/// error, and produces no file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Empty,
    Csv { filename: String, content: String },
}

#[derive(Clone)]
pub struct ExportService {
    repository: Repository,
}

impl ExportService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Export every visit whose check-in time falls on a day in
    /// [start_date, end_date], both given as `YYYY-MM-DD`
    pub async fn export_range(&self, start_date: &str, end_date: &str) -> AppResult<ExportOutcome> {
        let start = parse_date(start_date, "start_date")?;
        let end = parse_date(end_date, "end_date")?;
        let (from, to) = range_bounds(start, end)?;

        tracing::info!("Exporting visitor records from {} to {}", start, end);
        let visits = self.repository.visits.list_between(from, to).await?;

        if visits.is_empty() {
            tracing::info!("No visitor records between {} and {}", start, end);
            return Ok(ExportOutcome::Empty);
        }

        Ok(ExportOutcome::Csv {
            filename: format!("visitor_records_{}_to_{}.csv", start, end),
            content: render_csv(&visits),
        })
    }
}

fn parse_date(value: &str, field: &'static str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("Invalid {} '{}', expected YYYY-MM-DD", field, value)))
}

/// The end boundary is exclusive start-of-next-day, so the whole end day is
/// included
fn range_bounds(start: NaiveDate, end: NaiveDate) -> AppResult<(DateTime<Utc>, DateTime<Utc>)> {
    let next = end
        .checked_add_days(Days::new(1))
        .ok_or_else(|| AppError::Validation(format!("end_date '{}' out of range", end)))?;

    Ok((
        Utc.from_utc_datetime(&start.and_time(NaiveTime::MIN)),
        Utc.from_utc_datetime(&next.and_time(NaiveTime::MIN)),
    ))
}

fn render_csv(visits: &[Visit]) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');
    for visit in visits {
        out.push_str(&render_row(visit));
        out.push('\n');
    }
    out
}

fn render_row(visit: &Visit) -> String {
    let fields = [
        visit.visitor_id.to_string(),
        visit.guest_first_name.clone(),
        visit.guest_last_name.clone(),
        visit.visitor_type.clone(),
        visit.branch.clone(),
        visit.department_visited.clone(),
        opt_text(&visit.vendor_name),
        opt_text(&visit.badge_number),
        opt_text(&visit.host_employee_name),
        opt_text(&visit.comments),
        opt_time(&visit.check_in_time),
        opt_time(&visit.check_out_time),
        visit.status.clone(),
        opt_text(&visit.colleague_first_name),
        opt_text(&visit.colleague_last_name),
        opt_time(&visit.advance_check_in_time),
        opt_time(&visit.submission_time),
        if visit.is_advance_check_in { "Yes" } else { "No" }.to_string(),
        opt_text(&visit.submitter_ip_address),
    ];

    fields
        .iter()
        .map(|f| csv_field(f))
        .collect::<Vec<_>>()
        .join(",")
}

fn opt_text(value: &Option<String>) -> String {
    match value.as_deref().filter(|v| !v.is_empty()) {
        Some(v) => v.to_string(),
        None => NOT_AVAILABLE.to_string(),
    }
}

fn opt_time(value: &Option<DateTime<Utc>>) -> String {
    match value {
        Some(t) => t.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Quote a field when it contains a comma, quote, or line break
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_visit() -> Visit {
        Visit {
            visitor_id: 7,
            guest_first_name: "Jane".to_string(),
            guest_last_name: "Doe".to_string(),
            visitor_type: "Meeting".to_string(),
            branch: "Kiln Creek".to_string(),
            department_visited: "Technology".to_string(),
            vendor_name: None,
            badge_number: Some("56863".to_string()),
            host_employee_name: Some("Tom Smith".to_string()),
            comments: Some("Escort required, badge at desk".to_string()),
            check_in_time: Some(Utc.with_ymd_and_hms(2026, 8, 27, 9, 15, 0).unwrap()),
            check_out_time: None,
            status: "CheckedIn".to_string(),
            colleague_first_name: None,
            colleague_last_name: None,
            advance_check_in_time: None,
            submission_time: None,
            is_advance_check_in: false,
            submitter_ip_address: None,
        }
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2026-08-27", "start_date").unwrap(),
            NaiveDate::from_ymd_opt(2026, 8, 27).unwrap()
        );
        assert!(parse_date("08/27/2026", "start_date").is_err());
        assert!(parse_date("", "end_date").is_err());
    }

    #[test]
    fn test_range_includes_full_end_day() {
        let start = NaiveDate::from_ymd_opt(2026, 8, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2026, 8, 27).unwrap();
        let (from, to) = range_bounds(start, end).unwrap();

        assert_eq!(from, Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap());
        assert_eq!(to, Utc.with_ymd_and_hms(2026, 8, 28, 0, 0, 0).unwrap());

        let last_moment = Utc.with_ymd_and_hms(2026, 8, 27, 23, 59, 59).unwrap();
        assert!(last_moment >= from && last_moment < to);
    }

    #[test]
    fn test_csv_field_quoting() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_field("line\nbreak"), "\"line\nbreak\"");
    }

    #[test]
    fn test_render_row_marks_missing_fields() {
        let row = render_row(&sample_visit());
        assert!(row.starts_with("7,Jane,Doe,Meeting,"));
        // vendor name, check-out time, colleague identity all absent
        assert!(row.contains(",N/A,56863,"));
        assert!(row.contains("2026-08-27 09:15:00,N/A,CheckedIn"));
        assert!(row.ends_with(",No,N/A"));
        // comment contains a comma and must be quoted
        assert!(row.contains("\"Escort required, badge at desk\""));
    }

    #[test]
    fn test_render_csv_has_header_and_one_line_per_visit() {
        let csv = render_csv(&[sample_visit(), sample_visit()]);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("VisitorID,GuestFirstName"));
    }
}
