//! API integration tests
//!
//! Run against a live server with a scratch database:
//! cargo test -- --ignored

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

fn walk_in_body(first: &str, badge: &str) -> Value {
    json!({
        "guest_first_name": first,
        "guest_last_name": "Doe",
        "visitor_type": "Vendor",
        "branch": "Kiln Creek",
        "department": "Facilities",
        "badge_number": badge,
        "here_to_see": "Tom Smith"
    })
}

fn advance_body(first: &str) -> Value {
    json!({
        "guest_first_name": first,
        "guest_last_name": "Expected",
        "visitor_type": "Meeting",
        "branch": "1A University",
        "department": "Technology",
        "here_to_see": "Alex Reed",
        "colleague_first_name": "Alex",
        "colleague_last_name": "Reed",
        "advance_check_in_time": "2030-01-15T10:00:00Z"
    })
}

#[tokio::test]
#[ignore]
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_walk_in_check_in_and_badge_exclusion() {
    let client = Client::new();

    let response = client
        .post(format!("{}/checkin", BASE_URL))
        .json(&walk_in_body("Jane", "56863"))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["visit"]["status"], "CheckedIn");
    assert!(body["visit"]["check_in_time"].is_string());
    assert!(body["visit"]["check_out_time"].is_null());
    assert!(body["notification_sent"].is_boolean());

    let records: Value = client
        .get(format!("{}/records", BASE_URL))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    let badges: Vec<&str> = records["available_badges"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(Value::as_str)
        .collect();
    assert_eq!(badges.first(), Some(&"No Badge"));
    assert!(!badges.contains(&"56863"));
}

#[tokio::test]
#[ignore]
async fn test_check_in_missing_fields() {
    let client = Client::new();

    let response = client
        .post(format!("{}/checkin", BASE_URL))
        .json(&json!({ "guest_first_name": "Jane" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("Failed to parse response");
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("guest_last_name"));
    assert!(message.contains("badge_number"));
}

#[tokio::test]
#[ignore]
async fn test_double_checkout_is_conflict() {
    let client = Client::new();

    let created: Value = client
        .post(format!("{}/checkin", BASE_URL))
        .json(&walk_in_body("Twice", "56864"))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    let id = created["visit"]["visitor_id"].as_i64().unwrap();

    let first = client
        .post(format!("{}/checkout/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(first.status().is_success());

    let second = client
        .post(format!("{}/checkout/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(second.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_advance_check_in_and_promotion() {
    let client = Client::new();

    let created: Value = client
        .post(format!("{}/advance-checkin", BASE_URL))
        .json(&advance_body("Pending"))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    assert_eq!(created["visit"]["status"], "Pending");
    assert_eq!(created["visit"]["badge_number"], "No Badge");
    assert_eq!(created["visit"]["is_advance_check_in"], true);
    assert!(created["visit"]["submission_time"].is_string());

    let id = created["visit"]["visitor_id"].as_i64().unwrap();

    let promoted = client
        .post(format!("{}/checkin-pending/{}", BASE_URL, id))
        .json(&json!({ "badge_number": "56865" }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(promoted.status().is_success());

    // A second promotion attempt loses the conditional update
    let again = client
        .post(format!("{}/checkin-pending/{}", BASE_URL, id))
        .json(&json!({ "badge_number": "56866" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(again.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_advance_check_in_rejects_bad_arrival_time() {
    let client = Client::new();

    let mut body = advance_body("Malformed");
    body["advance_check_in_time"] = json!("not-a-timestamp");

    let response = client
        .post(format!("{}/advance-checkin", BASE_URL))
        .json(&body)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_vendor_portal_forces_vendor_type() {
    let client = Client::new();

    let mut body = advance_body("Vendor");
    body["visitor_type"] = json!("Meeting");
    body["vendor_name"] = json!("Acme HVAC");

    let created: Value = client
        .post(format!("{}/vendor-portal", BASE_URL))
        .json(&body)
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    assert_eq!(created["visit"]["visitor_type"], "Vendor");
    assert_eq!(created["visit"]["status"], "Pending");
}

#[tokio::test]
#[ignore]
async fn test_export_empty_range_reports_no_records() {
    let client = Client::new();

    let response = client
        .post(format!("{}/export-csv", BASE_URL))
        .json(&json!({ "start_date": "1999-01-01", "end_date": "1999-01-02" }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "empty");
}

#[tokio::test]
#[ignore]
async fn test_export_returns_csv_attachment() {
    let client = Client::new();

    client
        .post(format!("{}/checkin", BASE_URL))
        .json(&walk_in_body("Exported", "56867"))
        .send()
        .await
        .expect("Failed to send request");

    let today = chrono::Utc::now().format("%Y-%m-%d").to_string();
    let response = client
        .post(format!("{}/export-csv", BASE_URL))
        .json(&json!({ "start_date": today, "end_date": today }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let disposition = response
        .headers()
        .get("content-disposition")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(disposition.contains("visitor_records_"));

    let csv = response.text().await.expect("Failed to read body");
    assert!(csv.starts_with("VisitorID,GuestFirstName"));
    assert!(csv.contains("Exported"));
}
