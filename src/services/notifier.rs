//! Check-in notification dispatcher
//!
//! Fire-and-forget webhook alert sent after a walk-in check-in has been
//! committed. Every failure mode (missing configuration, timeout, network
//! error, non-2xx response) is logged and reported as `false`; the return
//! type carries no error so a notification outcome can never fail a check-in.

use chrono::Utc;
use serde_json::{json, Value};
use std::time::Duration;

use crate::{config::NotificationsConfig, models::visit::Visit};

#[derive(Clone)]
pub struct NotificationService {
    config: NotificationsConfig,
    client: Option<reqwest::Client>,
}

impl NotificationService {
    pub fn new(config: NotificationsConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build();

        let client = match client {
            Ok(client) => Some(client),
            Err(e) => {
                tracing::error!("Failed to build notification HTTP client: {}", e);
                None
            }
        };

        Self { config, client }
    }

    /// Send the arrival card for a committed check-in. Returns whether the
    /// endpoint accepted it; never errors.
    pub async fn notify_check_in(&self, visit: &Visit) -> bool {
        let Some(endpoint) = self.config.endpoint() else {
            tracing::warn!("Webhook URL not configured or placeholder; skipping notification");
            return false;
        };
        let Some(client) = &self.client else {
            return false;
        };

        tracing::info!("Sending check-in notification for {}", visit.guest_last_name);

        let payload = check_in_card(visit);
        match client.post(endpoint).json(&payload).send().await {
            Ok(response) if response.status().is_success() => {
                tracing::info!(
                    "Check-in notification sent (status {})",
                    response.status().as_u16()
                );
                true
            }
            Ok(response) => {
                tracing::error!(
                    "Check-in notification rejected with status {}",
                    response.status().as_u16()
                );
                false
            }
            Err(e) => {
                if e.is_timeout() {
                    tracing::error!("Check-in notification timed out");
                } else {
                    tracing::error!("Failed to send check-in notification: {}", e);
                }
                false
            }
        }
    }
}

/// Adaptive Card message summarizing the arrival
fn check_in_card(visit: &Visit) -> Value {
    let timestamp = visit
        .check_in_time
        .unwrap_or_else(Utc::now)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string();

    let mut body = vec![
        json!({
            "type": "TextBlock",
            "text": "Visitor Check-In Alert",
            "weight": "bolder",
            "size": "medium",
            "color": "accent"
        }),
        json!({
            "type": "TextBlock",
            "text": format!("{} {} has arrived.", visit.guest_first_name, visit.guest_last_name),
            "wrap": true
        }),
        json!({
            "type": "FactSet",
            "facts": [
                { "title": "Host:", "value": visit.host_employee_name.as_deref().unwrap_or("N/A") },
                { "title": "Type:", "value": visit.visitor_type },
                { "title": "Branch:", "value": visit.branch },
                { "title": "Badge:", "value": visit.badge_number.as_deref().unwrap_or("N/A") },
                { "title": "Time:", "value": timestamp }
            ]
        }),
    ];

    if let Some(comments) = visit.comments.as_deref().filter(|c| !c.is_empty()) {
        body.push(json!({
            "type": "TextBlock",
            "text": "Comments:",
            "weight": "bolder",
            "wrap": true,
            "separator": true
        }));
        body.push(json!({
            "type": "TextBlock",
            "text": comments,
            "wrap": true
        }));
    }

    json!({
        "type": "message",
        "attachments": [
            {
                "contentType": "application/vnd.microsoft.card.adaptive",
                "contentUrl": null,
                "content": {
                    "$schema": "http://adaptivecards.io/schemas/adaptive-card.json",
                    "type": "AdaptiveCard",
                    "version": "1.4",
                    "body": body
                }
            }
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_visit() -> Visit {
        Visit {
            visitor_id: 1,
            guest_first_name: "Jane".to_string(),
            guest_last_name: "Doe".to_string(),
            visitor_type: "Vendor".to_string(),
            branch: "Kiln Creek".to_string(),
            department_visited: "Facilities".to_string(),
            vendor_name: Some("Acme Coffee".to_string()),
            badge_number: Some("56863".to_string()),
            host_employee_name: Some("Tom Smith".to_string()),
            comments: None,
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
    fn test_card_summarizes_arrival() {
        let card = check_in_card(&sample_visit());

        let content = &card["attachments"][0]["content"];
        assert_eq!(content["type"], "AdaptiveCard");

        let body = content["body"].as_array().unwrap();
        assert_eq!(body.len(), 3);
        assert_eq!(body[1]["text"], "Jane Doe has arrived.");

        let facts = body[2]["facts"].as_array().unwrap();
        assert_eq!(facts[0]["value"], "Tom Smith");
        assert_eq!(facts[3]["value"], "56863");
        assert_eq!(facts[4]["value"], "2026-08-27 09:15:00");
    }

    #[test]
    fn test_card_appends_comments_section_when_present() {
        let mut visit = sample_visit();
        visit.comments = Some("Needs parking validation".to_string());

        let card = check_in_card(&visit);
        let body = card["attachments"][0]["content"]["body"].as_array().unwrap();
        assert_eq!(body.len(), 5);
        assert_eq!(body[4]["text"], "Needs parking validation");
    }

    #[tokio::test]
    async fn test_notify_skips_without_endpoint() {
        let service = NotificationService::new(NotificationsConfig::default());
        assert!(!service.notify_check_in(&sample_visit()).await);
    }
}
