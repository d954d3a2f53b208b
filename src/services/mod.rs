//! Business logic services

pub mod export;
pub mod notifier;
pub mod visits;

use crate::{
    config::{NotificationsConfig, VisitsConfig},
    repository::Repository,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub visits: visits::VisitsService,
    pub export: export::ExportService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(
        repository: Repository,
        visits_config: VisitsConfig,
        notifications_config: NotificationsConfig,
    ) -> Self {
        let notifier = notifier::NotificationService::new(notifications_config);
        Self {
            visits: visits::VisitsService::new(
                repository.clone(),
                notifier,
                visits_config.badge_pool,
            ),
            export: export::ExportService::new(repository),
        }
    }
}
