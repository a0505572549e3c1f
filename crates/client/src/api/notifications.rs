//! Notification endpoints.

use tracing::instrument;

use embermart_core::NotificationId;

use crate::error::Result;

use super::ApiClient;
use super::types::Notification;

impl ApiClient {
    /// List the caller's notifications, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn notifications(&self) -> Result<Vec<Notification>> {
        self.get_json("/api/notifications", &[]).await
    }

    /// Mark one notification read; returns the updated notification.
    ///
    /// # Errors
    ///
    /// Returns an error if the notification does not exist or the API
    /// request fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn mark_notification_read(&self, id: NotificationId) -> Result<Notification> {
        self.put_empty(&format!("/api/notifications/{id}/read"))
            .await
    }
}
