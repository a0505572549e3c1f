//! Notification commands.

use embermart_client::{ApiClient, ClientError};
use embermart_core::NotificationId;

/// List notifications with an unread summary.
///
/// # Errors
///
/// Returns an error if the API request fails.
pub async fn list(api: &ApiClient) -> Result<(), ClientError> {
    let notifications = api.notifications().await?;
    if notifications.is_empty() {
        println!("No notifications.");
        return Ok(());
    }

    let unread = notifications.iter().filter(|n| !n.read).count();
    println!("{} notification(s), {unread} unread:", notifications.len());
    for notification in &notifications {
        let marker = if notification.read { " " } else { "*" };
        println!(
            " {marker} #{:<5} {}  {}",
            notification.id,
            notification.created_at.format("%Y-%m-%d"),
            notification.message
        );
    }
    Ok(())
}

/// Mark one notification read.
///
/// # Errors
///
/// Returns an error if the notification does not exist or the request
/// fails.
pub async fn read(api: &ApiClient, id: i64) -> Result<(), ClientError> {
    let updated = api.mark_notification_read(NotificationId::new(id)).await?;
    println!("Marked #{} read.", updated.id);
    Ok(())
}
