//! Service request commands.

use embermart_client::api::types::NewServiceRequest;
use embermart_client::{ApiClient, ClientError};

/// Submit a service request.
///
/// # Errors
///
/// Returns an error if the API request fails.
pub async fn submit(
    api: &ApiClient,
    subject: &str,
    description: &str,
    equipment_type: &str,
) -> Result<(), ClientError> {
    let request = NewServiceRequest {
        subject: subject.to_string(),
        description: description.to_string(),
        equipment_type: equipment_type.to_string(),
    };
    let created = api.submit_request(&request).await?;
    println!(
        "Request #{} submitted ({}).",
        created.id,
        created.status.label()
    );
    Ok(())
}

/// List your service requests.
///
/// # Errors
///
/// Returns an error if the API request fails.
pub async fn list(api: &ApiClient) -> Result<(), ClientError> {
    let requests = api.my_requests().await?;
    if requests.is_empty() {
        println!("No service requests yet.");
        return Ok(());
    }

    for request in &requests {
        println!(
            "  #{:<5} {:<12} [{}] {} ({})",
            request.id,
            request.status.label(),
            request.equipment_type,
            request.subject,
            request.created_at.format("%Y-%m-%d")
        );
    }
    Ok(())
}
