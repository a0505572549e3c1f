//! Service request endpoints.

use tracing::instrument;

use crate::error::Result;

use super::ApiClient;
use super::types::{NewServiceRequest, ServiceRequest};

impl ApiClient {
    /// Submit a service request (inspection, refill, installation, ...).
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, request), fields(subject = %request.subject))]
    pub async fn submit_request(&self, request: &NewServiceRequest) -> Result<ServiceRequest> {
        self.post_json("/api/requests", request).await
    }

    /// List the caller's service requests.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn my_requests(&self) -> Result<Vec<ServiceRequest>> {
        self.get_json("/api/requests/my-requests", &[]).await
    }
}
