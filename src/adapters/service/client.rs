//! Service client factory
//!
//! Builds the [`DatasetService`] an export talks to from configuration and
//! the exporting user's identity.

use crate::config::ServiceConfig;
use crate::domain::{Result, UserId};
use std::sync::Arc;

use super::{DatasetService, HttpDatasetService};

/// Import service client that wraps a [`DatasetService`] implementation
pub struct ServiceClient {
    service: Arc<dyn DatasetService>,
}

impl ServiceClient {
    /// Create a client from configuration
    ///
    /// When `service.user_id_header` is configured and a user id is given,
    /// the id is sent under that header on every request.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client or a header cannot
    /// be built.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use depot::adapters::service::ServiceClient;
    /// use depot::config::ServiceConfig;
    /// use depot::domain::UserId;
    ///
    /// # fn example() -> depot::domain::Result<()> {
    /// let user = UserId::from_email("jane.123@example.org").unwrap();
    /// let client = ServiceClient::new(&ServiceConfig::default(), Some(&user))?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(config: &ServiceConfig, user_id: Option<&UserId>) -> Result<Self> {
        let mut service = HttpDatasetService::new(config)?;

        if let (Some(header), Some(user_id)) = (&config.user_id_header, user_id) {
            service = service.with_header(header, user_id.as_str())?;
        }

        tracing::debug!(
            base_url = %config.base_url,
            resource = %config.resource,
            "Import service client created"
        );

        Ok(Self {
            service: Arc::new(service),
        })
    }

    /// Wrap an existing service implementation
    pub fn from_service(service: Arc<dyn DatasetService>) -> Self {
        Self { service }
    }

    /// Get a handle to the underlying service implementation
    pub fn service(&self) -> Arc<dyn DatasetService> {
        Arc::clone(&self.service)
    }

    pub fn base_url(&self) -> &str {
        self.service.base_url()
    }
}
