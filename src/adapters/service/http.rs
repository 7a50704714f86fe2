//! HTTP implementation of the import service
//!
//! One multipart POST submits a dataset; one GET per poll reads its status.
//! Nothing here retries: a failed request surfaces as
//! [`DepotError::Transport`] and the caller decides what to do with it.

use super::models::{StatusReport, StatusResponse, SubmitResponse};
use super::DatasetService;
use crate::config::ServiceConfig;
use crate::domain::{DepotError, ExportMetadata, JobId, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, ClientBuilder, Response};
use secrecy::ExposeSecret;
use std::path::Path;
use std::time::Duration;

const ARCHIVE_MIME: &str = "application/gzip";
const JSON_MIME: &str = "application/json";

/// reqwest-backed [`DatasetService`]
///
/// # Example
///
/// ```no_run
/// use depot::adapters::service::HttpDatasetService;
/// use depot::config::ServiceConfig;
///
/// # fn example() -> depot::domain::Result<()> {
/// let service = HttpDatasetService::new(&ServiceConfig::default())?
///     .with_header("User-ID", "123")?;
/// # Ok(())
/// # }
/// ```
pub struct HttpDatasetService {
    client: Client,
    base_url: String,
    collection_url: String,
    config: ServiceConfig,
    headers: HeaderMap,
}

impl std::fmt::Debug for HttpDatasetService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpDatasetService")
            .field("collection_url", &self.collection_url)
            .field("header_count", &self.headers.len())
            .finish()
    }
}

impl HttpDatasetService {
    /// Build a service client from configuration
    ///
    /// # Errors
    ///
    /// Returns [`DepotError::Configuration`] if a configured header name or
    /// value is not a valid HTTP header, or the HTTP client cannot be built.
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let mut client_builder = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(30));

        if !config.tls_verify {
            tracing::warn!(base_url = %config.base_url, "TLS certificate verification disabled");
            client_builder = client_builder.danger_accept_invalid_certs(true);
        }

        let client = client_builder.build().map_err(|e| {
            DepotError::Configuration(format!("Failed to build HTTP client: {e}"))
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(JSON_MIME));
        for (name, value) in &config.headers {
            insert_header(&mut headers, name, value.expose_secret().as_ref())?;
        }

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            collection_url: config.collection_url(),
            config: config.clone(),
            headers,
        })
    }

    /// Attach an extra header to every request
    ///
    /// # Errors
    ///
    /// Returns [`DepotError::Configuration`] for an invalid header.
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self> {
        insert_header(&mut self.headers, name, value)?;
        Ok(self)
    }

    async fn check_status(response: Response, action: &str) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(DepotError::Transport(format!(
            "{action} failed with status {status}: {}",
            body.trim()
        )))
    }
}

/// Inserts a header, marking it sensitive so it is redacted in debug output
fn insert_header(headers: &mut HeaderMap, name: &str, value: &str) -> Result<()> {
    let header_name = HeaderName::from_bytes(name.as_bytes())
        .map_err(|e| DepotError::Configuration(format!("Invalid header name '{name}': {e}")))?;
    let mut header_value = HeaderValue::from_str(value).map_err(|e| {
        DepotError::Configuration(format!("Invalid value for header '{name}': {e}"))
    })?;
    header_value.set_sensitive(true);
    headers.insert(header_name, header_value);
    Ok(())
}

#[async_trait]
impl DatasetService for HttpDatasetService {
    async fn submit(&self, archive: &Path, metadata: &ExportMetadata) -> Result<JobId> {
        let bytes = tokio::fs::read(archive).await.map_err(|e| {
            DepotError::Io(format!("Failed to read archive {}: {}", archive.display(), e))
        })?;
        let file_name = archive
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "dataset.tgz".to_string());
        let meta = serde_json::to_string(metadata)
            .map_err(|e| DepotError::Input(format!("Failed to serialize metadata: {e}")))?;

        let archive_size = bytes.len();
        let file_part = Part::bytes(bytes)
            .file_name(file_name.clone())
            .mime_str(ARCHIVE_MIME)
            .map_err(|e| DepotError::Transport(e.to_string()))?;
        let meta_part = Part::text(meta)
            .mime_str(JSON_MIME)
            .map_err(|e| DepotError::Transport(e.to_string()))?;
        let form = Form::new()
            .part("file", file_part)
            .part("meta", meta_part)
            .text("uploadMethod", "file");

        tracing::debug!(
            url = %self.collection_url,
            archive = %file_name,
            archive_size,
            "Submitting dataset"
        );

        let response = self
            .client
            .post(&self.collection_url)
            .headers(self.headers.clone())
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                DepotError::Transport(format!(
                    "Failed to submit dataset to {}: {e}",
                    self.collection_url
                ))
            })?;

        let response = Self::check_status(response, "Dataset submission").await?;
        let body = response
            .text()
            .await
            .map_err(|e| DepotError::Transport(format!("Failed to read submission response: {e}")))?;

        let parsed: SubmitResponse = serde_json::from_str(&body).map_err(|e| {
            DepotError::Transport(format!("Malformed submission response: {e}"))
        })?;

        parsed.into_job_id()
    }

    async fn fetch_status(&self, job_id: &JobId) -> Result<StatusReport> {
        let url = self.config.job_url(job_id.as_str());

        let response = self
            .client
            .get(&url)
            .headers(self.headers.clone())
            .send()
            .await
            .map_err(|e| DepotError::Transport(format!("Failed to query status at {url}: {e}")))?;

        let response = Self::check_status(response, "Status query").await?;
        let body = response
            .text()
            .await
            .map_err(|e| DepotError::Transport(format!("Failed to read status response: {e}")))?;

        let parsed: StatusResponse = serde_json::from_str(&body)
            .map_err(|e| DepotError::Transport(format!("Malformed status response: {e}")))?;

        parsed.classify()
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;
    use crate::domain::{DatasetType, JobStatus};
    use mockito::Matcher;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn config_for(url: String) -> ServiceConfig {
        let mut config = ServiceConfig {
            base_url: url,
            ..Default::default()
        };
        config
            .headers
            .insert("Admin-Token".to_string(), secret_string("t0k3n".to_string()));
        config
    }

    fn metadata() -> ExportMetadata {
        ExportMetadata::builder()
            .name("My genes")
            .dataset_type(DatasetType::new("GeneList", "1.0"))
            .project("PlasmoDB")
            .build()
            .unwrap()
    }

    fn archive() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"archive-bytes").unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_invalid_header_is_configuration_error() {
        let mut config = ServiceConfig::default();
        config
            .headers
            .insert("Bad Header".to_string(), secret_string("x".to_string()));
        assert!(matches!(
            HttpDatasetService::new(&config),
            Err(DepotError::Configuration(_))
        ));
    }

    #[test]
    fn test_debug_does_not_leak_headers() {
        let service = HttpDatasetService::new(&config_for("http://localhost".into())).unwrap();
        assert!(!format!("{service:?}").contains("t0k3n"));
    }

    #[tokio::test]
    async fn test_submit_returns_job_id() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/vdi-datasets")
            .match_header("Admin-Token", "t0k3n")
            .match_header("User-ID", "123")
            .match_header(
                "content-type",
                Matcher::Regex("^multipart/form-data".to_string()),
            )
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex(r#"name="file""#.to_string()),
                Matcher::Regex(r#"name="meta""#.to_string()),
                Matcher::Regex(r#""datasetType":\{"name":"GeneList","version":"1.0"\}"#.to_string()),
                Matcher::Regex(r#"name="uploadMethod""#.to_string()),
                Matcher::Regex("archive-bytes".to_string()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"jobId":"J1"}"#)
            .create_async()
            .await;

        let service = HttpDatasetService::new(&config_for(server.url()))
            .unwrap()
            .with_header("User-ID", "123")
            .unwrap();
        let file = archive();

        let job_id = service.submit(file.path(), &metadata()).await.unwrap();
        assert_eq!(job_id.as_str(), "J1");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_submit_non_success_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/vdi-datasets")
            .with_status(500)
            .with_body("database unavailable")
            .create_async()
            .await;

        let service = HttpDatasetService::new(&config_for(server.url())).unwrap();
        let file = archive();

        let err = service.submit(file.path(), &metadata()).await.unwrap_err();
        match err {
            DepotError::Transport(msg) => {
                assert!(msg.contains("500"));
                assert!(msg.contains("database unavailable"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_submit_missing_job_id() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/vdi-datasets")
            .with_status(200)
            .with_body(r#"{"id":"J1"}"#)
            .create_async()
            .await;

        let service = HttpDatasetService::new(&config_for(server.url())).unwrap();
        let file = archive();

        assert!(matches!(
            service.submit(file.path(), &metadata()).await,
            Err(DepotError::Transport(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_status() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/vdi-datasets/J1")
            .match_header("Admin-Token", "t0k3n")
            .with_status(200)
            .with_body(r#"{"status":"invalid","messages":["bad header line"]}"#)
            .create_async()
            .await;

        let service = HttpDatasetService::new(&config_for(server.url())).unwrap();
        let report = service
            .fetch_status(&JobId::new("J1").unwrap())
            .await
            .unwrap();

        assert_eq!(report.status, JobStatus::Invalid);
        assert_eq!(report.messages, vec!["bad header line"]);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_status_encodes_job_id_and_accepts_null_messages() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/vdi-datasets/2024%2F07%20run")
            .with_status(200)
            .with_body(r#"{"status":"complete","messages":null,"importMessages":null}"#)
            .create_async()
            .await;

        let service = HttpDatasetService::new(&config_for(server.url())).unwrap();
        let report = service
            .fetch_status(&JobId::new("2024/07 run").unwrap())
            .await
            .unwrap();

        assert_eq!(report.status, JobStatus::Complete);
        assert!(report.messages.is_empty());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_status_malformed_json() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/vdi-datasets/J1")
            .with_status(200)
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        let service = HttpDatasetService::new(&config_for(server.url())).unwrap();
        let result = service.fetch_status(&JobId::new("J1").unwrap()).await;

        assert!(matches!(result, Err(DepotError::Transport(_))));
    }

    #[tokio::test]
    async fn test_fetch_status_not_found() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/vdi-datasets/J1")
            .with_status(404)
            .create_async()
            .await;

        let service = HttpDatasetService::new(&config_for(server.url())).unwrap();
        let err = service
            .fetch_status(&JobId::new("J1").unwrap())
            .await
            .unwrap_err();

        assert!(err.to_string().contains("404"));
    }
}
