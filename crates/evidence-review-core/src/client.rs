use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::codec::parse_records;
use crate::record::RecordSet;
use crate::{ImageLoadError, LoadError, SaveError};

pub const DEFAULT_BASE_URL: &str = "http://localhost:5001";
pub const DEFAULT_CSV_PATH: &str = "/resultados_validacion.csv";
pub const DEFAULT_SAVE_PATH: &str = "/save-results";
pub const DEFAULT_IMAGES_PATH: &str = "/evidencias/";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// JSON body of a save request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavePayload {
    pub csv_data: String,
}

/// Absolute URLs of the three server endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub csv_url: String,
    pub save_url: String,
    pub images_url: String,
}

impl Endpoints {
    /// Join endpoint paths onto a server base URL.
    pub fn from_base(base: &str, csv_path: &str, save_path: &str, images_path: &str) -> Self {
        let base = base.trim_end_matches('/');
        let join = |path: &str| format!("{}/{}", base, path.trim_start_matches('/'));
        Self {
            csv_url: join(csv_path),
            save_url: join(save_path),
            images_url: join(images_path),
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::from_base(
            DEFAULT_BASE_URL,
            DEFAULT_CSV_PATH,
            DEFAULT_SAVE_PATH,
            DEFAULT_IMAGES_PATH,
        )
    }
}

/// HTTP client for the evidence server.
#[derive(Debug, Clone)]
pub struct ReviewClient {
    http: reqwest::Client,
    endpoints: Endpoints,
}

impl ReviewClient {
    pub fn new(endpoints: Endpoints, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, endpoints })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Fetch and parse the record CSV.
    pub async fn load_records(&self) -> Result<RecordSet, LoadError> {
        let resp = self
            .http
            .get(&self.endpoints.csv_url)
            .header("Accept", "text/csv")
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(url = %self.endpoints.csv_url, status = status.as_u16(), "CSV fetch failed");
            return Err(LoadError::Status(status.as_u16()));
        }

        let text = resp.text().await?;
        let records = parse_records(&text)?;
        tracing::info!(
            url = %self.endpoints.csv_url,
            rows = records.len(),
            columns = records.headers.len(),
            "loaded records"
        );
        Ok(records)
    }

    /// Submit the full CSV text to the save endpoint.
    pub async fn save_csv(&self, csv_data: String) -> Result<(), SaveError> {
        let bytes = csv_data.len();
        let resp = self
            .http
            .post(&self.endpoints.save_url)
            .json(&SavePayload { csv_data })
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "save rejected");
            return Err(SaveError::Status(status.as_u16()));
        }
        tracing::debug!(bytes, "save accepted");
        Ok(())
    }

    /// Check that an image URL is reachable without downloading it.
    pub async fn probe_image(&self, url: &str) -> Result<(), ImageLoadError> {
        let resp = self.http.head(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ImageLoadError::Status(status.as_u16()));
        }
        Ok(())
    }
}
