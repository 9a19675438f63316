use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};

use consign_core::{DocKind, SaveReceipt, ShipmentRecord, StagedFile};

/// Field name shared by every file part of the extraction request.
const FILES_FIELD: &str = "files";

/// Environment variable overriding the API origin at deployment time.
const ORIGIN_ENV: &str = "CONSIGN_API_ORIGIN";

#[derive(Debug, Clone)]
pub struct ApiSettings {
    /// Scheme + host (+ port), no trailing slash.
    pub origin: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            origin: "http://localhost:8080".to_string(),
            connect_timeout: Duration::from_secs(10),
            // The extraction endpoint fronts an LLM; leave it room.
            request_timeout: Duration::from_secs(120),
        }
    }
}

impl ApiSettings {
    /// Defaults with the origin taken from `CONSIGN_API_ORIGIN` when set.
    pub fn from_env() -> Self {
        let mut settings = Self::default();
        if let Ok(origin) = std::env::var(ORIGIN_ENV) {
            let trimmed = origin.trim().trim_end_matches('/');
            if !trimmed.is_empty() {
                settings.origin = trimmed.to_string();
            }
        }
        settings
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub kind: ApiFailure,
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(kind: ApiFailure, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ApiError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiFailure {
    Network,
    Timeout,
    HttpStatus(u16),
    InvalidBody,
    Io,
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiFailure::Network => write!(f, "network error"),
            ApiFailure::Timeout => write!(f, "timeout"),
            ApiFailure::HttpStatus(code) => write!(f, "http status {code}"),
            ApiFailure::InvalidBody => write!(f, "invalid response body"),
            ApiFailure::Io => write!(f, "io error"),
        }
    }
}

/// The two remote operations this application consumes. Behind a trait so
/// the shell and tests can substitute transports.
#[async_trait]
pub trait ShipmentApi: Send + Sync {
    /// POST the staged files as one multipart request; a parseable record
    /// is the only success.
    async fn extract(&self, files: &[StagedFile]) -> Result<ShipmentRecord, ApiError>;

    /// POST the edited record as JSON; any 2xx with a receipt body wins.
    async fn save(&self, record: &ShipmentRecord) -> Result<SaveReceipt, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestShipmentApi {
    settings: ApiSettings,
    client: reqwest::Client,
}

impl ReqwestShipmentApi {
    pub fn new(settings: ApiSettings) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::new(ApiFailure::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.settings.origin, path)
    }

    async fn multipart_body(files: &[StagedFile]) -> Result<Form, ApiError> {
        let mut form = Form::new();
        for file in files {
            let bytes = tokio::fs::read(&file.path).await.map_err(|err| {
                ApiError::new(ApiFailure::Io, format!("{}: {err}", file.name))
            })?;
            let part = Part::bytes(bytes)
                .file_name(file.name.clone())
                .mime_str(mime_for(file.kind))
                .map_err(|err| ApiError::new(ApiFailure::Io, err.to_string()))?;
            // Repeated parts under one field name, per the endpoint contract.
            form = form.part(FILES_FIELD, part);
        }
        Ok(form)
    }
}

fn mime_for(kind: DocKind) -> &'static str {
    match kind {
        DocKind::Pdf => "application/pdf",
        DocKind::Spreadsheet => {
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        }
        DocKind::Other => "application/octet-stream",
    }
}

#[async_trait]
impl ShipmentApi for ReqwestShipmentApi {
    async fn extract(&self, files: &[StagedFile]) -> Result<ShipmentRecord, ApiError> {
        let form = Self::multipart_body(files).await?;
        let response = self
            .client
            .post(self.endpoint("/process-documents"))
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::new(
                ApiFailure::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        response
            .json::<ShipmentRecord>()
            .await
            .map_err(|err| ApiError::new(ApiFailure::InvalidBody, err.to_string()))
    }

    async fn save(&self, record: &ShipmentRecord) -> Result<SaveReceipt, ApiError> {
        let response = self
            .client
            .post(self.endpoint("/save-shipment"))
            .json(record)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::new(
                ApiFailure::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        response
            .json::<SaveReceipt>()
            .await
            .map_err(|err| ApiError::new(ApiFailure::InvalidBody, err.to_string()))
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(ApiFailure::Timeout, err.to_string());
    }
    ApiError::new(ApiFailure::Network, err.to_string())
}
