use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared_types::{ApiConfig, ApiEnvelope, AppError, PhotoAttachment};

const USER_AGENT: &str = concat!("fieldops-client/", env!("CARGO_PKG_VERSION"));

/// Shared HTTP client for the field-operations REST backend.
///
/// Cheap to clone; every clone shares the same connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    access_token: Option<String>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            access_token: None,
        })
    }

    /// Attach the bearer token sent with every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .http
            .request(method, self.url(path))
            .header(ACCEPT, "application/json");
        match &self.access_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    // --- Verb helpers used by the resource modules ---

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        self.send(self.request(Method::GET, path)).await?.into_result()
    }

    pub(crate) async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, AppError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.send(self.request(Method::GET, path).query(query))
            .await?
            .into_result()
    }

    pub(crate) async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, AppError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.request(Method::POST, path).json(body))
            .await?
            .into_result()
    }

    /// POST without a body, for action endpoints.
    pub(crate) async fn post_action<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        self.send(self.request(Method::POST, path)).await?.into_result()
    }

    pub(crate) async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, AppError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.request(Method::PUT, path).json(body))
            .await?
            .into_result()
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), AppError> {
        self.send::<serde_json::Value>(self.request(Method::DELETE, path))
            .await?
            .into_ack()
    }

    /// POST every photo as one multipart request, one part per slot field.
    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        photos: &[PhotoAttachment],
    ) -> Result<T, AppError> {
        let mut form = Form::new();
        for photo in photos {
            let part = Part::bytes(photo.bytes.clone())
                .file_name(photo.file_name.clone())
                .mime_str(&photo.content_type)
                .map_err(|e| {
                    AppError::bad_request(format!(
                        "Invalid content type for {}: {e}",
                        photo.field
                    ))
                })?;
            form = form.part(photo.field.clone(), part);
        }
        self.send(self.request(Method::POST, path).multipart(form))
            .await?
            .into_result()
    }

    /// Send a request and decode the envelope. Non-2xx responses are turned
    /// into an `AppError` using whatever message/errors the body carries.
    async fn send<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<ApiEnvelope<T>, AppError> {
        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(transport_error)?;

        if status.is_success() {
            return serde_json::from_slice::<ApiEnvelope<T>>(&bytes)
                .map_err(|e| AppError::decode(format!("Unexpected response body: {e}")));
        }

        let err = match serde_json::from_slice::<ApiEnvelope<serde_json::Value>>(&bytes) {
            Ok(envelope) => envelope.into_error(status.as_u16()),
            Err(_) => AppError::from_status(
                status.as_u16(),
                format!("Request failed with status {status}"),
            ),
        };
        tracing::warn!(status = status.as_u16(), error = %err, "Backend returned an error");
        Err(err)
    }
}

fn transport_error(err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        AppError::network("The server took too long to respond")
    } else {
        AppError::network(format!("Could not reach the server: {err}"))
    }
}
