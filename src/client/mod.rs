pub mod dto;

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, Response, StatusCode, Url, multipart};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::config::ApiConfig;
use crate::error::AppError;
use crate::models::Listing;
use crate::session::TokenStore;

use self::dto::{FileUpload, TokenPair};

pub const REQUEST_ID_HEADER: &str = "X-Request-Id";
pub const REFRESH_ENDPOINT: &str = "/auth/refresh";

#[derive(Debug, Clone)]
pub enum RequestBody {
    Empty,
    Json(Value),
    File(FileUpload),
}

#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub endpoint: String,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
}

impl ApiRequest {
    fn new(method: Method, endpoint: impl Into<String>, body: RequestBody) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            query: Vec::new(),
            body,
        }
    }

    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(Method::GET, endpoint, RequestBody::Empty)
    }

    pub fn delete(endpoint: impl Into<String>) -> Self {
        Self::new(Method::DELETE, endpoint, RequestBody::Empty)
    }

    pub fn post<B: Serialize + ?Sized>(endpoint: impl Into<String>, body: &B) -> Result<Self, AppError> {
        Ok(Self::new(Method::POST, endpoint, RequestBody::Json(serde_json::to_value(body)?)))
    }

    pub fn patch<B: Serialize + ?Sized>(endpoint: impl Into<String>, body: &B) -> Result<Self, AppError> {
        Ok(Self::new(Method::PATCH, endpoint, RequestBody::Json(serde_json::to_value(body)?)))
    }

    pub fn upload(endpoint: impl Into<String>, file: FileUpload) -> Self {
        Self::new(Method::POST, endpoint, RequestBody::File(file))
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Adds the pair only when a value is present and non-empty.
    pub fn query_opt<V: ToString>(self, key: &str, value: Option<V>) -> Self {
        match value.map(|v| v.to_string()) {
            Some(v) if !v.is_empty() => self.query(key, v),
            _ => self,
        }
    }
}

/// Anything able to carry an [`ApiRequest`] to the backend. Resolves to
/// `None` for "no content" responses.
#[async_trait]
pub trait ApiTransport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<Option<Value>, AppError>;
}

pub async fn fetch<T: DeserializeOwned>(api: &dyn ApiTransport, request: ApiRequest) -> Result<T, AppError> {
    let value = api.send(request).await?.ok_or(AppError::EmptyBody)?;
    Ok(serde_json::from_value(value)?)
}

/// Fetches a collection, accepting both list response shapes.
pub async fn fetch_list<T: DeserializeOwned>(api: &dyn ApiTransport, request: ApiRequest) -> Result<Vec<T>, AppError> {
    let listing: Listing<T> = fetch(api, request).await?;
    Ok(listing.into_items())
}

pub async fn execute(api: &dyn ApiTransport, request: ApiRequest) -> Result<(), AppError> {
    api.send(request).await.map(|_| ())
}

pub struct HttpApiClient {
    client: Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
}

impl HttpApiClient {
    pub fn new(config: &ApiConfig, tokens: Arc<dyn TokenStore>) -> Result<Self, AppError> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            tokens,
        })
    }

    fn url_for(&self, request: &ApiRequest) -> Result<Url, AppError> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, request.endpoint)).map_err(|e| {
            AppError::Config(format!("Invalid request URL for {}: {}", request.endpoint, e))
        })?;

        if !request.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &request.query {
                pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }

    async fn dispatch(
        &self,
        request: &ApiRequest,
        access_token: Option<&str>,
        request_id: &str,
    ) -> Result<Response, AppError> {
        let url = self.url_for(request)?;

        let mut builder = self
            .client
            .request(request.method.clone(), url)
            .header(ACCEPT, "application/json")
            .header(REQUEST_ID_HEADER, request_id);

        if let Some(token) = access_token {
            builder = builder.bearer_auth(token);
        }

        builder = match &request.body {
            RequestBody::Empty => builder.header(CONTENT_TYPE, "application/json"),
            RequestBody::Json(body) => builder.json(body),
            RequestBody::File(upload) => builder.multipart(multipart_form(upload)?),
        };

        let response = builder.send().await.map_err(|e| {
            error!(%request_id, endpoint = %request.endpoint, "Request failed: {}", e);
            AppError::Connectivity
        })?;

        debug!(
            %request_id,
            method = %request.method,
            endpoint = %request.endpoint,
            status = response.status().as_u16(),
            "Response received"
        );

        Ok(response)
    }

    /// Exchanges the stored refresh token for a new pair. Any failure clears
    /// the stored tokens and ends the session.
    pub async fn refresh_tokens(&self) -> Result<String, AppError> {
        let Some(refresh_token) = self.tokens.load().await?.refresh_token else {
            warn!("No refresh token stored, session cannot be renewed");
            self.tokens.clear().await?;
            return Err(AppError::SessionExpired);
        };

        let outcome = self
            .client
            .post(format!("{}{}", self.base_url, REFRESH_ENDPOINT))
            .header(CONTENT_TYPE, "application/json")
            .bearer_auth(&refresh_token)
            .send()
            .await;

        let pair = match outcome {
            Ok(response) if response.status().is_success() => match response.json::<TokenPair>().await {
                Ok(pair) => Some(pair),
                Err(e) => {
                    warn!("Refresh response could not be parsed: {}", e);
                    None
                }
            },
            Ok(response) => {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                warn!("Token refresh rejected {}: {}", status, body);
                None
            }
            Err(e) => {
                warn!("Token refresh request failed: {}", e);
                None
            }
        };

        match pair {
            Some(pair) => {
                self.tokens.save(&pair).await?;
                info!("Session tokens refreshed");
                Ok(pair.access_token)
            }
            None => {
                self.tokens.clear().await?;
                Err(AppError::SessionExpired)
            }
        }
    }
}

#[async_trait]
impl ApiTransport for HttpApiClient {
    async fn send(&self, request: ApiRequest) -> Result<Option<Value>, AppError> {
        let request_id = Uuid::new_v4().to_string();
        let tokens = self.tokens.load().await?;

        let mut response = self
            .dispatch(&request, tokens.access_token.as_deref(), &request_id)
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            warn!(%request_id, endpoint = %request.endpoint, "Access token rejected, attempting refresh");

            let access_token = self.refresh_tokens().await?;
            response = self.dispatch(&request, Some(&access_token), &request_id).await?;

            if response.status() == StatusCode::UNAUTHORIZED {
                warn!(%request_id, endpoint = %request.endpoint, "Retried request still unauthorized");
                self.tokens.clear().await?;
                return Err(AppError::SessionExpired);
            }
        }

        read_body(response).await
    }
}

fn multipart_form(upload: &FileUpload) -> Result<multipart::Form, AppError> {
    let part = multipart::Part::bytes(upload.bytes.clone())
        .file_name(upload.file_name.clone())
        .mime_str(&upload.mime)?;
    Ok(multipart::Form::new().part(upload.field.clone(), part))
}

async fn read_body(response: Response) -> Result<Option<Value>, AppError> {
    let status = response.status();

    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        return Err(match serde_json::from_str::<Value>(&text) {
            Ok(body) => AppError::from_response(status, body),
            Err(_) => AppError::non_json_response(status),
        });
    }

    if status == StatusCode::NO_CONTENT {
        return Ok(None);
    }

    let text = response.text().await.map_err(|_| AppError::Connectivity)?;
    if text.trim().is_empty() {
        return Ok(None);
    }

    Ok(Some(serde_json::from_str(&text)?))
}
