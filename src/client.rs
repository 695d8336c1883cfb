//! Typed access to the records backend.
//!
//! A [`RecordClient`] maps the five record operations of one [`Resource`]
//! onto HTTP verbs against `{base_url}/{Resource::PATH}`. Failures come back
//! as [`crate::error::RegistrarError`] values; nothing is retried, cached or deduplicated.

use crate::{
    config::ApiConfig,
    data::{HasProjection, RecordId, Resource, WithId},
    error::{
        ApiSnafu, BuildClientSnafu, DecodeSnafu, RegistrarResult, TransportSnafu,
    },
};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::{Deserialize, de::DeserializeOwned};
use snafu::ResultExt;
use std::{marker::PhantomData, sync::Arc};

/// Shared connection pool and backend location, handed out per resource kind.
#[derive(Clone, Debug)]
pub struct RecordsApi {
    http: Client,
    config: Arc<ApiConfig>,
}

impl RecordsApi {
    pub fn new(config: Arc<ApiConfig>) -> RegistrarResult<Self> {
        let http = Client::builder()
            .user_agent(concat!("registrar/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout())
            .build()
            .context(BuildClientSnafu)?;

        Ok(Self { http, config })
    }

    pub fn records<R: Resource>(&self) -> RecordClient<R> {
        RecordClient {
            api: self.clone(),
            _kind: PhantomData,
        }
    }
}

#[derive(Debug)]
pub struct RecordClient<R> {
    api: RecordsApi,
    _kind: PhantomData<fn() -> R>,
}

impl<R> Clone for RecordClient<R> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            _kind: PhantomData,
        }
    }
}

impl<R: Resource> RecordClient<R> {
    pub async fn list(&self) -> RegistrarResult<Vec<R>> {
        let path = format!("/{}", R::PATH);
        self.send_for_json(Method::GET, path, |req| req).await
    }

    pub async fn get(&self, id: RecordId) -> RegistrarResult<R> {
        let path = format!("/{}/{id}", R::PATH);
        self.send_for_json(Method::GET, path, |req| req).await
    }

    pub async fn create(&self, draft: &R::Draft) -> RegistrarResult<R> {
        let path = format!("/{}", R::PATH);
        self.send_for_json(Method::POST, path, |req| req.json(draft))
            .await
    }

    /// Replaces the whole record at `id`; fields left out of the draft are cleared server-side.
    /// Any response body is ignored.
    pub async fn update(&self, id: RecordId, draft: &R::Draft) -> RegistrarResult<()> {
        let path = format!("/{}", R::PATH);
        let body = WithId { id, fields: draft };
        self.send(Method::PUT, &path, |req| req.json(&body)).await?;
        Ok(())
    }

    pub async fn delete(&self, id: RecordId) -> RegistrarResult<()> {
        let path = format!("/{}/{id}", R::PATH);
        self.send(Method::DELETE, &path, |req| req).await?;
        Ok(())
    }

    async fn send_for_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: String,
        build: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> RegistrarResult<T> {
        let response = self.send(method, &path, build).await?;
        response.json().await.context(DecodeSnafu { path })
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        build: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> RegistrarResult<Response> {
        let url = self.api.config.url_for(path);
        debug!(%method, %url, "records request");

        let method_name = method.as_str().to_owned();
        let request = build(self.api.http.request(method, &url));
        let result = match request.send().await {
            Ok(response) => check_response(response, path).await,
            Err(source) => Err(source).context(TransportSnafu {
                method: method_name.as_str(),
                path,
            }),
        };

        if let Err(e) = &result {
            warn!(?e, method = %method_name, %url, "records request failed");
        }
        result
    }
}

impl<R: HasProjection> RecordClient<R> {
    pub async fn list_projection(&self) -> RegistrarResult<Vec<R::Projection>> {
        let path = format!("/{}/dto", R::PATH);
        self.send_for_json(Method::GET, path, |req| req).await
    }
}

#[derive(Deserialize)]
struct ServerMessage {
    message: String,
}

/// Passes 2xx responses through; anything else becomes [`crate::error::RegistrarError::Api`]
/// carrying the server's `message` when the body has one.
pub async fn check_response(response: Response, path: &str) -> RegistrarResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ServerMessage>(&body)
        .map(|ServerMessage { message }| message)
        .ok()
        .filter(|message| !message.trim().is_empty())
        .or_else(|| Some(body.trim().to_string()).filter(|body| !body.is_empty()))
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string()
        });

    Err(ApiSnafu {
        status: status.as_u16(),
        message,
        path,
    }
    .build())
}
