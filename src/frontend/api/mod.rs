use crate::{
    common::{user::SessionUser, DEFAULT_IMAGE_BUCKET},
    frontend::utils::errors::{FrontendError, FrontendResult},
};
use http::Method;
use log::info;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use url::Url;

pub mod auth;
pub mod category;
pub mod comment;
pub mod post;
pub mod vote;

/// Names of the `<meta>` tags which carry the gateway settings from server to browser.
pub const GATEWAY_URL_META: &str = "resep-gateway-url";
pub const GATEWAY_KEY_META: &str = "resep-gateway-key";
pub const GATEWAY_BUCKET_META: &str = "resep-gateway-bucket";

/// Where the backend-as-a-service lives and the public key used for anonymous access.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayConfig {
    pub url: String,
    pub anon_key: String,
    pub image_bucket: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:54321".to_string(),
            anon_key: String::new(),
            image_bucket: DEFAULT_IMAGE_BUCKET.to_string(),
        }
    }
}

impl GatewayConfig {
    /// Read the settings which the server rendered into the page head.
    #[cfg(not(feature = "ssr"))]
    pub fn from_document() -> FrontendResult<Self> {
        use leptos::prelude::document;

        let meta = |name: &str| {
            document()
                .query_selector(&format!("meta[name=\"{name}\"]"))
                .ok()
                .flatten()
                .and_then(|element| element.get_attribute("content"))
                .ok_or_else(|| FrontendError::new(format!("Missing meta tag {name}")))
        };
        Ok(Self {
            url: meta(GATEWAY_URL_META)?,
            anon_key: meta(GATEWAY_KEY_META)?,
            image_bucket: meta(GATEWAY_BUCKET_META)?,
        })
    }
}

/// One call against the gateway. Paths are given as segments and percent-encoded when
/// the url is built.
#[derive(Debug, Clone)]
pub(crate) struct GatewayRequest {
    method: Method,
    segments: Vec<String>,
    query: Vec<(&'static str, String)>,
    headers: Vec<(&'static str, String)>,
    body: Option<(String, Vec<u8>)>,
    token: Option<String>,
}

impl GatewayRequest {
    pub(crate) fn new(method: Method, segments: &[&str]) -> Self {
        Self {
            method,
            segments: segments.iter().map(|s| s.to_string()).collect(),
            query: vec![],
            headers: vec![],
            body: None,
            token: None,
        }
    }

    /// Table endpoint of the REST interface.
    pub(crate) fn rest(method: Method, table: &str) -> Self {
        Self::new(method, &["rest", "v1", table])
    }

    pub(crate) fn query(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.query.push((key, value.into()));
        self
    }

    /// Equality filter on a column.
    pub(crate) fn eq(self, column: &'static str, value: impl std::fmt::Display) -> Self {
        self.query(column, format!("eq.{value}"))
    }

    pub(crate) fn header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    /// Don't send the written rows back.
    pub(crate) fn minimal(self) -> Self {
        self.header("prefer", "return=minimal")
    }

    pub(crate) fn json<P: Serialize + Debug>(mut self, params: &P) -> FrontendResult<Self> {
        let body = serde_json::to_vec(params)?;
        self.body = Some(("application/json".to_string(), body));
        Ok(self)
    }

    pub(crate) fn bytes(mut self, content_type: String, body: Vec<u8>) -> Self {
        self.body = Some((content_type, body));
        self
    }

    pub(crate) fn user(mut self, user: &SessionUser) -> Self {
        self.token = Some(user.access_token.clone());
        self
    }

    pub(crate) fn token(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }
}

/// Fails with [FrontendError::NotAuthenticated] before any request is sent.
pub(crate) fn require_user(user: Option<&SessionUser>) -> FrontendResult<&SessionUser> {
    user.ok_or(FrontendError::NotAuthenticated)
}

#[derive(Clone, Debug)]
pub struct GatewayClient {
    #[cfg(feature = "ssr")]
    client: reqwest::Client,
    config: GatewayConfig,
}

impl GatewayClient {
    #[cfg(feature = "ssr")]
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    #[cfg(not(feature = "ssr"))]
    pub fn new(config: GatewayConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    async fn get<T>(&self, req: GatewayRequest) -> FrontendResult<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let url = self.request_url(&req.segments, &req.query)?;
        let text = self.send(req).await?;
        serde_json::from_str(&text).map_err(|e| {
            info!("Failed to deserialize gateway response: {e} from {text} on {url}");
            FrontendError::new(format!("Unexpected response from {url}"))
        })
    }

    /// Send a request whose response body is not needed.
    async fn execute(&self, req: GatewayRequest) -> FrontendResult<()> {
        self.send(req).await.map(|_| ())
    }

    #[cfg(feature = "ssr")]
    async fn send(&self, req: GatewayRequest) -> FrontendResult<String> {
        let url = self.request_url(&req.segments, &req.query)?;
        let bearer = req.token.as_deref().unwrap_or(&self.config.anon_key);
        let mut builder = self
            .client
            .request(req.method.clone(), url)
            .header("apikey", &self.config.anon_key)
            .header("authorization", format!("Bearer {bearer}"));
        for (name, value) in &req.headers {
            builder = builder.header(*name, value);
        }
        if let Some((content_type, body)) = req.body {
            builder = builder.header("content-type", content_type).body(body);
        }
        let res = builder.send().await?;
        let status = res.status();
        let url = res.url().to_string();
        let text = res.text().await?;
        Self::response(status.as_u16(), text, &url)
    }

    #[cfg(not(feature = "ssr"))]
    fn send(
        &self,
        req: GatewayRequest,
    ) -> impl std::future::Future<Output = FrontendResult<String>> + Send + '_ {
        use gloo_net::http::RequestBuilder;
        use leptos::prelude::on_cleanup;
        use send_wrapper::SendWrapper;

        SendWrapper::new(async move {
            let abort_controller = SendWrapper::new(web_sys::AbortController::new().ok());
            let abort_signal = abort_controller.as_ref().map(|a| a.signal());

            // abort in-flight requests if, e.g., we've navigated away from this page
            on_cleanup(move || {
                if let Some(abort_controller) = abort_controller.take() {
                    abort_controller.abort()
                }
            });

            let url = self.request_url(&req.segments, &req.query)?;
            let bearer = req.token.as_deref().unwrap_or(&self.config.anon_key);
            let mut builder = RequestBuilder::new(url.as_str())
                .method(req.method.clone())
                .abort_signal(abort_signal.as_ref())
                .header("apikey", &self.config.anon_key)
                .header("authorization", &format!("Bearer {bearer}"));
            for (name, value) in &req.headers {
                builder = builder.header(name, value);
            }
            let request = match req.body {
                Some((content_type, body)) => builder
                    .header("content-type", &content_type)
                    .body(js_sys::Uint8Array::from(body.as_slice()))?,
                None => builder.build()?,
            };
            let res = request.send().await?;
            let status = res.status();
            let text = res.text().await?;
            Self::response(status, text, &res.url())
        })
    }

    fn response(status: u16, text: String, url: &str) -> FrontendResult<String> {
        if (200..300).contains(&status) {
            Ok(text)
        } else {
            info!("Gateway error: {text} on {url} status {status}");
            Err(FrontendError::Remote(error_message(status, &text)))
        }
    }

    pub(crate) fn request_url(
        &self,
        segments: &[String],
        query: &[(&'static str, String)],
    ) -> FrontendResult<Url> {
        let mut url = Url::parse(&self.config.url)?;
        url.path_segments_mut()
            .map_err(|_| FrontendError::new(format!("Invalid gateway url {}", self.config.url)))?
            .pop_if_empty()
            .extend(segments);
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }
}

/// The different parts of the gateway each use their own error body. Pick whichever
/// message field is present, falling back to the raw body.
fn error_message(status: u16, text: &str) -> String {
    let value: Option<serde_json::Value> = serde_json::from_str(text).ok();
    let field = value.as_ref().and_then(|v| {
        ["message", "msg", "error_description", "error"]
            .iter()
            .find_map(|key| v.get(key).and_then(|m| m.as_str()))
    });
    match field {
        Some(message) => message.to_string(),
        None if text.is_empty() => format!("Request failed with status {status}"),
        None => text.to_string(),
    }
}
