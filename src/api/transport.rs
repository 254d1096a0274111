//! Request transports.
//!
//! A transport performs one GET and hands back the decoded JSON body. HTTP
//! status codes are not inspected: like the browser `fetch` contract, an
//! error status with a JSON body is still a response.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ClientError, Result};

#[async_trait(?Send)]
pub trait Transport: 'static {
    /// GET `path` (an absolute path such as `/api/status`) and decode the body as JSON.
    async fn get_json(&self, path: &str) -> Result<Value>;
}

/// GET and decode into a typed response.
pub async fn get_typed<T, R>(transport: &T, path: &str) -> Result<R>
where
    T: Transport + ?Sized,
    R: DeserializeOwned,
{
    let body = transport.get_json(path).await?;
    Ok(serde_json::from_value(body)?)
}

#[async_trait(?Send)]
impl<T: Transport + ?Sized> Transport for Rc<T> {
    async fn get_json(&self, path: &str) -> Result<Value> {
        (**self).get_json(path).await
    }
}

// =============================================================================
// Browser fetch
// =============================================================================

/// Same-origin `fetch` from the page (client-side only).
#[cfg(target_arch = "wasm32")]
#[derive(Clone, Debug, Default)]
pub struct FetchTransport {
    base_url: String,
}

#[cfg(target_arch = "wasm32")]
impl FetchTransport {
    /// `base_url` is prefixed to every path; empty means same-origin relative paths.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[async_trait(?Send)]
impl Transport for FetchTransport {
    async fn get_json(&self, path: &str) -> Result<Value> {
        use wasm_bindgen::JsCast;
        use wasm_bindgen_futures::JsFuture;
        use web_sys::{Request, RequestInit, Response};

        let window = web_sys::window().ok_or(ClientError::NoWindow)?;
        let opts = RequestInit::new();
        opts.set_method("GET");

        let url = format!("{}{}", self.base_url, path);
        let request = Request::new_with_str_and_init(&url, &opts)
            .map_err(|e| ClientError::Transport(format!("{:?}", e)))?;

        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| ClientError::Transport(format!("{:?}", e)))?;

        let resp: Response = resp_value
            .dyn_into()
            .map_err(|_| ClientError::Transport("Not a Response".to_string()))?;

        let json = JsFuture::from(
            resp.json()
                .map_err(|e| ClientError::Transport(format!("{:?}", e)))?,
        )
        .await
        .map_err(|e| ClientError::Transport(format!("{:?}", e)))?;

        serde_wasm_bindgen::from_value(json).map_err(|e| ClientError::Malformed(e.to_string()))
    }
}

// =============================================================================
// Native HTTP
// =============================================================================

/// `reqwest`-backed transport against an explicit server base URL.
#[cfg(all(feature = "native", not(target_arch = "wasm32")))]
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: url::Url,
}

#[cfg(all(feature = "native", not(target_arch = "wasm32")))]
impl HttpTransport {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            client: reqwest::Client::new(),
            base_url: url::Url::parse(base_url)?,
        })
    }

    pub fn base_url(&self) -> &url::Url {
        &self.base_url
    }
}

#[cfg(all(feature = "native", not(target_arch = "wasm32")))]
#[async_trait(?Send)]
impl Transport for HttpTransport {
    async fn get_json(&self, path: &str) -> Result<Value> {
        let url = self.base_url.join(path)?;
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

// =============================================================================
// Scripted responses
// =============================================================================

#[derive(Default)]
struct ScriptedState {
    responses: HashMap<String, std::result::Result<Value, String>>,
    requests: Vec<String>,
}

/// Transport answering from a fixed path → response table.
///
/// Unscripted paths fail with a transport error. Every requested path is
/// recorded, in order, for inspection.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    state: Rc<RefCell<ScriptedState>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `path` with `body`.
    pub fn respond(&self, path: impl Into<String>, body: Value) -> &Self {
        self.state
            .borrow_mut()
            .responses
            .insert(path.into(), Ok(body));
        self
    }

    /// Fail `path` with a transport error carrying `reason`.
    pub fn fail(&self, path: impl Into<String>, reason: impl Into<String>) -> &Self {
        self.state
            .borrow_mut()
            .responses
            .insert(path.into(), Err(reason.into()));
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.state.borrow().requests.clone()
    }
}

#[async_trait(?Send)]
impl Transport for ScriptedTransport {
    async fn get_json(&self, path: &str) -> Result<Value> {
        let mut state = self.state.borrow_mut();
        state.requests.push(path.to_string());
        match state.responses.get(path) {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(reason)) => Err(ClientError::Transport(reason.clone())),
            None => Err(ClientError::Transport(format!("no response scripted for {}", path))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_scripted_records_requests_in_order() {
        let transport = ScriptedTransport::new();
        transport.respond("/a", json!({"ok": true}));

        assert_eq!(transport.get_json("/a").await.unwrap(), json!({"ok": true}));
        assert!(transport.get_json("/b").await.is_err());
        assert_eq!(transport.requests(), vec!["/a", "/b"]);
    }

    #[tokio::test]
    async fn test_get_typed_reports_decode_errors() {
        let transport = ScriptedTransport::new();
        transport.respond("/n", json!("not an object"));

        let result: Result<crate::api::StatusResponse> = get_typed(&transport, "/n").await;
        assert!(matches!(result, Err(ClientError::Decode(_))));
    }
}
