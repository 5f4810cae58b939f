//! Authenticated JSON requests against the API.
//!
//! Every call carries `Authorization: Bearer <access>`. A 401 triggers one
//! de-duplicated token refresh and a single retry; if the refresh fails the
//! session is dropped and the browser goes to `/login`.

use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::api_error::ApiError;
use super::api_utils::api_url;
use crate::system::auth::refresh_gate::refresh_gate;
use crate::system::auth::{api as auth_api, storage};

#[derive(Debug, Clone, Copy)]
enum Method {
    Get,
    Post,
    Put,
}

async fn send(
    method: Method,
    url: &str,
    body: Option<&Value>,
    token: Option<&str>,
) -> Result<Response, ApiError> {
    let mut builder = match method {
        Method::Get => Request::get(url),
        Method::Post => Request::post(url),
        Method::Put => Request::put(url),
    };
    if let Some(token) = token {
        builder = builder.header("Authorization", &format!("Bearer {}", token));
    }

    let sent = match body {
        Some(body) => {
            builder
                .json(body)
                .map_err(|e| ApiError::Decode(e.to_string()))?
                .send()
                .await
        }
        None => builder.send().await,
    };
    sent.map_err(|e| {
        log::warn!("http: {:?} {} failed: {}", method, url, e);
        ApiError::Network(e.to_string())
    })
}

async fn refresh_access_token() -> Result<String, ApiError> {
    refresh_gate()
        .run(|| async {
            let refresh = storage::get_refresh_token().ok_or(ApiError::Unauthorized)?;
            let response = auth_api::refresh_token(refresh).await?;
            storage::save_refreshed(&response.access, response.refresh.as_deref());
            log::info!("http: access token refreshed");
            Ok(response.access)
        })
        .await
}

/// Drops the stored session and sends the browser to the login page.
pub fn end_session() {
    storage::clear_tokens();
    if let Some(window) = web_sys::window() {
        let on_login = window
            .location()
            .pathname()
            .map(|p| p.starts_with("/login"))
            .unwrap_or(false);
        if !on_login {
            let _ = window.location().set_href("/login");
        }
    }
}

async fn request(method: Method, path: &str, body: Option<Value>) -> Result<Response, ApiError> {
    let url = api_url(path);
    let token = storage::get_access_token();
    let response = send(method, &url, body.as_ref(), token.as_deref()).await?;
    if response.status() != 401 {
        return Ok(response);
    }

    if refresh_gate().is_refreshing() {
        log::debug!("http: 401 on {}, joining refresh in progress", url);
    } else {
        log::debug!("http: 401 on {}, refreshing token", url);
    }
    let access = match refresh_access_token().await {
        Ok(access) => access,
        Err(e) => {
            log::warn!("http: token refresh failed: {}", e);
            end_session();
            return Err(ApiError::Unauthorized);
        }
    };

    let response = send(method, &url, body.as_ref(), Some(&access)).await?;
    if response.status() == 401 {
        end_session();
        return Err(ApiError::Unauthorized);
    }
    Ok(response)
}

/// Turns a non-2xx response into `ApiError`, passing successful ones through.
pub(crate) async fn ensure_ok(response: Response) -> Result<Response, ApiError> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let err = ApiError::from_response(status, &body);
    log::warn!("http: {} -> {}", response.url(), err);
    Err(err)
}

pub(crate) async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    ensure_ok(response)
        .await?
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

pub async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    decode(request(Method::Get, path, None).await?).await
}

pub async fn post_json<B, T>(path: &str, body: &B) -> Result<T, ApiError>
where
    B: Serialize,
    T: DeserializeOwned,
{
    let body = serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))?;
    decode(request(Method::Post, path, Some(body)).await?).await
}

pub async fn put_json<B, T>(path: &str, body: &B) -> Result<T, ApiError>
where
    B: Serialize,
    T: DeserializeOwned,
{
    let body = serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))?;
    decode(request(Method::Put, path, Some(body)).await?).await
}

/// POST without body whose response content is not needed.
pub async fn post_empty(path: &str) -> Result<(), ApiError> {
    ensure_ok(request(Method::Post, path, None).await?).await?;
    Ok(())
}
