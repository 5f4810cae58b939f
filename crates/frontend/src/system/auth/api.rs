use contracts::system::auth::{
    LoginRequest, LoginResponse, LogoutRequest, RefreshRequest, RefreshResponse, UserInfo,
};
use gloo_net::http::Request;

use crate::shared::api_error::ApiError;
use crate::shared::api_utils::api_url;
use crate::shared::http::{decode, ensure_ok};

/// Login with email and password
pub async fn login(email: String, password: String) -> Result<LoginResponse, ApiError> {
    let request = LoginRequest { email, password };

    let response = Request::post(&api_url("/auth/login/"))
        .json(&request)
        .map_err(|e| ApiError::Decode(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    // A 401 here means wrong credentials, not an expired session
    if response.status() == 401 {
        return Err(ApiError::Http {
            status: 401,
            detail: "E-mail ou senha inválidos".to_string(),
        });
    }

    decode(response).await
}

/// Exchange a refresh token for a new access token
pub async fn refresh_token(refresh: String) -> Result<RefreshResponse, ApiError> {
    let request = RefreshRequest { refresh };

    let response = Request::post(&api_url("/auth/refresh/"))
        .json(&request)
        .map_err(|e| ApiError::Decode(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    decode(response).await
}

/// Logout (blacklist the refresh token)
pub async fn logout(access_token: Option<String>, refresh_token: String) -> Result<(), ApiError> {
    let request = LogoutRequest { refresh_token };

    let mut builder = Request::post(&api_url("/auth/logout/"));
    if let Some(token) = access_token {
        builder = builder.header("Authorization", &format!("Bearer {}", token));
    }
    let response = builder
        .json(&request)
        .map_err(|e| ApiError::Decode(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    ensure_ok(response).await?;
    Ok(())
}

/// Get current user info
pub async fn get_current_user(access_token: &str) -> Result<UserInfo, ApiError> {
    let response = Request::get(&api_url("/auth/me/"))
        .header("Authorization", &format!("Bearer {}", access_token))
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    decode(response).await
}
