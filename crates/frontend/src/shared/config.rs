//! Application-wide settings resolved once at startup.

/// Rows per list page, matching the server's `PAGE_SIZE`.
pub const PAGE_SIZE: usize = contracts::shared::pagination::DEFAULT_PAGE_SIZE;

/// Page size used to pull a whole filtered dataset in one request
/// (equal to the server's `max_page_size`).
pub const SELECT_ALL_PAGE_SIZE: usize = contracts::shared::pagination::MAX_PAGE_SIZE;

/// Delay before filter changes are written back to the address bar.
pub const URL_SYNC_DEBOUNCE_MS: u32 = 500;

/// Delay before typed search text is applied.
pub const SEARCH_DEBOUNCE_MS: u32 = 300;

/// How long a toast stays on screen.
pub const TOAST_TIMEOUT_MS: u32 = 5_000;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// API root without trailing slash, e.g. `http://localhost:8000/api`
    pub api_url: String,
    pub app_name: String,
}

impl AppConfig {
    /// Compile-time `API_URL` wins; otherwise the API is assumed on port 8000
    /// of the host serving the app.
    pub fn load() -> Self {
        let api_url = match option_env!("API_URL") {
            Some(url) if !url.trim().is_empty() => url.trim().trim_end_matches('/').to_string(),
            _ => api_url_from_location(),
        };
        let app_name = option_env!("APP_NAME")
            .filter(|n| !n.trim().is_empty())
            .unwrap_or("SyncWave")
            .to_string();

        Self { api_url, app_name }
    }
}

fn api_url_from_location() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return "/api".to_string(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:8000/api", protocol, hostname)
}

thread_local! {
    static CONFIG: AppConfig = AppConfig::load();
}

pub fn app_config() -> AppConfig {
    CONFIG.with(|c| c.clone())
}
