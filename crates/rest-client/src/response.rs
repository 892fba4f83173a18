/// Status and body of an HTTP exchange, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Join a base URL (without trailing slash) and a request path.
pub(crate) fn join_url(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url, path)
}

pub(crate) fn normalize_base_url(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}
