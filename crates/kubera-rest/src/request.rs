//! Endpoint paths and request preparation shared by both clients.

use crate::error::KuberaError;
use crate::responses::UpdateItemRequest;
use auth::{compact_json, ApiCredentials, AuthHeaders, RequestSigner};

/// API version segment used in every path.
pub const API_VERSION: &str = "v3";

/// Path of the portfolio list.
pub fn portfolios_path() -> String {
    format!("/api/{API_VERSION}/data/portfolio")
}

/// Path of one portfolio's detail.
pub fn portfolio_path(portfolio_id: &str) -> String {
    format!("/api/{API_VERSION}/data/portfolio/{portfolio_id}")
}

/// Path of one asset or debt item.
pub fn item_path(item_id: &str) -> String {
    format!("/api/{API_VERSION}/data/item/{item_id}")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// A request ready to sign and send. The body is serialized once so the
/// signed bytes and the sent bytes are the same.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PreparedRequest {
    pub method: HttpMethod,
    pub path: String,
    pub body: Option<String>,
}

impl PreparedRequest {
    pub(crate) fn list_portfolios() -> Self {
        Self {
            method: HttpMethod::Get,
            path: portfolios_path(),
            body: None,
        }
    }

    pub(crate) fn get_portfolio(portfolio_id: &str) -> Self {
        Self {
            method: HttpMethod::Get,
            path: portfolio_path(portfolio_id),
            body: None,
        }
    }

    pub(crate) fn update_item(
        item_id: &str,
        updates: &UpdateItemRequest,
    ) -> Result<Self, KuberaError> {
        Ok(Self {
            method: HttpMethod::Post,
            path: item_path(item_id),
            body: Some(compact_json(updates)?),
        })
    }

    pub(crate) fn auth_headers(&self, credentials: &ApiCredentials) -> AuthHeaders {
        RequestSigner::new(credentials).auth_headers(
            self.method.as_str(),
            &self.path,
            self.body.as_deref(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(portfolios_path(), "/api/v3/data/portfolio");
        assert_eq!(portfolio_path("abc"), "/api/v3/data/portfolio/abc");
        assert_eq!(item_path("item123"), "/api/v3/data/item/item123");
    }

    #[test]
    fn test_update_request_serializes_body_once() {
        let updates = UpdateItemRequest::new().value(400.0);
        let request = PreparedRequest::update_item("123", &updates).unwrap();

        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.body.as_deref(), Some(r#"{"value":400.0}"#));

        let creds = ApiCredentials::new("k".into(), "s".into());
        let headers = request.auth_headers(&creds);
        assert!(headers.has_body);
        assert_eq!(headers.api_token, "k");
    }

    #[test]
    fn test_get_requests_have_no_body() {
        let creds = ApiCredentials::new("k".into(), "s".into());
        let request = PreparedRequest::get_portfolio("p1");
        assert_eq!(request.method.as_str(), "GET");
        assert!(!request.auth_headers(&creds).has_body);
    }
}
