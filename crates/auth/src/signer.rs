//! HMAC-SHA256 request signing for the Kubera Data API.
//!
//! The signed message is `api_key + timestamp + method + path + body`, with
//! the body in compact JSON form. The server recomputes the same digest, so
//! every byte of the message has to match what is sent on the wire.

use crate::credentials::ApiCredentials;
use crate::error::AuthError;
use hmac::{Hmac, Mac};
use serde::Serialize;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the API key.
pub const HEADER_API_TOKEN: &str = "x-api-token";
/// Header carrying the Unix timestamp (seconds) used in the signature.
pub const HEADER_TIMESTAMP: &str = "x-timestamp";
/// Header carrying the hex signature.
pub const HEADER_SIGNATURE: &str = "x-signature";
/// Content type sent alongside a JSON body.
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// A signature together with the timestamp it was computed for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    /// 64 lowercase hex characters.
    pub signature: String,
    /// Decimal Unix seconds, echoed so headers can reuse it.
    pub timestamp: String,
}

/// Compute the request signature.
///
/// `body` must already be in compact JSON form (see [`compact_json`]) and must
/// be byte-identical to what is sent. When `timestamp` is `None` the current
/// wall-clock time in whole seconds is used.
pub fn generate_signature(
    api_key: &str,
    secret: &str,
    http_method: &str,
    request_path: &str,
    body: Option<&str>,
    timestamp: Option<&str>,
) -> Signature {
    let timestamp = timestamp.map_or_else(current_timestamp, str::to_string);
    let body_data = body.unwrap_or("");

    let message = format!("{api_key}{timestamp}{http_method}{request_path}{body_data}");

    Signature {
        signature: hmac_hex(secret, &message),
        timestamp,
    }
}

/// Serialize a request body with no whitespace between tokens.
///
/// Key order follows the value's own ordering: struct declaration order, or
/// insertion order for `serde_json::Map`.
pub fn compact_json<T: Serialize + ?Sized>(body: &T) -> Result<String, AuthError> {
    Ok(serde_json::to_string(body)?)
}

/// Current Unix time in whole seconds, as a decimal string.
pub fn current_timestamp() -> String {
    chrono::Utc::now().timestamp().to_string()
}

fn hmac_hex(secret: &str, message: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");

    mac.update(message.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Authentication headers for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthHeaders {
    pub api_token: String,
    pub timestamp: String,
    pub signature: String,
    /// Whether a JSON body accompanies the request.
    pub has_body: bool,
}

impl AuthHeaders {
    /// Header name/value pairs, ready to attach to a request.
    pub fn to_pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = vec![
            (HEADER_API_TOKEN, self.api_token.as_str()),
            (HEADER_TIMESTAMP, self.timestamp.as_str()),
            (HEADER_SIGNATURE, self.signature.as_str()),
        ];
        if self.has_body {
            pairs.push(("Content-Type", CONTENT_TYPE_JSON));
        }
        pairs
    }
}

/// Request signer for authenticated Kubera API calls.
pub struct RequestSigner<'a> {
    credentials: &'a ApiCredentials,
}

impl<'a> RequestSigner<'a> {
    /// Create a new request signer with the given credentials.
    pub fn new(credentials: &'a ApiCredentials) -> Self {
        Self { credentials }
    }

    /// Sign a request, optionally pinning the timestamp.
    pub fn sign_request(
        &self,
        http_method: &str,
        request_path: &str,
        body: Option<&str>,
        timestamp: Option<&str>,
    ) -> Signature {
        generate_signature(
            self.credentials.api_key(),
            self.credentials.expose_secret(),
            http_method,
            request_path,
            body,
            timestamp,
        )
    }

    /// Build the authentication headers for a request signed now.
    pub fn auth_headers(
        &self,
        http_method: &str,
        request_path: &str,
        body: Option<&str>,
    ) -> AuthHeaders {
        let Signature {
            signature,
            timestamp,
        } = self.sign_request(http_method, request_path, body, None);

        AuthHeaders {
            api_token: self.credentials.api_key().to_string(),
            timestamp,
            signature,
            has_body: body.is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const PORTFOLIO_PATH: &str = "/api/v3/data/portfolio";
    const ITEM_PATH: &str = "/api/v3/data/item/123";

    fn is_lower_hex_64(s: &str) -> bool {
        s.len() == 64 && s.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f'))
    }

    #[test]
    fn test_sign_known_vector_get() {
        let sig = generate_signature(
            "test_key",
            "test_secret",
            "GET",
            PORTFOLIO_PATH,
            None,
            Some("1234567890"),
        );

        assert_eq!(
            sig.signature,
            "3d909ef06a9d290470af9e31a4ff55da6ae5946c317ad3f9050abbd71f0386e4"
        );
        assert_eq!(sig.timestamp, "1234567890");
    }

    #[test]
    fn test_sign_known_vector_post() {
        let body = compact_json(&json!({"value": 400})).unwrap();
        assert_eq!(body, r#"{"value":400}"#);

        let sig = generate_signature(
            "test_key",
            "test_secret",
            "POST",
            ITEM_PATH,
            Some(&body),
            Some("1234567890"),
        );

        assert_eq!(
            sig.signature,
            "05970f498b439a65e6287a3eca2e54eabb2ebea78bdacfdc363cdd4390f50be4"
        );
    }

    #[test]
    fn test_sign_float_body_vector() {
        #[derive(Serialize)]
        struct Update {
            name: &'static str,
            value: f64,
        }

        let body = compact_json(&Update {
            name: "Car",
            value: 25000.0,
        })
        .unwrap();
        assert_eq!(body, r#"{"name":"Car","value":25000.0}"#);

        let sig = generate_signature(
            "test_key",
            "test_secret",
            "POST",
            ITEM_PATH,
            Some(&body),
            Some("1234567890"),
        );
        assert_eq!(
            sig.signature,
            "8fbba11236a25bf9b7044cacc22c7c5c69908801ed99bd70c5ef55f1435d4a0b"
        );
    }

    #[test]
    fn test_signature_deterministic() {
        let a = generate_signature("k", "s", "GET", PORTFOLIO_PATH, None, Some("1234567890"));
        let b = generate_signature("k", "s", "GET", PORTFOLIO_PATH, None, Some("1234567890"));
        assert_eq!(a, b);
        assert!(is_lower_hex_64(&a.signature));
    }

    #[test]
    fn test_signature_changes_with_body() {
        let body_100 = compact_json(&json!({"value": 100})).unwrap();
        let body_200 = compact_json(&json!({"value": 200})).unwrap();

        let a = generate_signature("k", "s", "POST", ITEM_PATH, Some(&body_100), Some("t"));
        let b = generate_signature("k", "s", "POST", ITEM_PATH, Some(&body_200), Some("t"));

        assert_ne!(a.signature, b.signature);
    }

    #[test]
    fn test_signature_sensitive_to_key_order() {
        let mut first = serde_json::Map::new();
        first.insert("name".into(), json!("x"));
        first.insert("value".into(), json!(1));
        let mut second = serde_json::Map::new();
        second.insert("value".into(), json!(1));
        second.insert("name".into(), json!("x"));

        let a = compact_json(&first).unwrap();
        let b = compact_json(&second).unwrap();
        assert_eq!(a, r#"{"name":"x","value":1}"#);
        assert_eq!(b, r#"{"value":1,"name":"x"}"#);

        let sig_a = generate_signature("k", "s", "POST", ITEM_PATH, Some(&a), Some("t"));
        let sig_b = generate_signature("k", "s", "POST", ITEM_PATH, Some(&b), Some("t"));
        assert_ne!(sig_a, sig_b);
    }

    #[test]
    fn test_method_used_verbatim() {
        let upper = generate_signature("k", "s", "GET", PORTFOLIO_PATH, None, Some("1"));
        let lower = generate_signature("k", "s", "get", PORTFOLIO_PATH, None, Some("1"));
        assert_ne!(upper.signature, lower.signature);
    }

    #[test]
    fn test_auto_timestamp_within_bounds() {
        let before = chrono::Utc::now().timestamp();
        let sig = generate_signature("key", "secret", "GET", "/test", None, None);
        let after = chrono::Utc::now().timestamp();

        let ts: i64 = sig.timestamp.parse().unwrap();
        assert!(before <= ts && ts <= after);
        assert!(is_lower_hex_64(&sig.signature));
    }

    #[test]
    fn test_signer_matches_free_function() {
        let creds = ApiCredentials::new("test_key".into(), "test_secret".into());
        let signer = RequestSigner::new(&creds);

        let sig = signer.sign_request("GET", PORTFOLIO_PATH, None, Some("1234567890"));
        assert_eq!(
            sig.signature,
            "3d909ef06a9d290470af9e31a4ff55da6ae5946c317ad3f9050abbd71f0386e4"
        );
        assert_eq!(
            hmac_hex("test_secret", &format!("test_key1234567890GET{PORTFOLIO_PATH}")),
            sig.signature
        );
    }

    #[test]
    fn test_auth_headers_without_body() {
        let creds = ApiCredentials::new("test_key".into(), "test_secret".into());
        let headers = RequestSigner::new(&creds).auth_headers("GET", "/api/v3/test", None);

        assert_eq!(headers.api_token, "test_key");
        assert!(is_lower_hex_64(&headers.signature));
        assert!(!headers.has_body);

        let pairs = headers.to_pairs();
        let names: Vec<&str> = pairs.iter().map(|(k, _)| *k).collect();
        assert_eq!(names, vec!["x-api-token", "x-timestamp", "x-signature"]);
    }

    #[test]
    fn test_auth_headers_with_body_adds_content_type() {
        let creds = ApiCredentials::new("test_key".into(), "test_secret".into());
        let headers =
            RequestSigner::new(&creds).auth_headers("POST", ITEM_PATH, Some(r#"{"value":1}"#));

        let pairs = headers.to_pairs();
        assert!(pairs.contains(&("Content-Type", "application/json")));

        let expected = generate_signature(
            "test_key",
            "test_secret",
            "POST",
            ITEM_PATH,
            Some(r#"{"value":1}"#),
            Some(&headers.timestamp),
        );
        assert_eq!(headers.signature, expected.signature);
    }

    #[test]
    fn test_sign_empty_message() {
        assert!(is_lower_hex_64(&hmac_hex("secret", "")));
    }
}
