use anyhow::{Context, Result};
use kubera_rest::KuberaClient;
use termcolor::WriteColor;

use crate::cache::PortfolioStore;
use crate::output;

pub async fn run(
    client: &KuberaClient,
    cache: &dyn PortfolioStore,
    out: &mut dyn WriteColor,
    raw: bool,
) -> Result<()> {
    let portfolios = client
        .get_portfolios()
        .await
        .context("Failed to fetch portfolios")?;

    if let Err(e) = cache.save(&portfolios) {
        tracing::warn!(error = %e, "Failed to save portfolio cache");
    }

    output::print_portfolios(out, &portfolios, raw)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::FileCache;
    use crate::cmd::testing::{client_for, text};
    use serde_json::json;
    use tempfile::TempDir;
    use termcolor::Buffer;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mount_list(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/api/v3/data/portfolio"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [
                    {"id": "p1", "name": "Main", "currency": "USD"},
                    {"id": "p2", "name": "Other", "currency": "EUR"}
                ],
                "errorCode": 0
            })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_list_prints_table_and_refreshes_cache() {
        let server = MockServer::start().await;
        mount_list(&server).await;
        let dir = TempDir::new().unwrap();
        let cache = FileCache::new(dir.path().join("portfolio_cache.json"));
        let mut out = Buffer::no_color();

        run(&client_for(&server), &cache, &mut out, false)
            .await
            .unwrap();

        let printed = text(out);
        assert!(printed.contains("Portfolios (2)"));
        assert!(printed.contains("Other"));

        let cached = cache.load();
        assert_eq!(cached.len(), 2);
        assert_eq!(cached[1].id, "p2");
    }

    #[tokio::test]
    async fn test_list_raw_is_json() {
        let server = MockServer::start().await;
        mount_list(&server).await;
        let dir = TempDir::new().unwrap();
        let cache = FileCache::new(dir.path().join("portfolio_cache.json"));
        let mut out = Buffer::no_color();

        run(&client_for(&server), &cache, &mut out, true)
            .await
            .unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&text(out)).unwrap();
        assert_eq!(parsed[0]["id"], "p1");
        assert_eq!(parsed.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_list_failure_keeps_cache() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_string(r#"{"message": "bad"}"#))
            .mount(&server)
            .await;
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("portfolio_cache.json");
        std::fs::write(&path, r#"{"portfolios": [{"id": "old", "name": "", "currency": ""}]}"#)
            .unwrap();
        let cache = FileCache::new(path);
        let mut out = Buffer::no_color();

        let err = run(&client_for(&server), &cache, &mut out, false)
            .await
            .unwrap_err();

        assert!(format!("{err:#}").starts_with("Failed to fetch portfolios: Authentication failed: bad."));
        assert_eq!(cache.load()[0].id, "old");
    }
}
