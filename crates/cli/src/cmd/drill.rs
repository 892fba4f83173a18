use anyhow::{bail, Context, Result};
use kubera_rest::KuberaClient;
use serde_json::Value;
use termcolor::WriteColor;

use super::resolve;
use crate::args::Category;
use crate::cache::PortfolioStore;
use crate::output;

pub async fn run(
    client: &KuberaClient,
    cache: &dyn PortfolioStore,
    out: &mut dyn WriteColor,
    token: &str,
    category: Category,
    sheet: &str,
    raw: bool,
) -> Result<()> {
    let portfolio_id = resolve(cache, token)?;

    let portfolio = client
        .get_portfolio(&portfolio_id)
        .await
        .context("Failed to fetch portfolio")?;

    let items = sheet_items(&portfolio, category, sheet);
    if items.is_empty() {
        bail!(
            "No items found in sheet '{sheet}' for category '{}'. \
             Check sheet name with 'kubera show {token}'",
            category.as_str()
        );
    }

    let portfolio_name = portfolio
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or("Portfolio");

    output::print_sheet_detail(out, &items, sheet, category.title(), portfolio_name, raw)?;
    Ok(())
}

/// Items of one category whose `sheetName` matches, ignoring case.
fn sheet_items<'a>(portfolio: &'a Value, category: Category, sheet: &str) -> Vec<&'a Value> {
    let (key, alt_key) = category.keys();
    let wanted = sheet.to_lowercase();

    output::category_items(portfolio, key, alt_key)
        .iter()
        .filter(|item| {
            item.get("sheetName")
                .and_then(Value::as_str)
                .is_some_and(|name| name.to_lowercase() == wanted)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::FileCache;
    use crate::cmd::testing::{client_for, text};
    use serde_json::json;
    use tempfile::TempDir;
    use termcolor::Buffer;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const GUID: &str = "123e4567-e89b-12d3-a456-426614174000";

    fn portfolio() -> Value {
        json!({
            "id": GUID,
            "name": "Main",
            "assets": [
                {"id": "a1", "name": "Checking", "sheetName": "Bank Accounts", "sectionName": "Everyday",
                 "value": {"amount": 1200.0, "currency": "USD"}},
                {"id": "a2", "name": "Brokerage", "sheetName": "Investments", "sectionName": "Taxable",
                 "value": {"amount": 5000.0, "currency": "USD"}}
            ],
            "debt": [
                {"id": "d1", "name": "Visa", "sheetName": "Credit Cards",
                 "value": {"amount": 300.0, "currency": "USD"}}
            ]
        })
    }

    async fn serve(server: &MockServer) {
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"data": portfolio(), "errorCode": 0})),
            )
            .mount(server)
            .await;
    }

    fn empty_cache(dir: &TempDir) -> FileCache {
        FileCache::new(dir.path().join("portfolio_cache.json"))
    }

    #[test]
    fn test_sheet_items_case_insensitive() {
        let portfolio = portfolio();
        let items = sheet_items(&portfolio, Category::Asset, "bank ACCOUNTS");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["id"], "a1");

        assert!(sheet_items(&portfolio, Category::Insurance, "Bank Accounts").is_empty());
    }

    #[tokio::test]
    async fn test_drill_prints_sheet() {
        let server = MockServer::start().await;
        serve(&server).await;
        let dir = TempDir::new().unwrap();
        let mut out = Buffer::no_color();

        run(
            &client_for(&server),
            &empty_cache(&dir),
            &mut out,
            GUID,
            Category::Asset,
            "investments",
            false,
        )
        .await
        .unwrap();

        let printed = text(out);
        assert!(printed.contains("Asset: investments"));
        assert!(printed.contains("Taxable (1 items)"));
        assert!(printed.contains("Brokerage"));
        assert!(!printed.contains("Checking"));
    }

    #[tokio::test]
    async fn test_drill_raw_prints_matching_items() {
        let server = MockServer::start().await;
        serve(&server).await;
        let dir = TempDir::new().unwrap();
        let mut out = Buffer::no_color();

        run(
            &client_for(&server),
            &empty_cache(&dir),
            &mut out,
            GUID,
            Category::Debt,
            "Credit Cards",
            true,
        )
        .await
        .unwrap();

        let parsed: Value = serde_json::from_str(&text(out)).unwrap();
        let visa = portfolio()["debt"][0].clone();
        assert_eq!(parsed, json!([visa]));
    }

    #[tokio::test]
    async fn test_drill_unknown_sheet() {
        let server = MockServer::start().await;
        serve(&server).await;
        let dir = TempDir::new().unwrap();
        let mut out = Buffer::no_color();

        let err = run(
            &client_for(&server),
            &empty_cache(&dir),
            &mut out,
            GUID,
            Category::Asset,
            "Crypto",
            false,
        )
        .await
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            format!(
                "No items found in sheet 'Crypto' for category 'asset'. \
                 Check sheet name with 'kubera show {GUID}'"
            )
        );
    }
}
