use anyhow::{Context, Result};
use kubera_rest::KuberaClient;
use termcolor::WriteColor;

use super::resolve;
use crate::cache::PortfolioStore;
use crate::output;

pub async fn run(
    client: &KuberaClient,
    cache: &dyn PortfolioStore,
    out: &mut dyn WriteColor,
    token: &str,
    raw: bool,
    tree: bool,
) -> Result<()> {
    let portfolio_id = resolve(cache, token)?;

    let portfolio = client
        .get_portfolio(&portfolio_id)
        .await
        .context("Failed to fetch portfolio")?;

    if tree {
        output::print_asset_tree(out, &portfolio)?;
    } else {
        output::print_portfolio(out, &portfolio, raw)?;
    }
    Ok(())
}
