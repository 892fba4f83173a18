use anyhow::{bail, Context, Result};
use auth::LayeredCredentials;
use common::ClientConfig;
use kubera_rest::{KuberaClient, KuberaError};
use serde_json::{json, Value};
use std::io;
use std::time::Duration;
use termcolor::WriteColor;

use crate::args::{Cli, Command};
use crate::cache::{resolve_portfolio_id, FileCache, PortfolioStore};
use crate::output;

mod drill;
mod interactive;
mod list;
mod show;
mod update;

/// A failure whose details a command has already written to the terminal.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct Reported(pub String);

pub async fn dispatch(cli: Cli) -> Result<()> {
    let Cli {
        api_key,
        secret,
        base_url,
        timeout,
        command,
        ..
    } = cli;

    let client = connect(api_key, secret, base_url, timeout)?;
    let cache = FileCache::default_location();
    tracing::debug!(cache = ?cache.path(), "Portfolio cache location");
    let mut out = output::stdout();

    let result = match command {
        Command::List { raw } => list::run(&client, &cache, &mut out, raw).await,
        Command::Show {
            portfolio,
            raw,
            tree,
        } => show::run(&client, &cache, &mut out, &portfolio, raw, tree).await,
        Command::Drill {
            portfolio,
            category,
            sheet,
            raw,
        } => drill::run(&client, &cache, &mut out, &portfolio, category, &sheet, raw).await,
        Command::Update {
            item_id,
            name,
            description,
            value,
            cost,
            raw,
        } => {
            let updates = update::request_from(name, description, value, cost);
            update::run(&client, &mut out, &item_id, &updates, raw).await
        }
        Command::Test { raw } => test::run(&client, &mut out, raw).await,
        Command::Interactive => {
            let input = std::io::BufReader::new(std::io::stdin());
            interactive::run(&client, &cache, &mut out, input).await
        }
    };

    client.close();
    result
}

/// Build the client from flags, then the environment, then `~/.env`.
fn connect(
    api_key: Option<String>,
    secret: Option<String>,
    base_url: Option<String>,
    timeout: Option<Duration>,
) -> Result<KuberaClient> {
    let provider = LayeredCredentials::new()
        .with_api_key(api_key)
        .with_secret(secret)
        .with_env_file(common::paths::home_env_file());

    let mut config = ClientConfig::from_env();
    if let Some(base_url) = base_url {
        config = config.with_base_url(base_url);
    }
    if let Some(timeout) = timeout {
        config = config.with_timeout(timeout);
    }

    let client =
        KuberaClient::from_provider(&provider, config).context("Failed to initialize client")?;
    tracing::debug!(client = ?client, "Client ready");
    Ok(client)
}

/// Resolve a portfolio index or ID, or fail with a hint to run `list`.
pub(crate) fn resolve(cache: &dyn PortfolioStore, token: &str) -> Result<String> {
    match resolve_portfolio_id(cache, token) {
        Some(id) => Ok(id),
        None => bail!(
            "Invalid portfolio identifier: '{token}'. \
             Run 'kubera list' to see available portfolios."
        ),
    }
}

/// Write a failed command's error in the mode the command ran in.
pub fn report(err: &anyhow::Error, raw: bool) {
    let written = if raw {
        write_report(err, raw, &mut output::stdout())
    } else {
        write_report(err, raw, &mut output::stderr())
    };

    if let Err(e) = written {
        tracing::debug!(error = %e, "Failed to write error report");
    }
}

fn write_report(err: &anyhow::Error, raw: bool, w: &mut dyn WriteColor) -> io::Result<()> {
    if err.is::<Reported>() {
        return Ok(());
    }

    if raw {
        output::print_json(w, &error_object(err))
    } else {
        output::print_error(w, &format!("{err:#}"))
    }
}

/// `{"status": "error", "error": ..., "status_code": ...}` for raw mode.
pub(crate) fn error_object(err: &anyhow::Error) -> Value {
    let api_error = err.downcast_ref::<KuberaError>();
    let message = match api_error {
        Some(e) => e.to_string(),
        None => format!("{err:#}"),
    };

    json!({
        "status": "error",
        "error": message,
        "status_code": api_error.and_then(KuberaError::status_code),
    })
}

#[cfg(test)]
pub(crate) mod testing {
    use auth::ApiCredentials;
    use common::ClientConfig;
    use kubera_rest::KuberaClient;
    use termcolor::Buffer;
    use wiremock::MockServer;

    pub fn client_for(server: &MockServer) -> KuberaClient {
        let credentials = ApiCredentials::new("test_key".into(), "test_secret".into());
        let config = ClientConfig::default().with_base_url(server.uri());
        KuberaClient::with_config(credentials, config).unwrap()
    }

    pub fn text(buffer: Buffer) -> String {
        String::from_utf8(buffer.into_inner()).unwrap()
    }
}
