use anyhow::{Context, Result};
use kubera_rest::KuberaClient;
use std::io::{self, BufRead, Write};
use termcolor::WriteColor;

use crate::cache::{resolve_portfolio_id, PortfolioStore};
use crate::output;

/// Read answers from `input`. Each line is read on the blocking pool, so
/// `input` is moved in and handed back after every prompt.
pub async fn run<R>(
    client: &KuberaClient,
    cache: &dyn PortfolioStore,
    out: &mut dyn WriteColor,
    input: R,
) -> Result<()>
where
    R: BufRead + Send + 'static,
{
    let portfolios = client.get_portfolios().await.context("Error")?;

    if portfolios.is_empty() {
        output::print_error(out, "No portfolios found.")?;
        return Ok(());
    }

    if let Err(e) = cache.save(&portfolios) {
        tracing::warn!(error = %e, "Failed to save portfolio cache");
    }
    output::print_portfolios(out, &portfolios, false)?;

    let question = "\nEnter portfolio index or ID to view details (or 'q' to quit): ";
    let (input, choice) = prompt(out, input, question).await?;
    let Some(choice) = choice else {
        writeln!(out, "\n\nGoodbye!")?;
        return Ok(());
    };
    if choice.eq_ignore_ascii_case("q") {
        return Ok(());
    }

    let Some(portfolio_id) = resolve_portfolio_id(cache, &choice) else {
        output::print_error(out, &format!("Invalid portfolio identifier: '{choice}'"))?;
        return Ok(());
    };

    let portfolio = client
        .get_portfolio(&portfolio_id)
        .await
        .context("Error")?;
    output::print_portfolio(out, &portfolio, false)?;

    let (_, answer) = prompt(out, input, "\nShow as tree view? (y/n): ").await?;
    if answer.is_some_and(|a| a.eq_ignore_ascii_case("y")) {
        output::print_asset_tree(out, &portfolio)?;
    }
    Ok(())
}

/// Ask a question and read one trimmed line. `None` at end of input.
async fn prompt<R>(
    out: &mut dyn WriteColor,
    mut input: R,
    question: &str,
) -> Result<(R, Option<String>)>
where
    R: BufRead + Send + 'static,
{
    write!(out, "{question}")?;
    out.flush()?;

    let (input, line) = tokio::task::spawn_blocking(move || {
        let mut line = String::new();
        let read = input.read_line(&mut line)?;
        Ok::<_, io::Error>((input, (read > 0).then(|| line.trim().to_string())))
    })
    .await
    .context("Input reader stopped")??;

    Ok((input, line))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::FileCache;
    use crate::cmd::testing::{client_for, text};
    use serde_json::json;
    use std::io::{Cursor, Read};
    use std::sync::{Arc, Mutex};
    use std::thread::{self, ThreadId};
    use tempfile::TempDir;
    use termcolor::Buffer;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mount(server: &MockServer, detail_calls: u64) {
        Mock::given(method("GET"))
            .and(path("/api/v3/data/portfolio"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [
                    {"id": "p1", "name": "Main", "currency": "USD"},
                    {"id": "p2", "name": "Second", "currency": "USD"}
                ],
                "errorCode": 0
            })))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v3/data/portfolio/p2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {
                    "id": "p2",
                    "name": "Second",
                    "netWorth": 10.0,
                    "asset": [{"id": "a", "name": "Cash", "sheetName": "Bank", "value": {"amount": 10.0}}]
                },
                "errorCode": 0
            })))
            .expect(detail_calls)
            .mount(server)
            .await;
    }

    async fn session(server: &MockServer, dir: &TempDir, typed: &str) -> String {
        let cache = FileCache::new(dir.path().join("portfolio_cache.json"));
        let mut out = Buffer::no_color();
        let input = Cursor::new(typed.as_bytes().to_vec());

        run(&client_for(server), &cache, &mut out, input)
            .await
            .unwrap();
        text(out)
    }

    #[tokio::test]
    async fn test_pick_by_index_with_tree() {
        let server = MockServer::start().await;
        mount(&server, 1).await;
        let dir = TempDir::new().unwrap();

        let printed = session(&server, &dir, "2\ny\n").await;

        assert!(printed.contains("Portfolios (2)"));
        assert!(printed.contains("Second\nID: p2"));
        assert!(printed.contains("Show as tree view? (y/n): "));
        assert!(printed.contains("└── Cash: USD 10.00"));
    }

    #[tokio::test]
    async fn test_quit() {
        let server = MockServer::start().await;
        mount(&server, 0).await;
        let dir = TempDir::new().unwrap();

        let printed = session(&server, &dir, "Q\n").await;

        assert!(printed.ends_with("(or 'q' to quit): "));
    }

    #[tokio::test]
    async fn test_invalid_choice() {
        let server = MockServer::start().await;
        mount(&server, 0).await;
        let dir = TempDir::new().unwrap();

        let printed = session(&server, &dir, "9\n").await;

        assert!(printed.contains("✗ Invalid portfolio identifier: '9'"));
    }

    #[tokio::test]
    async fn test_end_of_input() {
        let server = MockServer::start().await;
        mount(&server, 0).await;
        let dir = TempDir::new().unwrap();

        let printed = session(&server, &dir, "").await;

        assert!(printed.ends_with("Goodbye!\n"));
    }

    /// Input that records which threads it was read from.
    struct TrackedInput {
        inner: Cursor<Vec<u8>>,
        readers: Arc<Mutex<Vec<ThreadId>>>,
    }

    impl io::Read for TrackedInput {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.inner.read(buf)
        }
    }

    impl BufRead for TrackedInput {
        fn fill_buf(&mut self) -> io::Result<&[u8]> {
            self.readers.lock().unwrap().push(thread::current().id());
            self.inner.fill_buf()
        }

        fn consume(&mut self, amt: usize) {
            self.inner.consume(amt)
        }
    }

    #[tokio::test]
    async fn test_input_is_read_off_the_runtime_thread() {
        let server = MockServer::start().await;
        mount(&server, 0).await;
        let dir = TempDir::new().unwrap();
        let cache = FileCache::new(dir.path().join("portfolio_cache.json"));
        let readers = Arc::new(Mutex::new(Vec::new()));
        let input = TrackedInput {
            inner: Cursor::new(b"q\n".to_vec()),
            readers: Arc::clone(&readers),
        };

        run(&client_for(&server), &cache, &mut Buffer::no_color(), input)
            .await
            .unwrap();

        let readers = readers.lock().unwrap();
        assert!(!readers.is_empty());
        assert!(readers.iter().all(|id| *id != thread::current().id()));
    }
}
