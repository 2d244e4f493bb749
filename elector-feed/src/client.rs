use std::time::Duration;

use log::warn;
use serde::{Deserialize, Serialize};

use elector_logic::{Article, bundled_articles, prelude::*};

use crate::endpoint::articles_url;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);
const FETCH_ATTEMPTS: u32 = 3;
const RETRY_DELAY: Duration = Duration::from_millis(500);

/// Where a finished feed load got its articles from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, specta::Type)]
pub enum FeedOrigin {
    Remote,
    Bundled,
}

#[derive(Debug, Clone, Serialize, Deserialize, specta::Type)]
pub struct FeedResult {
    pub articles: Vec<Article>,
    pub origin: FeedOrigin,
}

/// One fetch of the remote feed. Fails on connection errors, non-2xx
/// statuses, and malformed bodies.
pub async fn fetch_articles() -> Result<Vec<Article>> {
    fetch_articles_from(&articles_url()).await
}

async fn fetch_articles_from(url: &str) -> Result<Vec<Article>> {
    let client = reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()?;

    let articles = client
        .get(url)
        .send()
        .await
        .context("Could not reach the news feed")?
        .error_for_status()
        .context("News feed returned an error status")?
        .json::<Vec<Article>>()
        .await
        .context("News feed response was not valid article JSON")?;

    Ok(articles)
}

/// Load the feed for display: up to [FETCH_ATTEMPTS] tries against the
/// remote endpoint, then the bundled article set. Never fails, the worst
/// outcome for the UI is stale bundled content.
pub async fn fetch_with_fallback() -> FeedResult {
    fetch_with_fallback_from(&articles_url()).await
}

async fn fetch_with_fallback_from(url: &str) -> FeedResult {
    let mut last_err = None;

    for attempt in 1..=FETCH_ATTEMPTS {
        match fetch_articles_from(url).await {
            Ok(articles) => {
                return FeedResult {
                    articles,
                    origin: FeedOrigin::Remote,
                };
            }
            Err(why) => {
                warn!("News fetch attempt {attempt}/{FETCH_ATTEMPTS} failed: {why:?}");
                last_err = Some(why);
                if attempt < FETCH_ATTEMPTS {
                    tokio::time::sleep(RETRY_DELAY).await;
                }
            }
        }
    }

    bundled_fallback(last_err)
}

fn bundled_fallback(err: Option<anyhow::Error>) -> FeedResult {
    if let Some(why) = err {
        warn!("Falling back to bundled articles: {why:?}");
    }
    FeedResult {
        articles: bundled_articles(),
        origin: FeedOrigin::Bundled,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    const BODY: &str = r#"[{
        "title": "Remote Headline",
        "summary": "Fetched over the wire.",
        "source": "Wire",
        "date": "May 1, 2023",
        "icon_name": "newspaper.fill"
    }]"#;

    /// Serve `responses` one per connection on an ephemeral port, returning
    /// the address to point the client at.
    async fn serve(responses: Vec<String>) -> std::net::SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            for response in responses {
                let (mut stream, _) = listener.accept().await.unwrap();
                let mut buf = [0u8; 1024];
                let _ = stream.read(&mut buf).await;
                stream.write_all(response.as_bytes()).await.unwrap();
            }
        });

        addr
    }

    fn ok_response() -> String {
        format!(
            "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
            BODY.len(),
            BODY
        )
    }

    fn error_response() -> String {
        "HTTP/1.1 500 Internal Server Error\r\ncontent-length: 0\r\nconnection: close\r\n\r\n"
            .to_string()
    }

    #[tokio::test]
    async fn test_remote_fetch_succeeds_first_try() {
        let addr = serve(vec![ok_response()]).await;

        let result = fetch_with_fallback_from(&format!("http://{addr}/articles")).await;

        assert_eq!(result.origin, FeedOrigin::Remote);
        assert_eq!(result.articles.len(), 1);
        assert_eq!(result.articles[0].title, "Remote Headline");
        assert!(!result.articles[0].id.is_nil());
    }

    #[tokio::test]
    async fn test_retries_error_statuses_until_success() {
        // Two 500s, then a good body; the third attempt should land
        let addr = serve(vec![error_response(), error_response(), ok_response()]).await;

        let result = fetch_with_fallback_from(&format!("http://{addr}/articles")).await;

        assert_eq!(result.origin, FeedOrigin::Remote);
        assert_eq!(result.articles[0].source, "Wire");
    }

    #[tokio::test]
    async fn test_falls_back_when_unreachable() {
        // Nothing listens on the reserved port, every attempt is refused
        let result = fetch_with_fallback_from("http://127.0.0.1:1/articles").await;

        assert_eq!(result.origin, FeedOrigin::Bundled);
        assert_eq!(result.articles.len(), 4);
    }

    #[tokio::test]
    async fn test_falls_back_on_malformed_body() {
        let junk = "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 2\r\nconnection: close\r\n\r\n{}";
        let addr = serve(vec![junk.to_string(); 3]).await;

        let result = fetch_with_fallback_from(&format!("http://{addr}/articles")).await;

        assert_eq!(result.origin, FeedOrigin::Bundled);
    }

    #[test]
    fn test_bundled_fallback() {
        let result = bundled_fallback(Some(anyhow::anyhow!("connection refused")));
        assert_eq!(result.origin, FeedOrigin::Bundled);
        assert_eq!(result.articles.len(), 4);
    }

    #[test]
    fn test_feed_result_serializes_for_ui() {
        let result = bundled_fallback(None);
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"Bundled\""));
        assert!(json.contains("City Council Approves New Budget"));
    }
}
