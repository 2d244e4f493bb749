mod client;
mod endpoint;

pub use client::{FeedOrigin, FeedResult, fetch_articles, fetch_with_fallback};
pub use endpoint::articles_url;
