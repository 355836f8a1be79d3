// Fetcher trait for the sensor API
use crate::infrastructure::error::FetchFailure;
use async_trait::async_trait;
use serde_json::Value;

#[async_trait]
pub trait JsonFetcher: Send + Sync {
    /// GET `url` and return the decoded JSON body as-is.
    /// Shape validation is left to the caller.
    async fn fetch_json(&self, url: &str) -> Result<Value, FetchFailure>;
}
