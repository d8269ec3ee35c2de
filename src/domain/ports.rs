use crate::domain::model::{Envelope, QueryDescriptor};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::de::DeserializeOwned;

/// Anything that can return one page of results for a query.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_page<T>(&self, query: &QueryDescriptor, page: u32) -> Result<Envelope<T>>
    where
        T: DeserializeOwned + Send + 'static;
}
