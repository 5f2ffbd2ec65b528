use async_trait::async_trait;

use crate::error::RangeFetchError;
use crate::network::range::RangeSet;

/// Source of the provider's current published address ranges.
#[async_trait]
pub trait RangeSource: Send + Sync {
    async fn fetch(&self) -> Result<RangeSet, RangeFetchError>;
}
