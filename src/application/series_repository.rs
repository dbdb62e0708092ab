// Repository trait for the CSV series on offer
use async_trait::async_trait;

#[async_trait]
pub trait SeriesRepository: Send + Sync {
    /// File names of every available series, sorted.
    async fn list_series_files(&self) -> anyhow::Result<Vec<String>>;
}
