// Series repository backed by a directory of CSV files
use crate::application::series_repository::SeriesRepository;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct DirectorySeriesRepository {
    dir: PathBuf,
    suffix: String,
}

impl DirectorySeriesRepository {
    pub fn new(dir: impl Into<PathBuf>, suffix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            suffix: suffix.into(),
        }
    }
}

#[async_trait]
impl SeriesRepository for DirectorySeriesRepository {
    async fn list_series_files(&self) -> Result<Vec<String>> {
        let mut entries = tokio::fs::read_dir(&self.dir)
            .await
            .with_context(|| format!("Failed to read series directory {}", self.dir.display()))?;

        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) if name.ends_with(self.suffix.as_str()) => files.push(name),
                Ok(_) => {}
                Err(name) => tracing::warn!("Skipping non UTF-8 file name {:?}", name),
            }
        }

        files.sort();
        tracing::debug!("Found {} series files in {}", files.len(), self.dir.display());
        Ok(files)
    }
}
