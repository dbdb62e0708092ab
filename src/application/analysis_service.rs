// Analysis backend contract and fire-and-forget submission
use async_trait::async_trait;
use bytes::Bytes;
use std::sync::Arc;

pub const UPLOAD_QUEUED_MESSAGE: &str = "Upload Complete. Request has been queued for analysis.";

/// One local file picked for analysis.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub content: Bytes,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct UploadStatus {
    pub files: usize,
    pub message: &'static str,
}

#[async_trait]
pub trait AnalysisService: Send + Sync {
    /// Send the files to the backend that turns them into CSV series.
    async fn submit(&self, files: Vec<UploadFile>) -> anyhow::Result<()>;
}

/// Queue `files` for analysis without waiting for the backend. Success is
/// assumed; failures only reach the log. Must be called inside a tokio runtime.
pub fn submit_upload(service: Arc<dyn AnalysisService>, files: Vec<UploadFile>) -> UploadStatus {
    let count = files.len();
    tokio::spawn(async move {
        match service.submit(files).await {
            Ok(()) => tracing::info!("Submitted {} files for analysis", count),
            Err(e) => tracing::warn!("Analysis submission of {} files failed: {:#}", count, e),
        }
    });

    UploadStatus {
        files: count,
        message: UPLOAD_QUEUED_MESSAGE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::{mpsc, oneshot};

    struct ChannelService {
        tx: mpsc::UnboundedSender<Vec<String>>,
    }

    #[async_trait]
    impl AnalysisService for ChannelService {
        async fn submit(&self, files: Vec<UploadFile>) -> anyhow::Result<()> {
            let names = files.into_iter().map(|f| f.file_name).collect();
            let _ = self.tx.send(names);
            Ok(())
        }
    }

    /// Blocks until released, then reports on `done` and fails.
    struct StalledService {
        release: tokio::sync::Mutex<Option<oneshot::Receiver<()>>>,
        done: mpsc::UnboundedSender<()>,
    }

    #[async_trait]
    impl AnalysisService for StalledService {
        async fn submit(&self, _files: Vec<UploadFile>) -> anyhow::Result<()> {
            if let Some(rx) = self.release.lock().await.take() {
                let _ = rx.await;
            }
            let _ = self.done.send(());
            anyhow::bail!("backend unavailable")
        }
    }

    #[tokio::test]
    async fn test_submit_reaches_service() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let service: Arc<dyn AnalysisService> = Arc::new(ChannelService { tx });

        let status = submit_upload(
            service,
            vec![UploadFile::new("a.log", "x"), UploadFile::new("b.log", "y")],
        );

        assert_eq!(status.files, 2);
        assert_eq!(status.message, UPLOAD_QUEUED_MESSAGE);
        assert_eq!(rx.recv().await.unwrap(), vec!["a.log", "b.log"]);
    }

    #[tokio::test]
    async fn test_submit_does_not_wait_for_backend() {
        let (release_tx, release_rx) = oneshot::channel();
        let (done_tx, mut done_rx) = mpsc::unbounded_channel();
        let service: Arc<dyn AnalysisService> = Arc::new(StalledService {
            release: tokio::sync::Mutex::new(Some(release_rx)),
            done: done_tx,
        });

        let status = submit_upload(service, vec![UploadFile::new("a.log", "x")]);
        assert_eq!(status.message, UPLOAD_QUEUED_MESSAGE);

        // Status is in hand while the backend is still stalled
        tokio::task::yield_now().await;
        assert!(done_rx.try_recv().is_err());
        assert!(!release_tx.is_closed());

        // Failure after the fact is only logged
        release_tx.send(()).unwrap();
        assert_eq!(done_rx.recv().await, Some(()));
    }
}
