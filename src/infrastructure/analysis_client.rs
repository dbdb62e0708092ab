// HTTP client for the upload/analysis backend
use crate::application::analysis_service::{AnalysisService, UploadFile};
use crate::infrastructure::config::AnalysisSettings;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};

#[derive(Debug, Clone)]
pub struct AnalysisClient {
    client: reqwest::Client,
    endpoint: String,
    field_name: String,
}

impl AnalysisClient {
    pub fn new(settings: &AnalysisSettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: format!(
                "{}/{}",
                settings.base_url.trim_end_matches('/'),
                settings.path.trim_start_matches('/')
            ),
            field_name: settings.field_name.clone(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn build_form(&self, files: Vec<UploadFile>) -> Form {
        files.into_iter().fold(Form::new(), |form, file| {
            let part = Part::bytes(file.content.to_vec()).file_name(file.file_name);
            form.part(self.field_name.clone(), part)
        })
    }
}

#[async_trait]
impl AnalysisService for AnalysisClient {
    async fn submit(&self, files: Vec<UploadFile>) -> Result<()> {
        let form = self.build_form(files);
        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .context("Failed to send files to the analysis service")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Analysis service rejected upload with status {}: {}", status, body);
        }

        Ok(())
    }
}
