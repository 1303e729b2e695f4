use std::sync::Arc;

use validator::Validate;

use crate::features::reports::dtos::{ImageUpload, ReportForm, ReportSubmission};
use crate::features::reports::models::Report;
use crate::features::reports::panel::{PublicData, PublicFetch};
use crate::features::panels::FormFailure;
use crate::modules::backend::{BackendError, BackendResult, CivicApi};

/// Public panel operations: report listings, details and submission
pub struct ReportService {
    api: Arc<dyn CivicApi>,
}

impl ReportService {
    pub fn new(api: Arc<dyn CivicApi>) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &dyn CivicApi {
        self.api.as_ref()
    }

    /// Fetch the data behind a public section
    pub async fn load(&self, token: Option<&str>, fetch: PublicFetch) -> BackendResult<PublicData> {
        match fetch {
            PublicFetch::Reports(query) => {
                let page = self.api.list_reports(&query).await?;
                tracing::debug!(
                    "Loaded {} public reports (page {}/{})",
                    page.reports.len(),
                    page.meta.current_page,
                    page.meta.total_pages
                );
                Ok(PublicData::Reports(page))
            }
            PublicFetch::MyReports => {
                let token = token.ok_or(BackendError::Status {
                    status: 401,
                    message: Some("Please login to view your reports".to_string()),
                })?;
                Ok(PublicData::MyReports(self.api.my_reports(token).await?))
            }
        }
    }

    pub async fn detail(&self, token: Option<&str>, id: &str) -> BackendResult<Report> {
        self.api.get_report(token, id).await
    }

    /// Validate the form and forward it with its images
    pub async fn submit(
        &self,
        token: &str,
        form: ReportForm,
        images: Vec<ImageUpload>,
    ) -> Result<Report, FormFailure> {
        form.validate().map_err(|e| FormFailure::invalid(&e))?;

        let submission = ReportSubmission::from_form(form, images);
        if submission.coordinates.is_none() {
            tracing::debug!("Report submitted without coordinates, using the default location");
        }

        let report = self
            .api
            .create_report(token, &submission)
            .await
            .map_err(FormFailure::Backend)?;
        tracing::info!(
            "Report {} submitted with {} images",
            report.id,
            submission.images.len()
        );
        Ok(report)
    }
}
