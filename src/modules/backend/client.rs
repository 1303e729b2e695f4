use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::api::CivicApi;
use super::error::{BackendError, BackendResult};
use crate::core::config::BackendConfig;
use crate::features::admin::dtos::{
    AdminDashboard, NoteRequest, ReportUpdate, UserPage, UserQuery, UserRoleUpdate,
    UserStatusUpdate, WorkerRoster,
};
use crate::features::auth::dtos::{AuthPayload, LoginRequest, RegisterRequest};
use crate::features::auth::model::UserProfile;
use crate::features::reports::dtos::{
    CreatedReport, MyReportsResponse, ReportPage, ReportQuery, ReportSubmission,
};
use crate::features::reports::models::Report;
use crate::features::worker::dtos::{WorkerDashboard, WorkerStatusUpdate};

/// Profile endpoint answers with the bare user or `{ user }`
#[derive(Deserialize)]
#[serde(untagged)]
enum ProfileEnvelope {
    Wrapped { user: UserProfile },
    Bare(UserProfile),
}

/// HTTP client for the reporting backend
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(config: &BackendConfig) -> BackendResult<Self> {
        let mut builder = reqwest::Client::builder().user_agent("FixMyCityWeb/1.0");
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|e| {
            tracing::error!("Failed to build backend HTTP client: {:?}", e);
            BackendError::Transport(e.to_string())
        })?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send and return the raw body of a 2xx response
    async fn execute(&self, request: RequestBuilder, label: &str) -> BackendResult<String> {
        let response = request.send().await.map_err(|e| {
            tracing::error!("Backend {} request failed: {}", label, e);
            BackendError::Transport(e.to_string())
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            tracing::error!("Failed to read backend {} response: {}", label, e);
            BackendError::Transport(e.to_string())
        })?;

        if !status.is_success() {
            let err = BackendError::from_response(status, &body);
            tracing::warn!("Backend {} returned {}: {}", label, status, err);
            return Err(err);
        }

        Ok(body)
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        label: &str,
    ) -> BackendResult<T> {
        let body = self.execute(request, label).await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse backend {} response: {}", label, e);
            BackendError::Decode(e.to_string())
        })
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        token: &str,
        body: &B,
        label: &str,
    ) -> BackendResult<()> {
        let request = self.request(method, path, Some(token)).json(body);
        self.execute(request, label).await.map(|_| ())
    }

    fn submission_form(submission: &ReportSubmission) -> BackendResult<Form> {
        let coordinates = submission.resolved_coordinates();

        let mut form = Form::new()
            .text("title", submission.title.clone())
            .text("description", submission.description.clone())
            .text("category", submission.category.as_str())
            .text("priority", submission.priority.as_str())
            .text("location[address]", submission.address.clone())
            .text("location[coordinates][lat]", coordinates.lat.to_string())
            .text("location[coordinates][lng]", coordinates.lng.to_string());

        for image in &submission.images {
            let part = Part::bytes(image.bytes.clone())
                .file_name(image.file_name.clone())
                .mime_str(&image.content_type)
                .map_err(|e| {
                    tracing::warn!("Rejected upload {}: {}", image.file_name, e);
                    BackendError::Transport(format!("Invalid image type: {}", e))
                })?;
            form = form.part("images", part);
        }

        Ok(form)
    }
}

fn id_path(prefix: &str, id: &str, suffix: &str) -> String {
    format!("{}/{}{}", prefix, urlencoding::encode(id), suffix)
}

#[async_trait]
impl CivicApi for BackendClient {
    async fn login(&self, credentials: &LoginRequest) -> BackendResult<AuthPayload> {
        let request = self
            .request(Method::POST, "/api/auth/login", None)
            .json(credentials);
        self.fetch(request, "login").await
    }

    async fn register(&self, registration: &RegisterRequest) -> BackendResult<AuthPayload> {
        let request = self
            .request(Method::POST, "/api/auth/register", None)
            .json(registration);
        self.fetch(request, "register").await
    }

    async fn profile(&self, token: &str) -> BackendResult<UserProfile> {
        let request = self.request(Method::GET, "/api/auth/profile", Some(token));
        let envelope: ProfileEnvelope = self.fetch(request, "profile").await?;
        Ok(match envelope {
            ProfileEnvelope::Wrapped { user } => user,
            ProfileEnvelope::Bare(user) => user,
        })
    }

    async fn list_reports(&self, query: &ReportQuery) -> BackendResult<ReportPage> {
        let path = format!("/api/reports?{}", query.query_string());
        self.fetch(self.request(Method::GET, &path, None), "list reports")
            .await
    }

    async fn get_report(&self, token: Option<&str>, id: &str) -> BackendResult<Report> {
        let path = id_path("/api/reports", id, "");
        self.fetch(self.request(Method::GET, &path, token), "get report")
            .await
    }

    async fn create_report(
        &self,
        token: &str,
        submission: &ReportSubmission,
    ) -> BackendResult<Report> {
        let form = Self::submission_form(submission)?;
        let request = self
            .request(Method::POST, "/api/reports", Some(token))
            .multipart(form);
        let created: CreatedReport = self.fetch(request, "create report").await?;
        let report = created.into_report();
        tracing::info!("Report submitted: {}", report.id);
        Ok(report)
    }

    async fn my_reports(&self, token: &str) -> BackendResult<Vec<Report>> {
        let request = self.request(Method::GET, "/api/reports/my-reports", Some(token));
        let response: MyReportsResponse = self.fetch(request, "my reports").await?;
        Ok(response.reports)
    }

    async fn admin_dashboard(&self, token: &str) -> BackendResult<AdminDashboard> {
        let request = self.request(Method::GET, "/api/admin/dashboard", Some(token));
        self.fetch(request, "admin dashboard").await
    }

    async fn admin_reports(&self, token: &str, query: &ReportQuery) -> BackendResult<ReportPage> {
        let path = format!("/api/admin/reports?{}", query.query_string());
        self.fetch(self.request(Method::GET, &path, Some(token)), "admin reports")
            .await
    }

    async fn update_report(
        &self,
        token: &str,
        id: &str,
        update: &ReportUpdate,
    ) -> BackendResult<()> {
        let path = id_path("/api/admin/reports", id, "");
        self.send(Method::PUT, &path, token, update, "update report")
            .await
    }

    async fn add_note(&self, token: &str, id: &str, note: &NoteRequest) -> BackendResult<()> {
        let path = id_path("/api/admin/reports", id, "/notes");
        self.send(Method::POST, &path, token, note, "add note").await
    }

    async fn workers(&self, token: &str) -> BackendResult<Vec<UserProfile>> {
        let request = self.request(Method::GET, "/api/admin/workers", Some(token));
        let roster: WorkerRoster = self.fetch(request, "workers").await?;
        Ok(roster.workers)
    }

    async fn admin_users(&self, token: &str, query: &UserQuery) -> BackendResult<UserPage> {
        let path = format!("/api/admin/users?{}", query.query_string());
        self.fetch(self.request(Method::GET, &path, Some(token)), "admin users")
            .await
    }

    async fn set_user_status(
        &self,
        token: &str,
        id: &str,
        update: &UserStatusUpdate,
    ) -> BackendResult<()> {
        let path = id_path("/api/admin/users", id, "/status");
        self.send(Method::PUT, &path, token, update, "user status")
            .await
    }

    async fn set_user_role(
        &self,
        token: &str,
        id: &str,
        update: &UserRoleUpdate,
    ) -> BackendResult<()> {
        let path = id_path("/api/admin/users", id, "/role");
        self.send(Method::PUT, &path, token, update, "user role").await
    }

    async fn worker_dashboard(&self, token: &str) -> BackendResult<WorkerDashboard> {
        let request = self.request(Method::GET, "/api/worker/dashboard", Some(token));
        self.fetch(request, "worker dashboard").await
    }

    async fn assigned_reports(
        &self,
        token: &str,
        query: &ReportQuery,
    ) -> BackendResult<ReportPage> {
        let path = format!("/api/worker/assigned-reports?{}", query.query_string());
        self.fetch(
            self.request(Method::GET, &path, Some(token)),
            "assigned reports",
        )
        .await
    }

    async fn assigned_report(&self, token: &str, id: &str) -> BackendResult<Report> {
        let path = id_path("/api/worker/assigned-reports", id, "");
        self.fetch(self.request(Method::GET, &path, Some(token)), "assigned report")
            .await
    }

    async fn update_assigned_status(
        &self,
        token: &str,
        id: &str,
        update: &WorkerStatusUpdate,
    ) -> BackendResult<()> {
        let path = id_path("/api/worker/assigned-reports", id, "/status");
        self.send(Method::PUT, &path, token, update, "assigned status")
            .await
    }
}
