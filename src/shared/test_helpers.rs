//! Fixtures shared by unit tests: sample records, an in-memory [`CivicApi`] and a
//! loopback HTTP backend for exercising the reqwest client.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::Body,
    extract::{Multipart, RawQuery, State},
    http::{header, HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use chrono::{TimeZone, Utc};
use serde_json::json;

use crate::core::config::BackendConfig;
use crate::core::middleware::SessionLayer;
use crate::features::admin::dtos::{
    AdminDashboard, NoteRequest, ReportUpdate, UserPage, UserQuery, UserRoleUpdate,
    UserStatusUpdate,
};
use crate::features::auth::dtos::{AuthPayload, LoginRequest, RegisterRequest};
use crate::features::auth::model::{Role, UserProfile};
use crate::features::map::{MapCapabilities, MapRenderer};
use crate::features::panels::PanelContext;
use crate::features::reports::dtos::{ReportPage, ReportQuery, ReportSubmission};
use crate::features::reports::models::{
    Category, Coordinates, Location, PersonRef, Priority, Report, ReportImage, ReportStatus,
};
use crate::features::worker::dtos::{WorkerDashboard, WorkerStatusUpdate};
use crate::modules::backend::{BackendClient, BackendError, BackendResult, CivicApi};
use crate::modules::sessions::SessionStore;
use crate::shared::types::PageMeta;

// =============================================================================
// SAMPLE RECORDS
// =============================================================================

/// Pending pothole report by Ada Lovelace with one uploaded image
pub fn sample_report(id: &str, coordinates: Option<(f64, f64)>) -> Report {
    Report {
        id: id.to_string(),
        title: format!("Pothole {}", id),
        description: "Deep hole near the crossing".to_string(),
        category: Category::Potholes,
        priority: Priority::Medium,
        status: ReportStatus::Pending,
        location: Location {
            address: "Main St & 3rd Ave".to_string(),
            coordinates: coordinates.map(|(lat, lng)| Coordinates { lat, lng }),
        },
        reporter: Some(PersonRef {
            id: "u-user".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
        }),
        assigned_to: None,
        images: vec![ReportImage {
            path: format!("uploads/{}.jpg", id),
        }],
        admin_notes: Vec::new(),
        created_at: Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap(),
        resolved_at: None,
        resolution_notes: None,
    }
}

pub fn sample_user(role: Role) -> UserProfile {
    let (first_name, last_name) = match role {
        Role::Admin => ("Ann", "Admin"),
        Role::Worker => ("Wes", "Worker"),
        Role::User => ("Ada", "Lovelace"),
    };
    UserProfile {
        id: format!("u-{}", role.as_str()),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        username: Some(first_name.to_lowercase()),
        email: format!("{}@example.com", first_name.to_lowercase()),
        phone: None,
        role,
        is_active: true,
        created_at: Some(Utc.with_ymd_and_hms(2024, 1, 15, 8, 0, 0).unwrap()),
        last_login: None,
    }
}

fn sample_page(reports: Vec<Report>) -> ReportPage {
    let total = reports.len() as u64;
    ReportPage {
        reports,
        meta: PageMeta {
            current_page: 1,
            total_pages: 1,
            total,
        },
    }
}

/// Five-page listing positioned on the requested page
fn paged_sample(query: &ReportQuery, report: Report) -> ReportPage {
    let page = query.page.unwrap_or(1);
    ReportPage {
        reports: vec![report],
        meta: PageMeta {
            current_page: page,
            total_pages: page.max(5),
            total: 100,
        },
    }
}

// =============================================================================
// IN-MEMORY BACKEND
// =============================================================================

/// [`CivicApi`] double that answers every call for a profile of one role.
///
/// The token `"expired"` is rejected with 401. Calls are recorded by name, with the
/// query string or id appended where the operation has one. While the backend is
/// marked down, section loads fail with a transport error.
pub struct FakeApi {
    role: Role,
    down: AtomicBool,
    admin_dashboard: AdminDashboard,
    calls: Mutex<Vec<String>>,
    submissions: Mutex<Vec<ReportSubmission>>,
    updates: Mutex<Vec<ReportUpdate>>,
}

impl FakeApi {
    pub fn with_role(role: Role) -> Self {
        Self {
            role,
            down: AtomicBool::new(false),
            admin_dashboard: AdminDashboard::default(),
            calls: Mutex::new(Vec::new()),
            submissions: Mutex::new(Vec::new()),
            updates: Mutex::new(Vec::new()),
        }
    }

    pub fn with_admin_dashboard(mut self, dashboard: AdminDashboard) -> Self {
        self.admin_dashboard = dashboard;
        self
    }

    pub fn set_down(&self, down: bool) {
        self.down.store(down, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_submission(&self) -> Option<ReportSubmission> {
        self.submissions.lock().unwrap().last().cloned()
    }

    pub fn last_update(&self) -> Option<ReportUpdate> {
        self.updates.lock().unwrap().last().cloned()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }

    fn check(&self, token: &str) -> BackendResult<()> {
        if token == "expired" {
            return Err(BackendError::Status {
                status: 401,
                message: Some("Token expired".to_string()),
            });
        }
        Ok(())
    }

    /// Gate for section loads; profile checks are never affected
    fn reachable(&self) -> BackendResult<()> {
        if self.down.load(Ordering::SeqCst) {
            return Err(BackendError::Transport("connection refused".to_string()));
        }
        Ok(())
    }

    fn payload(&self) -> AuthPayload {
        AuthPayload {
            token: "fake-token".to_string(),
            user: sample_user(self.role),
        }
    }
}

#[async_trait]
impl CivicApi for FakeApi {
    async fn login(&self, _credentials: &LoginRequest) -> BackendResult<AuthPayload> {
        self.record("login");
        Ok(self.payload())
    }

    async fn register(&self, _registration: &RegisterRequest) -> BackendResult<AuthPayload> {
        self.record("register");
        Ok(self.payload())
    }

    async fn profile(&self, token: &str) -> BackendResult<UserProfile> {
        self.record("profile");
        self.check(token)?;
        Ok(sample_user(self.role))
    }

    async fn list_reports(&self, query: &ReportQuery) -> BackendResult<ReportPage> {
        self.record(format!("list_reports:{}", query.query_string()));
        self.reachable()?;
        Ok(sample_page(vec![sample_report(
            "r1",
            Some((40.7128, -74.0060)),
        )]))
    }

    async fn get_report(&self, token: Option<&str>, id: &str) -> BackendResult<Report> {
        self.record(format!("get_report:{}", id));
        if let Some(token) = token {
            self.check(token)?;
        }
        Ok(sample_report(id, Some((40.7128, -74.0060))))
    }

    async fn create_report(
        &self,
        token: &str,
        submission: &ReportSubmission,
    ) -> BackendResult<Report> {
        self.record("create_report");
        self.check(token)?;
        self.submissions.lock().unwrap().push(submission.clone());
        Ok(sample_report("new", None))
    }

    async fn my_reports(&self, token: &str) -> BackendResult<Vec<Report>> {
        self.record("my_reports");
        self.check(token)?;
        self.reachable()?;
        Ok(vec![sample_report("mine", None)])
    }

    async fn admin_dashboard(&self, token: &str) -> BackendResult<AdminDashboard> {
        self.record("admin_dashboard");
        self.check(token)?;
        self.reachable()?;
        Ok(self.admin_dashboard.clone())
    }

    async fn admin_reports(&self, token: &str, query: &ReportQuery) -> BackendResult<ReportPage> {
        self.record(format!("admin_reports:{}", query.query_string()));
        self.check(token)?;
        self.reachable()?;
        Ok(paged_sample(query, sample_report("r1", Some((40.7, -74.0)))))
    }

    async fn update_report(
        &self,
        token: &str,
        id: &str,
        update: &ReportUpdate,
    ) -> BackendResult<()> {
        self.record(format!("update_report:{}", id));
        self.check(token)?;
        self.updates.lock().unwrap().push(update.clone());
        Ok(())
    }

    async fn add_note(&self, token: &str, id: &str, _note: &NoteRequest) -> BackendResult<()> {
        self.record(format!("add_note:{}", id));
        self.check(token)
    }

    async fn workers(&self, token: &str) -> BackendResult<Vec<UserProfile>> {
        self.record("workers");
        self.check(token)?;
        Ok(vec![sample_user(Role::Worker)])
    }

    async fn admin_users(&self, token: &str, query: &UserQuery) -> BackendResult<UserPage> {
        self.record(format!("admin_users:{}", query.query_string()));
        self.check(token)?;
        self.reachable()?;
        Ok(UserPage {
            users: vec![sample_user(Role::User), sample_user(Role::Worker)],
            meta: PageMeta {
                current_page: 1,
                total_pages: 1,
                total: 2,
            },
        })
    }

    async fn set_user_status(
        &self,
        token: &str,
        id: &str,
        _update: &UserStatusUpdate,
    ) -> BackendResult<()> {
        self.record(format!("set_user_status:{}", id));
        self.check(token)
    }

    async fn set_user_role(
        &self,
        token: &str,
        id: &str,
        _update: &UserRoleUpdate,
    ) -> BackendResult<()> {
        self.record(format!("set_user_role:{}", id));
        self.check(token)
    }

    async fn worker_dashboard(&self, token: &str) -> BackendResult<WorkerDashboard> {
        self.record("worker_dashboard");
        self.check(token)?;
        self.reachable()?;
        Ok(WorkerDashboard::default())
    }

    async fn assigned_reports(
        &self,
        token: &str,
        query: &ReportQuery,
    ) -> BackendResult<ReportPage> {
        self.record(format!("assigned_reports:{}", query.query_string()));
        self.check(token)?;
        self.reachable()?;
        Ok(paged_sample(query, sample_report("a1", Some((40.72, -74.01)))))
    }

    async fn assigned_report(&self, token: &str, id: &str) -> BackendResult<Report> {
        self.record(format!("assigned_report:{}", id));
        self.check(token)?;
        Ok(sample_report(id, None))
    }

    async fn update_assigned_status(
        &self,
        token: &str,
        id: &str,
        _update: &WorkerStatusUpdate,
    ) -> BackendResult<()> {
        self.record(format!("update_assigned_status:{}", id));
        self.check(token)
    }
}

// =============================================================================
// APP
// =============================================================================

/// Panel settings with every map capability but static images
pub fn panel_context() -> PanelContext {
    PanelContext {
        maps: MapRenderer::new(MapCapabilities {
            widget: true,
            static_image_key: None,
            embed: true,
        }),
        secure_cookies: false,
        refresh_interval: Duration::from_secs(30),
        geolocation_timeout: Duration::from_secs(5),
        asset_base: "http://backend.test".to_string(),
    }
}

/// Full browser-facing router over `api`, with a fresh session store
pub fn test_app(api: Arc<FakeApi>) -> Router {
    let sessions = SessionLayer {
        store: Arc::new(SessionStore::new(Duration::from_secs(600))),
        secure_cookies: false,
    };
    crate::app_router(api, Arc::new(panel_context()), sessions)
}

/// Plain GET carrying `cookie`
pub fn get_with_cookie(uri: &str, cookie: &str) -> axum::http::Request<Body> {
    axum::http::Request::builder()
        .uri(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}

/// Urlencoded form POST carrying `cookie`
pub fn post_form(uri: &str, cookie: &str, body: &str) -> axum::http::Request<Body> {
    axum::http::Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::COOKIE, cookie)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// `sid=<id>` pair from a response that opened a view session
pub fn sid_cookie(response: &Response) -> String {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("sid="))
        .and_then(|v| v.split(';').next())
        .unwrap()
        .to_string()
}

pub async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

// =============================================================================
// LOOPBACK HTTP BACKEND
// =============================================================================

/// Request as seen by the loopback backend
#[derive(Debug, Clone, PartialEq)]
pub enum CapturedRequest {
    Multipart {
        fields: HashMap<String, String>,
        files: Vec<String>,
        auth: Option<String>,
    },
    Json {
        path: String,
        body: serde_json::Value,
        auth: Option<String>,
    },
    Get {
        path: String,
        query: Option<String>,
    },
}

type Captured = Arc<tokio::sync::Mutex<Vec<CapturedRequest>>>;

pub struct FakeBackend {
    pub addr: SocketAddr,
    captured: Captured,
}

impl FakeBackend {
    pub async fn last_request(&self) -> Option<CapturedRequest> {
        self.captured.lock().await.last().cloned()
    }
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
}

async fn create_report(
    State(captured): State<Captured>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Json<serde_json::Value> {
    let mut fields = HashMap::new();
    let mut files = Vec::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        match field.file_name().map(String::from) {
            Some(file_name) => {
                field.bytes().await.unwrap();
                files.push(file_name);
            }
            None => {
                fields.insert(name, field.text().await.unwrap());
            }
        }
    }

    captured.lock().await.push(CapturedRequest::Multipart {
        fields,
        files,
        auth: bearer(&headers),
    });
    Json(json!({ "report": sample_report("created", Some((40.7128, -74.0060))) }))
}

async fn capture_json(
    State(captured): State<Captured>,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> Json<serde_json::Value> {
    captured.lock().await.push(CapturedRequest::Json {
        path: uri.path().to_string(),
        body,
        auth: bearer(&headers),
    });
    Json(json!({ "success": true }))
}

async fn list_reports(
    State(captured): State<Captured>,
    uri: Uri,
    RawQuery(query): RawQuery,
) -> Json<serde_json::Value> {
    captured.lock().await.push(CapturedRequest::Get {
        path: uri.path().to_string(),
        query,
    });
    Json(json!({ "reports": [], "currentPage": 2, "totalPages": 3, "total": 30 }))
}

async fn profile(headers: HeaderMap) -> Response {
    if bearer(&headers).as_deref() == Some("Bearer expired") {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Token expired" })),
        )
            .into_response();
    }
    Json(json!({ "user": sample_user(Role::User) })).into_response()
}

async fn register() -> Response {
    Response::builder()
        .status(StatusCode::BAD_REQUEST)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({
                "errors": [
                    { "msg": "Username already exists" },
                    { "message": "Password too weak" }
                ]
            })
            .to_string(),
        ))
        .unwrap()
}

/// Serve a scripted backend on an ephemeral loopback port
pub async fn spawn_fake_backend() -> FakeBackend {
    let captured: Captured = Arc::default();
    let app = Router::new()
        .route("/api/reports", get(list_reports).post(create_report))
        .route("/api/admin/reports/{id}", put(capture_json))
        .route("/api/auth/profile", get(profile))
        .route("/api/auth/register", post(register))
        .with_state(Arc::clone(&captured));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    FakeBackend { addr, captured }
}

pub fn client_for(backend: &FakeBackend) -> BackendClient {
    let base_url = format!("http://{}", backend.addr);
    BackendClient::new(&BackendConfig {
        base_url: base_url.clone(),
        public_url: base_url,
        timeout: None,
    })
    .unwrap()
}
