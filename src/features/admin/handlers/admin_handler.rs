use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppForm, BrowserSession};
use crate::features::admin::dtos::{
    AdminListParams, NoteRequest, ReportUpdateForm, UserRoleForm, UserStatusForm,
};
use crate::features::admin::page::{AdminPage, AdminReportDetail};
use crate::features::admin::panel::{return_href, AdminFetch, AdminPanel, AdminSection};
use crate::features::admin::services::AdminService;
use crate::features::auth::gate::PanelGate;
use crate::features::auth::model::UserProfile;
use crate::features::panels::{
    fetch_section, finish_form, render_html, FetchMode, PanelContext, Section,
};
use crate::modules::views::Toast;

/// State for admin panel handlers
#[derive(Clone)]
pub struct AdminState {
    pub service: Arc<AdminService>,
    pub pages: Arc<PanelContext>,
}

/// Signed-in admin and the token their requests are made with
struct Admitted {
    user: UserProfile,
    token: String,
}

async fn admit(state: &AdminState, browser: &BrowserSession) -> Result<Admitted> {
    let user = PanelGate::ADMIN.admit(state.service.api(), browser).await?;
    // admit() rejects browsers without a token
    let token = browser.token().unwrap_or_default().to_string();
    Ok(Admitted { user, token })
}

async fn load_section(
    state: &AdminState,
    browser: &BrowserSession,
    token: &str,
    section: AdminSection,
    mode: FetchMode,
) -> Result<bool> {
    let fetch = {
        let session = browser.handle.state.lock().await;
        AdminFetch::for_section(section, &session.admin)
    };
    let failure_message = fetch.failure_message();

    fetch_section::<AdminPanel, _>(
        browser,
        section,
        mode,
        failure_message,
        state.service.load(token, fetch),
    )
    .await
}

async fn render_page(
    state: &AdminState,
    browser: &BrowserSession,
    user: &UserProfile,
    detail: Option<AdminReportDetail>,
) -> Result<Response> {
    let page = {
        let mut session = browser.handle.state.lock().await;
        AdminPage::build(&state.pages, &mut session, user, detail, true)
    };
    Ok(render_html("admin/index.html", page)?.into_response())
}

/// Copy the section's query into the panel state before its fetch
async fn apply_params(browser: &BrowserSession, section: AdminSection, params: AdminListParams) {
    let mut session = browser.handle.state.lock().await;
    let admin = &mut session.admin;
    let page = params.page.unwrap_or(1).max(1);

    match section {
        AdminSection::Dashboard => {}
        AdminSection::Reports => {
            admin.report_filters = params.reports;
            admin.pagination.current_page = page;
        }
        AdminSection::Map => admin.map_status = params.reports.status,
        AdminSection::Users => {
            admin.user_filters = params.user_filters();
            admin.pagination.current_page = page;
        }
    }
}

async fn show_section(
    state: AdminState,
    browser: BrowserSession,
    section: AdminSection,
    params: AdminListParams,
) -> Result<Response> {
    let admitted = admit(&state, &browser).await?;

    apply_params(&browser, section, params).await;
    load_section(&state, &browser, &admitted.token, section, FetchMode::Interactive).await?;

    render_page(&state, &browser, &admitted.user, None).await
}

// =============================================================================
// SECTIONS
// =============================================================================

/// `GET /admin`: the dashboard
pub async fn index(
    State(state): State<AdminState>,
    browser: BrowserSession,
    Query(params): Query<AdminListParams>,
) -> Result<Response> {
    show_section(state, browser, AdminSection::Dashboard, params).await
}

/// `GET /admin/{section}?page=&status=&category=&search=&role=`
pub async fn section(
    State(state): State<AdminState>,
    browser: BrowserSession,
    Path(slug): Path<String>,
    Query(params): Query<AdminListParams>,
) -> Result<Response> {
    let section = AdminSection::from_slug(&slug)
        .ok_or_else(|| AppError::NotFound(format!("Unknown admin section: {}", slug)))?;
    show_section(state, browser, section, params).await
}

/// Report detail with the worker roster, over the active section
pub async fn report_detail(
    State(state): State<AdminState>,
    browser: BrowserSession,
    Path(id): Path<String>,
) -> Result<Response> {
    let admitted = admit(&state, &browser).await?;

    let active = browser.handle.state.lock().await.admin.active();
    load_section(&state, &browser, &admitted.token, active, FetchMode::Interactive).await?;

    let (report, workers) = state.service.report_detail(&admitted.token, &id).await;

    let workers = match workers {
        Ok(workers) => workers,
        Err(err) if err.is_auth_failure() => return Err(err.into()),
        Err(err) => {
            tracing::warn!("Failed to load workers: {}", err);
            browser.flash(Toast::error("Failed to load workers")).await;
            Vec::new()
        }
    };

    let detail = match report {
        Ok(report) => Some(AdminReportDetail::new(&state.pages, &report, &workers)),
        Err(err) if err.is_auth_failure() => return Err(err.into()),
        Err(err) => {
            tracing::warn!("Failed to load report {}: {}", id, err);
            browser
                .flash(Toast::error("Failed to load report details"))
                .await;
            None
        }
    };

    render_page(&state, &browser, &admitted.user, detail).await
}

/// Periodic silent refresh of the active section
pub async fn refresh(
    State(state): State<AdminState>,
    browser: BrowserSession,
) -> Result<Response> {
    let admitted = admit(&state, &browser).await?;

    let active = browser.handle.state.lock().await.admin.active();
    load_section(&state, &browser, &admitted.token, active, FetchMode::Silent).await?;

    let page = {
        let mut session = browser.handle.state.lock().await;
        AdminPage::build(&state.pages, &mut session, &admitted.user, None, false)
    };
    Ok(render_html("admin/section.html", page)?.into_response())
}

// =============================================================================
// ACTIONS
// =============================================================================

/// Active section with its page and filters; form posts redirect there so the same
/// list or map is re-fetched
async fn active_href(browser: &BrowserSession) -> String {
    return_href(&browser.handle.state.lock().await.admin)
}

/// Save status, priority, assignee and resolution notes
pub async fn update_report(
    State(state): State<AdminState>,
    browser: BrowserSession,
    Path(id): Path<String>,
    AppForm(form): AppForm<ReportUpdateForm>,
) -> Result<Response> {
    let admitted = admit(&state, &browser).await?;

    let outcome = state
        .service
        .update_report(&admitted.token, &id, form)
        .await;
    let back = active_href(&browser).await;
    finish_form(&browser, outcome, "Failed to update report", &back).await
}

pub async fn add_note(
    State(state): State<AdminState>,
    browser: BrowserSession,
    Path(id): Path<String>,
    AppForm(note): AppForm<NoteRequest>,
) -> Result<Response> {
    let admitted = admit(&state, &browser).await?;

    let outcome = state.service.add_note(&admitted.token, &id, note).await;
    let back = format!("/admin/reports/{}", id);
    finish_form(&browser, outcome, "Failed to add note", &back).await
}

pub async fn toggle_user_status(
    State(state): State<AdminState>,
    browser: BrowserSession,
    Path(id): Path<String>,
    AppForm(form): AppForm<UserStatusForm>,
) -> Result<Response> {
    let admitted = admit(&state, &browser).await?;

    let outcome = state
        .service
        .toggle_user_status(&admitted.token, &id, form)
        .await;
    let back = active_href(&browser).await;
    finish_form(&browser, outcome, "Failed to update user status", &back).await
}

pub async fn change_user_role(
    State(state): State<AdminState>,
    browser: BrowserSession,
    Path(id): Path<String>,
    AppForm(form): AppForm<UserRoleForm>,
) -> Result<Response> {
    let admitted = admit(&state, &browser).await?;

    let outcome = state
        .service
        .change_user_role(&admitted.token, &id, form)
        .await;
    let back = active_href(&browser).await;
    finish_form(&browser, outcome, "Failed to change user role", &back).await
}

#[cfg(test)]
mod tests {
    use crate::features::admin::dtos::AdminDashboard;
    use crate::features::auth::model::Role;
    use crate::shared::test_helpers::{
        body_text, get_with_cookie as get, post_form, sid_cookie, test_app, FakeApi,
    };
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        Router,
    };
    use std::sync::Arc;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_plain_user_is_turned_away_before_any_admin_fetch() {
        let api = Arc::new(FakeApi::with_role(Role::User));
        let response = test_app(api.clone())
            .oneshot(get("/admin", "token=tok"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/");
        assert_eq!(api.calls(), vec!["profile".to_string()]);
    }

    #[tokio::test]
    async fn test_dashboard_reload_renders_identical_stats() {
        let api = Arc::new(FakeApi::with_role(Role::Admin).with_admin_dashboard(
            AdminDashboard {
                total_reports: 42,
                active_reports: 7,
                resolved_reports: 30,
                total_users: 12,
                recent_reports: Vec::new(),
            },
        ));
        let app: Router = test_app(api.clone());

        let first = app.clone().oneshot(get("/admin", "token=tok")).await.unwrap();
        assert_eq!(first.status(), StatusCode::OK);
        let sid = sid_cookie(&first);
        let first_html = body_text(first).await;

        let second = app
            .oneshot(get("/admin/dashboard", &format!("token=tok; {}", sid)))
            .await
            .unwrap();
        let second_html = body_text(second).await;

        assert!(first_html.contains("42"));
        let stats = |html: &str| html.find("Total Reports").map(|i| html[i..].to_string());
        assert_eq!(stats(&first_html), stats(&second_html));
        assert_eq!(
            api.calls().iter().filter(|c| *c == "admin_dashboard").count(),
            2
        );
    }

    #[tokio::test]
    async fn test_unknown_section_is_not_found() {
        let api = Arc::new(FakeApi::with_role(Role::Admin));
        let response = test_app(api)
            .oneshot(get("/admin/settings", "token=tok"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_redirects_back_to_active_section() {
        let api = Arc::new(FakeApi::with_role(Role::Admin));
        let response = test_app(api.clone())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/admin/reports/r1")
                    .header(header::COOKIE, "token=tok")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from("status=&priority=high&assigned_to=w1&resolution_notes="))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/admin/dashboard");
        let sent = api.last_update().unwrap();
        assert_eq!(sent.status.map(|s| s.as_str()), Some("in_progress"));
    }

    #[tokio::test]
    async fn test_update_returns_to_same_page_and_filters() {
        let api = Arc::new(FakeApi::with_role(Role::Admin));
        let app: Router = test_app(api.clone());

        let listing = app
            .clone()
            .oneshot(get("/admin/reports?page=3&status=pending", "token=tok"))
            .await
            .unwrap();
        assert_eq!(listing.status(), StatusCode::OK);
        let cookie = format!("token=tok; {}", sid_cookie(&listing));

        let response = app
            .clone()
            .oneshot(post_form(
                "/admin/reports/r1",
                &cookie,
                "status=resolved&priority=high&assigned_to=w1&resolution_notes=fixed",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let location = response.headers()[header::LOCATION].to_str().unwrap().to_string();
        assert_eq!(location, "/admin/reports?page=3&status=pending");

        let reloaded = app.oneshot(get(&location, &cookie)).await.unwrap();
        assert_eq!(reloaded.status(), StatusCode::OK);
        assert_eq!(
            api.calls().last().map(String::as_str),
            Some("admin_reports:page=3&limit=20&status=pending")
        );
    }

    #[tokio::test]
    async fn test_unassign_sends_empty_assignee() {
        let api = Arc::new(FakeApi::with_role(Role::Admin));
        let response = test_app(api.clone())
            .oneshot(post_form(
                "/admin/reports/r1",
                "token=tok",
                "status=pending&priority=low&assigned_to=&resolution_notes=",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let sent = api.last_update().unwrap();
        assert_eq!(sent.assigned_to.as_deref(), Some(""));
        assert_eq!(sent.status.map(|s| s.as_str()), Some("pending"));
    }

    #[tokio::test]
    async fn test_refresh_reloads_only_active_section() {
        let api = Arc::new(FakeApi::with_role(Role::Admin));
        let app: Router = test_app(api.clone());

        let first = app
            .clone()
            .oneshot(get("/admin/reports?status=pending", "token=tok"))
            .await
            .unwrap();
        let cookie = format!("token=tok; {}", sid_cookie(&first));
        let before = api.calls().len();

        let response = app.oneshot(get("/admin/refresh", &cookie)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(!html.contains("<html"));

        assert_eq!(
            api.calls()[before..].to_vec(),
            vec![
                "profile".to_string(),
                "admin_reports:page=1&limit=20&status=pending".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_refresh_failure_queues_no_toast() {
        let api = Arc::new(FakeApi::with_role(Role::Admin));
        let app: Router = test_app(api.clone());

        let first = app.clone().oneshot(get("/admin", "token=tok")).await.unwrap();
        let cookie = format!("token=tok; {}", sid_cookie(&first));

        api.set_down(true);
        let refreshed = app
            .clone()
            .oneshot(get("/admin/refresh", &cookie))
            .await
            .unwrap();
        assert_eq!(refreshed.status(), StatusCode::OK);
        assert!(!body_text(refreshed).await.contains("toast error"));
        api.set_down(false);

        let next = app.oneshot(get("/admin/dashboard", &cookie)).await.unwrap();
        assert_eq!(next.status(), StatusCode::OK);
        assert!(!body_text(next).await.contains("toast error"));
    }

    #[tokio::test]
    async fn test_refresh_with_rejected_token_signs_out() {
        let api = Arc::new(FakeApi::with_role(Role::Admin));
        let response = test_app(api.clone())
            .oneshot(get("/admin/refresh", "token=expired"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/");
        assert!(response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .any(|v| v.starts_with("token=;")));
        assert_eq!(api.calls(), vec!["profile".to_string()]);
    }
}
