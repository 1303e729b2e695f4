use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppForm, BrowserSession};
use crate::features::auth::gate::PanelGate;
use crate::features::auth::model::UserProfile;
use crate::features::panels::{
    fetch_section, finish_form, render_html, FetchMode, PanelContext, Section,
};
use crate::features::reports::dtos::ReportListParams;
use crate::features::reports::page::ReportDetailView;
use crate::features::worker::dtos::WorkerStatusForm;
use crate::features::worker::page::{worker_report_link, WorkerPage};
use crate::features::worker::panel::{return_href, WorkerFetch, WorkerPanel, WorkerSection};
use crate::features::worker::services::WorkerService;
use crate::modules::views::Toast;

/// State for worker panel handlers
#[derive(Clone)]
pub struct WorkerState {
    pub service: Arc<WorkerService>,
    pub pages: Arc<PanelContext>,
}

async fn admit(state: &WorkerState, browser: &BrowserSession) -> Result<(UserProfile, String)> {
    let user = PanelGate::WORKER.admit(state.service.api(), browser).await?;
    // admit() rejects browsers without a token
    let token = browser.token().unwrap_or_default().to_string();
    Ok((user, token))
}

async fn load_section(
    state: &WorkerState,
    browser: &BrowserSession,
    token: &str,
    section: WorkerSection,
    mode: FetchMode,
) -> Result<bool> {
    let fetch = {
        let session = browser.handle.state.lock().await;
        WorkerFetch::for_section(section, &session.worker)
    };
    let failure_message = fetch.failure_message();

    fetch_section::<WorkerPanel, _>(
        browser,
        section,
        mode,
        failure_message,
        state.service.load(token, fetch),
    )
    .await
}

async fn render_page(
    state: &WorkerState,
    browser: &BrowserSession,
    user: &UserProfile,
    detail: Option<ReportDetailView>,
) -> Result<Response> {
    let page = {
        let mut session = browser.handle.state.lock().await;
        WorkerPage::build(&state.pages, &mut session, user, detail, true)
    };
    Ok(render_html("worker/index.html", page)?.into_response())
}

async fn show_section(
    state: WorkerState,
    browser: BrowserSession,
    section: WorkerSection,
    params: ReportListParams,
) -> Result<Response> {
    let (user, token) = admit(&state, &browser).await?;

    if section == WorkerSection::Assigned {
        let mut session = browser.handle.state.lock().await;
        session.worker.report_filters = params.filters;
        session.worker.pagination.current_page = params.page.unwrap_or(1).max(1);
    }
    load_section(&state, &browser, &token, section, FetchMode::Interactive).await?;

    render_page(&state, &browser, &user, None).await
}

/// `GET /worker`: the dashboard
pub async fn index(
    State(state): State<WorkerState>,
    browser: BrowserSession,
    Query(params): Query<ReportListParams>,
) -> Result<Response> {
    show_section(state, browser, WorkerSection::Dashboard, params).await
}

/// `GET /worker/{section}?page=&status=&category=&search=`
pub async fn section(
    State(state): State<WorkerState>,
    browser: BrowserSession,
    Path(slug): Path<String>,
    Query(params): Query<ReportListParams>,
) -> Result<Response> {
    let section = WorkerSection::from_slug(&slug)
        .ok_or_else(|| AppError::NotFound(format!("Unknown worker section: {}", slug)))?;
    show_section(state, browser, section, params).await
}

/// Assigned report detail with the status form
pub async fn report_detail(
    State(state): State<WorkerState>,
    browser: BrowserSession,
    Path(id): Path<String>,
) -> Result<Response> {
    let (user, token) = admit(&state, &browser).await?;

    let active = browser.handle.state.lock().await.worker.active();
    load_section(&state, &browser, &token, active, FetchMode::Interactive).await?;

    let detail = match state.service.detail(&token, &id).await {
        Ok(report) => Some(ReportDetailView::new(
            &state.pages,
            &report,
            worker_report_link,
        )),
        Err(err) if err.is_auth_failure() => return Err(err.into()),
        Err(err) => {
            tracing::warn!("Failed to load assigned report {}: {}", id, err);
            browser
                .flash(Toast::error("Failed to load report details"))
                .await;
            None
        }
    };

    render_page(&state, &browser, &user, detail).await
}

/// Start or resolve an assigned report, then go back to the active section
pub async fn update_status(
    State(state): State<WorkerState>,
    browser: BrowserSession,
    Path(id): Path<String>,
    AppForm(form): AppForm<WorkerStatusForm>,
) -> Result<Response> {
    let (_, token) = admit(&state, &browser).await?;

    let outcome = state.service.update_status(&token, &id, form).await;
    let back = return_href(&browser.handle.state.lock().await.worker);
    finish_form(&browser, outcome, "Failed to update report status", &back).await
}

pub async fn refresh(
    State(state): State<WorkerState>,
    browser: BrowserSession,
) -> Result<Response> {
    let (user, token) = admit(&state, &browser).await?;

    let active = browser.handle.state.lock().await.worker.active();
    load_section(&state, &browser, &token, active, FetchMode::Silent).await?;

    let page = {
        let mut session = browser.handle.state.lock().await;
        WorkerPage::build(&state.pages, &mut session, &user, None, false)
    };
    Ok(render_html("worker/section.html", page)?.into_response())
}
