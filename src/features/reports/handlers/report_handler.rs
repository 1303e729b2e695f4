use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, Query, State},
    http::header,
    response::{IntoResponse, Redirect, Response},
};

use crate::core::error::Result;
use crate::core::extractor::BrowserSession;
use crate::features::auth::gate::{optional_user, OptionalUser};
use crate::features::panels::{
    fetch_section, finish_form, render_html, FetchMode, PanelContext, Section,
};
use crate::features::reports::dtos::{ImageUpload, ReportForm, ReportListParams};
use crate::features::reports::page::{public_report_link, PublicPage, ReportDetailView};
use crate::features::reports::panel::{PublicFetch, PublicPanel, PublicSection};
use crate::features::reports::services::ReportService;
use crate::modules::sessions::clear_token_cookie;
use crate::modules::views::Toast;

/// State for public panel handlers
#[derive(Clone)]
pub struct ReportState {
    pub service: Arc<ReportService>,
    pub pages: Arc<PanelContext>,
}

/// Attach the token-clearing cookie when the public panel dropped a rejected token
fn with_identity(resolved: &OptionalUser, response: Response) -> Response {
    if resolved.clear_token {
        ([(header::SET_COOKIE, clear_token_cookie())], response).into_response()
    } else {
        response
    }
}

/// Load `section` with the filters and page slot the session now holds
async fn load_section(
    state: &ReportState,
    browser: &BrowserSession,
    section: PublicSection,
    mode: FetchMode,
) -> Result<bool> {
    let fetch = {
        let session = browser.handle.state.lock().await;
        PublicFetch::for_section(section, &session.public)
    };
    let failure_message = fetch.failure_message();

    fetch_section::<PublicPanel, _>(
        browser,
        section,
        mode,
        failure_message,
        state.service.load(browser.token(), fetch),
    )
    .await
}

async fn render_page(
    state: &ReportState,
    browser: &BrowserSession,
    resolved: &OptionalUser,
    detail: Option<ReportDetailView>,
) -> Result<Response> {
    let page = {
        let mut session = browser.handle.state.lock().await;
        PublicPage::build(
            &state.pages,
            &mut session,
            resolved.user.as_ref(),
            detail,
            true,
        )
    };
    let html = render_html("public/index.html", page)?;
    Ok(with_identity(resolved, html.into_response()))
}

/// Public report board: `GET /?page=&status=&category=&search=`
pub async fn index(
    State(state): State<ReportState>,
    browser: BrowserSession,
    Query(params): Query<ReportListParams>,
) -> Result<Response> {
    let resolved = optional_user(state.service.api(), &browser).await;

    {
        let mut session = browser.handle.state.lock().await;
        session.public.report_filters = params.filters;
        session.public.pagination.current_page = params.page.unwrap_or(1).max(1);
    }
    load_section(&state, &browser, PublicSection::Reports, FetchMode::Interactive).await?;

    render_page(&state, &browser, &resolved, None).await
}

/// Reports submitted by the signed-in user
pub async fn my_reports(
    State(state): State<ReportState>,
    browser: BrowserSession,
) -> Result<Response> {
    let resolved = optional_user(state.service.api(), &browser).await;
    if resolved.user.is_none() {
        browser
            .flash(Toast::error("Please login to view your reports"))
            .await;
        return Ok(with_identity(&resolved, Redirect::to("/").into_response()));
    }

    let committed =
        load_section(&state, &browser, PublicSection::MyReports, FetchMode::Interactive).await?;
    if committed {
        browser.flash(Toast::success("Your reports loaded")).await;
    }

    render_page(&state, &browser, &resolved, None).await
}

/// Report detail modal over the active section
pub async fn report_detail(
    State(state): State<ReportState>,
    browser: BrowserSession,
    Path(id): Path<String>,
) -> Result<Response> {
    let resolved = optional_user(state.service.api(), &browser).await;

    let active = {
        let mut session = browser.handle.state.lock().await;
        let active = session.public.active();
        if active == PublicSection::MyReports && resolved.user.is_none() {
            session.public.activate(PublicSection::Reports);
            PublicSection::Reports
        } else {
            active
        }
    };
    load_section(&state, &browser, active, FetchMode::Interactive).await?;

    let detail = match state.service.detail(browser.token(), &id).await {
        Ok(report) => Some(ReportDetailView::new(
            &state.pages,
            &report,
            public_report_link,
        )),
        Err(err) => {
            tracing::warn!("Failed to load report {}: {}", id, err);
            browser
                .flash(Toast::error("Failed to load report details"))
                .await;
            None
        }
    };

    render_page(&state, &browser, &resolved, detail).await
}

/// Read the multipart submission: text fields into the form, `images` files as uploads
async fn read_submission(
    mut multipart: Multipart,
) -> std::result::Result<(ReportForm, Vec<ImageUpload>), String> {
    let mut form = ReportForm::default();
    let mut images = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(|e| e.to_string())? {
        let name = field.name().unwrap_or_default().to_string();

        if name == "images" {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let bytes = field.bytes().await.map_err(|e| e.to_string())?;

            // Browsers send an empty part when no file was picked
            if file_name.is_empty() || bytes.is_empty() {
                continue;
            }
            images.push(ImageUpload {
                file_name,
                content_type,
                bytes: bytes.to_vec(),
            });
        } else {
            let value = field.text().await.map_err(|e| e.to_string())?;
            form.set_field(&name, value);
        }
    }

    Ok((form, images))
}

/// Submit a new report (multipart, with photos)
pub async fn submit_report(
    State(state): State<ReportState>,
    browser: BrowserSession,
    multipart: Multipart,
) -> Result<Response> {
    let resolved = optional_user(state.service.api(), &browser).await;
    let (Some(_), Some(token)) = (resolved.user.as_ref(), browser.token()) else {
        browser
            .flash(Toast::error("Please login to submit a report"))
            .await;
        return Ok(with_identity(&resolved, Redirect::to("/").into_response()));
    };

    let (form, images) = match read_submission(multipart).await {
        Ok(parts) => parts,
        Err(e) => {
            tracing::warn!("Malformed report submission: {}", e);
            browser.flash(Toast::error("Failed to submit report")).await;
            return Ok(Redirect::to("/").into_response());
        }
    };

    let outcome = state
        .service
        .submit(token, form, images)
        .await
        .map(|_| "Report submitted successfully!".to_string());
    let back = if outcome.is_ok() {
        PublicSection::MyReports.href()
    } else {
        "/".to_string()
    };
    finish_form(&browser, outcome, "Failed to submit report", &back).await
}

/// Silent re-fetch of the visible public section, rendered as a fragment
pub async fn refresh(
    State(state): State<ReportState>,
    browser: BrowserSession,
) -> Result<Response> {
    let resolved = optional_user(state.service.api(), &browser).await;
    if resolved.clear_token {
        return Ok(with_identity(&resolved, Redirect::to("/").into_response()));
    }

    let active = {
        let mut session = browser.handle.state.lock().await;
        if resolved.user.is_none() {
            session.public.activate(PublicSection::Reports);
        }
        session.public.active()
    };
    load_section(&state, &browser, active, FetchMode::Silent).await?;

    let page = {
        let mut session = browser.handle.state.lock().await;
        PublicPage::build(
            &state.pages,
            &mut session,
            resolved.user.as_ref(),
            None,
            false,
        )
    };
    Ok(render_html("public/section.html", page)?.into_response())
}
