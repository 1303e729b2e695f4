use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Redirect, Response},
};

use crate::core::extractor::{AppForm, BrowserSession};
use crate::features::auth::dtos::{AuthPayload, LoginRequest, RegisterForm};
use crate::features::auth::routes::AuthState;
use crate::features::panels::FormFailure;
use crate::modules::sessions::{clear_token_cookie, token_cookie};
use crate::modules::views::Toast;

/// Store the token cookie, remember the profile and send the user to their panel
async fn sign_in(
    state: &AuthState,
    browser: &BrowserSession,
    payload: AuthPayload,
    message: &str,
) -> Response {
    let home = payload.user.role.home_path();
    {
        let mut session = browser.handle.state.lock().await;
        session.sign_out();
        session.current_user = Some(payload.user);
        session.push_toast(Toast::success(message));
    }

    (
        [(
            header::SET_COOKIE,
            token_cookie(&payload.token, state.pages.secure_cookies),
        )],
        Redirect::to(home),
    )
        .into_response()
}

async fn reject(browser: &BrowserSession, failure: FormFailure, fallback: &str) -> Response {
    if let FormFailure::Backend(ref err) = failure {
        tracing::warn!("{}: {}", fallback, err);
    }
    browser
        .flash(Toast::error(failure.user_message(fallback)))
        .await;
    Redirect::to("/").into_response()
}

/// Login with email and password
pub async fn login(
    State(state): State<AuthState>,
    browser: BrowserSession,
    AppForm(dto): AppForm<LoginRequest>,
) -> Response {
    match state.service.login(dto).await {
        Ok(payload) => sign_in(&state, &browser, payload, "Login successful!").await,
        Err(failure) => reject(&browser, failure, "Login failed").await,
    }
}

/// Register a new user or worker
pub async fn register(
    State(state): State<AuthState>,
    browser: BrowserSession,
    AppForm(form): AppForm<RegisterForm>,
) -> Response {
    match state.service.register(form.into()).await {
        Ok(payload) => sign_in(&state, &browser, payload, "Registration successful!").await,
        Err(failure) => reject(&browser, failure, "Registration failed").await,
    }
}

/// Drop the token and every panel's state
pub async fn logout(browser: BrowserSession) -> Response {
    {
        let mut session = browser.handle.state.lock().await;
        session.sign_out();
        session.push_toast(Toast::success("Logged out successfully"));
    }

    (
        [(header::SET_COOKIE, clear_token_cookie())],
        Redirect::to("/"),
    )
        .into_response()
}
