use axum::response::{IntoResponse, Redirect, Response};
use validator::ValidationErrors;

use crate::core::error::{AppError, Result};
use crate::core::extractor::BrowserSession;
use crate::modules::backend::BackendError;
use crate::modules::views::Toast;
use crate::shared::validation::flatten_validation_errors;

/// Why a panel form post was not applied
#[derive(Debug)]
pub enum FormFailure {
    /// Rejected before reaching the backend
    Invalid(String),
    Backend(BackendError),
}

impl FormFailure {
    pub fn invalid(errors: &ValidationErrors) -> Self {
        FormFailure::Invalid(flatten_validation_errors(errors))
    }

    /// Message for the error toast
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            FormFailure::Invalid(message) => message.clone(),
            FormFailure::Backend(err) => err.user_message(fallback),
        }
    }
}

impl From<BackendError> for FormFailure {
    fn from(err: BackendError) -> Self {
        FormFailure::Backend(err)
    }
}

/// Turn a form outcome into a toast and a redirect to `back`.
///
/// Rejected tokens sign the browser out instead.
pub async fn finish_form(
    browser: &BrowserSession,
    outcome: std::result::Result<String, FormFailure>,
    fallback: &str,
    back: &str,
) -> Result<Response> {
    let toast = match outcome {
        Ok(message) => Toast::success(message),
        Err(FormFailure::Backend(err)) if err.is_auth_failure() => {
            browser.handle.state.lock().await.sign_out();
            return Err(AppError::from(err));
        }
        Err(failure) => {
            if let FormFailure::Backend(ref err) = failure {
                tracing::warn!("{}: {}", fallback, err);
            }
            Toast::error(failure.user_message(fallback))
        }
    };

    browser.flash(toast).await;
    Ok(Redirect::to(back).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::admin::panel::AdminSection;
    use crate::features::auth::model::Role;
    use crate::features::panels::ViewSession;
    use crate::modules::sessions::SessionStore;
    use crate::shared::test_helpers::sample_user;
    use axum::http::{header, StatusCode};
    use std::time::Duration;

    async fn browser() -> BrowserSession {
        let store: SessionStore<ViewSession> = SessionStore::new(Duration::from_secs(60));
        BrowserSession {
            handle: store.resolve(None).await,
            token: Some("tok".into()),
        }
    }

    #[test]
    fn test_backend_message_preferred_over_fallback() {
        let failure = FormFailure::from(BackendError::Status {
            status: 404,
            message: Some("Report not found".into()),
        });
        assert_eq!(failure.user_message("Failed to add note"), "Report not found");

        let failure = FormFailure::from(BackendError::Transport("refused".into()));
        assert_eq!(failure.user_message("Failed to add note"), "Failed to add note");
    }

    #[tokio::test]
    async fn test_rejected_token_signs_out_before_redirect() {
        let browser = browser().await;
        {
            let mut session = browser.handle.state.lock().await;
            session.current_user = Some(sample_user(Role::Admin));
            session.admin.activate(AdminSection::Users);
        }

        let outcome = Err(FormFailure::from(BackendError::Status {
            status: 401,
            message: Some("Token expired".into()),
        }));
        let err = finish_form(&browser, outcome, "Failed to update report", "/admin/users")
            .await
            .unwrap_err();

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/");

        let mut session = browser.handle.state.lock().await;
        assert!(session.current_user.is_none());
        assert_eq!(session.admin.active(), AdminSection::Dashboard);
        assert!(session.take_toasts().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_form_toasts_and_returns() {
        let browser = browser().await;
        let response = finish_form(
            &browser,
            Err(FormFailure::Invalid("Note must be 1-1000 characters".into())),
            "Failed to add note",
            "/admin/reports?page=2",
        )
        .await
        .unwrap();

        assert_eq!(response.headers()[header::LOCATION], "/admin/reports?page=2");
        let toasts = browser.handle.state.lock().await.take_toasts();
        assert_eq!(toasts, vec![Toast::error("Note must be 1-1000 characters")]);
    }
}
