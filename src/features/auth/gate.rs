//! Role gate run at the start of every panel request.
//!
//! The backend is the only authority on tokens; every panel request re-fetches the
//! profile and walks `Unauthenticated -> Authenticating -> Authenticated(role)`. The
//! panel then activates a section. Any failed step signs the browser out.

use crate::core::error::{AppError, Result};
use crate::core::extractor::BrowserSession;
use crate::features::auth::model::{Role, UserProfile};
use crate::modules::backend::CivicApi;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelPhase {
    Unauthenticated,
    Authenticating,
    Authenticated(Role),
}

/// Admission check for a role panel
#[derive(Debug, Clone, Copy)]
pub struct PanelGate {
    required: Role,
}

impl PanelGate {
    pub const ADMIN: PanelGate = PanelGate {
        required: Role::Admin,
    };

    pub const WORKER: PanelGate = PanelGate {
        required: Role::Worker,
    };

    /// Authenticate the browser's token and check its role.
    ///
    /// Missing or rejected tokens and role mismatches yield an auth error, which
    /// renders as a redirect home that clears the token cookie. Transport failures
    /// are returned as backend errors and leave the token alone.
    pub async fn admit(
        &self,
        api: &dyn CivicApi,
        browser: &BrowserSession,
    ) -> Result<UserProfile> {
        let mut phase = PanelPhase::Unauthenticated;

        let Some(token) = browser.token() else {
            let err = AppError::Unauthorized("Missing token".to_string());
            return Err(self.reject(browser, phase, err).await);
        };

        phase = PanelPhase::Authenticating;
        let user = match api.profile(token).await {
            Ok(user) => user,
            Err(err) if err.is_auth_failure() => {
                return Err(self.reject(browser, phase, err.into()).await);
            }
            Err(err) => {
                tracing::warn!("Profile check failed: {}", err);
                return Err(AppError::Backend(err));
            }
        };

        phase = PanelPhase::Authenticated(user.role);
        if user.role != self.required {
            let err = AppError::Forbidden(format!("{} access required", self.required.label()));
            return Err(self.reject(browser, phase, err).await);
        }

        tracing::debug!("Admitted {} to the {} panel", user.id, self.required);
        browser.handle.state.lock().await.current_user = Some(user.clone());
        Ok(user)
    }

    async fn reject(&self, browser: &BrowserSession, phase: PanelPhase, err: AppError) -> AppError {
        tracing::info!(
            "Rejected {} panel access at {:?}: {}",
            self.required,
            phase,
            err
        );
        browser.handle.state.lock().await.sign_out();
        err
    }
}

/// Signed-in user of the public panel, where signing in is optional
#[derive(Debug, Clone, Default)]
pub struct OptionalUser {
    pub user: Option<UserProfile>,
    /// The stored token was rejected and its cookie must be removed
    pub clear_token: bool,
}

/// Resolve the public panel's user without ever failing the page.
///
/// A rejected token is dropped silently; when the backend cannot be reached the
/// profile from the last successful check is kept.
pub async fn optional_user(api: &dyn CivicApi, browser: &BrowserSession) -> OptionalUser {
    let Some(token) = browser.token() else {
        return OptionalUser::default();
    };

    match api.profile(token).await {
        Ok(user) => {
            browser.handle.state.lock().await.current_user = Some(user.clone());
            OptionalUser {
                user: Some(user),
                clear_token: false,
            }
        }
        Err(err) if err.is_auth_failure() => {
            tracing::info!("Dropping rejected token on the public panel: {}", err);
            browser.handle.state.lock().await.sign_out();
            OptionalUser {
                user: None,
                clear_token: true,
            }
        }
        Err(err) => {
            tracing::warn!("Profile check failed, using cached profile: {}", err);
            OptionalUser {
                user: browser.handle.state.lock().await.current_user.clone(),
                clear_token: false,
            }
        }
    }
}
