use std::sync::Arc;

use validator::Validate;

use crate::features::auth::dtos::{AuthPayload, LoginRequest, RegisterRequest};
use crate::features::panels::FormFailure;
use crate::modules::backend::CivicApi;

/// Service for authentication operations (register, login), delegated to the backend
pub struct AuthService {
    api: Arc<dyn CivicApi>,
}

impl AuthService {
    pub fn new(api: Arc<dyn CivicApi>) -> Self {
        Self { api }
    }

    /// Login with email and password
    pub async fn login(&self, mut dto: LoginRequest) -> Result<AuthPayload, FormFailure> {
        dto.email = dto.email.trim().to_string();
        dto.validate().map_err(|e| FormFailure::invalid(&e))?;

        let payload = self.api.login(&dto).await.map_err(FormFailure::Backend)?;
        tracing::info!("User {} logged in as {}", payload.user.id, payload.user.role);
        Ok(payload)
    }

    /// Register a new user or worker account
    pub async fn register(&self, dto: RegisterRequest) -> Result<AuthPayload, FormFailure> {
        let dto = dto.normalized();
        dto.validate().map_err(|e| FormFailure::invalid(&e))?;

        let payload = self.api.register(&dto).await.map_err(FormFailure::Backend)?;
        tracing::info!("Registered {} as {}", payload.user.id, payload.user.role);
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::model::Role;
    use crate::shared::test_helpers::FakeApi;

    #[tokio::test]
    async fn test_invalid_login_never_reaches_backend() {
        let api = Arc::new(FakeApi::with_role(Role::User));
        let service = AuthService::new(api.clone());

        let err = service
            .login(LoginRequest {
                email: "nobody".into(),
                password: String::new(),
            })
            .await
            .unwrap_err();

        assert_eq!(
            err.user_message("Login failed"),
            "Invalid email format, Password is required"
        );
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_login_returns_profile() {
        let api = Arc::new(FakeApi::with_role(Role::Admin));
        let service = AuthService::new(api.clone());

        let payload = service
            .login(LoginRequest {
                email: " ann@example.com ".into(),
                password: "secret".into(),
            })
            .await
            .unwrap();

        assert_eq!(payload.user.role, Role::Admin);
        assert_eq!(api.calls(), vec!["login".to_string()]);
    }
}
