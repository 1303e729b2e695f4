use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::features::auth::model::{Role, UserProfile};
use crate::shared::validation::{PHONE_REGEX, USERNAME_REGEX};

/// Login form, forwarded to `POST /api/auth/login`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Registration form, forwarded to `POST /api/auth/register`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 50, message = "First name is required"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 50, message = "Last name is required"))]
    pub last_name: String,

    #[validate(
        length(min = 3, max = 30, message = "Username must be 3-30 characters"),
        regex(path = *USERNAME_REGEX, message = "Username may only contain letters, digits and underscores")
    )]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(regex(path = *PHONE_REGEX, message = "Invalid phone number"))]
    pub phone: Option<String>,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    #[serde(default = "default_role")]
    #[validate(custom(function = "validate_self_service_role"))]
    pub role: Role,
}

fn default_role() -> Role {
    Role::User
}

/// Admin accounts are never self-registered
fn validate_self_service_role(role: &Role) -> Result<(), ValidationError> {
    if *role == Role::Admin {
        let mut err = ValidationError::new("role");
        err.message = Some("Choose either a user or a worker account".into());
        return Err(err);
    }
    Ok(())
}

impl RegisterRequest {
    /// Blank optional inputs from the browser form become absent
    pub fn normalized(mut self) -> Self {
        self.first_name = self.first_name.trim().to_string();
        self.last_name = self.last_name.trim().to_string();
        self.username = self.username.trim().to_string();
        self.email = self.email.trim().to_string();
        self.phone = self
            .phone
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());
        self
    }
}

/// Registration form as posted by the browser
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterForm {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub password: String,
    #[serde(default = "default_role")]
    pub role: Role,
}

impl From<RegisterForm> for RegisterRequest {
    fn from(form: RegisterForm) -> Self {
        RegisterRequest {
            first_name: form.first_name,
            last_name: form.last_name,
            username: form.username,
            email: form.email,
            phone: form.phone,
            password: form.password,
            role: form.role,
        }
        .normalized()
    }
}

/// Successful login/register response
#[derive(Debug, Clone, Deserialize)]
pub struct AuthPayload {
    pub token: String,
    pub user: UserProfile,
}
