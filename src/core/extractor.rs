use axum::{
    body::Body,
    extract::{rejection::FormRejection, FromRequest, FromRequestParts, Request},
    http::request::Parts,
    response::{IntoResponse, Response},
    Form,
};
use serde::de::DeserializeOwned;

use crate::core::error::AppError;
use crate::features::panels::ViewSession;
use crate::modules::sessions::SessionHandle;
use crate::modules::views::Toast;

/// Custom urlencoded form extractor that provides consistent error responses
pub struct AppForm<T>(pub T);

impl<T, S> FromRequest<S> for AppForm<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppFormRejection;

    async fn from_request(req: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        match Form::<T>::from_request(req, state).await {
            Ok(value) => Ok(Self(value.0)),
            Err(rejection) => Err(AppFormRejection(rejection)),
        }
    }
}

pub struct AppFormRejection(FormRejection);

impl IntoResponse for AppFormRejection {
    fn into_response(self) -> Response {
        let message = match self.0 {
            FormRejection::FailedToDeserializeForm(err) => format!("Invalid form data: {}", err),
            FormRejection::FailedToDeserializeFormBody(err) => {
                format!("Invalid form data: {}", err)
            }
            FormRejection::InvalidFormContentType(err) => {
                format!("Missing form content type: {}", err)
            }
            _ => "Failed to parse form body".to_string(),
        };

        AppError::BadRequest(message).into_response()
    }
}

/// The browser behind a request: its view session and its bearer token (if any)
#[derive(Clone)]
pub struct BrowserSession {
    pub handle: SessionHandle<ViewSession>,
    pub token: Option<String>,
}

impl BrowserSession {
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Queue a toast for the next rendered page
    pub async fn flash(&self, toast: Toast) {
        self.handle.state.lock().await.push_toast(toast);
    }
}

impl<S> FromRequestParts<S> for BrowserSession
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<BrowserSession>()
            .cloned()
            .ok_or_else(|| AppError::Internal("View session layer is not installed".to_string()))
    }
}
