use crate::core::extractor::BrowserSession;
use crate::features::panels::ViewSession;
use crate::modules::sessions::{parse_cookie, session_cookie, SessionStore};
use crate::shared::constants::{SESSION_COOKIE, TOKEN_COOKIE};
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::request_id::{MakeRequestId, RequestId};
use tracing::Span;
use uuid::Uuid;

/// Request ID generator using UUID v7 (time-ordered)
#[derive(Clone, Copy)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Custom MakeSpan that includes request_id in the tracing span
#[derive(Clone, Debug)]
pub struct MakeSpanWithRequestId;

impl<B> tower_http::trace::MakeSpan<B> for MakeSpanWithRequestId {
    fn make_span(&mut self, request: &axum::http::Request<B>) -> Span {
        let request_id = request
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-");

        tracing::info_span!(
            "request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = %request_id,
        )
    }
}

pub fn cors_layer(allowed_origins: Vec<String>) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    // If origins list contains "*", allow any origin
    if allowed_origins.iter().any(|o| o == "*") {
        cors.allow_origin(Any)
    } else {
        // Parse origins into HeaderValue
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors.allow_origin(AllowOrigin::list(origins))
    }
}

/// State of [`session_middleware`]
#[derive(Clone)]
pub struct SessionLayer {
    pub store: Arc<SessionStore<ViewSession>>,
    pub secure_cookies: bool,
}

pub async fn session_middleware(
    State(layer): State<SessionLayer>,
    mut req: Request,
    next: Next,
) -> Response {
    let (session_id, token) = {
        let cookies = req
            .headers()
            .get(header::COOKIE)
            .and_then(|h| h.to_str().ok())
            .unwrap_or("");

        (
            parse_cookie(cookies, SESSION_COOKIE).and_then(|v| Uuid::parse_str(v).ok()),
            parse_cookie(cookies, TOKEN_COOKIE)
                .filter(|t| !t.is_empty())
                .map(str::to_string),
        )
    };

    let handle = layer.store.resolve(session_id).await;
    let (id, is_new) = (handle.id, handle.is_new);

    // Insert the browser session into request extensions
    req.extensions_mut().insert(BrowserSession { handle, token });
    let mut response = next.run(req).await;

    if is_new {
        match HeaderValue::from_str(&session_cookie(id, layer.secure_cookies)) {
            Ok(value) => {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            Err(e) => tracing::warn!("Failed to encode session cookie: {}", e),
        }
    }

    response
}
