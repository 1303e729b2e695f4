use uuid::Uuid;

use crate::shared::constants::{SESSION_COOKIE, TOKEN_COOKIE};

/// Token cookie lifetime; the backend decides actual token validity
const TOKEN_MAX_AGE_SECS: u64 = 7 * 24 * 60 * 60;

/// Value of cookie `name` in a `Cookie` header
pub fn parse_cookie<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    for part in header.split(';') {
        let part = part.trim();
        if let Some(value) = part.strip_prefix(name) {
            if let Some(value) = value.strip_prefix('=') {
                return Some(value);
            }
        }
    }
    None
}

fn secure_suffix(secure: bool) -> &'static str {
    if secure {
        "; Secure"
    } else {
        ""
    }
}

/// Set-Cookie value persisting the bearer token
pub fn token_cookie(token: &str, secure: bool) -> String {
    format!(
        "{TOKEN_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={TOKEN_MAX_AGE_SECS}{}",
        secure_suffix(secure)
    )
}

/// Set-Cookie value removing the bearer token
pub fn clear_token_cookie() -> String {
    format!("{TOKEN_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// Set-Cookie value for the view-session id (browser-session lifetime)
pub fn session_cookie(id: Uuid, secure: bool) -> String {
    format!(
        "{SESSION_COOKIE}={id}; Path=/; HttpOnly; SameSite=Lax{}",
        secure_suffix(secure)
    )
}
