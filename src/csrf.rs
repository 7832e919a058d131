//! Form tokens bound to a signed cookie.
//!
//! Every page with a form carries a hidden `csrf_token` field whose value must
//! match the `csrf_token` cookie. The cookie is signed with a key stretched
//! from `SECRET_KEY`, so only this server can mint one.

use axum_extra::extract::cookie::{Cookie, Key, SameSite, SignedCookieJar};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

pub const COOKIE_NAME: &str = "csrf_token";

pub fn signing_key(secret: &str) -> Key {
    Key::derive_from(secret.as_bytes())
}

/// Returns the visitor's current token, minting a new one when the cookie is
/// absent or fails verification.
pub fn issue(jar: SignedCookieJar) -> (SignedCookieJar, String) {
    let existing = jar.get(COOKIE_NAME).map(|c| c.value().to_string());
    if let Some(token) = existing.filter(|t| !t.is_empty()) {
        return (jar, token);
    }

    let token = Uuid::new_v4().simple().to_string();
    let cookie = Cookie::build((COOKIE_NAME, token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::hours(12))
        .build();
    (jar.add(cookie), token)
}

pub fn verify(jar: &SignedCookieJar, submitted: &str) -> AppResult<()> {
    match jar.get(COOKIE_NAME) {
        Some(cookie) if !submitted.is_empty() && cookie.value() == submitted => Ok(()),
        _ => Err(AppError::Csrf),
    }
}
