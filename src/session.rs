//! Signed-cookie sessions and one-shot flash notices.
//!
//! The session cookie carries a JWT whose claims hold the logged-in user id,
//! a per-session anti-forgery token, and an expiry. Flash notices travel in a
//! second short-lived signed cookie that is cleared as soon as it is read.

use axum_extra::extract::cookie::{Cookie, CookieJar};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

pub const SESSION_COOKIE: &str = "session";
pub const FLASH_COOKIE: &str = "flash";
pub const NOT_LOGGED_IN_MSG: &str = "You are not logged in!";

const SESSION_HOURS: i64 = 24;
const FLASH_MINUTES: i64 = 5;

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: i32,
    pub csrf: String,
    pub exp: usize,
}

#[derive(Debug, Serialize, Deserialize)]
struct FlashClaims {
    category: String,
    message: String,
    exp: usize,
}

#[derive(Debug, Clone)]
pub struct Flash {
    pub category: String,
    pub message: String,
}

fn secret() -> String {
    std::env::var("SESSION_SECRET").unwrap_or_else(|_| "shhhh".to_string())
}

/// Issue a session token for this user. Returns the encoded token together
/// with the anti-forgery token embedded in its claims.
pub fn create_session(user_id: i32) -> AppResult<(String, String)> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(SESSION_HOURS))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

    let csrf = Uuid::new_v4().to_string();
    let claims = SessionClaims {
        sub: user_id,
        csrf: csrf.clone(),
        exp: expiration.timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret().as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?;

    Ok((token, csrf))
}

/// Decode a session token; expired, tampered, or malformed tokens are all
/// treated as "no session".
pub fn decode_session(token: &str) -> Option<SessionClaims> {
    decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret().as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .ok()
}

pub fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .build()
}

pub fn remove_session(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build((SESSION_COOKIE, "")).path("/").build())
}

pub fn flash(category: &str, message: &str) -> Option<Cookie<'static>> {
    let expiration = Utc::now() + Duration::minutes(FLASH_MINUTES);
    let claims = FlashClaims {
        category: category.to_string(),
        message: message.to_string(),
        exp: expiration.timestamp() as usize,
    };
    match encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret().as_bytes()),
    ) {
        Ok(token) => Some(
            Cookie::build((FLASH_COOKIE, token))
                .path("/")
                .http_only(true)
                .build(),
        ),
        Err(err) => {
            tracing::warn!(error = %err, "failed to encode flash cookie");
            None
        }
    }
}

pub fn add_flash(jar: CookieJar, category: &str, message: &str) -> CookieJar {
    match flash(category, message) {
        Some(cookie) => jar.add(cookie),
        None => jar,
    }
}

/// A jar holding only a flash cookie, for responses built outside a handler.
pub fn flash_jar(category: &str, message: &str) -> CookieJar {
    add_flash(CookieJar::new(), category, message)
}

/// Read and clear the pending flash notice, if any.
pub fn take_flash(jar: CookieJar) -> (CookieJar, Option<Flash>) {
    let Some(cookie) = jar.get(FLASH_COOKIE) else {
        return (jar, None);
    };

    let flash = decode::<FlashClaims>(
        cookie.value(),
        &DecodingKey::from_secret(secret().as_bytes()),
        &Validation::default(),
    )
    .map(|data| Flash {
        category: data.claims.category,
        message: data.claims.message,
    })
    .ok();

    let jar = jar.remove(Cookie::build((FLASH_COOKIE, "")).path("/").build());
    (jar, flash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_round_trip_preserves_user_and_csrf() {
        let (token, csrf) = create_session(42).unwrap();
        let claims = decode_session(&token).expect("session decodes");
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.csrf, csrf);
    }

    #[test]
    fn each_session_gets_a_fresh_csrf_token() {
        let (_, a) = create_session(1).unwrap();
        let (_, b) = create_session(1).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn garbage_tokens_do_not_decode() {
        assert!(decode_session("not-a-token").is_none());
        assert!(decode_session("").is_none());
    }

    #[test]
    fn flash_round_trip() {
        let cookie = flash("success", "Profile edited!").unwrap();
        let jar = CookieJar::new().add(cookie);
        let (_, flash) = take_flash(jar);
        let flash = flash.expect("flash decodes");
        assert_eq!(flash.category, "success");
        assert_eq!(flash.message, "Profile edited!");
    }
}
