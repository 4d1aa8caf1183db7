use axum::extract::{FromRef, FromRequestParts};
use axum_extra::extract::cookie::CookieJar;

use crate::{
    db::DbPool,
    error::AppError,
    models::User,
    session::{self, SESSION_COOKIE},
};

/// The logged-in user for this request, loaded from the session cookie, plus
/// the anti-forgery token bound to the session.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: User,
    pub csrf_token: String,
}

/// Optional variant for pages that render for anonymous visitors too.
#[derive(Debug, Clone)]
pub struct MaybeSession(pub Option<AuthSession>);

/// Login requirement for the JSON API: anonymous callers get a JSON 401
/// rather than the login-page redirect the HTML routes use.
#[derive(Debug, Clone)]
pub struct ApiSession {
    pub user: User,
}

pub fn ensure_admin(user: &User) -> Result<(), AppError> {
    if !user.admin {
        return Err(AppError::Unauthorized);
    }
    Ok(())
}

pub fn ensure_csrf(session: &AuthSession, submitted: &str) -> Result<(), AppError> {
    if submitted.is_empty() || submitted != session.csrf_token {
        return Err(AppError::Unauthorized);
    }
    Ok(())
}

impl<S> FromRequestParts<S> for AuthSession
where
    DbPool: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let jar = match CookieJar::from_request_parts(parts, state).await {
            Ok(jar) => jar,
            Err(never) => match never {},
        };

        let Some(cookie) = jar.get(SESSION_COOKIE) else {
            return Err(AppError::NotLoggedIn);
        };
        let Some(claims) = session::decode_session(cookie.value()) else {
            return Err(AppError::NotLoggedIn);
        };

        let pool = DbPool::from_ref(state);
        let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE id = $1")
            .bind(claims.sub)
            .fetch_optional(&pool)
            .await?;

        // A session pointing at a deleted user is treated as logged out.
        let Some(user) = user else {
            return Err(AppError::NotLoggedIn);
        };

        Ok(AuthSession {
            user,
            csrf_token: claims.csrf,
        })
    }
}

impl<S> FromRequestParts<S> for MaybeSession
where
    DbPool: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        match AuthSession::from_request_parts(parts, state).await {
            Ok(session) => Ok(MaybeSession(Some(session))),
            Err(AppError::NotLoggedIn) => Ok(MaybeSession(None)),
            Err(err) => Err(err),
        }
    }
}

impl<S> FromRequestParts<S> for ApiSession
where
    DbPool: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        match AuthSession::from_request_parts(parts, state).await {
            Ok(session) => Ok(ApiSession { user: session.user }),
            Err(AppError::NotLoggedIn) => Err(AppError::ApiUnauthorized),
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(admin: bool) -> User {
        User {
            id: 1,
            username: "test".to_string(),
            email: "test@test.com".to_string(),
            first_name: "Testy".to_string(),
            last_name: "MacTest".to_string(),
            description: String::new(),
            image_url: String::new(),
            password_hash: String::new(),
            admin,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn admin_gate() {
        assert!(ensure_admin(&user(true)).is_ok());
        assert!(matches!(
            ensure_admin(&user(false)),
            Err(AppError::Unauthorized)
        ));
    }

    #[test]
    fn csrf_gate() {
        let session = AuthSession {
            user: user(false),
            csrf_token: "token".to_string(),
        };
        assert!(ensure_csrf(&session, "token").is_ok());
        assert!(matches!(
            ensure_csrf(&session, "other"),
            Err(AppError::Unauthorized)
        ));
        assert!(matches!(
            ensure_csrf(&session, ""),
            Err(AppError::Unauthorized)
        ));
    }
}
