use axum::response::Html;
use axum_extra::extract::cookie::CookieJar;

use crate::{
    middleware::auth::MaybeSession,
    render::{self, PageContext},
    session,
};

pub async fn homepage(session: MaybeSession, jar: CookieJar) -> (CookieJar, Html<String>) {
    let (jar, flash) = session::take_flash(jar);
    let ctx = PageContext {
        user: session.0.as_ref().map(|s| &s.user),
        csrf_token: session.0.as_ref().map(|s| s.csrf_token.as_str()),
        flash: flash.as_ref(),
    };
    (jar, Html(render::home_page(&ctx)))
}
