use axum::{
    Form, Router,
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use axum_extra::extract::cookie::CookieJar;

use crate::{
    error::AppResult,
    forms::profile::ProfileEditForm,
    middleware::auth::AuthSession,
    models::VenueKind,
    render::{self, PageContext},
    services::{like_service, user_service::{self, ProfileUpdate}},
    session,
    state::AppState,
    validators::FormErrors,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/profile", get(view))
        .route("/profile/edit", get(edit_form).post(edit))
}

fn page_ctx<'a>(
    session: &'a AuthSession,
    flash: Option<&'a session::Flash>,
) -> PageContext<'a> {
    PageContext {
        user: Some(&session.user),
        csrf_token: Some(session.csrf_token.as_str()),
        flash,
    }
}

pub async fn view(
    State(state): State<AppState>,
    session: AuthSession,
    jar: CookieJar,
) -> AppResult<(CookieJar, Html<String>)> {
    let liked_cafes =
        like_service::liked_venues(&state.pool, VenueKind::Cafe, session.user.id).await?;
    let liked_restaurants =
        like_service::liked_venues(&state.pool, VenueKind::Restaurant, session.user.id).await?;
    let (jar, flash) = session::take_flash(jar);
    let body = render::profile_page(
        &page_ctx(&session, flash.as_ref()),
        &liked_cafes,
        &liked_restaurants,
    );
    Ok((jar, Html(body)))
}

pub async fn edit_form(
    session: AuthSession,
    jar: CookieJar,
) -> AppResult<(CookieJar, Html<String>)> {
    let (jar, flash) = session::take_flash(jar);
    let body = render::profile_edit_page(
        &page_ctx(&session, flash.as_ref()),
        &ProfileEditForm::from_user(&session.user),
        &FormErrors::new(),
    );
    Ok((jar, Html(body)))
}

pub async fn edit(
    State(state): State<AppState>,
    session: AuthSession,
    jar: CookieJar,
    Form(form): Form<ProfileEditForm>,
) -> AppResult<Response> {
    let errors = form.validate();
    if !errors.is_empty() {
        let (jar, flash) = session::take_flash(jar);
        let body = render::profile_edit_page(&page_ctx(&session, flash.as_ref()), &form, &errors);
        return Ok((jar, Html(body)).into_response());
    }

    // Email uniqueness gets the same rollback-and-message treatment as
    // signup rather than surfacing a 500.
    match user_service::update_profile(&state.pool, session.user.id, &form).await? {
        ProfileUpdate::Updated(_) => {}
        ProfileUpdate::EmailTaken => {
            let flash = session::Flash {
                category: "danger".to_string(),
                message: "Email already taken!".to_string(),
            };
            let body = render::profile_edit_page(
                &page_ctx(&session, Some(&flash)),
                &form,
                &FormErrors::new(),
            );
            return Ok((jar, Html(body)).into_response());
        }
    }

    let jar = session::add_flash(jar, "success", "Profile edited!");
    Ok((jar, Redirect::to("/profile")).into_response())
}
