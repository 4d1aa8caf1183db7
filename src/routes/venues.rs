use axum::{
    Extension, Form, Router,
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use axum_extra::extract::cookie::CookieJar;

use crate::{
    error::AppResult,
    forms::{CsrfForm, venue::VenueForm},
    maps,
    middleware::auth::{AuthSession, ensure_admin, ensure_csrf},
    models::{City, VenueKind},
    render::{self, PageContext},
    services::{city_service, like_service, venue_service},
    session,
    state::AppState,
    validators::FormErrors,
};

/// One router serves both cafes and restaurants; the kind is injected as an
/// extension when the router is nested under its URL prefix.
pub fn router(kind: VenueKind) -> Router<AppState> {
    Router::new()
        .route("/", get(list))
        .route("/add", get(add_form).post(add))
        .route("/{id}", get(detail))
        .route("/{id}/edit", get(edit_form).post(edit))
        .route("/{id}/delete", post(delete))
        .layer(Extension(kind))
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

pub async fn list(
    State(state): State<AppState>,
    Extension(kind): Extension<VenueKind>,
    session: AuthSession,
    jar: CookieJar,
) -> AppResult<(CookieJar, Html<String>)> {
    let venues = venue_service::list(&state.pool, kind).await?;
    let (jar, flash) = session::take_flash(jar);
    let body = render::venue_list_page(&page_ctx(&session, flash.as_ref()), kind, &venues);
    Ok((jar, Html(body)))
}

pub async fn detail(
    State(state): State<AppState>,
    Extension(kind): Extension<VenueKind>,
    session: AuthSession,
    jar: CookieJar,
    Path(id): Path<i32>,
) -> AppResult<(CookieJar, Html<String>)> {
    let venue = venue_service::get_with_city(&state.pool, kind, id).await?;
    let liked = like_service::likes(&state.pool, kind, session.user.id, id).await?;
    let (jar, flash) = session::take_flash(jar);
    let body = render::venue_detail_page(&page_ctx(&session, flash.as_ref()), kind, &venue, liked);
    Ok((jar, Html(body)))
}

fn form_page(
    session: &AuthSession,
    flash: Option<&session::Flash>,
    kind: VenueKind,
    id: Option<i32>,
    form: &VenueForm,
    cities: &[City],
    errors: &FormErrors,
) -> String {
    let (title, action) = match id {
        Some(id) => (
            format!("Edit {}", kind.label()),
            format!("/{}/{}/edit", kind.plural(), id),
        ),
        None => (
            format!("Add {}", kind.label()),
            format!("/{}/add", kind.plural()),
        ),
    };
    render::venue_form_page(
        &page_ctx(session, flash),
        &title,
        &action,
        form,
        cities,
        errors,
    )
}

pub async fn add_form(
    State(state): State<AppState>,
    Extension(kind): Extension<VenueKind>,
    session: AuthSession,
    jar: CookieJar,
) -> AppResult<(CookieJar, Html<String>)> {
    ensure_admin(&session.user)?;
    let cities = city_service::list(&state.pool).await?;
    let (jar, flash) = session::take_flash(jar);
    let body = form_page(
        &session,
        flash.as_ref(),
        kind,
        None,
        &VenueForm::default(),
        &cities,
        &FormErrors::new(),
    );
    Ok((jar, Html(body)))
}

pub async fn add(
    State(state): State<AppState>,
    Extension(kind): Extension<VenueKind>,
    session: AuthSession,
    jar: CookieJar,
    Form(form): Form<VenueForm>,
) -> AppResult<Response> {
    ensure_admin(&session.user)?;
    let cities = city_service::list(&state.pool).await?;
    let city_codes: Vec<String> = cities.iter().map(|c| c.code.clone()).collect();

    let errors = form.validate(&city_codes);
    if !errors.is_empty() {
        let (jar, flash) = session::take_flash(jar);
        let body = form_page(&session, flash.as_ref(), kind, None, &form, &cities, &errors);
        return Ok((jar, Html(body)).into_response());
    }

    let venue = venue_service::create(&state.pool, kind, &form).await?;

    // The row is committed at this point; a failed map fetch is logged inside
    // save_map and never rolls it back.
    let detail = venue_service::get_with_city(&state.pool, kind, venue.id).await?;
    maps::save_map(
        &state.config,
        kind,
        venue.id,
        &detail.venue.address,
        &detail.city_name,
        &detail.state,
    )
    .await;

    let jar = session::add_flash(jar, "success", &format!("{} added!", venue.name));
    let location = format!("/{}/{}", kind.plural(), venue.id);
    Ok((jar, Redirect::to(&location)).into_response())
}

pub async fn edit_form(
    State(state): State<AppState>,
    Extension(kind): Extension<VenueKind>,
    session: AuthSession,
    jar: CookieJar,
    Path(id): Path<i32>,
) -> AppResult<(CookieJar, Html<String>)> {
    ensure_admin(&session.user)?;
    let detail = venue_service::get_with_city(&state.pool, kind, id).await?;
    let cities = city_service::list(&state.pool).await?;
    let (jar, flash) = session::take_flash(jar);
    let body = form_page(
        &session,
        flash.as_ref(),
        kind,
        Some(id),
        &VenueForm::from_venue(&detail),
        &cities,
        &FormErrors::new(),
    );
    Ok((jar, Html(body)))
}

pub async fn edit(
    State(state): State<AppState>,
    Extension(kind): Extension<VenueKind>,
    session: AuthSession,
    jar: CookieJar,
    Path(id): Path<i32>,
    Form(form): Form<VenueForm>,
) -> AppResult<Response> {
    ensure_admin(&session.user)?;
    let cities = city_service::list(&state.pool).await?;
    let city_codes: Vec<String> = cities.iter().map(|c| c.code.clone()).collect();

    let errors = form.validate(&city_codes);
    if !errors.is_empty() {
        let (jar, flash) = session::take_flash(jar);
        let body = form_page(&session, flash.as_ref(), kind, Some(id), &form, &cities, &errors);
        return Ok((jar, Html(body)).into_response());
    }

    let venue = venue_service::update(&state.pool, kind, id, &form).await?;

    let detail = venue_service::get_with_city(&state.pool, kind, venue.id).await?;
    maps::save_map(
        &state.config,
        kind,
        venue.id,
        &detail.venue.address,
        &detail.city_name,
        &detail.state,
    )
    .await;

    let jar = session::add_flash(jar, "success", &format!("{} edited!", venue.name));
    let location = format!("/{}/{}", kind.plural(), venue.id);
    Ok((jar, Redirect::to(&location)).into_response())
}

pub async fn delete(
    State(state): State<AppState>,
    Extension(kind): Extension<VenueKind>,
    session: AuthSession,
    jar: CookieJar,
    Path(id): Path<i32>,
    Form(form): Form<CsrfForm>,
) -> AppResult<Response> {
    ensure_admin(&session.user)?;
    ensure_csrf(&session, &form.csrf_token)?;

    // 404 before touching the filesystem.
    venue_service::get_with_city(&state.pool, kind, id).await?;

    // Remove the map image first so no file can outlive its record pointer; a
    // crash between the two leaves a row without an image, which is harmless.
    maps::delete_map(&state.config, kind, id).await;
    let venue = venue_service::delete(&state.pool, kind, id).await?;

    let jar = session::add_flash(jar, "success", &format!("{} deleted!", venue.name));
    let location = format!("/{}", kind.plural());
    Ok((jar, Redirect::to(&location)).into_response())
}
