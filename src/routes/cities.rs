use axum::{
    Form, Router,
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use axum_extra::extract::cookie::CookieJar;

use crate::{
    error::AppResult,
    forms::city::CityForm,
    middleware::auth::{AuthSession, ensure_admin},
    render::{self, PageContext},
    services::city_service::{self, CityInsert},
    session,
    state::AppState,
    validators::FormErrors,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/cities", get(list))
        .route("/cities/add", get(add_form).post(add))
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
    session: AuthSession,
    jar: CookieJar,
) -> AppResult<(CookieJar, Html<String>)> {
    let cities = city_service::list(&state.pool).await?;
    let (jar, flash) = session::take_flash(jar);
    let body = render::city_list_page(&page_ctx(&session, flash.as_ref()), &cities);
    Ok((jar, Html(body)))
}

pub async fn add_form(
    session: AuthSession,
    jar: CookieJar,
) -> AppResult<(CookieJar, Html<String>)> {
    ensure_admin(&session.user)?;
    let (jar, flash) = session::take_flash(jar);
    let body = render::city_form_page(
        &page_ctx(&session, flash.as_ref()),
        &CityForm::default(),
        &FormErrors::new(),
    );
    Ok((jar, Html(body)))
}

pub async fn add(
    State(state): State<AppState>,
    session: AuthSession,
    jar: CookieJar,
    Form(form): Form<CityForm>,
) -> AppResult<Response> {
    ensure_admin(&session.user)?;

    let errors = form.validate();
    if !errors.is_empty() {
        let (jar, flash) = session::take_flash(jar);
        let body = render::city_form_page(&page_ctx(&session, flash.as_ref()), &form, &errors);
        return Ok((jar, Html(body)).into_response());
    }

    let city = match city_service::create(&state.pool, &form).await? {
        CityInsert::Created(city) => city,
        CityInsert::CodeTaken => {
            let flash = session::Flash {
                category: "danger".to_string(),
                message: "City code already taken!".to_string(),
            };
            let body = render::city_form_page(
                &page_ctx(&session, Some(&flash)),
                &form,
                &FormErrors::new(),
            );
            return Ok((jar, Html(body)).into_response());
        }
    };

    let jar = session::add_flash(jar, "success", &format!("{} added!", city.name));
    Ok((jar, Redirect::to("/cities")).into_response())
}
