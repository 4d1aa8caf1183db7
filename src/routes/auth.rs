use axum::{
    Form, Router,
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use axum_extra::extract::cookie::CookieJar;

use crate::{
    error::AppResult,
    forms::{
        CsrfForm,
        auth::{LoginForm, SignupForm},
    },
    middleware::auth::{AuthSession, MaybeSession, ensure_csrf},
    render::{self, PageContext},
    services::auth_service::{self, Registration},
    session,
    state::AppState,
    validators::FormErrors,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", get(signup_form).post(signup))
        .route("/login", get(login_form).post(login))
        .route("/logout", post(logout))
}

pub async fn signup_form(jar: CookieJar) -> (CookieJar, Html<String>) {
    // Visiting the signup page ends any existing session.
    let jar = session::remove_session(jar);
    let (jar, flash) = session::take_flash(jar);
    let ctx = PageContext::anonymous(flash.as_ref());
    let body = render::signup_page(&ctx, &SignupForm::default(), &FormErrors::new());
    (jar, Html(body))
}

pub async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<SignupForm>,
) -> AppResult<Response> {
    let jar = session::remove_session(jar);
    let (jar, _) = session::take_flash(jar);

    let errors = form.validate();
    if !errors.is_empty() {
        let ctx = PageContext::anonymous(None);
        let body = render::signup_page(&ctx, &form, &errors);
        return Ok((jar, Html(body)).into_response());
    }

    let user = match auth_service::register_user(&state.pool, &form).await? {
        Registration::Created(user) => user,
        Registration::Taken => {
            let flash = session::Flash {
                category: "danger".to_string(),
                message: "Username or email already taken!".to_string(),
            };
            let ctx = PageContext::anonymous(Some(&flash));
            let body = render::signup_page(&ctx, &form, &FormErrors::new());
            return Ok((jar, Html(body)).into_response());
        }
    };

    let (token, _) = session::create_session(user.id)?;
    let jar = jar.add(session::session_cookie(token));
    let jar = session::add_flash(
        jar,
        "success",
        "Signed up successfully! You are now logged in.",
    );
    Ok((jar, Redirect::to("/cafes")).into_response())
}

pub async fn login_form(session: MaybeSession, jar: CookieJar) -> (CookieJar, Html<String>) {
    let (jar, flash) = session::take_flash(jar);
    let ctx = PageContext {
        user: session.0.as_ref().map(|s| &s.user),
        csrf_token: session.0.as_ref().map(|s| s.csrf_token.as_str()),
        flash: flash.as_ref(),
    };
    let body = render::login_page(&ctx, &LoginForm::default(), &FormErrors::new());
    (jar, Html(body))
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    let (jar, _) = session::take_flash(jar);

    let errors = form.validate();
    if !errors.is_empty() {
        let ctx = PageContext::anonymous(None);
        let body = render::login_page(&ctx, &form, &errors);
        return Ok((jar, Html(body)).into_response());
    }

    // Lookup and hash check together; the error message never says whether
    // the username exists.
    let Some(user) = auth_service::authenticate(&state.pool, &form.username, &form.password).await?
    else {
        let flash = session::Flash {
            category: "danger".to_string(),
            message: "Invalid credentials!".to_string(),
        };
        let ctx = PageContext::anonymous(Some(&flash));
        let body = render::login_page(&ctx, &form, &FormErrors::new());
        return Ok((jar, Html(body)).into_response());
    };

    let (token, _) = session::create_session(user.id)?;
    let jar = jar.add(session::session_cookie(token));
    let jar = session::add_flash(jar, "success", &format!("Hello, {}!", user.username));
    Ok((jar, Redirect::to("/cafes")).into_response())
}

pub async fn logout(
    session: AuthSession,
    jar: CookieJar,
    Form(form): Form<CsrfForm>,
) -> AppResult<Response> {
    ensure_csrf(&session, &form.csrf_token)?;

    let jar = session::remove_session(jar);
    let jar = session::add_flash(jar, "success", "Successfully logged out!");
    Ok((jar, Redirect::to("/login")).into_response())
}
