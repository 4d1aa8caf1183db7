//! Server-rendered pages.
//!
//! Templating stays deliberately small: a shared layout plus one function per
//! page, all building plain HTML strings. Interpolated values are escaped.

use crate::forms::auth::{LoginForm, SignupForm};
use crate::forms::city::CityForm;
use crate::forms::profile::ProfileEditForm;
use crate::forms::venue::VenueForm;
use crate::models::{City, User, Venue, VenueKind, VenueWithCity};
use crate::session::Flash;
use crate::validators::FormErrors;

pub struct PageContext<'a> {
    pub user: Option<&'a User>,
    pub csrf_token: Option<&'a str>,
    pub flash: Option<&'a Flash>,
}

impl<'a> PageContext<'a> {
    pub fn anonymous(flash: Option<&'a Flash>) -> Self {
        Self {
            user: None,
            csrf_token: None,
            flash,
        }
    }
}

pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn nav(ctx: &PageContext) -> String {
    let mut links = String::from(r#"<a class="brand" href="/">Cafe Directory</a>"#);
    match ctx.user {
        Some(user) => {
            links.push_str(r#" <a href="/cafes">Cafes</a>"#);
            links.push_str(r#" <a href="/restaurants">Restaurants</a>"#);
            links.push_str(r#" <a href="/cities">Cities</a>"#);
            links.push_str(&format!(
                r#" <a href="/profile">{}</a>"#,
                escape(&user.full_name())
            ));
            let csrf = ctx.csrf_token.unwrap_or_default();
            links.push_str(&format!(
                concat!(
                    r#" <form class="inline" method="POST" action="/logout">"#,
                    r#"<input type="hidden" name="csrf_token" value="{}">"#,
                    r#"<button type="submit">Log Out</button></form>"#
                ),
                escape(csrf)
            ));
        }
        None => {
            links.push_str(r#" <a href="/signup">Sign Up</a>"#);
            links.push_str(r#" <a href="/login">Log In</a>"#);
        }
    }
    format!("<nav>{links}</nav>")
}

pub fn layout(title: &str, ctx: &PageContext, body: &str) -> String {
    let flash = match ctx.flash {
        Some(flash) => format!(
            r#"<div class="flash flash-{}">{}</div>"#,
            escape(&flash.category),
            escape(&flash.message)
        ),
        None => String::new(),
    };
    format!(
        concat!(
            "<!doctype html>\n<html>\n<head>\n",
            r#"<meta charset="utf-8">"#,
            "\n<title>{title} - Cafe Directory</title>\n",
            r#"<link rel="stylesheet" href="/static/style.css">"#,
            "\n</head>\n<body>\n{nav}\n{flash}\n<main>\n{body}\n</main>\n</body>\n</html>\n"
        ),
        title = escape(title),
        nav = nav(ctx),
        flash = flash,
        body = body,
    )
}

fn error_list(errors: &FormErrors, field: &str) -> String {
    let messages = errors.for_field(field);
    if messages.is_empty() {
        return String::new();
    }
    let items: String = messages
        .iter()
        .map(|m| format!("<li>{}</li>", escape(m)))
        .collect();
    format!(r#"<ul class="errors">{items}</ul>"#)
}

fn input_field(
    label: &str,
    name: &str,
    kind: &str,
    value: &str,
    errors: &FormErrors,
) -> String {
    format!(
        concat!(
            r#"<p><label for="{name}">{label}</label>"#,
            r#"<input type="{kind}" id="{name}" name="{name}" value="{value}">{errors}</p>"#
        ),
        label = escape(label),
        name = name,
        kind = kind,
        value = escape(value),
        errors = error_list(errors, name),
    )
}

fn textarea_field(label: &str, name: &str, value: &str, errors: &FormErrors) -> String {
    format!(
        concat!(
            r#"<p><label for="{name}">{label}</label>"#,
            r#"<textarea id="{name}" name="{name}">{value}</textarea>{errors}</p>"#
        ),
        label = escape(label),
        name = name,
        value = escape(value),
        errors = error_list(errors, name),
    )
}

fn city_select(cities: &[City], selected: &str, errors: &FormErrors) -> String {
    let options: String = cities
        .iter()
        .map(|city| {
            let marker = if city.code == selected { " selected" } else { "" };
            format!(
                r#"<option value="{}"{}>{}</option>"#,
                escape(&city.code),
                marker,
                escape(&city.name)
            )
        })
        .collect();
    format!(
        concat!(
            r#"<p><label for="city_code">City</label>"#,
            r#"<select id="city_code" name="city_code">{options}</select>{errors}</p>"#
        ),
        options = options,
        errors = error_list(errors, "city_code"),
    )
}

pub fn home_page(ctx: &PageContext) -> String {
    layout(
        "Home",
        ctx,
        concat!(
            "<h1>Cafe Directory</h1>\n",
            "<p>A Way to Keep Track of Your Favorite Restaurants and Cafes</p>"
        ),
    )
}

pub fn signup_page(ctx: &PageContext, form: &SignupForm, errors: &FormErrors) -> String {
    let body = format!(
        concat!(
            "<h1>Sign Up</h1>\n",
            r#"<form method="POST" action="/signup">"#,
            "{username}{first_name}{last_name}{description}{email}{password}{image_url}",
            r#"<button type="submit">Sign Up</button></form>"#
        ),
        username = input_field("Username", "username", "text", &form.username, errors),
        first_name = input_field("First Name", "first_name", "text", &form.first_name, errors),
        last_name = input_field("Last Name", "last_name", "text", &form.last_name, errors),
        description = textarea_field(
            "Description (Optional)",
            "description",
            &form.description,
            errors
        ),
        email = input_field("Email", "email", "text", &form.email, errors),
        password = input_field("Password", "password", "password", "", errors),
        image_url = input_field(
            "Image URL (Optional)",
            "image_url",
            "text",
            &form.image_url,
            errors
        ),
    );
    layout("Sign Up", ctx, &body)
}

pub fn login_page(ctx: &PageContext, form: &LoginForm, errors: &FormErrors) -> String {
    let body = format!(
        concat!(
            "<h1>Welcome Back!</h1>\n",
            r#"<form method="POST" action="/login">"#,
            "{username}{password}",
            r#"<button type="submit">Log In</button></form>"#
        ),
        username = input_field("Username", "username", "text", &form.username, errors),
        password = input_field("Password", "password", "password", "", errors),
    );
    layout("Log In", ctx, &body)
}

pub fn venue_list_page(ctx: &PageContext, kind: VenueKind, venues: &[Venue]) -> String {
    let rows: String = venues
        .iter()
        .map(|venue| {
            format!(
                r#"<li><a href="/{prefix}/{id}">{name}</a> &mdash; {address}</li>"#,
                prefix = kind.plural(),
                id = venue.id,
                name = escape(&venue.name),
                address = escape(&venue.address),
            )
        })
        .collect();
    let add_link = match ctx.user {
        Some(user) if user.admin => format!(
            r#"<p><a href="/{}/add">Add {}</a></p>"#,
            kind.plural(),
            kind.label()
        ),
        _ => String::new(),
    };
    let body = format!(
        "<h1>{title}</h1>\n<ul>{rows}</ul>\n{add_link}",
        title = match kind {
            VenueKind::Cafe => "Cafes",
            VenueKind::Restaurant => "Restaurants",
        },
        rows = rows,
        add_link = add_link,
    );
    layout(kind.label(), ctx, &body)
}

pub fn venue_detail_page(
    ctx: &PageContext,
    kind: VenueKind,
    detail: &VenueWithCity,
    liked: bool,
) -> String {
    let venue = &detail.venue;
    let liked_marker = if liked {
        r#"<p class="liked">You like this place.</p>"#
    } else {
        ""
    };
    let admin_controls = match ctx.user {
        Some(user) if user.admin => format!(
            concat!(
                r#"<p><a href="/{prefix}/{id}/edit">Edit</a></p>"#,
                r#"<form class="inline" method="POST" action="/{prefix}/{id}/delete">"#,
                r#"<input type="hidden" name="csrf_token" value="{csrf}">"#,
                r#"<button type="submit">Delete</button></form>"#
            ),
            prefix = kind.plural(),
            id = venue.id,
            csrf = escape(ctx.csrf_token.unwrap_or_default()),
        ),
        _ => String::new(),
    };
    let body = format!(
        concat!(
            "<h1>{name}</h1>\n",
            r#"<img class="venue" src="{image}" alt="{name}">"#,
            "\n<p>{description}</p>\n",
            r#"<p><a href="{url}">{url}</a></p>"#,
            "\n<p>{address}</p>\n<p>{city_state}</p>\n",
            r#"<img class="map" src="/static/maps/{prefix}/{id}.jpg" alt="Map">"#,
            "\n{liked}\n{admin}"
        ),
        name = escape(&venue.name),
        image = escape(&venue.image_url),
        description = escape(&venue.description),
        url = escape(&venue.url),
        address = escape(&venue.address),
        city_state = escape(&detail.city_state()),
        prefix = kind.plural(),
        id = venue.id,
        liked = liked_marker,
        admin = admin_controls,
    );
    layout(&venue.name, ctx, &body)
}

pub fn venue_form_page(
    ctx: &PageContext,
    title: &str,
    action: &str,
    form: &VenueForm,
    cities: &[City],
    errors: &FormErrors,
) -> String {
    let body = format!(
        concat!(
            "<h1>{title}</h1>\n",
            r#"<form method="POST" action="{action}">"#,
            "{name}{description}{url}{address}{city}{image_url}",
            r#"<button type="submit">Save</button></form>"#
        ),
        title = escape(title),
        action = escape(action),
        name = input_field("Name", "name", "text", &form.name, errors),
        description = textarea_field(
            "Description (Optional)",
            "description",
            &form.description,
            errors
        ),
        url = input_field("URL", "url", "text", &form.url, errors),
        address = input_field("Address", "address", "text", &form.address, errors),
        city = city_select(cities, &form.city_code, errors),
        image_url = input_field("Image URL", "image_url", "text", &form.image_url, errors),
    );
    layout(title, ctx, &body)
}

pub fn city_list_page(ctx: &PageContext, cities: &[City]) -> String {
    let rows: String = cities
        .iter()
        .map(|city| {
            format!(
                "<li>{} ({}, {})</li>",
                escape(&city.name),
                escape(&city.code),
                escape(&city.state)
            )
        })
        .collect();
    let add_link = match ctx.user {
        Some(user) if user.admin => r#"<p><a href="/cities/add">Add City</a></p>"#,
        _ => "",
    };
    let body = format!("<h1>Cities</h1>\n<ul>{rows}</ul>\n{add_link}");
    layout("Cities", ctx, &body)
}

pub fn city_form_page(ctx: &PageContext, form: &CityForm, errors: &FormErrors) -> String {
    let body = format!(
        concat!(
            "<h1>Add City</h1>\n",
            r#"<form method="POST" action="/cities/add">"#,
            "{code}{name}{state}",
            r#"<button type="submit">Save</button></form>"#
        ),
        code = input_field("Code", "code", "text", &form.code, errors),
        name = input_field("Name", "name", "text", &form.name, errors),
        state = input_field("State", "state", "text", &form.state, errors),
    );
    layout("Add City", ctx, &body)
}

fn liked_section(kind: VenueKind, venues: &[Venue]) -> String {
    let heading = format!("Your Liked {}s", kind.label());
    if venues.is_empty() {
        return format!(
            "<h2>{heading}</h2>\n<p>You have no liked {}.</p>",
            kind.plural()
        );
    }
    let rows: String = venues
        .iter()
        .map(|venue| {
            format!(
                r#"<li><a href="/{}/{}">{}</a></li>"#,
                kind.plural(),
                venue.id,
                escape(&venue.name)
            )
        })
        .collect();
    format!("<h2>{heading}</h2>\n<ul>{rows}</ul>")
}

pub fn profile_page(
    ctx: &PageContext,
    liked_cafes: &[Venue],
    liked_restaurants: &[Venue],
) -> String {
    let Some(user) = ctx.user else {
        return unauthorized_page();
    };
    let body = format!(
        concat!(
            "<h1>{full_name}</h1>\n",
            r#"<img class="profile" src="{image}" alt="{full_name}">"#,
            "\n<p>Username: {username}</p>\n<p>Email: {email}</p>\n<p>{description}</p>\n",
            r#"<p><a href="/profile/edit">Edit Your Profile</a></p>"#,
            "\n{cafes}\n{restaurants}"
        ),
        full_name = escape(&user.full_name()),
        image = escape(&user.image_url),
        username = escape(&user.username),
        email = escape(&user.email),
        description = escape(&user.description),
        cafes = liked_section(VenueKind::Cafe, liked_cafes),
        restaurants = liked_section(VenueKind::Restaurant, liked_restaurants),
    );
    layout("Profile", ctx, &body)
}

pub fn profile_edit_page(ctx: &PageContext, form: &ProfileEditForm, errors: &FormErrors) -> String {
    let body = format!(
        concat!(
            "<h1>Edit Your Profile</h1>\n",
            r#"<form method="POST" action="/profile/edit">"#,
            "{first_name}{last_name}{description}{email}{image_url}",
            r#"<button type="submit">Save</button></form>"#
        ),
        first_name = input_field("First Name", "first_name", "text", &form.first_name, errors),
        last_name = input_field("Last Name", "last_name", "text", &form.last_name, errors),
        description = textarea_field("Description", "description", &form.description, errors),
        email = input_field("Email", "email", "text", &form.email, errors),
        image_url = input_field("Image URL", "image_url", "text", &form.image_url, errors),
    );
    layout("Edit Profile", ctx, &body)
}

pub fn unauthorized_page() -> String {
    let ctx = PageContext::anonymous(None);
    layout(
        "Unauthorized",
        &ctx,
        "<h1>401 UNAUTHORIZED</h1>\n<p>You are not allowed to do that.</p>",
    )
}

pub fn not_found_page() -> String {
    let ctx = PageContext::anonymous(None);
    layout(
        "Not Found",
        &ctx,
        "<h1>404 NOT FOUND</h1>\n<p>That page does not exist.</p>",
    )
}
