use api::{Credentials, ErrorKind, NotesApi};
use axum::http::StatusCode;
use ui::{routes, LoginView, Page};

use super::forms::{LoginForm, LoginIntent, UNREADABLE_FORM};
use super::{Outcome, SessionChange};
use crate::gate::{resolve_identity, Gate};
use crate::session::Session;

pub const AUTH_FAILED: &str = "Authentication failed.";
pub const SERVICE_UNREACHABLE: &str =
    "The notes service is currently unreachable. Please try again shortly.";

/// `GET /`
pub async fn landing<A>(api: &A, session: &Session) -> Outcome
where
    A: NotesApi + ?Sized,
{
    match resolve_identity(api, session).await {
        Gate::Authenticated(_) => Outcome::redirect(routes::NOTES),
        _ => Outcome::page(Page::Landing),
    }
}

/// `GET /login`
pub async fn login_page<A>(api: &A, session: &Session) -> Outcome
where
    A: NotesApi + ?Sized,
{
    let gate = resolve_identity(api, session).await;
    if let Gate::Authenticated(_) = gate {
        return Outcome::redirect(routes::NOTES);
    }

    let notice = gate
        .is_unreachable()
        .then(|| SERVICE_UNREACHABLE.to_string());
    Outcome::page(Page::Login(LoginView {
        notice,
        ..LoginView::default()
    }))
}

/// `POST /login`: sign in or register, depending on the button pressed.
/// `None` is a body that could not be decoded.
pub async fn login_submit<A>(api: &A, form: Option<LoginForm>) -> Outcome
where
    A: NotesApi + ?Sized,
{
    let Some(form) = form else {
        return login_failed("", UNREADABLE_FORM.to_string(), false);
    };

    let credentials = match Credentials::new(&form.email, &form.password) {
        Ok(credentials) => credentials,
        Err(err) => return login_failed(form.email.trim(), err.user_message(AUTH_FAILED), false),
    };

    let intent = form.intent();
    let result = match intent {
        LoginIntent::Login => api.login(&credentials).await,
        LoginIntent::Register => api.register(&credentials).await,
    };

    match result {
        Ok(auth) => {
            tracing::info!(user = %auth.user.id, ?intent, "signed in");
            Outcome::Redirect {
                to: routes::NOTES.to_string(),
                session: SessionChange::Start(auth.token),
            }
        }
        Err(err) => {
            tracing::debug!(error = %err, ?intent, "sign-in refused");
            let unreachable = err.kind() == ErrorKind::Transport;
            login_failed(credentials.email(), err.user_message(AUTH_FAILED), unreachable)
        }
    }
}

fn login_failed(email: &str, error: String, unreachable: bool) -> Outcome {
    Outcome::page_with_status(
        StatusCode::BAD_REQUEST,
        Page::Login(LoginView {
            email: email.to_string(),
            error: Some(error),
            notice: unreachable.then(|| SERVICE_UNREACHABLE.to_string()),
        }),
    )
}

/// `POST /logout`. Always succeeds, with or without a session.
pub fn logout(session: &Session) -> Outcome {
    if session.token().is_some() {
        tracing::info!("signed out");
    }
    Outcome::Redirect {
        to: routes::LOGIN.to_string(),
        session: SessionChange::End,
    }
}
