//! # HTTP server
//!
//! Wires the [`handlers`](crate::handlers) into an axum [`Router`] and turns
//! each [`Outcome`] into a response:
//!
//! - `Outcome::Page` becomes the rendered HTML document with its status.
//! - `Outcome::Redirect` becomes a `303 See Other`, with a `Set-Cookie`
//!   header when the session starts or ends.
//!
//! Form bodies and query strings that fail to decode never short-circuit the
//! request: the handler still checks the session first, then reports the
//! bad body inline or falls back to an empty filter.
//!
//! Every request gets a `tower-http` trace span and is cut off after the
//! configured request timeout (`408`), which also cancels any call to the
//! notes service still in flight.

use std::sync::Arc;
use std::time::Duration;

use api::{ApiClient, ApiError, NoteQuery, NotesApi};
use axum::extract::rejection::{FormRejection, QueryRejection};
use axum::extract::{FromRef, Path, Query, State};
use axum::http::header::SET_COOKIE;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use tokio::net::TcpListener;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{self, LoginForm, NoteForm, Outcome, SessionChange};
use crate::session::{Session, SessionError, SessionStore};
use crate::settings::Settings;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("invalid session configuration: {0}")]
    Session(#[from] SessionError),

    #[error("failed to create notes API client: {0}")]
    Client(#[from] ApiError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Shared, read-only request context.
#[derive(Clone)]
pub struct AppState {
    pub api: Arc<dyn NotesApi>,
    pub sessions: SessionStore,
}

impl FromRef<AppState> for SessionStore {
    fn from_ref(state: &AppState) -> Self {
        state.sessions.clone()
    }
}

impl AppState {
    pub fn new(api: Arc<dyn NotesApi>, sessions: SessionStore) -> Self {
        Self { api, sessions }
    }

    fn respond(&self, outcome: Outcome) -> Response {
        match outcome {
            Outcome::Page { status, page } => (status, Html(ui::render_page(&page))).into_response(),
            Outcome::Redirect { to, session } => {
                let redirect = Redirect::to(&to);
                let cookie = match session {
                    SessionChange::Keep => return redirect.into_response(),
                    SessionChange::Start(token) => {
                        self.sessions.write(&token, self.sessions.max_age())
                    }
                    SessionChange::End => self.sessions.clear(),
                };
                match cookie {
                    Ok(cookie) => ([(SET_COOKIE, cookie)], redirect).into_response(),
                    Err(err) => {
                        tracing::error!(error = %err, "failed to build session cookie");
                        StatusCode::INTERNAL_SERVER_ERROR.into_response()
                    }
                }
            }
        }
    }
}

pub fn router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/", get(landing))
        .route("/login", get(login_page).post(login_submit))
        .route("/logout", post(logout))
        .route("/notes", get(list_notes).post(quick_create))
        .route("/notes/new", get(new_note).post(create_note))
        .route("/notes/{id}", get(note_detail).post(update_note))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn submitted<T>(form: Result<Form<T>, FormRejection>) -> Option<T> {
    match form {
        Ok(Form(form)) => Some(form),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "unreadable form body");
            None
        }
    }
}

fn filter(query: Result<Query<NoteQuery>, QueryRejection>) -> NoteQuery {
    match query {
        Ok(Query(filter)) => filter,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "ignoring unreadable note filter");
            NoteQuery::default()
        }
    }
}

async fn landing(State(state): State<AppState>, session: Session) -> Response {
    let outcome = handlers::auth::landing(state.api.as_ref(), &session).await;
    state.respond(outcome)
}

async fn login_page(State(state): State<AppState>, session: Session) -> Response {
    let outcome = handlers::auth::login_page(state.api.as_ref(), &session).await;
    state.respond(outcome)
}

async fn login_submit(
    State(state): State<AppState>,
    form: Result<Form<LoginForm>, FormRejection>,
) -> Response {
    let outcome = handlers::auth::login_submit(state.api.as_ref(), submitted(form)).await;
    state.respond(outcome)
}

async fn logout(State(state): State<AppState>, session: Session) -> Response {
    state.respond(handlers::auth::logout(&session))
}

async fn list_notes(
    State(state): State<AppState>,
    session: Session,
    query: Result<Query<NoteQuery>, QueryRejection>,
) -> Response {
    let outcome = handlers::notes::list(state.api.as_ref(), &session, filter(query)).await;
    state.respond(outcome)
}

async fn quick_create(
    State(state): State<AppState>,
    session: Session,
    form: Result<Form<NoteForm>, FormRejection>,
) -> Response {
    let outcome =
        handlers::notes::quick_create(state.api.as_ref(), &session, submitted(form)).await;
    state.respond(outcome)
}

async fn new_note(State(state): State<AppState>, session: Session) -> Response {
    let outcome = handlers::notes::new_form(state.api.as_ref(), &session).await;
    state.respond(outcome)
}

async fn create_note(
    State(state): State<AppState>,
    session: Session,
    form: Result<Form<NoteForm>, FormRejection>,
) -> Response {
    let outcome = handlers::notes::create(state.api.as_ref(), &session, submitted(form)).await;
    state.respond(outcome)
}

async fn note_detail(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
    query: Result<Query<NoteQuery>, QueryRejection>,
) -> Response {
    let outcome = handlers::notes::detail(state.api.as_ref(), &session, &id, filter(query)).await;
    state.respond(outcome)
}

async fn update_note(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
    query: Result<Query<NoteQuery>, QueryRejection>,
    form: Result<Form<NoteForm>, FormRejection>,
) -> Response {
    let outcome = handlers::notes::update_or_delete(
        state.api.as_ref(),
        &session,
        &id,
        filter(query),
        submitted(form),
    )
    .await;
    state.respond(outcome)
}

/// Bind, serve until Ctrl+C or SIGTERM, then drain in-flight requests.
pub async fn launch(settings: Settings) -> Result<(), ServerError> {
    let sessions = SessionStore::from_settings(&settings.session)?;

    let listener = TcpListener::bind(&settings.server.address)
        .await
        .map_err(|source| ServerError::Bind {
            address: settings.server.address.clone(),
            source,
        })?;
    let local_addr = listener.local_addr().map_err(ServerError::Serve)?;

    let base_url = settings.api.resolve_base_url(local_addr);
    let client = ApiClient::new(base_url.clone(), settings.api.timeout())?;
    tracing::info!(%local_addr, api = %base_url, "notes web server listening");

    let state = AppState::new(Arc::new(client), sessions);
    axum::serve(listener, router(state, settings.server.request_timeout()))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => tracing::info!("received Ctrl+C, shutting down"),
            Err(err) => {
                tracing::error!(error = %err, "failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                tracing::info!("received terminate signal, shutting down");
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
