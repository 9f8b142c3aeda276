use api::{Note, NoteInput, NotePatch, NoteQuery, NotesApi};
use axum::http::StatusCode;
use ui::{routes, ErrorView, NewNoteView, NoteDetailView, NoteDraft, NoteListView, Page};

use super::forms::{normalize_title, NoteForm, NoteIntent, UNREADABLE_FORM};
use super::{error_status, Outcome};
use crate::gate::{resolve_identity, Identity};
use crate::session::Session;

pub const LOAD_NOTES_FAILED: &str = "Failed to load notes.";
pub const LOAD_NOTE_FAILED: &str = "Failed to load note.";
pub const CREATE_FAILED: &str = "Failed to create note.";
pub const SAVE_FAILED: &str = "Failed to save note.";
pub const DELETE_FAILED: &str = "Failed to delete note.";

async fn authenticate<A>(api: &A, session: &Session) -> Option<Identity>
where
    A: NotesApi + ?Sized,
{
    resolve_identity(api, session).await.identity()
}

/// `GET /notes?q=&tag=`
pub async fn list<A>(api: &A, session: &Session, filter: NoteQuery) -> Outcome
where
    A: NotesApi + ?Sized,
{
    let Some(identity) = authenticate(api, session).await else {
        return Outcome::login_required();
    };
    Outcome::page(Page::NoteList(load_list(api, identity, filter, None).await))
}

async fn load_list<A>(
    api: &A,
    identity: Identity,
    filter: NoteQuery,
    error: Option<String>,
) -> NoteListView
where
    A: NotesApi + ?Sized,
{
    let (notes, load_error) = match api.list_notes(&identity.token, &filter).await {
        Ok(notes) => (notes, None),
        Err(err) => {
            tracing::warn!(error = %err, "failed to list notes");
            (Vec::new(), Some(err.user_message(LOAD_NOTES_FAILED)))
        }
    };

    NoteListView {
        user: identity.user,
        notes,
        filter,
        error: error.or(load_error),
    }
}

/// `POST /notes`: create a note from just a title and go back to the list.
///
/// Like every form handler here, `form` is `None` when the body could not be
/// decoded. The session is checked before that is reported.
pub async fn quick_create<A>(api: &A, session: &Session, form: Option<NoteForm>) -> Outcome
where
    A: NotesApi + ?Sized,
{
    let Some(identity) = authenticate(api, session).await else {
        return Outcome::login_required();
    };
    let Some(form) = form else {
        let message = UNREADABLE_FORM.to_string();
        let view = load_list(api, identity, NoteQuery::default(), Some(message)).await;
        return Outcome::page_with_status(StatusCode::BAD_REQUEST, Page::NoteList(view));
    };

    let input = NoteInput {
        title: normalize_title(&form.title),
        content: String::new(),
        tags: Vec::new(),
    };
    match api.create_note(&identity.token, &input).await {
        Ok(note) => {
            tracing::debug!(note = %note.id, "quick-created note");
            Outcome::redirect(routes::NOTES)
        }
        Err(err) => {
            tracing::warn!(error = %err, "quick create failed");
            let message = err.user_message(CREATE_FAILED);
            let view = load_list(api, identity, NoteQuery::default(), Some(message)).await;
            Outcome::page_with_status(StatusCode::BAD_REQUEST, Page::NoteList(view))
        }
    }
}

/// `GET /notes/new`
pub async fn new_form<A>(api: &A, session: &Session) -> Outcome
where
    A: NotesApi + ?Sized,
{
    let Some(identity) = authenticate(api, session).await else {
        return Outcome::login_required();
    };
    Outcome::page(Page::NewNote(NewNoteView {
        user: identity.user,
        draft: NoteDraft::default(),
        error: None,
    }))
}

/// `POST /notes/new`
pub async fn create<A>(api: &A, session: &Session, form: Option<NoteForm>) -> Outcome
where
    A: NotesApi + ?Sized,
{
    let Some(identity) = authenticate(api, session).await else {
        return Outcome::login_required();
    };
    let Some(form) = form else {
        return Outcome::page_with_status(
            StatusCode::BAD_REQUEST,
            Page::NewNote(NewNoteView {
                user: identity.user,
                draft: NoteDraft::default(),
                error: Some(UNREADABLE_FORM.to_string()),
            }),
        );
    };

    match api.create_note(&identity.token, &form.to_input()).await {
        Ok(note) => {
            tracing::debug!(note = %note.id, "created note");
            Outcome::redirect(routes::note(&note.id, &NoteQuery::default()))
        }
        Err(err) => {
            tracing::warn!(error = %err, "failed to create note");
            Outcome::page_with_status(
                StatusCode::BAD_REQUEST,
                Page::NewNote(NewNoteView {
                    user: identity.user,
                    draft: form.draft(),
                    error: Some(err.user_message(CREATE_FAILED)),
                }),
            )
        }
    }
}

/// `GET /notes/{id}`
pub async fn detail<A>(api: &A, session: &Session, id: &str, filter: NoteQuery) -> Outcome
where
    A: NotesApi + ?Sized,
{
    let Some(identity) = authenticate(api, session).await else {
        return Outcome::login_required();
    };
    show_note(api, identity, id, filter, None).await
}

/// The editor for the stored note, with `error` shown above the form.
async fn show_note<A>(
    api: &A,
    identity: Identity,
    id: &str,
    filter: NoteQuery,
    error: Option<String>,
) -> Outcome
where
    A: NotesApi + ?Sized,
{
    match api.get_note(&identity.token, id).await {
        Ok(note) => {
            let status = match error {
                Some(_) => StatusCode::BAD_REQUEST,
                None => StatusCode::OK,
            };
            let view = NoteDetailView {
                error,
                ..NoteDetailView::new(identity.user, &note, filter)
            };
            Outcome::page_with_status(status, Page::NoteDetail(view))
        }
        Err(err) => {
            tracing::warn!(error = %err, note = id, "failed to load note");
            Outcome::page_with_status(
                error_status(&err),
                Page::Error(ErrorView {
                    user: Some(identity.user),
                    title: "Note unavailable".to_string(),
                    message: err.user_message(LOAD_NOTE_FAILED),
                }),
            )
        }
    }
}

/// `POST /notes/{id}`: save or delete, depending on the button pressed.
pub async fn update_or_delete<A>(
    api: &A,
    session: &Session,
    id: &str,
    filter: NoteQuery,
    form: Option<NoteForm>,
) -> Outcome
where
    A: NotesApi + ?Sized,
{
    let Some(identity) = authenticate(api, session).await else {
        return Outcome::login_required();
    };
    let Some(form) = form else {
        return show_note(api, identity, id, filter, Some(UNREADABLE_FORM.to_string())).await;
    };

    match form.intent() {
        NoteIntent::Delete => match api.delete_note(&identity.token, id).await {
            Ok(()) => {
                tracing::debug!(note = id, "deleted note");
                Outcome::redirect(routes::NOTES)
            }
            Err(err) => {
                tracing::warn!(error = %err, note = id, "failed to delete note");
                edit_failed(identity, id, filter, &form, err.user_message(DELETE_FAILED))
            }
        },
        NoteIntent::Save => {
            let patch = NotePatch::from(form.to_input());
            match api.update_note(&identity.token, id, &patch).await {
                Ok(note) => Outcome::page(Page::NoteDetail(saved(identity, &note, filter))),
                Err(err) => {
                    tracing::warn!(error = %err, note = id, "failed to save note");
                    edit_failed(identity, id, filter, &form, err.user_message(SAVE_FAILED))
                }
            }
        }
    }
}

fn saved(identity: Identity, note: &Note, filter: NoteQuery) -> NoteDetailView {
    NoteDetailView {
        saved: true,
        ..NoteDetailView::new(identity.user, note, filter)
    }
}

fn edit_failed(
    identity: Identity,
    id: &str,
    filter: NoteQuery,
    form: &NoteForm,
    message: String,
) -> Outcome {
    Outcome::page_with_status(
        StatusCode::BAD_REQUEST,
        Page::NoteDetail(NoteDetailView {
            user: identity.user,
            id: id.to_string(),
            heading: normalize_title(&form.title),
            draft: form.draft(),
            filter,
            error: Some(message),
            saved: false,
        }),
    )
}
