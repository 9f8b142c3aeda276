use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::error::ApiError;
use crate::models::{AuthResponse, AuthUser, Credentials, Note, NoteInput, NotePatch, NoteQuery};
use crate::NotesApi;

/// In-memory notes service for tests. Only built with the `memory` feature.
///
/// Behaves like the remote API: tokens are issued on login/registration,
/// notes are scoped to the token's owner, and failures come back as
/// [`ApiError::Rejected`] with the status the service would send. Marking it
/// unreachable turns every call into [`ApiError::Transport`].
#[derive(Clone, Debug, Default)]
pub struct MemoryApi {
    state: Arc<Mutex<State>>,
    unreachable: Arc<AtomicBool>,
    mutations: Arc<AtomicUsize>,
    write_failure: Arc<Mutex<Option<(u16, String)>>>,
}

#[derive(Debug, Default)]
struct State {
    next_id: u64,
    /// email -> (user, password)
    accounts: HashMap<String, (AuthUser, String)>,
    /// token -> user id
    tokens: HashMap<String, String>,
    /// note id -> (owner id, note), in creation order
    notes: Vec<(String, Note)>,
}

impl State {
    fn next_id(&mut self) -> String {
        self.next_id += 1;
        self.next_id.to_string()
    }

    fn issue_token(&mut self, user: &AuthUser) -> String {
        let token = format!("token-{}-{}", user.id, self.next_id());
        self.tokens.insert(token.clone(), user.id.clone());
        token
    }

    fn owner(&self, token: &str) -> Result<String, ApiError> {
        self.tokens
            .get(token)
            .cloned()
            .ok_or_else(|| rejected(401, "Invalid or expired token"))
    }

    fn note_mut(&mut self, owner: &str, id: &str) -> Result<&mut Note, ApiError> {
        self.notes
            .iter_mut()
            .find(|(note_owner, note)| note_owner == owner && note.id == id)
            .map(|(_, note)| note)
            .ok_or_else(|| rejected(404, "Note not found"))
    }
}

fn rejected(status: u16, message: &str) -> ApiError {
    ApiError::Rejected {
        status,
        message: message.to_string(),
    }
}

fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}

impl MemoryApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an account up front.
    pub fn with_account(self, email: &str, password: &str) -> Self {
        {
            let mut state = self.state();
            let user = AuthUser {
                id: state.next_id(),
                email: email.to_string(),
            };
            state
                .accounts
                .insert(email.to_string(), (user, password.to_string()));
        }
        self
    }

    /// Simulate the service going down (or coming back).
    pub fn set_unreachable(&self, unreachable: bool) {
        self.unreachable.store(unreachable, Ordering::SeqCst);
    }

    /// Make note creations, updates and deletions fail with this status and
    /// message until cleared with `None`.
    pub fn set_write_failure(&self, failure: Option<(u16, &str)>) {
        let failure = failure.map(|(status, message)| (status, message.to_string()));
        *self
            .write_failure
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = failure;
    }

    /// Number of note creations, updates and deletions served so far.
    pub fn mutation_count(&self) -> usize {
        self.mutations.load(Ordering::SeqCst)
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn reachable(&self, endpoint: &str) -> Result<(), ApiError> {
        if self.unreachable.load(Ordering::SeqCst) {
            return Err(ApiError::Transport {
                endpoint: endpoint.to_string(),
                reason: "connection refused".to_string(),
            });
        }
        Ok(())
    }

    fn writable(&self) -> Result<(), ApiError> {
        let failure = self
            .write_failure
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        match failure.as_ref() {
            Some((status, message)) => Err(rejected(*status, message)),
            None => Ok(()),
        }
    }

    fn mutated(&self) {
        self.mutations.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl NotesApi for MemoryApi {
    async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, ApiError> {
        self.reachable("POST /auth/login")?;
        let mut state = self.state();
        let user = match state.accounts.get(credentials.email()) {
            Some((user, password)) if password == credentials.password() => user.clone(),
            _ => return Err(rejected(401, "Invalid email or password")),
        };
        let token = state.issue_token(&user);
        Ok(AuthResponse { token, user })
    }

    async fn register(&self, credentials: &Credentials) -> Result<AuthResponse, ApiError> {
        self.reachable("POST /auth/register")?;
        let mut state = self.state();
        if state.accounts.contains_key(credentials.email()) {
            return Err(rejected(409, "Email already registered"));
        }
        let user = AuthUser {
            id: state.next_id(),
            email: credentials.email().to_string(),
        };
        state.accounts.insert(
            credentials.email().to_string(),
            (user.clone(), credentials.password().to_string()),
        );
        let token = state.issue_token(&user);
        Ok(AuthResponse { token, user })
    }

    async fn me(&self, token: &str) -> Result<AuthUser, ApiError> {
        self.reachable("GET /auth/me")?;
        let state = self.state();
        let owner = state.owner(token)?;
        state
            .accounts
            .values()
            .find(|(user, _)| user.id == owner)
            .map(|(user, _)| user.clone())
            .ok_or_else(|| rejected(401, "Invalid or expired token"))
    }

    async fn list_notes(&self, token: &str, query: &NoteQuery) -> Result<Vec<Note>, ApiError> {
        self.reachable("GET /notes")?;
        let state = self.state();
        let owner = state.owner(token)?;
        let needle = query.q.to_lowercase();
        Ok(state
            .notes
            .iter()
            .filter(|(note_owner, _)| *note_owner == owner)
            .map(|(_, note)| note)
            .filter(|note| {
                needle.is_empty()
                    || note.title.to_lowercase().contains(&needle)
                    || note.content.to_lowercase().contains(&needle)
            })
            .filter(|note| query.tag.is_empty() || note.tags.iter().any(|t| *t == query.tag))
            .cloned()
            .collect())
    }

    async fn get_note(&self, token: &str, id: &str) -> Result<Note, ApiError> {
        self.reachable("GET /notes/:id")?;
        let mut state = self.state();
        let owner = state.owner(token)?;
        state.note_mut(&owner, id).map(|note| note.clone())
    }

    async fn create_note(&self, token: &str, input: &NoteInput) -> Result<Note, ApiError> {
        self.reachable("POST /notes")?;
        self.writable()?;
        let mut state = self.state();
        let owner = state.owner(token)?;
        let timestamp = now();
        let note = Note {
            id: state.next_id(),
            title: input.title.clone(),
            content: input.content.clone(),
            tags: input.tags.clone(),
            created_at: Some(timestamp.clone()),
            updated_at: Some(timestamp),
        };
        state.notes.push((owner, note.clone()));
        self.mutated();
        Ok(note)
    }

    async fn update_note(&self, token: &str, id: &str, patch: &NotePatch) -> Result<Note, ApiError> {
        self.reachable("PUT /notes/:id")?;
        self.writable()?;
        let mut state = self.state();
        let owner = state.owner(token)?;
        let note = state.note_mut(&owner, id)?;
        if let Some(title) = &patch.title {
            note.title = title.clone();
        }
        if let Some(content) = &patch.content {
            note.content = content.clone();
        }
        if let Some(tags) = &patch.tags {
            note.tags = tags.clone();
        }
        note.updated_at = Some(now());
        let updated = note.clone();
        self.mutated();
        Ok(updated)
    }

    async fn delete_note(&self, token: &str, id: &str) -> Result<(), ApiError> {
        self.reachable("DELETE /notes/:id")?;
        self.writable()?;
        let mut state = self.state();
        let owner = state.owner(token)?;
        let before = state.notes.len();
        state
            .notes
            .retain(|(note_owner, note)| !(*note_owner == owner && note.id == id));
        if state.notes.len() == before {
            return Err(rejected(404, "Note not found"));
        }
        self.mutated();
        Ok(())
    }
}
