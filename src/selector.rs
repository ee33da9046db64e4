//! Profile selection controller for the songs page.
//!
//! Owns the active selection and the last fetched profile list, keeps the
//! durable copy of the selection in a [`SelectionStore`], and reports every
//! outcome on a single status line. Rendering is left to the view, which
//! reads [`ProfileSelector::snapshot`] after each operation.

use std::cell::{Cell, RefCell};

use tracing::{debug, info, warn};

use crate::api::Profile;
use crate::error::ProfileError;
use crate::selection::{reconcile, validate_name, Selection, SelectionState};

pub const CREATE_PROMPT: &str = "Create a profile to start tracking highscores.";

/// Backend endpoints the selector depends on.
#[allow(async_fn_in_trait)]
pub trait ProfileBackend {
    async fn get_profiles(&self) -> Result<Vec<Profile>, ProfileError>;

    async fn create_profile(&self, name: &str) -> Result<Profile, ProfileError>;

    async fn delete_profile(&self, id: i64) -> Result<(), ProfileError>;

    /// Tell the backend which profile is current. Not awaited; failures are dropped.
    fn announce_current(&self, id: Option<i64>);
}

/// Durable client-side copy of the selection.
pub trait SelectionStore {
    fn load(&self) -> Option<i64>;

    fn save(&self, id: i64);

    fn clear(&self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Status {
    pub text: String,
    pub tone: Tone,
}

impl Status {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: Tone::Info,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: Tone::Error,
        }
    }
}

impl From<&ProfileError> for Status {
    fn from(err: &ProfileError) -> Self {
        Status::error(err.to_string())
    }
}

/// Everything the view needs to render the selector.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectorSnapshot {
    pub profiles: Vec<Profile>,
    pub selection: Selection,
    pub status: Status,
    pub pending_delete: Option<Profile>,
}

pub struct ProfileSelector<B, S> {
    backend: B,
    store: S,
    selection: SelectionState,
    profiles: RefCell<Vec<Profile>>,
    status: RefCell<Status>,
    pending_delete: Cell<Option<i64>>,
    on_refresh: Option<Box<dyn Fn()>>,
}

impl<B: ProfileBackend, S: SelectionStore> ProfileSelector<B, S> {
    pub fn new(backend: B, store: S) -> Self {
        Self {
            backend,
            store,
            selection: SelectionState::default(),
            profiles: RefCell::new(Vec::new()),
            status: RefCell::new(Status::default()),
            pending_delete: Cell::new(None),
            on_refresh: None,
        }
    }

    /// Install the callback that reloads song data when the active profile changes.
    pub fn with_refresher(mut self, refresh: impl Fn() + 'static) -> Self {
        self.on_refresh = Some(Box::new(refresh));
        self
    }

    pub fn selection(&self) -> Selection {
        self.selection.get()
    }

    pub fn profiles(&self) -> Vec<Profile> {
        self.profiles.borrow().clone()
    }

    pub fn status(&self) -> Status {
        self.status.borrow().clone()
    }

    pub fn pending_delete(&self) -> Option<Profile> {
        self.pending_delete.get().and_then(|id| self.find(id))
    }

    pub fn snapshot(&self) -> SelectorSnapshot {
        SelectorSnapshot {
            profiles: self.profiles(),
            selection: self.selection(),
            status: self.status(),
            pending_delete: self.pending_delete(),
        }
    }

    /// Fetch the profile list and resolve the active selection against it.
    ///
    /// On failure the previous list and selection are left as they were.
    pub async fn load_profiles(&self) -> Result<Selection, ProfileError> {
        self.reload().await.map(|_| self.selection())
    }

    /// Returns whether the resolved selection changed (and so refreshed songs).
    async fn reload(&self) -> Result<bool, ProfileError> {
        let profiles = self
            .backend
            .get_profiles()
            .await
            .map_err(|e| self.fail(e))?;

        let previous = self.selection.get();
        let candidate = if previous.is_bound() {
            previous
        } else {
            Selection::from_id(self.store.load())
        };
        let resolved = reconcile(&profiles, candidate);

        self.selection.set(resolved);
        self.persist(resolved);
        self.backend.announce_current(resolved.id());

        let status = if profiles.is_empty() {
            Status::info(CREATE_PROMPT)
        } else {
            Status::info("Profiles loaded")
        };
        debug!(
            "Loaded {} profiles, selection {:?} -> {:?}",
            profiles.len(),
            previous,
            resolved
        );
        *self.profiles.borrow_mut() = profiles;
        self.set_status(status);

        let changed = resolved != previous;
        if changed {
            self.refresh();
        }
        Ok(changed)
    }

    /// Check a requested name without touching the backend, reporting a blank
    /// one on the status line.
    pub fn check_name<'a>(&self, raw: &'a str) -> Result<&'a str, ProfileError> {
        validate_name(raw).map_err(|e| self.fail(e))
    }

    /// Create a profile and make it the active one.
    ///
    /// Blank names are rejected before any request is made.
    pub async fn create_profile(&self, name: &str) -> Result<Profile, ProfileError> {
        let name = self.check_name(name)?;
        let profile = self
            .backend
            .create_profile(name)
            .await
            .map_err(|e| self.fail(e))?;

        info!("Created profile {} ({})", profile.name, profile.id);
        self.selection.set(Selection::Bound(profile.id));
        self.store.save(profile.id);
        self.backend.announce_current(Some(profile.id));

        // A failed reload has already put its error on the status line.
        let refreshed = match self.reload().await {
            Ok(refreshed) => {
                self.set_status(Status::info("Profile created"));
                refreshed
            }
            Err(_) => false,
        };
        if !refreshed {
            self.refresh();
        }
        Ok(profile)
    }

    /// Stage deletion of a listed profile. Nothing is sent until [`Self::confirm_delete`].
    pub fn request_delete(&self, id: i64) -> Option<Profile> {
        let profile = self.find(id)?;
        self.pending_delete.set(Some(id));
        Some(profile)
    }

    pub fn cancel_delete(&self) {
        self.pending_delete.set(None);
    }

    /// Delete the staged profile together with its highscores.
    pub async fn confirm_delete(&self) -> Result<(), ProfileError> {
        let Some(id) = self.pending_delete.take() else {
            debug!("confirm_delete with nothing pending");
            return Ok(());
        };

        self.backend
            .delete_profile(id)
            .await
            .map_err(|e| self.fail(e))?;

        info!("Deleted profile {}", id);
        if self.selection.get() == Selection::Bound(id) {
            self.selection.clear();
            self.store.clear();
        }

        let refreshed = match self.reload().await {
            Ok(refreshed) => {
                self.set_status(Status::info("Profile deleted"));
                refreshed
            }
            Err(_) => false,
        };
        if !refreshed {
            self.refresh();
        }
        Ok(())
    }

    /// Apply a direct pick from the list; `None` is the empty placeholder.
    pub fn select_profile(&self, id: Option<i64>) -> Selection {
        let selection = Selection::from_id(id);
        self.selection.set(selection);
        self.persist(selection);
        self.backend.announce_current(id);

        if let Some(id) = id {
            let name = self
                .find(id)
                .map(|p| p.name)
                .unwrap_or_else(|| id.to_string());
            self.set_status(Status::info(format!("Selected profile: {}", name)));
            self.refresh();
        }
        selection
    }

    fn find(&self, id: i64) -> Option<Profile> {
        self.profiles.borrow().iter().find(|p| p.id == id).cloned()
    }

    fn persist(&self, selection: Selection) {
        match selection {
            Selection::Bound(id) => self.store.save(id),
            Selection::Unset => self.store.clear(),
        }
    }

    fn set_status(&self, status: Status) {
        *self.status.borrow_mut() = status;
    }

    fn fail(&self, err: ProfileError) -> ProfileError {
        match err.detail() {
            Some(detail) => warn!("{} ({})", err, detail),
            None => warn!("{}", err),
        }
        self.set_status(Status::from(&err));
        err
    }

    fn refresh(&self) {
        match &self.on_refresh {
            Some(refresh) => refresh(),
            None => debug!("No songs refresher installed"),
        }
    }
}
