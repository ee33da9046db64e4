//! Which profile the page treats as current, and the rules for resolving it.

use std::cell::Cell;

use crate::api::Profile;
use crate::error::ProfileError;

/// Label of the placeholder option rendered when no profiles exist.
pub const NO_PROFILES_LABEL: &str = "No profiles";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Unset,
    Bound(i64),
}

impl Selection {
    pub fn from_id(id: Option<i64>) -> Self {
        id.map_or(Selection::Unset, Selection::Bound)
    }

    pub fn id(self) -> Option<i64> {
        match self {
            Selection::Unset => None,
            Selection::Bound(id) => Some(id),
        }
    }

    pub fn is_bound(self) -> bool {
        matches!(self, Selection::Bound(_))
    }
}

/// The in-memory active selection, owned by the selector instead of living on `window`.
#[derive(Debug, Default)]
pub struct SelectionState {
    current: Cell<Selection>,
}

impl SelectionState {
    pub fn get(&self) -> Selection {
        self.current.get()
    }

    /// Returns the previous selection.
    pub fn set(&self, selection: Selection) -> Selection {
        self.current.replace(selection)
    }

    pub fn clear(&self) -> Selection {
        self.set(Selection::Unset)
    }
}

/// Resolve the active profile against a freshly fetched list.
///
/// A candidate still present in `profiles` wins; otherwise the first profile
/// does; an empty list leaves nothing selected.
pub fn reconcile(profiles: &[Profile], candidate: Selection) -> Selection {
    match candidate {
        Selection::Bound(id) if profiles.iter().any(|p| p.id == id) => candidate,
        _ => Selection::from_id(profiles.first().map(|p| p.id)),
    }
}

/// Trim a requested profile name, rejecting blank input.
pub fn validate_name(raw: &str) -> Result<&str, ProfileError> {
    let name = raw.trim();
    if name.is_empty() {
        Err(ProfileError::Validation("Enter a profile name".to_string()))
    } else {
        Ok(name)
    }
}

/// Parse a `<select>` value; the placeholder's empty value means no selection.
pub fn parse_option_value(value: &str) -> Option<i64> {
    value.trim().parse().ok()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// Options for the profile `<select>`, with a placeholder when the list is empty.
pub fn select_options(profiles: &[Profile], selection: Selection) -> Vec<SelectOption> {
    if profiles.is_empty() {
        return vec![SelectOption {
            value: String::new(),
            label: NO_PROFILES_LABEL.to_string(),
            selected: true,
        }];
    }

    profiles
        .iter()
        .map(|p| SelectOption {
            value: p.id.to_string(),
            label: p.name.clone(),
            selected: selection == Selection::Bound(p.id),
        })
        .collect()
}
