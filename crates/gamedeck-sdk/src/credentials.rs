//! Session-wide identity store shared by the catalog and detail screens.
//!
//! The store is created once by the application entry point and handed to
//! each screen explicitly. It lives only as long as the process.

use gamedeck_models::{DashboardResponse, Identity, ModelError};

/// Holder of the current identity and every identity the session may use.
///
/// Invariant: whenever an identity is current, it is a member of
/// [`identities`](Self::identities).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialStore {
    current: Option<Identity>,
    identities: Vec<Identity>,
}

impl CredentialStore {
    /// An empty store: no current identity, no identities.
    pub fn new() -> Self {
        Self::default()
    }

    /// The selected identity, or `None` before the first dashboard fetch.
    pub fn current(&self) -> Option<&Identity> {
        self.current.as_ref()
    }

    /// Every identity available to the session.
    pub fn identities(&self) -> &[Identity] {
        &self.identities
    }

    /// Whether the user has more than one identity to pick from.
    pub fn has_choice(&self) -> bool {
        self.identities.len() > 1
    }

    /// Replace the current identity and, optionally, the identity list.
    ///
    /// * A non-empty list is authoritative: if `current` is not in it, the
    ///   entry with the same user id is selected, else the first entry.
    /// * An empty list is replaced by `[current]`.
    /// * `identities == None` keeps the previously stored list; `current`
    ///   replaces the listed entry with the same user id, or is appended.
    pub fn update(&mut self, current: Identity, identities: Option<Vec<Identity>>) {
        match identities {
            Some(list) if !list.is_empty() => {
                let selected = if list.contains(&current) {
                    current
                } else {
                    list.iter()
                        .find(|id| id.user_id == current.user_id)
                        .unwrap_or(&list[0])
                        .clone()
                };
                self.identities = list;
                self.current = Some(selected);
            }
            Some(_) => {
                self.identities = vec![current.clone()];
                self.current = Some(current);
            }
            None => {
                if !self.identities.contains(&current) {
                    match self
                        .identities
                        .iter_mut()
                        .find(|id| id.user_id == current.user_id)
                    {
                        Some(slot) => *slot = current.clone(),
                        None => self.identities.push(current.clone()),
                    }
                }
                self.current = Some(current);
            }
        }
    }

    /// Seed the store from a dashboard response.
    ///
    /// Uses `availableUsers` when present and non-empty, otherwise a list
    /// holding only the top-level credential.
    pub fn seed_from_dashboard(&mut self, dashboard: &DashboardResponse) {
        self.update(dashboard.primary_identity(), Some(dashboard.identities()));
    }

    /// Make the listed identity with `user_id` the current one.
    pub fn select(&mut self, user_id: &str) -> Result<&Identity, ModelError> {
        let identity = self
            .identities
            .iter()
            .find(|id| id.user_id == user_id)
            .cloned()
            .ok_or_else(|| ModelError::UnknownIdentity {
                user_id: user_id.to_string(),
            })?;
        Ok(self.current.insert(identity))
    }
}
