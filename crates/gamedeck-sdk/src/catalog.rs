//! Catalog screen state: one dashboard fetch per visit plus client-side search.

use gamedeck_models::{filter_games, DashboardResponse, Game};
use tracing::{debug, info, warn};

use crate::credentials::CredentialStore;
use crate::error::SdkError;

/// Where the catalog is in its fetch cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogPhase {
    /// A dashboard fetch is outstanding.
    Loading,
    /// The last fetch failed; the message is shown with a retry affordance.
    Failed(String),
    /// Games are available (possibly none).
    Ready,
}

/// State of the catalog screen.
#[derive(Debug, Clone)]
pub struct Catalog {
    phase: CatalogPhase,
    games: Vec<Game>,
    search: String,
    seq: u64,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    /// A catalog that has not fetched anything yet.
    pub fn new() -> Self {
        Self {
            phase: CatalogPhase::Loading,
            games: Vec::new(),
            search: String::new(),
            seq: 0,
        }
    }

    /// Start a (re)fetch and return the token the response must carry.
    ///
    /// Retrying after a failure goes through here too.
    pub fn begin_fetch(&mut self) -> u64 {
        self.seq += 1;
        self.phase = CatalogPhase::Loading;
        debug!(token = self.seq, "catalog fetch issued");
        self.seq
    }

    /// Apply a dashboard response.
    ///
    /// Returns `false` when `token` belongs to a superseded fetch, in which
    /// case nothing changes. On success the credential store is seeded from
    /// the response; on failure it is left untouched.
    pub fn on_dashboard(
        &mut self,
        token: u64,
        result: Result<DashboardResponse, SdkError>,
        store: &mut CredentialStore,
    ) -> bool {
        if token != self.seq {
            debug!(token, current = self.seq, "dropping stale catalog response");
            return false;
        }

        match result {
            Ok(dashboard) => {
                store.seed_from_dashboard(&dashboard);
                info!(
                    games = dashboard.games.len(),
                    identities = store.identities().len(),
                    "catalog loaded"
                );
                self.games = dashboard.games;
                self.phase = CatalogPhase::Ready;
            }
            Err(e) => {
                warn!(error = %e, "catalog fetch failed");
                self.phase = CatalogPhase::Failed(e.to_string());
            }
        }
        true
    }

    /// Current phase.
    pub fn phase(&self) -> &CatalogPhase {
        &self.phase
    }

    /// Every fetched game in fetch order.
    pub fn games(&self) -> &[Game] {
        &self.games
    }

    /// The active search term.
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Replace the search term. No network traffic.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    /// Games matching the search term, in fetch order.
    pub fn visible(&self) -> Vec<&Game> {
        filter_games(&self.games, &self.search)
    }
}
