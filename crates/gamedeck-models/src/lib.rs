#![deny(missing_docs)]

//! # GameDeck Models
//!
//! Core data types exchanged with the operator's game API.
//!
//! ## Endpoints
//!
//! ```text
//! GET  /api/games/dashboard          -> DashboardResponse
//! POST /wallet/doLoginAndLaunchGame  LaunchRequest -> LaunchResponse
//! ```
//!
//! ## Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`game`] | `Game`, `BetConfig`, catalog search and lookup |
//! | [`identity`] | `Identity` (user id + agent id + certificate) |
//! | [`dashboard`] | `DashboardResponse` and the identity fallback rule |
//! | [`launch`] | `LaunchRequest`, `LaunchResponse` and success classification |
//! | [`error`] | `ModelError` |

pub mod dashboard;
pub mod error;
pub mod game;
pub mod identity;
pub mod launch;

// Re-export all public types at crate root for convenience.
pub use dashboard::*;
pub use error::*;
pub use game::*;
pub use identity::*;
pub use launch::*;
