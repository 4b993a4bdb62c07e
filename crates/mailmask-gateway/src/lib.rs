//! HTTP front end for the mailmask relay.
//!
//! Exposes the assignment strategies over a small JSON API:
//! `POST /relay` assigns, `DELETE /relay` unassigns by URL or address, and
//! `DELETE /relay/expired` sweeps expired temporary assignments.

pub mod app;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;

pub use app::App;
pub use state::AppState;
