pub mod health;
pub mod relay;

pub use health::health_handler;
pub use relay::{assign_handler, sweep_handler, unassign_handler};
