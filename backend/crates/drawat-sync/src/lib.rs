//! Synchronization engine: pulls every holder's record into a merged canvas
//! and pushes the local identity's paths back.

pub(crate) mod canvas;
pub(crate) mod pull_result;
pub(crate) mod shutdown;
pub(crate) mod sync_engine;

#[cfg(test)]
mod tests;

pub use canvas::{Canvas, CanvasUpdate};
pub use pull_result::PullResult;
pub use shutdown::{ShutdownCoordinator, ShutdownGuard};
pub use sync_engine::SyncEngine;
