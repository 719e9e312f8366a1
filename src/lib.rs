// Library surface for headless/integration tests and reuse.
// Rendering and terminal setup stay in main.rs.
pub mod app;
pub mod app_dirs;
pub mod challenge;
pub mod config;
pub mod error;
pub mod game;
pub mod history;
pub mod language;
pub mod random;
pub mod runtime;
pub mod selection;
pub mod session;
pub mod stats;
pub mod store;
pub mod timer;
pub mod util;
pub mod vocabulary;

pub use error::{GameError, StoreError};
