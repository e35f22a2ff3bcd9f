pub mod app;
pub mod backend;
pub mod config;
pub mod countdown;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod page;
pub mod reveal;
pub mod state;
pub mod stats;
pub mod ui;

pub use app::{EventOutcome, Landing, PageEvent};
pub use backend::{Backend, HttpBackend};
pub use config::Config;
pub use page::{MemoryPage, Page};
pub use state::LandingState;
