//! Session lifecycle and durable persistence for the Crewdesk console.

pub mod manager;
pub mod session;
pub mod store;

pub use manager::{SessionCell, SessionManager};
pub use session::Session;
pub use store::{FileSessionStore, MemorySessionStore, SessionStore};
