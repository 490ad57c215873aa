//! Serialized access to the search session.
//!
//! The pagination cache is owned by a single task. Callers hold a cloneable
//! handle and every request is processed to completion before the next one
//! starts, so fetches never overlap and the session invariants hold even
//! when several front ends share one session.

mod actor;
mod commands;
mod handle;

pub use actor::spawn_search_session;
pub use commands::SearchSessionCommand;
pub use handle::SearchSessionHandle;
