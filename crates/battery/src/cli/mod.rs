//! CLI command implementations.

pub mod bundle;
pub mod list;
pub mod natives;
pub mod output;
pub mod publish;
pub mod watch;
