//! Terminal host for the book catalog.
//!
//! Executes the requests `catalog-core` builds with ureq, shows the catalog
//! through `TerminalView`, and maps typed commands onto controller handlers.

pub mod config;
pub mod repl;
pub mod terminal;
pub mod transport;

pub use config::Config;
pub use terminal::TerminalView;
pub use transport::UreqTransport;
