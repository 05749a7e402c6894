//! Client core for the book catalog.
//!
//! # Overview
//! Renders a book list fetched from `/api/books` and turns one form into
//! create/update requests, list controls into edit/delete requests. Requests
//! are built and responses parsed here; the host executes the HTTP
//! round-trip (host-does-IO pattern), so the core stays deterministic.
//!
//! # Design
//! - `CatalogClient` is stateless: `build_*` produces an `HttpRequest`,
//!   `parse_*` consumes an `HttpResponse`.
//! - `CatalogController` owns the editing state and talks to the screen only
//!   through the `View` trait. `Page` is a headless `View`.
//! - Every failure surfaces as one `OperationFailed` message in the view's
//!   error banner; nothing propagates past the controller.

pub mod client;
pub mod controller;
pub mod error;
pub mod form;
pub mod http;
pub mod page;
pub mod render;
pub mod types;
pub mod view;

pub use client::CatalogClient;
pub use controller::{CatalogController, CatalogState, Mode, Pending, DELETE_PROMPT};
pub use error::{ApiError, Operation, OperationFailed};
pub use form::{BookForm, FormField, UnknownField};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use page::{ErrorBanner, Page};
pub use render::BookRow;
pub use types::{Book, BookId, BookInput};
pub use view::{RowAction, SubmitLabel, View};
