//! The catalog form controller.
//!
//! # Design
//! Every user action is split in two, like the `build_*` / `parse_*` pair on
//! `CatalogClient`:
//! - an *issue* method (`refresh`, `submit`, `click`) updates the view as
//!   needed and returns a `Pending` request;
//! - `complete` takes that `Pending` back together with the host's outcome
//!   and applies the result. A successful mutation returns the follow-up
//!   list refresh as a new `Pending`.
//!
//! Several requests may be in flight at once. List fetches and record loads
//! are numbered; a response that is not from the latest issued generation is
//! dropped before it reaches the view.

use tracing::{debug, warn};

use crate::client::CatalogClient;
use crate::error::{ApiError, Operation, OperationFailed};
use crate::form::BookForm;
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::types::BookId;
use crate::view::{RowAction, SubmitLabel, View};

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this book?";

/// Which request the submit button sends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Create,
    Edit(BookId),
}

/// Client-side state owned by the controller.
#[derive(Debug, Clone, Default)]
pub struct CatalogState {
    editing_id: Option<BookId>,
    list_generation: u64,
    load_generation: u64,
}

impl CatalogState {
    pub fn editing_id(&self) -> Option<&BookId> {
        self.editing_id.as_ref()
    }

    pub fn mode(&self) -> Mode {
        match &self.editing_id {
            Some(id) => Mode::Edit(id.clone()),
            None => Mode::Create,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PendingKind {
    Refresh,
    Load(BookId),
    Create,
    Update(BookId),
    Delete(BookId),
}

impl PendingKind {
    fn operation(&self) -> Operation {
        match self {
            PendingKind::Refresh => Operation::List,
            PendingKind::Load(_) => Operation::Load,
            PendingKind::Create => Operation::Create,
            PendingKind::Update(_) => Operation::Update,
            PendingKind::Delete(_) => Operation::Delete,
        }
    }
}

/// An issued request awaiting its response.
#[derive(Debug, Clone)]
#[must_use = "a pending request has no effect until its outcome is passed to `complete`"]
pub struct Pending {
    kind: PendingKind,
    generation: u64,
    request: HttpRequest,
}

impl Pending {
    pub fn request(&self) -> &HttpRequest {
        &self.request
    }

    pub fn operation(&self) -> Operation {
        self.kind.operation()
    }
}

pub struct CatalogController<V> {
    client: CatalogClient,
    view: V,
    state: CatalogState,
}

impl<V: View> CatalogController<V> {
    pub fn new(client: CatalogClient, view: V) -> Self {
        Self {
            client,
            view,
            state: CatalogState::default(),
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }

    pub fn state(&self) -> &CatalogState {
        &self.state
    }

    pub fn mode(&self) -> Mode {
        self.state.mode()
    }

    /// Fetch the full list. Issued on start-up and after every mutation.
    pub fn refresh(&mut self) -> Pending {
        self.state.list_generation += 1;
        let request = self.client.build_list_books();
        self.issue(PendingKind::Refresh, self.state.list_generation, request)
    }

    /// Submit the form: create in create mode, update in edit mode.
    pub fn submit(&mut self) -> Option<Pending> {
        self.view.clear_error();
        let input = self.view.read_form().to_input();
        let (kind, built) = match self.state.editing_id.clone() {
            Some(id) => {
                let built = self.client.build_update_book(&id, &input);
                (PendingKind::Update(id), built)
            }
            None => (PendingKind::Create, self.client.build_create_book(&input)),
        };
        match built {
            Ok(request) => Some(self.issue(kind, 0, request)),
            Err(err) => {
                self.fail(kind.operation(), &err);
                None
            }
        }
    }

    /// Discard the form and go back to create mode, whatever the state.
    pub fn cancel(&mut self) {
        self.reset_form();
    }

    /// Handle a click on a row control. Declining the delete prompt issues
    /// nothing.
    pub fn click(&mut self, action: RowAction) -> Option<Pending> {
        match action {
            RowAction::Delete(id) => {
                if !self.view.confirm(DELETE_PROMPT) {
                    debug!(%id, "delete declined");
                    return None;
                }
                let request = self.client.build_delete_book(&id);
                Some(self.issue(PendingKind::Delete(id), 0, request))
            }
            RowAction::Edit(id) => {
                self.state.load_generation += 1;
                let request = self.client.build_get_book(&id);
                Some(self.issue(PendingKind::Load(id), self.state.load_generation, request))
            }
        }
    }

    /// Delegated click handler for the whole list: `class_list` and `data_id`
    /// are read off the clicked element. Clicks outside the row controls are
    /// ignored.
    pub fn click_control(&mut self, class_list: &str, data_id: Option<&str>) -> Option<Pending> {
        let action = RowAction::from_control(class_list, data_id)?;
        self.click(action)
    }

    /// Apply the outcome of a previously issued request.
    pub fn complete(
        &mut self,
        pending: Pending,
        outcome: Result<HttpResponse, ApiError>,
    ) -> Option<Pending> {
        let Pending { kind, generation, .. } = pending;
        let operation = kind.operation();
        match kind {
            PendingKind::Refresh => {
                if generation != self.state.list_generation {
                    debug!(generation, latest = self.state.list_generation, "discarding stale list response");
                    return None;
                }
                match outcome.and_then(|r| self.client.parse_list_books(r)) {
                    Ok(books) => {
                        debug!(count = books.len(), "rendering book list");
                        self.view.render_books(&books);
                    }
                    Err(err) => self.fail(operation, &err),
                }
                None
            }
            PendingKind::Load(id) => {
                if generation != self.state.load_generation {
                    debug!(%id, generation, "discarding stale record load");
                    return None;
                }
                match outcome.and_then(|r| self.client.parse_get_book(r)) {
                    Ok(book) => {
                        self.view.fill_form(&BookForm::from_book(&book));
                        self.state.editing_id = Some(id);
                        self.view.set_submit_label(SubmitLabel::Update);
                    }
                    Err(err) => self.fail(operation, &err),
                }
                None
            }
            PendingKind::Create | PendingKind::Update(_) => {
                let parsed = outcome.and_then(|r| match operation {
                    Operation::Create => self.client.parse_create_book(r),
                    _ => self.client.parse_update_book(r),
                });
                match parsed {
                    Ok(()) => {
                        self.reset_form();
                        Some(self.refresh())
                    }
                    Err(err) => {
                        self.fail(operation, &err);
                        None
                    }
                }
            }
            PendingKind::Delete(_) => match outcome.and_then(|r| self.client.parse_delete_book(r)) {
                Ok(()) => Some(self.refresh()),
                Err(err) => {
                    self.fail(operation, &err);
                    None
                }
            },
        }
    }

    /// Execute `pending` and every follow-up request it produces, in order.
    pub fn run<T: Transport + ?Sized>(&mut self, transport: &T, pending: Option<Pending>) {
        let mut next = pending;
        while let Some(pending) = next {
            let outcome = transport.execute(pending.request());
            next = self.complete(pending, outcome);
        }
    }

    fn reset_form(&mut self) {
        self.view.clear_form();
        self.state.editing_id = None;
        // An edit load still in flight must not re-enter edit mode.
        self.state.load_generation += 1;
        self.view.set_submit_label(SubmitLabel::Register);
        self.view.clear_error();
    }

    fn fail(&mut self, operation: Operation, err: &ApiError) {
        warn!(%operation, error = %err, "operation failed");
        let failed = OperationFailed::new(operation, err);
        self.view.show_error(&failed.message);
    }

    fn issue(&self, kind: PendingKind, generation: u64, request: HttpRequest) -> Pending {
        debug!(method = request.method.as_str(), path = %request.path, generation, "issuing request");
        Pending {
            kind,
            generation,
            request,
        }
    }
}
