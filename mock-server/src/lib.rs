use std::{
    collections::{BTreeMap, VecDeque},
    sync::{Arc, Mutex, MutexGuard},
};

use axum::{
    extract::{Path, Request, State},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};

pub use axum::http::StatusCode;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: u64,
    pub title: String,
    pub author: String,
    pub price: f64,
    pub isbn: String,
    pub publish_date: String,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookInput {
    pub title: String,
    pub author: String,
    pub price: f64,
    #[serde(default)]
    pub isbn: String,
    #[serde(default)]
    pub publish_date: String,
}

/// A canned response served instead of the next request.
#[derive(Clone, Debug)]
pub struct Fault {
    pub status: StatusCode,
    pub body: String,
}

#[derive(Default)]
struct Catalog {
    books: BTreeMap<u64, Book>,
    last_id: u64,
}

impl Catalog {
    fn insert(&mut self, input: BookInput) -> Book {
        self.last_id += 1;
        let book = into_book(self.last_id, input);
        self.books.insert(book.id, book.clone());
        book
    }
}

/// Shared server state. Cloning hands out another handle to the same data,
/// so tests can keep one to seed books and queue faults.
#[derive(Clone, Default)]
pub struct MockState {
    catalog: Arc<RwLock<Catalog>>,
    faults: Arc<Mutex<VecDeque<Fault>>>,
}

impl MockState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer the next request (whatever its route) with `status` and `body`.
    /// Queued faults are served in order, one per request.
    pub fn fail_next(&self, status: StatusCode, body: impl Into<String>) {
        self.faults().push_back(Fault {
            status,
            body: body.into(),
        });
    }

    pub async fn seed(&self, input: BookInput) -> Book {
        self.catalog.write().await.insert(input)
    }

    pub async fn books(&self) -> Vec<Book> {
        self.catalog.read().await.books.values().cloned().collect()
    }

    fn faults(&self) -> MutexGuard<'_, VecDeque<Fault>> {
        self.faults.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

pub fn app() -> Router {
    app_with(MockState::new())
}

pub fn app_with(state: MockState) -> Router {
    Router::new()
        .route("/api/books", get(list_books).post(create_book))
        .route(
            "/api/books/{id}",
            get(get_book).put(update_book).delete(delete_book),
        )
        .layer(middleware::from_fn_with_state(state.clone(), inject_fault))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, MockState::new()).await
}

pub async fn run_with(listener: TcpListener, state: MockState) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock book server listening");
    }
    axum::serve(listener, app_with(state)).await
}

async fn inject_fault(State(state): State<MockState>, request: Request, next: Next) -> Response {
    let fault = state.faults().pop_front();
    match fault {
        Some(fault) => {
            debug!(method = %request.method(), uri = %request.uri(), status = %fault.status, "serving injected fault");
            (fault.status, fault.body).into_response()
        }
        None => next.run(request).await,
    }
}

fn into_book(id: u64, input: BookInput) -> Book {
    Book {
        id,
        title: input.title,
        author: input.author,
        price: input.price,
        isbn: input.isbn,
        publish_date: input.publish_date,
    }
}

fn validate(input: &BookInput) -> Result<(), (StatusCode, String)> {
    if input.title.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "title must not be empty".to_string()));
    }
    if input.author.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "author must not be empty".to_string()));
    }
    Ok(())
}

fn not_found(id: u64) -> (StatusCode, String) {
    (StatusCode::NOT_FOUND, format!("book {id} not found"))
}

async fn list_books(State(state): State<MockState>) -> Json<Vec<Book>> {
    Json(state.books().await)
}

async fn create_book(
    State(state): State<MockState>,
    Json(input): Json<BookInput>,
) -> Result<(StatusCode, Json<Book>), (StatusCode, String)> {
    validate(&input)?;
    let book = state.seed(input).await;
    Ok((StatusCode::CREATED, Json(book)))
}

async fn get_book(
    State(state): State<MockState>,
    Path(id): Path<u64>,
) -> Result<Json<Book>, (StatusCode, String)> {
    let catalog = state.catalog.read().await;
    catalog.books.get(&id).cloned().map(Json).ok_or_else(|| not_found(id))
}

/// Replaces every field of the record; the id is kept.
async fn update_book(
    State(state): State<MockState>,
    Path(id): Path<u64>,
    Json(input): Json<BookInput>,
) -> Result<Json<Book>, (StatusCode, String)> {
    validate(&input)?;
    let mut catalog = state.catalog.write().await;
    let slot = catalog.books.get_mut(&id).ok_or_else(|| not_found(id))?;
    *slot = into_book(id, input);
    Ok(Json(slot.clone()))
}

async fn delete_book(
    State(state): State<MockState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, (StatusCode, String)> {
    let mut catalog = state.catalog.write().await;
    catalog
        .books
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(|| not_found(id))
}
