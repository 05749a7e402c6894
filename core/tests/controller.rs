//! Controller scenarios against the headless `Page` with scripted responses.
//!
//! Each test issues actions, inspects the produced requests, and feeds back
//! hand-written `HttpResponse` values, so interleavings that are hard to
//! provoke over a real network (stale responses, cancel mid-load) are
//! deterministic here.

use catalog_core::{
    ApiError, BookForm, BookId, CatalogClient, CatalogController, FormField, HttpMethod,
    HttpResponse, Mode, Operation, Page, Pending, RowAction, SubmitLabel, View, DELETE_PROMPT,
};

const ONE_BOOK: &str = r#"[{"id":1,"title":"T","author":"Au","price":5,"isbn":"I","publishDate":"D"}]"#;
const TWO_BOOKS: &str = r#"[
    {"id":1,"title":"T","author":"Au","price":5,"isbn":"I","publishDate":"D"},
    {"id":2,"title":"A","author":"B","price":10,"isbn":"X","publishDate":"2024-01-01"}
]"#;
const RECORD_T2: &str = r#"{"id":1,"title":"T2","author":"Au2","price":7.5,"isbn":"I2","publishDate":"D2"}"#;

fn controller() -> CatalogController<Page> {
    CatalogController::new(CatalogClient::new("http://test"), Page::new())
}

fn ok(body: &str) -> Result<HttpResponse, ApiError> {
    Ok(HttpResponse::new(200, body))
}

fn status(code: u16, body: &str) -> Result<HttpResponse, ApiError> {
    Ok(HttpResponse::new(code, body))
}

fn fill(c: &mut CatalogController<Page>, values: [&str; 5]) {
    for (field, value) in FormField::ALL.into_iter().zip(values) {
        c.view_mut().type_into(field, value);
    }
}

/// Load the list with `ONE_BOOK` and enter edit mode on id 1.
fn editing_one() -> CatalogController<Page> {
    let mut c = controller();
    let refresh = c.refresh();
    assert!(c.complete(refresh, ok(ONE_BOOK)).is_none());
    let load = c.click(RowAction::Edit(BookId::from(1))).unwrap();
    assert!(c.complete(load, ok(RECORD_T2)).is_none());
    c
}

fn expect_refresh(next: Option<Pending>) -> Pending {
    let pending = next.expect("mutation success should trigger a refresh");
    assert_eq!(pending.operation(), Operation::List);
    assert_eq!(pending.request().method, HttpMethod::Get);
    assert_eq!(pending.request().path, "http://test/api/books");
    pending
}

// --- rendering ---

#[test]
fn list_renders_one_row_with_tagged_controls() {
    let mut c = controller();
    let pending = c.refresh();
    assert_eq!(pending.request().method, HttpMethod::Get);

    assert!(c.complete(pending, ok(ONE_BOOK)).is_none());

    let page = c.view();
    assert_eq!(page.rows.len(), 1);
    let row = &page.rows[0];
    assert_eq!(row.title, "T");
    assert_eq!(row.author, "Au");
    assert_eq!(row.price, "5");
    assert_eq!(row.isbn, "I");
    assert_eq!(row.publish_date, "D");
    assert_eq!(
        page.controls(),
        vec![
            RowAction::Edit(BookId::from(1)),
            RowAction::Delete(BookId::from(1))
        ]
    );
    assert!(page.list_html.contains(r#"data-id="1""#));
}

#[test]
fn refresh_fully_replaces_previous_rows() {
    let mut c = controller();
    let p = c.refresh();
    let _ = c.complete(p, ok(TWO_BOOKS));
    assert_eq!(c.view().rows.len(), 2);

    let p = c.refresh();
    let _ = c.complete(p, ok("[]"));
    assert!(c.view().rows.is_empty());
    assert_eq!(c.view().list_html, "");
}

#[test]
fn list_failure_keeps_stale_rows() {
    let mut c = controller();
    let p = c.refresh();
    let _ = c.complete(p, ok(ONE_BOOK));

    let p = c.refresh();
    let _ = c.complete(p, status(500, "database down"));

    assert_eq!(c.view().rows.len(), 1);
    assert_eq!(c.view().renders, 1);
    assert!(c.view().error.visible);
    assert_eq!(
        c.view().error.text,
        "Failed to fetch the book list: database down"
    );
}

#[test]
fn list_decode_failure_surfaces_error() {
    let mut c = controller();
    let p = c.refresh();
    let _ = c.complete(p, ok("<html>oops</html>"));
    assert!(c.view().error.visible);
    assert!(c.view().error.text.starts_with("Failed to fetch the book list: "));
    assert_eq!(c.view().renders, 0);
}

#[test]
fn transport_failure_surfaces_error() {
    let mut c = controller();
    let p = c.refresh();
    let _ = c.complete(p, Err(ApiError::Transport("connection refused".to_string())));
    assert_eq!(
        c.view().error.text,
        "Failed to fetch the book list: network error: connection refused"
    );
}

// --- create ---

#[test]
fn submit_in_create_mode_issues_create() {
    let mut c = controller();
    fill(&mut c, ["A", "B", "10", "X", "2024-01-01"]);

    let pending = c.submit().unwrap();
    assert_eq!(pending.operation(), Operation::Create);
    let req = pending.request();
    assert_eq!(req.method, HttpMethod::Post);
    assert_eq!(req.path, "http://test/api/books");
    let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
    assert_eq!(
        body,
        serde_json::json!({
            "title": "A",
            "author": "B",
            "price": 10.0,
            "isbn": "X",
            "publishDate": "2024-01-01"
        })
    );

    let refresh = expect_refresh(c.complete(pending, status(201, "{}")));
    assert_eq!(c.mode(), Mode::Create);
    assert!(c.view().form.is_empty());
    assert_eq!(c.view().submit_label, SubmitLabel::Register);

    let _ = c.complete(refresh, ok(TWO_BOOKS));
    assert!(c.view().rows.iter().any(|r| r.title == "A"
        && r.author == "B"
        && r.price == "10"
        && r.isbn == "X"
        && r.publish_date == "2024-01-01"));
    assert_eq!(c.mode(), Mode::Create);
}

#[test]
fn refresh_failure_after_create_stays_visible_on_reset_form() {
    let mut c = controller();
    let p = c.refresh();
    let _ = c.complete(p, ok(ONE_BOOK));
    fill(&mut c, ["A", "B", "10", "X", "2024-01-01"]);

    let create = c.submit().unwrap();
    let refresh = expect_refresh(c.complete(create, status(201, "")));
    assert!(c.complete(refresh, status(500, "database down")).is_none());

    let page = c.view();
    assert!(page.form.is_empty());
    assert_eq!(page.submit_label, SubmitLabel::Register);
    assert_eq!(c.mode(), Mode::Create);
    assert!(page.error.visible);
    assert_eq!(page.error.text, "Failed to fetch the book list: database down");
    assert_eq!(page.rows.len(), 1);
    assert_eq!(page.renders, 1);
}

#[test]
fn create_failure_keeps_form_and_list() {
    let mut c = controller();
    let p = c.refresh();
    let _ = c.complete(p, ok(ONE_BOOK));
    fill(&mut c, ["", "B", "10", "X", "2024-01-01"]);

    let pending = c.submit().unwrap();
    assert!(c.complete(pending, status(400, "title must not be empty")).is_none());

    let page = c.view();
    assert!(page.error.visible);
    assert_eq!(page.error.text, "Failed to register book: title must not be empty");
    assert_eq!(page.form.author, "B");
    assert_eq!(page.form.price, "10");
    assert_eq!(page.renders, 1);
}

#[test]
fn submit_clears_previous_error() {
    let mut c = controller();
    let p = c.refresh();
    let _ = c.complete(p, status(503, ""));
    assert_eq!(c.view().error.text, "Failed to fetch the book list: HTTP 503");

    let _pending = c.submit().unwrap();
    assert!(!c.view().error.visible);
    assert!(c.view().error.text.is_empty());
}

#[test]
fn unparseable_price_is_sent_as_null() {
    let mut c = controller();
    fill(&mut c, ["A", "B", "ten", "X", "D"]);
    let pending = c.submit().unwrap();
    let body: serde_json::Value =
        serde_json::from_str(pending.request().body.as_deref().unwrap()).unwrap();
    assert!(body["price"].is_null());
}

// --- edit mode ---

#[test]
fn edit_click_populates_form_and_switches_label() {
    let mut c = controller();
    let load = c.click(RowAction::Edit(BookId::from(1))).unwrap();
    assert_eq!(load.request().method, HttpMethod::Get);
    assert_eq!(load.request().path, "http://test/api/books/1");

    assert!(c.complete(load, ok(RECORD_T2)).is_none());

    let page = c.view();
    assert_eq!(
        page.form,
        BookForm {
            title: "T2".to_string(),
            author: "Au2".to_string(),
            price: "7.5".to_string(),
            isbn: "I2".to_string(),
            publish_date: "D2".to_string(),
        }
    );
    assert_eq!(page.submit_label, SubmitLabel::Update);
    assert_eq!(c.mode(), Mode::Edit(BookId::from(1)));
}

#[test]
fn control_click_echoes_rendered_id_verbatim() {
    let mut c = controller();
    let p = c.refresh();
    let _ = c.complete(
        p,
        ok(r#"[{"id":"007","title":"T","author":"Au","price":5},{"id":-1,"title":"U","author":"Bu","price":1.5}]"#),
    );
    assert!(c.view().list_html.contains(r#"class="edit-button" data-id="007""#));
    assert!(c.view().list_html.contains(r#"class="delete-button" data-id="-1""#));

    let load = c.click_control("edit-button", Some("007")).unwrap();
    assert_eq!(load.operation(), Operation::Load);
    assert_eq!(load.request().path, "http://test/api/books/007");
    let _ = c.complete(
        load,
        ok(r#"{"id":"007","title":"T","author":"Au","price":5}"#),
    );
    assert_eq!(c.mode(), Mode::Edit(BookId::from("007")));

    let update = c.submit().unwrap();
    assert_eq!(update.request().path, "http://test/api/books/007");

    c.view_mut().confirm_answer = true;
    let delete = c.click_control("delete-button", Some("-1")).unwrap();
    assert_eq!(delete.request().path, "http://test/api/books/-1");
}

#[test]
fn edit_failure_leaves_mode_unchanged() {
    let mut c = controller();
    fill(&mut c, ["draft", "", "", "", ""]);
    let load = c.click(RowAction::Edit(BookId::from(9))).unwrap();
    let _ = c.complete(load, status(404, "book 9 not found"));

    assert_eq!(c.mode(), Mode::Create);
    assert_eq!(c.view().submit_label, SubmitLabel::Register);
    assert_eq!(c.view().form.title, "draft");
    assert_eq!(c.view().error.text, "Failed to load book: book 9 not found");
}

#[test]
fn submit_in_edit_mode_issues_update_never_create() {
    let mut c = editing_one();
    c.view_mut().type_into(FormField::Title, "T3");

    let pending = c.submit().unwrap();
    assert_eq!(pending.operation(), Operation::Update);
    assert_eq!(pending.request().method, HttpMethod::Put);
    assert_eq!(pending.request().path, "http://test/api/books/1");
    let body: serde_json::Value =
        serde_json::from_str(pending.request().body.as_deref().unwrap()).unwrap();
    assert_eq!(body["title"], "T3");
    assert_eq!(body["price"], 7.5);
    assert!(body.get("id").is_none());

    let refresh = expect_refresh(c.complete(pending, ok("{}")));
    assert_eq!(c.mode(), Mode::Create);
    assert!(c.view().form.is_empty());
    assert_eq!(c.view().submit_label, SubmitLabel::Register);
    let _ = c.complete(refresh, ok(ONE_BOOK));
}

#[test]
fn update_failure_stays_in_edit_mode() {
    let mut c = editing_one();
    let pending = c.submit().unwrap();
    assert!(c.complete(pending, status(500, "")).is_none());

    assert_eq!(c.mode(), Mode::Edit(BookId::from(1)));
    assert_eq!(c.view().form.title, "T2");
    assert_eq!(c.view().error.text, "Failed to update book: HTTP 500");
}

#[test]
fn edit_click_on_other_record_overwrites_edit_state() {
    let mut c = editing_one();
    c.view_mut().type_into(FormField::Title, "unsaved");

    let load = c.click(RowAction::Edit(BookId::from(2))).unwrap();
    let _ = c.complete(
        load,
        ok(r#"{"id":2,"title":"A","author":"B","price":10,"isbn":"X","publishDate":"2024-01-01"}"#),
    );

    assert_eq!(c.mode(), Mode::Edit(BookId::from(2)));
    assert_eq!(c.view().form.title, "A");
}

#[test]
fn cancel_always_returns_to_create_mode() {
    let mut c = editing_one();
    c.view_mut().show_error("previous failure");

    c.cancel();

    assert_eq!(c.mode(), Mode::Create);
    assert!(c.view().form.is_empty());
    assert_eq!(c.view().submit_label, SubmitLabel::Register);
    assert!(!c.view().error.visible);

    // and from create mode with a half-filled form
    fill(&mut c, ["a", "b", "1", "c", "d"]);
    c.cancel();
    assert_eq!(c.mode(), Mode::Create);
    assert!(c.view().form.is_empty());
}

// --- delete ---

#[test]
fn declined_delete_issues_nothing() {
    let mut c = controller();
    c.view_mut().confirm_answer = false;

    assert!(c.click(RowAction::Delete(BookId::from(1))).is_none());
    assert_eq!(c.view().prompts, vec![DELETE_PROMPT.to_string()]);
}

#[test]
fn confirmed_delete_then_refresh() {
    let mut c = controller();
    let p = c.refresh();
    let _ = c.complete(p, ok(TWO_BOOKS));
    c.view_mut().confirm_answer = true;

    let pending = c.click(RowAction::Delete(BookId::from(2))).unwrap();
    assert_eq!(pending.operation(), Operation::Delete);
    assert_eq!(pending.request().method, HttpMethod::Delete);
    assert_eq!(pending.request().path, "http://test/api/books/2");

    let refresh = expect_refresh(c.complete(pending, status(204, "")));
    let _ = c.complete(refresh, ok(ONE_BOOK));
    assert_eq!(c.view().rows.len(), 1);
}

#[test]
fn delete_failure_does_not_refresh() {
    let mut c = controller();
    c.view_mut().confirm_answer = true;
    let pending = c.click(RowAction::Delete(BookId::from(5))).unwrap();

    assert!(c.complete(pending, status(404, "book 5 not found")).is_none());
    assert_eq!(c.view().error.text, "Failed to delete book: book 5 not found");
    assert_eq!(c.view().renders, 0);
}

#[test]
fn delete_while_editing_keeps_edit_mode() {
    let mut c = editing_one();
    c.view_mut().confirm_answer = true;
    let pending = c.click(RowAction::Delete(BookId::from(2))).unwrap();
    let refresh = expect_refresh(c.complete(pending, status(204, "")));
    let _ = c.complete(refresh, ok(ONE_BOOK));
    assert_eq!(c.mode(), Mode::Edit(BookId::from(1)));
}

// --- overlapping requests ---

#[test]
fn stale_list_response_is_discarded() {
    let mut c = controller();
    let older = c.refresh();
    let newer = c.refresh();

    let _ = c.complete(newer, ok(TWO_BOOKS));
    let _ = c.complete(older, ok(ONE_BOOK));

    assert_eq!(c.view().rows.len(), 2);
    assert_eq!(c.view().renders, 1);
}

#[test]
fn stale_list_failure_is_discarded() {
    let mut c = controller();
    let older = c.refresh();
    let newer = c.refresh();
    let _ = c.complete(newer, ok(ONE_BOOK));
    let _ = c.complete(older, status(500, "late"));
    assert!(!c.view().error.visible);
}

#[test]
fn superseded_edit_load_is_discarded() {
    let mut c = controller();
    let first = c.click(RowAction::Edit(BookId::from(1))).unwrap();
    let second = c.click(RowAction::Edit(BookId::from(2))).unwrap();

    let _ = c.complete(
        second,
        ok(r#"{"id":2,"title":"A","author":"B","price":10,"isbn":"X","publishDate":"2024-01-01"}"#),
    );
    let _ = c.complete(first, ok(RECORD_T2));

    assert_eq!(c.mode(), Mode::Edit(BookId::from(2)));
    assert_eq!(c.view().form.title, "A");
}

#[test]
fn edit_load_after_cancel_does_not_enter_edit_mode() {
    let mut c = controller();
    let load = c.click(RowAction::Edit(BookId::from(1))).unwrap();
    c.cancel();
    let _ = c.complete(load, ok(RECORD_T2));

    assert_eq!(c.mode(), Mode::Create);
    assert!(c.view().form.is_empty());
    assert_eq!(c.view().submit_label, SubmitLabel::Register);
}

#[test]
fn mutation_refresh_supersedes_earlier_list_fetch() {
    let mut c = controller();
    let initial = c.refresh();
    fill(&mut c, ["A", "B", "10", "X", "2024-01-01"]);
    let create = c.submit().unwrap();
    let refresh = expect_refresh(c.complete(create, status(201, "")));

    let _ = c.complete(refresh, ok(TWO_BOOKS));
    let _ = c.complete(initial, ok("[]"));
    assert_eq!(c.view().rows.len(), 2);
}
