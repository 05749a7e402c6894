//! List rendering: one row per book, as display values and as HTML.

use crate::types::{format_price, Book, BookId};

pub const EDIT_CLASS: &str = "edit-button";
pub const DELETE_CLASS: &str = "delete-button";

/// Display values for one rendered row. Both controls carry `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRow {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub price: String,
    pub isbn: String,
    pub publish_date: String,
}

impl BookRow {
    pub fn from_book(book: &Book) -> Self {
        Self {
            id: book.id.clone(),
            title: book.title.clone(),
            author: book.author.clone(),
            price: format_price(book.price),
            isbn: book.isbn.clone(),
            publish_date: book.publish_date.clone(),
        }
    }

    /// Single-line plain-text rendition.
    pub fn to_line(&self) -> String {
        format!(
            "[{}] {} by {} - {} | ISBN: {}, published: {}",
            self.id, self.title, self.author, self.price, self.isbn, self.publish_date
        )
    }

    /// `<li>` markup for the row. All record text is escaped.
    pub fn to_html(&self) -> String {
        let id = escape_html(&self.id.to_string());
        format!(
            concat!(
                "<li>",
                "<div class=\"book-info\"><strong>{title}</strong> by {author} - {price}<br>",
                "ISBN: {isbn}, published: {date}</div>",
                "<div class=\"book-actions\">",
                "<button class=\"{edit}\" data-id=\"{id}\">edit</button>",
                "<button class=\"{delete}\" data-id=\"{id}\">delete</button>",
                "</div></li>"
            ),
            title = escape_html(&self.title),
            author = escape_html(&self.author),
            price = escape_html(&self.price),
            isbn = escape_html(&self.isbn),
            date = escape_html(&self.publish_date),
            edit = EDIT_CLASS,
            delete = DELETE_CLASS,
            id = id,
        )
    }
}

pub fn render_rows(books: &[Book]) -> Vec<BookRow> {
    books.iter().map(BookRow::from_book).collect()
}

/// Markup for the list's children; the empty list renders as "".
pub fn render_list_html(rows: &[BookRow]) -> String {
    rows.iter().map(BookRow::to_html).collect()
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
