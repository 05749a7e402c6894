//! Headless in-memory `View`.
//!
//! Holds the same state a browser page would (form inputs, rendered list,
//! banner, button label) as plain fields. Used by tests and by hosts that
//! render the state themselves.

use crate::form::{BookForm, FormField};
use crate::render::{render_list_html, render_rows, BookRow};
use crate::types::Book;
use crate::view::{RowAction, SubmitLabel, View};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorBanner {
    pub text: String,
    pub visible: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Page {
    pub form: BookForm,
    pub submit_label: SubmitLabel,
    pub error: ErrorBanner,
    pub rows: Vec<BookRow>,
    pub list_html: String,
    /// Answer returned by the next `confirm` calls.
    pub confirm_answer: bool,
    /// Every prompt shown so far.
    pub prompts: Vec<String>,
    /// Number of times the list has been rendered.
    pub renders: usize,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate typing into one input.
    pub fn type_into(&mut self, field: FormField, value: &str) {
        self.form.set(field, value);
    }

    /// The actions reachable from the rendered controls, in row order.
    pub fn controls(&self) -> Vec<RowAction> {
        self.rows
            .iter()
            .flat_map(|row| [RowAction::Edit(row.id.clone()), RowAction::Delete(row.id.clone())])
            .collect()
    }
}

impl View for Page {
    fn render_books(&mut self, books: &[Book]) {
        self.rows = render_rows(books);
        self.list_html = render_list_html(&self.rows);
        self.renders += 1;
    }

    fn read_form(&self) -> BookForm {
        self.form.clone()
    }

    fn fill_form(&mut self, form: &BookForm) {
        self.form = form.clone();
    }

    fn clear_form(&mut self) {
        self.form = BookForm::default();
    }

    fn set_submit_label(&mut self, label: SubmitLabel) {
        self.submit_label = label;
    }

    fn show_error(&mut self, message: &str) {
        self.error = ErrorBanner {
            text: message.to_string(),
            visible: true,
        };
    }

    fn clear_error(&mut self) {
        self.error = ErrorBanner::default();
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        self.prompts.push(prompt.to_string());
        self.confirm_answer
    }
}
