//! The seam between the controller and whatever displays the catalog.
//!
//! # Design
//! A `View` owns the form inputs, the list area, the error banner and the
//! submit button label. The controller never reads or writes presentation
//! state except through this trait, so a browser DOM, a terminal and the
//! headless `Page` are interchangeable.

use std::fmt;

use crate::form::BookForm;
use crate::render::{DELETE_CLASS, EDIT_CLASS};
use crate::types::{Book, BookId};

/// Label of the submit button; doubles as the visible mode indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitLabel {
    #[default]
    Register,
    Update,
}

impl SubmitLabel {
    pub fn text(self) -> &'static str {
        match self {
            SubmitLabel::Register => "register",
            SubmitLabel::Update => "update",
        }
    }
}

impl fmt::Display for SubmitLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// A click on one of a row's controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowAction {
    Edit(BookId),
    Delete(BookId),
}

impl RowAction {
    /// Decode a click on a rendered control from its class and `data-id`.
    /// Clicks anywhere else in the list yield `None`.
    pub(crate) fn from_control(class_list: &str, data_id: Option<&str>) -> Option<Self> {
        let id = BookId::from_attr(data_id?);
        let mut classes = class_list.split_whitespace();
        if classes.clone().any(|c| c == DELETE_CLASS) {
            Some(RowAction::Delete(id))
        } else if classes.any(|c| c == EDIT_CLASS) {
            Some(RowAction::Edit(id))
        } else {
            None
        }
    }
}

pub trait View {
    /// Replace the whole list display with `books`.
    fn render_books(&mut self, books: &[Book]);

    fn read_form(&self) -> BookForm;

    fn fill_form(&mut self, form: &BookForm);

    /// Empty every form input.
    fn clear_form(&mut self);

    fn set_submit_label(&mut self, label: SubmitLabel);

    /// Replace the banner text and make it visible.
    fn show_error(&mut self, message: &str);

    /// Hide the banner and empty its text.
    fn clear_error(&mut self);

    /// Blocking yes/no question.
    fn confirm(&mut self, prompt: &str) -> bool;
}
