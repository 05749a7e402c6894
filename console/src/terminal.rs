//! A `View` that draws the catalog as text lines.

use std::fmt;
use std::io::{self, BufRead, Write};

use catalog_core::render::render_rows;
use catalog_core::{Book, BookForm, FormField, SubmitLabel, View};
use tracing::warn;

pub struct TerminalView<R, W> {
    input: R,
    out: W,
    form: BookForm,
    label: SubmitLabel,
    error: Option<String>,
}

impl<R: BufRead, W: Write> TerminalView<R, W> {
    pub fn new(input: R, out: W) -> Self {
        Self {
            input,
            out,
            form: BookForm::default(),
            label: SubmitLabel::default(),
            error: None,
        }
    }

    /// Next input line without its terminator; `None` at end of input.
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    pub fn set_field(&mut self, field: FormField, value: &str) {
        self.form.set(field, value);
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn submit_label(&self) -> SubmitLabel {
        self.label
    }

    pub fn form(&self) -> &BookForm {
        &self.form
    }

    /// Print the form, the submit label and the banner if visible.
    pub fn print_form(&mut self) {
        for field in FormField::ALL {
            let line = format!("  {:<12}{}", field.name(), self.form.get(field));
            self.emit(format_args!("{line}"));
        }
        let label = self.label;
        self.emit(format_args!("  [{label}] [cancel]"));
        if let Some(message) = self.error.clone() {
            self.emit(format_args!("error: {message}"));
        }
    }

    pub fn prompt(&mut self) {
        self.emit_inline(format_args!("> "));
    }

    pub fn say(&mut self, args: fmt::Arguments<'_>) {
        self.emit(args);
    }

    pub fn into_output(self) -> W {
        self.out
    }

    fn emit(&mut self, args: fmt::Arguments<'_>) {
        if let Err(err) = writeln!(self.out, "{args}") {
            warn!(error = %err, "failed to write to terminal");
        }
    }

    /// Write without a line break and flush, for text the user answers on
    /// the same line.
    fn emit_inline(&mut self, args: fmt::Arguments<'_>) {
        if let Err(err) = self.out.write_fmt(args).and_then(|()| self.out.flush()) {
            warn!(error = %err, "failed to write to terminal");
        }
    }
}

impl<R: BufRead, W: Write> View for TerminalView<R, W> {
    fn render_books(&mut self, books: &[Book]) {
        if books.is_empty() {
            self.emit(format_args!("(no books)"));
            return;
        }
        for row in render_rows(books) {
            self.emit(format_args!("{}", row.to_line()));
        }
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
        self.label = label;
    }

    fn show_error(&mut self, message: &str) {
        self.error = Some(message.to_string());
        self.emit(format_args!("error: {message}"));
    }

    fn clear_error(&mut self) {
        self.error = None;
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        self.emit_inline(format_args!("{prompt} [y/N] "));
        match self.read_line() {
            Ok(Some(answer)) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Ok(None) => false,
            Err(err) => {
                warn!(error = %err, "failed to read confirmation");
                false
            }
        }
    }
}
