//! Line-based command loop.
//!
//! Each command maps to exactly one controller handler; the handler's
//! pending request (and any follow-up refresh) is executed before the next
//! line is read.

use std::io::{BufRead, Write};
use std::str::FromStr;

use catalog_core::{
    BookId, CatalogController, FormField, Operation, RowAction, Transport, UnknownField,
};
use thiserror::Error;
use tracing::debug;

use crate::terminal::TerminalView;

pub const HELP: &str = "\
commands:
  list                     reload the book list
  show                     print the form
  set <field> <value>      fill a form field (title, author, price, isbn, publishDate)
  submit                   register, or update the book being edited
  cancel                   clear the form and leave edit mode
  edit <id>                load a book into the form
  delete <id>              delete a book (asks first)
  help                     this text
  quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Show,
    Set(FormField, String),
    Submit,
    Cancel,
    Edit(BookId),
    Delete(BookId),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command `{0}` (try `help`)")]
    Unknown(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    #[error(transparent)]
    Field(#[from] UnknownField),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim_start()),
            None => (line, ""),
        };
        let id = |name: &'static str| {
            if rest.is_empty() {
                Err(CommandError::MissingArgument(name))
            } else {
                Ok(BookId::from_attr(rest))
            }
        };
        match word {
            "list" | "ls" => Ok(Command::List),
            "show" => Ok(Command::Show),
            "set" => {
                let (field, value) = match rest.split_once(char::is_whitespace) {
                    Some((field, value)) => (field, value.trim_start()),
                    None => (rest, ""),
                };
                if field.is_empty() {
                    return Err(CommandError::MissingArgument("set"));
                }
                Ok(Command::Set(field.parse()?, value.to_string()))
            }
            "submit" => Ok(Command::Submit),
            "cancel" => Ok(Command::Cancel),
            "edit" => id("edit").map(Command::Edit),
            "delete" | "rm" => id("delete").map(Command::Delete),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

/// Load the list, then serve commands until `quit` or end of input.
pub fn run<R, W, T>(
    controller: &mut CatalogController<TerminalView<R, W>>,
    transport: &T,
) -> anyhow::Result<()>
where
    R: BufRead,
    W: Write,
    T: Transport + ?Sized,
{
    let pending = controller.refresh();
    controller.run(transport, Some(pending));

    loop {
        controller.view_mut().prompt();
        let Some(line) = controller.view_mut().read_line()? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                controller.view_mut().say(format_args!("{err}"));
                continue;
            }
        };
        debug!(?command, "dispatching");

        let pending = match command {
            Command::List => Some(controller.refresh()),
            Command::Show => {
                controller.view_mut().print_form();
                None
            }
            Command::Set(field, value) => {
                controller.view_mut().set_field(field, &value);
                None
            }
            Command::Submit => controller.submit(),
            Command::Cancel => {
                controller.cancel();
                None
            }
            Command::Edit(id) => controller.click(RowAction::Edit(id)),
            Command::Delete(id) => controller.click(RowAction::Delete(id)),
            Command::Help => {
                controller.view_mut().say(format_args!("{HELP}"));
                None
            }
            Command::Quit => break,
        };
        let loads_record = matches!(pending.as_ref().map(|p| p.operation()), Some(Operation::Load));
        controller.run(transport, pending);
        if loads_record {
            controller.view_mut().print_form();
        }
    }
    Ok(())
}
