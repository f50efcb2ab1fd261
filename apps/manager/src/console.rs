//! # Console
//!
//! Line commands standing in for the clicks of the products page.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Console Commands                                │
//! │                                                                         │
//! │  list                    show the displayed products                   │
//! │  search <term>           debounced title search                        │
//! │  clear                   clear the search                              │
//! │  new | edit <id>         open the product form                         │
//! │  set <field> <value>     fill a form field                             │
//! │  save | cancel           submit or close the form                      │
//! │  delete <id>             ask to delete a product                       │
//! │  confirm | dismiss       answer the delete dialog                      │
//! │  toasts                  show active notifications                     │
//! │  reload                  load products again                           │
//! │  help | quit                                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt::Write as _;
use std::str::FromStr;

use catalog_core::text::truncate_default;
use catalog_core::Product;
use catalog_store::{ModalData, Toast};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::debug;

use crate::commands::manager::{CANCEL_ACTION, CONFIRM_ACTION};
use crate::commands::{FormField, ProductForm, ProductsManager};
use crate::error::{AppError, AppResult};

pub const HELP: &str = "\
Commands:
  list                  show products
  search <term>         search products by title
  clear                 clear the search
  new                   open an empty product form
  edit <id>             edit a product
  set <field> <value>   set title, price, category, image or description
  save                  save the open form
  cancel                close the open form
  delete <id>           delete a product (asks for confirmation)
  confirm | dismiss     answer the confirmation dialog
  toasts                show notifications
  reload                load products again
  help                  show this help
  quit                  exit";

// =============================================================================
// Commands
// =============================================================================

/// A parsed console line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    List,
    Search(String),
    Clear,
    New,
    Edit(u64),
    Set(FormField, String),
    Save,
    Cancel,
    Delete(u64),
    Confirm,
    Dismiss,
    Toasts,
    Reload,
    Help,
    Quit,
}

fn parse_id(arg: &str) -> AppResult<u64> {
    arg.trim()
        .parse()
        .map_err(|_| AppError::invalid_command(format!("'{}' is not a product id", arg.trim())))
}

impl FromStr for Command {
    type Err = AppError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };

        let command = match name.to_lowercase().as_str() {
            "list" | "ls" => Command::List,
            "search" => Command::Search(rest.to_string()),
            "clear" => Command::Clear,
            "new" => Command::New,
            "edit" => Command::Edit(parse_id(rest)?),
            "set" => {
                let (field, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                if field.is_empty() {
                    return Err(AppError::invalid_command("Usage: set <field> <value>"));
                }
                Command::Set(field.parse()?, value.trim().to_string())
            }
            "save" => Command::Save,
            "cancel" => Command::Cancel,
            "delete" | "rm" => Command::Delete(parse_id(rest)?),
            "confirm" | "yes" => Command::Confirm,
            "dismiss" | "no" => Command::Dismiss,
            "toasts" => Command::Toasts,
            "reload" | "retry" => Command::Reload,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            "" => return Err(AppError::invalid_command("Empty command")),
            other => {
                return Err(AppError::invalid_command(format!(
                    "Unknown command '{}'. Type 'help' for a list of commands",
                    other
                )))
            }
        };

        Ok(command)
    }
}

/// Result of one console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Output(String),
    Quit,
}

// =============================================================================
// Console
// =============================================================================

/// The manager page as a console session.
#[derive(Debug)]
pub struct Console {
    manager: ProductsManager,
    form: Option<ProductForm>,
}

impl Console {
    pub fn new(manager: ProductsManager) -> Self {
        Console {
            manager,
            form: None,
        }
    }

    pub fn manager(&self) -> &ProductsManager {
        &self.manager
    }

    /// The open product form, if any.
    pub fn form(&self) -> Option<&ProductForm> {
        self.form.as_ref()
    }

    /// Parses and runs one line.
    pub async fn execute_line(&mut self, line: &str) -> AppResult<Outcome> {
        let command = line.parse()?;
        self.execute(command).await
    }

    pub async fn execute(&mut self, command: Command) -> AppResult<Outcome> {
        debug!(?command, "Console command");

        let output = match command {
            Command::List => self.render_products(),
            Command::Search(term) => {
                let message = format!("Searching for \"{}\"...", term);
                self.manager.search(term);
                message
            }
            Command::Clear => {
                self.manager.clear_search_products();
                self.render_products()
            }
            Command::New => {
                self.manager.handle_new_product();
                self.open_form(None)
            }
            Command::Edit(id) => {
                let product = self.manager.handle_edit_product_by_id(id)?;
                self.open_form(Some(product))
            }
            Command::Set(field, value) => {
                let categories = self.manager.context().products.categories();
                let form = self.form.as_mut().ok_or_else(no_form)?;
                form.set(field, value);
                render_form(form, &categories)
            }
            Command::Save => {
                let form = self.form.as_ref().ok_or_else(no_form)?;
                let product = form.submit()?;
                self.manager.on_save_product(product).await?;
                self.form = None;
                format!("{}\n{}", self.render_toasts(), self.render_products())
            }
            Command::Cancel => {
                self.form.as_ref().ok_or_else(no_form)?;
                self.manager.on_cancel_action_product();
                self.form = None;
                "Form closed.".to_string()
            }
            Command::Delete(id) => {
                let data = self.manager.handle_delete_product_by_id(id)?;
                render_modal(&data)
            }
            Command::Confirm => self.answer_dialog(CONFIRM_ACTION).await?,
            Command::Dismiss => self.answer_dialog(CANCEL_ACTION).await?,
            Command::Toasts => self.render_toasts(),
            Command::Reload => {
                self.manager.on_retry_load_products().await;
                format!("{}\n{}", self.render_toasts(), self.render_products())
            }
            Command::Help => HELP.to_string(),
            Command::Quit => return Ok(Outcome::Quit),
        };

        Ok(Outcome::Output(output))
    }

    async fn answer_dialog(&self, action: &str) -> AppResult<String> {
        if !self.manager.context().modal.is_open() {
            return Err(AppError::invalid_command("No dialog is open"));
        }
        self.manager.confirm_modal(Some(action));
        self.manager.wait_pending().await;
        Ok(self.render_toasts())
    }

    fn open_form(&mut self, editing: Option<Product>) -> String {
        let form = ProductForm::new(editing);
        let rendered = render_form(&form, &self.manager.context().products.categories());
        self.form = Some(form);
        rendered
    }

    fn render_products(&self) -> String {
        let ctx = self.manager.context();
        let mut out = String::new();

        if ctx.skeleton.is_loading() {
            out.push_str("Loading...\n");
        }

        let term = ctx.products.search_term();
        if !term.is_empty() {
            let _ = writeln!(out, "Search: \"{}\"", term);
        }

        if !ctx.products.data_loaded() {
            out.push_str("Products could not be loaded. Type 'reload' to try again.");
            return out;
        }

        let products = ctx.products.products();
        if products.is_empty() {
            out.push_str("No products found.");
            return out;
        }

        for product in &products {
            let _ = writeln!(
                out,
                "#{:<4} {:<40} {:>10.2}  [{}]  {}",
                product.id.map(|id| id.to_string()).unwrap_or_default(),
                truncate_default(&product.title),
                product.price,
                product.category.label(),
                truncate_default(&product.description),
            );
        }
        let _ = write!(out, "{} product(s)", products.len());
        out
    }

    fn render_toasts(&self) -> String {
        render_toasts(&self.manager.context().toast.toasts())
    }
}

fn no_form() -> AppError {
    AppError::invalid_command("No product form is open. Use 'new' or 'edit <id>'")
}

fn render_form(form: &ProductForm, categories: &[catalog_core::Category]) -> String {
    let options: Vec<_> = ProductForm::category_options(categories)
        .into_iter()
        .map(|option| option.label)
        .collect();

    format!(
        "{}\n  title:       {}\n  price:       {}\n  category:    {}\n  image:       {}\n  description: {}\n  categories:  {}\nType 'save' to {}.",
        form.form_title(),
        form.title,
        form.price,
        form.category,
        form.image,
        form.description,
        options.join(", "),
        form.action_label().to_lowercase(),
    )
}

fn render_modal(data: &ModalData) -> String {
    let buttons: Vec<_> = data
        .buttons
        .iter()
        .map(|button| {
            let command = if button.action == CONFIRM_ACTION {
                "confirm"
            } else {
                "dismiss"
            };
            format!("{} ({})", button.label, command)
        })
        .collect();

    format!("{}\n{}\n{}", data.title, data.content, buttons.join(" | "))
}

fn render_toasts(toasts: &[Toast]) -> String {
    if toasts.is_empty() {
        return "No notifications.".to_string();
    }

    toasts
        .iter()
        .map(|toast| format!("[{}] {}", toast.kind, toast.message))
        .collect::<Vec<_>>()
        .join("\n")
}

// =============================================================================
// Stdin Loop
// =============================================================================

/// Reads commands from stdin until `quit` or end of input.
pub async fn run_loop(console: &mut Console) -> AppResult<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    stdout.write_all(b"Type 'help' for commands.\n> ").await?;
    stdout.flush().await?;

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            stdout.write_all(b"> ").await?;
            stdout.flush().await?;
            continue;
        }

        let text = match console.execute_line(&line).await {
            Ok(Outcome::Output(text)) => text,
            Ok(Outcome::Quit) => break,
            Err(AppError::Io(error)) => return Err(AppError::Io(error)),
            Err(error) => format!("Error: {}", error),
        };

        stdout.write_all(text.as_bytes()).await?;
        stdout.write_all(b"\n> ").await?;
        stdout.flush().await?;
    }

    Ok(())
}
