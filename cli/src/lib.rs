//! Command-line host for the wishlist form.
//!
//! Each invocation presses one button: the form is loaded (from `--state`
//! when given), the field flags are typed in, the trigger runs through a
//! [`Session`] over [`UreqTransport`], and the resulting view is returned
//! and saved back.

pub mod args;
pub mod transport;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;
use wishlist_core::{FormField, FormState, Session, Trigger, ViewState, WishlistClient};

pub use args::{Cli, Command, FieldArgs};
pub use transport::UreqTransport;

/// Run one command and return the view it left behind.
pub fn run(cli: &Cli) -> Result<ViewState> {
    let mut form = match &cli.state {
        Some(path) => load_form(path)?,
        None => FormState::default(),
    };
    cli.fields.apply(&mut form);

    let trigger = Trigger::from(cli.command);
    info!(trigger = trigger.name(), base_url = %cli.base_url, "pressing");
    let mut session = Session::new(WishlistClient::new(&cli.base_url), UreqTransport::new()).with_form(form);
    session.trigger(trigger);
    let state = session.into_state();

    if let Some(path) = &cli.state {
        save_form(path, &state.form)?;
    }
    Ok(state)
}

/// Read the saved form. A missing file is an empty form.
pub fn load_form(path: &Path) -> Result<FormState> {
    if !path.exists() {
        return Ok(FormState::default());
    }
    let raw = fs::read_to_string(path).with_context(|| format!("reading form state from {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing form state in {}", path.display()))
}

pub fn save_form(path: &Path, form: &FormState) -> Result<()> {
    let raw = serde_json::to_string_pretty(form)?;
    fs::write(path, raw).with_context(|| format!("writing form state to {}", path.display()))
}

/// Human-readable view: status line, the form, then the result table.
pub fn render(state: &ViewState) -> String {
    let mut out = String::new();
    if !state.status.is_empty() {
        out.push_str(&state.status);
        out.push('\n');
    }
    for field in FormField::ALL {
        out.push_str(&format!("{:<12} {}\n", field.key(), state.form.get(field)));
    }
    if let Some(table) = &state.results {
        out.push_str(table);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_lists_status_and_fields() {
        let state = ViewState {
            form: FormState {
                id: "7".to_string(),
                title: "Book".to_string(),
                ..Default::default()
            },
            status: "Success".to_string(),
            results: None,
        };
        let text = render(&state);
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Success"));
        assert_eq!(lines.next(), Some("id           7"));
        assert!(text.contains("title        Book"));
        assert!(!text.contains("<table"));
    }

    #[test]
    fn render_skips_empty_status() {
        let text = render(&ViewState::default());
        assert!(text.starts_with("id"));
    }

    #[test]
    fn form_state_round_trips_through_file() {
        let path = std::env::temp_dir().join(format!("wishlist-form-{}.json", std::process::id()));
        let form = FormState {
            id: "3".to_string(),
            date: "2024-01-31".to_string(),
            ..Default::default()
        };
        save_form(&path, &form).unwrap();
        assert_eq!(load_form(&path).unwrap(), form);
        fs::remove_file(&path).unwrap();
        assert_eq!(load_form(&path).unwrap(), FormState::default());
    }
}
