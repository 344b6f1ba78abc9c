//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use wishlist_core::{FormField, FormState, Trigger, WishlistAction};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000";

#[derive(Parser, Debug)]
#[command(name = "wishlist", version, about = "Drive the wishlist form from the command line")]
pub struct Cli {
    /// Root URL of the wishlist service.
    #[arg(long, env = "WISHLIST_BASE_URL", default_value = DEFAULT_BASE_URL, global = true)]
    pub base_url: String,

    /// JSON file holding the form between runs.
    #[arg(long, global = true)]
    pub state: Option<PathBuf>,

    #[command(flatten)]
    pub fields: FieldArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Field values typed into the form before the button is pressed.
#[derive(Args, Debug, Default, Clone)]
pub struct FieldArgs {
    #[arg(long, global = true)]
    pub id: Option<String>,
    #[arg(long, global = true)]
    pub title: Option<String>,
    #[arg(long, global = true)]
    pub description: Option<String>,
    #[arg(long, global = true)]
    pub user_id: Option<String>,
    #[arg(long, global = true)]
    pub count: Option<String>,
    #[arg(long, global = true)]
    pub date: Option<String>,
}

impl FieldArgs {
    /// Overwrite every field that was given on the command line.
    pub fn apply(&self, form: &mut FormState) {
        let given = [
            (FormField::Id, &self.id),
            (FormField::Title, &self.title),
            (FormField::Description, &self.description),
            (FormField::UserId, &self.user_id),
            (FormField::Count, &self.count),
            (FormField::Date, &self.date),
        ];
        for (field, value) in given {
            if let Some(value) = value {
                form.set(field, value.as_str());
            }
        }
    }
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Create a wishlist from the form.
    Create,
    /// Update the wishlist named by `--id`.
    Update,
    /// Load the wishlist named by `--id` into the form.
    Retrieve,
    /// Delete the wishlist named by `--id`.
    Delete,
    /// List wishlists matching the title, description and user id fields.
    Search,
    /// Copy the wishlist named by `--id`.
    Duplicate,
    /// Remove every item from the wishlist named by `--id`.
    Clear,
    /// Empty the form without contacting the service.
    ClearForm,
}

impl From<Command> for Trigger {
    fn from(command: Command) -> Self {
        match command {
            Command::Create => Trigger::Create,
            Command::Update => Trigger::Update,
            Command::Retrieve => Trigger::Retrieve,
            Command::Delete => Trigger::Delete,
            Command::Search => Trigger::Search,
            Command::Duplicate => Trigger::Action(WishlistAction::Duplicate),
            Command::Clear => Trigger::Action(WishlistAction::Clear),
            Command::ClearForm => Trigger::ClearForm,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fields_after_command() {
        let cli = Cli::try_parse_from([
            "wishlist",
            "--base-url",
            "http://localhost:9000",
            "create",
            "--title",
            "Book",
            "--user-id",
            "3",
        ])
        .unwrap();
        assert_eq!(cli.base_url, "http://localhost:9000");
        assert_eq!(cli.command, Command::Create);
        assert_eq!(cli.fields.title.as_deref(), Some("Book"));
        assert_eq!(cli.fields.user_id.as_deref(), Some("3"));
        assert!(cli.state.is_none());
    }

    #[test]
    fn kebab_case_commands() {
        let cli = Cli::try_parse_from(["wishlist", "clear-form"]).unwrap();
        assert_eq!(Trigger::from(cli.command), Trigger::ClearForm);
        let cli = Cli::try_parse_from(["wishlist", "duplicate", "--id", "4"]).unwrap();
        assert_eq!(Trigger::from(cli.command), Trigger::Action(WishlistAction::Duplicate));
    }

    #[test]
    fn missing_command_is_an_error() {
        assert!(Cli::try_parse_from(["wishlist", "--title", "Book"]).is_err());
    }

    #[test]
    fn apply_only_overwrites_given_fields() {
        let mut form = FormState {
            title: "Old".to_string(),
            description: "Kept".to_string(),
            ..Default::default()
        };
        let fields = FieldArgs {
            title: Some("New".to_string()),
            id: Some(String::new()),
            ..Default::default()
        };
        fields.apply(&mut form);
        assert_eq!(form.title, "New");
        assert_eq!(form.description, "Kept");
        assert_eq!(form.id, "");
    }
}
