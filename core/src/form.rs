//! The wishlist form: raw text per field, as the user typed it.
//!
//! # Design
//! Every field is a `String`, including the numeric ones, because the form
//! must be able to hold whatever was typed. Typing happens when a request is
//! built: [`FormState::to_input`] and [`FormState::wishlist_id`] reject
//! values that do not parse, and the caller turns that into a status message
//! instead of a network call.

use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::query::SearchFilters;
use crate::types::{Wishlist, WishlistInput};

/// One input of the wishlist form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Id,
    Title,
    Description,
    UserId,
    Count,
    Date,
}

impl FormField {
    pub const ALL: [FormField; 6] = [
        FormField::Id,
        FormField::Title,
        FormField::Description,
        FormField::UserId,
        FormField::Count,
        FormField::Date,
    ];

    /// Everything except the identifier.
    pub const EDITABLE: [FormField; 5] = [
        FormField::Title,
        FormField::Description,
        FormField::UserId,
        FormField::Count,
        FormField::Date,
    ];

    /// Record key for this field.
    pub fn key(self) -> &'static str {
        match self {
            FormField::Id => "id",
            FormField::Title => "title",
            FormField::Description => "description",
            FormField::UserId => "user_id",
            FormField::Count => "count",
            FormField::Date => "date",
        }
    }

    /// Element id of the input in the HTML form.
    pub fn element_id(self) -> &'static str {
        match self {
            FormField::Id => "wishlist_id",
            FormField::Title => "wishlist_title",
            FormField::Description => "wishlist_description",
            FormField::UserId => "wishlist_user_id",
            FormField::Count => "wishlist_count",
            FormField::Date => "wishlist_date",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormState {
    pub id: String,
    pub title: String,
    pub description: String,
    pub user_id: String,
    pub count: String,
    pub date: String,
}

impl FormState {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Id => &self.id,
            FormField::Title => &self.title,
            FormField::Description => &self.description,
            FormField::UserId => &self.user_id,
            FormField::Count => &self.count,
            FormField::Date => &self.date,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::Id => &mut self.id,
            FormField::Title => &mut self.title,
            FormField::Description => &mut self.description,
            FormField::UserId => &mut self.user_id,
            FormField::Count => &mut self.count,
            FormField::Date => &mut self.date,
        };
        *slot = value.into();
    }

    /// Overwrite every field, identifier included, from a record.
    pub fn fill(&mut self, wishlist: &Wishlist) {
        self.id = wishlist.id.to_string();
        self.title = wishlist.title.clone();
        self.description = wishlist.description.clone();
        self.user_id = wishlist.user_id.map(|n| n.to_string()).unwrap_or_default();
        self.count = wishlist.count.map(|n| n.to_string()).unwrap_or_default();
        self.date = wishlist.date.clone();
    }

    /// Empty the editable fields; the identifier stays.
    pub fn clear_fields(&mut self) {
        for field in FormField::EDITABLE {
            self.set(field, String::new());
        }
    }

    pub fn clear_all(&mut self) {
        *self = FormState::default();
    }

    pub fn fields_empty(&self) -> bool {
        FormField::EDITABLE.iter().all(|f| self.get(*f).is_empty())
    }

    /// The identifier as a number. Blank means "not created yet".
    pub fn wishlist_id(&self) -> Result<u64, ApiError> {
        let raw = self.id.trim();
        if raw.is_empty() {
            return Err(ApiError::MissingId);
        }
        parse_number(FormField::Id, raw)
    }

    /// Typed payload from the editable fields. A blank number is omitted;
    /// one that does not parse is an error.
    pub fn to_input(&self) -> Result<WishlistInput, ApiError> {
        Ok(WishlistInput {
            title: self.title.clone(),
            description: self.description.clone(),
            user_id: parse_optional(FormField::UserId, &self.user_id)?,
            count: parse_optional(FormField::Count, &self.count)?,
            date: self.date.trim().to_string(),
        })
    }

    pub fn search_filters(&self) -> SearchFilters {
        SearchFilters {
            title: Some(self.title.clone()),
            description: Some(self.description.clone()),
            user_id: Some(self.user_id.clone()),
        }
    }
}

fn parse_optional<T: std::str::FromStr>(field: FormField, raw: &str) -> Result<Option<T>, ApiError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    parse_number(field, raw).map(Some)
}

fn parse_number<T: std::str::FromStr>(field: FormField, raw: &str) -> Result<T, ApiError> {
    raw.parse().map_err(|_| ApiError::InvalidField {
        field: field.key(),
        value: raw.to_string(),
    })
}
