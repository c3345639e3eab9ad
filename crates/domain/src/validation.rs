//! Server-side validation of the add-product form.
//!
//! Each field is checked on its own; one field failing never hides the
//! error of another. The result is an [`ErrorSet`] holding at most one
//! message per field, empty when the submission is acceptable.

use std::collections::BTreeMap;

use serde::Deserialize;
use thiserror::Error;

use crate::product::{Category, NewProduct, Price};

pub const NAME_REQUIRED: &str = "Please enter a product name.";
pub const DESCRIPTION_REQUIRED: &str = "Please add a short description.";
pub const PRICE_REQUIRED: &str = "Price is required.";
pub const PRICE_NOT_POSITIVE: &str = "Price must be a positive number.";
pub const CATEGORY_REQUIRED: &str = "Choose a category.";
pub const CATEGORY_NOT_LISTED: &str = "Choose a category from the list.";

/// A field of the add-product form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Description,
    Price,
    Category,
}

impl Field {
    /// All fields in form order.
    pub const ALL: [Field; 4] = [Field::Name, Field::Description, Field::Price, Field::Category];

    /// The form field name as submitted by the browser.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Description => "description",
            Field::Price => "price",
            Field::Category => "category",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field-keyed validation messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{} form field(s) failed validation", .messages.len())]
pub struct ErrorSet {
    messages: BTreeMap<Field, &'static str>,
}

impl ErrorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `message` for `field`, replacing any earlier message.
    pub fn insert(&mut self, field: Field, message: &'static str) {
        self.messages.insert(field, message);
    }

    /// Returns the message for `field`, if it failed.
    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.messages.get(&field).copied()
    }

    pub fn contains(&self, field: Field) -> bool {
        self.messages.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Iterates failing fields in form order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
        self.messages.iter().map(|(field, message)| (*field, *message))
    }
}

/// Form body exactly as posted. A field the browser left out is `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RawProductForm {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub category: Option<String>,
}

/// Trimmed form values, echoed back into the form when validation fails.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmittedInput {
    pub name: String,
    pub description: String,
    pub price: String,
    pub category: String,
}

impl SubmittedInput {
    /// Trims every field; a missing field becomes the empty string.
    pub fn from_raw(raw: &RawProductForm) -> Self {
        fn trimmed(value: &Option<String>) -> String {
            value.as_deref().map(str::trim).unwrap_or_default().to_string()
        }

        Self {
            name: trimmed(&raw.name),
            description: trimmed(&raw.description),
            price: trimmed(&raw.price),
            category: trimmed(&raw.category),
        }
    }

    /// Returns the value of one field.
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Description => &self.description,
            Field::Price => &self.price,
            Field::Category => &self.category,
        }
    }
}

impl From<RawProductForm> for SubmittedInput {
    fn from(raw: RawProductForm) -> Self {
        Self::from_raw(&raw)
    }
}

/// How the category field is checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryPolicy {
    /// Any non-empty category is accepted; the select box is the only
    /// thing steering users toward the listed options.
    #[default]
    Lenient,

    /// The category must be one of [`Category::OPTIONS`].
    Strict,
}

/// Validates add-product submissions.
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator {
    category_policy: CategoryPolicy,
}

impl Validator {
    pub fn new(category_policy: CategoryPolicy) -> Self {
        Self { category_policy }
    }

    pub fn category_policy(&self) -> CategoryPolicy {
        self.category_policy
    }

    /// Checks every field and collects the failures.
    pub fn validate(&self, input: &SubmittedInput) -> ErrorSet {
        let mut errors = ErrorSet::new();

        if input.name.trim().is_empty() {
            errors.insert(Field::Name, NAME_REQUIRED);
        }

        if input.description.trim().is_empty() {
            errors.insert(Field::Description, DESCRIPTION_REQUIRED);
        }

        let price = input.price.trim();
        if price.is_empty() {
            errors.insert(Field::Price, PRICE_REQUIRED);
        } else if Price::parse(price).is_none() {
            errors.insert(Field::Price, PRICE_NOT_POSITIVE);
        }

        let category = input.category.trim();
        if category.is_empty() {
            errors.insert(Field::Category, CATEGORY_REQUIRED);
        } else if self.category_policy == CategoryPolicy::Strict
            && !Category::OPTIONS.contains(&category)
        {
            errors.insert(Field::Category, CATEGORY_NOT_LISTED);
        }

        errors
    }

    /// Validates and converts into a product ready to be stored.
    pub fn check(&self, input: &SubmittedInput) -> Result<NewProduct, ErrorSet> {
        let errors = self.validate(input);
        if !errors.is_empty() {
            return Err(errors);
        }

        let Some(price) = Price::parse(input.price.trim()) else {
            let mut errors = ErrorSet::new();
            errors.insert(Field::Price, PRICE_NOT_POSITIVE);
            return Err(errors);
        };

        Ok(NewProduct {
            name: input.name.trim().to_string(),
            description: input.description.trim().to_string(),
            price,
            category: Category::new(input.category.trim()),
        })
    }
}

/// Validates with the default (lenient) category policy.
pub fn validate(input: &SubmittedInput) -> ErrorSet {
    Validator::default().validate(input)
}
