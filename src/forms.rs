//! Declarative form schemas and the generic validator that consumes them.
//!
//! A schema is a static list of [`FieldSpec`]s; submitted forms expose their
//! raw values through [`Submitted`]. Rendering is handled by the templates and
//! only reads the resulting [`FormErrors`].

use std::collections::BTreeMap;

use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Text,
    Email,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub required: bool,
    pub min_len: Option<usize>,
    pub max_len: Option<usize>,
    pub shape: Shape,
}

impl FieldSpec {
    const fn text(name: &'static str) -> Self {
        Self {
            name,
            required: false,
            min_len: None,
            max_len: None,
            shape: Shape::Text,
        }
    }

    const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    const fn length(mut self, min: Option<usize>, max: Option<usize>) -> Self {
        self.min_len = min;
        self.max_len = max;
        self
    }

    const fn email(mut self) -> Self {
        self.shape = Shape::Email;
        self
    }
}

pub const LOGIN_FORM: &[FieldSpec] = &[
    FieldSpec::text("username").required(),
    FieldSpec::text("password").required(),
];

pub const CREATE_ACCOUNT_FORM: &[FieldSpec] = &[
    FieldSpec::text("username").required().length(None, Some(32)),
    FieldSpec::text("password").length(Some(4), Some(35)),
    FieldSpec::text("email").required().length(None, Some(32)).email(),
];

pub const RECIPE_FORM: &[FieldSpec] = &[
    FieldSpec::text("title").required().length(None, Some(80)),
    FieldSpec::text("description").required(),
    FieldSpec::text("ingredients").required(),
    FieldSpec::text("instructions").required(),
];

/// Field name -> messages. Empty means the submission is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(BTreeMap<&'static str, Vec<String>>);

impl FormErrors {
    pub fn is_valid(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }
}

/// Raw access to a submitted form by field name.
pub trait Submitted {
    fn field(&self, name: &str) -> Option<&str>;
}

pub fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub fn validate(schema: &[FieldSpec], submitted: &impl Submitted) -> FormErrors {
    let mut errors = FormErrors::default();
    for spec in schema {
        let value = submitted.field(spec.name).unwrap_or("");

        if spec.required && value.trim().is_empty() {
            errors.add(spec.name, "This field is required.");
            continue;
        }

        // Postgres text columns cannot hold NUL.
        if value.contains('\0') {
            errors.add(spec.name, "Field contains invalid characters.");
            continue;
        }

        let len = value.chars().count();
        let too_short = spec.min_len.is_some_and(|min| len < min);
        let too_long = spec.max_len.is_some_and(|max| len > max);
        if too_short || too_long {
            let message = match (spec.min_len, spec.max_len) {
                (Some(min), Some(max)) => {
                    format!("Field must be between {min} and {max} characters long.")
                }
                (Some(min), None) => format!("Field must be at least {min} characters long."),
                (None, Some(max)) => format!("Field cannot be longer than {max} characters."),
                (None, None) => unreachable!(),
            };
            errors.add(spec.name, message);
        }

        if spec.shape == Shape::Email && !value.is_empty() && !is_valid_email(value.trim()) {
            errors.add(spec.name, "Invalid email address.");
        }
    }
    errors
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// Checkbox; browsers omit it when unchecked.
    #[serde(default)]
    pub remember_me: Option<String>,
}

impl LoginForm {
    pub fn remember(&self) -> bool {
        self.remember_me.as_deref().is_some_and(|v| !v.is_empty())
    }
}

impl Submitted for LoginForm {
    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "username" => Some(&self.username),
            "password" => Some(&self.password),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateAccountForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub email: String,
}

impl Submitted for CreateAccountForm {
    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "username" => Some(&self.username),
            "password" => Some(&self.password),
            "email" => Some(&self.email),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecipeForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub ingredients: String,
    #[serde(default)]
    pub instructions: String,
}

impl Submitted for RecipeForm {
    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "title" => Some(&self.title),
            "description" => Some(&self.description),
            "ingredients" => Some(&self.ingredients),
            "instructions" => Some(&self.instructions),
            _ => None,
        }
    }
}
