//! Declarative request validation.
//!
//! A [`Rule`] ties one request field (a path parameter or a top-level JSON
//! body field) to a predicate from [`rules`] and the message reported when the
//! predicate fails. Request types list their rules in order through
//! [`ValidatedRequest::RULES`]; every rule runs and every failure is kept, then
//! [`gate`] either lets the request through or turns the failures into a single
//! 400 response.
//!
//! ```ignore
//! use axum_helpers::validation::{Rule, rules};
//!
//! const CREATE_RULES: &[Rule] = &[
//!     Rule::body("name", rules::not_blank, "Product name is required"),
//!     Rule::body("price", rules::is_positive, "Price must be greater than zero"),
//! ];
//! ```

pub mod rules;

use crate::errors::AppError;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use std::collections::HashMap;
use std::str::FromStr;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Where a validated field lives in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Path,
    Body,
}

/// One failed rule, as reported in the `details` of a validation error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    /// Name of the path parameter or body field
    #[schema(example = "price")]
    pub field: String,
    pub location: Location,
    #[schema(example = "Price must be greater than zero")]
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, location: Location, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            location,
            message: message.into(),
        }
    }

    /// Flattens `validator` derive errors into body field errors, sorted by field.
    pub fn from_validator(errors: &ValidationErrors) -> Vec<Self> {
        let mut out: Vec<Self> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |err| {
                    let message = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{} is invalid ({})", field, err.code));
                    Self::new(field.to_string(), Location::Body, message)
                })
            })
            .collect();
        out.sort_by(|a, b| a.field.cmp(&b.field));
        out
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(FieldError::from_validator(&errors))
    }
}

/// Predicate over the raw JSON value of a field. `None` means the field is absent.
pub type Predicate = fn(Option<&Value>) -> bool;

/// `locator -> predicate -> message`
#[derive(Clone, Copy)]
pub struct Rule {
    pub location: Location,
    pub field: &'static str,
    pub check: Predicate,
    pub message: &'static str,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("location", &self.location)
            .field("field", &self.field)
            .field("message", &self.message)
            .finish()
    }
}

impl Rule {
    /// Rule on a path parameter, e.g. `id` in `/products/{id}`
    pub const fn path(field: &'static str, check: Predicate, message: &'static str) -> Self {
        Self {
            location: Location::Path,
            field,
            check,
            message,
        }
    }

    /// Rule on a top-level field of the JSON body
    pub const fn body(field: &'static str, check: Predicate, message: &'static str) -> Self {
        Self {
            location: Location::Body,
            field,
            check,
            message,
        }
    }

    /// Runs the predicate against `fields`. Never mutates the input.
    pub fn evaluate(&self, fields: &RequestFields) -> Result<(), FieldError> {
        let passed = match self.location {
            // Path params are presented to predicates as JSON strings
            Location::Path => {
                let value = fields.path.get(self.field).cloned().map(Value::String);
                (self.check)(value.as_ref())
            }
            Location::Body => (self.check)(fields.body.get(self.field)),
        };

        if passed {
            Ok(())
        } else {
            Err(FieldError::new(self.field, self.location, self.message))
        }
    }
}

/// Raw inputs of a request, before any typed conversion.
#[derive(Debug, Clone, Default)]
pub struct RequestFields {
    pub path: HashMap<String, String>,
    /// Parsed JSON body, `Value::Null` when the request had none
    pub body: Value,
}

impl RequestFields {
    pub fn new(path: HashMap<String, String>, body: Value) -> Self {
        Self { path, body }
    }

    /// Parses a path parameter that the rules have already vetted.
    pub fn path_param<T: FromStr>(&self, name: &str) -> Result<T, AppError> {
        self.path
            .get(name)
            .and_then(|raw| raw.parse().ok())
            .ok_or_else(|| {
                AppError::Validation(vec![FieldError::new(
                    name,
                    Location::Path,
                    format!("Invalid {}", name),
                )])
            })
    }

    /// Deserializes the body into its typed form.
    pub fn body_as<T: DeserializeOwned>(&self) -> Result<T, AppError> {
        T::deserialize(&self.body)
            .map_err(|e| AppError::BadRequest(format!("Invalid request body: {}", e)))
    }
}

/// Runs `rules` in declaration order, yielding one result per rule.
pub fn check<'a>(
    rules: &'a [Rule],
    fields: &'a RequestFields,
) -> impl Iterator<Item = Result<(), FieldError>> + 'a {
    rules.iter().map(move |rule| rule.evaluate(fields))
}

/// The single checkpoint between rules and handlers.
///
/// Consumes every result; if any failed, returns [`AppError::Validation`] with
/// all failures in rule order.
pub fn gate<I>(results: I) -> Result<(), AppError>
where
    I: IntoIterator<Item = Result<(), FieldError>>,
{
    let failures: Vec<FieldError> = results.into_iter().filter_map(Result::err).collect();

    if failures.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(failures))
    }
}

/// A request type with a declared rule list.
///
/// Used with the [`Validated`](crate::extractors::Validated) extractor, which
/// evaluates `RULES`, runs the [`gate`], and only then calls `from_fields`.
pub trait ValidatedRequest: Sized {
    const RULES: &'static [Rule];

    fn from_fields(fields: RequestFields) -> Result<Self, AppError>;
}
