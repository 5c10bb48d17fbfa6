//! Validation schemas turning raw form input into [`Command`]s.
//!
//! Inputs are checked with [`validator`] derives, so every failing field is
//! reported at once. Use [`fields()`] to key them by their path in the input
//! (`name`, `rooms[0].baseCost`).
//!
//! [`Command`]: crate::Command

pub mod hotel;
pub mod reservation;
pub mod room;
pub mod session;

use std::{borrow::Cow, collections::BTreeMap};

use common::Money;
use rust_decimal::Decimal;
use validator::{ValidationError, ValidationErrorsKind};

pub use validator::ValidationErrors as Errors;

/// Collects the first message of every failed field of the provided
/// [`Errors`], keyed by the field path in camelCase.
#[must_use]
pub fn fields(errors: &Errors) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();
    collect(errors, "", &mut out);
    out
}

/// Flattens the `errors` located at the `prefix` path into the `out`put.
fn collect(errors: &Errors, prefix: &str, out: &mut BTreeMap<String, String>) {
    for (field, kind) in errors.errors() {
        let field = camel_case(field);
        let path = if prefix.is_empty() {
            field
        } else {
            format!("{prefix}.{field}")
        };
        match kind {
            ValidationErrorsKind::Field(errs) => {
                if let Some(e) = errs.first() {
                    let message = e
                        .message
                        .as_deref()
                        .map_or_else(|| e.code.to_string(), ToOwned::to_owned);
                    _ = out.entry(path).or_insert(message);
                }
            }
            ValidationErrorsKind::Struct(nested) => {
                collect(nested, &path, out);
            }
            ValidationErrorsKind::List(items) => {
                for (i, nested) in items {
                    collect(nested, &format!("{path}[{i}]"), out);
                }
            }
        }
    }
}

/// Converts a `snake_case` field name into `camelCase`.
fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Creates a new [`ValidationError`] with the provided `code` and `message`.
fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut e = ValidationError::new(code);
    e.message = Some(Cow::Borrowed(message));
    e
}

/// Records the `error` of the `field` in the item at `index` of the `list`
/// field.
fn add_nested(
    errors: &mut Errors,
    list: &'static str,
    index: usize,
    field: &'static str,
    error: ValidationError,
) {
    let kind = errors
        .errors_mut()
        .entry(list)
        .or_insert_with(|| ValidationErrorsKind::List(BTreeMap::new()));
    if let ValidationErrorsKind::List(items) = kind {
        items.entry(index).or_default().add(field, error);
    }
}

/// Report for an input passing validation but failing conversion.
fn malformed() -> Errors {
    let mut errors = Errors::new();
    errors.add("input", error("malformed", "Malformed input"));
    errors
}

/// Requires the text `value` to be non-blank and accepted by `parse`.
///
/// Surrounding whitespace is trimmed before parsing.
fn text<T>(
    value: &str,
    parse: impl FnOnce(String) -> Option<T>,
    required: &'static str,
    invalid: &'static str,
) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(error("required", required));
    }
    parse(value.to_owned())
        .map(drop)
        .ok_or_else(|| error("invalid", invalid))
}

/// Parses the trimmed text `value` with `parse`, if present and non-blank.
fn parsed<T>(
    value: Option<&String>,
    parse: impl FnOnce(String) -> Option<T>,
) -> Option<T> {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .and_then(|v| parse(v.to_owned()))
}

/// Requires the numeric `value` to be a [`Money`] amount, strictly positive
/// if `positive` is set.
fn amount(
    value: &Decimal,
    positive: bool,
    invalid: &'static str,
    too_large: &'static str,
) -> Result<(), ValidationError> {
    if *value > Money::MAX.amount() {
        return Err(error("too_large", too_large));
    }
    Money::new(*value)
        .filter(|m| !positive || m.is_positive())
        .map(drop)
        .ok_or_else(|| error("range", invalid))
}

/// Unwraps the failed fields of a schema `result`.
///
/// # Panics
///
/// If the `result` passed validation.
#[cfg(test)]
pub(crate) fn failed<T>(result: Result<T, Errors>) -> BTreeMap<String, String> {
    match result {
        Ok(_) => panic!("validation passed"),
        Err(e) => fields(&e),
    }
}

#[cfg(test)]
mod spec {
    use super::{add_nested, error, fields, Errors};

    #[test]
    fn keeps_first_message_per_field() {
        let mut errors = Errors::new();
        errors.add("name", error("required", "is required"));
        errors.add("name", error("invalid", "is invalid"));

        let fields = fields(&errors);
        assert_eq!(fields.get("name").map(String::as_str), Some("is required"));
        assert_eq!(fields.len(), 1);
    }

    #[test]
    fn keys_nested_items_by_path() {
        let mut errors = Errors::new();
        add_nested(&mut errors, "rooms", 1, "base_cost", error("range", "bad"));
        add_nested(&mut errors, "rooms", 1, "taxes", error("range", "worse"));

        let fields = fields(&errors);
        assert_eq!(
            fields.get("rooms[1].baseCost").map(String::as_str),
            Some("bad"),
        );
        assert_eq!(
            fields.get("rooms[1].taxes").map(String::as_str),
            Some("worse"),
        );
    }

    #[test]
    fn falls_back_to_code() {
        let mut errors = Errors::new();
        errors.add("email_address", validator::ValidationError::new("email"));

        assert_eq!(
            fields(&errors).get("emailAddress").map(String::as_str),
            Some("email"),
        );
    }
}
