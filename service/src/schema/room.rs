//! [`Room`] form schema.

use common::Money;
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::{Validate, ValidationError};

#[cfg(doc)]
use crate::domain::Room;
use crate::{
    command::{create_hotel::RoomDraft, update_room::Patch},
    domain::hotel::room,
};

use super::{amount, error, parsed, Errors};

/// Unvalidated [`Room`] form input.
#[derive(Clone, Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    /// ID of an existing [`Room`].
    #[validate(custom(function = "self::room_id"))]
    pub id: Option<String>,

    /// [`room::Kind`] of the [`Room`].
    ///
    /// Checked by [`Input::kind_error()`], as its wire name differs.
    #[serde(rename = "type")]
    pub kind: Option<String>,

    /// Base cost of the [`Room`].
    #[validate(custom(function = "self::base_cost"))]
    pub base_cost: Option<Decimal>,

    /// Taxes of the [`Room`].
    #[validate(custom(function = "self::taxes"))]
    pub taxes: Option<Decimal>,

    /// Client-computed price of the [`Room`].
    ///
    /// Only checked, the stored price is always recomputed.
    #[validate(custom(function = "self::price"))]
    pub price: Option<Decimal>,

    /// Capacity of the [`Room`].
    #[validate(range(
        min = 1,
        max = 65535,
        message = "Max guests must be a positive number"
    ))]
    pub max_guests: Option<i64>,

    /// Availability of the [`Room`].
    pub active: Option<bool>,
}

impl Input {
    /// Checks the `type` field, which must be present if `required`.
    pub(super) fn kind_error(
        &self,
        required: bool,
    ) -> Option<ValidationError> {
        match self.kind.as_deref().map(str::trim) {
            None if !required => None,
            None | Some("") => Some(error("required", "Room type is required")),
            Some(kind) => kind
                .parse::<room::Kind>()
                .is_err()
                .then(|| error("invalid", "Invalid room type")),
        }
    }

    /// Lists the failures of a complete [`Room`] description not covered by
    /// [`Validate`], by their field.
    pub(super) fn draft_errors(
        &self,
    ) -> Vec<(&'static str, ValidationError)> {
        let mut errors = Vec::new();
        if let Some(e) = self.kind_error(true) {
            errors.push(("type", e));
        }
        if self.base_cost.is_none() {
            errors.push((
                "base_cost",
                error("required", "Base cost is required"),
            ));
        }
        if self.taxes.is_none() {
            errors.push(("taxes", error("required", "Taxes are required")));
        }
        errors
    }

    /// Converts this validated [`Input`] into a [`RoomDraft`].
    pub(super) fn into_draft(self) -> Option<RoomDraft> {
        let id = match &self.id {
            Some(id) => Some(id.parse().ok()?),
            None => None,
        };
        Some(RoomDraft {
            id,
            kind: parsed(self.kind.as_ref(), |k| k.parse().ok())?,
            base_cost: Money::new(self.base_cost?)?,
            taxes: Money::new(self.taxes?)?,
            max_guests: max_guests(self.max_guests)?,
            active: self.active,
        })
    }
}

/// Validates a complete [`Room`] description.
///
/// `type`, `baseCost` and `taxes` are required.
///
/// # Errors
///
/// With every failed field if the `input` is invalid.
pub fn draft(input: Input) -> Result<RoomDraft, Errors> {
    let mut errors = input.validate().err().unwrap_or_default();
    for (field, e) in input.draft_errors() {
        errors.add(field, e);
    }
    if !errors.is_empty() {
        return Err(errors);
    }
    input.into_draft().ok_or_else(super::malformed)
}

/// Validates changes of a single [`Room`].
///
/// Every field is optional, `id` is ignored.
///
/// # Errors
///
/// With every failed field if the `input` is invalid.
pub fn patch(input: Input) -> Result<Patch, Errors> {
    let mut errors = input.validate().err().unwrap_or_default();
    if let Some(e) = input.kind_error(false) {
        errors.add("type", e);
    }
    if !errors.is_empty() {
        return Err(errors);
    }

    let kind = match parsed(input.kind.as_ref(), |k| k.parse().ok()) {
        None if input.kind.is_some() => return Err(super::malformed()),
        kind => kind,
    };
    Ok(Patch {
        kind,
        base_cost: input.base_cost.and_then(Money::new),
        taxes: input.taxes.and_then(Money::new),
        max_guests: max_guests(input.max_guests).ok_or_else(super::malformed)?,
        active: input.active,
    })
}

/// Converts the validated capacity `value`, if provided.
fn max_guests(value: Option<i64>) -> Option<Option<room::MaxGuests>> {
    match value {
        None => Some(None),
        Some(v) => u16::try_from(v)
            .ok()
            .and_then(room::MaxGuests::new)
            .map(Some),
    }
}

/// Requires the `value` to be a [`room::Id`].
fn room_id(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<room::Id>()
        .map(drop)
        .map_err(|_| error("invalid", "Invalid room ID"))
}

/// Requires the `value` to be a positive base cost.
fn base_cost(value: &Decimal) -> Result<(), ValidationError> {
    amount(
        value,
        true,
        "Base cost must be a positive number",
        "Base cost is too large",
    )
}

/// Requires the `value` to be non-negative taxes.
fn taxes(value: &Decimal) -> Result<(), ValidationError> {
    amount(value, false, "Taxes cannot be negative", "Taxes are too large")
}

/// Requires the `value` to be a positive price.
fn price(value: &Decimal) -> Result<(), ValidationError> {
    amount(
        value,
        true,
        "Price must be a positive number",
        "Price is too large",
    )
}
