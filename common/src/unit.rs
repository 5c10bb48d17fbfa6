//! Marker types.

/// Marker type describing an entity creation.
#[derive(Clone, Copy, Debug)]
pub struct Creation;

/// Marker type describing an expiration moment.
#[derive(Clone, Copy, Debug)]
pub struct Expiration;

/// Marker type describing the day a stay begins.
#[derive(Clone, Copy, Debug)]
pub struct CheckIn;

/// Marker type describing the day a stay ends.
#[derive(Clone, Copy, Debug)]
pub struct CheckOut;

/// Marker type describing a person's birth day.
#[derive(Clone, Copy, Debug)]
pub struct Birth;
