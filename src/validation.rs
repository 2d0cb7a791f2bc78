use crate::booking::Booking;
use crate::resource::Resource;
use std::collections::HashSet;
use std::fmt;

/// Dataset-level problem that would make the layout ambiguous.
///
/// Per-booking oddities (missing dates, inverted ranges, unknown resources)
/// are not errors; the layout pipeline degrades on those instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ValidationError {}

pub fn validate_booking(booking: &Booking) -> Result<(), ValidationError> {
    if booking.id.trim().is_empty() {
        return Err(ValidationError::new("booking requires a non-empty id"));
    }
    if let Some(resource_id) = &booking.resource_id {
        if resource_id.trim().is_empty() {
            return Err(ValidationError::new(format!(
                "booking {} has a blank resource_id (leave it empty instead)",
                booking.id
            )));
        }
    }
    Ok(())
}

/// Booking ids break ties in the stacking order, so they must be unique.
pub fn validate_bookings(bookings: &[Booking]) -> Result<(), ValidationError> {
    let mut seen_ids = HashSet::with_capacity(bookings.len());
    for booking in bookings {
        validate_booking(booking)?;
        if !seen_ids.insert(booking.id.as_str()) {
            return Err(ValidationError::new(format!(
                "duplicate booking id {}",
                booking.id
            )));
        }
    }
    Ok(())
}

pub fn validate_resources(resources: &[Resource]) -> Result<(), ValidationError> {
    let mut seen_ids = HashSet::with_capacity(resources.len());
    for (idx, resource) in resources.iter().enumerate() {
        if resource.id.trim().is_empty() {
            return Err(ValidationError::new(format!(
                "resource #{idx} requires a non-empty id"
            )));
        }
        if !seen_ids.insert(resource.id.as_str()) {
            return Err(ValidationError::new(format!(
                "duplicate resource id {}",
                resource.id
            )));
        }
    }
    Ok(())
}
