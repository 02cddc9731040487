//! Wire types for the marketplace backend.
//!
//! Records mirror the backend's camelCase JSON (Mongo-style `_id` string
//! keys). Fields the backend may omit are `Option`; the presentation layer
//! owns the fallbacks.

use chrono::{DateTime, Utc};
use listing_core::SortOrder;
use serde::{Deserialize, Serialize};

// ============================================================================
// Records
// ============================================================================

/// One of the caller's own flight bookings.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub booking_id: Option<String>,
    pub flight_name: Option<String>,
    pub vendor_name: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub seats_booked: Option<u32>,
    pub total_price: Option<f64>,
    pub booked_at: Option<DateTime<Utc>>,
}

/// A bookable event.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(rename = "_id")]
    pub id: String,
    pub event_name: String,
    pub location: Option<String>,
    pub event_date: Option<DateTime<Utc>>,
    /// Free-form time-of-day string as entered by the vendor ("18:00").
    pub event_time: Option<String>,
    pub available_tickets: Option<u32>,
    pub total_tickets: Option<u32>,
    pub price: Option<f64>,
    pub description: Option<String>,
}

/// Whether a tour guide is currently bookable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuideStatus {
    Free,
    Occupied,
}

impl GuideStatus {
    pub fn label(&self) -> &'static str {
        match self {
            GuideStatus::Free => "Available",
            GuideStatus::Occupied => "Occupied",
        }
    }
}

/// A tour guide profile.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guide {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub location: Option<String>,
    pub expertise_location: Option<String>,
    pub hours_available: Option<String>,
    pub price_per_hour: Option<f64>,
    pub status: GuideStatus,
}

/// A packaged holiday.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HolidayPackage {
    #[serde(rename = "_id")]
    pub id: String,
    pub package_name: String,
    pub location: Option<String>,
    pub total_days: Option<u32>,
    pub cost: Option<f64>,
    /// Availability string as served by the backend ("available" / "sold out").
    pub status: Option<String>,
}

// ============================================================================
// Sortable fields
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EventSortField {
    EventDate,
    Price,
    CreatedAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum GuideSortField {
    PricePerHour,
    CreatedAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum HolidaySortField {
    Cost,
    CreatedAt,
}

// ============================================================================
// Query parameters
// ============================================================================
//
// Unset filters are omitted from the query string (`None`, never an empty
// string). Status is the exception on guides: the backend treats a missing
// status as "all", so the tri-state select maps `All` to `None`.

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    pub sort_by: EventSortField,
    pub sort_order: SortOrder,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuideParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expertise: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<GuideStatus>,
    pub sort_by: GuideSortField,
    pub sort_order: SortOrder,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HolidayParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub sort_by: HolidaySortField,
    pub sort_order: SortOrder,
}
