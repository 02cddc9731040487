//! Pure record-to-view-model mapping.
//!
//! Each presenter takes one raw backend record by shared reference and
//! returns a display-ready view model: fallbacks substituted, dates and
//! money formatted, identifiers truncated. No mutation and no side effects:
//! the same record always yields the same view.

use marketplace_client::{Booking, Event, Guide, GuideStatus, HolidayPackage};

use crate::format::{
    currency, medium_date, medium_date_time, seat_count, short_id, FALLBACK_TEXT,
};

fn text_or_fallback(value: &Option<String>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.clone(),
        _ => FALLBACK_TEXT.to_string(),
    }
}

// ============================================================================
// Bookings
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingView {
    pub flight_name: String,
    pub vendor_name: Option<String>,
    /// `OSL → KEF`, with `N/A` for a missing side.
    pub route: String,
    pub seats: String,
    pub total_price: String,
    /// Medium date with time, since bookings are moments, not days.
    pub booked_at: String,
    /// Last 8 characters of the booking id.
    pub reference: String,
}

pub fn booking_view(booking: &Booking) -> BookingView {
    BookingView {
        flight_name: booking
            .flight_name
            .clone()
            .unwrap_or_else(|| "Flight".to_string()),
        vendor_name: booking.vendor_name.clone(),
        route: format!(
            "{} \u{2192} {}",
            text_or_fallback(&booking.from),
            text_or_fallback(&booking.to)
        ),
        seats: seat_count(booking.seats_booked.unwrap_or(0)),
        total_price: currency(booking.total_price.unwrap_or(0.0)),
        booked_at: booking
            .booked_at
            .as_ref()
            .map(medium_date_time)
            .unwrap_or_else(|| FALLBACK_TEXT.to_string()),
        reference: booking
            .booking_id
            .as_deref()
            .map(short_id)
            .unwrap_or_else(|| FALLBACK_TEXT.to_string()),
    }
}

// ============================================================================
// Events
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventView {
    pub name: String,
    pub location: String,
    /// Date-only medium format; events are day-scoped.
    pub date: String,
    pub time: String,
    /// `12 / 40 Tickets Available`.
    pub tickets: String,
    pub price: String,
    pub description: Option<String>,
}

pub fn event_view(event: &Event) -> EventView {
    EventView {
        name: event.event_name.clone(),
        location: text_or_fallback(&event.location),
        date: event
            .event_date
            .as_ref()
            .map(medium_date)
            .unwrap_or_else(|| FALLBACK_TEXT.to_string()),
        time: text_or_fallback(&event.event_time),
        tickets: format!(
            "{} / {} Tickets Available",
            event.available_tickets.unwrap_or(0),
            event.total_tickets.unwrap_or(0)
        ),
        price: format!("{} / ticket", currency(event.price.unwrap_or(0.0))),
        description: event.description.clone(),
    }
}

// ============================================================================
// Guides
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuideView {
    pub name: String,
    pub location: String,
    pub expertise: String,
    pub hours: String,
    pub rate: String,
    pub status_label: String,
    pub available: bool,
}

pub fn guide_view(guide: &Guide) -> GuideView {
    GuideView {
        name: guide.name.clone(),
        location: text_or_fallback(&guide.location),
        expertise: text_or_fallback(&guide.expertise_location),
        hours: text_or_fallback(&guide.hours_available),
        rate: format!("{} / hour", currency(guide.price_per_hour.unwrap_or(0.0))),
        status_label: guide.status.label().to_string(),
        available: guide.status == GuideStatus::Free,
    }
}

// ============================================================================
// Holiday packages
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolidayView {
    pub name: String,
    pub location: String,
    /// `7 Days`.
    pub duration: String,
    pub cost: String,
    pub status: String,
    pub available: bool,
}

pub fn holiday_view(holiday: &HolidayPackage) -> HolidayView {
    let status = holiday
        .status
        .clone()
        .unwrap_or_else(|| FALLBACK_TEXT.to_string());
    let available = status == "available";
    HolidayView {
        name: holiday.package_name.clone(),
        location: text_or_fallback(&holiday.location),
        duration: format!("{} Days", holiday.total_days.unwrap_or(0)),
        cost: currency(holiday.cost.unwrap_or(0.0)),
        status,
        available,
    }
}
