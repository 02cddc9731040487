//! # browse
//!
//! The browsing layer of the travel marketplace client: four listing
//! screens (bookings, events, guides, holiday packages) built on
//! `listing-core`'s debounced controller and `marketplace-client`'s REST
//! endpoints, plus the pure presenters that turn raw records into
//! display-ready view models.
//!
//! A render loop interacts with this crate through three surfaces:
//!
//! - [`Screen`] constructors ([`BookingsScreen::bookings`] and friends)
//!   mount a screen and fire its initial request.
//! - [`Screen::controller`] accepts filter edits, sort changes, and
//!   clear-filters commands.
//! - [`Screen::view`] projects current state into a [`ScreenView`]:
//!   loading, empty-state copy, or presented results with a count summary.

pub mod format;
pub mod presenter;
pub mod resources;
pub mod screens;
pub mod view;

pub use presenter::{
    booking_view, event_view, guide_view, holiday_view, BookingView, EventView, GuideView,
    HolidayView,
};
pub use resources::{
    BookingsResource, EventFilters, EventsResource, GuideFilters, GuidesResource, HolidayFilters,
    HolidaysResource, StatusFilter,
};
pub use screens::{
    BookingsScreen, EventsScreen, GuidesScreen, HolidaysScreen, Screen, HOME_PATH,
};
pub use view::{project, EmptyAction, EmptyState, ScreenView};
