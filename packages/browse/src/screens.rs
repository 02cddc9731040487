//! The four listing screens, each a controller wired to a presenter.
//!
//! A screen owns its [`ListingController`], knows how to turn one record
//! into a view model, and carries the copy for its empty state. `view()`
//! is the single read path: it snapshots controller state and projects it
//! into a [`ScreenView`].

use std::sync::Arc;

use listing_core::{
    ListingController, ListingResource, ListingState, Navigator, NotificationChannel,
};
use marketplace_client::MarketplaceClient;
use tokio::sync::watch;

use crate::presenter::{
    booking_view, event_view, guide_view, holiday_view, BookingView, EventView, GuideView,
    HolidayView,
};
use crate::resources::{BookingsResource, EventsResource, GuidesResource, HolidaysResource};
use crate::view::{project, EmptyState, ScreenView};

/// Where "back to browsing" navigation lands.
pub const HOME_PATH: &str = "/home";

const NO_BOOKINGS: EmptyState = EmptyState::new(
    "No Bookings Yet",
    "You haven't made any bookings yet.",
)
.with_action("Book a Flight", "/services/flights");

const NO_EVENTS: EmptyState =
    EmptyState::new("No Events Found", "Try adjusting your search criteria").with_reset();

const NO_GUIDES: EmptyState =
    EmptyState::new("No Guides Found", "Try adjusting your search criteria").with_reset();

const NO_HOLIDAYS: EmptyState =
    EmptyState::new("No Packages Found", "Try adjusting your search criteria").with_reset();

/// One mounted listing screen.
pub struct Screen<R: ListingResource, V> {
    controller: ListingController<R>,
    navigator: Arc<dyn Navigator>,
    present: fn(&R::Record) -> V,
    empty: EmptyState,
    noun: &'static str,
}

impl<R: ListingResource, V> Screen<R, V> {
    /// Spawn the controller and issue the initial request.
    pub fn mount(
        resource: Arc<R>,
        notifications: NotificationChannel,
        navigator: Arc<dyn Navigator>,
        present: fn(&R::Record) -> V,
        empty: EmptyState,
        noun: &'static str,
        label: &'static str,
    ) -> Self {
        tracing::debug!(screen = label, "mounting listing screen");
        let controller = ListingController::builder(resource)
            .with_notifications(notifications)
            .with_navigator(navigator.clone())
            .with_resource_label(label)
            .spawn();
        Self {
            controller,
            navigator,
            present,
            empty,
            noun,
        }
    }

    /// Snapshot the controller state and project it for rendering.
    pub fn view(&self) -> ScreenView<V> {
        let state = self.controller.current_state();
        project(&state, &self.empty, self.noun, self.present)
    }

    /// Filter and sort commands go through the controller directly.
    pub fn controller(&self) -> &ListingController<R> {
        &self.controller
    }

    /// Subscribe to raw state changes, for render loops that want to react
    /// to every transition rather than poll.
    pub fn state(&self) -> watch::Receiver<ListingState<R::Record>> {
        self.controller.state()
    }

    pub fn go_home(&self) {
        self.navigator.navigate(HOME_PATH);
    }

    /// Follow an empty-state call-to-action ("Book a Flight" and the like).
    pub fn follow(&self, action: &crate::view::EmptyAction) {
        self.navigator.navigate(action.path);
    }
}

pub type BookingsScreen = Screen<BookingsResource, BookingView>;
pub type EventsScreen = Screen<EventsResource, EventView>;
pub type GuidesScreen = Screen<GuidesResource, GuideView>;
pub type HolidaysScreen = Screen<HolidaysResource, HolidayView>;

impl BookingsScreen {
    pub fn bookings(
        client: Arc<MarketplaceClient>,
        notifications: NotificationChannel,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Screen::mount(
            Arc::new(BookingsResource::new(client)),
            notifications,
            navigator,
            booking_view,
            NO_BOOKINGS,
            "booking",
            "bookings",
        )
    }
}

impl EventsScreen {
    pub fn events(
        client: Arc<MarketplaceClient>,
        notifications: NotificationChannel,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Screen::mount(
            Arc::new(EventsResource::new(client)),
            notifications,
            navigator,
            event_view,
            NO_EVENTS,
            "event",
            "events",
        )
    }
}

impl GuidesScreen {
    pub fn guides(
        client: Arc<MarketplaceClient>,
        notifications: NotificationChannel,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Screen::mount(
            Arc::new(GuidesResource::new(client)),
            notifications,
            navigator,
            guide_view,
            NO_GUIDES,
            "guide",
            "guides",
        )
    }
}

impl HolidaysScreen {
    pub fn holidays(
        client: Arc<MarketplaceClient>,
        notifications: NotificationChannel,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Screen::mount(
            Arc::new(HolidaysResource::new(client)),
            notifications,
            navigator,
            holiday_view,
            NO_HOLIDAYS,
            "package",
            "packages",
        )
    }
}
