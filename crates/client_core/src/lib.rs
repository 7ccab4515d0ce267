use std::sync::Arc;

use shared::{
    domain::BuildingId,
    protocol::{ReserveRequest, SearchQuery},
};
use tokio::sync::{broadcast, Mutex};
use tracing::{error, warn};

pub mod api;
pub mod validate;
pub mod view;

pub use api::{HttpReservationApi, ReservationApi, UnconfiguredReservationApi};

use validate::validate_time_range;
use view::{ReservationModalView, RoomCard, SearchResultsView};

const RESERVATION_ACCEPTED_NOTICE: &str =
    "Reservation submitted successfully! You will be notified once it's approved.";
const SEARCH_FAILED_MESSAGE: &str = "Error searching rooms. Please try again.";
const SUBMIT_FAILED_MESSAGE: &str = "Error submitting reservation. Please try again.";

/// One entry in a dropdown. The sentinel entries carry an empty value,
/// which the server reads as "any".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    fn any_building() -> Self {
        Self {
            value: String::new(),
            label: "Any building".to_string(),
        }
    }

    fn any_floor() -> Self {
        Self {
            value: String::new(),
            label: "Any floor".to_string(),
        }
    }
}

/// Notifications for whatever UI surface is attached. Every user-visible
/// effect of the controller flows through these.
#[derive(Debug, Clone)]
pub enum UiEvent {
    BuildingOptionsChanged(Vec<SelectOption>),
    FloorOptionsChanged(Vec<SelectOption>),
    ResultsChanged(SearchResultsView),
    ModalOpened(ReservationModalView),
    ModalClosed,
    /// Blocking message the user must acknowledge (validation or failure).
    Alert(String),
    /// Non-blocking confirmation.
    Notice(String),
}

/// Fields of the confirmation modal. Raw string values, rebuilt on every
/// open; exactly one modal exists and a later open overwrites it.
#[derive(Debug, Clone)]
struct ModalState {
    room_id: String,
    slot_date: String,
    start_hour: String,
    end_hour: String,
    reserved_by: String,
}

#[derive(Debug)]
struct FormState {
    building_options: Vec<SelectOption>,
    floor_options: Vec<SelectOption>,
    building_id: String,
    floor: String,
    slot_date: String,
    start_hour: String,
    end_hour: String,
    results: SearchResultsView,
    modal: Option<ModalState>,
}

impl FormState {
    fn new(slot_date: String) -> Self {
        Self {
            building_options: vec![SelectOption::any_building()],
            floor_options: vec![SelectOption::any_floor()],
            building_id: String::new(),
            floor: String::new(),
            slot_date,
            start_hour: String::new(),
            end_hour: String::new(),
            results: SearchResultsView::Idle,
            modal: None,
        }
    }
}

/// Mediates between the form fields, the confirmation modal and the
/// reservation server. All durable state lives behind the injected
/// [`ReservationApi`]; this holds only the transient form values.
pub struct ReservationFormController {
    api: Arc<dyn ReservationApi>,
    inner: Mutex<FormState>,
    events: broadcast::Sender<UiEvent>,
}

impl ReservationFormController {
    /// Slot date defaults to today, matching the form's initial value.
    pub fn new(api: Arc<dyn ReservationApi>) -> Arc<Self> {
        Self::new_with_slot_date(api, chrono::Local::now().date_naive().to_string())
    }

    pub fn new_with_slot_date(api: Arc<dyn ReservationApi>, slot_date: String) -> Arc<Self> {
        let (events, _) = broadcast::channel(64);
        Arc::new(Self {
            api,
            inner: Mutex::new(FormState::new(slot_date)),
            events,
        })
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<UiEvent> {
        self.events.subscribe()
    }

    fn emit(&self, event: UiEvent) {
        let _ = self.events.send(event);
    }

    /// Replaces the building dropdown with the sentinel plus one option per
    /// building. A failed load keeps the previous options and is only
    /// logged; the primary search workflow stays usable.
    pub async fn load_buildings(&self) {
        match self.api.list_buildings().await {
            Ok(buildings) => {
                let mut options = vec![SelectOption::any_building()];
                options.extend(buildings.into_iter().map(|building| SelectOption {
                    value: building.building_id.0.to_string(),
                    label: building.name,
                }));
                self.inner.lock().await.building_options = options.clone();
                self.emit(UiEvent::BuildingOptionsChanged(options));
            }
            Err(err) => warn!("failed to load buildings: {err}"),
        }
    }

    /// Stores the raw building selection. A non-empty id triggers a floor
    /// load; clearing the selection resets the floor dropdown to the
    /// sentinel without a network call.
    pub async fn select_building(&self, value: impl Into<String>) {
        let value = value.into();
        let building_id = value.parse::<i64>().ok();
        {
            let mut guard = self.inner.lock().await;
            guard.building_id = value;
            if building_id.is_none() {
                guard.floor = String::new();
                guard.floor_options = vec![SelectOption::any_floor()];
            }
        }
        match building_id {
            Some(id) => self.load_floors(BuildingId(id)).await,
            None => self.emit(UiEvent::FloorOptionsChanged(vec![SelectOption::any_floor()])),
        }
    }

    pub async fn load_floors(&self, building_id: BuildingId) {
        match self.api.list_floors(building_id).await {
            Ok(floors) => {
                let mut options = vec![SelectOption::any_floor()];
                options.extend(floors.into_iter().map(|floor| SelectOption {
                    value: floor.to_string(),
                    label: format!("Floor {floor}"),
                }));
                self.inner.lock().await.floor_options = options.clone();
                self.emit(UiEvent::FloorOptionsChanged(options));
            }
            Err(err) => warn!(
                "failed to load floors for building {}: {err}",
                building_id.0
            ),
        }
    }

    pub async fn select_floor(&self, value: impl Into<String>) {
        self.inner.lock().await.floor = value.into();
    }

    pub async fn set_slot_date(&self, value: impl Into<String>) {
        self.inner.lock().await.slot_date = value.into();
    }

    pub async fn set_time_range(&self, start_hour: impl Into<String>, end_hour: impl Into<String>) {
        let mut guard = self.inner.lock().await;
        guard.start_hour = start_hour.into();
        guard.end_hour = end_hour.into();
    }

    async fn set_results(&self, results: SearchResultsView) {
        self.inner.lock().await.results = results.clone();
        self.emit(UiEvent::ResultsChanged(results));
    }

    /// Validates the hour range, then queries the search endpoint with the
    /// raw form fields. Each returned room becomes a card that embeds the
    /// searched slot, so opening the modal needs no further lookup.
    pub async fn search_rooms(&self) {
        let query = {
            let guard = self.inner.lock().await;
            if let Err(err) = validate_time_range(&guard.start_hour, &guard.end_hour) {
                let message = err.to_string();
                drop(guard);
                self.emit(UiEvent::Alert(message));
                return;
            }
            SearchQuery {
                building_id: guard.building_id.clone(),
                floor: guard.floor.clone(),
                slot_date: guard.slot_date.clone(),
                start_hour: guard.start_hour.clone(),
                end_hour: guard.end_hour.clone(),
            }
        };

        self.set_results(SearchResultsView::Loading).await;
        match self.api.search_rooms(&query).await {
            Ok(rooms) if rooms.is_empty() => self.set_results(SearchResultsView::Empty).await,
            Ok(rooms) => {
                let cards = rooms
                    .into_iter()
                    .map(|room| RoomCard {
                        room,
                        slot_date: query.slot_date.clone(),
                        start_hour: query.start_hour.clone(),
                        end_hour: query.end_hour.clone(),
                    })
                    .collect();
                self.set_results(SearchResultsView::Rooms(cards)).await;
            }
            Err(err) => {
                error!("room search failed: {err}");
                self.set_results(SearchResultsView::Error(SEARCH_FAILED_MESSAGE.to_string()))
                    .await;
            }
        }
    }

    /// Pure UI transition: fills the modal from the card, clears the name
    /// field and emits the formatted summary. No validation, no network.
    pub async fn open_reservation_modal(&self, card: &RoomCard) {
        let time_label = match (
            card.start_hour.parse::<u8>().ok(),
            card.end_hour.parse::<u8>().ok(),
        ) {
            (Some(start), Some(end)) => view::format_time_slot(start, end),
            _ => String::new(),
        };
        let modal_view = ReservationModalView {
            room_num: card.room.room_num.clone(),
            building_name: card.room.building_name.clone(),
            floor: card.room.floor,
            capacity: card.room.capacity,
            slot_date: card.slot_date.clone(),
            time_label,
        };
        self.inner.lock().await.modal = Some(ModalState {
            room_id: card.room.room_id.0.to_string(),
            slot_date: card.slot_date.clone(),
            start_hour: card.start_hour.clone(),
            end_hour: card.end_hour.clone(),
            reserved_by: String::new(),
        });
        self.emit(UiEvent::ModalOpened(modal_view));
    }

    pub async fn set_reserved_by(&self, value: impl Into<String>) {
        if let Some(modal) = self.inner.lock().await.modal.as_mut() {
            modal.reserved_by = value.into();
        }
    }

    /// Validates the modal fields locally, then posts the reservation. A
    /// server `error` string is alerted verbatim and the modal stays open;
    /// on success the modal closes and the search re-runs so availability
    /// reflects the new booking. Transport failures keep the modal open
    /// for a manual retry.
    pub async fn submit_reservation(&self) {
        let request = {
            let guard = self.inner.lock().await;
            let Some(modal) = guard.modal.as_ref() else {
                return;
            };
            if modal.reserved_by.trim().is_empty() {
                let message = shared::error::ValidationError::MissingName.to_string();
                drop(guard);
                self.emit(UiEvent::Alert(message));
                return;
            }
            if let Err(err) = validate_time_range(&modal.start_hour, &modal.end_hour) {
                let message = err.to_string();
                drop(guard);
                self.emit(UiEvent::Alert(message));
                return;
            }
            ReserveRequest {
                room_id: modal.room_id.clone(),
                slot_date: modal.slot_date.clone(),
                start_hour: modal.start_hour.clone(),
                end_hour: modal.end_hour.clone(),
                reserved_by: modal.reserved_by.clone(),
            }
        };

        match self.api.create_reservation(&request).await {
            Ok(response) => {
                if let Some(server_error) = response.error {
                    self.emit(UiEvent::Alert(server_error));
                    return;
                }
                self.emit(UiEvent::Notice(
                    response
                        .message
                        .unwrap_or_else(|| RESERVATION_ACCEPTED_NOTICE.to_string()),
                ));
                self.inner.lock().await.modal = None;
                self.emit(UiEvent::ModalClosed);
                self.search_rooms().await;
            }
            Err(err) => {
                error!("failed to submit reservation: {err}");
                self.emit(UiEvent::Alert(SUBMIT_FAILED_MESSAGE.to_string()));
            }
        }
    }

    pub async fn building_options(&self) -> Vec<SelectOption> {
        self.inner.lock().await.building_options.clone()
    }

    pub async fn floor_options(&self) -> Vec<SelectOption> {
        self.inner.lock().await.floor_options.clone()
    }

    pub async fn results(&self) -> SearchResultsView {
        self.inner.lock().await.results.clone()
    }

    pub async fn modal_is_open(&self) -> bool {
        self.inner.lock().await.modal.is_some()
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
