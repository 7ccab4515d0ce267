//! Typed render output for the reservation form. The UI layer turns these
//! values into whatever surface it owns (terminal text, widgets, markup);
//! nothing here is stringly-templated.

use shared::protocol::RoomSummary;

/// One result card. Carries the searched slot alongside the room so the
/// reservation modal can be opened without another lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomCard {
    pub room: RoomSummary,
    pub slot_date: String,
    pub start_hour: String,
    pub end_hour: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchResultsView {
    #[default]
    Idle,
    Loading,
    /// "No Available Rooms" panel, zero cards.
    Empty,
    Rooms(Vec<RoomCard>),
    /// Static error panel; any previous cards are gone.
    Error(String),
}

impl SearchResultsView {
    pub fn cards(&self) -> &[RoomCard] {
        match self {
            SearchResultsView::Rooms(cards) => cards,
            _ => &[],
        }
    }
}

/// Everything the confirmation modal displays, pre-formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationModalView {
    pub room_num: String,
    pub building_name: String,
    pub floor: i64,
    pub capacity: i64,
    pub slot_date: String,
    pub time_label: String,
}

/// 24-hour index to a 12-hour clock label.
pub fn format_hour(hour: u8) -> String {
    match hour {
        0 => "12:00 AM".to_string(),
        1..=11 => format!("{hour}:00 AM"),
        12 => "12:00 PM".to_string(),
        _ => format!("{}:00 PM", hour - 12),
    }
}

pub fn format_time_slot(start_hour: u8, end_hour: u8) -> String {
    format!("{} - {}", format_hour(start_hour), format_hour(end_hour))
}

/// Zero-padded one-hour window, e.g. `format_hour_range_24(9)` is
/// "09:00 - 10:00". Used for schedule-style listings.
pub fn format_hour_range_24(hour: u8) -> String {
    format!("{:02}:00 - {:02}:00", hour, hour + 1)
}
