//! Stored countdown events and the create payload.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::date::{parse_event_date, wire_date};

/// An event as the store returns it from `GET /events`.
///
/// `date` keeps the wire text; it is only parsed when the event is
/// displayed, so one malformed record cannot spoil the rest of the list.
/// `days_left` is computed by the store; some deployments omit it, in which
/// case the view model works it out from the local clock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "eventId")]
    pub id: String,

    #[serde(rename = "eventName")]
    pub name: String,

    #[serde(rename = "eventDate")]
    pub date: String,

    #[serde(rename = "daysLeft", default, skip_serializing_if = "Option::is_none")]
    pub days_left: Option<i64>,
}

impl Event {
    /// The event date, if the wire text is a valid `YYYY-MM-DD`.
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        parse_event_date(&self.date).ok()
    }

    /// Whole days from `today` until the event (negative once it has passed).
    pub fn days_from(&self, today: NaiveDate) -> Option<i64> {
        self.calendar_date().map(|date| (date - today).num_days())
    }
}

/// Body of `POST /events`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEvent {
    #[serde(rename = "eventName")]
    pub name: String,

    #[serde(rename = "eventDate", with = "wire_date")]
    pub date: NaiveDate,
}

impl NewEvent {
    pub fn new(name: impl Into<String>, date: NaiveDate) -> Self {
        NewEvent {
            name: name.into(),
            date,
        }
    }
}
