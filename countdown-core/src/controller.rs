//! Interaction state for one countdown session.
//!
//! The controller owns the in-memory event list and the new-event form.
//! Store calls are awaited one after another: an add resolves its create
//! before it re-fetches, and only then touches local state.

use rand::Rng;
use thiserror::Error;

use crate::date::parse_event_date;
use crate::error::{CountdownError, CountdownResult};
use crate::event::{Event, NewEvent};
use crate::store::EventStore;
use crate::view_model::{DecoratedEvent, Deriver};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// No fetch has succeeded yet.
    Loading,
    Loaded,
}

/// Pending input for a new event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventForm {
    pub name: String,
    pub date: String,
}

impl EventForm {
    pub fn is_blank(&self) -> bool {
        self.name.trim().is_empty() || self.date.trim().is_empty()
    }

    pub fn clear(&mut self) {
        self.name.clear();
        self.date.clear();
    }
}

/// A failure the user has to acknowledge.
#[derive(Debug, Error)]
pub enum Notice {
    #[error("Failed to add event")]
    AddFailed(#[source] CountdownError),

    #[error("Failed to delete")]
    DeleteFailed(#[source] CountdownError),
}

impl Notice {
    pub fn reason(&self) -> &CountdownError {
        match self {
            Notice::AddFailed(e) | Notice::DeleteFailed(e) => e,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    /// The name or date was empty; nothing was sent.
    Skipped,
}

/// What the presentation layer should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Loading,
    Empty,
    Events(Vec<DecoratedEvent>),
}

pub struct Controller<S> {
    store: S,
    events: Vec<Event>,
    state: LoadState,
    form: EventForm,
}

impl<S: EventStore> Controller<S> {
    pub fn new(store: S) -> Self {
        Controller {
            store,
            events: Vec::new(),
            state: LoadState::Loading,
            form: EventForm::default(),
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn form(&self) -> &EventForm {
        &self.form
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.form.name = name.into();
    }

    pub fn set_date(&mut self, date: impl Into<String>) {
        self.form.date = date.into();
    }

    /// Fetch the full list. A failure is logged and leaves the state as it was.
    pub async fn load(&mut self) -> CountdownResult<()> {
        match self.store.list().await {
            Ok(events) => {
                self.events = events;
                self.state = LoadState::Loaded;
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to fetch events");
                Err(e)
            }
        }
    }

    /// Submit the form: create, re-fetch, then clear the form.
    pub async fn add(&mut self) -> Result<AddOutcome, Notice> {
        if self.form.is_blank() {
            return Ok(AddOutcome::Skipped);
        }

        let date = parse_event_date(&self.form.date).map_err(Notice::AddFailed)?;
        let new_event = NewEvent::new(self.form.name.trim(), date);

        self.store
            .create(&new_event)
            .await
            .map_err(Notice::AddFailed)?;

        let updated = self.store.list().await.map_err(Notice::AddFailed)?;

        self.events = updated;
        self.state = LoadState::Loaded;
        self.form.clear();

        Ok(AddOutcome::Added)
    }

    /// Delete one event and drop it from the local list without re-fetching.
    pub async fn delete(&mut self, id: &str) -> Result<(), Notice> {
        self.store.delete(id).await.map_err(Notice::DeleteFailed)?;
        self.events.retain(|e| e.id != id);
        Ok(())
    }

    pub fn view<R: Rng>(&self, deriver: &mut Deriver<R>) -> View {
        match self.state {
            LoadState::Loading => View::Loading,
            LoadState::Loaded if self.events.is_empty() => View::Empty,
            LoadState::Loaded => View::Events(deriver.derive(&self.events)),
        }
    }
}
