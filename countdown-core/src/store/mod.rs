//! The event store: list, create and delete.

mod http;

use std::future::Future;

use crate::error::CountdownResult;
use crate::event::{Event, NewEvent};

pub use http::HttpStore;

/// Remote persistence for events.
///
/// Every call is all-or-nothing; nothing is retried.
pub trait EventStore {
    /// All events, in the store's order.
    fn list(&self) -> impl Future<Output = CountdownResult<Vec<Event>>> + Send;

    fn create(&self, event: &NewEvent) -> impl Future<Output = CountdownResult<()>> + Send;

    fn delete(&self, id: &str) -> impl Future<Output = CountdownResult<()>> + Send;
}
