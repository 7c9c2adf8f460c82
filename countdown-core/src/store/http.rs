//! REST client for the events API.
//!
//! `GET /events`, `POST /events` and `DELETE /events/{id}` relative to a base
//! URL, with an optional bearer token from a `SessionProvider`.

use reqwest::{Method, RequestBuilder, Response};
use url::Url;

use crate::error::{CountdownError, CountdownResult};
use crate::event::{Event, NewEvent};
use crate::session::{SessionProvider, SessionState};
use crate::store::EventStore;

pub struct HttpStore<P> {
    http: reqwest::Client,
    base_url: Url,
    session: P,
}

impl<P: SessionProvider> HttpStore<P> {
    pub fn new(base_url: &str, session: P) -> CountdownResult<Self> {
        Self::with_client(reqwest::Client::new(), base_url, session)
    }

    pub fn with_client(http: reqwest::Client, base_url: &str, session: P) -> CountdownResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| CountdownError::Config(format!("Invalid api_base '{base_url}': {e}")))?;

        if base_url.cannot_be_a_base() {
            return Err(CountdownError::Config(format!(
                "Invalid api_base '{base_url}': not a base URL"
            )));
        }

        Ok(HttpStore {
            http,
            base_url,
            session,
        })
    }

    /// `{base}/events[/{id}]`, with the id percent-encoded as one segment.
    fn events_url(&self, id: Option<&str>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("events");
            if let Some(id) = id {
                segments.push(id);
            }
        }
        url
    }

    /// Start a request, attaching the bearer token when the session has one.
    fn request(&self, method: Method, url: Url) -> CountdownResult<RequestBuilder> {
        let builder = self.http.request(method, url);

        match self.session.session() {
            SessionState::Anonymous => Ok(builder),
            SessionState::Authenticated(token) if !token.trim().is_empty() => {
                Ok(builder.bearer_auth(token.trim()))
            }
            SessionState::Authenticated(_) | SessionState::NotAuthenticated => {
                tracing::warn!("refusing request without an access token");
                Err(CountdownError::MissingToken)
            }
        }
    }

    async fn send(
        &self,
        method: Method,
        url: Url,
        body: Option<&NewEvent>,
    ) -> CountdownResult<Response> {
        tracing::debug!(%method, %url, "sending request");

        let mut builder = self.request(method.clone(), url.clone())?;
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let resp = builder.send().await?;
        let status = resp.status();

        if !status.is_success() {
            tracing::warn!(%method, %url, status = status.as_u16(), "request failed");
            return Err(CountdownError::Status(status.as_u16()));
        }

        Ok(resp)
    }
}

impl<P: SessionProvider + Sync> EventStore for HttpStore<P> {
    async fn list(&self) -> CountdownResult<Vec<Event>> {
        let resp = self.send(Method::GET, self.events_url(None), None).await?;
        let body = resp.bytes().await?;
        let events = decode_events(&body)?;

        tracing::debug!(count = events.len(), "listed events");
        Ok(events)
    }

    async fn create(&self, event: &NewEvent) -> CountdownResult<()> {
        self.send(Method::POST, self.events_url(None), Some(event)).await?;

        tracing::info!(name = %event.name, date = %event.date, "created event");
        Ok(())
    }

    async fn delete(&self, id: &str) -> CountdownResult<()> {
        self.send(Method::DELETE, self.events_url(Some(id)), None).await?;

        tracing::info!(id, "deleted event");
        Ok(())
    }
}

/// Parse a `GET /events` body. A body that is not an event array is a
/// serialization failure, not a transport one.
fn decode_events(body: &[u8]) -> CountdownResult<Vec<Event>> {
    serde_json::from_slice(body).map_err(|e| CountdownError::Serialization(e.to_string()))
}
