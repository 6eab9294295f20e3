//! Client side cache for remote reads.
//!
//! A [Query] holds the latest result of one read against the gateway, refetches it every
//! [POLL_INTERVAL_MS] and whenever it is invalidated after a successful mutation. Results
//! are only ever replaced as a whole.

use crate::{
    common::newtypes::PostId,
    frontend::utils::errors::{FrontendError, FrontendResult},
};
use leptos::{prelude::*, task::spawn_local};
use leptos_use::use_interval_fn;
use log::{debug, warn};
use std::{
    fmt::{Display, Formatter},
    future::Future,
    pin::Pin,
    sync::Arc,
};

pub const POLL_INTERVAL_MS: u64 = 5_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Comments(PostId),
    Votes(PostId),
}

impl Display for QueryKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryKey::Comments(id) => write!(f, "comments of post {id}"),
            QueryKey::Votes(id) => write!(f, "votes of post {id}"),
        }
    }
}

/// Sequence number handed out when a fetch starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

/// Result of the most recent fetch which was applied.
///
/// Fetches may resolve out of order. A response is only applied if no response to a
/// later request has been applied yet, so slow responses never overwrite fresher data.
/// A failed fetch keeps the data of the last successful one.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState<T> {
    data: Option<T>,
    error: Option<FrontendError>,
    issued: u64,
    applied: u64,
    stale: bool,
}

impl<T> Default for QueryState<T> {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
            issued: 0,
            applied: 0,
            stale: true,
        }
    }
}

impl<T> QueryState<T> {
    pub fn begin(&mut self) -> FetchTicket {
        self.issued += 1;
        FetchTicket(self.issued)
    }

    /// Returns false if the response was dropped because a newer one was already applied.
    pub fn resolve(&mut self, ticket: FetchTicket, result: FrontendResult<T>) -> bool {
        if ticket.0 <= self.applied {
            return false;
        }
        self.applied = ticket.0;
        match result {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
                self.stale = false;
            }
            Err(e) => self.error = Some(e),
        }
        true
    }

    pub fn invalidate(&mut self) {
        self.stale = true;
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&FrontendError> {
        self.error.as_ref()
    }

    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Data is shown but was invalidated, and the refetch has not come back yet.
    pub fn is_refreshing(&self) -> bool {
        self.stale && self.data.is_some() && self.error.is_none()
    }

    /// Nothing has arrived yet, neither data nor an error.
    pub fn is_loading(&self) -> bool {
        self.data.is_none() && self.error.is_none()
    }
}

type Fetcher<T> =
    Arc<dyn Fn() -> Pin<Box<dyn Future<Output = FrontendResult<T>> + Send>> + Send + Sync>;

/// Handle to a polled read, cheap to copy into views and actions.
pub struct Query<T: Send + Sync + 'static> {
    key: QueryKey,
    state: RwSignal<QueryState<T>>,
    fetcher: StoredValue<Fetcher<T>>,
}

impl<T: Send + Sync + 'static> Clone for Query<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for Query<T> {}

impl<T: Send + Sync + 'static> Query<T> {
    /// Tracked access to the current state.
    pub fn with<U>(&self, f: impl FnOnce(&QueryState<T>) -> U) -> U {
        self.state.with(f)
    }

    /// Start a fetch in the background. Does nothing once the owning view is gone.
    pub fn refetch(&self) {
        let Some(ticket) = self.state.try_update(|s| s.begin()) else {
            return;
        };
        let Some(fut) = self.fetcher.try_with_value(|f| f()) else {
            return;
        };
        let state = self.state;
        let key = self.key;
        spawn_local(async move {
            let result = fut.await;
            if let Err(e) = &result {
                warn!("Failed to fetch {key}: {e}");
            }
            let applied = state.try_update(|s| s.resolve(ticket, result));
            if applied == Some(false) {
                debug!("Dropped outdated response for {key}");
            }
        });
    }

    /// Mark the cached result as outdated and schedule a refetch. Callers don't wait for
    /// the new data.
    pub fn invalidate(&self) {
        self.state.update(|s| s.invalidate());
        self.refetch();
    }
}

/// Create a query which starts fetching once the page is running in the browser and
/// then polls. Nothing is fetched during server side rendering, as effects and
/// intervals only run on the client.
pub fn use_query<T, F, Fut>(key: QueryKey, fetcher: F) -> Query<T>
where
    T: Send + Sync + 'static,
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = FrontendResult<T>> + Send + 'static,
{
    let fetcher: Fetcher<T> = Arc::new(move || Box::pin(fetcher()));
    let query = Query {
        key,
        state: RwSignal::new(QueryState::default()),
        fetcher: StoredValue::new(fetcher),
    };
    Effect::new(move |_| untrack(|| query.refetch()));
    let _ = use_interval_fn(move || query.refetch(), POLL_INTERVAL_MS);
    query
}
