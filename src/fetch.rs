use std::sync::atomic::{AtomicU64, Ordering};

use tracing::warn;

use crate::tmdb::ApiError;

pub const GENERIC_ERROR: &str = "Something went wrong!";

static NEXT_TICKET: AtomicU64 = AtomicU64::new(1);

/// Identity of one issued request. Tickets are unique for the lifetime of the
/// process, so a response can only ever be matched by the slot that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn issue() -> Self {
        Self(NEXT_TICKET.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug, Clone)]
pub enum FetchState<T> {
    Pending,
    Loaded(T),
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub ticket: Ticket,
    pub path: String,
}

/// A single-resource fetch slot keyed by its resource path.
#[derive(Debug, Clone)]
pub struct Fetch<T> {
    path: Option<String>,
    in_flight: Option<Ticket>,
    state: FetchState<T>,
}

impl<T> Default for Fetch<T> {
    fn default() -> Self {
        Self {
            path: None,
            in_flight: None,
            state: FetchState::Pending,
        }
    }
}

impl<T> Fetch<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Points the slot at `path`. Returns the request to perform, or `None` if
    /// the path is already the current one.
    pub fn request(&mut self, path: impl Into<String>) -> Option<FetchRequest> {
        let path = path.into();
        if self.path.as_deref() == Some(path.as_str()) {
            return None;
        }
        let ticket = Ticket::issue();
        self.path = Some(path.clone());
        self.in_flight = Some(ticket);
        self.state = FetchState::Pending;
        Some(FetchRequest { ticket, path })
    }

    /// Applies a response. Returns `false` when the ticket is stale or was
    /// already settled.
    pub fn settle(&mut self, ticket: Ticket, result: Result<T, ApiError>) -> bool {
        if self.in_flight != Some(ticket) {
            warn!(?ticket, path = ?self.path, "discarding stale response");
            return false;
        }
        self.in_flight = None;
        self.state = match result {
            Ok(data) => FetchState::Loaded(data),
            Err(error) => {
                warn!(path = ?self.path, %error, "fetch failed");
                FetchState::Failed(String::from(GENERIC_ERROR))
            }
        };
        true
    }

    pub fn state(&self) -> &FetchState<T> {
        &self.state
    }

    pub fn data(&self) -> Option<&T> {
        match &self.state {
            FetchState::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, FetchState::Pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tickets_are_unique() {
        let a = Ticket::issue();
        let b = Ticket::issue();
        assert_ne!(a, b);
    }

    #[test]
    fn new_path_enters_pending_and_clears_data() {
        let mut fetch: Fetch<u32> = Fetch::new();
        let first = fetch.request("/movie/popular").unwrap();
        assert!(fetch.settle(first.ticket, Ok(7)));
        assert_eq!(fetch.data(), Some(&7));

        let second = fetch.request("/tv/popular").unwrap();
        assert_eq!(second.path, "/tv/popular");
        assert!(fetch.is_pending());
        assert!(fetch.data().is_none());
        assert!(!matches!(fetch.state(), FetchState::Failed(_)));
    }

    #[test]
    fn same_path_does_not_refetch() {
        let mut fetch: Fetch<u32> = Fetch::new();
        assert!(fetch.request("/movie/upcoming").is_some());
        assert!(fetch.request("/movie/upcoming").is_none());
    }

    #[test]
    fn failure_stores_generic_message_without_data() {
        let mut fetch: Fetch<u32> = Fetch::new();
        let req = fetch.request("/movie/1").unwrap();
        assert!(fetch.settle(req.ticket, Err(ApiError::Status(500))));
        assert!(matches!(fetch.state(), FetchState::Failed(m) if m == GENERIC_ERROR));
        assert!(fetch.data().is_none());
    }

    #[test]
    fn settles_exactly_once() {
        let mut fetch: Fetch<u32> = Fetch::new();
        let req = fetch.request("/movie/1").unwrap();
        assert!(fetch.settle(req.ticket, Ok(1)));
        assert!(!fetch.settle(req.ticket, Err(ApiError::Status(404))));
        assert_eq!(fetch.data(), Some(&1));
    }

    #[test]
    fn stale_response_is_ignored() {
        let mut fetch: Fetch<&str> = Fetch::new();
        let day = fetch.request("/trending/movie/day").unwrap();
        let week = fetch.request("/trending/movie/week").unwrap();

        assert!(fetch.settle(week.ticket, Ok("week")));
        assert!(!fetch.settle(day.ticket, Ok("day")));
        assert_eq!(fetch.data(), Some(&"week"));
    }

    #[test]
    fn stale_failure_does_not_clobber_pending_request() {
        let mut fetch: Fetch<&str> = Fetch::new();
        let old = fetch.request("/a").unwrap();
        let _new = fetch.request("/b").unwrap();
        assert!(!fetch.settle(old.ticket, Err(ApiError::Status(500))));
        assert!(fetch.is_pending());
    }
}
