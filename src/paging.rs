use tracing::{debug, warn};

use crate::fetch::{Ticket, GENERIC_ERROR};
use crate::media::{FilterSet, MediaSummary, MediaType, Paged};
use crate::tmdb::{discover_path, ApiError, SEARCH_PATH};

/// What a paginated listing is about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListQuery {
    Search(String),
    Discover(MediaType),
}

impl ListQuery {
    pub fn endpoint(&self) -> String {
        match self {
            ListQuery::Search(_) => String::from(SEARCH_PATH),
            ListQuery::Discover(media_type) => discover_path(*media_type),
        }
    }

    fn params(&self, filters: &FilterSet, page: u32) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let ListQuery::Search(query) = self {
            params.push((String::from("query"), query.clone()));
        }
        params.push((String::from("page"), page.to_string()));
        if let ListQuery::Discover(_) = self {
            params.extend(filters.query_params());
        }
        params
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoadKind {
    First,
    Next,
}

#[derive(Debug, Clone)]
pub struct PageRequest {
    pub ticket: Ticket,
    pub endpoint: String,
    pub params: Vec<(String, String)>,
    pub page: u32,
}

/// Accumulating "infinite scroll" listing.
#[derive(Debug, Clone)]
pub struct PagedList {
    query: ListQuery,
    filters: FilterSet,
    items: Vec<MediaSummary>,
    page: u32,
    total_pages: u32,
    total_results: u32,
    loaded: bool,
    in_flight: Option<(Ticket, LoadKind)>,
    error: Option<String>,
}

impl PagedList {
    pub fn new(query: ListQuery) -> Self {
        Self {
            query,
            filters: FilterSet::default(),
            items: Vec::new(),
            page: 1,
            total_pages: 0,
            total_results: 0,
            loaded: false,
            in_flight: None,
            error: None,
        }
    }

    /// Discards everything accumulated so far and requests page 1.
    pub fn load_first_page(&mut self, query: ListQuery, filters: FilterSet) -> PageRequest {
        self.query = query;
        self.filters = filters;
        self.items.clear();
        self.page = 1;
        self.total_pages = 0;
        self.total_results = 0;
        self.loaded = false;
        self.error = None;
        self.issue(LoadKind::First)
    }

    /// Requests the page at the counter, unless a request is in flight, the
    /// last response said there is nothing more, or a load failed. A failure
    /// holds until the next [`PagedList::load_first_page`].
    pub fn load_next_page(&mut self) -> Option<PageRequest> {
        if self.in_flight.is_some() || self.error.is_some() || !self.has_more() {
            return None;
        }
        Some(self.issue(LoadKind::Next))
    }

    fn issue(&mut self, kind: LoadKind) -> PageRequest {
        let ticket = Ticket::issue();
        self.in_flight = Some((ticket, kind));
        debug!(query = ?self.query, page = self.page, "requesting page");
        PageRequest {
            ticket,
            endpoint: self.query.endpoint(),
            params: self.query.params(&self.filters, self.page),
            page: self.page,
        }
    }

    /// Applies a page response. Returns `false` for stale tickets.
    pub fn settle(&mut self, ticket: Ticket, result: Result<Paged<MediaSummary>, ApiError>) -> bool {
        let kind = match self.in_flight {
            Some((current, kind)) if current == ticket => kind,
            _ => {
                warn!(?ticket, query = ?self.query, "discarding stale page");
                return false;
            }
        };
        self.in_flight = None;

        match result {
            Ok(page) => {
                match kind {
                    LoadKind::First => self.items = page.results,
                    LoadKind::Next => self.items.extend(page.results),
                }
                self.total_pages = page.total_pages;
                self.total_results = page.total_results;
                self.page += 1;
                self.loaded = true;
                self.error = None;
            }
            Err(error) => {
                warn!(query = ?self.query, %error, "page fetch failed");
                self.error = Some(String::from(GENERIC_ERROR));
            }
        }
        true
    }

    pub fn has_more(&self) -> bool {
        self.loaded && self.page <= self.total_pages
    }

    /// Everything accumulated, including entries that are never rendered.
    pub fn items(&self) -> &[MediaSummary] {
        &self.items
    }

    pub fn visible_items(&self) -> impl Iterator<Item = &MediaSummary> {
        self.items.iter().filter(|item| !item.is_person())
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    pub fn page_counter(&self) -> u32 {
        self.page
    }

    pub fn total_results(&self) -> u32 {
        self.total_results
    }

    pub fn is_loading_first(&self) -> bool {
        matches!(self.in_flight, Some((_, LoadKind::First)))
    }

    pub fn is_loading_next(&self) -> bool {
        matches!(self.in_flight, Some((_, LoadKind::Next)))
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.loaded && self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::SortKey;

    fn item(id: u64, media_type: Option<MediaType>) -> MediaSummary {
        MediaSummary {
            id,
            media_type,
            title: Some(format!("Item {id}")),
            name: None,
            poster_path: None,
            backdrop_path: None,
            vote_average: 6.0,
            genre_ids: Vec::new(),
            release_date: None,
            first_air_date: None,
        }
    }

    fn page(ids: &[u64], total_pages: u32) -> Paged<MediaSummary> {
        Paged {
            page: 1,
            results: ids.iter().map(|id| item(*id, Some(MediaType::Movie))).collect(),
            total_pages,
            total_results: total_pages * 20,
        }
    }

    fn ids(list: &PagedList) -> Vec<u64> {
        list.items().iter().map(|i| i.id).collect()
    }

    fn param<'a>(request: &'a PageRequest, key: &str) -> Option<&'a str> {
        request
            .params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn first_page_replaces_and_advances_counter() {
        let mut list = PagedList::new(ListQuery::Search(String::from("alien")));
        let request = list.load_first_page(list.query().clone(), FilterSet::default());
        assert_eq!(request.endpoint, "/search/multi");
        assert_eq!(param(&request, "query"), Some("alien"));
        assert_eq!(param(&request, "page"), Some("1"));
        assert!(list.is_loading_first());

        assert!(list.settle(request.ticket, Ok(page(&[1, 2], 3))));
        assert_eq!(ids(&list), vec![1, 2]);
        assert_eq!(list.page_counter(), 2);
        assert!(list.has_more());
    }

    #[test]
    fn next_pages_append_in_order() {
        let mut list = PagedList::new(ListQuery::Discover(MediaType::Movie));
        let first = list.load_first_page(ListQuery::Discover(MediaType::Movie), FilterSet::default());
        list.settle(first.ticket, Ok(page(&[1, 2, 3], 3)));

        let second = list.load_next_page().unwrap();
        assert_eq!(second.page, 2);
        list.settle(second.ticket, Ok(page(&[4, 5], 3)));

        let third = list.load_next_page().unwrap();
        list.settle(third.ticket, Ok(page(&[6], 3)));

        assert_eq!(ids(&list), vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(list.page_counter(), 4);
        assert!(!list.has_more());
        assert!(list.load_next_page().is_none());
    }

    #[test]
    fn reload_discards_accumulated_results() {
        let mut list = PagedList::new(ListQuery::Discover(MediaType::Tv));
        let first = list.load_first_page(ListQuery::Discover(MediaType::Tv), FilterSet::default());
        list.settle(first.ticket, Ok(page(&[1, 2], 5)));
        let next = list.load_next_page().unwrap();
        list.settle(next.ticket, Ok(page(&[3], 5)));

        let mut filters = FilterSet::default();
        filters.sort_by = Some(SortKey::TitleAsc);
        filters.toggle_genre(18);
        let reload = list.load_first_page(ListQuery::Discover(MediaType::Tv), filters);
        assert!(list.items().is_empty());
        assert_eq!(list.page_counter(), 1);
        assert!(!list.has_more());
        assert_eq!(param(&reload, "page"), Some("1"));
        assert_eq!(param(&reload, "sort_by"), Some("original_title.asc"));
        assert_eq!(param(&reload, "with_genres"), Some("18"));

        list.settle(reload.ticket, Ok(page(&[9], 1)));
        assert_eq!(ids(&list), vec![9]);
    }

    #[test]
    fn next_page_keeps_filters() {
        let mut list = PagedList::new(ListQuery::Discover(MediaType::Movie));
        let mut filters = FilterSet::default();
        filters.toggle_genre(28);
        let first = list.load_first_page(ListQuery::Discover(MediaType::Movie), filters);
        list.settle(first.ticket, Ok(page(&[1], 2)));
        let next = list.load_next_page().unwrap();
        assert_eq!(param(&next, "with_genres"), Some("28"));
        assert_eq!(param(&next, "page"), Some("2"));
    }

    #[test]
    fn no_next_page_while_in_flight() {
        let mut list = PagedList::new(ListQuery::Discover(MediaType::Movie));
        let first = list.load_first_page(ListQuery::Discover(MediaType::Movie), FilterSet::default());
        assert!(list.load_next_page().is_none());
        list.settle(first.ticket, Ok(page(&[1], 4)));

        let _pending = list.load_next_page().unwrap();
        assert!(list.is_loading_next());
        assert!(list.load_next_page().is_none());
    }

    #[test]
    fn has_more_tracks_last_total_pages() {
        let mut list = PagedList::new(ListQuery::Search(String::from("x")));
        assert!(!list.has_more());
        let first = list.load_first_page(list.query().clone(), FilterSet::default());
        list.settle(first.ticket, Ok(page(&[1], 1)));
        assert_eq!(list.page_counter(), 2);
        assert!(!list.has_more());
    }

    #[test]
    fn stale_first_page_is_dropped_after_query_change() {
        let mut list = PagedList::new(ListQuery::Search(String::from("old")));
        let old = list.load_first_page(ListQuery::Search(String::from("old")), FilterSet::default());
        let new = list.load_first_page(ListQuery::Search(String::from("new")), FilterSet::default());

        assert!(!list.settle(old.ticket, Ok(page(&[100], 9))));
        assert!(list.items().is_empty());
        assert!(list.settle(new.ticket, Ok(page(&[1], 1))));
        assert_eq!(ids(&list), vec![1]);
    }

    #[test]
    fn people_are_hidden_but_still_counted() {
        let mut list = PagedList::new(ListQuery::Search(String::from("nolan")));
        let first = list.load_first_page(list.query().clone(), FilterSet::default());
        let mixed = Paged {
            page: 1,
            results: vec![
                item(1, Some(MediaType::Movie)),
                item(2, Some(MediaType::Person)),
                item(3, Some(MediaType::Tv)),
            ],
            total_pages: 2,
            total_results: 4,
        };
        list.settle(first.ticket, Ok(mixed));

        assert_eq!(list.items().len(), 3);
        let visible: Vec<u64> = list.visible_items().map(|i| i.id).collect();
        assert_eq!(visible, vec![1, 3]);
        assert_eq!(list.page_counter(), 2);
    }

    #[test]
    fn failed_next_page_keeps_previous_items() {
        let mut list = PagedList::new(ListQuery::Discover(MediaType::Movie));
        let first = list.load_first_page(ListQuery::Discover(MediaType::Movie), FilterSet::default());
        list.settle(first.ticket, Ok(page(&[1, 2], 3)));
        let next = list.load_next_page().unwrap();
        list.settle(next.ticket, Err(ApiError::Network(String::from("reset"))));

        assert_eq!(ids(&list), vec![1, 2]);
        assert_eq!(list.error(), Some(GENERIC_ERROR));
        assert_eq!(list.page_counter(), 2);
    }

    #[test]
    fn failed_next_page_is_not_requested_again() {
        let mut list = PagedList::new(ListQuery::Discover(MediaType::Movie));
        let first = list.load_first_page(ListQuery::Discover(MediaType::Movie), FilterSet::default());
        list.settle(first.ticket, Ok(page(&[1, 2], 5)));
        let next = list.load_next_page().unwrap();
        list.settle(next.ticket, Err(ApiError::Network(String::from("reset"))));

        for _ in 0..5 {
            assert!(list.load_next_page().is_none());
        }
        assert_eq!(list.page_counter(), 2);

        let reload = list.load_first_page(ListQuery::Discover(MediaType::Movie), FilterSet::default());
        list.settle(reload.ticket, Ok(page(&[1, 2], 5)));
        assert!(list.error().is_none());
        assert_eq!(list.load_next_page().map(|request| request.page), Some(2));
    }

    #[test]
    fn zero_results_is_empty() {
        let mut list = PagedList::new(ListQuery::Search(String::from("zzzz")));
        let first = list.load_first_page(list.query().clone(), FilterSet::default());
        assert!(!list.is_empty());
        list.settle(first.ticket, Ok(page(&[], 0)));
        assert!(list.is_empty());
        assert!(!list.has_more());
    }
}
