use std::time::Duration;

use iced::widget::scrollable::AbsoluteOffset;
use iced::Task;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::catalog::{bootstrap, Catalog};
use crate::detail_handlers;
use crate::explore::ExplorePage;
use crate::fetch::{FetchRequest, Ticket};
use crate::home::HomePage;
use crate::images::ImageCache;
use crate::media::{
    CarouselSlot, FilterSet, GenreList, MediaSummary, Message, Paged, ScrollDirection,
};
use crate::paging::PageRequest;
use crate::router::Route;
use crate::search::SearchPage;
use crate::tabs::COMMIT_DELAY_MS;
use crate::tmdb::{genre_list_path, ApiError, TmdbClient, UPCOMING_PATH};
use crate::{Boot, Cinescope, PageState, MAIN_SCROLL_ID};

/// Scroll position, as a fraction of the page, that triggers the next page load.
const NEXT_PAGE_THRESHOLD: f32 = 0.95;
const HEADER_SEARCH_CLOSE_DELAY: Duration = Duration::from_secs(1);

pub fn handle_message(app: &mut Cinescope, message: Message) -> Task<Message> {
    match message {
        Message::Setup(_) => Task::none(),
        Message::CatalogReady(result) => handle_catalog_ready(app, result),
        Message::RetryBootstrap => start_bootstrap(app),
        Message::Navigate(route) => handle_navigate(app, route),
        Message::NavigateBack => handle_navigate_back(app),
        Message::MainScrolled { offset, relative } => handle_main_scrolled(app, offset, relative),
        Message::ToggleHeaderSearch => {
            app.header.search_open = !app.header.search_open;
            Task::none()
        }
        Message::HeaderQueryChanged(query) => {
            app.header.query = query;
            Task::none()
        }
        Message::HeaderSearchSubmit => handle_header_search_submit(app),
        Message::CloseHeaderSearch => {
            app.header.search_open = false;
            Task::none()
        }
        Message::HeroQueryChanged(query) => {
            if let PageState::Home(home) = &mut app.page {
                home.query = query;
            }
            Task::none()
        }
        Message::HeroSearchSubmit => handle_hero_search_submit(app),
        Message::HeroLoaded(ticket, result) => handle_hero_loaded(app, ticket, result),
        Message::TabSelected(slot, index) => handle_tab_selected(app, slot, index),
        Message::TabCommitted(slot, ticket) => {
            if let PageState::Home(home) = &mut app.page {
                if let Some(feed) = home.feed_mut(slot) {
                    feed.tabs.commit(ticket);
                }
            }
            Task::none()
        }
        Message::CarouselLoaded(slot, ticket, result) => {
            handle_carousel_loaded(app, slot, ticket, result)
        }
        Message::CarouselScrolled(slot, viewport) => {
            app.carousels.insert(slot, viewport);
            Task::none()
        }
        Message::ScrollCarousel(slot, direction) => handle_scroll_carousel(app, slot, direction),
        Message::DetailsLoaded(ticket, result) => {
            detail_handlers::handle_details_loaded(app, ticket, result)
        }
        Message::CreditsLoaded(ticket, result) => {
            detail_handlers::handle_credits_loaded(app, ticket, result)
        }
        Message::VideosLoaded(ticket, result) => {
            detail_handlers::handle_videos_loaded(app, ticket, result)
        }
        Message::OpenVideo(video) => detail_handlers::handle_open_video(app, video),
        Message::CloseVideo => detail_handlers::handle_close_video(app),
        Message::WatchOnYoutube(url) => detail_handlers::handle_watch_on_youtube(url),
        Message::BrowserOpened(result) => {
            if let Err(error) = result {
                warn!(%error, "could not open browser");
            }
            Task::none()
        }
        Message::ListPageLoaded(ticket, result) => handle_list_page_loaded(app, ticket, result),
        Message::ExploreGenresLoaded(ticket, result) => {
            handle_explore_genres_loaded(app, ticket, result)
        }
        Message::ToggleGenreFilter(id) => update_filters(app, |page| page.toggle_genre(id)),
        Message::ClearGenreFilter => update_filters(app, ExplorePage::clear_genres),
        Message::SetSortFilter(sort) => update_filters(app, |page| page.set_sort(Some(sort))),
        Message::ClearSortFilter => update_filters(app, |page| page.set_sort(None)),
        Message::ImageLoaded(url, result) => handle_image_loaded(app, url, result),
    }
}

/// Performs a GET against the API and wraps the outcome with `on_done`.
pub fn spawn_get<T, F>(
    client: &TmdbClient,
    path: String,
    params: Vec<(String, String)>,
    on_done: F,
) -> Task<Message>
where
    T: DeserializeOwned + Send + 'static,
    F: FnOnce(Result<T, ApiError>) -> Message + Send + 'static,
{
    let client = client.clone();
    Task::perform(async move { client.get::<T>(&path, &params).await }, on_done)
}

/// Issues a single-resource request, or nothing when the slot is already
/// pointed at that path.
pub fn spawn_fetch<T, F>(client: &TmdbClient, request: Option<FetchRequest>, wrap: F) -> Task<Message>
where
    T: DeserializeOwned + Send + 'static,
    F: FnOnce(Ticket, Result<T, ApiError>) -> Message + Send + 'static,
{
    let Some(FetchRequest { ticket, path }) = request else {
        return Task::none();
    };
    spawn_get(client, path, Vec::new(), move |result| wrap(ticket, result))
}

fn spawn_page(client: &TmdbClient, request: PageRequest) -> Task<Message> {
    let ticket = request.ticket;
    spawn_get(client, request.endpoint, request.params, move |result| {
        Message::ListPageLoaded(ticket, result)
    })
}

/// Starts loading the poster of every renderable item.
pub fn load_posters<'a>(
    images: &mut ImageCache,
    catalog: &Catalog,
    items: impl IntoIterator<Item = &'a MediaSummary>,
) -> Task<Message> {
    let tasks: Vec<Task<Message>> = items
        .into_iter()
        .filter(|item| !item.is_person())
        .filter_map(|item| item.poster_path.as_deref())
        .map(|path| images.load(catalog.poster_url(path)))
        .collect();
    Task::batch(tasks)
}

pub fn start_bootstrap(app: &mut Cinescope) -> Task<Message> {
    let Some(client) = app.client.clone() else {
        return Task::none();
    };
    app.boot = Boot::Initializing;
    info!("bootstrapping catalog");
    Task::perform(bootstrap(client), Message::CatalogReady)
}

fn handle_catalog_ready(app: &mut Cinescope, result: Result<Catalog, ApiError>) -> Task<Message> {
    match result {
        Ok(catalog) => {
            app.boot = Boot::Ready(catalog);
            enter_route(app)
        }
        Err(error) => {
            warn!(%error, "bootstrap failed");
            app.boot = Boot::Failed(String::from(bootstrap_hint(&error)));
            Task::none()
        }
    }
}

/// One line shown under the generic message on the bootstrap error screen.
fn bootstrap_hint(error: &ApiError) -> &'static str {
    match error {
        ApiError::Unauthorized => "Check your TMDB API key in the settings file or TMDB_API_KEY.",
        _ => "Could not load the TMDB catalog.",
    }
}

fn handle_navigate(app: &mut Cinescope, route: Route) -> Task<Message> {
    if route == app.route {
        return Task::none();
    }
    let previous = std::mem::replace(&mut app.route, route);
    app.history.push(previous);
    enter_route(app)
}

fn handle_navigate_back(app: &mut Cinescope) -> Task<Message> {
    let Some(previous) = app.history.pop() else {
        return Task::none();
    };
    app.route = previous;
    enter_route(app)
}

/// Mounts a fresh page for the current route and issues its requests.
pub fn enter_route(app: &mut Cinescope) -> Task<Message> {
    app.header.reset_scroll();
    app.carousels.clear();
    let to_top = iced::widget::operation::scroll_to(
        iced::widget::Id::new(MAIN_SCROLL_ID),
        AbsoluteOffset { x: 0.0, y: 0.0 },
    );

    if !matches!(app.boot, Boot::Ready(_)) {
        return to_top;
    }
    let Some(client) = app.client.clone() else {
        return to_top;
    };
    info!(route = %app.route, "entering page");

    let load = match app.route.clone() {
        Route::Home => {
            let mut home = HomePage::default();
            let mut tasks = vec![spawn_fetch(
                &client,
                home.hero.request(UPCOMING_PATH),
                Message::HeroLoaded,
            )];
            for feed in &mut home.feeds {
                let slot = feed.slot;
                tasks.push(spawn_fetch(&client, feed.refresh(), move |ticket, result| {
                    Message::CarouselLoaded(slot, ticket, result)
                }));
            }
            app.page = PageState::Home(home);
            Task::batch(tasks)
        }
        Route::Details(media_type, id) => {
            detail_handlers::enter_details(app, &client, media_type, id)
        }
        Route::Search(query) => {
            let mut page = SearchPage::new(query);
            let request = page.start();
            app.page = PageState::Search(page);
            spawn_page(&client, request)
        }
        Route::Explore(media_type) => {
            let mut page = ExplorePage::new(media_type);
            let genres = spawn_fetch(
                &client,
                page.genres.request(genre_list_path(media_type)),
                Message::ExploreGenresLoaded,
            );
            let request = page.apply(FilterSet::default());
            app.page = PageState::Explore(page);
            Task::batch([genres, spawn_page(&client, request)])
        }
        Route::NotFound(path) => {
            warn!(%path, "unknown route");
            app.page = PageState::NotFound(path);
            Task::none()
        }
    };

    Task::batch([to_top, load])
}

fn handle_main_scrolled(app: &mut Cinescope, offset: f32, relative: f32) -> Task<Message> {
    app.header.scrolled(offset);
    if relative >= NEXT_PAGE_THRESHOLD {
        return load_next_page(app);
    }
    Task::none()
}

fn load_next_page(app: &mut Cinescope) -> Task<Message> {
    let Some(client) = app.client.clone() else {
        return Task::none();
    };
    let list = match &mut app.page {
        PageState::Search(page) => &mut page.list,
        PageState::Explore(page) => &mut page.list,
        _ => return Task::none(),
    };
    let Some(request) = list.load_next_page() else {
        return Task::none();
    };
    debug!(query = ?list.query(), page = list.page_counter(), "infinite scroll");
    spawn_page(&client, request)
}

fn submit_search(query: &str) -> Option<Route> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }
    Some(Route::Search(query.to_string()))
}

fn handle_header_search_submit(app: &mut Cinescope) -> Task<Message> {
    let Some(route) = submit_search(&app.header.query) else {
        return Task::none();
    };
    let close = Task::perform(tokio::time::sleep(HEADER_SEARCH_CLOSE_DELAY), |_| {
        Message::CloseHeaderSearch
    });
    Task::batch([handle_navigate(app, route), close])
}

fn handle_hero_search_submit(app: &mut Cinescope) -> Task<Message> {
    let route = match &app.page {
        PageState::Home(home) => submit_search(&home.query),
        _ => None,
    };
    match route {
        Some(route) => handle_navigate(app, route),
        None => Task::none(),
    }
}

fn handle_hero_loaded(
    app: &mut Cinescope,
    ticket: Ticket,
    result: Result<Paged<MediaSummary>, ApiError>,
) -> Task<Message> {
    let (PageState::Home(home), Boot::Ready(catalog)) = (&mut app.page, &app.boot) else {
        return Task::none();
    };
    if !home.hero.settle(ticket, result) {
        return Task::none();
    }
    match home.choose_backdrop() {
        Some(path) => app.images.load(catalog.backdrop_url(path)),
        None => Task::none(),
    }
}

fn handle_tab_selected(app: &mut Cinescope, slot: CarouselSlot, index: usize) -> Task<Message> {
    let Some(client) = app.client.clone() else {
        return Task::none();
    };
    let PageState::Home(home) = &mut app.page else {
        return Task::none();
    };
    let Some(feed) = home.feed_mut(slot) else {
        return Task::none();
    };
    let Some((commit_ticket, request)) = feed.select(index) else {
        return Task::none();
    };

    app.carousels.remove(&slot);
    let fetch = spawn_fetch(&client, request, move |ticket, result| {
        Message::CarouselLoaded(slot, ticket, result)
    });
    let commit = Task::perform(
        tokio::time::sleep(Duration::from_millis(COMMIT_DELAY_MS)),
        move |_| Message::TabCommitted(slot, commit_ticket),
    );
    let rewind = iced::widget::operation::scroll_to(
        iced::widget::Id::new(slot.scroll_id()),
        AbsoluteOffset { x: 0.0, y: 0.0 },
    );
    Task::batch([fetch, commit, rewind])
}

fn handle_carousel_loaded(
    app: &mut Cinescope,
    slot: CarouselSlot,
    ticket: Ticket,
    result: Result<Paged<MediaSummary>, ApiError>,
) -> Task<Message> {
    let Boot::Ready(catalog) = &app.boot else {
        return Task::none();
    };
    let fetch = match &mut app.page {
        PageState::Home(home) => home.feed_mut(slot).map(|feed| &mut feed.fetch),
        PageState::Details(page) => page.carousel_mut(slot),
        _ => None,
    };
    let Some(fetch) = fetch else {
        return Task::none();
    };
    if !fetch.settle(ticket, result) {
        return Task::none();
    }
    match fetch.data() {
        Some(page) => load_posters(&mut app.images, catalog, &page.results),
        None => Task::none(),
    }
}

fn handle_scroll_carousel(
    app: &mut Cinescope,
    slot: CarouselSlot,
    direction: ScrollDirection,
) -> Task<Message> {
    let viewport = app.carousels.entry(slot).or_default();
    viewport.offset = viewport.target(direction);
    iced::widget::operation::scroll_to(
        iced::widget::Id::new(slot.scroll_id()),
        AbsoluteOffset {
            x: viewport.offset,
            y: 0.0,
        },
    )
}

fn handle_list_page_loaded(
    app: &mut Cinescope,
    ticket: Ticket,
    result: Result<Paged<MediaSummary>, ApiError>,
) -> Task<Message> {
    let Boot::Ready(catalog) = &app.boot else {
        return Task::none();
    };
    let list = match &mut app.page {
        PageState::Search(page) => &mut page.list,
        PageState::Explore(page) => &mut page.list,
        _ => return Task::none(),
    };
    if !list.settle(ticket, result) {
        return Task::none();
    }
    load_posters(&mut app.images, catalog, list.items())
}

fn handle_explore_genres_loaded(
    app: &mut Cinescope,
    ticket: Ticket,
    result: Result<GenreList, ApiError>,
) -> Task<Message> {
    if let PageState::Explore(page) = &mut app.page {
        page.genres.settle(ticket, result);
    }
    Task::none()
}

fn update_filters(
    app: &mut Cinescope,
    change: impl FnOnce(&mut ExplorePage) -> PageRequest,
) -> Task<Message> {
    let Some(client) = app.client.clone() else {
        return Task::none();
    };
    let PageState::Explore(page) = &mut app.page else {
        return Task::none();
    };
    let request = change(page);
    info!(filters = ?page.list.filters(), "explore filters changed");
    spawn_page(&client, request)
}

fn handle_image_loaded(
    app: &mut Cinescope,
    url: String,
    result: Result<iced::widget::image::Handle, String>,
) -> Task<Message> {
    match result {
        Ok(handle) => app.images.insert(url, handle),
        Err(error) => {
            warn!(%url, %error, "image failed to load");
            app.images.mark_failed(url);
        }
    }
    Task::none()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bootstrap_hint_names_the_key_on_401() {
        assert!(bootstrap_hint(&ApiError::Unauthorized).contains("API key"));
        assert!(!bootstrap_hint(&ApiError::Status(500)).contains("API key"));
    }

    #[test]
    fn blank_queries_do_not_navigate() {
        assert_eq!(submit_search("   "), None);
        assert_eq!(
            submit_search("  blade runner "),
            Some(Route::Search(String::from("blade runner")))
        );
    }
}
