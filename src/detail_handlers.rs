use iced::Task;
use tracing::info;

use crate::details::DetailsPage;
use crate::fetch::Ticket;
use crate::handlers::spawn_fetch;
use crate::media::{CarouselSlot, Credits, MediaDetails, MediaId, MediaType, Message, Video, VideoList};
use crate::tmdb::{ApiError, TmdbClient};
use crate::video_popup::open_in_browser;
use crate::{Boot, Cinescope, PageState};

pub fn enter_details(
    app: &mut Cinescope,
    client: &TmdbClient,
    media_type: MediaType,
    id: MediaId,
) -> Task<Message> {
    let mut page = DetailsPage::new(media_type, id);
    let requests = page.start();
    app.page = PageState::Details(page);

    Task::batch([
        spawn_fetch(client, requests.details, Message::DetailsLoaded),
        spawn_fetch(client, requests.credits, Message::CreditsLoaded),
        spawn_fetch(client, requests.videos, Message::VideosLoaded),
        spawn_fetch(client, requests.similar, |ticket, result| {
            Message::CarouselLoaded(CarouselSlot::Similar, ticket, result)
        }),
        spawn_fetch(client, requests.recommendations, |ticket, result| {
            Message::CarouselLoaded(CarouselSlot::Recommendations, ticket, result)
        }),
    ])
}

pub fn handle_details_loaded(
    app: &mut Cinescope,
    ticket: Ticket,
    result: Result<MediaDetails, ApiError>,
) -> Task<Message> {
    let (PageState::Details(page), Boot::Ready(catalog)) = (&mut app.page, &app.boot) else {
        return Task::none();
    };
    if !page.details.settle(ticket, result) {
        return Task::none();
    }
    let Some(details) = page.details.data() else {
        return Task::none();
    };

    let mut tasks = Vec::new();
    if let Some(path) = details.poster_path.as_deref() {
        tasks.push(app.images.load(catalog.poster_url(path)));
    }
    if let Some(path) = details.backdrop_path.as_deref() {
        tasks.push(app.images.load(catalog.backdrop_url(path)));
    }
    Task::batch(tasks)
}

pub fn handle_credits_loaded(
    app: &mut Cinescope,
    ticket: Ticket,
    result: Result<Credits, ApiError>,
) -> Task<Message> {
    let (PageState::Details(page), Boot::Ready(catalog)) = (&mut app.page, &app.boot) else {
        return Task::none();
    };
    if !page.credits.settle(ticket, result) {
        return Task::none();
    }
    let Some(credits) = page.credits.data() else {
        return Task::none();
    };

    let tasks: Vec<Task<Message>> = credits
        .cast
        .iter()
        .filter_map(|member| member.profile_path.as_deref())
        .map(|path| app.images.load(catalog.profile_url(path)))
        .collect();
    Task::batch(tasks)
}

pub fn handle_videos_loaded(
    app: &mut Cinescope,
    ticket: Ticket,
    result: Result<VideoList, ApiError>,
) -> Task<Message> {
    let PageState::Details(page) = &mut app.page else {
        return Task::none();
    };
    if !page.videos.settle(ticket, result) {
        return Task::none();
    }
    let Some(videos) = page.videos.data() else {
        return Task::none();
    };

    let tasks: Vec<Task<Message>> = videos
        .results
        .iter()
        .map(|video| app.images.load(video.thumbnail_url()))
        .collect();
    Task::batch(tasks)
}

pub fn handle_open_video(app: &mut Cinescope, video: Video) -> Task<Message> {
    let PageState::Details(page) = &mut app.page else {
        return Task::none();
    };
    info!(key = %video.key, "opening video");
    let thumbnail = app.images.load(video.thumbnail_url());
    page.open_video(video);
    thumbnail
}

pub fn handle_close_video(app: &mut Cinescope) -> Task<Message> {
    if let PageState::Details(page) = &mut app.page {
        page.close_video();
    }
    Task::none()
}

pub fn handle_watch_on_youtube(url: String) -> Task<Message> {
    Task::perform(open_in_browser(url), Message::BrowserOpened)
}
