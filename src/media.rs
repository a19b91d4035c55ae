use iced::widget::image::Handle;
use iced::Color;
use serde::{Deserialize, Serialize};

use crate::cards::CarouselViewport;
use crate::catalog::Catalog;
use crate::fetch::Ticket;
use crate::router::Route;
use crate::settings::SetupMessage;
use crate::tmdb::ApiError;

pub const BACKGROUND_NAVY: Color = Color::from_rgb(0.016, 0.082, 0.176);
pub const SURFACE_NAVY: Color = Color::from_rgb(0.067, 0.153, 0.271);
pub const ACCENT_PINK: Color = Color::from_rgb(0.855, 0.184, 0.408);
pub const ACCENT_ORANGE: Color = Color::from_rgb(0.973, 0.620, 0.0);
pub const TEXT_WHITE: Color = Color::from_rgb(1.0, 1.0, 1.0);
pub const TEXT_GRAY: Color = Color::from_rgb(0.702, 0.702, 0.702);

pub type MediaId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Tv,
    Person,
}

impl MediaType {
    pub fn path(self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Tv => "tv",
            MediaType::Person => "person",
        }
    }

    /// Only movies and TV shows have browsable pages.
    pub fn browsable(segment: &str) -> Option<Self> {
        match segment {
            "movie" => Some(MediaType::Movie),
            "tv" => Some(MediaType::Tv),
            _ => None,
        }
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenreList {
    #[serde(default)]
    pub genres: Vec<Genre>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Paged<T> {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub results: Vec<T>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}

/// One entry of a listing endpoint. Discover results carry no `media_type`.
#[derive(Debug, Clone, Deserialize)]
pub struct MediaSummary {
    pub id: MediaId,
    pub media_type: Option<MediaType>,
    pub title: Option<String>,
    pub name: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub vote_average: f32,
    #[serde(default)]
    pub genre_ids: Vec<u64>,
    pub release_date: Option<String>,
    pub first_air_date: Option<String>,
}

impl MediaSummary {
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or_default()
    }

    pub fn date(&self) -> Option<&str> {
        non_empty(self.release_date.as_deref()).or(non_empty(self.first_air_date.as_deref()))
    }

    pub fn is_person(&self) -> bool {
        self.media_type == Some(MediaType::Person)
    }

    pub fn route(&self, fallback: MediaType) -> Route {
        Route::Details(self.media_type.unwrap_or(fallback), self.id)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Creator {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MediaDetails {
    pub id: MediaId,
    pub title: Option<String>,
    pub name: Option<String>,
    pub tagline: Option<String>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub vote_average: f32,
    pub overview: Option<String>,
    pub status: Option<String>,
    pub release_date: Option<String>,
    pub first_air_date: Option<String>,
    pub runtime: Option<u32>,
    #[serde(default)]
    pub created_by: Vec<Creator>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
}

impl MediaDetails {
    pub fn display_title(&self) -> &str {
        self.name
            .as_deref()
            .or(self.title.as_deref())
            .unwrap_or_default()
    }

    pub fn date(&self) -> Option<&str> {
        non_empty(self.release_date.as_deref()).or(non_empty(self.first_air_date.as_deref()))
    }

    pub fn tagline(&self) -> Option<&str> {
        non_empty(self.tagline.as_deref())
    }

    pub fn genre_ids(&self) -> Vec<u64> {
        self.genres.iter().map(|g| g.id).collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CastMember {
    pub id: u64,
    pub name: String,
    pub character: Option<String>,
    pub profile_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CrewMember {
    pub id: u64,
    pub name: String,
    pub job: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Credits {
    #[serde(default)]
    pub cast: Vec<CastMember>,
    #[serde(default)]
    pub crew: Vec<CrewMember>,
}

const WRITER_JOBS: [&str; 3] = ["Screenplay", "Story", "Writer"];

impl Credits {
    pub fn directors(&self) -> Vec<&str> {
        self.crew_with_jobs(&["Director"])
    }

    pub fn writers(&self) -> Vec<&str> {
        self.crew_with_jobs(&WRITER_JOBS)
    }

    fn crew_with_jobs(&self, jobs: &[&str]) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for member in &self.crew {
            let matches = member.job.as_deref().is_some_and(|job| jobs.contains(&job));
            if matches && !names.contains(&member.name.as_str()) {
                names.push(&member.name);
            }
        }
        names
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Video {
    pub id: String,
    pub key: String,
    pub name: String,
    pub site: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

impl Video {
    pub fn thumbnail_url(&self) -> String {
        format!("https://img.youtube.com/vi/{}/mqdefault.jpg", self.key)
    }

    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.key)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoList {
    #[serde(default)]
    pub results: Vec<Video>,
}

impl VideoList {
    /// The clip played by "Watch Trailer": the first trailer, else the first video.
    pub fn featured(&self) -> Option<&Video> {
        self.results
            .iter()
            .find(|v| v.kind.as_deref() == Some("Trailer"))
            .or_else(|| self.results.first())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    PopularityDesc,
    PopularityAsc,
    RatingDesc,
    RatingAsc,
    ReleaseDateDesc,
    ReleaseDateAsc,
    TitleAsc,
}

impl SortKey {
    pub const ALL: [SortKey; 7] = [
        SortKey::PopularityDesc,
        SortKey::PopularityAsc,
        SortKey::RatingDesc,
        SortKey::RatingAsc,
        SortKey::ReleaseDateDesc,
        SortKey::ReleaseDateAsc,
        SortKey::TitleAsc,
    ];

    pub fn as_param(self) -> &'static str {
        match self {
            SortKey::PopularityDesc => "popularity.desc",
            SortKey::PopularityAsc => "popularity.asc",
            SortKey::RatingDesc => "vote_average.desc",
            SortKey::RatingAsc => "vote_average.asc",
            SortKey::ReleaseDateDesc => "primary_release_date.desc",
            SortKey::ReleaseDateAsc => "primary_release_date.asc",
            SortKey::TitleAsc => "original_title.asc",
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortKey::PopularityDesc => write!(f, "Popularity Descending"),
            SortKey::PopularityAsc => write!(f, "Popularity Ascending"),
            SortKey::RatingDesc => write!(f, "Rating Descending"),
            SortKey::RatingAsc => write!(f, "Rating Ascending"),
            SortKey::ReleaseDateDesc => write!(f, "Release Date Descending"),
            SortKey::ReleaseDateAsc => write!(f, "Release Date Ascending"),
            SortKey::TitleAsc => write!(f, "Title (A-Z)"),
        }
    }
}

/// Constraints attached to a discover query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    pub sort_by: Option<SortKey>,
    genres: Vec<u64>,
}

impl FilterSet {
    pub fn toggle_genre(&mut self, id: u64) {
        if let Some(pos) = self.genres.iter().position(|g| *g == id) {
            self.genres.remove(pos);
        } else {
            self.genres.push(id);
        }
    }

    pub fn clear_genres(&mut self) {
        self.genres.clear();
    }

    pub fn has_genre(&self, id: u64) -> bool {
        self.genres.contains(&id)
    }

    pub fn genres(&self) -> &[u64] {
        &self.genres
    }

    pub fn query_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(sort) = self.sort_by {
            params.push((String::from("sort_by"), sort.as_param().to_string()));
        }
        if !self.genres.is_empty() {
            let joined = self
                .genres
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(",");
            params.push((String::from("with_genres"), joined));
        }
        params
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CarouselSlot {
    Trending,
    Popular,
    TopRated,
    Similar,
    Recommendations,
}

impl CarouselSlot {
    pub fn scroll_id(self) -> &'static str {
        match self {
            CarouselSlot::Trending => "carousel-trending",
            CarouselSlot::Popular => "carousel-popular",
            CarouselSlot::TopRated => "carousel-top-rated",
            CarouselSlot::Similar => "carousel-similar",
            CarouselSlot::Recommendations => "carousel-recommendations",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Left,
    Right,
}

#[derive(Debug, Clone)]
pub enum Message {
    Setup(SetupMessage),
    CatalogReady(Result<Catalog, ApiError>),
    RetryBootstrap,
    Navigate(Route),
    NavigateBack,
    MainScrolled { offset: f32, relative: f32 },
    ToggleHeaderSearch,
    HeaderQueryChanged(String),
    HeaderSearchSubmit,
    CloseHeaderSearch,
    HeroQueryChanged(String),
    HeroSearchSubmit,
    HeroLoaded(Ticket, Result<Paged<MediaSummary>, ApiError>),
    TabSelected(CarouselSlot, usize),
    TabCommitted(CarouselSlot, Ticket),
    CarouselLoaded(CarouselSlot, Ticket, Result<Paged<MediaSummary>, ApiError>),
    CarouselScrolled(CarouselSlot, CarouselViewport),
    ScrollCarousel(CarouselSlot, ScrollDirection),
    DetailsLoaded(Ticket, Result<MediaDetails, ApiError>),
    CreditsLoaded(Ticket, Result<Credits, ApiError>),
    VideosLoaded(Ticket, Result<VideoList, ApiError>),
    OpenVideo(Video),
    CloseVideo,
    WatchOnYoutube(String),
    BrowserOpened(Result<(), String>),
    ListPageLoaded(Ticket, Result<Paged<MediaSummary>, ApiError>),
    ExploreGenresLoaded(Ticket, Result<GenreList, ApiError>),
    ToggleGenreFilter(u64),
    ClearGenreFilter,
    SetSortFilter(SortKey),
    ClearSortFilter,
    ImageLoaded(String, Result<Handle, String>),
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_multi_search_page_with_people() {
        let json = r#"{
            "page": 1,
            "total_pages": 3,
            "total_results": 55,
            "results": [
                {"id": 1, "media_type": "movie", "title": "Heat", "vote_average": 7.9,
                 "genre_ids": [28, 80], "release_date": "1995-12-15", "poster_path": "/heat.jpg"},
                {"id": 2, "media_type": "tv", "name": "Dark", "first_air_date": "2017-12-01"},
                {"id": 3, "media_type": "person", "name": "Al Pacino", "known_for": []}
            ]
        }"#;
        let page: Paged<MediaSummary> = serde_json::from_str(json).unwrap();
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.results.len(), 3);
        assert_eq!(page.results[0].display_title(), "Heat");
        assert_eq!(page.results[1].display_title(), "Dark");
        assert_eq!(page.results[1].date(), Some("2017-12-01"));
        assert!(page.results[2].is_person());
    }

    #[test]
    fn discover_items_route_through_fallback_type() {
        let item: MediaSummary = serde_json::from_str(r#"{"id": 42, "name": "Show"}"#).unwrap();
        assert_eq!(item.route(MediaType::Tv), Route::Details(MediaType::Tv, 42));
    }

    #[test]
    fn empty_release_date_falls_back_to_air_date() {
        let item: MediaSummary = serde_json::from_str(
            r#"{"id": 1, "release_date": "", "first_air_date": "2001-02-03"}"#,
        )
        .unwrap();
        assert_eq!(item.date(), Some("2001-02-03"));
    }

    #[test]
    fn credits_pick_directors_and_writers_once() {
        let json = r#"{
            "cast": [{"id": 1, "name": "Actor", "character": "Lead"}],
            "crew": [
                {"id": 2, "name": "Ava", "job": "Director"},
                {"id": 3, "name": "Ben", "job": "Screenplay"},
                {"id": 3, "name": "Ben", "job": "Story"},
                {"id": 4, "name": "Cy", "job": "Editor"},
                {"id": 5, "name": "Di", "job": "Writer"}
            ]
        }"#;
        let credits: Credits = serde_json::from_str(json).unwrap();
        assert_eq!(credits.directors(), vec!["Ava"]);
        assert_eq!(credits.writers(), vec!["Ben", "Di"]);
    }

    #[test]
    fn featured_video_prefers_trailers() {
        let json = r#"{"results": [
            {"id": "a", "key": "k1", "name": "Clip", "site": "YouTube", "type": "Clip"},
            {"id": "b", "key": "k2", "name": "Official Trailer", "site": "YouTube", "type": "Trailer"}
        ]}"#;
        let videos: VideoList = serde_json::from_str(json).unwrap();
        let featured = videos.featured().unwrap();
        assert_eq!(featured.key, "k2");
        assert_eq!(featured.watch_url(), "https://www.youtube.com/watch?v=k2");
    }

    #[test]
    fn filter_params_join_genres_in_selection_order() {
        let mut filters = FilterSet::default();
        filters.toggle_genre(28);
        filters.toggle_genre(12);
        filters.sort_by = Some(SortKey::RatingDesc);
        assert_eq!(
            filters.query_params(),
            vec![
                (String::from("sort_by"), String::from("vote_average.desc")),
                (String::from("with_genres"), String::from("28,12")),
            ]
        );

        filters.toggle_genre(28);
        filters.sort_by = None;
        assert_eq!(
            filters.query_params(),
            vec![(String::from("with_genres"), String::from("12"))]
        );
    }
}
