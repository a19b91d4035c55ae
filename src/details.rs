use iced::widget::{button, column, container, row, text, Column, Row, Space};
use iced::{Border, Color, Element, Length, Padding, Shadow};

use crate::cards::view_poster_placeholder;
use crate::catalog::Catalog;
use crate::components::{
    accent_gradient, bold, icon, view_error_notice, view_genre_tags, view_section_title,
    view_skeleton_block, view_skeleton_lines, ICON_PLAY_FILL,
};
use crate::fetch::{Fetch, FetchRequest, FetchState};
use crate::format;
use crate::media::{
    CarouselSlot, Credits, MediaDetails, MediaId, MediaSummary, MediaType, Message, Paged, Video,
    VideoList, BACKGROUND_NAVY, TEXT_GRAY, TEXT_WHITE,
};
use crate::rating::rating_badge;
use crate::tmdb::{credits_path, details_path, recommendations_path, similar_path, videos_path};
use crate::Cinescope;

const BANNER_HEIGHT: f32 = 700.0;
const POSTER_WIDTH: f32 = 350.0;
const POSTER_HEIGHT: f32 = 525.0;

#[derive(Debug)]
pub struct DetailsPage {
    pub media_type: MediaType,
    pub id: MediaId,
    pub details: Fetch<MediaDetails>,
    pub credits: Fetch<Credits>,
    pub videos: Fetch<VideoList>,
    pub similar: Fetch<Paged<MediaSummary>>,
    pub recommendations: Fetch<Paged<MediaSummary>>,
    pub popup: Option<Video>,
}

/// Every request a freshly mounted details page issues.
pub struct DetailsRequests {
    pub details: Option<FetchRequest>,
    pub credits: Option<FetchRequest>,
    pub videos: Option<FetchRequest>,
    pub similar: Option<FetchRequest>,
    pub recommendations: Option<FetchRequest>,
}

impl DetailsPage {
    pub fn new(media_type: MediaType, id: MediaId) -> Self {
        Self {
            media_type,
            id,
            details: Fetch::new(),
            credits: Fetch::new(),
            videos: Fetch::new(),
            similar: Fetch::new(),
            recommendations: Fetch::new(),
            popup: None,
        }
    }

    pub fn start(&mut self) -> DetailsRequests {
        let (media_type, id) = (self.media_type, self.id);
        DetailsRequests {
            details: self.details.request(details_path(media_type, id)),
            credits: self.credits.request(credits_path(media_type, id)),
            videos: self.videos.request(videos_path(media_type, id)),
            similar: self.similar.request(similar_path(media_type, id)),
            recommendations: self
                .recommendations
                .request(recommendations_path(media_type, id)),
        }
    }

    pub fn carousel_mut(
        &mut self,
        slot: CarouselSlot,
    ) -> Option<&mut Fetch<Paged<MediaSummary>>> {
        match slot {
            CarouselSlot::Similar => Some(&mut self.similar),
            CarouselSlot::Recommendations => Some(&mut self.recommendations),
            _ => None,
        }
    }

    pub fn open_video(&mut self, video: Video) {
        self.popup = Some(video);
    }

    pub fn close_video(&mut self) {
        self.popup = None;
    }

    /// Heading for the similar carousel, which names the media kind.
    pub fn similar_title(&self) -> &'static str {
        match self.media_type {
            MediaType::Tv => "Similar TV Shows",
            _ => "Similar Movies",
        }
    }
}

impl Cinescope {
    pub fn view_details<'a>(
        &'a self,
        catalog: &'a Catalog,
        page: &'a DetailsPage,
    ) -> Element<'a, Message> {
        let banner = match page.details.state() {
            FetchState::Pending => view_banner_skeleton(),
            FetchState::Failed(message) => container(view_error_notice(message))
                .padding(Padding::new(120.0).bottom(40.0))
                .into(),
            FetchState::Loaded(details) => self.view_details_banner(catalog, page, details),
        };

        let sections = column![
            self.view_cast_section(catalog, &page.credits),
            self.view_videos_section(&page.videos),
            self.view_carousel(
                catalog,
                CarouselSlot::Similar,
                view_section_title(page.similar_title()),
                &page.similar,
                page.media_type,
            ),
            self.view_carousel(
                catalog,
                CarouselSlot::Recommendations,
                view_section_title("Recommendations"),
                &page.recommendations,
                page.media_type,
            )
        ]
        .spacing(50)
        .padding(Padding::new(0.0).left(48.0).right(48.0).bottom(50.0));

        column![banner, sections].spacing(30).width(Length::Fill).into()
    }

    fn view_details_banner<'a>(
        &'a self,
        catalog: &'a Catalog,
        page: &'a DetailsPage,
        details: &'a MediaDetails,
    ) -> Element<'a, Message> {
        let backdrop: Element<Message> = match details
            .backdrop_path
            .as_deref()
            .and_then(|path| self.images.get(&catalog.backdrop_url(path)))
        {
            Some(handle) => iced::widget::image(handle.clone())
                .width(Length::Fill)
                .height(Length::Fixed(BANNER_HEIGHT))
                .content_fit(iced::ContentFit::Cover)
                .opacity(0.1)
                .into(),
            None => Space::new().width(Length::Fill).height(BANNER_HEIGHT).into(),
        };

        let fade = container(Space::new().width(Length::Fill).height(Length::Fill))
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_theme| container::Style {
                background: Some(iced::Background::Gradient(iced::Gradient::Linear(
                    iced::gradient::Linear::new(std::f32::consts::PI)
                        .add_stop(0.0, BACKGROUND_NAVY)
                        .add_stop(0.3, Color::TRANSPARENT),
                ))),
                ..Default::default()
            });

        let poster: Element<Message> = match details
            .poster_path
            .as_deref()
            .and_then(|path| self.images.get(&catalog.poster_url(path)))
        {
            Some(handle) => iced::widget::image(handle.clone())
                .width(Length::Fixed(POSTER_WIDTH))
                .height(Length::Fixed(POSTER_HEIGHT))
                .content_fit(iced::ContentFit::Cover)
                .into(),
            None => view_poster_placeholder(POSTER_WIDTH, POSTER_HEIGHT),
        };

        let title = format::title_with_year(details.display_title(), details.date());
        let genre_ids = details.genre_ids();
        let genre_names = catalog.genres.names_for(&genre_ids);

        let mut info = Column::new()
            .spacing(20)
            .width(Length::Fill)
            .push(text(title).size(34).color(TEXT_WHITE).font(bold()));
        if let Some(tagline) = details.tagline() {
            info = info.push(text(tagline.to_string()).size(18).color(TEXT_GRAY).font(
                iced::Font {
                    style: iced::font::Style::Italic,
                    ..Default::default()
                },
            ));
        }
        info = info
            .push(view_genre_tags(&genre_names))
            .push(
                row![
                    rating_badge(details.vote_average, 70.0),
                    self.view_trailer_button(page)
                ]
                .spacing(25)
                .align_y(iced::Alignment::Center),
            );

        if let Some(overview) = details.overview.as_deref().filter(|o| !o.is_empty()) {
            info = info.push(
                column![
                    text("Overview").size(24).color(TEXT_WHITE),
                    text(overview.to_string()).size(16).color(TEXT_WHITE)
                ]
                .spacing(10),
            );
        }

        info = info.push(view_info_row(details));
        info = info.push(self.view_people(details, &page.credits));

        let content = row![poster, info]
            .spacing(50)
            .padding(Padding::new(100.0).left(48.0).right(48.0).bottom(20.0));

        iced::widget::stack![backdrop, fade, content]
            .width(Length::Fill)
            .into()
    }

    fn view_trailer_button<'a>(&'a self, page: &'a DetailsPage) -> Element<'a, Message> {
        let featured = page.videos.data().and_then(VideoList::featured);

        let play_circle = container(icon(ICON_PLAY_FILL).size(26).color(TEXT_WHITE))
            .width(Length::Fixed(64.0))
            .height(Length::Fixed(64.0))
            .center_x(Length::Fixed(64.0))
            .center_y(Length::Fixed(64.0))
            .style(|_theme| container::Style {
                background: Some(accent_gradient()),
                border: Border {
                    color: TEXT_WHITE,
                    width: 2.0,
                    radius: 32.0.into(),
                },
                ..Default::default()
            });

        let mut trailer = button(
            row![play_circle, text("Watch Trailer").size(20).color(TEXT_WHITE)]
                .spacing(16)
                .align_y(iced::Alignment::Center),
        )
        .padding(0)
        .style(|_theme, _status| button::Style {
            background: None,
            text_color: TEXT_WHITE,
            border: Border::default(),
            shadow: Shadow::default(),
            snap: false,
        });
        if let Some(video) = featured {
            trailer = trailer.on_press(Message::OpenVideo(video.clone()));
        }
        trailer.into()
    }

    fn view_people<'a>(
        &'a self,
        details: &'a MediaDetails,
        credits: &'a Fetch<Credits>,
    ) -> Element<'a, Message> {
        let mut people = Column::new().spacing(15);
        if let Some(credits) = credits.data() {
            let directors = credits.directors();
            if !directors.is_empty() {
                people = people.push(view_people_row("Director:", &directors));
            }
            let writers = credits.writers();
            if !writers.is_empty() {
                people = people.push(view_people_row("Writer:", &writers));
            }
        }
        let creators: Vec<&str> = details.created_by.iter().map(|c| c.name.as_str()).collect();
        if !creators.is_empty() {
            people = people.push(view_people_row("Creator:", &creators));
        }
        people.into()
    }
}

fn view_info_row(details: &MediaDetails) -> Element<'_, Message> {
    let mut items: Vec<Element<Message>> = Vec::new();
    let mut push = |label: &str, value: String| {
        items.push(
            row![
                text(format!("{label}: ")).size(16).color(TEXT_WHITE).font(bold()),
                text(value).size(16).color(TEXT_GRAY)
            ]
            .into(),
        );
    };
    if let Some(status) = details.status.as_deref().filter(|s| !s.is_empty()) {
        push("Status", status.to_string());
    }
    if let Some(date) = details.release_date.as_deref().and_then(format::long_date) {
        push("Release Date", date);
    }
    if let Some(minutes) = details.runtime.filter(|m| *m > 0) {
        push("Runtime", format::runtime(minutes));
    }

    container(Row::with_children(items).spacing(30))
        .padding(Padding::new(15.0).left(0.0).right(0.0))
        .style(|_theme| container::Style {
            border: Border {
                color: Color::from_rgba(1.0, 1.0, 1.0, 0.1),
                width: 1.0,
                radius: 0.0.into(),
            },
            ..Default::default()
        })
        .width(Length::Fill)
        .into()
}

fn view_people_row<'a>(label: &str, names: &[&str]) -> Element<'a, Message> {
    row![
        text(format!("{label} ")).size(16).color(TEXT_WHITE).font(bold()),
        text(names.join(", ")).size(16).color(TEXT_GRAY)
    ]
    .into()
}

fn view_banner_skeleton<'a>() -> Element<'a, Message> {
    row![
        view_skeleton_block(POSTER_WIDTH, POSTER_HEIGHT, 12.0),
        column![
            view_skeleton_block(420.0, 34.0, 6.0),
            view_skeleton_lines(&[520.0, 480.0, 500.0, 300.0])
        ]
        .spacing(25)
    ]
    .spacing(50)
    .padding(Padding::new(100.0).left(48.0).right(48.0).bottom(20.0))
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_requests_every_section_once() {
        let mut page = DetailsPage::new(MediaType::Tv, 1399);
        let requests = page.start();
        assert_eq!(requests.details.unwrap().path, "/tv/1399");
        assert_eq!(requests.credits.unwrap().path, "/tv/1399/credits");
        assert_eq!(requests.videos.unwrap().path, "/tv/1399/videos");
        assert_eq!(requests.similar.unwrap().path, "/tv/1399/similar");
        assert_eq!(
            requests.recommendations.unwrap().path,
            "/tv/1399/recommendations"
        );

        let again = page.start();
        assert!(again.details.is_none());
        assert!(again.similar.is_none());
    }

    #[test]
    fn only_details_carousels_are_addressable() {
        let mut page = DetailsPage::new(MediaType::Movie, 1);
        assert!(page.carousel_mut(CarouselSlot::Similar).is_some());
        assert!(page.carousel_mut(CarouselSlot::Recommendations).is_some());
        assert!(page.carousel_mut(CarouselSlot::Trending).is_none());
        assert_eq!(page.similar_title(), "Similar Movies");
    }

    #[test]
    fn popup_opens_and_closes() {
        let mut page = DetailsPage::new(MediaType::Movie, 1);
        let video: Video = serde_json::from_str(
            r#"{"id": "v", "key": "abc", "name": "Trailer", "site": "YouTube", "type": "Trailer"}"#,
        )
        .unwrap();
        page.open_video(video);
        assert_eq!(page.popup.as_ref().map(|v| v.key.as_str()), Some("abc"));
        page.close_video();
        assert!(page.popup.is_none());
    }
}
