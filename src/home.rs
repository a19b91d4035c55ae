use iced::widget::{button, column, container, row, text, text_input, Column, Space};
use iced::{Border, Color, Element, Length, Padding, Shadow};
use rand::Rng;

use crate::catalog::Catalog;
use crate::components::{accent_gradient, bold, skeleton_style, view_section_title};
use crate::fetch::{Fetch, FetchRequest, Ticket};
use crate::media::{
    CarouselSlot, MediaSummary, MediaType, Message, Paged, ACCENT_ORANGE, BACKGROUND_NAVY,
    TEXT_GRAY, TEXT_WHITE,
};
use crate::tabs::SwitchTabs;
use crate::tmdb::{popular_path, top_rated_path, trending_path};
use crate::Cinescope;

const HERO_HEIGHT: f32 = 450.0;

/// One tabbed carousel on the home page. Each tab maps to an endpoint and the
/// media type used for cards that carry none.
#[derive(Debug)]
pub struct HomeFeed {
    pub slot: CarouselSlot,
    pub title: &'static str,
    pub tabs: SwitchTabs,
    endpoints: Vec<(String, MediaType)>,
    pub fetch: Fetch<Paged<MediaSummary>>,
}

impl HomeFeed {
    fn new(
        slot: CarouselSlot,
        title: &'static str,
        tabs: Vec<(&'static str, String, MediaType)>,
    ) -> Self {
        let labels = tabs.iter().map(|(label, _, _)| *label).collect();
        let endpoints = tabs
            .into_iter()
            .map(|(_, path, media_type)| (path, media_type))
            .collect();
        Self {
            slot,
            title,
            tabs: SwitchTabs::new(labels),
            endpoints,
            fetch: Fetch::new(),
        }
    }

    pub fn trending() -> Self {
        Self::new(
            CarouselSlot::Trending,
            "Trending",
            vec![
                ("Day", trending_path("day"), MediaType::Movie),
                ("Week", trending_path("week"), MediaType::Movie),
            ],
        )
    }

    pub fn popular() -> Self {
        Self::new(
            CarouselSlot::Popular,
            "What's Popular",
            vec![
                ("Movies", popular_path(MediaType::Movie), MediaType::Movie),
                ("TV Shows", popular_path(MediaType::Tv), MediaType::Tv),
            ],
        )
    }

    pub fn top_rated() -> Self {
        Self::new(
            CarouselSlot::TopRated,
            "Top Rated",
            vec![
                ("Movies", top_rated_path(MediaType::Movie), MediaType::Movie),
                ("TV Shows", top_rated_path(MediaType::Tv), MediaType::Tv),
            ],
        )
    }

    fn current(&self) -> Option<&(String, MediaType)> {
        self.endpoints.get(self.tabs.indicator())
    }

    pub fn media_type(&self) -> MediaType {
        self.current()
            .map(|(_, media_type)| *media_type)
            .unwrap_or(MediaType::Movie)
    }

    /// Points the fetch at the endpoint under the tab indicator.
    pub fn refresh(&mut self) -> Option<FetchRequest> {
        let path = self.current()?.0.clone();
        self.fetch.request(path)
    }

    /// Moves to tab `index`. Returns the highlight ticket plus the request for
    /// the new endpoint.
    pub fn select(&mut self, index: usize) -> Option<(Ticket, Option<FetchRequest>)> {
        let ticket = self.tabs.select(index)?;
        Some((ticket, self.refresh()))
    }
}

#[derive(Debug)]
pub struct HomePage {
    pub hero: Fetch<Paged<MediaSummary>>,
    pub hero_backdrop: Option<String>,
    pub query: String,
    pub feeds: Vec<HomeFeed>,
}

impl Default for HomePage {
    fn default() -> Self {
        Self {
            hero: Fetch::new(),
            hero_backdrop: None,
            query: String::new(),
            feeds: vec![HomeFeed::trending(), HomeFeed::popular(), HomeFeed::top_rated()],
        }
    }
}

impl HomePage {
    pub fn feed_mut(&mut self, slot: CarouselSlot) -> Option<&mut HomeFeed> {
        self.feeds.iter_mut().find(|feed| feed.slot == slot)
    }

    /// Picks a random backdrop from the hero listing.
    pub fn choose_backdrop(&mut self) -> Option<&str> {
        let results = &self.hero.data()?.results;
        let candidates: Vec<&str> = results
            .iter()
            .filter_map(|item| item.backdrop_path.as_deref())
            .collect();
        if candidates.is_empty() {
            return None;
        }
        let index = rand::thread_rng().gen_range(0..candidates.len());
        self.hero_backdrop = Some(candidates[index].to_string());
        self.hero_backdrop.as_deref()
    }
}

impl Cinescope {
    pub fn view_home<'a>(
        &'a self,
        catalog: &'a Catalog,
        home: &'a HomePage,
    ) -> Element<'a, Message> {
        let mut sections = Column::new()
            .spacing(50)
            .padding(Padding::new(0.0).left(48.0).right(48.0).bottom(50.0))
            .width(Length::Fill);

        for feed in &home.feeds {
            let heading = row![
                view_section_title(feed.title),
                Space::new().width(Length::Fill),
                feed.tabs.view(feed.slot)
            ]
            .align_y(iced::Alignment::Center);

            sections = sections.push(self.view_carousel(
                catalog,
                feed.slot,
                heading.into(),
                &feed.fetch,
                feed.media_type(),
            ));
        }

        column![self.view_hero_banner(catalog, home), sections]
            .spacing(40)
            .width(Length::Fill)
            .into()
    }

    fn view_hero_banner<'a>(
        &'a self,
        catalog: &'a Catalog,
        home: &'a HomePage,
    ) -> Element<'a, Message> {
        let backdrop: Element<Message> = match home
            .hero_backdrop
            .as_deref()
            .and_then(|path| self.images.get(&catalog.backdrop_url(path)))
        {
            Some(handle) => iced::widget::image(handle.clone())
                .width(Length::Fill)
                .height(Length::Fixed(HERO_HEIGHT))
                .content_fit(iced::ContentFit::Cover)
                .opacity(0.5)
                .into(),
            None if home.hero.is_pending() => {
                container(Space::new().width(Length::Fill).height(HERO_HEIGHT))
                    .style(skeleton_style(0.0))
                    .into()
            }
            None => Space::new().width(Length::Fill).height(HERO_HEIGHT).into(),
        };

        let fade = container(Space::new().width(Length::Fill).height(Length::Fill))
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_theme| container::Style {
                background: Some(iced::Background::Gradient(iced::Gradient::Linear(
                    iced::gradient::Linear::new(std::f32::consts::PI)
                        .add_stop(0.0, BACKGROUND_NAVY)
                        .add_stop(0.4, Color::TRANSPARENT),
                ))),
                ..Default::default()
            });

        let search_input = text_input("Search for a movie or tv show....", &home.query)
            .on_input(Message::HeroQueryChanged)
            .on_submit(Message::HeroSearchSubmit)
            .padding(Padding::new(16.0).left(24.0))
            .size(18)
            .width(Length::Fill)
            .style(|_theme, _status| iced::widget::text_input::Style {
                background: iced::Background::Color(TEXT_WHITE),
                border: Border {
                    color: Color::TRANSPARENT,
                    width: 0.0,
                    radius: 30.0.into(),
                },
                icon: TEXT_GRAY,
                placeholder: TEXT_GRAY,
                value: BACKGROUND_NAVY,
                selection: ACCENT_ORANGE,
            });

        let search_button = button(text("Search").size(18).color(TEXT_WHITE))
            .padding(Padding::new(16.0).left(32.0).right(32.0))
            .style(|_theme, _status| button::Style {
                background: Some(accent_gradient()),
                text_color: TEXT_WHITE,
                border: Border {
                    color: Color::TRANSPARENT,
                    width: 0.0,
                    radius: 30.0.into(),
                },
                shadow: Shadow::default(),
                snap: false,
            })
            .on_press(Message::HeroSearchSubmit);

        let content = column![
            text("Welcome.").size(64).color(TEXT_WHITE).font(bold()),
            text("Millions of movies, TV shows and people to discover. Explore now.")
                .size(20)
                .color(TEXT_WHITE),
            row![search_input, search_button]
                .spacing(8)
                .align_y(iced::Alignment::Center)
        ]
        .spacing(16)
        .max_width(800.0)
        .align_x(iced::Alignment::Center);

        let overlay = container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .padding(Padding::new(0.0).left(48.0).right(48.0));

        iced::widget::stack![backdrop, fade, overlay]
            .width(Length::Fill)
            .height(Length::Fixed(HERO_HEIGHT))
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tmdb::ApiError;

    fn summary(id: u64, backdrop: Option<&str>) -> MediaSummary {
        MediaSummary {
            id,
            media_type: None,
            title: Some(String::from("Upcoming")),
            name: None,
            poster_path: None,
            backdrop_path: backdrop.map(String::from),
            vote_average: 0.0,
            genre_ids: Vec::new(),
            release_date: None,
            first_air_date: None,
        }
    }

    #[test]
    fn feeds_start_on_first_tab_endpoint() {
        let mut feed = HomeFeed::popular();
        let request = feed.refresh().unwrap();
        assert_eq!(request.path, "/movie/popular");
        assert_eq!(feed.media_type(), MediaType::Movie);
    }

    #[test]
    fn selecting_tab_switches_endpoint_immediately() {
        let mut feed = HomeFeed::top_rated();
        let _ = feed.refresh();
        let (ticket, request) = feed.select(1).unwrap();
        assert_eq!(request.unwrap().path, "/tv/top_rated");
        assert_eq!(feed.media_type(), MediaType::Tv);
        assert_eq!(feed.tabs.selected(), 0);
        assert!(feed.tabs.commit(ticket));
        assert_eq!(feed.tabs.selected(), 1);
    }

    #[test]
    fn late_day_response_does_not_replace_week() {
        let mut feed = HomeFeed::trending();
        let day = feed.refresh().unwrap();
        let (_, week) = feed.select(1).unwrap();
        let week = week.unwrap();
        assert_eq!(week.path, "/trending/movie/week");

        let page = |id| Paged {
            page: 1,
            results: vec![summary(id, None)],
            total_pages: 1,
            total_results: 1,
        };
        assert!(feed.fetch.settle(week.ticket, Ok(page(2))));
        assert!(!feed.fetch.settle(day.ticket, Ok(page(1))));
        assert_eq!(feed.fetch.data().unwrap().results[0].id, 2);
    }

    #[test]
    fn backdrop_is_chosen_among_items_with_one() {
        let mut home = HomePage::default();
        let request = home.hero.request(crate::tmdb::UPCOMING_PATH).unwrap();
        home.hero.settle(
            request.ticket,
            Ok(Paged {
                page: 1,
                results: vec![summary(1, None), summary(2, Some("/b.jpg")), summary(3, None)],
                total_pages: 1,
                total_results: 3,
            }),
        );
        assert_eq!(home.choose_backdrop(), Some("/b.jpg"));
    }

    #[test]
    fn no_backdrop_when_hero_failed() {
        let mut home = HomePage::default();
        let request = home.hero.request(crate::tmdb::UPCOMING_PATH).unwrap();
        home.hero.settle(request.ticket, Err(ApiError::Status(500)));
        assert_eq!(home.choose_backdrop(), None);
        assert!(home.feed_mut(CarouselSlot::Trending).is_some());
        assert!(home.feed_mut(CarouselSlot::Similar).is_none());
    }
}
