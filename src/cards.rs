use iced::widget::{button, column, container, row, scrollable, text, Column, Row, Space};
use iced::{Border, Color, Element, Length, Padding, Shadow};

use crate::catalog::Catalog;
use crate::components::{
    hidden_scrollbar_style, icon, skeleton_style, view_error_notice, view_genre_tags,
    view_skeleton_block, ICON_CHEVRON_LEFT, ICON_CHEVRON_RIGHT, ICON_FILM,
};
use crate::fetch::{Fetch, FetchState};
use crate::format;
use crate::media::{
    CarouselSlot, MediaSummary, MediaType, Message, Paged, ScrollDirection, SURFACE_NAVY,
    TEXT_GRAY, TEXT_WHITE,
};
use crate::rating::rating_badge;
use crate::Cinescope;

pub const CARD_WIDTH: f32 = 180.0;
pub const POSTER_HEIGHT: f32 = 270.0;
const CARD_SPACING: f32 = 20.0;
const CARDS_PER_ROW: usize = 5;
const SKELETON_CARDS: usize = 6;
/// Used until the carousel reports its real width.
const DEFAULT_VIEWPORT_WIDTH: f32 = 1180.0;

/// Last known scroll position, visible width and content width of a carousel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarouselViewport {
    pub offset: f32,
    pub width: f32,
    /// `None` until the strip has reported a scroll.
    pub content_width: Option<f32>,
}

impl Default for CarouselViewport {
    fn default() -> Self {
        Self {
            offset: 0.0,
            width: DEFAULT_VIEWPORT_WIDTH,
            content_width: None,
        }
    }
}

impl CarouselViewport {
    /// Arrows move by one viewport width plus the gap between cards, never
    /// past either end of the strip.
    pub fn target(&self, direction: ScrollDirection) -> f32 {
        let step = self.width + CARD_SPACING;
        match direction {
            ScrollDirection::Left => (self.offset - step).max(0.0),
            ScrollDirection::Right => {
                let next = self.offset + step;
                match self.content_width {
                    Some(content) => next.min((content - self.width).max(0.0)),
                    None => next,
                }
            }
        }
    }
}

impl Cinescope {
    pub fn view_movie_card<'a>(
        &'a self,
        catalog: &'a Catalog,
        item: &'a MediaSummary,
        fallback: MediaType,
        from_search: bool,
    ) -> Element<'a, Message> {
        let poster = self.view_card_poster(catalog, item);

        let poster_block: Element<Message> = if from_search {
            poster
        } else {
            let genres = catalog.genres.names_for(&item.genre_ids);
            let first_two: Vec<&str> = genres.into_iter().take(2).collect();
            let overlay = container(
                row![
                    rating_badge(item.vote_average, 44.0),
                    Space::new().width(Length::Fill),
                    view_genre_tags(&first_two)
                ]
                .align_y(iced::Alignment::End),
            )
            .width(Length::Fill)
            .height(Length::Fill)
            .padding(Padding::new(8.0))
            .align_y(iced::alignment::Vertical::Bottom);

            iced::widget::stack![poster, overlay]
                .width(Length::Fixed(CARD_WIDTH))
                .height(Length::Fixed(POSTER_HEIGHT))
                .into()
        };

        let date = item
            .date()
            .and_then(format::long_date)
            .unwrap_or_default();

        let card = column![
            container(poster_block).style(|_theme| container::Style {
                background: Some(iced::Background::Color(SURFACE_NAVY)),
                border: Border {
                    color: Color::TRANSPARENT,
                    width: 0.0,
                    radius: 12.0.into(),
                },
                shadow: Shadow {
                    color: Color::from_rgba(0.0, 0.0, 0.0, 0.3),
                    offset: iced::Vector::new(0.0, 4.0),
                    blur_radius: 8.0,
                },
                ..Default::default()
            }),
            text(item.display_title().to_string())
                .size(16)
                .color(TEXT_WHITE)
                .wrapping(text::Wrapping::Word),
            text(date).size(13).color(TEXT_GRAY)
        ]
        .spacing(6)
        .width(Length::Fixed(CARD_WIDTH));

        iced::widget::mouse_area(card)
            .on_press(Message::Navigate(item.route(fallback)))
            .into()
    }

    fn view_card_poster<'a>(
        &'a self,
        catalog: &Catalog,
        item: &MediaSummary,
    ) -> Element<'a, Message> {
        let handle = item
            .poster_path
            .as_deref()
            .and_then(|path| self.images.get(&catalog.poster_url(path)));

        match handle {
            Some(h) => iced::widget::image(h.clone())
                .width(Length::Fixed(CARD_WIDTH))
                .height(Length::Fixed(POSTER_HEIGHT))
                .content_fit(iced::ContentFit::Cover)
                .into(),
            None => view_poster_placeholder(CARD_WIDTH, POSTER_HEIGHT),
        }
    }

    /// Horizontally scrolling row of cards with paging arrows.
    pub fn view_carousel<'a>(
        &'a self,
        catalog: &'a Catalog,
        slot: CarouselSlot,
        heading: Element<'a, Message>,
        fetch: &'a Fetch<Paged<MediaSummary>>,
        fallback: MediaType,
    ) -> Element<'a, Message> {
        let body: Element<Message> = match fetch.state() {
            FetchState::Pending => {
                let skeletons: Vec<Element<Message>> =
                    (0..SKELETON_CARDS).map(|_| view_skeleton_card()).collect();
                Row::with_children(skeletons).spacing(CARD_SPACING).into()
            }
            FetchState::Failed(message) => view_error_notice(message),
            FetchState::Loaded(page) if page.results.is_empty() => Space::new().height(0).into(),
            FetchState::Loaded(page) => {
                let cards: Vec<Element<Message>> = page
                    .results
                    .iter()
                    .filter(|item| !item.is_person())
                    .map(|item| self.view_movie_card(catalog, item, fallback, false))
                    .collect();

                let cards_row = Row::with_children(cards)
                    .spacing(CARD_SPACING)
                    .align_y(iced::Alignment::Start);

                let strip = scrollable(cards_row)
                    .id(iced::widget::Id::new(slot.scroll_id()))
                    .on_scroll(move |viewport| {
                        Message::CarouselScrolled(
                            slot,
                            CarouselViewport {
                                offset: viewport.absolute_offset().x,
                                width: viewport.bounds().width,
                                content_width: Some(viewport.content_bounds().width),
                            },
                        )
                    })
                    .direction(scrollable::Direction::Horizontal(
                        scrollable::Scrollbar::new().width(0).scroller_width(0),
                    ))
                    .width(Length::Fill)
                    .style(hidden_scrollbar_style);

                self.view_with_arrows(strip.into(), slot)
            }
        };

        column![heading, body]
            .spacing(20)
            .width(Length::Fill)
            .into()
    }

    fn view_with_arrows<'a>(
        &'a self,
        strip: Element<'a, Message>,
        slot: CarouselSlot,
    ) -> Element<'a, Message> {
        let offset = self
            .carousels
            .get(&slot)
            .map(|viewport| viewport.offset)
            .unwrap_or(0.0);

        let left_arrow: Element<Message> = if offset > 1.0 {
            view_scroll_arrow(slot, ScrollDirection::Left)
        } else {
            Space::new().width(0).height(0).into()
        };
        let right_arrow = view_scroll_arrow(slot, ScrollDirection::Right);

        let left_overlay = container(left_arrow)
            .width(Length::Fill)
            .height(Length::Fixed(POSTER_HEIGHT))
            .align_x(iced::alignment::Horizontal::Left)
            .align_y(iced::alignment::Vertical::Center);

        let right_overlay = container(right_arrow)
            .width(Length::Fill)
            .height(Length::Fixed(POSTER_HEIGHT))
            .align_x(iced::alignment::Horizontal::Right)
            .align_y(iced::alignment::Vertical::Center);

        iced::widget::stack![strip, left_overlay, right_overlay]
            .width(Length::Fill)
            .into()
    }

    /// Wrapped grid used by the search and explore listings.
    pub fn view_card_grid<'a>(
        &'a self,
        catalog: &'a Catalog,
        items: impl Iterator<Item = &'a MediaSummary>,
        fallback: MediaType,
        from_search: bool,
    ) -> Element<'a, Message> {
        let cards: Vec<Element<Message>> = items
            .map(|item| self.view_movie_card(catalog, item, fallback, from_search))
            .collect();

        let mut rows: Vec<Element<Message>> = Vec::new();
        let mut cards = cards.into_iter().peekable();
        while cards.peek().is_some() {
            let chunk: Vec<Element<Message>> = cards.by_ref().take(CARDS_PER_ROW).collect();
            rows.push(
                Row::with_children(chunk)
                    .spacing(CARD_SPACING)
                    .align_y(iced::Alignment::Start)
                    .into(),
            );
        }

        Column::with_children(rows)
            .spacing(CARD_SPACING + 10.0)
            .width(Length::Fill)
            .into()
    }
}

fn view_scroll_arrow<'a>(slot: CarouselSlot, direction: ScrollDirection) -> Element<'a, Message> {
    let icon_char = match direction {
        ScrollDirection::Left => ICON_CHEVRON_LEFT,
        ScrollDirection::Right => ICON_CHEVRON_RIGHT,
    };

    button(
        container(icon(icon_char).size(20).color(TEXT_WHITE))
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill),
    )
    .width(Length::Fixed(40.0))
    .height(Length::Fixed(40.0))
    .padding(0)
    .style(|_theme, status| {
        let bg_alpha = match status {
            button::Status::Hovered => 0.9,
            _ => 0.6,
        };
        button::Style {
            background: Some(iced::Background::Color(Color::from_rgba(
                0.0, 0.0, 0.0, bg_alpha,
            ))),
            text_color: TEXT_WHITE,
            border: Border {
                color: Color::TRANSPARENT,
                width: 0.0,
                radius: 20.0.into(),
            },
            shadow: Shadow {
                color: Color::from_rgba(0.0, 0.0, 0.0, 0.5),
                offset: iced::Vector::new(0.0, 2.0),
                blur_radius: 8.0,
            },
            snap: false,
        }
    })
    .on_press(Message::ScrollCarousel(slot, direction))
    .into()
}

pub fn view_poster_placeholder<'a>(width: f32, height: f32) -> Element<'a, Message> {
    container(icon(ICON_FILM).size(48).color(TEXT_GRAY))
        .width(Length::Fixed(width))
        .height(Length::Fixed(height))
        .center_x(Length::Fixed(width))
        .center_y(Length::Fixed(height))
        .style(|_theme| container::Style {
            background: Some(iced::Background::Color(SURFACE_NAVY)),
            border: Border {
                radius: 12.0.into(),
                ..Default::default()
            },
            ..Default::default()
        })
        .into()
}

pub fn view_skeleton_card<'a>() -> Element<'a, Message> {
    column![
        container(Space::new().width(CARD_WIDTH).height(POSTER_HEIGHT)).style(skeleton_style(12.0)),
        view_skeleton_block(CARD_WIDTH, 18.0, 4.0),
        view_skeleton_block(CARD_WIDTH * 0.6, 14.0, 4.0)
    ]
    .spacing(8)
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_page_by_viewport_width_plus_gap() {
        let viewport = CarouselViewport {
            offset: 100.0,
            width: 800.0,
            content_width: None,
        };
        assert_eq!(viewport.target(ScrollDirection::Right), 920.0);
        assert_eq!(viewport.target(ScrollDirection::Left), 0.0);

        let further = CarouselViewport {
            offset: 2000.0,
            width: 800.0,
            content_width: None,
        };
        assert_eq!(further.target(ScrollDirection::Left), 1180.0);
    }

    #[test]
    fn right_arrow_stops_at_end_of_strip() {
        let near_end = CarouselViewport {
            offset: 1500.0,
            width: 800.0,
            content_width: Some(2600.0),
        };
        assert_eq!(near_end.target(ScrollDirection::Right), 1800.0);

        let at_end = CarouselViewport {
            offset: 1800.0,
            ..near_end
        };
        assert_eq!(at_end.target(ScrollDirection::Right), 1800.0);
        assert_eq!(at_end.target(ScrollDirection::Left), 980.0);

        let short = CarouselViewport {
            offset: 0.0,
            width: 800.0,
            content_width: Some(500.0),
        };
        assert_eq!(short.target(ScrollDirection::Right), 0.0);
    }
}
