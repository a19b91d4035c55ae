use iced::widget::{
    button, column, container, row, scrollable, text, text_input, Column, Row, Space,
};
use iced::{Border, Color, Element, Length, Padding, Shadow};

use crate::fetch::GENERIC_ERROR;
use crate::media::{
    MediaType, Message, ACCENT_ORANGE, ACCENT_PINK, BACKGROUND_NAVY, SURFACE_NAVY, TEXT_GRAY,
    TEXT_WHITE,
};
use crate::router::Route;
use crate::Cinescope;

pub const ICON_SEARCH: char = '\u{F52A}';
pub const ICON_X_LG: char = '\u{F659}';
pub const ICON_ARROW_LEFT: char = '\u{F12F}';
pub const ICON_ARROW_CLOCKWISE: char = '\u{F130}';
pub const ICON_FILM: char = '\u{F3A9}';
pub const ICON_PLAY_FILL: char = '\u{F4F4}';
pub const ICON_PERSON_FILL: char = '\u{F4DA}';
pub const ICON_GLOBE: char = '\u{F3EF}';
pub const ICON_CHEVRON_LEFT: char = '\u{F284}';
pub const ICON_CHEVRON_RIGHT: char = '\u{F285}';

pub const HEADER_HEIGHT: f32 = 60.0;
const HIDE_THRESHOLD: f32 = 200.0;

pub fn icon(icon_char: char) -> iced::widget::Text<'static> {
    text(icon_char.to_string()).font(iced::Font {
        family: iced::font::Family::Name("bootstrap-icons"),
        ..Default::default()
    })
}

pub fn bold() -> iced::Font {
    iced::Font {
        weight: iced::font::Weight::Bold,
        ..Default::default()
    }
}

pub fn accent_gradient() -> iced::Background {
    iced::Background::Gradient(iced::Gradient::Linear(
        iced::gradient::Linear::new(std::f32::consts::FRAC_PI_2)
            .add_stop(0.0, ACCENT_ORANGE)
            .add_stop(1.0, ACCENT_PINK),
    ))
}

pub fn hidden_scrollbar_style(
    _theme: &iced::Theme,
    _status: scrollable::Status,
) -> scrollable::Style {
    let hidden_rail = || scrollable::Rail {
        background: None,
        border: Border::default(),
        scroller: scrollable::Scroller {
            background: iced::Background::Color(Color::TRANSPARENT),
            border: Border::default(),
        },
    };
    scrollable::Style {
        container: container::Style::default(),
        vertical_rail: hidden_rail(),
        horizontal_rail: hidden_rail(),
        gap: None,
        auto_scroll: scrollable::AutoScroll {
            background: iced::Background::Color(Color::TRANSPARENT),
            border: Border::default(),
            shadow: Shadow::default(),
            icon: Color::TRANSPARENT,
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderVisibility {
    /// At the top of the page, drawn translucent.
    #[default]
    Top,
    Show,
    Hide,
}

/// Past the threshold the header hides while scrolling down and reappears
/// when scrolling up.
pub fn next_visibility(last_offset: f32, offset: f32) -> HeaderVisibility {
    if offset <= HIDE_THRESHOLD {
        HeaderVisibility::Top
    } else if offset > last_offset {
        HeaderVisibility::Hide
    } else {
        HeaderVisibility::Show
    }
}

#[derive(Debug, Clone, Default)]
pub struct HeaderState {
    pub visibility: HeaderVisibility,
    pub last_offset: f32,
    pub search_open: bool,
    pub query: String,
}

impl HeaderState {
    pub fn scrolled(&mut self, offset: f32) {
        self.visibility = next_visibility(self.last_offset, offset);
        self.last_offset = offset;
    }

    pub fn reset_scroll(&mut self) {
        self.visibility = HeaderVisibility::Top;
        self.last_offset = 0.0;
    }
}

fn header_button_style(_theme: &iced::Theme, status: button::Status) -> button::Style {
    let text_color = match status {
        button::Status::Hovered => ACCENT_PINK,
        _ => TEXT_WHITE,
    };
    button::Style {
        background: Some(iced::Background::Color(Color::TRANSPARENT)),
        text_color,
        border: Border::default(),
        shadow: Shadow::default(),
        snap: false,
    }
}

impl Cinescope {
    pub fn view_header(&self) -> Element<'_, Message> {
        let back: Element<Message> = if self.history.is_empty() {
            Space::new().width(0).height(0).into()
        } else {
            button(icon(ICON_ARROW_LEFT).size(18))
                .padding(Padding::new(6.0).right(12.0))
                .style(header_button_style)
                .on_press(Message::NavigateBack)
                .into()
        };

        let logo = button(
            row![
                icon(ICON_FILM).size(22).color(ACCENT_PINK),
                text("Cinescope").size(22).color(TEXT_WHITE).font(bold()),
            ]
            .spacing(8)
            .align_y(iced::Alignment::Center),
        )
        .padding(0)
        .style(header_button_style)
        .on_press(Message::Navigate(Route::Home));

        let nav_item = |label: &'static str, media_type: MediaType| {
            button(text(label).size(15))
                .padding(Padding::new(8.0).left(12.0).right(12.0))
                .style(header_button_style)
                .on_press(Message::Navigate(Route::Explore(media_type)))
        };

        let search_toggle = button(
            icon(if self.header.search_open {
                ICON_X_LG
            } else {
                ICON_SEARCH
            })
            .size(16),
        )
        .padding(8)
        .style(header_button_style)
        .on_press(Message::ToggleHeaderSearch);

        let menu = row![
            nav_item("Movies", MediaType::Movie),
            nav_item("TV Shows", MediaType::Tv),
            search_toggle
        ]
        .spacing(8)
        .align_y(iced::Alignment::Center);

        let bar = row![back, logo, Space::new().width(Length::Fill), menu]
            .padding(Padding::new(10.0).left(48.0).right(48.0))
            .align_y(iced::Alignment::Center);

        let visibility = self.header.visibility;
        let bar = container(bar)
            .width(Length::Fill)
            .height(Length::Fixed(HEADER_HEIGHT))
            .style(move |_theme| match visibility {
                HeaderVisibility::Top => container::Style {
                    background: Some(iced::Background::Color(Color::from_rgba(
                        0.0, 0.0, 0.0, 0.25,
                    ))),
                    ..Default::default()
                },
                _ => container::Style {
                    background: Some(iced::Background::Color(BACKGROUND_NAVY)),
                    ..Default::default()
                },
            });

        if self.header.search_open {
            column![bar, self.view_header_search()].into()
        } else {
            bar.into()
        }
    }

    fn view_header_search(&self) -> Element<'_, Message> {
        let input = text_input("Search for a movie or tv show....", &self.header.query)
            .on_input(Message::HeaderQueryChanged)
            .on_submit(Message::HeaderSearchSubmit)
            .padding(Padding::new(14.0).left(48.0).right(48.0))
            .size(16)
            .width(Length::Fill)
            .style(|_theme, _status| text_input::Style {
                background: iced::Background::Color(TEXT_WHITE),
                border: Border::default(),
                icon: TEXT_GRAY,
                placeholder: TEXT_GRAY,
                value: BACKGROUND_NAVY,
                selection: ACCENT_ORANGE,
            });

        container(input).width(Length::Fill).into()
    }

    pub fn view_footer(&self) -> Element<'_, Message> {
        let links: Vec<Element<Message>> = ["Terms Of Use", "Privacy-Policy", "About", "Blog", "FAQ"]
            .into_iter()
            .map(|label| text(label).size(14).color(TEXT_WHITE).into())
            .collect();

        let about = text(
            "Browse what is trending, popular and top rated across movies and TV shows. \
             Catalog data and images are provided by TMDB. This product uses the TMDB API \
             but is not endorsed or certified by TMDB.",
        )
        .size(13)
        .color(TEXT_GRAY);

        let globe = container(icon(ICON_GLOBE).size(18).color(TEXT_WHITE))
            .padding(12)
            .style(|_theme| container::Style {
                background: Some(iced::Background::Color(BACKGROUND_NAVY)),
                border: Border {
                    color: Color::TRANSPARENT,
                    width: 0.0,
                    radius: 22.0.into(),
                },
                ..Default::default()
            });

        let content = column![
            Row::with_children(links).spacing(28),
            container(about).max_width(800.0),
            globe
        ]
        .spacing(24)
        .align_x(iced::Alignment::Center);

        container(content)
            .width(Length::Fill)
            .padding(Padding::new(50.0))
            .center_x(Length::Fill)
            .style(|_theme| container::Style {
                background: Some(iced::Background::Color(SURFACE_NAVY)),
                ..Default::default()
            })
            .into()
    }

    pub fn view_boot_loading(&self) -> Element<'_, Message> {
        container(view_spinner())
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into()
    }

    pub fn view_boot_failed<'a>(&'a self, error: &'a str) -> Element<'a, Message> {
        let retry_button = button(
            row![
                icon(ICON_ARROW_CLOCKWISE).size(16).color(TEXT_WHITE),
                text("Retry").size(16).color(TEXT_WHITE)
            ]
            .spacing(8)
            .align_y(iced::Alignment::Center),
        )
        .padding(Padding::new(12.0).left(24.0).right(24.0))
        .style(|_theme, _status| button::Style {
            background: Some(accent_gradient()),
            text_color: TEXT_WHITE,
            border: Border {
                color: Color::TRANSPARENT,
                width: 0.0,
                radius: 20.0.into(),
            },
            shadow: Shadow::default(),
            snap: false,
        })
        .on_press(Message::RetryBootstrap);

        container(
            column![
                text(GENERIC_ERROR).size(22).color(TEXT_WHITE).font(bold()),
                text(error).size(14).color(TEXT_GRAY),
                retry_button
            ]
            .spacing(16)
            .align_x(iced::Alignment::Center),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
    }
}

pub fn view_spinner<'a>() -> Element<'a, Message> {
    container(
        row![
            icon(ICON_FILM).size(28).color(ACCENT_PINK),
            text("Loading...").size(16).color(TEXT_GRAY)
        ]
        .spacing(12)
        .align_y(iced::Alignment::Center),
    )
    .width(Length::Fill)
    .padding(40)
    .center_x(Length::Fill)
    .into()
}

/// Shown wherever a fetch failed.
pub fn view_error_notice<'a>(message: &str) -> Element<'a, Message> {
    container(text(message.to_string()).size(16).color(TEXT_GRAY))
        .width(Length::Fill)
        .padding(24)
        .center_x(Length::Fill)
        .into()
}

pub fn view_empty_results<'a>() -> Element<'a, Message> {
    container(text("Sorry, Results not found!").size(24).color(TEXT_GRAY))
        .width(Length::Fill)
        .padding(60)
        .center_x(Length::Fill)
        .into()
}

pub fn view_not_found<'a>(path: &str) -> Element<'a, Message> {
    container(
        column![
            text("404").size(120).color(TEXT_GRAY).font(bold()),
            text("Page not found!").size(32).color(TEXT_GRAY),
            text(path.to_string()).size(14).color(TEXT_GRAY)
        ]
        .spacing(8)
        .align_x(iced::Alignment::Center),
    )
    .width(Length::Fill)
    .height(Length::Fixed(600.0))
    .center_x(Length::Fill)
    .center_y(Length::Fixed(600.0))
    .into()
}

pub fn view_genre_tags<'a>(names: &[&str]) -> Element<'a, Message> {
    let tags: Vec<Element<Message>> = names
        .iter()
        .map(|name| {
            container(text(name.to_string()).size(12).color(TEXT_WHITE))
                .padding([2, 6])
                .style(|_theme| container::Style {
                    background: Some(iced::Background::Color(ACCENT_PINK)),
                    border: Border {
                        color: Color::TRANSPARENT,
                        width: 0.0,
                        radius: 4.0.into(),
                    },
                    ..Default::default()
                })
                .into()
        })
        .collect();

    Row::with_children(tags).spacing(4).into()
}

pub fn view_section_title<'a>(title: &str) -> Element<'a, Message> {
    text(title.to_string())
        .size(24)
        .color(TEXT_WHITE)
        .font(bold())
        .into()
}

pub fn skeleton_style(radius: f32) -> impl Fn(&iced::Theme) -> container::Style {
    move |_theme| container::Style {
        background: Some(iced::Background::Color(Color::from_rgba(
            0.1, 0.2, 0.33, 0.8,
        ))),
        border: Border {
            radius: radius.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

pub fn view_skeleton_block<'a>(width: f32, height: f32, radius: f32) -> Element<'a, Message> {
    container(Space::new().width(width).height(height))
        .style(skeleton_style(radius))
        .into()
}

/// Placeholder lines shown while a text block loads.
pub fn view_skeleton_lines<'a>(widths: &[f32]) -> Element<'a, Message> {
    let lines: Vec<Element<Message>> = widths
        .iter()
        .map(|w| view_skeleton_block(*w, 18.0, 4.0))
        .collect();
    Column::with_children(lines).spacing(12).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_stays_at_top_below_threshold() {
        assert_eq!(next_visibility(0.0, 150.0), HeaderVisibility::Top);
        assert_eq!(next_visibility(300.0, 200.0), HeaderVisibility::Top);
    }

    #[test]
    fn header_hides_scrolling_down_and_shows_scrolling_up() {
        assert_eq!(next_visibility(250.0, 400.0), HeaderVisibility::Hide);
        assert_eq!(next_visibility(400.0, 350.0), HeaderVisibility::Show);
    }

    #[test]
    fn header_state_tracks_last_offset() {
        let mut header = HeaderState::default();
        header.scrolled(500.0);
        assert_eq!(header.visibility, HeaderVisibility::Hide);
        header.scrolled(480.0);
        assert_eq!(header.visibility, HeaderVisibility::Show);
        header.reset_scroll();
        assert_eq!(header.visibility, HeaderVisibility::Top);
        assert_eq!(header.last_offset, 0.0);
    }
}
