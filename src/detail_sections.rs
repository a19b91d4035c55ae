use iced::widget::{column, container, scrollable, text, Row};
use iced::{Border, Color, Element, Length};

use crate::catalog::Catalog;
use crate::components::{
    hidden_scrollbar_style, icon, view_error_notice, view_section_title, view_skeleton_block,
    ICON_PERSON_FILL, ICON_PLAY_FILL,
};
use crate::fetch::{Fetch, FetchState};
use crate::media::{CastMember, Credits, Message, Video, VideoList, SURFACE_NAVY, TEXT_GRAY, TEXT_WHITE};
use crate::Cinescope;

const AVATAR_SIZE: f32 = 175.0;
const THUMB_WIDTH: f32 = 300.0;
const THUMB_HEIGHT: f32 = 170.0;

fn horizontal_strip<'a>(children: Vec<Element<'a, Message>>, spacing: f32) -> Element<'a, Message> {
    scrollable(Row::with_children(children).spacing(spacing))
        .direction(scrollable::Direction::Horizontal(
            scrollable::Scrollbar::new().width(0).scroller_width(0),
        ))
        .width(Length::Fill)
        .style(hidden_scrollbar_style)
        .into()
}

impl Cinescope {
    pub fn view_cast_section<'a>(
        &'a self,
        catalog: &'a Catalog,
        credits: &'a Fetch<Credits>,
    ) -> Element<'a, Message> {
        let body: Element<Message> = match credits.state() {
            FetchState::Pending => horizontal_strip(
                (0..6)
                    .map(|_| view_skeleton_block(AVATAR_SIZE, AVATAR_SIZE, AVATAR_SIZE / 2.0))
                    .collect(),
                20.0,
            ),
            FetchState::Failed(message) => view_error_notice(message),
            FetchState::Loaded(credits) if credits.cast.is_empty() => {
                return column![].into();
            }
            FetchState::Loaded(credits) => horizontal_strip(
                credits
                    .cast
                    .iter()
                    .map(|member| self.view_cast_member(catalog, member))
                    .collect(),
                20.0,
            ),
        };

        column![view_section_title("Top Cast"), body].spacing(25).into()
    }

    fn view_cast_member<'a>(&'a self, catalog: &Catalog, member: &'a CastMember) -> Element<'a, Message> {
        let avatar: Element<Message> = match member
            .profile_path
            .as_deref()
            .and_then(|path| self.images.get(&catalog.profile_url(path)))
        {
            Some(handle) => container(
                iced::widget::image(handle.clone())
                    .width(Length::Fixed(AVATAR_SIZE))
                    .height(Length::Fixed(AVATAR_SIZE))
                    .content_fit(iced::ContentFit::Cover)
                    .border_radius(AVATAR_SIZE / 2.0),
            )
            .into(),
            None => container(icon(ICON_PERSON_FILL).size(64).color(TEXT_GRAY))
                .width(Length::Fixed(AVATAR_SIZE))
                .height(Length::Fixed(AVATAR_SIZE))
                .center_x(Length::Fixed(AVATAR_SIZE))
                .center_y(Length::Fixed(AVATAR_SIZE))
                .style(|_theme| container::Style {
                    background: Some(iced::Background::Color(SURFACE_NAVY)),
                    border: Border {
                        color: Color::TRANSPARENT,
                        width: 0.0,
                        radius: (AVATAR_SIZE / 2.0).into(),
                    },
                    ..Default::default()
                })
                .into(),
        };

        column![
            avatar,
            text(member.name.as_str()).size(16).color(TEXT_WHITE),
            text(member.character.as_deref().unwrap_or_default())
                .size(14)
                .color(TEXT_GRAY)
        ]
        .spacing(6)
        .width(Length::Fixed(AVATAR_SIZE))
        .align_x(iced::Alignment::Center)
        .into()
    }

    pub fn view_videos_section<'a>(&'a self, videos: &'a Fetch<VideoList>) -> Element<'a, Message> {
        let body: Element<Message> = match videos.state() {
            FetchState::Pending => horizontal_strip(
                (0..4)
                    .map(|_| view_skeleton_block(THUMB_WIDTH, THUMB_HEIGHT, 12.0))
                    .collect(),
                20.0,
            ),
            FetchState::Failed(message) => view_error_notice(message),
            FetchState::Loaded(list) if list.results.is_empty() => return column![].into(),
            FetchState::Loaded(list) => horizontal_strip(
                list.results
                    .iter()
                    .map(|video| self.view_video_tile(video))
                    .collect(),
                20.0,
            ),
        };

        column![view_section_title("Official Videos"), body]
            .spacing(25)
            .into()
    }

    fn view_video_tile<'a>(&'a self, video: &'a Video) -> Element<'a, Message> {
        let thumbnail: Element<Message> = match self.images.get(&video.thumbnail_url()) {
            Some(handle) => iced::widget::image(handle.clone())
                .width(Length::Fixed(THUMB_WIDTH))
                .height(Length::Fixed(THUMB_HEIGHT))
                .content_fit(iced::ContentFit::Cover)
                .border_radius(12.0)
                .into(),
            None => view_skeleton_block(THUMB_WIDTH, THUMB_HEIGHT, 12.0),
        };

        let play = container(icon(ICON_PLAY_FILL).size(36).color(TEXT_WHITE))
            .width(Length::Fixed(THUMB_WIDTH))
            .height(Length::Fixed(THUMB_HEIGHT))
            .center_x(Length::Fixed(THUMB_WIDTH))
            .center_y(Length::Fixed(THUMB_HEIGHT));

        let tile = column![
            iced::widget::stack![thumbnail, play],
            text(video.name.as_str())
                .size(15)
                .color(TEXT_WHITE)
                .wrapping(text::Wrapping::Word)
        ]
        .spacing(10)
        .width(Length::Fixed(THUMB_WIDTH));

        iced::widget::mouse_area(tile)
            .on_press(Message::OpenVideo(video.clone()))
            .into()
    }
}
