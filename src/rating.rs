use iced::widget::{column, container, text, Row};
use iced::{Border, Color, Element, Length};

use crate::format;
use crate::media::{Message, BACKGROUND_NAVY, TEXT_WHITE};

const TIER_LOW: Color = Color::from_rgb(0.937, 0.267, 0.267);
const TIER_MID: Color = Color::from_rgb(0.973, 0.620, 0.0);
const TIER_HIGH: Color = Color::from_rgb(0.133, 0.773, 0.369);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingTier {
    Low,
    Mid,
    High,
}

impl RatingTier {
    pub fn color(self) -> Color {
        match self {
            RatingTier::Low => TIER_LOW,
            RatingTier::Mid => TIER_MID,
            RatingTier::High => TIER_HIGH,
        }
    }
}

/// Rounded to one decimal, the way it is displayed.
fn displayed(rating: f32) -> f32 {
    (rating * 10.0).round() / 10.0
}

pub fn tier(rating: f32) -> RatingTier {
    let rating = displayed(rating);
    if rating < 5.0 {
        RatingTier::Low
    } else if rating < 7.0 {
        RatingTier::Mid
    } else {
        RatingTier::High
    }
}

/// Fraction of the ring to fill, clamped to `[0, 1]`.
pub fn fill(rating: f32) -> f32 {
    (displayed(rating) / 10.0).clamp(0.0, 1.0)
}

pub fn rating_badge<'a>(rating: f32, size: f32) -> Element<'a, Message> {
    let color = tier(rating).color();
    let filled = (fill(rating) * 100.0).round() as u16;

    let mut bar = Row::new().height(Length::Fixed(3.0)).width(Length::Fixed(size * 0.6));
    if filled > 0 {
        bar = bar.push(
            container(text(""))
                .width(Length::FillPortion(filled))
                .height(Length::Fill)
                .style(move |_theme| container::Style {
                    background: Some(iced::Background::Color(color)),
                    ..Default::default()
                }),
        );
    }
    if filled < 100 {
        bar = bar.push(
            container(text(""))
                .width(Length::FillPortion(100 - filled))
                .height(Length::Fill)
                .style(|_theme| container::Style {
                    background: Some(iced::Background::Color(Color::from_rgba(
                        1.0, 1.0, 1.0, 0.2,
                    ))),
                    ..Default::default()
                }),
        );
    }

    let content = column![
        text(format::rating(rating))
            .size(size * 0.32)
            .color(TEXT_WHITE)
            .font(iced::Font {
                weight: iced::font::Weight::Bold,
                ..Default::default()
            }),
        bar
    ]
    .spacing(2)
    .align_x(iced::Alignment::Center);

    container(content)
        .width(Length::Fixed(size))
        .height(Length::Fixed(size))
        .center_x(Length::Fixed(size))
        .center_y(Length::Fixed(size))
        .style(move |_theme| container::Style {
            background: Some(iced::Background::Color(BACKGROUND_NAVY)),
            border: Border {
                color,
                width: 3.0,
                radius: (size / 2.0).into(),
            },
            ..Default::default()
        })
        .into()
}
