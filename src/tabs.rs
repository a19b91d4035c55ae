use iced::widget::{button, container, text, Row};
use iced::{Border, Color, Element, Length, Shadow};

use crate::fetch::Ticket;
use crate::media::{CarouselSlot, Message, ACCENT_ORANGE, ACCENT_PINK, BACKGROUND_NAVY, TEXT_WHITE};

/// How long the highlight lags behind the indicator.
pub const COMMIT_DELAY_MS: u64 = 300;

/// Tab strip whose indicator moves at once while the committed highlight
/// follows after [`COMMIT_DELAY_MS`].
#[derive(Debug, Clone)]
pub struct SwitchTabs {
    labels: Vec<&'static str>,
    indicator: usize,
    selected: usize,
    pending: Option<Ticket>,
}

impl SwitchTabs {
    pub fn new(labels: Vec<&'static str>) -> Self {
        Self {
            labels,
            indicator: 0,
            selected: 0,
            pending: None,
        }
    }

    /// Moves the indicator to `index`. Returns the ticket to commit later, or
    /// `None` if the tab is already under the indicator or out of range.
    pub fn select(&mut self, index: usize) -> Option<Ticket> {
        if index >= self.labels.len() || index == self.indicator {
            return None;
        }
        let ticket = Ticket::issue();
        self.indicator = index;
        self.pending = Some(ticket);
        Some(ticket)
    }

    /// Only the most recent selection commits.
    pub fn commit(&mut self, ticket: Ticket) -> bool {
        if self.pending != Some(ticket) {
            return false;
        }
        self.pending = None;
        self.selected = self.indicator;
        true
    }

    pub fn indicator(&self) -> usize {
        self.indicator
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn view(&self, slot: CarouselSlot) -> Element<'_, Message> {
        let tabs: Vec<Element<Message>> = self
            .labels
            .iter()
            .enumerate()
            .map(|(index, label)| {
                let under_indicator = index == self.indicator();
                let highlighted = under_indicator && index == self.selected();
                let label_color = if highlighted { TEXT_WHITE } else { BACKGROUND_NAVY };

                button(text(*label).size(14).color(label_color))
                    .padding([6, 16])
                    .style(move |_theme, _status| button::Style {
                        background: under_indicator.then(|| {
                            iced::Background::Gradient(iced::Gradient::Linear(
                                iced::gradient::Linear::new(std::f32::consts::FRAC_PI_2)
                                    .add_stop(0.0, ACCENT_ORANGE)
                                    .add_stop(1.0, ACCENT_PINK),
                            ))
                        }),
                        text_color: label_color,
                        border: Border {
                            color: Color::TRANSPARENT,
                            width: 0.0,
                            radius: 15.0.into(),
                        },
                        shadow: Shadow::default(),
                        snap: false,
                    })
                    .on_press(Message::TabSelected(slot, index))
                    .into()
            })
            .collect();

        container(Row::with_children(tabs).spacing(0))
            .padding(3)
            .width(Length::Shrink)
            .style(|_theme| container::Style {
                background: Some(iced::Background::Color(TEXT_WHITE)),
                border: Border {
                    color: Color::TRANSPARENT,
                    width: 0.0,
                    radius: 18.0.into(),
                },
                ..Default::default()
            })
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indicator_moves_before_commit() {
        let mut tabs = SwitchTabs::new(vec!["Day", "Week"]);
        let ticket = tabs.select(1).unwrap();
        assert_eq!(tabs.indicator(), 1);
        assert_eq!(tabs.selected(), 0);
        assert!(tabs.commit(ticket));
        assert_eq!(tabs.selected(), 1);
    }

    #[test]
    fn only_latest_selection_commits() {
        let mut tabs = SwitchTabs::new(vec!["Movies", "TV Shows"]);
        let first = tabs.select(1).unwrap();
        let second = tabs.select(0).unwrap();
        assert!(!tabs.commit(first));
        assert_eq!(tabs.selected(), 0);
        assert!(tabs.commit(second));
        assert!(!tabs.commit(second));
    }

    #[test]
    fn reselecting_current_or_unknown_tab_is_ignored() {
        let mut tabs = SwitchTabs::new(vec!["Day", "Week"]);
        assert!(tabs.select(0).is_none());
        assert!(tabs.select(5).is_none());
    }
}
