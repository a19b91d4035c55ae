use iced::widget::{button, column, container, pick_list, row, text, Column, Row, Space};
use iced::{Border, Color, Element, Length, Padding, Shadow};

use crate::catalog::Catalog;
use crate::components::{
    bold, icon, view_empty_results, view_error_notice, view_spinner, ICON_X_LG,
};
use crate::fetch::{Fetch, FetchState, GENERIC_ERROR};
use crate::media::{
    FilterSet, GenreList, MediaType, Message, SortKey, ACCENT_PINK, BACKGROUND_NAVY, SURFACE_NAVY,
    TEXT_GRAY, TEXT_WHITE,
};
use crate::paging::{ListQuery, PageRequest, PagedList};
use crate::Cinescope;

const CHIPS_PER_ROW: usize = 10;

#[derive(Debug)]
pub struct ExplorePage {
    pub media_type: MediaType,
    pub genres: Fetch<GenreList>,
    pub list: PagedList,
}

impl ExplorePage {
    pub fn new(media_type: MediaType) -> Self {
        Self {
            media_type,
            genres: Fetch::new(),
            list: PagedList::new(ListQuery::Discover(media_type)),
        }
    }

    pub fn title(&self) -> &'static str {
        match self.media_type {
            MediaType::Tv => "Explore TV Shows",
            _ => "Explore Movies",
        }
    }

    /// Reloads page 1 with `filters`.
    pub fn apply(&mut self, filters: FilterSet) -> PageRequest {
        self.list
            .load_first_page(ListQuery::Discover(self.media_type), filters)
    }

    pub fn toggle_genre(&mut self, id: u64) -> PageRequest {
        let mut filters = self.list.filters().clone();
        filters.toggle_genre(id);
        self.apply(filters)
    }

    pub fn clear_genres(&mut self) -> PageRequest {
        let mut filters = self.list.filters().clone();
        filters.clear_genres();
        self.apply(filters)
    }

    pub fn set_sort(&mut self, sort: Option<SortKey>) -> PageRequest {
        let mut filters = self.list.filters().clone();
        filters.sort_by = sort;
        self.apply(filters)
    }
}

fn chip_style(active: bool) -> impl Fn(&iced::Theme, button::Status) -> button::Style {
    move |_theme, status| {
        let background = match (active, status) {
            (true, _) => ACCENT_PINK,
            (false, button::Status::Hovered) => Color::from_rgba(1.0, 1.0, 1.0, 0.15),
            (false, _) => SURFACE_NAVY,
        };
        button::Style {
            background: Some(iced::Background::Color(background)),
            text_color: TEXT_WHITE,
            border: Border {
                color: Color::TRANSPARENT,
                width: 0.0,
                radius: 14.0.into(),
            },
            shadow: Shadow::default(),
            snap: false,
        }
    }
}

impl Cinescope {
    pub fn view_explore<'a>(
        &'a self,
        catalog: &'a Catalog,
        page: &'a ExplorePage,
    ) -> Element<'a, Message> {
        let heading = row![
            text(page.title()).size(24).color(TEXT_WHITE).font(bold()),
            Space::new().width(Length::Fill),
            view_sort_picker(page.list.filters())
        ]
        .align_y(iced::Alignment::Center);

        let list = &page.list;
        let body: Element<Message> = if list.is_loading_first() {
            view_spinner()
        } else if list.items().is_empty() {
            match list.error() {
                Some(message) => view_error_notice(message),
                None if list.is_empty() => view_empty_results(),
                None => view_error_notice(GENERIC_ERROR),
            }
        } else {
            let mut content = Column::new().spacing(30).push(self.view_card_grid(
                catalog,
                list.visible_items(),
                page.media_type,
                false,
            ));
            if list.is_loading_next() {
                content = content.push(view_spinner());
            }
            if let Some(message) = list.error() {
                content = content.push(view_error_notice(message));
            }
            content.into()
        };

        container(
            column![heading, view_genre_chips(page), body]
                .spacing(25)
                .width(Length::Fill),
        )
        .width(Length::Fill)
        .padding(Padding::new(100.0).left(48.0).right(48.0).bottom(50.0))
        .into()
    }
}

fn view_genre_chips(page: &ExplorePage) -> Element<'_, Message> {
    let filters = page.list.filters();
    let genres = match page.genres.state() {
        FetchState::Loaded(list) => &list.genres,
        FetchState::Pending => return Space::new().height(0).into(),
        FetchState::Failed(message) => return view_error_notice(message),
    };

    let mut chips: Vec<Element<Message>> = genres
        .iter()
        .map(|genre| {
            let active = filters.has_genre(genre.id);
            button(text(genre.name.clone()).size(13))
                .padding([5, 12])
                .style(chip_style(active))
                .on_press(Message::ToggleGenreFilter(genre.id))
                .into()
        })
        .collect();

    if !filters.genres().is_empty() {
        chips.push(
            button(
                row![icon(ICON_X_LG).size(11), text("Clear").size(13)]
                    .spacing(6)
                    .align_y(iced::Alignment::Center),
            )
            .padding([5, 12])
            .style(chip_style(false))
            .on_press(Message::ClearGenreFilter)
            .into(),
        );
    }

    let mut rows: Vec<Element<Message>> = Vec::new();
    let mut chips = chips.into_iter().peekable();
    while chips.peek().is_some() {
        let chunk: Vec<Element<Message>> = chips.by_ref().take(CHIPS_PER_ROW).collect();
        rows.push(Row::with_children(chunk).spacing(8).into());
    }
    Column::with_children(rows).spacing(8).into()
}

fn view_sort_picker<'a>(filters: &FilterSet) -> Element<'a, Message> {
    let picker = pick_list(SortKey::ALL, filters.sort_by, Message::SetSortFilter)
        .placeholder("Sort by")
        .padding([8, 12])
        .width(Length::Fixed(250.0))
        .style(|_theme, _status| pick_list::Style {
            text_color: TEXT_WHITE,
            placeholder_color: TEXT_GRAY,
            handle_color: TEXT_WHITE,
            background: iced::Background::Color(SURFACE_NAVY),
            border: Border {
                color: Color::TRANSPARENT,
                width: 0.0,
                radius: 20.0.into(),
            },
        });

    let clear: Element<Message> = if filters.sort_by.is_some() {
        button(icon(ICON_X_LG).size(12).color(TEXT_WHITE))
            .padding(8)
            .style(|_theme, _status| button::Style {
                background: Some(iced::Background::Color(BACKGROUND_NAVY)),
                text_color: TEXT_WHITE,
                border: Border::default().rounded(14),
                shadow: Shadow::default(),
                snap: false,
            })
            .on_press(Message::ClearSortFilter)
            .into()
    } else {
        Space::new().width(0).height(0).into()
    };

    row![picker, clear]
        .spacing(6)
        .align_y(iced::Alignment::Center)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::{MediaSummary, Paged};

    fn one_page() -> Paged<MediaSummary> {
        Paged {
            page: 1,
            results: vec![serde_json::from_str(r#"{"id": 5, "title": "Alien"}"#).unwrap()],
            total_pages: 10,
            total_results: 200,
        }
    }

    fn param<'a>(request: &'a PageRequest, key: &str) -> Option<&'a str> {
        request
            .params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn filter_changes_reload_from_page_one() {
        let mut page = ExplorePage::new(MediaType::Movie);
        let first = page.apply(FilterSet::default());
        page.list.settle(first.ticket, Ok(one_page()));
        let next = page.list.load_next_page().unwrap();
        page.list.settle(next.ticket, Ok(one_page()));
        assert_eq!(page.list.items().len(), 2);

        let genre = page.toggle_genre(878);
        assert!(page.list.items().is_empty());
        assert_eq!(param(&genre, "page"), Some("1"));
        assert_eq!(param(&genre, "with_genres"), Some("878"));

        let sorted = page.set_sort(Some(SortKey::PopularityAsc));
        assert_eq!(param(&sorted, "sort_by"), Some("popularity.asc"));
        assert_eq!(param(&sorted, "with_genres"), Some("878"));

        let cleared = page.clear_genres();
        assert_eq!(param(&cleared, "with_genres"), None);
        let unsorted = page.set_sort(None);
        assert_eq!(param(&unsorted, "sort_by"), None);
        assert_eq!(unsorted.endpoint, "/discover/movie");
    }

    #[test]
    fn new_page_starts_without_filters() {
        let page = ExplorePage::new(MediaType::Tv);
        assert_eq!(page.title(), "Explore TV Shows");
        assert_eq!(page.list.filters(), &FilterSet::default());
    }
}
