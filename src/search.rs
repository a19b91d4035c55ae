use iced::widget::{column, container, text, Column};
use iced::{Element, Length, Padding};

use crate::catalog::Catalog;
use crate::components::{view_empty_results, view_error_notice, view_spinner};
use crate::fetch::GENERIC_ERROR;
use crate::media::{FilterSet, MediaType, Message, TEXT_WHITE};
use crate::paging::{ListQuery, PageRequest, PagedList};
use crate::Cinescope;

#[derive(Debug)]
pub struct SearchPage {
    pub query: String,
    pub list: PagedList,
}

impl SearchPage {
    pub fn new(query: String) -> Self {
        Self {
            list: PagedList::new(ListQuery::Search(query.clone())),
            query,
        }
    }

    pub fn start(&mut self) -> PageRequest {
        self.list
            .load_first_page(ListQuery::Search(self.query.clone()), FilterSet::default())
    }
}

/// `Search result of 'x'`, pluralised when there is more than one hit.
pub fn results_title(total_results: u32, query: &str) -> String {
    let noun = if total_results > 1 { "results" } else { "result" };
    format!("Search {noun} of '{query}'")
}

impl Cinescope {
    pub fn view_search<'a>(
        &'a self,
        catalog: &'a Catalog,
        page: &'a SearchPage,
    ) -> Element<'a, Message> {
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
            let mut content = Column::new().spacing(30).push(
                text(results_title(list.total_results(), &page.query))
                    .size(24)
                    .color(TEXT_WHITE),
            );
            content = content.push(self.view_card_grid(
                catalog,
                list.visible_items(),
                MediaType::Movie,
                true,
            ));
            if list.is_loading_next() {
                content = content.push(view_spinner());
            }
            if let Some(message) = list.error() {
                content = content.push(view_error_notice(message));
            }
            content.into()
        };

        container(column![body])
            .width(Length::Fill)
            .padding(Padding::new(100.0).left(48.0).right(48.0).bottom(50.0))
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_is_pluralised_above_one() {
        assert_eq!(results_title(1, "heat"), "Search result of 'heat'");
        assert_eq!(results_title(0, "heat"), "Search result of 'heat'");
        assert_eq!(results_title(12, "heat"), "Search results of 'heat'");
    }

    #[test]
    fn start_requests_first_search_page() {
        let mut page = SearchPage::new(String::from("dune"));
        let request = page.start();
        assert_eq!(request.endpoint, "/search/multi");
        assert_eq!(request.page, 1);
        assert!(page.list.is_loading_first());
    }
}
