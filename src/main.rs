mod cards;
mod catalog;
mod components;
mod detail_handlers;
mod detail_sections;
mod details;
mod explore;
mod fetch;
mod format;
mod handlers;
mod home;
mod images;
mod media;
mod paging;
mod rating;
mod router;
mod search;
mod settings;
mod tabs;
mod tmdb;
mod video_popup;

use std::collections::HashMap;

use iced::widget::{column, container, scrollable};
use iced::{Element, Font, Length, Size, Task, Theme};
use tracing::info;
use tracing_subscriber::EnvFilter;

use cards::CarouselViewport;
use catalog::Catalog;
use components::{hidden_scrollbar_style, view_not_found, HeaderState, HeaderVisibility};
use details::DetailsPage;
use explore::ExplorePage;
use home::HomePage;
use images::ImageCache;
use media::{CarouselSlot, Message, BACKGROUND_NAVY};
use router::Route;
use search::SearchPage;
use settings::{AppSettings, SetupPage};
use tmdb::TmdbClient;

pub const MAIN_SCROLL_ID: &str = "main-scroll";

/// Catalog bootstrap progress. Pages only render once it is `Ready`.
#[derive(Debug)]
pub enum Boot {
    Initializing,
    Ready(Catalog),
    Failed(String),
}

#[derive(Debug)]
pub enum PageState {
    Home(HomePage),
    Details(DetailsPage),
    Search(SearchPage),
    Explore(ExplorePage),
    NotFound(String),
}

pub struct Cinescope {
    pub setup_page: Option<SetupPage>,
    pub client: Option<TmdbClient>,
    pub boot: Boot,
    pub route: Route,
    pub history: Vec<Route>,
    pub page: PageState,
    pub header: HeaderState,
    pub images: ImageCache,
    pub carousels: HashMap<CarouselSlot, CarouselViewport>,
}

impl Default for Cinescope {
    fn default() -> Self {
        Self {
            setup_page: None,
            client: None,
            boot: Boot::Initializing,
            route: Route::Home,
            history: Vec::new(),
            page: PageState::Home(HomePage::default()),
            header: HeaderState::default(),
            images: ImageCache::new(),
            carousels: HashMap::new(),
        }
    }
}

impl Cinescope {
    fn new() -> (Self, Task<Message>) {
        let route = std::env::args()
            .nth(1)
            .map(|path| Route::parse(&path))
            .unwrap_or_default();
        info!(%route, "starting");

        let settings = AppSettings::resolve();
        if !settings.is_valid() {
            return (
                Self {
                    setup_page: Some(SetupPage::default()),
                    route,
                    ..Default::default()
                },
                Task::none(),
            );
        }

        let mut app = Self {
            route,
            ..Default::default()
        };
        let task = app.initialize_with_settings(settings);
        (app, task)
    }

    fn initialize_with_settings(&mut self, settings: AppSettings) -> Task<Message> {
        self.client = Some(TmdbClient::from_settings(&settings));
        self.setup_page = None;
        handlers::start_bootstrap(self)
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        if let Message::Setup(setup_msg) = message {
            if let Some(ref mut setup) = self.setup_page {
                if let Some(settings) = setup.update(setup_msg) {
                    return self.initialize_with_settings(settings);
                }
            }
            return Task::none();
        }
        handlers::handle_message(self, message)
    }

    fn view(&self) -> Element<'_, Message> {
        if let Some(ref setup) = self.setup_page {
            return setup.view().map(Message::Setup);
        }

        let content = match &self.boot {
            Boot::Initializing => self.view_boot_loading(),
            Boot::Failed(error) => self.view_boot_failed(error),
            Boot::Ready(catalog) => self.view_main(catalog),
        };

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_theme| container::Style {
                background: Some(iced::Background::Color(BACKGROUND_NAVY)),
                ..Default::default()
            })
            .into()
    }

    fn view_main<'a>(&'a self, catalog: &'a Catalog) -> Element<'a, Message> {
        let page: Element<Message> = match &self.page {
            PageState::Home(home) => self.view_home(catalog, home),
            PageState::Details(details) => self.view_details(catalog, details),
            PageState::Search(search) => self.view_search(catalog, search),
            PageState::Explore(explore) => self.view_explore(catalog, explore),
            PageState::NotFound(path) => view_not_found(path),
        };

        let main = scrollable(column![page, self.view_footer()].width(Length::Fill))
            .id(iced::widget::Id::new(MAIN_SCROLL_ID))
            .on_scroll(|viewport| Message::MainScrolled {
                offset: viewport.absolute_offset().y,
                relative: viewport.relative_offset().y,
            })
            .width(Length::Fill)
            .height(Length::Fill)
            .style(hidden_scrollbar_style);

        let mut layers = iced::widget::Stack::new()
            .width(Length::Fill)
            .height(Length::Fill)
            .push(main);
        if self.header.visibility != HeaderVisibility::Hide || self.header.search_open {
            layers = layers.push(self.view_header());
        }
        if let PageState::Details(DetailsPage {
            popup: Some(video), ..
        }) = &self.page
        {
            layers = layers.push(self.view_video_popup(video));
        }
        layers.into()
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    iced::application(Cinescope::new, Cinescope::update, Cinescope::view)
        .title("Cinescope")
        .theme(Cinescope::theme)
        .window_size(Size::new(1280.0, 800.0))
        .font(iced_fonts::BOOTSTRAP_FONT_BYTES)
        .default_font(Font::DEFAULT)
        .run()
}
