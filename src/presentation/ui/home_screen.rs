//! Home view: banner carousel, shop-by tiles and featured products.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, StatefulWidget, Widget, Wrap},
};

use super::carousel_timer::CarouselTimer;
use super::command::ViewCommand;
use crate::application::{AppState, Dispatcher};
use crate::domain::Carousel;
use crate::domain::filter::{FilterOption, FilterParams, FilterSection, SortOption};
use crate::presentation::widgets::{ProductList, ProductListState};

/// Region of the home view receiving keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeFocus {
    /// "Shop by category" tiles.
    Categories,
    /// "Shop by Service" tiles.
    Services,
    /// Featured products.
    Products,
}

impl HomeFocus {
    const fn next(self) -> Self {
        match self {
            Self::Categories => Self::Services,
            Self::Services => Self::Products,
            Self::Products => Self::Categories,
        }
    }
}

/// Selection, carousel position and banner timer of the home view.
pub struct HomeScreenState {
    carousel: Carousel,
    timer: Option<CarouselTimer>,
    focus: HomeFocus,
    category_index: usize,
    service_index: usize,
    products: ProductListState,
}

impl HomeScreenState {
    /// Focus on the categories, first slide.
    #[must_use]
    pub fn new() -> Self {
        Self {
            carousel: Carousel::new(),
            timer: None,
            focus: HomeFocus::Categories,
            category_index: 0,
            service_index: 0,
            products: ProductListState::new(),
        }
    }

    /// Fetches banners and featured products.
    pub fn mount(&self, dispatcher: &Dispatcher) {
        dispatcher.get_feature_images();
        dispatcher.fetch_all_filtered_products(FilterParams::new(), SortOption::PriceLowToHigh);
    }

    /// Attaches the banner timer; dropping the state stops it.
    pub fn set_timer(&mut self, timer: CarouselTimer) {
        self.timer = Some(timer);
    }

    /// Focused region.
    #[must_use]
    pub const fn focus(&self) -> HomeFocus {
        self.focus
    }

    /// Banner index for a carousel of `len` slides.
    #[must_use]
    pub const fn slide(&self, len: usize) -> usize {
        self.carousel.current(len)
    }

    /// Timer tick: next slide.
    pub const fn on_tick(&mut self, slides: usize) {
        self.carousel.advance(slides);
    }

    fn move_tile(index: &mut usize, len: usize, forward: bool) {
        if len == 0 {
            return;
        }
        *index = if forward {
            (*index + 1).min(len - 1)
        } else {
            index.saturating_sub(1)
        };
    }

    fn open_tile(section: FilterSection, index: usize) -> ViewCommand {
        section
            .options()
            .get(index)
            .map_or(ViewCommand::Consumed, |option| {
                ViewCommand::OpenListing(FilterParams::single(section, option.id))
            })
    }

    /// Handles a key; `[` and `]` move the banner by hand.
    pub fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> ViewCommand {
        let slides = state.feature.feature_image_list().len();
        let products = state.products.product_list();

        match key.code {
            KeyCode::Char('[') => self.carousel.retreat(slides),
            KeyCode::Char(']') => self.carousel.advance(slides),
            KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::Left | KeyCode::Right | KeyCode::Up | KeyCode::Down => {
                let forward = matches!(key.code, KeyCode::Right | KeyCode::Down);
                match self.focus {
                    HomeFocus::Categories => {
                        Self::move_tile(&mut self.category_index, FilterSection::Category.options().len(), forward);
                    }
                    HomeFocus::Services => {
                        Self::move_tile(&mut self.service_index, FilterSection::Brand.options().len(), forward);
                    }
                    HomeFocus::Products if forward => self.products.select_next(products.len()),
                    HomeFocus::Products => self.products.select_previous(products.len()),
                }
            }
            KeyCode::Enter => {
                return match self.focus {
                    HomeFocus::Categories => Self::open_tile(FilterSection::Category, self.category_index),
                    HomeFocus::Services => Self::open_tile(FilterSection::Brand, self.service_index),
                    HomeFocus::Products => self
                        .products
                        .selected_product(products)
                        .map_or(ViewCommand::Consumed, |p| ViewCommand::OpenDetails(p.id.clone())),
                };
            }
            KeyCode::Char('a') if self.focus == HomeFocus::Products => {
                return self
                    .products
                    .selected_product(products)
                    .map_or(ViewCommand::Consumed, |p| ViewCommand::AddToCart(p.clone()));
            }
            _ => {}
        }
        ViewCommand::Consumed
    }
}

impl Default for HomeScreenState {
    fn default() -> Self {
        Self::new()
    }
}

/// Banner, tiles and featured products.
pub struct HomeScreen<'a> {
    state: &'a AppState,
}

impl<'a> HomeScreen<'a> {
    /// Renders from `state`.
    #[must_use]
    pub const fn new(state: &'a AppState) -> Self {
        Self { state }
    }
}

fn tile_line(options: &[FilterOption], selected: usize, focused: bool) -> Line<'static> {
    let spans = options
        .iter()
        .enumerate()
        .flat_map(|(i, option)| {
            let style = if focused && i == selected {
                Style::default().bg(Color::Yellow).fg(Color::Black).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            [Span::styled(format!(" {} ", option.label), style), Span::raw(" ")]
        })
        .collect::<Vec<_>>();
    Line::from(spans)
}

impl StatefulWidget for HomeScreen<'_> {
    type State = HomeScreenState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let [banner_area, categories_area, services_area, products_area] = Layout::vertical([
            Constraint::Length(5),
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Fill(1),
        ])
        .areas(area);

        let slides = self.state.feature.feature_image_list();
        let banner = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title(" Handy Helpers ");
        let inner = banner.inner(banner_area);
        banner.render(banner_area, buf);
        if !slides.is_empty() {
            let index = state.slide(slides.len());
            let image = slides[index].image.as_deref().unwrap_or("");
            let lines = vec![
                Line::from(format!("◀ [   banner {} of {}   ] ▶", index + 1, slides.len())),
                Line::styled(image.to_string(), Style::default().fg(Color::DarkGray)),
            ];
            Paragraph::new(lines).wrap(Wrap { trim: true }).render(inner, buf);
        }

        let categories = Block::default().borders(Borders::TOP).title(" Shop by category ");
        let inner = categories.inner(categories_area);
        categories.render(categories_area, buf);
        Paragraph::new(tile_line(
            FilterSection::Category.options(),
            state.category_index,
            state.focus == HomeFocus::Categories,
        ))
        .render(inner, buf);

        let services = Block::default().borders(Borders::TOP).title(" Shop by Service ");
        let inner = services.inner(services_area);
        services.render(services_area, buf);
        Paragraph::new(tile_line(
            FilterSection::Brand.options(),
            state.service_index,
            state.focus == HomeFocus::Services,
        ))
        .wrap(Wrap { trim: true })
        .render(inner, buf);

        ProductList::new(self.state.products.product_list(), "Feature Products")
            .focused(state.focus == HomeFocus::Products)
            .render(products_area, buf, &mut state.products);
    }
}
