use iced::widget::{
    button, center, column, container, image as picture, mouse_area, opaque, row, scrollable,
    stack, text, Column,
};
use iced::{event, keyboard, mouse, time};
use iced::{Alignment, Color, ContentFit, Element, Event, Length, Point, Subscription, Task, Theme};
use iced_aw::Wrap;
use rfd::FileDialog;
use std::path::PathBuf;

mod catalog;
mod config;
mod contact;
mod error;
mod media;
mod state;

use catalog::display::DisplayNames;
use catalog::{source, Catalog, ALL};
use config::AppConfig;
use media::reference::ImageRef;
use media::thumbnail::{self, Priority, Thumb, ThumbnailBoard, ThumbnailCache};
use state::selection::{GalleryState, Origin};
use state::slideshow::Slideshow;

const TILE_SIZE: f32 = 160.0;

/// Main application state
struct Showroom {
    config: AppConfig,
    /// Immutable once loaded; replaced wholesale when a new source is opened
    catalog: Catalog,
    display: DisplayNames,
    gallery: GalleryState,
    hero: Slideshow,
    hero_images: Vec<ImageRef>,
    thumbnails: ThumbnailCache,
    thumbs: ThumbnailBoard,
    cursor: Point,
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    SelectCategory(String),
    SelectSubcategory(String),
    /// Grid tile clicked: index in the visible grid and its image
    OpenItem(usize, ImageRef),
    /// Close button, backdrop click or Escape
    CloseItem,
    /// Last known pointer position, used as the open item's origin
    CursorMoved(Point),
    HeroNext,
    HeroPrevious,
    HeroGoTo(usize),
    /// Autoplay interval elapsed
    HeroTick,
    /// One thumbnail finished, tagged with the load generation it was asked for in
    ThumbnailReady(u64, ImageRef, Result<PathBuf, String>),
    /// User clicked "Open Catalog" (a JSON file)
    OpenCatalogFile,
    /// User clicked "Open Image Folder" (a category tree)
    OpenImageFolder,
    CatalogLoaded(PathBuf, Result<Catalog, String>),
    CopyWhatsAppLink,
}

impl Showroom {
    fn new() -> (Self, Task<Message>) {
        let config = AppConfig::load_or_default().with_args(std::env::args().skip(1));

        let catalog = match &config.catalog_path {
            Some(path) => source::load(path, &config.scan_url_prefix).unwrap_or_else(|e| {
                log::warn!("Could not load catalog, starting empty: {}", e);
                Catalog::default()
            }),
            None => {
                log::info!("No catalog configured");
                Catalog::default()
            }
        };

        let mut display = DisplayNames::default();
        display.merge(config.display_names.clone());

        let thumbnails = ThumbnailCache::new(
            thumbnail::default_cache_dir(),
            config.resolved_asset_root(),
            config.thumbnail_size,
        );

        let status = format!(
            "{} categories, {} images",
            catalog.len(),
            catalog.image_count()
        );

        let mut showroom = Showroom {
            gallery: GalleryState::new(&catalog),
            hero: Slideshow::new(0),
            hero_images: Vec::new(),
            display,
            thumbnails,
            thumbs: ThumbnailBoard::default(),
            cursor: Point::ORIGIN,
            status,
            catalog,
            config,
        };
        showroom.reset_hero();

        let task = showroom.request_thumbnails();
        (showroom, task)
    }

    /// Hero slides come from config, or the first image of each category
    fn reset_hero(&mut self) {
        self.hero_images = if self.config.hero_images.is_empty() {
            self.catalog
                .list_categories()
                .into_iter()
                .filter_map(|c| self.catalog.get_images(c, None).first().map(|r| (*r).clone()))
                .collect()
        } else {
            self.config.hero_images.clone()
        };
        self.hero = Slideshow::new(self.hero_images.len())
            .with_interval(self.config.slideshow_interval());
    }

    /// Start thumbnail generation for the visible grid.
    ///
    /// The first few items are generated in parallel; the rest follow one
    /// at a time so they never hold up the ones on screen. Each result is
    /// delivered as soon as it is ready.
    fn request_thumbnails(&mut self) -> Task<Message> {
        let generation = self.thumbs.generation();
        let wanted = self.thumbs.claim(self.gallery.visible_images(&self.catalog));

        let mut eager = Vec::new();
        let mut lazy = Vec::new();
        for (index, reference) in wanted.into_iter().enumerate() {
            let task = Task::perform(
                self.thumbnails.clone().generate(reference.clone()),
                thumbnail_ready(generation, reference),
            );
            match Priority::for_index(index, thumbnail::EAGER_COUNT) {
                Priority::Eager => eager.push(task),
                Priority::Lazy => lazy.push(task),
            }
        }

        let background = lazy.into_iter().fold(Task::none(), Task::chain);
        Task::batch(eager.into_iter().chain(std::iter::once(background)))
    }

    fn load_catalog(&mut self, path: PathBuf) -> Task<Message> {
        self.status = format!("Loading {}...", path.display());
        let prefix = self.config.scan_url_prefix.clone();
        let key = path.clone();
        Task::perform(load_catalog_async(path, prefix), move |result| {
            Message::CatalogLoaded(key.clone(), result)
        })
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::SelectCategory(category) => {
                self.gallery.select_category(category);
                self.request_thumbnails()
            }
            Message::SelectSubcategory(subcategory) => {
                self.gallery.select_subcategory(subcategory);
                self.request_thumbnails()
            }
            Message::OpenItem(index, reference) => {
                // Buttons don't report where they were pressed; use the tracked cursor
                let origin = Origin {
                    x: self.cursor.x,
                    y: self.cursor.y,
                };
                let opened = self.gallery.open_item(reference, index, origin);
                log::debug!("Opened {} ({})", opened.reference, opened.label);
                Task::none()
            }
            Message::CloseItem => {
                self.gallery.close_item();
                Task::none()
            }
            Message::CursorMoved(position) => {
                self.cursor = position;
                Task::none()
            }
            Message::HeroNext => {
                self.hero.next();
                Task::none()
            }
            Message::HeroPrevious => {
                self.hero.previous();
                Task::none()
            }
            Message::HeroGoTo(index) => {
                self.hero.go_to(index);
                Task::none()
            }
            // Autoplay only; the subscription is off for a single slide
            Message::HeroTick => {
                self.hero.tick();
                Task::none()
            }
            Message::ThumbnailReady(generation, reference, result) => {
                self.thumbs.record(generation, reference, result);
                Task::none()
            }
            Message::OpenCatalogFile => {
                let file = FileDialog::new()
                    .set_title("Select Catalog JSON")
                    .add_filter("Catalog", &["json"])
                    .pick_file();

                match file {
                    Some(path) => self.load_catalog(path),
                    None => Task::none(),
                }
            }
            Message::OpenImageFolder => {
                let folder = FileDialog::new()
                    .set_title("Select Folder with Category Images")
                    .pick_folder();

                match folder {
                    Some(path) => self.load_catalog(path),
                    None => Task::none(),
                }
            }
            Message::CatalogLoaded(path, Ok(catalog)) => {
                self.status = format!(
                    "Loaded {}: {} categories, {} images",
                    path.display(),
                    catalog.len(),
                    catalog.image_count()
                );
                self.config.catalog_path = Some(path);
                // New asset root, so earlier thumbnails and in-flight results no longer apply
                self.thumbnails = ThumbnailCache::new(
                    thumbnail::default_cache_dir(),
                    self.config.resolved_asset_root(),
                    self.config.thumbnail_size,
                );
                self.catalog = catalog;
                self.thumbs.reset();
                // Keep the selection if the new catalog still has it
                self.gallery.rebase(&self.catalog);
                self.reset_hero();
                self.request_thumbnails()
            }
            Message::CatalogLoaded(path, Err(e)) => {
                log::warn!("Failed to load {}: {}", path.display(), e);
                self.status = format!("Could not load {}: {}", path.display(), e);
                Task::none()
            }
            Message::CopyWhatsAppLink => match self.config.contact.whatsapp_url() {
                Some(url) => {
                    self.status = format!("Copied {}", url);
                    iced::clipboard::write(url)
                }
                None => Task::none(),
            },
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        let events = event::listen_with(|event, _status, _window| match event {
            Event::Mouse(mouse::Event::CursorMoved { position }) => {
                Some(Message::CursorMoved(position))
            }
            Event::Keyboard(keyboard::Event::KeyPressed {
                key: keyboard::Key::Named(keyboard::key::Named::Escape),
                ..
            }) => Some(Message::CloseItem),
            _ => None,
        });

        if self.hero.autoplay && self.hero.len() > 1 {
            Subscription::batch([
                events,
                time::every(self.hero.interval).map(|_| Message::HeroTick),
            ])
        } else {
            events
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        let header = row![
            text("Our Collections").size(36).width(Length::Fill),
            button("Open Catalog").on_press(Message::OpenCatalogFile).padding(10),
            button("Open Image Folder").on_press(Message::OpenImageFolder).padding(10),
        ]
        .spacing(10)
        .align_y(Alignment::Center);

        let content: Column<'_, Message> = column![
            header,
            self.view_hero(),
            self.view_categories(),
            self.view_grid(),
            self.view_contact(),
            text(&self.status).size(14),
        ]
        .spacing(24)
        .padding(32);

        let base = scrollable(content).width(Length::Fill).height(Length::Fill);

        match self.gallery.overlay() {
            Some(item) => {
                let full: Element<'_, Message> = match item.reference.resolve_local(self.thumbnails.asset_root()) {
                    Some(path) => picture(picture::Handle::from_path(path))
                        .content_fit(ContentFit::Contain)
                        .width(Length::Fill)
                        .into(),
                    None => text(item.reference.as_str()).into(),
                };

                let panel = container(
                    column![
                        full,
                        row![
                            text(&item.label).size(24).width(Length::Fill),
                            button("Close").on_press(Message::CloseItem),
                        ]
                        .align_y(Alignment::Center),
                    ]
                    .spacing(12)
                    .max_width(900.0),
                )
                .padding(20)
                .style(container::rounded_box);

                stack![
                    base,
                    opaque(
                        mouse_area(center(opaque(panel)).style(|_theme| container::Style {
                            background: Some(Color { a: 0.8, ..Color::BLACK }.into()),
                            ..container::Style::default()
                        }))
                        .on_press(Message::CloseItem)
                    )
                ]
                .into()
            }
            None => base.into(),
        }
    }

    fn view_hero(&self) -> Element<'_, Message> {
        let Some(current) = self.hero.current() else {
            return column![].into();
        };
        let reference = &self.hero_images[current];

        let slide: Element<'_, Message> = match reference.resolve_local(self.thumbnails.asset_root()) {
            Some(path) => picture(picture::Handle::from_path(path))
                .content_fit(ContentFit::Cover)
                .width(Length::Fill)
                .height(Length::Fixed(320.0))
                .into(),
            None => container(text(reference.as_str()))
                .center_x(Length::Fill)
                .center_y(Length::Fixed(320.0))
                .into(),
        };

        let dots: Vec<Element<'_, Message>> = (0..self.hero.len())
            .map(|i| {
                let style = if i == current { button::primary } else { button::secondary };
                button(text("").size(6))
                    .style(style)
                    .padding(4)
                    .on_press(Message::HeroGoTo(i))
                    .into()
            })
            .collect();

        column![
            slide,
            row![
                button("<").on_press(Message::HeroPrevious),
                row(dots).spacing(6),
                button(">").on_press(Message::HeroNext),
            ]
            .spacing(12)
            .align_y(Alignment::Center),
        ]
        .spacing(8)
        .align_x(Alignment::Center)
        .into()
    }

    fn view_categories(&self) -> Element<'_, Message> {
        let selection = self.gallery.selection();
        let current = selection.category.as_deref();

        let categories: Vec<Element<'_, Message>> = self
            .catalog
            .list_categories()
            .into_iter()
            .map(|key| {
                let style = if current == Some(key) { button::primary } else { button::secondary };
                spaced(
                    button(text(self.display.category(key)))
                        .style(style)
                        .padding([6, 16])
                        .on_press(Message::SelectCategory(key.to_string())),
                    4,
                )
            })
            .collect();

        let mut bars = column![Wrap::with_elements(categories)].spacing(12);

        let subcategories = current
            .map(|c| self.catalog.list_subcategories(c))
            .unwrap_or_default();
        if !subcategories.is_empty() {
            let chips: Vec<Element<'_, Message>> = std::iter::once(ALL)
                .chain(subcategories)
                .map(|key| {
                    let style = if selection.subcategory == key {
                        button::danger
                    } else {
                        button::secondary
                    };
                    spaced(
                        button(text(self.display.subcategory(key)).size(13))
                            .style(style)
                            .padding([4, 12])
                            .on_press(Message::SelectSubcategory(key.to_string())),
                        3,
                    )
                })
                .collect();
            bars = bars.push(Wrap::with_elements(chips));
        }

        bars.into()
    }

    fn view_grid(&self) -> Element<'_, Message> {
        let images = self.gallery.visible_images(&self.catalog);
        if images.is_empty() {
            return container(text("No items found in this category.").size(18))
                .center_x(Length::Fill)
                .padding(48)
                .into();
        }

        let tiles: Vec<Element<'_, Message>> = images
            .into_iter()
            .enumerate()
            .map(|(index, reference)| {
                let label = state::selection::item_label(index);
                let face: Element<'_, Message> = match self.thumbs.get(reference) {
                    Some(Thumb::Ready(path)) => picture(picture::Handle::from_path(path))
                        .content_fit(ContentFit::Cover)
                        .width(Length::Fixed(TILE_SIZE))
                        .height(Length::Fixed(TILE_SIZE))
                        .into(),
                    Some(Thumb::Failed) => placeholder(format!("{}\nFailed to load image", label)),
                    Some(Thumb::Pending) => placeholder(format!("{}\nLoading...", label)),
                    None => placeholder(label),
                };
                spaced(
                    button(face)
                        .padding(0)
                        .style(button::text)
                        .on_press(Message::OpenItem(index, reference.clone())),
                    6,
                )
            })
            .collect();

        Wrap::with_elements(tiles).into()
    }

    fn view_contact(&self) -> Element<'_, Message> {
        let contact = &self.config.contact;
        let mut details = column![text("Visit Us").size(24)].spacing(6);

        for line in [&contact.address, &contact.phone, &contact.email] {
            if !line.is_empty() {
                details = details.push(text(line.as_str()));
            }
        }

        if let Some(url) = contact.whatsapp_url() {
            details = details.push(
                row![
                    text(url),
                    button("Copy WhatsApp link").on_press(Message::CopyWhatsAppLink),
                ]
                .spacing(12)
                .align_y(Alignment::Center),
            );
        }

        details.into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

/// Wrap items get their gaps from padding around each item
fn spaced<'a>(content: impl Into<Element<'a, Message>>, gap: u16) -> Element<'a, Message> {
    container(content).padding(gap).into()
}

fn placeholder<'a>(label: String) -> Element<'a, Message> {
    container(text(label).size(12))
        .width(Length::Fixed(TILE_SIZE))
        .height(Length::Fixed(TILE_SIZE))
        .center_x(Length::Fixed(TILE_SIZE))
        .center_y(Length::Fixed(TILE_SIZE))
        .style(container::bordered_box)
        .into()
}

/// Maps a finished thumbnail task back to a message.
///
/// iced may call the mapper more than once, so it clones what it captures.
fn thumbnail_ready(
    generation: u64,
    reference: ImageRef,
) -> impl Fn(error::Result<PathBuf>) -> Message {
    move |result| {
        Message::ThumbnailReady(generation, reference.clone(), result.map_err(|e| e.to_string()))
    }
}

/// Load a catalog source off the UI thread
async fn load_catalog_async(path: PathBuf, url_prefix: String) -> Result<Catalog, String> {
    tokio::task::spawn_blocking(move || source::load(&path, &url_prefix))
        .await
        .map_err(|e| format!("Task join error: {}", e))?
        .map_err(|e| e.to_string())
}

fn main() -> iced::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    iced::application("Gem Gallery", Showroom::update, Showroom::view)
        .theme(Showroom::theme)
        .subscription(Showroom::subscription)
        .centered()
        .run_with(Showroom::new)
}
