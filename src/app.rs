//! Application controller
//!
//! `Viewer` owns the registry of open sessions and is the single place
//! where messages turn into state changes. Each session lives in its own
//! window; the window id is the session's key.

use iced::widget::{scrollable, text};
use iced::{event, keyboard, window, Element, Event, Subscription, Task, Theme};
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageLevel};
use std::path::PathBuf;

use crate::error::ViewerError;
use crate::state::config::{Config, ThemeChoice};
use crate::state::probe::{self, ImageDetails};
use crate::state::registry::Registry;
use crate::state::session::{Direction, Session};
use crate::state::siblings::{self, IMAGE_EXTENSIONS};
use crate::ui::preview;

/// Messages sent from a preview panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelMessage {
    Prev,
    Next,
}

impl PanelMessage {
    pub fn direction(self) -> Direction {
        match self {
            PanelMessage::Prev => Direction::Previous,
            PanelMessage::Next => Direction::Next,
        }
    }
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// Show the open dialog
    OpenDialog,
    /// Open a session for this file (dropped onto a window)
    OpenPath(PathBuf),
    /// A preview window finished opening
    WindowOpened(window::Id),
    /// A preview window was closed
    WindowClosed(window::Id),
    /// Prev/next from one panel
    Panel(window::Id, PanelMessage),
    /// Step every open session
    NavigateAll(Direction),
    /// Background probe finished for the image at `index`
    Probed {
        window: window::Id,
        index: usize,
        result: Result<ImageDetails, String>,
    },
    /// Close every window and exit
    Quit,
}

/// Native collaborators, swappable so the controller can run headless
#[derive(Clone, Copy)]
pub struct Host {
    /// Ask the user for an image; `None` when cancelled
    pub pick_file: fn() -> Option<PathBuf>,
    /// Tell the user an open failed
    pub report_error: fn(&ViewerError),
}

impl Default for Host {
    fn default() -> Self {
        Self {
            pick_file: pick_image_file,
            report_error: show_error_dialog,
        }
    }
}

/// Name and extensions of the open dialog's file filter
pub const DIALOG_FILTER: (&str, &[&str]) = ("Images", &IMAGE_EXTENSIONS);

fn pick_image_file() -> Option<PathBuf> {
    let (name, extensions) = DIALOG_FILTER;
    FileDialog::new()
        .set_title("Open Image")
        .add_filter(name, extensions)
        .pick_file()
}

fn show_error_dialog(error: &ViewerError) {
    let _ = MessageDialog::new()
        .set_level(MessageLevel::Error)
        .set_title(preview::TITLE_PREFIX)
        .set_description(error.to_string())
        .set_buttons(MessageButtons::Ok)
        .show();
}

/// Main application state
pub struct Viewer {
    /// Open sessions, in the order they were opened
    registry: Registry<window::Id>,
    config: Config,
    host: Host,
}

impl Viewer {
    /// Create the controller and open the given files, or show the open
    /// dialog when there are none.
    pub fn new(config: Config, files: Vec<PathBuf>) -> (Self, Task<Message>) {
        Self::with_host(config, files, Host::default())
    }

    pub fn with_host(config: Config, files: Vec<PathBuf>, host: Host) -> (Self, Task<Message>) {
        let mut viewer = Viewer {
            registry: Registry::new(),
            config,
            host,
        };

        if files.is_empty() {
            return (viewer, Task::done(Message::OpenDialog));
        }

        let tasks: Vec<_> = files.into_iter().map(|file| viewer.open_path(file)).collect();
        let task = if viewer.registry.is_empty() {
            tracing::info!("Nothing could be opened, exiting");
            iced::exit()
        } else {
            Task::batch(tasks)
        };

        (viewer, task)
    }

    pub fn registry(&self) -> &Registry<window::Id> {
        &self.registry
    }

    /// Handle application messages and update state
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::OpenDialog => match (self.host.pick_file)() {
                Some(path) => self.open_path(path),
                None => {
                    tracing::debug!("Open dialog cancelled");
                    self.exit_if_idle()
                }
            },
            Message::OpenPath(path) => {
                let task = self.open_path(path);
                if self.registry.is_empty() {
                    return self.exit_if_idle();
                }
                task
            }
            Message::WindowOpened(id) => {
                tracing::debug!("Window {:?} opened", id);
                Task::none()
            }
            Message::WindowClosed(id) => {
                if let Some(session) = self.registry.remove(id) {
                    tracing::info!(
                        "Closed preview of {} ({} left open)",
                        session.current_path().display(),
                        self.registry.len()
                    );
                }
                self.exit_if_idle()
            }
            Message::Panel(id, panel_message) => self.step(id, panel_message.direction()),
            Message::NavigateAll(direction) => {
                if !self.registry.any_open() {
                    return Task::none();
                }
                let stepped = self.registry.step_all(direction);
                tracing::debug!("Stepped {} sessions {:?}", stepped.len(), direction);
                Task::batch(stepped.into_iter().map(|(id, _)| self.after_step(id)))
            }
            Message::Probed { window, index, result } => {
                match (self.registry.get_mut(window), result) {
                    (Some(session), Ok(details)) => {
                        if !session.set_details(index, details) {
                            tracing::debug!("Dropping stale probe for index {}", index);
                        }
                    }
                    (Some(_), Err(err)) => tracing::warn!("⚠️  {}", err),
                    (None, _) => {}
                }
                Task::none()
            }
            Message::Quit => {
                let ids = self.registry.keys();
                for id in &ids {
                    self.registry.remove(*id);
                }
                tracing::info!("Quitting, closed {} previews", ids.len());
                Task::batch(ids.into_iter().map(window::close::<Message>)).chain(iced::exit())
            }
        }
    }

    /// Resolve the siblings of `path` and open a preview window for it.
    /// Failures are reported to the user and no session is created.
    fn open_path(&mut self, path: PathBuf) -> Task<Message> {
        let siblings = match siblings::resolve(&path) {
            Ok(siblings) => siblings,
            Err(err) => {
                tracing::error!("Cannot open {}: {}", path.display(), err);
                if err.is_user_facing() {
                    (self.host.report_error)(&err);
                }
                return Task::none();
            }
        };

        let session = Session::new(siblings);
        tracing::info!(
            "🖼  Opening {} ({}/{})",
            session.current_path().display(),
            session.current_index() + 1,
            session.len()
        );

        let (id, open) = window::open(window::Settings {
            size: self.config.window_size(),
            ..window::Settings::default()
        });
        self.registry.insert(id, session);

        Task::batch([open.map(Message::WindowOpened), self.probe(id)])
    }

    fn step(&mut self, id: window::Id, direction: Direction) -> Task<Message> {
        let Some(session) = self.registry.get_mut(id) else {
            return Task::none();
        };
        if session.is_disposed() {
            return Task::none();
        }
        let index = session.step(direction);
        tracing::debug!("Window {:?} now at index {}", id, index);
        self.after_step(id)
    }

    /// Follow-up work after a session moved: scroll its panel back to the
    /// top and probe the new image.
    fn after_step(&self, id: window::Id) -> Task<Message> {
        Task::batch([
            scrollable::snap_to(preview::scroll_id(id), scrollable::RelativeOffset::START),
            self.probe(id),
        ])
    }

    fn probe(&self, window: window::Id) -> Task<Message> {
        if !self.config.show_details {
            return Task::none();
        }
        let Some(session) = self.registry.get(window) else {
            return Task::none();
        };
        if !probe::can_probe(session.current_path()) {
            return Task::none();
        }

        let index = session.current_index();
        let path = session.current_path().to_path_buf();
        Task::perform(probe::probe_image(path), move |result| Message::Probed {
            window,
            index,
            result,
        })
    }

    fn exit_if_idle(&self) -> Task<Message> {
        if self.registry.is_empty() {
            tracing::info!("No previews open, exiting");
            iced::exit()
        } else {
            Task::none()
        }
    }

    pub fn title(&self, window: window::Id) -> String {
        self.registry
            .get(window)
            .map(preview::title)
            .unwrap_or_else(|| preview::TITLE_PREFIX.to_string())
    }

    /// Build the user interface of one window
    pub fn view(&self, window: window::Id) -> Element<'_, Message> {
        match self.registry.get(window) {
            Some(session) => preview::view(session, window, self.config.show_details),
            None => text("").into(),
        }
    }

    pub fn theme(&self, _window: window::Id) -> Theme {
        match self.config.theme {
            ThemeChoice::Dark => Theme::Dark,
            ThemeChoice::Light => Theme::Light,
        }
    }

    pub fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            window::close_events().map(Message::WindowClosed),
            event::listen_with(handle_event),
        ])
    }
}

fn handle_event(event: Event, status: event::Status, window: window::Id) -> Option<Message> {
    if let Event::Window(window::Event::FileDropped(path)) = &event {
        return Some(Message::OpenPath(path.clone()));
    }
    if matches!(status, event::Status::Captured) {
        return None;
    }

    match event {
        Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. }) => {
            key_binding(key.as_ref(), modifiers, window)
        }
        _ => None,
    }
}

/// Keyboard shortcuts.
///
/// Arrows step the focused window; with the command modifier (Ctrl, or Cmd
/// on macOS) they step every open window.
pub fn key_binding(
    key: keyboard::Key<&str>,
    modifiers: keyboard::Modifiers,
    window: window::Id,
) -> Option<Message> {
    use keyboard::key::Named;
    use keyboard::Key;

    match key {
        Key::Named(Named::ArrowRight) if modifiers.command() => {
            Some(Message::NavigateAll(Direction::Next))
        }
        Key::Named(Named::ArrowLeft) if modifiers.command() => {
            Some(Message::NavigateAll(Direction::Previous))
        }
        Key::Named(Named::ArrowRight) => Some(Message::Panel(window, PanelMessage::Next)),
        Key::Named(Named::ArrowLeft) => Some(Message::Panel(window, PanelMessage::Prev)),
        Key::Character("o") if modifiers.command() => Some(Message::OpenDialog),
        Key::Character("q") if modifiers.command() => Some(Message::Quit),
        _ => None,
    }
}
