use iced::widget::{button, column, container, image, row, scrollable, svg, text, Space};
use iced::{window, Alignment, Element, Length};
use std::path::Path;

use crate::app::{Message, PanelMessage};
use crate::state::session::Session;

/// Window title prefix
pub const TITLE_PREFIX: &str = "SIV";

/// 1-based position within the sibling sequence, e.g. `(3/5)`
pub fn position_label(session: &Session) -> String {
    format!("({}/{})", session.current_index() + 1, session.len())
}

/// Window title, e.g. `SIV (3/5) holiday.png`
pub fn title(session: &Session) -> String {
    format!(
        "{} {} {}",
        TITLE_PREFIX,
        position_label(session),
        session.current_file_name()
    )
}

/// Id of the scrollable holding a window's image, used to scroll back to top
pub fn scroll_id(window: window::Id) -> scrollable::Id {
    scrollable::Id::new(format!("preview-{:?}", window))
}

fn is_svg(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("svg"))
        .unwrap_or(false)
}

fn nav_button(label: &str, message: Message) -> Element<'_, Message> {
    button(text(label).size(28))
        .on_press(message)
        .padding([12, 8])
        .into()
}

/// Build the preview panel for one session.
///
/// Pure with respect to the session: only reads the displayed image,
/// position and details.
pub fn view(session: &Session, window: window::Id, show_details: bool) -> Element<'_, Message> {
    let path = session.current_path().to_path_buf();

    let picture: Element<Message> = if is_svg(&path) {
        svg(svg::Handle::from_path(path)).width(Length::Fill).into()
    } else {
        image(image::Handle::from_path(path)).width(Length::Fill).into()
    };

    let toolbar = row![
        button("Open…").on_press(Message::OpenDialog).padding([4, 10]),
        Space::with_width(Length::Fill),
        text(position_label(session)).size(16),
    ]
    .spacing(10)
    .align_y(Alignment::Center);

    let canvas = scrollable(
        container(picture)
            .width(Length::Fill)
            .center_x(Length::Fill)
            .padding(10),
    )
    .id(scroll_id(window))
    .width(Length::Fill)
    .height(Length::Fill);

    let body = row![
        nav_button("‹", Message::Panel(window, PanelMessage::Prev)),
        canvas,
        nav_button("›", Message::Panel(window, PanelMessage::Next)),
    ]
    .spacing(8)
    .align_y(Alignment::Center)
    .height(Length::Fill);

    let mut content = column![toolbar, body].spacing(8).padding(10);

    if show_details {
        let status = match session.details() {
            Some(details) => format!("{}  {}", session.current_file_name(), details.summary()),
            None => session.current_file_name(),
        };
        content = content.push(text(status).size(14));
    }

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
