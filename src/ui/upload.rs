/// Image upload area
///
/// The drop surface for drag-and-drop plus the native picker button.
/// While files are dragged over the window the surface highlights;
/// once images are selected it shows a thumbnail grid with the count
/// and a clear control.

use crate::state::data::AnalysisEntry;
use crate::Message;
use iced::widget::{button, column, container, text};
use iced::{Alignment, Background, Border, Element, Length, Theme};
use iced_aw::Wrap;

/// Build the upload surface
pub fn upload_area(entries: &[AnalysisEntry], drag_active: bool) -> Element<'_, Message> {
    let content: Element<Message> = if entries.is_empty() {
        column![
            text("Drag and drop images here, or").size(16),
            button("Select Images").on_press(Message::PickImages).padding(10),
            text("Supported formats: JPEG, PNG, GIF, WEBP, BMP").size(13),
        ]
        .spacing(12)
        .align_x(Alignment::Center)
        .into()
    } else {
        let thumbnails: Vec<Element<Message>> = entries
            .iter()
            .map(|entry| {
                iced::widget::image(entry.image.preview.clone())
                    .width(Length::Fixed(96.0))
                    .height(Length::Fixed(96.0))
                    .into()
            })
            .collect();

        column![
            Wrap::with_elements(thumbnails).spacing(10.0).line_spacing(10.0),
            text(format!("{} image(s) selected.", entries.len())).size(14),
            button("Clear All Images").on_press(Message::Reset).padding(8),
        ]
        .spacing(12)
        .align_x(Alignment::Center)
        .into()
    };

    container(content)
        .padding(24)
        .width(Length::Fill)
        .center_x(Length::Fill)
        .style(move |theme: &Theme| drop_zone_style(theme, drag_active))
        .into()
}

/// Border highlight while files hover over the window
fn drop_zone_style(theme: &Theme, drag_active: bool) -> container::Style {
    let palette = theme.extended_palette();

    let (border_color, background) = if drag_active {
        (
            palette.primary.strong.color,
            Some(Background::Color(palette.primary.weak.color)),
        )
    } else {
        (palette.background.strong.color, None)
    };

    container::Style {
        background,
        border: Border {
            color: border_color,
            width: 2.0,
            radius: 12.0.into(),
        },
        ..container::Style::default()
    }
}
