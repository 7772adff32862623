/// Per-image result cards
///
/// One card per analysis entry: preview and filename on the left, that
/// entry's current state on the right - a loading notice while its
/// upload is in flight, an error panel on failure, otherwise the tag
/// list color-banded by confidence.

use crate::state::data::{AnalysisEntry, Tag};
use crate::Message;
use iced::widget::{column, container, row, text};
use iced::{Alignment, Color, Element, Length};

/// Tags at or above this confidence render as high confidence
pub const HIGH_CONFIDENCE: f32 = 0.75;
/// Tags at or above this confidence (below high) render as medium
pub const MEDIUM_CONFIDENCE: f32 = 0.50;

const HIGH_COLOR: Color = Color {
    r: 0.086,
    g: 0.639,
    b: 0.290,
    a: 1.0,
};
const MEDIUM_COLOR: Color = Color {
    r: 0.792,
    g: 0.541,
    b: 0.016,
    a: 1.0,
};
const LOW_COLOR: Color = Color {
    r: 0.863,
    g: 0.149,
    b: 0.149,
    a: 1.0,
};

/// Color band for a tag confidence value
pub fn confidence_color(confidence: f32) -> Color {
    if confidence >= HIGH_CONFIDENCE {
        HIGH_COLOR
    } else if confidence >= MEDIUM_CONFIDENCE {
        MEDIUM_COLOR
    } else {
        LOW_COLOR
    }
}

/// Build the card for one entry
pub fn entry_card(entry: &AnalysisEntry) -> Element<'_, Message> {
    let preview = column![
        iced::widget::image(entry.image.preview.clone()).width(Length::Fixed(220.0)),
        text(entry.image.filename.as_str()).size(14),
    ]
    .spacing(8)
    .align_x(Alignment::Center)
    .width(Length::Fixed(220.0));

    container(
        row![preview, analysis_panel(entry)]
            .spacing(20)
            .align_y(Alignment::Start),
    )
    .padding(16)
    .width(Length::Fill)
    .style(container::rounded_box)
    .into()
}

/// The state-dependent right-hand side of a card
fn analysis_panel(entry: &AnalysisEntry) -> Element<'_, Message> {
    if entry.is_loading {
        return container(text("Analyzing image...").size(16))
            .padding(12)
            .width(Length::Fill)
            .into();
    }

    if let Some(error) = &entry.error {
        return container(
            column![
                text("Analysis error:").size(16).color(LOW_COLOR),
                text(error.as_str()).size(14),
            ]
            .spacing(4),
        )
        .padding(12)
        .width(Length::Fill)
        .into();
    }

    let tags = entry
        .response
        .as_ref()
        .map(|response| response.tags.as_slice())
        .unwrap_or(&[]);

    if tags.is_empty() {
        return container(text("No tag detected with sufficient confidence.").size(14))
            .padding(12)
            .width(Length::Fill)
            .into();
    }

    let mut list = column![text("Detected tags:").size(18)].spacing(8);
    for tag in tags {
        list = list.push(tag_row(tag));
    }

    container(list).padding(12).width(Length::Fill).into()
}

fn tag_row(tag: &Tag) -> Element<'_, Message> {
    row![
        text(tag.name.as_str()).size(16).width(Length::Fill),
        text(format!("{:.2}%", tag.confidence * 100.0))
            .size(14)
            .color(confidence_color(tag.confidence)),
    ]
    .spacing(12)
    .align_y(Alignment::Center)
    .into()
}
