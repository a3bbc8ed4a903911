use iced::widget::{Button, Column, Container, Row, Space, Text, container, text_input};
use iced::{Color, Element, Length, Shadow, Vector, border};

use crate::Message;
use crate::i18n::{tr, tr_format};
use crate::modal::ModalContent;
use crate::settings::ThemePalette;
use crate::ui::about::about_modal_view;

pub fn color_luminance(color: Color) -> f32 {
    0.2126 * color.r + 0.7152 * color.g + 0.0722 * color.b
}

pub fn modal_overlay_color(palette: &ThemePalette) -> Color {
    let base = palette.widget_background_color();
    if color_luminance(base) > 0.5 {
        Color::from_rgba(0.0, 0.0, 0.0, 0.55)
    } else {
        Color::from_rgba(1.0, 1.0, 1.0, 0.35)
    }
}

pub fn modal_shadow_color(palette: &ThemePalette) -> Color {
    let base = palette.widget_background_color();
    if color_luminance(base) > 0.5 {
        Color::from_rgba(0.0, 0.0, 0.0, 0.25)
    } else {
        Color::from_rgba(0.0, 0.0, 0.0, 0.5)
    }
}

pub fn modal_layout<'a>(
    palette: ThemePalette,
    content: Element<'a, Message>,
    width: Length,
    padding: u16,
    radius: f32,
) -> Element<'a, Message> {
    let card_bg = palette.widget_background_color();
    let border_color = palette.widget_border_color();
    let shadow_color = modal_shadow_color(&palette);
    let overlay_color = modal_overlay_color(&palette);
    let text_color = palette.text_primary.to_color();

    let card =
        Container::new(content).padding(padding).width(width).style(move |_| container::Style {
            background: Some(card_bg.into()),
            border: border::rounded(radius).width(1).color(border_color),
            shadow: Shadow {
                color: shadow_color,
                offset: Vector::new(0.0, 8.0),
                blur_radius: 24.0,
            },
            text_color: Some(text_color),
            ..Default::default()
        });

    Container::new(card)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .style(move |_| container::Style {
            background: Some(overlay_color.into()),
            ..Default::default()
        })
        .into()
}

/// Render the dialog surface for whatever the modal controller is showing.
pub fn modal_view<'a>(content: &'a ModalContent, palette: &ThemePalette) -> Element<'a, Message> {
    match content {
        ModalContent::NewCollection { name } => prompt_dialog(
            palette,
            tr("Create a new collection").to_owned(),
            name,
            tr("Collection name"),
            tr("Create"),
        ),
        ModalContent::RenameCollection { old, name } => prompt_dialog(
            palette,
            tr_format("Rename collection {}", &[old]),
            name,
            tr("New name"),
            tr("Rename"),
        ),
        ModalContent::DropCollection { name } => confirm_dialog(
            palette,
            tr_format("Delete collection {}?", &[name]),
            tr("This permanently deletes the collection and all of its documents."),
            tr("Delete"),
        ),
        ModalContent::ScrubCollection { name } => confirm_dialog(
            palette,
            tr_format("Scrub collection {}?", &[name]),
            tr("Scrub repairs and compacts the collection. It may take several minutes."),
            tr("Scrub"),
        ),
        ModalContent::DeleteDocument { id, .. } => confirm_dialog(
            palette,
            tr_format("Delete document {}?", &[id]),
            tr("This permanently deletes the document."),
            tr("Delete"),
        ),
        ModalContent::NewIndex { path, .. } => prompt_dialog(
            palette,
            tr("Create a new index").to_owned(),
            path,
            tr("Index path (comma-separated)"),
            tr("Create"),
        ),
        ModalContent::DeleteIndex { path, .. } => confirm_dialog(
            palette,
            tr_format("Delete index {}?", &[path]),
            "",
            tr("Delete"),
        ),
        ModalContent::About => about_modal_view(palette.clone()),
    }
}

/// Dialog with a single text input and confirm/cancel actions.
fn prompt_dialog<'a>(
    palette: &ThemePalette,
    title: String,
    value: &'a str,
    placeholder: &'static str,
    confirm_label: &'static str,
) -> Element<'a, Message> {
    let text_color = palette.text_primary.to_color();

    let input = text_input(placeholder, value)
        .on_input(Message::ModalInputChanged)
        .on_submit(Message::ModalConfirmed)
        .padding([6, 10])
        .width(Length::Fill);

    let content = Column::new()
        .spacing(16)
        .push(Text::new(title).size(18).color(text_color))
        .push(input)
        .push(action_row(palette, confirm_label));

    modal_layout(palette.clone(), content.into(), Length::Fixed(480.0), 24, 12.0)
}

/// Yes/no dialog for destructive actions.
fn confirm_dialog<'a>(
    palette: &ThemePalette,
    title: String,
    body: &'static str,
    confirm_label: &'static str,
) -> Element<'a, Message> {
    let text_color = palette.text_primary.to_color();

    let mut content = Column::new().spacing(16).push(Text::new(title).size(18).color(text_color));
    if !body.is_empty() {
        content = content.push(Text::new(body).size(14).color(palette.text_muted.to_color()));
    }
    content = content.push(action_row(palette, confirm_label));

    modal_layout(palette.clone(), content.into(), Length::Fixed(480.0), 24, 12.0)
}

fn action_row<'a>(palette: &ThemePalette, confirm_label: &'static str) -> Element<'a, Message> {
    let confirm_palette = palette.clone();
    let confirm = Button::new(Text::new(confirm_label).size(14))
        .padding([6, 16])
        .on_press(Message::ModalConfirmed)
        .style(move |_, status| confirm_palette.primary_button_style(6.0, status));

    let cancel_palette = palette.clone();
    let cancel = Button::new(Text::new(tr("Cancel")).size(14))
        .padding([6, 16])
        .on_press(Message::ModalCancelled)
        .style(move |_, status| cancel_palette.subtle_button_style(6.0, status));

    Row::new()
        .spacing(12)
        .push(Space::new().width(Length::Fill))
        .push(cancel)
        .push(confirm)
        .into()
}
