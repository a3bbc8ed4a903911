use iced::alignment::Vertical;
use iced::widget::text_editor::{self, Content as TextEditorContent};
use iced::widget::{Button, Column, Container, Row, Text, container};
use iced::{Element, Font, Length, border};

use crate::Message;
use crate::i18n::tr;
use crate::settings::ThemePalette;

/// The JSON editor for one document, blank for `docs/new/<col>`.
#[derive(Debug)]
pub struct DocumentScreen {
    pub col: String,
    pub id: Option<String>,
    pub editor: TextEditorContent,
    pub loaded: bool,
}

impl DocumentScreen {
    pub fn blank(col: String) -> Self {
        Self { col, id: None, editor: TextEditorContent::new(), loaded: true }
    }

    pub fn existing(col: String, id: String) -> Self {
        Self { col, id: Some(id), editor: TextEditorContent::new(), loaded: false }
    }

    pub fn set_body(&mut self, body: &serde_json::Value) {
        let rendered = serde_json::to_string_pretty(body).unwrap_or_else(|_| body.to_string());
        self.editor = TextEditorContent::with_text(&rendered);
        self.loaded = true;
    }
}

pub fn document_view<'a>(
    screen: &'a DocumentScreen,
    palette: &ThemePalette,
) -> Element<'a, Message> {
    let text_color = palette.text_primary.to_color();
    let muted = palette.text_muted.to_color();

    let title = match &screen.id {
        Some(id) => format!("{}/{}", screen.col, id),
        None => tr("New Document").to_owned(),
    };

    let save_palette = palette.clone();
    let save = Button::new(Text::new(tr("Save")).size(13))
        .padding([4, 12])
        .on_press(Message::DocumentSaveRequested)
        .style(move |_, status| save_palette.primary_button_style(6.0, status));

    // An existing document can be deleted; an unsaved one only cancelled.
    let secondary_palette = palette.clone();
    let secondary = match &screen.id {
        Some(_) => Button::new(Text::new(tr("Delete")).size(13))
            .padding([4, 12])
            .on_press(Message::DocumentDeleteRequested)
            .style(move |_, status| secondary_palette.subtle_button_style(6.0, status)),
        None => Button::new(Text::new(tr("Cancel")).size(13))
            .padding([4, 12])
            .on_press(Message::DocumentCancelled)
            .style(move |_, status| secondary_palette.subtle_button_style(6.0, status)),
    };

    let header = Row::new()
        .spacing(12)
        .align_y(Vertical::Center)
        .push(Text::new(title).size(24).color(text_color).width(Length::Fill))
        .push(save)
        .push(secondary);

    let editor: Element<Message> = if screen.loaded {
        text_editor::TextEditor::new(&screen.editor)
            .on_action(Message::EditorAction)
            .font(Font::MONOSPACE)
            .height(Length::Fill)
            .into()
    } else {
        Text::new(tr("Loading...")).size(14).color(muted).into()
    };

    let background = palette.widget_background_color();
    let border_color = palette.widget_border_color();
    let editor_pane = Container::new(editor)
        .padding(12)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(move |_| container::Style {
            background: Some(background.into()),
            border: border::rounded(6).width(1).color(border_color),
            ..Default::default()
        });

    Column::new().spacing(12).padding([12, 16]).push(header).push(editor_pane).into()
}
