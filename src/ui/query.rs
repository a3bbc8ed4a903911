use iced::alignment::Vertical;
use iced::widget::{Button, Column, Container, Row, Scrollable, Text, container, text_input};
use iced::{Element, Length, border};

use crate::Message;
use crate::api::DocumentSummary;
use crate::i18n::{tr, tr_format};
use crate::settings::ThemePalette;
use crate::shell::QueryPanelState;
use crate::ui::collection::{document_columns, documents_table};

/// The collapsible query bar shown while a query-capable screen is active.
pub fn query_panel_view<'a>(
    panel: &'a QueryPanelState,
    palette: &ThemePalette,
) -> Element<'a, Message> {
    let muted = palette.text_muted.to_color();

    let label = match &panel.col {
        Some(col) => tr_format("Run a query against {}", &[col]),
        None => tr("Query").to_owned(),
    };

    let input = text_input("{\"c\": [\"all\"]}", &panel.query)
        .on_input(Message::QueryInputChanged)
        .on_submit(Message::QuerySubmitted)
        .padding([6, 10])
        .width(Length::Fill);

    let run_palette = palette.clone();
    let run = Button::new(Text::new(tr("Run")).size(13))
        .padding([4, 12])
        .on_press(Message::QuerySubmitted)
        .style(move |_, status| run_palette.primary_button_style(6.0, status));

    let row = Row::new()
        .spacing(12)
        .align_y(Vertical::Center)
        .push(Text::new(label).size(13).color(muted))
        .push(input)
        .push(run);

    let background = palette.widget_background_color();
    let border_color = palette.widget_border_color();

    Container::new(row)
        .padding([8, 16])
        .width(Length::Fill)
        .style(move |_| container::Style {
            background: Some(background.into()),
            border: border::rounded(6).width(1).color(border_color),
            ..Default::default()
        })
        .into()
}

#[derive(Debug, Clone)]
pub struct QueryScreen {
    pub col: String,
    pub query: String,
    pub docs: Vec<DocumentSummary>,
    pub columns: Vec<String>,
    pub loaded: bool,
}

impl QueryScreen {
    pub fn new(col: String, query: String) -> Self {
        Self { col, query, docs: Vec::new(), columns: Vec::new(), loaded: false }
    }

    pub fn set_docs(&mut self, docs: Vec<DocumentSummary>) {
        self.columns = document_columns(&docs);
        self.docs = docs;
        self.loaded = true;
    }
}

pub fn query_view<'a>(screen: &'a QueryScreen, palette: &ThemePalette) -> Element<'a, Message> {
    let text_color = palette.text_primary.to_color();
    let muted = palette.text_muted.to_color();

    let header = Text::new(tr_format("Query results for {}", &[&screen.col]))
        .size(24)
        .color(text_color)
        .width(Length::Fill);

    let body: Element<Message> = if screen.loaded {
        documents_table(&screen.col, &screen.docs, &screen.columns, palette)
    } else {
        Text::new(tr("Loading...")).size(14).color(muted).into()
    };

    let background = palette.widget_background_color();
    let border_color = palette.widget_border_color();
    let table = Container::new(Scrollable::new(body).width(Length::Fill).height(Length::Fill))
        .padding(12)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(move |_| container::Style {
            background: Some(background.into()),
            border: border::rounded(6).width(1).color(border_color),
            ..Default::default()
        });

    Column::new().spacing(12).padding([12, 16]).push(header).push(table).into()
}
