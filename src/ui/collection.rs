use iced::alignment::Vertical;
use iced::widget::{Button, Column, Container, Row, Scrollable, Space, Text, container};
use iced::{Element, Font, Length, border};

use crate::Message;
use crate::api::DocumentSummary;
use crate::i18n::{tr, tr_format};
use crate::settings::ThemePalette;

/// Result of loading one page of a collection: the approximate count plus the
/// page contents.
#[derive(Debug, Clone)]
pub struct CollectionPage {
    pub count: u64,
    pub total_pages: u64,
    pub docs: Vec<DocumentSummary>,
}

#[derive(Debug, Clone)]
pub struct CollectionScreen {
    pub name: String,
    pub page: u64,
    pub count: u64,
    pub total_pages: u64,
    pub docs: Vec<DocumentSummary>,
    pub columns: Vec<String>,
    pub loaded: bool,
}

impl CollectionScreen {
    pub fn new(name: String, page: u64) -> Self {
        Self {
            name,
            page,
            count: 0,
            total_pages: 1,
            docs: Vec::new(),
            columns: Vec::new(),
            loaded: false,
        }
    }

    pub fn apply(&mut self, page: CollectionPage) {
        self.count = page.count;
        self.total_pages = page.total_pages;
        self.columns = document_columns(&page.docs);
        self.docs = page.docs;
        self.loaded = true;
    }
}

/// Table columns are the first five keys of the first document on the page.
pub fn document_columns(docs: &[DocumentSummary]) -> Vec<String> {
    docs.first()
        .and_then(|doc| doc.body.as_object())
        .map(|object| object.keys().take(5).cloned().collect())
        .unwrap_or_default()
}

pub fn collection_view<'a>(
    screen: &'a CollectionScreen,
    palette: &ThemePalette,
) -> Element<'a, Message> {
    let text_color = palette.text_primary.to_color();
    let muted = palette.text_muted.to_color();

    let subtle = |label: &'static str, message: Message, palette: &ThemePalette| {
        let style_palette = palette.clone();
        Button::new(Text::new(tr(label)).size(13))
            .padding([4, 10])
            .on_press(message)
            .style(move |_, status| style_palette.subtle_button_style(6.0, status))
    };

    let new_doc_palette = palette.clone();
    let new_doc = Button::new(Text::new(tr("New Document")).size(13))
        .padding([4, 10])
        .on_press(Message::Navigate(format!("docs/new/{}", screen.name)))
        .style(move |_, status| new_doc_palette.primary_button_style(6.0, status));

    let actions = Row::new()
        .spacing(8)
        .align_y(Vertical::Center)
        .push(new_doc)
        .push(subtle("Indexes", Message::Navigate(format!("indexes/{}", screen.name)), palette))
        .push(subtle("Search", Message::QueryPanelOpenRequested, palette))
        .push(subtle("Rename", Message::RenameRequested { name: screen.name.clone() }, palette))
        .push(subtle("Scrub", Message::ScrubRequested { name: screen.name.clone() }, palette))
        .push(subtle("Delete", Message::DropRequested { name: screen.name.clone() }, palette));

    let header = Row::new()
        .spacing(12)
        .align_y(Vertical::Center)
        .push(
            Text::new(tr_format("Documents of {}", &[&screen.name]))
                .size(24)
                .color(text_color)
                .width(Length::Fill),
        )
        .push(actions);

    let status_line = if screen.loaded {
        tr_format("{} documents in total", &[&screen.count.to_string()])
    } else {
        tr("Loading...").to_owned()
    };

    let body: Element<Message> = if screen.loaded {
        documents_table(&screen.name, &screen.docs, &screen.columns, palette)
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

    Column::new()
        .spacing(12)
        .padding([12, 16])
        .push(header)
        .push(
            Row::new()
                .spacing(12)
                .align_y(Vertical::Center)
                .push(Text::new(status_line).size(13).color(muted).width(Length::Fill))
                .push(pagination_row(screen, palette)),
        )
        .push(table)
        .into()
}

fn pagination_row<'a>(
    screen: &CollectionScreen,
    palette: &ThemePalette,
) -> Element<'a, Message> {
    let muted = palette.text_muted.to_color();

    let prev_palette = palette.clone();
    let mut prev = Button::new(Text::new(tr("Previous")).size(13))
        .padding([4, 10])
        .style(move |_, status| prev_palette.subtle_button_style(6.0, status));
    if screen.page > 1 {
        prev = prev.on_press(Message::Navigate(format!("cols/{}/{}", screen.name, screen.page - 1)));
    }

    let next_palette = palette.clone();
    let mut next = Button::new(Text::new(tr("Next")).size(13))
        .padding([4, 10])
        .style(move |_, status| next_palette.subtle_button_style(6.0, status));
    if screen.loaded && screen.page < screen.total_pages {
        next = next.on_press(Message::Navigate(format!("cols/{}/{}", screen.name, screen.page + 1)));
    }

    let label = tr_format(
        "Page {} of {}",
        &[&screen.page.to_string(), &screen.total_pages.to_string()],
    );

    Row::new()
        .spacing(8)
        .align_y(Vertical::Center)
        .push(prev)
        .push(Text::new(label).size(13).color(muted))
        .push(next)
        .into()
}

/// Shared by the collection page and the query results: id column plus the
/// first few document attributes, one row per document, each row linking to
/// the document editor.
pub fn documents_table<'a>(
    col: &str,
    docs: &'a [DocumentSummary],
    columns: &'a [String],
    palette: &ThemePalette,
) -> Element<'a, Message> {
    let muted = palette.text_muted.to_color();

    if docs.is_empty() {
        return Text::new(tr("No documents matched.")).size(14).color(muted).into();
    }

    let header_bg = palette.table.header_background.to_color();
    let row_even = palette.table.row_even.to_color();
    let row_odd = palette.table.row_odd.to_color();
    let text_color = palette.text_primary.to_color();

    let mut header_row = Row::new()
        .spacing(0)
        .align_y(Vertical::Center)
        .width(Length::Fill)
        .push(
            Container::new(Text::new("id").size(13).font(Font::MONOSPACE))
                .width(Length::FillPortion(2))
                .padding([6, 8]),
        );
    for column in columns {
        header_row = header_row.push(
            Container::new(Text::new(column.as_str()).size(13))
                .width(Length::FillPortion(3))
                .padding([6, 8]),
        );
    }

    let header = Container::new(header_row).width(Length::Fill).style(move |_| {
        container::Style { background: Some(header_bg.into()), ..Default::default() }
    });

    let mut body = Column::new().spacing(1).width(Length::Fill);

    for (index, doc) in docs.iter().enumerate() {
        let background = if index % 2 == 0 { row_even } else { row_odd };

        let id_palette = palette.clone();
        let id_button = Button::new(Text::new(doc.id.as_str()).size(13).font(Font::MONOSPACE))
            .padding([4, 8])
            .on_press(Message::Navigate(format!("docs/{}/{}", col, doc.id)))
            .style(move |_, status| id_palette.subtle_button_style(4.0, status));

        let mut row = Row::new()
            .spacing(0)
            .align_y(Vertical::Center)
            .width(Length::Fill)
            .push(Container::new(id_button).width(Length::FillPortion(2)).padding([2, 8]));

        for column in columns {
            let cell = doc
                .body
                .get(column)
                .map(cell_text)
                .unwrap_or_default();
            row = row.push(
                Container::new(Text::new(cell).size(13).color(text_color))
                    .width(Length::FillPortion(3))
                    .padding([6, 8]),
            );
        }

        body = body.push(
            Container::new(row).width(Length::Fill).style(move |_| container::Style {
                background: Some(background.into()),
                ..Default::default()
            }),
        );
    }

    Column::new()
        .spacing(2)
        .push(header)
        .push(body)
        .push(Space::new().height(Length::Fixed(4.0)))
        .into()
}

const CELL_TEXT_LIMIT: usize = 80;

fn cell_text(value: &serde_json::Value) -> String {
    let rendered = match value {
        serde_json::Value::String(text) => text.clone(),
        other => other.to_string(),
    };

    if rendered.chars().count() > CELL_TEXT_LIMIT {
        let truncated: String = rendered.chars().take(CELL_TEXT_LIMIT).collect();
        format!("{truncated}…")
    } else {
        rendered
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{cell_text, document_columns};
    use crate::api::DocumentSummary;

    #[test]
    fn columns_come_from_the_first_document_capped_at_five() {
        let docs = vec![
            DocumentSummary {
                id: "1".to_owned(),
                body: json!({"a": 1, "b": 2, "c": 3, "d": 4, "e": 5, "f": 6}),
            },
            DocumentSummary { id: "2".to_owned(), body: json!({"z": 1}) },
        ];

        let columns = document_columns(&docs);
        assert_eq!(columns.len(), 5);
        assert!(!columns.contains(&"f".to_owned()));
    }

    #[test]
    fn no_documents_means_no_columns() {
        assert!(document_columns(&[]).is_empty());
    }

    #[test]
    fn long_cell_values_are_truncated() {
        let long = "x".repeat(200);
        let rendered = cell_text(&json!(long));
        assert!(rendered.chars().count() <= super::CELL_TEXT_LIMIT + 1);
        assert!(rendered.ends_with('…'));
    }
}
