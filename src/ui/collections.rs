use iced::alignment::Vertical;
use iced::widget::{Button, Column, Container, Row, Scrollable, Space, Text, container};
use iced::{Element, Length, border};

use crate::Message;
use crate::i18n::{tr, tr_format};
use crate::settings::ThemePalette;
use crate::ui::menues::collection_context_menu;

#[derive(Debug, Clone)]
pub struct CollectionEntry {
    pub name: String,
    pub count: Option<u64>,
}

/// The landing screen: every collection on the server with its approximate
/// document count.
#[derive(Debug, Clone)]
pub struct CollectionListScreen {
    pub entries: Vec<CollectionEntry>,
    pub loaded: bool,
}

impl CollectionListScreen {
    pub fn new() -> Self {
        Self { entries: Vec::new(), loaded: false }
    }

    pub fn set_names(&mut self, names: Vec<String>) {
        self.entries =
            names.into_iter().map(|name| CollectionEntry { name, count: None }).collect();
        self.loaded = true;
    }

    pub fn set_count(&mut self, name: &str, count: u64) {
        if let Some(entry) = self.entries.iter_mut().find(|entry| entry.name == name) {
            entry.count = Some(count);
        }
    }
}

pub fn collection_list_view<'a>(
    screen: &'a CollectionListScreen,
    palette: &ThemePalette,
) -> Element<'a, Message> {
    let text_color = palette.text_primary.to_color();
    let muted = palette.text_muted.to_color();

    let new_palette = palette.clone();
    let new_button = Button::new(Text::new(tr("New Collection")).size(14))
        .padding([6, 16])
        .on_press(Message::NewCollectionRequested)
        .style(move |_, status| new_palette.primary_button_style(6.0, status));

    let header = Row::new()
        .spacing(12)
        .align_y(Vertical::Center)
        .push(Text::new(tr("Collections")).size(24).color(text_color).width(Length::Fill))
        .push(new_button);

    let mut list = Column::new().spacing(4).width(Length::Fill);

    if !screen.loaded {
        list = list.push(Text::new(tr("Loading...")).size(14).color(muted));
    } else if screen.entries.is_empty() {
        list = list.push(Text::new(tr("No collections yet")).size(14).color(muted));
    } else {
        for entry in &screen.entries {
            list = list.push(collection_row(entry, palette));
        }
    }

    let background = palette.widget_background_color();
    let border_color = palette.widget_border_color();

    let body = Container::new(Scrollable::new(list).width(Length::Fill).height(Length::Fill))
        .padding(16)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(move |_| container::Style {
            background: Some(background.into()),
            border: border::rounded(6).width(1).color(border_color),
            ..Default::default()
        });

    Column::new().spacing(12).padding([12, 16]).push(header).push(body).into()
}

fn collection_row<'a>(
    entry: &'a CollectionEntry,
    palette: &ThemePalette,
) -> Element<'a, Message> {
    let muted = palette.text_muted.to_color();

    let count_label = match entry.count {
        Some(count) => tr_format("{} documents in total", &[&count.to_string()]),
        None => String::from("…"),
    };

    let open_palette = palette.clone();
    let open_button = Button::new(Text::new(entry.name.as_str()).size(16))
        .padding([6, 10])
        .width(Length::FillPortion(4))
        .on_press(Message::Navigate(format!("cols/{}", entry.name)))
        .style(move |_, status| open_palette.subtle_button_style(6.0, status));

    let indexes_palette = palette.clone();
    let indexes_button = Button::new(Text::new(tr("Indexes")).size(13))
        .padding([4, 10])
        .on_press(Message::Navigate(format!("indexes/{}", entry.name)))
        .style(move |_, status| indexes_palette.subtle_button_style(6.0, status));

    let row = Row::new()
        .spacing(12)
        .align_y(Vertical::Center)
        .push(collection_context_menu(open_button.into(), palette.clone(), entry.name.clone()))
        .push(Text::new(count_label).size(13).color(muted).width(Length::FillPortion(3)))
        .push(indexes_button)
        .push(Space::new().width(Length::FillPortion(1)));

    row.into()
}
