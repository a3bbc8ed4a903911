use iced::alignment::Vertical;
use iced::widget::{Button, Column, Container, Row, Scrollable, Text, container};
use iced::{Element, Font, Length, border};

use crate::Message;
use crate::i18n::{tr, tr_format};
use crate::settings::ThemePalette;

#[derive(Debug, Clone)]
pub struct IndexesScreen {
    pub col: String,
    pub indexes: Vec<Vec<String>>,
    pub loaded: bool,
}

impl IndexesScreen {
    pub fn new(col: String) -> Self {
        Self { col, indexes: Vec::new(), loaded: false }
    }

    pub fn set_indexes(&mut self, indexes: Vec<Vec<String>>) {
        self.indexes = indexes;
        self.loaded = true;
    }
}

/// An index path is displayed the way it is entered: segments joined with
/// commas.
pub fn joined_path(segments: &[String]) -> String {
    segments.join(",")
}

pub fn indexes_view<'a>(
    screen: &'a IndexesScreen,
    palette: &ThemePalette,
) -> Element<'a, Message> {
    let text_color = palette.text_primary.to_color();
    let muted = palette.text_muted.to_color();

    let new_palette = palette.clone();
    let new_button = Button::new(Text::new(tr("New Index")).size(14))
        .padding([6, 16])
        .on_press(Message::NewIndexRequested)
        .style(move |_, status| new_palette.primary_button_style(6.0, status));

    let back_palette = palette.clone();
    let back_button = Button::new(Text::new(tr("Open")).size(13))
        .padding([4, 10])
        .on_press(Message::Navigate(format!("cols/{}", screen.col)))
        .style(move |_, status| back_palette.subtle_button_style(6.0, status));

    let header = Row::new()
        .spacing(12)
        .align_y(Vertical::Center)
        .push(
            Text::new(tr_format("Indexes of {}", &[&screen.col]))
                .size(24)
                .color(text_color)
                .width(Length::Fill),
        )
        .push(back_button)
        .push(new_button);

    let mut list = Column::new().spacing(4).width(Length::Fill);

    if !screen.loaded {
        list = list.push(Text::new(tr("Loading...")).size(14).color(muted));
    } else if screen.indexes.is_empty() {
        list = list.push(Text::new(tr("No indexes yet")).size(14).color(muted));
    } else {
        for index in &screen.indexes {
            let path = joined_path(index);

            let delete_palette = palette.clone();
            let delete = Button::new(Text::new(tr("Delete")).size(13))
                .padding([4, 10])
                .on_press(Message::DeleteIndexRequested { path: path.clone() })
                .style(move |_, status| delete_palette.subtle_button_style(6.0, status));

            list = list.push(
                Row::new()
                    .spacing(12)
                    .align_y(Vertical::Center)
                    .push(
                        Text::new(path)
                            .size(14)
                            .font(Font::MONOSPACE)
                            .color(text_color)
                            .width(Length::Fill),
                    )
                    .push(delete),
            );
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

#[cfg(test)]
mod tests {
    use super::joined_path;

    #[test]
    fn paths_join_segments_with_commas() {
        assert_eq!(joined_path(&["a".to_owned(), "b".to_owned()]), "a,b");
        assert_eq!(joined_path(&["a".to_owned()]), "a");
        assert_eq!(joined_path(&[]), "");
    }
}
