use iced::font::Weight;
use iced::widget::{Button, Column, Row, Space, Text};
use iced::{Element, Font, Length};

use crate::Message;
use crate::i18n::tr;
use crate::settings::ThemePalette;
use crate::ui::modal::modal_layout;

pub const ABOUT_HOMEPAGE: &str = "https://github.com/EvgeniyMakhmudov/oxide_docdb";
pub const ABOUT_AUTHOR: &str = "Evgeniy Makhmudov";
pub const ABOUT_SINCE: &str = "2025";

pub fn about_modal_view(palette: ThemePalette) -> Element<'static, Message> {
    let text_primary = palette.text_primary.to_color();
    let muted = palette.text_muted.to_color();
    let bold_font = Font { weight: Weight::Bold, ..Font::default() };

    let title = Text::new(tr("About")).size(22).color(text_primary);
    let title_name = Text::new("oxide_docdb").size(22).color(text_primary).font(bold_font);
    let header = Row::new()
        .align_y(iced::alignment::Vertical::Center)
        .push(title)
        .push(Space::new().width(Length::Fixed(6.0)))
        .push(title_name);

    let summary = Text::new(tr(
        "Administration client for a REST document database: browse collections, edit documents, manage indexes, run queries.",
    ))
    .size(14)
    .color(text_primary)
    .width(Length::Fill);

    let label = |text: &'static str| Text::new(tr(text)).size(14).color(muted);

    let homepage_row = Row::new()
        .spacing(8)
        .push(label("Homepage"))
        .push(link_button(&palette, ABOUT_HOMEPAGE));
    let since_row = Row::new()
        .spacing(8)
        .push(label("Project started"))
        .push(Text::new(ABOUT_SINCE).size(14).color(text_primary));
    let author_row = Row::new()
        .spacing(8)
        .push(label("Author"))
        .push(Text::new(ABOUT_AUTHOR).size(14).color(text_primary));

    let close_palette = palette.clone();
    let close_button = Button::new(Text::new(tr("Close")).size(14))
        .padding([6, 16])
        .on_press(Message::ModalCancelled)
        .style(move |_, status| close_palette.subtle_button_style(6.0, status));

    let content: Element<Message> = Column::new()
        .spacing(12)
        .push(header)
        .push(summary)
        .push(homepage_row)
        .push(since_row)
        .push(author_row)
        .push(
            Row::new().push(Space::new().width(Length::Fill)).push(close_button),
        )
        .into();

    modal_layout(palette, content, Length::Fixed(520.0), 24, 12.0)
}

fn link_button(palette: &ThemePalette, url: &'static str) -> Element<'static, Message> {
    let link_palette = palette.clone();
    Button::new(Text::new(url).size(14))
        .padding(0)
        .on_press(Message::OpenUrl(url.to_owned()))
        .style(move |_, status| {
            let mut style = link_palette.menu_button_style(0.0, status);
            style.background = None;
            style.border = iced::border::rounded(0);
            style.text_color = link_palette.primary_buttons.active.to_color();
            style
        })
        .into()
}
