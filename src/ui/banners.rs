use iced::alignment::Vertical;
use iced::widget::{Button, Column, Container, Row, Space, Text, container};
use iced::{Element, Length, border};

use crate::Message;
use crate::notify::Banner;
use crate::settings::ThemePalette;

/// The stacked notification area rendered above the active screen.
pub fn notifications_view<'a>(
    banners: &'a [Banner],
    palette: &ThemePalette,
) -> Element<'a, Message> {
    if banners.is_empty() {
        return Space::new().height(Length::Fixed(0.0)).into();
    }

    let mut column = Column::new().spacing(6).width(Length::Fill);

    for banner in banners {
        let accent = palette.severity_color(banner.severity);
        let background = palette.widget_background_color();
        let text_color = palette.text_primary.to_color();
        let id = banner.id;

        let close_palette = palette.clone();
        let close = Button::new(Text::new("×").size(14))
            .padding([0, 8])
            .on_press(Message::NotificationDismissed(id))
            .style(move |_, status| close_palette.subtle_button_style(6.0, status));

        let row = Row::new()
            .spacing(12)
            .align_y(Vertical::Center)
            .push(Text::new(banner.text.as_str()).size(14).color(text_color).width(Length::Fill))
            .push(close);

        column = column.push(
            Container::new(row).padding([8, 12]).width(Length::Fill).style(move |_| {
                container::Style {
                    background: Some(background.into()),
                    border: border::rounded(6).width(2).color(accent),
                    ..Default::default()
                }
            }),
        );
    }

    Container::new(column).padding([8, 12]).width(Length::Fill).into()
}
