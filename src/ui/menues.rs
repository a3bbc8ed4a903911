use iced::widget::{Button, Column, Container, button};
use iced::{Color, Element, Length, Renderer, Shadow, Theme, Vector, border};
use iced_aw::{
    ContextMenu,
    menu::{Item as MenuItemWidget, Menu, MenuBar},
};

use crate::Message;
use crate::i18n::tr;
use crate::settings::ThemePalette;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopMenu {
    Help,
}

impl TopMenu {
    pub fn label(self) -> &'static str {
        match self {
            TopMenu::Help => "Help",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEntry {
    Action(&'static str),
}

impl MenuEntry {
    pub fn label(self) -> &'static str {
        match self {
            MenuEntry::Action(label) => label,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionContextAction {
    Open,
    Indexes,
    Rename,
    Scrub,
    Drop,
}

pub fn build_menu_bar<'a>(palette: ThemePalette) -> MenuBar<'a, Message, Theme, Renderer> {
    let settings_palette = palette.clone();
    let settings_button = button(iced::widget::text(tr("Settings")).size(14))
        .padding([6, 12])
        .on_press(Message::SettingsOpen)
        .style(move |_, status| settings_palette.menu_button_style(6.0, status));

    let mut roots = Vec::new();
    roots.push(MenuItemWidget::new(settings_button));
    roots.push(menu_root(
        &palette,
        TopMenu::Help,
        &[MenuEntry::Action("Documentation"), MenuEntry::Action("About")],
    ));

    MenuBar::new(roots).width(Length::Fill)
}

fn menu_root<'a>(
    palette: &ThemePalette,
    menu: TopMenu,
    entries: &[MenuEntry],
) -> MenuItemWidget<'a, Message, Theme, Renderer> {
    let root_palette = palette.clone();
    let root_button = button(iced::widget::text(tr(menu.label())).size(14))
        .padding([6, 12])
        .style(move |_, status| root_palette.menu_button_style(6.0, status));

    let menu_palette = palette.clone();
    let menu_widget = Menu::new(
        entries
            .iter()
            .map(move |entry| {
                let entry_palette = menu_palette.clone();
                let entry_button = button(iced::widget::text(tr(entry.label())).size(14))
                    .on_press(Message::MenuItemSelected(menu, *entry))
                    .padding([6, 12])
                    .width(Length::Fill)
                    .style(move |_, status| entry_palette.menu_button_style(6.0, status));
                MenuItemWidget::new(entry_button)
            })
            .collect(),
    )
    .offset(4.0)
    .max_width(180.0);

    MenuItemWidget::with_menu(root_button, menu_widget)
}

pub fn collection_context_menu<'a>(
    base_button: Element<'a, Message>,
    palette: ThemePalette,
    name: String,
) -> Element<'a, Message> {
    ContextMenu::new(base_button, move || {
        let mut menu = Column::new().spacing(4).padding([4, 6]);

        let make_button = |label: &'static str, action: CollectionContextAction| {
            let item_palette = palette.clone();
            let button = Button::new(iced::widget::text(tr(label)).size(14))
                .padding([4, 8])
                .on_press(Message::CollectionContextMenu { name: name.clone(), action })
                .style(move |_, status| item_palette.menu_button_style(6.0, status));
            apply_item_container(button.into(), palette.clone())
        };

        menu = menu.push(make_button("Open", CollectionContextAction::Open));
        menu = menu.push(make_button("Indexes", CollectionContextAction::Indexes));
        menu = menu.push(make_button("Rename", CollectionContextAction::Rename));
        menu = menu.push(make_button("Scrub", CollectionContextAction::Scrub));
        menu = menu.push(make_button("Delete", CollectionContextAction::Drop));

        menu.into()
    })
    .into()
}

fn apply_item_container(
    content: Element<'_, Message>,
    palette: ThemePalette,
) -> Element<'_, Message> {
    let background = palette.menu.background.to_color();
    let luminance = 0.2126 * background.r + 0.7152 * background.g + 0.0722 * background.b;
    let shadow_color = if luminance > 0.5 {
        Color::from_rgba(0.0, 0.0, 0.0, 0.75)
    } else {
        Color::from_rgba(1.0, 1.0, 1.0, 0.3)
    };

    Container::new(content)
        .style(move |_| iced::widget::container::Style {
            background: Some(background.into()),
            border: border::rounded(6.0).width(1).color(palette.widget_border_color()),
            shadow: Shadow {
                color: shadow_color,
                offset: Vector::new(0.0, 3.0),
                blur_radius: 10.0,
            },
            ..Default::default()
        })
        .into()
}
