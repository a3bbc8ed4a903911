use iced::alignment::Vertical;
use iced::widget::checkbox::Checkbox;
use iced::widget::pick_list::PickList;
use iced::widget::{self, Button, Column, Container, Row, Space, Text, button, text_input};
use iced::{Color, Element, Length, Shadow, Theme, border};

use crate::Message;
use crate::i18n::{ALL_LANGUAGES, Language, tr};
use crate::settings::{
    ALL_LOG_LEVELS, ALL_THEMES, AppSettings, LogLevel, ThemeChoice,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsTab {
    Server,
    Appearance,
    Logging,
}

impl SettingsTab {
    pub fn label(self) -> &'static str {
        match self {
            SettingsTab::Server => "Server",
            SettingsTab::Appearance => "Appearance",
            SettingsTab::Logging => "Logging",
        }
    }
}

const ALL_TABS: &[SettingsTab] =
    &[SettingsTab::Server, SettingsTab::Appearance, SettingsTab::Logging];

#[derive(Debug, Clone)]
pub struct SettingsWindowState {
    pub active_tab: SettingsTab,
    pub server_url: String,
    pub auth_token: String,
    pub language: Language,
    pub theme_choice: ThemeChoice,
    pub logging_enabled: bool,
    pub logging_level: LogLevel,
    pub logging_path: String,
    pub validation_error: Option<String>,
}

impl SettingsWindowState {
    pub fn from_app_settings(settings: &AppSettings) -> Self {
        Self {
            active_tab: SettingsTab::Server,
            server_url: settings.server_url.clone(),
            auth_token: settings.auth_token.clone(),
            language: settings.language,
            theme_choice: settings.theme_choice,
            logging_enabled: settings.logging_enabled,
            logging_level: settings.logging_level,
            logging_path: settings.logging_path.clone(),
            validation_error: None,
        }
    }

    /// Validate the window into settings, keeping fields the window does not
    /// edit (the theme color tables) from the current settings.
    pub fn to_app_settings(&self, current: &AppSettings) -> Result<AppSettings, String> {
        if self.server_url.trim().is_empty() {
            return Err(tr("Server URL must not be empty.").to_owned());
        }

        let mut settings = AppSettings {
            language: self.language,
            server_url: self.server_url.clone(),
            auth_token: self.auth_token.clone(),
            logging_enabled: self.logging_enabled,
            logging_level: self.logging_level,
            logging_path: self.logging_path.clone(),
            theme_choice: self.theme_choice,
            theme_colors: current.theme_colors.clone(),
        };
        settings.normalize();
        Ok(settings)
    }
}

pub fn settings_view(state: &SettingsWindowState) -> Element<'_, Message> {
    let tab_row = tab_buttons(state.active_tab);

    let tab_content: Element<_> = match state.active_tab {
        SettingsTab::Server => server_tab(state),
        SettingsTab::Appearance => appearance_tab(state),
        SettingsTab::Logging => logging_tab(state),
    };

    let content = Column::new()
        .spacing(20)
        .push(Text::new(tr("Settings")).size(24))
        .push(tab_row)
        .push(tab_content);

    let mut content = if let Some(error) = &state.validation_error {
        content.push(Text::new(error.clone()).size(13).color(Color::from_rgb8(0xd9, 0x53, 0x4f)))
    } else {
        content
    };

    content = content.push(bottom_actions());

    let card = Container::new(content).padding(24).width(Length::Fixed(640.0)).style(pane_style);

    Container::new(card)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .style(|_| widget::container::Style {
            background: Some(Color::from_rgba8(0x16, 0x1a, 0x1f, 0.55).into()),
            ..Default::default()
        })
        .into()
}

fn server_tab(state: &SettingsWindowState) -> Element<'_, Message> {
    let url_row = Row::new()
        .spacing(12)
        .align_y(Vertical::Center)
        .push(Text::new(tr("Server URL")).size(14).width(Length::FillPortion(3)))
        .push(
            text_input("http://localhost:8080", &state.server_url)
                .on_input(Message::SettingsServerUrlChanged)
                .padding([6, 10])
                .width(Length::FillPortion(6)),
        );

    let token_row = Row::new()
        .spacing(12)
        .align_y(Vertical::Center)
        .push(Text::new(tr("Authorization token")).size(14).width(Length::FillPortion(3)))
        .push(
            text_input("", &state.auth_token)
                .on_input(Message::SettingsTokenChanged)
                .padding([6, 10])
                .width(Length::FillPortion(6)),
        );

    let hint = Text::new(tr("Leave empty when the server runs without authentication.")).size(13);

    Column::new().spacing(16).push(url_row).push(token_row).push(hint).into()
}

fn appearance_tab(state: &SettingsWindowState) -> Element<'_, Message> {
    let language_row = Row::new()
        .spacing(12)
        .align_y(Vertical::Center)
        .push(Text::new(tr("Language")).size(14).width(Length::FillPortion(3)))
        .push(
            PickList::new(ALL_LANGUAGES, Some(state.language), Message::SettingsLanguageChanged)
                .width(Length::FillPortion(4)),
        )
        .push(Space::new().width(Length::FillPortion(3)));

    let theme_row = Row::new()
        .spacing(12)
        .align_y(Vertical::Center)
        .push(Text::new(tr("Theme")).size(14).width(Length::FillPortion(3)))
        .push(
            PickList::new(ALL_THEMES, Some(state.theme_choice), Message::SettingsThemeChanged)
                .width(Length::FillPortion(4)),
        )
        .push(Space::new().width(Length::FillPortion(3)));

    Column::new().spacing(16).push(language_row).push(theme_row).into()
}

fn logging_tab(state: &SettingsWindowState) -> Element<'_, Message> {
    let enabled_checkbox = Checkbox::new(state.logging_enabled)
        .label(tr("Enable logging"))
        .on_toggle(Message::SettingsLoggingToggled);

    let level_row = Row::new()
        .spacing(12)
        .align_y(Vertical::Center)
        .push(Text::new(tr("Log level")).size(14).width(Length::FillPortion(3)))
        .push(
            PickList::new(
                ALL_LOG_LEVELS,
                Some(state.logging_level),
                Message::SettingsLogLevelChanged,
            )
            .width(Length::FillPortion(4)),
        )
        .push(Space::new().width(Length::FillPortion(3)));

    let path_row = Row::new()
        .spacing(12)
        .align_y(Vertical::Center)
        .push(Text::new(tr("Log file")).size(14).width(Length::FillPortion(3)))
        .push(
            text_input("", &state.logging_path)
                .on_input(Message::SettingsLogPathChanged)
                .padding([6, 10])
                .width(Length::FillPortion(6)),
        );

    Column::new().spacing(16).push(enabled_checkbox).push(level_row).push(path_row).into()
}

fn bottom_actions() -> Element<'static, Message> {
    let apply = Button::new(Text::new(tr("Apply")).size(14))
        .padding([6, 16])
        .on_press(Message::SettingsApply);
    let cancel = Button::new(Text::new(tr("Cancel")).size(14))
        .padding([6, 16])
        .on_press(Message::SettingsCancel);
    let save = Button::new(Text::new(tr("Save")).size(14))
        .padding([6, 16])
        .on_press(Message::SettingsSave);

    Row::new()
        .spacing(12)
        .align_y(Vertical::Center)
        .push(Space::new().width(Length::Fill))
        .push(apply)
        .push(cancel)
        .push(save)
        .into()
}

fn tab_buttons(active: SettingsTab) -> Row<'static, Message> {
    let mut row = Row::new().spacing(8);
    for tab in ALL_TABS {
        let tab = *tab;
        let mut button = Button::new(Text::new(tr(tab.label())).size(14))
            .padding([6, 16])
            .style(move |_, _| tab_button_style(active == tab));
        if active != tab {
            button = button.on_press(Message::SettingsTabChanged(tab));
        }
        row = row.push(button);
    }
    row
}

fn tab_button_style(active: bool) -> button::Style {
    let bg_active = Color::from_rgb8(0xd6, 0xe8, 0xff);
    let bg_inactive = Color::from_rgb8(0xf6, 0xf7, 0xfa);
    let border_color = Color::from_rgb8(0xc2, 0xc8, 0xd3);

    button::Style {
        background: Some((if active { bg_active } else { bg_inactive }).into()),
        text_color: Color::BLACK,
        border: border::rounded(6).width(1).color(border_color),
        shadow: Shadow::default(),
        ..Default::default()
    }
}

fn pane_style(theme: &Theme) -> widget::container::Style {
    let palette = theme.extended_palette();

    widget::container::Style {
        background: Some(palette.background.weak.color.into()),
        border: border::rounded(6).width(1).color(palette.primary.weak.color),
        ..Default::default()
    }
}
