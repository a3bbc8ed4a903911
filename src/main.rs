use std::time::Duration;

use iced::alignment::Vertical;
use iced::widget::text_editor;
use iced::widget::{Column, Container, Row, Space, Stack, Text, container, text_input};
use iced::{Element, Length, Subscription, Task, Theme, application};
use log::{error, info, warn};
use serde_json::Value;

mod api;
mod bus;
mod i18n;
mod logging;
mod modal;
mod notify;
mod router;
mod settings;
mod shell;
#[cfg(test)]
mod tests;
mod ui;

use crate::api::ApiClient;
use crate::bus::{EventBus, Owner, Payload, Topic};
use crate::i18n::{Language, tr, tr_format};
use crate::modal::{MODAL_SETTLE_DELAY, ModalContent, ModalRequest};
use crate::notify::{ERROR_NOTIFY_DURATION, Severity};
use crate::router::{NavigationMode, Router, parse_doc_ref, query_path};
use crate::settings::{AppSettings, LogLevel, ThemeChoice, ThemePalette};
use crate::shell::{Shell, ShellCommand};
use crate::ui::collection::{CollectionPage, CollectionScreen};
use crate::ui::collections::CollectionListScreen;
use crate::ui::document::DocumentScreen;
use crate::ui::indexes::IndexesScreen;
use crate::ui::menues::{CollectionContextAction, MenuEntry, TopMenu};
use crate::ui::query::QueryScreen;
use crate::ui::settings::{SettingsTab, SettingsWindowState};

const APP_TITLE: &str = "Oxide DocDB";
const DOCS_URL: &str = "https://github.com/EvgeniyMakhmudov/oxide_docdb/wiki";

fn main() -> iced::Result {
    application(App::init, App::update, App::view)
        .title(APP_TITLE)
        .subscription(App::subscription)
        .theme(App::theme)
        .run()
}

pub(crate) struct App {
    settings: AppSettings,
    api: ApiClient,
    bus: EventBus,
    shell: Shell,
    router: Router,
    screen: Screen,
    mode: AppMode,
    settings_window: Option<SettingsWindowState>,
    version: Option<String>,
    load_doc_input: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AppMode {
    Main,
    Settings,
}

/// Exactly one screen is mounted at a time; mounting replaces the previous
/// screen wholesale.
pub(crate) enum Screen {
    Blank,
    Collections(CollectionListScreen),
    Collection(CollectionScreen),
    Document(DocumentScreen),
    Indexes(IndexesScreen),
    Query(QueryScreen),
}

/// Loading a collection page is two dependent requests; keep their failures
/// apart so each surfaces with its own message.
#[derive(Debug, Clone)]
pub(crate) enum PageLoadError {
    Count(String),
    Page(String),
}

#[derive(Debug, Clone)]
pub(crate) enum Message {
    Navigate(String),
    VersionLoaded(Result<String, String>),

    LoadDocInputChanged(String),
    LoadDocSubmit,

    CollectionsLoaded { generation: u64, result: Result<Vec<String>, String> },
    CollectionCountLoaded { generation: u64, name: String, result: Result<u64, String> },
    PageLoaded { generation: u64, result: Result<CollectionPage, PageLoadError> },
    DocumentLoaded { generation: u64, result: Result<Value, String> },
    IndexesLoaded { generation: u64, result: Result<Vec<Vec<String>>, String> },
    QueryLoaded { generation: u64, result: Result<Vec<api::DocumentSummary>, String> },

    NewCollectionRequested,
    RenameRequested { name: String },
    ScrubRequested { name: String },
    DropRequested { name: String },
    CollectionContextMenu { name: String, action: CollectionContextAction },

    EditorAction(text_editor::Action),
    DocumentSaveRequested,
    DocumentDeleteRequested,
    DocumentCancelled,

    NewIndexRequested,
    DeleteIndexRequested { path: String },

    QueryPanelOpenRequested,
    QueryInputChanged(String),
    QuerySubmitted,

    ModalInputChanged(String),
    ModalConfirmed,
    ModalCancelled,
    ModalSettled(u64),

    NotificationExpired(u64),
    NotificationDismissed(u64),

    CreateCollectionCompleted { name: String, result: Result<(), String> },
    RenameCollectionCompleted { new_name: String, result: Result<(), String> },
    DropCollectionCompleted { result: Result<(), String> },
    ScrubCollectionCompleted { name: String, result: Result<(), String> },
    InsertDocumentCompleted { col: String, result: Result<String, String> },
    UpdateDocumentCompleted { result: Result<(), String> },
    DeleteDocumentCompleted { col: String, result: Result<(), String> },
    CreateIndexCompleted { result: Result<(), String> },
    RemoveIndexCompleted { result: Result<(), String> },

    MenuItemSelected(TopMenu, MenuEntry),
    OpenUrl(String),

    SettingsOpen,
    SettingsTabChanged(SettingsTab),
    SettingsServerUrlChanged(String),
    SettingsTokenChanged(String),
    SettingsLanguageChanged(Language),
    SettingsThemeChanged(ThemeChoice),
    SettingsLoggingToggled(bool),
    SettingsLogLevelChanged(LogLevel),
    SettingsLogPathChanged(String),
    SettingsApply,
    SettingsSave,
    SettingsCancel,
}

impl App {
    fn init() -> (Self, Task<Message>) {
        let settings = match settings::load_from_disk() {
            Ok(settings) => settings,
            Err(error) => {
                eprintln!("failed to load {}: {}", settings::SETTINGS_FILE_NAME, error);
                AppSettings::default()
            }
        };

        i18n::init_language(settings.language);
        logging::apply_settings(
            settings.logging_enabled,
            settings.logging_level.to_level_filter(),
            &settings.logging_path,
        );

        let api = ApiClient::new(&settings.server_url, settings.credential());

        let mut app = Self {
            settings,
            api,
            bus: EventBus::new(),
            shell: Shell::new(),
            router: Router::new(),
            screen: Screen::Blank,
            mode: AppMode::Main,
            settings_window: None,
            version: None,
            load_doc_input: String::new(),
        };
        app.register_app_subscriptions();

        info!("starting against {}", app.api.base_url());
        let initial = app.go("", NavigationMode::Trigger);
        let version = app.load_version_task();
        (app, Task::batch([initial, version]))
    }

    fn register_app_subscriptions(&mut self) {
        self.bus.subscribe(
            Topic::ModalOpen,
            Owner::App,
            Box::new(|shell, payload| {
                if let Some(request) = payload.take_modal_open() {
                    let on_show = shell.modal.open(request);
                    if let Some(callback) = on_show {
                        callback(shell);
                    }
                }
            }),
        );
        self.bus.subscribe(
            Topic::ModalClose,
            Owner::App,
            Box::new(|shell, payload| {
                if let Some(close) = payload.take_modal_close() {
                    if let Some(cycle) = shell.modal.close(close.on_hidden) {
                        shell.pending.push(ShellCommand::ModalSettle { cycle });
                    }
                }
            }),
        );
        self.bus.subscribe(
            Topic::QueryBoxOpen,
            Owner::App,
            Box::new(|shell, _| shell.query_panel.visible = true),
        );
        self.bus.subscribe(
            Topic::QueryBoxClose,
            Owner::App,
            Box::new(|shell, _| shell.query_panel.visible = false),
        );
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Navigate(path) => self.go(&path, NavigationMode::Trigger),
            Message::VersionLoaded(result) => {
                match result {
                    Ok(version) => self.version = Some(version),
                    Err(error) => warn!("version probe failed: {error}"),
                }
                Task::none()
            }

            Message::LoadDocInputChanged(value) => {
                self.load_doc_input = value;
                Task::none()
            }
            Message::LoadDocSubmit => {
                let target = parse_doc_ref(&self.load_doc_input)
                    .map(|(col, id)| format!("docs/{col}/{id}"));
                match target {
                    Some(path) => self.go(&path, NavigationMode::Trigger),
                    None => self.notify(
                        Severity::Danger,
                        tr("Missing or invalid document ID.").to_owned(),
                        None,
                    ),
                }
            }

            Message::CollectionsLoaded { generation, result } => {
                if !self.router.is_current(generation) {
                    return Task::none();
                }
                match result {
                    Ok(mut names) => {
                        names.sort_unstable();
                        let count_tasks: Vec<Task<Message>> = names
                            .iter()
                            .map(|name| self.fetch_count(generation, name.clone()))
                            .collect();
                        if let Screen::Collections(screen) = &mut self.screen {
                            screen.set_names(names);
                        }
                        Task::batch(count_tasks)
                    }
                    Err(error) => self.notify(
                        Severity::Danger,
                        tr_format("Error loading collections: {}", &[&error]),
                        Some(ERROR_NOTIFY_DURATION),
                    ),
                }
            }
            Message::CollectionCountLoaded { generation, name, result } => {
                if !self.router.is_current(generation) {
                    return Task::none();
                }
                match result {
                    Ok(count) => {
                        if let Screen::Collections(screen) = &mut self.screen {
                            screen.set_count(&name, count);
                        }
                    }
                    Err(error) => warn!("document count for {name} failed: {error}"),
                }
                Task::none()
            }
            Message::PageLoaded { generation, result } => {
                if !self.router.is_current(generation) {
                    return Task::none();
                }
                match result {
                    Ok(page) => {
                        if let Screen::Collection(screen) = &mut self.screen {
                            screen.apply(page);
                        }
                        Task::none()
                    }
                    Err(PageLoadError::Count(error)) => self.notify(
                        Severity::Danger,
                        tr_format("Error getting document count: {}", &[&error]),
                        Some(ERROR_NOTIFY_DURATION),
                    ),
                    Err(PageLoadError::Page(error)) => self.notify(
                        Severity::Danger,
                        tr_format("Error loading documents: {}", &[&error]),
                        Some(ERROR_NOTIFY_DURATION),
                    ),
                }
            }
            Message::DocumentLoaded { generation, result } => {
                if !self.router.is_current(generation) {
                    return Task::none();
                }
                match result {
                    Ok(body) => {
                        if let Screen::Document(screen) = &mut self.screen {
                            screen.set_body(&body);
                        }
                        Task::none()
                    }
                    Err(error) => self.notify(
                        Severity::Danger,
                        tr_format("Error loading document: {}", &[&error]),
                        Some(ERROR_NOTIFY_DURATION),
                    ),
                }
            }
            Message::IndexesLoaded { generation, result } => {
                if !self.router.is_current(generation) {
                    return Task::none();
                }
                match result {
                    Ok(indexes) => {
                        if let Screen::Indexes(screen) = &mut self.screen {
                            screen.set_indexes(indexes);
                        }
                        Task::none()
                    }
                    Err(error) => self.notify(
                        Severity::Danger,
                        tr_format("Error loading indexes: {}", &[&error]),
                        Some(ERROR_NOTIFY_DURATION),
                    ),
                }
            }
            Message::QueryLoaded { generation, result } => {
                if !self.router.is_current(generation) {
                    return Task::none();
                }
                match result {
                    Ok(docs) => {
                        if let Screen::Query(screen) = &mut self.screen {
                            screen.set_docs(docs);
                        }
                        Task::none()
                    }
                    Err(error) => self.notify(
                        Severity::Danger,
                        tr_format("Error running query: {}", &[&error]),
                        Some(ERROR_NOTIFY_DURATION),
                    ),
                }
            }

            Message::NewCollectionRequested => {
                self.open_modal(ModalRequest::new(ModalContent::NewCollection {
                    name: String::new(),
                }));
                Task::none()
            }
            Message::RenameRequested { name } => {
                self.open_rename_modal(name);
                Task::none()
            }
            Message::ScrubRequested { name } => {
                self.open_modal(ModalRequest::new(ModalContent::ScrubCollection { name }));
                Task::none()
            }
            Message::DropRequested { name } => {
                self.open_modal(ModalRequest::new(ModalContent::DropCollection { name }));
                Task::none()
            }
            Message::CollectionContextMenu { name, action } => match action {
                CollectionContextAction::Open => {
                    let path = format!("cols/{name}");
                    self.go(&path, NavigationMode::Trigger)
                }
                CollectionContextAction::Indexes => {
                    let path = format!("indexes/{name}");
                    self.go(&path, NavigationMode::Trigger)
                }
                CollectionContextAction::Rename => {
                    self.open_rename_modal(name);
                    Task::none()
                }
                CollectionContextAction::Scrub => {
                    self.open_modal(ModalRequest::new(ModalContent::ScrubCollection { name }));
                    Task::none()
                }
                CollectionContextAction::Drop => {
                    self.open_modal(ModalRequest::new(ModalContent::DropCollection { name }));
                    Task::none()
                }
            },

            Message::EditorAction(action) => {
                if let Screen::Document(screen) = &mut self.screen {
                    screen.editor.perform(action);
                }
                Task::none()
            }
            Message::DocumentSaveRequested => {
                let Screen::Document(screen) = &self.screen else {
                    return Task::none();
                };
                let text = screen.editor.text();
                let col = screen.col.clone();
                let id = screen.id.clone();
                match serde_json::from_str::<Value>(&text) {
                    Err(_) => self.notify(
                        Severity::Danger,
                        tr("Invalid JSON. Unable to save document.").to_owned(),
                        None,
                    ),
                    Ok(doc) => match id {
                        Some(id) => self.update_document_task(col, id, doc),
                        None => self.insert_document_task(col, doc),
                    },
                }
            }
            Message::DocumentDeleteRequested => {
                if let Screen::Document(screen) = &self.screen {
                    if let Some(id) = &screen.id {
                        let content = ModalContent::DeleteDocument {
                            col: screen.col.clone(),
                            id: id.clone(),
                        };
                        self.open_modal(ModalRequest::new(content));
                    }
                }
                Task::none()
            }
            Message::DocumentCancelled => {
                if let Screen::Document(screen) = &self.screen {
                    let path = format!("cols/{}", screen.col);
                    self.go(&path, NavigationMode::Trigger)
                } else {
                    Task::none()
                }
            }

            Message::NewIndexRequested => {
                if let Screen::Indexes(screen) = &self.screen {
                    let content =
                        ModalContent::NewIndex { col: screen.col.clone(), path: String::new() };
                    self.open_modal(ModalRequest::new(content));
                }
                Task::none()
            }
            Message::DeleteIndexRequested { path } => {
                if let Screen::Indexes(screen) = &self.screen {
                    let content = ModalContent::DeleteIndex { col: screen.col.clone(), path };
                    self.open_modal(ModalRequest::new(content));
                }
                Task::none()
            }

            Message::QueryPanelOpenRequested => {
                self.bus.publish(&mut self.shell, Topic::QueryBoxOpen, &Payload::Empty);
                Task::none()
            }
            Message::QueryInputChanged(value) => {
                self.shell.query_panel.query = value;
                Task::none()
            }
            Message::QuerySubmitted => {
                let query = self.shell.query_panel.query.trim().to_owned();
                match self.shell.query_panel.col.clone() {
                    Some(col) if !query.is_empty() => {
                        let path = query_path(&col, &query);
                        self.go(&path, NavigationMode::Trigger)
                    }
                    _ => Task::none(),
                }
            }

            Message::ModalInputChanged(value) => {
                if let Some(input) =
                    self.shell.modal.content_mut().and_then(|content| content.input_mut())
                {
                    *input = value;
                }
                Task::none()
            }
            Message::ModalConfirmed => {
                let content = self.shell.modal.content().cloned();
                let close = self.close_modal();
                let action = self.confirmed_action(content);
                Task::batch([close, action])
            }
            Message::ModalCancelled => self.close_modal(),
            Message::ModalSettled(cycle) => {
                let callbacks = self.shell.modal.settle(cycle);
                for callback in callbacks {
                    callback(&mut self.shell);
                }
                self.drain_shell()
            }

            Message::NotificationExpired(id) | Message::NotificationDismissed(id) => {
                self.shell.notifications.dismiss(id);
                Task::none()
            }

            Message::CreateCollectionCompleted { name, result } => match result {
                Ok(()) => {
                    let path = format!("cols/{name}");
                    let navigate = self.go(&path, NavigationMode::Trigger);
                    let notify = self.notify(
                        Severity::Success,
                        tr("Collection created successfully!").to_owned(),
                        None,
                    );
                    Task::batch([navigate, notify])
                }
                Err(error) => self.notify(
                    Severity::Danger,
                    tr_format("Failed to create collection: {}", &[&error]),
                    Some(ERROR_NOTIFY_DURATION),
                ),
            },
            Message::RenameCollectionCompleted { new_name, result } => match result {
                Ok(()) => {
                    let path = format!("cols/{new_name}");
                    let navigate = self.go(&path, NavigationMode::Trigger);
                    let notify = self.notify(
                        Severity::Success,
                        tr("Collection renamed successfully!").to_owned(),
                        None,
                    );
                    Task::batch([navigate, notify])
                }
                Err(error) => self.notify(
                    Severity::Danger,
                    tr_format("Failed to rename collection: {}", &[&error]),
                    Some(ERROR_NOTIFY_DURATION),
                ),
            },
            Message::DropCollectionCompleted { result } => match result {
                Ok(()) => {
                    let navigate = self.go("", NavigationMode::Trigger);
                    let notify = self.notify(
                        Severity::Warning,
                        tr("Collection deleted successfully!").to_owned(),
                        None,
                    );
                    Task::batch([navigate, notify])
                }
                Err(error) => self.notify(
                    Severity::Danger,
                    tr_format("Failed to delete collection: {}", &[&error]),
                    Some(ERROR_NOTIFY_DURATION),
                ),
            },
            Message::ScrubCollectionCompleted { name, result } => match result {
                Ok(()) => {
                    let path = format!("cols/{name}");
                    let navigate = self.go(&path, NavigationMode::Trigger);
                    let notify = self.notify(
                        Severity::Success,
                        tr("Scrub operation completed successfully!").to_owned(),
                        None,
                    );
                    Task::batch([navigate, notify])
                }
                Err(error) => self.notify(
                    Severity::Danger,
                    tr_format("Failed to scrub collection: {}", &[&error]),
                    Some(ERROR_NOTIFY_DURATION),
                ),
            },
            Message::InsertDocumentCompleted { col, result } => match result {
                Ok(id) => {
                    if let Screen::Document(screen) = &mut self.screen {
                        screen.id = Some(id.clone());
                    }
                    // The editor already shows the saved body; only the
                    // recorded location changes.
                    let path = format!("docs/{col}/{id}");
                    let silent = self.go(&path, NavigationMode::Silent);
                    let notify = self.notify(
                        Severity::Success,
                        tr("Document added successfully!").to_owned(),
                        None,
                    );
                    Task::batch([silent, notify])
                }
                Err(error) => self.notify(
                    Severity::Danger,
                    tr_format("Failed to save document: {}", &[&error]),
                    Some(ERROR_NOTIFY_DURATION),
                ),
            },
            Message::UpdateDocumentCompleted { result } => match result {
                Ok(()) => self.notify(
                    Severity::Success,
                    tr("Document updated successfully!").to_owned(),
                    None,
                ),
                Err(error) => self.notify(
                    Severity::Danger,
                    tr_format("Failed to save document: {}", &[&error]),
                    Some(ERROR_NOTIFY_DURATION),
                ),
            },
            Message::DeleteDocumentCompleted { col, result } => match result {
                Ok(()) => {
                    let path = format!("cols/{col}");
                    let navigate = self.go(&path, NavigationMode::Trigger);
                    let notify = self.notify(
                        Severity::Warning,
                        tr("Document deleted successfully!").to_owned(),
                        None,
                    );
                    Task::batch([navigate, notify])
                }
                Err(error) => self.notify(
                    Severity::Danger,
                    tr_format("Failed to delete document: {}", &[&error]),
                    Some(ERROR_NOTIFY_DURATION),
                ),
            },
            Message::CreateIndexCompleted { result } => match result {
                Ok(()) => {
                    let notify = self.notify(
                        Severity::Success,
                        tr("Index created successfully!").to_owned(),
                        None,
                    );
                    self.bus.publish(&mut self.shell, Topic::DataInvalidate, &Payload::Empty);
                    let drain = self.drain_shell();
                    Task::batch([notify, drain])
                }
                Err(error) => self.notify(
                    Severity::Danger,
                    tr_format("Failed to create index: {}", &[&error]),
                    Some(ERROR_NOTIFY_DURATION),
                ),
            },
            Message::RemoveIndexCompleted { result } => match result {
                Ok(()) => {
                    let notify = self.notify(
                        Severity::Success,
                        tr("Index deleted successfully!").to_owned(),
                        None,
                    );
                    self.bus.publish(&mut self.shell, Topic::DataInvalidate, &Payload::Empty);
                    let drain = self.drain_shell();
                    Task::batch([notify, drain])
                }
                Err(error) => self.notify(
                    Severity::Danger,
                    tr_format("Failed to delete index: {}", &[&error]),
                    Some(ERROR_NOTIFY_DURATION),
                ),
            },

            Message::MenuItemSelected(menu, entry) => {
                match (menu, entry) {
                    (TopMenu::Help, MenuEntry::Action("Documentation")) => {
                        self.open_url(DOCS_URL);
                    }
                    (TopMenu::Help, MenuEntry::Action("About")) => {
                        self.open_modal(ModalRequest::new(ModalContent::About));
                    }
                    _ => {}
                }
                Task::none()
            }
            Message::OpenUrl(url) => {
                self.open_url(&url);
                Task::none()
            }

            Message::SettingsOpen => {
                self.settings_window = Some(SettingsWindowState::from_app_settings(&self.settings));
                self.mode = AppMode::Settings;
                Task::none()
            }
            Message::SettingsTabChanged(tab) => {
                if let Some(window) = &mut self.settings_window {
                    window.active_tab = tab;
                }
                Task::none()
            }
            Message::SettingsServerUrlChanged(value) => {
                if let Some(window) = &mut self.settings_window {
                    window.server_url = value;
                }
                Task::none()
            }
            Message::SettingsTokenChanged(value) => {
                if let Some(window) = &mut self.settings_window {
                    window.auth_token = value;
                }
                Task::none()
            }
            Message::SettingsLanguageChanged(language) => {
                if let Some(window) = &mut self.settings_window {
                    window.language = language;
                }
                Task::none()
            }
            Message::SettingsThemeChanged(choice) => {
                if let Some(window) = &mut self.settings_window {
                    window.theme_choice = choice;
                }
                Task::none()
            }
            Message::SettingsLoggingToggled(enabled) => {
                if let Some(window) = &mut self.settings_window {
                    window.logging_enabled = enabled;
                }
                Task::none()
            }
            Message::SettingsLogLevelChanged(level) => {
                if let Some(window) = &mut self.settings_window {
                    window.logging_level = level;
                }
                Task::none()
            }
            Message::SettingsLogPathChanged(value) => {
                if let Some(window) = &mut self.settings_window {
                    window.logging_path = value;
                }
                Task::none()
            }
            Message::SettingsApply => self.apply_settings_window(false),
            Message::SettingsSave => self.apply_settings_window(true),
            Message::SettingsCancel => {
                self.settings_window = None;
                self.mode = AppMode::Main;
                Task::none()
            }
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::none()
    }

    fn theme(&self) -> Theme {
        match self.settings.theme_choice {
            ThemeChoice::Light => Theme::Light,
            ThemeChoice::Dark => Theme::Dark,
            ThemeChoice::System => Theme::Light,
        }
    }

    fn view(&self) -> Element<'_, Message> {
        let palette = self.settings.active_palette();

        if self.mode == AppMode::Settings {
            if let Some(window) = &self.settings_window {
                return ui::settings::settings_view(window);
            }
        }

        let mut layout = Column::new()
            .spacing(0)
            .height(Length::Fill)
            .push(ui::menues::build_menu_bar(palette.clone()))
            .push(self.header_view(palette))
            .push(ui::banners::notifications_view(self.shell.notifications.banners(), palette));

        if self.shell.query_panel.visible {
            layout = layout.push(ui::query::query_panel_view(&self.shell.query_panel, palette));
        }

        let content: Element<Message> = match &self.screen {
            Screen::Blank => Container::new(Space::new().height(Length::Fill))
                .width(Length::Fill)
                .height(Length::Fill)
                .into(),
            Screen::Collections(screen) => ui::collections::collection_list_view(screen, palette),
            Screen::Collection(screen) => ui::collection::collection_view(screen, palette),
            Screen::Document(screen) => ui::document::document_view(screen, palette),
            Screen::Indexes(screen) => ui::indexes::indexes_view(screen, palette),
            Screen::Query(screen) => ui::query::query_view(screen, palette),
        };
        layout = layout.push(content);

        if let Some(content) = self.shell.modal.content() {
            let overlay = ui::modal::modal_view(content, palette);
            return Stack::new().push(layout).push(overlay).into();
        }

        layout.into()
    }

    fn header_view(&self, palette: &ThemePalette) -> Element<'_, Message> {
        let brand = match &self.version {
            Some(version) => {
                format!("{} ({})", APP_TITLE, tr_format("API version {}", &[version]))
            }
            None => APP_TITLE.to_owned(),
        };

        let load_input = text_input("collection/id", &self.load_doc_input)
            .on_input(Message::LoadDocInputChanged)
            .on_submit(Message::LoadDocSubmit)
            .padding([4, 8])
            .width(Length::Fixed(180.0));

        let go_palette = palette.clone();
        let go_button = Text::new(tr("Go")).size(13);
        let go_button = iced::widget::Button::new(go_button)
            .padding([4, 12])
            .on_press(Message::LoadDocSubmit)
            .style(move |_, status| go_palette.subtle_button_style(6.0, status));

        let background = palette.widget_background_color();
        let border_color = palette.widget_border_color();

        let row = Row::new()
            .spacing(12)
            .align_y(Vertical::Center)
            .push(
                Text::new(brand)
                    .size(18)
                    .color(palette.text_primary.to_color())
                    .width(Length::Fill),
            )
            .push(Text::new(tr("Load document")).size(13).color(palette.text_muted.to_color()))
            .push(load_input)
            .push(go_button);

        Container::new(row)
            .padding([8, 16])
            .width(Length::Fill)
            .style(move |_| container::Style {
                background: Some(background.into()),
                border: iced::border::rounded(0).width(1).color(border_color),
                ..Default::default()
            })
            .into()
    }

    /// Single entry point for navigation. Trigger mode tears down the
    /// previous view's subscriptions and mounts the matched route; silent
    /// mode records the path only.
    fn go(&mut self, path: &str, mode: NavigationMode) -> Task<Message> {
        let old_generation = self.router.generation();
        match self.router.navigate(path, mode) {
            Some(route) => {
                self.bus.drop_owner(Owner::View(old_generation));
                self.mount(route)
            }
            None => {
                self.shell.query_panel.col =
                    self.router.active_collection().map(str::to_owned);
                Task::none()
            }
        }
    }

    fn mount(&mut self, route: crate::router::Route) -> Task<Message> {
        use crate::router::Route;

        let generation = self.router.generation();
        self.shell.query_panel.col = self.router.active_collection().map(str::to_owned);

        match route {
            Route::CollectionList => {
                self.publish_query_box(false);
                self.screen = Screen::Collections(CollectionListScreen::new());
                self.fetch_collections(generation)
            }
            Route::Collection { name, page } => {
                self.publish_query_box(false);
                self.screen = Screen::Collection(CollectionScreen::new(name.clone(), page));
                self.fetch_page(generation, name, page)
            }
            Route::Indexes { name } => {
                self.publish_query_box(false);
                // Index mutations do not navigate; the mounted view refetches
                // when one lands.
                self.bus.subscribe(
                    Topic::DataInvalidate,
                    Owner::View(generation),
                    Box::new(|shell, _| shell.pending.push(ShellCommand::Refetch)),
                );
                self.screen = Screen::Indexes(IndexesScreen::new(name.clone()));
                self.fetch_indexes(generation, name)
            }
            Route::NewDocument { col } => {
                self.publish_query_box(false);
                self.screen = Screen::Document(DocumentScreen::blank(col));
                Task::none()
            }
            Route::Document { col, id } => {
                self.publish_query_box(false);
                self.screen = Screen::Document(DocumentScreen::existing(col.clone(), id.clone()));
                self.fetch_document(generation, col, id)
            }
            Route::Query { col, query } => {
                self.shell.query_panel.query = query.clone();
                self.publish_query_box(true);
                self.screen = Screen::Query(QueryScreen::new(col.clone(), query.clone()));
                self.fetch_query(generation, col, query)
            }
        }
    }

    fn publish_query_box(&mut self, open: bool) {
        let topic = if open { Topic::QueryBoxOpen } else { Topic::QueryBoxClose };
        self.bus.publish(&mut self.shell, topic, &Payload::Empty);
    }

    fn open_modal(&mut self, request: ModalRequest) {
        let payload = Payload::modal_open(request);
        self.bus.publish(&mut self.shell, Topic::ModalOpen, &payload);
    }

    fn close_modal(&mut self) -> Task<Message> {
        let payload = Payload::modal_close(None);
        self.bus.publish(&mut self.shell, Topic::ModalClose, &payload);
        self.drain_shell()
    }

    fn open_rename_modal(&mut self, name: String) {
        let prefill = name.clone();
        let request = ModalRequest {
            content: ModalContent::RenameCollection { old: name, name: String::new() },
            // The input starts from the current name, the way the dialog has
            // always behaved.
            on_show: Some(Box::new(move |shell: &mut Shell| {
                if let Some(input) =
                    shell.modal.content_mut().and_then(|content| content.input_mut())
                {
                    *input = prefill;
                }
            })),
            on_close: None,
        };
        self.open_modal(request);
    }

    /// The mutation behind a confirmed dialog. Blank inputs confirm to
    /// nothing, exactly like dismissing the dialog.
    fn confirmed_action(&mut self, content: Option<ModalContent>) -> Task<Message> {
        match content {
            Some(ModalContent::NewCollection { name }) => {
                let name = name.trim().to_owned();
                if name.is_empty() { Task::none() } else { self.create_collection_task(name) }
            }
            Some(ModalContent::RenameCollection { old, name }) => {
                let name = name.trim().to_owned();
                if name.is_empty() {
                    Task::none()
                } else {
                    self.rename_collection_task(old, name)
                }
            }
            Some(ModalContent::DropCollection { name }) => self.drop_collection_task(name),
            Some(ModalContent::ScrubCollection { name }) => {
                let warning = self.notify(
                    Severity::Warning,
                    tr("Scrub is in progress - it may take several minutes to complete...")
                        .to_owned(),
                    None,
                );
                Task::batch([warning, self.scrub_collection_task(name)])
            }
            Some(ModalContent::DeleteDocument { col, id }) => self.delete_document_task(col, id),
            Some(ModalContent::NewIndex { col, path }) => {
                let path = normalize_index_path(&path);
                if path.is_empty() { Task::none() } else { self.create_index_task(col, path) }
            }
            Some(ModalContent::DeleteIndex { col, path }) => self.remove_index_task(col, path),
            Some(ModalContent::About) | None => Task::none(),
        }
    }

    fn notify(
        &mut self,
        severity: Severity,
        text: String,
        duration: Option<Duration>,
    ) -> Task<Message> {
        let (id, duration) = self.shell.notifications.push(severity, text, duration);
        Task::perform(async move { std::thread::sleep(duration) }, move |_| {
            Message::NotificationExpired(id)
        })
    }

    fn drain_shell(&mut self) -> Task<Message> {
        let commands: Vec<ShellCommand> = self.shell.pending.drain(..).collect();
        let mut tasks = Vec::new();
        for command in commands {
            match command {
                ShellCommand::ModalSettle { cycle } => {
                    tasks.push(Task::perform(
                        async move { std::thread::sleep(MODAL_SETTLE_DELAY) },
                        move |_| Message::ModalSettled(cycle),
                    ));
                }
                ShellCommand::Refetch => tasks.push(self.refetch_current()),
            }
        }
        Task::batch(tasks)
    }

    fn refetch_current(&self) -> Task<Message> {
        let generation = self.router.generation();
        match &self.screen {
            Screen::Blank => Task::none(),
            Screen::Collections(_) => self.fetch_collections(generation),
            Screen::Collection(screen) => {
                self.fetch_page(generation, screen.name.clone(), screen.page)
            }
            Screen::Document(screen) => match &screen.id {
                Some(id) => self.fetch_document(generation, screen.col.clone(), id.clone()),
                None => Task::none(),
            },
            Screen::Indexes(screen) => self.fetch_indexes(generation, screen.col.clone()),
            Screen::Query(screen) => {
                self.fetch_query(generation, screen.col.clone(), screen.query.clone())
            }
        }
    }

    fn open_url(&self, url: &str) {
        if let Err(error) = webbrowser::open(url) {
            error!("failed to open {url}: {error}");
        }
    }

    fn apply_settings_window(&mut self, persist: bool) -> Task<Message> {
        let Some(window) = &mut self.settings_window else {
            return Task::none();
        };

        match window.to_app_settings(&self.settings) {
            Err(error) => {
                window.validation_error = Some(error);
                Task::none()
            }
            Ok(new_settings) => {
                self.settings = new_settings;
                i18n::set_language(self.settings.language);
                logging::apply_settings(
                    self.settings.logging_enabled,
                    self.settings.logging_level.to_level_filter(),
                    &self.settings.logging_path,
                );
                self.api =
                    ApiClient::new(&self.settings.server_url, self.settings.credential());

                if persist {
                    if let Err(error) = settings::save_to_disk(&self.settings) {
                        error!("failed to save settings: {error}");
                        return self.notify(
                            Severity::Danger,
                            error.to_string(),
                            Some(ERROR_NOTIFY_DURATION),
                        );
                    }
                    self.settings_window = None;
                    self.mode = AppMode::Main;
                }
                Task::none()
            }
        }
    }

    fn load_version_task(&self) -> Task<Message> {
        let api = self.api.clone();
        Task::perform(
            async move { api.version().map_err(|error| error.to_string()) },
            Message::VersionLoaded,
        )
    }

    fn fetch_collections(&self, generation: u64) -> Task<Message> {
        let api = self.api.clone();
        Task::perform(
            async move { api.all_collections().map_err(|error| error.to_string()) },
            move |result| Message::CollectionsLoaded { generation, result },
        )
    }

    fn fetch_count(&self, generation: u64, name: String) -> Task<Message> {
        let api = self.api.clone();
        let name_for_task = name.clone();
        Task::perform(
            async move { api.approx_doc_count(&name_for_task).map_err(|error| error.to_string()) },
            move |result| Message::CollectionCountLoaded {
                generation,
                name: name.clone(),
                result,
            },
        )
    }

    fn fetch_page(&self, generation: u64, name: String, page: u64) -> Task<Message> {
        let api = self.api.clone();
        Task::perform(
            async move { load_collection_page(api, name, page) },
            move |result| Message::PageLoaded { generation, result },
        )
    }

    fn fetch_document(&self, generation: u64, col: String, id: String) -> Task<Message> {
        let api = self.api.clone();
        Task::perform(
            async move { api.get_document(&col, &id).map_err(|error| error.to_string()) },
            move |result| Message::DocumentLoaded { generation, result },
        )
    }

    fn fetch_indexes(&self, generation: u64, col: String) -> Task<Message> {
        let api = self.api.clone();
        Task::perform(
            async move { api.indexes(&col).map_err(|error| error.to_string()) },
            move |result| Message::IndexesLoaded { generation, result },
        )
    }

    fn fetch_query(&self, generation: u64, col: String, query: String) -> Task<Message> {
        let api = self.api.clone();
        Task::perform(
            async move { api.query(&col, &query).map_err(|error| error.to_string()) },
            move |result| Message::QueryLoaded { generation, result },
        )
    }

    fn create_collection_task(&self, name: String) -> Task<Message> {
        let api = self.api.clone();
        let name_for_task = name.clone();
        Task::perform(
            async move {
                api.create_collection(&name_for_task).map_err(|error| error.to_string())
            },
            move |result| Message::CreateCollectionCompleted { name: name.clone(), result },
        )
    }

    fn rename_collection_task(&self, old: String, new_name: String) -> Task<Message> {
        let api = self.api.clone();
        let new_for_task = new_name.clone();
        Task::perform(
            async move {
                api.rename_collection(&old, &new_for_task).map_err(|error| error.to_string())
            },
            move |result| Message::RenameCollectionCompleted {
                new_name: new_name.clone(),
                result,
            },
        )
    }

    fn drop_collection_task(&self, name: String) -> Task<Message> {
        let api = self.api.clone();
        Task::perform(
            async move { api.drop_collection(&name).map_err(|error| error.to_string()) },
            move |result| Message::DropCollectionCompleted { result },
        )
    }

    fn scrub_collection_task(&self, name: String) -> Task<Message> {
        let api = self.api.clone();
        let name_for_task = name.clone();
        Task::perform(
            async move {
                api.scrub_collection(&name_for_task).map_err(|error| error.to_string())
            },
            move |result| Message::ScrubCollectionCompleted { name: name.clone(), result },
        )
    }

    fn insert_document_task(&self, col: String, doc: Value) -> Task<Message> {
        let api = self.api.clone();
        let col_for_task = col.clone();
        Task::perform(
            async move {
                api.insert_document(&col_for_task, &doc).map_err(|error| error.to_string())
            },
            move |result| Message::InsertDocumentCompleted { col: col.clone(), result },
        )
    }

    fn update_document_task(&self, col: String, id: String, doc: Value) -> Task<Message> {
        let api = self.api.clone();
        Task::perform(
            async move {
                api.update_document(&col, &id, &doc).map_err(|error| error.to_string())
            },
            move |result| Message::UpdateDocumentCompleted { result },
        )
    }

    fn delete_document_task(&self, col: String, id: String) -> Task<Message> {
        let api = self.api.clone();
        let col_for_task = col.clone();
        Task::perform(
            async move {
                api.delete_document(&col_for_task, &id).map_err(|error| error.to_string())
            },
            move |result| Message::DeleteDocumentCompleted { col: col.clone(), result },
        )
    }

    fn create_index_task(&self, col: String, path: String) -> Task<Message> {
        let api = self.api.clone();
        Task::perform(
            async move { api.create_index(&col, &path).map_err(|error| error.to_string()) },
            move |result| Message::CreateIndexCompleted { result },
        )
    }

    fn remove_index_task(&self, col: String, path: String) -> Task<Message> {
        let api = self.api.clone();
        Task::perform(
            async move { api.remove_index(&col, &path).map_err(|error| error.to_string()) },
            move |result| Message::RemoveIndexCompleted { result },
        )
    }
}

/// Comma-separated index paths are trimmed segment by segment; empty segments
/// collapse away.
fn normalize_index_path(input: &str) -> String {
    input
        .split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join(",")
}

/// The page load mirrors the original flow: resolve the approximate count
/// first, then request the page computed from it.
fn load_collection_page(
    api: ApiClient,
    name: String,
    page: u64,
) -> Result<CollectionPage, PageLoadError> {
    let count = api
        .approx_doc_count(&name)
        .map_err(|error| PageLoadError::Count(error.to_string()))?;
    let (zero_based, total_pages) = api::page_request(page, count);
    let docs = api
        .get_page(&name, zero_based, total_pages)
        .map_err(|error| PageLoadError::Page(error.to_string()))?;
    Ok(CollectionPage { count, total_pages, docs })
}
