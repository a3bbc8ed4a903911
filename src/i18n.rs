use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{OnceLock, RwLock};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    Russian,
}

static CURRENT_LANGUAGE: OnceLock<RwLock<Language>> = OnceLock::new();

pub const ALL_LANGUAGES: &[Language] = &[Language::English, Language::Russian];

impl Language {
    pub fn label(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Russian => "Russian",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(tr(self.label()))
    }
}

fn language_lock() -> &'static RwLock<Language> {
    CURRENT_LANGUAGE.get_or_init(|| RwLock::new(Language::English))
}

pub fn init_language(language: Language) {
    if CURRENT_LANGUAGE.set(RwLock::new(language)).is_err() {
        set_language(language);
    }
}

pub fn set_language(language: Language) {
    let mut guard = language_lock().write().expect("language write lock poisoned");
    *guard = language;
}

fn current_language() -> Language {
    *language_lock().read().expect("language read lock poisoned")
}

fn russian_map() -> &'static HashMap<&'static str, &'static str> {
    static MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    MAP.get_or_init(|| {
        HashMap::from([
            ("English", "Английский"),
            ("Russian", "Русский"),
            ("Settings", "Настройки"),
            ("Help", "Справка"),
            ("Documentation", "Документация"),
            ("About", "О программе"),
            ("Close", "Закрыть"),
            ("Collections", "Коллекции"),
            ("New Collection", "Новая коллекция"),
            ("No collections yet", "Коллекций пока нет"),
            ("Open", "Открыть"),
            ("Rename", "Переименовать"),
            ("Delete", "Удалить"),
            ("Scrub", "Очистка"),
            ("Indexes", "Индексы"),
            ("New Document", "Новый документ"),
            ("Search", "Поиск"),
            ("Save", "Сохранить"),
            ("Cancel", "Отмена"),
            ("Create", "Создать"),
            ("Apply", "Применить"),
            ("Previous", "Назад"),
            ("Next", "Вперёд"),
            ("Loading...", "Загрузка..."),
            ("Page {} of {}", "Страница {} из {}"),
            ("{} documents in total", "Всего документов: {}"),
            ("Documents of {}", "Документы коллекции {}"),
            ("Indexes of {}", "Индексы коллекции {}"),
            ("No indexes yet", "Индексов пока нет"),
            ("New Index", "Новый индекс"),
            ("Load document", "Загрузить документ"),
            ("Go", "Перейти"),
            ("Missing or invalid document ID.", "Отсутствующий или неверный ID документа."),
            ("API version {}", "Версия API {}"),
            ("Query", "Запрос"),
            ("Run", "Выполнить"),
            ("Run a query against {}", "Выполнить запрос к {}"),
            ("Query results for {}", "Результаты запроса к {}"),
            ("No documents matched.", "Подходящих документов нет."),
            ("Create a new collection", "Создать новую коллекцию"),
            ("Collection name", "Имя коллекции"),
            ("Rename collection {}", "Переименовать коллекцию {}"),
            ("New name", "Новое имя"),
            ("Delete collection {}?", "Удалить коллекцию {}?"),
            (
                "This permanently deletes the collection and all of its documents.",
                "Коллекция и все её документы будут удалены безвозвратно.",
            ),
            ("Scrub collection {}?", "Выполнить очистку коллекции {}?"),
            (
                "Scrub repairs and compacts the collection. It may take several minutes.",
                "Очистка восстанавливает и уплотняет коллекцию. Это может занять несколько минут.",
            ),
            ("Delete document {}?", "Удалить документ {}?"),
            ("This permanently deletes the document.", "Документ будет удалён безвозвратно."),
            ("Create a new index", "Создать новый индекс"),
            ("Index path (comma-separated)", "Путь индекса (через запятую)"),
            ("Delete index {}?", "Удалить индекс {}?"),
            ("Collection created successfully!", "Коллекция успешно создана!"),
            ("Failed to create collection: {}", "Не удалось создать коллекцию: {}"),
            ("Collection renamed successfully!", "Коллекция успешно переименована!"),
            ("Failed to rename collection: {}", "Не удалось переименовать коллекцию: {}"),
            ("Collection deleted successfully!", "Коллекция успешно удалена!"),
            ("Failed to delete collection: {}", "Не удалось удалить коллекцию: {}"),
            ("Scrub operation completed successfully!", "Очистка успешно завершена!"),
            ("Failed to scrub collection: {}", "Не удалось выполнить очистку коллекции: {}"),
            (
                "Scrub is in progress - it may take several minutes to complete...",
                "Идёт очистка - она может занять несколько минут...",
            ),
            ("Document added successfully!", "Документ успешно добавлен!"),
            ("Document updated successfully!", "Документ успешно обновлён!"),
            ("Failed to save document: {}", "Не удалось сохранить документ: {}"),
            ("Document deleted successfully!", "Документ успешно удалён!"),
            ("Failed to delete document: {}", "Не удалось удалить документ: {}"),
            ("Index created successfully!", "Индекс успешно создан!"),
            ("Failed to create index: {}", "Не удалось создать индекс: {}"),
            ("Index deleted successfully!", "Индекс успешно удалён!"),
            ("Failed to delete index: {}", "Не удалось удалить индекс: {}"),
            ("Error loading collections: {}", "Ошибка загрузки коллекций: {}"),
            ("Error loading documents: {}", "Ошибка загрузки документов: {}"),
            ("Error loading document: {}", "Ошибка загрузки документа: {}"),
            ("Error loading indexes: {}", "Ошибка загрузки индексов: {}"),
            ("Error running query: {}", "Ошибка выполнения запроса: {}"),
            ("Error getting document count: {}", "Ошибка получения числа документов: {}"),
            ("Invalid JSON. Unable to save document.", "Неверный JSON. Невозможно сохранить документ."),
            ("Server", "Сервер"),
            ("Server URL", "Адрес сервера"),
            ("Authorization token", "Токен авторизации"),
            ("Leave empty when the server runs without authentication.",
                "Оставьте пустым, если сервер работает без аутентификации."),
            ("Appearance", "Внешний вид"),
            ("Language", "Язык"),
            ("Theme", "Тема"),
            ("Logging", "Журналирование"),
            ("Enable logging", "Включить журналирование"),
            ("Log level", "Уровень журнала"),
            ("Log file", "Файл журнала"),
            ("Server URL must not be empty.", "Адрес сервера не должен быть пустым."),
            ("Homepage", "Домашняя страница"),
            ("Author", "Автор"),
            ("Project started", "Проект начат"),
            (
                "Administration client for a REST document database: browse collections, edit documents, manage indexes, run queries.",
                "Клиент администрирования документной базы данных по REST: просмотр коллекций, правка документов, управление индексами, выполнение запросов.",
            ),
        ])
    })
}

fn english_fallback_map() -> &'static HashMap<&'static str, &'static str> {
    static MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    MAP.get_or_init(|| {
        russian_map().iter().map(|(english, russian)| (*russian, *english)).collect()
    })
}

pub fn tr(text: &'static str) -> &'static str {
    let english = english_fallback_map().get(text).copied().unwrap_or(text);
    match current_language() {
        Language::English => english,
        Language::Russian => russian_map().get(english).copied().unwrap_or(english),
    }
}

pub fn tr_format(template: &'static str, replacements: &[&str]) -> String {
    let mut result = tr(template).to_owned();
    for value in replacements {
        result = result.replacen("{}", value, 1);
    }
    result
}
