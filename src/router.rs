use log::warn;

/// The closed set of navigable locations, each with its typed captured
/// segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    CollectionList,
    Collection { name: String, page: u64 },
    Indexes { name: String },
    NewDocument { col: String },
    Document { col: String, id: String },
    Query { col: String, query: String },
}

impl Route {
    /// First matching pattern wins; `None` means "not found" and the caller
    /// leaves the current view mounted.
    pub fn parse(path: &str) -> Option<Route> {
        let trimmed = path.trim_matches('/');
        if trimmed.is_empty() {
            return Some(Route::CollectionList);
        }

        let segments: Vec<&str> = trimmed.split('/').collect();
        match segments.as_slice() {
            ["cols", name] if !name.is_empty() => {
                Some(Route::Collection { name: (*name).to_owned(), page: 1 })
            }
            ["cols", name, page] if !name.is_empty() => {
                let page: u64 = page.parse().ok()?;
                if page == 0 {
                    return None;
                }
                Some(Route::Collection { name: (*name).to_owned(), page })
            }
            ["indexes", name] if !name.is_empty() => {
                Some(Route::Indexes { name: (*name).to_owned() })
            }
            ["docs", "new", col] if !col.is_empty() => {
                Some(Route::NewDocument { col: (*col).to_owned() })
            }
            ["docs", col, id] if !col.is_empty() && !id.is_empty() => {
                Some(Route::Document { col: (*col).to_owned(), id: (*id).to_owned() })
            }
            ["query", col, query] if !col.is_empty() => {
                let query = urlencoding::decode(query).ok()?.into_owned();
                Some(Route::Query { col: (*col).to_owned(), query })
            }
            _ => None,
        }
    }

    /// The collection the query panel should default to after this route is
    /// mounted.
    pub fn collection(&self) -> Option<&str> {
        match self {
            Route::CollectionList => None,
            Route::Collection { name, .. } | Route::Indexes { name } => Some(name),
            Route::NewDocument { col }
            | Route::Document { col, .. }
            | Route::Query { col, .. } => Some(col),
        }
    }
}

pub fn query_path(col: &str, query: &str) -> String {
    format!("query/{}/{}", col, urlencoding::encode(query))
}

/// Validate a `collection/id` reference typed into the load-document form:
/// letters, one slash, digits. Anything else is rejected before a request is
/// made.
pub fn parse_doc_ref(input: &str) -> Option<(&str, &str)> {
    let (col, id) = input.trim().split_once('/')?;
    if col.is_empty() || !col.chars().all(|ch| ch.is_ascii_alphabetic()) {
        return None;
    }
    if id.is_empty() || !id.chars().all(|ch| ch.is_ascii_digit()) {
        return None;
    }
    Some((col, id))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationMode {
    /// Dispatch and mount the matched view.
    Trigger,
    /// Record the path without mounting; used when the screen already shows
    /// the canonical state after a mutation.
    Silent,
}

/// Single-entry dispatch from a path to at most one mounted view. Each
/// triggered navigation bumps the view generation; fetches started for a view
/// carry the generation they were mounted under, and completions from an
/// older generation are discarded before they can touch shared state.
pub struct Router {
    path: String,
    generation: u64,
    active_col: Option<String>,
}

impl Router {
    pub fn new() -> Self {
        Self { path: String::new(), generation: 0, active_col: None }
    }

    /// Returns the route to mount, or `None` when nothing should be mounted
    /// (silent mode, or an unmatched path).
    pub fn navigate(&mut self, path: &str, mode: NavigationMode) -> Option<Route> {
        let route = Route::parse(path);

        match mode {
            NavigationMode::Trigger => match route {
                Some(route) => {
                    self.generation += 1;
                    self.path = path.trim_matches('/').to_owned();
                    self.active_col = route.collection().map(str::to_owned);
                    Some(route)
                }
                None => {
                    warn!("no route matches {path:?}; keeping the current view");
                    None
                }
            },
            NavigationMode::Silent => {
                self.path = path.trim_matches('/').to_owned();
                if let Some(route) = route {
                    self.active_col = route.collection().map(str::to_owned);
                }
                None
            }
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    pub fn active_collection(&self) -> Option<&str> {
        self.active_col.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::{NavigationMode, Route, Router, parse_doc_ref, query_path};

    #[test]
    fn route_table_matches_expected_paths() {
        assert_eq!(Route::parse(""), Some(Route::CollectionList));
        assert_eq!(Route::parse("/"), Some(Route::CollectionList));
        assert_eq!(
            Route::parse("cols/books"),
            Some(Route::Collection { name: "books".to_owned(), page: 1 })
        );
        assert_eq!(
            Route::parse("cols/books/3"),
            Some(Route::Collection { name: "books".to_owned(), page: 3 })
        );
        assert_eq!(Route::parse("indexes/books"), Some(Route::Indexes { name: "books".to_owned() }));
        assert_eq!(
            Route::parse("docs/new/books"),
            Some(Route::NewDocument { col: "books".to_owned() })
        );
        assert_eq!(
            Route::parse("docs/books/42"),
            Some(Route::Document { col: "books".to_owned(), id: "42".to_owned() })
        );
        assert_eq!(
            Route::parse("query/books/%7B%22eq%22%3A1%7D"),
            Some(Route::Query { col: "books".to_owned(), query: "{\"eq\":1}".to_owned() })
        );
    }

    #[test]
    fn unmatched_paths_do_not_resolve() {
        assert_eq!(Route::parse("bogus/path"), None);
        assert_eq!(Route::parse("cols"), None);
        assert_eq!(Route::parse("cols/books/not-a-page"), None);
        assert_eq!(Route::parse("cols/books/0"), None);
        assert_eq!(Route::parse("docs/books"), None);
    }

    #[test]
    fn query_paths_round_trip_through_encoding() {
        let path = query_path("books", "{\"has\":[\"title\"]}");
        assert_eq!(
            Route::parse(&path),
            Some(Route::Query {
                col: "books".to_owned(),
                query: "{\"has\":[\"title\"]}".to_owned()
            })
        );
    }

    #[test]
    fn trigger_navigation_advances_generation_and_records_state() {
        let mut router = Router::new();
        let route = router.navigate("cols/books/2", NavigationMode::Trigger);
        assert_eq!(route, Some(Route::Collection { name: "books".to_owned(), page: 2 }));
        assert_eq!(router.generation(), 1);
        assert_eq!(router.path(), "cols/books/2");
        assert_eq!(router.active_collection(), Some("books"));

        let old_generation = router.generation();
        router.navigate("", NavigationMode::Trigger);
        assert!(!router.is_current(old_generation));
        assert_eq!(router.active_collection(), None);
    }

    #[test]
    fn silent_navigation_records_path_without_mounting() {
        let mut router = Router::new();
        router.navigate("cols/books", NavigationMode::Trigger);
        let generation = router.generation();

        let route = router.navigate("docs/books/7", NavigationMode::Silent);
        assert!(route.is_none());
        assert_eq!(router.path(), "docs/books/7");
        assert_eq!(router.generation(), generation);
        assert_eq!(router.active_collection(), Some("books"));
    }

    #[test]
    fn unmatched_trigger_keeps_previous_state() {
        let mut router = Router::new();
        router.navigate("cols/books", NavigationMode::Trigger);
        let generation = router.generation();

        assert!(router.navigate("bogus/path", NavigationMode::Trigger).is_none());
        assert_eq!(router.path(), "cols/books");
        assert_eq!(router.generation(), generation);
    }

    #[test]
    fn doc_refs_require_letters_slash_digits() {
        assert_eq!(parse_doc_ref("abc/123"), Some(("abc", "123")));
        assert_eq!(parse_doc_ref("  abc/123  "), Some(("abc", "123")));
        assert_eq!(parse_doc_ref("abc"), None);
        assert_eq!(parse_doc_ref("123/abc"), None);
        assert_eq!(parse_doc_ref("abc/"), None);
        assert_eq!(parse_doc_ref("/123"), None);
        assert_eq!(parse_doc_ref("ab1/23"), None);
    }
}
