//! Smart search resolution for the address bar

use serde::{Deserialize, Serialize};
use url::Url;

use crate::bookmarks::Bookmark;
use crate::command::Command;
use crate::history::HistoryLog;

pub const DEFAULT_SEARCH_TEMPLATE: &str = "https://www.google.com/search?q=%s";

/// Schemes written without `//` that are still treated as complete URLs
const BARE_SCHEMES: [&str; 4] = ["about:", "data:", "file:", "mailto:"];

/// What the address bar input asks for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Blank input; the caller does nothing
    Noop,
    ShowNotes,
    ToggleMute,
    TakeScreenshot,
    ToggleTimer,
    NavigateTo(String),
    /// Raw query text; expand with [`SmartSearchResolver::search_url`]
    SearchQuery(String),
}

impl From<Command> for Action {
    fn from(command: Command) -> Self {
        match command {
            Command::ShowNotes => Action::ShowNotes,
            Command::ToggleMute => Action::ToggleMute,
            Command::TakeScreenshot => Action::TakeScreenshot,
            Command::ToggleTimer => Action::ToggleTimer,
        }
    }
}

pub struct SmartSearchResolver {
    /// Search engine URL template (%s replaced with query)
    search_template: String,
}

impl SmartSearchResolver {
    pub fn new() -> Self {
        Self {
            search_template: DEFAULT_SEARCH_TEMPLATE.to_string(),
        }
    }

    pub fn with_search_engine(template: String) -> Self {
        Self {
            search_template: template,
        }
    }

    pub fn set_search_engine(&mut self, template: String) {
        self.search_template = template;
    }

    pub fn search_template(&self) -> &str {
        &self.search_template
    }

    pub fn resolve(&self, input: &str, history: &HistoryLog) -> Action {
        self.resolve_with_bookmarks(input, history, &[])
    }

    /// Resolve user input into an action. History wins over bookmarks, and
    /// both win over URL detection.
    pub fn resolve_with_bookmarks(
        &self,
        input: &str,
        history: &HistoryLog,
        bookmarks: &[Bookmark],
    ) -> Action {
        let input = input.trim();
        if input.is_empty() {
            return Action::Noop;
        }

        let lowered = input.to_lowercase();

        if let Some(command) = Command::parse(&lowered) {
            tracing::debug!(keyword = command.keyword(), "Resolved address bar command");
            return command.into();
        }

        if let Some(entry) = history.search(&lowered).next() {
            tracing::debug!(url = %entry.url, "Resolved from history");
            return Action::NavigateTo(entry.url.clone());
        }

        if let Some(bookmark) = bookmarks.iter().find(|b| b.matches(&lowered)) {
            tracing::debug!(url = %bookmark.url, "Resolved from bookmarks");
            return Action::NavigateTo(bookmark.url.clone());
        }

        if let Some(url) = normalize_url(input, &lowered) {
            return Action::NavigateTo(url);
        }

        Action::SearchQuery(input.to_string())
    }

    /// Build search URL from query
    pub fn search_url(&self, query: &str) -> String {
        let encoded = urlencoding::encode(query);
        self.search_template.replace("%s", &encoded)
    }
}

impl Default for SmartSearchResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// URL-looking input with `https://` added when it has no scheme. `None`
/// when the input doesn't look like a URL or doesn't parse as one.
fn normalize_url(input: &str, lowered: &str) -> Option<String> {
    if input.contains(char::is_whitespace) {
        return None;
    }

    let bare_scheme = BARE_SCHEMES.iter().any(|s| lowered.starts_with(s));
    if !input.contains('.') && !lowered.starts_with("http") && !bare_scheme {
        return None;
    }

    let has_scheme = bare_scheme || has_authority_scheme(lowered);

    let candidate = if has_scheme {
        input.to_string()
    } else {
        format!("https://{input}")
    };

    match Url::parse(&candidate) {
        Ok(_) => Some(candidate),
        Err(e) => {
            tracing::debug!(input = %input, error = %e, "URL-like input failed to parse");
            None
        }
    }
}

/// True when the input starts with `<scheme>://`. A `://` later in the
/// path or query does not count.
fn has_authority_scheme(lowered: &str) -> bool {
    let Some((scheme, _)) = lowered.split_once("://") else {
        return false;
    };

    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabkeep_storage::MemoryStore;

    fn empty_history() -> HistoryLog {
        HistoryLog::load(MemoryStore::shared())
    }

    #[test]
    fn test_resolve_keywords() {
        let resolver = SmartSearchResolver::new();
        let history = empty_history();

        assert_eq!(resolver.resolve("note", &history), Action::ShowNotes);
        assert_eq!(resolver.resolve("  MUTE ", &history), Action::ToggleMute);
        assert_eq!(
            resolver.resolve("Screenshot", &history),
            Action::TakeScreenshot
        );
        assert_eq!(resolver.resolve("timer 10", &history), Action::ToggleTimer);
    }

    #[test]
    fn test_resolve_blank_is_noop() {
        let resolver = SmartSearchResolver::new();
        let history = empty_history();

        assert_eq!(resolver.resolve("", &history), Action::Noop);
        assert_eq!(resolver.resolve("   \t", &history), Action::Noop);
    }

    #[test]
    fn test_resolve_url() {
        let resolver = SmartSearchResolver::new();
        let history = empty_history();

        assert_eq!(
            resolver.resolve("example.com", &history),
            Action::NavigateTo("https://example.com".to_string())
        );
        assert_eq!(
            resolver.resolve("http://foo", &history),
            Action::NavigateTo("http://foo".to_string())
        );
        assert_eq!(
            resolver.resolve("about:blank", &history),
            Action::NavigateTo("about:blank".to_string())
        );
        assert_eq!(
            resolver.resolve("docs.rs/serde?search=Value", &history),
            Action::NavigateTo("https://docs.rs/serde?search=Value".to_string())
        );
    }

    #[test]
    fn test_resolve_url_with_embedded_url() {
        let resolver = SmartSearchResolver::new();
        let history = empty_history();

        assert_eq!(
            resolver.resolve("example.com/login?next=https://example.com/a", &history),
            Action::NavigateTo("https://example.com/login?next=https://example.com/a".to_string())
        );
        assert_eq!(
            resolver.resolve("HTTPS://Example.com/r?u=http://x.example", &history),
            Action::NavigateTo("HTTPS://Example.com/r?u=http://x.example".to_string())
        );
        assert_eq!(
            resolver.resolve("git+ssh://host.example/repo", &history),
            Action::NavigateTo("git+ssh://host.example/repo".to_string())
        );
    }

    #[test]
    fn test_resolve_search() {
        let resolver = SmartSearchResolver::new();
        let history = empty_history();

        assert_eq!(
            resolver.resolve("weather today", &history),
            Action::SearchQuery("weather today".to_string())
        );
        // Has a dot but isn't a URL
        assert_eq!(
            resolver.resolve("what is 3.5 kg", &history),
            Action::SearchQuery("what is 3.5 kg".to_string())
        );
    }

    #[test]
    fn test_history_wins_newest_first() {
        let resolver = SmartSearchResolver::new();
        let mut history = empty_history();
        history.record("Weather Old", "https://old.example/weather").unwrap();
        history.record("Weather New", "https://new.example/weather").unwrap();

        assert_eq!(
            resolver.resolve("WEATHER", &history),
            Action::NavigateTo("https://new.example/weather".to_string())
        );
    }

    #[test]
    fn test_history_before_bookmarks_before_url() {
        let resolver = SmartSearchResolver::new();
        let mut history = empty_history();
        let bookmarks = vec![Bookmark::new("Crates", "https://crates.io")];

        assert_eq!(
            resolver.resolve_with_bookmarks("crates", &history, &bookmarks),
            Action::NavigateTo("https://crates.io".to_string())
        );

        history.record("crates", "https://lib.rs/crates").unwrap();
        assert_eq!(
            resolver.resolve_with_bookmarks("crates", &history, &bookmarks),
            Action::NavigateTo("https://lib.rs/crates".to_string())
        );
    }

    #[test]
    fn test_keyword_beats_history() {
        let resolver = SmartSearchResolver::new();
        let mut history = empty_history();
        history.record("My note", "https://notes.example").unwrap();

        assert_eq!(resolver.resolve("note", &history), Action::ShowNotes);
    }

    #[test]
    fn test_search_url() {
        let resolver = SmartSearchResolver::new();
        assert_eq!(
            resolver.search_url("rust programming"),
            "https://www.google.com/search?q=rust%20programming"
        );

        let resolver =
            SmartSearchResolver::with_search_engine("https://duckduckgo.com/?q=%s".to_string());
        assert_eq!(resolver.search_url("a&b"), "https://duckduckgo.com/?q=a%26b");
        assert_eq!(resolver.search_url("café~"), "https://duckduckgo.com/?q=caf%C3%A9~");
    }
}
