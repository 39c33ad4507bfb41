//! Browser engine collaborator
//!
//! The engine owns one view per tab and reports changes back as
//! [`EngineEvent`]s, addressed by tab id. The manager never holds a
//! reference into the engine's views.

use std::collections::HashMap;
use url::Url;

use crate::tab::TabId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    NavigationChanged { tab: TabId, url: String },
    TitleChanged { tab: TabId, title: String },
    IconChanged { tab: TabId },
    DevToolsClosed { tab: TabId },
}

impl EngineEvent {
    pub fn tab(&self) -> &TabId {
        match self {
            EngineEvent::NavigationChanged { tab, .. }
            | EngineEvent::TitleChanged { tab, .. }
            | EngineEvent::IconChanged { tab }
            | EngineEvent::DevToolsClosed { tab } => tab,
        }
    }
}

pub trait EngineHost {
    fn create_view(&mut self, tab: &TabId, url: &str);
    fn destroy_view(&mut self, tab: &TabId);
    fn navigate(&mut self, tab: &TabId, url: &str);
    fn go_back(&mut self, tab: &TabId);
    fn go_forward(&mut self, tab: &TabId);
    fn reload(&mut self, tab: &TabId);
    fn set_muted(&mut self, tab: &TabId, muted: bool);
    /// Open the inspector, or raise it if it is already open
    fn open_dev_tools(&mut self, tab: &TabId);
    /// Encoded image of the view, if the engine can produce one
    fn capture(&mut self, tab: &TabId) -> Option<Vec<u8>>;

    /// Notifications produced since the last call, in the order they happened
    fn drain_events(&mut self) -> Vec<EngineEvent> {
        Vec::new()
    }
}

/// Engine that does nothing and reports nothing
#[derive(Debug, Default)]
pub struct NullEngine;

impl EngineHost for NullEngine {
    fn create_view(&mut self, _tab: &TabId, _url: &str) {}
    fn destroy_view(&mut self, _tab: &TabId) {}
    fn navigate(&mut self, _tab: &TabId, _url: &str) {}
    fn go_back(&mut self, _tab: &TabId) {}
    fn go_forward(&mut self, _tab: &TabId) {}
    fn reload(&mut self, _tab: &TabId) {}
    fn set_muted(&mut self, _tab: &TabId, _muted: bool) {}
    fn open_dev_tools(&mut self, _tab: &TabId) {}

    fn capture(&mut self, _tab: &TabId) -> Option<Vec<u8>> {
        None
    }
}

#[derive(Debug, Default)]
struct ViewHistory {
    urls: Vec<String>,
    index: usize,
}

impl ViewHistory {
    fn current(&self) -> Option<&str> {
        self.urls.get(self.index).map(String::as_str)
    }
}

/// Engine without rendering: every load completes immediately, and the
/// page title is the host name.
#[derive(Debug, Default)]
pub struct HeadlessEngine {
    views: HashMap<TabId, ViewHistory>,
    pending: Vec<EngineEvent>,
}

impl HeadlessEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view_count(&self) -> usize {
        self.views.len()
    }

    fn loaded(&mut self, tab: &TabId, url: String) {
        let title = Url::parse(&url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .unwrap_or_else(|| url.clone());

        self.pending.push(EngineEvent::NavigationChanged {
            tab: tab.clone(),
            url,
        });
        self.pending.push(EngineEvent::TitleChanged {
            tab: tab.clone(),
            title,
        });
    }

    fn step(&mut self, tab: &TabId, forward: bool) {
        let Some(view) = self.views.get_mut(tab) else {
            return;
        };

        let target = if forward {
            view.index + 1
        } else {
            match view.index.checked_sub(1) {
                Some(i) => i,
                None => return,
            }
        };

        if let Some(url) = view.urls.get(target).cloned() {
            view.index = target;
            self.loaded(tab, url);
        }
    }
}

impl EngineHost for HeadlessEngine {
    fn create_view(&mut self, tab: &TabId, url: &str) {
        self.views.insert(
            tab.clone(),
            ViewHistory {
                urls: vec![url.to_string()],
                index: 0,
            },
        );
        self.loaded(tab, url.to_string());
    }

    fn destroy_view(&mut self, tab: &TabId) {
        self.views.remove(tab);
        self.pending.retain(|e| e.tab() != tab);
    }

    fn navigate(&mut self, tab: &TabId, url: &str) {
        let Some(view) = self.views.get_mut(tab) else {
            return;
        };

        view.urls.truncate(view.index + 1);
        view.urls.push(url.to_string());
        view.index = view.urls.len() - 1;
        self.loaded(tab, url.to_string());
    }

    fn go_back(&mut self, tab: &TabId) {
        self.step(tab, false);
    }

    fn go_forward(&mut self, tab: &TabId) {
        self.step(tab, true);
    }

    fn reload(&mut self, tab: &TabId) {
        if let Some(url) = self.views.get(tab).and_then(|v| v.current()).map(str::to_string) {
            self.loaded(tab, url);
        }
    }

    fn set_muted(&mut self, _tab: &TabId, _muted: bool) {}

    fn open_dev_tools(&mut self, _tab: &TabId) {}

    /// Headless views have no pixels; the capture is the page address as text.
    fn capture(&mut self, tab: &TabId) -> Option<Vec<u8>> {
        let url = self.views.get(tab)?.current()?;
        Some(format!("{url}\n").into_bytes())
    }

    fn drain_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.pending)
    }
}
