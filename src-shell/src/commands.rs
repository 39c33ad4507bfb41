//! Shell command dispatch

use anyhow::{anyhow, bail, Context, Result};

use tabkeep_core::{Browser, TabId};

use crate::console::ConsoleUi;

pub enum Flow {
    Continue,
    Quit,
}

const HELP: &str = "\
address bar input          resolve and run (note, mute, screenshot, timer [min], url, search)
:tabs                      list tabs
:open [url]                open a tab (home if no url)
:close [n]                 close tab n (1-based, default active)
:select n                  activate tab n
:dup [n]                   duplicate tab n
:move n to                 move tab n to position `to`
:note text                 set the active tab's note
:back :forward :reload :home
:devtools                  open or raise the inspector
:history [query]           newest-first history matches
:bookmark | :unbookmark    bookmark the active tab / remove it
:bookmarks                 list bookmarks
:sethome url | :engine template
:theme | :fullscreen
:download name             pick a save path for a download
:quit";

pub fn run(browser: &mut Browser, ui: &mut ConsoleUi, line: &str) -> Result<Flow> {
    let line = line.trim();
    let Some(command) = line.strip_prefix(':') else {
        return submit(browser, ui, line);
    };

    let (name, rest) = match command.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (command, ""),
    };

    match name {
        "help" => println!("{HELP}"),
        "quit" | "q" => return Ok(Flow::Quit),
        "tabs" => print_tabs(browser),
        "open" => {
            let url = (!rest.is_empty()).then_some(rest);
            browser.tabs_mut().open_tab(url);
        }
        "close" => {
            let id = tab_at(browser, rest)?;
            browser.tabs_mut().close_tab(&id)?;
        }
        "select" => {
            let id = tab_at(browser, rest)?;
            browser.tabs_mut().select_tab(&id)?;
        }
        "dup" => {
            let id = tab_at(browser, rest)?;
            browser.tabs_mut().duplicate_tab(&id)?;
        }
        "move" => {
            let (from, to) = rest
                .split_once(char::is_whitespace)
                .ok_or_else(|| anyhow!("usage: :move n to"))?;
            let id = tab_at(browser, from)?;
            let to = position(to.trim())?;
            browser.tabs_mut().move_tab(&id, to)?;
        }
        "note" => {
            let id = active(browser)?;
            browser.tabs_mut().set_note(&id, rest)?;
        }
        "back" => {
            let id = active(browser)?;
            browser.tabs_mut().go_back(&id)?;
        }
        "forward" => {
            let id = active(browser)?;
            browser.tabs_mut().go_forward(&id)?;
        }
        "reload" => {
            let id = active(browser)?;
            browser.tabs_mut().reload(&id)?;
        }
        "home" => {
            let id = active(browser)?;
            browser.tabs_mut().go_home(&id)?;
        }
        "devtools" => {
            let id = active(browser)?;
            browser.tabs_mut().open_dev_tools(&id)?;
        }
        "history" => {
            for entry in browser.tabs().history().search(rest).take(20) {
                println!("{}  {}", entry.url, entry.title);
            }
        }
        "bookmark" => {
            let tab = browser
                .tabs()
                .active_tab()
                .ok_or_else(|| anyhow!("no active tab"))?;
            let (title, url) = (tab.display_title().to_string(), tab.url.clone());
            browser.add_bookmark(&title, &url)?;
        }
        "unbookmark" => {
            let tab = browser
                .tabs()
                .active_tab()
                .ok_or_else(|| anyhow!("no active tab"))?;
            let url = tab.url.clone();
            if !browser.remove_bookmark(&url)? {
                println!("not bookmarked: {url}");
            }
        }
        "bookmarks" => {
            for bookmark in browser.bookmarks() {
                println!("{}  {}", bookmark.url, bookmark.title);
            }
        }
        "sethome" => {
            if rest.is_empty() {
                bail!("usage: :sethome url");
            }
            browser.set_home_url(rest.to_string())?;
        }
        "engine" => {
            if !rest.contains("%s") {
                bail!("search template must contain %s");
            }
            browser.set_search_engine(rest.to_string())?;
        }
        "theme" => {
            let theme = browser.toggle_theme();
            println!("stylesheet: {}", theme.stylesheet());
        }
        "fullscreen" => {
            let fullscreen = !browser.preferences().fullscreen;
            browser.set_fullscreen(fullscreen);
        }
        "download" => match browser.handle_download(rest, ui) {
            Some(path) => println!("saving to {}", path.display()),
            None => println!("download cancelled"),
        },
        other => bail!("unknown command :{other} (try :help)"),
    }

    browser.pump_engine();
    Ok(Flow::Continue)
}

fn submit(browser: &mut Browser, ui: &mut ConsoleUi, line: &str) -> Result<Flow> {
    let lowered = line.to_lowercase();
    if let Some(arg) = lowered.strip_prefix("timer") {
        ui.focus_minutes = arg.trim().parse().ok();
    }

    let action = browser.submit(line, ui)?;
    tracing::debug!(?action, "Address bar input handled");
    Ok(Flow::Continue)
}

pub fn print_tabs(browser: &Browser) {
    let active = browser.tabs().active_index();
    for (i, tab) in browser.tabs().tabs().iter().enumerate() {
        let marker = if Some(i) == active { '*' } else { ' ' };
        let mut flags = String::new();
        if tab.muted {
            flags.push_str(" [muted]");
        }
        if !tab.note_text.is_empty() {
            flags.push_str(" [note]");
        }
        println!("{marker}{:>3} {}  {}{flags}", i + 1, tab.display_title(), tab.url);
    }
}

fn active(browser: &Browser) -> Result<TabId> {
    browser
        .tabs()
        .active_tab()
        .map(|t| t.id.clone())
        .ok_or_else(|| anyhow!("no active tab"))
}

/// 1-based tab position; blank means the active tab
fn tab_at(browser: &Browser, arg: &str) -> Result<TabId> {
    if arg.is_empty() {
        return active(browser);
    }

    let index = position(arg)?;
    browser
        .tabs()
        .tabs()
        .get(index)
        .map(|t| t.id.clone())
        .ok_or_else(|| anyhow!("no tab at position {arg}"))
}

fn position(arg: &str) -> Result<usize> {
    let n: usize = arg
        .parse()
        .with_context(|| format!("not a tab position: {arg}"))?;
    n.checked_sub(1)
        .ok_or_else(|| anyhow!("positions start at 1"))
}
