use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::event::{
    self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    Event, KeyEventKind, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
    PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Position, Rect};
use regex::Regex;

use crate::host::{HostHandle, HostReply, HostRequest, HostWorker, LocalHost};
use crate::io::state::{UiState, read_ui_state, write_ui_state};
use crate::io::watcher::LibraryWatcher;
use crate::model::{AppConfig, Color, Location, Project, Tag};
use crate::ops::reorder::apply_reorder;
use crate::ops::search::{SortKey, SortState, filter_and_sort, search_regex};

use super::drag::DragSession;
use super::edit_modal::EditModal;
use super::input;
use super::render;
use super::text_field::TextField;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    Search,
    /// Keyboard drag: the picked-up card follows the cursor
    Move,
    Edit,
    LinkInput,
    /// A folder was picked; waiting for Enter to add it
    ConfirmFolder,
}

/// Screen area of one rendered card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardHit {
    pub project_id: i64,
    pub area: Rect,
    pub name_area: Rect,
}

/// Screen areas inside the edit modal
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModalHit {
    pub area: Rect,
    pub name: Rect,
    pub description: Rect,
    /// Tag input row plus the dropdown below it
    pub combobox: Rect,
    pub suggestions: Vec<Rect>,
    pub attached: Vec<(u32, Rect)>,
    pub save: Rect,
    pub cancel: Rect,
}

/// Where things were drawn last frame, for mouse hit-testing
#[derive(Debug, Clone, Default)]
pub struct HitMap {
    pub cards: Vec<CardHit>,
    pub modal: Option<ModalHit>,
}

impl HitMap {
    pub fn card_at(&self, column: u16, row: u16) -> Option<&CardHit> {
        let pos = Position::new(column, row);
        self.cards.iter().find(|c| c.area.contains(pos))
    }
}

/// Left button went down on a card and has not been released yet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingPress {
    pub project_id: i64,
    pub on_name: bool,
}

/// Main application state
pub struct App {
    /// None until the host has answered the first fetch
    pub projects: Option<Vec<Project>>,
    pub tags: Option<Vec<Tag>>,
    pub search: TextField,
    pub sort: SortState,
    pub mode: Mode,
    pub should_quit: bool,
    /// Iconify the terminal before the next draw
    pub minimize_pending: bool,
    pub theme: Theme,
    /// Index into the displayed list
    pub cursor: usize,
    /// First visible grid row
    pub scroll_row: usize,
    /// Grid columns at the last render
    pub columns: usize,
    pub drag: DragSession,
    pub press: Option<PendingPress>,
    pub modal: Option<EditModal>,
    pub pending_folder: Option<String>,
    pub link_input: TextField,
    /// Swatch the next edit session starts with
    pub swatch: Color,
    pub show_help: bool,
    pub show_key_hints: bool,
    pub hits: HitMap,
    pub host: HostHandle,
}

impl App {
    pub fn new(host: HostHandle, theme: Theme, swatch: Color) -> Self {
        App {
            projects: None,
            tags: None,
            search: TextField::default(),
            sort: SortState::default(),
            mode: Mode::Navigate,
            should_quit: false,
            minimize_pending: false,
            theme,
            cursor: 0,
            scroll_row: 0,
            columns: 1,
            drag: DragSession::default(),
            press: None,
            modal: None,
            pending_folder: None,
            link_input: TextField::default(),
            swatch,
            show_help: false,
            show_key_hints: true,
            hits: HitMap::default(),
            host,
        }
    }

    /// Ask the host for everything shown on screen.
    pub fn reload(&self) {
        self.host.send(HostRequest::FetchProjects);
        self.host.send(HostRequest::FetchTags);
    }

    /// Projects after search and sort, in display order
    pub fn displayed(&self) -> Vec<&Project> {
        let projects = self.projects.as_deref().unwrap_or(&[]);
        filter_and_sort(projects, self.search.text(), self.sort)
    }

    pub fn selected(&self) -> Option<&Project> {
        self.displayed().get(self.cursor).copied()
    }

    pub fn selected_id(&self) -> Option<i64> {
        self.selected().map(|p| p.id)
    }

    pub fn project(&self, id: i64) -> Option<&Project> {
        self.projects.as_ref()?.iter().find(|p| p.id == id)
    }

    pub fn catalog(&self) -> &[Tag] {
        self.tags.as_deref().unwrap_or(&[])
    }

    /// Regex for highlighting search matches in card names
    pub fn search_re(&self) -> Option<Regex> {
        search_regex(self.search.text())
    }

    pub fn clamp_cursor(&mut self) {
        let len = self.displayed().len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    /// Move the cursor by `delta` cards, stopping at either end.
    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.displayed().len();
        if len == 0 {
            self.cursor = 0;
            return;
        }
        let target = self.cursor as isize + delta;
        self.cursor = target.clamp(0, len as isize - 1) as usize;
    }

    /// Put the cursor on a project if it is displayed.
    pub fn focus_project(&mut self, id: i64) {
        if let Some(pos) = self.displayed().iter().position(|p| p.id == id) {
            self.cursor = pos;
        }
    }

    /// The search text changed: the list is re-derived from scratch.
    pub fn search_changed(&mut self) {
        self.cursor = 0;
        self.scroll_row = 0;
    }

    pub fn toggle_sort(&mut self, key: SortKey) {
        let keep = self.selected_id();
        self.sort.toggle(key);
        if let Some(id) = keep {
            self.focus_project(id);
        }
    }

    /// Fold a host reply into the store.
    pub fn apply_reply(&mut self, reply: HostReply) {
        match reply {
            HostReply::Projects(projects) => {
                let keep = self.selected_id();
                self.projects = Some(projects);
                if let Some(id) = keep {
                    self.focus_project(id);
                }
                self.clamp_cursor();
            }
            HostReply::Tags(tags) => self.tags = Some(tags),
            HostReply::Added => self.host.send(HostRequest::FetchProjects),
            HostReply::FolderPicked(Some(path)) => {
                self.host.log(format!("Selected file: {}", path));
                self.pending_folder = Some(path);
                self.mode = Mode::ConfirmFolder;
            }
            HostReply::FolderPicked(None) => self.host.log("No folder selected"),
            HostReply::Minimized => self.minimize_pending = true,
            HostReply::CloseRequested | HostReply::QuitRequested => self.should_quit = true,
            HostReply::Failed { request, error } => {
                tracing::debug!(request = request.label(), %error, "request failed");
                // Local state may have diverged from the host; take the host's word
                if request.is_mutating() {
                    self.reload();
                }
            }
        }
    }

    /// Open the edit modal on a project.
    pub fn open_edit(&mut self, id: i64) {
        let Some(project) = self.project(id) else {
            return;
        };
        self.modal = Some(EditModal::open(project, self.catalog(), self.swatch));
        self.drag.end();
        self.mode = Mode::Edit;
    }

    /// Save the edit session: update the store, close the modal, then tell
    /// the host and refresh the tag catalog.
    pub fn commit_edit(&mut self) {
        let Some(modal) = self.modal.take() else {
            return;
        };
        let project = modal.working_copy();
        self.swatch = modal.tags.swatch;
        self.tags = Some(modal.session_catalog().to_vec());
        if let Some(projects) = &mut self.projects {
            *projects = projects
                .iter()
                .map(|p| if p.id == project.id { project.clone() } else { p.clone() })
                .collect();
        }
        self.mode = Mode::Navigate;
        tracing::info!(id = project.id, name = %project.name, "saving project");
        self.host.send(HostRequest::UpdateProject(project));
        self.host.send(HostRequest::FetchTags);
        self.clamp_cursor();
    }

    /// Drop the edit session without telling the host.
    pub fn cancel_edit(&mut self) {
        if let Some(modal) = self.modal.take() {
            self.swatch = modal.tags.swatch;
        }
        self.mode = Mode::Navigate;
    }

    /// Finish a drag on `target_id`: ask the host to swap, then swap locally.
    pub fn drop_on(&mut self, target_id: i64) {
        let Some(projects) = &self.projects else {
            self.drag.end();
            return;
        };
        let Some(reorder) = self.drag.drop_on(projects, target_id) else {
            return;
        };
        self.host.send(HostRequest::SwapOrder(reorder.swap));
        self.projects = Some(apply_reorder(projects, &reorder));
        self.host.log(format!(
            "Reordered projects: {} <-> {}",
            reorder.dragged_id, reorder.target_id
        ));
        self.focus_project(reorder.dragged_id);
    }

    /// Open a project's folder or link through the host.
    pub fn open_project(&mut self, id: i64) {
        let Some(project) = self.project(id) else {
            return;
        };
        let request = match project.location() {
            Some(Location::Folder(path)) => HostRequest::OpenFolder(path.to_string()),
            Some(Location::Link(url)) => HostRequest::OpenUrl(url.to_string()),
            None => {
                tracing::warn!(id, "project has no location");
                return;
            }
        };
        self.host.send(request);
    }

    pub fn request_folder(&mut self) {
        self.host.send(HostRequest::PickFolder);
    }

    /// Add the picked folder.
    pub fn confirm_folder(&mut self) {
        if let Some(path) = self.pending_folder.take() {
            self.host.log(format!("Adding project: {}", path));
            self.host.send(HostRequest::AddProject(path));
        }
        self.mode = Mode::Navigate;
    }

    pub fn discard_folder(&mut self) {
        self.pending_folder = None;
        self.mode = Mode::Navigate;
    }

    /// Add the typed link, if any.
    pub fn submit_link(&mut self) {
        let url = self.link_input.text().trim().to_string();
        self.link_input.clear();
        self.mode = Mode::Navigate;
        if !url.is_empty() {
            self.host.log(format!("Adding link: {}", url));
            self.host.send(HostRequest::AddProjectLink(url));
        }
    }

    pub fn ui_state(&self) -> UiState {
        UiState {
            sort: self.sort,
            swatch: Some(self.swatch.to_hex()),
        }
    }

    pub fn restore_ui_state(&mut self, state: UiState) {
        self.sort = state.sort;
        if let Some(swatch) = state.swatch.as_deref().and_then(Color::from_hex) {
            self.swatch = swatch;
        }
    }
}

/// Save UI state to .state.json
fn save_ui_state(app: &App, data_dir: &Path) {
    if let Err(e) = write_ui_state(data_dir, &app.ui_state()) {
        tracing::warn!(error = %e, "could not save ui state");
    }
}

/// Run the TUI application
pub fn run(config: &AppConfig, data_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all(data_dir)?;

    let host = LocalHost::new(data_dir, &config.host);
    let (handle, worker) = HostWorker::spawn(host)?;

    let swatch = Color::from_hex(&config.ui.default_tag_color).unwrap_or_default();
    let mut app = App::new(handle, Theme::from_config(&config.ui), swatch);
    app.show_key_hints = config.ui.show_key_hints;
    if let Some(state) = read_ui_state(data_dir) {
        app.restore_ui_state(state);
    }

    let watcher = match LibraryWatcher::start(data_dir) {
        Ok(w) => Some(w),
        Err(e) => {
            tracing::warn!(error = %e, "not watching data directory");
            None
        }
    };

    app.reload();

    // Setup terminal
    let kitty = config.ui.kitty_keyboard.unwrap_or(true);
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, EnableBracketedPaste)?;
    if kitty {
        // Unsupported terminals ignore the request
        let _ = execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        );
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = execute!(io::stdout(), PopKeyboardEnhancementFlags, DisableMouseCapture);
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app, &worker, watcher.as_ref());

    save_ui_state(&app, data_dir);

    // Restore terminal
    if kitty {
        let _ = execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags);
    }
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        DisableMouseCapture
    )?;
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    worker: &HostWorker,
    watcher: Option<&LibraryWatcher>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        for reply in worker.poll() {
            app.apply_reply(reply);
        }
        if watcher.and_then(LibraryWatcher::poll).is_some() {
            tracing::debug!("library changed on disk");
            app.reload();
        }
        if app.should_quit {
            break;
        }
        if std::mem::take(&mut app.minimize_pending)
            && let Err(e) = iconify(terminal.backend_mut())
        {
            tracing::warn!(error = %e, "could not minimize terminal");
        }

        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => input::handle_key(app, key),
                Event::Mouse(mouse) => input::handle_mouse(app, mouse),
                Event::Paste(text) => input::handle_paste(app, &text),
                _ => {}
            }
        }
    }
    Ok(())
}

/// xterm window manipulation: iconify
fn iconify<W: Write>(out: &mut W) -> io::Result<()> {
    out.write_all(b"\x1b[2t")?;
    out.flush()
}

/// Data directory log file used while the TUI owns the terminal
pub fn log_file(data_dir: &Path) -> PathBuf {
    data_dir.join("ztouch.log")
}
