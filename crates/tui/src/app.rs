use std::{cmp, io, thread, time::Duration};

use anyhow::{Context, Result};
use chrono::Local;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use gamescreen_core::{AppConfig, Catalog, GameRecord, ScreenState};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, error, info};
use unicode_width::UnicodeWidthStr;

const MODAL_WIDTH: u16 = 64;
const MODAL_HEIGHT: u16 = 16;

/// Launches a URL in the platform's default handler.
type LinkOpener = fn(&str) -> io::Result<()>;

fn open_in_browser(url: &str) -> io::Result<()> {
    open::that(url)
}

#[derive(Debug, Clone)]
struct Theme {
    primary_fg: Color,
    accent: Color,
    muted: Color,
    selection_bg: Color,
    warning: Color,
    on_accent: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary_fg: Color::White,
            accent: Color::Cyan,
            muted: Color::DarkGray,
            selection_bg: Color::DarkGray,
            warning: Color::Yellow,
            on_accent: Color::Black,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Browse,
    Search,
}

enum AppEvent {
    Input(Event),
    Tick,
}

/// The catalog screen: list, search field and detail modal.
pub struct GameScreenApp {
    catalog: Catalog,
    config: AppConfig,
    state: UiState,
    theme: Theme,
    link_opener: LinkOpener,
}

impl GameScreenApp {
    pub fn new(catalog: Catalog, config: AppConfig) -> Self {
        let mut state = UiState::default();
        state.apply_filter(&catalog);
        Self {
            catalog,
            config,
            state,
            theme: Theme::default(),
            link_opener: open_in_browser,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        self.state.set_status(format!(
            "Loaded {} games from {}",
            self.catalog.len(),
            self.catalog.source()
        ));

        let mut stdout = io::stdout();
        enable_raw_mode().context("failed to enter raw mode")?;
        execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("failed to create terminal")?;
        terminal.hide_cursor()?;
        terminal.clear()?;

        let (event_tx, mut event_rx) = mpsc::channel::<AppEvent>(128);
        spawn_input_thread(event_tx, self.config.tick_rate());

        let result = self.event_loop(&mut terminal, &mut event_rx).await;
        restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        event_rx: &mut mpsc::Receiver<AppEvent>,
    ) -> Result<()> {
        loop {
            terminal.draw(|frame| self.draw(frame))?;
            if self.state.should_quit {
                break;
            }

            match event_rx.recv().await {
                Some(event) => self.process_app_event(event),
                None => break,
            }

            if self.state.should_quit {
                break;
            }
        }
        info!("Screen closed");
        Ok(())
    }

    fn process_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Input(event) => {
                if let Err(err) = self.handle_input(event) {
                    error!(?err, "Input handling failed");
                    self.state.set_status(format!("Error: {err}"));
                }
            }
            AppEvent::Tick => self.handle_tick(),
        }
    }

    fn handle_tick(&mut self) {
        if self.state.mode != Mode::Search || self.state.screen.modal_open() {
            return;
        }
        if !self.state.search_changed_since_report() {
            return;
        }
        self.state.set_status(format!(
            "Search: {} ({} matches)",
            self.state.screen.search_term(),
            self.state.filtered.len()
        ));
        self.state.mark_search_reported();
    }

    fn handle_input(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => self.handle_key(key),
            Event::Key(_) => Ok(()),
            Event::Resize(_, _) => Ok(()),
            Event::Mouse(_) => Ok(()),
            Event::FocusGained | Event::FocusLost | Event::Paste(_) => Ok(()),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            self.state.should_quit = true;
            return Ok(());
        }
        if self.state.screen.modal_open() {
            return self.handle_modal_key(key);
        }
        match self.state.mode {
            Mode::Search => self.handle_search_key(key),
            Mode::Browse => self.handle_browse_key(key),
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                self.state.mode = Mode::Browse;
                self.state.set_status(format!(
                    "{} of {} games match \"{}\"",
                    self.state.filtered.len(),
                    self.catalog.len(),
                    self.state.screen.search_term()
                ));
            }
            KeyCode::Backspace => {
                if self.state.screen.pop_search_char() {
                    self.state.apply_filter(&self.catalog);
                }
            }
            KeyCode::Char('u') if key.modifiers == KeyModifiers::CONTROL => {
                self.state.screen.clear_search();
                self.state.apply_filter(&self.catalog);
                self.state.set_status("Search cleared".to_string());
                self.state.mark_search_reported();
            }
            KeyCode::Char(c) => {
                if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT {
                    self.state.screen.push_search_char(c);
                    self.state.apply_filter(&self.catalog);
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_browse_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('q') if key.modifiers.is_empty() => self.state.should_quit = true,
            KeyCode::Char('j') | KeyCode::Down => self.state.move_cursor(1),
            KeyCode::Char('k') | KeyCode::Up => self.state.move_cursor(-1),
            KeyCode::Char('g') if key.modifiers.is_empty() => self.state.move_to(0),
            KeyCode::Char('G') => self.state.move_to_end(),
            KeyCode::Home => self.state.move_to(0),
            KeyCode::End => self.state.move_to_end(),
            KeyCode::PageDown => self.state.page_down(),
            KeyCode::PageUp => self.state.page_up(),
            KeyCode::Char('/') => {
                self.state.mode = Mode::Search;
                self.state.set_status("Type to search by name".to_string());
                self.state.mark_search_reported();
            }
            KeyCode::Esc => {
                if !self.state.screen.search_term().is_empty() {
                    self.state.screen.clear_search();
                    self.state.apply_filter(&self.catalog);
                    self.state.set_status("Search cleared".to_string());
                }
            }
            KeyCode::Enter => self.open_current_game()?,
            _ => {}
        }
        Ok(())
    }

    fn handle_modal_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('t') | KeyCode::Enter => self.open_trailer(),
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Backspace => {
                let name = self
                    .state
                    .screen
                    .selected_game()
                    .map(|game| game.name.clone())
                    .unwrap_or_default();
                if self.state.screen.dismiss() {
                    self.state.set_status(format!("Closed {name}"));
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn open_current_game(&mut self) -> Result<()> {
        let Some(game) = self.state.current_game().cloned() else {
            self.state.set_status("No game to open".to_string());
            return Ok(());
        };
        let name = game.name.clone();
        self.state.screen.select(game)?;
        self.state.set_status(format!("Viewing {name}"));
        Ok(())
    }

    fn open_trailer(&mut self) {
        let Some(url) = self
            .state
            .screen
            .trailer_link(&self.config.trailer_search_url)
        else {
            return;
        };
        let name = self
            .state
            .screen
            .selected_game()
            .map(|game| game.name.clone())
            .unwrap_or_default();
        match (self.link_opener)(&url) {
            Ok(()) => {
                info!(%url, "Opened trailer search");
                self.state
                    .set_status(format!("Opened trailer search for {name}"));
            }
            Err(err) => {
                error!(?err, %url, "Failed to open trailer search");
                self.state
                    .set_status(format!("Could not open browser: {err}"));
            }
        }
    }

    fn draw(&mut self, frame: &mut Frame) {
        let size = frame.size();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(6),
                Constraint::Length(4),
            ])
            .split(size);

        let body_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(chunks[1]);

        self.render_search(frame, chunks[0]);
        self.render_game_list(frame, body_chunks[0]);
        self.render_game_info(frame, body_chunks[1]);
        self.render_status(frame, chunks[2]);
        self.render_modal(frame);
    }

    fn render_search(&self, frame: &mut Frame, area: Rect) {
        let active = self.state.mode == Mode::Search && !self.state.screen.modal_open();
        let border_style = if active {
            Style::default().fg(self.theme.accent)
        } else {
            Style::default().fg(self.theme.muted)
        };
        let term = self.state.screen.search_term();
        let content = if term.is_empty() && !active {
            Line::from(Span::styled(
                "Press / to search by name",
                Style::default().fg(self.theme.muted),
            ))
        } else {
            Line::from(vec![
                Span::styled("> ", Style::default().fg(self.theme.accent)),
                Span::raw(term.to_string()),
            ])
        };
        let paragraph = Paragraph::new(content).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title("Search"),
        );
        frame.render_widget(paragraph, area);

        if active {
            frame.set_cursor(search_cursor_x(area, term), area.y + 1);
        }
    }

    fn render_game_list(&mut self, frame: &mut Frame, area: Rect) {
        self.state.list_height = area.height.saturating_sub(2) as usize;
        self.state.clamp_cursor();
        self.state.ensure_cursor_visible();

        let title = format!(
            "Games ({}/{})",
            self.state.filtered.len(),
            self.catalog.len()
        );
        let block = Block::default().borders(Borders::ALL).title(title);

        if self.state.filtered.is_empty() {
            let message = format!("No games match \"{}\"", self.state.screen.search_term());
            let paragraph = Paragraph::new(Span::styled(
                message,
                Style::default().fg(self.theme.warning),
            ))
            .block(block)
            .wrap(Wrap { trim: true });
            frame.render_widget(paragraph, area);
            return;
        }

        let mut list_state = ListState::default();
        let games = self.state.visible_games(self.state.list_height);
        let selected = self
            .state
            .cursor
            .saturating_sub(self.state.offset)
            .min(games.len().saturating_sub(1));
        list_state.select(Some(selected));

        let items: Vec<ListItem> = games
            .iter()
            .enumerate()
            .map(|(idx, game)| {
                let is_selected = self.state.cursor == self.state.offset + idx;
                let marker = if is_selected {
                    Span::styled(
                        "▶ ",
                        Style::default()
                            .fg(self.theme.accent)
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::raw("  ")
                };
                let mut line = vec![
                    marker,
                    Span::styled(
                        game.name.clone(),
                        Style::default()
                            .fg(self.theme.primary_fg)
                            .add_modifier(Modifier::BOLD),
                    ),
                ];
                if let Some(subtitle) = game.subtitle() {
                    line.push(Span::styled(
                        format!(" · {subtitle}"),
                        Style::default().fg(self.theme.muted),
                    ));
                }
                ListItem::new(Line::from(line))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().bg(self.theme.selection_bg));
        frame.render_stateful_widget(list, area, &mut list_state);
    }

    fn render_game_info(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title("Details");
        match self.state.current_game() {
            Some(game) => {
                let mut lines = detail_lines(game, &self.theme);
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    "Enter to open",
                    Style::default().fg(self.theme.muted),
                )));
                let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
                frame.render_widget(paragraph, area);
            }
            None => {
                let paragraph = Paragraph::new("No game selected").block(block);
                frame.render_widget(paragraph, area);
            }
        }
    }

    fn render_modal(&self, frame: &mut Frame) {
        let Some(game) = self.state.screen.selected_game() else {
            return;
        };
        let frame_area = frame.size();
        let width = cmp::max(
            cmp::min(MODAL_WIDTH, frame_area.width.saturating_sub(4)),
            24,
        );
        let height = cmp::min(MODAL_HEIGHT, frame_area.height.saturating_sub(2));
        let area = centered_rect(width, height, frame_area);
        frame.render_widget(Clear, area);

        let mut lines = detail_lines(game, &self.theme);
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(
                " Watch trailer ",
                Style::default()
                    .fg(self.theme.on_accent)
                    .bg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
        ]));
        if let Some(url) = self
            .state
            .screen
            .trailer_link(&self.config.trailer_search_url)
        {
            lines.push(Line::from(Span::styled(
                url,
                Style::default().fg(self.theme.muted),
            )));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("t", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" trailer  "),
            Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" close"),
        ]));

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.theme.accent))
                    .title(game.name.clone()),
            )
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title("Status");
        let loaded_at = self
            .catalog
            .loaded_at()
            .with_timezone(&Local)
            .format("%H:%M");
        let secondary = format!(
            "{} • loaded {}  (/ search, Enter open, q quit)",
            self.catalog.source(),
            loaded_at
        );
        let paragraph = Paragraph::new(vec![
            Line::from(self.state.status.clone()),
            Line::from(Span::styled(
                secondary,
                Style::default().fg(self.theme.muted),
            )),
        ])
        .block(block)
        .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }
}

fn detail_lines(game: &GameRecord, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        game.name.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    let fields = [
        ("Platform", &game.platform),
        ("Genre", &game.genre),
        ("Developer", &game.developer),
        ("Released", &game.release_date),
        ("Rated", &game.rating),
    ];
    for (label, value) in fields {
        if !value.trim().is_empty() {
            lines.push(Line::from(format!("{label}: {value}")));
        }
    }
    lines.push(Line::from(vec![
        Span::raw("Score: "),
        Span::styled(game.rating_stars(), Style::default().fg(theme.warning)),
        Span::raw(format!(" {:.1}", game.clamped_score())),
    ]));
    if let Some(image) = &game.image {
        lines.push(Line::from(Span::styled(
            format!("Cover: {image}"),
            Style::default().fg(theme.muted),
        )));
    }
    lines
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor()?;
    Ok(())
}

fn spawn_input_thread(sender: mpsc::Sender<AppEvent>, tick_rate: Duration) {
    thread::spawn(move || loop {
        match event::poll(tick_rate) {
            Ok(true) => match event::read() {
                Ok(evt) => {
                    if sender.blocking_send(AppEvent::Input(evt)).is_err() {
                        break;
                    }
                }
                Err(err) => {
                    error!(?err, "Failed to read terminal event");
                    break;
                }
            },
            Ok(false) => {
                if sender.blocking_send(AppEvent::Tick).is_err() {
                    break;
                }
            }
            Err(err) => {
                error!(?err, "Failed to poll terminal events");
                break;
            }
        }
    });
}

struct UiState {
    screen: ScreenState,
    filtered: Vec<GameRecord>,
    cursor: usize,
    offset: usize,
    list_height: usize,
    status: String,
    mode: Mode,
    should_quit: bool,
    search_report: Option<(String, usize)>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            screen: ScreenState::new(),
            filtered: Vec::new(),
            cursor: 0,
            offset: 0,
            list_height: 1,
            status: "Ready".to_string(),
            mode: Mode::Browse,
            should_quit: false,
            search_report: None,
        }
    }
}

impl UiState {
    fn apply_filter(&mut self, catalog: &Catalog) {
        self.filtered = self
            .screen
            .visible_games(catalog.games())
            .into_iter()
            .cloned()
            .collect();
        debug!(
            term = %self.screen.search_term(),
            matches = self.filtered.len(),
            "Filter applied"
        );
        self.cursor = 0;
        self.offset = 0;
    }

    fn move_cursor(&mut self, delta: isize) {
        if self.filtered.is_empty() {
            return;
        }
        let len = self.filtered.len() as isize;
        let idx = (self.cursor as isize + delta).clamp(0, len - 1);
        self.cursor = idx as usize;
        self.ensure_cursor_visible();
    }

    fn move_to(&mut self, index: usize) {
        if self.filtered.is_empty() {
            return;
        }
        self.cursor = index.min(self.filtered.len() - 1);
        self.ensure_cursor_visible();
    }

    fn move_to_end(&mut self) {
        if self.filtered.is_empty() {
            return;
        }
        self.cursor = self.filtered.len() - 1;
        self.ensure_cursor_visible();
    }

    fn page_down(&mut self) {
        if self.filtered.is_empty() || self.list_height == 0 {
            return;
        }
        let delta = self.list_height.min(self.filtered.len());
        self.move_cursor(delta as isize);
    }

    fn page_up(&mut self) {
        if self.filtered.is_empty() || self.list_height == 0 {
            return;
        }
        let delta = self.list_height.min(self.filtered.len());
        self.move_cursor(-(delta as isize));
    }

    fn visible_games(&self, height: usize) -> &[GameRecord] {
        if self.filtered.is_empty() {
            return &[];
        }
        let end = (self.offset + height).min(self.filtered.len());
        &self.filtered[self.offset..end]
    }

    fn current_game(&self) -> Option<&GameRecord> {
        self.filtered.get(self.cursor)
    }

    fn set_status(&mut self, message: String) {
        self.status = message;
    }

    /// Record the term and match count the status line currently reflects.
    fn mark_search_reported(&mut self) {
        self.search_report = Some((self.screen.search_term().to_string(), self.filtered.len()));
    }

    fn search_changed_since_report(&self) -> bool {
        match &self.search_report {
            Some((term, matches)) => {
                term != self.screen.search_term() || *matches != self.filtered.len()
            }
            None => true,
        }
    }

    fn clamp_cursor(&mut self) {
        if self.filtered.is_empty() {
            self.cursor = 0;
            self.offset = 0;
        } else if self.cursor >= self.filtered.len() {
            self.cursor = self.filtered.len() - 1;
        }
    }

    fn ensure_cursor_visible(&mut self) {
        if self.filtered.is_empty() || self.list_height == 0 {
            self.offset = 0;
            return;
        }
        let height = self.list_height;
        let max_offset = self.filtered.len().saturating_sub(height);

        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + height {
            self.offset = self.cursor + 1 - height;
        }

        if self.offset > max_offset {
            self.offset = max_offset;
        }
    }
}

/// Column after `> <term>` inside the bordered search box, kept inside the border.
fn search_cursor_x(area: Rect, term: &str) -> u16 {
    let width = u16::try_from(UnicodeWidthStr::width(term)).unwrap_or(u16::MAX);
    let max_x = area.x.saturating_add(area.width.saturating_sub(2));
    area.x.saturating_add(3).saturating_add(width).min(max_x)
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    fn sample_app() -> GameScreenApp {
        let catalog = Catalog::from_records(
            vec![
                GameRecord::named(1, "Zelda"),
                GameRecord::named(2, "Mario"),
                GameRecord::named(3, "Metroid"),
            ],
            "test catalog",
        );
        let mut app = GameScreenApp::new(catalog, AppConfig::default());
        app.link_opener = accept_link;
        app
    }

    fn accept_link(_url: &str) -> io::Result<()> {
        Ok(())
    }

    fn reject_link(_url: &str) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::NotFound, "no handler"))
    }

    fn press(app: &mut GameScreenApp, code: KeyCode) {
        press_with(app, code, KeyModifiers::NONE);
    }

    fn press_with(app: &mut GameScreenApp, code: KeyCode, modifiers: KeyModifiers) {
        app.handle_input(Event::Key(KeyEvent::new(code, modifiers)))
            .expect("key handling failed");
    }

    fn type_text(app: &mut GameScreenApp, text: &str) {
        for ch in text.chars() {
            press(app, KeyCode::Char(ch));
        }
    }

    fn visible_names(app: &GameScreenApp) -> Vec<&str> {
        app.state
            .filtered
            .iter()
            .map(|game| game.name.as_str())
            .collect()
    }

    fn screen_text(app: &mut GameScreenApp) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).expect("test terminal");
        terminal
            .draw(|frame| app.draw(frame))
            .expect("draw failed");
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn starts_with_whole_catalog_sorted() {
        let app = sample_app();
        assert_eq!(visible_names(&app), vec!["Mario", "Metroid", "Zelda"]);
        assert_eq!(app.state.mode, Mode::Browse);
        assert!(!app.state.screen.modal_open());
    }

    #[test]
    fn typing_filters_the_list() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.state.mode, Mode::Search);

        type_text(&mut app, "ME");
        assert_eq!(app.state.screen.search_term(), "ME");
        assert_eq!(visible_names(&app), vec!["Metroid"]);

        press(&mut app, KeyCode::Backspace);
        assert_eq!(visible_names(&app), vec!["Mario", "Metroid"]);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state.mode, Mode::Browse);
        assert_eq!(app.state.screen.search_term(), "M");
    }

    #[test]
    fn ctrl_u_clears_search() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "zel");
        assert_eq!(visible_names(&app), vec!["Zelda"]);
        press_with(&mut app, KeyCode::Char('u'), KeyModifiers::CONTROL);
        assert_eq!(app.state.screen.search_term(), "");
        assert_eq!(visible_names(&app).len(), 3);
    }

    #[test]
    fn q_is_text_while_searching() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Char('/'));
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.state.should_quit);
        assert_eq!(app.state.screen.search_term(), "q");

        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.state.should_quit);
    }

    #[test]
    fn enter_opens_modal_and_escape_dismisses() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Enter);

        let selected = app.state.screen.selected_game().map(|g| g.name.clone());
        assert_eq!(selected.as_deref(), Some("Zelda"));
        assert!(app.state.screen.modal_open());

        press(&mut app, KeyCode::Esc);
        assert!(!app.state.screen.modal_open());
        assert!(app.state.screen.selected_game().is_none());
        assert_eq!(app.state.status, "Closed Zelda");
    }

    #[test]
    fn list_keys_are_ignored_while_modal_is_open() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.state.cursor, 0);
        assert_eq!(app.state.mode, Mode::Browse);
        assert_eq!(
            app.state.screen.selected_game().map(|g| g.name.as_str()),
            Some("Mario")
        );
    }

    #[test]
    fn enter_with_no_matches_keeps_modal_closed() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "halo");
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Enter);
        assert!(app.state.filtered.is_empty());
        assert!(!app.state.screen.modal_open());
        assert_eq!(app.state.status, "No game to open");
    }

    #[test]
    fn trailer_key_reports_outcome() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.state.status, "Opened trailer search for Mario");
        assert!(app.state.screen.modal_open());

        let mut app = sample_app();
        app.link_opener = reject_link;
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('t'));
        assert!(app.state.status.starts_with("Could not open browser"));
        assert!(app.state.screen.modal_open());
    }

    #[test]
    fn cursor_navigation_stays_in_bounds() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Up);
        assert_eq!(app.state.cursor, 0);
        press(&mut app, KeyCode::Char('G'));
        assert_eq!(app.state.cursor, 2);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.state.cursor, 2);
        press(&mut app, KeyCode::Home);
        assert_eq!(app.state.cursor, 0);
    }

    #[test]
    fn tick_keeps_hint_until_search_changes() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Char('/'));
        app.process_app_event(AppEvent::Tick);
        assert_eq!(app.state.status, "Type to search by name");

        press(&mut app, KeyCode::Char('m'));
        app.process_app_event(AppEvent::Tick);
        assert_eq!(app.state.status, "Search: m (2 matches)");

        press_with(&mut app, KeyCode::Char('u'), KeyModifiers::CONTROL);
        app.process_app_event(AppEvent::Tick);
        app.process_app_event(AppEvent::Tick);
        assert_eq!(app.state.status, "Search cleared");
    }

    #[test]
    fn search_cursor_uses_display_width_and_stays_in_box() {
        let area = Rect::new(2, 0, 40, 3);
        assert_eq!(search_cursor_x(area, ""), 5);
        assert_eq!(search_cursor_x(area, "abc"), 8);
        assert_eq!(search_cursor_x(area, "ゼルダ"), 11);
        assert_eq!(search_cursor_x(area, &"x".repeat(70_000)), 40);

        let edge = Rect::new(u16::MAX - 10, 0, 10, 3);
        assert_eq!(search_cursor_x(edge, "long term"), u16::MAX - 2);
    }

    #[test]
    fn renders_list_and_modal() {
        let mut app = sample_app();
        let text = screen_text(&mut app);
        assert!(text.contains("Metroid"));
        assert!(text.contains("Games (3/3)"));
        assert!(!text.contains("Watch trailer"));

        press(&mut app, KeyCode::Enter);
        let text = screen_text(&mut app);
        assert!(text.contains("Watch trailer"));
        assert!(text.contains("Mario%20trailer"));
    }

    #[test]
    fn renders_placeholder_for_empty_results() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "zzz");
        let text = screen_text(&mut app);
        assert!(text.contains("No games match \"zzz\""));
    }
}
