use std::{cmp, io, thread, time::Duration};

use anyhow::{Context, Result};
use chrono::Local;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use dealshelf_core::{
    api::{DealsClient, FetchError},
    catalog::{Catalog, CatalogMode, EmptyReason, FetchOutcome, FetchTicket, ViewState},
    models::{format_price, GameRecord},
    stores,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};
use tokio::{spawn, sync::mpsc};
use tracing::{debug, error, info};

use crate::theme::Theme;

const TICK_RATE: Duration = Duration::from_millis(250);
const MAX_QUERY_LEN: usize = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Browse,
    Search,
}

/// Single-line text input for the title search.
#[derive(Debug, Clone, Default)]
struct SearchPrompt {
    input: String,
    // Cursor position in chars, not bytes.
    cursor: usize,
}

impl SearchPrompt {
    fn char_len(&self) -> usize {
        self.input.chars().count()
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.input
            .char_indices()
            .nth(char_idx)
            .map(|(idx, _)| idx)
            .unwrap_or(self.input.len())
    }

    fn move_cursor(&mut self, delta: isize) {
        let len = self.char_len() as isize;
        let next = (self.cursor as isize + delta).clamp(0, len);
        self.cursor = next as usize;
    }

    fn move_home(&mut self) {
        self.cursor = 0;
    }

    fn move_end(&mut self) {
        self.cursor = self.char_len();
    }

    fn insert(&mut self, ch: char) {
        if self.char_len() >= MAX_QUERY_LEN || ch.is_control() {
            return;
        }
        let idx = self.byte_index(self.cursor);
        self.input.insert(idx, ch);
        self.cursor += 1;
    }

    fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let idx = self.byte_index(self.cursor);
        self.input.remove(idx);
    }

    fn delete(&mut self) {
        if self.cursor < self.char_len() {
            let idx = self.byte_index(self.cursor);
            self.input.remove(idx);
        }
    }

    fn clear(&mut self) {
        self.input.clear();
        self.cursor = 0;
    }

    fn value(&self) -> &str {
        self.input.trim()
    }
}

enum AppEvent {
    Input(Event),
    Tick,
    Fetched {
        ticket: FetchTicket,
        result: Result<Vec<GameRecord>, FetchError>,
    },
}

/// Terminal storefront driving a [`Catalog`].
pub struct DealshelfApp {
    catalog: Catalog,
    client: DealsClient,
    state: UiState,
    event_tx: Option<mpsc::Sender<AppEvent>>,
    theme: Theme,
}

impl DealshelfApp {
    pub fn new(catalog: Catalog, client: DealsClient) -> Self {
        Self {
            catalog,
            client,
            state: UiState::default(),
            event_tx: None,
            theme: Theme::default(),
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut stdout = io::stdout();
        enable_raw_mode().context("failed to enter raw mode")?;
        execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("failed to create terminal")?;
        terminal.hide_cursor()?;
        terminal.clear()?;

        let (event_tx, mut event_rx) = mpsc::channel::<AppEvent>(128);
        spawn_input_thread(event_tx.clone());
        self.event_tx = Some(event_tx);

        let ticket = self.catalog.begin_browse();
        self.start_fetch(ticket);

        loop {
            terminal.draw(|frame| self.draw(frame))?;
            if self.state.should_quit {
                break;
            }

            let maybe_event = event_rx.recv().await;
            if !self.process_app_event(maybe_event) {
                break;
            }

            if self.state.should_quit {
                break;
            }
        }

        restore_terminal(&mut terminal)?;
        self.event_tx = None;
        Ok(())
    }

    fn start_fetch(&mut self, ticket: FetchTicket) {
        let Some(sender) = self.event_tx.clone() else {
            self.state
                .set_status("Internal error: event channel unavailable".to_string());
            error!("event_channel_missing");
            return;
        };

        let message = match ticket.target() {
            CatalogMode::Browse => "Loading deals…".to_string(),
            CatalogMode::Search { query } => format!("Searching for \"{query}\"…"),
        };
        self.state.set_status(message);
        info!(generation = ticket.generation, endpoint = ticket.request.path(), "Starting fetch");

        let client = self.client.clone();
        spawn(async move {
            let result = client.fetch(&ticket.request).await;
            let _ = sender.send(AppEvent::Fetched { ticket, result }).await;
        });
    }

    fn process_app_event(&mut self, maybe_event: Option<AppEvent>) -> bool {
        match maybe_event {
            Some(AppEvent::Input(event)) => {
                if let Err(err) = self.handle_input(event) {
                    self.state.set_status(format!("Error: {err}"));
                }
                true
            }
            Some(AppEvent::Tick) => true,
            Some(AppEvent::Fetched { ticket, result }) => {
                self.handle_fetched(ticket, result);
                true
            }
            None => false,
        }
    }

    fn handle_fetched(&mut self, ticket: FetchTicket, result: Result<Vec<GameRecord>, FetchError>) {
        match self.catalog.apply(&ticket, result) {
            FetchOutcome::Loaded { total } => {
                self.state.reset_cursor();
                let message = match self.catalog.mode() {
                    CatalogMode::Browse => format!("Loaded {total} deals"),
                    CatalogMode::Search { query } if total == 0 => {
                        format!("No games found for \"{query}\"")
                    }
                    CatalogMode::Search { query } => {
                        format!("Found {total} games for \"{query}\"")
                    }
                };
                self.state.set_status(message);
            }
            FetchOutcome::Failed(message) => {
                error!(error = %message, "Fetch failed");
                self.state
                    .set_status(format!("Failed to load games: {message}"));
            }
            FetchOutcome::Stale => {
                debug!(generation = ticket.generation, "Ignored stale fetch result");
            }
        }
    }

    fn handle_input(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Key(key) => {
                if self.state.detail.is_some() {
                    self.handle_detail_key(key);
                    return Ok(());
                }
                match self.state.mode {
                    Mode::Search => self.handle_search_key(key),
                    Mode::Browse => self.handle_browse_key(key),
                }
            }
            _ => Ok(()),
        }
    }

    fn handle_detail_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.state.detail = None;
            }
            _ => {}
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> Result<()> {
        let prompt = &mut self.state.prompt;
        match key.code {
            KeyCode::Esc => {
                self.state.mode = Mode::Browse;
                self.state.set_status("Search cancelled".to_string());
            }
            KeyCode::Enter => {
                self.state.mode = Mode::Browse;
                let query = prompt.value().to_string();
                let ticket = self.catalog.submit_search(&query);
                if query.is_empty() {
                    self.state.reset_cursor();
                }
                self.start_fetch(ticket);
            }
            KeyCode::Left => prompt.move_cursor(-1),
            KeyCode::Right => prompt.move_cursor(1),
            KeyCode::Home => prompt.move_home(),
            KeyCode::End => prompt.move_end(),
            KeyCode::Backspace => prompt.backspace(),
            KeyCode::Delete => prompt.delete(),
            KeyCode::Char('u') if key.modifiers == KeyModifiers::CONTROL => prompt.clear(),
            KeyCode::Char(c) => {
                if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT {
                    prompt.insert(c);
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_browse_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('q') if key.modifiers.is_empty() => self.state.should_quit = true,
            KeyCode::Char('c') if key.modifiers == KeyModifiers::CONTROL => {
                self.state.should_quit = true
            }
            KeyCode::Char('j') | KeyCode::Down => self.move_down(1),
            KeyCode::Char('k') | KeyCode::Up => {
                self.state.move_cursor(-1, self.catalog.visible_count())
            }
            KeyCode::Char('g') if key.modifiers.is_empty() => {
                self.state.move_to(0, self.catalog.visible_count())
            }
            KeyCode::Char('G') => {
                let len = self.catalog.visible_count();
                self.state.move_to(len.saturating_sub(1), len);
            }
            KeyCode::Home => self.state.move_to(0, self.catalog.visible_count()),
            KeyCode::End => {
                let len = self.catalog.visible_count();
                self.state.move_to(len.saturating_sub(1), len);
            }
            KeyCode::PageDown => {
                let delta = self.state.list_height.max(1);
                self.move_down(delta);
            }
            KeyCode::PageUp => {
                let delta = self.state.list_height.max(1) as isize;
                self.state.move_cursor(-delta, self.catalog.visible_count());
            }
            KeyCode::Char('/') => {
                self.state.mode = Mode::Search;
                if let CatalogMode::Search { query } = self.catalog.mode() {
                    if self.state.prompt.value().is_empty() {
                        self.state.prompt.input = query.clone();
                    }
                }
                self.state.prompt.move_end();
                self.state
                    .set_status("Type a title and press Enter (empty shows all deals)".to_string());
            }
            KeyCode::Enter => self.open_detail(),
            KeyCode::Char('f') if key.modifiers.is_empty() => self.cycle_store(true),
            KeyCode::Char('F') => self.cycle_store(false),
            KeyCode::Char('s') if key.modifiers.is_empty() => self.cycle_sort(true),
            KeyCode::Char('S') => self.cycle_sort(false),
            KeyCode::Char('m') if key.modifiers.is_empty() => self.load_more(),
            KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                let ticket = self.catalog.refresh();
                self.start_fetch(ticket);
            }
            KeyCode::Char('r') if key.modifiers.is_empty() => {
                self.state.prompt.clear();
                self.state.reset_cursor();
                let ticket = self.catalog.reset();
                self.start_fetch(ticket);
            }
            _ => {}
        }
        Ok(())
    }

    /// Moving past the last revealed row reveals the next page.
    fn move_down(&mut self, delta: usize) {
        let len = self.catalog.visible_count();
        if self.state.cursor + delta >= len && self.catalog.load_more() {
            self.announce_page();
        }
        self.state
            .move_cursor(delta as isize, self.catalog.visible_count());
    }

    fn load_more(&mut self) {
        if self.catalog.load_more() {
            self.announce_page();
        } else {
            self.state.set_status("All games are shown".to_string());
        }
    }

    fn announce_page(&mut self) {
        if let Some(summary) = self.catalog.summary() {
            self.state.set_status(summary);
        }
    }

    fn cycle_store(&mut self, forward: bool) {
        self.catalog.cycle_store_filter(forward);
        self.state.reset_cursor();
        self.state.set_status(format!(
            "Store filter: {}",
            self.catalog.store_filter().label()
        ));
    }

    fn cycle_sort(&mut self, forward: bool) {
        self.catalog.cycle_sort_mode(forward);
        self.state.reset_cursor();
        self.state
            .set_status(format!("Sort: {}", self.catalog.sort_mode().label()));
    }

    fn open_detail(&mut self) {
        let Some(game) = self.catalog.visible().get(self.state.cursor) else {
            self.state.set_status("No game selected".to_string());
            return;
        };
        debug!(id = %game.id, "Opening detail view");
        self.state.detail = Some(game.id.clone());
    }

    fn current_game(&self) -> Option<&GameRecord> {
        self.catalog.visible().get(self.state.cursor)
    }

    fn draw(&mut self, frame: &mut Frame) {
        let size = frame.size();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Length(5),
            ])
            .split(size);

        let body_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(chunks[1]);

        self.render_header(frame, chunks[0]);
        self.render_game_list(frame, body_chunks[0]);
        self.render_game_card(frame, body_chunks[1]);
        self.render_status(frame, chunks[2]);

        if self.state.mode == Mode::Search {
            self.render_search_prompt(frame);
        }
        if let Some(id) = self.state.detail.clone() {
            self.render_detail_modal(frame, &id);
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let source = match self.catalog.mode() {
            CatalogMode::Browse => "Current deals".to_string(),
            CatalogMode::Search { query } => format!("Search: \"{query}\""),
        };
        let mut spans = vec![
            Span::styled(
                "dealshelf",
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  ·  ", Style::default().fg(self.theme.muted)),
            Span::raw(source),
            Span::styled("  ·  ", Style::default().fg(self.theme.muted)),
            Span::raw(format!("Store: {}", self.catalog.store_filter().label())),
            Span::styled("  ·  ", Style::default().fg(self.theme.muted)),
            Span::raw(format!("Sort: {}", self.catalog.sort_mode().label())),
        ];
        if let Some(fetched) = self.catalog.fetched_at() {
            spans.push(Span::styled(
                format!("  ·  Updated {}", fetched.with_timezone(&Local).format("%H:%M")),
                Style::default().fg(self.theme.muted),
            ));
        }
        let header = Paragraph::new(Line::from(spans))
            .block(Block::default().borders(Borders::ALL))
            .style(Style::default().bg(self.theme.primary_bg));
        frame.render_widget(header, area);
    }

    fn render_game_list(&mut self, frame: &mut Frame, area: Rect) {
        let len = self.catalog.visible_count();
        self.state.list_height = area.height.saturating_sub(2) as usize;
        self.state.clamp_cursor(len);
        self.state.ensure_cursor_visible(len);

        let title = match self.catalog.summary() {
            Some(summary) if self.catalog.view_state() == ViewState::Results => {
                format!("Games · {summary}")
            }
            _ => "Games".to_string(),
        };
        let block = Block::default().borders(Borders::ALL).title(title);

        if len == 0 {
            let (message, color) = match self.catalog.view_state() {
                ViewState::Loading => ("Loading games…".to_string(), self.theme.muted),
                ViewState::Error(message) => (
                    format!("Could not load games.\n\n{message}\n\nCtrl-r retries."),
                    self.theme.danger,
                ),
                ViewState::Empty(EmptyReason::NotLoaded) => {
                    ("No games loaded yet".to_string(), self.theme.muted)
                }
                ViewState::Empty(EmptyReason::NoMatches) => (
                    "No games found. Try another title or press r to reset.".to_string(),
                    self.theme.warning,
                ),
                ViewState::Empty(EmptyReason::FilteredOut) => (
                    "No games from this store. Press f to change the store filter.".to_string(),
                    self.theme.warning,
                ),
                ViewState::Results => (String::new(), self.theme.muted),
            };
            let paragraph = Paragraph::new(message)
                .block(block)
                .style(Style::default().fg(color))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true });
            frame.render_widget(paragraph, area);
            return;
        }

        let height = self.state.list_height;
        let offset = self.state.offset;
        let games = &self.catalog.visible()[offset..cmp::min(offset + height, len)];
        let mut list_state = ListState::default();
        if !games.is_empty() {
            let selected = self
                .state
                .cursor
                .saturating_sub(offset)
                .min(games.len().saturating_sub(1));
            list_state.select(Some(selected));
        }

        let items: Vec<ListItem> = games
            .iter()
            .enumerate()
            .map(|(idx, game)| {
                let is_selected = self.state.cursor == offset + idx;
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
                        game.title.clone(),
                        Style::default()
                            .fg(self.theme.primary_fg)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(
                        format_price(game.sale_price),
                        Style::default().fg(self.theme.price),
                    ),
                ];
                if let Some(discount) = game.discount_badge() {
                    line.push(Span::styled(
                        format!(" -{discount}%"),
                        Style::default().fg(self.theme.danger),
                    ));
                }
                ListItem::new(Line::from(line))
            })
            .collect();

        let list = List::new(items).block(block).highlight_style(
            Style::default()
                .bg(self.theme.selection_bg)
                .fg(self.theme.selection_fg),
        );
        frame.render_stateful_widget(list, area, &mut list_state);
    }

    fn render_game_card(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title("Deal");
        let Some(game) = self.current_game() else {
            let paragraph = Paragraph::new("No game selected").block(block);
            frame.render_widget(paragraph, area);
            return;
        };

        let mut lines = vec![
            Line::from(Span::styled(
                game.title.clone(),
                Style::default()
                    .fg(self.theme.muted)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        lines.extend(self.price_lines(game));
        lines.push(Line::from(""));
        lines.push(Line::from(format!("Store: {}", stores::store_name(&game.store_id))));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Enter: details",
            Style::default().fg(self.theme.muted),
        )));

        let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn price_lines(&self, game: &GameRecord) -> Vec<Line<'static>> {
        let mut price = Vec::new();
        if game.has_markdown() {
            price.push(Span::styled(
                format_price(game.normal_price),
                Style::default()
                    .fg(self.theme.muted)
                    .add_modifier(Modifier::CROSSED_OUT),
            ));
            price.push(Span::raw("  "));
        }
        price.push(Span::styled(
            format_price(game.sale_price),
            Style::default()
                .fg(self.theme.price)
                .add_modifier(Modifier::BOLD),
        ));
        if let Some(discount) = game.discount_badge() {
            price.push(Span::raw("  "));
            price.push(Span::styled(
                format!(" -{discount}% "),
                Style::default()
                    .bg(self.theme.accent_alt)
                    .fg(self.theme.on_accent)
                    .add_modifier(Modifier::BOLD),
            ));
        }
        vec![Line::from(price)]
    }

    fn render_detail_modal(&self, frame: &mut Frame, id: &str) {
        let frame_area = frame.size();
        let width = cmp::max(cmp::min(72_u16, frame_area.width.saturating_sub(4)), 30);
        let height = cmp::max(cmp::min(16_u16, frame_area.height.saturating_sub(2)), 8);
        let area = centered_rect(width, height, frame_area);
        frame.render_widget(Clear, area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title("Game details")
            .border_style(Style::default().fg(self.theme.accent));

        let Some(game) = self.catalog.find(id) else {
            let paragraph = Paragraph::new("Could not load the game details.")
                .block(block)
                .wrap(Wrap { trim: true });
            frame.render_widget(paragraph, area);
            return;
        };

        let mut lines = vec![
            Line::from(Span::styled(
                game.title.clone(),
                Style::default()
                    .fg(self.theme.muted)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        if game.has_markdown() {
            lines.push(Line::from(format!(
                "Normal price: {}",
                format_price(game.normal_price)
            )));
        }
        lines.extend(self.price_lines(game));
        if game.has_markdown() {
            lines.push(Line::from(Span::styled(
                format!("You save {}!", format_price(game.savings_amount())),
                Style::default().fg(self.theme.price),
            )));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(format!("Game ID: {}", game.id)));
        lines.push(Line::from(format!(
            "Store: {}",
            stores::store_name(&game.store_id)
        )));
        lines.push(Line::from(format!(
            "Cover: {}",
            game.thumbnail_or_placeholder()
        )));
        lines.push(Line::from(vec![
            Span::raw("Buy: "),
            Span::styled(
                game.redirect_url(),
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::UNDERLINED),
            ),
        ]));
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" close"),
        ]));

        let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn render_search_prompt(&self, frame: &mut Frame) {
        let frame_area = frame.size();
        let width = cmp::max(cmp::min(60_u16, frame_area.width.saturating_sub(4)), 24);
        let height = cmp::max(cmp::min(6_u16, frame_area.height.saturating_sub(2)), 5);
        let area = centered_rect(width, height, frame_area);
        frame.render_widget(Clear, area);

        let prompt = &self.state.prompt;
        let input_line = Line::from(vec![
            Span::styled("> ", Style::default().fg(self.theme.accent)),
            Span::raw(prompt.input.clone()),
        ]);
        let helper = Line::from(vec![
            Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" search  "),
            Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" cancel  "),
            Span::styled("Ctrl-u", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" clear"),
        ]);
        let paragraph = Paragraph::new(vec![input_line, Line::from(""), helper])
            .block(Block::default().borders(Borders::ALL).title("Search by title"))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);

        let cursor_x =
            (area.x + 3 + prompt.cursor as u16).min(area.x + area.width.saturating_sub(2));
        frame.set_cursor(cursor_x, area.y + 1);
    }

    /// Counter or load-more hint; hidden while loading or after an error.
    fn results_line(&self, view: &ViewState) -> Line<'static> {
        if *view != ViewState::Results {
            return Line::from("");
        }
        match self.catalog.load_more_label() {
            Some(label) => Line::from(vec![
                Span::styled("m", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(format!(" {label}")),
            ]),
            None => Line::from(Span::styled(
                self.catalog.summary().unwrap_or_default(),
                Style::default().fg(self.theme.muted),
            )),
        }
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title("Status");
        let view = self.catalog.view_state();
        let primary = match &view {
            ViewState::Error(message) => Line::from(Span::styled(
                format!("Error: {message}"),
                Style::default().fg(self.theme.danger),
            )),
            _ => Line::from(self.state.status.clone()),
        };
        let secondary = self.results_line(&view);
        let hints = Line::from(Span::styled(
            "/ search  f/F store  s/S sort  m more  r reset  Ctrl-r reload  Enter details  q quit",
            Style::default().fg(self.theme.muted),
        ));
        let paragraph = Paragraph::new(vec![primary, secondary, hints])
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor()?;
    Ok(())
}

fn spawn_input_thread(sender: mpsc::Sender<AppEvent>) {
    thread::spawn(move || loop {
        match event::poll(TICK_RATE) {
            Ok(true) => match event::read() {
                Ok(evt) => {
                    if sender.blocking_send(AppEvent::Input(evt)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            },
            Ok(false) => {
                if sender.blocking_send(AppEvent::Tick).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

struct UiState {
    cursor: usize,
    offset: usize,
    list_height: usize,
    status: String,
    mode: Mode,
    prompt: SearchPrompt,
    detail: Option<String>,
    should_quit: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            cursor: 0,
            offset: 0,
            list_height: 1,
            status: "Ready".to_string(),
            mode: Mode::Browse,
            prompt: SearchPrompt::default(),
            detail: None,
            should_quit: false,
        }
    }
}

impl UiState {
    fn set_status(&mut self, message: String) {
        self.status = message;
    }

    fn reset_cursor(&mut self) {
        self.cursor = 0;
        self.offset = 0;
    }

    fn move_cursor(&mut self, delta: isize, len: usize) {
        if len == 0 {
            return;
        }
        let idx = (self.cursor as isize + delta).clamp(0, len as isize - 1);
        self.cursor = idx as usize;
        self.ensure_cursor_visible(len);
    }

    fn move_to(&mut self, index: usize, len: usize) {
        if len == 0 {
            return;
        }
        self.cursor = index.min(len - 1);
        self.ensure_cursor_visible(len);
    }

    fn clamp_cursor(&mut self, len: usize) {
        if len == 0 {
            self.cursor = 0;
            self.offset = 0;
        } else if self.cursor >= len {
            self.cursor = len - 1;
        }
    }

    fn ensure_cursor_visible(&mut self, len: usize) {
        if len == 0 || self.list_height == 0 {
            self.offset = 0;
            return;
        }
        let height = self.list_height;
        let max_offset = len.saturating_sub(height);

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
