//! Interactive mode - full-screen terminal game.

use super::CliError;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use gamma::render::{cell_width, push_cell};
use gamma::{Board, Coord, GammaResult, PlayerId};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::io::stdout;

/// Player input, decoupled from the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Key {
    Up,
    Down,
    Left,
    Right,
    /// Ordinary move at the cursor.
    Place,
    /// Golden move at the cursor.
    Golden,
    /// Give up the turn.
    Skip,
    /// End the game.
    Quit,
}

impl Key {
    fn from_event(key: KeyEvent) -> Option<Self> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return (key.code == KeyCode::Char('d')).then_some(Self::Quit);
        }
        match key.code {
            KeyCode::Up => Some(Self::Up),
            KeyCode::Down => Some(Self::Down),
            KeyCode::Left => Some(Self::Left),
            KeyCode::Right => Some(Self::Right),
            KeyCode::Char(' ') => Some(Self::Place),
            KeyCode::Char('g' | 'G') => Some(Self::Golden),
            KeyCode::Char('c' | 'C') => Some(Self::Skip),
            _ => None,
        }
    }
}

/// What the status line shows for the player on turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Status {
    pub(crate) player: PlayerId,
    pub(crate) busy: u64,
    pub(crate) free: u64,
    pub(crate) golden: bool,
}

/// Turn order and cursor of an interactive game.
///
/// Players move in order `1..=players`. A player with no empty cell to
/// take and no golden move available is skipped; the game ends after a
/// full round in which nobody could move.
#[derive(Debug)]
pub(crate) struct Session {
    board: Board,
    cursor: Coord,
    current: PlayerId,
    /// Someone could move since player 1 was last on turn.
    active_in_round: bool,
    finished: bool,
}

impl Session {
    pub(crate) fn new(board: Board) -> GammaResult<Self> {
        let cursor = Coord::new(0, board.height() - 1);
        let mut session = Self {
            board,
            cursor,
            current: 1,
            active_in_round: false,
            finished: false,
        };
        session.settle()?;
        Ok(session)
    }

    pub(crate) const fn board(&self) -> &Board {
        &self.board
    }

    pub(crate) fn into_board(self) -> Board {
        self.board
    }

    pub(crate) const fn cursor(&self) -> Coord {
        self.cursor
    }

    pub(crate) const fn current(&self) -> PlayerId {
        self.current
    }

    pub(crate) const fn is_finished(&self) -> bool {
        self.finished
    }

    fn can_play(&mut self, player: PlayerId) -> GammaResult<bool> {
        Ok(self.board.free_fields(player) > 0 || self.board.golden_possible(player)?)
    }

    /// Move the turn on; returns `true` if that ended the game.
    fn advance(&mut self) -> bool {
        if self.current < self.board.players() {
            self.current += 1;
        } else if self.active_in_round {
            self.current = 1;
        } else {
            self.finished = true;
        }
        self.finished
    }

    /// Skip players that cannot move until one can or the game ends.
    fn settle(&mut self) -> GammaResult<()> {
        loop {
            if self.current == 1 {
                self.active_in_round = false;
            }
            if self.can_play(self.current)? {
                self.active_in_round = true;
                return Ok(());
            }
            if self.advance() {
                return Ok(());
            }
        }
    }

    fn end_turn(&mut self) -> GammaResult<()> {
        if self.advance() {
            return Ok(());
        }
        self.settle()
    }

    /// Apply one key press.
    ///
    /// # Errors
    ///
    /// Returns [`gamma::OutOfMemory`] if a move or golden-move query ran out of memory.
    pub(crate) fn handle(&mut self, key: Key) -> GammaResult<()> {
        if self.finished {
            return Ok(());
        }
        let Coord { x, y } = self.cursor;

        match key {
            Key::Up if y + 1 < self.board.height() => self.cursor.y += 1,
            Key::Down if y > 0 => self.cursor.y -= 1,
            Key::Left if x > 0 => self.cursor.x -= 1,
            Key::Right if x + 1 < self.board.width() => self.cursor.x += 1,
            Key::Place => {
                if self.board.try_move(self.current, x, y)? {
                    self.end_turn()?;
                }
            }
            Key::Golden => {
                if self.board.try_golden_move(self.current, x, y)? {
                    self.end_turn()?;
                }
            }
            Key::Skip => self.end_turn()?,
            Key::Quit => self.finished = true,
            Key::Up | Key::Down | Key::Left | Key::Right => {}
        }

        Ok(())
    }

    pub(crate) fn status(&mut self) -> GammaResult<Status> {
        let player = self.current();
        Ok(Status {
            player,
            busy: self.board.busy_fields(player),
            free: self.board.free_fields(player),
            golden: self.board.golden_possible(player)?,
        })
    }
}

/// Terminal columns and rows needed to show `board`.
fn required_size(board: &Board) -> (u64, u64) {
    let cell = cell_width(board.players()) as u64;
    (
        u64::from(board.width()) * cell + 2,
        u64::from(board.height()) + 3,
    )
}

/// Play `board` in the terminal and return it once the game ends.
///
/// # Errors
///
/// Returns an error if the terminal is too small or fails, or the engine
/// runs out of memory.
pub(crate) fn execute(board: Board) -> Result<Board, CliError> {
    let (cols, rows) = terminal::size()?;
    let (need_cols, need_rows) = required_size(&board);
    if u64::from(cols) < need_cols || u64::from(rows) < need_rows {
        return Err(CliError::new(format!(
            "Board needs a {need_cols}x{need_rows} terminal, have {cols}x{rows}"
        )));
    }

    let mut session = Session::new(board)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_tui(&mut terminal, &mut session);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result?;

    let board = session.into_board();
    print_final(&board)?;
    Ok(board)
}

fn run_tui(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    session: &mut Session,
) -> Result<(), CliError> {
    while !session.is_finished() {
        let status = session.status()?;
        let view: &Session = session;
        terminal.draw(|f| ui(f, view, status))?;

        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && let Some(key) = Key::from_event(key)
        {
            session.handle(key)?;
        }
    }
    Ok(())
}

fn print_final(board: &Board) -> Result<(), CliError> {
    print!("{}", board.render()?);
    for player in 1..=board.players() {
        println!("PLAYER {player} {}", board.busy_fields(player));
    }
    Ok(())
}

fn ui(f: &mut Frame, session: &Session, status: Status) {
    let board = session.board();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(u16::try_from(board.height()).unwrap_or(u16::MAX).saturating_add(2)),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(f.area());

    render_board(f, chunks[0], session);
    render_status(f, chunks[1], status);
    render_footer(f, chunks[2]);
}

fn render_board(f: &mut Frame, area: Rect, session: &Session) {
    let board = session.board();
    let width = cell_width(board.players());
    let cursor = session.cursor();

    let mut lines = Vec::new();
    for y in (0..board.height()).rev() {
        let mut spans = Vec::new();
        for x in 0..board.width() {
            let owner = board.owner(x, y).unwrap_or_default();
            let mut text = String::new();
            push_cell(&mut text, owner, width);

            let mut style = Style::default().fg(player_color(owner));
            if cursor == Coord::new(x, y) {
                style = style.add_modifier(Modifier::REVERSED);
            }
            spans.push(Span::styled(text, style));
        }
        lines.push(Line::from(spans));
    }

    let board_widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Gamma "));

    f.render_widget(board_widget, area);
}

fn render_status(f: &mut Frame, area: Rect, status: Status) {
    let mut spans = vec![Span::styled(
        format!("PLAYER {} {} {}", status.player, status.busy, status.free),
        Style::default().fg(player_color(status.player)).add_modifier(Modifier::BOLD),
    )];
    if status.golden {
        spans.push(Span::styled(" G", Style::default().fg(Color::Green)));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_footer(f: &mut Frame, area: Rect) {
    let controls = " [arrows] Move  [Space] Place  [g] Golden  [c] Skip  [Ctrl-D] End ";
    let footer = Paragraph::new(controls).style(Style::default().fg(Color::Gray));

    f.render_widget(footer, area);
}

fn player_color(id: PlayerId) -> Color {
    match id {
        0 => Color::DarkGray,
        1 => Color::Red,
        2 => Color::Blue,
        3 => Color::Green,
        4 => Color::Yellow,
        5 => Color::Magenta,
        6 => Color::Cyan,
        7 => Color::LightRed,
        8 => Color::LightBlue,
        _ => Color::White,
    }
}
