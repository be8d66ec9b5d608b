use std::time::Duration;

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};

use crate::game::Observation;
use crate::metrics::format_elapsed;
use crate::modes::Mode;
use crate::render::{ConsoleBuffer, Palette};

/// Columns left blank between side-by-side boards
pub const BOARD_GUTTER: u16 = 3;

const CLOCK_COLUMN: u16 = 2;
const SCORE_COLUMN: u16 = 20;
const MODE_COLUMN: u16 = 40;

/// Everything drawn in one frame
#[derive(Debug, Clone, Copy)]
pub struct Screen<'a> {
    pub elapsed: Duration,
    pub score: Option<f64>,
    pub mode: Mode,
    pub boards: &'a [Observation],
    pub console: &'a ConsoleBuffer,
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, screen: &Screen<'_>, palette: &Palette) {
        let area = frame.area();
        if area.is_empty() {
            return;
        }

        self.render_header(frame, area, screen);

        // Boards side by side, left to right, below the header
        let mut leftmost = area.x;
        for observation in screen.boards {
            let board = &observation.board;
            let cols = u16::try_from(board.cols()).unwrap_or(u16::MAX);
            let rows = u16::try_from(board.rows()).unwrap_or(u16::MAX);
            let board_area = Rect::new(leftmost, area.y.saturating_add(1), cols, rows)
                .intersection(area);

            if !board_area.is_empty() {
                frame.render_widget(self.render_board(observation, palette), board_area);
            }

            leftmost = leftmost.saturating_add(cols).saturating_add(BOARD_GUTTER);
        }

        if screen.console.is_visible() {
            let height = area.height / 2;
            let console_area = Rect::new(area.x, area.bottom() - height, area.width, height);
            if !console_area.is_empty() {
                frame.render_widget(Clear, console_area);
                frame.render_widget(self.render_console(console_area, screen.console), console_area);
            }
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect, screen: &Screen<'_>) {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let clock = Paragraph::new(Span::styled(format_elapsed(screen.elapsed), value));
        let score = Paragraph::new(Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(
                format_score(screen.score),
                value.add_modifier(Modifier::BOLD),
            ),
        ]));
        let mode = Paragraph::new(Line::from(vec![
            Span::styled("Mode: ", label),
            Span::styled(screen.mode.as_str(), value),
        ]));

        let cells = [
            (clock, CLOCK_COLUMN, SCORE_COLUMN - CLOCK_COLUMN),
            (score, SCORE_COLUMN, MODE_COLUMN - SCORE_COLUMN),
            (mode, MODE_COLUMN, area.width.saturating_sub(MODE_COLUMN)),
        ];
        for (widget, column, width) in cells {
            let cell = Rect::new(area.x.saturating_add(column), area.y, width, 1).intersection(area);
            if !cell.is_empty() {
                frame.render_widget(widget, cell);
            }
        }
    }

    fn render_board(&self, observation: &Observation, palette: &Palette) -> Paragraph<'static> {
        let lines: Vec<Line> = observation
            .board
            .iter_rows()
            .map(|row| {
                Line::from(
                    row.iter()
                        .map(|&c| Span::styled(c.to_string(), palette.style_for(c)))
                        .collect::<Vec<_>>(),
                )
            })
            .collect();

        Paragraph::new(lines)
    }

    fn render_console<'a>(&self, area: Rect, console: &'a ConsoleBuffer) -> List<'a> {
        let visible_rows = usize::from(area.height.saturating_sub(2));
        let items: Vec<ListItem> = console
            .latest(visible_rows)
            .map(|message| ListItem::new(Span::styled(message, Style::default().fg(Color::Gray))))
            .collect();

        List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(" Game console "),
        )
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Score as shown in the header. No reward yet reads as zero.
pub fn format_score(score: Option<f64>) -> String {
    score.unwrap_or(0.0).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Board;
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

    fn row_text(buffer: &Buffer, y: u16) -> String {
        (0..buffer.area.width)
            .map(|x| buffer.cell((x, y)).map(|c| c.symbol()).unwrap_or(" "))
            .collect()
    }

    fn draw(screen: &Screen<'_>, width: u16, height: u16) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|frame| Renderer::new().render(frame, screen, &Palette::new()))
            .unwrap();
        terminal.backend().buffer().clone()
    }

    fn observation(art: &[&str]) -> Observation {
        Observation::new(Board::from_art(art).unwrap())
    }

    #[test]
    fn test_header_layout() {
        let console = ConsoleBuffer::new();
        let screen = Screen {
            elapsed: Duration::from_secs(65),
            score: Some(100.0),
            mode: Mode::Participation,
            boards: &[],
            console: &console,
        };

        let header = row_text(&draw(&screen, 70, 6), 0);
        assert_eq!(&header[2..10], "00:01:05");
        assert_eq!(&header[20..30], "Score: 100");
        assert_eq!(&header[40..59], "Mode: Participation");
    }

    #[test]
    fn test_boards_side_by_side() {
        let console = ConsoleBuffer::new();
        let boards = [observation(&[".P.", "..."]), observation(&["ab"])];
        let screen = Screen {
            elapsed: Duration::ZERO,
            score: None,
            mode: Mode::Autonomous,
            boards: &boards,
            console: &console,
        };

        let buffer = draw(&screen, 60, 6);
        assert!(row_text(&buffer, 0).contains("Score: 0"));
        assert!(row_text(&buffer, 1).starts_with(".P.   ab"));
        assert!(row_text(&buffer, 2).starts_with("...   "));
    }

    #[test]
    fn test_console_only_when_visible() {
        let mut console = ConsoleBuffer::new();
        console.extend(["Reached the left end of the chain".to_string()]);
        let boards = [observation(&["P"])];
        let mut screen = Screen {
            elapsed: Duration::ZERO,
            score: Some(1.0),
            mode: Mode::Autonomous,
            boards: &boards,
            console: &console,
        };

        let hidden = draw(&screen, 60, 10);
        assert!((0..10).all(|y| !row_text(&hidden, y).contains("Reached")));

        let mut shown = console.clone();
        shown.show();
        screen.console = &shown;
        let buffer = draw(&screen, 60, 10);
        assert!(row_text(&buffer, 5).contains("Game console"));
        assert!(row_text(&buffer, 6).contains("Reached the left end of the chain"));
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let console = ConsoleBuffer::new();
        let boards = [observation(&["......................."])];
        let screen = Screen {
            elapsed: Duration::ZERO,
            score: None,
            mode: Mode::Demonstration,
            boards: &boards,
            console: &console,
        };
        draw(&screen, 5, 1);
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(None), "0");
        assert_eq!(format_score(Some(101.0)), "101");
        assert_eq!(format_score(Some(0.5)), "0.5");
    }
}
