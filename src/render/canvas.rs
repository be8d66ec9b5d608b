use std::future::Future;
use std::io::{self, Stdout, stdout};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::{Stream, StreamExt};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::time::timeout;

use crate::input::Input;
use crate::render::{Palette, Renderer, Screen};

/// Failures specific to the terminal
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CanvasError {
    #[error("interrupted by Ctrl+C")]
    Interrupted,
    #[error("terminal input stream closed")]
    InputClosed,
}

impl CanvasError {
    /// Whether `err` was caused by the user pressing Ctrl+C
    pub fn is_interrupt(err: &anyhow::Error) -> bool {
        err.downcast_ref::<CanvasError>() == Some(&CanvasError::Interrupted)
    }
}

/// Where the UI loop reads input from and draws to
pub trait Canvas {
    /// Wait for one input, at most `delay` if given. Returns
    /// [`Input::NoInput`] when the delay runs out first.
    fn next_input(&mut self, delay: Option<Duration>) -> impl Future<Output = Result<Input>>;

    /// Clear and redraw the whole screen
    fn present(&mut self, screen: &Screen<'_>) -> Result<()>;
}

/// Full-screen crossterm terminal drawn with ratatui
///
/// Raw mode and the alternate screen are held from [`TerminalCanvas::acquire`]
/// until [`TerminalCanvas::release`], or until drop if release is never reached.
pub struct TerminalCanvas {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    events: EventStream,
    renderer: Renderer,
    palette: Palette,
    released: bool,
}

impl TerminalCanvas {
    pub fn acquire(palette: Palette) -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;

        let terminal = match Self::enter_screen() {
            Ok(terminal) => terminal,
            Err(err) => {
                let _ = execute!(stdout(), LeaveAlternateScreen);
                let _ = disable_raw_mode();
                return Err(err);
            }
        };

        Ok(Self {
            terminal,
            events: EventStream::new(),
            renderer: Renderer::new(),
            palette,
            released: false,
        })
    }

    fn enter_screen() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;
        Ok(terminal)
    }

    /// Restore the terminal to its normal state
    pub fn release(mut self) -> Result<()> {
        self.cleanup_terminal()
    }

    fn cleanup_terminal(&mut self) -> Result<()> {
        if self.released {
            return Ok(());
        }
        self.released = true;

        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        self.terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

/// Map one terminal event to an input. Key releases map to `None`.
fn input_from_event(event: Event) -> Option<Result<Input, CanvasError>> {
    match event {
        Event::Key(key) => {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return None;
            }
            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                return Some(Err(CanvasError::Interrupted));
            }
            Some(Ok(Input::from(key)))
        }
        _ => Some(Ok(Input::Other)),
    }
}

async fn read_input<S>(events: &mut S) -> Result<Input>
where
    S: Stream<Item = io::Result<Event>> + Unpin,
{
    loop {
        match events.next().await {
            Some(Ok(event)) => match input_from_event(event) {
                Some(input) => return Ok(input?),
                None => continue,
            },
            Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
            None => return Err(CanvasError::InputClosed.into()),
        }
    }
}

/// Read the next input from `events`, giving up after `delay` if one is set
async fn wait_for_input<S>(events: &mut S, delay: Option<Duration>) -> Result<Input>
where
    S: Stream<Item = io::Result<Event>> + Unpin,
{
    match delay {
        Some(delay) => match timeout(delay, read_input(events)).await {
            Ok(input) => input,
            Err(_) => Ok(Input::NoInput),
        },
        None => read_input(events).await,
    }
}

impl Canvas for TerminalCanvas {
    async fn next_input(&mut self, delay: Option<Duration>) -> Result<Input> {
        wait_for_input(&mut self.events, delay).await
    }

    fn present(&mut self, screen: &Screen<'_>) -> Result<()> {
        let renderer = &self.renderer;
        let palette = &self.palette;
        self.terminal
            .draw(|frame| renderer.render(frame, screen, palette))
            .context("Failed to draw frame")?;
        Ok(())
    }
}

impl Drop for TerminalCanvas {
    fn drop(&mut self) {
        let _ = self.cleanup_terminal();
    }
}


#[cfg(test)]
mod tests {
    use crossterm::event::KeyEvent;
    use futures::stream;

    use super::testing::ScriptedCanvas;
    use super::*;
    use crate::render::ConsoleBuffer;

    #[tokio::test]
    async fn test_scripted_canvas_replays_inputs() {
        let mut canvas = ScriptedCanvas::new([Input::Key(KeyCode::Left), Input::NoInput]);

        assert_eq!(
            canvas.next_input(None).await.unwrap(),
            Input::Key(KeyCode::Left)
        );
        assert_eq!(
            canvas.next_input(Some(Duration::from_millis(5))).await.unwrap(),
            Input::NoInput
        );
        assert!(canvas.next_input(None).await.is_err());
        assert_eq!(canvas.delays[1], Some(Duration::from_millis(5)));
    }

    #[test]
    fn test_scripted_canvas_records_frames() {
        let mut canvas = ScriptedCanvas::new([]);
        let console = ConsoleBuffer::new();
        let screen = Screen {
            elapsed: Duration::ZERO,
            score: Some(2.0),
            mode: crate::modes::Mode::Demonstration,
            boards: &[],
            console: &console,
        };

        canvas.present(&screen).unwrap();
        assert_eq!(canvas.frames.len(), 1);
        assert_eq!(canvas.last_frame().score, Some(2.0));
        assert!(!canvas.last_frame().console_visible);
    }

    #[test]
    fn test_canvas_error_messages() {
        assert_eq!(CanvasError::Interrupted.to_string(), "interrupted by Ctrl+C");
    }

    fn key(code: KeyCode, modifiers: KeyModifiers, kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent::new_with_kind(code, modifiers, kind))
    }

    #[test]
    fn test_key_press_maps_to_key_input() {
        let event = key(KeyCode::Right, KeyModifiers::NONE, KeyEventKind::Press);
        assert_eq!(
            input_from_event(event),
            Some(Ok(Input::Key(KeyCode::Right)))
        );
    }

    #[test]
    fn test_key_release_is_skipped() {
        let event = key(KeyCode::Right, KeyModifiers::NONE, KeyEventKind::Release);
        assert_eq!(input_from_event(event), None);
    }

    #[test]
    fn test_ctrl_c_interrupts() {
        let event = key(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyEventKind::Press);
        assert_eq!(input_from_event(event), Some(Err(CanvasError::Interrupted)));

        // Plain 'c' is an ordinary key
        let event = key(KeyCode::Char('c'), KeyModifiers::NONE, KeyEventKind::Press);
        assert_eq!(
            input_from_event(event),
            Some(Ok(Input::Key(KeyCode::Char('c'))))
        );
    }

    #[test]
    fn test_resize_maps_to_other() {
        assert_eq!(input_from_event(Event::Resize(80, 24)), Some(Ok(Input::Other)));
    }

    #[tokio::test]
    async fn test_timeout_yields_no_input() {
        let mut events = stream::pending::<io::Result<Event>>();
        let input = wait_for_input(&mut events, Some(Duration::from_millis(10)))
            .await
            .unwrap();
        assert_eq!(input, Input::NoInput);
    }

    #[tokio::test]
    async fn test_release_skipped_while_waiting() {
        let mut events = stream::iter(vec![
            Ok(key(KeyCode::Left, KeyModifiers::NONE, KeyEventKind::Release)),
            Ok(key(KeyCode::Right, KeyModifiers::NONE, KeyEventKind::Press)),
        ]);
        let input = wait_for_input(&mut events, None).await.unwrap();
        assert_eq!(input, Input::Key(KeyCode::Right));
    }

    #[tokio::test]
    async fn test_interrupt_and_closed_stream_are_errors() {
        let mut events = stream::iter(vec![Ok(key(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
            KeyEventKind::Press,
        ))]);
        let err = wait_for_input(&mut events, Some(Duration::from_secs(1)))
            .await
            .unwrap_err();
        assert!(CanvasError::is_interrupt(&err));

        // Stream is now exhausted
        let err = wait_for_input(&mut events, None).await.unwrap_err();
        assert!(!CanvasError::is_interrupt(&err));
        assert_eq!(
            err.downcast_ref::<CanvasError>(),
            Some(&CanvasError::InputClosed)
        );
    }

    #[test]
    fn test_interrupt_detected_through_context() {
        let err = anyhow::Error::from(CanvasError::Interrupted).context("Failed to play");
        assert!(CanvasError::is_interrupt(&err));
        assert!(!CanvasError::is_interrupt(&anyhow::anyhow!("other failure")));
    }
}
