use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyCode, KeyEvent, KeyModifiers};

/// A keystroke translated into what the typing session cares about.
/// The delimiter is its own variant because it drives word scoring, not
/// field content.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    /// printable character appended to the input field
    Char(char),
    /// the word delimiter (space)
    Delimiter,
    Backspace,
    Enter,
    /// restart the current run (left arrow)
    Restart,
    /// esc or ctrl-c
    Quit,
}

/// Unified event type consumed by the app loop
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrillEvent {
    Input(InputEvent),
    Resize,
    Tick,
}

/// Translate a terminal key event. Keys the app has no use for map to None
/// and never reach the loop.
pub fn map_key(key: KeyEvent) -> Option<InputEvent> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(InputEvent::Quit);
    }

    match key.code {
        KeyCode::Esc => Some(InputEvent::Quit),
        KeyCode::Enter => Some(InputEvent::Enter),
        KeyCode::Backspace => Some(InputEvent::Backspace),
        KeyCode::Left => Some(InputEvent::Restart),
        KeyCode::Char(' ') => Some(InputEvent::Delimiter),
        KeyCode::Char(c) => Some(InputEvent::Char(c)),
        _ => None,
    }
}

/// Source of app events (translated keyboard input, resize)
pub trait EventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if an event arrives before the timeout, or Err(Timeout) if it expires.
    fn recv_timeout(&self, timeout: Duration) -> Result<DrillEvent, RecvTimeoutError>;
}

/// Production event source: a reader thread that translates crossterm
/// events as they arrive
pub struct CrosstermEventSource {
    rx: Receiver<DrillEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            match event::read() {
                Ok(CtEvent::Key(key)) => {
                    if let Some(input) = map_key(key) {
                        if tx.send(DrillEvent::Input(input)).is_err() {
                            break;
                        }
                    }
                }
                Ok(CtEvent::Resize(_, _)) => {
                    if tx.send(DrillEvent::Resize).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(_) => break,
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<DrillEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Test event source for unit tests
pub struct TestEventSource {
    rx: Receiver<DrillEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<DrillEvent>) -> Self {
        Self { rx }
    }
}

impl EventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<DrillEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Advances the application one event at a time, synthesizing a `Tick`
/// whenever the display-refresh interval passes without input. The tick
/// belongs to the UI loop, never to the session state itself.
pub struct Runner<E: EventSource> {
    event_source: E,
    tick_interval: Duration,
}

impl<E: EventSource> Runner<E> {
    pub fn new(event_source: E, tick_interval: Duration) -> Self {
        Self {
            event_source,
            tick_interval,
        }
    }

    /// Blocks up to the tick interval and returns the next event, or Tick on timeout
    pub fn step(&self) -> DrillEvent {
        match self.event_source.recv_timeout(self.tick_interval) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                DrillEvent::Tick
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn map_key_space_is_the_delimiter() {
        assert_eq!(map_key(key(KeyCode::Char(' '))), Some(InputEvent::Delimiter));
        assert_eq!(map_key(key(KeyCode::Char('a'))), Some(InputEvent::Char('a')));
    }

    #[test]
    fn map_key_control_and_navigation() {
        assert_eq!(map_key(key(KeyCode::Esc)), Some(InputEvent::Quit));
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(InputEvent::Quit)
        );
        assert_eq!(map_key(key(KeyCode::Left)), Some(InputEvent::Restart));
        assert_eq!(map_key(key(KeyCode::Enter)), Some(InputEvent::Enter));
        assert_eq!(map_key(key(KeyCode::Backspace)), Some(InputEvent::Backspace));
    }

    #[test]
    fn map_key_ignores_unbound_keys() {
        assert_eq!(map_key(key(KeyCode::F(1))), None);
        assert_eq!(map_key(key(KeyCode::Tab)), None);
        assert_eq!(map_key(key(KeyCode::Up)), None);
    }

    #[test]
    fn step_returns_tick_on_timeout() {
        let (_tx, rx) = mpsc::channel();
        let es = TestEventSource::new(rx);
        let runner = Runner::new(es, Duration::from_millis(1));

        // With no events available, step should yield Tick
        let ev = runner.step();
        match ev {
            DrillEvent::Tick => {}
            _ => panic!("expected Tick on timeout"),
        }
    }

    #[test]
    fn step_passes_through_events() {
        let (tx, rx) = mpsc::channel();
        tx.send(DrillEvent::Input(InputEvent::Delimiter)).unwrap();
        tx.send(DrillEvent::Resize).unwrap();
        let es = TestEventSource::new(rx);
        let runner = Runner::new(es, Duration::from_millis(10));

        match runner.step() {
            DrillEvent::Input(InputEvent::Delimiter) => {}
            _ => panic!("expected the delimiter input event"),
        }
        match runner.step() {
            DrillEvent::Resize => {}
            _ => panic!("expected Resize event"),
        }
    }
}
