pub mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use keydrill::{
    drill::{Drill, FieldEffect, LiveMetrics},
    results_log,
    runtime::{CrosstermEventSource, DrillEvent, EventSource, InputEvent, Runner},
    text_store::{FileTextStore, TextStore},
    TICK_RATE_MS,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::{Duration, SystemTime},
};

/// minimal typing trainer with per-word scoring and a wpm history chart
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A minimal typing trainer TUI: type a saved practice text, watch per-character correctness and live WPM, and review a per-word WPM chart at the end."
)]
pub struct Cli {
    /// one-off practice text (leaves the saved text untouched)
    #[clap(short = 'p', long)]
    prompt: Option<String>,

    /// alternate path for the saved-text store
    #[clap(long)]
    store: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppState {
    EditText,
    Typing,
    Results,
}

#[derive(Debug)]
pub struct App {
    pub state: AppState,
    pub drill: Drill,
    /// current content of the input field, owned by the UI layer
    pub field: String,
    /// buffer for the edit-text screen
    pub edit_buffer: String,
    /// last live readout, refreshed once per tick
    pub live: LiveMetrics,
    pub store: FileTextStore,
}

impl App {
    pub fn new(cli: &Cli) -> Self {
        let store = cli
            .store
            .as_ref()
            .map(FileTextStore::with_path)
            .unwrap_or_default();

        let text = cli
            .prompt
            .clone()
            .or_else(|| store.load().into_iter().next());

        match text {
            Some(text) => Self {
                state: AppState::Typing,
                drill: Drill::new(text),
                field: String::new(),
                edit_buffer: String::new(),
                live: zero_live(),
                store,
            },
            // No saved text yet: onboarding flow
            None => Self {
                state: AppState::EditText,
                drill: Drill::new(String::new()),
                field: String::new(),
                edit_buffer: String::new(),
                live: zero_live(),
                store,
            },
        }
    }

    /// Fresh session over `text`; also the reset path (same text again).
    pub fn start_drill(&mut self, text: String) {
        self.drill = Drill::new(text);
        self.field.clear();
        self.live = zero_live();
        self.state = AppState::Typing;
    }

    pub fn restart(&mut self) {
        self.start_drill(self.drill.target.clone());
    }

    /// Session just completed: log the result and move to the chart.
    fn finish(&mut self, now: SystemTime) {
        if let Some(summary) = self.drill.summary {
            // Best effort; a missing config dir never kills the session
            let _ = results_log::append(
                &summary,
                self.drill.word_count(),
                self.drill.elapsed_secs(now),
            );
        }
        self.state = AppState::Results;
    }
}

fn zero_live() -> LiveMetrics {
    LiveMetrics {
        elapsed_secs: 0.0,
        wpm: 0.0,
        raw_wpm: 0.0,
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(&cli);
    let runner = Runner::new(
        CrosstermEventSource::new(),
        Duration::from_millis(TICK_RATE_MS),
    );
    let res = start_tui(&mut terminal, &mut app, &runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn start_tui<B: Backend, E: EventSource>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E>,
) -> Result<(), Box<dyn Error>> {
    terminal.draw(|f| draw(app, f))?;

    loop {
        match runner.step() {
            DrillEvent::Tick => {
                // Pure display refresh; guarded so a tick can never touch a
                // finished or not-yet-started session
                if app.state == AppState::Typing
                    && app.drill.has_started()
                    && !app.drill.has_finished()
                {
                    app.live = app.drill.live_metrics(SystemTime::now());
                    terminal.draw(|f| draw(app, f))?;
                }
            }
            DrillEvent::Resize => {
                terminal.draw(|f| draw(app, f))?;
            }
            DrillEvent::Input(input) => {
                if !handle_input(app, input) {
                    break;
                }
                terminal.draw(|f| draw(app, f))?;
            }
        }
    }

    Ok(())
}

fn draw(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}

/// Returns false when the app should exit.
fn handle_input(app: &mut App, input: InputEvent) -> bool {
    if input == InputEvent::Quit {
        return false;
    }

    match app.state {
        AppState::Typing => handle_typing_input(app, input),
        AppState::Results => handle_results_input(app, input),
        AppState::EditText => handle_edit_input(app, input),
    }

    true
}

fn handle_typing_input(app: &mut App, input: InputEvent) {
    if app.drill.has_finished() {
        return;
    }

    let now = SystemTime::now();

    match input {
        InputEvent::Restart => {
            app.restart();
        }
        InputEvent::Backspace => {
            if app.field.pop().is_some() {
                app.drill.begin(now);
                app.drill.on_field_change(&app.field, false, now);
            }
        }
        InputEvent::Delimiter => {
            app.drill.begin(now);
            app.field.push(' ');
            if app.drill.on_field_change(&app.field, true, now) == FieldEffect::Clear {
                app.field.clear();
            }
        }
        InputEvent::Char(c) => {
            app.drill.begin(now);
            app.field.push(c);
            app.drill.on_field_change(&app.field, false, now);

            if app.drill.has_finished() {
                app.finish(now);
            }
        }
        _ => {}
    }
}

fn handle_results_input(app: &mut App, input: InputEvent) {
    match input {
        InputEvent::Char('r') => {
            app.restart();
        }
        InputEvent::Char('e') => {
            app.edit_buffer = app.drill.target.clone();
            app.state = AppState::EditText;
        }
        _ => {}
    }
}

fn handle_edit_input(app: &mut App, input: InputEvent) {
    match input {
        InputEvent::Enter => {
            let text = app.edit_buffer.trim().to_string();
            if !text.is_empty() {
                // Wholesale overwrite of the single saved text
                let _ = app.store.save(&text);
                app.start_drill(text);
            }
        }
        InputEvent::Backspace => {
            app.edit_buffer.pop();
        }
        InputEvent::Delimiter => {
            app.edit_buffer.push(' ');
        }
        InputEvent::Char(c) => {
            app.edit_buffer.push(c);
        }
        _ => {}
    }
}
