//! Terminal setup, input thread and the main message loop

use std::io::{self, Stdout};
use std::thread;

use anyhow::{Context, Result};
use crossbeam_channel::{Receiver, Sender};
use crossterm::{
    event, execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use crate::app::{AppEvent, StopwatchApp};
use crate::ui;

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

pub fn init() -> Result<Tui> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).context("Failed to create terminal")
}

pub fn restore(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Forward terminal input to the main loop until it goes away.
///
/// A read error ends the thread; the loop is told with
/// [`AppEvent::InputClosed`] since the tick pump keeps the channel open.
pub fn spawn_input_thread(events: Sender<AppEvent>) {
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if events.send(AppEvent::Input(ev)).is_err() {
                    break;
                }
            }
            Err(e) => {
                log::error!("terminal input failed: {}", e);
                events.send(AppEvent::InputClosed).ok();
                break;
            }
        }
    });
}

pub fn run_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut StopwatchApp,
    events: &Receiver<AppEvent>,
) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| ui::render(frame, app))?;

        let first = events.recv().context("event channel closed")?;
        app.handle_event(first);
        // Coalesce whatever queued up during the draw into one redraw
        while let Ok(next) = events.try_recv() {
            app.handle_event(next);
            if app.should_quit {
                break;
            }
        }
    }
    Ok(())
}
