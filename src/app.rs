use std::time::Duration;

use crossbeam_channel::Sender;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use stopwatch_core::{format_time, TimerState, TICK_INTERVAL_MS};

use crate::pump::TickPump;
use crate::share::ShareTarget;
use crate::stopwatch::StopwatchState;

pub const HELP_TEXT: &str = "STOPWATCH HELP\n\n\
     Enter  Start/Stop\n\
     Space  Start/Stop\n\
     l      Record lap\n\
     r      Reset\n\
     s      Share results\n\
     Up/Dn  Scroll laps\n\n\
     F1 ?   Help\n\
     F2     Start/Stop\n\
     F3     Reset\n\
     F4 q   Quit";

/// Messages delivered to the main loop.
#[derive(Debug)]
pub enum AppEvent {
    Tick,
    Input(Event),
    /// The input thread hit a read error and exited.
    InputClosed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Status {
    pub kind: StatusKind,
    pub text: String,
}

pub struct StopwatchApp {
    pub stopwatch: StopwatchState,
    pump: TickPump,
    share: Box<dyn ShareTarget>,
    share_link: String,

    pub status: Option<Status>,
    pub help_visible: bool,
    pub confirm_exit: bool,
    pub should_quit: bool,
}

impl StopwatchApp {
    pub fn new(events: Sender<AppEvent>, share: Box<dyn ShareTarget>, share_link: String) -> Self {
        Self {
            stopwatch: StopwatchState::new(),
            pump: TickPump::new(events, Duration::from_millis(TICK_INTERVAL_MS)),
            share,
            share_link,
            status: None,
            help_visible: false,
            confirm_exit: false,
            should_quit: false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.stopwatch.timer.is_running()
    }

    #[cfg(test)]
    pub fn pump_running(&self) -> bool {
        self.pump.is_running()
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Tick => self.handle_tick(),
            AppEvent::Input(Event::Key(key)) => self.handle_key(key),
            // Resize and the rest only need a redraw
            AppEvent::Input(_) => {}
            AppEvent::InputClosed => {
                log::warn!("terminal input closed, exiting");
                self.quit();
            }
        }
    }

    pub fn handle_tick(&mut self) {
        self.stopwatch.timer.tick();
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.quit();
            return;
        }

        // Help screen: any key dismisses it
        if self.help_visible {
            self.help_visible = false;
            return;
        }

        if self.confirm_exit {
            match key.code {
                KeyCode::Char('y') => self.quit(),
                KeyCode::Char('n') | KeyCode::Esc | KeyCode::F(4) => self.confirm_exit = false,
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::F(2) => self.toggle_running(),
            KeyCode::Char('r') | KeyCode::F(3) => self.reset(),
            KeyCode::Char('l') => self.record_lap(),
            KeyCode::Char('s') => self.share(),
            KeyCode::Up | KeyCode::Char('k') => self.stopwatch.scroll_up(),
            KeyCode::Down | KeyCode::Char('j') => self.stopwatch.scroll_down(),
            KeyCode::Char('?') | KeyCode::F(1) => self.help_visible = true,
            KeyCode::Char('q') | KeyCode::Esc | KeyCode::F(4) => self.request_quit(),
            _ => {}
        }
    }

    pub fn toggle_running(&mut self) {
        match self.stopwatch.timer.toggle() {
            TimerState::Running => {
                log::debug!("started at {}", format_time(self.stopwatch.timer.elapsed_ms()));
                self.pump.start();
            }
            TimerState::Stopped => {
                self.pump.stop();
                log::debug!("stopped at {}", format_time(self.stopwatch.timer.elapsed_ms()));
            }
        }
    }

    pub fn reset(&mut self) {
        self.pump.stop();
        self.stopwatch.reset();
        log::debug!("reset");
    }

    pub fn record_lap(&mut self) {
        if let Some(lap) = self.stopwatch.record_lap() {
            log::debug!(
                "lap {} at {} (+{})",
                lap.id,
                format_time(lap.time_ms),
                format_time(lap.difference_ms)
            );
        }
    }

    /// Failures are logged and shown in the status line; stopwatch state is untouched.
    pub fn share(&mut self) {
        let text = self.stopwatch.timer.share_text(&self.share_link);
        let destination = self.share.destination();
        self.status = Some(match self.share.share(&text) {
            Ok(()) => {
                log::info!("shared results to {}", destination);
                Status {
                    kind: StatusKind::Info,
                    text: format!("Results shared to {}", destination),
                }
            }
            Err(e) => {
                log::error!("Error sharing results: {}", e);
                Status {
                    kind: StatusKind::Error,
                    text: format!("Share failed: {}", e),
                }
            }
        });
    }

    fn request_quit(&mut self) {
        if self.is_running() {
            self.confirm_exit = true;
        } else {
            self.quit();
        }
    }

    fn quit(&mut self) {
        self.stopwatch.timer.stop();
        self.shutdown();
        self.confirm_exit = false;
        self.should_quit = true;
    }

    /// Release the tick pump. Safe to call more than once.
    pub fn shutdown(&mut self) {
        self.pump.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use crossbeam_channel::Receiver;

    use crate::share::ShareError;

    #[derive(Default, Clone)]
    struct RecordingShare {
        sent: Rc<RefCell<Vec<String>>>,
        fail: bool,
    }

    impl ShareTarget for RecordingShare {
        fn share(&mut self, text: &str) -> Result<(), ShareError> {
            if self.fail {
                return Err(ShareError::ClipboardUnavailable(String::from("no display")));
            }
            self.sent.borrow_mut().push(text.to_owned());
            Ok(())
        }

        fn destination(&self) -> String {
            String::from("test")
        }
    }

    fn app_with(share: RecordingShare) -> (StopwatchApp, Receiver<AppEvent>) {
        let (tx, rx) = crossbeam_channel::unbounded();
        (StopwatchApp::new(tx, Box::new(share), String::from("https://example.test")), rx)
    }

    fn press(app: &mut StopwatchApp, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn ticks(app: &mut StopwatchApp, n: usize) {
        for _ in 0..n {
            app.handle_event(AppEvent::Tick);
        }
    }

    #[test]
    fn test_pump_follows_running_state() {
        let (mut app, _rx) = app_with(RecordingShare::default());
        assert!(!app.pump_running());

        press(&mut app, KeyCode::Enter);
        assert!(app.is_running());
        assert!(app.pump_running());

        press(&mut app, KeyCode::Char(' '));
        assert!(!app.is_running());
        assert!(!app.pump_running());

        press(&mut app, KeyCode::F(2));
        assert!(app.pump_running());
        press(&mut app, KeyCode::Char('r'));
        assert!(!app.is_running());
        assert!(!app.pump_running());
    }

    #[test]
    fn test_ticks_and_laps() {
        let (mut app, _rx) = app_with(RecordingShare::default());
        press(&mut app, KeyCode::Enter);
        ticks(&mut app, 100);
        press(&mut app, KeyCode::Char('l'));
        ticks(&mut app, 150);
        press(&mut app, KeyCode::Char('l'));

        let timer = &app.stopwatch.timer;
        assert_eq!(timer.elapsed_ms(), 2500);
        assert_eq!(timer.laps().len(), 2);
        assert_eq!(timer.best_lap_ms(), Some(1000));
        assert_eq!(timer.worst_lap_ms(), Some(1500));
        app.shutdown();
    }

    #[test]
    fn test_lap_key_ignored_while_stopped() {
        let (mut app, _rx) = app_with(RecordingShare::default());
        press(&mut app, KeyCode::Char('l'));
        assert!(app.stopwatch.timer.laps().is_empty());
    }

    #[test]
    fn test_late_tick_after_stop_ignored() {
        let (mut app, _rx) = app_with(RecordingShare::default());
        press(&mut app, KeyCode::Enter);
        ticks(&mut app, 3);
        press(&mut app, KeyCode::Enter);
        ticks(&mut app, 5);
        assert_eq!(app.stopwatch.timer.elapsed_ms(), 30);
    }

    #[test]
    fn test_share_success() {
        let share = RecordingShare::default();
        let sent = share.sent.clone();
        let (mut app, _rx) = app_with(share);
        press(&mut app, KeyCode::Enter);
        ticks(&mut app, 100);
        press(&mut app, KeyCode::Char('l'));
        press(&mut app, KeyCode::Char('s'));

        let sent = sent.borrow();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].starts_with("My Stopwatch Results:\nTotal Time: 00:01:00\n"));
        assert!(sent[0].ends_with("Try it: https://example.test"));
        assert_eq!(app.status.as_ref().map(|s| s.kind), Some(StatusKind::Info));
        assert!(app.is_running());
        app.shutdown();
    }

    #[test]
    fn test_share_failure_leaves_state() {
        let (mut app, _rx) = app_with(RecordingShare {
            fail: true,
            ..RecordingShare::default()
        });
        press(&mut app, KeyCode::Enter);
        ticks(&mut app, 42);
        press(&mut app, KeyCode::Char('l'));
        press(&mut app, KeyCode::Char('s'));

        assert!(app.is_running());
        assert!(app.pump_running());
        assert_eq!(app.stopwatch.timer.elapsed_ms(), 420);
        assert_eq!(app.stopwatch.timer.laps().len(), 1);
        let status = app.status.clone().unwrap();
        assert_eq!(status.kind, StatusKind::Error);
        assert!(status.text.contains("no display"));
        app.shutdown();
    }

    #[test]
    fn test_quit_when_stopped() {
        let (mut app, _rx) = app_with(RecordingShare::default());
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
        assert!(!app.confirm_exit);
    }

    #[test]
    fn test_quit_while_running_asks_first() {
        let (mut app, _rx) = app_with(RecordingShare::default());
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.confirm_exit);
        assert!(!app.should_quit);

        // Other keys are swallowed by the dialog
        press(&mut app, KeyCode::Char('r'));
        assert!(app.is_running());

        press(&mut app, KeyCode::Char('n'));
        assert!(!app.confirm_exit);
        assert!(app.is_running());

        press(&mut app, KeyCode::F(4));
        press(&mut app, KeyCode::Char('y'));
        assert!(app.should_quit);
        assert!(!app.is_running());
        assert!(!app.pump_running());
    }

    #[test]
    fn test_ctrl_c_quits_immediately() {
        let (mut app, _rx) = app_with(RecordingShare::default());
        press(&mut app, KeyCode::Enter);
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
        assert!(!app.pump_running());
    }

    #[test]
    fn test_input_closed_quits_while_running() {
        let (mut app, _rx) = app_with(RecordingShare::default());
        press(&mut app, KeyCode::Enter);
        ticks(&mut app, 10);
        app.handle_event(AppEvent::InputClosed);
        assert!(app.should_quit);
        // No keyboard left to answer a confirm dialog
        assert!(!app.confirm_exit);
        assert!(!app.is_running());
        assert!(!app.pump_running());
        assert_eq!(app.stopwatch.timer.elapsed_ms(), 100);
    }

    #[test]
    fn test_help_overlay() {
        let (mut app, _rx) = app_with(RecordingShare::default());
        press(&mut app, KeyCode::Char('?'));
        assert!(app.help_visible);
        // Dismissing does not also act on the key
        press(&mut app, KeyCode::Enter);
        assert!(!app.help_visible);
        assert!(!app.is_running());
    }

    #[test]
    fn test_release_events_ignored() {
        let (mut app, _rx) = app_with(RecordingShare::default());
        let mut key = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        app.handle_key(key);
        assert!(!app.is_running());
    }
}
