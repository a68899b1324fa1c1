use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{select, Receiver, Sender};

use crate::app::AppEvent;

struct Worker {
    stop: Sender<()>,
    handle: JoinHandle<()>,
}

/// Recurring tick source for the main loop. A worker thread exists only
/// between `start` and `stop`; dropping the pump stops it.
pub struct TickPump {
    events: Sender<AppEvent>,
    interval: Duration,
    worker: Option<Worker>,
}

impl TickPump {
    pub fn new(events: Sender<AppEvent>, interval: Duration) -> Self {
        Self {
            events,
            interval,
            worker: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.worker.is_some()
    }

    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }
        let (stop, stop_rx) = crossbeam_channel::bounded(1);
        let events = self.events.clone();
        let interval = self.interval;
        let handle = thread::spawn(move || pump_thread(stop_rx, events, interval));
        log::debug!("tick pump started ({:?})", interval);
        self.worker = Some(Worker { stop, handle });
    }

    pub fn stop(&mut self) {
        if let Some(worker) = self.worker.take() {
            worker.stop.send(()).ok();
            if worker.handle.join().is_err() {
                log::error!("tick pump thread panicked");
            }
            log::debug!("tick pump stopped");
        }
    }
}

impl Drop for TickPump {
    fn drop(&mut self) {
        self.stop();
    }
}

fn pump_thread(stop: Receiver<()>, events: Sender<AppEvent>, interval: Duration) {
    let ticker = crossbeam_channel::tick(interval);
    loop {
        let keep_going = select! {
            // Fails once the main loop is gone
            recv(ticker) -> _ => events.send(AppEvent::Tick).is_ok(),
            recv(stop) -> _ => false,
        };
        if !keep_going {
            break;
        }
    }
}
