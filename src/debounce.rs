use std::{
    sync::mpsc::{self, Receiver, RecvTimeoutError, Sender},
    thread,
    time::Duration,
};

type Action = Box<dyn FnOnce() + Send + 'static>;

enum Msg {
    Schedule(Action),
    Cancel,
}

// A trailing debounce timer: an action runs only once a quiet period has
// elapsed since the last `schedule` call. At most one action is pending at
// any time; each new `schedule` supersedes the previous one.
pub struct Debouncer {
    tx: Sender<Msg>,
}

impl Debouncer {
    pub fn new(quiet: Duration) -> Self {
        let (tx, rx) = mpsc::channel::<Msg>();

        thread::spawn(move || Self::run(rx, quiet));

        Debouncer { tx }
    }

    // Schedules `action` to run after the quiet period, replacing any
    // pending action and restarting the window.
    pub fn schedule(&self, action: impl FnOnce() + Send + 'static) {
        _ = self.tx.send(Msg::Schedule(Box::new(action)));
    }

    // Drops the pending action, if any, without running it.
    pub fn cancel(&self) {
        _ = self.tx.send(Msg::Cancel);
    }

    fn run(rx: Receiver<Msg>, quiet: Duration) {
        let mut pending: Option<Action> = None;

        loop {
            let msg = if pending.is_some() {
                // A pending action: wait out the quiet period, firing on
                // timeout unless a new message supersedes it first.
                match rx.recv_timeout(quiet) {
                    Ok(msg) => msg,
                    Err(RecvTimeoutError::Timeout) => {
                        if let Some(action) = pending.take() {
                            action();
                        }
                        continue;
                    }
                    Err(RecvTimeoutError::Disconnected) => break,
                }
            } else {
                // Nothing pending: block until there is work.
                match rx.recv() {
                    Ok(msg) => msg,
                    Err(_) => break,
                }
            };

            match msg {
                Msg::Schedule(action) => pending = Some(action),
                Msg::Cancel => pending = None,
            }
        }
    }
}
