use std::{
    io::{self, Write},
    sync::mpsc::{self, Sender},
    thread,
    time::Duration,
};

const TICK: Duration = Duration::from_millis(250);
const FRAMES: [&str; 4] = ["   ", ".  ", ".. ", "..."];

// Animated progress line for the non-interactive mode. Writes to stderr so
// the listing output on stdout stays clean for pipes.
pub struct Logger {
    tx: Sender<()>,
    msg: &'static str,
}

impl Logger {
    pub fn start(msg: &'static str) -> Self {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            for frame in FRAMES.iter().cycle() {
                match rx.try_recv() {
                    Ok(_) | Err(mpsc::TryRecvError::Disconnected) => break,
                    Err(mpsc::TryRecvError::Empty) => {
                        eprint!("\r[bayou]: {msg}{frame} ");
                        io::stderr().flush().unwrap_or_default();
                        thread::sleep(TICK);
                    }
                }
            }
        });

        Logger { tx, msg }
    }

    pub fn stop(&self) {
        let _ = self.tx.send(());
        eprintln!("\r[bayou]: {}... done", self.msg);
    }
}

// Stops the animation on early exits, e.g. when the load fails.
impl Drop for Logger {
    fn drop(&mut self) {
        let _ = self.tx.send(());
    }
}
