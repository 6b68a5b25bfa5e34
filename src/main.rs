mod app;
mod browser;
mod catalog;
mod cli;
mod config;
mod debounce;
mod track;
mod utils;

pub type BayouError = anyhow::Error;

fn main() {
    if let Err(err) = app::App::run() {
        eprintln!("[bayou error]: {err}");
        std::process::exit(1);
    }
}
