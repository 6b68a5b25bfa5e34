use crate::{
    browser::BrowserView,
    catalog::Catalog,
    cli::Cli,
    config::Config,
    track::Analytics,
    BayouError,
};

pub struct App {}

impl App {
    pub fn run() -> Result<(), BayouError> {
        let config = Config::parse_config()?;

        if config.check_version {
            return Cli::check_version();
        }

        if config.list {
            return Cli::list(&config);
        }

        let analytics = Analytics::new(config.analytics.clone());

        // The cursive root.
        let mut siv = cursive::default();
        siv.set_theme(config.theme.to_cursive());

        // A steady tick so the loading spinner animates.
        siv.set_fps(15);

        // The browser comes up immediately on an empty working set; the
        // one-shot load delivers the catalog through the callback sink.
        BrowserView::load(&mut siv, analytics);
        Catalog::load_in_background(config.source.clone(), siv.cb_sink().clone());

        siv.run();

        Ok(())
    }
}
