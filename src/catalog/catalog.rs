use std::{fs, ops::Deref, thread, time::Duration};

use {
    anyhow::Context,
    cursive::{CbSink, Cursive},
    reqwest::blocking::Client,
};

use crate::{
    browser::{BrowserView, ErrorView},
    catalog::Tour,
    config,
    BayouError,
};

// The full, unfiltered collection of tours. Set once by the loader and
// never filtered in place; filtering produces a new, derived `Catalog`.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    tours: Vec<Tour>,
}

impl Catalog {
    // Loads the catalog from a file path or an http(s) URL. One-shot: no
    // retries, no polling, no partial reads.
    pub fn load(source: &str) -> Result<Self, BayouError> {
        let raw = if is_url(source) {
            fetch(source)?
        } else {
            fs::read_to_string(source)?
        };

        let tours: Vec<Tour> = serde_json::from_str(&raw)?;

        Ok(Self { tours })
    }

    // Fetches and parses the catalog off the UI thread, then hands the
    // result back to the cursive event loop. On success the browser's
    // working set is installed and an unfiltered render is triggered; on
    // failure the listing area is replaced with the error view.
    pub fn load_in_background(source: String, cb_sink: CbSink) {
        thread::spawn(move || {
            let result = Self::load(&source).with_context(|| {
                format!("Unable to load the tour catalog from {source:?}")
            });

            _ = cb_sink.send(Box::new(move |siv: &mut Cursive| match result {
                Ok(catalog) => BrowserView::set_catalog(siv, catalog),
                Err(err) => ErrorView::load(siv, err),
            }));
        });
    }
}

impl From<Vec<Tour>> for Catalog {
    fn from(tours: Vec<Tour>) -> Self {
        Self { tours }
    }
}

impl Deref for Catalog {
    type Target = Vec<Tour>;

    fn deref(&self) -> &Self::Target {
        &self.tours
    }
}

fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

fn fetch(url: &str) -> Result<String, BayouError> {
    let client = Client::builder()
        .user_agent(config::USER_AGENT)
        .timeout(Duration::from_secs(30))
        .build()?;

    let body = client.get(url).send()?.error_for_status()?.text()?;

    Ok(body)
}
