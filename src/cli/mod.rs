pub mod args;
pub mod logger;

use {anyhow::Context, colored::Colorize, reqwest::blocking::Client, serde::Deserialize};

use crate::{
    browser::{card::BADGE, Card, NO_RESULTS},
    catalog::{Activity, Catalog, CatalogFilter, PriceBucket},
    config::{self, Config},
    BayouError,
};

pub use self::{args::Args, logger::Logger};

const RELEASES_URL: &str = "https://api.github.com/repos/bayou-tui/bayou/releases/latest";

pub struct Cli {}

impl Cli {
    // Loads the catalog, applies the filters given on the command line and
    // prints the matching tours: same pipeline, same card fragments, no TUI.
    pub fn list(config: &Config) -> Result<(), BayouError> {
        let logger = Logger::start("loading catalog");
        let catalog = Catalog::load(&config.source)
            .with_context(|| format!("Unable to load the tour catalog from {:?}", config.source))?;
        logger.stop();

        let filter = CatalogFilter {
            activity: config
                .activity
                .as_deref()
                .map(|token| token.parse::<Activity>().expect("every token parses")),
            price: config.price.as_deref().map(PriceBucket::parse).unwrap_or_default(),
            query: config.query.clone().unwrap_or_default(),
        };

        let results = catalog.apply_filter(&filter).sorted_by_quality();

        println!("{}/{} tours", results.len(), catalog.len());

        if results.is_empty() {
            println!("{}", NO_RESULTS);
            return Ok(());
        }

        for tour in results.iter() {
            Self::print_card(&Card::from(tour));
        }

        Ok(())
    }

    fn print_card(card: &Card) {
        println!();

        if card.free_cancellation {
            println!("{}  {}", card.title.bold(), format!("[{BADGE}]").blue());
        } else {
            println!("{}", card.title.bold());
        }

        let mut meta = format!("{}  {}", card.price_label.green(), card.tag.cyan());
        if let Some(duration) = &card.duration {
            meta.push_str(&format!("  {duration}"));
        }
        println!("  {meta}");
        println!("  {}", card.description);

        if let Some(link) = &card.booking_link {
            println!("  {}", link.dimmed());
        }
    }

    pub fn check_version() -> Result<(), BayouError> {
        let prefix = "[bayou]:";

        match Self::fetch_latest_version() {
            Ok(latest_version) if config::VERSION == latest_version => {
                println!(
                    "{} You're using the latest version: {}",
                    prefix,
                    config::VERSION
                );
            }
            Ok(latest_version) => {
                println!(
                    "{} You're using version: {}. A new version is available: {}",
                    prefix, config::VERSION, latest_version
                );
            }
            Err(_) => {
                println!("{} You're using version: {}", prefix, config::VERSION);
            }
        }

        Ok(())
    }

    fn fetch_latest_version() -> Result<String, BayouError> {
        #[derive(Deserialize)]
        struct GitHubRelease {
            tag_name: String,
        }

        let client = Client::builder().user_agent(config::USER_AGENT).build()?;
        let response = client.get(RELEASES_URL).send()?.json::<GitHubRelease>()?;

        let version = response
            .tag_name
            .strip_prefix('v')
            .unwrap_or(&response.tag_name)
            .to_string();

        Ok(version)
    }
}
