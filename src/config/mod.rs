pub mod file;
pub mod theme;

pub use self::{
    file::FileConfig,
    theme::{ColorStyles, Theme},
};

use std::env;

use crate::{cli::Args, BayouError};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const USER_AGENT: &str = concat!("bayou/", env!("CARGO_PKG_VERSION"));

// The catalog document, relative to the working directory, unless the
// config file or the command line says otherwise.
pub const DEFAULT_CATALOG: &str = "tours.json";

const ANALYTICS_VAR: &str = "BAYOU_ANALYTICS";

// Program-wide configuration, derived from merging default values with the
// config file and the command line arguments.
#[derive(Debug, Default)]
pub struct Config {
    pub check_version: bool,
    pub list: bool,
    pub source: String,
    pub analytics: Option<String>,
    pub activity: Option<String>,
    pub price: Option<String>,
    pub query: Option<String>,
    pub theme: Theme,
    term_bg: bool,
    term_color: bool,
    default_color: bool,
}

impl Config {
    pub fn parse_config() -> Result<Self, BayouError> {
        let mut config = Self::default();
        let file_config = FileConfig::deserialize().unwrap_or_default();
        let args = Args::parse_args()?;

        if args.check_version {
            config.check_version = true;

            return Ok(config);
        }

        config.parse_source(&file_config, &args);
        config.merge_flags(&file_config, &args);
        config.parse_colors(file_config, args)?;

        Ok(config)
    }

    fn parse_source(&mut self, file_config: &FileConfig, args: &Args) {
        self.source = args
            .catalog
            .as_ref()
            .or(file_config.catalog.as_ref())
            .cloned()
            .unwrap_or_else(|| DEFAULT_CATALOG.to_string());

        // The environment wins over the config file, so a shell can turn
        // tracking on or off without editing anything.
        self.analytics = env::var(ANALYTICS_VAR)
            .ok()
            .filter(|endpoint| !endpoint.is_empty())
            .or_else(|| file_config.analytics.clone());
    }

    fn merge_flags(&mut self, file_config: &FileConfig, args: &Args) {
        // Update `self` with the config file settings.
        if let Some(v) = file_config.term_bg {
            self.term_bg = v;
        }
        if let Some(v) = file_config.term_color {
            self.term_color = v;
        }
        if let Some(v) = file_config.default_color {
            self.default_color = v;
        }

        // Update `self` with the command line args.
        self.list |= args.list;
        self.term_bg |= args.term_bg;
        self.term_color |= args.term_color;
        self.default_color |= args.default_color;
        self.activity = args.activity.clone();
        self.price = args.price.clone();
        self.query = args.query.clone();
    }

    fn parse_colors(&mut self, file_config: FileConfig, args: Args) -> Result<(), BayouError> {
        let mut theme = Theme::default();

        if self.default_color {
            self.theme = theme;

            return Ok(());
        }

        let args_theme: Theme = args.color.unwrap_or_default().try_into()?;
        let file_theme: Theme = file_config.color.unwrap_or_default().into();
        let term_bg = self.term_bg && args_theme.get("bg").is_none();

        if self.term_color && args_theme.is_empty() {
            theme.set_term_colors();
        } else {
            theme.extend(file_theme);
            theme.extend(args_theme);

            if term_bg {
                theme.set_term_bg();
            }
        }

        self.theme = theme;

        Ok(())
    }
}
