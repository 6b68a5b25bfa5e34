use std::{collections::HashMap, env, fs, io, path::PathBuf};

use {anyhow::bail, serde::Deserialize};

use crate::BayouError;

// A struct that represents our `bayou.yml` config file.
#[derive(Default, Deserialize)]
pub struct FileConfig {
    // Path or URL of the tour catalog to browse.
    pub catalog: Option<String>,
    // Endpoint to post booking-click events to. Unset disables tracking.
    pub analytics: Option<String>,
    pub color: Option<HashMap<String, String>>,
    pub term_bg: Option<bool>,
    pub term_color: Option<bool>,
    pub default_color: Option<bool>,
}

impl FileConfig {
    pub fn find() -> Result<PathBuf, BayouError> {
        let mut paths = vec![];

        if let Ok(xdg_config_home) = env::var("XDG_CONFIG_HOME") {
            let xdg_config_home = PathBuf::from(xdg_config_home);
            paths.push(xdg_config_home.join("bayou").join("bayou.yml"));
            paths.push(xdg_config_home.join("bayou.yml"));
        }

        if let Ok(home_dir) = env::var("HOME") {
            let home_dir = PathBuf::from(home_dir);
            paths.push(home_dir.join(".config").join("bayou").join("bayou.yml"));
            paths.push(home_dir.join(".bayou.yml"));
        }

        for path in paths {
            if path.exists() {
                return Ok(path);
            }
        }

        bail!("Config file not found!")
    }

    pub fn deserialize() -> Result<Self, BayouError> {
        let config_path = FileConfig::find()?;
        let mut file = fs::File::open(config_path)?;
        let mut contents = String::new();
        io::Read::read_to_string(&mut file, &mut contents)?;
        let file_config = serde_yaml::from_str(&contents)?;

        Ok(file_config)
    }
}
