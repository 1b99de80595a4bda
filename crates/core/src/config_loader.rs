use crate::config::AppConfig;
use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use std::path::Path;

/// Default location of the TOML config file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config/insider.toml";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads configuration by merging defaults, a TOML file and environment variables.
    ///
    /// A missing file is not an error. Environment variables use the
    /// `INSIDER_` prefix with `__` between nested keys
    /// (`INSIDER_DATABASE__HOST`), and the plain `TG_TOKEN`, `CHAT_ID` and
    /// `DATABASE_URL` names are honoured as well.
    ///
    /// # Errors
    ///
    /// Returns an error if the file or a variable holds a value of the wrong type.
    pub fn load_from(path: &Path) -> Result<AppConfig> {
        let config: AppConfig = Self::figment(path).extract()?;
        Ok(config)
    }

    fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("INSIDER_").split("__"))
            .merge(
                Env::raw()
                    .only(&["TG_TOKEN", "CHAT_ID", "DATABASE_URL"])
                    .map(|key| match key.as_str().to_ascii_uppercase().as_str() {
                        "TG_TOKEN" => "telegram.token".into(),
                        "CHAT_ID" => "telegram.chat_id".into(),
                        _ => "database.url".into(),
                    }),
            )
    }
}
