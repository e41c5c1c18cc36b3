use std::path::PathBuf;

use crate::error::ConfigError;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_QUESTIONS_FILE: &str = "questions.json";
pub const DEFAULT_QUESTIONS_PER_TEST: usize = 20;

#[derive(Debug, Clone)]
pub struct Config {
    pub bot_token: String,
    pub port: u16,
    pub questions_file: PathBuf,
    pub questions_per_test: usize,
}

impl Config {
    /// Reads `BOT_TOKEN` (required), `PORT`, `QUESTIONS_FILE` and `QUESTIONS_PER_TEST`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bot_token = lookup("BOT_TOKEN")
            .filter(|token| !token.trim().is_empty())
            .ok_or(ConfigError::MissingToken)?;

        let port = match lookup("PORT") {
            Some(value) => parse_number("PORT", value)?,
            None => DEFAULT_PORT,
        };

        let questions_file = lookup("QUESTIONS_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_QUESTIONS_FILE));

        let questions_per_test = match lookup("QUESTIONS_PER_TEST") {
            Some(value) => parse_number("QUESTIONS_PER_TEST", value)?,
            None => DEFAULT_QUESTIONS_PER_TEST,
        };
        if questions_per_test == 0 {
            return Err(ConfigError::EmptyTest);
        }

        Ok(Self {
            bot_token,
            port,
            questions_file,
            questions_per_test,
        })
    }
}

fn parse_number<T: std::str::FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber { name, value })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_only_token_is_set() {
        let config = Config::from_lookup(lookup_from(&[("BOT_TOKEN", "123:abc")])).unwrap();
        assert_eq!(config.bot_token, "123:abc");
        assert_eq!(config.port, 8080);
        assert_eq!(config.questions_file, PathBuf::from("questions.json"));
        assert_eq!(config.questions_per_test, 20);
    }

    #[test]
    fn missing_token_is_fatal() {
        let err = Config::from_lookup(lookup_from(&[("PORT", "9000")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingToken));

        let err = Config::from_lookup(lookup_from(&[("BOT_TOKEN", "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingToken));
    }

    #[test]
    fn overrides_are_parsed() {
        let config = Config::from_lookup(lookup_from(&[
            ("BOT_TOKEN", "t"),
            ("PORT", "3000"),
            ("QUESTIONS_FILE", "/data/bank.json"),
            ("QUESTIONS_PER_TEST", "5"),
        ]))
        .unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.questions_file, PathBuf::from("/data/bank.json"));
        assert_eq!(config.questions_per_test, 5);
    }

    #[test]
    fn bad_numbers_are_rejected() {
        let err = Config::from_lookup(lookup_from(&[("BOT_TOKEN", "t"), ("PORT", "http")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { name: "PORT", .. }));

        let err = Config::from_lookup(lookup_from(&[
            ("BOT_TOKEN", "t"),
            ("QUESTIONS_PER_TEST", "0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::EmptyTest));
    }
}
