//! Client configuration

use crate::MAX_TRIES;

/// Session configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Web base URL used when rendering share links
    pub www_url: String,
    /// Maximum retry passes for chunks and attempts for the index
    pub max_tries: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            www_url: "https://www.blindupload.org".to_string(),
            max_tries: MAX_TRIES,
        }
    }
}

impl Config {
    /// Create a config with the given web base URL
    pub fn new(www_url: impl Into<String>) -> Self {
        Self {
            www_url: www_url.into().trim_end_matches('/').to_string(),
            ..Default::default()
        }
    }

    /// Set the retry bound
    pub fn with_max_tries(mut self, max_tries: u32) -> Self {
        self.max_tries = max_tries;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_retry_bound() {
        assert_eq!(Config::default().max_tries, 10);
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = Config::new("https://example.org/");
        assert_eq!(config.www_url, "https://example.org");
    }
}
