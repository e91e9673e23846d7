use config::{Config, Environment};
use serde::Deserialize;

/// Everything the job reads at startup. Any field can be overridden through
/// the environment with an `SC_` prefix, e.g. `SC_TIMEOUT_SECS=25`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Site root the monthly ephemeris pages live under.
    pub base_url: String,
    /// Directory the yearly snapshot is written to.
    pub out_dir: String,
    /// Sent verbatim; the site serves a stripped-down page to unknown agents.
    pub user_agent: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Extra attempts after the first failed request for a month.
    pub retries: u32,
    /// Pause between attempts for the same month, in milliseconds.
    pub retry_delay_ms: u64,
    /// Minimum spacing between monthly requests, in milliseconds.
    pub sleep_between_months_ms: u64,
    /// Build this year instead of the next calendar year.
    pub year: Option<i32>,
}

impl Default for Settings {
    // Tuned for unattended runs: short timeout, single retry, small pause.
    fn default() -> Self {
        Self {
            base_url: "https://horoscopes.astro-seek.com".into(),
            out_dir: "ephemeris".into(),
            user_agent: "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/124.0 Safari/537.36"
                .into(),
            timeout_secs: 10,
            retries: 1,
            retry_delay_ms: 800,
            sleep_between_months_ms: 250,
            year: None,
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self, config::ConfigError> {
        Config::builder()
            .add_source(Environment::with_prefix("SC").try_parsing(true))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_tuning() {
        let s = Settings::default();
        assert_eq!(s.out_dir, "ephemeris");
        assert_eq!(s.timeout_secs, 10);
        assert_eq!(s.retries, 1);
        assert_eq!(s.retry_delay_ms, 800);
        assert_eq!(s.sleep_between_months_ms, 250);
        assert_eq!(s.year, None);
        assert!(s.base_url.starts_with("https://"));
    }

    #[test]
    fn environment_overrides_defaults() {
        std::env::set_var("SC_RETRIES", "7");
        std::env::set_var("SC_OUT_DIR", "elsewhere");
        std::env::set_var("SC_YEAR", "2031");
        let s = Settings::load().unwrap();
        std::env::remove_var("SC_RETRIES");
        std::env::remove_var("SC_OUT_DIR");
        std::env::remove_var("SC_YEAR");

        assert_eq!(s.retries, 7);
        assert_eq!(s.out_dir, "elsewhere");
        assert_eq!(s.year, Some(2031));
        // untouched fields keep their defaults
        assert_eq!(s.timeout_secs, 10);
    }
}
