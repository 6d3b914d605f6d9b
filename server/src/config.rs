//! Process configuration, loaded from environment variables.

use scrabble::letter_bag::Language;
use std::{env, path::PathBuf, time::Duration};

const DEFAULT_PORT: u16 = 4000;
const DEFAULT_TURN_DURATION_SECS: u64 = 120;
const DEFAULT_MAX_CONSECUTIVE_PASSES: u32 = 6;
const DEFAULT_IDLE_ROOM_THRESHOLD_SECS: u64 = 30 * 60;
const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 5 * 60;
const DEFAULT_TURN_TICK_INTERVAL_MILLIS: u64 = 1_000;

/// Process-wide configuration, populated from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// TCP port the websocket listener binds to.
    pub port: u16,
    /// Permitted client origin for the websocket upgrade. `None` means any
    /// origin is accepted.
    pub origin: Option<String>,
    /// Path to the newline-delimited word list. `None` falls back to the
    /// permissive dictionary stub.
    pub word_list_path: Option<PathBuf>,
    /// Which letter distribution new games are dealt from.
    pub language: Language,
    /// How long a player has to make a move before the turn timer forces a
    /// pass.
    pub turn_duration: Duration,
    /// Consecutive non-scoring actions (passes, and optionally exchanges)
    /// that end a game.
    pub max_consecutive_passes: u32,
    /// How long a room may sit with no connected players before the idle
    /// sweep deletes it.
    pub idle_room_threshold: Duration,
    /// Interval between idle-room sweeps.
    pub sweep_interval: Duration,
    /// Interval between turn-timeout ticks.
    pub turn_tick_interval: Duration,
    /// Whether an `exchange` action counts toward the consecutive-pass
    /// counter that ends the game, in addition to incrementing the
    /// player's pass stat. The source behavior counts it; this is kept
    /// configurable since that behavior may not have been intentional.
    pub exchange_counts_as_pass: bool,
}
impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            origin: None,
            word_list_path: None,
            language: Language::English,
            turn_duration: Duration::from_secs(DEFAULT_TURN_DURATION_SECS),
            max_consecutive_passes: DEFAULT_MAX_CONSECUTIVE_PASSES,
            idle_room_threshold: Duration::from_secs(DEFAULT_IDLE_ROOM_THRESHOLD_SECS),
            sweep_interval: Duration::from_secs(DEFAULT_SWEEP_INTERVAL_SECS),
            turn_tick_interval: Duration::from_millis(DEFAULT_TURN_TICK_INTERVAL_MILLIS),
            exchange_counts_as_pass: true,
        }
    }
}
impl Config {
    /// Builds a [`Config`] from environment variables, falling back to the
    /// spec's documented defaults for anything unset.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            port: env_parsed("PORT").unwrap_or(defaults.port),
            origin: env::var("CLIENT_ORIGIN").ok(),
            word_list_path: env::var("WORDLIST").ok().map(PathBuf::from),
            language: match env::var("LANGUAGE").ok().as_deref() {
                Some("FR") => Language::French,
                Some("EN") => Language::English,
                Some(other) => {
                    log::warn!("unrecognised LANGUAGE={other}, defaulting to EN");
                    Language::English
                }
                None => defaults.language,
            },
            turn_duration: env_parsed("TURN_DURATION_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.turn_duration),
            max_consecutive_passes: env_parsed("MAX_CONSECUTIVE_PASSES")
                .unwrap_or(defaults.max_consecutive_passes),
            idle_room_threshold: env_parsed("IDLE_ROOM_THRESHOLD_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.idle_room_threshold),
            sweep_interval: env_parsed("SWEEP_INTERVAL_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.sweep_interval),
            turn_tick_interval: env_parsed("TURN_TICK_INTERVAL_MILLIS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.turn_tick_interval),
            exchange_counts_as_pass: env_parsed("EXCHANGE_COUNTS_AS_PASS")
                .unwrap_or(defaults.exchange_counts_as_pass),
        }
    }
}

/// Parses an environment variable, logging and ignoring it if present but
/// unparseable (falling through to the caller's default) rather than
/// panicking on a malformed operator override.
fn env_parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = env::var(key).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            log::warn!("ignoring malformed {key}={raw}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_spec() {
        let config = Config::default();
        assert_eq!(config.port, 4000);
        assert_eq!(config.turn_duration, Duration::from_secs(120));
        assert_eq!(config.max_consecutive_passes, 6);
        assert_eq!(config.idle_room_threshold, Duration::from_secs(1_800));
        assert_eq!(config.sweep_interval, Duration::from_secs(300));
        assert_eq!(config.turn_tick_interval, Duration::from_millis(1_000));
        assert!(config.exchange_counts_as_pass);
    }
}
