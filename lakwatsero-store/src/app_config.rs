use serde::Deserialize;
use std::env;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub api: ApiConfig,
    #[serde(default)]
    pub booking: BookingRules,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    pub base_url: url::Url,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

fn default_timeout() -> u64 { 10 }

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct BookingRules {
    #[serde(default = "default_payment_window")]
    pub payment_window_minutes: i64,
    #[serde(default = "default_redirect_delay")]
    pub login_redirect_delay_seconds: u64,
    #[serde(default = "default_redirect_delay")]
    pub confirmation_redirect_delay_seconds: u64,
    #[serde(default = "default_seats_per_row")]
    pub seats_per_row: usize,
    #[serde(default = "default_aisle_after")]
    pub aisle_after: usize,
    #[serde(default = "default_max_passengers")]
    pub max_passengers: usize,
}

fn default_payment_window() -> i64 { 15 }
fn default_redirect_delay() -> u64 { 3 }
fn default_seats_per_row() -> usize { 6 }
fn default_aisle_after() -> usize { 3 }
fn default_max_passengers() -> usize { 9 }

impl Default for BookingRules {
    fn default() -> Self {
        Self {
            payment_window_minutes: default_payment_window(),
            login_redirect_delay_seconds: default_redirect_delay(),
            confirmation_redirect_delay_seconds: default_redirect_delay(),
            seats_per_row: default_seats_per_row(),
            aisle_after: default_aisle_after(),
            max_passengers: default_max_passengers(),
        }
    }
}

impl BookingRules {
    pub fn payment_window(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.payment_window_minutes)
    }

    pub fn login_redirect_delay(&self) -> Duration {
        Duration::from_secs(self.login_redirect_delay_seconds)
    }

    pub fn confirmation_redirect_delay(&self) -> Duration {
        Duration::from_secs(self.confirmation_redirect_delay_seconds)
    }

    pub fn grid_shape(&self) -> lakwatsero_core::seat_map::GridShape {
        lakwatsero_core::seat_map::GridShape {
            seats_per_row: self.seats_per_row,
            aisle_after: self.aisle_after,
        }
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix("LAKWATSERO").separator("__")
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name("config/default"))
            // Per-environment overrides, optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Eg.. `LAKWATSERO__API__BASE_URL=http://...` sets `api.base_url`
            .add_source(environment())
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_booking_section() {
        let s = config::Config::builder()
            .set_override("api.base_url", "http://localhost:4000")
            .unwrap()
            .build()
            .unwrap();
        let cfg: Config = s.try_deserialize().expect("config should deserialize");

        assert_eq!(cfg.api.timeout_seconds, 10);
        assert_eq!(cfg.booking.payment_window_minutes, 15);
        assert_eq!(cfg.booking.login_redirect_delay(), Duration::from_secs(3));
        assert_eq!(cfg.booking.grid_shape(), lakwatsero_core::seat_map::GridShape::default());
        assert_eq!(cfg.booking.max_passengers, 9);
    }

    #[test]
    fn test_environment_keys_use_double_underscore() {
        let vars = config::Map::from([
            ("LAKWATSERO__API__BASE_URL".to_string(), "http://api.example:8080/api".to_string()),
            ("LAKWATSERO__BOOKING__MAX_PASSENGERS".to_string(), "4".to_string()),
        ]);
        let s = config::Config::builder()
            .add_source(environment().try_parsing(true).source(Some(vars)))
            .build()
            .unwrap();
        let cfg: Config = s.try_deserialize().expect("config should deserialize");

        assert_eq!(cfg.api.base_url.as_str(), "http://api.example:8080/api");
        assert_eq!(cfg.booking.max_passengers, 4);
    }
}
