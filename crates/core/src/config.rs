use serde::Deserialize;

/// Root application configuration. Loaded from environment variables
/// with the prefix `ADHUB__`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_instance_id")]
    pub instance_id: String,
    #[serde(default)]
    pub billing: BillingConfig,
}

/// Billing/statement settings. The subscription plan table itself is a
/// compile-time constant in `adhub-billing` and is not configurable here.
#[derive(Debug, Clone, Deserialize)]
pub struct BillingConfig {
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "default_proration_days")]
    pub proration_days: u32,
    #[serde(default = "default_statement_due_days")]
    pub statement_due_days: i64,
}

// Default functions
fn default_instance_id() -> String {
    "adhub-01".to_string()
}
fn default_currency() -> String {
    "USD".to_string()
}
fn default_proration_days() -> u32 {
    30
}
fn default_statement_due_days() -> i64 {
    14
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            proration_days: default_proration_days(),
            statement_due_days: default_statement_due_days(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            instance_id: default_instance_id(),
            billing: BillingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder().add_source(
            config::Environment::with_prefix("ADHUB")
                .separator("__")
                .try_parsing(true)
                .list_separator(","),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.billing.currency, "USD");
        assert_eq!(cfg.billing.proration_days, 30);
        assert_eq!(cfg.billing.statement_due_days, 14);
    }
}
