use serde::{Deserialize, Serialize};

/// Env var naming a TOML file to load settlement config from.
pub const CONFIG_ENV: &str = "FAIRWAY_SETTLEMENT_CONFIG";
/// Fallback config path, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config/settlement.toml";

/// Data-driven settlement rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettlementConfig {
    pub skins: SkinsConfig,
    pub nassau: NassauConfig,
    /// Largest ledger imbalance still treated as zero.
    pub zero_sum_tolerance: f64,
}

impl Default for SettlementConfig {
    fn default() -> Self {
        Self {
            skins: SkinsConfig::default(),
            nassau: NassauConfig::default(),
            zero_sum_tolerance: 1e-9,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkinsConfig {
    /// Tied holes roll their pot into the next decided hole. When false a
    /// tied hole is simply dead.
    pub carry_over: bool,
}

impl Default for SkinsConfig {
    fn default() -> Self {
        Self { carry_over: true }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NassauConfig {
    /// Holes down before a side may press.
    pub press_threshold: u8,
    /// Open a press automatically the hole after a bet first reaches the
    /// threshold.
    pub auto_press: bool,
}

impl Default for NassauConfig {
    fn default() -> Self {
        Self {
            press_threshold: 2,
            auto_press: false,
        }
    }
}

impl SettlementConfig {
    /// Load config from the file named by `FAIRWAY_SETTLEMENT_CONFIG`, then
    /// `config/settlement.toml`, falling back to defaults.
    pub fn load() -> Self {
        if let Ok(path) = std::env::var(CONFIG_ENV)
            && let Some(config) = Self::read(&path)
        {
            return config;
        }
        Self::read(DEFAULT_CONFIG_PATH).unwrap_or_default()
    }

    /// `None` if the file is missing or malformed.
    fn read(path: &str) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        match Self::from_toml(&contents) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!("Failed to parse {path}: {e}, using defaults");
                None
            },
        }
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
