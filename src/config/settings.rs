//! User settings for receipt-splitter
//!
//! Stored as `config.json` in the base directory. Every field has a serde
//! default, so a partial (or empty) file is a valid configuration.

use serde::{Deserialize, Serialize};

use super::paths::SplitterPaths;
use crate::error::{SplitterError, SplitterResult};
use crate::models::People;
use crate::parser::ParserOptions;
use crate::services::DiscountPolicy;
use crate::storage::{read_json_optional, write_json_atomic};

/// Command letters with a fixed meaning during allocation
pub const RESERVED_CODES: [&str; 6] = ["s", "n", "d", "u", "p", "r"];

/// What the idle timeout is measured from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TimeoutScheme {
    /// Fixed budget from the moment the session starts
    #[default]
    SinceStart,
    /// Budget restarts on every processed input
    SinceLastInput,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Seconds before the session shuts itself down
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub timeout_scheme: TimeoutScheme,
}

// Hosting limit of 540s, minus a minute of slack and five seconds for
// the goodbye message.
fn default_timeout_secs() -> u64 {
    540 - 60 - 5
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            timeout_scheme: TimeoutScheme::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SettlementSettings {
    #[serde(default)]
    pub discount_policy: DiscountPolicy,
}

/// Which ledger receives settlement transactions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LedgerBackend {
    /// Append to the local expense journal
    #[default]
    Journal,
    /// Create expenses in a Splitwise group
    Splitwise,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSettings {
    #[serde(default)]
    pub backend: LedgerBackend,
    #[serde(default)]
    pub group_id: i64,
    /// Splitwise user id of person A
    #[serde(default)]
    pub user_id_a: i64,
    /// Splitwise user id of person B
    #[serde(default)]
    pub user_id_b: i64,
    #[serde(default = "default_category_id")]
    pub category_id: i64,
    #[serde(default = "default_currency_code")]
    pub currency_code: String,
    #[serde(default = "default_ledger_api_url")]
    pub api_url: String,
}

fn default_category_id() -> i64 {
    12 // Groceries
}

fn default_currency_code() -> String {
    "EUR".to_string()
}

fn default_ledger_api_url() -> String {
    "https://secure.splitwise.com/api/v3.0".to_string()
}

impl Default for LedgerSettings {
    fn default() -> Self {
        Self {
            backend: LedgerBackend::default(),
            group_id: 0,
            user_id_a: 0,
            user_id_b: 0,
            category_id: default_category_id(),
            currency_code: default_currency_code(),
            api_url: default_ledger_api_url(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisionSettings {
    #[serde(default = "default_vision_api_url")]
    pub api_url: String,
    #[serde(default = "default_vision_model")]
    pub model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Attempts at getting a readable JSON reply for one photo
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

fn default_vision_api_url() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_vision_model() -> String {
    "gpt-4o".to_string()
}

fn default_max_tokens() -> u32 {
    4096
}

fn default_max_attempts() -> u32 {
    3
}

impl Default for VisionSettings {
    fn default() -> Self {
        Self {
            api_url: default_vision_api_url(),
            model: default_vision_model(),
            max_tokens: default_max_tokens(),
            max_attempts: default_max_attempts(),
        }
    }
}

/// User settings for receipt-splitter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    #[serde(default)]
    pub people: People,

    #[serde(default)]
    pub session: SessionSettings,

    #[serde(default)]
    pub parser: ParserOptions,

    #[serde(default)]
    pub settlement: SettlementSettings,

    #[serde(default)]
    pub ledger: LedgerSettings,

    #[serde(default)]
    pub vision: VisionSettings,
}

fn default_schema_version() -> u32 {
    1
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            people: People::default(),
            session: SessionSettings::default(),
            parser: ParserOptions::default(),
            settlement: SettlementSettings::default(),
            ledger: LedgerSettings::default(),
            vision: VisionSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, falling back to defaults when the file is
    /// missing. Loaded settings are validated.
    pub fn load_or_create(paths: &SplitterPaths) -> SplitterResult<Self> {
        let settings: Settings = read_json_optional(paths.settings_file())
            .map_err(|e| SplitterError::Config(format!("Failed to load settings: {}", e)))?
            .unwrap_or_default();
        settings.validate()?;
        Ok(settings)
    }

    pub fn save(&self, paths: &SplitterPaths) -> SplitterResult<()> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
            .map_err(|e| SplitterError::Config(format!("Failed to save settings: {}", e)))
    }

    /// Check the settings for combinations the session cannot work with
    pub fn validate(&self) -> SplitterResult<()> {
        let code_a = self.people.a.code.trim().to_lowercase();
        let code_b = self.people.b.code.trim().to_lowercase();

        for (name, code) in [(&self.people.a.name, &code_a), (&self.people.b.name, &code_b)] {
            if code.is_empty() {
                return Err(SplitterError::Validation(format!(
                    "Command code for {} cannot be empty",
                    name
                )));
            }
            if code.chars().any(char::is_whitespace) {
                return Err(SplitterError::Validation(format!(
                    "Command code for {} cannot contain spaces",
                    name
                )));
            }
            if RESERVED_CODES.contains(&code.as_str()) {
                return Err(SplitterError::Validation(format!(
                    "Command code '{}' for {} is already used by another command",
                    code, name
                )));
            }
        }
        if code_a == code_b {
            return Err(SplitterError::Validation(format!(
                "{} and {} cannot share the command code '{}'",
                self.people.a.name, self.people.b.name, code_a
            )));
        }

        if self.session.timeout_secs == 0 {
            return Err(SplitterError::Validation(
                "session.timeout_secs must be positive".into(),
            ));
        }
        if self.vision.max_attempts == 0 {
            return Err(SplitterError::Validation(
                "vision.max_attempts must be at least 1".into(),
            ));
        }
        if self.ledger.backend == LedgerBackend::Splitwise
            && (self.ledger.group_id == 0 || self.ledger.user_id_a == 0 || self.ledger.user_id_b == 0)
        {
            return Err(SplitterError::Validation(
                "The splitwise backend needs ledger.group_id, ledger.user_id_a and ledger.user_id_b"
                    .into(),
            ));
        }
        Ok(())
    }
}
