//! Typed user prompt settings.
//!
//! Settings travel as loosely typed key/value pairs (JSON request bodies,
//! `user_prompt_settings.setting_value` text rows, `prompt_rules.default_value`)
//! and are resolved here into a closed, typed [`PromptSettings`] record.
//!
//! Resolution order for each key: request value, saved user value, the active
//! configuration's rule default, then the built-in default.

use std::collections::BTreeMap;

use crate::error::CoreError;

/// Loosely typed settings as stored in the database: rule key -> text value.
pub type RawSettings = BTreeMap<String, String>;

// ---------------------------------------------------------------------------
// Keys
// ---------------------------------------------------------------------------

pub const KEY_NEWS_TYPE: &str = "newsType";
pub const KEY_TARGET_CATEGORY: &str = "targetCategory";
pub const KEY_TITLE_CITY_INFO: &str = "titleCityInfo";
pub const KEY_REMOVE_COMPANY_INFO: &str = "removeCompanyInfo";
pub const KEY_REMOVE_PLATE_INFO: &str = "removePlateInfo";
pub const KEY_TAG_COUNT: &str = "tagCount";
pub const KEY_NAME_CENSORSHIP: &str = "nameCensorship";
pub const KEY_WRITING_STYLE: &str = "writingStyle";
pub const KEY_OUTPUT_FORMAT: &str = "outputFormat";
pub const KEY_CUSTOM_INSTRUCTIONS: &str = "customInstructions";

/// Every recognized setting key.
pub const ALL_SETTING_KEYS: &[&str] = &[
    KEY_NEWS_TYPE,
    KEY_TARGET_CATEGORY,
    KEY_TITLE_CITY_INFO,
    KEY_REMOVE_COMPANY_INFO,
    KEY_REMOVE_PLATE_INFO,
    KEY_TAG_COUNT,
    KEY_NAME_CENSORSHIP,
    KEY_WRITING_STYLE,
    KEY_OUTPUT_FORMAT,
    KEY_CUSTOM_INSTRUCTIONS,
];

/// Inclusive bounds for `tagCount`.
pub const MIN_TAG_COUNT: u8 = 1;
pub const MAX_TAG_COUNT: u8 = 10;

/// Maximum length of `customInstructions` in characters.
pub const MAX_CUSTOM_INSTRUCTIONS_CHARS: usize = 2_000;

pub fn is_known_key(key: &str) -> bool {
    ALL_SETTING_KEYS.contains(&key)
}

// ---------------------------------------------------------------------------
// Enumerated values
// ---------------------------------------------------------------------------

/// Shape of the rewritten article.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewsType {
    Social,
    Comprehensive,
}

impl NewsType {
    /// Unknown values read as [`NewsType::Comprehensive`].
    pub fn from_setting(value: &str) -> Self {
        match value.trim() {
            "social" => Self::Social,
            _ => Self::Comprehensive,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Social => "social",
            Self::Comprehensive => "comprehensive",
        }
    }
}

/// Whether the headline should mention the city.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CityInfo {
    Include,
    Exclude,
    /// Leave it to the model.
    Auto,
}

impl CityInfo {
    pub fn from_setting(value: &str) -> Result<Self, CoreError> {
        match value.trim() {
            "auto" | "" => Ok(Self::Auto),
            "include" => Ok(Self::Include),
            "exclude" => Ok(Self::Exclude),
            other => parse_bool(KEY_TITLE_CITY_INFO, other).map(|include| {
                if include {
                    Self::Include
                } else {
                    Self::Exclude
                }
            }),
        }
    }

    fn snapshot(self) -> serde_json::Value {
        match self {
            Self::Include => serde_json::Value::Bool(true),
            Self::Exclude => serde_json::Value::Bool(false),
            Self::Auto => serde_json::Value::String("auto".into()),
        }
    }
}

/// How personal names in the article are censored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameCensorship {
    None,
    /// "Ahmet K." style.
    Initials,
    /// "A.B." style.
    Full,
    /// Unrecognized value; a generic censorship instruction is used.
    Generic,
}

impl NameCensorship {
    pub fn from_setting(value: &str) -> Self {
        match value.trim() {
            "none" => Self::None,
            "initials" | "partial" => Self::Initials,
            "full" => Self::Full,
            other => {
                tracing::debug!(value = other, "Unrecognized nameCensorship, using generic rule");
                Self::Generic
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Initials => "initials",
            Self::Full => "full",
            Self::Generic => "generic",
        }
    }
}

/// Register of the rewritten text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WritingStyle {
    Formal,
    Informal,
    Neutral,
    /// Unrecognized value; the default (formal) wording is used.
    Default,
}

impl WritingStyle {
    pub fn from_setting(value: &str) -> Self {
        match value.trim() {
            "formal" => Self::Formal,
            "informal" => Self::Informal,
            "neutral" => Self::Neutral,
            other => {
                tracing::debug!(value = other, "Unrecognized writingStyle, using default");
                Self::Default
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Formal => "formal",
            Self::Informal => "informal",
            Self::Neutral => "neutral",
            Self::Default => "default",
        }
    }
}

/// Serialization the model is asked to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Xml,
    Plain,
}

impl OutputFormat {
    /// Unknown values read as [`OutputFormat::Json`].
    pub fn from_setting(value: &str) -> Self {
        match value.trim() {
            "json" => Self::Json,
            "xml" => Self::Xml,
            "plain" | "text" => Self::Plain,
            other => {
                tracing::debug!(value = other, "Unrecognized outputFormat, using json");
                Self::Json
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Xml => "xml",
            Self::Plain => "plain",
        }
    }
}

/// Preferred category for the article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetCategory {
    Auto,
    /// A category key (`ekonomi`) or display name (`Ekonomi`).
    Named(String),
}

impl TargetCategory {
    pub fn from_setting(value: &str) -> Self {
        match value.trim() {
            "" | "auto" => Self::Auto,
            other => Self::Named(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Auto => "auto",
            Self::Named(name) => name,
        }
    }
}

// ---------------------------------------------------------------------------
// PromptSettings
// ---------------------------------------------------------------------------

/// The fully resolved, validated settings for one prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptSettings {
    pub news_type: NewsType,
    pub target_category: TargetCategory,
    pub title_city_info: CityInfo,
    pub remove_company_info: bool,
    pub remove_plate_info: bool,
    pub tag_count: u8,
    pub name_censorship: NameCensorship,
    pub writing_style: WritingStyle,
    pub output_format: OutputFormat,
    pub custom_instructions: String,
}

impl Default for PromptSettings {
    fn default() -> Self {
        Self {
            news_type: NewsType::Comprehensive,
            target_category: TargetCategory::Auto,
            title_city_info: CityInfo::Exclude,
            remove_company_info: true,
            remove_plate_info: true,
            tag_count: 5,
            name_censorship: NameCensorship::Initials,
            writing_style: WritingStyle::Formal,
            output_format: OutputFormat::Json,
            custom_instructions: String::new(),
        }
    }
}

impl PromptSettings {
    /// Resolve settings from layered raw values, highest priority first.
    ///
    /// Keys missing from every layer keep their built-in default. Keys not in
    /// [`ALL_SETTING_KEYS`] are ignored.
    pub fn resolve(layers: &[&RawSettings]) -> Result<Self, CoreError> {
        let mut settings = Self::default();
        for key in ALL_SETTING_KEYS {
            if let Some(value) = layers.iter().find_map(|layer| layer.get(*key)) {
                settings.apply(key, value)?;
            }
        }
        Ok(settings)
    }

    /// Apply a single raw value to this record.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
        match key {
            KEY_NEWS_TYPE => self.news_type = NewsType::from_setting(value),
            KEY_TARGET_CATEGORY => self.target_category = TargetCategory::from_setting(value),
            KEY_TITLE_CITY_INFO => self.title_city_info = CityInfo::from_setting(value)?,
            KEY_REMOVE_COMPANY_INFO => self.remove_company_info = parse_bool(key, value)?,
            KEY_REMOVE_PLATE_INFO => self.remove_plate_info = parse_bool(key, value)?,
            KEY_TAG_COUNT => self.tag_count = parse_tag_count(value)?,
            KEY_NAME_CENSORSHIP => self.name_censorship = NameCensorship::from_setting(value),
            KEY_WRITING_STYLE => self.writing_style = WritingStyle::from_setting(value),
            KEY_OUTPUT_FORMAT => self.output_format = OutputFormat::from_setting(value),
            KEY_CUSTOM_INSTRUCTIONS => {
                self.custom_instructions = validate_custom_instructions(value)?.to_string()
            }
            other => {
                return Err(CoreError::Validation(format!(
                    "Unknown setting '{other}'"
                )))
            }
        }
        Ok(())
    }

    /// JSON snapshot of the effective settings, stored with each history row.
    pub fn snapshot(&self) -> serde_json::Value {
        serde_json::json!({
            KEY_NEWS_TYPE: self.news_type.as_str(),
            KEY_TARGET_CATEGORY: self.target_category.as_str(),
            KEY_TITLE_CITY_INFO: self.title_city_info.snapshot(),
            KEY_REMOVE_COMPANY_INFO: self.remove_company_info,
            KEY_REMOVE_PLATE_INFO: self.remove_plate_info,
            KEY_TAG_COUNT: self.tag_count,
            KEY_NAME_CENSORSHIP: self.name_censorship.as_str(),
            KEY_WRITING_STYLE: self.writing_style.as_str(),
            KEY_OUTPUT_FORMAT: self.output_format.as_str(),
            KEY_CUSTOM_INSTRUCTIONS: self.custom_instructions,
        })
    }
}

// ---------------------------------------------------------------------------
// Raw value handling
// ---------------------------------------------------------------------------

/// Convert a JSON request value to the text form stored in the database.
///
/// Strings pass through, booleans become `true`/`false`, numbers use their
/// JSON representation and `null` becomes an empty string. Arrays and objects
/// are rejected.
pub fn json_value_to_setting(key: &str, value: &serde_json::Value) -> Result<String, CoreError> {
    match value {
        serde_json::Value::String(s) => Ok(s.clone()),
        serde_json::Value::Bool(b) => Ok(b.to_string()),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Null => Ok(String::new()),
        _ => Err(CoreError::Validation(format!(
            "Setting '{key}' must be a string, number or boolean"
        ))),
    }
}

/// Convert a JSON object of request settings into [`RawSettings`].
///
/// Unknown keys are rejected so typos surface as 400s instead of being
/// silently ignored.
pub fn raw_from_json(
    values: &serde_json::Map<String, serde_json::Value>,
) -> Result<RawSettings, CoreError> {
    values
        .iter()
        .map(|(key, value)| {
            if !is_known_key(key) {
                return Err(CoreError::Validation(format!("Unknown setting '{key}'")));
            }
            Ok((key.clone(), json_value_to_setting(key, value)?))
        })
        .collect()
}

/// Validate and normalize a single value for persistence.
///
/// Runs the same parser used during resolution so a saved value can never
/// break a later prompt build.
pub fn normalize_setting(key: &str, value: &str) -> Result<String, CoreError> {
    let mut parsed = PromptSettings::default();
    parsed.apply(key, value)?;
    Ok(match key {
        KEY_REMOVE_COMPANY_INFO => parsed.remove_company_info.to_string(),
        KEY_REMOVE_PLATE_INFO => parsed.remove_plate_info.to_string(),
        KEY_TAG_COUNT => parsed.tag_count.to_string(),
        KEY_TITLE_CITY_INFO => match parsed.title_city_info {
            CityInfo::Include => "true".to_string(),
            CityInfo::Exclude => "false".to_string(),
            CityInfo::Auto => "auto".to_string(),
        },
        _ => value.trim().to_string(),
    })
}

/// Effective settings for display: every rule key with the saved value when
/// present, otherwise the rule default.
pub fn effective_settings(saved: &RawSettings, rule_defaults: &RawSettings) -> RawSettings {
    rule_defaults
        .iter()
        .map(|(key, default)| {
            let value = saved.get(key).unwrap_or(default);
            (key.clone(), value.clone())
        })
        .collect()
}

fn parse_bool(key: &str, value: &str) -> Result<bool, CoreError> {
    match value.trim() {
        "true" | "True" | "TRUE" | "1" | "yes" | "on" => Ok(true),
        "false" | "False" | "FALSE" | "0" | "no" | "off" => Ok(false),
        other => Err(CoreError::Validation(format!(
            "Setting '{key}' must be a boolean (got '{other}')"
        ))),
    }
}

fn parse_tag_count(value: &str) -> Result<u8, CoreError> {
    let count: u8 = value.trim().parse().map_err(|_| {
        CoreError::Validation(format!(
            "Setting '{KEY_TAG_COUNT}' must be an integer (got '{value}')"
        ))
    })?;
    if !(MIN_TAG_COUNT..=MAX_TAG_COUNT).contains(&count) {
        return Err(CoreError::Validation(format!(
            "Setting '{KEY_TAG_COUNT}' must be between {MIN_TAG_COUNT} and {MAX_TAG_COUNT} (got {count})"
        )));
    }
    Ok(count)
}

fn validate_custom_instructions(value: &str) -> Result<&str, CoreError> {
    let trimmed = value.trim();
    let chars = trimmed.chars().count();
    if chars > MAX_CUSTOM_INSTRUCTIONS_CHARS {
        return Err(CoreError::Validation(format!(
            "Setting '{KEY_CUSTOM_INSTRUCTIONS}' exceeds maximum length of {MAX_CUSTOM_INSTRUCTIONS_CHARS} characters (got {chars})"
        )));
    }
    Ok(trimmed)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
