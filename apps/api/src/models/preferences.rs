use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompanySize {
    Startup,
    MidSize,
    Enterprise,
}

impl CompanySize {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "startup" => Some(CompanySize::Startup),
            "mid-size" | "midsize" | "mid size" => Some(CompanySize::MidSize),
            "enterprise" => Some(CompanySize::Enterprise),
            _ => None,
        }
    }
}

/// Salary expectations. Any bound may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalaryPreference {
    #[serde(default, deserialize_with = "whole_number")]
    pub min: Option<u64>,
    #[serde(default, deserialize_with = "whole_number")]
    pub max: Option<u64>,
    #[serde(default, deserialize_with = "loose_string")]
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CulturePreferences {
    /// Ordered, most important first.
    #[serde(default, deserialize_with = "string_list")]
    pub culture_priorities: Vec<String>,
    #[serde(
        default,
        deserialize_with = "lenient_company_size",
        skip_serializing_if = "Option::is_none"
    )]
    pub company_size: Option<CompanySize>,
    #[serde(
        default,
        deserialize_with = "loose_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub industry: Option<String>,
}

/// Partial job-search criteria. Every field is optional; absence means unconstrained.
///
/// Model output is accepted field by field: a value of the wrong shape drops only that
/// field. `null` lists become empty, non-string list items are skipped, unknown company
/// sizes are dropped, numeric strings and fractional years are rounded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceProfile {
    #[serde(
        default,
        deserialize_with = "loose_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub role: Option<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub skills: Vec<String>,
    #[serde(
        default,
        deserialize_with = "loose_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub location: Option<String>,
    #[serde(
        default,
        deserialize_with = "loose_bool",
        skip_serializing_if = "Option::is_none"
    )]
    pub remote: Option<bool>,
    #[serde(
        default,
        deserialize_with = "lenient_block",
        skip_serializing_if = "Option::is_none"
    )]
    pub salary: Option<SalaryPreference>,
    #[serde(
        default,
        deserialize_with = "whole_number_u32",
        skip_serializing_if = "Option::is_none"
    )]
    pub experience_years: Option<u32>,
    #[serde(default, deserialize_with = "lenient_default")]
    pub preferences: CulturePreferences,
    #[serde(default, deserialize_with = "string_list")]
    pub must_haves: Vec<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub nice_to_haves: Vec<String>,
}

impl PreferenceProfile {
    /// The role, unless it is missing or blank.
    pub fn role(&self) -> Option<&str> {
        non_blank(self.role.as_deref())
    }

    /// The location, unless it is missing or blank.
    pub fn location(&self) -> Option<&str> {
        non_blank(self.location.as_deref())
    }

    pub fn wants_remote(&self) -> bool {
        self.remote == Some(true)
    }

    /// Skills with case-insensitive duplicates removed, first spelling kept.
    pub fn distinct_skills(&self) -> Vec<&str> {
        let mut seen: Vec<String> = Vec::with_capacity(self.skills.len());
        let mut distinct = Vec::with_capacity(self.skills.len());
        for skill in &self.skills {
            let key = skill.to_lowercase();
            if !seen.contains(&key) {
                seen.push(key);
                distinct.push(skill.as_str());
            }
        }
        distinct
    }

    pub fn has_culture_priority(&self, priority: &str) -> bool {
        self.preferences
            .culture_priorities
            .iter()
            .any(|p| p == priority)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items,
        Some(single @ Value::String(_)) => vec![single],
        _ => Vec::new(),
    };
    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s),
            _ => None,
        })
        .collect())
}

fn loose_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn loose_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Bool(b)) => Some(b),
        Some(Value::String(s)) => match s.trim().to_lowercase().as_str() {
            "true" | "yes" | "y" => Some(true),
            "false" | "no" | "n" => Some(false),
            _ => None,
        },
        _ => None,
    })
}

/// A nested object that falls back to `None` when it does not fit.
fn lenient_block<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    Ok(Option::<Value>::deserialize(deserializer)?
        .and_then(|value| serde_json::from_value(value).ok()))
}

fn lenient_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned + Default,
{
    Ok(lenient_block(deserializer)?.unwrap_or_default())
}

fn lenient_company_size<'de, D>(deserializer: D) -> Result<Option<CompanySize>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = loose_string(deserializer)?;
    Ok(raw.as_deref().and_then(CompanySize::parse))
}

fn whole_number<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(raw.filter(|n| n.is_finite() && *n >= 0.0).map(|n| n.round() as u64))
}

fn whole_number_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(whole_number(deserializer)?.and_then(|n| u32::try_from(n).ok()))
}
