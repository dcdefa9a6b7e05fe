//! Result event types emitted by the scan engine.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::severity::{Severity, SeverityHolder};

/// A single finding, in the scanner's JSON-lines output shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ResultEvent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_url: Option<String>,
    pub template_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_path: Option<String>,
    #[serde(default)]
    pub info: Info,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matcher_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extractor_name: Option<String>,
    /// Protocol of the request that produced the finding (http, dns, ...).
    #[serde(rename = "type", default)]
    pub protocol: String,
    #[serde(default)]
    pub host: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(rename = "matched-at", skip_serializing_if = "Option::is_none")]
    pub matched: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extracted_results: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub curl_command: Option<String>,
    #[serde(default)]
    pub matcher_status: bool,
}

impl ResultEvent {
    pub fn new(template_id: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            template_id: template_id.into(),
            host: host.into(),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.info.name = name.into();
        self
    }

    pub fn with_matcher_name(mut self, matcher_name: impl Into<String>) -> Self {
        self.matcher_name = Some(matcher_name.into());
        self
    }

    pub fn with_extractor_name(mut self, extractor_name: impl Into<String>) -> Self {
        self.extractor_name = Some(extractor_name.into());
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.info.severity_holder = severity.into();
        self
    }

    pub fn with_matched(mut self, matched: impl Into<String>) -> Self {
        self.matched = Some(matched.into());
        self
    }

    /// Matcher name, or an empty string when the finding has none.
    pub fn matcher(&self) -> &str {
        self.matcher_name.as_deref().unwrap_or("")
    }

    /// Extractor name, or an empty string when the finding has none.
    pub fn extractor(&self) -> &str {
        self.extractor_name.as_deref().unwrap_or("")
    }

    pub fn matched_at(&self) -> &str {
        self.matched.as_deref().unwrap_or("")
    }

    pub fn severity(&self) -> Severity {
        self.info.severity_holder.severity
    }
}

/// Template information attached to a finding.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Info {
    #[serde(default)]
    pub name: String,
    #[serde(
        rename = "author",
        default,
        deserialize_with = "string_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub authors: Vec<String>,
    #[serde(default, deserialize_with = "string_list", skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "string_list", skip_serializing_if = "Vec::is_empty")]
    pub reference: Vec<String>,
    #[serde(rename = "severity", default)]
    pub severity_holder: SeverityHolder,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remediation: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrList {
    One(String),
    Many(Vec<String>),
}

/// Accepts `"a, b"`, `["a", "b"]` or null.
fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = match Option::<StringOrList>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(StringOrList::One(joined)) => joined.split(',').map(str::to_string).collect(),
        Some(StringOrList::Many(items)) => items,
    };

    Ok(items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect())
}
