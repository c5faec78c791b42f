use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::attachment::Attachment;

/// Literal used by the model when an environment value cannot be inferred
pub const NOT_SPECIFIED: &str = "Not specified";

/// Severity classification for a defect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Critical => "Critical",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One user-authored defect description
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BugInput {
    /// Stable per-session identifier; never reused within a session
    pub id: String,
    pub title: String,
    pub url: String,
    pub steps: String,
    pub expected: String,
    pub actual: String,
    /// Free-text environment hints; the model infers whatever is missing
    pub browser: Option<String>,
    pub os: Option<String>,
    pub device: Option<String>,
    /// Severity as asserted by the reporter, if any
    pub severity: Option<Severity>,
    pub screenshot: Option<Attachment>,
}

impl BugInput {
    /// Empty entry with the given identifier
    pub fn new(id: String) -> Self {
        Self {
            id,
            title: String::new(),
            url: String::new(),
            steps: String::new(),
            expected: String::new(),
            actual: String::new(),
            browser: None,
            os: None,
            device: None,
            severity: None,
            screenshot: None,
        }
    }

    /// Whether the reporter supplied any browser/OS/device hint
    pub fn has_environment_hints(&self) -> bool {
        [&self.browser, &self.os, &self.device]
            .iter()
            .any(|v| v.as_deref().is_some_and(|s| !s.trim().is_empty()))
    }
}

/// Environment triple as returned by the model; each value is either
/// populated or the literal "Not specified"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportEnvironment {
    pub browser: String,
    pub os: String,
    pub device: String,
}

/// The structured report fields the model returns.
///
/// Required fields have no default here: a response missing any of them
/// fails deserialization, which is the schema validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportBody {
    pub suggested_title: String,
    pub summary: String,
    pub steps_to_reproduce: Vec<String>,
    pub expected_behavior: String,
    pub actual_behavior: String,
    pub impact: String,
    pub environment: ReportEnvironment,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_fix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
}

/// One generated report, tagged with the entry it answers
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedReport {
    /// Identifier of the BugInput this report was generated for
    pub original_id: String,
    pub generated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub body: ReportBody,
}
