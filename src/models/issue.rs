//! Normalized issue model shared by every scanner parser.

use std::fmt;

use serde::Serialize;

// -- Severity --

/// Four-level severity scale of the aggregation pipeline.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    #[serde(rename = "ERROR")]
    Error,
    #[serde(rename = "HIGH")]
    WarningHigh,
    #[serde(rename = "NORMAL")]
    WarningNormal,
    #[serde(rename = "LOW")]
    WarningLow,
}

impl Severity {
    /// All levels, most severe first.
    pub const ALL: [Severity; 4] = [
        Self::Error,
        Self::WarningHigh,
        Self::WarningNormal,
        Self::WarningLow,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::WarningHigh => "HIGH",
            Self::WarningNormal => "NORMAL",
            Self::WarningLow => "LOW",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// -- Issue --

/// A single normalized issue. Immutable once built; see [`IssueBuilder`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    file_name: String,
    message: String,
    description: String,
    severity: Severity,
    package_name: String,
    category: String,
    #[serde(rename = "type")]
    issue_type: String,
}

impl Issue {
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn issue_type(&self) -> &str {
        &self.issue_type
    }
}

/// Builder for [`Issue`].
///
/// Unset text attributes build as empty strings and an unset severity builds
/// as [`Severity::WarningLow`].
#[derive(Debug, Clone, Default)]
pub struct IssueBuilder {
    file_name: Option<String>,
    message: Option<String>,
    description: Option<String>,
    severity: Option<Severity>,
    package_name: Option<String>,
    category: Option<String>,
    issue_type: Option<String>,
}

impl IssueBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file_name(mut self, value: impl Into<String>) -> Self {
        self.file_name = Some(value.into());
        self
    }

    pub fn message(mut self, value: impl Into<String>) -> Self {
        self.message = Some(value.into());
        self
    }

    pub fn description(mut self, value: impl Into<String>) -> Self {
        self.description = Some(value.into());
        self
    }

    pub fn severity(mut self, value: Severity) -> Self {
        self.severity = Some(value);
        self
    }

    pub fn package_name(mut self, value: impl Into<String>) -> Self {
        self.package_name = Some(value.into());
        self
    }

    pub fn category(mut self, value: impl Into<String>) -> Self {
        self.category = Some(value.into());
        self
    }

    pub fn issue_type(mut self, value: impl Into<String>) -> Self {
        self.issue_type = Some(value.into());
        self
    }

    pub fn build(self) -> Issue {
        Issue {
            file_name: self.file_name.unwrap_or_default(),
            message: self.message.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            severity: self.severity.unwrap_or(Severity::WarningLow),
            package_name: self.package_name.unwrap_or_default(),
            category: self.category.unwrap_or_default(),
            issue_type: self.issue_type.unwrap_or_default(),
        }
    }
}
