use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

macro_rules! key_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

key_newtype!(ExperienceId);
key_newtype!(ProjectSlug);
key_newtype!(CaseStudySlug);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum YearMonthError {
    #[error("expected YYYY-MM, got '{0}'")]
    Shape(String),
    #[error("month out of range in '{0}'")]
    Month(String),
}

/// Calendar month written as fixed-width `YYYY-MM`.
///
/// Field order makes the derived `Ord` agree with lexicographic ordering of
/// the textual form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, YearMonthError> {
        if !(0..=9999).contains(&year) {
            return Err(YearMonthError::Shape(format!("{year}-{month:02}")));
        }
        if !(1..=12).contains(&month) {
            return Err(YearMonthError::Month(format!("{year:04}-{month:02}")));
        }
        Ok(Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Abbreviated month and year, e.g. `Jun 2025`.
    pub fn short_label(&self) -> String {
        match NaiveDate::from_ymd_opt(self.year, self.month, 1) {
            Some(date) => date.format("%b %Y").to_string(),
            None => self.to_string(),
        }
    }
}

impl FromStr for YearMonth {
    type Err = YearMonthError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let bytes = raw.as_bytes();
        let well_formed = bytes.len() == 7
            && bytes[4] == b'-'
            && bytes[..4].iter().all(u8::is_ascii_digit)
            && bytes[5..].iter().all(u8::is_ascii_digit);
        if !well_formed {
            return Err(YearMonthError::Shape(raw.to_string()));
        }

        let year = raw[..4]
            .parse::<i32>()
            .map_err(|_| YearMonthError::Shape(raw.to_string()))?;
        let month = raw[5..]
            .parse::<u32>()
            .map_err(|_| YearMonthError::Shape(raw.to_string()))?;
        Self::new(year, month)
    }
}

impl TryFrom<String> for YearMonth {
    type Error = YearMonthError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<YearMonth> for String {
    fn from(value: YearMonth) -> Self {
        value.to_string()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceKind {
    Work,
    Achievement,
    Education,
}

impl ExperienceKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Work => "Work Experience",
            Self::Achievement => "Achievement",
            Self::Education => "Education",
        }
    }
}

impl FromStr for ExperienceKind {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "work" => Ok(Self::Work),
            "achievement" => Ok(Self::Achievement),
            "education" => Ok(Self::Education),
            other => Err(format!("unknown experience kind '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    Completed,
    InProgress,
    Archived,
}

impl ProjectStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Completed => "Completed",
            Self::InProgress => "In Progress",
            Self::Archived => "Archived",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    Frontend,
    Backend,
    Ai,
    Tools,
}

/// A career, education or achievement entry on the experience timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub id: ExperienceId,
    pub kind: ExperienceKind,
    pub title: String,
    pub organization: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub start_date: YearMonth,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<YearMonth>,
    #[serde(default)]
    pub is_ongoing: bool,
    #[serde(default)]
    pub description: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate_url: Option<String>,
    pub order: i32,
}

impl Experience {
    /// `end_date` when present, otherwise `start_date`.
    pub fn effective_date(&self) -> YearMonth {
        self.end_date.unwrap_or(self.start_date)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub slug: ProjectSlug,
    pub title: String,
    pub short_description: String,
    pub full_description: String,
    pub thumbnail: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_study_slug: Option<CaseStudySlug>,
    #[serde(default)]
    pub featured: bool,
    pub status: ProjectStatus,
    pub start_date: YearMonth,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<YearMonth>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub highlights: Vec<String>,
    pub order: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyFeature {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignDecision {
    pub title: String,
    pub description: String,
    pub rationale: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Challenge {
    pub challenge: String,
    pub solution: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultMetric {
    pub metric: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseStudy {
    pub slug: CaseStudySlug,
    pub project_slug: ProjectSlug,
    pub title: String,
    pub subtitle: String,
    pub problem: String,
    pub solution: String,
    #[serde(default)]
    pub approach: Vec<String>,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub architecture_diagram: Option<String>,
    #[serde(default)]
    pub key_features: Vec<KeyFeature>,
    #[serde(default)]
    pub design_decisions: Vec<DesignDecision>,
    #[serde(default)]
    pub challenges: Vec<Challenge>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub results: Vec<ResultMetric>,
    #[serde(default)]
    pub learnings: Vec<String>,
    #[serde(default)]
    pub future_improvements: Vec<String>,
    pub published_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillGroup {
    pub title: String,
    pub category: SkillCategory,
    #[serde(default)]
    pub skills: Vec<Skill>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialLink {
    pub name: String,
    pub href: String,
    pub icon: String,
    pub aria_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavItem {
    pub label: String,
    pub href: String,
    #[serde(default)]
    pub is_external: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CtaButton {
    pub label: String,
    pub href: String,
    pub icon: String,
    #[serde(default)]
    pub is_external: bool,
    pub aria_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    pub name: String,
    pub title: String,
    pub description: String,
    pub url: String,
    pub email: String,
    #[serde(default)]
    pub socials: Vec<SocialLink>,
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
