use serde::{Deserialize, Serialize};

use crate::domain::{
    CaseStudy, CaseStudySlug, CtaButton, ExperienceId, ExperienceKind, NavItem, Project,
    ProjectSlug, SiteConfig, SkillCategory,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteResponse {
    pub site: SiteConfig,
    pub navigation: Vec<NavItem>,
    pub cta_buttons: Vec<CtaButton>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectsResponse {
    pub featured: Vec<Project>,
    pub projects: Vec<Project>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeighbourLink {
    pub slug: String,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectDetail {
    pub project: Project,
    pub status_label: String,
    /// Case study written about this project, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_study: Option<NeighbourLink>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<NeighbourLink>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<NeighbourLink>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseStudySummary {
    pub slug: CaseStudySlug,
    pub project_slug: ProjectSlug,
    pub title: String,
    pub subtitle: String,
    pub tech_stack: Vec<String>,
    pub published_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseStudyDetail {
    pub case_study: CaseStudy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<Project>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<NeighbourLink>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<NeighbourLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub id: ExperienceId,
    pub kind: ExperienceKind,
    pub kind_label: String,
    pub title: String,
    pub organization: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub duration: String,
    pub description: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reveal_delay_secs: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineYear {
    pub year: i32,
    pub marker: String,
    pub entries: Vec<TimelineEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reveal_delay_secs: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineView {
    pub years: Vec<TimelineYear>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillView {
    pub name: String,
    pub glyph: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillGroupView {
    pub title: String,
    pub category: SkillCategory,
    pub skills: Vec<SkillView>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormStatus {
    #[default]
    Idle,
    Submitting,
    Success,
    Error,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
    /// Hidden decoy input; humans never see it, so only bots fill it in.
    #[serde(default, rename = "website")]
    pub decoy: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactResponse {
    pub status: FormStatus,
    pub notice: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handoff_url: Option<String>,
}
