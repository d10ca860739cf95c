use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use shared::domain::{
    CaseStudy, CtaButton, Experience, ExperienceKind, NavItem, Project, ProjectStatus, SiteConfig,
    SkillGroup,
};
use thiserror::Error;
use tracing::debug;

const EMBEDDED_CONTENT: &str = include_str!("../data/portfolio.toml");

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read content file '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed content: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("duplicate experience id '{0}'")]
    DuplicateExperience(String),
    #[error("duplicate project slug '{0}'")]
    DuplicateProject(String),
    #[error("duplicate case study slug '{0}'")]
    DuplicateCaseStudy(String),
    #[error("case study '{case_study}' references unknown project '{project}'")]
    UnknownProject { case_study: String, project: String },
}

/// Read-only site content, loaded once and shared by reference.
#[derive(Debug, Clone, Deserialize)]
pub struct Catalog {
    site: SiteConfig,
    #[serde(default)]
    navigation: Vec<NavItem>,
    #[serde(default)]
    cta_buttons: Vec<CtaButton>,
    #[serde(default)]
    projects: Vec<Project>,
    #[serde(default)]
    case_studies: Vec<CaseStudy>,
    #[serde(default)]
    experiences: Vec<Experience>,
    #[serde(default)]
    skill_groups: Vec<SkillGroup>,
}

/// Entries either side of an item in catalog order.
#[derive(Debug, Clone, Copy)]
pub struct Neighbours<'a, T> {
    pub previous: Option<&'a T>,
    pub next: Option<&'a T>,
}

impl Catalog {
    pub fn embedded() -> Result<Self, ContentError> {
        Self::from_toml(EMBEDDED_CONTENT)
    }

    pub fn load(path: &Path) -> Result<Self, ContentError> {
        let raw = fs::read_to_string(path).map_err(|source| ContentError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&raw)
    }

    pub fn from_toml(raw: &str) -> Result<Self, ContentError> {
        let catalog: Catalog = toml::from_str(raw)?;
        catalog.check_integrity()?;
        debug!(
            projects = catalog.projects.len(),
            case_studies = catalog.case_studies.len(),
            experiences = catalog.experiences.len(),
            skill_groups = catalog.skill_groups.len(),
            "content catalog loaded"
        );
        Ok(catalog)
    }

    fn check_integrity(&self) -> Result<(), ContentError> {
        let mut seen = HashSet::new();
        for experience in &self.experiences {
            if !seen.insert(experience.id.as_str()) {
                return Err(ContentError::DuplicateExperience(experience.id.to_string()));
            }
        }

        let mut project_slugs = HashSet::new();
        for project in &self.projects {
            if !project_slugs.insert(project.slug.as_str()) {
                return Err(ContentError::DuplicateProject(project.slug.to_string()));
            }
        }

        let mut seen = HashSet::new();
        for case_study in &self.case_studies {
            if !seen.insert(case_study.slug.as_str()) {
                return Err(ContentError::DuplicateCaseStudy(case_study.slug.to_string()));
            }
            if !project_slugs.contains(case_study.project_slug.as_str()) {
                return Err(ContentError::UnknownProject {
                    case_study: case_study.slug.to_string(),
                    project: case_study.project_slug.to_string(),
                });
            }
        }

        Ok(())
    }

    pub fn site(&self) -> &SiteConfig {
        &self.site
    }

    pub fn navigation(&self) -> &[NavItem] {
        &self.navigation
    }

    pub fn cta_buttons(&self) -> &[CtaButton] {
        &self.cta_buttons
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn featured_projects(&self) -> Vec<&Project> {
        self.projects.iter().filter(|p| p.featured).collect()
    }

    /// Projects shown in the grid below the featured ones.
    pub fn grid_projects(&self) -> Vec<&Project> {
        self.projects.iter().filter(|p| !p.featured).collect()
    }

    pub fn projects_by_status(&self, status: ProjectStatus) -> Vec<&Project> {
        self.projects.iter().filter(|p| p.status == status).collect()
    }

    pub fn project_by_slug(&self, slug: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.slug.as_str() == slug)
    }

    pub fn project_neighbours(&self, slug: &str) -> Option<Neighbours<'_, Project>> {
        let index = self.projects.iter().position(|p| p.slug.as_str() == slug)?;
        Some(neighbours_at(&self.projects, index))
    }

    pub fn case_studies(&self) -> &[CaseStudy] {
        &self.case_studies
    }

    pub fn case_study_by_slug(&self, slug: &str) -> Option<&CaseStudy> {
        self.case_studies.iter().find(|cs| cs.slug.as_str() == slug)
    }

    pub fn case_study_for_project(&self, project_slug: &str) -> Option<&CaseStudy> {
        self.case_studies
            .iter()
            .find(|cs| cs.project_slug.as_str() == project_slug)
    }

    pub fn case_study_neighbours(&self, slug: &str) -> Option<Neighbours<'_, CaseStudy>> {
        let index = self
            .case_studies
            .iter()
            .position(|cs| cs.slug.as_str() == slug)?;
        Some(neighbours_at(&self.case_studies, index))
    }

    pub fn experiences(&self) -> &[Experience] {
        &self.experiences
    }

    pub fn experiences_by_kind(&self, kind: ExperienceKind) -> Vec<&Experience> {
        self.experiences.iter().filter(|e| e.kind == kind).collect()
    }

    pub fn experiences_by_order(&self) -> Vec<&Experience> {
        let mut sorted: Vec<&Experience> = self.experiences.iter().collect();
        sorted.sort_by_key(|e| e.order);
        sorted
    }

    pub fn skill_groups(&self) -> &[SkillGroup] {
        &self.skill_groups
    }
}

fn neighbours_at<T>(items: &[T], index: usize) -> Neighbours<'_, T> {
    Neighbours {
        previous: index.checked_sub(1).and_then(|i| items.get(i)),
        next: items.get(index + 1),
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
