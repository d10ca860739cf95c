use std::sync::Arc;

use content::{Catalog, Neighbours};
use serde::Deserialize;
use shared::{
    domain::{ExperienceKind, ProjectStatus},
    error::{ApiError, ErrorCode},
    protocol::{
        CaseStudyDetail, CaseStudySummary, ContactRequest, ContactResponse, FormStatus,
        NeighbourLink, ProjectDetail, ProjectsResponse, SiteResponse, SkillGroupView, SkillView,
        TimelineView,
    },
};
use site_core::{
    contact::{failure_notice, success_notice},
    icons::glyph_for,
    timeline_view, ContactForm, MotionPreference, Outbox, SubmitOutcome,
};
use tracing::{error, info};

const EMPTY_PROJECTS_MESSAGE: &str = "No projects to display.";

#[derive(Clone)]
pub struct ApiContext {
    pub catalog: Arc<Catalog>,
    pub outbox: Arc<dyn Outbox>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProjectsQuery {
    pub status: Option<ProjectStatus>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ExperienceQuery {
    pub kind: Option<ExperienceKind>,
    #[serde(default)]
    pub reduced_motion: bool,
}

pub fn site_summary(ctx: &ApiContext) -> SiteResponse {
    SiteResponse {
        site: ctx.catalog.site().clone(),
        navigation: ctx.catalog.navigation().to_vec(),
        cta_buttons: ctx.catalog.cta_buttons().to_vec(),
    }
}

pub fn list_projects(ctx: &ApiContext, query: &ProjectsQuery) -> ProjectsResponse {
    let catalog = &ctx.catalog;
    let (featured, projects) = match query.status {
        Some(status) => (Vec::new(), catalog.projects_by_status(status)),
        None => (catalog.featured_projects(), catalog.grid_projects()),
    };
    let empty_message = (featured.is_empty() && projects.is_empty())
        .then(|| EMPTY_PROJECTS_MESSAGE.to_string());

    ProjectsResponse {
        featured: featured.into_iter().cloned().collect(),
        projects: projects.into_iter().cloned().collect(),
        empty_message,
    }
}

pub fn project_detail(ctx: &ApiContext, slug: &str) -> Result<ProjectDetail, ApiError> {
    let project = ctx
        .catalog
        .project_by_slug(slug)
        .ok_or_else(|| ApiError::not_found("project"))?;
    let neighbours = ctx
        .catalog
        .project_neighbours(slug)
        .ok_or_else(|| ApiError::not_found("project"))?;
    let (previous, next) = links(neighbours, |p| NeighbourLink {
        slug: p.slug.to_string(),
        title: p.title.clone(),
    });

    let case_study = ctx
        .catalog
        .case_study_for_project(slug)
        .map(|cs| NeighbourLink {
            slug: cs.slug.to_string(),
            title: cs.title.clone(),
        });

    Ok(ProjectDetail {
        project: project.clone(),
        status_label: project.status.label().to_string(),
        case_study,
        previous,
        next,
    })
}

pub fn list_case_studies(ctx: &ApiContext) -> Vec<CaseStudySummary> {
    ctx.catalog
        .case_studies()
        .iter()
        .map(|cs| CaseStudySummary {
            slug: cs.slug.clone(),
            project_slug: cs.project_slug.clone(),
            title: cs.title.clone(),
            subtitle: cs.subtitle.clone(),
            tech_stack: cs.tech_stack.clone(),
            published_at: cs.published_at.clone(),
        })
        .collect()
}

pub fn case_study_detail(ctx: &ApiContext, slug: &str) -> Result<CaseStudyDetail, ApiError> {
    let case_study = ctx
        .catalog
        .case_study_by_slug(slug)
        .ok_or_else(|| ApiError::not_found("case study"))?;
    let neighbours = ctx
        .catalog
        .case_study_neighbours(slug)
        .ok_or_else(|| ApiError::not_found("case study"))?;
    let (previous, next) = links(neighbours, |cs| NeighbourLink {
        slug: cs.slug.to_string(),
        title: cs.title.clone(),
    });

    Ok(CaseStudyDetail {
        case_study: case_study.clone(),
        project: ctx
            .catalog
            .project_by_slug(case_study.project_slug.as_str())
            .cloned(),
        previous,
        next,
    })
}

pub fn experience_timeline(ctx: &ApiContext, query: &ExperienceQuery) -> TimelineView {
    let motion = MotionPreference::from_reduced_flag(query.reduced_motion);
    match query.kind {
        Some(kind) => timeline_view(ctx.catalog.experiences_by_kind(kind), motion),
        None => timeline_view(ctx.catalog.experiences(), motion),
    }
}

pub fn skill_groups(ctx: &ApiContext) -> Vec<SkillGroupView> {
    ctx.catalog
        .skill_groups()
        .iter()
        .map(|group| SkillGroupView {
            title: group.title.clone(),
            category: group.category,
            skills: group
                .skills
                .iter()
                .map(|skill| SkillView {
                    name: skill.name.clone(),
                    glyph: glyph_for(skill.icon.as_deref().unwrap_or(&skill.name))
                        .name()
                        .to_string(),
                })
                .collect(),
        })
        .collect()
}

/// Runs one visit's worth of contact form through the configured outbox.
pub async fn submit_contact(
    ctx: &ApiContext,
    request: ContactRequest,
) -> Result<ContactResponse, ApiError> {
    let contact_email = ctx.catalog.site().email.as_str();
    let mut form = ContactForm::from_request(request);

    match form.submit(ctx.outbox.as_ref()).await {
        SubmitOutcome::Delivered(delivery) => {
            info!("contact message delivered");
            let handoff = delivery.handoff_url.is_some();
            Ok(ContactResponse {
                status: form.status(),
                notice: success_notice(contact_email, handoff),
                handoff_url: delivery.handoff_url,
            })
        }
        SubmitOutcome::Trapped => Ok(ContactResponse {
            status: FormStatus::Success,
            notice: success_notice(contact_email, false),
            handoff_url: None,
        }),
        SubmitOutcome::Invalid => Err(ApiError::new(
            ErrorCode::Validation,
            "please correct the highlighted fields",
        )
        .with_fields(form.errors_by_name())),
        SubmitOutcome::Failed => Err(ApiError::new(
            ErrorCode::Delivery,
            failure_notice(contact_email),
        )),
        SubmitOutcome::InFlight => {
            error!("fresh contact form reported a submission already in flight");
            Err(ApiError::new(ErrorCode::Internal, failure_notice(contact_email)))
        }
    }
}

fn links<T>(
    neighbours: Neighbours<'_, T>,
    link: impl Fn(&T) -> NeighbourLink,
) -> (Option<NeighbourLink>, Option<NeighbourLink>) {
    (neighbours.previous.map(&link), neighbours.next.map(&link))
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;
