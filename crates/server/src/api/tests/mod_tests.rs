use super::*;

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use site_core::{ContactMessage, Delivery, MailtoOutbox, OutboxError};

#[derive(Default)]
struct CountingOutbox {
    calls: AtomicUsize,
    fail: bool,
}

#[async_trait]
impl Outbox for CountingOutbox {
    async fn deliver(&self, _message: &ContactMessage) -> Result<Delivery, OutboxError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            Err(OutboxError::Rejected(500))
        } else {
            Ok(Delivery::default())
        }
    }
}

fn context_with(outbox: Arc<dyn Outbox>) -> ApiContext {
    ApiContext {
        catalog: Arc::new(Catalog::embedded().expect("catalog")),
        outbox,
    }
}

fn valid_request() -> ContactRequest {
    ContactRequest {
        name: "Alice".to_string(),
        email: "alice@example.com".to_string(),
        message: "I have a project in mind for you.".to_string(),
        decoy: String::new(),
    }
}

#[test]
fn projects_split_featured_from_grid_unless_filtered() {
    let ctx = context_with(Arc::new(MailtoOutbox::new("me@example.test")));

    let all = list_projects(&ctx, &ProjectsQuery::default());
    assert_eq!(all.featured.len(), 1);
    assert_eq!(all.projects.len(), 2);
    assert!(all.empty_message.is_none());

    let archived = list_projects(
        &ctx,
        &ProjectsQuery {
            status: Some(ProjectStatus::Archived),
        },
    );
    assert!(archived.featured.is_empty());
    assert!(archived.projects.is_empty());
    assert_eq!(archived.empty_message.as_deref(), Some(EMPTY_PROJECTS_MESSAGE));
}

#[test]
fn project_detail_links_neighbours() {
    let ctx = context_with(Arc::new(MailtoOutbox::new("me@example.test")));
    let detail = project_detail(&ctx, "noteaura").expect("detail");
    assert_eq!(detail.status_label, "Completed");
    assert_eq!(detail.previous.expect("previous").slug, "resumebuddy");
    assert_eq!(detail.next.expect("next").slug, "code-masters-lms");
    assert!(detail.case_study.is_none());

    let written_up = project_detail(&ctx, "resumebuddy").expect("detail");
    assert_eq!(
        written_up.case_study.map(|link| link.slug),
        Some("resumebuddy".to_string())
    );

    let err = project_detail(&ctx, "missing").expect_err("not found");
    assert!(matches!(err.code, ErrorCode::NotFound));
}

#[test]
fn case_study_detail_includes_linked_project() {
    let ctx = context_with(Arc::new(MailtoOutbox::new("me@example.test")));
    let detail = case_study_detail(&ctx, "resumebuddy").expect("detail");
    assert_eq!(
        detail.project.map(|p| p.slug.to_string()),
        Some("resumebuddy".to_string())
    );
    assert!(detail.previous.is_none());
    assert!(detail.next.is_none());
    assert_eq!(list_case_studies(&ctx).len(), 1);
}

#[test]
fn timeline_filters_by_kind() {
    let ctx = context_with(Arc::new(MailtoOutbox::new("me@example.test")));
    let view = experience_timeline(
        &ctx,
        &ExperienceQuery {
            kind: Some(ExperienceKind::Work),
            reduced_motion: true,
        },
    );
    assert_eq!(view.years.len(), 1);
    assert_eq!(view.years[0].year, 2025);
    assert_eq!(view.years[0].entries[0].duration, "Jun 2025 – Aug 2025");
    assert!(view.years[0].reveal_delay_secs.is_none());
}

#[test]
fn skills_resolve_glyphs_with_fallback() {
    let ctx = context_with(Arc::new(MailtoOutbox::new("me@example.test")));
    let groups = skill_groups(&ctx);
    let frontend = &groups[0];
    assert_eq!(frontend.skills[0].name, "React");
    assert_eq!(frontend.skills[0].glyph, "code");
    let api = groups
        .iter()
        .flat_map(|g| g.skills.iter())
        .find(|s| s.name == "Hugging Face")
        .expect("hugging face");
    assert_eq!(api.glyph, "sparkles");
}

#[tokio::test]
async fn contact_success_reports_status_and_calls_outbox_once() {
    let outbox = Arc::new(CountingOutbox::default());
    let ctx = context_with(outbox.clone());

    let response = submit_contact(&ctx, valid_request()).await.expect("success");
    assert_eq!(response.status, FormStatus::Success);
    assert!(response.handoff_url.is_none());
    assert_eq!(outbox.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn contact_decoy_is_silent_success_without_delivery() {
    let outbox = Arc::new(CountingOutbox::default());
    let ctx = context_with(outbox.clone());
    let request = ContactRequest {
        decoy: "filled by bot".to_string(),
        ..valid_request()
    };

    let response = submit_contact(&ctx, request).await.expect("trapped");
    assert_eq!(response.status, FormStatus::Success);
    assert_eq!(outbox.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn contact_validation_errors_are_reported_per_field() {
    let outbox = Arc::new(CountingOutbox::default());
    let ctx = context_with(outbox.clone());
    let request = ContactRequest {
        name: "A".to_string(),
        message: "short".to_string(),
        ..valid_request()
    };

    let err = submit_contact(&ctx, request).await.expect_err("invalid");
    assert!(matches!(err.code, ErrorCode::Validation));
    assert_eq!(
        err.fields.get("name").map(String::as_str),
        Some("Name must be at least 2 characters")
    );
    assert_eq!(
        err.fields.get("message").map(String::as_str),
        Some("Message must be at least 10 characters")
    );
    assert!(!err.fields.contains_key("email"));
    assert_eq!(outbox.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn contact_delivery_failure_uses_generic_notice() {
    let outbox = Arc::new(CountingOutbox {
        fail: true,
        ..CountingOutbox::default()
    });
    let ctx = context_with(outbox);

    let err = submit_contact(&ctx, valid_request()).await.expect_err("failed");
    assert!(matches!(err.code, ErrorCode::Delivery));
    assert_eq!(
        err.message,
        "Something went wrong. Please try again or email me directly at contact@rajeevkavala.dev"
    );
    assert!(!err.message.contains("500"));
}

#[tokio::test]
async fn contact_mailto_returns_handoff_link() {
    let ctx = context_with(Arc::new(MailtoOutbox::new("me@example.test")));
    let response = submit_contact(&ctx, valid_request()).await.expect("success");
    let link = response.handoff_url.expect("handoff");
    assert!(link.starts_with("mailto:me@example.test?subject="));
    assert!(response.notice.contains("email client"));
}
