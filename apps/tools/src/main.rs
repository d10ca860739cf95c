use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use content::Catalog;
use shared::{domain::ExperienceKind, protocol::ContactRequest};
use site_core::{
    format_duration, group_by_year, ContactForm, FormField, MailtoOutbox, SubmitOutcome,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
struct Cli {
    /// Content file to use instead of the bundled one.
    #[arg(long, global = true)]
    content: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load the content and report what it holds.
    Check,
    /// Print the experience timeline grouped by year.
    Timeline {
        #[arg(long)]
        kind: Option<ExperienceKind>,
    },
    /// Validate a contact message and print its mailto hand-off.
    Contact {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        message: String,
    },
}

fn load(content: Option<&PathBuf>) -> Result<Catalog> {
    let catalog = match content {
        Some(path) => Catalog::load(path)?,
        None => Catalog::embedded()?,
    };
    Ok(catalog)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let catalog = load(cli.content.as_ref())?;

    match cli.command {
        Command::Check => {
            println!(
                "ok: {} projects, {} case studies, {} experiences, {} skill groups",
                catalog.projects().len(),
                catalog.case_studies().len(),
                catalog.experiences().len(),
                catalog.skill_groups().len()
            );
        }
        Command::Timeline { kind } => {
            let groups = match kind {
                Some(kind) => group_by_year(catalog.experiences_by_kind(kind)),
                None => group_by_year(catalog.experiences()),
            };
            if groups.is_empty() {
                println!("No experiences to display.");
            }
            for group in groups {
                println!("{}", group.year);
                for record in group.records {
                    println!(
                        "  [{}] {} @ {} ({})",
                        record.kind.label(),
                        record.title,
                        record.organization,
                        format_duration(record)
                    );
                }
            }
        }
        Command::Contact {
            name,
            email,
            message,
        } => {
            let outbox = MailtoOutbox::new(catalog.site().email.clone());
            let mut form = ContactForm::from_request(ContactRequest {
                name,
                email,
                message,
                decoy: String::new(),
            });
            match form.submit(&outbox).await {
                SubmitOutcome::Delivered(delivery) => {
                    println!("{}", delivery.handoff_url.unwrap_or_default());
                }
                SubmitOutcome::Invalid => {
                    for field in FormField::ALL {
                        if let Some(error) = form.error(field) {
                            println!("{}: {error}", field.as_str());
                        }
                    }
                    std::process::exit(1);
                }
                other => anyhow::bail!("contact message not composed: {other:?}"),
            }
        }
    }

    Ok(())
}
