use super::{Context, format_time};
use anyhow::Result;
use clap::Subcommand;
use gremio_application::views::RequirementsView;
use gremio_core::requirement::{Requirement, RequirementStatus};

#[derive(Subcommand)]
pub enum RequirementsAction {
    /// Your requirements (client) or the ones you took (vendor)
    List,
    /// Post a new requirement (client)
    Create { message: String },
    /// Open requirements (vendor)
    Available {
        #[arg(long)]
        specialty: Option<String>,
    },
    /// Take an open requirement; its project is created (vendor)
    Assign { id: i64 },
    /// Change the state of a requirement you took (vendor)
    Status {
        id: i64,
        #[arg(value_parser = parse_status)]
        status: RequirementStatus,
    },
}

fn parse_status(value: &str) -> Result<RequirementStatus, String> {
    value
        .replace('-', "_")
        .parse()
        .map_err(|_| format!("unknown requirement status '{value}'"))
}

pub async fn run(ctx: &Context, action: RequirementsAction) -> Result<()> {
    let mut view = RequirementsView::new(&ctx.services)?;
    if let RequirementsAction::Available { specialty } = &action {
        view.specialty = specialty.clone();
    }
    view.activate().await?;

    match action {
        RequirementsAction::List => print_all(&view.mine),
        RequirementsAction::Create { message } => {
            let created = view.create(&message).await?;
            println!("Requirement #{} posted", created.id);
        }
        RequirementsAction::Available { .. } => print_all(&view.available),
        RequirementsAction::Assign { id } => {
            let assignment = view.assign(id).await?;
            println!(
                "Requirement #{} taken, project #{} created",
                assignment.requirement.id, assignment.project_id
            );
        }
        RequirementsAction::Status { id, status } => {
            let updated = view.change_status(id, status).await?;
            println!("Requirement #{} -> {}", updated.id, updated.status);
        }
    }
    Ok(())
}

fn print_all(requirements: &[Requirement]) {
    if requirements.is_empty() {
        println!("Nothing here");
    }
    for requirement in requirements {
        println!(
            "#{:<5} {:<32} {:<20} {:<14} {}",
            requirement.id,
            requirement.title,
            requirement.specialty,
            requirement.status,
            format_time(requirement.created_at)
        );
        println!("       {}", requirement.message);
    }
}
