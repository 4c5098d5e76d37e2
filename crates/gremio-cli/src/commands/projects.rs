use super::{Context, format_money, format_time};
use anyhow::{Result, bail};
use clap::{Subcommand, ValueEnum};
use gremio_application::views::{ProjectDetailView, ProjectsView};
use gremio_core::project::{Project, ProjectStatus, ProjectUpdate};
use gremio_core::solicitation::SolicitationDecision;

#[derive(Subcommand)]
pub enum ProjectAction {
    /// Change status, progress or payment of the project
    Update {
        #[arg(long, value_parser = parse_status)]
        status: Option<ProjectStatus>,
        /// Percentage, 0-100
        #[arg(long)]
        progress: Option<u8>,
        /// Amount paid so far
        #[arg(long)]
        paid: Option<f64>,
    },
    /// Delete the project
    Delete,
}

fn parse_status(value: &str) -> Result<ProjectStatus, String> {
    value
        .replace('-', "_")
        .to_lowercase()
        .parse()
        .map_err(|_| format!("unknown status '{value}'"))
}

#[derive(Subcommand)]
pub enum SolicitationsAction {
    /// Accept or reject a vendor's request for a sub-task of your project
    Respond {
        /// Project the sub-task belongs to
        #[arg(long)]
        project: i64,
        id: i64,
        decision: Decision,
        /// Reason shown to the vendor when rejecting
        #[arg(long)]
        reason: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum Decision {
    Accept,
    Reject,
}

pub async fn list(ctx: &Context) -> Result<()> {
    let mut view = ProjectsView::new(&ctx.services)?;
    view.activate().await?;

    if view.items.is_empty() {
        println!("No projects yet");
        return Ok(());
    }
    println!("Active");
    for project in view.active() {
        print_row(project);
    }
    let finished: Vec<_> = view.finished().collect();
    if !finished.is_empty() {
        println!("Finished");
        for project in finished {
            print_row(project);
        }
    }
    Ok(())
}

fn print_row(project: &Project) {
    println!(
        "  #{:<5} {:<40} {:<12} {:>3}%  {}",
        project.id,
        project.title,
        project.status.label(),
        project.progress,
        format_money(project.budget)
    );
}

pub async fn show(ctx: &Context, id: i64) -> Result<()> {
    let mut view = ProjectDetailView::new(&ctx.services, id);
    view.activate().await?;

    if let Some(project) = &view.project {
        println!("#{} {}", project.id, project.title);
        println!("  status:   {} ({}%)", project.status.label(), project.progress);
        println!(
            "  budget:   {} (paid {}, outstanding {})",
            format_money(project.budget),
            format_money(project.paid),
            format_money(project.outstanding())
        );
        println!("  started:  {}", format_time(project.started_at));
        if let Some(vendor) = &project.vendor {
            println!("  vendor:   {}", vendor.name);
        }
    }

    if let Some(board) = &view.board {
        let counts = &board.counts;
        println!(
            "Sub-tasks: {} total, {} pending, {} assigned, {} in progress, {} done ({}%)",
            counts.total,
            counts.pending,
            counts.assigned,
            counts.in_progress,
            counts.completed,
            counts.progress_percent
        );
    }
    for (status, subtasks) in view.groups() {
        println!("[{status}]");
        for subtask in subtasks {
            println!(
                "  #{:<5} {:<14} {:<36} {}",
                subtask.id,
                subtask.code,
                subtask.title,
                subtask.vendor_name.as_deref().unwrap_or("-")
            );
        }
    }

    let pending: Vec<_> = view.pending_requests().collect();
    if !pending.is_empty() {
        println!("Pending requests");
        for request in pending {
            println!(
                "  #{:<5} sub-task {:<8} {:<24} {}",
                request.id,
                request.subtask_code.as_deref().unwrap_or("-"),
                request.vendor_name.as_deref().unwrap_or("-"),
                request.message.as_deref().unwrap_or("")
            );
        }
    }
    Ok(())
}

pub async fn run(ctx: &Context, id: i64, action: Option<ProjectAction>) -> Result<()> {
    match action {
        None => show(ctx, id).await,
        Some(ProjectAction::Update {
            status,
            progress,
            paid,
        }) => {
            if status.is_none() && progress.is_none() && paid.is_none() {
                bail!("nothing to update; pass --status, --progress or --paid");
            }
            let update = ProjectUpdate {
                status,
                progress,
                paid,
                ..Default::default()
            };
            let mut view = ProjectDetailView::new(&ctx.services, id);
            let project = view.update_project(&update).await?;
            println!(
                "Project #{} now {} ({}%)",
                project.id,
                project.status.label(),
                project.progress
            );
            Ok(())
        }
        Some(ProjectAction::Delete) => {
            let mut view = ProjectsView::new(&ctx.services)?;
            view.delete(id).await?;
            println!("Project #{id} deleted");
            Ok(())
        }
    }
}

pub async fn solicitations(ctx: &Context, action: SolicitationsAction) -> Result<()> {
    match action {
        SolicitationsAction::Respond {
            project,
            id,
            decision,
            reason,
        } => {
            let decision = match (decision, reason) {
                (Decision::Accept, None) => SolicitationDecision::Accept,
                (Decision::Accept, Some(_)) => bail!("--reason only applies to reject"),
                (Decision::Reject, reason) => SolicitationDecision::Reject { reason },
            };
            let mut view = ProjectDetailView::new(&ctx.services, project);
            view.activate().await?;
            view.respond(id, decision).await?;
            println!(
                "Request #{id} answered, {} still pending",
                view.pending_requests().count()
            );
        }
    }
    Ok(())
}
