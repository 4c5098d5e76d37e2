use super::{Context, format_money, format_time};
use anyhow::Result;
use clap::Subcommand;
use gremio_application::views::SubtaskBoardView;
use gremio_core::subtask::{Priority, Subtask, SubtaskFilter, SubtaskStatus};

#[derive(Subcommand)]
pub enum SubtasksAction {
    /// Open sub-tasks, grouped by project
    Available {
        #[arg(long)]
        specialty: Option<String>,
        #[arg(long, value_parser = parse_priority)]
        priority: Option<Priority>,
    },
    /// Sub-tasks assigned to you, with your stats
    Mine {
        #[arg(long, value_parser = parse_status)]
        status: Option<SubtaskStatus>,
    },
    /// Full detail of one sub-task
    Show { id: i64 },
    /// Claim an open sub-task matching one of your specialties
    Accept { id: i64 },
    /// Move one of your sub-tasks to EN_PROGRESO or COMPLETADO
    Progress {
        id: i64,
        #[arg(value_parser = parse_status)]
        status: SubtaskStatus,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Ask the client to assign you a sub-task
    Request {
        id: i64,
        #[arg(long)]
        message: Option<String>,
    },
    /// Your completed sub-tasks
    History,
}

fn parse_status(value: &str) -> Result<SubtaskStatus, String> {
    value
        .replace('-', "_")
        .parse()
        .map_err(|_| format!("unknown status '{value}'"))
}

fn parse_priority(value: &str) -> Result<Priority, String> {
    value
        .parse()
        .map_err(|_| format!("unknown priority '{value}'"))
}

pub async fn run(ctx: &Context, action: SubtasksAction) -> Result<()> {
    let mut board = match action {
        SubtasksAction::Show { id } => return show(ctx, id).await,
        _ => SubtaskBoardView::new(&ctx.services)?,
    };
    board.activate().await?;

    match action {
        SubtasksAction::Available {
            specialty,
            priority,
        } => {
            board
                .apply_filter(SubtaskFilter {
                    specialty,
                    priority,
                })
                .await?;
            let groups = board.groups();
            if groups.is_empty() {
                println!("No open sub-tasks");
            }
            for group in groups {
                println!(
                    "{} ({})",
                    group.project_title,
                    group.client_name.as_deref().unwrap_or("unknown client")
                );
                for subtask in &group.subtasks {
                    let mark = if board.can_accept(subtask) { " " } else { "!" };
                    println!("{mark} {}", row(subtask));
                }
            }
        }
        SubtasksAction::Mine { status } => {
            let stats = &board.stats;
            println!(
                "{} sub-tasks: {} assigned, {} in progress, {} done ({}% completion)",
                stats.total, stats.assigned, stats.in_progress, stats.completed, stats.completion_rate
            );
            for subtask in board
                .mine
                .iter()
                .filter(|s| status.is_none_or(|st| st == s.status))
            {
                println!("  {}", row(subtask));
            }
            let pending: Vec<_> = board.requests.iter().filter(|r| r.is_pending()).collect();
            if !pending.is_empty() {
                println!("Requests awaiting the client");
                for request in pending {
                    println!(
                        "  #{:<5} {}",
                        request.subtask_id,
                        request.subtask_title.as_deref().unwrap_or("-")
                    );
                }
            }
        }
        SubtasksAction::Accept { id } => {
            board.accept(id).await?;
            println!("Sub-task #{id} is now yours");
        }
        SubtasksAction::Progress { id, status, notes } => {
            board.update_progress(id, status, notes).await?;
            println!("Sub-task #{id} -> {status}");
        }
        SubtasksAction::Request { id, message } => {
            let sent = board.request(id, message).await?;
            println!("Request #{} sent ({})", sent.id, sent.status);
        }
        SubtasksAction::History => {
            for subtask in board.history() {
                println!(
                    "  {}  completed {}",
                    row(subtask),
                    format_time(subtask.completed_at)
                );
            }
        }
        SubtasksAction::Show { .. } => {}
    }
    Ok(())
}

async fn show(ctx: &Context, id: i64) -> Result<()> {
    let detail = ctx.services.subtasks.find_by_id(id).await?;
    let subtask = &detail.subtask;
    println!("{} {}", subtask.code, subtask.title);
    println!("  project:  #{} {}", detail.project.id, detail.project.title);
    println!("  status:   {} / priority {}", subtask.status, subtask.priority);
    println!("  budget:   {}", format_money(subtask.budget));
    if let Some(hours) = subtask.estimated_hours {
        println!("  estimate: {hours} h");
    }
    if let Some(client) = &detail.client {
        println!("  client:   {}", client.name);
    }
    if let Some(vendor) = &detail.vendor {
        println!("  vendor:   {}", vendor.name);
    }
    if let Some(description) = &subtask.description {
        println!();
        println!("{description}");
    }
    Ok(())
}

fn row(subtask: &Subtask) -> String {
    format!(
        "#{:<5} {:<14} {:<36} {:<12} {:<6} {}",
        subtask.id,
        subtask.code,
        subtask.title,
        subtask.status,
        subtask.priority,
        format_money(subtask.budget)
    )
}
