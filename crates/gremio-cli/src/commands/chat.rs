//! Interactive conversations: project/sub-task chat and requirement analysis.

use super::{Context, format_money, format_time};
use anyhow::Result;
use clap::Subcommand;
use gremio_application::views::{AnalysisChatView, ChatView};
use gremio_core::analysis::AnalysisSender;
use gremio_core::chat::{ChatMessage, ConversationScope};
use gremio_core::user::{SessionStore, UserIdentity};
use gremio_interaction::read_upload;
use std::path::Path;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Subcommand)]
pub enum ChatAction {
    /// Chat on a project
    Project { id: i64 },
    /// Chat on a sub-task
    Subtask { id: i64 },
}

#[derive(Subcommand)]
pub enum AnalysisAction {
    /// Describe a need and refine it with the assistant; `/publish` when done
    Chat {
        /// Continue an earlier conversation
        #[arg(long)]
        resume: Option<i64>,
    },
}

pub async fn run(ctx: &Context, action: ChatAction) -> Result<()> {
    let scope = match action {
        ChatAction::Project { id } => ConversationScope::Project(id),
        ChatAction::Subtask { id } => ConversationScope::Subtask(id),
    };
    let me = ctx.session.require_user()?;
    let mut view = ChatView::new(&ctx.services, scope)?;
    let mut feed = view.feed();
    view.activate().await?;

    for message in feed.drain().await {
        print_message(&message, &me);
    }
    println!(
        "-- {} ({} files). /files, /upload <path>, /quit --",
        scope,
        view.snapshot().await.files.len()
    );

    let printer = tokio::spawn({
        let me = me.clone();
        async move {
            while let Some(batch) = feed.next().await {
                for message in &batch {
                    print_message(message, &me);
                }
            }
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "/quit" {
            break;
        }
        if line == "/files" {
            for file in view.snapshot().await.files {
                println!("  #{:<5} {} ({})", file.id, file.original_name, file.human_size());
            }
            continue;
        }
        if let Some(path) = line.strip_prefix("/upload ") {
            match upload(&view, Path::new(path.trim())).await {
                Ok(name) => println!("  uploaded {name}"),
                Err(e) => eprintln!("  upload failed: {e}"),
            }
            continue;
        }
        match view.send(line).await {
            Ok(true) => {}
            Ok(false) => eprintln!("  (saved, but the live channel is down)"),
            Err(e) => eprintln!("  not sent: {e}"),
        }
    }

    printer.abort();
    view.deactivate().await;
    Ok(())
}

async fn upload(view: &ChatView, path: &Path) -> Result<String> {
    let stored = view.upload(read_upload(path)?).await?;
    Ok(stored.original_name)
}

fn print_message(message: &ChatMessage, me: &UserIdentity) {
    let who = if message.sender_role == me.role && message.sender_id == me.id {
        "you".to_string()
    } else {
        message.sender_role.to_string()
    };
    println!("[{}] {}: {}", format_time(message.created_at), who, message.body);
}

pub async fn analysis(ctx: &Context, action: AnalysisAction) -> Result<()> {
    let AnalysisAction::Chat { resume } = action;
    let mut view = AnalysisChatView::new(&ctx.services)?;
    if let Some(project_id) = resume {
        view.resume(project_id).await?;
        for entry in &view.transcript {
            let who = match entry.sender {
                AnalysisSender::Cliente => "you",
                AnalysisSender::Vendedor => "vendor",
                AnalysisSender::Ia => "assistant",
            };
            println!("{who}: {}", entry.text);
        }
    }
    println!("-- describe what you need. /publish when the plan is ready, /quit to leave --");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        match line {
            "" => continue,
            "/quit" => break,
            "/publish" => match view.publish().await {
                Ok(published) => {
                    println!(
                        "{} (project #{}, {} sub-tasks open to vendors)",
                        published.message, published.project_id, published.published_subtasks
                    );
                    break;
                }
                Err(e) => eprintln!("  {e}"),
            },
            message => match view.send(message).await {
                Ok(turn) => {
                    println!("assistant: {}", turn.reply);
                    if turn.finished {
                        print_proposal(&view);
                    }
                }
                Err(e) => eprintln!("  {e}"),
            },
        }
    }
    Ok(())
}

fn print_proposal(view: &AnalysisChatView) {
    let Some(project) = &view.proposal else {
        return;
    };
    println!();
    println!("== {} ==", project.title);
    if let Some(summary) = &view.summary {
        println!("{summary}");
    }
    println!(
        "budget {}, {} days, {} h of work",
        format_money(project.estimated_budget),
        project.estimated_days,
        project.total_hours()
    );
    for subtask in &project.subtasks {
        println!(
            "  {:<8} {:<36} {:<20} {:<6} {} h",
            subtask.code, subtask.title, subtask.specialty, subtask.priority, subtask.estimated_hours
        );
    }
}
