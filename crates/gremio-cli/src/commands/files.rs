use super::{Context, format_time};
use anyhow::Result;
use clap::{Args, Subcommand};
use gremio_core::chat::ConversationScope;
use gremio_core::user::SessionStore;
use gremio_interaction::read_upload;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum FilesAction {
    List(Target),
    Upload {
        #[command(flatten)]
        target: Target,
        path: PathBuf,
    },
    Download { file_id: i64, dest: PathBuf },
    Delete {
        #[command(flatten)]
        target: Target,
        file_id: i64,
    },
}

/// Project id, or sub-task id with `--subtask`.
#[derive(Args)]
pub struct Target {
    id: i64,
    #[arg(long)]
    subtask: bool,
}

impl Target {
    fn scope(&self) -> ConversationScope {
        if self.subtask {
            ConversationScope::Subtask(self.id)
        } else {
            ConversationScope::Project(self.id)
        }
    }
}

pub async fn run(ctx: &Context, action: FilesAction) -> Result<()> {
    let files = &ctx.services.files;
    match action {
        FilesAction::List(target) => {
            let listed = files.list(target.scope()).await?;
            if listed.is_empty() {
                println!("No files on {}", target.scope());
            }
            for file in listed {
                println!(
                    "#{:<5} {:<40} {:>10}  {:<12} {} by {}",
                    file.id,
                    file.original_name,
                    file.human_size(),
                    file.kind(),
                    format_time(file.created_at),
                    file.uploader_role
                );
            }
        }
        FilesAction::Upload { target, path } => {
            let user = ctx.session.require_user()?;
            let upload = read_upload(&path)?;
            let stored = files.upload(target.scope(), &user, upload).await?;
            println!(
                "Uploaded {} ({}) as #{}",
                stored.original_name,
                stored.human_size(),
                stored.id
            );
        }
        FilesAction::Download { file_id, dest } => {
            let bytes = files.download(file_id).await?;
            tokio::fs::write(&dest, &bytes).await?;
            println!("Saved {} bytes to {}", bytes.len(), dest.display());
        }
        FilesAction::Delete { target, file_id } => {
            let user = ctx.session.require_user()?;
            files.delete(target.scope(), file_id, &user).await?;
            println!("Deleted file #{file_id}");
        }
    }
    Ok(())
}
