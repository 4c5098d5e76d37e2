use super::Context;
use anyhow::Result;
use gremio_application::ActiveView;

/// Navigates to `route` the way the app would and reports where it landed.
pub async fn open(ctx: &Context, route: &str) -> Result<()> {
    let mut shell = ctx.shell();
    let nav = shell.navigate(route).await?;

    match nav.redirected {
        Some(reason) => println!("{} -> {} (redirected: {:?})", nav.requested, nav.route.path, reason),
        None => println!("{} -> {}", nav.requested, nav.route.view),
    }

    match shell.current_view() {
        Some(ActiveView::Projects(view)) => println!("{} projects", view.items.len()),
        Some(ActiveView::ProjectDetail(view)) => println!(
            "{} sub-tasks, {} pending requests",
            view.board.as_ref().map_or(0, |b| b.subtasks.len()),
            view.pending_requests().count()
        ),
        Some(ActiveView::SubtaskBoard(view)) => println!(
            "{} open sub-tasks, {} assigned to you",
            view.available.len(),
            view.mine.len()
        ),
        Some(ActiveView::Requirements(view)) => {
            println!("{} requirements", view.mine.len() + view.available.len())
        }
        Some(ActiveView::Chat(view)) => {
            println!("{} messages on {}", view.messages().await.len(), view.scope())
        }
        Some(ActiveView::Profile(view)) => {
            if let Some(profile) = &view.profile {
                println!("{} <{}>", profile.name, profile.email)
            }
        }
        Some(ActiveView::AnalysisChat(_)) | Some(ActiveView::Static(_)) | None => {}
    }

    shell.teardown().await;
    Ok(())
}
