//! Requirement analysis conversation with the assistant.

use crate::services::Services;
use anyhow::Result;
use gremio_core::GremioError;
use gremio_core::analysis::{
    AnalysisRepository, AnalysisSender, AnalysisTurn, AnalyzedProject, PublishedProject,
};
use gremio_core::user::{UserIdentity, UserRole};
use std::sync::Arc;

/// One line of the visible transcript.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptEntry {
    pub sender: AnalysisSender,
    pub text: String,
}

pub struct AnalysisChatView {
    client: UserIdentity,
    analysis: Arc<dyn AnalysisRepository>,
    /// Draft project created by the first message.
    pub project_id: Option<i64>,
    pub transcript: Vec<TranscriptEntry>,
    /// Set once the assistant has produced a proposal.
    pub proposal: Option<AnalyzedProject>,
    pub summary: Option<String>,
    pub published: Option<PublishedProject>,
    pub thinking: bool,
}

impl AnalysisChatView {
    pub fn new(services: &Services) -> Result<Self> {
        Ok(Self {
            client: services.session.require_role(UserRole::Client)?,
            analysis: services.analysis.clone(),
            project_id: None,
            transcript: Vec::new(),
            proposal: None,
            summary: None,
            published: None,
            thinking: false,
        })
    }

    /// Resumes an existing analysis by loading its history.
    pub async fn resume(&mut self, project_id: i64) -> Result<()> {
        let history = self.analysis.history(project_id).await?;
        self.project_id = Some(project_id);
        self.transcript = history
            .into_iter()
            .map(|m| TranscriptEntry {
                sender: m.sender,
                text: m.body,
            })
            .collect();
        Ok(())
    }

    pub fn is_finished(&self) -> bool {
        self.proposal.is_some()
    }

    /// Sends a message; the first one opens the analysis.
    pub async fn send(&mut self, message: &str) -> Result<AnalysisTurn> {
        let message = message.trim();
        if message.is_empty() {
            return Err(GremioError::validation("message is empty").into());
        }
        if self.is_finished() {
            return Err(GremioError::validation("the analysis is already complete").into());
        }

        self.transcript.push(TranscriptEntry {
            sender: AnalysisSender::Cliente,
            text: message.to_string(),
        });
        self.thinking = true;
        let result = match self.project_id {
            None => self.analysis.start(self.client.id, message).await,
            Some(project_id) => self.analysis.reply(project_id, message).await,
        };
        self.thinking = false;
        let turn = result?;

        if self.project_id.is_none() {
            self.project_id = turn.project_id;
        }
        self.transcript.push(TranscriptEntry {
            sender: AnalysisSender::Ia,
            text: turn.reply.clone(),
        });
        if turn.finished {
            self.proposal = turn.project.clone();
            self.summary = turn.summary.clone();
            tracing::info!("Analysis for project {:?} complete", self.project_id);
        }
        Ok(turn)
    }

    /// Publishes the analyzed project so vendors can claim its sub-tasks.
    pub async fn publish(&mut self) -> Result<&PublishedProject> {
        let project_id = match (self.project_id, self.is_finished()) {
            (Some(id), true) => id,
            _ => {
                return Err(
                    GremioError::validation("finish the analysis before publishing").into(),
                );
            }
        };
        let published = self.analysis.publish(project_id).await?;
        tracing::info!(
            "Published project {} with {} sub-tasks",
            published.project_id,
            published.published_subtasks
        );
        Ok(&*self.published.insert(published))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fakes::{FakeWorld, client_identity};

    #[tokio::test]
    async fn test_conversation_until_publish() {
        let world = FakeWorld::new(Some(client_identity()));
        let mut view = AnalysisChatView::new(&world.services()).unwrap();

        assert!(view.publish().await.is_err());

        let first = view.send("Quiero una tienda online").await.unwrap();
        assert!(!first.finished);
        assert_eq!(view.project_id, Some(30));

        let last = view.send("Con pagos y envíos").await.unwrap();
        assert!(last.finished);
        assert!(view.is_finished());
        assert_eq!(view.transcript.len(), 4);
        assert!(view.send("una cosa más").await.is_err());

        let published = view.publish().await.unwrap();
        assert_eq!(published.published_subtasks, 2);
        assert_eq!(world.analysis.calls(), vec!["start", "reply", "publish"]);
    }

    #[tokio::test]
    async fn test_resume_loads_transcript() {
        let world = FakeWorld::new(Some(client_identity()));
        let mut view = AnalysisChatView::new(&world.services()).unwrap();

        view.resume(30).await.unwrap();
        assert_eq!(view.project_id, Some(30));
        assert_eq!(view.transcript[0].sender, AnalysisSender::Cliente);
    }
}
