//! Summary orchestration: prompt → provider → stored text.
//!
//! Generation is tried over an ordered list of channels (in practice
//! the server-side proxy first, then a direct provider call); the first
//! success wins. When every channel fails, or none is configured, the
//! finished prompt is handed back so the user can submit it by hand.
//! Persisting the generated text is best-effort: a failed save is
//! logged, never surfaced.

use async_trait::async_trait;
use serde_json::Value;

use taskdeck_ai::GenerativeClient;
use taskdeck_core::entities::Project;
use taskdeck_core::normalize::extract_model_text;
use taskdeck_core::prompt::{build_summary_prompt, SummaryInput, TaskWithNotes};

use crate::http::{ApiClient, ClientError};

/// Result of a summary run. Both variants are successful outcomes;
/// generation failure degrades to the raw prompt, never to an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryOutcome {
    /// A channel produced text, already normalized for display.
    Generated(String),
    /// No channel succeeded; here is the prompt to submit manually.
    RawPrompt(String),
}

/// One way of turning a prompt into a provider response.
#[async_trait]
pub trait SummaryChannel: Send + Sync {
    /// Short label used in logs ("proxy", "direct", ...).
    fn name(&self) -> &str;

    async fn generate(&self, prompt: &str) -> anyhow::Result<Value>;
}

/// Destination for the generated text.
#[async_trait]
pub trait SummarySink: Send + Sync {
    async fn persist(&self, text: &str) -> anyhow::Result<()>;
}

#[async_trait]
impl SummaryChannel for ApiClient {
    fn name(&self) -> &str {
        "proxy"
    }

    async fn generate(&self, prompt: &str) -> anyhow::Result<Value> {
        Ok(self.proxy_summary(prompt, None).await?)
    }
}

#[async_trait]
impl SummaryChannel for GenerativeClient {
    fn name(&self) -> &str {
        "direct"
    }

    async fn generate(&self, prompt: &str) -> anyhow::Result<Value> {
        Ok(GenerativeClient::generate(self, prompt, None).await?)
    }
}

#[async_trait]
impl SummarySink for ApiClient {
    async fn persist(&self, text: &str) -> anyhow::Result<()> {
        self.put_summary(text).await?;
        Ok(())
    }
}

/// Pull the caller's backlog from the API and shape it for the prompt
/// builder. With a project, only that project's tasks; without one, the
/// whole backlog.
pub async fn fetch_backlog(
    api: &ApiClient,
    project: Option<&Project>,
) -> Result<SummaryInput, ClientError> {
    let tasks = match project {
        Some(project) => api.list_tasks(project.id).await?,
        None => api.list_all_tasks().await?,
    };

    let mut entries = Vec::with_capacity(tasks.len());
    for task in tasks {
        let notes = api
            .list_task_notes(task.id)
            .await?
            .into_iter()
            .map(|note| note.content)
            .collect();
        entries.push(TaskWithNotes { task, notes });
    }

    Ok(SummaryInput {
        project_name: project.map(|p| p.name.clone()),
        tasks: entries,
    })
}

/// Run the full summary flow for the given backlog.
///
/// Builds the prompt, tries each channel in order, normalizes the
/// first successful response, and persists it through `sink` if one is
/// given. Returns [`SummaryOutcome::RawPrompt`] when every channel
/// fails or `channels` is empty.
pub async fn generate_summary(
    input: &SummaryInput,
    channels: &[&dyn SummaryChannel],
    sink: Option<&dyn SummarySink>,
) -> SummaryOutcome {
    let prompt = build_summary_prompt(input);

    for channel in channels {
        match channel.generate(&prompt).await {
            Ok(payload) => {
                let text = extract_model_text(&payload);
                if let Some(sink) = sink {
                    if let Err(err) = sink.persist(&text).await {
                        tracing::warn!(error = %err, "failed to save generated summary");
                    }
                }
                return SummaryOutcome::Generated(text);
            }
            Err(err) => {
                tracing::warn!(channel = channel.name(), error = %err, "summary channel failed");
            }
        }
    }

    SummaryOutcome::RawPrompt(prompt)
}
