//! Assembly of the backlog-summary prompt sent to the generative provider.

use crate::entities::{Task, TaskStatus};

/// Fixed instruction block appended to every summary prompt.
const INSTRUCTIONS: &str = "\
Based on the backlog above, provide:
1. An executive summary of overall progress.
2. The top risks or blockers you can infer.
3. Prioritized recommendations for what to tackle next.";

/// A task plus the free-text notes attached to it.
#[derive(Debug, Clone)]
pub struct TaskWithNotes {
    pub task: Task,
    pub notes: Vec<String>,
}

/// Everything the prompt builder needs, already fetched from the store.
#[derive(Debug, Clone, Default)]
pub struct SummaryInput {
    /// When set, the summary is scoped to a single project.
    pub project_name: Option<String>,
    pub tasks: Vec<TaskWithNotes>,
}

/// Build the natural-language prompt: tasks grouped by status, each
/// followed by its notes, then the fixed instruction block.
pub fn build_summary_prompt(input: &SummaryInput) -> String {
    let scope = match &input.project_name {
        Some(name) => format!("the project \"{name}\""),
        None => "all projects".to_string(),
    };

    let mut prompt = format!("You are reviewing the task backlog for {scope}.\n");

    for status in TaskStatus::ALL {
        let in_column: Vec<&TaskWithNotes> = input
            .tasks
            .iter()
            .filter(|entry| entry.task.status == status)
            .collect();
        if in_column.is_empty() {
            continue;
        }

        prompt.push_str(&format!("\n## {}\n", status.label()));
        for entry in in_column {
            if entry.task.description.is_empty() {
                prompt.push_str(&format!("- {}\n", entry.task.title));
            } else {
                prompt.push_str(&format!(
                    "- {}: {}\n",
                    entry.task.title, entry.task.description
                ));
            }
            for note in &entry.notes {
                prompt.push_str(&format!("  note: {note}\n"));
            }
        }
    }

    prompt.push('\n');
    prompt.push_str(INSTRUCTIONS);
    prompt
}
