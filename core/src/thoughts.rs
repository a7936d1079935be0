//! Progress steps shown while a generation request is in flight.
//!
//! Purely cosmetic: the list advances on a timer and only the final step is
//! tied to the request actually finishing.

use crate::prompt::Mode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Pending,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThoughtStep {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: StepStatus,
}

impl ThoughtStep {
    fn new(id: usize, title: &str, description: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            status: StepStatus::Pending,
        }
    }
}

/// Ordered progress steps for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Thoughts {
    steps: Vec<ThoughtStep>,
}

impl Thoughts {
    /// Script for `mode`, with the first step already in progress.
    pub fn start(mode: Mode) -> Self {
        let script: [(&str, &str); 3] = match mode {
            Mode::Create => [
                (
                    "Searching the web",
                    "Gathering information to create a comprehensive presentation...",
                ),
                (
                    "Reading website",
                    "Extracting relevant content from sources...",
                ),
                (
                    "Generating presentation",
                    "Creating slides with proper structure...",
                ),
            ],
            Mode::Edit => [
                (
                    "Understanding edit request",
                    "Analyzing your edit instructions...",
                ),
                (
                    "Updating slides",
                    "Modifying the presentation based on your request...",
                ),
                (
                    "Generating presentation",
                    "Creating slides with proper structure...",
                ),
            ],
        };
        let mut steps: Vec<ThoughtStep> = script
            .iter()
            .enumerate()
            .map(|(i, (title, desc))| ThoughtStep::new(i + 1, title, desc))
            .collect();
        if let Some(first) = steps.first_mut() {
            first.status = StepStatus::InProgress;
        }
        Self { steps }
    }

    /// Complete the step in progress and start the next one. The last step
    /// is never completed here; it waits for [`Thoughts::finish`].
    pub fn advance(&mut self) {
        let Some(current) = self
            .steps
            .iter()
            .position(|s| s.status == StepStatus::InProgress)
        else {
            return;
        };
        if current + 1 >= self.steps.len() {
            return;
        }
        self.steps[current].status = StepStatus::Completed;
        self.steps[current + 1].status = StepStatus::InProgress;
    }

    /// Mark every step completed.
    pub fn finish(&mut self) {
        for step in &mut self.steps {
            step.status = StepStatus::Completed;
        }
    }

    pub fn clear(&mut self) {
        self.steps.clear();
    }

    pub fn steps(&self) -> &[ThoughtStep] {
        &self.steps
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// True while some step still waits on the request.
    pub fn is_running(&self) -> bool {
        self.steps.iter().any(|s| s.status != StepStatus::Completed)
    }
}
