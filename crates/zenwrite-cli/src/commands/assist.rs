use std::io::Read;
use std::path::PathBuf;

use clap::{Args, Subcommand};
use serde::Serialize;
use zenwrite_core::assist::{
    BreakPointSuggestion, ExerciseRequest, ImprovedWriting, PaceAnalysis, StuckActivity,
    ToolKind, WritingExercise,
};
use zenwrite_core::{
    AssistError, Assistant, Config, Event, HttpPromptService, OutcomeSource, Ticket, ToolOutcome,
    WritingSession,
};

#[derive(Args)]
pub struct TextInput {
    /// Text to work on (reads stdin when neither this nor --file is given)
    text: Option<String>,
    /// Read the text from a file
    #[arg(long, conflicts_with = "text")]
    file: Option<PathBuf>,
}

impl TextInput {
    fn read(self) -> Result<String, Box<dyn std::error::Error>> {
        if let Some(text) = self.text {
            return Ok(text);
        }
        if let Some(path) = self.file {
            return Ok(std::fs::read_to_string(path)?);
        }
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    }
}

#[derive(Subcommand)]
pub enum AssistAction {
    /// Analyze writing pace and style
    Pace(TextInput),
    /// Ask whether this is a good moment for a break
    Break(TextInput),
    /// Suggest an activity to get unstuck
    Stuck {
        #[command(flatten)]
        input: TextInput,
        /// What you are stuck on
        #[arg(long)]
        problem: Option<String>,
    },
    /// Suggest an improved version of the text
    Improve(TextInput),
    /// Generate a short writing exercise
    Exercise(TextInput),
}

/// A tool call, independent of where its text came from.
#[derive(Debug, Clone)]
pub enum ToolRequest {
    Pace,
    Break,
    Stuck { problem: Option<String> },
    Improve,
    Exercise(ExerciseRequest),
}

/// The answer to a [`ToolRequest`].
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ToolReply {
    Pace(ToolOutcome<PaceAnalysis>),
    Break(ToolOutcome<BreakPointSuggestion>),
    Stuck(ToolOutcome<StuckActivity>),
    Improve(ToolOutcome<ImprovedWriting>),
    Exercise(ToolOutcome<WritingExercise>),
}

pub async fn call(
    assistant: &Assistant<HttpPromptService>,
    request: ToolRequest,
    text: &str,
) -> Result<ToolReply, AssistError> {
    Ok(match request {
        ToolRequest::Pace => ToolReply::Pace(assistant.analyze_pace(text).await?),
        ToolRequest::Break => ToolReply::Break(assistant.suggest_break_point(text).await?),
        ToolRequest::Stuck { problem } => {
            ToolReply::Stuck(assistant.suggest_stuck_activity(text, problem.as_deref()).await)
        }
        ToolRequest::Improve => ToolReply::Improve(assistant.improve_writing(text).await?),
        ToolRequest::Exercise(req) => ToolReply::Exercise(assistant.generate_exercise(&req).await),
    })
}

impl ToolReply {
    fn tool(&self) -> ToolKind {
        match self {
            ToolReply::Pace(o) => o.tool,
            ToolReply::Break(o) => o.tool,
            ToolReply::Stuck(o) => o.tool,
            ToolReply::Improve(o) => o.tool,
            ToolReply::Exercise(o) => o.tool,
        }
    }

    fn source(&self) -> OutcomeSource {
        match self {
            ToolReply::Pace(o) => o.source,
            ToolReply::Break(o) => o.source,
            ToolReply::Stuck(o) => o.source,
            ToolReply::Improve(o) => o.source,
            ToolReply::Exercise(o) => o.source,
        }
    }

    /// Hand the reply to the session. `None` if a newer request superseded it.
    pub fn apply(&self, session: &mut WritingSession, ticket: Ticket) -> Option<Vec<Event>> {
        match self {
            ToolReply::Pace(o) => session.finish_tool_request(ticket, o),
            ToolReply::Break(o) => session.finish_tool_request(ticket, o),
            ToolReply::Stuck(o) => session.finish_tool_request(ticket, o),
            ToolReply::Improve(o) => session.finish_tool_request(ticket, o),
            ToolReply::Exercise(o) => session.finish_tool_request(ticket, o),
        }
    }

    pub fn render(&self) -> String {
        let mut lines = Vec::new();
        match self {
            ToolReply::Pace(o) => {
                let a = &o.output;
                lines.push(format!("Pace: {}", a.pace_analysis));
                lines.push(format!("Style: {}", a.style_analysis));
                lines.push(format!("Blocks: {}", a.writing_blocks));
                lines.push(format!("Resources: {}", a.suggested_resources));
            }
            ToolReply::Break(o) => {
                let b = &o.output;
                let verdict = if b.is_good_break_point {
                    "Good time for a break."
                } else {
                    "Keep going for now."
                };
                lines.push(format!("{verdict} {}", b.reason));
                if let Some(action) = &b.suggested_action {
                    lines.push(format!("Try: {action}"));
                }
            }
            ToolReply::Stuck(o) => {
                let s = &o.output;
                lines.push(s.activity_suggestion.clone());
                if let Some(why) = &s.rationale {
                    lines.push(format!("Why: {why}"));
                }
                if let Some(time) = &s.estimated_time {
                    lines.push(format!("Time: {time}"));
                }
            }
            ToolReply::Improve(o) => {
                lines.push(o.output.improved_text.clone());
                for tip in &o.output.suggestions {
                    lines.push(format!("  - {tip}"));
                }
            }
            ToolReply::Exercise(o) => {
                let e = &o.output;
                match &e.category {
                    Some(category) => lines.push(format!("[{category}] {}", e.exercise_prompt)),
                    None => lines.push(e.exercise_prompt.clone()),
                }
            }
        }
        if self.source() != OutcomeSource::Model && self.source() != OutcomeSource::Local {
            lines.push("(offline suggestion)".into());
        }
        lines.join("\n")
    }
}

/// Shown when [`ToolReply::apply`] drops a reply because a newer request replaced it.
pub fn superseded_notice(reply: &ToolReply) -> String {
    format!("(earlier {} request superseded by a newer one)", reply.tool().name())
}

pub fn run(action: AssistAction) -> Result<(), Box<dyn std::error::Error>> {
    let assistant = Config::load()?.assistant()?;

    let (request, text) = match action {
        AssistAction::Pace(input) => (ToolRequest::Pace, input.read()?),
        AssistAction::Break(input) => (ToolRequest::Break, input.read()?),
        AssistAction::Stuck { input, problem } => (ToolRequest::Stuck { problem }, input.read()?),
        AssistAction::Improve(input) => (ToolRequest::Improve, input.read()?),
        AssistAction::Exercise(input) => {
            let text = input.read()?;
            (ToolRequest::Exercise(ExerciseRequest::from_text(&text)), text)
        }
    };

    let runtime = tokio::runtime::Builder::new_multi_thread().enable_all().build()?;
    let reply = runtime.block_on(call(&assistant, request, &text))?;
    println!("{}", serde_json::to_string_pretty(&reply)?);
    Ok(())
}
