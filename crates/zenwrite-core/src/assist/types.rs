//! Request and response shapes for the writing tools.
//!
//! Output structs deserialize from the model's camelCase JSON.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    PaceAnalysis,
    BreakPoint,
    StuckActivity,
    ImproveWriting,
    WritingExercise,
}

impl ToolKind {
    pub fn name(&self) -> &'static str {
        match self {
            ToolKind::PaceAnalysis => "pace analysis",
            ToolKind::BreakPoint => "break point suggestion",
            ToolKind::StuckActivity => "stuck activity",
            ToolKind::ImproveWriting => "writing improvement",
            ToolKind::WritingExercise => "writing exercise",
        }
    }
}

/// Where a tool's answer came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeSource {
    /// The model answered with usable output.
    Model,
    /// Answered locally without calling the model.
    Local,
    /// The model answered, but with nothing usable.
    EmptyResponseFallback,
    /// The call itself failed.
    ErrorFallback,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolOutcome<T> {
    pub tool: ToolKind,
    pub source: OutcomeSource,
    pub output: T,
}

impl<T> ToolOutcome<T> {
    /// Only a real model answer counts as a successful tool use.
    pub fn earns_xp(&self) -> bool {
        self.source == OutcomeSource::Model
    }

    pub fn is_fallback(&self) -> bool {
        matches!(
            self.source,
            OutcomeSource::EmptyResponseFallback | OutcomeSource::ErrorFallback
        )
    }
}

/// Model output that can be checked for the field the UI actually shows.
pub trait ToolOutput: DeserializeOwned {
    fn is_present(&self) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaceAnalysis {
    pub pace_analysis: String,
    pub style_analysis: String,
    pub writing_blocks: String,
    pub suggested_resources: String,
}

impl ToolOutput for PaceAnalysis {
    fn is_present(&self) -> bool {
        !self.pace_analysis.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakPointSuggestion {
    pub is_good_break_point: bool,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<String>,
}

impl ToolOutput for BreakPointSuggestion {
    fn is_present(&self) -> bool {
        !self.reason.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StuckActivity {
    pub activity_suggestion: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<String>,
}

impl ToolOutput for StuckActivity {
    fn is_present(&self) -> bool {
        !self.activity_suggestion.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImprovedWriting {
    #[serde(default)]
    pub original_text: String,
    pub improved_text: String,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

impl ToolOutput for ImprovedWriting {
    fn is_present(&self) -> bool {
        !self.improved_text.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WritingExercise {
    pub exercise_prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl ToolOutput for WritingExercise {
    fn is_present(&self) -> bool {
        !self.exercise_prompt.trim().is_empty()
    }
}

/// Context used to tailor a break exercise.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseRequest {
    pub current_topic: Option<String>,
    pub text_length: Option<u64>,
}

/// Words taken from the start of the text as the exercise topic.
pub const EXERCISE_TOPIC_WORDS: usize = 20;

impl ExerciseRequest {
    /// Topic is the first few words of `text` (absent for blank text);
    /// length is the character count.
    pub fn from_text(text: &str) -> Self {
        let topic = text
            .split_whitespace()
            .take(EXERCISE_TOPIC_WORDS)
            .collect::<Vec<_>>()
            .join(" ");
        Self {
            current_topic: (!topic.is_empty()).then_some(topic),
            text_length: Some(text.chars().count() as u64),
        }
    }
}
