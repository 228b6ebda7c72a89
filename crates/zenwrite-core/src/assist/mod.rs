//! Writing assistant: prompt-backed tools with local fallbacks.
//!
//! - [`Assistant`]: the five tools, generic over a [`PromptService`]
//! - [`HttpPromptService`]: Gemini `generateContent` over reqwest
//! - [`RequestTickets`]: drops answers to superseded requests

mod prompts;
mod service;
mod tickets;
mod tools;
mod types;

pub use service::{
    extract_json_answer, AssistantConfig, HttpPromptService, PromptRequest, PromptService,
};
pub use tickets::{RequestTickets, Ticket};
pub use tools::{Assistant, MIN_WORDS_FOR_BREAK_ANALYSIS};
pub use types::{
    BreakPointSuggestion, ExerciseRequest, ImprovedWriting, OutcomeSource, PaceAnalysis,
    StuckActivity, ToolKind, ToolOutcome, ToolOutput, WritingExercise, EXERCISE_TOPIC_WORDS,
};
