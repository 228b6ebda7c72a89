//! The five writing tools.
//!
//! Every tool makes at most one model call and never surfaces a model
//! failure: an error becomes the tool's error fallback, an empty or
//! unusable answer becomes its (different) empty-response fallback.

use super::prompts;
use super::service::{PromptRequest, PromptService};
use super::types::{
    BreakPointSuggestion, ExerciseRequest, ImprovedWriting, OutcomeSource, PaceAnalysis,
    StuckActivity, ToolKind, ToolOutcome, ToolOutput, WritingExercise,
};
use crate::error::AssistError;
use crate::progress::count_words;

/// Below this many words a break suggestion is answered locally.
pub const MIN_WORDS_FOR_BREAK_ANALYSIS: u64 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Failure {
    Empty,
    Error,
}

pub struct Assistant<S> {
    service: S,
}

impl<S: PromptService> Assistant<S> {
    pub fn new(service: S) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub async fn analyze_pace(&self, text: &str) -> Result<ToolOutcome<PaceAnalysis>, AssistError> {
        require_text(ToolKind::PaceAnalysis, text)?;
        Ok(self
            .run(
                ToolKind::PaceAnalysis,
                prompts::pace_analysis(text),
                prompts::pace_analysis_schema(),
                pace_fallback,
            )
            .await)
    }

    pub async fn suggest_break_point(
        &self,
        text: &str,
    ) -> Result<ToolOutcome<BreakPointSuggestion>, AssistError> {
        require_text(ToolKind::BreakPoint, text)?;
        if count_words(text) < MIN_WORDS_FOR_BREAK_ANALYSIS {
            return Ok(ToolOutcome {
                tool: ToolKind::BreakPoint,
                source: OutcomeSource::Local,
                output: BreakPointSuggestion {
                    is_good_break_point: false,
                    reason: "The text is quite short. It might be better to write a bit more before pausing.".into(),
                    suggested_action: None,
                },
            });
        }
        Ok(self
            .run(
                ToolKind::BreakPoint,
                prompts::break_point(text),
                prompts::break_point_schema(),
                break_point_fallback,
            )
            .await)
    }

    /// Works with an empty draft.
    pub async fn suggest_stuck_activity(
        &self,
        current_text: &str,
        problem: Option<&str>,
    ) -> ToolOutcome<StuckActivity> {
        let problem = problem.map(str::trim).filter(|p| !p.is_empty());
        self.run(
            ToolKind::StuckActivity,
            prompts::stuck_activity(current_text, problem),
            prompts::stuck_activity_schema(),
            stuck_fallback,
        )
        .await
    }

    pub async fn improve_writing(
        &self,
        text: &str,
    ) -> Result<ToolOutcome<ImprovedWriting>, AssistError> {
        require_text(ToolKind::ImproveWriting, text)?;
        let mut outcome = self
            .run(
                ToolKind::ImproveWriting,
                prompts::improve_writing(text),
                prompts::improve_writing_schema(),
                improve_fallback,
            )
            .await;
        // The caller's text is authoritative, whatever the model echoed.
        outcome.output.original_text = text.to_string();
        Ok(outcome)
    }

    pub async fn generate_exercise(&self, request: &ExerciseRequest) -> ToolOutcome<WritingExercise> {
        self.run(
            ToolKind::WritingExercise,
            prompts::writing_exercise(request),
            prompts::writing_exercise_schema(),
            exercise_fallback,
        )
        .await
    }

    async fn run<T: ToolOutput>(
        &self,
        tool: ToolKind,
        prompt: String,
        response_schema: serde_json::Value,
        fallback: fn(Failure) -> T,
    ) -> ToolOutcome<T> {
        let request = PromptRequest {
            tool,
            prompt,
            response_schema,
        };
        let failure = match self.service.generate(request).await {
            Ok(value) => match serde_json::from_value::<T>(value) {
                Ok(output) if output.is_present() => {
                    return ToolOutcome {
                        tool,
                        source: OutcomeSource::Model,
                        output,
                    };
                }
                Ok(_) => {
                    tracing::warn!(tool = tool.name(), "model output missing required text, using fallback");
                    Failure::Empty
                }
                Err(e) => {
                    tracing::warn!(tool = tool.name(), error = %e, "model output did not match schema, using fallback");
                    Failure::Empty
                }
            },
            Err(e) if e.is_empty_output() => {
                tracing::warn!(tool = tool.name(), error = %e, "model returned nothing usable, using fallback");
                Failure::Empty
            }
            Err(e) => {
                tracing::warn!(tool = tool.name(), error = %e, "model call failed, using fallback");
                Failure::Error
            }
        };
        let source = match failure {
            Failure::Empty => OutcomeSource::EmptyResponseFallback,
            Failure::Error => OutcomeSource::ErrorFallback,
        };
        ToolOutcome {
            tool,
            source,
            output: fallback(failure),
        }
    }
}

fn require_text(tool: ToolKind, text: &str) -> Result<(), AssistError> {
    if text.trim().is_empty() {
        return Err(AssistError::TextRequired { tool: tool.name() });
    }
    Ok(())
}

fn pace_fallback(failure: Failure) -> PaceAnalysis {
    match failure {
        Failure::Empty => PaceAnalysis {
            pace_analysis: "The assistant could not produce a pace analysis for this text.".into(),
            style_analysis: "No style notes are available right now.".into(),
            writing_blocks: "None identified.".into(),
            suggested_resources: "Try again after writing a little more.".into(),
        },
        Failure::Error => PaceAnalysis {
            pace_analysis: "Apologies, the pace analysis is unavailable right now.".into(),
            style_analysis: "The writing assistant could not be reached.".into(),
            writing_blocks: "Unknown.".into(),
            suggested_resources: "Check your connection and try again later.".into(),
        },
    }
}

fn break_point_fallback(failure: Failure) -> BreakPointSuggestion {
    match failure {
        Failure::Empty => BreakPointSuggestion {
            is_good_break_point: false,
            reason: "Could not determine a suitable break point at this time. Try writing a bit more.".into(),
            suggested_action: None,
        },
        Failure::Error => BreakPointSuggestion {
            is_good_break_point: false,
            reason: "The writing assistant is unavailable. Finish your current thought before pausing.".into(),
            suggested_action: None,
        },
    }
}

fn stuck_fallback(failure: Failure) -> StuckActivity {
    match failure {
        Failure::Empty => StuckActivity {
            activity_suggestion: "Try free-writing for 5 minutes on a completely unrelated topic to clear your head, then come back to your main piece.".into(),
            rationale: Some("Sometimes a mental reset can help break through a block.".into()),
            estimated_time: Some("5-10 minutes".into()),
        },
        Failure::Error => StuckActivity {
            activity_suggestion: "Step away from the screen and list three questions your reader might ask next.".into(),
            rationale: Some("Switching from drafting to questioning often shows the next step.".into()),
            estimated_time: Some("5 minutes".into()),
        },
    }
}

fn improve_fallback(failure: Failure) -> ImprovedWriting {
    match failure {
        Failure::Empty => ImprovedWriting {
            original_text: String::new(),
            improved_text: "Error: Could not improve text at this time. The AI model did not provide a valid response.".into(),
            suggestions: vec!["The AI model encountered an issue or the text was too short/complex to process effectively at this moment. Please try again later or with a different piece of text.".into()],
        },
        Failure::Error => ImprovedWriting {
            original_text: String::new(),
            improved_text: "Apologies, I couldn't process the improvement request right now. There might have been a connection issue or an internal error.".into(),
            suggestions: vec!["Please check your internet connection and try again. If the problem persists, the AI service might be temporarily unavailable.".into()],
        },
    }
}

fn exercise_fallback(failure: Failure) -> WritingExercise {
    match failure {
        Failure::Empty => WritingExercise {
            exercise_prompt: "Take a moment to jot down three interesting words you've encountered today. Try to use them in a sentence later!".into(),
            category: Some("Vocabulary Builder".into()),
        },
        Failure::Error => WritingExercise {
            exercise_prompt: "Apologies, I couldn't generate an exercise right now. How about sketching a character from your story?".into(),
            category: Some("Creative Block".into()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Replies with a fixed answer and counts calls.
    struct Canned {
        reply: fn() -> Result<Value, AssistError>,
        calls: AtomicUsize,
    }

    impl Canned {
        fn new(reply: fn() -> Result<Value, AssistError>) -> Self {
            Self {
                reply,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl PromptService for Canned {
        async fn generate(&self, _request: PromptRequest) -> Result<Value, AssistError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.reply)()
        }
    }

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    #[tokio::test]
    async fn short_text_break_point_is_local() {
        let assistant = Assistant::new(Canned::new(|| Ok(json!({}))));
        let outcome = assistant.suggest_break_point(&words(10)).await.unwrap();
        assert!(!outcome.output.is_good_break_point);
        assert_eq!(outcome.source, OutcomeSource::Local);
        assert!(!outcome.earns_xp());
        assert_eq!(assistant.service().calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn long_text_break_point_calls_model() {
        let assistant = Assistant::new(Canned::new(|| {
            Ok(json!({ "isGoodBreakPoint": true, "reason": "Paragraph done." }))
        }));
        let outcome = assistant.suggest_break_point(&words(25)).await.unwrap();
        assert!(outcome.output.is_good_break_point);
        assert!(outcome.earns_xp());
        assert_eq!(assistant.service().calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn error_and_empty_fallbacks_differ() {
        let failing = Assistant::new(Canned::new(|| Err(AssistError::MissingApiKey("K".into()))));
        let empty = Assistant::new(Canned::new(|| Err(AssistError::EmptyResponse)));
        let a = failing.generate_exercise(&ExerciseRequest::default()).await;
        let b = empty.generate_exercise(&ExerciseRequest::default()).await;
        assert_eq!(a.source, OutcomeSource::ErrorFallback);
        assert_eq!(b.source, OutcomeSource::EmptyResponseFallback);
        assert_ne!(a.output, b.output);
        assert!(!a.earns_xp() && !b.earns_xp());
    }

    #[tokio::test]
    async fn schema_mismatch_is_empty_fallback() {
        let assistant = Assistant::new(Canned::new(|| Ok(json!({ "unexpected": 1 }))));
        let outcome = assistant.suggest_stuck_activity("", None).await;
        assert_eq!(outcome.source, OutcomeSource::EmptyResponseFallback);
        assert_eq!(outcome.output.estimated_time.as_deref(), Some("5-10 minutes"));
    }

    #[tokio::test]
    async fn improve_keeps_callers_text() {
        let assistant = Assistant::new(Canned::new(|| {
            Ok(json!({ "originalText": "something else", "improvedText": "Crisp prose." }))
        }));
        let outcome = assistant.improve_writing("limp prose").await.unwrap();
        assert_eq!(outcome.output.original_text, "limp prose");
        assert_eq!(outcome.output.improved_text, "Crisp prose.");

        let failing = Assistant::new(Canned::new(|| Err(AssistError::Status { status: 500, body: String::new() })));
        let outcome = failing.improve_writing("limp prose").await.unwrap();
        assert_eq!(outcome.output.original_text, "limp prose");
        assert!(outcome.is_fallback());
    }

    #[tokio::test]
    async fn blank_text_is_rejected_before_calling() {
        let assistant = Assistant::new(Canned::new(|| Ok(json!({}))));
        assert!(matches!(
            assistant.analyze_pace("   ").await,
            Err(AssistError::TextRequired { .. })
        ));
        assert!(assistant.improve_writing("").await.is_err());
        assert!(assistant.suggest_break_point("").await.is_err());
        assert_eq!(assistant.service().calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn blank_required_field_is_empty_fallback() {
        let assistant = Assistant::new(Canned::new(|| {
            Ok(json!({
                "paceAnalysis": "",
                "styleAnalysis": "",
                "writingBlocks": "",
                "suggestedResources": ""
            }))
        }));
        let outcome = assistant.analyze_pace("Some text here.").await.unwrap();
        assert_eq!(outcome.source, OutcomeSource::EmptyResponseFallback);
    }
}
