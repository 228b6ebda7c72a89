//! Prompt text and response schemas for each tool.

use indoc::{formatdoc, indoc};
use serde_json::{json, Value};

use super::types::ExerciseRequest;

pub fn pace_analysis(text: &str) -> String {
    formatdoc! {"
        You are a writing assistant that reviews a draft for pace and style,
        spots likely writing blocks, and points to resources that would help.

        Draft:

        {text}

        Reply with an analysis of the writing pace, the writing style, any
        writing blocks you notice, and suggested resources.
    ", text = text}
}

pub fn break_point(text: &str) -> String {
    formatdoc! {"
        You are a writing assistant deciding whether the writer has reached a
        natural place to pause. Paragraph or section endings, topic shifts and
        concluded thoughts are good places; mid-thought text is not.

        Draft:

        {text}

        Say whether this is a good break point, give a short reason, and
        optionally one small action to take before pausing.
    ", text = text}
}

pub fn stuck_activity(current_text: &str, problem: Option<&str>) -> String {
    let focus = match problem {
        Some(problem) => formatdoc! {"
            The writer describes the problem as: \"{problem}\"
            Suggest one brief, concrete activity (5-15 minutes) aimed at that problem.
        ", problem = problem},
        None => indoc! {"
            The writer has not said what the problem is. Suggest one general
            activity that loosens writer's block or refreshes creativity.
        "}
        .to_string(),
    };
    formatdoc! {"
        You are a writing coach. The writer feels stuck.
        Current draft (may be empty):
        \"{current_text}\"

        {focus}
        Include a short rationale and an estimated time.
    ", current_text = current_text, focus = focus}
}

pub fn improve_writing(text: &str) -> String {
    formatdoc! {"
        You are an experienced editor. Improve the text below while keeping its
        meaning, intent and tone. Work on clarity and concision, grammar and
        punctuation, sentence flow, and precise word choice.

        Text:
        {text}

        Return the original text, the improved text, and an optional list of
        short notes describing the main changes.
    ", text = text}
}

pub fn writing_exercise(request: &ExerciseRequest) -> String {
    let context = match &request.current_topic {
        Some(topic) => formatdoc! {"
            The writer is currently working on: \"{topic}\". Tie the exercise to it
            loosely if you can, but keep it light.
        ", topic = topic},
        None => "Offer a general creative exercise or a playful mini-quest.\n".to_string(),
    };
    formatdoc! {"
        You create short creative writing exercises (one or two sentences) that
        refresh the writer during a break. Framing them as a small quest or
        challenge is welcome.

        {context}
        The exercise should take 5-10 minutes. Give the prompt and an optional
        category such as \"Creativity Booster\" or \"Mini Quest\".
    ", context = context}
}

fn object(properties: Value, required: &[&str]) -> Value {
    json!({
        "type": "OBJECT",
        "properties": properties,
        "required": required,
    })
}

pub fn pace_analysis_schema() -> Value {
    object(
        json!({
            "paceAnalysis": { "type": "STRING" },
            "styleAnalysis": { "type": "STRING" },
            "writingBlocks": { "type": "STRING" },
            "suggestedResources": { "type": "STRING" },
        }),
        &["paceAnalysis", "styleAnalysis", "writingBlocks", "suggestedResources"],
    )
}

pub fn break_point_schema() -> Value {
    object(
        json!({
            "isGoodBreakPoint": { "type": "BOOLEAN" },
            "reason": { "type": "STRING" },
            "suggestedAction": { "type": "STRING" },
        }),
        &["isGoodBreakPoint", "reason"],
    )
}

pub fn stuck_activity_schema() -> Value {
    object(
        json!({
            "activitySuggestion": { "type": "STRING" },
            "rationale": { "type": "STRING" },
            "estimatedTime": { "type": "STRING" },
        }),
        &["activitySuggestion"],
    )
}

pub fn improve_writing_schema() -> Value {
    object(
        json!({
            "originalText": { "type": "STRING" },
            "improvedText": { "type": "STRING" },
            "suggestions": { "type": "ARRAY", "items": { "type": "STRING" } },
        }),
        &["originalText", "improvedText"],
    )
}

pub fn writing_exercise_schema() -> Value {
    object(
        json!({
            "exercisePrompt": { "type": "STRING" },
            "category": { "type": "STRING" },
        }),
        &["exercisePrompt"],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stuck_prompt_mentions_problem_only_when_given() {
        let with = stuck_activity("draft", Some("dialogue feels flat"));
        assert!(with.contains("dialogue feels flat"));
        let without = stuck_activity("draft", None);
        assert!(without.contains("has not said"));
    }

    #[test]
    fn exercise_prompt_uses_topic() {
        let req = ExerciseRequest {
            current_topic: Some("a lighthouse keeper".into()),
            text_length: Some(40),
        };
        assert!(writing_exercise(&req).contains("a lighthouse keeper"));
    }

    #[test]
    fn schemas_list_required_fields() {
        let schema = break_point_schema();
        assert_eq!(schema["required"], json!(["isGoodBreakPoint", "reason"]));
    }
}
