//! Focus toggles.
//!
//! The flags are independent except `ai_writing_exercises`, which only takes
//! effect while `content_aware_breaks` is on.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusSettings {
    /// Dim everything but the paragraph being edited.
    #[serde(default)]
    pub paragraph_focus: bool,
    /// Follow the time of day in the colour scheme.
    #[serde(default = "default_true")]
    pub dynamic_lighting: bool,
    /// Hide tools while a work interval runs.
    #[serde(default)]
    pub deep_work_mode: bool,
    /// Offer break-point suggestions and break exercises.
    #[serde(default = "default_true")]
    pub content_aware_breaks: bool,
    #[serde(default = "default_true")]
    pub ai_writing_exercises: bool,
}

fn default_true() -> bool {
    true
}

impl Default for FocusSettings {
    fn default() -> Self {
        Self {
            paragraph_focus: false,
            dynamic_lighting: true,
            deep_work_mode: false,
            content_aware_breaks: true,
            ai_writing_exercises: true,
        }
    }
}

impl FocusSettings {
    pub const FLAGS: [&'static str; 5] = [
        "paragraph_focus",
        "dynamic_lighting",
        "deep_work_mode",
        "content_aware_breaks",
        "ai_writing_exercises",
    ];

    pub fn get(&self, name: &str) -> Option<bool> {
        match name {
            "paragraph_focus" => Some(self.paragraph_focus),
            "dynamic_lighting" => Some(self.dynamic_lighting),
            "deep_work_mode" => Some(self.deep_work_mode),
            "content_aware_breaks" => Some(self.content_aware_breaks),
            "ai_writing_exercises" => Some(self.ai_writing_exercises),
            _ => None,
        }
    }

    pub fn set(&mut self, name: &str, value: bool) -> Result<(), ValidationError> {
        let slot = match name {
            "paragraph_focus" => &mut self.paragraph_focus,
            "dynamic_lighting" => &mut self.dynamic_lighting,
            "deep_work_mode" => &mut self.deep_work_mode,
            "content_aware_breaks" => &mut self.content_aware_breaks,
            "ai_writing_exercises" => &mut self.ai_writing_exercises,
            other => return Err(ValidationError::UnknownSetting(other.to_string())),
        };
        *slot = value;
        Ok(())
    }

    /// Set a flag from free-form user input (`on`, `false`, `1`, ...).
    pub fn set_from_str(&mut self, name: &str, value: &str) -> Result<(), ValidationError> {
        let parsed = coerce_bool(value).ok_or_else(|| ValidationError::NotABoolean {
            field: name.to_string(),
            value: value.to_string(),
        })?;
        self.set(name, parsed)
    }

    pub fn toggle(&mut self, name: &str) -> Result<bool, ValidationError> {
        let current = self
            .get(name)
            .ok_or_else(|| ValidationError::UnknownSetting(name.to_string()))?;
        self.set(name, !current)?;
        Ok(!current)
    }

    pub fn break_suggestions_enabled(&self) -> bool {
        self.content_aware_breaks
    }

    pub fn exercises_enabled(&self) -> bool {
        self.content_aware_breaks && self.ai_writing_exercises
    }
}

pub fn coerce_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Some(true),
        "false" | "off" | "no" | "0" => Some(false),
        _ => None,
    }
}
