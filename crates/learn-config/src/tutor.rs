//! Tutor session settings.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

const fn default_start_lesson() -> u32 {
    1
}

/// Rows shown per result table.
const fn default_max_display_rows() -> usize {
    10
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TutorSettings {
    /// Lesson activated when a session starts.
    #[serde(default = "default_start_lesson")]
    pub start_lesson: u32,

    /// Maximum number of result rows rendered after a submission.
    #[serde(default = "default_max_display_rows")]
    pub max_display_rows: usize,

    /// Show each lesson's reference query alongside the task.
    #[serde(default)]
    pub show_reference: bool,
}

impl Default for TutorSettings {
    fn default() -> Self {
        Self {
            start_lesson: default_start_lesson(),
            max_display_rows: default_max_display_rows(),
            show_reference: false,
        }
    }
}

impl TutorSettings {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.start_lesson == 0 {
            return Err(ConfigError::invalid(
                "tutor.start_lesson",
                "lesson ids start at 1",
            ));
        }
        Ok(())
    }
}
