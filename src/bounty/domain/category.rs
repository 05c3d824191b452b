//! Task categories shown on the bounty board.

use super::ParseTaskCategoryError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of work a task asks for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskCategory {
    /// Uncategorized work.
    #[default]
    General,
    /// Design and creative work.
    Design,
    /// Software development.
    Development,
    /// Writing and content.
    Writing,
    /// Research.
    Research,
    /// Marketing and outreach.
    Marketing,
    /// Data entry.
    DataEntry,
    /// Work done in person.
    Physical,
    /// Anything else.
    Other,
}

impl TaskCategory {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Design => "design",
            Self::Development => "development",
            Self::Writing => "writing",
            Self::Research => "research",
            Self::Marketing => "marketing",
            Self::DataEntry => "data-entry",
            Self::Physical => "physical",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskCategory {
    type Error = ParseTaskCategoryError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "general" => Ok(Self::General),
            "design" => Ok(Self::Design),
            "development" => Ok(Self::Development),
            "writing" => Ok(Self::Writing),
            "research" => Ok(Self::Research),
            "marketing" => Ok(Self::Marketing),
            "data-entry" | "data_entry" => Ok(Self::DataEntry),
            "physical" => Ok(Self::Physical),
            "other" => Ok(Self::Other),
            _ => Err(ParseTaskCategoryError(value.to_owned())),
        }
    }
}
