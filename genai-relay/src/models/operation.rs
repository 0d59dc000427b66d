//! The four relay routes and their fixed messages.

/// How many files a route accepts under its field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    Single,
    AtLeastOne,
}

/// Which multipart file field a route requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileRule {
    pub field: &'static str,
    pub cardinality: Cardinality,
    pub missing_message: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Text,
    Image,
    Files,
    Audio,
}

pub const PROMPT_REQUIRED: &str = "Prompt is required";

impl Operation {
    pub fn route(self) -> &'static str {
        match self {
            Operation::Text => "/generate-text",
            Operation::Image => "/generate-from-image",
            Operation::Files => "/generate-from-files",
            Operation::Audio => "/generate-from-audio",
        }
    }

    /// Public message returned with a 500 when the model call fails.
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::Text => "Failed to generate text",
            Operation::Image => "Failed to generate from image",
            Operation::Files => "Failed to generate from files",
            Operation::Audio => "Failed to generate from audio",
        }
    }

    /// Server-side log line for a failed model call.
    pub fn log_label(self) -> &'static str {
        match self {
            Operation::Text => "Error generating text",
            Operation::Image => "Error generating from image",
            Operation::Files => "Error generating from files",
            Operation::Audio => "Error generating from audio",
        }
    }

    pub fn file_rule(self) -> Option<FileRule> {
        match self {
            Operation::Text => None,
            Operation::Image => Some(FileRule {
                field: "image",
                cardinality: Cardinality::Single,
                missing_message: "Image file is required",
            }),
            Operation::Files => Some(FileRule {
                field: "files",
                cardinality: Cardinality::AtLeastOne,
                missing_message: "At least one file is required",
            }),
            Operation::Audio => Some(FileRule {
                field: "audio",
                cardinality: Cardinality::Single,
                missing_message: "Audio file is required",
            }),
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.route())
    }
}
