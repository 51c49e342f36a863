use uuid::Uuid;

/// A block of code extracted from assistant output, either pushed by the
/// backend mid-stream or rescanned out of a finished message. Immutable once
/// created; a newer artifact supersedes an older one, it never mutates it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeArtifact {
    pub id: Uuid,
    pub language: String,
    pub code: String,
    pub filename: Option<String>,
    pub description: Option<String>,
}

impl CodeArtifact {
    pub fn new(language: &str, code: &str, filename: Option<String>) -> CodeArtifact {
        return CodeArtifact {
            id: Uuid::new_v4(),
            language: language.to_string(),
            code: code.to_string(),
            filename,
            description: None,
        };
    }
}
