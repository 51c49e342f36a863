use super::BackendPrompt;
use super::CodeArtifact;

pub enum Action {
    BackendAbort(),
    BackendRequest(BackendPrompt),
    CopyText(String),
    SaveArtifact(CodeArtifact),
    OpenPreview(CodeArtifact),
}
