#[cfg(test)]
#[path = "artifacts_test.rs"]
mod tests;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::models::CodeArtifact;
use crate::domain::models::Message;

// Triple backtick, optional language tag, newline, non-greedy body, closing
// fence. Non-greedy matching keeps nested-looking fences from being double
// counted, and an unterminated fence at the tail of a stream simply doesn't
// match until its closing fence arrives.
pub static FENCE: Lazy<Regex> =
    Lazy::new(|| return Regex::new(r"(?s)```(\w+)?\n(.*?)```").unwrap());

pub struct CodeBlock {
    pub language: String,
    pub code: String,
    pub start: usize,
    pub end: usize,
}

/// Finds fenced code blocks in order of appearance, non-overlapping.
pub fn detect_code_blocks(content: &str) -> Vec<CodeBlock> {
    return FENCE
        .captures_iter(content)
        .map(|caps| {
            let full = caps.get(0).unwrap();
            let language = caps
                .get(1)
                .map(|m| return m.as_str().to_string())
                .unwrap_or_else(|| return "text".to_string());

            return CodeBlock {
                language,
                code: caps.get(2).unwrap().as_str().trim().to_string(),
                start: full.start(),
                end: full.end(),
            };
        })
        .collect();
}

/// Turns every fenced block into a `CodeArtifact` with a synthesized
/// filename. Pure and idempotent: the same text always yields structurally
/// identical results, ids aside.
pub fn extract_artifacts(content: &str) -> Vec<CodeArtifact> {
    return detect_code_blocks(content)
        .iter()
        .enumerate()
        .map(|(idx, block)| {
            let filename = format!(
                "{}_{}.{}",
                block.language,
                idx + 1,
                file_extension(&block.language)
            );

            return CodeArtifact::new(&block.language, &block.code, Some(filename));
        })
        .collect();
}

/// Replays fenced blocks across the whole conversation in the order the
/// chat tags them, so a one-based index into the result is the number shown
/// next to the block on screen.
pub fn conversation_artifacts(messages: &[Message]) -> Vec<CodeArtifact> {
    let mut results: Vec<CodeArtifact> = vec![];

    for message in messages {
        for block in detect_code_blocks(&message.content) {
            let filename = format!(
                "{}_{}.{}",
                block.language,
                results.len() + 1,
                file_extension(&block.language)
            );

            results.push(CodeArtifact::new(
                &block.language,
                &block.code,
                Some(filename),
            ));
        }
    }

    return results;
}

pub fn file_extension(language: &str) -> &'static str {
    match language.to_lowercase().as_str() {
        "javascript" => return "js",
        "typescript" => return "ts",
        "jsx" => return "jsx",
        "tsx" => return "tsx",
        "python" => return "py",
        "java" => return "java",
        "cpp" => return "cpp",
        "c" => return "c",
        "csharp" => return "cs",
        "php" => return "php",
        "ruby" => return "rb",
        "go" => return "go",
        "rust" => return "rs",
        "swift" => return "swift",
        "kotlin" => return "kt",
        "html" => return "html",
        "css" => return "css",
        "scss" => return "scss",
        "sass" => return "sass",
        "less" => return "less",
        "json" => return "json",
        "xml" => return "xml",
        "yaml" | "yml" => return "yml",
        "toml" => return "toml",
        "markdown" | "md" => return "md",
        "sql" => return "sql",
        "bash" | "shell" | "sh" | "zsh" => return "sh",
        "fish" => return "fish",
        "powershell" => return "ps1",
        "lua" => return "lua",
        "perl" => return "pl",
        "r" => return "r",
        "dart" => return "dart",
        "scala" => return "scala",
        "haskell" => return "hs",
        "elixir" => return "ex",
        "erlang" => return "erl",
        "clojure" => return "clj",
        "zig" => return "zig",
        "vue" => return "vue",
        "svelte" => return "svelte",
        "graphql" => return "graphql",
        "proto" => return "proto",
        "diff" => return "diff",
        "tex" => return "tex",
        "ini" => return "ini",
        "dockerfile" => return "dockerfile",
        "makefile" => return "mk",
        _ => return "txt",
    }
}
