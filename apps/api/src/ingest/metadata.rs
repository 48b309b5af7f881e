//! Metadata extraction — asks the generation model for `Name` / `Skills` / `Experience`
//! lines and parses them out of the free-text reply.
//!
//! The model is not guaranteed to follow the format. A field whose line is missing is
//! simply absent; callers apply their own defaults.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::genai::prompts::metadata_prompt;
use crate::genai::{GenAiClient, GenAiError};
use crate::models::resume::ExtractedMetadata;

/// Carried in `AppState` as `Arc<dyn MetadataExtractor>`, so the parsing strategy can be
/// replaced (e.g. by a structured-output call) without touching the ingestion flow.
#[async_trait]
pub trait MetadataExtractor: Send + Sync {
    async fn extract(&self, resume_text: &str) -> Result<ExtractedMetadata, GenAiError>;
}

/// Prompt-and-parse extractor over the generation model.
pub struct GenAiMetadataExtractor(pub GenAiClient);

#[async_trait]
impl MetadataExtractor for GenAiMetadataExtractor {
    async fn extract(&self, resume_text: &str) -> Result<ExtractedMetadata, GenAiError> {
        let reply = self.0.generate(&metadata_prompt(resume_text)).await?;
        debug!("Metadata reply: {reply}");
        Ok(parse_metadata_reply(&reply))
    }
}

// Line-anchored; tolerates list bullets, headings, and markdown bold around the label.
static NAME_RE: Lazy<Regex> = Lazy::new(|| field_regex("Name"));
static SKILLS_RE: Lazy<Regex> = Lazy::new(|| field_regex("Skills"));
static EXPERIENCE_RE: Lazy<Regex> = Lazy::new(|| field_regex("Experience"));

fn field_regex(label: &str) -> Regex {
    Regex::new(&format!(r"(?m)^[ \t>#*\-]*{label}[ \t*]*:[ \t*]*(.+?)[ \t*]*$"))
        .expect("field pattern is a valid regex")
}

fn capture(re: &Regex, reply: &str) -> Option<String> {
    re.captures(reply)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Parses the model reply. Skills are split on commas and trimmed; empty items are dropped.
pub fn parse_metadata_reply(reply: &str) -> ExtractedMetadata {
    ExtractedMetadata {
        name: capture(&NAME_RE, reply),
        skills: capture(&SKILLS_RE, reply).map(|line| {
            line.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        }),
        experience: capture(&EXPERIENCE_RE, reply),
    }
}
