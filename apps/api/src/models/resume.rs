use serde::Serialize;
use serde_json::{Map, Value};

/// Fields the generation model was asked to pull out of a resume.
/// Each is `None` when the reply did not contain a matching line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedMetadata {
    pub name: Option<String>,
    pub skills: Option<Vec<String>>,
    pub experience: Option<String>,
}

/// Metadata written next to a resume's embedding (write-path normalization).
///
/// Field names are the keys stored in the index, so they must stay stable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredResume {
    pub name: String,
    pub skills: Vec<String>,
    pub experience: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    pub resume: String,
}

impl StoredResume {
    pub fn new(
        extracted: ExtractedMetadata,
        email: Option<&str>,
        contact: Option<&str>,
        resume_text: &str,
    ) -> Self {
        Self {
            name: extracted
                .name
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| "unknown".to_string()),
            skills: extracted.skills.unwrap_or_default(),
            experience: extracted
                .experience
                .filter(|e| !e.is_empty())
                .unwrap_or_else(|| "No experience".to_string()),
            email: non_blank(email).unwrap_or_else(|| "no email".to_string()),
            contact: non_blank(contact),
            resume: if resume_text.is_empty() {
                "not defined".to_string()
            } else {
                resume_text.to_string()
            },
        }
    }

    pub fn into_metadata(self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            // A struct of strings always serializes to an object.
            _ => Map::new(),
        }
    }
}

/// Whitespace-only counts as absent; anything else is kept exactly as submitted.
fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(str::to_string)
}

const NOT_AVAILABLE: &str = "Not Available";
const NO_EXPERIENCE: &str = "No experience";

/// A resume as returned by search (read-path normalization).
///
/// Defaults differ from `StoredResume` on purpose: the read path never assumes the
/// index only holds entries written by this service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResumeRecord {
    pub name: String,
    pub email: String,
    pub contact: String,
    pub skills: Vec<String>,
    pub experience: String,
    pub resume: String,
}

impl Default for ResumeRecord {
    fn default() -> Self {
        Self {
            name: NOT_AVAILABLE.to_string(),
            email: NOT_AVAILABLE.to_string(),
            contact: NOT_AVAILABLE.to_string(),
            skills: Vec::new(),
            experience: NO_EXPERIENCE.to_string(),
            resume: NOT_AVAILABLE.to_string(),
        }
    }
}

impl ResumeRecord {
    /// Normalizes whatever metadata the store returned, defaulting missing or malformed fields.
    pub fn from_metadata(metadata: Option<&Map<String, Value>>) -> Self {
        let Some(metadata) = metadata else {
            return Self::default();
        };

        Self {
            name: text_field(metadata, "name", NOT_AVAILABLE),
            email: text_field(metadata, "email", NOT_AVAILABLE),
            contact: text_field(metadata, "contact", NOT_AVAILABLE),
            skills: metadata
                .get("skills")
                .and_then(Value::as_array)
                .map(|arr| {
                    arr.iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
            experience: text_field(metadata, "experience", NO_EXPERIENCE),
            resume: text_field(metadata, "resume", NOT_AVAILABLE),
        }
    }
}

fn text_field(metadata: &Map<String, Value>, key: &str, default: &str) -> String {
    match metadata.get(key) {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => default.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(m) => m,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_stored_resume_defaults_when_extraction_is_empty() {
        let stored = StoredResume::new(ExtractedMetadata::default(), None, None, "");
        assert_eq!(stored.name, "unknown");
        assert!(stored.skills.is_empty());
        assert_eq!(stored.experience, "No experience");
        assert_eq!(stored.email, "no email");
        assert_eq!(stored.contact, None);
        assert_eq!(stored.resume, "not defined");
    }

    #[test]
    fn test_stored_resume_keeps_extracted_and_submitted_fields() {
        let extracted = ExtractedMetadata {
            name: Some("Jane Doe".to_string()),
            skills: Some(vec!["Rust".to_string(), "SQL".to_string()]),
            experience: Some("4 years".to_string()),
        };
        let stored = StoredResume::new(
            extracted,
            Some("jane@example.com"),
            Some("https://linkedin.com/in/janedoe"),
            "Jane Doe\nRust engineer",
        );
        assert_eq!(stored.name, "Jane Doe");
        assert_eq!(stored.skills, vec!["Rust", "SQL"]);
        assert_eq!(stored.email, "jane@example.com");
        assert_eq!(
            stored.contact.as_deref(),
            Some("https://linkedin.com/in/janedoe")
        );
    }

    #[test]
    fn test_into_metadata_omits_absent_contact() {
        let stored = StoredResume::new(
            ExtractedMetadata::default(),
            Some("a@b.io"),
            Some("   "),
            "text",
        );
        let metadata = stored.into_metadata();
        assert!(!metadata.contains_key("contact"));
        assert_eq!(metadata["email"], "a@b.io");
        assert_eq!(metadata["resume"], "text");
        assert_eq!(metadata["skills"], json!([]));
    }

    #[test]
    fn test_submitted_email_is_stored_verbatim() {
        let stored = StoredResume::new(
            ExtractedMetadata::default(),
            Some(" jane@x.io "),
            Some("\t"),
            "text",
        );
        assert_eq!(stored.email, " jane@x.io ");
        assert_eq!(stored.contact, None);
    }

    #[test]
    fn test_record_without_metadata_is_all_defaults() {
        let record = ResumeRecord::from_metadata(None);
        assert_eq!(record.name, "Not Available");
        assert_eq!(record.email, "Not Available");
        assert_eq!(record.contact, "Not Available");
        assert_eq!(record.experience, "No experience");
        assert!(record.skills.is_empty());
    }

    #[test]
    fn test_record_defaults_missing_and_malformed_fields() {
        let metadata = map(json!({
            "name": "",
            "email": "jane@example.com",
            "skills": "Rust, Go",
            "experience": 3
        }));
        let record = ResumeRecord::from_metadata(Some(&metadata));
        assert_eq!(record.name, "Not Available");
        assert_eq!(record.email, "jane@example.com");
        assert_eq!(record.contact, "Not Available");
        assert!(record.skills.is_empty());
        assert_eq!(record.experience, "3");
    }

    #[test]
    fn test_record_keeps_only_string_skills() {
        let metadata = map(json!({"skills": ["Rust", 7, null, "Kafka"]}));
        let record = ResumeRecord::from_metadata(Some(&metadata));
        assert_eq!(record.skills, vec!["Rust", "Kafka"]);
    }

    #[test]
    fn test_write_and_read_paths_default_name_differently() {
        let stored = StoredResume::new(ExtractedMetadata::default(), None, None, "x");
        assert_eq!(stored.name, "unknown");
        let mut metadata = stored.into_metadata();
        metadata.remove("name");
        assert_eq!(ResumeRecord::from_metadata(Some(&metadata)).name, "Not Available");
    }
}
