// Prompt templates for the generation model.

/// Metadata extraction prompt. The reply is parsed line by line, so the model is asked
/// for exactly one `Field: value` line per field.
pub const METADATA_EXTRACT_PROMPT: &str = "\
Extract the following details from the resume:
- Name
- Skills
- Experience. Only return experience in years. If there is no previous experience, check for \
completion of a degree and state fresher or no experience.

Answer with exactly these three lines and nothing else:
Name: <full name>
Skills: <comma-separated skills>
Experience: <experience>

Resume Text:
{resume_text}";

pub fn metadata_prompt(resume_text: &str) -> String {
    METADATA_EXTRACT_PROMPT.replace("{resume_text}", resume_text)
}
