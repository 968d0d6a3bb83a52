// Oracle prompt templates. `{resume_text}` and `{job_description}` are
// substituted by `oracle::render`.

use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;

pub const AUTHENTICITY_SYSTEM: &str = "You are a resume authenticity evaluator.";

pub const AUTHENTICITY_PROMPT_TEMPLATE: &str = r#"You are an expert resume screener. Decide whether this resume is fake, AI-generated, or overly generic for the role.

Job Description:
{job_description}

Resume:
{resume_text}

Return exactly this structure:
{"fake": "Yes" | "No", "reason": "one or two sentences"}"#;

pub const FIT_SYSTEM: &str = "You are an expert HR resume ranker.";

pub const FIT_PROMPT_TEMPLATE: &str = r#"Evaluate the following resume against the job description. Give a score out of 10 and explain why.

Job Description:
{job_description}

Resume:
{resume_text}

Return exactly this structure:
{"score": <number from 0 to 10, decimals allowed>, "explanation": "short justification"}"#;

/// Appends the JSON-only instruction to a rendered prompt.
pub fn with_json_instruction(prompt: String) -> String {
    format!("{prompt}\n\n{JSON_ONLY_INSTRUCTION}")
}
