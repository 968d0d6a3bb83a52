// Cross-cutting prompt fragments. The oracle keeps its own prompts next to it.

/// Appended to every prompt that expects a structured reply.
pub const JSON_ONLY_INSTRUCTION: &str = "\
    Respond with a single JSON object only. \
    Do NOT use markdown code fences. \
    Do NOT include any text outside the JSON object.";
