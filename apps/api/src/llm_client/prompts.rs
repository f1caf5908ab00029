// Shared prompt fragments used by every analysis prompt.
// Each analysis type keeps its own template in analysis::prompts.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Requirement lines every analysis restates at the end of its prompt.
pub const COMMON_REQUIREMENTS: &[&str] = &[
    "Respond with ONE JSON object and nothing else: no prose, no markdown, no code fences",
    "Use double quotes for every key and string value; no trailing commas",
    "Include EVERY field shown in the schema, using [] for empty lists and \"\" for empty text",
];

pub const SCORE_REQUIREMENT: &str =
    "Every score is an integer from 0 to 100 inclusive; never exceed 100 and never go below 0";

pub const DIFFICULTY_REQUIREMENT: &str =
    "\"difficulty\" MUST be exactly one of: \"Beginner\", \"Intermediate\", \"Advanced\" (no other words, no qualifiers)";

pub const PRIORITY_REQUIREMENT: &str =
    "\"priority\" MUST be exactly one of: \"high\", \"medium\", \"low\" (lowercase, no other values)";

/// Placeholder rendered for empty facts so the model never sees a silently missing value.
pub const NONE_PROVIDED: &str = "(none provided)";

/// Renders a "CRITICAL REQUIREMENTS" block: type-specific lines first, then the common ones.
pub fn critical_requirements(specific: &[&str]) -> String {
    let mut out = String::from("CRITICAL REQUIREMENTS:\n");
    for (i, line) in specific.iter().chain(COMMON_REQUIREMENTS).enumerate() {
        out.push_str(&format!("{}. {line}\n", i + 1));
    }
    out.trim_end().to_string()
}

/// `- a\n- b`, or `(none provided)` when empty.
pub fn bullet_list<S: AsRef<str>>(items: &[S]) -> String {
    let lines: Vec<String> = items
        .iter()
        .map(|s| s.as_ref().trim())
        .filter(|s| !s.is_empty())
        .map(|s| format!("- {s}"))
        .collect();
    if lines.is_empty() {
        NONE_PROVIDED.to_string()
    } else {
        lines.join("\n")
    }
}

/// The trimmed value, or `(none provided)` when blank or absent.
pub fn or_none(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => NONE_PROVIDED.to_string(),
    }
}

/// Fills `{name}` placeholders in one left-to-right pass.
///
/// Substituted values are copied through untouched, so text that looks like a
/// placeholder inside a value is never expanded. Braces that do not name a known
/// placeholder (the JSON examples) are kept as they are.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let hit = values.iter().find(|(name, _)| {
            after.starts_with(*name) && after[name.len()..].starts_with('}')
        });
        match hit {
            Some((name, value)) => {
                out.push_str(value);
                rest = &after[name.len() + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
