//! Impact check for resume bullets: does a bullet state a measurable outcome?

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactIssue {
    pub reason: String,
    pub suggestion: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactCheck {
    pub quantified: bool,
    pub issue: Option<ImpactIssue>,
}

const VAGUE_VERBS: &[&str] = &[
    "improved",
    "enhanced",
    "helped",
    "worked on",
    "assisted",
    "supported",
    "participated",
    "involved",
    "responsible for",
];

const VAGUE_SCALE_WORDS: &[&str] = &[
    "significant",
    "major",
    "large",
    "huge",
    "massive",
    "substantial",
    "considerable",
    "many",
    "numerous",
    "various",
    "several",
];

/// A bullet counts as quantified when it carries a digit, a percentage, or a currency
/// amount. Otherwise the first vague verb or vague scale word found is reported.
pub fn check_bullet(text: &str) -> ImpactCheck {
    let quantified = text.chars().any(|c| c.is_ascii_digit())
        || text.contains('%')
        || text.contains('$')
        || text.contains('€')
        || text.contains('£');

    if quantified {
        return ImpactCheck {
            quantified: true,
            issue: None,
        };
    }

    let lowered = text.to_lowercase();

    let issue = if let Some(verb) = VAGUE_VERBS.iter().find(|v| lowered.contains(*v)) {
        ImpactIssue {
            reason: format!("uses the vague phrase '{verb}' without a measurable result"),
            suggestion: format!("State what '{verb}' achieved: by how much, for whom, how fast."),
        }
    } else if let Some(word) = VAGUE_SCALE_WORDS.iter().find(|w| lowered.contains(*w)) {
        ImpactIssue {
            reason: format!("says '{word}' where a number belongs"),
            suggestion: format!("Replace '{word}' with a concrete figure such as 30%, 5x or 2 weeks."),
        }
    } else {
        ImpactIssue {
            reason: "states no measurable outcome".to_string(),
            suggestion: "Add a number: percentage, time saved, users served, or revenue."
                .to_string(),
        }
    };

    ImpactCheck {
        quantified: false,
        issue: Some(issue),
    }
}
