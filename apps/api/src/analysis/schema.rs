//! Schema descriptors for model output.
//!
//! A `SchemaSpec` lists every field the typed result needs and how to coerce it. The
//! normalizer walks a parsed payload against one of these, so each spec here must stay
//! field-for-field in sync with its struct in `analysis::models`.

/// Root shape of a payload: decides which delimiters boundary extraction looks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadShape {
    Object,
    Array,
}

impl PayloadShape {
    pub fn delimiters(self) -> (char, char) {
        match self {
            PayloadShape::Object => ('{', '}'),
            PayloadShape::Array => ('[', ']'),
        }
    }

    pub fn matches(self, value: &serde_json::Value) -> bool {
        match self {
            PayloadShape::Object => value.is_object(),
            PayloadShape::Array => value.is_array(),
        }
    }
}

/// Near-miss mapping for an enum field. Tunable: the synonym lists are policy, not contract.
#[derive(Debug)]
pub struct EnumPolicy {
    pub values: &'static [&'static str],
    /// `(needle, canonical)` pairs, checked in order as case-insensitive substrings.
    pub synonyms: &'static [(&'static str, &'static str)],
    pub default: &'static str,
}

impl EnumPolicy {
    /// Exact case-insensitive match first, then the first synonym contained in `raw`,
    /// else the designated default.
    pub fn resolve(&self, raw: &str) -> &'static str {
        let lowered = raw.trim().to_lowercase();
        if let Some(value) = self.values.iter().find(|v| v.eq_ignore_ascii_case(&lowered)) {
            return value;
        }
        self.synonyms
            .iter()
            .find(|(needle, _)| lowered.contains(needle))
            .map(|(_, canonical)| *canonical)
            .unwrap_or(self.default)
    }
}

pub static DIFFICULTY: EnumPolicy = EnumPolicy {
    values: &["Beginner", "Intermediate", "Advanced"],
    synonyms: &[
        ("entry", "Beginner"),
        ("basic", "Beginner"),
        ("novice", "Beginner"),
        ("introductory", "Beginner"),
        ("junior", "Beginner"),
        ("easy", "Beginner"),
        ("starter", "Beginner"),
        ("mid", "Intermediate"),
        ("moderate", "Intermediate"),
        ("medium", "Intermediate"),
        ("senior", "Advanced"),
        ("expert", "Advanced"),
        ("hard", "Advanced"),
        ("master", "Advanced"),
    ],
    default: "Intermediate",
};

pub static PRIORITY: EnumPolicy = EnumPolicy {
    values: &["high", "medium", "low"],
    synonyms: &[
        ("critical", "high"),
        ("urgent", "high"),
        ("important", "high"),
        ("must", "high"),
        ("moderate", "medium"),
        ("normal", "medium"),
        ("optional", "low"),
        ("minor", "low"),
        ("nice", "low"),
    ],
    default: "medium",
};

#[derive(Debug)]
pub enum FieldKind {
    /// String; non-strings become their JSON text or `""`.
    Text,
    /// Non-negative integer; defaults to 0.
    Count,
    /// Integer clamped into [0, 100]; defaults to 0.
    Score,
    Enum(&'static EnumPolicy),
    /// Array of non-empty strings.
    TextList,
    /// Array of objects, each normalized against the item schema.
    List(&'static SchemaSpec),
    Object(&'static SchemaSpec),
}

#[derive(Debug)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
}

const fn field(name: &'static str, kind: FieldKind) -> Field {
    Field { name, kind }
}

#[derive(Debug)]
pub struct SchemaSpec {
    pub shape: PayloadShape,
    pub fields: &'static [Field],
}

impl SchemaSpec {
    /// First `Text` field, used to promote bare-string list items into objects.
    pub fn primary_text_field(&self) -> Option<&'static str> {
        self.fields
            .iter()
            .find(|f| matches!(f.kind, FieldKind::Text))
            .map(|f| f.name)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Career path
// ────────────────────────────────────────────────────────────────────────────

pub static RESOURCE: SchemaSpec = SchemaSpec {
    shape: PayloadShape::Object,
    fields: &[
        field("title", FieldKind::Text),
        field("url", FieldKind::Text),
        field("resourceType", FieldKind::Text),
    ],
};

pub static SKILL_STEP: SchemaSpec = SchemaSpec {
    shape: PayloadShape::Object,
    fields: &[
        field("name", FieldKind::Text),
        field("description", FieldKind::Text),
        field("difficulty", FieldKind::Enum(&DIFFICULTY)),
        field("estimatedHours", FieldKind::Count),
        field("resources", FieldKind::List(&RESOURCE)),
    ],
};

pub static WEEK_PLAN: SchemaSpec = SchemaSpec {
    shape: PayloadShape::Object,
    fields: &[
        field("week", FieldKind::Count),
        field("focus", FieldKind::Text),
        field("tasks", FieldKind::TextList),
    ],
};

pub static MILESTONE: SchemaSpec = SchemaSpec {
    shape: PayloadShape::Object,
    fields: &[
        field("title", FieldKind::Text),
        field("description", FieldKind::Text),
        field("week", FieldKind::Count),
    ],
};

pub static PROJECT_IDEA: SchemaSpec = SchemaSpec {
    shape: PayloadShape::Object,
    fields: &[
        field("title", FieldKind::Text),
        field("description", FieldKind::Text),
        field("difficulty", FieldKind::Enum(&DIFFICULTY)),
        field("skills", FieldKind::TextList),
    ],
};

pub static CAREER_PATH: SchemaSpec = SchemaSpec {
    shape: PayloadShape::Object,
    fields: &[
        field("title", FieldKind::Text),
        field("description", FieldKind::Text),
        field("difficulty", FieldKind::Enum(&DIFFICULTY)),
        field("estimatedDuration", FieldKind::Text),
        field("skills", FieldKind::List(&SKILL_STEP)),
        field("weeklyPlan", FieldKind::List(&WEEK_PLAN)),
        field("milestones", FieldKind::List(&MILESTONE)),
        field("projects", FieldKind::List(&PROJECT_IDEA)),
        field("tips", FieldKind::TextList),
    ],
};

// ────────────────────────────────────────────────────────────────────────────
// Profile and resume
// ────────────────────────────────────────────────────────────────────────────

pub static SUGGESTION: SchemaSpec = SchemaSpec {
    shape: PayloadShape::Object,
    fields: &[
        field("title", FieldKind::Text),
        field("description", FieldKind::Text),
        field("category", FieldKind::Text),
        field("priority", FieldKind::Enum(&PRIORITY)),
    ],
};

pub static INDUSTRY_BENCHMARKS: SchemaSpec = SchemaSpec {
    shape: PayloadShape::Object,
    fields: &[
        field("percentile", FieldKind::Score),
        field("comparison", FieldKind::Text),
        field("inDemandSkills", FieldKind::TextList),
    ],
};

pub static ACTION_PLAN: SchemaSpec = SchemaSpec {
    shape: PayloadShape::Object,
    fields: &[
        field("immediate", FieldKind::TextList),
        field("shortTerm", FieldKind::TextList),
        field("longTerm", FieldKind::TextList),
    ],
};

pub static PROFILE_ANALYSIS: SchemaSpec = SchemaSpec {
    shape: PayloadShape::Object,
    fields: &[
        field("overallScore", FieldKind::Score),
        field("summary", FieldKind::Text),
        field("strengths", FieldKind::TextList),
        field("weaknesses", FieldKind::TextList),
        field("suggestions", FieldKind::List(&SUGGESTION)),
        field("industryBenchmarks", FieldKind::Object(&INDUSTRY_BENCHMARKS)),
        field("actionPlan", FieldKind::Object(&ACTION_PLAN)),
    ],
};

pub static SECTION_FEEDBACK: SchemaSpec = SchemaSpec {
    shape: PayloadShape::Object,
    fields: &[
        field("section", FieldKind::Text),
        field("score", FieldKind::Score),
        field("feedback", FieldKind::Text),
    ],
};

pub static KEYWORD_ANALYSIS: SchemaSpec = SchemaSpec {
    shape: PayloadShape::Object,
    fields: &[
        field("present", FieldKind::TextList),
        field("missing", FieldKind::TextList),
    ],
};

pub static RESUME_ANALYSIS: SchemaSpec = SchemaSpec {
    shape: PayloadShape::Object,
    fields: &[
        field("overallScore", FieldKind::Score),
        field("atsScore", FieldKind::Score),
        field("summary", FieldKind::Text),
        field("strengths", FieldKind::TextList),
        field("weaknesses", FieldKind::TextList),
        field("suggestions", FieldKind::List(&SUGGESTION)),
        field("sectionFeedback", FieldKind::List(&SECTION_FEEDBACK)),
        field("keywords", FieldKind::Object(&KEYWORD_ANALYSIS)),
        field("actionPlan", FieldKind::Object(&ACTION_PLAN)),
    ],
};
