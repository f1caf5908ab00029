//! Static career templates used when no model output is available.
//!
//! A role is matched to a domain by keyword; anything unmatched gets the generic template.

use std::sync::LazyLock;

use regex::Regex;

use crate::analysis::models::Difficulty;

pub struct SkillTemplate {
    pub name: &'static str,
    pub description: &'static str,
    pub difficulty: Difficulty,
    pub hours: u32,
}

pub struct ProjectTemplate {
    pub title: &'static str,
    pub description: &'static str,
    pub difficulty: Difficulty,
    pub skills: &'static [&'static str],
}

pub struct DomainTemplate {
    pub key: &'static str,
    pub label: &'static str,
    /// Single words match role tokens; phrases match the whole lowercased role.
    pub keywords: &'static [&'static str],
    pub skills: &'static [SkillTemplate],
    pub projects: &'static [ProjectTemplate],
    pub in_demand: &'static [&'static str],
    pub tips: &'static [&'static str],
}

const fn skill(
    name: &'static str,
    description: &'static str,
    difficulty: Difficulty,
    hours: u32,
) -> SkillTemplate {
    SkillTemplate {
        name,
        description,
        difficulty,
        hours,
    }
}

const fn project(
    title: &'static str,
    description: &'static str,
    difficulty: Difficulty,
    skills: &'static [&'static str],
) -> ProjectTemplate {
    ProjectTemplate {
        title,
        description,
        difficulty,
        skills,
    }
}

use Difficulty::{Advanced, Beginner, Intermediate};

pub static FRONTEND: DomainTemplate = DomainTemplate {
    key: "frontend",
    label: "Frontend Development",
    keywords: &[
        "frontend", "front-end", "front end", "react", "vue", "angular", "svelte", "ui engineer",
        "ui developer", "web developer", "javascript",
    ],
    skills: &[
        skill("HTML & CSS", "Semantic markup, modern layout with flexbox and grid, responsive design.", Beginner, 30),
        skill("JavaScript", "Language fundamentals, the DOM, async programming and modules.", Beginner, 50),
        skill("TypeScript", "Static typing for JavaScript codebases: types, generics, strictness.", Intermediate, 30),
        skill("React", "Components, hooks, state management and data fetching.", Intermediate, 50),
        skill("Accessibility", "WCAG guidelines, ARIA, keyboard navigation and screen-reader testing.", Intermediate, 15),
        skill("Frontend Testing", "Unit and component tests, end-to-end tests with a browser runner.", Intermediate, 20),
        skill("Web Performance", "Core Web Vitals, bundle analysis, lazy loading and caching.", Advanced, 20),
    ],
    projects: &[
        project("Personal Portfolio Site", "A responsive, accessible portfolio showcasing your projects.", Beginner, &["HTML & CSS", "JavaScript"]),
        project("Task Board App", "A drag-and-drop task board with persistent state and filtering.", Intermediate, &["React", "TypeScript"]),
        project("Performance Audit", "Profile and optimize an existing site, documenting before/after Web Vitals.", Advanced, &["Web Performance", "Frontend Testing"]),
    ],
    in_demand: &["TypeScript", "React", "Next.js", "Accessibility", "Testing Library", "Web Performance"],
    tips: &[
        "Ship small UI projects publicly; live demos beat screenshots.",
        "Learn to read browser devtools fluently: network, performance and accessibility panels.",
    ],
};

pub static BACKEND: DomainTemplate = DomainTemplate {
    key: "backend",
    label: "Backend Development",
    keywords: &[
        "backend", "back-end", "back end", "api", "server", "microservices", "java", "golang", "go",
        "rust", "node", "django", "spring", "full stack", "fullstack", "software engineer",
    ],
    skills: &[
        skill("Programming Fundamentals", "One server-side language in depth: data structures, errors, concurrency.", Beginner, 40),
        skill("HTTP & REST APIs", "Request lifecycle, status codes, resource design and versioning.", Beginner, 20),
        skill("SQL Databases", "Schema design, joins, indexes, transactions and migrations.", Intermediate, 35),
        skill("Authentication & Security", "Sessions, tokens, hashing and the OWASP top ten.", Intermediate, 20),
        skill("Testing & CI", "Unit and integration tests running in a continuous integration pipeline.", Intermediate, 20),
        skill("Caching & Queues", "Redis-style caches, message queues and background jobs.", Advanced, 25),
        skill("System Design", "Scalability, consistency trade-offs and failure handling.", Advanced, 30),
    ],
    projects: &[
        project("REST API with Auth", "A CRUD API with authentication, validation and documented endpoints.", Beginner, &["HTTP & REST APIs", "Authentication & Security"]),
        project("URL Shortener Service", "A persistent short-link service with caching and analytics counters.", Intermediate, &["SQL Databases", "Caching & Queues"]),
        project("Job Processing Pipeline", "A queue-backed worker system with retries and observability.", Advanced, &["Caching & Queues", "System Design"]),
    ],
    in_demand: &["Go", "Rust", "PostgreSQL", "Kubernetes", "gRPC", "System Design"],
    tips: &[
        "Write a README for every service that explains how to run it and why it is built that way.",
        "Practice explaining a system design out loud; interviews reward clear trade-off reasoning.",
    ],
};

pub static DATA: DomainTemplate = DomainTemplate {
    key: "data",
    label: "Data & Machine Learning",
    keywords: &[
        "data", "analyst", "analytics", "scientist", "machine learning", "ml", "ai", "ml engineer",
        "deep learning", "python", "statistics", "bi",
    ],
    skills: &[
        skill("Python for Data", "Python with pandas and NumPy for cleaning and transforming data.", Beginner, 40),
        skill("SQL for Analysis", "Aggregations, window functions and query optimization.", Beginner, 25),
        skill("Statistics", "Distributions, hypothesis testing and experiment design.", Intermediate, 30),
        skill("Data Visualization", "Choosing the right chart and telling a story with data.", Intermediate, 15),
        skill("Machine Learning", "Supervised models, validation and feature engineering with scikit-learn.", Intermediate, 45),
        skill("Data Pipelines", "Batch and streaming pipelines, orchestration and data quality checks.", Advanced, 30),
    ],
    projects: &[
        project("Exploratory Analysis Notebook", "Clean and analyze a public dataset, publishing findings with charts.", Beginner, &["Python for Data", "Data Visualization"]),
        project("Prediction Model", "Train, validate and explain a model for a real-world prediction task.", Intermediate, &["Machine Learning", "Statistics"]),
        project("Automated Data Pipeline", "A scheduled pipeline that ingests, validates and publishes a dataset.", Advanced, &["Data Pipelines", "SQL for Analysis"]),
    ],
    in_demand: &["Python", "SQL", "dbt", "Spark", "Machine Learning", "Experimentation"],
    tips: &[
        "Publish analyses with a clear question, method and conclusion, not just code.",
        "Learn the business context of your data; insight matters more than model complexity.",
    ],
};

pub static DESIGN: DomainTemplate = DomainTemplate {
    key: "design",
    label: "Product & UX Design",
    keywords: &[
        "design", "designer", "ux", "ui/ux", "product designer", "user experience", "interaction",
        "figma", "visual",
    ],
    skills: &[
        skill("Design Fundamentals", "Typography, color, layout, hierarchy and visual balance.", Beginner, 25),
        skill("Figma", "Components, auto layout, variants and prototyping.", Beginner, 20),
        skill("User Research", "Interviews, usability testing and synthesizing findings.", Intermediate, 25),
        skill("Interaction Design", "Flows, states, micro-interactions and information architecture.", Intermediate, 25),
        skill("Design Systems", "Tokens, reusable components and documentation for teams.", Advanced, 25),
        skill("Accessibility", "Inclusive design, contrast, focus order and assistive technologies.", Intermediate, 15),
    ],
    projects: &[
        project("App Redesign Case Study", "Redesign an existing app flow and document the reasoning.", Beginner, &["Design Fundamentals", "Figma"]),
        project("Usability Study", "Run five usability sessions and turn findings into design changes.", Intermediate, &["User Research", "Interaction Design"]),
        project("Mini Design System", "A documented component library with tokens and usage guidelines.", Advanced, &["Design Systems", "Accessibility"]),
    ],
    in_demand: &["Figma", "User Research", "Design Systems", "Prototyping", "Accessibility"],
    tips: &[
        "Show process in your portfolio: the problem, the options, and why you chose one.",
        "Collaborate with engineers early; feasible designs ship.",
    ],
};

pub static DEVOPS: DomainTemplate = DomainTemplate {
    key: "devops",
    label: "DevOps & Cloud",
    keywords: &[
        "devops", "sre", "site reliability", "cloud", "platform", "infrastructure", "kubernetes",
        "aws", "azure", "gcp", "linux", "operations",
    ],
    skills: &[
        skill("Linux & Shell", "Processes, permissions, networking tools and shell scripting.", Beginner, 30),
        skill("Git & CI/CD", "Branching workflows and automated build, test and deploy pipelines.", Beginner, 20),
        skill("Containers", "Building and running images; multi-stage builds and registries.", Intermediate, 25),
        skill("Cloud Fundamentals", "Compute, storage, networking and IAM on a major cloud provider.", Intermediate, 35),
        skill("Infrastructure as Code", "Declarative infrastructure with Terraform or similar tools.", Intermediate, 25),
        skill("Kubernetes", "Deployments, services, config and troubleshooting workloads.", Advanced, 40),
        skill("Observability", "Metrics, logs, traces and alerting on service-level objectives.", Advanced, 20),
    ],
    projects: &[
        project("Automated Deploy Pipeline", "CI/CD that tests, builds a container and deploys a web app.", Beginner, &["Git & CI/CD", "Containers"]),
        project("Infrastructure as Code Stack", "Provision a full environment from code, including networking.", Intermediate, &["Infrastructure as Code", "Cloud Fundamentals"]),
        project("Observable Kubernetes Service", "Run a service on Kubernetes with dashboards and alerts.", Advanced, &["Kubernetes", "Observability"]),
    ],
    in_demand: &["Kubernetes", "Terraform", "AWS", "Observability", "CI/CD", "Linux"],
    tips: &[
        "Automate everything you do twice and keep the scripts in version control.",
        "Write post-incident reviews for your own projects; they show operational maturity.",
    ],
};

pub static GENERIC: DomainTemplate = DomainTemplate {
    key: "generic",
    label: "Professional Growth",
    keywords: &[],
    skills: &[
        skill("Role Fundamentals", "The core concepts and vocabulary of the target role.", Beginner, 30),
        skill("Industry Tools", "The tools and platforms most job postings for the role mention.", Beginner, 25),
        skill("Communication", "Clear writing, presenting work and giving feedback.", Intermediate, 15),
        skill("Project Delivery", "Scoping, planning and finishing work on time.", Intermediate, 20),
        skill("Portfolio Building", "Documenting results so others can evaluate your work.", Intermediate, 15),
    ],
    projects: &[
        project("Role Research Brief", "Summarize twenty job postings: common skills, tools and expectations.", Beginner, &["Role Fundamentals"]),
        project("Capstone Project", "An end-to-end project that mirrors real work in the role.", Intermediate, &["Industry Tools", "Project Delivery"]),
        project("Public Case Study", "Write up a finished project with context, decisions and results.", Intermediate, &["Communication", "Portfolio Building"]),
    ],
    in_demand: &["Communication", "Problem Solving", "Project Management", "Data Literacy"],
    tips: &[
        "Talk to people already in the role; ask what their first ninety days looked like.",
        "Track what you learn each week; the log becomes interview material.",
    ],
};

static TEMPLATES: [&DomainTemplate; 5] = [&FRONTEND, &BACKEND, &DATA, &DESIGN, &DEVOPS];

/// Picks the template with the most keyword hits for `role`; ties go to the earlier
/// template, and a role with no hits gets [`GENERIC`].
pub fn template_for_role(role: &str) -> &'static DomainTemplate {
    let lowered = role.to_lowercase();
    let tokens: Vec<&str> = lowered
        .split(|c: char| !(c.is_alphanumeric() || c == '+' || c == '#' || c == '-' || c == '/'))
        .filter(|t| !t.is_empty())
        .collect();

    let hits = |template: &DomainTemplate| {
        template
            .keywords
            .iter()
            .filter(|kw| {
                if kw.contains(' ') {
                    lowered.contains(*kw)
                } else {
                    tokens.contains(kw)
                }
            })
            .count()
    };

    TEMPLATES
        .iter()
        .copied()
        .map(|t| (hits(t), t))
        .filter(|(n, _)| *n > 0)
        .fold(None, |best: Option<(usize, &DomainTemplate)>, (n, t)| match best {
            Some((b, _)) if b >= n => best,
            _ => Some((n, t)),
        })
        .map(|(_, t)| t)
        .unwrap_or(&GENERIC)
}

/// Maps a primary programming language to the domain it most often signals.
pub fn template_for_language(language: &str) -> &'static DomainTemplate {
    match language.to_ascii_lowercase().as_str() {
        "javascript" | "typescript" | "html" | "css" | "vue" | "svelte" | "scss" => &FRONTEND,
        "python" | "jupyter notebook" | "r" | "julia" => &DATA,
        "hcl" | "shell" | "dockerfile" | "nix" => &DEVOPS,
        "go" | "rust" | "java" | "kotlin" | "c#" | "ruby" | "php" | "scala" | "elixir" | "c++"
        | "c" => &BACKEND,
        _ => &GENERIC,
    }
}

static TIMEFRAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(day|week|wk|month|mo|year|yr)").expect("valid timeframe regex")
});

pub const DEFAULT_WEEKS: u32 = 12;
pub const MAX_WEEKS: u32 = 52;

/// `"3 months"` → 12, `"6 weeks"` → 6, `"1 year"` → 52. Unrecognized text yields 12;
/// results are clamped to 1..=52.
pub fn parse_timeframe_weeks(timeframe: &str) -> u32 {
    let Some(caps) = TIMEFRAME.captures(timeframe) else {
        return DEFAULT_WEEKS;
    };
    let amount: f64 = caps[1].parse().unwrap_or(0.0);
    let unit = caps[2].to_ascii_lowercase();
    let weeks = match unit.as_str() {
        "day" => amount / 7.0,
        "week" | "wk" => amount,
        "month" | "mo" => amount * 4.0,
        _ => amount * 52.0,
    };
    (weeks.round() as u32).clamp(1, MAX_WEEKS)
}
