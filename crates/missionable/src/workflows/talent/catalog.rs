//! Fixed vocabularies offered by the sign-up and inquiry forms.

/// Skill tags selectable on both forms and in the dashboard skill filter.
pub const TECH_STACK_OPTIONS: &[&str] = &[
    "JavaScript",
    "TypeScript",
    "React",
    "Next.js",
    "Node.js",
    "Python",
    "Java",
    "C#",
    ".NET",
    "Go",
    "Rust",
    "SQL",
    "PostgreSQL",
    "AWS",
    "Azure",
    "Docker",
    "Kubernetes",
    "Terraform",
    "Cybersecurity",
    "DevOps",
    "Data Engineering",
    "Machine Learning",
    "QA / Testing",
    "UI/UX Design",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExperienceLevel {
    pub years: u32,
    pub label: &'static str,
}

pub const EXPERIENCE_LEVELS: &[ExperienceLevel] = &[
    ExperienceLevel {
        years: 0,
        label: "Less than 1 year",
    },
    ExperienceLevel {
        years: 1,
        label: "1-2 years",
    },
    ExperienceLevel {
        years: 3,
        label: "3-5 years",
    },
    ExperienceLevel {
        years: 6,
        label: "6-9 years",
    },
    ExperienceLevel {
        years: 10,
        label: "10+ years",
    },
];

/// Canonical spelling of a tag if it belongs to the vocabulary.
pub fn canonical_skill(raw: &str) -> Option<&'static str> {
    let needle = raw.trim();
    TECH_STACK_OPTIONS
        .iter()
        .copied()
        .find(|option| option.eq_ignore_ascii_case(needle))
}
