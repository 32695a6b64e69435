use crate::keywords::Keywords;
use serde::Serialize;
use std::fmt;

/// Topic areas a fallback response can point the user towards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Topic {
    #[serde(rename = "Consumer Rights")]
    ConsumerRights,
    #[serde(rename = "Tenant Rights")]
    TenantRights,
    #[serde(rename = "Employee Rights")]
    EmployeeRights,
    #[serde(rename = "Women's Rights")]
    WomensRights,
    #[serde(rename = "Cyber Rights")]
    CyberRights,
}

impl Topic {
    /// Table order; earlier entries win ties
    pub const ALL: [Topic; 5] = [
        Topic::ConsumerRights,
        Topic::TenantRights,
        Topic::EmployeeRights,
        Topic::WomensRights,
        Topic::CyberRights,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Topic::ConsumerRights => "Consumer Rights",
            Topic::TenantRights => "Tenant Rights",
            Topic::EmployeeRights => "Employee Rights",
            Topic::WomensRights => "Women's Rights",
            Topic::CyberRights => "Cyber Rights",
        }
    }

    #[must_use]
    pub const fn keywords(self) -> &'static [&'static str] {
        match self {
            Topic::ConsumerRights => &[
                "product", "defective", "refund", "warranty", "shop", "purchase", "consumer",
                "seller",
            ],
            Topic::TenantRights => &[
                "rent", "landlord", "tenant", "lease", "deposit", "eviction", "property",
                "housing",
            ],
            Topic::EmployeeRights => &[
                "employee",
                "employer",
                "salary",
                "wage",
                "job",
                "work",
                "office",
                "termination",
                "leave",
            ],
            Topic::WomensRights => &[
                "women",
                "harassment",
                "domestic",
                "violence",
                "safety",
                "maternity",
                "discrimination",
            ],
            Topic::CyberRights => &[
                "cyber", "online", "hack", "password", "social", "media", "internet", "digital",
                "privacy",
            ],
        }
    }

    /// Number of query keywords that belong to this topic
    #[must_use]
    pub fn overlap(self, keywords: &Keywords) -> usize {
        self.keywords()
            .iter()
            .filter(|word| keywords.contains(**word))
            .count()
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub struct CategoryClassifier;

impl CategoryClassifier {
    /// Best-fitting topic for a keyword set, or `None` when nothing overlaps
    #[must_use]
    pub fn classify(keywords: &Keywords) -> Option<Topic> {
        let mut best = None;
        let mut best_count = 0;
        for topic in Topic::ALL {
            let count = topic.overlap(keywords);
            if count > best_count {
                best_count = count;
                best = Some(topic);
            }
        }
        best
    }
}
