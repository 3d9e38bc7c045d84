use serde::Serialize;

/// Coarse classification derived from the pattern statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileLabels {
    pub expertise: ExpertiseLevel,
    /// Languages holding a disproportionate share of attributed events,
    /// ordered by share descending.
    pub specializations: Vec<String>,
    pub collaboration_style: CollaborationStyle,
    /// Label of the most likely next event kind, or "unknown".
    pub predicted_next_event: String,
    pub productivity_trend: ProductivityTrend,
}

impl Default for ProfileLabels {
    fn default() -> Self {
        Self {
            expertise: ExpertiseLevel::Novice,
            specializations: Vec::new(),
            collaboration_style: CollaborationStyle::Solo,
            predicted_next_event: "unknown".to_string(),
            productivity_trend: ProductivityTrend::Stable,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpertiseLevel {
    Novice,
    Intermediate,
    Advanced,
    Expert,
}

impl std::fmt::Display for ExpertiseLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExpertiseLevel::Novice => write!(f, "novice"),
            ExpertiseLevel::Intermediate => write!(f, "intermediate"),
            ExpertiseLevel::Advanced => write!(f, "advanced"),
            ExpertiseLevel::Expert => write!(f, "expert"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CollaborationStyle {
    Solo,
    OccasionalCollaborator,
    FrequentCollaborator,
}

impl std::fmt::Display for CollaborationStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CollaborationStyle::Solo => write!(f, "solo"),
            CollaborationStyle::OccasionalCollaborator => write!(f, "occasional collaborator"),
            CollaborationStyle::FrequentCollaborator => write!(f, "frequent collaborator"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductivityTrend {
    Increasing,
    Stable,
    Decreasing,
}

impl std::fmt::Display for ProductivityTrend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductivityTrend::Increasing => write!(f, "increasing"),
            ProductivityTrend::Stable => write!(f, "stable"),
            ProductivityTrend::Decreasing => write!(f, "decreasing"),
        }
    }
}
