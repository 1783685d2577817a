use crate::endpoint::Endpoint;

/// Category id that switches a category page to bowling columns.
pub const BOWLING_CATEGORY: &str = "fast";

/// Categories the backend knows about.
pub const CATEGORIES: [&str; 5] = ["power", "anchor", "finisher", "allrounder", "fast"];

const TITLE_PLACEHOLDER: &str = "{{ category }}";

/// What the current page shows, taken from the template globals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    Team { team: String },
    Batting { category: String },
    Bowling { category: String },
}

impl Page {
    /// Category wins over team when a template defines both.
    pub fn from_context(team: Option<&str>, category: Option<&str>) -> Option<Self> {
        let non_empty = |value: Option<&str>| {
            value
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };

        if let Some(category) = non_empty(category) {
            return Some(Self::category(category));
        }
        non_empty(team).map(|team| Self::Team { team })
    }

    pub fn category(category: String) -> Self {
        if category == BOWLING_CATEGORY {
            Self::Bowling { category }
        } else {
            Self::Batting { category }
        }
    }

    pub fn endpoint(&self) -> Endpoint {
        match self {
            Self::Team { team } => Endpoint::Team(team.clone()),
            Self::Batting { category } | Self::Bowling { category } => {
                Endpoint::Category(category.clone())
            }
        }
    }

    pub fn category_id(&self) -> Option<&str> {
        match self {
            Self::Team { .. } => None,
            Self::Batting { category } | Self::Bowling { category } => Some(category),
        }
    }

    /// Container the renderer clears and refills.
    pub const fn container_selector(&self) -> &'static str {
        match self {
            Self::Team { .. } => ".player-grid",
            Self::Batting { .. } => "#players-table tbody",
            Self::Bowling { .. } => "#fast-players-table tbody",
        }
    }
}

pub fn category_title(template: &str, category: &str) -> String {
    template.replace(TITLE_PLACEHOLDER, category)
}
