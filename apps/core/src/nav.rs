use crate::endpoint::encode_component;

/// Body opacity applied while the next page loads.
pub const FADE_OPACITY: &str = "0.3";
pub const NAVIGATION_DELAY_MS: u32 = 220;

pub fn category_href(category: &str) -> String {
    format!("/category/{}", encode_component(category))
}

/// Fade-then-navigate step for a clicked category card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub opacity: &'static str,
    pub delay_ms: u32,
    pub href: String,
}

impl Transition {
    /// `None` for cards without a usable category id.
    pub fn to_category(category: Option<&str>) -> Option<Self> {
        let category = category.map(str::trim).filter(|id| !id.is_empty())?;
        Some(Self {
            opacity: FADE_OPACITY,
            delay_ms: NAVIGATION_DELAY_MS,
            href: category_href(category),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{category_href, Transition, NAVIGATION_DELAY_MS};

    #[test]
    fn card_click_plans_fade_and_navigation() {
        let transition = Transition::to_category(Some("anchor")).unwrap();
        assert_eq!(transition.href, "/category/anchor");
        assert_eq!(transition.opacity, "0.3");
        assert_eq!(transition.delay_ms, NAVIGATION_DELAY_MS);
    }

    #[test]
    fn cards_without_category_do_nothing() {
        assert_eq!(Transition::to_category(None), None);
        assert_eq!(Transition::to_category(Some(" ")), None);
    }

    #[test]
    fn category_ids_are_path_safe() {
        assert_eq!(category_href("all rounder"), "/category/all%20rounder");
    }
}
