//! Static profile content and page composition.

use serde::Serialize;

use super::gate::ProfileView;
use crate::market::{MarketSnapshot, Quote};

/// One skill bar on the profile card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SkillScore {
    /// Skill label.
    pub label: &'static str,
    /// Score out of 100.
    pub score: u8,
}

/// The unlocked skill card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillProfile {
    /// Headline badge.
    pub badge: &'static str,
    /// Skill bars, in display order.
    pub skills: Vec<SkillScore>,
    /// Verified technologies.
    pub verified_stack: Vec<&'static str>,
    /// Overall rank score.
    pub global_rank: u8,
}

impl SkillProfile {
    /// The showcased profile.
    pub fn showcase() -> Self {
        Self {
            badge: "TOP 1% LOGIC",
            skills: vec![
                SkillScore { label: "Algorithmic Logic", score: 98 },
                SkillScore { label: "System Architecture", score: 85 },
                SkillScore { label: "Code Consistency", score: 92 },
                SkillScore { label: "Community Impact", score: 74 },
            ],
            verified_stack: vec!["Rust", "C++", "Distributed Systems"],
            global_rank: 94,
        }
    }
}

/// Shown in place of the card while locked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LockedTeaser {
    /// Panel title.
    pub title: &'static str,
    /// Call to action text.
    pub prompt: &'static str,
    /// Unlock button label.
    pub action: &'static str,
}

impl Default for LockedTeaser {
    fn default() -> Self {
        Self {
            title: "Unlock Your Talent Profile",
            prompt: "Connect your GitHub to reveal your True Skill Graph. No resumes. Just code.",
            action: "Analyze My GitHub",
        }
    }
}

/// Blurred "more companies" block, visible only while locked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompanyTeaser {
    /// Number of placeholder cards.
    pub placeholders: u8,
    /// Sign-up line.
    pub message: &'static str,
}

impl Default for CompanyTeaser {
    fn default() -> Self {
        Self {
            placeholders: 3,
            message: "Sign up to view 500+ more companies",
        }
    }
}

/// The profile block for a given view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ProfilePanel {
    /// Gated teaser.
    Locked(LockedTeaser),
    /// Full card.
    Unlocked(SkillProfile),
}

impl ProfilePanel {
    /// Panel for the given view.
    pub fn for_view(view: ProfileView) -> Self {
        match view {
            ProfileView::Locked => ProfilePanel::Locked(LockedTeaser::default()),
            ProfileView::Unlocked => ProfilePanel::Unlocked(SkillProfile::showcase()),
        }
    }
}

/// Everything the page shows at one instant.
#[derive(Debug, Clone, Serialize)]
pub struct PageView {
    /// Market tick the quotes belong to.
    pub tick: u64,
    /// Live quotes.
    pub market: Vec<Quote>,
    /// Current profile view.
    pub view: ProfileView,
    /// Profile block.
    pub profile: ProfilePanel,
    /// Present only while locked.
    pub company_teaser: Option<CompanyTeaser>,
}

impl PageView {
    /// Compose the page from a market snapshot and the profile view.
    pub fn compose(snapshot: &MarketSnapshot, view: ProfileView) -> Self {
        Self {
            tick: snapshot.tick,
            market: snapshot.quotes(),
            view,
            profile: ProfilePanel::for_view(view),
            company_teaser: match view {
                ProfileView::Locked => Some(CompanyTeaser::default()),
                ProfileView::Unlocked => None,
            },
        }
    }
}
