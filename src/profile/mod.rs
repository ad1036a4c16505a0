//! Gated talent profile: the unlock gate and the static content it reveals.

pub mod card;
pub mod gate;

pub use card::{CompanyTeaser, LockedTeaser, PageView, ProfilePanel, SkillProfile, SkillScore};
pub use gate::{ProfileGate, ProfileView};
