//! One-way unlock gate for the talent profile.

use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tracing::info;

use crate::metrics;

/// Which profile block is shown.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, Default,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ProfileView {
    /// Teaser with the unlock action.
    #[default]
    Locked,
    /// Full skill card.
    Unlocked,
}

/// Locked until the first unlock; never relocks.
#[derive(Debug, Default)]
pub struct ProfileGate {
    unlocked: AtomicBool,
}

impl ProfileGate {
    /// Create a locked gate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Unlock the profile.
    ///
    /// Returns `true` only for the call that performed the transition.
    pub fn unlock(&self) -> bool {
        let changed = !self.unlocked.swap(true, Ordering::SeqCst);
        if changed {
            info!("Profile unlocked");
            metrics::inc_profile_unlocks();
        }
        changed
    }

    /// Check if unlocked.
    pub fn is_unlocked(&self) -> bool {
        self.unlocked.load(Ordering::SeqCst)
    }

    /// Current view.
    pub fn view(&self) -> ProfileView {
        if self.is_unlocked() {
            ProfileView::Unlocked
        } else {
            ProfileView::Locked
        }
    }
}
