//! Market entity and its display projections.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use time::OffsetDateTime;

use crate::error::MarketError;

/// Lowest hype an entity can hold.
pub const HYPE_FLOOR: f64 = 10.0;
/// Highest hype an entity can hold.
pub const HYPE_CEILING: f64 = 100.0;

/// Clamp a hype value into `[HYPE_FLOOR, HYPE_CEILING]`.
pub fn clamp_hype(hype: f64) -> f64 {
    hype.clamp(HYPE_FLOOR, HYPE_CEILING)
}

/// Token cost for a given hype: `floor(10 + hype^1.5 / 10)`.
pub fn cost_for_hype(hype: f64) -> u32 {
    (10.0 + hype.powf(1.5) / 10.0).floor() as u32
}

/// A tracked company on the talent market.
///
/// Cost is never stored; it is always derived from the current hype.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketEntity {
    name: String,
    hype: f64,
    growth: f64,
}

impl MarketEntity {
    /// Create an entity, clamping hype into range.
    pub fn new(name: impl Into<String>, hype: f64, growth: f64) -> Result<Self, MarketError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(MarketError::EmptyName);
        }
        if !hype.is_finite() {
            return Err(MarketError::NonFiniteHype { name, hype });
        }
        if !growth.is_finite() || !(0.0..=1.0).contains(&growth) {
            return Err(MarketError::InvalidGrowth { name, growth });
        }

        Ok(Self {
            name,
            hype: clamp_hype(hype),
            growth,
        })
    }

    /// Entity from built-in constants, skipping validation. Hype is still clamped.
    pub(crate) fn from_trusted(name: &str, hype: f64, growth: f64) -> Self {
        Self {
            name: name.to_string(),
            hype: clamp_hype(hype),
            growth,
        }
    }

    /// Entity name; the key within a feed.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current hype in `[10, 100]`.
    pub fn hype(&self) -> f64 {
        self.hype
    }

    /// Growth bias in `[0, 1]`.
    pub fn growth(&self) -> f64 {
        self.growth
    }

    /// Token cost derived from hype.
    pub fn cost(&self) -> u32 {
        cost_for_hype(self.hype)
    }

    /// Copy of this entity at a new hype level. Name and growth carry over.
    pub fn with_hype(&self, hype: f64) -> Self {
        Self {
            name: self.name.clone(),
            hype: clamp_hype(hype),
            growth: self.growth,
        }
    }

    /// Display projection of this entity.
    pub fn quote(&self) -> Quote {
        Quote::from(self)
    }
}

/// Cost band used for board markers.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, Default,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Heat {
    /// Cost above 100 tokens.
    Hot,
    /// Cost below 30 tokens.
    Cold,
    /// Anything in between.
    #[default]
    Neutral,
}

impl Heat {
    /// Cost above which an entity is hot.
    pub const HOT_ABOVE: u32 = 100;
    /// Cost below which an entity is cold.
    pub const COLD_BELOW: u32 = 30;

    /// Classify a cost.
    pub fn from_cost(cost: u32) -> Self {
        if cost > Self::HOT_ABOVE {
            Heat::Hot
        } else if cost < Self::COLD_BELOW {
            Heat::Cold
        } else {
            Heat::Neutral
        }
    }

    /// Terminal marker for this band.
    pub fn marker(&self) -> &'static str {
        match self {
            Heat::Hot => "🔥",
            Heat::Cold => "❄️",
            Heat::Neutral => "  ",
        }
    }
}

/// Display view of a single entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    /// Entity name.
    pub name: String,
    /// Raw hype.
    pub hype: f64,
    /// Hype rounded to a whole percentage.
    pub hype_pct: u32,
    /// Token cost.
    pub cost: u32,
    /// Growth bias.
    pub growth: f64,
    /// Cost band.
    pub heat: Heat,
    /// Hype above 80 is highlighted.
    pub highlighted: bool,
}

impl Quote {
    /// Hype above which a quote is highlighted.
    pub const HIGHLIGHT_ABOVE: f64 = 80.0;
}

impl From<&MarketEntity> for Quote {
    fn from(entity: &MarketEntity) -> Self {
        let cost = entity.cost();
        Self {
            name: entity.name.clone(),
            hype: entity.hype,
            hype_pct: entity.hype.round() as u32,
            cost,
            growth: entity.growth,
            heat: Heat::from_cost(cost),
            highlighted: entity.hype > Self::HIGHLIGHT_ABOVE,
        }
    }
}

/// Entity list as of a given tick.
#[derive(Debug, Clone)]
pub struct MarketSnapshot {
    /// Tick number; `0` is the seed list.
    pub tick: u64,
    /// Entities in seed order.
    pub entities: Vec<MarketEntity>,
    /// When the snapshot was produced.
    pub updated_at: OffsetDateTime,
}

impl MarketSnapshot {
    /// Snapshot stamped with the current time.
    pub fn new(tick: u64, entities: Vec<MarketEntity>) -> Self {
        Self {
            tick,
            entities,
            updated_at: OffsetDateTime::now_utc(),
        }
    }

    /// Quotes for every entity, in seed order.
    pub fn quotes(&self) -> Vec<Quote> {
        self.entities.iter().map(Quote::from).collect()
    }

    /// Whether this snapshot is at or past an optional tick limit.
    ///
    /// A limit of `0` is reached by the seed snapshot itself.
    pub fn reached(&self, max_ticks: Option<u64>) -> bool {
        max_ticks.is_some_and(|max| self.tick >= max)
    }
}
