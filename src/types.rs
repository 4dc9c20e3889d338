//! Types for the trading post price tracker

use crate::error::ProviderError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Tradable items tracked on the trading post
///
/// This is the fixed identifier table: every item the tracker queries is
/// listed here, together with its upstream item id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Item {
    /// Glob of Ectoplasm
    GlobOfEctoplasm,
    /// Mystic Coin
    MysticCoin,
    /// Vial of Powerful Blood
    VialOfPowerfulBlood,
    /// Ancient Bone
    AncientBone,
    /// Vicious Claw
    ViciousClaw,
    /// Vicious Fang
    ViciousFang,
    /// Armored Scale
    ArmoredScale,
    /// Elaborate Totem
    ElaborateTotem,
    /// Powerful Venom Sac
    PowerfulVenomSac,
    /// Pile of Crystalline Dust
    PileOfCrystallineDust,
}

impl Item {
    /// Get the upstream item id used by the commerce API
    pub fn item_id(&self) -> u32 {
        match self {
            Item::GlobOfEctoplasm => 19721,
            Item::MysticCoin => 19976,
            Item::VialOfPowerfulBlood => 24295,
            Item::AncientBone => 24358,
            Item::ViciousClaw => 24351,
            Item::ViciousFang => 24357,
            Item::ArmoredScale => 24289,
            Item::ElaborateTotem => 24300,
            Item::PowerfulVenomSac => 24283,
            Item::PileOfCrystallineDust => 24277,
        }
    }

    /// Get the human-readable item name
    pub fn name(&self) -> &'static str {
        match self {
            Item::GlobOfEctoplasm => "Glob of Ectoplasm",
            Item::MysticCoin => "Mystic Coin",
            Item::VialOfPowerfulBlood => "Vial of Powerful Blood",
            Item::AncientBone => "Ancient Bone",
            Item::ViciousClaw => "Vicious Claw",
            Item::ViciousFang => "Vicious Fang",
            Item::ArmoredScale => "Armored Scale",
            Item::ElaborateTotem => "Elaborate Totem",
            Item::PowerfulVenomSac => "Powerful Venom Sac",
            Item::PileOfCrystallineDust => "Pile of Crystalline Dust",
        }
    }

    /// Get all known items, in table order
    pub fn all() -> &'static [Item] {
        &[
            Item::GlobOfEctoplasm,
            Item::MysticCoin,
            Item::VialOfPowerfulBlood,
            Item::AncientBone,
            Item::ViciousClaw,
            Item::ViciousFang,
            Item::ArmoredScale,
            Item::ElaborateTotem,
            Item::PowerfulVenomSac,
            Item::PileOfCrystallineDust,
        ]
    }
}

/// Trading post price for a single item
///
/// Prices are in copper, the smallest currency denomination. Buy is the unit
/// price buy orders currently clear at, sell the unit price sell orders
/// clear at. Upstream data can transiently report sell below buy; no
/// ordering between the two is assumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Upstream item id
    pub id: u32,

    /// Highest buy order unit price, in copper
    pub buy: u32,

    /// Lowest sell listing unit price, in copper
    pub sell: u32,
}

/// Lifecycle of the one outstanding price fetch
///
/// Starts idle, moves to loading when the container activates, and settles
/// exactly once into either a successful price list or an error. Terminal
/// states are never left; the container does not refetch.
#[derive(Debug, Clone, Default)]
pub struct RequestState {
    /// True exactly while the request is in flight
    pub loading: bool,

    /// True exactly when a successful result is held
    pub loaded: bool,

    /// Fetched prices, present only after success
    pub prices: Option<Vec<Price>>,

    /// Fetch failure, present only after an error
    pub error: Option<Arc<ProviderError>>,

    /// When a terminal state was reached
    pub fetched_at: Option<DateTime<Utc>>,
}

impl RequestState {
    /// State before the container has been activated
    pub fn idle() -> Self {
        Self::default()
    }

    /// State while the fetch is in flight
    pub fn loading() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    /// Terminal state holding a successful result
    pub fn success(prices: Vec<Price>) -> Self {
        Self {
            loaded: true,
            prices: Some(prices),
            fetched_at: Some(Utc::now()),
            ..Self::default()
        }
    }

    /// Terminal state holding the fetch failure
    pub fn failure(error: ProviderError) -> Self {
        Self {
            error: Some(Arc::new(error)),
            fetched_at: Some(Utc::now()),
            ..Self::default()
        }
    }

    /// True once the state holds a result or an error
    pub fn is_terminal(&self) -> bool {
        self.loaded || self.error.is_some()
    }
}
