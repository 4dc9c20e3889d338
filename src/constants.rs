//! Constants for the trading post price tracker
//!
//! All configuration for the tracker is centralized here. No runtime
//! configuration is used - the base URL, endpoint and item table are
//! compile-time constants.

use crate::types::Item;

/// Guild Wars 2 API base URL
pub const GW2_API_URL: &str = "https://api.guildwars2.com/v2";

/// Commerce endpoint for current trading post prices
pub const COMMERCE_PRICES_ENDPOINT: &str = "/commerce/prices";

/// User agent for HTTP requests
pub const USER_AGENT: &str = "gw2-tp-prices/0.1.0";

/// Items the container queries on activation
pub const TRACKED_ITEMS: &[Item] = &[
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
];
