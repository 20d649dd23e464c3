//! Static price tables and quote math for the pricing widgets.
//!
//! Display-only arithmetic: a project tier sets the one-time base, addons
//! stack on top, hosting is the single monthly item. The demo calculator
//! treats an unparseable quantity as zero.

use serde::{Deserialize, Serialize};

/// Project tiers offered on the pricing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tier {
    DigitalMenu,
    MiniInteractive,
    StandardInteractive,
    PremiumCustom,
}

impl Tier {
    pub const ALL: [Tier; 4] = [
        Tier::DigitalMenu,
        Tier::MiniInteractive,
        Tier::StandardInteractive,
        Tier::PremiumCustom,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Tier::DigitalMenu => "Digital Menu / Simple App",
            Tier::MiniInteractive => "Mini Interactive App/Game",
            Tier::StandardInteractive => "Standard Interactive App/Game",
            Tier::PremiumCustom => "Premium Custom Build",
        }
    }

    /// One-time base price, USD.
    pub fn price(self) -> u32 {
        match self {
            Tier::DigitalMenu => 325,
            Tier::MiniInteractive => 575,
            Tier::StandardInteractive => 1000,
            Tier::PremiumCustom => 1500,
        }
    }

    /// Map the 1-based `<select>` value used on the page.
    pub fn from_index(index: u32) -> Option<Tier> {
        match index {
            1 => Some(Tier::DigitalMenu),
            2 => Some(Tier::MiniInteractive),
            3 => Some(Tier::StandardInteractive),
            4 => Some(Tier::PremiumCustom),
            _ => None,
        }
    }
}

/// Addon prices, USD.
pub const LOGO_PACK_PRICE: u32 = 200;
pub const HOSTING_MONTHLY_PRICE: u32 = 250;
pub const EXTRA_HOURS_PRICE: u32 = 250;

/// Which addons are checked.
#[derive(Debug, Clone, Copy, Default)]
pub struct AddonSelection {
    pub logo_pack: bool,
    pub hosting: bool,
    pub extra_hours: bool,
}

/// A computed estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    pub one_time: u32,
    pub monthly: u32,
}

/// Base price plus selected addons.
pub fn estimate(tier: Tier, addons: AddonSelection) -> Quote {
    let mut one_time = tier.price();
    let mut monthly = 0;
    if addons.logo_pack {
        one_time += LOGO_PACK_PRICE;
    }
    if addons.hosting {
        monthly += HOSTING_MONTHLY_PRICE;
    }
    if addons.extra_hours {
        one_time += EXTRA_HOURS_PRICE;
    }
    Quote { one_time, monthly }
}

/// Demo calculator rate, USD per square foot.
pub const DEMO_PRICE_PER_SQFT: f64 = 2.50;

/// Quote a raw square-footage field. A parse failure is zero, not an error.
pub fn area_estimate(raw: &str) -> f64 {
    let sqft: f64 = raw.trim().parse().unwrap_or(0.0);
    sqft * DEMO_PRICE_PER_SQFT
}
