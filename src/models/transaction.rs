//! Normalized sales records
//!
//! Both export schemas normalize into [`SalesRecord`] before mapping.
//! Cancelled shop rows (negative settlement amount) are dropped by the
//! reader and never materialize here.

use chrono::NaiveDate;
use std::fmt;

use super::money::Yen;

/// Which marketplace export a record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Marketplace {
    /// Direct marketplace sale
    #[default]
    Direct,
    /// Sale through a marketplace-hosted shop (Mercari Shops)
    Shop,
}

impl Marketplace {
    /// Counterparty name recorded on every ledger entry
    pub const fn counterparty(&self) -> &'static str {
        match self {
            Self::Direct => "メルカリ",
            Self::Shop => "メルカリShop",
        }
    }

    /// Filename suffix for the sales (receivable) output stream
    pub const fn sales_suffix(&self) -> &'static str {
        match self {
            Self::Direct => "urikake_mercari",
            Self::Shop => "urikake_mercari_shop",
        }
    }
}

impl fmt::Display for Marketplace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct => write!(f, "Mercari"),
            Self::Shop => write!(f, "Mercari Shops"),
        }
    }
}

/// One marketplace sale, normalized from either export schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalesRecord {
    /// Canonical transaction date: purchase completion for direct sales,
    /// settlement transfer for shop sales
    pub date: NaiveDate,

    /// Item (or order) identifier, never empty
    pub item_id: String,

    /// Item display name, may be empty
    pub item_name: String,

    /// Sale price
    pub price: Yen,

    /// Platform commission
    pub commission: Yen,

    /// Shipping fee charged to the seller
    pub shipping_fee: Yen,
}

impl SalesRecord {
    /// Ledger description shared by all entries for this record
    pub fn description(&self) -> String {
        format!("{} {}", self.item_id, self.item_name)
    }
}
