//! Yayoi ledger entries
//!
//! One [`LedgerEntry`] is a single accounting-category movement destined
//! for the Yayoi import. Entries are grouped at creation time into one of
//! three categories, each with its own output file.

use chrono::NaiveDate;

use super::money::Yen;
use super::transaction::{Marketplace, SalesRecord};

/// The three entry categories, each bound to one output stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Sale proceeds (売上)
    Sales,
    /// Platform commission expense (支払手数料)
    Commission,
    /// Shipping fee expense (荷造運賃)
    Shipping,
}

impl EntryKind {
    /// 取引分類 column value
    pub const fn debit_category(&self) -> &'static str {
        match self {
            Self::Sales => "売上",
            Self::Commission | Self::Shipping => "経費",
        }
    }

    /// 科目 column value
    pub const fn ledger_account(&self) -> &'static str {
        match self {
            Self::Sales => "売上",
            Self::Commission => "支払手数料",
            Self::Shipping => "荷造運賃",
        }
    }

    /// Filename suffix for this category's output file
    pub const fn file_suffix(&self, marketplace: Marketplace) -> &'static str {
        match self {
            Self::Sales => marketplace.sales_suffix(),
            Self::Commission => "sonota_yokin_tesuryo",
            Self::Shipping => "sonota_yokin_soryo",
        }
    }
}

/// One row destined for a Yayoi import file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    /// Transaction date (serialized as YYYY/MM/DD)
    pub date: NaiveDate,

    /// Entry category
    pub kind: EntryKind,

    /// Item id and name, space-separated
    pub description: String,

    /// Fixed counterparty for the source marketplace
    pub counterparty: &'static str,

    /// Entry amount; strictly positive for commission and shipping entries
    pub amount: Yen,
}

impl LedgerEntry {
    /// Build one entry of the given kind from a normalized record
    pub fn new(
        record: &SalesRecord,
        marketplace: Marketplace,
        kind: EntryKind,
        amount: Yen,
    ) -> Self {
        Self {
            date: record.date,
            kind,
            description: record.description(),
            counterparty: marketplace.counterparty(),
            amount,
        }
    }

    /// Date in Yayoi's slash-separated form
    pub fn formatted_date(&self) -> String {
        self.date.format("%Y/%m/%d").to_string()
    }

    /// Field values in Yayoi column order:
    /// 取引日, 取引分類, 科目, 摘要, 取引先, 金額
    pub fn fields(&self) -> [String; 6] {
        [
            self.formatted_date(),
            self.kind.debit_category().to_string(),
            self.kind.ledger_account().to_string(),
            self.description.clone(),
            self.counterparty.to_string(),
            self.amount.to_string(),
        ]
    }
}
