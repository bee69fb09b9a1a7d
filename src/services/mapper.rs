//! Decomposition of sales records into ledger entries
//!
//! One sale becomes up to three ledger entries under fixed accounting
//! rules: the sale proceeds always, the commission and shipping expenses
//! only when the fee is strictly positive. A zero fee never produces an
//! entry.

use crate::models::{EntryKind, LedgerEntry, Marketplace, SalesRecord};

/// Decompose one record into its ledger entries, in category order
/// (sales, commission, shipping)
pub fn map_record(record: &SalesRecord, marketplace: Marketplace) -> Vec<LedgerEntry> {
    let mut entries = Vec::with_capacity(3);
    entries.push(LedgerEntry::new(
        record,
        marketplace,
        EntryKind::Sales,
        record.price,
    ));
    if !record.commission.is_zero() {
        entries.push(LedgerEntry::new(
            record,
            marketplace,
            EntryKind::Commission,
            record.commission,
        ));
    }
    if !record.shipping_fee.is_zero() {
        entries.push(LedgerEntry::new(
            record,
            marketplace,
            EntryKind::Shipping,
            record.shipping_fee,
        ));
    }
    entries
}
