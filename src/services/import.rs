//! Source readers for the two marketplace export schemas
//!
//! Each schema has its own encoding and its own column binding: direct
//! sales exports are UTF-8 (usually with a BOM) and bind columns by header
//! name, while Mercari Shops settlement reports are Shift-JIS and bind
//! columns positionally. Both normalize into [`SalesRecord`].
//!
//! Reading is a single forward pass: the byte stream is decoded up front,
//! then rows are parsed lazily in source order via
//! [`RecordReader::next_record`].

use std::fs;
use std::io::Cursor;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use csv::{DeserializeRecordsIntoIter, ReaderBuilder, StringRecord, StringRecordsIntoIter};
use encoding_rs::{SHIFT_JIS, UTF_8};
use serde::Deserialize;

use crate::error::{ConvertError, ConvertResult};
use crate::models::{Marketplace, SalesRecord, Yen};

/// Timestamp format of the direct export's 購入完了日 column
const DIRECT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Date formats observed in the shop report's 売上移転日 column; month and
/// day may be unpadded (e.g. `2025/7/1 12:53:41`)
const SHOP_DATE_FORMATS: [&str; 4] = [
    "%Y/%m/%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y/%m/%d",
    "%Y-%m-%d",
];

/// One row of the direct sales export, bound by header name
#[derive(Debug, Deserialize)]
struct DirectRow {
    #[serde(rename = "購入完了日")]
    completed_at: String,
    #[serde(rename = "商品ID")]
    item_id: String,
    #[serde(rename = "商品名")]
    item_name: String,
    #[serde(rename = "商品代金")]
    price: String,
    #[serde(rename = "販売手数料")]
    commission: String,
    #[serde(rename = "配送料")]
    shipping_fee: String,
}

/// Positional column layout of the shop settlement report
#[derive(Debug, Clone, Copy)]
struct ShopLayout {
    order_id: usize,
    transfer_date: usize,
    item_name: usize,
    /// Signed settlement amount; negative marks a cancelled order
    settlement: usize,
    price: usize,
    shipping_fee: usize,
    commission: usize,
    min_columns: usize,
}

impl ShopLayout {
    const fn standard() -> Self {
        Self {
            order_id: 0,
            transfer_date: 6,
            item_name: 8,
            settlement: 11,
            price: 12,
            shipping_fee: 13,
            commission: 15,
            min_columns: 16,
        }
    }
}

enum Rows {
    Direct(DeserializeRecordsIntoIter<Cursor<Vec<u8>>, DirectRow>),
    Shop {
        rows: StringRecordsIntoIter<Cursor<Vec<u8>>>,
        layout: ShopLayout,
    },
}

/// Streaming reader producing normalized records in source row order
///
/// Single-pass and non-restartable. Cancelled shop rows are skipped
/// silently and counted, never surfaced as records or errors.
pub struct RecordReader {
    rows: Rows,
    /// Current 1-based file row; the header is row 1
    row: usize,
    cancelled: usize,
}

impl std::fmt::Debug for RecordReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordReader")
            .field("row", &self.row)
            .field("cancelled", &self.cancelled)
            .finish_non_exhaustive()
    }
}

impl RecordReader {
    /// Open a marketplace export file
    pub fn open(path: &Path, marketplace: Marketplace) -> ConvertResult<Self> {
        let bytes = fs::read(path)
            .map_err(|e| ConvertError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_bytes(&bytes, marketplace)
    }

    /// Build a reader over raw export bytes
    pub fn from_bytes(bytes: &[u8], marketplace: Marketplace) -> ConvertResult<Self> {
        let text = decode(bytes, marketplace)?;
        let rows = match marketplace {
            Marketplace::Direct => {
                let rdr = ReaderBuilder::new()
                    .trim(csv::Trim::All)
                    .from_reader(Cursor::new(text.into_bytes()));
                Rows::Direct(rdr.into_deserialize())
            }
            Marketplace::Shop => {
                let rdr = ReaderBuilder::new()
                    .flexible(true)
                    .trim(csv::Trim::All)
                    .from_reader(Cursor::new(text.into_bytes()));
                Rows::Shop {
                    rows: rdr.into_records(),
                    layout: ShopLayout::standard(),
                }
            }
        };
        Ok(Self {
            rows,
            row: 1,
            cancelled: 0,
        })
    }

    /// Number of cancelled shop rows skipped so far
    pub fn cancelled(&self) -> usize {
        self.cancelled
    }

    /// Next record in source order, or `None` at end of input
    pub fn next_record(&mut self) -> ConvertResult<Option<SalesRecord>> {
        loop {
            self.row += 1;
            match &mut self.rows {
                Rows::Direct(rows) => {
                    return match rows.next() {
                        None => Ok(None),
                        Some(row) => direct_record(row?, self.row).map(Some),
                    };
                }
                Rows::Shop { rows, layout } => match rows.next() {
                    None => return Ok(None),
                    Some(row) => {
                        let layout = *layout;
                        match shop_record(&row?, layout, self.row)? {
                            Some(record) => return Ok(Some(record)),
                            None => {
                                self.cancelled += 1;
                                continue;
                            }
                        }
                    }
                },
            }
        }
    }
}

/// Decode export bytes with the schema's encoding rules
fn decode(bytes: &[u8], marketplace: Marketplace) -> ConvertResult<String> {
    match marketplace {
        Marketplace::Direct => {
            // UTF-8, with the BOM stripped when present
            let (text, _, had_errors) = UTF_8.decode(bytes);
            if had_errors {
                return Err(ConvertError::Encoding("input is not valid UTF-8".into()));
            }
            Ok(text.into_owned())
        }
        Marketplace::Shop => {
            // Shift-JIS, falling back to UTF-8 for re-saved reports
            let (text, _, had_errors) = SHIFT_JIS.decode(bytes);
            if !had_errors {
                return Ok(text.into_owned());
            }
            let (text, _, had_errors) = UTF_8.decode(bytes);
            if !had_errors {
                return Ok(text.into_owned());
            }
            Err(ConvertError::Encoding(
                "input is neither valid Shift-JIS nor UTF-8".into(),
            ))
        }
    }
}

fn direct_record(row: DirectRow, row_no: usize) -> ConvertResult<SalesRecord> {
    let date = NaiveDateTime::parse_from_str(&row.completed_at, DIRECT_DATE_FORMAT)
        .map_err(|_| {
            ConvertError::parse(row_no, format!("invalid 購入完了日 '{}'", row.completed_at))
        })?
        .date();
    if row.item_id.is_empty() {
        return Err(ConvertError::parse(row_no, "empty 商品ID"));
    }
    Ok(SalesRecord {
        date,
        item_id: row.item_id,
        item_name: row.item_name,
        price: parse_yen(&row.price, "商品代金", row_no)?,
        commission: parse_yen(&row.commission, "販売手数料", row_no)?,
        shipping_fee: parse_yen(&row.shipping_fee, "配送料", row_no)?,
    })
}

/// Parse one shop row; `Ok(None)` marks a cancelled order to skip
fn shop_record(
    record: &StringRecord,
    layout: ShopLayout,
    row_no: usize,
) -> ConvertResult<Option<SalesRecord>> {
    if record.len() < layout.min_columns {
        return Err(ConvertError::parse(
            row_no,
            format!(
                "expected at least {} columns, found {}",
                layout.min_columns,
                record.len()
            ),
        ));
    }
    let field = |idx: usize| record.get(idx).unwrap_or("").trim();

    let settlement_text = field(layout.settlement);
    let settlement: i64 = settlement_text.parse().map_err(|_| {
        ConvertError::parse(
            row_no,
            format!("invalid settlement amount '{settlement_text}'"),
        )
    })?;
    if settlement < 0 {
        // cancelled order
        return Ok(None);
    }

    let date_text = field(layout.transfer_date);
    let date = parse_shop_date(date_text).ok_or_else(|| {
        ConvertError::parse(row_no, format!("invalid 売上移転日 '{date_text}'"))
    })?;

    let item_id = field(layout.order_id);
    if item_id.is_empty() {
        return Err(ConvertError::parse(row_no, "empty order id"));
    }

    Ok(Some(SalesRecord {
        date,
        item_id: item_id.to_string(),
        item_name: field(layout.item_name).to_string(),
        price: parse_yen(field(layout.price), "商品代金", row_no)?,
        commission: parse_yen(field(layout.commission), "販売手数料", row_no)?,
        shipping_fee: parse_yen(field(layout.shipping_fee), "配送料", row_no)?,
    }))
}

fn parse_shop_date(s: &str) -> Option<NaiveDate> {
    for format in SHOP_DATE_FORMATS {
        if format.contains("%H") {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
                return Some(dt.date());
            }
        } else if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return Some(date);
        }
    }
    None
}

fn parse_yen(s: &str, column: &str, row_no: usize) -> ConvertResult<Yen> {
    Yen::parse(s).map_err(|_| ConvertError::parse(row_no, format!("invalid {column} '{s}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIRECT_HEADER: &str = "購入完了日,商品ID,商品名,商品代金,販売手数料,配送料,販売利益";

    fn direct_csv(rows: &[&str]) -> Vec<u8> {
        let mut text = DIRECT_HEADER.to_string();
        for row in rows {
            text.push('\n');
            text.push_str(row);
        }
        text.into_bytes()
    }

    fn shop_row(
        order_id: &str,
        date: &str,
        name: &str,
        settlement: &str,
        price: &str,
        shipping: &str,
        commission: &str,
    ) -> String {
        let mut cols = vec![""; 16];
        cols[0] = order_id;
        cols[6] = date;
        cols[8] = name;
        cols[11] = settlement;
        cols[12] = price;
        cols[13] = shipping;
        cols[15] = commission;
        cols.join(",")
    }

    fn shop_csv_sjis(rows: &[String]) -> Vec<u8> {
        let header: Vec<String> = (0..16).map(|i| format!("col{i}")).collect();
        let mut text = header.join(",");
        for row in rows {
            text.push('\n');
            text.push_str(row);
        }
        SHIFT_JIS.encode(&text).0.into_owned()
    }

    fn read_all(bytes: &[u8], marketplace: Marketplace) -> (Vec<SalesRecord>, usize) {
        let mut reader = RecordReader::from_bytes(bytes, marketplace).unwrap();
        let mut records = Vec::new();
        while let Some(record) = reader.next_record().unwrap() {
            records.push(record);
        }
        (records, reader.cancelled())
    }

    #[test]
    fn test_direct_row_normalizes() {
        let bytes = direct_csv(&["2025-07-23 06:33:08,m30000000000,商品サンプル,3280,328,160,2792"]);
        let (records, _) = read_all(&bytes, Marketplace::Direct);
        assert_eq!(records.len(), 1);

        let record = &records[0];
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2025, 7, 23).unwrap());
        assert_eq!(record.item_id, "m30000000000");
        assert_eq!(record.item_name, "商品サンプル");
        assert_eq!(record.price, Yen::new(3280));
        assert_eq!(record.commission, Yen::new(328));
        assert_eq!(record.shipping_fee, Yen::new(160));
    }

    #[test]
    fn test_direct_bom_is_stripped() {
        let mut bytes = b"\xef\xbb\xbf".to_vec();
        bytes.extend_from_slice(&direct_csv(&[
            "2025-07-23 06:33:08,m30000000000,item,3280,328,160,2792",
        ]));
        let (records, _) = read_all(&bytes, Marketplace::Direct);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].item_id, "m30000000000");
    }

    #[test]
    fn test_direct_invalid_utf8_is_encoding_error() {
        let err = RecordReader::from_bytes(&[0x41, 0xff, 0xff], Marketplace::Direct).unwrap_err();
        assert!(matches!(err, ConvertError::Encoding(_)));
    }

    #[test]
    fn test_direct_malformed_date_names_the_row() {
        let bytes = direct_csv(&[
            "2025-07-23 06:33:08,m1,ok,100,10,0,90",
            "not a date,m2,bad,100,10,0,90",
        ]);
        let mut reader = RecordReader::from_bytes(&bytes, Marketplace::Direct).unwrap();
        assert!(reader.next_record().unwrap().is_some());
        let err = reader.next_record().unwrap_err();
        assert!(matches!(err, ConvertError::Parse { row: 3, .. }));
    }

    #[test]
    fn test_direct_non_numeric_price_fails() {
        let bytes = direct_csv(&["2025-07-23 06:33:08,m1,item,abc,10,0,90"]);
        let mut reader = RecordReader::from_bytes(&bytes, Marketplace::Direct).unwrap();
        let err = reader.next_record().unwrap_err();
        assert!(err.is_parse());
        assert!(err.to_string().contains("商品代金"));
    }

    #[test]
    fn test_shop_row_normalizes_from_shift_jis() {
        let bytes = shop_csv_sjis(&[shop_row(
            "ORDER-1",
            "2025/7/1 12:53:41",
            "商品サンプル",
            "2792",
            "3280",
            "160",
            "328",
        )]);
        let (records, cancelled) = read_all(&bytes, Marketplace::Shop);
        assert_eq!(cancelled, 0);
        assert_eq!(records.len(), 1);

        let record = &records[0];
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2025, 7, 1).unwrap());
        assert_eq!(record.item_id, "ORDER-1");
        assert_eq!(record.item_name, "商品サンプル");
        assert_eq!(record.price, Yen::new(3280));
        assert_eq!(record.commission, Yen::new(328));
        assert_eq!(record.shipping_fee, Yen::new(160));
    }

    #[test]
    fn test_shop_cancelled_row_is_skipped_silently() {
        let bytes = shop_csv_sjis(&[
            shop_row("ORDER-1", "2025/7/1 12:53:41", "a", "-3280", "3280", "0", "0"),
            shop_row("ORDER-2", "2025/7/2 08:00:00", "b", "1000", "1200", "100", "120"),
        ]);
        let (records, cancelled) = read_all(&bytes, Marketplace::Shop);
        assert_eq!(cancelled, 1);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].item_id, "ORDER-2");
    }

    #[test]
    fn test_shop_date_only_format_accepted() {
        let bytes = shop_csv_sjis(&[shop_row("O1", "2025-07-01", "a", "0", "100", "0", "0")]);
        let (records, _) = read_all(&bytes, Marketplace::Shop);
        assert_eq!(records[0].date, NaiveDate::from_ymd_opt(2025, 7, 1).unwrap());
    }

    #[test]
    fn test_shop_short_row_fails() {
        let header: Vec<String> = (0..16).map(|i| format!("col{i}")).collect();
        let text = format!("{}\na,b,c", header.join(","));
        let mut reader =
            RecordReader::from_bytes(text.as_bytes(), Marketplace::Shop).unwrap();
        let err = reader.next_record().unwrap_err();
        assert!(matches!(err, ConvertError::Parse { row: 2, .. }));
    }

    #[test]
    fn test_shop_non_numeric_settlement_fails() {
        let bytes = shop_csv_sjis(&[shop_row("O1", "2025/7/1", "a", "n/a", "100", "0", "0")]);
        let mut reader = RecordReader::from_bytes(&bytes, Marketplace::Shop).unwrap();
        let err = reader.next_record().unwrap_err();
        assert!(err.to_string().contains("settlement"));
    }

    #[test]
    fn test_shop_undecodable_input_is_encoding_error() {
        // 0xFF is invalid as a Shift-JIS lead byte and as UTF-8
        let err = RecordReader::from_bytes(&[0xff, 0xff, 0xff], Marketplace::Shop).unwrap_err();
        assert!(matches!(err, ConvertError::Encoding(_)));
    }
}
