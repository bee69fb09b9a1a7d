//! Yayoi CSV output
//!
//! Yayoi's import expects headerless rows with every field double-quoted,
//! encoded as Shift-JIS. Output paths derive from the input filename, one
//! file per entry category; a category with no entries still produces its
//! file, empty, so downstream tooling always sees exactly three files.

use std::fs;
use std::path::{Path, PathBuf};

use csv::{QuoteStyle, Terminator, WriterBuilder};
use encoding_rs::SHIFT_JIS;

use crate::error::{ConvertError, ConvertResult};
use crate::models::{EntryKind, LedgerEntry, Marketplace};

/// Unicode space variants the marketplace emits in item names; none of
/// them exist in Shift-JIS, so they are normalized to ASCII spaces
const UNICODE_SPACES: [char; 4] = ['\u{202f}', '\u{00a0}', '\u{2009}', '\u{200a}'];

/// Resolved output path for each entry category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub sales: PathBuf,
    pub commission: PathBuf,
    pub shipping: PathBuf,
}

impl OutputPaths {
    /// Derive the three output paths
    ///
    /// The default base is the input path with a trailing `.csv` dropped
    /// and `_yayoi` appended; an explicit base replaces it entirely. The
    /// category suffix and `.csv` extension are appended to the base.
    pub fn derive(input: &Path, base: Option<&Path>, marketplace: Marketplace) -> Self {
        let base = match base {
            Some(base) => base.to_string_lossy().into_owned(),
            None => {
                let input = input.to_string_lossy();
                let stem = input.strip_suffix(".csv").unwrap_or(&input);
                format!("{stem}_yayoi")
            }
        };
        let path = |kind: EntryKind| {
            PathBuf::from(format!("{base}_{}.csv", kind.file_suffix(marketplace)))
        };
        Self {
            sales: path(EntryKind::Sales),
            commission: path(EntryKind::Commission),
            shipping: path(EntryKind::Shipping),
        }
    }
}

/// Write one category's entries as quote-all, headerless, Shift-JIS CSV
pub fn write_ledger(path: &Path, entries: &[LedgerEntry]) -> ConvertResult<()> {
    let bytes = render(entries)?;
    fs::write(path, bytes).map_err(|e| ConvertError::Io(format!("{}: {}", path.display(), e)))
}

/// Serialize entries to the final Shift-JIS byte payload
fn render(entries: &[LedgerEntry]) -> ConvertResult<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::CRLF)
        .from_writer(Vec::new());

    for entry in entries {
        let fields = entry.fields().map(|field| sanitize(&field));
        writer.write_record(&fields)?;
    }

    let buf = writer
        .into_inner()
        .map_err(|e| ConvertError::Io(e.to_string()))?;
    let text =
        String::from_utf8(buf).map_err(|e| ConvertError::Encoding(e.to_string()))?;
    encode_shift_jis(&text)
}

/// Replace space variants that have no Shift-JIS mapping
fn sanitize(field: &str) -> String {
    if field.contains(&UNICODE_SPACES[..]) {
        field.replace(&UNICODE_SPACES[..], " ")
    } else {
        field.to_string()
    }
}

fn encode_shift_jis(text: &str) -> ConvertResult<Vec<u8>> {
    let (bytes, _, had_errors) = SHIFT_JIS.encode(text);
    if had_errors {
        return Err(ConvertError::Encoding(
            "output contains characters not representable in Shift-JIS".into(),
        ));
    }
    Ok(bytes.into_owned())
}
