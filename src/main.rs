use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use mercari_yayoi::models::Marketplace;
use mercari_yayoi::services::{convert, ConvertOptions, DateRange};

#[derive(Parser)]
#[command(
    name = "mercari-yayoi",
    version,
    about = "Convert Mercari sales exports to Yayoi accounting CSV",
    long_about = "Converts Mercari transaction exports (direct sales or Mercari \
                  Shops settlement reports) into three Yayoi import files: sales, \
                  commission, and shipping fee entries."
)]
struct Cli {
    /// Path to the Mercari CSV export
    input: PathBuf,

    /// Output base path (default: input path with `_yayoi` appended)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Only convert transactions on or after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    from: Option<String>,

    /// Only convert transactions on or before this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    to: Option<String>,

    /// Input is a Mercari Shops settlement report (Shift-JIS, shop schema)
    #[arg(long)]
    shop: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let range = DateRange::parse(cli.from.as_deref(), cli.to.as_deref())?;
    if !range.is_unbounded() {
        println!("Date range filter:");
        if let Some(from) = &cli.from {
            println!("  From: {from}");
        }
        if let Some(to) = &cli.to {
            println!("  To:   {to}");
        }
        println!();
    }

    let marketplace = if cli.shop {
        Marketplace::Shop
    } else {
        Marketplace::Direct
    };

    let opts = ConvertOptions {
        input: cli.input,
        output_base: cli.output,
        marketplace,
        range,
    };
    let summary = convert(&opts)?;

    for output in &summary.outputs {
        println!(
            "Created: {} ({} entries)",
            output.path.display(),
            output.entries
        );
    }
    println!();
    println!("Converted {} transactions", summary.converted);
    if summary.filtered_out > 0 {
        println!(
            "Filtered out {} transactions outside the date range",
            summary.filtered_out
        );
    }
    if summary.cancelled > 0 {
        println!("Skipped {} cancelled orders", summary.cancelled);
    }

    Ok(())
}
