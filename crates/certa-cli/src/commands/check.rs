//! Check command implementation.

use crate::cli::KbArgs;
use crate::commands::load_kb;
use crate::error::Result;
use crate::output::Formatter;
use certa_kb::KbSummary;

/// Execute the check command.
///
/// Loading already rejects malformed documents; the summary adds counts and
/// references nothing can supply.
pub fn execute_check(args: KbArgs, formatter: &Formatter) -> Result<KbSummary> {
    let kb = load_kb(&args.kb)?;
    let summary = KbSummary::of(&kb);
    println!("{}", formatter.format_summary(&summary)?);
    Ok(summary)
}
