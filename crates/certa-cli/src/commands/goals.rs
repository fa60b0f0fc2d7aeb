//! Goals command implementation.

use crate::cli::KbArgs;
use crate::commands::load_kb;
use crate::error::Result;
use crate::output::Formatter;

/// Execute the goals command.
pub fn execute_goals(args: KbArgs, formatter: &Formatter) -> Result<()> {
    let kb = load_kb(&args.kb)?;
    println!("{}", formatter.format_goals(&kb.possible_goals())?);
    Ok(())
}
