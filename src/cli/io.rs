//! Output handling for the CLI
//!
//! Operation output goes out exactly as produced: no framing, no trailing
//! newline.

use std::io::Write;

use super::errors::CliResult;

/// Write operation output to `writer` and flush it
pub fn write_output<W: Write>(writer: &mut W, content: &[u8]) -> CliResult<()> {
    writer.write_all(content)?;
    writer.flush()?;
    Ok(())
}
