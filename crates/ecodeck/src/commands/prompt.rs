use anyhow::Result;

use crate::generation::prompt;

/// Print the generateContent request body. The credential travels in a header
/// and never appears here.
pub fn run() -> Result<()> {
    let body = serde_json::to_string_pretty(&prompt::request_body())?;
    println!("{body}");
    Ok(())
}
