//! Placeholders command implementation

use std::path::Path;

use render_core::RenderJob;
use render_fs::NormalizedPath;

use crate::error::Result;

/// Run the placeholders command
///
/// Lists each referenced path once, in the order it first appears.
pub fn run_placeholders(template: &Path, json: bool) -> Result<()> {
    let template = RenderJob::new(NormalizedPath::new(template)).load_template()?;
    let paths: Vec<String> = template
        .placeholders()
        .into_iter()
        .map(|path| path.to_string())
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&paths)?);
    } else {
        for path in &paths {
            println!("{}", path);
        }
    }
    Ok(())
}
