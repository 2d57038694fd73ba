use std::path::Path;

use anyhow::{bail, Context};
use serde::Serialize;
use serde_json::Value;

/// Reads a database file holding a top-level array of demon records.
pub fn load(path: &Path) -> anyhow::Result<Vec<Value>> {
    if !path.exists() {
        bail!("Source file '{}' not found.", path.display());
    }

    let timer = std::time::Instant::now();
    let contents = std::fs::read(path)
        .with_context(|| format!("Reading file: {}", path.display()))?;

    let demons = match serde_json::from_slice::<Value>(&contents)? {
        Value::Array(demons) => demons,
        other => bail!(
            "expected a top-level array of demons, found {}",
            kind(&other)
        ),
    };

    info!(
        "Loaded {} demons from {} in {}ms",
        demons.len(),
        path.display(),
        timer.elapsed().as_millis()
    );

    Ok(demons)
}

/// Writes `demons` with two-space indentation, leaving non-ASCII text unescaped.
///
/// The file is written in place; a failed write can leave a truncated file behind.
pub fn save<T: Serialize + ?Sized>(path: &Path, demons: &T) -> anyhow::Result<()> {
    let timer = std::time::Instant::now();
    std::fs::write(path, serde_json::to_string_pretty(demons)?)
        .with_context(|| format!("Writing file: {}", path.display()))?;

    info!(
        "Saved {} in {}ms",
        path.display(),
        timer.elapsed().as_millis()
    );

    Ok(())
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
