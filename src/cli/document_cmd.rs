//! Whole-document commands: show, stats, fmt

use anyhow::{bail, Context, Result};
use tracing::debug;

use super::output::Output;
use super::target::Target;

/// Prints the document in canonical form
pub fn show(target: &Target, output: &Output) -> Result<()> {
    let file = target.open()?;

    if output.is_json() {
        let sections: Vec<_> = file.sections().collect();
        output.data(&sections);
    } else {
        print!("{}", file.render());
    }

    Ok(())
}

/// Prints section and key counts
pub fn stats(target: &Target, output: &Output) -> Result<()> {
    let file = target.open()?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "path": target.path().display().to_string(),
            "sections": file.section_count(),
            "keys": file.key_count(),
        }));
    } else {
        println!("File: {}", target.path().display());
        println!("Sections: {} (including default)", file.section_count());
        println!("Keys: {}", file.key_count());
    }

    Ok(())
}

/// Rewrites the file in canonical form, or with `check` only reports whether it already is
pub fn fmt(target: &Target, output: &Output, check: bool) -> Result<()> {
    let (mut file, current) = target.open_with_text()?;
    let canonical = file.render();
    let formatted = current == canonical;
    debug!(path = %target.path().display(), formatted, "compared with canonical form");

    if check {
        if !formatted {
            bail!("{} is not in canonical form", target.path().display());
        }
        output.success(&format!("{} is already formatted", target.path().display()));
        return Ok(());
    }

    if formatted {
        output.success(&format!("{} is already formatted", target.path().display()));
    } else {
        file.save()
            .with_context(|| format!("Failed to save {}", target.path().display()))?;
        output.success(&format!("Formatted {}", target.path().display()));
    }

    Ok(())
}
