//! Section CLI commands

use anyhow::Result;
use clap::Subcommand;

use super::output::{section_label, Output};
use super::target::Target;

#[derive(Subcommand)]
pub enum SectionCommands {
    /// Create an empty section (no-op if it exists)
    Add {
        name: String,

        /// Comment to place above the header
        #[arg(long, short, default_value = "")]
        comment: String,
    },

    /// Delete a section and all of its keys
    Delete { name: String },

    /// Replace a section's comment (an empty comment clears it)
    Comment { name: String, comment: String },

    /// List sections with their key counts
    List,
}

pub fn run(cmd: SectionCommands, target: &Target, output: &Output) -> Result<()> {
    match cmd {
        SectionCommands::Add { name, comment } => add(target, output, &name, &comment),
        SectionCommands::Delete { name } => delete(target, output, &name),
        SectionCommands::Comment { name, comment } => set_comment(target, output, &name, &comment),
        SectionCommands::List => list(target, output),
    }
}

fn add(target: &Target, output: &Output, name: &str, comment: &str) -> Result<()> {
    let name = name.trim();
    let mut file = target.open_or_create()?;
    let created = file.create_section(name, comment)?;
    target.save_if_dirty(&mut file)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "section": name,
            "created": created,
        }));
    } else if created {
        output.success(&format!("Created section {}", name));
    } else {
        output.success(&format!("Section {} already exists", name));
    }

    Ok(())
}

fn delete(target: &Target, output: &Output, name: &str) -> Result<()> {
    let mut file = target.open()?;
    file.delete_section(name)?;
    target.save_if_dirty(&mut file)?;

    output.success(&format!("Deleted section {}", name));
    Ok(())
}

fn set_comment(target: &Target, output: &Output, name: &str, comment: &str) -> Result<()> {
    let mut file = target.open()?;
    file.set_section_comment(name, comment)?;
    target.save_if_dirty(&mut file)?;

    output.success(&format!("Updated comment on {}", section_label(name)));
    Ok(())
}

fn list(target: &Target, output: &Output) -> Result<()> {
    let file = target.open()?;

    if output.is_json() {
        let sections: Vec<_> = file
            .sections()
            .map(|s| {
                serde_json::json!({
                    "name": s.name,
                    "comment": s.comment,
                    "keys": s.key_count(),
                })
            })
            .collect();
        output.data(&sections);
    } else {
        println!("{:<24} KEYS", "SECTION");
        println!("{}", "-".repeat(30));
        for section in file.sections() {
            println!("{:<24} {}", section_label(&section.name), section.key_count());
        }
    }

    Ok(())
}
