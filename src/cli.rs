// CLI module - command-line argument parsing and handlers
//
// Without a subcommand the TUI starts. Subcommands print and exit:
// - sections [--search Q] [--json]: list (filtered) sections with highlights
// - show <id>: print one section's Markdown body
// - config --show | --path | --reset | --edit: configuration management

use crate::config::{Config, VERSION};
use crate::content::{library, registry, Section, SECTIONS};
use crate::viewer::{filter_sections, highlight_matches, Segment};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use crossterm::style::Stylize;
use serde::Serialize;
use std::io::{IsTerminal, Write};
use std::process::Command;

/// shipdocs - CI/CD and Kubernetes reference in the terminal
#[derive(Parser)]
#[command(name = "shipdocs")]
#[command(version = VERSION)]
#[command(about = "CI/CD and Kubernetes reference viewer", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List sections, optionally filtered by a search term
    Sections {
        /// Case-insensitive literal match against title and id
        #[arg(long, short)]
        search: Option<String>,

        /// Print JSON (with highlight segments) instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print the Markdown body of one section
    Show {
        /// Section id (see `shipdocs sections`)
        id: String,
    },

    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Open config file in $EDITOR
        #[arg(long)]
        edit: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

/// Handle CLI commands. Returns true if a command was handled (exit after).
pub fn handle_cli() -> Result<bool> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Sections { search, json }) => {
            let color = !json && std::io::stdout().is_terminal();
            let output = render_sections(SECTIONS, search.as_deref().unwrap_or(""), json, color)?;
            print!("{}", output);
        }
        Some(Commands::Show { id }) => print!("{}", render_show(&id)?),
        Some(Commands::Config {
            show,
            reset,
            edit,
            path,
        }) => {
            if path {
                handle_config_path()?;
            } else if show {
                handle_config_show()?;
            } else if reset {
                handle_config_reset()?;
            } else if edit {
                handle_config_edit()?;
            } else {
                println!("Usage: shipdocs config [--show|--path|--reset|--edit]");
                println!();
                println!("Options:");
                println!("  --show    Display effective configuration");
                println!("  --path    Show config file path");
                println!("  --reset   Reset config file to defaults");
                println!("  --edit    Open config file in $EDITOR");
            }
        }
        None => return Ok(false),
    }
    Ok(true)
}

/// One row of `sections --json`
#[derive(Serialize)]
struct SectionMatch<'a> {
    #[serde(flatten)]
    section: &'a Section,
    segments: Vec<Segment<'a>>,
}

/// List sections matching `query`, highlighting matches in the titles
fn render_sections(sections: &[Section], query: &str, json: bool, color: bool) -> Result<String> {
    let matches = filter_sections(sections, query);

    if json {
        let rows: Vec<SectionMatch> = matches
            .iter()
            .map(|&section| SectionMatch {
                section,
                segments: highlight_matches(section.title, query),
            })
            .collect();
        let mut out = serde_json::to_string_pretty(&rows).context("Failed to encode sections")?;
        out.push('\n');
        return Ok(out);
    }

    let mut out = String::new();
    for section in &matches {
        let title: String = highlight_matches(section.title, query)
            .into_iter()
            .map(|segment| match (segment.is_match, color) {
                (true, true) => segment.content.black().on_yellow().bold().to_string(),
                (true, false) => format!("[{}]", segment.content),
                _ => segment.content.to_string(),
            })
            .collect();
        out.push_str(&format!("{} {:<28} {}\n", section.icon, section.id, title));
    }
    if matches.is_empty() {
        out.push_str(&format!("No sections match {:?}\n", query));
    }
    Ok(out)
}

fn render_show(id: &str) -> Result<String> {
    let Some(section) = registry::find(id) else {
        bail!("Unknown section '{}'. Run `shipdocs sections` to list ids", id);
    };
    let body = library::body(id)
        .with_context(|| format!("Section '{}' has no content", id))?;
    Ok(format!(
        "# {} {}\n{}\n",
        section.icon,
        section.title,
        body.trim_end()
    ))
}

fn config_path() -> Result<std::path::PathBuf> {
    Config::config_path().context("Could not determine config path")
}

fn handle_config_path() -> Result<()> {
    println!("{}", config_path()?.display());
    Ok(())
}

fn handle_config_show() -> Result<()> {
    let config = Config::load()?;

    println!("# Effective configuration (env > file > defaults)");
    println!();
    print!("{}", config.to_toml());

    println!();
    let path = config_path()?;
    if path.exists() {
        println!("# Source: {}", path.display());
    } else {
        println!("# Source: defaults (no config file)");
    }
    Ok(())
}

fn handle_config_reset() -> Result<()> {
    let path = config_path()?;

    if path.exists() {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        std::io::stderr().flush()?;

        let mut input = String::new();
        std::io::stdin()
            .read_line(&mut input)
            .context("Failed to read confirmation")?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    std::fs::write(&path, Config::default().to_toml())
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("Config reset to defaults: {}", path.display());
    Ok(())
}

fn handle_config_edit() -> Result<()> {
    let path = config_path()?;

    if !path.exists() {
        Config::ensure_config_exists();
        println!("Created new config file: {}", path.display());
    }

    let editor = std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(windows) {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        });

    println!("Opening {} with {}", path.display(), editor);

    let status = Command::new(&editor)
        .arg(&path)
        .status()
        .with_context(|| format!("Failed to launch editor '{}' (set $EDITOR)", editor))?;
    if !status.success() {
        bail!("Editor exited with status: {}", status);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sections_plain_marks_matches() {
        let out = render_sections(SECTIONS, "over", false, false).unwrap();
        assert_eq!(out.lines().count(), 1);
        assert!(out.contains("overview"));
        assert!(out.ends_with("Project [Over]view\n"));
    }

    #[test]
    fn test_sections_without_query_lists_all() {
        let out = render_sections(SECTIONS, "", false, false).unwrap();
        assert_eq!(out.lines().count(), SECTIONS.len());
        assert!(!out.contains('['));
    }

    #[test]
    fn test_sections_no_match() {
        let out = render_sections(SECTIONS, "zzz", false, false).unwrap();
        assert_eq!(out, "No sections match \"zzz\"\n");
    }

    #[test]
    fn test_sections_json_has_segments() {
        let out = render_sections(SECTIONS, "k8s", true, false).unwrap();
        let rows: serde_json::Value = serde_json::from_str(&out).unwrap();
        let rows = rows.as_array().unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0]["id"], "k8s-basics");
        // Matched on id only, so the title is one unmatched segment
        assert_eq!(rows[0]["segments"][0]["content"], "Kubernetes Basics");
        assert_eq!(rows[0]["segments"][0]["is_match"], false);
    }

    #[test]
    fn test_sections_literal_pattern_chars() {
        let out = render_sections(SECTIONS, "(", false, false).unwrap();
        assert!(out.starts_with("No sections match"));
    }

    #[test]
    fn test_show_known_and_unknown() {
        let out = render_show("helm").unwrap();
        assert!(out.starts_with("# ⛵ Helm Charts\n"));

        let err = render_show("nope").unwrap_err();
        assert!(err.to_string().contains("Unknown section 'nope'"));
    }
}
