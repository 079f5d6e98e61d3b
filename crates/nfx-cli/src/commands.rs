use std::fs::File;
use std::io::{self, BufWriter, Write};

use anyhow::{bail, Context};
use colored::Colorize;
use tracing::info;

use nfx_objects::{
    load_note_objects, report_headers, write_csv, write_json, EmbeddedContent, EmbeddedObject,
    ObjectResult, ObjectTree, ReportRow,
};
use nfx_store::{RecordStore, SqliteRecordStore};
use nfx_types::NoteId;

use crate::cli::*;
use crate::config::CliConfig;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => CliConfig::load(path)?,
        None => CliConfig::default(),
    };
    match cli.command {
        Command::Report(args) => cmd_report(args, &config),
        Command::Tree(args) => cmd_tree(args, &config),
        Command::Markup(args) => cmd_markup(args, &config),
        Command::Headers => {
            println!("{}", report_headers().join(","));
            Ok(())
        }
    }
}

/// Open the store and pick the notes, flags first, then config.
fn open_source(
    args: &SourceArgs,
    config: &CliConfig,
) -> anyhow::Result<(SqliteRecordStore, Vec<NoteId>)> {
    let Some(db) = args.db.clone().or_else(|| config.database.clone()) else {
        bail!("no database given (use --db or set `database` in the config file)");
    };
    let notes = if args.notes.is_empty() {
        config.notes.clone()
    } else {
        args.notes.clone()
    };
    if notes.is_empty() {
        bail!("no notes given (use --note or set `notes` in the config file)");
    }
    let store = SqliteRecordStore::open(&db)
        .with_context(|| format!("opening {}", db.display()))?;
    Ok((store, notes))
}

fn cmd_report(args: ReportArgs, config: &CliConfig) -> anyhow::Result<()> {
    let (store, notes) = open_source(&args.source, config)?;
    let rows = build_report(&store, &notes)?;
    let format = args.format.unwrap_or(config.format);
    info!(rows = rows.len(), notes = notes.len(), "report built");

    match args.output {
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("creating {}", path.display()))?;
            write_report(&rows, format, BufWriter::new(file))?;
            println!(
                "{} Wrote {} rows to {}",
                "✓".green().bold(),
                rows.len(),
                path.display().to_string().bold()
            );
        }
        None => write_report(&rows, format, io::stdout().lock())?,
    }
    Ok(())
}

fn cmd_tree(args: SourceArgs, config: &CliConfig) -> anyhow::Result<()> {
    let (store, notes) = open_source(&args, config)?;
    for note in notes {
        let tree = load_note_objects(&store, note)?;
        println!("{} {} ({} objects)", "Note".bold(), note.to_string().yellow(), tree.len());
        for line in tree_lines(&tree) {
            println!("{line}");
        }
    }
    Ok(())
}

fn cmd_markup(args: SourceArgs, config: &CliConfig) -> anyhow::Result<()> {
    let (store, notes) = open_source(&args, config)?;
    for note in notes {
        let tree = load_note_objects(&store, note)?;
        for root in tree.roots() {
            println!("{}", tree.render_markup(root.key())?);
        }
    }
    Ok(())
}

/// Rows for every root object of every note, notes in the given order.
pub fn build_report(store: &dyn RecordStore, notes: &[NoteId]) -> ObjectResult<Vec<ReportRow>> {
    let mut rows = Vec::new();
    for note in notes {
        rows.extend(load_note_objects(store, *note)?.note_report_rows());
    }
    Ok(rows)
}

pub fn write_report<W: Write>(
    rows: &[ReportRow],
    format: OutputFormat,
    mut writer: W,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Csv => write_csv(rows, writer)?,
        OutputFormat::Json => write_json(rows, writer)?,
        OutputFormat::Text => {
            writeln!(writer, "{}", report_headers().join(" | "))?;
            for row in rows {
                writeln!(writer, "{}", row.to_record().join(" | "))?;
            }
            writer.flush()?;
        }
    }
    Ok(())
}

/// Indented display strings, children under parents, thumbnails last.
pub fn tree_lines(tree: &ObjectTree) -> Vec<String> {
    let mut lines = Vec::new();
    for root in tree.roots() {
        push_lines(tree, root, 1, &mut lines);
    }
    lines
}

fn push_lines(tree: &ObjectTree, object: &EmbeddedObject, depth: usize, lines: &mut Vec<String>) {
    lines.push(format!("{}{}", "  ".repeat(depth), object.display_string()));
    for child in object.children() {
        if let Some(child) = tree.get(*child) {
            push_lines(tree, child, depth + 1, lines);
        }
    }
    for thumb in object.thumbnails() {
        lines.push(format!("{}{}", "  ".repeat(depth + 1), thumb.display_string()));
    }
}
