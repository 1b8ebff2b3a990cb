use std::io::Write;

use owo_colors::OwoColorize;

use projmatch_core::{CleanReport, ExtractionStats};
use projmatch_recommend::Recommendation;

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

/// Export format for recommendation results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Text,
    Json,
    Csv,
}

/// Print the per-booklet extraction summary.
pub fn print_extraction_summary(
    w: &mut dyn Write,
    pdf_name: &str,
    stats: &ExtractionStats,
    color: ColorMode,
) -> std::io::Result<()> {
    writeln!(
        w,
        "{}: {} record(s) from {} page(s), {} table row(s) scanned",
        pdf_name, stats.records, stats.pages, stats.rows_scanned
    )?;
    if stats.used_marker_fallback {
        let note = "(table pass found nothing; used the description-marker fallback)";
        if color.enabled() {
            writeln!(w, "{}", note.dimmed())?;
        } else {
            writeln!(w, "{}", note)?;
        }
    }
    if stats.empty_fields > 0 {
        let note = format!("({} field(s) left empty)", stats.empty_fields);
        if color.enabled() {
            writeln!(w, "{}", note.yellow())?;
        } else {
            writeln!(w, "{}", note)?;
        }
    }
    Ok(())
}

/// Print what the cleanup pass changed before tokenization.
pub fn print_clean_report(
    w: &mut dyn Write,
    report: &CleanReport,
    color: ColorMode,
) -> std::io::Result<()> {
    if report.dropped_rows > 0 {
        writeln!(
            w,
            "Removed {} record(s) with too many empty fields",
            report.dropped_rows
        )?;
    }
    if report.filled_descriptions > 0 {
        writeln!(
            w,
            "Filled {} empty description(s) with the record title",
            report.filled_descriptions
        )?;
    }
    if report.failed_supervisors > 0 {
        let msg = format!(
            "Marked {} supervisor field(s) as \"parse failed\"",
            report.failed_supervisors
        );
        if color.enabled() {
            writeln!(w, "{}", msg.yellow())?;
        } else {
            writeln!(w, "{}", msg)?;
        }
    }
    if *report == CleanReport::default() {
        writeln!(w, "No cleanup needed")?;
    }
    Ok(())
}

/// Print the ranked recommendations as an aligned text table.
pub fn print_recommendations(
    w: &mut dyn Write,
    results: &[Recommendation],
    requested: usize,
    color: ColorMode,
) -> std::io::Result<()> {
    if results.is_empty() {
        writeln!(w, "No matching projects found.")?;
        return Ok(());
    }

    for (i, r) in results.iter().enumerate() {
        let rank = format!("{:>2}.", i + 1);
        let score = format!("{:.3}", r.score);
        if color.enabled() {
            writeln!(
                w,
                "{} {} {}",
                rank.bold().yellow(),
                r.title.bold(),
                score.green()
            )?;
            writeln!(w, "    {} | {}", r.theme, r.supervisors.dimmed())?;
        } else {
            writeln!(w, "{} {} {}", rank, r.title, score)?;
            writeln!(w, "    {} | {}", r.theme, r.supervisors)?;
        }
    }

    if results.len() < requested {
        let msg = format!(
            "There are only {} recommendation(s) available.",
            results.len()
        );
        if color.enabled() {
            writeln!(w, "{}", msg.dimmed())?;
        } else {
            writeln!(w, "{}", msg)?;
        }
    }
    Ok(())
}

/// Serialize recommendations in the requested export format.
pub fn export_recommendations(
    results: &[Recommendation],
    format: ExportFormat,
) -> Result<String, String> {
    match format {
        ExportFormat::Text => {
            let mut out = String::new();
            for (i, r) in results.iter().enumerate() {
                out.push_str(&format!(
                    "{}. {} | {} | {} | {:.4}\n",
                    i + 1,
                    r.title,
                    r.theme,
                    r.supervisors,
                    r.score
                ));
            }
            Ok(out)
        }
        ExportFormat::Json => {
            let items: Vec<serde_json::Value> = results
                .iter()
                .map(|r| {
                    serde_json::json!({
                        "title": r.title,
                        "theme": r.theme,
                        "supervisors": r.supervisors,
                        "score": r.score,
                    })
                })
                .collect();
            serde_json::to_string_pretty(&items).map_err(|e| e.to_string())
        }
        ExportFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            writer
                .write_record(["title", "theme", "supervisors", "score"])
                .map_err(|e| e.to_string())?;
            for r in results {
                writer
                    .write_record([
                        r.title.as_str(),
                        r.theme.as_str(),
                        r.supervisors.as_str(),
                        &format!("{:.6}", r.score),
                    ])
                    .map_err(|e| e.to_string())?;
            }
            let bytes = writer.into_inner().map_err(|e| e.to_string())?;
            String::from_utf8(bytes).map_err(|e| e.to_string())
        }
    }
}
