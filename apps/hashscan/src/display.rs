//! Output rendering and formatting

use crate::scan::ScanReport;
use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Color, ContentArrangement, Table};
use console::{Style, Term};
use hashscan_types::{AnalysisResult, ColorChoice, Hash, OutputFormat};
use std::io;

/// Output renderer for CLI results
#[derive(Clone)]
pub struct OutputRenderer {
    format: OutputFormat,
    color_choice: ColorChoice,
    term: Term,
}

impl OutputRenderer {
    pub fn new(format: OutputFormat, color_choice: ColorChoice) -> Self {
        Self {
            format,
            color_choice,
            term: Term::stderr(),
        }
    }

    /// Check if color output is supported
    pub fn supports_color(&self) -> bool {
        match self.color_choice {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => self.term.features().colors_supported(),
        }
    }

    /// Report one verdict as soon as it arrives (tty mode only)
    pub fn render_progress(&self, hash: &Hash, result: &AnalysisResult) -> io::Result<()> {
        if self.format != OutputFormat::Tty {
            return Ok(());
        }
        let label = self.style_verdict(result, &format!("{:<11}", verdict_text(result)));
        self.term.write_line(&format!("{label} {hash}"))
    }

    /// Render the final report
    pub fn render_report(&self, report: &ScanReport) -> io::Result<()> {
        match self.format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(report).map_err(io::Error::other)?;
                println!("{json}");
                Ok(())
            }
            OutputFormat::Plain => {
                for entry in &report.results {
                    println!("{}\t{}", entry.hash, entry.result.label());
                }
                Ok(())
            }
            OutputFormat::Tty => self.render_table(report),
        }
    }

    fn render_table(&self, report: &ScanReport) -> io::Result<()> {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("Hash").add_attribute(Attribute::Bold),
                Cell::new("Verdict").add_attribute(Attribute::Bold),
                Cell::new("Detections").add_attribute(Attribute::Bold),
                Cell::new("Name").add_attribute(Attribute::Bold),
            ]);

        for entry in &report.results {
            let detail = entry.result.detail();
            let detections = detail.map_or_else(String::new, |report| {
                let stats = report.data.attributes.last_analysis_stats;
                format!("{}/{}", stats.malicious, stats.total())
            });
            let name = detail
                .and_then(|report| report.data.attributes.meaningful_name.clone())
                .unwrap_or_default();

            table.add_row(vec![
                Cell::new(entry.hash.as_str()),
                self.format_verdict(&entry.result),
                Cell::new(detections),
                Cell::new(name),
            ]);
        }

        println!("{table}");

        let tally = &report.tally;
        println!();
        println!(
            "{} checked: {} clean, {} threats, {} errors ({} rounds)",
            tally.total, tally.clean, tally.threats, tally.errors, report.rounds
        );
        if tally.errors > 0 {
            println!("Hashes with errors were not cached; run again to retry them.");
        }
        Ok(())
    }

    fn format_verdict(&self, result: &AnalysisResult) -> Cell {
        let cell = Cell::new(verdict_text(result));
        if !self.supports_color() {
            return cell;
        }
        match result {
            AnalysisResult::VirusFound { .. } => cell.fg(Color::Red).add_attribute(Attribute::Bold),
            AnalysisResult::NoThreat => cell.fg(Color::Green),
            AnalysisResult::Error => cell.fg(Color::Yellow),
            AnalysisResult::Pending => cell,
        }
    }

    fn style_verdict(&self, result: &AnalysisResult, text: &str) -> String {
        if !self.supports_color() {
            return text.to_string();
        }
        let style = match result {
            AnalysisResult::VirusFound { .. } => Style::new().red().bold(),
            AnalysisResult::NoThreat => Style::new().green(),
            AnalysisResult::Error => Style::new().yellow(),
            AnalysisResult::Pending => Style::new().dim(),
        };
        style.apply_to(text).to_string()
    }
}

fn verdict_text(result: &AnalysisResult) -> &'static str {
    match result {
        AnalysisResult::Pending => "pending",
        AnalysisResult::NoThreat => "clean",
        AnalysisResult::VirusFound { .. } => "THREAT",
        AnalysisResult::Error => "error",
    }
}
