//! Report writers.
//!
//! One writer per output format behind a common trait. JSON output is the
//! machine-readable report verbatim; terminal and markdown renderings are
//! presentational and may round.

use crate::core::TcoReport;
use crate::formatting::{format_count, format_currency};
use colored::*;
use comfy_table::{presets, Table};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &TcoReport) -> anyhow::Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &TcoReport) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        self.writer.write_all(json.as_bytes())?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_report(&mut self, report: &TcoReport) -> anyhow::Result<()> {
        self.write_header()?;
        self.write_summary(report)?;
        self.write_health(report)?;
        self.write_breakdown(report)?;
        self.write_scenarios(report)?;
        self.write_recommendations(report)?;
        Ok(())
    }
}

impl<W: Write> MarkdownWriter<W> {
    fn write_header(&mut self) -> anyhow::Result<()> {
        writeln!(self.writer, "# Estate TCO Analysis Report")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Generated: {}",
            chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(self.writer, "Version: {}", env!("CARGO_PKG_VERSION"))?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_summary(&mut self, report: &TcoReport) -> anyhow::Result<()> {
        let s = &report.summary;
        writeln!(self.writer, "## Executive Summary")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Metric | Value |")?;
        writeln!(self.writer, "|--------|-------|")?;
        writeln!(
            self.writer,
            "| Total Managed Nodes | {} |",
            format_count(s.total_nodes)
        )?;
        writeln!(
            self.writer,
            "| Active Cookbooks | {} |",
            format_count(s.active_cookbooks)
        )?;
        writeln!(self.writer, "| Annual TCO | {} |", format_currency(s.annual_tco))?;
        writeln!(
            self.writer,
            "| Cost per Node | {} |",
            format_currency(s.per_node_cost)
        )?;
        writeln!(
            self.writer,
            "| Cost per Cookbook | {} |",
            format_currency(s.per_cookbook_cost)
        )?;
        writeln!(self.writer, "| Health Score | {} |", s.health_score)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_health(&mut self, report: &TcoReport) -> anyhow::Result<()> {
        let h = &report.health_metrics;
        writeln!(self.writer, "## Health Metrics")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "- Cookbook ratio: {:.1} per 1,000 nodes",
            h.cookbook_ratio
        )?;
        writeln!(self.writer, "- Cookbooks per FTE: {:.0}", h.cookbooks_per_fte)?;
        writeln!(self.writer, "- Debt multiplier: {:.2}x", h.debt_multiplier)?;
        if !h.issues.is_empty() {
            writeln!(self.writer)?;
            for issue in &h.issues {
                writeln!(self.writer, "- ⚠️ {issue}")?;
            }
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_breakdown(&mut self, report: &TcoReport) -> anyhow::Result<()> {
        let c = &report.cost_breakdown;
        writeln!(self.writer, "## Annual Cost Breakdown")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Line | Annual Cost |")?;
        writeln!(self.writer, "|------|-------------|")?;
        for (label, value) in breakdown_lines(report) {
            writeln!(self.writer, "| {label} | {} |", format_currency(value))?;
        }
        writeln!(
            self.writer,
            "| **Total** | **{}** |",
            format_currency(c.total_annual_tco())
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_scenarios(&mut self, report: &TcoReport) -> anyhow::Result<()> {
        writeln!(self.writer, "## Migration Scenarios (3-Year Analysis)")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "| Platform | Migration | 3-Yr Total | Breakeven | NPV | Risk |"
        )?;
        writeln!(
            self.writer,
            "|----------|-----------|------------|-----------|-----|------|"
        )?;
        for (key, scenario) in &report.scenarios {
            writeln!(
                self.writer,
                "| {key} | {} | {} | {} | {} | {} |",
                format_currency(scenario.migration_cost),
                format_currency(scenario.three_year_total),
                breakeven_label(scenario.breakeven_months),
                format_currency(scenario.npv_3year),
                scenario.risk_score
            )?;
        }
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Current estate over the same horizon: {}",
            format_currency(report.summary.annual_tco * 3.0)
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_recommendations(&mut self, report: &TcoReport) -> anyhow::Result<()> {
        if report.recommendations.is_empty() {
            return Ok(());
        }
        writeln!(self.writer, "## Recommendations")?;
        writeln!(self.writer)?;
        for (i, rec) in report.recommendations.iter().enumerate() {
            writeln!(self.writer, "{}. {rec}", i + 1)?;
        }
        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &TcoReport) -> anyhow::Result<()> {
        let w = &mut self.writer;

        writeln!(w, "{}", "Estate TCO Analysis Report".bold().blue())?;
        writeln!(w, "{}", "==========================".blue())?;
        writeln!(w)?;

        let s = &report.summary;
        writeln!(w, "{} Summary:", "📊".bold())?;
        writeln!(w, "  Total managed nodes: {}", format_count(s.total_nodes))?;
        writeln!(w, "  Active cookbooks:    {}", format_count(s.active_cookbooks))?;
        writeln!(w, "  Annual TCO:          {}", format_currency(s.annual_tco))?;
        writeln!(w, "  Cost per node:       {}", format_currency(s.per_node_cost))?;
        writeln!(
            w,
            "  Cost per cookbook:   {}",
            format_currency(s.per_cookbook_cost)
        )?;
        writeln!(w, "  Health score:        {}", health_label(report))?;
        writeln!(w)?;

        let h = &report.health_metrics;
        writeln!(w, "{} Health:", "🏥".bold())?;
        writeln!(w, "  Cookbook ratio:    {:.1} per 1,000 nodes", h.cookbook_ratio)?;
        writeln!(w, "  Cookbooks per FTE: {:.0}", h.cookbooks_per_fte)?;
        writeln!(w, "  Debt multiplier:   {:.2}x", h.debt_multiplier)?;
        for issue in &h.issues {
            writeln!(w, "    {} {issue}", "⚠️".yellow())?;
        }
        writeln!(w)?;

        writeln!(w, "{} Annual cost breakdown:", "💰".bold())?;
        for (label, value) in breakdown_lines(report) {
            writeln!(w, "  {label:<22} {:>10}", format_currency(value))?;
        }
        let c = &report.cost_breakdown;
        writeln!(w, "  {:<22} {:>10}", "Direct subtotal", format_currency(c.direct_costs()))?;
        writeln!(w, "  {:<22} {:>10}", "Labor subtotal", format_currency(c.labor_costs()))?;
        writeln!(
            w,
            "  {:<22} {:>10}",
            "TOTAL".bold(),
            format_currency(c.total_annual_tco()).bold()
        )?;
        writeln!(w)?;

        writeln!(w, "{} Migration scenarios (3-year analysis):", "🔄".bold())?;
        let mut table = Table::new();
        table.load_preset(presets::UTF8_FULL_CONDENSED);
        table.set_header(vec![
            "Platform",
            "Migration",
            "3-Yr Total",
            "Breakeven",
            "NPV",
            "Risk",
        ]);
        for (key, scenario) in &report.scenarios {
            table.add_row(vec![
                key.clone(),
                format_currency(scenario.migration_cost),
                format_currency(scenario.three_year_total),
                breakeven_label(scenario.breakeven_months),
                format_currency(scenario.npv_3year),
                scenario.risk_score.to_string(),
            ]);
        }
        writeln!(w, "{table}")?;
        writeln!(
            w,
            "  Current estate (3-year): {}",
            format_currency(report.summary.annual_tco * 3.0)
        )?;
        writeln!(w)?;

        if !report.recommendations.is_empty() {
            writeln!(w, "{} Recommendations:", "📋".bold())?;
            for (i, rec) in report.recommendations.iter().enumerate() {
                writeln!(w, "  {}. {rec}", i + 1)?;
            }
        }

        Ok(())
    }
}

fn health_label(report: &TcoReport) -> ColoredString {
    use crate::core::HealthScore;
    let label = report.summary.health_score.as_str().to_uppercase();
    match report.summary.health_score {
        HealthScore::Healthy => label.green(),
        HealthScore::Warning => label.yellow(),
        HealthScore::Critical => label.red().bold(),
    }
}

fn breakdown_lines(report: &TcoReport) -> [(&'static str, f64); 9] {
    let c = &report.cost_breakdown;
    [
        ("Licensing", c.licensing_cost),
        ("Infrastructure", c.infrastructure_cost),
        ("Platform labor", c.platform_labor_cost),
        ("Distributed labor", c.distributed_labor_cost),
        ("Incident response", c.incident_cost),
        ("Technical debt tax", c.technical_debt_tax),
        ("Training", c.training_cost),
        ("Contractors", c.contractor_cost),
        ("Opportunity cost", c.opportunity_cost),
    ]
}

fn breakeven_label(months: Option<f64>) -> String {
    match months {
        Some(m) => format!("{m:.0} mo"),
        None => "N/A".to_string(),
    }
}

/// Build a writer for `format`, targeting `output` or stdout.
pub fn create_writer(
    format: OutputFormat,
    output: Option<&Path>,
) -> anyhow::Result<Box<dyn OutputWriter>> {
    match output {
        Some(path) => {
            let file = BufWriter::new(File::create(path)?);
            Ok(match format {
                OutputFormat::Json => Box::new(JsonWriter::new(file)),
                OutputFormat::Markdown => Box::new(MarkdownWriter::new(file)),
                OutputFormat::Terminal => Box::new(TerminalWriter::new(file)),
            })
        }
        None => {
            let stdout = std::io::stdout();
            Ok(match format {
                OutputFormat::Json => Box::new(JsonWriter::new(stdout)),
                OutputFormat::Markdown => Box::new(MarkdownWriter::new(stdout)),
                OutputFormat::Terminal => Box::new(TerminalWriter::new(stdout)),
            })
        }
    }
}
