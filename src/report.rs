//! Full analysis pass over one image and its plain-text rendering.
//!
//! The tune, table and definition analyses share nothing but the borrowed
//! image bytes, so table detection and definition resolution run side by
//! side on the rayon pool.

use crate::analysis::{analyze_space_with, find_tables_with, SpaceUsage, TableCandidate};
use crate::config::AnalysisConfig;
use crate::core::{Region, RomImage, RomSize};
use crate::definitions::{
    interpret_with, resolve_with_diagnostics, DefinitionSchema, Interpretation,
    ResolveDiagnostic, ResolvedDefinition,
};
use serde::Serialize;
use std::fmt;
use tracing::info;

/// Space usage of one tune.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TuneReport {
    /// 1-based tune number
    pub number: usize,
    pub region: Region,
    pub usage: SpaceUsage,
}

/// A resolved field with its interpreted value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DefinitionReport {
    #[serde(flatten)]
    pub resolved: ResolvedDefinition,
    pub value: Interpretation,
}

/// Everything one analysis pass produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RomReport {
    pub image_size: RomSize,
    pub image_len: usize,
    pub tunes: Vec<TuneReport>,
    pub tables: Vec<TableCandidate>,
    pub definitions: Vec<DefinitionReport>,
    pub diagnostics: Vec<ResolveDiagnostic>,
}

/// Run every analysis over `image`.
pub fn analyze(image: &RomImage, schema: &DefinitionSchema, config: &AnalysisConfig) -> RomReport {
    let span = crate::span_trace!("analyze", image_len = image.len());
    let _guard = span.enter();
    let buffer = image.as_bytes();

    let tunes: Vec<TuneReport> = image
        .tune_regions(config.tune_size)
        .into_iter()
        .enumerate()
        .map(|(i, region)| TuneReport {
            number: i + 1,
            region,
            usage: analyze_space_with(buffer, region, config.padding_byte),
        })
        .collect();

    let (tables, resolution) = rayon::join(
        || find_tables_with(buffer, &config.tables, config.padding_byte),
        || resolve_with_diagnostics(buffer, schema),
    );

    let definitions: Vec<DefinitionReport> = resolution
        .definitions
        .into_iter()
        .map(|resolved| {
            let value = interpret_with(&resolved, &config.interpret);
            DefinitionReport { resolved, value }
        })
        .collect();

    info!(
        tunes = tunes.len(),
        tables = tables.len(),
        definitions = definitions.len(),
        skipped = resolution.diagnostics.len(),
        "Analysis complete"
    );

    RomReport {
        image_size: image.size(),
        image_len: image.len(),
        tunes,
        tables,
        definitions,
        diagnostics: resolution.diagnostics,
    }
}

/// Options for [`render_text`].
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Include a grid dump of every detected table
    pub show_tables: bool,
    /// Row width used for table dumps
    pub row_size: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            show_tables: false,
            row_size: 16,
        }
    }
}

/// Plain-text view of a report. Table dumps read cells from `image`.
pub struct TextReport<'a> {
    report: &'a RomReport,
    image: &'a RomImage,
    options: &'a RenderOptions,
}

impl<'a> TextReport<'a> {
    pub fn new(report: &'a RomReport, image: &'a RomImage, options: &'a RenderOptions) -> Self {
        Self {
            report,
            image,
            options,
        }
    }

    fn write_tables(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Tables found: {}", self.report.tables.len())?;
        for (i, table) in self.report.tables.iter().enumerate() {
            writeln!(
                f,
                "\nTable {} (0x{:04X} - 0x{:04X}), {} columns",
                i + 1,
                table.start,
                table.end,
                table.column_count
            )?;
            write!(f, "Offset")?;
            for col in 1..=table.column_count {
                write!(f, " {col:>3}")?;
            }
            writeln!(f)?;
            let rows = table.rows(self.image.as_bytes(), self.options.row_size);
            for (row_index, row) in rows.iter().enumerate() {
                write!(f, "0x{:04X}", table.start + row_index * self.options.row_size)?;
                for cell in row {
                    match cell {
                        Some(b) => write!(f, "  {b:02X}")?,
                        None => write!(f, "  --")?,
                    }
                }
                writeln!(f)?;
            }
        }
        writeln!(f)
    }
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.report;
        writeln!(f, "Total file size: {} bytes", report.image_len)?;

        for tune in &report.tunes {
            writeln!(f, "\nTune {} ({}):", tune.number, tune.region)?;
            writeln!(f, "  Used space: {} bytes", tune.usage.used_bytes)?;
            writeln!(f, "  Leftover space: {} bytes", tune.usage.leftover_bytes)?;
        }
        writeln!(f)?;

        if self.options.show_tables {
            self.write_tables(f)?;
        }

        writeln!(f, "Identified Definitions:")?;
        for def in &report.definitions {
            let fields = &def.resolved.fields;
            writeln!(f, "----")?;
            writeln!(f, "{} [{}]", fields.description, def.resolved.route)?;
            write!(
                f,
                "  Address: 0x{:X} ({} byte{})",
                def.resolved.offset,
                fields.byte_length,
                if fields.byte_length > 1 { "s" } else { "" }
            )?;
            if let Some(bits) = fields.bit_width {
                write!(f, " ({bits}-bit)")?;
            }
            writeln!(f)?;
            writeln!(f, "  Notes: {}", fields.notes)?;
            for line in def.value.to_string().lines() {
                writeln!(f, "  {line}")?;
            }
        }

        if !report.diagnostics.is_empty() {
            writeln!(f, "\nSkipped definitions:")?;
            for diagnostic in &report.diagnostics {
                writeln!(f, "  {diagnostic}")?;
            }
        }
        Ok(())
    }
}

/// Render a report as plain text.
pub fn render_text(report: &RomReport, image: &RomImage, options: &RenderOptions) -> String {
    TextReport::new(report, image, options).to_string()
}
