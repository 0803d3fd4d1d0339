//! Résumé d'exécution (tableau ou JSON)

use crate::ReportFormat;
use anyhow::Result;
use gene2pic_core::RenderReport;
use gene2pic_utils::{entropy, gc_content, BaseComposition};
use serde::Serialize;
use std::path::Path;
use tabled::{Table, Tabled};

/// Tout ce qu'affiche le résumé final
#[derive(Debug, Serialize)]
pub struct RunSummary<'a> {
    pub input: &'a Path,
    pub output: &'a Path,
    #[serde(flatten)]
    pub render: &'a RenderReport,
    pub composition: BaseComposition,
    pub gc_content: f64,
    pub entropy: f64,
    pub save_secs: f64,
    pub total_secs: f64,
}

impl<'a> RunSummary<'a> {
    pub fn new(
        input: &'a Path,
        output: &'a Path,
        render: &'a RenderReport,
        composition: BaseComposition,
        save_secs: f64,
        total_secs: f64,
    ) -> Self {
        Self {
            input,
            output,
            render,
            gc_content: gc_content(&composition),
            entropy: entropy(&composition),
            composition,
            save_secs,
            total_secs,
        }
    }
}

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Métrique")]
    metric: &'static str,
    #[tabled(rename = "Valeur")]
    value: String,
}

fn row(metric: &'static str, value: impl ToString) -> SummaryRow {
    SummaryRow {
        metric,
        value: value.to_string(),
    }
}

fn seconds(secs: Option<f64>) -> String {
    secs.map_or_else(|| "-".to_string(), |s| format!("{:.3} s", s))
}

fn summary_rows(summary: &RunSummary<'_>) -> Vec<SummaryRow> {
    let render = summary.render;
    let timings = &render.timings;

    vec![
        row("Entrée", summary.input.display()),
        row("Octets lus", render.input_bytes),
        row("Bases valides", render.valid_bases),
        row("Octets ignorés", render.discarded_bytes),
        row("Grille", format!("{0}x{0}", render.side)),
        row("Cellules noires", render.padding),
        row("Agrandissement", format!("x{}", render.scale)),
        row("Image", format!("{0}x{0} px", render.image_side)),
        row("Serpentin", if render.serpentine { "oui" } else { "non" }),
        row(
            "A / C / G / T",
            format!(
                "{} / {} / {} / {}",
                summary.composition.count_a,
                summary.composition.count_c,
                summary.composition.count_g,
                summary.composition.count_t
            ),
        ),
        row("GC", format!("{:.1}%", summary.gc_content * 100.0)),
        row("Entropie", format!("{:.3} bits/base", summary.entropy)),
        row("Normalisation", seconds(timings.normalize)),
        row("Serpentin (durée)", seconds(timings.serpentine)),
        row("Couleurs", seconds(Some(timings.colour))),
        row("Agrandissement (durée)", seconds(timings.upscale)),
        row("Écriture", seconds(Some(summary.save_secs))),
        row("Total", seconds(Some(summary.total_secs))),
        row("Sortie", summary.output.display()),
    ]
}

/// Affiche le résumé dans le format demandé
pub fn print_report(summary: &RunSummary<'_>, format: ReportFormat) -> Result<()> {
    match format {
        ReportFormat::Table => {
            println!();
            println!("{}", Table::new(summary_rows(summary)));
        }
        ReportFormat::Json => {
            println!("{}", serde_json::to_string_pretty(summary)?);
        }
        ReportFormat::Quiet => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gene2pic_core::{NucleotideSequence, RenderConfig, Renderer};

    fn report() -> (RenderReport, BaseComposition) {
        let sequence = NucleotideSequence::from_bytes(b"acgtACGT\nuuuu").unwrap();
        let composition = BaseComposition::from_sequence(&sequence);
        let image = Renderer::new(RenderConfig::default())
            .unwrap()
            .render(sequence)
            .unwrap();
        (image.report, composition)
    }

    #[test]
    fn test_json_summary() {
        let (render, composition) = report();
        let summary = RunSummary::new(
            Path::new("in.txt"),
            Path::new("GenePic.png"),
            &render,
            composition,
            0.5,
            1.0,
        );

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["valid_bases"], 12);
        assert_eq!(json["side"], 4);
        assert_eq!(json["composition"]["count_t"], 6);
        assert_eq!(json["output"], "GenePic.png");
        assert!(json["timings"]["serpentine"].is_null());
    }

    #[test]
    fn test_table_rows() {
        let (render, composition) = report();
        let summary = RunSummary::new(
            Path::new("in.txt"),
            Path::new("out.png"),
            &render,
            composition,
            0.0,
            0.0,
        );

        let table = Table::new(summary_rows(&summary)).to_string();
        assert!(table.contains("Bases valides"));
        assert!(table.contains("4x4"));
        assert!(table.contains("33.3%"));
    }
}
