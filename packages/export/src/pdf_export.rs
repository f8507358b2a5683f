//! A4 PDF report rendering.
//!
//! Layout is computed first as a list of [`PlacedLine`]s measured from the
//! top of the page, then drawn with `printpdf`'s built-in Helvetica.

use chrono::NaiveDateTime;
use printpdf::{BuiltinFont, Mm, PdfDocument};

use crate::ExportError;
use crate::report::Report;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const LEFT_MARGIN_MM: f32 = 20.0;
const TOP_MM: f32 = 20.0;
/// Distribution rows past this offset continue on a new page.
const PAGE_BREAK_MM: f32 = 270.0;

const TITLE: &str = "Crime Prediction Report";

/// One line of text at a position on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    /// Zero-based page index.
    pub page: usize,
    /// Distance from the top edge.
    pub top_mm: f32,
    pub font_size: f32,
    pub text: String,
}

/// Formats a timestamp like a US-English locale string,
/// e.g. `3/7/2026, 2:05:09 PM`.
#[must_use]
pub fn format_generated_at(at: NaiveDateTime) -> String {
    at.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}

/// Places every line of the report.
#[must_use]
pub fn layout(report: &Report, generated_at: NaiveDateTime) -> Vec<PlacedLine> {
    let mut lines = Vec::new();
    let mut page = 0;
    let mut y = TOP_MM;

    let mut place = |page: usize, y: f32, font_size: f32, text: String| {
        lines.push(PlacedLine {
            page,
            top_mm: y,
            font_size,
            text,
        });
    };

    place(page, y, 16.0, TITLE.to_string());
    y += 10.0;

    place(
        page,
        y,
        10.0,
        format!("Generated on: {}", format_generated_at(generated_at)),
    );
    y += 15.0;

    for entry in &report.summary {
        place(page, y, 12.0, format!("{}: {}", entry.label, entry.value));
        y += 10.0;
    }

    if let Some(cluster) = &report.cluster {
        place(page, y, 12.0, format!("Cluster: {}", cluster.cluster));
        y += 10.0;
        place(page, y, 12.0, "Crime Distribution:".to_string());
        y += 5.0;

        for entry in &cluster.distribution {
            if y > PAGE_BREAK_MM {
                page += 1;
                y = TOP_MM;
            }
            place(page, y, 12.0, format!("  {}: {}", entry.label, entry.value));
            y += 7.0;
        }
    }

    lines
}

/// Renders the report to PDF bytes.
///
/// # Errors
///
/// Returns [`ExportError::Pdf`] if the font cannot be embedded or the
/// document fails to serialize.
pub fn write(report: &Report, generated_at: NaiveDateTime) -> Result<Vec<u8>, ExportError> {
    let placed = layout(report, generated_at);

    let (doc, first_page, first_layer) = PdfDocument::new(
        TITLE,
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;

    let mut current_page = 0;
    let mut layer = doc.get_page(first_page).get_layer(first_layer);

    for line in placed {
        while current_page < line.page {
            let (page, page_layer) =
                doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
            layer = doc.get_page(page).get_layer(page_layer);
            current_page += 1;
        }
        layer.use_text(
            line.text,
            line.font_size,
            Mm(LEFT_MARGIN_MM),
            Mm(PAGE_HEIGHT_MM - line.top_mm),
            &font,
        );
    }

    log::debug!("Rendered PDF report with {} page(s)", current_page + 1);

    doc.save_to_bytes()
        .map_err(|e| ExportError::Pdf(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crime_predict_prediction_models::parse_server_data;

    fn generated_at() -> NaiveDateTime {
        chrono::NaiveDate::from_ymd_opt(2026, 3, 7)
            .unwrap()
            .and_hms_opt(14, 5, 9)
            .unwrap()
    }

    fn report(json: &str, crime_types: &[String]) -> Report {
        Report::new(&parse_server_data(Some(json)).unwrap(), crime_types)
    }

    #[test]
    fn formats_locale_style_timestamp() {
        assert_eq!(format_generated_at(generated_at()), "3/7/2026, 2:05:09 PM");
    }

    #[test]
    fn header_and_summary_positions() {
        let lines = layout(
            &report(r#"{"poisson": {"prediction": 2}, "svm": {"high_risk": 0.5}}"#, &[]),
            generated_at(),
        );
        let texts: Vec<(&str, f32)> = lines.iter().map(|l| (l.text.as_str(), l.top_mm)).collect();
        assert_eq!(
            texts,
            vec![
                ("Crime Prediction Report", 20.0),
                ("Generated on: 3/7/2026, 2:05:09 PM", 30.0),
                ("Predicted Crimes: 2", 45.0),
                ("Risk Probability: 50.0%", 55.0),
            ]
        );
        assert!((lines[0].font_size - 16.0).abs() < f32::EPSILON);
    }

    #[test]
    fn long_distribution_breaks_pages() {
        let shares = vec!["0.01"; 40].join(",");
        let crime_types: Vec<String> = (0..40).map(|i| format!("TYPE {i}")).collect();
        let lines = layout(
            &report(
                &format!(r#"{{"kmeans": {{"cluster": 1, "crime_distribution": [{shares}]}}}}"#),
                &crime_types,
            ),
            generated_at(),
        );

        assert!(lines.iter().any(|l| l.page == 1));
        assert!(lines.iter().all(|l| l.top_mm <= PAGE_BREAK_MM + 7.0));
        let first_on_next = lines.iter().find(|l| l.page == 1).unwrap();
        assert!((first_on_next.top_mm - TOP_MM).abs() < f32::EPSILON);
        assert!(first_on_next.text.starts_with("  TYPE "));
    }

    #[test]
    fn writes_pdf_bytes() {
        let bytes = write(
            &report(r#"{"kde": {"intensity": 0.3}}"#, &[]),
            generated_at(),
        )
        .unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
