#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! PDF and CSV export of prediction results.
//!
//! Both formats carry the same `category: value` pairs built by
//! [`report::Report`]. Exporting without a payload is refused with
//! [`ExportError::NoData`], whose message is shown to the user as-is.

pub mod csv_export;
pub mod pdf_export;
pub mod report;

use chrono::{NaiveDate, NaiveDateTime};
use crime_predict_prediction_models::ServerResults;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

pub use report::Report;

/// Errors that can occur while exporting.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// There is no prediction payload on the page.
    #[error("No data available to export")]
    NoData,

    /// CSV serialization failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// PDF generation failed.
    #[error("PDF error: {0}")]
    Pdf(String),

    /// Flushing an in-memory buffer failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Supported download formats.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ExportFormat {
    Pdf,
    Csv,
}

impl ExportFormat {
    /// Download file name for an export made on `date`.
    #[must_use]
    pub fn file_name(self, date: NaiveDate) -> String {
        let stem = match self {
            Self::Pdf => "crime_prediction_report",
            Self::Csv => "crime_prediction_data",
        };
        format!("{stem}_{}.{self}", date.format("%Y-%m-%d"))
    }

    #[must_use]
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Csv => "text/csv;charset=utf-8",
        }
    }
}

/// A rendered file ready for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Exports `results` in `format`.
///
/// `generated_at` is the local timestamp printed in the PDF header;
/// `date` (UTC) names the file.
///
/// # Errors
///
/// Returns [`ExportError::NoData`] when `results` is `None`, or a
/// rendering error from the chosen format.
pub fn export(
    format: ExportFormat,
    results: Option<&ServerResults>,
    crime_types: &[String],
    generated_at: NaiveDateTime,
    date: NaiveDate,
) -> Result<ExportFile, ExportError> {
    let Some(results) = results else {
        log::warn!("Export requested without prediction data");
        return Err(ExportError::NoData);
    };

    let report = Report::new(results, crime_types);
    let bytes = match format {
        ExportFormat::Pdf => pdf_export::write(&report, generated_at)?,
        ExportFormat::Csv => csv_export::write(&report)?,
    };

    let file_name = format.file_name(date);
    log::info!("Exported {} ({} bytes)", file_name, bytes.len());

    Ok(ExportFile {
        file_name,
        content_type: format.content_type(),
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crime_predict_prediction_models::{default_crime_types, parse_server_data};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    fn now() -> NaiveDateTime {
        date().and_hms_opt(9, 30, 0).unwrap()
    }

    #[test]
    fn file_names_carry_iso_date() {
        assert_eq!(
            ExportFormat::Pdf.file_name(date()),
            "crime_prediction_report_2026-10-17.pdf"
        );
        assert_eq!(
            ExportFormat::Csv.file_name(date()),
            "crime_prediction_data_2026-10-17.csv"
        );
    }

    #[test]
    fn missing_payload_is_refused() {
        for format in [ExportFormat::Pdf, ExportFormat::Csv] {
            let err = export(format, None, &default_crime_types(), now(), date()).unwrap_err();
            assert!(matches!(err, ExportError::NoData));
            assert_eq!(err.to_string(), "No data available to export");
        }
    }

    #[test]
    fn exports_csv_file() {
        let results = parse_server_data(Some(r#"{"poisson": {"prediction": 4}}"#));
        let file = export(
            ExportFormat::Csv,
            results.as_ref(),
            &default_crime_types(),
            now(),
            date(),
        )
        .unwrap();
        assert_eq!(file.content_type, "text/csv;charset=utf-8");
        assert_eq!(
            String::from_utf8(file.bytes).unwrap(),
            "Category,Value\nPredicted Crimes,4\n"
        );
    }

    #[test]
    fn format_parses_from_str() {
        assert_eq!("csv".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert!("xlsx".parse::<ExportFormat>().is_err());
    }
}
