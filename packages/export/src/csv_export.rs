//! `Category,Value` CSV rendering.

use crate::ExportError;
use crate::report::Report;

/// Writes the report as CSV: the summary rows, then `Cluster` and one row
/// per distribution entry.
///
/// # Errors
///
/// Returns [`ExportError::Csv`] or [`ExportError::Io`] if writing to the
/// in-memory buffer fails.
pub fn write(report: &Report) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["Category", "Value"])?;

    for entry in &report.summary {
        writer.write_record([entry.label.as_str(), entry.value.as_str()])?;
    }

    if let Some(cluster) = &report.cluster {
        writer.write_record(["Cluster", cluster.cluster.to_string().as_str()])?;
        for entry in &cluster.distribution {
            writer.write_record([entry.label.as_str(), entry.value.as_str()])?;
        }
    }

    writer.into_inner().map_err(|e| ExportError::Io(e.into_error()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crime_predict_prediction_models::parse_server_data;

    #[test]
    fn writes_all_sections() {
        let results = parse_server_data(Some(
            r#"{
                "poisson": {"prediction": 7},
                "kde": {"intensity": 0.125},
                "svm": {"high_risk": 0.9},
                "kmeans": {"cluster": 2, "crime_distribution": [0.6, 0.4]}
            }"#,
        ))
        .unwrap();
        let crime_types = vec!["THEFT".to_string(), "CRIM SEXUAL ASSAULT".to_string()];
        let bytes = write(&Report::new(&results, &crime_types)).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert_eq!(
            text,
            "Category,Value\n\
             Predicted Crimes,7\n\
             Hotspot Intensity,12.5%\n\
             Risk Probability,90.0%\n\
             Cluster,2\n\
             THEFT,60.0%\n\
             CRIM SEXUAL ASSAULT,40.0%\n"
        );
    }

    #[test]
    fn labels_with_commas_are_quoted() {
        let results =
            parse_server_data(Some(r#"{"kmeans": {"cluster": 0, "crime_distribution": [1.0]}}"#))
                .unwrap();
        let crime_types = vec!["THEFT, PETTY".to_string()];
        let text = String::from_utf8(write(&Report::new(&results, &crime_types)).unwrap()).unwrap();
        assert!(text.contains("\"THEFT, PETTY\",100.0%"));
    }
}
