//! Parsing of raw trace payloads.
//!
//! A trace arrives as a JSON array of strings, one sample per string, each
//! holding `lat,lon,elevation,distance`. Some sources separate the fields
//! with `;` instead of `,`; both are accepted.

use pass_finder_profile_models::{RawTrace, TracePoint};

/// Number of fields in one trace sample.
const FIELDS_PER_SAMPLE: usize = 4;

/// Errors from acquiring or parsing a trace.
#[derive(Debug, thiserror::Error)]
pub enum TraceError {
    /// The trace provider has no data for this path.
    #[error("Trace unavailable: {0}")]
    Unavailable(String),

    /// Reading the trace failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The payload is not a JSON array of strings.
    #[error("Trace is not a JSON list of samples: {0}")]
    Json(#[from] serde_json::Error),

    /// A sample does not have exactly four fields.
    #[error("Sample {index} has {count} fields, expected {FIELDS_PER_SAMPLE}")]
    FieldCount {
        /// Position of the sample in the trace.
        index: usize,
        /// Number of fields found.
        count: usize,
    },

    /// A sample field is not a number.
    #[error("Sample {index} has a non-numeric field '{value}'")]
    Number {
        /// Position of the sample in the trace.
        index: usize,
        /// The offending field text.
        value: String,
    },

    /// The payload holds no samples.
    #[error("Trace has no samples")]
    Empty,
}

/// Parses a raw trace payload.
///
/// # Errors
///
/// Returns [`TraceError`] if the payload is not a JSON list of strings, is
/// empty, or any sample is not four numeric fields.
pub fn parse_trace(payload: &str) -> Result<RawTrace, TraceError> {
    let samples: Vec<String> = serde_json::from_str(payload)?;
    if samples.is_empty() {
        return Err(TraceError::Empty);
    }

    let points = samples
        .iter()
        .enumerate()
        .map(|(index, sample)| parse_sample(index, sample))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(RawTrace::new(points))
}

fn parse_sample(index: usize, sample: &str) -> Result<TracePoint, TraceError> {
    let fields: Vec<&str> = sample.split([',', ';']).map(str::trim).collect();
    if fields.len() != FIELDS_PER_SAMPLE {
        return Err(TraceError::FieldCount {
            index,
            count: fields.len(),
        });
    }

    let mut values = [0.0_f64; FIELDS_PER_SAMPLE];
    for (slot, field) in values.iter_mut().zip(&fields) {
        *slot = field
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| TraceError::Number {
                index,
                value: (*field).to_string(),
            })?;
    }

    let [lat, lon, elevation, distance] = values;
    Ok(TracePoint {
        lat,
        lon,
        elevation,
        distance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comma_separated_samples() {
        let trace = parse_trace(r#"["46.6,10.5,1200,0.0", "46.61,10.51,1250.5,0.8"]"#).unwrap();
        assert_eq!(trace.len(), 2);
        let p = trace.points[1];
        assert!((p.lat - 46.61).abs() < f64::EPSILON);
        assert!((p.elevation - 1250.5).abs() < f64::EPSILON);
        assert!((p.distance - 0.8).abs() < f64::EPSILON);
    }

    #[test]
    fn parses_semicolon_separated_samples() {
        let trace = parse_trace(r#"["46.6;10.5;1200;0.0", " 46.7 ; 10.6 ; 1300 ; 1.0 "]"#).unwrap();
        assert_eq!(trace.len(), 2);
        assert!((trace.points[1].lon - 10.6).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_non_numeric_fields() {
        let err = parse_trace(r#"["46.6,10.5,1200,0.0", "46.6,abc,1200,0.1"]"#).unwrap_err();
        match err {
            TraceError::Number { index, value } => {
                assert_eq!(index, 1);
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_wrong_field_count() {
        let err = parse_trace(r#"["46.6,10.5,1200"]"#).unwrap_err();
        assert!(matches!(err, TraceError::FieldCount { index: 0, count: 3 }));
    }

    #[test]
    fn rejects_html_payloads() {
        assert!(matches!(
            parse_trace("<html>not found</html>"),
            Err(TraceError::Json(_))
        ));
    }

    #[test]
    fn rejects_empty_trace() {
        assert!(matches!(parse_trace("[]"), Err(TraceError::Empty)));
    }
}
