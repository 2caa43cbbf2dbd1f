/// Before/after metrics of one shaping run
use crate::error::Result;
use crystal_audio::SignalMetrics;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricsReport {
    pub original: SignalMetrics,
    pub processed: SignalMetrics,
}

impl MetricsReport {
    pub fn compare(original: &[f32], processed: &[f32]) -> Result<Self> {
        Ok(Self {
            original: SignalMetrics::analyze(original)?,
            processed: SignalMetrics::analyze(processed)?,
        })
    }

    /// Crest factor gained by shaping, in dB
    pub fn crest_change_db(&self) -> f64 {
        self.processed.crest_factor_db - self.original.crest_factor_db
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for MetricsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "peak original: {}", self.original.peak)?;
        writeln!(f, "rms original: {}", self.original.rms)?;
        writeln!(f, "crest factor original: {}", self.original.crest_factor_db)?;
        writeln!(f, "peak processed: {}", self.processed.peak)?;
        writeln!(f, "rms processed: {}", self.processed.rms)?;
        write!(f, "crest factor processed: {}", self.processed.crest_factor_db)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compare_and_display() {
        let report = MetricsReport::compare(&[1.0, -1.0, 1.0, -1.0], &[2.0, 0.0, 0.0, 0.0]).unwrap();

        assert_eq!(report.original.crest_factor_db, 0.0);
        assert_eq!(report.processed.peak, 2.0);
        assert_eq!(report.processed.rms, 1.0);
        assert!((report.crest_change_db() - 6.0206).abs() < 0.001);

        let text = report.to_string();
        assert_eq!(text.lines().count(), 6);
        assert!(text.starts_with("peak original: 1\n"));
        assert!(text.contains("rms processed: 1\n"));
    }

    #[test]
    fn json_has_both_sides() {
        let report = MetricsReport::compare(&[0.5, -0.5], &[1.0, -1.0]).unwrap();

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

        assert_eq!(json["original"]["peak"], 0.5);
        assert_eq!(json["processed"]["rms"], 1.0);
    }

    #[test]
    fn empty_processed_block_is_an_error() {
        assert!(MetricsReport::compare(&[1.0], &[]).is_err());
    }
}
