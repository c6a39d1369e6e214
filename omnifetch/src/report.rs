//! Benchmark summary written to stdout.

use std::io::Write;
use std::time::Duration;

use serde::{Serialize, Serializer};

use crate::HarnessError;

/// Outcome of the execute phase.
///
/// Serializes as
/// `{"sum": .., "average": .., "duration": <ms>, "nStrings": .., "bufferSize": ..}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub sum: f64,
    /// `sum / n_strings`; NaN (written as `null`) when nothing was sampled.
    pub average: f64,
    #[serde(serialize_with = "serialize_millis")]
    pub duration: Duration,
    pub n_strings: usize,
    pub buffer_size: usize,
}

fn serialize_millis<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
}

impl Report {
    pub fn new(sum: f64, n_strings: usize, buffer_size: usize, duration: Duration) -> Self {
        Self {
            sum,
            average: sum / n_strings as f64,
            duration,
            n_strings,
            buffer_size,
        }
    }

    /// Lookups per second over the timed phase.
    pub fn throughput(&self) -> f64 {
        let secs = self.duration.as_secs_f64();
        if secs > 0.0 {
            self.n_strings as f64 / secs
        } else {
            0.0
        }
    }

    pub fn to_json(&self) -> Result<String, HarnessError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the pretty JSON object followed by a newline.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<(), HarnessError> {
        serde_json::to_writer_pretty(&mut writer, self)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_average() {
        let r = Report::new(45.0, 10, 4, Duration::from_millis(3));
        assert_eq!(r.average, 4.5);
    }

    #[test]
    fn test_json_fields() {
        let r = Report::new(12.5, 5, 4, Duration::from_micros(7_900));
        let v: Value = serde_json::from_str(&r.to_json().unwrap()).unwrap();
        let obj = v.as_object().unwrap();

        let mut keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["average", "bufferSize", "duration", "nStrings", "sum"]);

        assert_eq!(v["sum"], 12.5);
        assert_eq!(v["average"], 2.5);
        assert_eq!(v["duration"], 7);
        assert_eq!(v["nStrings"], 5);
        assert_eq!(v["bufferSize"], 4);
    }

    #[test]
    fn test_empty_sample_average_is_null() {
        let r = Report::new(0.0, 0, 4, Duration::ZERO);
        assert!(r.average.is_nan());
        let v: Value = serde_json::from_str(&r.to_json().unwrap()).unwrap();
        assert!(v["average"].is_null());
        assert_eq!(r.throughput(), 0.0);
    }

    #[test]
    fn test_write_to_ends_with_newline() {
        let r = Report::new(1.0, 1, 1, Duration::from_millis(1));
        let mut out = Vec::new();
        r.write_to(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with("}\n"));
        assert!(text.contains("\"nStrings\": 1"));
    }

    #[test]
    fn test_throughput() {
        let r = Report::new(0.0, 1000, 8, Duration::from_millis(500));
        assert_eq!(r.throughput(), 2000.0);
    }
}
