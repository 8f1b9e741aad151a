//! Text and file fixtures.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use datum_guardian::{DataQualityEvaluator, EvaluatorConfig, TracingObserver};

const SENTENCES: [&str; 10] = [
    "The harbour authority dredged the outer channel during the spring tides",
    "Cargo volumes through the western terminal rose for the third year running",
    "Two new cranes were installed on the container berth in early autumn",
    "Pilots reported fewer delays once the revised tide tables were adopted",
    "The fishing fleet moved to the inner basin while repairs were completed",
    "Water quality samples stayed within the limits set by the regional board",
    "A short closure of the lock gates caused minor congestion at the entrance",
    "Staff training focused on mooring safety and emergency response drills",
    "Passenger ferries kept to their timetable through most of the winter",
    "The board approved funding to extend the quay wall next financial year",
];

/// Roughly 300 words under four headings. Clean for every structural and readiness rule.
pub fn harbour_report() -> String {
    let body = format!("{}.", SENTENCES.join(". "));
    format!(
        "# Harbour Annual Review\n\n## Operations\n\n{body}\n\n## Infrastructure\n\n{body}\n\n## Outlook\n\n{body}\n"
    )
}

/// Space separated four digit numbers with nothing in common with [`harbour_report`].
pub fn unrelated_text() -> String {
    (0..300)
        .map(|i| format!("{:04}", (i * 6151 + 17) % 10000))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn write(dir: &Path, name: &str, contents: impl AsRef<[u8]>) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create fixture directory");
    }
    fs::write(&path, contents).expect("write fixture");
    path
}

/// Evaluator without an embedding model, so similarity is always lexical.
pub fn lexical_evaluator(threshold: f64) -> DataQualityEvaluator {
    let config = EvaluatorConfig::default().with_threshold(threshold);
    DataQualityEvaluator::new(config, Arc::new(TracingObserver)).expect("valid config")
}
