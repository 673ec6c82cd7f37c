use std::fmt;
use std::io;
use wtf_errors::{CauseId, Classifier, Subject, define_failures};

define_failures! {
    STORAGE_DOWN = (503, "storage unavailable"),
}

#[derive(Debug)]
struct QuotaExceeded;

impl fmt::Display for QuotaExceeded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("quota exceeded")
    }
}

impl std::error::Error for QuotaExceeded {}

fn main() {
    println!("--- Default Cases Example ---\n");

    let classifier = Classifier::new();

    // Every io::Error presents as the storage template.
    classifier.add_default_case(wtf_errors::CauseKey::of::<io::Error>(), STORAGE_DOWN);

    // A domain error type gets its own code.
    classifier.add_default_case_for::<QuotaExceeded>("slow down", 429);

    // Declared tokens separate causes that share a type.
    let replica_lag = CauseId::declare("replica lag");
    classifier.add_default_case_failure(replica_lag, "data may be stale", 299);

    let cases = [
        classifier.wrap(io::Error::new(io::ErrorKind::ConnectionReset, "reset by peer")),
        classifier.wrap(Subject::error(QuotaExceeded)),
        classifier.wrap(Subject::caused_by(io::Error::other("lagging 4s"), replica_lag)),
        classifier.wrap(Subject::caused_by(io::Error::other("lagging 4s"), CauseId::declare("replica lag"))),
    ];

    for failure in &cases {
        let origin = failure
            .origin()
            .and_then(|o| o.as_error())
            .map(|e| e.to_string())
            .unwrap_or_default();
        println!("[{}] {:<22} origin: {}", failure.code(), failure.message(), origin);
    }
}
