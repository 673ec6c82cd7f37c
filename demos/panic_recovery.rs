use std::panic;
use wtf_errors::{Classifier, Failure, Subject};

fn risky(step: u32) {
    match step {
        0 => Failure::new("ledger out of balance", 409).with_message("step 0").panic(),
        1 => panic!("index {} out of bounds", step),
        _ => panic::panic_any(step),
    }
}

fn main() {
    println!("--- Panic Recovery Example ---\n");

    // Keep the default hook from printing each payload twice.
    panic::set_hook(Box::new(|_| {}));

    let classifier = Classifier::new();
    for step in 0..3 {
        let payload = match panic::catch_unwind(|| risky(step)) {
            Ok(()) => continue,
            Err(payload) => payload,
        };
        let failure = classifier.wrap(Subject::from_any(payload));
        println!("step {}: [{}] {}", step, failure.code(), failure.message_string());
    }
}
