use wtf_errors::{Classifier, HookJournal};

fn main() {
    println!("--- Hook Journal Example ---\n");

    let classifier = Classifier::new();
    let journal = HookJournal::new(3, 256);

    classifier.add_unknown_error_hook_failure(journal.as_hook());
    classifier.add_unknown_error_hook_failure(|failure| {
        failure.with_log(|log| println!("hooked: {}", log));
    });

    for attempt in 1..=5 {
        let failure = classifier
            .wrap(format!("attempt {} failed", attempt))
            .with_message("retrying");
        let _ = classifier.hook(failure);
    }

    println!("\nJournal keeps the last {} entries:", journal.capacity());
    for entry in journal.get_all() {
        println!("  [{}] {} ({:?})", entry.code, entry.message, entry.origin_kind);
    }
    println!("Evicted: {}", journal.eviction_count());
}
