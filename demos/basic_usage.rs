use std::io;
use wtf_errors::{self as wtf, Config, Failure, Result};

fn read_settings(path: &str) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| wtf::wrap(e).with_message(format!("reading {}", path)))
}

fn parse_port(raw: &str) -> Result<u16> {
    raw.trim().parse::<u16>().map_err(wtf::wrap)
}

fn main() {
    println!("--- Basic Usage Example ---\n");

    // 1. Anything error-shaped becomes a Failure with the default code.
    match read_settings("/definitely/not/here.toml") {
        Ok(_) => println!("Success!"),
        Err(failure) => {
            println!("1. [IO ERROR]");
            println!("   code:    {}", failure.code());
            println!("   message: {}", failure.message_string());
        }
    }

    // 2. Strings and arbitrary values are normalized too.
    let from_text = wtf::wrap("upstream sent garbage");
    let from_number = wtf::wrap(418_u32);
    println!("\n2. [TEXT]    {} ({})", from_text, from_text.code());
    println!("   [UNKNOWN] {} ({})", from_number, from_number.code());

    // 3. Reconfigure the fallback code and message.
    wtf::configure(Config::new(500, "Internal Failure").expect("non-empty message"));
    let fallback = wtf::default_failure();
    println!("\n3. [DEFAULT] {} ({})", fallback, fallback.code());

    // 4. Parse errors flow through `?` the same way.
    if let Err(failure) = parse_port("eighty") {
        println!("\n4. [PARSE]   {} ({})", failure, failure.code());
    }

    // 5. Wrapping a Failure is a no-op.
    let original: Failure = wtf::new("already normalized", 42);
    assert_eq!(wtf::wrap(original.clone()), original);
    println!("\n5. [NO-OP]   {}", wtf::wrap(io::Error::other("x")).message());
}
