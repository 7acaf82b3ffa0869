//! Version command implementation.

use kanon::judge::HIGH_RISK_THRESHOLD;
use kanon::markers::{DEFAULT_FULL_SUPPRESSION, DEFAULT_PARTIAL_GENERALIZATION};

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn run() {
    println!("kanon {VERSION}");
    println!();
    println!("k-anonymity evaluation for anonymized tables.");
    println!();
    println!("Defaults:");
    println!("  Suppression marker:      {DEFAULT_FULL_SUPPRESSION}");
    println!("  Generalization marker:   {DEFAULT_PARTIAL_GENERALIZATION}");
    println!("  High-risk threshold:     {:.0}%", HIGH_RISK_THRESHOLD * 100.0);
    println!();
    println!("Build info:");
    println!("  Target:       {}", std::env::consts::ARCH);
    println!("  OS:           {}", std::env::consts::OS);
}
