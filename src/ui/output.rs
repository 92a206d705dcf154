//! Human-facing status lines. Everything here goes to stderr; stdout is
//! reserved for JSON payloads and usage text.

use colored::*;

/// `✅ <message>`
pub fn success(message: &str) {
    eprintln!("{}", format!("✅ {}", message).green());
}

/// `❌ <context>: <detail>`
pub fn error(context: &str, detail: &str) {
    eprintln!("{} {}", format!("❌ {}:", context).red(), detail);
}

/// `⚠️ <context>: <detail>`
pub fn warning(context: &str, detail: &str) {
    eprintln!("{} {}", format!("⚠️ {}:", context).yellow(), detail);
}

/// Dimmed `[backlog]` line, only shown in verbose mode
pub fn debug(verbose: bool, message: &str) {
    if verbose {
        eprintln!("{}", format!("[backlog] {}", message).dimmed());
    }
}
