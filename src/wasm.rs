use crate::clue_bank::{unique_answers, ClueBank};
use crate::errors::GenerateError;
use crate::generator::generate;
use crate::log::init_logger;
use crate::normalize::RawEntry;
use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;

use serde_wasm_bindgen::to_value;

/// Structured error information for JavaScript consumers
#[derive(serde::Serialize)]
struct WasmError {
    /// Error code (e.g., "G001", "WASM001")
    code: String,
    /// Display message
    message: String,
    /// Short description of error type
    description: String,
    /// Detailed explanation
    details: String,
    /// Optional helpful suggestion
    #[serde(skip_serializing_if = "Option::is_none")]
    help: Option<String>,
}

impl From<GenerateError> for WasmError {
    fn from(e: GenerateError) -> Self {
        WasmError {
            code: e.code().to_string(),
            message: e.to_string(),
            description: e.description().to_string(),
            details: e.details().to_string(),
            help: e.help().map(|s| s.to_string()),
        }
    }
}

impl From<WasmError> for JsValue {
    fn from(e: WasmError) -> Self {
        let mut msg = format!("Error {}: {}", e.code, e.message);

        if !e.details.is_empty() {
            msg.push_str(&format!("\n\n{}", e.details));
        }

        if let Some(help) = e.help {
            msg.push_str(&format!("\n\nSuggestion: {}", help));
        }

        let err = js_sys::Error::new(&msg);
        // expose the code so callers can tell "try other clues" from real faults
        let _ = js_sys::Reflect::set(&err, &JsValue::from_str("code"), &JsValue::from_str(&e.code));
        err.into()
    }
}

fn serialization_error(code: &str, what: &str, e: serde_wasm_bindgen::Error) -> JsValue {
    WasmError {
        code: code.to_string(),
        message: format!("serialization failed: {e}"),
        description: format!("Failed to serialize {what}"),
        details: format!("The {what} could not be converted to JavaScript format."),
        help: Some("This is an internal error. Please report this issue.".to_string()),
    }
    .into()
}

/// Initialize qajaq logging with the specified debug setting.
///
/// This function must be called from JavaScript after the WASM module loads.
#[wasm_bindgen]
pub fn initialize(debug_enabled: bool) {
    console_error_panic_hook::set_once();
    init_logger(debug_enabled);
    log::info!("WASM module initialized");
}

/// JS entry: (entries: {answer, clue, sourceId}[], seed?: bigint)
/// returns the puzzle object, or throws an Error carrying a `code` property.
/// Entries repeating an earlier answer are dropped before generating.
#[wasm_bindgen]
pub fn generate_crossword_wasm(entries: JsValue, seed: Option<u64>) -> Result<JsValue, JsValue> {
    let entries: Vec<RawEntry> = serde_wasm_bindgen::from_value(entries).map_err(|e| WasmError {
        code: "WASM001".to_string(),
        message: format!("entries must be {{answer, clue, sourceId}}[]: {e}"),
        description: "Invalid entry format".to_string(),
        details: "The entries parameter must be a JavaScript array of objects with string fields answer, clue and sourceId.".to_string(),
        help: Some("Example: [{ answer: 'GRAY', clue: 'SI unit of absorbed dose', sourceId: 'q1' }]".to_string()),
    })?;

    let entries = unique_answers(entries);

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let puzzle = generate(&entries, &mut rng).map_err(WasmError::from)?;

    to_value(&puzzle).map_err(|e| serialization_error("WASM002", "puzzle", e))
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct WasmClue {
    id: String,
    answer: String,
    clue: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<String>,
}

/// Parse a clue bank (`id;answer;clue;category` lines) into an array of
/// clue objects. Malformed lines are skipped.
#[wasm_bindgen]
pub fn parse_clue_bank(text: &str) -> Result<JsValue, JsValue> {
    let bank = ClueBank::parse_from_str(text);
    let clues: Vec<WasmClue> = bank
        .clues
        .into_iter()
        .map(|c| WasmClue { id: c.id, answer: c.answer, clue: c.clue, category: c.category })
        .collect();
    to_value(&clues).map_err(|e| serialization_error("WASM003", "clue bank", e))
}

/// Seed for the daily puzzle of `date` (YYYY-MM-DD).
#[wasm_bindgen]
pub fn daily_seed(date: &str) -> u64 {
    crate::daily_seed::seed_from_date(date)
}

/// Generate a debug report users can paste into an issue.
#[wasm_bindgen]
pub fn get_debug_info(error_message: &str, entry_count: usize, seed: Option<u64>) -> String {
    use std::fmt::Write;
    let mut report = String::new();

    // NB: writing to a String never fails (infallible operation)
    let _ = writeln!(&mut report, "=== QAJAQ DEBUG REPORT ===");
    let _ = writeln!(&mut report, "Version: {}", env!("CARGO_PKG_VERSION"));
    let _ = writeln!(&mut report, "Build: {}", env!("QAJAQ_REVISION"));
    let generated = js_sys::Date::new_0()
        .to_iso_string()
        .as_string()
        .unwrap_or_else(|| "unknown".to_string());
    let _ = writeln!(&mut report, "Generated: {generated}");
    let _ = writeln!(&mut report);

    let _ = writeln!(&mut report, "## Error");
    let _ = writeln!(&mut report, "{}", error_message);
    let _ = writeln!(&mut report);

    let _ = writeln!(&mut report, "## Input");
    let _ = writeln!(&mut report, "Entries: {}", entry_count);
    let seed = seed.map_or_else(|| "random".to_string(), |s| s.to_string());
    let _ = writeln!(&mut report, "Seed: {seed}");
    let _ = writeln!(&mut report);

    let _ = writeln!(&mut report, "## Environment");
    if let Some(window) = web_sys::window() {
        if let Ok(user_agent) = window.navigator().user_agent() {
            let _ = writeln!(&mut report, "User Agent: {}", user_agent);
        }
        let location = window.location().href().unwrap_or_else(|_| "unknown".to_string());
        let _ = writeln!(&mut report, "Location: {location}");
    }
    let _ = writeln!(&mut report);

    let _ = writeln!(&mut report, "=== END DEBUG REPORT ===");

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wasm_error_from_generate_error() {
        let e = WasmError::from(GenerateError::Unsolvable { placed: 2, required: 6 });
        assert_eq!(e.code, "G002");
        assert!(e.message.contains("placed at most 2"));
        assert!(e.help.is_some());
    }

    #[test]
    fn test_get_debug_info_structure() {
        let report = get_debug_info("unsolvable", 40, Some(7));
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines[0], "=== QAJAQ DEBUG REPORT ===");
        assert_eq!(lines[1], format!("Version: {}", env!("CARGO_PKG_VERSION")));
        let input_idx = lines.iter().position(|&l| l == "## Input").unwrap();
        assert_eq!(lines[input_idx + 1], "Entries: 40");
        assert_eq!(lines[input_idx + 2], "Seed: 7");
        assert_eq!(lines.last(), Some(&"=== END DEBUG REPORT ==="));
    }
}
