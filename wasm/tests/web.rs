//! Exports exercised inside a wasm runtime (`wasm-pack test --node`)

#![cfg(target_arch = "wasm32")]

use greenhouse_temps_wasm::*;
use wasm_bindgen_test::*;

#[wasm_bindgen_test]
fn form_gate_matches_validation_rules() {
    assert!(is_observation_input_valid(Some(27.4), Some(24.8), Some(34), Some(17), "Sunny"));
    assert!(!is_observation_input_valid(Some(27.4), None, Some(34), Some(17), ""));
}

#[wasm_bindgen_test]
fn rolling_summary_uses_browser_clock() {
    let json = String::from_utf8(encode_log(&WeatherLog::new()).unwrap()).unwrap();
    let summary: serde_json::Value = serde_json::from_str(&rolling_summary(&json, 0).unwrap()).unwrap();

    assert_eq!(summary["rolling_days"], 7);
    assert_eq!(summary["mean_text"], "No observations");
    assert_eq!(summary["last_observation"]["date"], "No previous observation");
    assert!(summary["recent_observations"].as_array().unwrap().is_empty());
}
