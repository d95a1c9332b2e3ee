//! Tests for configuration loading and validation.

use std::io::Write;

use apex_sim::common::SimError;
use apex_sim::config::Config;
use pretty_assertions::assert_eq;
use tempfile::NamedTempFile;

/// Tests that the defaults describe the reference machine.
#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.pipeline.start_pc, 4000);
    assert_eq!(config.pipeline.instruction_width, 4);
    assert_eq!(config.pipeline.mul_div_latency, 1);
    assert_eq!(config.memory.register_count, 32);
    assert_eq!(config.memory.data_memory_size, 4096);
    assert_eq!(config.general.memory_dump_words, 250);
    assert!(config.general.display_state);
    assert!(!config.general.trace_instructions);
}

/// Tests that an empty file yields the defaults.
#[test]
fn test_empty_config_is_default() {
    assert_eq!(Config::from_toml("").unwrap(), Config::default());
}

/// Tests that a partial file overrides only the keys it names.
#[test]
fn test_partial_config() {
    let config = Config::from_toml("[pipeline]\nmul_div_latency = 3\n").unwrap();
    assert_eq!(config.pipeline.mul_div_latency, 3);
    assert_eq!(config.pipeline.start_pc, 4000);
    assert_eq!(config.memory, Config::default().memory);
}

/// Tests that zero sizes and latencies are rejected.
#[test]
fn test_config_validation() {
    for text in [
        "[pipeline]\ninstruction_width = 0\n",
        "[pipeline]\nmul_div_latency = 0\n",
        "[memory]\nregister_count = 0\n",
        "[memory]\ndata_memory_size = 0\n",
    ] {
        assert!(
            matches!(Config::from_toml(text), Err(SimError::Config(_))),
            "{} should be rejected",
            text
        );
    }
}

/// Tests that malformed TOML is a format error.
#[test]
fn test_config_bad_toml() {
    assert!(matches!(
        Config::from_toml("[pipeline\n"),
        Err(SimError::ConfigFormat(_))
    ));
    assert!(matches!(
        Config::from_toml("[pipeline]\nstart_pc = \"high\"\n"),
        Err(SimError::ConfigFormat(_))
    ));
}

/// Tests loading a configuration file from disk.
#[test]
fn test_config_load_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[general]\ntrace_instructions = true\n[memory]\nregister_count = 16").unwrap();

    let config = Config::load(file.path()).unwrap();
    assert!(config.general.trace_instructions);
    assert_eq!(config.memory.register_count, 16);
}

/// Tests that the shipped default configuration parses to the defaults.
#[test]
fn test_shipped_default_config() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/configs/default.toml");
    assert_eq!(Config::load(path).unwrap(), Config::default());
}
