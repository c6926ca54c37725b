//! Build script for thermocam-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates thermocam.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Keys accepted in each section
const KNOWN_KEYS: &[(&str, &[&str])] = &[
    ("sensor", &["address", "frame_rate_fps"]),
    ("bus", &["frequency_hz", "timeout_ms"]),
    ("acquisition", &["tick_interval_ms"]),
];

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate thermocam.toml at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=thermocam.toml");

    let config_path = Path::new("thermocam.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: thermocam.toml not found!                                ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds a thermocam.toml configuration file.        ║\n\
            ║  Please create one in the thermocam-firmware directory.          ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read thermocam.toml                            ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in thermocam.toml                    ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_layout(&config, &mut errors);
    validate_values(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid configuration in thermocam.toml                  ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=thermocam.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Reject unknown sections and keys; the firmware parser does the same
fn validate_layout(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(root) = config.as_table() else {
        return;
    };

    for (section, body) in root {
        let Some((_, keys)) = KNOWN_KEYS.iter().find(|(name, _)| name == section) else {
            errors.push(format!("unknown section [{}]", section));
            continue;
        };
        let Some(table) = body.as_table() else {
            errors.push(format!("[{}] must be a table", section));
            continue;
        };
        for key in table.keys() {
            if !keys.contains(&key.as_str()) {
                errors.push(format!("[{}] unknown key '{}'", section, key));
            }
        }
    }
}

fn integer(config: &toml::Value, section: &str, key: &str) -> Option<i64> {
    config.get(section)?.get(key)?.as_integer()
}

fn validate_values(config: &toml::Value, errors: &mut Vec<String>) {
    if let Some(address) = integer(config, "sensor", "address") {
        if !(0x08..=0x77).contains(&address) {
            errors.push("[sensor] address must be 0x08-0x77".to_string());
        }
    }

    if let Some(fps) = integer(config, "sensor", "frame_rate_fps") {
        if fps != 1 && fps != 10 {
            errors.push("[sensor] frame_rate_fps must be 1 or 10".to_string());
        }
    }

    if let Some(freq) = integer(config, "bus", "frequency_hz") {
        if !(10_000..=400_000).contains(&freq) {
            errors.push("[bus] frequency_hz must be 10000-400000".to_string());
        }
    }

    let tick = integer(config, "acquisition", "tick_interval_ms").unwrap_or(1000);
    if tick <= 0 {
        errors.push("[acquisition] tick_interval_ms must be positive".to_string());
    }

    let timeout = integer(config, "bus", "timeout_ms").unwrap_or(1000);
    if timeout <= 0 {
        errors.push("[bus] timeout_ms must be positive".to_string());
    } else if timeout > tick {
        errors.push("[bus] timeout_ms must not exceed tick_interval_ms".to_string());
    }
}
