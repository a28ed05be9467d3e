//! Build script for klepsydra-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates schedule.toml and turns it into constants for the firmware

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use klepsydra_core::config::ScheduleConfig;
use klepsydra_core::text::truncate;
use serde::Deserialize;

/// Layout of schedule.toml
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ScheduleFile {
    schedule: ScheduleConfig,
}

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));

    setup_linker(&out_dir);
    let config = validate_schedule();
    generate_schedule(&out_dir, &config);
}

/// Set up linker search paths for memory.x
fn setup_linker(out_dir: &Path) {
    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate schedule.toml at compile time
fn validate_schedule() -> ScheduleConfig {
    println!("cargo:rerun-if-changed=schedule.toml");

    let config_path = Path::new("schedule.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: schedule.toml not found!                                 ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a schedule.toml file with a [schedule]    ║\n\
            ║  table holding `low_ms` and `high_ms`.                           ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read schedule.toml                             ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Missing keys, negative values and values above u32::MAX all fail here
    let file: ScheduleFile = match toml::from_str(&content) {
        Ok(file) => file,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid schedule.toml                                    ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&e.to_string())
            );
        }
    };

    let config = file.schedule;
    if let Err(e) = config.build() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid schedule in schedule.toml                        ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            format_error_lines(&format!("{:?}: phase durations must be positive", e))
        );
    }

    if config.exceeds_display_range() {
        println!(
            "cargo:warning=schedule.toml: a phase is longer than 10 days, the display will pin at the cap"
        );
    }

    println!(
        "cargo:warning=schedule.toml validated: low {} ms, high {} ms",
        config.low_ms, config.high_ms
    );
    config
}

/// Write the validated durations as constants for `include!`
fn generate_schedule(out_dir: &Path, config: &ScheduleConfig) {
    let source = format!(
        "/// Relay-off duration from schedule.toml\n\
         pub const LOW_MS: u32 = {};\n\
         /// Relay-on duration from schedule.toml\n\
         pub const HIGH_MS: u32 = {};\n",
        config.low_ms, config.high_ms
    );
    fs::write(out_dir.join("schedule.rs"), source).unwrap();
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", truncate(line, 61))
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
