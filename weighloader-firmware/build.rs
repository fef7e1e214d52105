//! Build script for weighloader-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates loader.toml at compile time
//! - Generates the configuration constants included by `src/config.rs`

use std::env;
use std::fmt::Write as _;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use weighloader_core::config::SequencerConfig;

/// Highest baud rate the operator link is wired for
const MAX_BAUD: u32 = 921_600;

fn main() {
    setup_linker();
    let config = validate_config();
    generate_config(&config);
}

/// Set up linker search paths and scripts for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    if env::var_os("CARGO_FEATURE_DEFMT").is_some() {
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    }

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Contents of loader.toml
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct LoaderToml {
    sequencer: SequencerConfig,
    lift: BridgeToml,
    gripper: BridgeToml,
    sensor: SensorToml,
    telemetry: TelemetryToml,
}

/// `[lift]` / `[gripper]` H-bridge wiring
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct BridgeToml {
    enable_active_low: bool,
    direction_inverted: bool,
}

/// `[sensor]` slit sensor wiring
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SensorToml {
    active_low: bool,
}

/// `[telemetry]` operator link
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct TelemetryToml {
    baud: u32,
}

impl Default for TelemetryToml {
    fn default() -> Self {
        Self { baud: 9600 }
    }
}

/// Validate loader.toml configuration at compile time
fn validate_config() -> LoaderToml {
    // Re-run if loader.toml changes
    println!("cargo:rerun-if-changed=loader.toml");

    let config_path = Path::new("loader.toml");

    // Check if config file exists
    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: loader.toml not found!                                   ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a loader.toml configuration file.         ║\n\
            ║  Please create one in the weighloader-firmware directory.        ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read loader.toml                               ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Parse syntax and keys in one pass; unknown keys are rejected
    let config: LoaderToml = match toml::from_str(&config_content) {
        Ok(config) => config,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid loader.toml                                      ║\n\
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

    if let Err(e) = config.sequencer.validate() {
        errors.push(format!("[sequencer] {:?}", e));
    }

    if config.telemetry.baud == 0 || config.telemetry.baud > MAX_BAUD {
        errors.push(format!("[telemetry] baud must be 1-{}", MAX_BAUD));
    }

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid loader configuration                             ║\n\
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

    if config.sequencer.retries_unbounded() {
        println!("cargo:warning=loader.toml: max_leg_retries = 0, failing legs retry forever");
    }
    println!("cargo:warning=loader.toml validated successfully");

    config
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

/// Write the validated configuration as Rust constants
fn generate_config(config: &LoaderToml) {
    let s = &config.sequencer;
    let mut out = String::new();

    writeln!(out, "// Generated from loader.toml by build.rs").unwrap();
    writeln!(out, "pub const SEQUENCER_CONFIG: SequencerConfig = SequencerConfig {{").unwrap();
    for (name, value) in [
        ("inter_cycle_delay_ms", s.inter_cycle_delay_ms),
        ("top_settle_us", s.top_settle_us),
        ("edge_settle_us", s.edge_settle_us),
        ("hold_settle_us", s.hold_settle_us),
        ("poll_interval_ms", s.poll_interval_ms),
        ("travel_timeout_ms", s.travel_timeout_ms),
        ("pre_gripper_delay_ms", s.pre_gripper_delay_ms),
        ("gripper_open_ms", s.gripper_open_ms),
        ("gripper_close_ms", s.gripper_close_ms),
        ("stability_delay_ms", s.stability_delay_ms),
        ("post_reload_delay_ms", s.post_reload_delay_ms),
        ("ascent_start_delay_ms", s.ascent_start_delay_ms),
    ] {
        writeln!(out, "    {}: {},", name, value).unwrap();
    }
    writeln!(out, "    max_leg_retries: {},", s.max_leg_retries).unwrap();
    writeln!(out, "}};").unwrap();

    for (name, bridge) in [("LIFT_BRIDGE", &config.lift), ("GRIPPER_BRIDGE", &config.gripper)] {
        writeln!(
            out,
            "pub const {}: HBridgeConfig = HBridgeConfig {{ enable_active_low: {}, direction_inverted: {} }};",
            name, bridge.enable_active_low, bridge.direction_inverted
        )
        .unwrap();
    }

    writeln!(
        out,
        "pub const SLIT_SENSOR: SlitSensorConfig = SlitSensorConfig {{ active_low: {} }};",
        config.sensor.active_low
    )
    .unwrap();
    writeln!(out, "pub const TELEMETRY_BAUD: u32 = {};", config.telemetry.baud).unwrap();

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    fs::write(out_dir.join("loader_config.rs"), out).unwrap();
}
