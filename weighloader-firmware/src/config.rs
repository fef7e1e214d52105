//! Build-time configuration
//!
//! Constants generated by build.rs from loader.toml. The values were
//! validated on the host, so the firmware never parses configuration.

use weighloader_core::config::SequencerConfig;
use weighloader_drivers::motor::HBridgeConfig;
use weighloader_drivers::sensor::SlitSensorConfig;

include!(concat!(env!("OUT_DIR"), "/loader_config.rs"));
