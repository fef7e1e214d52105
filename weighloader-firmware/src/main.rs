//! Weighloader - Automatic Load/Unload Firmware
//!
//! Main firmware binary for RP2040-based weighing station loaders. A lift
//! lowers the workpiece onto the scale, a gripper unloads and reloads it,
//! and the lift returns to the top station. A single slit sensor confirms
//! every move.
//!
//! Pin assignments (board-specific):
//! - UART0 TX: GPIO0 (operator telemetry)
//! - Lift H-bridge: EN=GPIO2, DIR=GPIO3
//! - Gripper H-bridge: EN=GPIO4, DIR=GPIO5
//! - Slit sensor: GPIO6

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::uart::{Blocking, Config as UartConfig, UartTx};
use embassy_time::{Delay, Timer};
use {defmt_rtt as _, panic_probe as _};

use weighloader_core::sequencer::{Sequencer, StepReport};
use weighloader_core::state::Action;
use weighloader_core::traits::Direction;
use weighloader_drivers::motor::{HBridgeConfig, HBridgeMotor};
use weighloader_drivers::sensor::SlitSensor;
use weighloader_drivers::telemetry::UartTelemetry;

mod config;

type Motor = HBridgeMotor<Output<'static>, Output<'static>>;
type Loader = Sequencer<
    Motor,
    Motor,
    SlitSensor<Input<'static>>,
    Delay,
    UartTelemetry<UartTx<'static, Blocking>>,
>;

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Weighloader firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Operator telemetry: transmit only, blocking writes
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = config::TELEMETRY_BAUD;
    let uart = UartTx::new_blocking(p.UART0, p.PIN_0, uart_config);
    let telemetry = UartTelemetry::new(uart);
    info!("UART initialized at {} baud", config::TELEMETRY_BAUD);

    // Both bridges are created at their off level, direction clockwise
    let lift = HBridgeMotor::new(
        Output::new(p.PIN_2, off_level(&config::LIFT_BRIDGE)),
        Output::new(p.PIN_3, clockwise_level(&config::LIFT_BRIDGE)),
        config::LIFT_BRIDGE,
    );
    let gripper = HBridgeMotor::new(
        Output::new(p.PIN_4, off_level(&config::GRIPPER_BRIDGE)),
        Output::new(p.PIN_5, clockwise_level(&config::GRIPPER_BRIDGE)),
        config::GRIPPER_BRIDGE,
    );
    let sensor = SlitSensor::new(Input::new(p.PIN_6, Pull::Up), config::SLIT_SENSOR);
    info!("Actuators and sensor initialized");

    let sequencer = match Sequencer::new(
        config::SEQUENCER_CONFIG,
        lift,
        gripper,
        sensor,
        Delay,
        telemetry,
    ) {
        Ok(sequencer) => sequencer,
        Err(e) => {
            // Unreachable with a build-validated loader.toml
            error!("Invalid sequencer configuration: {}", e);
            idle().await
        }
    };

    run(sequencer).await
}

/// Run the load/unload cycle forever
///
/// Step errors stop both actuators and the step is retried. A halted
/// sequencer parks the main task.
async fn run(mut sequencer: Loader) -> ! {
    info!(
        "Sequencer running from {} with {}",
        sequencer.state(),
        sequencer.config()
    );

    loop {
        match sequencer.step() {
            Ok(report) => log_step(&report, &sequencer),
            Err(e) => {
                error!("Sequencer step failed in {}: {}", sequencer.state(), e);
                sequencer.emergency_stop();
            }
        }

        if sequencer.state().is_halted() {
            let retries = sequencer.context().retries();
            error!(
                "Sequencer halted after {} consecutive failures ({} total), {} cycles completed",
                retries.consecutive_failures(),
                retries.total_failures(),
                sequencer.cycles()
            );
            idle().await
        }
    }
}

fn log_step(report: &StepReport, sequencer: &Loader) {
    if !report.changed() {
        match report.event {
            Some(event) if event.is_failure() => {
                warn!("{}: {} -> {}", report.from, event, report.action)
            }
            _ => trace!("{}: {} -> {}", report.from, report.event, report.action),
        }
        return;
    }

    match report.event {
        Some(event) if event.is_failure() => {
            warn!("{} -> {} on {}", report.from, report.to, event)
        }
        _ => debug!("{} -> {} ({})", report.from, report.to, report.action),
    }

    if report.action == Action::CompleteCycle {
        info!(
            "Top reached: {} cycles, telemetry {} sent / {} dropped",
            sequencer.cycles(),
            sequencer.telemetry().sent(),
            sequencer.telemetry().dropped()
        );
    }
}

fn off_level(bridge: &HBridgeConfig) -> Level {
    Level::from(bridge.enable_level(false))
}

fn clockwise_level(bridge: &HBridgeConfig) -> Level {
    Level::from(bridge.direction_level(Direction::Clockwise))
}

/// Park the main task
async fn idle() -> ! {
    loop {
        Timer::after_secs(60).await;
        trace!("Idle heartbeat");
    }
}
