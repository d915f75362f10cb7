//! Battery snapshots.

use std::path::PathBuf;
use std::time::Duration;

use crate::state::State;
use crate::technology::Technology;

/// Metric values read from one device in a single pass.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Metrics {
    pub state_of_charge: f32,
    pub energy: f32,
    pub energy_full: f32,
    pub energy_full_design: f32,
    pub energy_rate: f32,
    pub voltage: f32,
    pub state_of_health: f32,
    pub state: State,
    pub temperature: Option<f32>,
    pub cycle_count: Option<u64>,
    pub time_to_full: Option<Duration>,
    pub time_to_empty: Option<Duration>,
}

/// Battery information at a point in time.
///
/// Accessors keep returning the same values until the battery is refreshed
/// with [`Manager::refresh`](crate::Manager::refresh).
#[derive(Debug, Clone)]
pub struct Battery {
    pub(crate) device: PathBuf,

    technology: Technology,
    vendor: Option<String>,
    model: Option<String>,
    serial_number: Option<String>,

    metrics: Metrics,
}

impl Battery {
    pub(crate) fn new(
        device: PathBuf,
        technology: Technology,
        vendor: Option<String>,
        model: Option<String>,
        serial_number: Option<String>,
        metrics: Metrics,
    ) -> Self {
        Self {
            device,
            technology,
            vendor,
            model,
            serial_number,
            metrics,
        }
    }

    pub(crate) fn set_metrics(&mut self, metrics: Metrics) {
        self.metrics = metrics;
    }

    /// The current state of charge, in percent.
    ///
    /// The State of Charge (SOC) expresses the available capacity as a
    /// percentage of maximum capacity. This can roughly be calculated as
    /// `battery.energy() / battery.energy_full()`, but prefer this accessor:
    /// many device drivers report the value directly with better precision.
    pub fn state_of_charge(&self) -> f32 {
        self.metrics.state_of_charge
    }

    /// Amount of energy currently available in the battery, in watt-hours.
    pub fn energy(&self) -> f32 {
        self.metrics.energy
    }

    /// Amount of energy in the battery when it is considered full, in
    /// watt-hours.
    pub fn energy_full(&self) -> f32 {
        self.metrics.energy_full
    }

    /// Amount of energy the battery is designed to hold when full, in
    /// watt-hours.
    pub fn energy_full_design(&self) -> f32 {
        self.metrics.energy_full_design
    }

    /// Amount of energy currently being drained from (or fed into) the
    /// battery, in watts.
    pub fn energy_rate(&self) -> f32 {
        self.metrics.energy_rate
    }

    /// The battery's voltage, in volts.
    pub fn voltage(&self) -> f32 {
        self.metrics.voltage
    }

    /// The current state of health, in percent.
    ///
    /// The State of Health (SOH) measures how far along the battery is in
    /// its life cycle: how much energy it can hold when fully charged,
    /// relative to its design capacity.
    pub fn state_of_health(&self) -> f32 {
        self.metrics.state_of_health
    }

    /// The battery's state.
    pub fn state(&self) -> State {
        self.metrics.state
    }

    /// The battery's technology.
    pub fn technology(&self) -> Technology {
        self.technology
    }

    /// The battery's temperature in degrees Celsius, if available.
    pub fn temperature(&self) -> Option<f32> {
        self.metrics.temperature
    }

    /// Total number of charge / discharge cycles, if available.
    pub fn cycle_count(&self) -> Option<u64> {
        self.metrics.cycle_count
    }

    /// The battery's vendor, if available.
    pub fn vendor(&self) -> Option<&str> {
        self.vendor.as_deref()
    }

    /// The battery's model, if available.
    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    /// The battery's serial number, if available.
    pub fn serial_number(&self) -> Option<&str> {
        self.serial_number.as_deref()
    }

    /// Time until the battery is full, if it is currently charging.
    ///
    /// This value may swing considerably between refreshes; any smoothing
    /// is up to the caller.
    pub fn time_to_full(&self) -> Option<Duration> {
        self.metrics.time_to_full
    }

    /// Time until the battery is empty, if it is currently discharging.
    ///
    /// This value may swing considerably between refreshes; any smoothing
    /// is up to the caller.
    pub fn time_to_empty(&self) -> Option<Duration> {
        self.metrics.time_to_empty
    }
}
