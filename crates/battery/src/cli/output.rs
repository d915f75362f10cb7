//! Output formatting for battery reports.

use battery::Battery;
use comfy_table::{presets::UTF8_FULL_CONDENSED, ContentArrangement, Table};
use serde::Serialize;
use std::time::Duration;

/// Flattened battery snapshot for CLI output.
#[derive(Debug, Clone, Serialize)]
pub struct BatteryReport {
    pub vendor: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub technology: String,
    pub state: String,
    pub state_of_charge: f32,
    pub state_of_health: f32,
    pub energy_wh: f32,
    pub energy_full_wh: f32,
    pub energy_full_design_wh: f32,
    pub energy_rate_w: f32,
    pub voltage_v: f32,
    pub temperature_c: Option<f32>,
    pub cycle_count: Option<u64>,
    pub time_to_full_secs: Option<u64>,
    pub time_to_empty_secs: Option<u64>,
}

impl From<&Battery> for BatteryReport {
    fn from(battery: &Battery) -> Self {
        Self {
            vendor: battery.vendor().map(str::to_string),
            model: battery.model().map(str::to_string),
            serial_number: battery.serial_number().map(str::to_string),
            technology: battery.technology().to_string(),
            state: battery.state().to_string(),
            state_of_charge: battery.state_of_charge(),
            state_of_health: battery.state_of_health(),
            energy_wh: battery.energy(),
            energy_full_wh: battery.energy_full(),
            energy_full_design_wh: battery.energy_full_design(),
            energy_rate_w: battery.energy_rate(),
            voltage_v: battery.voltage(),
            temperature_c: battery.temperature(),
            cycle_count: battery.cycle_count(),
            time_to_full_secs: battery.time_to_full().map(|d| d.as_secs()),
            time_to_empty_secs: battery.time_to_empty().map(|d| d.as_secs()),
        }
    }
}

/// Render reports as a terminal table.
pub fn render_table(reports: &[BatteryReport]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header([
            "Vendor", "Model", "State", "Charge", "Health", "Rate", "Voltage", "Temp", "ETA",
        ]);

    for report in reports {
        table.add_row([
            report.vendor.clone().unwrap_or_else(|| "-".to_string()),
            report.model.clone().unwrap_or_else(|| "-".to_string()),
            report.state.clone(),
            format!("{:.1}%", report.state_of_charge),
            format!("{:.1}%", report.state_of_health),
            format!("{:.1} W", report.energy_rate_w),
            format!("{:.2} V", report.voltage_v),
            report
                .temperature_c
                .map(|t| format!("{t:.1} °C"))
                .unwrap_or_else(|| "-".to_string()),
            eta(report),
        ]);
    }

    table
}

fn eta(report: &BatteryReport) -> String {
    if let Some(secs) = report.time_to_full_secs {
        format!("{} to full", format_duration(Duration::from_secs(secs)))
    } else if let Some(secs) = report.time_to_empty_secs {
        format!("{} to empty", format_duration(Duration::from_secs(secs)))
    } else {
        "-".to_string()
    }
}

/// Format a duration as e.g. "1h 23m" or "45m" or "30s".
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;

    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else if minutes > 0 {
        format!("{minutes}m")
    } else {
        format!("{secs}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_secs(30)), "30s");
        assert_eq!(format_duration(Duration::from_secs(45 * 60)), "45m");
        assert_eq!(format_duration(Duration::from_secs(4980)), "1h 23m");
    }
}
