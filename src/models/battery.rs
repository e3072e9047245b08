// Battery state decoding from raw power-supply readings

use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw integer readings as reported by the power-supply source.
/// `-1` marks a field the source did not provide.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatteryReading {
    pub level: i32,
    pub scale: i32,
    pub status_code: i32,
    pub health_code: i32,
    pub temperature_tenths: i32,
    pub voltage_mv: i32,
    pub technology: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChargeStatus {
    Charging,
    Discharging,
    Full,
    NotCharging,
    Unknown,
}

impl ChargeStatus {
    /// Any code outside the table decodes to `Unknown`.
    pub fn from_code(code: i32) -> ChargeStatus {
        match code {
            2 => ChargeStatus::Charging,
            3 => ChargeStatus::Discharging,
            4 => ChargeStatus::NotCharging,
            5 => ChargeStatus::Full,
            _ => ChargeStatus::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ChargeStatus::Charging => "Charging",
            ChargeStatus::Discharging => "Discharging",
            ChargeStatus::Full => "Full",
            ChargeStatus::NotCharging => "Not Charging",
            ChargeStatus::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ChargeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatteryHealth {
    Good,
    Overheat,
    Dead,
    OverVoltage,
    UnspecifiedFailure,
    Cold,
    Unknown,
}

impl BatteryHealth {
    /// Any code outside the table decodes to `Unknown`.
    pub fn from_code(code: i32) -> BatteryHealth {
        match code {
            2 => BatteryHealth::Good,
            3 => BatteryHealth::Overheat,
            4 => BatteryHealth::Dead,
            5 => BatteryHealth::OverVoltage,
            6 => BatteryHealth::UnspecifiedFailure,
            7 => BatteryHealth::Cold,
            _ => BatteryHealth::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BatteryHealth::Good => "Good",
            BatteryHealth::Overheat => "Overheat",
            BatteryHealth::Dead => "Dead",
            BatteryHealth::OverVoltage => "Over Voltage",
            BatteryHealth::UnspecifiedFailure => "Unspecified Failure",
            BatteryHealth::Cold => "Cold",
            BatteryHealth::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for BatteryHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatteryState {
    /// `None` when level or scale were missing or invalid.
    pub percent: Option<f32>,
    pub status: ChargeStatus,
    pub health: BatteryHealth,
    pub temperature_celsius: Option<f32>,
    pub voltage_mv: Option<i32>,
    pub technology: Option<String>,
}

impl BatteryState {
    pub fn decode(reading: &BatteryReading) -> BatteryState {
        let percent = if reading.level != -1 && reading.scale > 0 {
            Some(reading.level as f32 * 100.0 / reading.scale as f32)
        } else {
            None
        };
        let temperature_celsius = if reading.temperature_tenths != -1 {
            Some(reading.temperature_tenths as f32 / 10.0)
        } else {
            None
        };
        let voltage_mv = (reading.voltage_mv != -1).then_some(reading.voltage_mv);
        BatteryState {
            percent,
            status: ChargeStatus::from_code(reading.status_code),
            health: BatteryHealth::from_code(reading.health_code),
            temperature_celsius,
            voltage_mv,
            technology: reading.technology.clone(),
        }
    }
}
