// Domain models for sampled telemetry and report inputs

mod battery;
mod cpu;
mod device;
mod memory;
mod net;
mod snapshot;

pub use battery::{BatteryHealth, BatteryReading, BatteryState, ChargeStatus};
pub use cpu::{CpuStats, CpuTicks};
pub use device::{DeviceInfo, SensorInfo};
pub use memory::{MemorySnapshot, StorageSnapshot};
pub use net::{CellularInfo, WifiInfo};
pub use snapshot::TelemetrySnapshot;
