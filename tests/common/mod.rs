// Shared fixtures for the integration tests.

#![allow(dead_code)]

use devwatch::models::{
    BatteryReading, BatteryState, CpuStats, DeviceInfo, MemorySnapshot, StorageSnapshot,
    TelemetrySnapshot,
};
use devwatch::probes::ProbeError;
use devwatch::report::ReportInputs;

pub const GIB: u64 = 1024 * 1024 * 1024;

pub fn sample_device() -> DeviceInfo {
    DeviceInfo {
        hostname: "testhost".into(),
        os_name: "Test Linux".into(),
        os_version: "42.1".into(),
        kernel_version: "6.10.0-test".into(),
        arch: "x86_64".into(),
        vendor: "ACME".into(),
        model: "Box 3000".into(),
        cpu_model: "Synthetic CPU @ 3.0GHz".into(),
        uptime_secs: 93_784, // 1d 2h 3m 4s
    }
}

pub fn sample_battery() -> BatteryState {
    BatteryState::decode(&BatteryReading {
        level: 50,
        scale: 100,
        status_code: 2,
        health_code: 2,
        temperature_tenths: 302,
        voltage_mv: 12_000,
        technology: Some("Li-ion".into()),
    })
}

/// Inputs where every local section succeeds and both connectivity sources
/// are denied, so the report exercises the fixed placeholder lines.
pub fn synthetic_inputs() -> ReportInputs {
    ReportInputs {
        device: Ok(sample_device()),
        cpuinfo: Ok("processor\t: 0\nmodel name\t: Synthetic CPU @ 3.0GHz\n\n".into()),
        memory: Ok(MemorySnapshot {
            total_bytes: 8 * GIB,
            available_bytes: 4 * GIB,
        }),
        storage: Ok(StorageSnapshot {
            mount: "/".into(),
            total_bytes: 100 * GIB,
            available_bytes: 25 * GIB,
        }),
        battery: Ok(sample_battery()),
        sensors: Ok(Vec::new()),
        wifi: Err(ProbeError::PermissionDenied("Wireless state")),
        cellular: Err(ProbeError::PermissionDenied("Phone state")),
    }
}

pub fn minimal_snapshot(usage_percent: Option<f64>) -> TelemetrySnapshot {
    TelemetrySnapshot {
        timestamp_ms: 1_756_500_000_000,
        cpu: CpuStats {
            model: "Synthetic CPU @ 3.0GHz".into(),
            logical_cores: 8,
            usage_percent,
        },
        memory: MemorySnapshot {
            total_bytes: 8 * GIB,
            available_bytes: 4 * GIB,
        },
        storage: StorageSnapshot {
            mount: "/".into(),
            total_bytes: 100 * GIB,
            available_bytes: 25 * GIB,
        },
        battery: Some(sample_battery()),
    }
}
