// Dashboard frame rendering from broadcast snapshots.

mod common;

use devwatch::dashboard::render_snapshot;

#[test]
fn frame_shows_every_card() {
    let frame = render_snapshot(&common::minimal_snapshot(Some(50.0)));
    let lines: Vec<&str> = frame.lines().collect();

    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("CPU Usage"));
    assert!(lines[0].contains("[#####-----]"));
    assert!(lines[0].contains("50.00%"));
    assert!(lines[1].starts_with("RAM Usage"));
    assert!(lines[1].contains("4.00 GB / 8.00 GB"));
    assert!(lines[2].starts_with("Battery"));
    assert!(lines[2].contains("50% (Charging)"));
    assert!(lines[3].starts_with("Storage /"));
    assert!(lines[3].contains("75.00 GB / 100.00 GB"));
}

#[test]
fn unavailable_cpu_reads_not_available() {
    let frame = render_snapshot(&common::minimal_snapshot(None));
    assert!(frame.contains("CPU Usage        [----------] Not available"));
}

#[test]
fn battery_card_omitted_without_battery() {
    let mut snapshot = common::minimal_snapshot(Some(10.0));
    snapshot.battery = None;
    let frame = render_snapshot(&snapshot);
    assert!(!frame.contains("Battery"));
    // The other cards are unaffected.
    assert!(frame.contains("CPU Usage"));
    assert!(frame.contains("Storage"));
}

#[test]
fn gauges_saturate_at_the_limits() {
    let full = render_snapshot(&common::minimal_snapshot(Some(100.0)));
    assert!(full.contains("[##########] 100.00%"));

    let idle = render_snapshot(&common::minimal_snapshot(Some(0.0)));
    assert!(idle.contains("[----------] 0.00%"));
}
