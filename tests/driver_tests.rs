//! Integration tests for the display driver cycle.

use std::sync::Arc;

use rs_sysled::hal::{MockLink, MockResponse, MockSource};
use rs_sysled::services::{CycleStatus, DisplayDriver, DriverState};
use rs_sysled::{plan, DriverConfig, EncodingPlan, Mode, ModeController, TelemetryFrame};

fn test_config() -> DriverConfig {
    DriverConfig::default()
        .with_boot_delay_ms(0)
        .with_cycle_interval_ms(0)
}

fn make_driver(
    initial: Mode,
    telemetry: &str,
) -> (DisplayDriver<MockSource, MockLink>, Arc<ModeController>) {
    let controller = Arc::new(ModeController::new(initial));
    let driver = DisplayDriver::new(
        MockSource::new(telemetry),
        MockLink::new(),
        Arc::clone(&controller),
        test_config(),
    );
    (driver, controller)
}

#[test]
fn temperature_cycle_then_off() {
    // Operator enters "3": temperature mode.
    let (mut driver, controller) = make_driver(Mode::Usage, "cpu,23.5%,mem,61.2%");
    controller.set_mode(Mode::from_input("3").unwrap());

    assert_eq!(driver.run_cycle().unwrap(), CycleStatus::Continue);
    assert_eq!(driver.link().written_lengths(), vec![16, 8, 8, 8, 8]);

    // Operator enters "0": off, observed at the top of the next cycle.
    controller.set_mode(Mode::from_input("0").unwrap());
    assert_eq!(driver.run_cycle().unwrap(), CycleStatus::Stop);
    assert_eq!(driver.state(), DriverState::Draining);
    // No further payloads after off.
    assert_eq!(driver.link().write_count(), 5);
}

#[test]
fn usage_payloads_match_the_frame_byte_ranges() {
    let telemetry = "cpu,23.5%,mem,61.2%,swap,12.0%";
    let (mut driver, _) = make_driver(Mode::Usage, telemetry);
    driver.run_cycle().unwrap();

    // Reconstruct the expected wire image.
    let mut expected = TelemetryFrame::new();
    expected.set_mode(Mode::Usage);
    rs_sysled::telemetry::fill_frame(telemetry, &mut expected);
    let bytes = expected.to_bytes();

    let slices = match plan(Mode::Usage) {
        EncodingPlan::Stream(slices) => slices,
        other => panic!("usage must stream, got {other:?}"),
    };
    let offsets: Vec<usize> = slices.iter().map(|s| s.start_slot).collect();
    let lengths: Vec<usize> = slices.iter().map(|s| s.len_bytes).collect();
    assert_eq!(offsets, [0, 13, 22, 31, 40]);
    assert_eq!(lengths, [8, 28, 28, 28, 28]);

    for (written, slice) in driver.link().written.iter().zip(slices) {
        assert_eq!(written.as_slice(), &bytes[slice.byte_range()]);
    }
}

#[test]
fn parsed_samples_travel_in_the_payload() {
    let (mut driver, _) = make_driver(Mode::Temperature, "cpu,23.5%,mem,61.2%");
    driver.run_cycle().unwrap();

    // First temperature slice covers slots 0..4: sentinel, tag, samples.
    let first = &driver.link().written[0];
    assert_eq!(first.len(), 16);
    assert_eq!(first[0..4], (-1000.0f32).to_ne_bytes());
    assert_eq!(first[4..8], 3.0f32.to_ne_bytes());
    assert_eq!(first[8..12], 23.5f32.to_ne_bytes());
    assert_eq!(first[12..16], 61.2f32.to_ne_bytes());
}

#[test]
fn mode_switch_restamps_the_frame_tag() {
    let (mut driver, controller) = make_driver(Mode::Temperature, "cpu,40.0%,");
    driver.run_cycle().unwrap();
    assert_eq!(driver.link().written[0][4..8], 3.0f32.to_ne_bytes());

    controller.set_mode(Mode::Usage);
    driver.run_cycle().unwrap();
    // The usage header also starts at slot 0.
    assert_eq!(driver.link().written[5][4..8], 4.0f32.to_ne_bytes());
}

#[test]
fn blank_selection_sends_its_raw_tag_once() {
    let (mut driver, controller) = make_driver(Mode::Usage, "");
    controller.set_mode(Mode::from_input("9").unwrap());

    driver.run_cycle().unwrap(); // change cycle, suppressed
    driver.run_cycle().unwrap(); // one-shot
    driver.run_cycle().unwrap(); // silent again

    assert_eq!(driver.link().written_lengths(), vec![8]);
    let payload = &driver.link().written[0];
    assert_eq!(payload[4..8], 9.0f32.to_ne_bytes());
}

#[test]
fn ack_timeout_is_survivable() {
    let controller = Arc::new(ModeController::new(Mode::Temperature));
    // Script: first cycle times out, second gets a normal ack.
    let mut link = MockLink::new();
    link.queue_response(MockResponse::Timeout);
    let mut driver = DisplayDriver::new(
        MockSource::new("cpu,42.0%,"),
        link,
        controller,
        test_config(),
    );

    assert_eq!(driver.run_cycle().unwrap(), CycleStatus::Continue);
    assert_eq!(driver.run_cycle().unwrap(), CycleStatus::Continue);
    assert_eq!(driver.cycles(), 2);
    assert_eq!(driver.link().reads, 2);
}

#[test]
fn disconnect_during_ack_is_fatal() {
    let controller = Arc::new(ModeController::new(Mode::Usage));
    let mut link = MockLink::new();
    link.queue_response(MockResponse::Disconnect);
    let mut driver = DisplayDriver::new(
        MockSource::new("cpu,42.0%,"),
        link,
        Arc::clone(&controller),
        test_config(),
    );
    assert!(driver.run_cycle().is_err());
}

#[test]
fn graceful_join_through_a_real_thread() {
    let controller = Arc::new(ModeController::new(Mode::Temperature));
    let mut driver = DisplayDriver::new(
        MockSource::new("cpu,42.0%,"),
        MockLink::new(),
        Arc::clone(&controller),
        DriverConfig::default()
            .with_boot_delay_ms(0)
            .with_cycle_interval_ms(1),
    );

    let handle = std::thread::spawn(move || {
        driver.run().unwrap();
        driver
    });

    // Let a few cycles happen, then request shutdown.
    std::thread::sleep(std::time::Duration::from_millis(20));
    controller.set_mode(Mode::Off);

    let driver = handle.join().unwrap();
    assert_eq!(driver.state(), DriverState::Stopped);
    assert!(driver.cycles() >= 1, "driver never completed a cycle");
    // Every completed cycle streamed five temperature slices.
    assert_eq!(driver.link().write_count() as u64, driver.cycles() * 5);
}
