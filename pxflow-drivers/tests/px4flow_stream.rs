//! End-to-end tests: encoded MAVLink stream in, typed readings out

use pxflow_core::{AccessError, DecodedReading, DriverConfig, FlowSensor};
use pxflow_drivers::Px4Flow;
use pxflow_hal::{Clock, EmbeddedIoSource};
use pxflow_protocol::{Frame, MSG_OPTICAL_FLOW};

struct FixedClock;

impl Clock for FixedClock {
    fn now_us(&self) -> u64 {
        0
    }
}

fn encode(msg_id: u8, seq: u8, payload: &[u8]) -> Vec<u8> {
    let mut frame = Frame::new(msg_id, payload).unwrap();
    frame.seq = seq;
    frame.sys_id = 81;
    frame.comp_id = 50;
    frame.checksum = 0x1234;
    frame.encode_to_vec().to_vec()
}

fn scenario_reading() -> DecodedReading {
    DecodedReading {
        time_us: 1_000_000_000_000,
        flow_comp_x: 1.5,
        flow_comp_y: -2.0,
        ground_distance: 1.25,
        raw_flow_x: 10,
        raw_flow_y: -5,
        sensor_id: 0,
        quality: 200,
    }
}

#[test]
fn scenario_fields_decode_exactly() {
    let stream = encode(MSG_OPTICAL_FLOW, 0, &scenario_reading().encode());
    let mut sensor = Px4Flow::with_defaults(EmbeddedIoSource::new(&stream[..]), FixedClock);

    assert_eq!(sensor.time_us(), Err(AccessError::NoReading));
    sensor.refresh().unwrap();

    assert_eq!(sensor.time_us(), Ok(1_000_000_000_000));
    assert_eq!(sensor.flow_comp(), Ok((1.5, -2.0)));
    assert_eq!(sensor.ground_distance(), Ok(1.25));
    assert_eq!(sensor.flow(), Ok((10, -5)));
    assert_eq!(sensor.quality(), Ok(200));
}

#[test]
fn noisy_link_with_other_messages() {
    let mut stream = vec![0x00, 0x13, 0x37, 0xFE, 0x05, 0x01];
    // HEARTBEAT-sized frame for another message id
    stream.extend(encode(0, 1, &[0, 0, 0, 0, 6, 8, 0, 0, 3]));
    stream.extend([0xAB, 0xCD]);
    stream.extend(encode(MSG_OPTICAL_FLOW, 2, &scenario_reading().encode()));

    let mut sensor = Px4Flow::with_defaults(EmbeddedIoSource::new(&stream[..]), FixedClock);
    sensor.refresh().unwrap();

    assert_eq!(sensor.reading(), Ok(&scenario_reading()));
    assert_eq!(sensor.sample_count(), 1);
    assert_eq!(sensor.parser_stats().frames_ignored, 1);
    assert_eq!(sensor.parser_stats().resyncs, 1);
}

#[test]
fn position_accumulates_over_stream() {
    let mut stream = Vec::new();
    for (seq, time_us) in [1_000_000u64, 1_050_000, 1_100_000, 1_400_000, 1_450_000]
        .into_iter()
        .enumerate()
    {
        let reading = DecodedReading {
            time_us,
            flow_comp_x: 2.0,
            flow_comp_y: -1.0,
            ..Default::default()
        };
        stream.extend(encode(MSG_OPTICAL_FLOW, seq as u8, &reading.encode()));
    }

    let config = DriverConfig {
        read_chunk: 16,
        ..Default::default()
    };
    let mut sensor =
        Px4Flow::new(EmbeddedIoSource::new(&stream[..]), FixedClock, config).unwrap();
    for _ in 0..stream.len().div_ceil(16) {
        sensor.refresh().unwrap();
    }

    // Three 50 ms steps integrate; the 300 ms gap does not
    assert_eq!(sensor.sample_count(), 5);
    assert!((sensor.x_accum() - 0.3).abs() < 1e-9);
    assert!((sensor.y_accum() + 0.15).abs() < 1e-9);
    assert_eq!(sensor.position().prev_timestamp_s(), Some(1.45));
}

#[test]
fn configurable_gap_threshold() {
    let mut stream = Vec::new();
    for time_us in [1_000_000u64, 1_200_000] {
        let reading = DecodedReading {
            time_us,
            flow_comp_x: 1.0,
            ..Default::default()
        };
        stream.extend(encode(MSG_OPTICAL_FLOW, 0, &reading.encode()));
    }

    let config = DriverConfig {
        gap_threshold_s: 0.5,
        ..Default::default()
    };
    let mut sensor =
        Px4Flow::new(EmbeddedIoSource::new(&stream[..]), FixedClock, config).unwrap();
    sensor.refresh().unwrap();

    assert!((sensor.x_accum() - 0.2).abs() < 1e-9);
}
