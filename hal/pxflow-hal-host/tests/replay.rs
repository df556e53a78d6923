//! Replay a captured byte stream through the driver on the host

use std::io::Cursor;

use pxflow_core::{DecodedReading, FlowSensor};
use pxflow_drivers::{Px4Flow, TransportError};
use pxflow_hal_host::{parse_config, HostError, IoSource, StdClock};
use pxflow_protocol::{Frame, MSG_OPTICAL_FLOW};

fn capture(times_us: &[u64]) -> Vec<u8> {
    let mut stream = Vec::new();
    for (seq, &time_us) in times_us.iter().enumerate() {
        let reading = DecodedReading {
            time_us,
            flow_comp_x: 0.5,
            flow_comp_y: 0.25,
            ground_distance: 0.8,
            quality: 255,
            ..Default::default()
        };
        let mut frame = Frame::new(MSG_OPTICAL_FLOW, &reading.encode()).unwrap();
        frame.seq = seq as u8;
        stream.extend_from_slice(&frame.encode_to_vec());
        // Interleaved noise from other traffic on the link
        stream.extend_from_slice(&[0x00, 0x42]);
    }
    stream
}

#[test]
fn replay_capture_with_config() {
    let config = parse_config("[driver]\nread_chunk = 64\n").unwrap();
    let stream = capture(&[2_000_000, 2_020_000, 2_040_000, 2_060_000]);
    let refreshes = stream.len().div_ceil(64) + 1;

    let mut sensor = Px4Flow::new(
        IoSource::new(Cursor::new(stream)),
        StdClock::new(),
        config.driver,
    )
    .unwrap();
    for _ in 0..refreshes {
        sensor.refresh().unwrap();
    }

    assert_eq!(sensor.sample_count(), 4);
    assert_eq!(sensor.time_us(), Ok(2_060_000));
    assert_eq!(sensor.ground_distance(), Ok(0.8));
    assert!((sensor.x_accum() - 0.03).abs() < 1e-9);
    assert!((sensor.y_accum() - 0.015).abs() < 1e-9);
    assert!(sensor.counter().elapsed_s(sensor.now_us()) >= 0.0);
}

#[test]
fn exhausted_stream_is_not_an_error() {
    let stream = capture(&[1_000_000]);
    let mut sensor = Px4Flow::with_defaults(IoSource::new(Cursor::new(stream)), StdClock::new());

    sensor.refresh().unwrap();
    sensor.refresh().unwrap();
    sensor.refresh().unwrap();
    assert_eq!(sensor.sample_count(), 1);
}

#[test]
fn refresh_after_close_fails() {
    let mut sensor =
        Px4Flow::with_defaults(IoSource::new(Cursor::new(Vec::new())), StdClock::new());

    sensor.close().unwrap();
    sensor.close().unwrap();
    assert!(!sensor.is_open());
    assert!(matches!(sensor.refresh(), Err(TransportError::Closed)));
}

#[test]
fn read_failure_surfaces_as_transport_error() {
    struct Unplugged;

    impl std::io::Read for Unplugged {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::from(std::io::ErrorKind::BrokenPipe))
        }
    }

    let mut sensor = Px4Flow::with_defaults(IoSource::new(Unplugged), StdClock::new());
    assert!(matches!(
        sensor.refresh(),
        Err(TransportError::Read(HostError::Io(_)))
    ));
}
