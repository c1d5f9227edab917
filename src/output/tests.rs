//! Lifecycle and delivery tests for the streaming output
//!
//! These drive [`StreamingOutput`] against the recording transport and check
//! what reached the handle: acquisition, handshake, writes and release.

use super::*;
use crate::test_utils::{MockProvider, TransportEvent};
use crate::types::FrameFlags;
use proptest::prelude::*;
use tracing::info;

fn h264_room1() -> OutputOptions {
    OutputOptions::new("room1")
}

#[test]
fn streams_frames_with_inter_frame_durations() {
    let _ = tracing_subscriber::fmt::try_init();

    let provider = MockProvider::new();
    let log = provider.log();

    {
        let mut output = StreamingOutput::new(&h264_room1(), provider);
        assert_eq!(output.state(), OutputState::Streaming);
        assert_eq!(output.connection_result(), ConnectionResult::Connected);
        assert_eq!(output.codec(), Some(Codec::H264));

        output.output_buffer(b"B0", 1000, FrameFlags::new(FrameFlags::KEYFRAME));
        output.output_buffer(b"B1", 1033, FrameFlags::default());
        output.output_buffer(b"B2", 1066, FrameFlags::default());

        assert_eq!(output.stats().frames_sent, 3);
        assert_eq!(output.stats().bytes_sent, 6);
    }

    assert_eq!(
        log.events(),
        vec![
            TransportEvent::Acquired { id: 0 },
            TransportEvent::WaitForConnection { id: 0, session: "room1".to_string() },
            TransportEvent::WriteVideo { id: 0, data: b"B0".to_vec(), duration_us: 1000 },
            TransportEvent::WriteVideo { id: 0, data: b"B1".to_vec(), duration_us: 33 },
            TransportEvent::WriteVideo { id: 0, data: b"B2".to_vec(), duration_us: 33 },
            TransportEvent::Released { id: 0 },
        ]
    );
}

#[test]
fn unsupported_codec_never_touches_the_transport() {
    let provider = MockProvider::new();
    let log = provider.log();
    let options = h264_room1().with_codec("vp8");

    {
        let mut output = StreamingOutput::new(&options, provider);
        assert_eq!(output.state(), OutputState::Failed);
        assert_eq!(output.connection_result(), ConnectionResult::NotAttempted);
        assert!(matches!(
            output.failure(),
            Some(OutputError::UnsupportedCodec { codec }) if codec == "vp8"
        ));
        assert_eq!(output.codec(), None);

        output.output_buffer(b"frame", 1000, FrameFlags::default());
        assert!(matches!(
            output.deliver(b"frame", 2000, FrameFlags::default()),
            Err(OutputError::NotStreaming)
        ));
        assert_eq!(output.stats().frames_dropped, 2);
        assert_eq!(output.last_timestamp_us(), 2000);
    }

    assert!(log.events().is_empty(), "no acquisition, handshake or release expected");
}

#[test]
fn invalid_session_name_is_a_configuration_error() {
    let provider = MockProvider::new();
    let log = provider.log();

    let output = StreamingOutput::new(&OutputOptions::new("ro\0om"), provider);
    assert_eq!(output.connection_result(), ConnectionResult::NotAttempted);
    assert!(matches!(output.failure(), Some(OutputError::InvalidSessionName { .. })));
    assert_eq!(output.session_name(), "ro\0om");
    drop(output);

    assert_eq!(log.acquired(), 0);
    assert_eq!(log.waits(), 0);
}

#[test]
fn empty_session_name_is_passed_to_the_transport() {
    let provider = MockProvider::new();
    let log = provider.log();

    let output = StreamingOutput::new(&OutputOptions::new(""), provider);
    assert_eq!(output.state(), OutputState::Streaming);
    assert_eq!(output.connection_result(), ConnectionResult::Connected);
    drop(output);

    assert_eq!(
        log.events(),
        vec![
            TransportEvent::Acquired { id: 0 },
            TransportEvent::WaitForConnection { id: 0, session: String::new() },
            TransportEvent::Released { id: 0 },
        ]
    );
}

#[test]
fn restart_flag_does_not_change_delivery() {
    let provider = MockProvider::new();
    let log = provider.log();

    {
        let mut output = StreamingOutput::new(&h264_room1(), provider);
        output.output_buffer(b"B0", 1000, FrameFlags::default());
        let restart = FrameFlags::new(FrameFlags::KEYFRAME | FrameFlags::RESTART);
        assert!(output.deliver(b"B1", 5000, restart).is_ok());
        assert_eq!(output.stats().frames_sent, 2);
    }

    assert!(log.events().contains(&TransportEvent::WriteVideo {
        id: 0,
        data: b"B1".to_vec(),
        duration_us: 4000,
    }));
}

#[test]
fn failed_acquisition_leaves_nothing_to_release() {
    let provider = MockProvider::new().failing_acquire();
    let log = provider.log();

    let mut output = StreamingOutput::new(&h264_room1(), provider);
    assert_eq!(output.state(), OutputState::Failed);
    assert_eq!(output.connection_result(), ConnectionResult::Failed);
    assert!(matches!(output.failure(), Some(OutputError::TransportInit { .. })));

    output.output_buffer(b"frame", 1000, FrameFlags::default());
    drop(output);

    assert_eq!(log.acquired(), 0);
    assert_eq!(log.released(), 0);
    assert_eq!(log.waits(), 0);
}

#[test]
fn degraded_output_keeps_attempting_writes() {
    let provider = MockProvider::new().refusing_connection().with_default_write(false);
    let log = provider.log();
    let options = h264_room1();

    {
        let mut output = StreamingOutput::new(&options, provider);
        assert_eq!(output.state(), OutputState::Failed);
        assert_eq!(output.connection_result(), ConnectionResult::Failed);
        assert!(matches!(
            output.failure(),
            Some(OutputError::Connection { session }) if session == "room1"
        ));

        assert_eq!(
            options.on_connection_failure.decide(output.connection_result()),
            Escalation::Continue
        );

        for ts in [1000, 1033, 1066] {
            output.output_buffer(b"frame", ts, FrameFlags::default());
        }
        assert_eq!(output.stats().frames_dropped, 3);
        assert_eq!(output.last_timestamp_us(), 1066);
    }

    assert_eq!(log.write_durations(), vec![1000, 33, 33]);
    assert_eq!(log.acquired(), 1);
    assert_eq!(log.released(), 1);
}

#[test]
fn terminate_policy_escalates_before_any_frame() {
    let provider = MockProvider::new().refusing_connection();
    let log = provider.log();
    let options = h264_room1().with_failure_policy(FailurePolicy::terminate());

    let output = StreamingOutput::new(&options, provider);
    assert_eq!(
        options.on_connection_failure.decide(output.connection_result()),
        Escalation::Exit(CONNECTION_FAILURE_EXIT_STATUS)
    );
    assert!(log.write_durations().is_empty());
}

#[test]
fn failed_write_does_not_stop_later_frames() {
    let provider = MockProvider::new().with_write_results([true, false, true]);
    let log = provider.log();

    let mut output = StreamingOutput::new(&h264_room1(), provider);
    assert!(output.deliver(b"B0", 1000, FrameFlags::default()).is_ok());

    let err = output.deliver(b"B1x", 1033, FrameFlags::default()).unwrap_err();
    assert!(matches!(err, OutputError::TransportWrite { len: 3, duration_us: 33 }));
    assert_eq!(output.last_timestamp_us(), 1033);
    assert!(output.is_streaming());

    assert!(output.deliver(b"B2", 1066, FrameFlags::default()).is_ok());

    let stats = output.stats();
    assert_eq!((stats.frames_sent, stats.frames_dropped, stats.bytes_sent), (2, 1, 4));
    assert_eq!(log.write_durations(), vec![1000, 33, 33]);
}

#[test]
fn backwards_timestamps_follow_the_policy() {
    let provider = MockProvider::new().without_payloads();
    let log = provider.log();
    let mut output = StreamingOutput::new(&h264_room1(), provider);
    output.output_buffer(b"a", 5000, FrameFlags::default());
    output.output_buffer(b"b", 4000, FrameFlags::default());
    drop(output);
    assert_eq!(log.write_durations(), vec![5000, (-1000i64) as u64]);

    let provider = MockProvider::new().without_payloads();
    let log = provider.log();
    let options = h264_room1().with_timestamp_policy(TimestampPolicy::ClampToZero);
    let mut output = StreamingOutput::new(&options, provider);
    output.output_buffer(b"a", 5000, FrameFlags::default());
    output.output_buffer(b"b", 4000, FrameFlags::default());
    output.output_buffer(b"c", 4033, FrameFlags::default());
    drop(output);
    assert_eq!(log.write_durations(), vec![5000, 0, 33]);
}

#[test]
fn closure_providers_are_accepted() {
    let mock = MockProvider::new();
    let log = mock.log();
    let mut mock = Some(mock);

    let provider = move || match mock.take() {
        Some(mut provider) => provider.acquire(),
        None => Err(OutputError::transport_init("already used")),
    };

    let output = StreamingOutput::new(&h264_room1(), provider);
    assert!(output.is_streaming());
    drop(output);
    assert_eq!(log.released(), 1);
}

#[tokio::test]
async fn connect_async_runs_the_handshake_off_the_runtime() {
    let provider = MockProvider::new();
    let log = provider.log();

    let mut output = StreamingOutput::connect_async(h264_room1(), provider)
        .await
        .expect("handshake task should complete");
    assert!(output.is_streaming());
    info!("Connected through blocking pool");

    let frames = futures::stream::iter(vec![
        EncodedFrame::new(b"B0".to_vec(), 1000, FrameFlags::new(FrameFlags::KEYFRAME)),
        EncodedFrame::new(b"B1".to_vec(), 1033, FrameFlags::default()),
        EncodedFrame::new(b"B2".to_vec(), 1066, FrameFlags::default()),
    ]);
    let stats = output.forward(frames).await;

    assert_eq!(stats.frames_sent, 3);
    assert_eq!(log.write_payloads(), vec![b"B0".to_vec(), b"B1".to_vec(), b"B2".to_vec()]);
    assert_eq!(log.write_durations(), vec![1000, 33, 33]);

    drop(output);
    assert_eq!(log.released(), 1);
}

proptest! {
    #[test]
    fn every_write_carries_the_gap_since_the_previous_frame(
        gaps in prop::collection::vec(1i64..100_000i64, 1..32),
        results in prop::collection::vec(any::<bool>(), 0..32)
    ) {
        let provider = MockProvider::new().without_payloads().with_write_results(results);
        let log = provider.log();

        let mut timestamps = Vec::with_capacity(gaps.len());
        let mut ts = 0i64;
        for gap in &gaps {
            ts += gap;
            timestamps.push(ts);
        }

        {
            let mut output = StreamingOutput::new(&h264_room1(), provider);
            for &ts in &timestamps {
                output.output_buffer(&[0u8; 4], ts, FrameFlags::default());
                prop_assert_eq!(output.last_timestamp_us(), ts);
            }
            prop_assert_eq!(output.stats().frames_total(), timestamps.len() as u64);
        }

        let expected: Vec<u64> = gaps.iter().map(|g| *g as u64).collect();
        prop_assert_eq!(log.write_durations(), expected);
        prop_assert_eq!(log.acquired(), 1);
        prop_assert_eq!(log.released(), 1);
    }
}
