use super::*;

fn settings(codec: &str) -> EncoderSettings {
    EncoderSettings {
        codec: codec.to_string(),
        width: 2,
        height: 1,
        bit_rate: 0,
        gop_size: 1,
        fps: Fps::default(),
    }
}

#[test]
fn settings_validation_catches_bad_values() {
    assert!(settings("raw").validate().is_ok());
    assert!(
        EncoderSettings {
            width: 0,
            ..settings("raw")
        }
        .validate()
        .is_err()
    );
    assert!(
        EncoderSettings {
            gop_size: 0,
            ..settings("raw")
        }
        .validate()
        .is_err()
    );
    assert!(settings(" ").validate().is_err());
}

#[test]
fn raw_codec_refuses_other_names() {
    let err = RawVideoCodec::open(settings("libx264rgb")).unwrap_err();
    assert!(matches!(err, ReelError::Setup(_)));
}

#[test]
fn raw_codec_emits_one_packet_per_frame_then_drains() {
    let mut codec = RawVideoCodec::open(settings(RAW_CODEC_NAME)).unwrap();
    assert_eq!(codec.receive_packet().unwrap(), Receive::Again);

    let mut frame = EncoderFrame::new(2, 1).unwrap();
    frame.row_mut(0).copy_from_slice(&[1, 2, 3, 4, 5, 6]);
    frame.set_pts(0);
    assert_eq!(codec.send_frame(Some(&frame)).unwrap(), SendStatus::Accepted);

    let Receive::Packet(p) = codec.receive_packet().unwrap() else {
        panic!("expected a packet");
    };
    assert_eq!(p.data, vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(p.pts, Some(0));
    assert_eq!(p.time_base, Rational::new(1, 30));
    assert!(p.is_key);
    assert_eq!(codec.receive_packet().unwrap(), Receive::Again);

    codec.send_frame(None).unwrap();
    assert_eq!(codec.receive_packet().unwrap(), Receive::Eof);
    assert!(codec.send_frame(Some(&frame)).is_err());
}

#[test]
fn raw_codec_requires_pts() {
    let mut codec = RawVideoCodec::open(settings(RAW_CODEC_NAME)).unwrap();
    let frame = EncoderFrame::new(2, 1).unwrap();
    assert!(codec.send_frame(Some(&frame)).is_err());
}
