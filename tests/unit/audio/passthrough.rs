use super::*;

const AAC_TB: Rational = Rational::new(1, 44_100);

struct Canned {
    packets: std::vec::IntoIter<Packet>,
}

impl Canned {
    fn new(n: i64) -> Self {
        let packets = (0..n)
            .map(|i| {
                let mut p = Packet::new(vec![0xFF, 0xF1, i as u8, 0x80], AAC_TB);
                p.pts = Some(i * 1024);
                p.dts = Some(i * 1024);
                p.duration = 1024;
                p.stream_index = 3;
                p
            })
            .collect::<Vec<_>>();
        Self {
            packets: packets.into_iter(),
        }
    }
}

impl PacketSource for Canned {
    type Params = ();

    fn time_base(&self) -> Rational {
        AAC_TB
    }

    fn stream_params(&self) {}

    fn next_packet(&mut self) -> ReelResult<Option<Packet>> {
        Ok(self.packets.next())
    }
}

fn audio_stream(time_base: Rational) -> StreamDescriptor {
    StreamDescriptor {
        index: 1,
        kind: MediaKind::Audio,
        time_base,
    }
}

#[test]
fn only_the_stream_index_changes() {
    let expected: Vec<Packet> = Canned::new(4).packets.collect();
    let mut a = AudioPassthrough::new(Canned::new(4));
    let mut sink = Vec::new();

    assert_eq!(a.forward_all(audio_stream(AAC_TB), &mut sink).unwrap(), 4);
    assert_eq!(a.forwarded(), 4);
    assert_eq!(sink.len(), expected.len());
    for (got, src) in sink.iter().zip(&expected) {
        assert_eq!(got.stream_index, 1);
        assert_eq!(
            Packet {
                stream_index: src.stream_index,
                ..got.clone()
            },
            *src
        );
    }
}

#[test]
fn changed_container_time_base_is_honoured() {
    let mut a = AudioPassthrough::new(Canned::new(2));
    let mut sink = Vec::new();
    a.forward_all(audio_stream(Rational::new(1, 1000)), &mut sink)
        .unwrap();

    assert_eq!(sink[1].pts, Some(23));
    assert_eq!(sink[1].time_base, Rational::new(1, 1000));
    assert_eq!(sink[1].data, vec![0xFF, 0xF1, 1, 0x80]);
}

#[test]
fn exhausted_source_forwards_nothing() {
    let mut a = AudioPassthrough::new(Canned::new(1));
    let mut sink = Vec::new();
    a.forward_all(audio_stream(AAC_TB), &mut sink).unwrap();
    assert_eq!(a.forward_all(audio_stream(AAC_TB), &mut sink).unwrap(), 0);
    assert_eq!(sink.len(), 1);
}

#[test]
fn video_destination_is_rejected() {
    let mut a = AudioPassthrough::new(Canned::new(1));
    let dest = StreamDescriptor {
        kind: MediaKind::Video,
        ..audio_stream(AAC_TB)
    };
    assert!(a.forward_all(dest, &mut Vec::new()).unwrap_err().is_state_violation());
}
