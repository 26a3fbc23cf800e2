use crate::foundation::core::Rational;

/// An encoded unit plus its timing, expressed in `time_base`.
///
/// Producers (the encoder driver, the audio passthrough) must rescale into the destination
/// stream's time base and stamp the destination stream index before handing a packet to the
/// muxer; the muxer rejects packets whose `time_base` differs from the stream's.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Packet {
    pub data: Vec<u8>,
    pub pts: Option<i64>,
    pub dts: Option<i64>,
    pub duration: i64,
    pub time_base: Rational,
    pub stream_index: usize,
    pub is_key: bool,
}

impl Packet {
    pub fn new(data: Vec<u8>, time_base: Rational) -> Self {
        Self {
            data,
            pts: None,
            dts: None,
            duration: 0,
            time_base,
            stream_index: 0,
            is_key: false,
        }
    }

    /// Convert pts, dts and duration into `to`. Missing timestamps stay missing.
    pub fn rescale_ts(&mut self, to: Rational) {
        let from = self.time_base;
        if from == to {
            return;
        }
        self.pts = self.pts.map(|ts| Rational::rescale(ts, from, to));
        self.dts = self.dts.map(|ts| Rational::rescale(ts, from, to));
        if self.duration > 0 {
            self.duration = Rational::rescale(self.duration, from, to);
        }
        self.time_base = to;
    }
}
