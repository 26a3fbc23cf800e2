use crate::encode::packet::Packet;
use crate::foundation::core::Rational;
use crate::foundation::error::ReelResult;

/// Medium carried by an output stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Video,
    Audio,
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Video => "video",
            Self::Audio => "audio",
        })
    }
}

/// Per-output-stream metadata. Frozen once the header is written.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StreamDescriptor {
    pub index: usize,
    pub kind: MediaKind,
    pub time_base: Rational,
}

/// An output file format that stores interleaved packet streams.
///
/// Implementations own format-specific interleaving (reordering by decode timestamp, index
/// construction); callers only guarantee the ordering rules enforced by
/// [`Muxer`](crate::mux::muxer::Muxer).
pub trait Container {
    type Params;

    /// Register a stream and return its index in the container's stream table.
    fn add_stream(
        &mut self,
        kind: MediaKind,
        time_base: Rational,
        params: &Self::Params,
    ) -> ReelResult<usize>;

    fn write_header(&mut self) -> ReelResult<()>;

    /// Time base the container settled on for `index`; may differ from the declared one after
    /// the header is written.
    fn stream_time_base(&self, index: usize) -> ReelResult<Rational>;

    fn write_interleaved(&mut self, packet: Packet) -> ReelResult<()>;

    fn write_trailer(&mut self) -> ReelResult<()>;
}

/// Anything packets can be forwarded to.
pub trait PacketSink {
    fn write_packet(&mut self, packet: Packet) -> ReelResult<()>;
}

impl PacketSink for Vec<Packet> {
    fn write_packet(&mut self, packet: Packet) -> ReelResult<()> {
        self.push(packet);
        Ok(())
    }
}
