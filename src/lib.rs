#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod audio;
pub mod config;
pub mod encode;
#[cfg(feature = "ffmpeg")]
#[cfg_attr(docsrs, doc(cfg(feature = "ffmpeg")))]
pub mod ffmpeg;
pub mod foundation;
pub mod mux;
pub mod output;
pub mod pipeline;
pub mod render;
pub mod script;
pub mod source;

pub use audio::{AudioPassthrough, PacketSource};
pub use config::RenderConfig;
pub use encode::codec::{
    EncoderSettings, RAW_CODEC_NAME, RawVideoCodec, Receive, SendStatus, StreamParams, VideoCodec,
};
pub use encode::driver::{EncoderDriver, EncoderState};
pub use encode::frame::EncoderFrame;
pub use encode::packet::Packet;
pub use foundation::core::{Fps, FrameIndex, Rational, Rgb8};
pub use foundation::error::{ReelError, ReelResult};
pub use mux::container::{Container, MediaKind, PacketSink, StreamDescriptor};
pub use mux::elementary::ElementaryStream;
pub use mux::muxer::{Muxer, MuxerState};
pub use output::{document::write_pdf, render_single_frame, still::write_png};
pub use pipeline::{RenderStats, VideoPipeline};
pub use render::draw::DrawContext;
pub use render::font::FontFace;
pub use render::surface::Surface;
pub use script::ReelScript;
pub use source::{FrameSource, FrameStatus, from_fn};
