use crate::foundation::error::{ReelError, ReelResult};

/// Bytes per EncoderFrame pixel (packed red, green, blue).
pub const RGB24_BYTES_PER_PIXEL: usize = 3;

/// Row alignment of the frame buffer, matching what libav picks for its own frame pools.
pub const FRAME_LINE_ALIGN: usize = 32;

/// Codec-facing frame buffer in packed RGB24.
///
/// The buffer is reused for every frame. It must be made writable before each write; submitting
/// it to an encoder marks it in-flight (not writable) again, so a stale write into memory still
/// referenced by an encode is caught instead of silently corrupting the picture.
#[derive(Clone, Debug)]
pub struct EncoderFrame {
    width: u32,
    height: u32,
    linesize: usize,
    data: Vec<u8>,
    pts: Option<i64>,
    writable: bool,
}

impl EncoderFrame {
    pub fn new(width: u32, height: u32) -> ReelResult<Self> {
        let tight = width as usize * RGB24_BYTES_PER_PIXEL;
        Self::with_linesize(width, height, tight.div_ceil(FRAME_LINE_ALIGN) * FRAME_LINE_ALIGN)
    }

    pub fn with_linesize(width: u32, height: u32, linesize: usize) -> ReelResult<Self> {
        if width == 0 || height == 0 {
            return Err(ReelError::validation("frame width/height must be non-zero"));
        }
        if linesize < width as usize * RGB24_BYTES_PER_PIXEL {
            return Err(ReelError::validation(format!(
                "frame linesize {linesize} is smaller than {} bytes per row",
                width as usize * RGB24_BYTES_PER_PIXEL
            )));
        }
        Ok(Self {
            width,
            height,
            linesize,
            data: vec![0u8; linesize * height as usize],
            pts: None,
            writable: true,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Distance in bytes between the starts of two consecutive rows.
    pub fn linesize(&self) -> usize {
        self.linesize
    }

    pub fn pts(&self) -> Option<i64> {
        self.pts
    }

    pub fn set_pts(&mut self, pts: i64) {
        self.pts = Some(pts);
    }

    pub fn is_writable(&self) -> bool {
        self.writable
    }

    /// Detach the buffer from any in-flight encode so it can be overwritten.
    pub fn make_writable(&mut self) {
        self.writable = true;
    }

    /// Called by the encoder driver once the frame has been handed to a codec.
    pub(crate) fn mark_in_flight(&mut self) {
        self.writable = false;
    }

    /// Pixel bytes of row `y`, without the line padding.
    pub fn row(&self, y: u32) -> &[u8] {
        assert!(y < self.height, "frame row {y} out of bounds");
        let start = self.linesize * y as usize;
        &self.data[start..start + self.width as usize * RGB24_BYTES_PER_PIXEL]
    }

    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        assert!(
            self.writable,
            "encoder frame written while still owned by an in-flight encode"
        );
        assert!(y < self.height, "frame row {y} out of bounds");
        let start = self.linesize * y as usize;
        let len = self.width as usize * RGB24_BYTES_PER_PIXEL;
        &mut self.data[start..start + len]
    }

    pub fn rgb(&self, x: u32, y: u32) -> [u8; 3] {
        assert!(x < self.width, "frame column {x} out of bounds");
        let row = self.row(y);
        let o = x as usize * RGB24_BYTES_PER_PIXEL;
        [row[o], row[o + 1], row[o + 2]]
    }

    /// Copy the picture out with tight rows (`width * 3` bytes each).
    pub fn to_packed_rgb(&self) -> Vec<u8> {
        let mut out =
            Vec::with_capacity(self.width as usize * self.height as usize * RGB24_BYTES_PER_PIXEL);
        for y in 0..self.height {
            out.extend_from_slice(self.row(y));
        }
        out
    }
}
