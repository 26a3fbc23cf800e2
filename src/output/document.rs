use std::io::Write as _;
use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::ReelResult;
use crate::output::packed_rgb;
use crate::render::surface::Surface;

/// Single-page PDF holding the frame as an uncompressed RGB image, one point per pixel.
pub fn pdf_bytes(surface: &Surface) -> ReelResult<Vec<u8>> {
    let (w, h) = (surface.width(), surface.height());
    let rgb = packed_rgb(surface)?;
    let content = format!("q {w} 0 0 {h} 0 0 cm /Im0 Do Q\n");

    let mut out: Vec<u8> = Vec::with_capacity(rgb.len() + 1024);
    let mut offsets = Vec::with_capacity(5);
    out.extend_from_slice(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");

    offsets.push(out.len());
    out.extend_from_slice(b"1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n");

    offsets.push(out.len());
    out.extend_from_slice(b"2 0 obj\n<< /Type /Pages /Kids [3 0 R] /Count 1 >>\nendobj\n");

    offsets.push(out.len());
    write!(
        out,
        "3 0 obj\n<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {w} {h}] \
         /Resources << /XObject << /Im0 4 0 R >> >> /Contents 5 0 R >>\nendobj\n"
    )
    .context("format pdf page")?;

    offsets.push(out.len());
    write!(
        out,
        "4 0 obj\n<< /Type /XObject /Subtype /Image /Width {w} /Height {h} \
         /ColorSpace /DeviceRGB /BitsPerComponent 8 /Length {} >>\nstream\n",
        rgb.len()
    )
    .context("format pdf image")?;
    out.extend_from_slice(&rgb);
    out.extend_from_slice(b"\nendstream\nendobj\n");

    offsets.push(out.len());
    write!(
        out,
        "5 0 obj\n<< /Length {} >>\nstream\n{content}endstream\nendobj\n",
        content.len()
    )
    .context("format pdf contents")?;

    let xref = out.len();
    write!(out, "xref\n0 {}\n0000000000 65535 f \n", offsets.len() + 1)
        .context("format pdf xref")?;
    for off in &offsets {
        write!(out, "{off:010} 00000 n \n").context("format pdf xref")?;
    }
    write!(
        out,
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref}\n%%EOF\n",
        offsets.len() + 1
    )
    .context("format pdf trailer")?;

    Ok(out)
}

pub fn write_pdf(surface: &Surface, path: &Path) -> ReelResult<()> {
    let bytes = pdf_bytes(surface)?;
    std::fs::write(path, &bytes).with_context(|| format!("write pdf '{}'", path.display()))?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "wrote page");
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/output/document.rs"]
mod tests;
