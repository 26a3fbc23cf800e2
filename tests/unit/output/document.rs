use super::*;
use crate::foundation::core::Rgb8;

fn find(hay: &[u8], needle: &[u8]) -> Option<usize> {
    hay.windows(needle.len()).position(|w| w == needle)
}

#[test]
fn page_embeds_the_frame_as_rgb() {
    let mut s = Surface::aligned(3, 2, 64).unwrap();
    s.fill(Rgb8::WHITE);
    s.set_rgb(0, 0, Rgb8::new(1, 2, 3));
    let pdf = pdf_bytes(&s).unwrap();

    assert!(pdf.starts_with(b"%PDF-1.4\n"));
    assert!(pdf.ends_with(b"%%EOF\n"));
    assert!(find(&pdf, b"/MediaBox [0 0 3 2]").is_some());
    assert!(find(&pdf, b"/Length 18 >>").is_some());

    let start = find(&pdf, b"stream\n").unwrap() + b"stream\n".len();
    assert_eq!(&pdf[start..start + 6], &[1, 2, 3, 255, 255, 255]);
}

#[test]
fn xref_offsets_point_at_objects() {
    let s = Surface::new(2, 2).unwrap();
    let pdf = pdf_bytes(&s).unwrap();
    let text = String::from_utf8_lossy(&pdf);

    let startxref: usize = text
        .rsplit("startxref\n")
        .next()
        .and_then(|t| t.lines().next())
        .unwrap()
        .parse()
        .unwrap();
    assert!(pdf[startxref..].starts_with(b"xref\n0 6\n"));

    let table = String::from_utf8_lossy(&pdf[startxref..]);
    for (n, line) in table.lines().skip(3).take(5).enumerate() {
        let off: usize = line[..10].parse().unwrap();
        let header = format!("{} 0 obj", n + 1);
        assert!(pdf[off..].starts_with(header.as_bytes()), "object {}", n + 1);
    }
}

#[test]
fn writes_file() {
    let dir = std::path::PathBuf::from("target").join("output_unit");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("page.pdf");
    write_pdf(&Surface::new(4, 4).unwrap(), &path).unwrap();
    assert!(std::fs::read(&path).unwrap().starts_with(b"%PDF"));
}
