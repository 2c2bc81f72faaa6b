use std::fmt::Write;
use crate::types::HexDumpLine;
use crate::utils::{escape_html, format_bytes};

pub const BYTES_PER_LINE: usize = 16;

/// Largest prefix of a binary file rendered as a dump
pub const MAX_DISPLAY_SIZE: usize = 64 * 1024;

const HEADER: &str = "<div style=\"color: #666; margin-bottom: 8px;\">\
Offset&nbsp;&nbsp; 00 01 02 03 04 05 06 07 08 09 0A 0B 0C 0D 0E 0F  ASCII<br>\
--------  -----------------------------------------------  ----------------</div>\n";

/// Lines of a dump in offset order
pub fn hex_lines(data: &[u8]) -> impl Iterator<Item = HexDumpLine<'_>> {
    data.chunks(BYTES_PER_LINE)
        .enumerate()
        .map(|(i, bytes)| HexDumpLine { offset: i * BYTES_PER_LINE, bytes })
}

/// Offset / hex / ASCII dump of `data` as an HTML fragment
pub fn format_hex_dump(data: &[u8]) -> String {
    // ~100 bytes of markup per line
    let mut out = String::with_capacity(HEADER.len() + data.len() / BYTES_PER_LINE * 112 + 128);
    out.push_str("<div style=\"font-family: 'Courier New', monospace; font-size: 12px;\">\n");
    out.push_str(HEADER);

    for line in hex_lines(data) {
        let _ = write!(out, "<div><span style=\"color: #0366d6;\">{:08x}</span>  ", line.offset);
        for b in line.bytes {
            let _ = write!(out, "{:02x} ", b);
        }
        for _ in line.bytes.len()..BYTES_PER_LINE {
            out.push_str("   ");
        }
        out.push(' ');
        out.push_str(&escape_html(&line.ascii().collect::<String>()));
        out.push_str("</div>\n");
    }

    out.push_str("</div>");
    out
}

/// Dump page body for a binary file: metadata block followed by the dump
pub struct HexDumpFormatter;

impl HexDumpFormatter {
    pub fn new() -> Self {
        Self
    }

    /// `prefix` is the start of a file whose full length is `total_len`;
    /// `modified` is an optional pre-rendered metadata line.
    pub fn render(&self, name: &str, prefix: &[u8], total_len: u64, modified: &str) -> String {
        let shown = &prefix[..prefix.len().min(MAX_DISPLAY_SIZE)];
        let truncated = total_len > shown.len() as u64;

        let mut info = String::from(
            "<div style=\"margin-bottom: 20px; padding: 10px; background: var(--code-bg); \
border-radius: 5px; border: 1px solid var(--border-color);\">\n",
        );
        let _ = writeln!(info, "<strong>File:</strong> {}<br>", escape_html(name));
        info.push_str(modified);
        let _ = write!(info, "<strong>Size:</strong> {} bytes", format_bytes(total_len));
        if truncated {
            let _ = write!(info, " (showing first {})", format_bytes(shown.len() as u64));
        }
        info.push_str("\n</div>\n");

        info + &format_hex_dump(shown)
    }
}

impl Default for HexDumpFormatter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn data_lines(html: &str) -> usize {
        html.matches("<div><span").count()
    }

    #[test]
    fn short_line_with_nul() {
        let out = format_hex_dump(&[0x00, 0x41, 0x42, 0x43]);
        assert!(out.contains(">00000000</span>"));
        assert!(out.contains("00 41 42 43 "));
        assert!(out.contains(".ABC</div>"));
        let padded = format!("00 41 42 43 {} .ABC", "   ".repeat(12));
        assert!(out.contains(&padded), "{}", out);
    }

    #[test]
    fn html_characters_are_escaped_in_ascii_column() {
        let out = format_hex_dump(b"<>&\"A");
        assert!(out.contains("3c 3e 26 22 41"));
        assert!(out.contains("&lt;&gt;&amp;&quot;A"));
    }

    #[test]
    fn full_line() {
        let data: Vec<u8> = (0u8..16).collect();
        let out = format_hex_dump(&data);
        assert!(out.contains("00 01 02 03 04 05 06 07 08 09 0a 0b 0c 0d 0e 0f  ................"));
    }

    #[test]
    fn offsets_advance_by_sixteen() {
        let out = format_hex_dump(&[0u8; 33]);
        assert!(out.contains(">00000000<"));
        assert!(out.contains(">00000010<"));
        assert!(out.contains(">00000020<"));
        assert_eq!(data_lines(&out), 3);
    }

    #[test]
    fn header_precedes_data() {
        let out = format_hex_dump(&[1, 2, 3]);
        let header = out.find("Offset&nbsp;&nbsp;").unwrap();
        assert!(header < out.find("<div><span").unwrap());
    }

    #[test]
    fn empty_input_has_only_header() {
        assert_eq!(data_lines(&format_hex_dump(&[])), 0);
    }

    #[test]
    fn large_files_are_truncated() {
        let content = vec![0xffu8; MAX_DISPLAY_SIZE + 10];
        let out = HexDumpFormatter::new().render("blob.bin", &content, content.len() as u64, "");
        assert!(out.contains("<strong>Size:</strong> 64.0 KB bytes (showing first 64.0 KB)"));
        assert_eq!(data_lines(&out), MAX_DISPLAY_SIZE / BYTES_PER_LINE);
    }

    #[test]
    fn small_files_show_metadata_without_truncation() {
        let out = HexDumpFormatter::new().render("<odd>.bin", &[1, 2, 3], 3, "");
        assert!(out.contains("<strong>File:</strong> &lt;odd&gt;.bin<br>"));
        assert!(out.contains("<strong>Size:</strong> 3 bytes\n"));
        assert!(!out.contains("showing first"));
    }

    #[test]
    fn size_comes_from_total_length_not_prefix() {
        let prefix = vec![0u8; MAX_DISPLAY_SIZE];
        let out = HexDumpFormatter::new().render("huge.img", &prefix, 5 * 1024 * 1024 * 1024, "");
        assert!(out.contains("<strong>Size:</strong> 5.0 GB bytes (showing first 64.0 KB)"));
        assert_eq!(data_lines(&out), MAX_DISPLAY_SIZE / BYTES_PER_LINE);
    }

    proptest! {
        #[test]
        fn one_line_per_sixteen_bytes(data in proptest::collection::vec(any::<u8>(), 0..600)) {
            let out = format_hex_dump(&data);
            prop_assert_eq!(data_lines(&out), data.len().div_ceil(BYTES_PER_LINE));
        }

        #[test]
        fn lines_cover_input_in_order(data in proptest::collection::vec(any::<u8>(), 0..200)) {
            let joined: Vec<u8> = hex_lines(&data).flat_map(|l| l.bytes.iter().copied()).collect();
            prop_assert_eq!(joined, data.clone());
            for (i, line) in hex_lines(&data).enumerate() {
                prop_assert_eq!(line.offset, i * BYTES_PER_LINE);
            }
        }
    }
}
