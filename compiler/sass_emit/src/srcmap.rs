//! Source map v3 JSON (§4.7 `render_srcmap`), built manually — like the
//! host's diagnostic JSON emitter, to avoid a serde dependency for a
//! handful of fixed fields.

const BASE64_ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// One mapping entry: a generated position in the output, the resource
/// index it came from, and its original position in that resource.
#[derive(Clone, Copy, Debug)]
pub struct Mapping {
    pub generated_line: u32,
    pub generated_col: u32,
    pub source_index: u32,
    pub original_line: u32,
    pub original_col: u32,
}

/// Encode a signed value as base64 VLQ, per the source-map v3 spec: the
/// least-significant bit of the first chunk is the sign, the next four
/// bits are the low four value bits, and bit 5 of every chunk (the
/// continuation bit) signals whether another chunk follows.
fn encode_vlq(value: i64) -> String {
    let mut n: u64 = if value < 0 {
        ((-value) as u64) << 1 | 1
    } else {
        (value as u64) << 1
    };
    let mut out = String::new();
    loop {
        let mut digit = (n & 0b1_1111) as u8;
        n >>= 5;
        if n > 0 {
            digit |= 0b10_0000;
        }
        out.push(BASE64_ALPHABET[digit as usize] as char);
        if n == 0 {
            break;
        }
    }
    out
}

/// Encode `mappings` (assumed sorted by `generated_line`, then
/// `generated_col`) into the `mappings` field's VLQ-group string.
pub fn encode_mappings(mappings: &[Mapping]) -> String {
    let mut out = String::new();
    let mut current_line = 0u32;
    let mut prev_generated_col = 0i64;
    let mut prev_source = 0i64;
    let mut prev_orig_line = 0i64;
    let mut prev_orig_col = 0i64;
    let mut first_on_line = true;

    for m in mappings {
        while current_line < m.generated_line {
            out.push(';');
            current_line += 1;
            prev_generated_col = 0;
            first_on_line = true;
        }
        if !first_on_line {
            out.push(',');
        }
        first_on_line = false;

        out.push_str(&encode_vlq(i64::from(m.generated_col) - prev_generated_col));
        out.push_str(&encode_vlq(i64::from(m.source_index) - prev_source));
        out.push_str(&encode_vlq(i64::from(m.original_line) - prev_orig_line));
        out.push_str(&encode_vlq(i64::from(m.original_col) - prev_orig_col));

        prev_generated_col = i64::from(m.generated_col);
        prev_source = i64::from(m.source_index);
        prev_orig_line = i64::from(m.original_line);
        prev_orig_col = i64::from(m.original_col);
    }

    out
}

fn escape_json(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out
}

/// Render a complete source-map v3 JSON document.
pub fn render_srcmap(file: &str, sources: &[String], mappings: &[Mapping]) -> String {
    let mut out = String::new();
    out.push_str("{\n");
    out.push_str("  \"version\": 3,\n");
    out.push_str(&format!("  \"file\": \"{}\",\n", escape_json(file)));
    out.push_str("  \"sources\": [");
    for (i, src) in sources.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(&format!("\"{}\"", escape_json(src)));
    }
    out.push_str("],\n");
    out.push_str("  \"names\": [],\n");
    out.push_str(&format!(
        "  \"mappings\": \"{}\"\n",
        encode_mappings(mappings)
    ));
    out.push_str("}\n");
    out
}
