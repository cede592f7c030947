use encoding_rs::{Encoding, UTF_8};

/// Decode a listing body to text: BOM, then the Content-Type charset, then UTF-8.
/// Malformed sequences become U+FFFD.
pub fn decode_body(bytes: &[u8], content_type: Option<&str>) -> String {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        let (text, _) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        return text.into_owned();
    }

    let encoding = content_type
        .and_then(declared_charset)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .unwrap_or(UTF_8);
    let (text, _) = encoding.decode_without_bom_handling(bytes);
    text.into_owned()
}

fn declared_charset(content_type: &str) -> Option<String> {
    content_type.split(';').skip(1).find_map(|part| {
        let (key, value) = part.split_once('=')?;
        if key.trim().eq_ignore_ascii_case("charset") {
            Some(value.trim().trim_matches(['"', '\'']).to_string())
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_utf8_without_declaration() {
        assert_eq!(decode_body("jdk-21.0.1 ✓".as_bytes(), None), "jdk-21.0.1 ✓");
    }

    #[test]
    fn declared_latin1_is_honoured() {
        let bytes = [b'c', b'a', b'f', 0xE9];
        let text = decode_body(&bytes, Some("text/html; Charset=\"ISO-8859-1\""));
        assert_eq!(text, "café");
    }

    #[test]
    fn bom_wins_over_header() {
        let bytes = [0xEF, 0xBB, 0xBF, b'o', b'k'];
        assert_eq!(decode_body(&bytes, Some("text/html; charset=latin1")), "ok");
    }

    #[test]
    fn invalid_bytes_are_replaced() {
        let bytes = [b'a', 0xFF, b'b'];
        assert_eq!(decode_body(&bytes, None), "a\u{FFFD}b");
    }
}
