use std::sync::OnceLock;

use rust_embed::RustEmbed;

/// Everything under `assets/` ships inside the binary; the webview never
/// touches the filesystem for styling.
#[derive(RustEmbed)]
#[folder = "assets"]
struct EmbeddedAssets;

pub fn main_css() -> &'static str {
    static CELL: OnceLock<String> = OnceLock::new();
    CELL.get_or_init(|| text_asset("main.css")).as_str()
}

pub fn tailwind_css() -> &'static str {
    static CELL: OnceLock<String> = OnceLock::new();
    CELL.get_or_init(|| text_asset("tailwind.css")).as_str()
}

/// The favicon as a `data:` URI so it survives embedding.
pub fn favicon_data_uri() -> &'static str {
    static CELL: OnceLock<String> = OnceLock::new();
    CELL.get_or_init(|| {
        let bytes = raw_asset("favicon.svg");
        format!("data:image/svg+xml;base64,{}", encode_base64(&bytes))
    })
    .as_str()
}

fn text_asset(name: &str) -> String {
    let bytes = raw_asset(name);
    String::from_utf8(bytes).unwrap_or_else(|_| panic!("embedded asset {name} is not UTF-8"))
}

fn raw_asset(name: &str) -> Vec<u8> {
    EmbeddedAssets::get(name)
        .map(|file| file.data.into_owned())
        .unwrap_or_else(|| panic!("missing embedded asset: {name}"))
}

fn encode_base64(input: &[u8]) -> String {
    const TABLE: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";
    let mut out = Vec::with_capacity(input.len().div_ceil(3) * 4);

    for chunk in input.chunks(3) {
        let word = (u32::from(chunk[0]) << 16)
            | (u32::from(chunk.get(1).copied().unwrap_or(0)) << 8)
            | u32::from(chunk.get(2).copied().unwrap_or(0));

        out.push(TABLE[(word >> 18) as usize & 0x3f]);
        out.push(TABLE[(word >> 12) as usize & 0x3f]);
        out.push(if chunk.len() > 1 {
            TABLE[(word >> 6) as usize & 0x3f]
        } else {
            b'='
        });
        out.push(if chunk.len() > 2 {
            TABLE[word as usize & 0x3f]
        } else {
            b'='
        });
    }

    // TABLE and '=' are ASCII, so the buffer is valid UTF-8.
    String::from_utf8(out).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base64_matches_known_vectors() {
        assert_eq!(encode_base64(b""), "");
        assert_eq!(encode_base64(b"f"), "Zg==");
        assert_eq!(encode_base64(b"fo"), "Zm8=");
        assert_eq!(encode_base64(b"foo"), "Zm9v");
        assert_eq!(encode_base64(b"foobar"), "Zm9vYmFy");
    }

    #[test]
    fn stylesheets_are_embedded() {
        assert!(main_css().contains("body"));
        assert!(!tailwind_css().is_empty());
    }
}
