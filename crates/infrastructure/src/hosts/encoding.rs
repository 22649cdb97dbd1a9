use tracing::warn;

/// Text encoding the hosts file was read with. Non-UTF-8 files are treated
/// as Latin-1 so every byte round-trips unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    Latin1,
}

pub fn decode(bytes: Vec<u8>, path: &str) -> (String, TextEncoding) {
    match String::from_utf8(bytes) {
        Ok(text) => (text, TextEncoding::Utf8),
        Err(e) => {
            warn!(path = %path, "Hosts file is not valid UTF-8, reading it as Latin-1");
            let text = e.into_bytes().into_iter().map(char::from).collect();
            (text, TextEncoding::Latin1)
        }
    }
}

pub fn encode(text: &str, encoding: TextEncoding) -> Vec<u8> {
    match encoding {
        TextEncoding::Utf8 => text.as_bytes().to_vec(),
        TextEncoding::Latin1 => text
            .chars()
            .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
            .collect(),
    }
}
