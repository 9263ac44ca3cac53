use std::io::Read;

use log::debug;
use thiserror::Error;

/// Magic comment that opens the JSON literal in the asmdb JavaScript files.
pub const MARK_JSON_BEGIN: &str = "// ${JSON:BEGIN}";

/// Magic comment that closes the JSON literal in the asmdb JavaScript files.
pub const MARK_JSON_END: &str = "// ${JSON:END}";

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("could not read resource")]
    ResourceRead(#[from] std::io::Error),

    #[error("could not find {0:?} magic comment")]
    MarkerNotFound(String),

    #[error("nothing follows the begin magic comment")]
    EmptyPayload,
}

/* Util */
fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// # Marker-delimited extraction
/// Returns the bytes between `begin` and `end`. The newline right after
/// `begin` and the newline right before `end` are dropped, nothing else
/// is trimmed.
/// ## Parameters
/// `content`: The whole source file.
/// `begin`, `end`: The literal marker lines.
/// ## Returns
/// `Result<&[u8], ExtractError>`
pub fn extract<'a>(content: &'a [u8], begin: &str, end: &str) -> Result<&'a [u8], ExtractError> {
    let start = find(content, begin.as_bytes())
        .ok_or_else(|| ExtractError::MarkerNotFound(begin.to_string()))?;

    let data = &content[start + begin.len()..];
    if data.is_empty() {
        return Err(ExtractError::EmptyPayload);
    }
    // newline after the begin marker
    let data = &data[1..];

    match find(data, end.as_bytes()) {
        // an end marker right at the start leaves no room for the newline before it
        None | Some(0) => Err(ExtractError::MarkerNotFound(end.to_string())),
        Some(idx) => {
            // newline before the end marker
            let payload = &data[..idx - 1];
            debug!("extracted {} bytes between {begin:?} and {end:?}", payload.len());
            Ok(payload)
        }
    }
}

/// Reads `reader` to the end, then runs [`extract`] on its contents.
pub fn extract_from_reader<R: Read>(
    mut reader: R,
    begin: &str,
    end: &str,
) -> Result<Vec<u8>, ExtractError> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;
    extract(&buf, begin, end).map(<[u8]>::to_vec)
}
