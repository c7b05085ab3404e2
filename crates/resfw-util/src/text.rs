//! Decoding UTF-16 strings out of mapped resource data.

/// Decode a UTF-16 buffer of a known element count into a `String`.
///
/// Resource tables store strings as fixed-width UTF-16 with a recorded
/// length; shorter strings are NUL-padded. Code units are consumed up to
/// the first NUL, or the whole slice if none is present. Unpaired
/// surrogates decode to U+FFFD, so this never fails.
pub fn read_utf16_string(src: &[u16]) -> String {
    let end = src.iter().position(|&unit| unit == 0).unwrap_or(src.len());
    char::decode_utf16(src[..end].iter().copied())
        .map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}
