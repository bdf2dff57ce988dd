// SPDX-License-Identifier: MPL-2.0
//! Server-relative paths for gallery images.

use std::fmt::Write;

/// Root of the image store on the server.
pub const IMAGES_ROOT: &str = "user/images";

/// Percent-encodes `input` the way `encodeURIComponent` does.
///
/// ASCII letters, digits and `-_.!~*'()` are kept; every other byte of the
/// UTF-8 encoding becomes `%XX`.
#[must_use]
pub fn encode_uri_component(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(char::from(byte)),
            _ => {
                let _ = write!(out, "%{byte:02X}");
            }
        }
    }
    out
}

/// URL path of an image, with folder and filename encoded independently.
#[must_use]
pub fn image_path(folder: &str, filename: &str) -> String {
    format!(
        "{IMAGES_ROOT}/{}/{}",
        encode_uri_component(folder),
        encode_uri_component(filename)
    )
}

/// Relative path sent to the delete endpoint (not encoded).
#[must_use]
pub fn delete_path(folder: &str, filename: &str) -> String {
    format!("{IMAGES_ROOT}/{folder}/{filename}")
}
