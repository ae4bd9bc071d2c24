/// The only version string defined by U2F 1.2.
pub const U2F_V2: &str = "U2F_V2";

/// Decode the data of a successful Version response.
///
/// A success status always yields a version, bytes that are not UTF-8 are replaced with
/// `U+FFFD`.
pub fn decode_version(data: &[u8]) -> String {
    String::from_utf8_lossy(data).into_owned()
}
