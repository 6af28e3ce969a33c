//! Scaled-resolution entry encoding
//!
//! The window server expects each scaled resolution as 8 raw bytes (doubled
//! width and height, each big-endian u32) in base64, emitted twice with two
//! different trailing tags. Both tagged forms must be present for the
//! override to take effect.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::constants::plist;
use crate::error::{HiDpiError, HiDpiResult};
use crate::resolution::Resolution;

/// The two tagged payloads the override plist carries for one resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaledEntry {
    /// Base64 of the doubled resolution plus the scale tag.
    pub scaled: String,
    /// Same base64 value plus the scale-with-flags tag.
    pub scaled_flags: String,
}

impl ScaledEntry {
    /// Both payloads in the order the plist array expects them.
    pub fn payloads(&self) -> [&str; 2] {
        [self.scaled.as_str(), self.scaled_flags.as_str()]
    }
}

/// Encode one logical resolution into its pair of tagged payloads.
///
/// The doubled dimensions must each fit the format's fixed 8-hex-digit
/// field; anything larger is rejected rather than truncated.
pub fn encode(resolution: Resolution) -> HiDpiResult<ScaledEntry> {
    let hidpi_width = u64::from(resolution.width) * 2;
    let hidpi_height = u64::from(resolution.height) * 2;
    if hidpi_width > u64::from(u32::MAX) || hidpi_height > u64::from(u32::MAX) {
        return Err(HiDpiError::ResolutionTooLarge {
            width: resolution.width,
            height: resolution.height,
        });
    }

    // Width then height, each as a big-endian u32, matching the 16-hex-digit
    // layout the format defines.
    let mut bytes = [0u8; 8];
    bytes[..4].copy_from_slice(&(hidpi_width as u32).to_be_bytes());
    bytes[4..].copy_from_slice(&(hidpi_height as u32).to_be_bytes());
    let value = STANDARD.encode(bytes);

    Ok(ScaledEntry {
        scaled: format!("{value}{}", plist::TAG_SCALED),
        scaled_flags: format!("{value}{}", plist::TAG_SCALED_FLAGS),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_doubles_and_frames_1680x945() {
        // 1680x945 doubles to 3360x1890 = 00000d20 00000762 as hex fields.
        let entry = encode(Resolution::new(1680, 945)).unwrap();
        let expected = STANDARD.encode([0x00, 0x00, 0x0d, 0x20, 0x00, 0x00, 0x07, 0x62]);

        assert_eq!(entry.scaled, format!("{expected}AAAAB"));
        assert_eq!(entry.scaled_flags, format!("{expected}AAAABACAAAA=="));
    }

    #[test]
    fn test_encode_matches_hex_framing() {
        // The byte layout must equal the decoded concatenation of the two
        // 8-digit hex fields.
        let entry = encode(Resolution::new(1920, 1200)).unwrap();
        let hex = format!("{:08x}{:08x}", 1920u32 * 2, 1200u32 * 2);
        let bytes: Vec<u8> = (0..hex.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).unwrap())
            .collect();
        let value = STANDARD.encode(&bytes);

        assert!(entry.scaled.starts_with(&value));
        assert!(entry.scaled_flags.starts_with(&value));
    }

    #[test]
    fn test_encode_payload_order() {
        let entry = encode(Resolution::new(1280, 720)).unwrap();
        let [first, second] = entry.payloads();
        assert!(first.ends_with("AAAAB"));
        assert!(second.ends_with("AAAABACAAAA=="));
    }

    #[test]
    fn test_encode_rejects_doubling_overflow() {
        let err = encode(Resolution::new(u32::MAX, 1080)).unwrap_err();
        assert!(matches!(
            err,
            HiDpiError::ResolutionTooLarge { width, .. } if width == u32::MAX
        ));

        // The largest encodable dimension is exactly half the field limit.
        assert!(encode(Resolution::new(u32::MAX / 2, u32::MAX / 2)).is_ok());
        assert!(encode(Resolution::new(u32::MAX / 2 + 1, 1080)).is_err());
    }
}
