//! Display identity and enumeration
//!
//! A display is keyed by its vendor and product numbers; the override path on
//! disk is derived from their 4-digit lowercase hex forms. Enumeration of
//! attached displays is platform-specific:
//!
//! - macOS: CoreGraphics active display list (`macos.rs`)
//! - elsewhere: empty list (the override pipeline itself still works against
//!   an identity given on the command line)

use serde::Serialize;
use std::fmt;

use crate::error::{HiDpiError, HiDpiResult};

#[cfg(target_os = "macos")]
mod macos;

/// Vendor/product pair identifying one display model.
///
/// Immutable once obtained; only ever used as lookup and formatting input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayIdentity {
    vendor: u32,
    product: u32,
}

impl DisplayIdentity {
    pub const fn new(vendor: u32, product: u32) -> Self {
        Self { vendor, product }
    }

    /// Parse a `VENDOR:PRODUCT` pair of hex values, e.g. `1e6d:5b00`.
    pub fn parse(pair: &str) -> HiDpiResult<Self> {
        let invalid = || {
            HiDpiError::InvalidSelection(format!(
                "invalid display identity '{pair}'. Use VENDOR:PRODUCT hex (e.g., 1e6d:5b00)"
            ))
        };

        let (vendor, product) = pair.split_once(':').ok_or_else(invalid)?;
        let vendor = u32::from_str_radix(vendor.trim(), 16).map_err(|_| invalid())?;
        let product = u32::from_str_radix(product.trim(), 16).map_err(|_| invalid())?;
        Ok(Self::new(vendor, product))
    }

    pub fn vendor(&self) -> u32 {
        self.vendor
    }

    pub fn product(&self) -> u32 {
        self.product
    }

    /// Vendor id as 4-digit lowercase hex, as used in the override path.
    pub fn vendor_hex(&self) -> String {
        format!("{:04x}", self.vendor)
    }

    /// Product id as 4-digit lowercase hex, as used in the override path.
    pub fn product_hex(&self) -> String {
        format!("{:04x}", self.product)
    }
}

impl fmt::Display for DisplayIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.vendor_hex(), self.product_hex())
    }
}

/// One attached display as reported by the platform.
#[derive(Debug, Clone, Serialize)]
pub struct DisplayInfo {
    /// Position in the active display list.
    pub index: usize,
    /// Vendor id, 4-digit lowercase hex.
    pub vendor_id: String,
    /// Product id, 4-digit lowercase hex.
    pub product_id: String,
    /// Human-readable name; falls back to the pixel size when the platform
    /// reports no product name.
    pub name: String,
    /// Whether this machine is an Apple-silicon Mac.
    pub apple_silicon: bool,
    #[serde(skip)]
    vendor: u32,
    #[serde(skip)]
    product: u32,
}

impl DisplayInfo {
    pub fn new(index: usize, vendor: u32, product: u32, name: String) -> Self {
        Self {
            index,
            vendor_id: format!("{vendor:04x}"),
            product_id: format!("{product:04x}"),
            name,
            apple_silicon: is_apple_silicon(),
            vendor,
            product,
        }
    }

    pub fn identity(&self) -> DisplayIdentity {
        DisplayIdentity::new(self.vendor, self.product)
    }
}

impl fmt::Display for DisplayInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}:{})", self.name, self.vendor_id, self.product_id)
    }
}

/// List the currently attached displays.
pub fn list_displays() -> Vec<DisplayInfo> {
    #[cfg(target_os = "macos")]
    {
        macos::list_displays()
    }
    #[cfg(not(target_os = "macos"))]
    {
        Vec::new()
    }
}

/// Whether this machine is an Apple-silicon Mac.
pub fn is_apple_silicon() -> bool {
    cfg!(all(target_os = "macos", target_arch = "aarch64"))
}
