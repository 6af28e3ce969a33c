//! macOS display enumeration via CoreGraphics.

use core_graphics::display::CGDisplay;
use tracing::warn;

use super::DisplayInfo;

/// List the active displays with their vendor/product numbers.
///
/// Enumeration failure is not fatal to the caller; it logs and returns an
/// empty list, matching the "no displays found" path of the UI layer.
pub fn list_displays() -> Vec<DisplayInfo> {
    let ids = match CGDisplay::active_displays() {
        Ok(ids) => ids,
        Err(code) => {
            warn!(code = code, "failed to query active display list");
            return Vec::new();
        }
    };

    ids.into_iter()
        .enumerate()
        .map(|(index, id)| {
            let display = CGDisplay::new(id);
            // CoreGraphics has no product-name API here; the pixel size makes
            // an adequate fallback name.
            let name = format!(
                "Display {}x{}",
                display.pixels_wide(),
                display.pixels_high()
            );
            DisplayInfo::new(index, display.vendor_number(), display.model_number(), name)
        })
        .collect()
}
