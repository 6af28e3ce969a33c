//! Override descriptor assembly
//!
//! Composes the property list the window server reads for one display:
//! decimal product and vendor ids, the ordered scale-resolutions array, and
//! the fixed target pixel density. The document is rebuilt from scratch on
//! every enable; a re-apply fully replaces prior content.

use std::fmt::Write as _;

use crate::constants::plist;
use crate::display::DisplayIdentity;
use crate::encoding::ScaledEntry;

const PLIST_HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
"#;

/// The override document for one display.
#[derive(Debug, Clone)]
pub struct OverrideDescriptor {
    identity: DisplayIdentity,
    entries: Vec<ScaledEntry>,
}

impl OverrideDescriptor {
    pub fn new(identity: DisplayIdentity, entries: Vec<ScaledEntry>) -> Self {
        Self { identity, entries }
    }

    pub fn identity(&self) -> DisplayIdentity {
        self.identity
    }

    /// Render the descriptor as XML plist text.
    ///
    /// Field order is fixed: product id, vendor id, scale-resolutions,
    /// target density. Output is deterministic for a given input, so a
    /// repeated apply writes a byte-identical file. An empty entry list
    /// still yields a valid document with an empty array.
    pub fn to_plist(&self) -> String {
        let mut out = String::from(PLIST_HEADER);
        out.push_str("<dict>\n");
        let _ = writeln!(out, "\t<key>DisplayProductID</key>");
        let _ = writeln!(out, "\t<integer>{}</integer>", self.identity.product());
        let _ = writeln!(out, "\t<key>DisplayVendorID</key>");
        let _ = writeln!(out, "\t<integer>{}</integer>", self.identity.vendor());
        out.push_str("\t<key>scale-resolutions</key>\n");
        out.push_str("\t<array>\n");
        for entry in &self.entries {
            for payload in entry.payloads() {
                let _ = writeln!(out, "\t\t<data>{payload}</data>");
            }
        }
        out.push_str("\t</array>\n");
        out.push_str("\t<key>target-default-ppmm</key>\n");
        let _ = writeln!(out, "\t<real>{}</real>", plist::TARGET_PPMM);
        out.push_str("</dict>\n");
        out.push_str("</plist>\n");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::encode;
    use crate::resolution::Resolution;

    fn descriptor_for(
        vendor: u32,
        product: u32,
        resolutions: &[Resolution],
    ) -> OverrideDescriptor {
        let entries = resolutions
            .iter()
            .map(|r| encode(*r).unwrap())
            .collect();
        OverrideDescriptor::new(DisplayIdentity::new(vendor, product), entries)
    }

    #[test]
    fn test_plist_ids_are_decimal() {
        let plist = descriptor_for(0x1e6d, 0x5b00, &[Resolution::new(1680, 945)]).to_plist();
        // 0x5b00 = 23296, 0x1e6d = 7789
        assert!(plist.contains("<key>DisplayProductID</key>\n\t<integer>23296</integer>"));
        assert!(plist.contains("<key>DisplayVendorID</key>\n\t<integer>7789</integer>"));
    }

    #[test]
    fn test_plist_field_order() {
        let plist = descriptor_for(0x10ac, 0x40a8, &[Resolution::new(1280, 720)]).to_plist();
        let product = plist.find("DisplayProductID").unwrap();
        let vendor = plist.find("DisplayVendorID").unwrap();
        let scale = plist.find("scale-resolutions").unwrap();
        let ppmm = plist.find("target-default-ppmm").unwrap();
        assert!(product < vendor && vendor < scale && scale < ppmm);
    }

    #[test]
    fn test_plist_contains_two_data_elements_per_resolution() {
        let resolutions = [
            Resolution::new(1680, 945),
            Resolution::new(1440, 810),
            Resolution::new(1280, 720),
        ];
        let plist = descriptor_for(0x1e6d, 0x5b00, &resolutions).to_plist();
        assert_eq!(plist.matches("<data>").count(), 2 * resolutions.len());

        // Entries appear in encoding order, scale tag before flags tag.
        let first = encode(resolutions[0]).unwrap();
        let second = encode(resolutions[1]).unwrap();
        let a = plist.find(&first.scaled).unwrap();
        let b = plist.find(&first.scaled_flags).unwrap();
        let c = plist.find(&second.scaled).unwrap();
        assert!(a < b && b < c);
    }

    #[test]
    fn test_plist_density_constant() {
        let plist = descriptor_for(0x1e6d, 0x5b00, &[]).to_plist();
        assert!(plist.contains("<real>10.0699301</real>"));
    }

    #[test]
    fn test_empty_entry_list_still_valid() {
        let plist = descriptor_for(0x1e6d, 0x5b00, &[]).to_plist();
        assert!(plist.contains("<array>\n\t</array>"));
        assert!(plist.starts_with("<?xml"));
        assert!(plist.ends_with("</plist>\n"));
    }

    #[test]
    fn test_repeated_builds_are_byte_identical() {
        let resolutions = [Resolution::new(1856, 1044), Resolution::new(1600, 900)];
        let first = descriptor_for(0x05e3, 0x0100, &resolutions).to_plist();
        let second = descriptor_for(0x05e3, 0x0100, &resolutions).to_plist();
        assert_eq!(first, second);
    }
}
