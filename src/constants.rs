//! Application-wide constants
//!
//! This module contains the filesystem paths, plist literals and preference
//! keys used throughout the application, providing a single source of truth
//! for constant values.

/// Display override filesystem layout
pub mod overrides {
    /// Root directory the window server reads override plists from
    pub const OVERRIDES_DIR: &str = "/Library/Displays/Contents/Resources/Overrides";

    /// Per-vendor directory name prefix (followed by 4-digit lowercase hex)
    pub const VENDOR_DIR_PREFIX: &str = "DisplayVendorID-";

    /// Per-product file name prefix (followed by 4-digit lowercase hex)
    pub const PRODUCT_FILE_PREFIX: &str = "DisplayProductID-";

    /// Ownership the installed override file must carry
    pub const FILE_OWNER: &str = "root:wheel";

    /// Mode the installed override file must carry (owner rw, world r)
    pub const FILE_MODE: &str = "644";
}

/// Override plist literals
pub mod plist {
    /// Trailing tag marking an entry as a scaled resolution
    pub const TAG_SCALED: &str = "AAAAB";

    /// Trailing tag carrying the additional scaling flags; the window
    /// server requires both tagged forms per resolution
    pub const TAG_SCALED_FLAGS: &str = "AAAABACAAAA==";

    /// Fixed target pixel density written into every override
    pub const TARGET_PPMM: &str = "10.0699301";
}

/// System preference domains and keys
pub mod prefs {
    /// Path to the `defaults` binary
    pub const DEFAULTS_BIN: &str = "/usr/bin/defaults";

    /// Window server preference domain holding the scaling switch
    pub const WINDOW_SERVER_DOMAIN: &str = "/Library/Preferences/com.apple.windowserver";

    /// Global boolean enabling scaled-resolution support
    pub const RESOLUTION_ENABLED_KEY: &str = "DisplayResolutionEnabled";

    /// Global font smoothing level (read/written per current host)
    pub const FONT_SMOOTHING_KEY: &str = "AppleFontSmoothing";
}

/// Elevated execution constants
pub mod elevation {
    /// Path to the osascript binary used for the administrator prompt
    pub const OSASCRIPT_BIN: &str = "/usr/bin/osascript";

    /// File name prefix for staged override plists
    pub const STAGED_PLIST_PREFIX: &str = "hidpi_display_";

    /// File name prefix for temporary elevation scripts
    pub const SCRIPT_PREFIX: &str = "hidpi_script_";
}

/// User configuration file location
pub mod config {
    /// Directory under the platform config dir
    pub const APP_DIR: &str = "hidpi-manager";

    /// Preferences file name
    pub const FILENAME: &str = "preferences.json";
}
