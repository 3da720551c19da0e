//! Application-wide constants
//!
//! Connector names, external tool names and file locations used throughout
//! the application, kept in one place.

/// Internal panel auto-detection
pub mod connectors {
    /// Interface prefixes used by laptop panels (LVDS on older hardware, eDP on newer)
    pub const INTERNAL_PREFIXES: &[&str] = &["LVDS", "eDP"];

    /// Suffixes drivers append to the interface name
    pub const INTERNAL_SUFFIXES: &[&str] = &["", "0", "1", "-0", "-1"];
}

/// External programs we shell out to
pub mod tools {
    /// Applies the computed layout
    pub const XRANDR: &str = "xrandr";

    /// Queries and sets the laptop backlight
    pub const XBACKLIGHT: &str = "xbacklight";

    /// Dialog helper used by the zenity frontend
    pub const ZENITY: &str = "zenity";
}

/// Backlight handling
pub mod backlight {
    /// Brightness (percent) set when the backlight was found switched off
    pub const FULL_BRIGHTNESS: &str = "100";
}

/// Config file location
pub mod config {
    /// File name inside the user's home directory
    pub const FILENAME: &str = ".dsl.conf";

    /// Key naming the internal connector (exactly one value)
    pub const INTERNAL_CONNECTOR: &str = "internalConnector";

    /// Key restricting which connectors count as external
    pub const EXTERNAL_CONNECTORS: &str = "externalConnectors";
}

/// RandR protocol requirements
pub mod randr {
    /// GetScreenResourcesCurrent needs RandR 1.3
    pub const MAJOR_VERSION: u32 = 1;
    pub const MINOR_VERSION: u32 = 3;
}

/// Process exit codes
pub mod exit {
    /// User dismissed the interactive setup
    pub const CANCELLED: u8 = 1;
}
