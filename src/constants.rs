//! Application constants for the light-curve ingestor
//!
//! This module contains the filename convention tables, series naming
//! rules, Warp10 protocol constants, and default values used throughout
//! the application.

// =============================================================================
// Series Naming
// =============================================================================

/// Namespace prefix for every series class name (e.g. "kepler.flux.raw")
pub const SERIES_NAMESPACE: &str = "kepler";

/// Number of leading filename characters forming the campaign code
pub const CAMPAIGN_CODE_LEN: usize = 4;

/// Campaign codes recognized in light-curve filenames
pub mod campaigns {
    /// Kepler prime mission filename prefix
    pub const KEPLER: &str = "kplr";

    /// K2 extended mission filename prefix
    pub const K2: &str = "ktwo";
}

/// Object catalogs the campaign codes map to
pub mod catalogs {
    /// Kepler Input Catalog
    pub const KIC: &str = "KIC";

    /// Ecliptic Plane Input Catalog (K2)
    pub const EPIC: &str = "EPIC";
}

/// Label keys attached to every series built from one file
pub mod labels {
    pub const CAMPAIGN: &str = "campaign";
    pub const ID: &str = "id";
    pub const CATALOG: &str = "catalog";
}

// =============================================================================
// Input File Handling
// =============================================================================

/// Sentinel token marking a missing measurement; any data row carrying it
/// (in any column, any case) is dropped in its entirety
pub const MISSING_VALUE_SENTINEL: &str = "nan";

/// Substring a filename must contain to be considered a light-curve export
pub const LIGHTCURVE_FILE_MARKER: &str = "csv";

// =============================================================================
// Warp10 Protocol
// =============================================================================

/// Update endpoint path appended to the configured base URL
pub const WARP10_UPDATE_PATH: &str = "/api/v0/update";

/// Request header carrying the write token
pub const WARP10_TOKEN_HEADER: &str = "X-Warp10-Token";

/// Warp10 platform time units per second (microseconds)
pub const TIME_UNITS_PER_SECOND: i64 = 1_000_000;

// =============================================================================
// Processing Defaults
// =============================================================================

/// Default watch-mode poll interval in seconds
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 2;

// =============================================================================
// Helper Functions
// =============================================================================

/// Map a campaign code to its catalog name
///
/// Unrecognized codes yield `None`; the catalog label is simply left
/// unset for those files.
pub fn catalog_for_campaign(campaign: &str) -> Option<&'static str> {
    match campaign {
        campaigns::KEPLER => Some(catalogs::KIC),
        campaigns::K2 => Some(catalogs::EPIC),
        _ => None,
    }
}

/// Check whether a file name looks like a light-curve CSV export
pub fn is_lightcurve_file(name: &str) -> bool {
    name.contains(LIGHTCURVE_FILE_MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_for_campaign() {
        assert_eq!(catalog_for_campaign("kplr"), Some("KIC"));
        assert_eq!(catalog_for_campaign("ktwo"), Some("EPIC"));
        assert_eq!(catalog_for_campaign("tess"), None);
        assert_eq!(catalog_for_campaign(""), None);

        // Codes are matched exactly, not case-insensitively
        assert_eq!(catalog_for_campaign("KPLR"), None);
    }

    #[test]
    fn test_is_lightcurve_file() {
        assert!(is_lightcurve_file("kplr008462852-llc.csv"));
        assert!(is_lightcurve_file("ktwo246516122.csv.part"));
        assert!(!is_lightcurve_file("kplr008462852-llc.fits"));
        assert!(!is_lightcurve_file("notes.txt"));
    }
}
