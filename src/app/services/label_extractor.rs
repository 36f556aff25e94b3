//! Label derivation from the light-curve filename convention
//!
//! Light-curve exports are named `<campaign><id>-<suffix>.<ext>`, e.g.
//! `kplr008462852-2013098041711_llc.fits`: a 4-character campaign code,
//! the object identifier, and a separator-delimited suffix. The labels
//! extracted here are attached uniformly to every series built from the
//! file.

use crate::app::models::Labels;
use crate::constants::{CAMPAIGN_CODE_LEN, catalog_for_campaign};
use crate::{Error, Result};

/// Derive the label set for an input file from its name
///
/// The head token is the filename up to the first `-`, `_`, or `.`; its
/// first four characters are the campaign code and the remainder is the
/// object identifier. Recognized campaign codes additionally map to a
/// catalog label; unknown codes leave the catalog unset.
pub fn extract_labels(filename: &str) -> Result<Labels> {
    let head = filename.split(['-', '_', '.']).next().unwrap_or("");

    if head.len() < CAMPAIGN_CODE_LEN || !head.is_char_boundary(CAMPAIGN_CODE_LEN) {
        return Err(Error::validation(format!(
            "filename '{}': head token '{}' is shorter than the {}-character campaign code",
            filename, head, CAMPAIGN_CODE_LEN
        )));
    }

    let (campaign, id) = head.split_at(CAMPAIGN_CODE_LEN);
    let catalog = catalog_for_campaign(campaign).map(str::to_string);

    Ok(Labels::new(campaign, id, catalog))
}
