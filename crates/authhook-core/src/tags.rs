//! Tag registry for player lifecycle commands
//!
//! The four placeholders available in `commands.yml` templates.

use std::sync::Arc;

use crate::geoip::GeoIpLookup;
use crate::lazytags::Tag;
use crate::player::Player;

pub const TAG_NAME: &str = "%p";
pub const TAG_DISPLAY_NAME: &str = "%nick";
pub const TAG_IP: &str = "%ip";
pub const TAG_COUNTRY: &str = "%country";

/// Value used for `%country` when the address is unknown or the lookup fails
pub const UNKNOWN_COUNTRY: &str = "N/A";

/// Tag evaluated against the acting player
pub type PlayerTag = Tag<dyn Player>;

/// Build the fixed tag list, in registration order
pub fn build_available_tags(geoip: Arc<dyn GeoIpLookup>) -> Vec<PlayerTag> {
    vec![
        PlayerTag::new(TAG_NAME, |player| player.name().to_string()),
        PlayerTag::new(TAG_DISPLAY_NAME, |player| player.display_name().to_string()),
        PlayerTag::fallible(TAG_IP, |player| player.address().map(|ip| ip.to_string())),
        PlayerTag::fallible(TAG_COUNTRY, move |player| {
            player.address().and_then(|ip| geoip.country_name(ip))
        })
        .with_fallback(UNKNOWN_COUNTRY),
    ]
}
