//! Geolocation collaborator

use std::net::IpAddr;

/// Resolves an address to a country name
///
/// Lookups may be slow or fail. They are only performed for templates that
/// use the country placeholder.
pub trait GeoIpLookup: Send + Sync {
    fn country_name(&self, ip: IpAddr) -> Option<String>;
}

/// Lookup that never resolves anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGeoIp;

impl GeoIpLookup for NoGeoIp {
    fn country_name(&self, _ip: IpAddr) -> Option<String> {
        None
    }
}
