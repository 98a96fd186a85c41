//! Static service center directory.

use autodoc_core::center::{CenterDirectory, ServiceCenter};

/// The fixed list of recognized service centers.
///
/// Mirrors the backend's directory; booking requests with a center outside
/// this list are rejected locally before any network call.
pub struct StaticCenterDirectory {
    centers: Vec<ServiceCenter>,
}

impl StaticCenterDirectory {
    pub fn new() -> Self {
        let centers = [
            ("SC_MUMBAI", "Mumbai Central Service", 19.0760, 72.8777, "mumbai.manager@svc.local"),
            ("SC_PUNE", "Pune Express Service", 18.5204, 73.8567, "pune.manager@svc.local"),
            ("SC_DELHI", "Delhi NCR AutoHub", 28.7041, 77.1025, "delhi.manager@svc.local"),
            ("SC_BLR", "Bangalore TechCheck", 12.9716, 77.5946, "blr.manager@svc.local"),
            ("SC_CHENNAI", "Chennai Coastal Care", 13.0827, 80.2707, "chennai.manager@svc.local"),
            ("SC_KOLKATA", "Kolkata Eastern Motors", 22.5726, 88.3639, "kolkata.manager@svc.local"),
        ]
        .into_iter()
        .map(|(id, name, lat, lon, manager)| ServiceCenter {
            id: id.to_string(),
            name: name.to_string(),
            lat,
            lon,
            manager: manager.to_string(),
        })
        .collect();
        Self { centers }
    }
}

impl Default for StaticCenterDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl CenterDirectory for StaticCenterDirectory {
    fn all(&self) -> &[ServiceCenter] {
        &self.centers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_all_six_centers() {
        let directory = StaticCenterDirectory::new();
        assert_eq!(directory.all().len(), 6);
        assert_eq!(directory.all()[0].id, "SC_MUMBAI");
    }

    #[test]
    fn find_validates_center_ids() {
        let directory = StaticCenterDirectory::new();
        assert_eq!(
            directory.find("SC_BLR").map(|c| c.name.as_str()),
            Some("Bangalore TechCheck")
        );
        assert!(directory.find("SC_BAD").is_none());
    }
}
