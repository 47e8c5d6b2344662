//! Static location tables and the India bounding box.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, DomainError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(DomainError::InvalidCoordinates(format!(
                "latitude {} out of range",
                latitude
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(DomainError::InvalidCoordinates(format!(
                "longitude {} out of range",
                longitude
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

/// An axis-aligned latitude/longitude box, bounds inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_latitude: f64,
    pub max_latitude: f64,
    pub min_longitude: f64,
    pub max_longitude: f64,
}

impl BoundingBox {
    pub fn contains(&self, point: &Coordinates) -> bool {
        (self.min_latitude..=self.max_latitude).contains(&point.latitude)
            && (self.min_longitude..=self.max_longitude).contains(&point.longitude)
    }
}

/// Service area for "near you" lookups.
pub const INDIA_BOUNDS: BoundingBox = BoundingBox {
    min_latitude: 6.0,
    max_latitude: 37.6,
    min_longitude: 68.0,
    max_longitude: 97.5,
};

/// A state or union territory with its major cities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Region {
    pub name: &'static str,
    pub cities: &'static [&'static str],
}

pub const REGIONS: &[Region] = &[
    Region { name: "Andaman and Nicobar Islands", cities: &["Port Blair"] },
    Region { name: "Andhra Pradesh", cities: &["Visakhapatnam", "Vijayawada", "Guntur", "Nellore", "Tirupati", "Kurnool"] },
    Region { name: "Arunachal Pradesh", cities: &["Itanagar", "Naharlagun", "Pasighat"] },
    Region { name: "Assam", cities: &["Guwahati", "Silchar", "Dibrugarh", "Jorhat", "Tezpur"] },
    Region { name: "Bihar", cities: &["Patna", "Gaya", "Bhagalpur", "Muzaffarpur", "Darbhanga"] },
    Region { name: "Chandigarh", cities: &["Chandigarh"] },
    Region { name: "Chhattisgarh", cities: &["Raipur", "Bhilai", "Bilaspur", "Korba", "Durg"] },
    Region { name: "Dadra and Nagar Haveli and Daman and Diu", cities: &["Daman", "Diu", "Silvassa"] },
    Region { name: "Delhi", cities: &["New Delhi", "Delhi"] },
    Region { name: "Goa", cities: &["Panaji", "Margao", "Vasco da Gama", "Mapusa"] },
    Region { name: "Gujarat", cities: &["Ahmedabad", "Surat", "Vadodara", "Rajkot", "Bhavnagar", "Jamnagar", "Gandhinagar"] },
    Region { name: "Haryana", cities: &["Gurugram", "Faridabad", "Panipat", "Ambala", "Hisar", "Karnal"] },
    Region { name: "Himachal Pradesh", cities: &["Shimla", "Dharamshala", "Mandi", "Solan", "Manali"] },
    Region { name: "Jammu and Kashmir", cities: &["Srinagar", "Jammu", "Anantnag", "Baramulla"] },
    Region { name: "Jharkhand", cities: &["Ranchi", "Jamshedpur", "Dhanbad", "Bokaro", "Hazaribagh"] },
    Region { name: "Karnataka", cities: &["Bengaluru", "Mysuru", "Mangaluru", "Hubballi", "Belagavi", "Kalaburagi"] },
    Region { name: "Kerala", cities: &["Thiruvananthapuram", "Kochi", "Kozhikode", "Thrissur", "Kollam", "Kannur"] },
    Region { name: "Ladakh", cities: &["Leh", "Kargil"] },
    Region { name: "Lakshadweep", cities: &["Kavaratti"] },
    Region { name: "Madhya Pradesh", cities: &["Indore", "Bhopal", "Jabalpur", "Gwalior", "Ujjain", "Sagar"] },
    Region { name: "Maharashtra", cities: &["Mumbai", "Pune", "Nagpur", "Nashik", "Aurangabad", "Thane", "Solapur", "Kolhapur"] },
    Region { name: "Manipur", cities: &["Imphal", "Thoubal"] },
    Region { name: "Meghalaya", cities: &["Shillong", "Tura"] },
    Region { name: "Mizoram", cities: &["Aizawl", "Lunglei"] },
    Region { name: "Nagaland", cities: &["Kohima", "Dimapur"] },
    Region { name: "Odisha", cities: &["Bhubaneswar", "Cuttack", "Rourkela", "Sambalpur", "Puri", "Berhampur"] },
    Region { name: "Puducherry", cities: &["Puducherry", "Karaikal"] },
    Region { name: "Punjab", cities: &["Ludhiana", "Amritsar", "Jalandhar", "Patiala", "Bathinda", "Mohali"] },
    Region { name: "Rajasthan", cities: &["Jaipur", "Jodhpur", "Udaipur", "Kota", "Ajmer", "Bikaner"] },
    Region { name: "Sikkim", cities: &["Gangtok", "Namchi"] },
    Region { name: "Tamil Nadu", cities: &["Chennai", "Coimbatore", "Madurai", "Tiruchirappalli", "Salem", "Tirunelveli", "Vellore"] },
    Region { name: "Telangana", cities: &["Hyderabad", "Warangal", "Nizamabad", "Karimnagar", "Khammam"] },
    Region { name: "Tripura", cities: &["Agartala", "Udaipur"] },
    Region { name: "Uttar Pradesh", cities: &["Lucknow", "Kanpur", "Ghaziabad", "Agra", "Varanasi", "Meerut", "Prayagraj", "Noida"] },
    Region { name: "Uttarakhand", cities: &["Dehradun", "Haridwar", "Roorkee", "Haldwani", "Rishikesh"] },
    Region { name: "West Bengal", cities: &["Kolkata", "Howrah", "Durgapur", "Asansol", "Siliguri"] },
];

/// Names the geocoder returns that differ from the table.
const STATE_ALIASES: &[(&str, &str)] = &[
    ("nct of delhi", "Delhi"),
    ("national capital territory of delhi", "Delhi"),
    ("new delhi", "Delhi"),
    ("orissa", "Odisha"),
    ("pondicherry", "Puducherry"),
    ("uttaranchal", "Uttarakhand"),
    ("jammu & kashmir", "Jammu and Kashmir"),
    ("andaman & nicobar islands", "Andaman and Nicobar Islands"),
    ("dadra and nagar haveli", "Dadra and Nagar Haveli and Daman and Diu"),
    ("daman and diu", "Dadra and Nagar Haveli and Daman and Diu"),
];

/// Look up a state or union territory by name, case-insensitively.
pub fn find_region(name: &str) -> Option<&'static Region> {
    let needle = name.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }

    let canonical = STATE_ALIASES
        .iter()
        .find(|(alias, _)| *alias == needle)
        .map(|(_, canonical)| canonical.to_lowercase())
        .unwrap_or(needle);

    REGIONS
        .iter()
        .find(|region| region.name.to_lowercase() == canonical)
}

/// All state and union territory names, alphabetical.
pub fn state_names() -> impl Iterator<Item = &'static str> {
    REGIONS.iter().map(|region| region.name)
}
