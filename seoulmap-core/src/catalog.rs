use serde::{Deserialize, Serialize};

/// One shop record from the static dataset. `name` doubles as the routing
/// and image-lookup key, so lookups over it must be case-insensitive and
/// tolerant of unicode composition differences.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shop {
    pub name: String,
    pub category: String,
    pub region: String,
    #[serde(default)]
    pub lot_address: String,
    #[serde(default)]
    pub road_address: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub call_number: String,
}

/// Read-only shop catalog plus the orderings derived from it.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Catalog {
    shops: Vec<Shop>,
}

impl Catalog {
    pub fn new(shops: Vec<Shop>) -> Self {
        Catalog { shops }
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn shops(&self) -> &[Shop] {
        &self.shops
    }

    /// Region labels in first-appearance order, blanks dropped.
    pub fn unique_regions(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for shop in &self.shops {
            let region = shop.region.as_str();
            if !region.is_empty() && !out.contains(&region) {
                out.push(region);
            }
        }
        out
    }

    /// Category labels in first-appearance order.
    pub fn categories(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for shop in &self.shops {
            let category = shop.category.as_str();
            if !category.is_empty() && !out.contains(&category) {
                out.push(category);
            }
        }
        out
    }
}
