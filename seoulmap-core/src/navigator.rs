use unicode_normalization::UnicodeNormalization;

use crate::catalog::Shop;

/// NFC-composed lowercase form used for name equality. Dataset names and URL
/// path segments disagree on both casing and unicode composition.
pub fn lookup_key(name: &str) -> String {
    name.trim().nfc().collect::<String>().to_lowercase()
}

/// Find a shop by display name, tolerant of case and composition.
pub fn resolve<'a>(shops: &'a [Shop], raw_name: &str) -> Option<&'a Shop> {
    let key = lookup_key(raw_name);
    shops.iter().find(|s| lookup_key(&s.name) == key)
}

/// Previous and next shop within the same region, in dataset order. The ends
/// do not wrap.
pub fn region_neighbors<'a>(
    shops: &'a [Shop],
    shop: &Shop,
) -> (Option<&'a Shop>, Option<&'a Shop>) {
    let key = lookup_key(&shop.name);
    let siblings: Vec<&Shop> = shops.iter().filter(|s| s.region == shop.region).collect();
    let Some(pos) = siblings.iter().position(|s| lookup_key(&s.name) == key) else {
        return (None, None);
    };
    let prev = pos.checked_sub(1).map(|i| siblings[i]);
    let next = siblings.get(pos + 1).copied();
    (prev, next)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shop(name: &str, region: &str) -> Shop {
        Shop {
            name: name.to_string(),
            category: "Cafe".to_string(),
            region: region.to_string(),
            ..Default::default()
        }
    }

    fn shops() -> Vec<Shop> {
        vec![
            shop("Onion", "Seoung - su"),
            shop("Daelim Changgo", "Seoung - su"),
            shop("Old Ferry Donut", "Yongsan"),
            shop("Mellower", "Seoung - su"),
        ]
    }

    #[test]
    fn resolve_is_case_insensitive() {
        let shops = shops();
        assert_eq!(resolve(&shops, "onion").map(|s| s.name.as_str()), Some("Onion"));
        assert_eq!(
            resolve(&shops, "  OLD FERRY DONUT ").map(|s| s.name.as_str()),
            Some("Old Ferry Donut")
        );
        assert!(resolve(&shops, "nowhere").is_none());
    }

    #[test]
    fn resolve_tolerates_decomposed_hangul() {
        let shops = vec![shop("카페 온도", "Mapo")];
        let decomposed: String = "카페 온도".nfd().collect();
        assert!(resolve(&shops, &decomposed).is_some());
    }

    #[test]
    fn neighbors_stay_inside_the_region() {
        let shops = shops();
        let (prev, next) = region_neighbors(&shops, &shops[1]);
        assert_eq!(prev.map(|s| s.name.as_str()), Some("Onion"));
        assert_eq!(next.map(|s| s.name.as_str()), Some("Mellower"));
    }

    #[test]
    fn neighbors_do_not_wrap_at_the_ends() {
        let shops = shops();
        let (prev, _) = region_neighbors(&shops, &shops[0]);
        assert!(prev.is_none());
        let (_, next) = region_neighbors(&shops, &shops[3]);
        assert!(next.is_none());
        // lone shop in its region has no neighbors at all
        let (prev, next) = region_neighbors(&shops, &shops[2]);
        assert!(prev.is_none() && next.is_none());
    }
}
