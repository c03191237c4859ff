use crate::catalog::{Catalog, Shop};
use crate::normalize::canonical_region;

/// Shops per row inside a region section.
pub const SHOPS_PER_ROW: usize = 5;
/// Region sections shown per page.
pub const REGIONS_PER_PAGE: usize = 5;

/// Fixed front-of-list ordering for flagship districts. Regions not named
/// here follow in dataset order.
pub const REGION_ORDER: &[&str] = &["Seoung - su", "Gangnam", "Yongsan", "Mapo", "Jung"];

/// The landing page filter selection. All criteria are conjunctive.
#[derive(Clone, Debug)]
pub struct FilterState {
    pub selected_categories: Vec<String>,
    pub selected_region: Option<String>,
    pub search_query: String,
    pub current_page: usize,
}

impl Default for FilterState {
    fn default() -> Self {
        FilterState {
            selected_categories: Vec::new(),
            selected_region: None,
            search_query: String::new(),
            current_page: 1,
        }
    }
}

impl FilterState {
    /// An empty category list means "all categories". The search query is a
    /// case-insensitive substring match on the shop name.
    pub fn matches(&self, shop: &Shop) -> bool {
        if !self.selected_categories.is_empty()
            && !self
                .selected_categories
                .iter()
                .any(|c| c == &shop.category)
        {
            return false;
        }
        if let Some(region) = &self.selected_region {
            if region != &shop.region {
                return false;
            }
        }
        let query = self.search_query.trim();
        if !query.is_empty()
            && !shop
                .name
                .to_lowercase()
                .contains(&query.to_lowercase())
        {
            return false;
        }
        true
    }

    pub fn toggle_category(&mut self, category: &str) {
        if let Some(pos) = self
            .selected_categories
            .iter()
            .position(|c| c == category)
        {
            self.selected_categories.remove(pos);
        } else {
            self.selected_categories.push(category.to_string());
        }
        self.current_page = 1;
    }

    pub fn set_region(&mut self, region: Option<String>) {
        self.selected_region = region;
        self.current_page = 1;
    }

    pub fn set_search(&mut self, query: &str) {
        self.search_query = query.to_string();
        self.current_page = 1;
    }

    pub fn clear_all(&mut self) {
        *self = FilterState::default();
    }
}

/// One region's block on the landing page: a title plus rows of shops.
#[derive(Debug)]
pub struct RegionSection<'a> {
    pub title: &'a str,
    pub rows: Vec<Vec<&'a Shop>>,
}

/// Catalog regions reordered so the flagship districts lead. The sort is
/// stable, so regions with equal rank keep their dataset order.
pub fn ordered_regions(catalog: &Catalog) -> Vec<&str> {
    let mut regions: Vec<(usize, &str)> = catalog
        .unique_regions()
        .into_iter()
        .enumerate()
        .map(|(i, region)| {
            let canonical = canonical_region(region);
            let rank = REGION_ORDER
                .iter()
                .position(|r| *r == canonical)
                .unwrap_or(REGION_ORDER.len() + i);
            (rank, region)
        })
        .collect();
    regions.sort_by_key(|(rank, _)| *rank);
    regions.into_iter().map(|(_, region)| region).collect()
}

/// Every non-empty region section under the current filters, in display
/// order, with shops chunked into rows.
pub fn region_sections<'a>(catalog: &'a Catalog, filters: &FilterState) -> Vec<RegionSection<'a>> {
    ordered_regions(catalog)
        .into_iter()
        .filter_map(|region| {
            let shops: Vec<&Shop> = catalog
                .shops()
                .iter()
                .filter(|s| s.region == region && filters.matches(s))
                .collect();
            if shops.is_empty() {
                return None;
            }
            let rows = shops.chunks(SHOPS_PER_ROW).map(<[_]>::to_vec).collect();
            Some(RegionSection {
                title: region,
                rows,
            })
        })
        .collect()
}

pub fn total_pages(section_count: usize) -> usize {
    section_count.div_ceil(REGIONS_PER_PAGE)
}

/// The slice of sections for a 1-based page number. An out-of-range page
/// yields an empty slice rather than panicking.
pub fn page<'s, 'a>(
    sections: &'s [RegionSection<'a>],
    page: usize,
) -> &'s [RegionSection<'a>] {
    let start = page.saturating_sub(1) * REGIONS_PER_PAGE;
    if start >= sections.len() {
        return &[];
    }
    let end = (start + REGIONS_PER_PAGE).min(sections.len());
    &sections[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shop(name: &str, category: &str, region: &str) -> Shop {
        Shop {
            name: name.to_string(),
            category: category.to_string(),
            region: region.to_string(),
            ..Default::default()
        }
    }

    fn catalog() -> Catalog {
        Catalog::new(vec![
            shop("Onion", "Cafe", "Seoung - su"),
            shop("Old Ferry Donut", "Bakery", "Yongsan"),
            shop("Teddy Beer", "Pub", "Yongsan"),
            shop("Alver", "Cafe", "Gangnam"),
            shop("Daelim Changgo", "Gallery", "Seoung - su"),
            shop("Hidden Cellar", "Bar", "Itaewon"),
        ])
    }

    #[test]
    fn default_filters_match_everything() {
        let filters = FilterState::default();
        assert!(catalog().shops().iter().all(|s| filters.matches(s)));
    }

    #[test]
    fn category_filter_is_a_disjunction_inside_the_conjunction() {
        let mut filters = FilterState::default();
        filters.toggle_category("Cafe");
        filters.toggle_category("Pub");
        let cat = catalog();
        let names: Vec<&str> = cat
            .shops()
            .iter()
            .filter(|s| filters.matches(s))
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, vec!["Onion", "Teddy Beer", "Alver"]);
    }

    #[test]
    fn toggling_a_selected_category_removes_it() {
        let mut filters = FilterState::default();
        filters.toggle_category("Cafe");
        filters.toggle_category("Cafe");
        assert!(filters.selected_categories.is_empty());
    }

    #[test]
    fn search_is_case_insensitive_substring_on_name() {
        let mut filters = FilterState::default();
        filters.set_search("  ferry ");
        let cat = catalog();
        let matched: Vec<&str> = cat
            .shops()
            .iter()
            .filter(|s| filters.matches(s))
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(matched, vec!["Old Ferry Donut"]);
    }

    #[test]
    fn region_and_category_combine_conjunctively() {
        let mut filters = FilterState::default();
        filters.toggle_category("Cafe");
        filters.set_region(Some("Gangnam".to_string()));
        let cat = catalog();
        let matched: Vec<&str> = cat
            .shops()
            .iter()
            .filter(|s| filters.matches(s))
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(matched, vec!["Alver"]);
    }

    #[test]
    fn any_mutation_resets_the_page() {
        let mut filters = FilterState::default();
        filters.current_page = 3;
        filters.set_search("x");
        assert_eq!(filters.current_page, 1);
        filters.current_page = 3;
        filters.toggle_category("Cafe");
        assert_eq!(filters.current_page, 1);
        filters.current_page = 3;
        filters.set_region(None);
        assert_eq!(filters.current_page, 1);
    }

    #[test]
    fn flagship_regions_lead_the_ordering() {
        let cat = catalog();
        let regions = ordered_regions(&cat);
        assert_eq!(
            regions,
            vec!["Seoung - su", "Gangnam", "Yongsan", "Itaewon"]
        );
    }

    #[test]
    fn sections_drop_empty_regions_and_chunk_rows() {
        let mut filters = FilterState::default();
        filters.toggle_category("Cafe");
        let cat = catalog();
        let sections = region_sections(&cat, &filters);
        let titles: Vec<&str> = sections.iter().map(|s| s.title).collect();
        assert_eq!(titles, vec!["Seoung - su", "Gangnam"]);
        assert_eq!(sections[0].rows.len(), 1);
        assert_eq!(sections[0].rows[0].len(), 1);
    }

    #[test]
    fn rows_split_at_five_shops() {
        let shops: Vec<Shop> = (0..7)
            .map(|i| shop(&format!("s{i}"), "Cafe", "Mapo"))
            .collect();
        let cat = Catalog::new(shops);
        let sections = region_sections(&cat, &FilterState::default());
        assert_eq!(sections[0].rows.len(), 2);
        assert_eq!(sections[0].rows[0].len(), 5);
        assert_eq!(sections[0].rows[1].len(), 2);
    }

    #[test]
    fn url_query_drives_the_filter_end_to_end() {
        let q = crate::query::parse_landing_query("?category=Cafe&region=Gangnam");
        let mut filters = FilterState::default();
        filters.selected_categories = q.categories;
        filters.selected_region = q.region;
        let cat = catalog();
        let sections = region_sections(&cat, &filters);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Gangnam");
        assert_eq!(sections[0].rows[0][0].name, "Alver");
    }

    #[test]
    fn paging_slices_sections_in_fives() {
        let shops: Vec<Shop> = (0..12)
            .map(|i| shop(&format!("s{i}"), "Cafe", &format!("Region{i}")))
            .collect();
        let cat = Catalog::new(shops);
        let sections = region_sections(&cat, &FilterState::default());
        assert_eq!(total_pages(sections.len()), 3);
        assert_eq!(page(&sections, 1).len(), 5);
        assert_eq!(page(&sections, 3).len(), 2);
        assert!(page(&sections, 4).is_empty());
        assert!(page(&sections, 0).len() == 5);
    }
}
