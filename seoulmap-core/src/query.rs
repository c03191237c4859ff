use percent_encoding::percent_decode_str;

use crate::images::encode_component;

/// Which filter dropdown the landing page should open on arrival.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpenMenu {
    Category,
    Region,
}

/// Filter selection carried in the landing page query string.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LandingQuery {
    pub categories: Vec<String>,
    pub region: Option<String>,
    pub open: Option<OpenMenu>,
}

/// Percent-decode a path or query component, lossy on bad UTF-8.
pub fn decode_component(s: &str) -> String {
    percent_decode_str(s).decode_utf8_lossy().into_owned()
}

fn decode_query_value(s: &str) -> String {
    decode_component(&s.replace('+', " "))
}

/// First value of `key` in a `?a=b&c=d` search string.
pub fn query_param(search: &str, key: &str) -> Option<String> {
    let search = search.strip_prefix('?').unwrap_or(search);
    for pair in search.split('&') {
        let mut parts = pair.splitn(2, '=');
        if parts.next() == Some(key) {
            return Some(decode_query_value(parts.next().unwrap_or("")));
        }
    }
    None
}

/// Parse `category` (comma-separated), `region` and `open` out of the search
/// string. Unknown parameters and empty values are ignored.
pub fn parse_landing_query(search: &str) -> LandingQuery {
    let categories = query_param(search, "category")
        .map(|value| {
            value
                .split(',')
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();
    let region = query_param(search, "region").filter(|r| !r.is_empty());
    let open = match query_param(search, "open").as_deref() {
        Some("category") => Some(OpenMenu::Category),
        Some("region") => Some(OpenMenu::Region),
        _ => None,
    };
    LandingQuery {
        categories,
        region,
        open,
    }
}

/// Build the search string for a jump back to the landing page. When both a
/// category selection and a region exist, the category dropdown wins the
/// `open` slot. Returns the string without a leading `?`; empty when there
/// is nothing to carry.
pub fn build_landing_query(categories: &[String], region: Option<&str>) -> String {
    let mut parts = Vec::new();
    if !categories.is_empty() {
        parts.push(format!(
            "category={}",
            encode_component(&categories.join(","))
        ));
    }
    if let Some(region) = region {
        if !region.is_empty() {
            parts.push(format!("region={}", encode_component(region)));
        }
    }
    if !categories.is_empty() {
        parts.push("open=category".to_string());
    } else if region.is_some_and(|r| !r.is_empty()) {
        parts.push("open=region".to_string());
    }
    parts.join("&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_param_decodes_percent_and_plus() {
        let search = "?category=Cafe%2CBakery&region=Seoung+-+su";
        assert_eq!(
            query_param(search, "category").as_deref(),
            Some("Cafe,Bakery")
        );
        assert_eq!(query_param(search, "region").as_deref(), Some("Seoung - su"));
        assert_eq!(query_param(search, "missing"), None);
    }

    #[test]
    fn parse_splits_categories_and_drops_blanks() {
        let q = parse_landing_query("?category=Cafe,%20Bakery,,&region=Yongsan&open=category");
        assert_eq!(q.categories, vec!["Cafe", "Bakery"]);
        assert_eq!(q.region.as_deref(), Some("Yongsan"));
        assert_eq!(q.open, Some(OpenMenu::Category));
    }

    #[test]
    fn parse_of_empty_search_is_default() {
        assert_eq!(parse_landing_query(""), LandingQuery::default());
        assert_eq!(parse_landing_query("?open=bogus").open, None);
        assert_eq!(parse_landing_query("?region=").region, None);
    }

    #[test]
    fn build_encodes_values_and_picks_the_open_menu() {
        let cats = vec!["Cafe".to_string(), "Flower shop".to_string()];
        assert_eq!(
            build_landing_query(&cats, Some("Seoung - su")),
            "category=Cafe%2CFlower%20shop&region=Seoung%20-%20su&open=category"
        );
        assert_eq!(
            build_landing_query(&[], Some("Mapo")),
            "region=Mapo&open=region"
        );
        assert_eq!(build_landing_query(&[], None), "");
    }

    #[test]
    fn build_then_parse_round_trips_the_selection() {
        let cats = vec!["Cafe".to_string(), "Bakery".to_string()];
        let q = parse_landing_query(&build_landing_query(&cats, Some("Yongsan")));
        assert_eq!(q.categories, cats);
        assert_eq!(q.region.as_deref(), Some("Yongsan"));
        assert_eq!(q.open, Some(OpenMenu::Category));
    }

    #[test]
    fn decode_component_handles_hangul() {
        assert_eq!(decode_component("%EC%B9%B4%ED%8E%98"), "카페");
        // plus signs survive in path segments
        assert_eq!(decode_component("a+b"), "a+b");
    }
}
