//! English to Korean label tables for the hover swap on filter menus and
//! shop cards. Unlisted labels simply have no Korean form.

const CATEGORY_KO: &[(&str, &str)] = &[
    ("Cafe", "카페"),
    ("Bakery", "베이커리"),
    ("Restaurant", "음식점"),
    ("Bar", "주점"),
    ("Fancy", "팬시"),
    ("Pub", "펍"),
    ("Museum", "박물관"),
    ("Interior", "인테리어"),
    ("Cosmetics", "화장품"),
    ("Fashion", "패션"),
    ("Library", "도서관"),
    ("Flower shop", "꽃집"),
    ("Gallery", "갤러리"),
    ("Shop", "샵"),
    ("Etc", "기타"),
];

const REGION_KO: &[(&str, &str)] = &[
    ("Seoungdong", "성동구"),
    ("Seoung - su", "성동구"),
    ("Yongsan", "용산구"),
    ("Mapo", "마포구"),
    ("Gangnam", "강남구"),
    ("Jung", "중구"),
    ("Jongno", "종로구"),
    ("Gwangjin", "광진구"),
    ("Dongdaemun", "동대문구"),
    ("Jungnang", "중랑구"),
    ("Seoungbuk", "성북구"),
    ("Gangbuk", "강북구"),
    ("Dobong", "도봉구"),
    ("Nowon", "노원구"),
    ("Eunpyeong", "은평구"),
    ("Sedaemun", "서대문구"),
    ("Yangcheon", "양천구"),
    ("Gangseo", "강서구"),
    ("Guro", "구로구"),
    ("Geumcheon", "금천구"),
    ("Yeongdeungpo", "영등포구"),
    ("Dongjak", "동작구"),
    ("Gwanak", "관악구"),
    ("Seocho", "서초구"),
    ("Songpa", "송파구"),
    ("Gangdong", "강동구"),
];

/// Korean name of a category, matched case-insensitively.
pub fn category_ko(category: &str) -> Option<&'static str> {
    CATEGORY_KO
        .iter()
        .find(|(en, _)| en.eq_ignore_ascii_case(category))
        .map(|(_, ko)| *ko)
}

/// Korean name of a district. Exact match only; the dataset spells these
/// consistently.
pub fn region_ko(region: &str) -> Option<&'static str> {
    REGION_KO
        .iter()
        .find(|(en, _)| *en == region)
        .map(|(_, ko)| *ko)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_match_case_insensitively() {
        assert_eq!(category_ko("Cafe"), Some("카페"));
        assert_eq!(category_ko("CAFE"), Some("카페"));
        assert_eq!(category_ko("flower shop"), Some("꽃집"));
        assert_eq!(category_ko("Spaceport"), None);
    }

    #[test]
    fn both_seongsu_spellings_map_to_the_same_district() {
        assert_eq!(region_ko("Seoung - su"), Some("성동구"));
        assert_eq!(region_ko("Seoungdong"), Some("성동구"));
    }

    #[test]
    fn regions_match_exactly() {
        assert_eq!(region_ko("Yongsan"), Some("용산구"));
        assert_eq!(region_ko("yongsan"), None);
        assert_eq!(region_ko("Busan"), None);
    }
}
