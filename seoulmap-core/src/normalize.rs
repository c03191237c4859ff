use unicode_normalization::UnicodeNormalization;

/// Known spelling variants of one district collapsed onto a single canonical
/// display label. Keyed by the slug form of the variant.
const REGION_ALIASES: &[(&str, &str)] = &[
    ("seoung-su", "Seoung - su"),
    ("seongsu", "Seoung - su"),
    ("seong-su", "Seoung - su"),
    ("seongsu-dong", "Seoung - su"),
    ("seongsudong", "Seoung - su"),
    ("seoungdong", "Seoung - su"),
    ("seongdong", "Seoung - su"),
    ("gangnam", "Gangnam"),
    ("yongsan", "Yongsan"),
    ("mapo", "Mapo"),
    ("jongno", "Jongno"),
];

/// Labels whose slug does not follow the generic rule.
const SLUG_SPECIALS: &[(&str, &str)] = &[
    ("Seoung - su", "seoung-su"),
    ("Seoungdong", "seoung-su"),
];

/// NFC-compose, turn NBSP/ideographic spaces into ASCII spaces, collapse the
/// Unicode hyphen block onto `-`, collapse whitespace runs and trim.
pub fn normalize_label(name: &str) -> String {
    let composed: String = name.nfc().collect();
    let mut out = String::with_capacity(composed.len());
    let mut pending_space = false;
    for c in composed.chars() {
        let c = match c {
            '\u{00A0}' | '\u{3000}' => ' ',
            '\u{2010}'..='\u{2015}' => '-',
            other => other,
        };
        if c.is_whitespace() {
            pending_space = true;
        } else {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(c);
        }
    }
    out
}

/// Lowercase slug: runs of non-alphanumerics become a single hyphen.
pub fn slugify(name: &str) -> String {
    for (special, slug) in SLUG_SPECIALS {
        if name == *special {
            return (*slug).to_string();
        }
    }
    let lower = normalize_label(name).to_lowercase();
    let mut out = String::with_capacity(lower.len());
    for c in lower.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c);
        } else if !out.is_empty() && !out.ends_with('-') {
            out.push('-');
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    out
}

/// Canonical form of a region label, used only for sort-order comparison.
/// Unknown input comes back as its normalized self.
pub fn canonical_region(name: &str) -> String {
    let normalized = normalize_label(name);
    if normalized.is_empty() {
        return normalized;
    }
    let slug = slugify(&normalized);
    for (alias, canonical) in REGION_ALIASES {
        if slug == *alias {
            return (*canonical).to_string();
        }
    }
    normalized
}
