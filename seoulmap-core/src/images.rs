use std::collections::HashSet;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use unicode_normalization::UnicodeNormalization;

use crate::normalize::normalize_label;

/// Application-relative asset paths. The runtime prepends the host base URL.
pub const DEFAULT_MAP_IMAGE: &str = "Etc/all@4x.png";
pub const FALLBACK_MAP_SVG: &str = "svg/all.svg";
pub const DEFAULT_SHOP_IMAGE: &str = "Etc/noimage@4x.png";
pub const HERO_TITLE_EN: &str = "4x/white eng@4x.png";
pub const HERO_TITLE_KO: &str = "4x/white kor@4x.png";
pub const LOGO_EN: &str = "4x/black eng@4x.png";
pub const LOGO_KO: &str = "4x/black kor@4x.png";
pub const SEARCH_ICON: &str = "search-icon.svg";

/// Directory holding the numbered hero slideshow images. The name contains a
/// space on disk, so the path is kept pre-encoded.
pub const HERO_DIR: &str = "landing%20first";
pub const HERO_SEQUENCE_LEN: u32 = 12;

const MAP_EXTENSIONS: &[&str] = &[
    "@4x.png", "@4x.PNG", ".png", ".PNG", ".jpg", ".JPG", ".jpeg", ".JPEG", ".webp", ".WEBP",
];
const SHOP_EXTENSIONS: &[&str] = &[
    ".png", ".PNG", ".jpg", ".JPG", ".jpeg", ".JPEG", ".webp", ".WEBP",
];
const HERO_EXTENSIONS: &[&str] = &[
    ".png", ".PNG", ".jpg", ".jpeg", ".webp", ".JPG", ".JPEG", ".WEBP",
];

/// Case-sensitive overrides for region map filenames. `Yeongdeungpo`
/// deliberately reuses the Gangbuk artwork and `Gawnak` covers a misspelled
/// label in older data; both are kept pending product confirmation.
const REGION_IMAGE_OVERRIDES: &[(&str, &str)] = &[
    ("Mapo", "Mapo"),
    ("Gangnam", "Gangnam"),
    ("Jung", "Jung"),
    ("Jongno", "Jongno"),
    ("Dongdaemun", "Dongdaemun"),
    ("Jungnang", "Jungnang"),
    ("Gwangjin", "Gwangjin"),
    ("Seoungdong", "Seoungdong"),
    ("Seoungbuk", "Seoungbuk"),
    ("Dobong", "Dobong"),
    ("Nowon", "Nowon"),
    ("Eunpyeong", "Eunpyeong"),
    ("Sedaemun", "Sedaemun"),
    ("Yangcheon", "Yangcheon"),
    ("Gangseo", "Gangseo"),
    ("Gangbuk", "Gangbuk"),
    ("Guro", "Guro"),
    ("Geumcheon", "Geumcheon"),
    ("Yeongdeungpo", "Gangbuk"),
    ("Dongjak", "Dongjak"),
    ("Gawnak", "Gwanak"),
    ("Gwanak", "Gwanak"),
    ("Seocho", "Seocho"),
    ("Songpa", "Songpa"),
    ("Gangdong", "Gangdong"),
];

/// Brand-specific filename rewrites, kept as data so new exceptions do not
/// require code changes. A rule matches `prefix` + optional whitespace +
/// `suffix` case-insensitively and splices `insert` between the two parts
/// while preserving the matched casing.
pub struct BrandRule {
    pub prefix: &'static str,
    pub suffix: &'static str,
    pub insert: &'static str,
}

pub const BRAND_RULES: &[BrandRule] = &[BrandRule {
    prefix: "pho",
    suffix: "some",
    insert: "²",
}];

const SUPERSCRIPTS: &[(char, char)] = &[('¹', '1'), ('²', '2'), ('³', '3')];

/// Percent-encoding set equivalent to JavaScript's `encodeURIComponent`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub fn encode_component(s: &str) -> String {
    utf8_percent_encode(s, COMPONENT).to_string()
}

pub fn region_image_override(key: &str) -> Option<&'static str> {
    REGION_IMAGE_OVERRIDES
        .iter()
        .find(|(label, _)| *label == key)
        .map(|(_, file)| *file)
}

fn push_unique(list: &mut Vec<String>, value: String) {
    if !value.is_empty() && !list.contains(&value) {
        list.push(value);
    }
}

fn strip_whitespace(s: &str) -> String {
    s.split_whitespace().collect()
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(capitalize_first)
        .collect::<Vec<_>>()
        .join(" ")
}

fn swap_ascii_case(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii_lowercase() {
                c.to_ascii_uppercase()
            } else if c.is_ascii_uppercase() {
                c.to_ascii_lowercase()
            } else {
                c
            }
        })
        .collect()
}

fn superscript_to_digit(s: &str) -> String {
    s.chars()
        .map(|c| {
            SUPERSCRIPTS
                .iter()
                .find(|(sup, _)| *sup == c)
                .map_or(c, |(_, d)| *d)
        })
        .collect()
}

fn digit_to_superscript(s: &str) -> String {
    s.chars()
        .map(|c| {
            SUPERSCRIPTS
                .iter()
                .find(|(_, d)| *d == c)
                .map_or(c, |(sup, _)| *sup)
        })
        .collect()
}

fn strip_superscripts(s: &str) -> String {
    s.chars()
        .filter(|c| !SUPERSCRIPTS.iter().any(|(sup, _)| sup == c))
        .collect()
}

fn apply_brand_rule(s: &str, rule: &BrandRule) -> Option<String> {
    let lower = s.to_ascii_lowercase();
    let start = lower.find(rule.prefix)?;
    let after_prefix = start + rule.prefix.len();
    let rest = &lower[after_prefix..];
    let gap = rest.len() - rest.trim_start().len();
    let suffix_at = after_prefix + gap;
    if !lower[suffix_at..].starts_with(rule.suffix) {
        return None;
    }
    let suffix_end = suffix_at + rule.suffix.len();
    let mut out = String::with_capacity(s.len() + rule.insert.len());
    out.push_str(&s[..after_prefix]);
    out.push_str(rule.insert);
    out.push_str(&s[suffix_at..suffix_end]);
    out.push_str(&s[suffix_end..]);
    Some(out)
}

fn spelling_variants(s: &str) -> Vec<String> {
    let mut variants = vec![
        s.to_string(),
        s.to_lowercase(),
        s.to_uppercase(),
        title_case(s),
        swap_ascii_case(s),
        superscript_to_digit(s),
        digit_to_superscript(s),
        strip_superscripts(s),
    ];
    for rule in BRAND_RULES {
        if let Some(rewritten) = apply_brand_rule(s, rule) {
            variants.push(rewritten);
        }
    }
    variants
}

/// Ordered candidate paths for a region map image. Deterministic, deduplicated
/// and never empty; an empty key degrades to the default map.
pub fn region_map_candidates(key: &str) -> Vec<String> {
    let base = region_image_override(key)
        .map(str::to_string)
        .unwrap_or_else(|| normalize_label(key));
    if base.is_empty() {
        return vec![DEFAULT_MAP_IMAGE.to_string()];
    }
    let mut variants = Vec::new();
    push_unique(&mut variants, base.clone());
    push_unique(&mut variants, strip_whitespace(&base));
    push_unique(&mut variants, base.to_lowercase());
    push_unique(&mut variants, capitalize_first(&base));

    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for variant in &variants {
        for ext in MAP_EXTENSIONS {
            let path = format!("4x/{variant}{ext}");
            if seen.insert(path.clone()) {
                out.push(path);
            }
        }
    }
    out
}

/// Ordered candidate paths for a numbered shop image. Expands unicode
/// composition, spacing, casing, superscript-digit and brand variants, each
/// crossed with every extension in raw and percent-encoded form.
pub fn shop_image_candidates(name: &str, index: u32) -> Vec<String> {
    let trimmed = name.replace('\u{3000}', " ").trim().to_string();
    if trimmed.is_empty() {
        return vec![DEFAULT_SHOP_IMAGE.to_string()];
    }
    let nfc: String = trimmed.nfc().collect();
    let nfd: String = trimmed.nfd().collect();

    let mut bases: Vec<String> = Vec::new();
    for form in [
        nfc.clone(),
        nfd.clone(),
        strip_whitespace(&trimmed),
        strip_whitespace(&nfc),
        strip_whitespace(&nfd),
    ] {
        if form.is_empty() {
            continue;
        }
        for variant in spelling_variants(&form) {
            push_unique(&mut bases, variant);
        }
    }

    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for base in &bases {
        for ext in SHOP_EXTENSIONS {
            let raw = format!("shopImage/{base}{index}{ext}");
            let encoded = format!("shopImage/{}{}{}", encode_component(base), index, ext);
            for path in [raw, encoded] {
                if seen.insert(path.clone()) {
                    out.push(path);
                }
            }
        }
    }
    out
}

/// Per-number candidate lists for the hero slideshow discovery probe.
pub fn hero_image_candidates() -> Vec<Vec<String>> {
    (1..=HERO_SEQUENCE_LEN)
        .map(|n| {
            HERO_EXTENSIONS
                .iter()
                .map(|ext| format!("{HERO_DIR}/{n}{ext}"))
                .collect()
        })
        .collect()
}

/// Cursor over an ordered candidate list plus terminal placeholders. Each
/// load failure advances the cursor exactly once; the chain is finite.
#[derive(Clone, Debug)]
pub struct ImageFallback {
    candidates: Vec<String>,
    placeholders: Vec<String>,
    index: usize,
}

impl ImageFallback {
    pub fn new(candidates: Vec<String>, placeholders: Vec<String>) -> Self {
        ImageFallback {
            candidates,
            placeholders,
            index: 0,
        }
    }

    pub fn for_region_map(key: &str) -> Self {
        Self::new(
            region_map_candidates(key),
            vec![DEFAULT_MAP_IMAGE.to_string(), FALLBACK_MAP_SVG.to_string()],
        )
    }

    /// The chain used when no region is selected: the default map straight
    /// away, with only the vector map behind it.
    pub fn for_default_map() -> Self {
        Self::new(
            vec![DEFAULT_MAP_IMAGE.to_string()],
            vec![FALLBACK_MAP_SVG.to_string()],
        )
    }

    pub fn for_shop_image(name: &str, index: u32) -> Self {
        Self::new(
            shop_image_candidates(name, index),
            vec![DEFAULT_SHOP_IMAGE.to_string()],
        )
    }

    pub fn current(&self) -> Option<&str> {
        if self.index < self.candidates.len() {
            Some(&self.candidates[self.index])
        } else {
            self.placeholders
                .get(self.index - self.candidates.len())
                .map(String::as_str)
        }
    }

    /// Advance past a failed source. `None` means even the placeholders are
    /// gone and the caller should stop touching the element.
    pub fn on_error(&mut self) -> Option<&str> {
        if self.current().is_some() {
            self.index += 1;
        }
        self.current()
    }

    /// True once every real candidate has been tried.
    pub fn candidates_exhausted(&self) -> bool {
        self.index >= self.candidates.len()
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }
}
