//! Prefecture directory.
//!
//! Maps every Japanese prefecture name to the city ID the weather service
//! expects (the ID of the prefecture's primary observation city). The table
//! is static and never mutated; it also backs the region filter control on
//! the post listing page.

/// Error returned when a prefecture name is not in the directory.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown prefecture: {0}")]
pub struct UnknownRegion(pub String);

/// All 47 prefectures, in the conventional north-to-south order.
///
/// Each entry is `(name, city code)`. The code is what the weather API's
/// `city` query parameter takes; it is not the JIS prefecture code.
pub const PREFECTURES: &[(&str, &str)] = &[
    ("北海道", "016010"),
    ("青森県", "020010"),
    ("岩手県", "030010"),
    ("宮城県", "040010"),
    ("秋田県", "050010"),
    ("山形県", "060010"),
    ("福島県", "070010"),
    ("茨城県", "080010"),
    ("栃木県", "090010"),
    ("群馬県", "100010"),
    ("埼玉県", "110010"),
    ("千葉県", "120010"),
    ("東京都", "130010"),
    ("神奈川県", "140010"),
    ("新潟県", "150010"),
    ("富山県", "160010"),
    ("石川県", "170010"),
    ("福井県", "180010"),
    ("山梨県", "190010"),
    ("長野県", "200010"),
    ("岐阜県", "210010"),
    ("静岡県", "220010"),
    ("愛知県", "230010"),
    ("三重県", "240010"),
    ("滋賀県", "250010"),
    ("京都府", "260010"),
    ("大阪府", "270000"),
    ("兵庫県", "280010"),
    ("奈良県", "290010"),
    ("和歌山県", "300010"),
    ("鳥取県", "310010"),
    ("島根県", "320010"),
    ("岡山県", "330010"),
    ("広島県", "340010"),
    ("山口県", "350020"),
    ("徳島県", "360010"),
    ("香川県", "370000"),
    ("愛媛県", "380010"),
    ("高知県", "390010"),
    ("福岡県", "400010"),
    ("佐賀県", "410010"),
    ("長崎県", "420010"),
    ("熊本県", "430010"),
    ("大分県", "440010"),
    ("宮崎県", "450010"),
    ("鹿児島県", "460010"),
    ("沖縄県", "471010"),
];

/// Look up the weather city code for a prefecture name.
///
/// # Errors
///
/// Returns [`UnknownRegion`] if `name` is not one of the 47 prefectures.
pub fn code_for(name: &str) -> Result<&'static str, UnknownRegion> {
    PREFECTURES
        .iter()
        .find(|(pref, _)| *pref == name)
        .map(|(_, code)| *code)
        .ok_or_else(|| UnknownRegion(name.to_owned()))
}

/// The full ordered list of `(name, code)` pairs, for presentation.
#[must_use]
pub const fn all() -> &'static [(&'static str, &'static str)] {
    PREFECTURES
}

/// Whether `name` is a known prefecture.
#[must_use]
pub fn is_known(name: &str) -> bool {
    code_for(name).is_ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_code_for_known_prefectures() {
        assert_eq!(code_for("神奈川県").unwrap(), "140010");
        assert_eq!(code_for("東京都").unwrap(), "130010");
        assert_eq!(code_for("北海道").unwrap(), "016010");
        assert_eq!(code_for("沖縄県").unwrap(), "471010");
    }

    #[test]
    fn test_code_for_unknown_prefecture() {
        let err = code_for("かながわ県").unwrap_err();
        assert_eq!(err, UnknownRegion("かながわ県".to_owned()));
    }

    #[test]
    fn test_code_for_is_exact_not_substring() {
        // The directory lookup is exact; only the post filter is a
        // substring match.
        assert!(code_for("神奈川").is_err());
    }

    #[test]
    fn test_all_has_47_entries_in_order() {
        let all = all();
        assert_eq!(all.len(), 47);
        assert_eq!(all.first().unwrap().0, "北海道");
        assert_eq!(all.last().unwrap().0, "沖縄県");
    }

    #[test]
    fn test_all_names_fit_the_column_bound() {
        for (name, _) in all() {
            assert!(name.chars().count() <= 4, "{name} exceeds 4 characters");
        }
    }

    #[test]
    fn test_is_known() {
        assert!(is_known("大阪府"));
        assert!(!is_known("大阪"));
    }
}
