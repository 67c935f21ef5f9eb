//! Localized era display names.

use icu_locale::Locale;

/// Returns the display name of the era `code` in `locale`.
///
/// Japanese locales use the native names; every other locale uses the
/// English romanization. Unknown codes are capitalized.
pub(crate) fn era_display_name(code: &str, locale: &Locale) -> String {
    let japanese = locale.id.language.as_str() == "ja";
    let known = match (code, japanese) {
        ("meiji", false) => Some("Meiji"),
        ("taisho", false) => Some("Taisho"),
        ("showa", false) => Some("Showa"),
        ("heisei", false) => Some("Heisei"),
        ("reiwa", false) => Some("Reiwa"),
        ("ce", false) => Some("A.D."),
        ("be", false) => Some("B.E."),
        ("roc", false) => Some("Minguo"),
        ("meiji", true) => Some("明治"),
        ("taisho", true) => Some("大正"),
        ("showa", true) => Some("昭和"),
        ("heisei", true) => Some("平成"),
        ("reiwa", true) => Some("令和"),
        ("ce", true) => Some("西暦"),
        ("be", true) => Some("仏暦"),
        ("roc", true) => Some("民国"),
        _ => None,
    };
    if let Some(name) = known {
        return name.into();
    }

    let mut chars = code.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}
