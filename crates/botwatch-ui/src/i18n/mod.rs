//! Lightweight JSON-backed translations with per-locale bundles.

use serde::Deserialize;
use serde_json::Value;
use std::sync::LazyLock;

/// Supported locale codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocaleCode {
    /// English.
    En,
    /// Chinese (Simplified).
    Zh,
}

impl LocaleCode {
    /// All supported locales in display order.
    #[must_use]
    pub const fn all() -> [Self; 2] {
        [Self::En, Self::Zh]
    }

    /// Two-letter language code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Zh => "zh",
        }
    }

    /// Human-friendly label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Zh => "中文",
        }
    }

    /// Map an arbitrary browser language tag (`zh-CN`, `en_US`) to a supported locale.
    #[must_use]
    pub fn from_lang_tag(tag: &str) -> Option<Self> {
        let lowered = tag.trim().to_ascii_lowercase();
        let base = lowered.split(['-', '_']).next().unwrap_or_default();
        Self::all()
            .iter()
            .copied()
            .find(|locale| locale.code() == base)
    }
}

/// Default fallback locale.
pub const DEFAULT_LOCALE: LocaleCode = LocaleCode::En;

/// Translation bundle containing a parsed JSON tree for the locale.
#[derive(Clone, Debug)]
pub struct TranslationBundle {
    /// Locale backing this bundle.
    pub locale: LocaleCode,
    tree: Value,
}

impl PartialEq for TranslationBundle {
    fn eq(&self, other: &Self) -> bool {
        self.locale == other.locale
    }
}

impl TranslationBundle {
    /// Build a translation bundle for the given locale.
    ///
    /// Missing keys degrade to English strings, then to the caller's default.
    #[must_use]
    pub fn new(locale: LocaleCode) -> Self {
        let tree: Value = serde_json::from_str(raw_locale(locale)).unwrap_or(Value::Null);
        Self { locale, tree }
    }

    /// Resolve a dotted path (`section.key`) with English fallback and caller default.
    #[must_use]
    pub fn text(&self, path: &str, default: &str) -> String {
        resolve(&self.tree, path)
            .or_else(|| resolve(&EN_FALLBACK.tree, path))
            .unwrap_or_else(|| default.to_string())
    }

    /// Like [`Self::text`], substituting `{name}` placeholders.
    #[must_use]
    pub fn format(&self, path: &str, default: &str, args: &[(&str, String)]) -> String {
        args.iter()
            .fold(self.text(path, default), |text, (name, value)| {
                text.replace(&format!("{{{name}}}"), value)
            })
    }
}

static EN_FALLBACK: LazyLock<TranslationBundle> =
    LazyLock::new(|| TranslationBundle::new(LocaleCode::En));

fn resolve(tree: &Value, path: &str) -> Option<String> {
    let mut node = tree;
    for segment in path.split('.') {
        node = node.get(segment)?;
    }
    node.as_str().map(ToString::to_string)
}

const fn raw_locale(locale: LocaleCode) -> &'static str {
    match locale {
        LocaleCode::En => include_str!("../../i18n/en.json"),
        LocaleCode::Zh => include_str!("../../i18n/zh.json"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_falls_back_to_default() {
        let bundle = TranslationBundle::new(LocaleCode::Zh);
        assert_eq!(bundle.text("nonexistent.key", "fallback"), "fallback");
    }

    #[test]
    fn missing_locale_key_falls_back_to_english() {
        let bundle = TranslationBundle::new(LocaleCode::Zh);
        assert_eq!(bundle.text("levels.debug", "?"), "Debug");
    }

    #[test]
    fn connection_strings_per_locale() {
        let en = TranslationBundle::new(LocaleCode::En);
        let zh = TranslationBundle::new(LocaleCode::Zh);
        assert_eq!(en.text("connection.connected", ""), "Connected");
        assert_eq!(zh.text("connection.connected", ""), "已连接");
        assert_eq!(zh.text("connection.disconnected", ""), "未连接");
        assert_eq!(zh.text("connection.failed", ""), "连接失败");
        assert_eq!(zh.text("connection.retry_failed", ""), "重连失败");
    }

    #[test]
    fn format_substitutes_placeholders() {
        let en = TranslationBundle::new(LocaleCode::En);
        let text = en.format(
            "logs.shown",
            "",
            &[("shown", "3".to_string()), ("total", "10".to_string())],
        );
        assert_eq!(text, "3 of 10 lines shown");
    }

    #[test]
    fn lang_tags_map_to_base_language() {
        assert_eq!(LocaleCode::from_lang_tag("zh-CN"), Some(LocaleCode::Zh));
        assert_eq!(LocaleCode::from_lang_tag("en_US"), Some(LocaleCode::En));
        assert_eq!(LocaleCode::from_lang_tag("fr"), None);
        for locale in LocaleCode::all() {
            assert!(!locale.label().is_empty());
            assert_eq!(LocaleCode::from_lang_tag(locale.code()), Some(locale));
        }
    }
}
