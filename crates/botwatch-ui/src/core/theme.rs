//! Light/dark presentation mode.
//!
//! The stored value is the bare string `dark` or `light`; only an exact
//! `dark` selects the dark theme.

/// Class toggled on `<body>` while the dark theme is active.
pub const DARK_MODE_CLASS: &str = "dark-mode";

/// Light or dark theme preference.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ThemeMode {
    /// Light theme mode.
    #[default]
    Light,
    /// Dark theme mode.
    Dark,
}

impl ThemeMode {
    /// Value written to local storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Interpret a stored value; anything other than `dark` (including absence) is light.
    #[must_use]
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("dark") => Self::Dark,
            _ => Self::Light,
        }
    }

    /// Mode selected by the toggle checkbox state.
    #[must_use]
    pub const fn from_checked(checked: bool) -> Self {
        if checked { Self::Dark } else { Self::Light }
    }

    /// The other mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Whether the dark theme is active (checkbox state).
    #[must_use]
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    /// Body class for this mode, if any.
    #[must_use]
    pub const fn body_class(self) -> Option<&'static str> {
        match self {
            Self::Light => None,
            Self::Dark => Some(DARK_MODE_CLASS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_exact_dark_selects_dark() {
        assert_eq!(ThemeMode::from_stored(Some("dark")), ThemeMode::Dark);
        assert_eq!(ThemeMode::from_stored(Some("light")), ThemeMode::Light);
        assert_eq!(ThemeMode::from_stored(Some("Dark")), ThemeMode::Light);
        assert_eq!(ThemeMode::from_stored(Some("\"dark\"")), ThemeMode::Light);
        assert_eq!(ThemeMode::from_stored(None), ThemeMode::Light);
    }

    #[test]
    fn checkbox_and_storage_agree() {
        for checked in [true, false] {
            let mode = ThemeMode::from_checked(checked);
            assert_eq!(mode.is_dark(), checked);
            assert_eq!(ThemeMode::from_stored(Some(mode.as_str())), mode);
        }
    }

    #[test]
    fn body_class_only_in_dark_mode() {
        assert_eq!(ThemeMode::Dark.body_class(), Some("dark-mode"));
        assert_eq!(ThemeMode::Light.body_class(), None);
        assert_eq!(ThemeMode::Light.toggled(), ThemeMode::Dark);
        assert_eq!(ThemeMode::Dark.toggled().toggled(), ThemeMode::Dark);
    }
}
