use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

macro_rules! color_tokens {
    ($($field:ident => $name:literal),+ $(,)?) => {
        /// Semantic color table. Light and dark are values of this one type,
        /// so both always carry the same keys.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
        pub struct ColorTokens {
            $(
                #[serde(rename = $name)]
                pub $field: &'static str,
            )+
        }

        impl ColorTokens {
            /// Token names in declaration order.
            pub const NAMES: &'static [&'static str] = &[$($name),+];

            /// Looks a token up by its semantic name (e.g. `textSecondary`).
            #[must_use]
            pub fn get(&self, name: &str) -> Option<&'static str> {
                match name {
                    $($name => Some(self.$field),)+
                    _ => None,
                }
            }

            /// (name, hex) pairs in declaration order.
            #[must_use]
            pub fn entries(&self) -> Vec<(&'static str, &'static str)> {
                vec![$(($name, self.$field)),+]
            }
        }
    };
}

color_tokens! {
    primary => "primary",
    primary_dark => "primaryDark",
    primary_light => "primaryLight",
    secondary => "secondary",
    background => "background",
    surface => "surface",
    card => "card",
    text => "text",
    text_secondary => "textSecondary",
    border => "border",
    success => "success",
    warning => "warning",
    error => "error",
    info => "info",
    tab_bar => "tabBar",
    tab_bar_inactive => "tabBarInactive",
}

pub const LIGHT: ColorTokens = ColorTokens {
    primary: "#2E7D32",
    primary_dark: "#1B5E20",
    primary_light: "#81C784",
    secondary: "#8D6E63",
    background: "#F5F7F2",
    surface: "#FFFFFF",
    card: "#FFFFFF",
    text: "#1B1F1A",
    text_secondary: "#5F6B5C",
    border: "#DDE3D8",
    success: "#43A047",
    warning: "#F9A825",
    error: "#D32F2F",
    info: "#0288D1",
    tab_bar: "#FFFFFF",
    tab_bar_inactive: "#9EA79B",
};

pub const DARK: ColorTokens = ColorTokens {
    primary: "#66BB6A",
    primary_dark: "#388E3C",
    primary_light: "#A5D6A7",
    secondary: "#BCAAA4",
    background: "#121512",
    surface: "#1C211B",
    card: "#232922",
    text: "#E8EDE6",
    text_secondary: "#A3AD9F",
    border: "#343B32",
    success: "#66BB6A",
    warning: "#FFCA28",
    error: "#EF5350",
    info: "#4FC3F7",
    tab_bar: "#1C211B",
    tab_bar_inactive: "#6B7568",
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    #[must_use]
    pub fn colors(self) -> &'static ColorTokens {
        match self {
            Self::Light => &LIGHT,
            Self::Dark => &DARK,
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(Error::Config(format!("unknown theme '{other}'"))),
        }
    }
}
