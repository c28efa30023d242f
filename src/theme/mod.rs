mod colors;
mod context;

pub use colors::{ColorTokens, DARK, LIGHT, ThemeMode};
pub use context::ThemeContext;
