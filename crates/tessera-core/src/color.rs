//! Color handling for Tessera documents
//!
//! Documents store colors as the CSS strings the editor produced. The
//! [`Color`] type wraps the `DynamicColor` type from the color crate so those
//! strings can be validated before they are written into HTML.

use std::{fmt, str::FromStr};

use color::DynamicColor;

/// A validated CSS color.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Color {
    /// Create a new `Color` from a CSS color string such as `"#ff0000"`,
    /// `"rgb(255, 0, 0)"` or `"red"`.
    ///
    /// # Errors
    ///
    /// Returns a message naming the offending string if it is not a valid
    /// CSS color.
    ///
    /// # Examples
    ///
    /// ```
    /// use tessera_core::color::Color;
    ///
    /// assert!(Color::new("#2563eb").is_ok());
    /// assert!(Color::new("navy").is_ok());
    /// assert!(Color::new("not-a-color").is_err());
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str.trim()) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_new() {
        assert!(Color::new("#ff0000").is_ok());
        assert!(Color::new(" blue ").is_ok());
        assert!(Color::new("not-a-color").is_err());
        assert!(Color::new("").is_err());
    }

    #[test]
    fn test_color_from_str() {
        let color: Color = "white".parse().expect("valid color");
        assert!(!color.to_string().is_empty());
    }

    #[test]
    fn test_invalid_color_message_names_input() {
        let err = Color::new("blurple").unwrap_err();
        assert!(err.contains("blurple"));
    }
}
