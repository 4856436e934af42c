//! Color palette for the terminal UI.

use ratatui::style::Color;

/// Application theme palette used by rendering code.
///
/// Names follow the Catppuccin convention: background layers from `crust`
/// (darkest) to `base`, then overlay and text shades, then accents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    /// Primary background color for the canvas.
    pub base: Color,
    /// Darkest background shade, used for text on highlighted rows.
    pub crust: Color,
    /// Border color for panels.
    pub surface2: Color,
    /// Muted text for titles and hints.
    pub overlay1: Color,
    /// Primary foreground text color.
    pub text: Color,
    /// Secondary text for codes and dates.
    pub subtext0: Color,
    /// Accent for interactive elements and key hints.
    pub sapphire: Color,
    /// Accent for category chips.
    pub mauve: Color,
    /// Success color; also the `[NEW]` badge.
    pub green: Color,
    /// Attention color for the refreshing indicator.
    pub yellow: Color,
    /// Error color.
    pub red: Color,
    /// Selection highlight.
    pub lavender: Color,
}

/// Catppuccin Mocha.
const MOCHA: Theme = Theme {
    base: Color::Rgb(30, 30, 46),        // #1e1e2e
    crust: Color::Rgb(17, 17, 27),       // #11111b
    surface2: Color::Rgb(88, 91, 112),   // #585b70
    overlay1: Color::Rgb(127, 132, 156), // #7f849c
    text: Color::Rgb(205, 214, 244),     // #cdd6f4
    subtext0: Color::Rgb(166, 173, 200), // #a6adc8
    sapphire: Color::Rgb(116, 199, 236), // #74c7ec
    mauve: Color::Rgb(203, 166, 247),    // #cba6f7
    green: Color::Rgb(166, 227, 161),    // #a6e3a1
    yellow: Color::Rgb(249, 226, 175),   // #f9e2af
    red: Color::Rgb(243, 139, 168),      // #f38ba8
    lavender: Color::Rgb(180, 190, 254), // #b4befe
};

/// Plain palette for terminals without color (`NO_COLOR` set).
const MONO: Theme = Theme {
    base: Color::Reset,
    crust: Color::Black,
    surface2: Color::Reset,
    overlay1: Color::Reset,
    text: Color::Reset,
    subtext0: Color::Reset,
    sapphire: Color::Reset,
    mauve: Color::Reset,
    green: Color::Reset,
    yellow: Color::Reset,
    red: Color::Reset,
    lavender: Color::White,
};

/// What: Active palette.
///
/// Output:
/// - `MONO` when the `NO_COLOR` environment variable is set and non-empty, else Mocha
#[must_use]
pub fn theme() -> Theme {
    match std::env::var("NO_COLOR") {
        Ok(v) if !v.is_empty() => MONO,
        _ => MOCHA,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: The default palette uses the Mocha base color.
    ///
    /// Inputs:
    /// - `MOCHA` constant.
    ///
    /// Output:
    /// - `base` is `#1e1e2e`.
    fn mocha_base_color() {
        assert_eq!(MOCHA.base, Color::Rgb(30, 30, 46));
        assert_ne!(MONO, MOCHA);
    }
}
