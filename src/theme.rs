//! Theme loading: btop-style `theme[key]="value"` and hex → ratatui Color.

use ratatui::style::Color;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Colours for the board and UI chrome loaded from a theme file.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Border of an unselected cell.
    pub cell_border: Color,
    /// Background of an unselected cell.
    pub cell_bg: Color,
    /// Border of a cell in the current chain.
    pub selected_border: Color,
    /// Background of a cell in the current chain.
    pub selected_bg: Color,
    /// Screen background.
    pub bg: Color,
    /// Text (cell values, score, labels).
    pub main_fg: Color,
    /// Titles and the game-over banner.
    pub title: Color,
    /// Timer colour when the round is almost over.
    pub warn: Color,
}

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid hex: {0}")]
    InvalidHex(String),
}

impl Default for Theme {
    fn default() -> Self {
        Self::builtin_default()
    }
}

impl Theme {
    /// Hardcoded defaults: dark board, red idle cells, green selection.
    pub fn builtin_default() -> Self {
        Self {
            cell_border: parse_hex("#B50000").unwrap(),
            cell_bg: parse_hex("#542929").unwrap(),
            selected_border: parse_hex("#00B500").unwrap(),
            selected_bg: parse_hex("#295429").unwrap(),
            bg: parse_hex("#303030").unwrap(),
            main_fg: parse_hex("#FFFFFF").unwrap(),
            title: parse_hex("#7BDE18").unwrap(),
            warn: parse_hex("#FF0000").unwrap(),
        }
    }

    /// Load theme from a btop-style file: `theme[key]="value"` or
    /// `theme[key]='value'`. Falls back to the built-in defaults if path is
    /// None or the file is missing/invalid. `palette` selects the colour
    /// variant: Normal (theme), HighContrast, or Colorblind.
    pub fn load(path: Option<&Path>, palette: crate::Palette) -> Result<Self, ThemeError> {
        let path = match path {
            Some(p) if p.exists() => p,
            _ => return Ok(Self::default_for_palette(palette)),
        };
        let s = std::fs::read_to_string(path)?;
        let map = parse_theme_file(&s);
        let mut theme = Self::from_map(&map);
        theme.apply_palette(palette);
        Ok(theme)
    }

    /// Default theme for a palette when no file is loaded.
    fn default_for_palette(palette: crate::Palette) -> Self {
        let mut t = Self::builtin_default();
        t.apply_palette(palette);
        t
    }

    /// Override board colours for high-contrast or colorblind variants.
    pub fn apply_palette(&mut self, palette: crate::Palette) {
        match palette {
            crate::Palette::Normal => {}
            crate::Palette::HighContrast => {
                self.cell_border = parse_hex("#FF0000").unwrap();
                self.cell_bg = parse_hex("#000000").unwrap();
                self.selected_border = parse_hex("#00FF00").unwrap();
                self.selected_bg = parse_hex("#003300").unwrap();
                self.main_fg = parse_hex("#FFFFFF").unwrap();
            }
            crate::Palette::Colorblind => {
                // Avoid the red/green pair: idle blue, selection orange.
                self.cell_border = parse_hex("#0077BB").unwrap();
                self.cell_bg = parse_hex("#1B2A3A").unwrap();
                self.selected_border = parse_hex("#EE7733").unwrap();
                self.selected_bg = parse_hex("#4A2E17").unwrap();
            }
        }
    }

    fn from_map(map: &HashMap<String, String>) -> Self {
        let get = |key: &str| {
            map.get(key)
                .and_then(|v| parse_hex(v.trim_matches('"').trim_matches('\'').trim()).ok())
        };
        // Our own keys first; btop keys as fallbacks so btop themes load too.
        Self {
            cell_border: get("cell_border")
                .or_else(|| get("cpu_end"))
                .unwrap_or_else(|| parse_hex("#B50000").unwrap()),
            cell_bg: get("cell_bg")
                .or_else(|| get("meter_bg"))
                .unwrap_or_else(|| parse_hex("#542929").unwrap()),
            selected_border: get("selected_border")
                .or_else(|| get("mem_box"))
                .unwrap_or_else(|| parse_hex("#00B500").unwrap()),
            selected_bg: get("selected_bg")
                .or_else(|| get("div_line"))
                .unwrap_or_else(|| parse_hex("#295429").unwrap()),
            bg: get("bg")
                .or_else(|| get("main_bg"))
                .unwrap_or_else(|| parse_hex("#303030").unwrap()),
            main_fg: get("main_fg").unwrap_or_else(|| parse_hex("#FFFFFF").unwrap()),
            title: get("title").unwrap_or_else(|| parse_hex("#7BDE18").unwrap()),
            warn: get("warn")
                .or_else(|| get("temp_end"))
                .unwrap_or_else(|| parse_hex("#FF0000").unwrap()),
        }
    }
}

/// Parse btop-style theme file into key -> value map.
fn parse_theme_file(s: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for line in s.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some(stripped) = line.strip_prefix("theme[") {
            if let Some(end) = stripped.find(']') {
                let key = stripped[..end].trim();
                let rest = stripped[end + 1..].trim();
                if let Some(eq) = rest.find('=') {
                    let value = rest[eq + 1..]
                        .trim()
                        .trim_matches('"')
                        .trim_matches('\'')
                        .to_string();
                    if !value.is_empty() {
                        map.insert(key.to_string(), value);
                    }
                }
            }
        }
    }
    map
}

/// Parse hex colour "#RRGGBB" or "#RGB" into ratatui Color.
pub fn parse_hex(s: &str) -> Result<Color, ThemeError> {
    let s = s.trim().trim_start_matches('#');
    let (r, g, b) = if s.len() == 6 {
        let r =
            u8::from_str_radix(&s[0..2], 16).map_err(|_| ThemeError::InvalidHex(s.to_string()))?;
        let g =
            u8::from_str_radix(&s[2..4], 16).map_err(|_| ThemeError::InvalidHex(s.to_string()))?;
        let b =
            u8::from_str_radix(&s[4..6], 16).map_err(|_| ThemeError::InvalidHex(s.to_string()))?;
        (r, g, b)
    } else if s.len() == 3 {
        let r = u8::from_str_radix(&s[0..1], 16)
            .map_err(|_| ThemeError::InvalidHex(s.to_string()))?
            * 17;
        let g = u8::from_str_radix(&s[1..2], 16)
            .map_err(|_| ThemeError::InvalidHex(s.to_string()))?
            * 17;
        let b = u8::from_str_radix(&s[2..3], 16)
            .map_err(|_| ThemeError::InvalidHex(s.to_string()))?
            * 17;
        (r, g, b)
    } else {
        return Err(ThemeError::InvalidHex(s.to_string()));
    };
    Ok(Color::Rgb(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_6() {
        let c = parse_hex("#B50000").unwrap();
        assert!(matches!(c, Color::Rgb(0xB5, 0x00, 0x00)));
    }

    #[test]
    fn test_parse_hex_3() {
        let c = parse_hex("#FFF").unwrap();
        assert!(matches!(c, Color::Rgb(255, 255, 255)));
    }

    #[test]
    fn test_parse_theme_line() {
        let map = parse_theme_file(r##"theme[cell_bg]="#542929""##);
        assert_eq!(map.get("cell_bg"), Some(&"#542929".to_string()));
    }

    #[test]
    fn custom_keys_override_defaults() {
        let map = parse_theme_file(r##"theme[selected_border]="#112233""##);
        let theme = Theme::from_map(&map);
        assert!(matches!(theme.selected_border, Color::Rgb(0x11, 0x22, 0x33)));
        // Untouched keys keep their defaults.
        assert!(matches!(theme.cell_border, Color::Rgb(0xB5, 0x00, 0x00)));
    }
}
