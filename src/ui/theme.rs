use ratatui::style::{Color, Modifier, Style};

use crate::config::ThemeConfig;

/// Colors resolved from the `[theme]` config section
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub palette: Vec<Color>,
    pub status_bar: Style,
    pub help_key: Style,
    pub help_desc: Style,
}

impl Theme {
    pub fn from_config(config: &ThemeConfig) -> Self {
        let base = Style::default().fg(config.status_fg).bg(config.status_bg);
        Self {
            background: config.background,
            palette: config.palette.clone(),
            status_bar: base,
            help_key: base.add_modifier(Modifier::BOLD),
            help_desc: base.add_modifier(Modifier::DIM),
        }
    }

    /// Status-bar style tinted with the node's palette color
    pub fn node_style(&self, index: usize) -> Style {
        match self.palette.get(index) {
            Some(&color) => self.status_bar.fg(color).add_modifier(Modifier::BOLD),
            None => self.status_bar,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_style_uses_palette() {
        let theme = Theme::from_config(&ThemeConfig::default());
        assert_eq!(theme.node_style(0).fg, Some(Color::Rgb(0xF4, 0x43, 0x36)));
        assert_eq!(theme.node_style(0).bg, theme.status_bar.bg);
        assert_eq!(theme.node_style(99), theme.status_bar);
    }
}
