//! Day and night theme for the comicView apps
//!
//! One shared struct carries the mode so every screen reads the same
//! flag; toggling re-applies the egui style.

use egui::{Color32, Rounding, Stroke, Style, Visuals};

/// Session-wide display mode, shared by the shelf and the reader.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ComicTheme {
    pub dark: bool,
}

impl ComicTheme {
    pub const LIGHT_PANEL: Color32 = Color32::from_rgb(242, 242, 242);
    pub const LIGHT_PAGE: Color32 = Color32::from_rgb(255, 255, 255);
    pub const LIGHT_TEXT: Color32 = Color32::from_rgb(20, 20, 20);
    pub const DARK_PANEL: Color32 = Color32::from_rgb(26, 26, 26);
    pub const DARK_PAGE: Color32 = Color32::from_rgb(26, 26, 26);
    pub const DARK_TEXT: Color32 = Color32::from_rgb(235, 235, 235);

    pub fn toggle(&mut self) {
        self.dark = !self.dark;
    }

    /// Label for the mode toggle button, naming the mode it switches to.
    pub fn toggle_label(&self) -> &'static str {
        if self.dark {
            "day mode"
        } else {
            "night mode"
        }
    }

    /// Fill behind panels, menus and the shelf.
    pub fn panel_color(&self) -> Color32 {
        if self.dark {
            Self::DARK_PANEL
        } else {
            Self::LIGHT_PANEL
        }
    }

    /// Fill behind the comic page itself.
    pub fn page_color(&self) -> Color32 {
        if self.dark {
            Self::DARK_PAGE
        } else {
            Self::LIGHT_PAGE
        }
    }

    pub fn text_color(&self) -> Color32 {
        if self.dark {
            Self::DARK_TEXT
        } else {
            Self::LIGHT_TEXT
        }
    }

    /// Apply the theme to an egui context
    pub fn apply(&self, ctx: &egui::Context) {
        let mut style = Style::default();

        let mut visuals = if self.dark {
            Visuals::dark()
        } else {
            Visuals::light()
        };

        visuals.window_fill = self.panel_color();
        visuals.panel_fill = self.panel_color();
        visuals.extreme_bg_color = self.page_color();
        visuals.window_rounding = Rounding::same(4.0);
        visuals.menu_rounding = Rounding::same(4.0);
        visuals.window_stroke = Stroke::new(1.0, self.text_color().gamma_multiply(0.4));
        visuals.override_text_color = Some(self.text_color());

        style.visuals = visuals;

        style.spacing.window_margin = egui::Margin::same(8.0);
        style.spacing.item_spacing = egui::vec2(6.0, 6.0);
        style.spacing.button_padding = egui::vec2(8.0, 4.0);

        ctx.set_style(style);
    }
}

/// Menu bar framing helper
pub fn menu_bar(ui: &mut egui::Ui, add_contents: impl FnOnce(&mut egui::Ui)) {
    let fill = ui.visuals().panel_fill;
    egui::Frame::none()
        .fill(fill)
        .inner_margin(egui::Margin::symmetric(4.0, 2.0))
        .show(ui, |ui| {
            ui.horizontal(add_contents);
        });
}

/// Consume key events egui would otherwise act on itself.
/// - Tab: prevents menu focus navigation
/// - Cmd+/Cmd-: prevents egui's built-in zoom scaling
pub fn consume_special_keys(ctx: &egui::Context) {
    ctx.input_mut(|i| {
        i.events.retain(|e| match e {
            egui::Event::Key { key: egui::Key::Tab, .. } => false,
            egui::Event::Text(text) if text.contains('\t') => false,
            egui::Event::Key { key, modifiers, .. }
                if modifiers.command && matches!(key, egui::Key::Plus | egui::Key::Minus | egui::Key::Equals) => false,
            _ => true,
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_flips_mode_and_label() {
        let mut theme = ComicTheme::default();
        assert!(!theme.dark);
        assert_eq!(theme.toggle_label(), "night mode");

        theme.toggle();
        assert!(theme.dark);
        assert_eq!(theme.toggle_label(), "day mode");

        theme.toggle();
        assert!(!theme.dark);
    }

    #[test]
    fn test_palette_follows_mode() {
        let light = ComicTheme { dark: false };
        let dark = ComicTheme { dark: true };
        assert_eq!(light.page_color(), ComicTheme::LIGHT_PAGE);
        assert_eq!(dark.page_color(), ComicTheme::DARK_PAGE);
        assert_ne!(light.text_color(), dark.text_color());
    }
}
