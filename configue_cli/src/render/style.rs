//! Colour palette for rendered trees.

use owo_colors::{OwoColorize, Style};

use crate::ConfigValue;

/// Applies the palette, or nothing when colour is disabled.
#[derive(Clone, Copy, Debug)]
pub(super) struct Painter {
    colour: bool,
}

impl Painter {
    pub(super) const fn new(colour: bool) -> Self {
        Self { colour }
    }

    pub(super) fn paint(self, text: &str, style: Style) -> String {
        if self.colour {
            text.style(style).to_string()
        } else {
            text.to_owned()
        }
    }

    pub(super) fn key(self, text: &str) -> String {
        self.paint(text, Style::new().bold())
    }

    pub(super) fn constructor(self, text: &str) -> String {
        self.paint(text, Style::new().blue().bold())
    }

    pub(super) fn missing(self, text: &str) -> String {
        self.paint(text, Style::new().red().italic())
    }

    pub(super) fn border(self, text: &str) -> String {
        self.paint(text, Style::new().dimmed())
    }

    pub(super) fn value(self, value: &ConfigValue, text: &str) -> String {
        let style = match value {
            ConfigValue::Null | ConfigValue::Bool(_) => Style::new().cyan(),
            ConfigValue::Integer(_) | ConfigValue::Unsigned(_) | ConfigValue::Float(_) => Style::new().magenta(),
            ConfigValue::String(_) => Style::new().yellow(),
            _ => Style::new().green(),
        };
        self.paint(text, style)
    }
}
