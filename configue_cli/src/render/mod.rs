//! Tree view of configuration models.
//!
//! Every top-level key becomes its own tree. Mappings and sequences are
//! branches, scalars are `key: value` leaves coloured by kind, and missing
//! leaves either abort rendering (strict mode) or show as `Missing`.
//!
//! ```
//! use configue_cli::ConfigModel;
//! use configue_cli::render::{RenderOptions, render_to_string};
//!
//! let config = ConfigModel::from_dotlist(["server.port=8080", "server.hosts=[a, b]"])?;
//! let text = render_to_string(&config, &RenderOptions::new("Configuration").pretty(false).colour(false))?;
//! assert_eq!(
//!     text,
//!     "server\n├── port: 8080\n└── hosts\n    ├── 'a'\n    └── 'b'\n"
//! );
//! # Ok::<_, std::sync::Arc<configue_cli::ConfigueError>>(())
//! ```

mod style;
mod tree;

use std::io::Write;

use unicode_width::UnicodeWidthStr;

use crate::{ConfigModel, ConfigueResult, ConfigueResultExt};

use style::Painter;
use tree::{Line, TreeBuilder, layout};

/// Presentation settings for [`render`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    /// Panel title used in pretty mode.
    pub title: String,
    /// Fail on the first missing leaf instead of displaying it.
    pub strict: bool,
    /// Wrap the trees in a titled panel.
    pub pretty: bool,
    /// Number of levels to display; `None` shows everything.
    pub depth: Option<usize>,
    /// Emit ANSI colour codes.
    pub colour: bool,
}

impl RenderOptions {
    /// Strict, pretty, coloured output with no depth limit.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            strict: true,
            pretty: true,
            depth: None,
            colour: true,
        }
    }

    /// Set [`RenderOptions::strict`].
    #[must_use]
    pub const fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Set [`RenderOptions::pretty`].
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Set [`RenderOptions::depth`].
    #[must_use]
    pub const fn depth(mut self, depth: Option<usize>) -> Self {
        self.depth = depth;
        self
    }

    /// Set [`RenderOptions::colour`].
    #[must_use]
    pub const fn colour(mut self, colour: bool) -> Self {
        self.colour = colour;
        self
    }
}

/// Render `model` into `out`.
///
/// Nothing is written when strict mode finds a missing leaf.
///
/// # Errors
///
/// [`crate::ConfigueError::MissingMandatoryValue`] in strict mode, naming the
/// dotted path of the first missing leaf within the displayed depth, or
/// [`crate::ConfigueError::Io`] when writing fails.
pub fn render(model: &ConfigModel, options: &RenderOptions, out: &mut dyn Write) -> ConfigueResult<()> {
    let text = render_to_string(model, options)?;
    out.write_all(text.as_bytes()).into_configue()?;
    out.flush().into_configue()
}

/// Render `model` into a string; see [`render`].
///
/// # Errors
///
/// [`crate::ConfigueError::MissingMandatoryValue`] in strict mode.
pub fn render_to_string(model: &ConfigModel, options: &RenderOptions) -> ConfigueResult<String> {
    let painter = Painter::new(options.colour);
    let roots = TreeBuilder::new(painter, options.strict).build(model, options.depth)?;
    let trees: Vec<Vec<Line>> = roots.iter().map(layout).collect();
    Ok(if options.pretty {
        panel(&options.title, &trees, painter)
    } else {
        plain(&trees)
    })
}

fn plain(trees: &[Vec<Line>]) -> String {
    let mut text = String::new();
    for line in trees.iter().flatten() {
        text.push_str(&line.styled);
        text.push('\n');
    }
    text
}

const PAD: usize = 2;

fn panel(title: &str, trees: &[Vec<Line>], painter: Painter) -> String {
    let title_width = title.width();
    let content = trees
        .iter()
        .flatten()
        .map(Line::width)
        .max()
        .unwrap_or(0)
        .max(title_width + 2);
    let inner = content + 2 * PAD;
    let fill = inner.saturating_sub(title_width + 3);

    let mut text = String::new();
    text.push('\n');
    text.push_str(&painter.border("╭─ "));
    text.push_str(title);
    text.push_str(&painter.border(&format!(" {}╮", "─".repeat(fill))));
    text.push('\n');

    let blank = Line {
        plain: String::new(),
        styled: String::new(),
    };
    push_row(&mut text, &blank, content, painter);
    for tree in trees {
        for line in tree {
            push_row(&mut text, line, content, painter);
        }
        push_row(&mut text, &blank, content, painter);
    }

    text.push_str(&painter.border(&format!("╰{}╯", "─".repeat(inner))));
    text.push('\n');
    text
}

fn push_row(text: &mut String, line: &Line, content: usize, painter: Painter) {
    let padding = " ".repeat(content.saturating_sub(line.width()) + PAD);
    text.push_str(&painter.border("│"));
    text.push_str(&" ".repeat(PAD));
    text.push_str(&line.styled);
    text.push_str(&padding);
    text.push_str(&painter.border("│"));
    text.push('\n');
}
