//! Text blocks for the match report.
//!
//! Each match is printed as a right-justified headword, a separator and the
//! translation list. Long translation lists wrap onto continuation lines that
//! are indented so they line up under the first translation:
//!
//! ```text
//!                       cat : gato, minino, ...
//!                             felino
//! ```

use crate::core::types::Entry;
use crossterm::style::{style, Stylize};

/// How `make_block` breaks text into lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wrap {
    /// Split every `width` characters, even mid-word.
    Chars,
    /// Pack whitespace-separated words greedily. Newlines are treated as
    /// ordinary whitespace.
    Words,
    /// Like `Words`, but existing newlines are kept as line breaks.
    Lines,
}

/// Breaks `text` into lines no longer than `width` characters.
///
/// With `Wrap::Words` a single word longer than `width` is kept whole on its
/// own line. A zero width is treated as one.
pub fn make_block(text: &str, width: usize, wrap: Wrap) -> Vec<String> {
    let width = width.max(1);
    match wrap {
        Wrap::Chars => {
            let chars: Vec<char> = text.chars().collect();
            chars.chunks(width).map(|c| c.iter().collect::<String>()).collect()
        }
        Wrap::Lines => text
            .split('\n')
            .flat_map(|line| make_block(line, width, Wrap::Words))
            .collect(),
        Wrap::Words => {
            let mut lines = Vec::new();
            let mut current = String::new();
            let mut current_len = 0;
            for word in text.split_whitespace() {
                let word_len = word.chars().count();
                if current.is_empty() {
                    current.push_str(word);
                    current_len = word_len;
                } else if current_len + 1 + word_len > width {
                    lines.push(std::mem::take(&mut current));
                    current.push_str(word);
                    current_len = word_len;
                } else {
                    current.push(' ');
                    current.push_str(word);
                    current_len += 1 + word_len;
                }
            }
            if !current.is_empty() {
                lines.push(current);
            }
            lines
        }
    }
}

/// Options for `format_block`.
#[derive(Debug, Clone, Copy)]
pub struct Block<'a> {
    pub width: usize,
    pub wrap: Wrap,
    /// Written before each line.
    pub prepend: Option<&'a str>,
    /// Leave the first line without `prepend`; the caller has already
    /// positioned the cursor.
    pub skip_first: bool,
}

impl Default for Block<'_> {
    fn default() -> Self {
        Self {
            width: 60,
            wrap: Wrap::Chars,
            prepend: None,
            skip_first: false,
        }
    }
}

/// Wraps `text` and joins the lines with newlines.
pub fn format_block(text: &str, block: &Block<'_>) -> String {
    let lines = make_block(text, block.width, block.wrap);
    let Some(prepend) = block.prepend else {
        return lines.join("\n");
    };
    let joined = lines.join(&format!("\n{prepend}"));
    if block.skip_first {
        joined
    } else {
        format!("{prepend}{joined}")
    }
}

/// Column layout for one match line.
#[derive(Debug, Clone)]
pub struct Layout {
    pub headword_width: usize,
    pub line_width: usize,
    pub separator: String,
    /// Render the headword in bold. Only meaningful on a terminal.
    pub styled: bool,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            headword_width: 25,
            line_width: 80,
            separator: " : ".to_string(),
            styled: false,
        }
    }
}

impl Layout {
    /// Indent placed before continuation lines.
    pub fn indent(&self) -> String {
        " ".repeat(self.headword_width + self.separator.chars().count())
    }

    /// Width left for the translation column.
    pub fn translation_width(&self) -> usize {
        self.line_width
            .saturating_sub(self.headword_width + self.separator.chars().count())
    }

    /// Renders `headword : translations`, wrapping translations under the
    /// translation column.
    pub fn render(&self, headword: &str, entry: &Entry) -> String {
        let indent = self.indent();
        let translations = format_block(
            &entry.joined(", "),
            &Block {
                width: self.translation_width(),
                wrap: Wrap::Words,
                prepend: Some(&indent),
                skip_first: true,
            },
        );
        let padded = format!("{headword:>width$}", width = self.headword_width);
        if self.styled {
            format!("{}{}{}", style(padded).bold(), self.separator, translations)
        } else {
            format!("{}{}{}", padded, self.separator, translations)
        }
    }
}
