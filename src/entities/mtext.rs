//! Multi-line text entity

use super::{Entity, EntityCommon};
use crate::types::{BoundingBox2D, Vector2};
use serde::Serialize;

/// A multi-line text entity
///
/// `value` keeps the raw content including inline formatting codes;
/// [`MText::plain_text`] gives the readable text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MText {
    /// Common entity data
    #[serde(skip)]
    pub common: EntityCommon,
    /// Insertion point
    pub insertion_point: Vector2,
    /// Raw text content
    pub value: String,
}

impl MText {
    /// Create a new empty multi-line text at the origin
    pub fn new() -> Self {
        MText {
            common: EntityCommon::new(),
            insertion_point: Vector2::ZERO,
            value: String::new(),
        }
    }

    /// Create a multi-line text with content at a position
    pub fn with_value(value: impl Into<String>, position: Vector2) -> Self {
        MText {
            value: value.into(),
            insertion_point: position,
            ..Self::new()
        }
    }

    /// Readable content: grouping braces and inline format codes removed,
    /// paragraph breaks turned into spaces
    ///
    /// Codes with an argument (`\f`, `\H`, `\C`, `\A`, ...) run to the next
    /// `;`. A stacked fraction `\Sa^b;` keeps its parts joined by `/`.
    pub fn plain_text(&self) -> String {
        let mut out = String::with_capacity(self.value.len());
        let mut chars = self.value.chars();

        while let Some(c) = chars.next() {
            match c {
                '{' | '}' => {}
                '\\' => match chars.next() {
                    Some('P') | Some('X') | Some('~') => out.push(' '),
                    Some(escaped @ ('\\' | '{' | '}')) => out.push(escaped),
                    Some('S') => {
                        for s in chars.by_ref().take_while(|&s| s != ';') {
                            out.push(if matches!(s, '^' | '#') { '/' } else { s });
                        }
                    }
                    Some(
                        'f' | 'F' | 'H' | 'C' | 'c' | 'A' | 'Q' | 'W' | 'T' | 'p',
                    ) => {
                        chars.by_ref().take_while(|&s| s != ';').for_each(drop);
                    }
                    // on/off toggles: underline, overline, strike-through
                    Some('L' | 'l' | 'O' | 'o' | 'K' | 'k') => {}
                    Some(other) => {
                        out.push('\\');
                        out.push(other);
                    }
                    None => out.push('\\'),
                },
                other => out.push(other),
            }
        }
        out.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

impl Default for MText {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for MText {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn entity_type(&self) -> &str {
        "MTEXT"
    }

    fn bounding_box(&self) -> Option<BoundingBox2D> {
        Some(BoundingBox2D::new(self.insertion_point, self.insertion_point))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text() {
        let mtext = MText::with_value("{MASTER\\PBEDROOM}", Vector2::ZERO);
        assert_eq!(mtext.plain_text(), "MASTER BEDROOM");
        assert_eq!(mtext.entity_type(), "MTEXT");
    }

    #[test]
    fn test_plain_text_strips_format_codes() {
        let plain = |raw: &str| MText::with_value(raw, Vector2::ZERO).plain_text();
        assert_eq!(plain("{\\fArial|b0|i0;Living}"), "Living");
        assert_eq!(plain("\\H2.5x;\\C1;{\\LStore}\\l room"), "Store room");
        assert_eq!(plain("\\A1;Bath \\S1^2;"), "Bath 1/2");
        assert_eq!(plain("50\\\\50 \\{A\\}"), "50\\50 {A}");
        assert_eq!(plain("\\pxqc;  WC  "), "WC");
    }
}
