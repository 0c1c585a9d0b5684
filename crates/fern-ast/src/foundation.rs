//! Source locations shared by every AST node and diagnostic.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// A point in a source file.
///
/// Carried on the root of every AST node and on every diagnostic. Taken
/// from the first token consumed by the production that built the node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// Source file name, shared between all locations of one parse
    pub file: Arc<str>,
    /// 1-based line number
    pub line: u32,
    /// 1-based column number (in characters)
    pub column: u32,
    /// 0-based byte offset
    pub offset: u32,
}

impl Location {
    /// Create a location.
    pub fn new(file: Arc<str>, line: u32, column: u32, offset: u32) -> Self {
        Self {
            file,
            line,
            column,
            offset,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// Trait for AST nodes that carry a source location.
pub trait Located {
    /// Location of the node's first token.
    fn location(&self) -> &Location;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(line: u32, column: u32) -> Location {
        Location::new(Arc::from("main.fern"), line, column, 0)
    }

    #[test]
    fn test_display() {
        assert_eq!(loc(3, 14).to_string(), "main.fern:3:14");
    }

    #[test]
    fn test_serde_roundtrip() {
        let json = serde_json::to_string(&loc(7, 2)).unwrap();
        assert_eq!(
            json,
            r#"{"file":"main.fern","line":7,"column":2,"offset":0}"#
        );
        let restored: Location = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, loc(7, 2));
    }
}
