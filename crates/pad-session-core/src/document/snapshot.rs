use crate::encoding::{LineEnding, TextEncoding};

/// Immutable document content plus the encoding and line ending it was loaded or saved with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSnapshot {
    content: String,
    encoding: TextEncoding,
    line_ending: LineEnding,
}

impl TextSnapshot {
    pub fn new(content: impl Into<String>, encoding: TextEncoding, line_ending: LineEnding) -> Self {
        Self {
            content: content.into(),
            encoding,
            line_ending,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }
}

impl Default for TextSnapshot {
    fn default() -> Self {
        Self::new(String::new(), TextEncoding::default(), LineEnding::default())
    }
}
