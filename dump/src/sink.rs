//! Indentation-aware text accumulation for dump output.

const SPACES_PER_INDENT: usize = 2;

/// Accumulates dump text, one output unit per visited node or field.
///
/// Tracks the current nesting depth and writes each unit on its own line, indented
/// two columns per aggregate level. The very first unit is written without a
/// leading newline so the finished dump has neither a leading nor a trailing line
/// terminator.
///
/// A sink belongs to exactly one in-flight dump; concurrent dumps must construct
/// independent sinks.
pub struct TextSink {
    out: String,
    indent: usize,
    is_first: bool,
}

impl TextSink {
    /// Creates an empty sink at depth zero.
    pub fn new() -> Self {
        Self {
            out: String::new(),
            indent: 0,
            is_first: true,
        }
    }

    /// Writes one output unit, prefixed by `label` when present.
    pub fn output(&mut self, label: Option<&str>, text: &str) {
        self.emit_newline_and_indent();
        if let Some(label) = label {
            self.out.push_str(label);
        }
        self.out.push_str(text);
    }

    /// Writes an aggregate header (`header` followed by `" ["`) and increases the
    /// nesting depth.
    pub fn open_aggregate(&mut self, label: Option<&str>, header: &str) {
        self.emit_newline_and_indent();
        if let Some(label) = label {
            self.out.push_str(label);
        }
        self.out.push_str(header);
        self.out.push_str(" [");
        self.indent += SPACES_PER_INDENT;
    }

    /// Decreases the nesting depth and writes the closing `"]"` on its own line.
    pub fn close_aggregate(&mut self) {
        self.indent -= SPACES_PER_INDENT;
        // An aggregate is never the very first token without a prior open, so this
        // bypasses the first-output suppression.
        self.out.push('\n');
        self.out.extend(std::iter::repeat(' ').take(self.indent));
        self.out.push(']');
    }

    /// Returns the accumulated text, without a trailing line terminator.
    pub fn into_string(self) -> String {
        self.out
    }

    fn emit_newline_and_indent(&mut self) {
        if self.is_first {
            // Suppresses the leading newline of the whole dump.
            self.is_first = false;
            return;
        }
        self.out.push('\n');
        self.out.extend(std::iter::repeat(' ').take(self.indent));
    }
}

impl Default for TextSink {
    fn default() -> Self {
        Self::new()
    }
}
