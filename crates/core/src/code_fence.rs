//! Fenced code block tracking for the link scanner.
//!
//! Embeds written inside a fenced code block are source text, not images.
//! When scanning is configured to skip them, the scanner feeds every line to
//! a [`FenceTracker`] and ignores lines it reports as fenced.

/// Opening fence currently in effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OpenFence {
    /// Fence marker character (`` ` `` or `~`).
    marker: char,
    /// Length of the opening run; a closer must be at least this long.
    length: usize,
}

/// Line-by-line fenced code block state (CommonMark fence rules).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FenceTracker {
    open: Option<OpenFence>,
}

impl FenceTracker {
    /// Create a tracker positioned outside any fence.
    pub fn new() -> Self {
        Self::default()
    }

    /// True while inside an unclosed fence.
    pub fn is_inside(&self) -> bool {
        self.open.is_some()
    }

    /// Feed the next line; returns true when the line is part of a fence
    /// (opener, content or closer).
    pub fn observe(&mut self, line: &str) -> bool {
        let line = line.trim_end_matches(['\n', '\r']);
        let (columns, bytes) = leading_indent(line);
        let after_indent = &line[bytes..];

        match self.open {
            None => {
                // 4+ columns is an indented code block, not a fence opener.
                if columns <= 3
                    && let Some((marker, length)) = fence_run(after_indent)
                {
                    self.open = Some(OpenFence { marker, length });
                    return true;
                }
                false
            }
            Some(open) => {
                if columns <= 3
                    && is_bare_fence(after_indent)
                    && let Some((marker, length)) = fence_run(after_indent)
                    && marker == open.marker
                    && length >= open.length
                {
                    self.open = None;
                }
                true
            }
        }
    }
}

/// Returns (visual columns, byte length) of leading whitespace. Tabs advance
/// to the next multiple of 4.
fn leading_indent(line: &str) -> (usize, usize) {
    let mut columns = 0;
    let mut bytes = 0;
    for b in line.bytes() {
        match b {
            b' ' => columns += 1,
            b'\t' => columns += 4 - (columns % 4),
            _ => break,
        }
        bytes += 1;
    }
    (columns, bytes)
}

/// Marker and run length when the text starts with 3+ backticks or tildes.
fn fence_run(text: &str) -> Option<(char, usize)> {
    let marker = text.chars().next().filter(|c| *c == '`' || *c == '~')?;
    let length = text.chars().take_while(|c| *c == marker).count();
    (length >= 3).then_some((marker, length))
}

/// A closing fence carries no info string: only markers and trailing whitespace.
fn is_bare_fence(text: &str) -> bool {
    let Some(marker) = text.chars().next() else {
        return false;
    };
    text.trim_start_matches(marker).trim().is_empty()
}
