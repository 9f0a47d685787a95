//! Zero-copy line and token scanning over a raw OBJ byte buffer.
//!
//! Everything here borrows from the caller's buffer; no bytes are copied.
//! Working on bytes rather than `str` means the mapped file never needs an
//! up-front UTF-8 validation pass — individual tokens are converted only
//! when a directive actually consumes them.

/// Iterator over the non-empty lines of a buffer.
///
/// Lines split on `\n` and `\r`; runs of consecutive terminators collapse,
/// so an empty line is never yielded. Each item is `(line_number, bytes)`
/// where the number is 1-based and counts `\n` bytes, for diagnostics.
pub struct Lines<'a> {
    buf: &'a [u8],
    pos: usize,
    line: usize,
}

/// Scans `buf` into lines. Single pass; restart by calling again.
pub fn lines(buf: &[u8]) -> Lines<'_> {
    Lines { buf, pos: 0, line: 1 }
}

impl<'a> Iterator for Lines<'a> {
    type Item = (usize, &'a [u8]);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&b) = self.buf.get(self.pos) {
            if b == b'\n' {
                self.line += 1;
            } else if b != b'\r' {
                break;
            }
            self.pos += 1;
        }
        if self.pos >= self.buf.len() {
            return None;
        }
        let start = self.pos;
        let number = self.line;
        while self
            .buf
            .get(self.pos)
            .is_some_and(|&b| b != b'\n' && b != b'\r')
        {
            self.pos += 1;
        }
        Some((number, &self.buf[start..self.pos]))
    }
}

/// Splits a line into whitespace-delimited tokens, discarding empties.
pub fn tokenize(line: &[u8]) -> impl Iterator<Item = &[u8]> {
    line.split(|&b| b == b' ' || b == b'\t')
        .filter(|t| !t.is_empty())
}

/// Strips leading and trailing space/tab (only those) from a line.
pub fn trim(line: &[u8]) -> &[u8] {
    let start = line
        .iter()
        .position(|&b| b != b' ' && b != b'\t')
        .unwrap_or(line.len());
    let end = line
        .iter()
        .rposition(|&b| b != b' ' && b != b'\t')
        .map_or(start, |i| i + 1);
    &line[start..end]
}
