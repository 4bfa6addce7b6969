/// A character cursor over the simfile source.
///
/// The delimiters of simfile records are all ASCII, so the cursor moves by `char` and its index is always on a char
/// boundary.
pub struct Cursor<'a> {
    /// The index position in bytes.
    index: usize,
    /// The source str.
    source: &'a str,
}

impl<'a> Cursor<'a> {
    pub const fn new(source: &'a str) -> Self {
        Self { index: 0, source }
    }

    /// Returns the current byte index in the source string.
    pub const fn index(&self) -> usize {
        self.index
    }

    pub const fn source(&self) -> &'a str {
        self.source
    }

    /// Returns the remaining part of the source.
    pub fn rest(&self) -> &'a str {
        &self.source[self.index..]
    }

    pub fn peek_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Move cursor, through and return the next char.
    pub fn next_char(&mut self) -> Option<char> {
        let c = self.peek_char()?;
        self.index += c.len_utf8();
        Some(c)
    }

    /// Whether a line comment `//` starts here.
    pub fn at_line_comment(&self) -> bool {
        self.rest().starts_with("//")
    }

    /// Move cursor until the end of this line. The line feed is not consumed.
    pub fn skip_line(&mut self) {
        self.index = self
            .rest()
            .find('\n')
            .map_or(self.source.len(), |i| self.index + i);
    }

    /// Whether only whitespaces precede the cursor in this line.
    pub fn at_line_head(&self) -> bool {
        let line_start = self.source[..self.index]
            .rfind('\n')
            .map_or(0, |i| i + 1);
        self.source[line_start..self.index].trim().is_empty()
    }
}

#[test]
fn test1() {
    let mut cursor = Cursor::new("ab// c\n  #d\u{3042}");

    assert_eq!(cursor.next_char(), Some('a'));
    assert_eq!(cursor.next_char(), Some('b'));
    assert!(cursor.at_line_comment());
    assert!(!cursor.at_line_head());
    cursor.skip_line();
    assert_eq!(cursor.next_char(), Some('\n'));
    assert!(cursor.at_line_head());
    assert_eq!(cursor.next_char(), Some(' '));
    assert_eq!(cursor.next_char(), Some(' '));
    assert!(cursor.at_line_head());
    assert_eq!(cursor.next_char(), Some('#'));
    assert_eq!(cursor.next_char(), Some('d'));
    assert_eq!(cursor.next_char(), Some('\u{3042}'));
    assert_eq!(cursor.index(), cursor.source().len());
    assert_eq!(cursor.next_char(), None);
}
