//! Lexical analyzer of simfile format.
//!
//! Raw [String] == [parse] ==> [`TokenWithRange`] list (in [`LexOutput`]) == [`crate::sm::parse`] ==>
//! [`crate::sm::model::Song`]
//!
//! The grammar is small: a record begins at `#`, parameters are separated by `:` and the record ends at `;`. `//`
//! starts a line comment anywhere, even in a record. A backslash makes the next character literal when escapes are
//! enabled. Many files forget the `;` of a record, so a `#` at the head of a line also finalizes the open record.

pub mod cursor;
pub mod token;

use std::borrow::Cow;

use crate::sm::command::mixin::SourceRangeMixin;

use self::{
    cursor::Cursor,
    token::{Token, TokenWithRange},
};

/// Lex Parsing Results, includes tokens in the order of the source.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LexOutput<'a> {
    /// tokens
    pub tokens: Vec<TokenWithRange<'a>>,
}

/// Analyzes and converts the simfile text into records.
///
/// This never fails. Text out of records is ignored, and an unterminated record at the end of input is finalized as
/// is.
pub fn parse(source: &str, escapes: bool) -> LexOutput<'_> {
    let mut cursor = Cursor::new(source);
    let mut tokens = vec![];
    while let Some(c) = cursor.peek_char() {
        if c == '#' {
            tokens.push(read_record(&mut cursor, escapes));
        } else if cursor.at_line_comment() {
            cursor.skip_line();
        } else {
            cursor.next_char();
        }
    }
    LexOutput { tokens }
}

fn read_record<'a>(cursor: &mut Cursor<'a>, escapes: bool) -> TokenWithRange<'a> {
    let start = cursor.index();
    let source = cursor.source();
    // '#'
    cursor.next_char();

    let mut params = vec![];
    let mut param = ParamBuilder::new(cursor.index());
    loop {
        let Some(c) = cursor.peek_char() else {
            params.push(param.finish(source, cursor.index()));
            break;
        };
        match c {
            ';' => {
                params.push(param.finish(source, cursor.index()));
                cursor.next_char();
                break;
            }
            ':' => {
                params.push(param.finish(source, cursor.index()));
                cursor.next_char();
                param = ParamBuilder::new(cursor.index());
            }
            '\\' if escapes => {
                param.detach(source, cursor.index());
                cursor.next_char();
                if let Some(escaped) = cursor.next_char() {
                    param.push(escaped);
                }
            }
            '/' if cursor.at_line_comment() => {
                param.detach(source, cursor.index());
                cursor.skip_line();
            }
            '#' if cursor.at_line_head() => {
                params.push(param.finish(source, cursor.index()));
                break;
            }
            _ => {
                cursor.next_char();
                param.push(c);
            }
        }
    }
    SourceRangeMixin::new(Token::new(params), start..cursor.index())
}

/// Builds a parameter, borrowing the source until the first escape or comment forces a copy.
struct ParamBuilder {
    start: usize,
    owned: Option<String>,
}

impl ParamBuilder {
    const fn new(start: usize) -> Self {
        Self { start, owned: None }
    }

    fn detach(&mut self, source: &str, until: usize) {
        if self.owned.is_none() {
            self.owned = Some(source[self.start..until].to_owned());
        }
    }

    fn push(&mut self, c: char) {
        if let Some(owned) = &mut self.owned {
            owned.push(c);
        }
    }

    fn finish(self, source: &str, end: usize) -> Cow<'_, str> {
        match self.owned {
            None => Cow::Borrowed(source[self.start..end].trim()),
            Some(owned) => Cow::Owned(owned.trim().to_owned()),
        }
    }
}
