//! Definitions of the token in simfile format.

use std::borrow::Cow;

use itertools::Itertools;

use crate::sm::command::mixin::SourceRangeMixin;

/// A record `#TAG:param:param...;` of the simfile.
///
/// The first parameter is the tag name as written. Each parameter is trimmed, and borrows the source unless
/// unescaping or comment removal changed it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Token<'a> {
    /// Parameters separated by `:`, starting with the tag name.
    pub params: Vec<Cow<'a, str>>,
}

/// A token with position information.
pub type TokenWithRange<'a> = SourceRangeMixin<Token<'a>>;

impl<'a> Token<'a> {
    /// Creates a token from its parameters.
    #[must_use]
    pub const fn new(params: Vec<Cow<'a, str>>) -> Self {
        Self { params }
    }

    /// Returns the tag name in uppercase, or `None` for an empty record.
    #[must_use]
    pub fn tag(&self) -> Option<String> {
        self.params
            .first()
            .filter(|name| !name.is_empty())
            .map(|name| name.to_ascii_uppercase())
    }

    /// Returns the parameter at `index`, or an empty str if the record is shorter.
    #[must_use]
    pub fn param(&self, index: usize) -> &str {
        self.params.get(index).map_or("", |param| &**param)
    }

    /// Returns the number of parameters including the tag name.
    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Returns `true` if the record has no parameter.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Joins the parameters after the tag name with `:`, undoing the split of values which may contain colons.
    #[must_use]
    pub fn joined_args(&self) -> String {
        self.params.iter().skip(1).join(":")
    }
}
