//! Prefix matching of command tokens.
//!
//! A token selects a keyword when the keyword starts with it, so `conf t`
//! reads as `configure terminal`. Candidates are tried in declaration order
//! and the first match wins. Tables are built so that no keyword is a prefix
//! of another one in the same table, which keeps every fully typed keyword
//! reachable; [`CommandTable::is_unambiguous`] and
//! [`Keywords::is_unambiguous`] check this.

use std::fmt;
use std::str::FromStr;

use crate::error::{CommandError, CommandResult};
use crate::processor::Handler;

/// Returns true if `token` abbreviates `keyword`.
pub fn keyword_matches(keyword: &str, token: &str) -> bool {
    !token.is_empty() && keyword.starts_with(token)
}

fn no_prefix_pairs<'a>(keywords: impl Iterator<Item = &'a str> + Clone) -> bool {
    keywords.clone().enumerate().all(|(i, a)| {
        keywords
            .clone()
            .enumerate()
            .all(|(j, b)| i == j || !b.starts_with(a))
    })
}

/// Fixed vocabulary accepted at one argument position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keywords(&'static [&'static str]);

impl Keywords {
    pub const fn new(words: &'static [&'static str]) -> Self {
        Self(words)
    }

    pub fn words(&self) -> &'static [&'static str] {
        self.0
    }

    /// First keyword abbreviated by `token`.
    pub fn resolve(&self, token: &str) -> Option<&'static str> {
        self.0
            .iter()
            .copied()
            .find(|keyword| keyword_matches(keyword, token))
    }

    pub fn is_unambiguous(&self) -> bool {
        no_prefix_pairs(self.0.iter().copied())
    }
}

/// Ordered `(keyword, handler)` entries of one mode.
#[derive(Clone, Default)]
pub struct CommandTable {
    entries: Vec<(&'static str, Handler)>,
}

impl CommandTable {
    pub fn builder() -> CommandTableBuilder {
        CommandTableBuilder::default()
    }

    /// First entry whose keyword is abbreviated by `token`.
    pub fn resolve(&self, token: &str) -> Option<(&'static str, Handler)> {
        self.entries
            .iter()
            .copied()
            .find(|(keyword, _)| keyword_matches(keyword, token))
    }

    pub fn keywords(&self) -> impl Iterator<Item = &'static str> + Clone + '_ {
        self.entries.iter().map(|(keyword, _)| *keyword)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_unambiguous(&self) -> bool {
        no_prefix_pairs(self.keywords())
    }
}

impl fmt::Debug for CommandTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.keywords()).finish()
    }
}

#[derive(Default)]
pub struct CommandTableBuilder {
    entries: Vec<(&'static str, Handler)>,
}

impl CommandTableBuilder {
    pub fn command(mut self, keyword: &'static str, handler: Handler) -> Self {
        self.entries.push((keyword, handler));
        self
    }

    pub fn build(self) -> CommandTable {
        CommandTable {
            entries: self.entries,
        }
    }
}

/// Tokens following the command keyword.
#[derive(Debug, Clone, Copy)]
pub struct Args<'a> {
    tokens: &'a [&'a str],
}

impl<'a> Args<'a> {
    pub fn new(tokens: &'a [&'a str]) -> Self {
        Self { tokens }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn opt(&self, index: usize) -> Option<&'a str> {
        self.tokens.get(index).copied()
    }

    /// Token at `index`; a missing token makes the command incomplete.
    pub fn get(&self, index: usize) -> CommandResult<&'a str> {
        self.opt(index).ok_or(CommandError::Incomplete)
    }

    /// Keyword of `vocab` abbreviated by the token at `index`.
    pub fn keyword(&self, index: usize, vocab: &Keywords) -> CommandResult<&'static str> {
        let token = self.get(index)?;
        vocab.resolve(token).ok_or_else(|| self.invalid(index))
    }

    /// Like [`Args::keyword`], but an absent token is fine.
    pub fn opt_keyword(&self, index: usize, vocab: &Keywords) -> CommandResult<Option<&'static str>> {
        match self.opt(index) {
            None => Ok(None),
            Some(_) => self.keyword(index, vocab).map(Some),
        }
    }

    /// Parse the token at `index`; unparsable input is reported from there.
    pub fn parse<T: FromStr>(&self, index: usize) -> CommandResult<T> {
        self.get(index)?.parse().map_err(|_| self.invalid(index))
    }

    /// Tokens from `index` on, joined by single spaces.
    pub fn rest(&self, index: usize) -> Option<String> {
        match self.tokens.get(index..) {
            Some(rest) if !rest.is_empty() => Some(rest.join(" ")),
            _ => None,
        }
    }

    /// Refuse any token past `index`.
    pub fn end(&self, index: usize) -> CommandResult<()> {
        if self.tokens.len() > index {
            return Err(self.invalid(index));
        }
        Ok(())
    }

    /// Invalid-input error reporting the tokens from `index` on.
    pub fn invalid(&self, index: usize) -> CommandError {
        CommandError::invalid_input(self.tokens.get(index..).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processor::Transition;
    use pretty_assertions::assert_eq;

    const DIRECTIONS: Keywords = Keywords::new(&["in", "out"]);

    fn stay(
        _: &mut crate::processor::CommandContext<'_>,
        _: &Args<'_>,
    ) -> CommandResult<Transition> {
        Ok(Transition::Stay)
    }

    #[test]
    fn test_keyword_matches() {
        assert!(keyword_matches("configure", "conf"));
        assert!(keyword_matches("configure", "configure"));
        assert!(!keyword_matches("configure", "configures"));
        assert!(!keyword_matches("configure", ""));
    }

    #[test]
    fn test_keywords_resolve_in_order() {
        let vocab = Keywords::new(&["address", "access-group", "vrrp-extended"]);
        assert_eq!(vocab.resolve("a"), Some("address"));
        assert_eq!(vocab.resolve("acc"), Some("access-group"));
        assert_eq!(vocab.resolve("x"), None);
        assert!(vocab.is_unambiguous());
        assert!(!Keywords::new(&["ip", "ip-address"]).is_unambiguous());
    }

    #[test]
    fn test_table_resolve() {
        let table = CommandTable::builder()
            .command("enable", stay)
            .command("end", stay)
            .command("exit", stay)
            .build();
        assert_eq!(table.resolve("e").map(|(k, _)| k), Some("enable"));
        assert_eq!(table.resolve("en").map(|(k, _)| k), Some("enable"));
        assert_eq!(table.resolve("end").map(|(k, _)| k), Some("end"));
        assert_eq!(table.resolve("ex").map(|(k, _)| k), Some("exit"));
        assert!(table.resolve("shizzle").is_none());
        assert!(table.is_unambiguous());
        assert_eq!(table.len(), 3);

        let clashing = CommandTable::builder()
            .command("no", stay)
            .command("non-preempt-mode", stay)
            .build();
        assert!(!clashing.is_unambiguous());
    }

    #[test]
    fn test_args() {
        let tokens = ["ACL1", "i", "extra"];
        let args = Args::new(&tokens);

        assert_eq!(args.get(0).unwrap(), "ACL1");
        assert_eq!(args.keyword(1, &DIRECTIONS).unwrap(), "in");
        assert!(matches!(args.get(3), Err(CommandError::Incomplete)));
        assert_eq!(args.rest(1).as_deref(), Some("i extra"));
        assert_eq!(args.rest(3), None);

        match args.keyword(2, &DIRECTIONS) {
            Err(CommandError::InvalidInput { rest }) => assert_eq!(rest, "extra"),
            other => panic!("unexpected: {:?}", other),
        }
        assert!(args.end(3).is_ok());
        assert!(args.end(2).is_err());
    }

    #[test]
    fn test_args_parse() {
        let tokens = ["10", "x"];
        let args = Args::new(&tokens);
        assert_eq!(args.parse::<u32>(0).unwrap(), 10);
        assert!(matches!(
            args.parse::<u32>(1),
            Err(CommandError::InvalidInput { .. })
        ));
        assert!(matches!(args.opt_keyword(5, &DIRECTIONS), Ok(None)));
    }
}
