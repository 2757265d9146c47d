use std::collections::HashSet;

use crate::Symbol;

/// Ordered list of symbols produced from one submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolList(Vec<Symbol>);

impl SymbolList {
    pub fn new(symbols: Vec<Symbol>) -> Self {
        Self(symbols)
    }

    pub fn as_slice(&self) -> &[Symbol] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Symbol> {
        self.0.iter()
    }

    /// Drop repeated symbols, keeping the first occurrence of each.
    pub fn dedup_first_seen(self) -> Self {
        let mut seen = HashSet::with_capacity(self.0.len());
        Self(
            self.0
                .into_iter()
                .filter(|symbol| seen.insert(symbol.clone()))
                .collect(),
        )
    }

    /// Symbols joined with `\n`, the form the upstream service expects.
    pub fn to_newline_text(&self) -> String {
        self.0
            .iter()
            .map(Symbol::as_str)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn into_inner(self) -> Vec<Symbol> {
        self.0
    }
}

impl<'a> IntoIterator for &'a SymbolList {
    type Item = &'a Symbol;
    type IntoIter = std::slice::Iter<'a, Symbol>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Parse free-text input (one symbol per line) into a [`SymbolList`].
///
/// Lines are trimmed and blank lines dropped. Order and duplicates are kept
/// as entered. Never fails; empty input yields an empty list.
pub fn parse_symbols(raw: &str) -> SymbolList {
    SymbolList(
        raw.lines()
            .filter_map(|line| Symbol::parse(line).ok())
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(list: &SymbolList) -> Vec<&str> {
        list.iter().map(Symbol::as_str).collect()
    }

    #[test]
    fn drops_blank_lines_and_keeps_duplicates() {
        let list = parse_symbols("AAPL\n\nMSFT\n  \nAAPL");
        assert_eq!(texts(&list), vec!["AAPL", "MSFT", "AAPL"]);
    }

    #[test]
    fn empty_input_yields_empty_list() {
        assert!(parse_symbols("").is_empty());
        assert!(parse_symbols("\n \r\n\t").is_empty());
    }

    #[test]
    fn handles_crlf_and_surrounding_whitespace() {
        let list = parse_symbols("  tcs \r\nINFY\r\n");
        assert_eq!(texts(&list), vec!["tcs", "INFY"]);
    }

    #[test]
    fn preserves_entry_order_without_sorting() {
        let list = parse_symbols("ZOMATO\nAAPL\nMSFT");
        assert_eq!(texts(&list), vec!["ZOMATO", "AAPL", "MSFT"]);
    }

    #[test]
    fn dedup_keeps_first_occurrence() {
        let list = parse_symbols("MSFT\nAAPL\nMSFT\naapl").dedup_first_seen();
        assert_eq!(texts(&list), vec!["MSFT", "AAPL", "aapl"]);
    }

    #[test]
    fn joins_back_to_newline_text() {
        let list = parse_symbols(" A \n\nB");
        assert_eq!(list.to_newline_text(), "A\nB");
    }
}
