use std::collections::HashMap;
use std::fmt::Write as _;

use crate::compression::Result;
use crate::error::Error;

/// A mapping from byte value to its prefix-free bit-string code.
///
/// The table is the long-lived artifact of compression: it is persisted
/// next to the packed payload and is the sole means by which decompression
/// recovers the symbol/code correspondence. The Huffman tree itself is
/// never serialized.
///
/// The artifact format is text, one record per line, each record being the
/// numeric byte value and the ASCII bit-string code separated by
/// whitespace, e.g. `97 0`. Records are written in ascending byte order so
/// the artifact is stable across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: HashMap<u8, String>,
}

impl CodeTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of symbols in the table.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Whether the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Records `code` for `byte`, replacing any previous entry.
    pub fn insert(&mut self, byte: u8, code: String) {
        self.codes.insert(byte, code);
    }

    /// Returns the code for `byte`, if present.
    pub fn get(&self, byte: u8) -> Option<&str> {
        self.codes.get(&byte).map(String::as_str)
    }

    /// Iterates over `(byte, code)` entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &str)> {
        self.codes.iter().map(|(&byte, code)| (byte, code.as_str()))
    }

    /// Length in bits of the longest code in the table, or zero for an
    /// empty table.
    pub fn max_code_len(&self) -> usize {
        self.codes.values().map(String::len).max().unwrap_or(0)
    }

    /// Builds the reverse mapping from code to byte value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateCode`] if two symbols share a code, which
    /// indicates a corrupted table.
    pub fn reversed(&self) -> Result<HashMap<String, u8>> {
        // Visit entries in byte order so the reported conflict pair is
        // stable.
        let entries = self.sorted_entries();

        let mut reverse = HashMap::with_capacity(entries.len());
        for (byte, code) in entries {
            if let Some(&first) = reverse.get(code) {
                return Err(Error::DuplicateCode {
                    code: code.to_string(),
                    first,
                    second: byte,
                });
            }
            reverse.insert(code.to_string(), byte);
        }
        Ok(reverse)
    }

    /// Serializes the table to its text artifact form.
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        for (byte, code) in self.sorted_entries() {
            // Writing to a String cannot fail.
            let _ = writeln!(out, "{} {}", byte, code);
        }
        out
    }

    /// Parses a table from its text artifact form.
    ///
    /// Blank lines are skipped. Each remaining line must hold exactly two
    /// whitespace-separated fields: a byte value in 0-255 and a code made
    /// of `'0'` and `'1'` digits.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingTable`] for any malformed record, since a
    /// table that fails to parse leaves the decoder with no valid table to
    /// work against.
    pub fn parse(input: &str) -> Result<CodeTable> {
        let mut table = CodeTable::new();
        for (idx, line) in input.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let mut fields = line.split_whitespace();
            let (symbol, code) = match (fields.next(), fields.next()) {
                (Some(symbol), Some(code)) => (symbol, code),
                _ => {
                    return Err(Error::MissingTable(format!(
                        "line {}: expected `<byte> <code>`",
                        idx + 1
                    )))
                }
            };
            if fields.next().is_some() {
                return Err(Error::MissingTable(format!(
                    "line {}: trailing fields after `<byte> <code>`",
                    idx + 1
                )));
            }

            let byte: u8 = symbol.parse().map_err(|_| {
                Error::MissingTable(format!(
                    "line {}: `{}` is not a byte value",
                    idx + 1,
                    symbol
                ))
            })?;
            if !code.bytes().all(|b| b == b'0' || b == b'1') {
                return Err(Error::MissingTable(format!(
                    "line {}: code `{}` contains digits other than 0 and 1",
                    idx + 1,
                    code
                )));
            }

            if table.codes.insert(byte, code.to_string()).is_some() {
                return Err(Error::MissingTable(format!(
                    "line {}: byte {} appears more than once",
                    idx + 1,
                    byte
                )));
            }
        }
        Ok(table)
    }

    fn sorted_entries(&self) -> Vec<(u8, &str)> {
        let mut entries: Vec<(u8, &str)> = self
            .codes
            .iter()
            .map(|(&byte, code)| (byte, code.as_str()))
            .collect();
        entries.sort_unstable_by_key(|&(byte, _)| byte);
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> CodeTable {
        let mut table = CodeTable::new();
        table.insert(b'a', "0".to_string());
        table.insert(b'c', "10".to_string());
        table.insert(b'b', "11".to_string());
        table
    }

    #[test]
    fn test_serialize_is_sorted_by_byte() {
        let table = sample_table();
        assert_eq!(table.serialize(), "97 0\n98 11\n99 10\n");
    }

    #[test]
    fn test_serialize_parse_roundtrip() {
        let table = sample_table();
        let parsed = CodeTable::parse(&table.serialize()).unwrap();
        assert_eq!(parsed, table);
    }

    #[test]
    fn test_parse_skips_blank_lines() {
        let parsed = CodeTable::parse("97 0\n\n  \n98 11\n").unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed.get(b'a'), Some("0"));
        assert_eq!(parsed.get(b'b'), Some("11"));
    }

    #[test]
    fn test_parse_rejects_missing_field() {
        let err = CodeTable::parse("97\n").unwrap_err();
        assert!(matches!(err, Error::MissingTable(_)));
    }

    #[test]
    fn test_parse_rejects_trailing_fields() {
        let err = CodeTable::parse("97 0 1\n").unwrap_err();
        assert!(matches!(err, Error::MissingTable(_)));
    }

    #[test]
    fn test_parse_rejects_non_numeric_symbol() {
        let err = CodeTable::parse("x 0\n").unwrap_err();
        assert!(matches!(err, Error::MissingTable(_)));
    }

    #[test]
    fn test_parse_rejects_out_of_range_symbol() {
        let err = CodeTable::parse("256 0\n").unwrap_err();
        assert!(matches!(err, Error::MissingTable(_)));
    }

    #[test]
    fn test_parse_rejects_non_binary_code() {
        let err = CodeTable::parse("97 012\n").unwrap_err();
        assert!(matches!(err, Error::MissingTable(_)));
    }

    #[test]
    fn test_parse_rejects_repeated_symbol() {
        let err = CodeTable::parse("97 0\n97 1\n").unwrap_err();
        assert!(matches!(err, Error::MissingTable(_)));
    }

    #[test]
    fn test_parse_empty_artifact_is_empty_table() {
        let parsed = CodeTable::parse("").unwrap();
        assert!(parsed.is_empty());
    }

    #[test]
    fn test_reversed_maps_code_to_byte() {
        let reverse = sample_table().reversed().unwrap();
        assert_eq!(reverse.get("0"), Some(&b'a'));
        assert_eq!(reverse.get("11"), Some(&b'b'));
        assert_eq!(reverse.get("10"), Some(&b'c'));
    }

    #[test]
    fn test_reversed_rejects_duplicate_codes() {
        let mut table = CodeTable::new();
        table.insert(b'a', "01".to_string());
        table.insert(b'b', "01".to_string());

        match table.reversed().unwrap_err() {
            Error::DuplicateCode { code, first, second } => {
                assert_eq!(code, "01");
                assert_eq!(first, b'a');
                assert_eq!(second, b'b');
            }
            e => panic!("unexpected error: {}", e),
        }
    }

    #[test]
    fn test_max_code_len() {
        assert_eq!(CodeTable::new().max_code_len(), 0);
        assert_eq!(sample_table().max_code_len(), 2);
    }
}
