use bitvec::prelude::*;

use crate::compression::table::CodeTable;
use crate::compression::Result;
use crate::error::Error;

/// Decode a bit sequence against `table` by greedy prefix matching.
///
/// Builds the reverse code-to-byte mapping from the table, then scans the
/// bits in order, growing a candidate code one bit at a time; as soon as
/// the candidate matches a table entry the symbol is emitted and the
/// candidate reset. Because the codes are prefix-free, the first match is
/// always the right one. A well-formed stream ends with an empty
/// candidate.
///
/// # Errors
///
/// Returns [`Error::DuplicateCode`] if the table cannot be reversed, and
/// [`Error::MalformedStream`] if a candidate outgrows every code in the
/// table or a non-empty candidate remains when the bits are exhausted.
/// A corrupted stream or a mismatched table is reported, never silently
/// truncated.
pub fn decode_bits(bits: &BitSlice<u8, Msb0>, table: &CodeTable) -> Result<Vec<u8>> {
    let reverse = table.reversed()?;
    let max_code_len = table.max_code_len();

    let mut output = Vec::new();
    let mut candidate = String::new();
    for idx in 0..bits.len() {
        candidate.push(if bits[idx] { '1' } else { '0' });
        if candidate.len() > max_code_len {
            return Err(Error::MalformedStream(format!(
                "no code matches the {} bits ending at bit {}",
                candidate.len(),
                idx
            )));
        }
        if let Some(&byte) = reverse.get(&candidate) {
            output.push(byte);
            candidate.clear();
        }
    }

    if !candidate.is_empty() {
        return Err(Error::MalformedStream(format!(
            "{} trailing bits do not match any code",
            candidate.len()
        )));
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc_table() -> CodeTable {
        let mut table = CodeTable::new();
        table.insert(b'a', "0".to_string());
        table.insert(b'b', "11".to_string());
        table.insert(b'c', "10".to_string());
        table
    }

    fn bits_from(digits: &str) -> BitVec<u8, Msb0> {
        digits.bytes().map(|d| d == b'1').collect()
    }

    #[test]
    fn test_decode_matches_prefixes_greedily() {
        let bits = bits_from("000111110");
        let decoded = decode_bits(&bits, &abc_table()).unwrap();
        assert_eq!(decoded, b"aaabbc");
    }

    #[test]
    fn test_decode_empty_bits() {
        let decoded = decode_bits(BitSlice::empty(), &abc_table()).unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn test_decode_empty_bits_with_empty_table() {
        let decoded = decode_bits(BitSlice::empty(), &CodeTable::new()).unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn test_decode_rejects_trailing_bits() {
        // "11" then a lone "1" that matches nothing.
        let bits = bits_from("111");
        let err = decode_bits(&bits, &abc_table()).unwrap_err();
        assert!(matches!(err, Error::MalformedStream(_)));
    }

    #[test]
    fn test_decode_rejects_candidate_longer_than_any_code() {
        let mut table = CodeTable::new();
        table.insert(b'a', "00".to_string());
        // No code starts with "01", so the candidate outgrows the table.
        let err = decode_bits(&bits_from("010"), &table).unwrap_err();
        assert!(matches!(err, Error::MalformedStream(_)));
    }

    #[test]
    fn test_decode_rejects_bits_against_empty_table() {
        let err = decode_bits(&bits_from("0"), &CodeTable::new()).unwrap_err();
        assert!(matches!(err, Error::MalformedStream(_)));
    }

    #[test]
    fn test_decode_surfaces_duplicate_codes() {
        let mut table = CodeTable::new();
        table.insert(b'a', "0".to_string());
        table.insert(b'b', "0".to_string());
        let err = decode_bits(&bits_from("00"), &table).unwrap_err();
        assert!(matches!(err, Error::DuplicateCode { .. }));
    }

    #[test]
    fn test_decode_single_symbol_stream() {
        let mut table = CodeTable::new();
        table.insert(b'A', "0".to_string());
        let decoded = decode_bits(&bits_from("0000"), &table).unwrap();
        assert_eq!(decoded, b"AAAA");
    }
}
