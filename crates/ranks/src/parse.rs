use crate::error::{ErrorKind, Result};
use crate::{Rank, RankTable};
use base64::Engine;
use base64::alphabet;
use base64::engine::{GeneralPurpose, GeneralPurposeConfig};
use exn::{OptionExt, ResultExt};
use memchr::memchr;
use tracing::instrument;

/// Standard alphabet with padding, tolerating non-zero trailing bits the same
/// way other tiktoken loaders do.
const TOKEN_ENGINE: GeneralPurpose =
    GeneralPurpose::new(&alphabet::STANDARD, GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true));

/// Parse rank-table text: one `<base64 token> <decimal rank>` record per line.
///
/// - Empty lines are skipped.
/// - Fields are separated by single spaces and are not trimmed; anything after
///   the second field is ignored.
/// - When a token appears more than once, the last line wins.
///
/// # Errors
/// [`ParseError`](ErrorKind::ParseError) for the first line whose token is not
/// valid base64, or whose rank is missing or not a non-negative integer.
///
/// # Examples
///
/// ```
/// let table = rankcache_ranks::parse("AAA= 0\nQUJD 1\n").unwrap();
/// assert_eq!(table.get(b"\0\0"), Some(0));
/// assert_eq!(table.get(b"ABC"), Some(1));
/// ```
#[instrument(level = "debug", skip_all, fields(bytes = data.as_ref().len()))]
pub fn parse(data: impl AsRef<[u8]>) -> Result<RankTable> {
    let data = data.as_ref();
    let mut table = RankTable::with_capacity(memchr::memchr_iter(b'\n', data).count() + 1);
    for (index, line) in Lines::new(data).enumerate() {
        if line.is_empty() {
            continue;
        }
        let (token, rank) = parse_line(index + 1, line)?;
        table.insert(token, rank);
    }
    tracing::debug!(entries = table.len(), "Parsed rank table");
    Ok(table)
}

fn parse_line(number: usize, line: &[u8]) -> Result<(Vec<u8>, Rank)> {
    let error = |field: &'static str| ErrorKind::ParseError {
        line: number,
        field,
        value: String::from_utf8_lossy(line).into_owned(),
    };
    let mut fields = line.split(|byte| *byte == b' ');
    let token = fields.next().unwrap_or_default();
    let token = TOKEN_ENGINE.decode(token).or_raise(|| error("token"))?;
    let rank = fields.next().ok_or_raise(|| error("rank"))?;
    let rank = std::str::from_utf8(rank).or_raise(|| error("rank"))?;
    let rank = rank.parse::<Rank>().or_raise(|| error("rank"))?;
    Ok((token, rank))
}

/// Newline-separated slices, including the (possibly empty) tail after the
/// last newline.
struct Lines<'a> {
    rest: Option<&'a [u8]>,
}
impl<'a> Lines<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { rest: Some(data) }
    }
}
impl<'a> Iterator for Lines<'a> {
    type Item = &'a [u8];
    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.rest?;
        match memchr(b'\n', rest) {
            Some(end) => {
                self.rest = Some(&rest[end + 1..]);
                Some(&rest[..end])
            },
            None => {
                self.rest = None;
                Some(rest)
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_two_entries() {
        let table = parse("AAA= 0\nQUJD 1\n").unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get([0u8, 0]), Some(0));
        assert_eq!(table.get(b"ABC"), Some(1));
    }

    #[test]
    fn test_last_line_wins() {
        let table = parse("QUJD 1\nIQ== 2\nQUJD 9\n").unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(b"ABC"), Some(9));
        assert_eq!(table.get(b"!"), Some(2));
    }

    #[rstest]
    #[case::empty("", 0)]
    #[case::only_newlines("\n\n\n", 0)]
    #[case::no_trailing_newline("IQ== 0\nIg== 1", 2)]
    #[case::blank_lines_between("IQ== 0\n\n\nIg== 1\n", 2)]
    #[case::extra_fields_ignored("IQ== 0 trailing junk\nIg== 1 \n", 2)]
    #[case::empty_token(" 5\n", 1)]
    fn test_lenient_lines(#[case] input: &str, #[case] entries: usize) {
        assert_eq!(parse(input).unwrap().len(), entries);
    }

    #[rstest]
    #[case::not_base64("!!!! 0\n", 1, "token")]
    #[case::missing_padding("QQ 0\n", 1, "token")]
    #[case::not_a_number("IQ== zero\n", 1, "rank")]
    #[case::negative("IQ== -1\n", 1, "rank")]
    #[case::missing_rank("IQ==\n", 1, "rank")]
    #[case::double_space("IQ==  1\n", 1, "rank")]
    #[case::crlf("IQ== 0\r\n", 1, "rank")]
    #[case::line_numbers_count_blanks("IQ== 0\nIg== 1\n\nIw== x\n", 4, "rank")]
    fn test_malformed(#[case] input: &str, #[case] line: usize, #[case] field: &str) {
        let err = parse(input).unwrap_err();
        let ErrorKind::ParseError { line: actual_line, field: actual_field, .. } = &*err;
        assert_eq!(*actual_line, line);
        assert_eq!(*actual_field, field);
    }

    #[test]
    fn test_error_reports_line_content() {
        let err = parse("IQ== 0\nnot-base64 1\n").unwrap_err();
        assert_eq!(
            *err,
            ErrorKind::ParseError { line: 2, field: "token", value: "not-base64 1".to_string() }
        );
    }

    #[test]
    fn test_non_utf8_rank() {
        let err = parse(b"IQ== \xff\n").unwrap_err();
        assert!(matches!(&*err, ErrorKind::ParseError { field: "rank", .. }));
    }

    #[test]
    fn test_lines() {
        let lines: Vec<&[u8]> = Lines::new(b"a\n\nb").collect();
        assert_eq!(lines, vec![&b"a"[..], &b""[..], &b"b"[..]]);
        let lines: Vec<&[u8]> = Lines::new(b"a\n").collect();
        assert_eq!(lines, vec![&b"a"[..], &b""[..]]);
    }
}
