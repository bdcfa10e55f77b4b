//! Split a line into identifier runs and the text between them, using PEST.

use pest::Parser;
use pest_derive::Parser as PestParser;

#[derive(PestParser)]
#[grammar = "grammar.pest"]
struct LineScanner;

#[derive(Debug, thiserror::Error)]
#[error("scan error: {0}")]
pub struct ScanError(#[from] Box<pest::error::Error<Rule>>);

/// One piece of a scanned line, borrowing from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Maximal identifier run: decode candidate.
    Ident(&'a str),
    /// Everything else, copied through untouched.
    Gap(&'a str),
}

impl<'a> Segment<'a> {
    pub fn as_str(&self) -> &'a str {
        match *self {
            Segment::Ident(s) | Segment::Gap(s) => s,
        }
    }
}

/// Scan `line` into segments. Concatenating the segments yields `line`.
///
/// The grammar accepts every string (each character is either an identifier
/// start or gap text), so `Err` only surfaces if the grammar itself regresses.
/// The error is still returned rather than unwrapped, like the DSL parser's.
pub fn segments(line: &str) -> Result<Vec<Segment<'_>>, ScanError> {
    let mut pairs = LineScanner::parse(Rule::line, line).map_err(Box::new)?;
    let mut out = Vec::new();
    let Some(root) = pairs.next() else {
        return Ok(out);
    };
    for pair in root.into_inner() {
        match pair.as_rule() {
            Rule::ident => out.push(Segment::Ident(pair.as_str())),
            Rule::gap => out.push(Segment::Gap(pair.as_str())),
            _ => {}
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idents(line: &str) -> Vec<&str> {
        segments(line)
            .expect("scan")
            .into_iter()
            .filter_map(|s| match s {
                Segment::Ident(i) => Some(i),
                Segment::Gap(_) => None,
            })
            .collect()
    }

    #[test]
    fn empty_line_has_no_segments() {
        assert!(segments("").expect("scan").is_empty());
    }

    #[test]
    fn identifiers_may_contain_dot_dollar_underscore() {
        assert_eq!(
            idents("call main.Mango$1 (_tmp, x2)"),
            vec!["call", "main.Mango$1", "_tmp", "x2"]
        );
    }

    #[test]
    fn digits_do_not_start_an_identifier() {
        assert_eq!(idents("99 9abc"), vec!["abc"]);
        assert_eq!(
            segments("99").expect("scan"),
            vec![Segment::Gap("99")]
        );
    }

    #[test]
    fn segments_reassemble_the_line() {
        let line = "  AN5_int328e := [x]  // tail\t";
        let joined: String = segments(line)
            .expect("scan")
            .iter()
            .map(|s| s.as_str())
            .collect();
        assert_eq!(joined, line);
    }

    #[test]
    fn every_input_scans() {
        for line in ["\0\x01\x7f", "\u{feff}// é $ . _", "\t\r", "9", "…!", "🦀x🦀"] {
            let joined: String = segments(line)
                .expect("scan")
                .iter()
                .map(|s| s.as_str())
                .collect();
            assert_eq!(joined, line);
        }
    }

    #[test]
    fn unicode_letters_are_identifier_characters() {
        assert_eq!(idents("é1 = ü"), vec!["é1", "ü"]);
    }
}
