use nom::{
    character::complete::{char, space0, space1, u32 as decimal},
    combinator::{all_consuming, map},
    multi::separated_list0,
    sequence::{delimited, separated_pair},
    IResult,
};

use crate::error::ReadError;

fn pair(input: &str) -> IResult<&str, (usize, usize)> {
    map(
        separated_pair(decimal, char('-'), decimal),
        |(source, target)| (source as usize, target as usize),
    )(input)
}

fn pairs(input: &str) -> IResult<&str, Vec<(usize, usize)>> {
    delimited(space0, separated_list0(space1, pair), space0)(input)
}

fn parse_numbered(line: &str, number: usize) -> Result<Vec<(usize, usize)>, ReadError> {
    all_consuming(pairs)(line.trim_end_matches(['\r', '\n']))
        .map(|(_, pairs)| pairs)
        .map_err(|_| ReadError::Alignment {
            line: number,
            message: format!("expected space-separated `i-j` pairs, found {:?}", line),
        })
}

/// Parses one sentence's alignment, e.g. `0-0 1-2 3-4`. A blank line is an
/// empty alignment.
pub fn parse_line(line: &str) -> Result<Vec<(usize, usize)>, ReadError> {
    parse_numbered(line, 1)
}

/// One alignment per line, in sentence order.
pub fn parse_document(input: &str) -> Result<Vec<Vec<(usize, usize)>>, ReadError> {
    input
        .lines()
        .enumerate()
        .map(|(index, line)| parse_numbered(line, index + 1))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line() {
        assert_eq!(
            parse_line("0-0 1-2 3-4 3-5").unwrap(),
            vec![(0, 0), (1, 2), (3, 4), (3, 5)]
        );
        assert_eq!(parse_line("  2-1\r").unwrap(), vec![(2, 1)]);
        assert!(parse_line("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_document() {
        let alignments = parse_document("0-0 1-1\n\n2-0\n").unwrap();
        assert_eq!(alignments, vec![vec![(0, 0), (1, 1)], vec![], vec![(2, 0)]]);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(parse_line("0-0 1_1").is_err());
        match parse_document("0-0\n1-\n").unwrap_err() {
            ReadError::Alignment { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {}", other),
        }
    }
}
