use nom::{
    bytes::complete::take_till1,
    character::complete::{char, u32 as decimal},
    combinator::all_consuming,
    multi::separated_list1,
    sequence::separated_pair,
    IResult,
};
use srl_protocol::{Token, TokenId};

use crate::error::ReadError;

const COLUMNS: usize = 10;

fn field(input: &str) -> IResult<&str, &str> {
    take_till1(|c| c == '\t')(input)
}

fn columns(input: &str) -> IResult<&str, Vec<&str>> {
    separated_list1(char('\t'), field)(input)
}

fn feature(input: &str) -> IResult<&str, (&str, &str)> {
    separated_pair(
        take_till1(|c| c == '='),
        char('='),
        take_till1(|c| c == '|'),
    )(input)
}

fn features(input: &str) -> IResult<&str, Vec<(&str, &str)>> {
    separated_list1(char('|'), feature)(input)
}

fn optional(column: &str) -> Option<String> {
    match column {
        "_" => None,
        value => Some(value.to_string()),
    }
}

fn number(column: &str, name: &str, line: usize) -> Result<u32, ReadError> {
    all_consuming(decimal::<&str, nom::error::Error<&str>>)(column)
        .map(|(_, value)| value)
        .map_err(|_| ReadError::Conllu {
            line,
            message: format!("{} column is not a number: {:?}", name, column),
        })
}

/// Parses one token row. Multi-word ranges (`1-2`) and empty nodes (`1.1`)
/// yield `None`.
pub fn parse_row(row: &str, line: usize) -> Result<Option<Token>, ReadError> {
    let (_, cols) = all_consuming(columns)(row).map_err(|_| ReadError::Conllu {
        line,
        message: "empty column".to_string(),
    })?;
    if cols.len() != COLUMNS {
        return Err(ReadError::Conllu {
            line,
            message: format!("expected {} columns, found {}", COLUMNS, cols.len()),
        });
    }
    if cols[0].contains(['-', '.']) {
        return Ok(None);
    }

    let feats = match cols[5] {
        "_" => Vec::new(),
        raw => all_consuming(features)(raw)
            .map(|(_, pairs)| {
                pairs
                    .into_iter()
                    .map(|(name, value)| (name.to_string(), value.to_string()))
                    .collect()
            })
            .map_err(|_| ReadError::Conllu {
                line,
                message: format!("malformed features: {:?}", raw),
            })?,
    };

    Ok(Some(Token {
        id: TokenId(number(cols[0], "id", line)?),
        form: cols[1].to_string(),
        lemma: optional(cols[2]),
        upos: optional(cols[3]),
        xpos: optional(cols[4]),
        feats,
        head: TokenId(number(cols[6], "head", line)?),
        deprel: cols[7].to_string(),
        deps: optional(cols[8]),
        misc: optional(cols[9]),
    }))
}

/// Splits a CoNLL-U document into sentences of tokens.
pub fn parse_document(input: &str) -> Result<Vec<Vec<Token>>, ReadError> {
    let mut sentences = Vec::new();
    let mut current = Vec::new();

    for (index, raw) in input.lines().enumerate() {
        let row = raw.trim_end_matches('\r');
        if row.trim().is_empty() {
            if !current.is_empty() {
                sentences.push(std::mem::take(&mut current));
            }
            continue;
        }
        if row.starts_with('#') {
            continue;
        }
        if let Some(token) = parse_row(row, index + 1)? {
            current.push(token);
        }
    }
    if !current.is_empty() {
        sentences.push(current);
    }

    Ok(sentences)
}
