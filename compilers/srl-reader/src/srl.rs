use srl_protocol::SrlRecord;

use crate::error::ReadError;

/// One SRL record per line, in sentence order. A blank line is a sentence
/// without frames.
pub fn parse_document(input: &str) -> Result<Vec<SrlRecord>, ReadError> {
    input
        .lines()
        .enumerate()
        .map(|(index, line)| match line.trim() {
            "" => Ok(SrlRecord::default()),
            record => serde_json::from_str(record).map_err(|source| ReadError::Json {
                line: index + 1,
                source,
            }),
        })
        .collect()
}
