use crate::{
    error::{AppError, AppResult, ArtifactKind, ContentVerdict, LoadError},
    models::{Catalog, MovieRecord, SimilarityMatrix},
};

/// How many leading bytes are inspected when sniffing a payload
const SNIFF_WINDOW: usize = 512;

/// Classifies a payload so decode failures can say what actually arrived
///
/// Hosting providers that hit an auth or quota wall tend to answer with an
/// HTML page and a 200, which then reaches the decoder in place of the blob.
pub fn sniff(bytes: &[u8]) -> ContentVerdict {
    if bytes.is_empty() {
        return ContentVerdict::Empty;
    }

    let head = &bytes[..bytes.len().min(SNIFF_WINDOW)];

    // A bare 0x3C is also the low byte of a length prefix of 60
    let start = head.iter().position(|b| !b.is_ascii_whitespace());
    if let Some(start) = start {
        if let [b'<', next, ..] = &head[start..] {
            if next.is_ascii_alphabetic() || matches!(*next, b'!' | b'?' | b'/') {
                return ContentVerdict::Markup;
            }
        }
    }

    let lowered = head.to_ascii_lowercase();
    if contains(&lowered, b"<html") || contains(&lowered, b"<!doctype") {
        return ContentVerdict::Markup;
    }

    // A multi-byte character cut at the window edge still counts as text
    let text_prefix = match std::str::from_utf8(head) {
        Ok(text) => Some(text),
        Err(e) if e.error_len().is_none() => std::str::from_utf8(&head[..e.valid_up_to()]).ok(),
        Err(_) => None,
    };

    match text_prefix {
        Some(text) if !text.chars().any(|c| c.is_control() && !c.is_whitespace()) => {
            ContentVerdict::Text
        }
        _ => ContentVerdict::Binary,
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|window| window == needle)
}

/// Decodes with bincode, sniffing the payload only to explain a failure
///
/// Sniffing never gates decoding: the leading length prefix of a valid
/// artifact can itself look like a tag opener.
fn decode<T: serde::de::DeserializeOwned>(kind: ArtifactKind, bytes: &[u8]) -> Result<T, LoadError> {
    if bytes.is_empty() {
        return Err(LoadError::Malformed {
            kind,
            byte_len: 0,
            verdict: ContentVerdict::Empty,
            reason: "nothing to decode".to_string(),
        });
    }

    bincode::deserialize(bytes).map_err(|e| LoadError::Malformed {
        kind,
        byte_len: bytes.len(),
        verdict: sniff(bytes),
        reason: e.to_string(),
    })
}

/// Decodes a catalog artifact
pub fn decode_catalog(bytes: &[u8]) -> Result<Catalog, LoadError> {
    let records: Vec<MovieRecord> = decode(ArtifactKind::Catalog, bytes)?;
    Ok(Catalog::new(records))
}

/// Decodes a similarity matrix artifact and checks that it is square and finite
pub fn decode_matrix(bytes: &[u8]) -> Result<SimilarityMatrix, LoadError> {
    let rows: Vec<Vec<f64>> = decode(ArtifactKind::SimilarityMatrix, bytes)?;
    SimilarityMatrix::from_rows(rows).map_err(|reason| LoadError::Shape {
        kind: ArtifactKind::SimilarityMatrix,
        reason,
    })
}

/// Encodes catalog records in the artifact format
pub fn encode_catalog(records: &[MovieRecord]) -> AppResult<Vec<u8>> {
    bincode::serialize(records)
        .map_err(|e| AppError::Internal(format!("Catalog encoding error: {}", e)))
}

/// Encodes a similarity matrix in the artifact format
pub fn encode_matrix(matrix: &SimilarityMatrix) -> AppResult<Vec<u8>> {
    bincode::serialize(&matrix.to_rows())
        .map_err(|e| AppError::Internal(format!("Matrix encoding error: {}", e)))
}
