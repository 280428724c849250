//! State token codec: `GameState` -> bincode -> zlib -> lowercase hex, and back.
//!
//! The token is embedded in the rendered message between the opening pair of
//! triple back-ticks, in front of the `[title]` header.

use std::io::{Read, Write};

use bincode::Options;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::config::MAX_STATE_BYTES;
use crate::domain::GameState;

const FENCE: &str = "```";

/// Why a token could not be turned back into a [`GameState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Not valid hex.
    Hex(String),
    /// Not a valid zlib stream.
    Inflate(String),
    /// Inflated bytes are not a state record.
    Format(String),
    /// Inflated payload exceeds [`MAX_STATE_BYTES`].
    TooLarge,
    /// Message text has no fenced token block.
    MissingBlock,
    /// The state could not be serialized.
    Encode(String),
}

impl core::fmt::Display for CodecError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CodecError::Hex(e) => write!(f, "token is not hex: {}", e),
            CodecError::Inflate(e) => write!(f, "token does not inflate: {}", e),
            CodecError::Format(e) => write!(f, "token is not a game state: {}", e),
            CodecError::TooLarge => write!(f, "token exceeds {} bytes", MAX_STATE_BYTES),
            CodecError::MissingBlock => write!(f, "message carries no state block"),
            CodecError::Encode(e) => write!(f, "state could not be encoded: {}", e),
        }
    }
}

impl std::error::Error for CodecError {}

fn wire() -> impl Options {
    bincode::DefaultOptions::new().with_limit(MAX_STATE_BYTES)
}

/// Encode a state into its printable token.
pub fn encode(state: &GameState) -> Result<String, CodecError> {
    let bytes = wire()
        .serialize(state)
        .map_err(|e| CodecError::Encode(e.to_string()))?;
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::best());
    encoder
        .write_all(&bytes)
        .map_err(|e| CodecError::Encode(e.to_string()))?;
    let packed = encoder
        .finish()
        .map_err(|e| CodecError::Encode(e.to_string()))?;
    Ok(hex::encode(packed))
}

/// Decode a token produced by [`encode`].
pub fn decode(token: &str) -> Result<GameState, CodecError> {
    let packed = hex::decode(token.trim()).map_err(|e| CodecError::Hex(e.to_string()))?;
    let mut bytes = Vec::new();
    ZlibDecoder::new(packed.as_slice())
        .take(MAX_STATE_BYTES + 1)
        .read_to_end(&mut bytes)
        .map_err(|e| CodecError::Inflate(e.to_string()))?;
    if bytes.len() as u64 > MAX_STATE_BYTES {
        return Err(CodecError::TooLarge);
    }
    wire()
        .deserialize(&bytes)
        .map_err(|e| CodecError::Format(e.to_string()))
}

/// The token inside a rendered message: text between the first pair of
/// fences, cut at the first `[`.
pub fn extract_token(content: &str) -> Result<&str, CodecError> {
    let start = content.find(FENCE).ok_or(CodecError::MissingBlock)? + FENCE.len();
    let rest = &content[start..];
    let end = rest.find(FENCE).ok_or(CodecError::MissingBlock)?;
    let block = &rest[..end];
    let token = block.split('[').next().unwrap_or(block).trim();
    if token.is_empty() {
        return Err(CodecError::MissingBlock);
    }
    Ok(token)
}

/// Decode either a full rendered message or a bare token.
pub fn decode_message(content: &str) -> Result<GameState, CodecError> {
    if content.contains(FENCE) {
        decode(extract_token(content)?)
    } else {
        decode(content)
    }
}

/// Wrap a token and a header into the fenced block that opens a message.
pub fn fence(token: &str, title: &str, header: &str) -> String {
    format!("{FENCE}{token}\n[{title}]{header}{FENCE}")
}
