//! Share tokens for teams
//!
//! A team is shared as a single opaque token that can sit in a URL fragment
//! or be pasted by hand. The token is built in three layers:
//!
//! 1. a compact JSON record `{"n":name,"d":description,"m":mode,"t":parties}`
//!    where `t` holds one array per party and `null` for empty slots,
//! 2. percent-encoding with the `encodeURIComponent` unreserved set, which
//!    turns arbitrary Unicode into plain ASCII,
//! 3. standard padded base64.
//!
//! Tokens produced here are byte-identical to the ones the browser builder
//! emits (`btoa(encodeURIComponent(JSON.stringify(record)))`), so links made
//! there keep working.
//!
//! Decoding is lenient about the grid: a party array that is too short or
//! too long for the mode is padded or cut to the layout instead of failing,
//! and a flat list of ids loads the same as nested parties.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, PAD};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DecodeError, TeamError};
use crate::layout::Mode;
use crate::types::{CharacterId, Team};

/// Characters `encodeURIComponent` leaves untouched
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Padded on encode, padding optional on decode (hand-copied tokens lose it)
const TOKEN_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    PAD.with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Wire record, field order is the canonical key order
#[derive(Serialize)]
struct EncodedTeam<'a> {
    n: &'a str,
    d: &'a str,
    m: &'static str,
    t: Vec<&'a [Option<CharacterId>]>,
}

/// Wire record as read back. Fields stay loosely typed so hand-edited
/// tokens load as far as possible.
#[derive(Deserialize)]
struct IncomingTeam {
    #[serde(default)]
    n: Value,
    #[serde(default)]
    d: Value,
    #[serde(default)]
    m: Value,
    #[serde(default)]
    t: Value,
}

/// Encode a team as a share token.
///
/// # Errors
///
/// Returns `TeamError::Serialization` if the record cannot be written as JSON.
pub fn encode(team: &Team) -> Result<String, TeamError> {
    let record = EncodedTeam {
        n: &team.name,
        d: &team.description,
        m: team.mode().tag(),
        t: team.parties().collect(),
    };

    let json = serde_json::to_string(&record)
        .map_err(|e| TeamError::Serialization(format!("Failed to encode team: {}", e)))?;

    Ok(wrap_json(&json))
}

/// Decode a share token back into a team.
///
/// Slot ids are kept exactly as found; resolving them against the catalog is
/// the caller's job.
///
/// # Errors
///
/// - `DecodeError::MalformedToken` if the text layers or the JSON are invalid
/// - `DecodeError::MissingFields` if the mode or party grid is absent
/// - `DecodeError::UnknownMode` if the mode tag is not recognised
pub fn decode(token: &str) -> Result<Team, DecodeError> {
    let json = unwrap_token(token)?;

    let record: Value = serde_json::from_str(&json).map_err(|e| {
        tracing::debug!(error = %e, "Rejected team token");
        DecodeError::MalformedToken(format!("Invalid team record: {}", e))
    })?;
    if !record.is_object() {
        return Err(DecodeError::MalformedToken(
            "Team record is not an object".to_string(),
        ));
    }
    let incoming: IncomingTeam = serde_json::from_value(record)
        .map_err(|e| DecodeError::MalformedToken(format!("Invalid team record: {}", e)))?;

    let tag = match incoming.m {
        Value::Null => None,
        Value::String(tag) if tag.is_empty() => None,
        Value::String(tag) => Some(tag),
        other => return Err(DecodeError::UnknownMode(other.to_string())),
    };
    let (tag, grid) = match (tag, incoming.t) {
        (Some(tag), grid) if !grid.is_null() => (tag, grid),
        _ => return Err(DecodeError::MissingFields),
    };

    let mode = Mode::from_tag(&tag).ok_or(DecodeError::UnknownMode(tag))?;

    let Value::Array(grid) = grid else {
        return Err(DecodeError::MalformedToken(
            "Party grid is not a list".to_string(),
        ));
    };

    // One level of nesting is flattened: party arrays are spliced in and
    // bare entries count as single slots.
    let entries: Vec<Value> = grid
        .into_iter()
        .flat_map(|entry| match entry {
            Value::Array(party) => party,
            single => vec![single],
        })
        .collect();

    let expected = mode.layout().total_slots;
    if entries.len() != expected {
        tracing::debug!(
            mode = %mode,
            expected,
            found = entries.len(),
            "Fitting decoded party grid to layout"
        );
    }

    Ok(
        Team::from_slots(mode, entries.into_iter().map(slot_from_value))
            .with_name(text_field(incoming.n))
            .with_description(text_field(incoming.d)),
    )
}

/// Apply the token text layers to a JSON string (percent-encode, then base64).
pub fn wrap_json(json: &str) -> String {
    let ascii = utf8_percent_encode(json, URI_COMPONENT).to_string();
    TOKEN_ENGINE.encode(ascii.as_bytes())
}

/// Strip the token text layers, returning the JSON text inside.
///
/// # Errors
///
/// Returns `DecodeError::MalformedToken` for empty input, invalid base64, or
/// percent-decoded bytes that are not UTF-8.
pub fn unwrap_token(token: &str) -> Result<String, DecodeError> {
    let token = token.trim();
    if token.is_empty() {
        return Err(DecodeError::MalformedToken("Empty token".to_string()));
    }

    let bytes = TOKEN_ENGINE
        .decode(token)
        .map_err(|e| DecodeError::MalformedToken(format!("Invalid base64: {}", e)))?;

    let ascii = String::from_utf8(bytes)
        .map_err(|_| DecodeError::MalformedToken("Token is not text".to_string()))?;

    percent_decode_str(&ascii)
        .decode_utf8()
        .map(|json| json.into_owned())
        .map_err(|e| DecodeError::MalformedToken(format!("Invalid UTF-8: {}", e)))
}

/// Name and description are free text; anything that is not a string reads as empty.
fn text_field(value: Value) -> String {
    match value {
        Value::String(text) => text,
        _ => String::new(),
    }
}

/// One decoded grid entry. Strings are ids, numbers are read as ids,
/// everything else is an empty slot.
fn slot_from_value(value: Value) -> Option<CharacterId> {
    match value {
        Value::String(s) if !s.is_empty() => Some(CharacterId::new(s)),
        Value::Number(n) => Some(CharacterId::new(n.to_string())),
        _ => None,
    }
}
