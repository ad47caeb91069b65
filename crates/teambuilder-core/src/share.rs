//! Share links
//!
//! A share link is the page address with the team token as its fragment:
//! `<origin><path>#<token>`. A link without a fragment simply carries no
//! team, which is not an error.

use crate::codec;
use crate::error::{DecodeError, TeamResult};
use crate::layout::Mode;
use crate::types::Team;

/// Builds and parses share links against a fixed base address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareLinkBuilder {
    base: String,
}

impl ShareLinkBuilder {
    /// Use `base` (origin + path) as the link prefix. Any fragment already on
    /// `base` is dropped.
    pub fn new(base: impl Into<String>) -> Self {
        let mut base = base.into();
        if let Some(hash) = base.find('#') {
            base.truncate(hash);
        }
        Self { base }
    }

    /// Join a page origin and path, e.g. `https://example.com` + `/team/`.
    pub fn from_parts(origin: &str, path: &str) -> Self {
        Self::new(format!("{}{}", origin, path))
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// `base#token` for a team.
    pub fn build_url(&self, team: &Team) -> TeamResult<String> {
        let token = codec::encode(team)?;
        Ok(format!("{}#{}", self.base, token))
    }
}

/// Read the team out of a share link.
///
/// Returns `Ok(None)` when the link has no fragment or an empty one.
///
/// # Errors
///
/// Any [`DecodeError`] from a fragment that is present but not a valid token.
pub fn parse_url(url: &str) -> Result<Option<Team>, DecodeError> {
    let fragment = match url.split_once('#') {
        Some((_, fragment)) => fragment.trim(),
        None => return Ok(None),
    };

    if fragment.is_empty() {
        return Ok(None);
    }

    codec::decode(fragment).map(Some)
}

/// Read a team from either a full share link or a bare pasted token.
///
/// Blank input carries no team.
pub fn parse_input(input: &str) -> Result<Option<Team>, DecodeError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }

    if input.contains('#') {
        parse_url(input)
    } else {
        codec::decode(input).map(Some)
    }
}

/// What a share dialog shows next to the code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareSummary {
    pub name: String,
    pub mode: Mode,
    pub character_count: usize,
    pub description: String,
}

impl ShareSummary {
    pub fn of(team: &Team) -> Self {
        Self {
            name: team.name.clone(),
            mode: team.mode(),
            character_count: team.filled_count(),
            description: team.description.clone(),
        }
    }
}
