use std::str::FromStr;

use crate::foundation::error::PixelprintError;
use crate::palette::dominant::Channel;

/// Selectable draw order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawMode {
    /// Original colors, linear order.
    #[default]
    Full,
    /// Red channel only, linear order.
    Red,
    /// Green channel only, linear order.
    Green,
    /// Blue channel only, linear order.
    Blue,
    /// Three passes over the red-, green- and blue-dominant groups.
    Dominant,
    /// One pass per palette cluster, painted in the cluster's center color.
    Palette,
}

impl DrawMode {
    /// Every mode, in cursor-slot order.
    pub const ALL: [Self; 6] = [
        Self::Full,
        Self::Red,
        Self::Green,
        Self::Blue,
        Self::Dominant,
        Self::Palette,
    ];

    pub(crate) const COUNT: usize = Self::ALL.len();

    pub(crate) fn slot(self) -> usize {
        match self {
            Self::Full => 0,
            Self::Red => 1,
            Self::Green => 2,
            Self::Blue => 3,
            Self::Dominant => 4,
            Self::Palette => 5,
        }
    }

    /// Canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Dominant => "dominant",
            Self::Palette => "palette",
        }
    }

    /// `true` for modes that walk a single pixel sequence.
    pub fn is_linear(self) -> bool {
        matches!(self, Self::Full | Self::Red | Self::Green | Self::Blue)
    }

    /// Channel kept by a single-channel mode.
    pub fn channel(self) -> Option<Channel> {
        match self {
            Self::Red => Some(Channel::Red),
            Self::Green => Some(Channel::Green),
            Self::Blue => Some(Channel::Blue),
            _ => None,
        }
    }

    /// Deserialize a mode name, falling back to [`DrawMode::Full`] for unknown or non-string input.
    pub(crate) fn deserialize_lenient<'de, D>(d: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let v = <serde_json::Value as serde::Deserialize>::deserialize(d)?;
        let parsed = v.as_str().and_then(|s| s.parse().ok());
        Ok(parsed.unwrap_or_else(|| {
            tracing::warn!(value = %v, "unknown color mode, using full");
            Self::Full
        }))
    }
}

impl FromStr for DrawMode {
    type Err = PixelprintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| PixelprintError::validation(format!("unknown draw mode '{s}'")))
    }
}

impl std::fmt::Display for DrawMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/mode.rs"]
mod tests;
