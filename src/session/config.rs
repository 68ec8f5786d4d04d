use std::time::Duration;

use serde::Deserialize;

use crate::schedule::mode::DrawMode;

/// Default pixels emitted per frame.
pub const DEFAULT_PIXELS_PER_FRAME: i64 = 10;
/// Default delay between frames, in milliseconds.
pub const DEFAULT_FRAME_DELAY_MS: i64 = 50;
/// Default palette cluster count.
pub const DEFAULT_PALETTE_COUNT: i64 = 20;

/// Host-supplied print settings, read live on every frame.
///
/// Integer fields hold the raw host value. Values that are non-positive or not numeric are
/// clamped by the accessors, never rejected.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PrintConfig {
    /// Pixels emitted per frame. Falls back to 1 when invalid.
    #[serde(deserialize_with = "lenient_int")]
    pub pixels_per_frame: i64,
    /// Delay between frames in milliseconds. Falls back to 50 when invalid.
    #[serde(deserialize_with = "lenient_int")]
    pub frame_delay: i64,
    /// Active draw mode.
    #[serde(deserialize_with = "DrawMode::deserialize_lenient")]
    pub color_mode: DrawMode,
    /// Requested palette cluster count. Falls back to 20 when invalid.
    #[serde(deserialize_with = "lenient_int")]
    pub palette_count: i64,
    /// Shuffle draw orders.
    pub random_order: bool,
    /// Clear the surface between palette clusters.
    pub clear_between: bool,
    /// Shuffle seed; `None` derives one from the clock.
    pub seed: Option<u64>,
}

impl Default for PrintConfig {
    fn default() -> Self {
        Self {
            pixels_per_frame: DEFAULT_PIXELS_PER_FRAME,
            frame_delay: DEFAULT_FRAME_DELAY_MS,
            color_mode: DrawMode::Full,
            palette_count: DEFAULT_PALETTE_COUNT,
            random_order: false,
            clear_between: false,
            seed: None,
        }
    }
}

impl PrintConfig {
    /// Pixels per frame, at least 1.
    pub fn pixels_per_frame(&self) -> usize {
        usize::try_from(self.pixels_per_frame)
            .ok()
            .filter(|&n| n > 0)
            .unwrap_or(1)
    }

    /// Delay to wait before the next frame.
    pub fn frame_delay(&self) -> Duration {
        let ms = u64::try_from(self.frame_delay)
            .ok()
            .filter(|&ms| ms > 0)
            .unwrap_or(DEFAULT_FRAME_DELAY_MS as u64);
        Duration::from_millis(ms)
    }

    /// Palette cluster count, at least 1.
    pub fn palette_count(&self) -> usize {
        usize::try_from(self.palette_count)
            .ok()
            .filter(|&k| k > 0)
            .unwrap_or(DEFAULT_PALETTE_COUNT as usize)
    }

    /// Parse a JSON config document.
    pub fn from_json(s: &str) -> crate::PixelprintResult<Self> {
        Ok(serde_json::from_str(s)?)
    }
}

/// Leading-integer parse: `"12px"` is 12, `"3.9"` is 3, `"abc"` is `None`.
fn parse_int_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (sign, digits) = match s.as_bytes().first() {
        Some(b'-') => (-1, &s[1..]),
        Some(b'+') => (1, &s[1..]),
        _ => (1, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|v| sign * v)
}

fn int_from_value(v: &serde_json::Value) -> Option<i64> {
    match v {
        serde_json::Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        serde_json::Value::String(s) => parse_int_prefix(s),
        _ => None,
    }
}

fn lenient_int<'de, D>(d: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let v = serde_json::Value::deserialize(d)?;
    Ok(int_from_value(&v).unwrap_or_else(|| {
        tracing::warn!(value = %v, "non-numeric config value, clamping to fallback");
        0
    }))
}

#[cfg(test)]
#[path = "../../tests/unit/session/config.rs"]
mod tests;
