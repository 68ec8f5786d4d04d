use crate::foundation::core::{PixelBuffer, PixelIndex, Rgb8};

/// RGB channel that dominates a pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// Red channel (group 0).
    Red,
    /// Green channel (group 1).
    Green,
    /// Blue channel (group 2).
    Blue,
}

impl Channel {
    /// All channels in group-index order.
    pub const ALL: [Self; 3] = [Self::Red, Self::Green, Self::Blue];

    /// Group index of this channel.
    pub fn index(self) -> usize {
        match self {
            Self::Red => 0,
            Self::Green => 1,
            Self::Blue => 2,
        }
    }

    /// Dominant channel of `c`. Ties resolve toward red, then green.
    pub fn dominant(c: Rgb8) -> Self {
        if c.r >= c.g && c.r >= c.b {
            Self::Red
        } else if c.g >= c.b {
            Self::Green
        } else {
            Self::Blue
        }
    }

    /// Keep only this channel of `c`, zeroing the others.
    pub fn isolate(self, c: Rgb8) -> Rgb8 {
        match self {
            Self::Red => Rgb8::new(c.r, 0, 0),
            Self::Green => Rgb8::new(0, c.g, 0),
            Self::Blue => Rgb8::new(0, 0, c.b),
        }
    }
}

/// Pixels partitioned by dominant channel, each group in scan order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DominantGroups {
    groups: [Vec<PixelIndex>; 3],
}

impl DominantGroups {
    /// Partition every pixel of `pixels` by its dominant channel.
    pub fn from_pixels(pixels: &PixelBuffer) -> Self {
        let mut groups: [Vec<PixelIndex>; 3] = Default::default();
        for (idx, color) in pixels.colors().enumerate() {
            groups[Channel::dominant(color).index()].push(PixelIndex(idx as u32));
        }
        Self { groups }
    }

    /// Pixels dominated by `channel`.
    pub fn group(&self, channel: Channel) -> &[PixelIndex] {
        &self.groups[channel.index()]
    }

    /// All three groups in red, green, blue order.
    pub fn groups(&self) -> &[Vec<PixelIndex>; 3] {
        &self.groups
    }

    /// Total number of pixels across the groups.
    pub fn len(&self) -> usize {
        self.groups.iter().map(Vec::len).sum()
    }

    /// `true` when no pixels were grouped.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/palette/dominant.rs"]
mod tests;
