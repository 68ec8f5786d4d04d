use crate::foundation::core::PixelIndex;
use crate::foundation::math::{Rng64, shuffle};
use crate::palette::dominant::DominantGroups;

/// Draw-order permutations for every mode.
///
/// Identity orders are implicit: `linear == None` means scan order, `dominant_groups == None`
/// means each group's insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DrawOrders {
    linear: Option<Vec<PixelIndex>>,
    dominant_pass_order: [usize; 3],
    dominant_groups: Option<[Vec<PixelIndex>; 3]>,
    palette_pass_order: Vec<usize>,
    randomized: bool,
}

impl DrawOrders {
    /// Identity orders for an image with `cluster_count` palette clusters.
    pub fn identity(cluster_count: usize) -> Self {
        Self {
            linear: None,
            dominant_pass_order: [0, 1, 2],
            dominant_groups: None,
            palette_pass_order: (0..cluster_count).collect(),
            randomized: false,
        }
    }

    /// Shuffled orders drawn from `rng`.
    ///
    /// Shuffles the linear pixel sequence, the dominant pass order, the pixels inside each
    /// dominant group and the palette cluster order. Cluster membership order is kept.
    pub fn shuffled(
        pixel_count: usize,
        dominant: &DominantGroups,
        cluster_count: usize,
        rng: &mut Rng64,
    ) -> Self {
        let mut linear: Vec<PixelIndex> = (0..pixel_count as u32).map(PixelIndex).collect();
        shuffle(&mut linear, rng);

        let mut dominant_pass_order = [0, 1, 2];
        shuffle(&mut dominant_pass_order, rng);

        let mut groups = dominant.groups().clone();
        for g in &mut groups {
            shuffle(g, rng);
        }

        let mut palette_pass_order: Vec<usize> = (0..cluster_count).collect();
        shuffle(&mut palette_pass_order, rng);

        Self {
            linear: Some(linear),
            dominant_pass_order,
            dominant_groups: Some(groups),
            palette_pass_order,
            randomized: true,
        }
    }

    /// `true` when built by [`DrawOrders::shuffled`].
    pub fn is_randomized(&self) -> bool {
        self.randomized
    }

    /// Linear permutation, or `None` for scan order.
    pub fn linear(&self) -> Option<&[PixelIndex]> {
        self.linear.as_deref()
    }

    /// Dominant group indices (0 red, 1 green, 2 blue) in pass order.
    pub fn dominant_pass_order(&self) -> &[usize; 3] {
        &self.dominant_pass_order
    }

    /// Pixel order inside each dominant group, falling back to `groups` when not shuffled.
    pub fn dominant_groups<'a>(&'a self, groups: &'a DominantGroups) -> &'a [Vec<PixelIndex>; 3] {
        self.dominant_groups.as_ref().unwrap_or(groups.groups())
    }

    /// Palette cluster indices in pass order.
    pub fn palette_pass_order(&self) -> &[usize] {
        &self.palette_pass_order
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/order.rs"]
mod tests;
