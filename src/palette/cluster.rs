use rayon::prelude::*;

use crate::foundation::core::{PixelBuffer, PixelIndex, Rgb8};
use crate::foundation::error::{PixelprintError, PixelprintResult};
use crate::foundation::math::{dist_sq, rounded_mean_u8};

/// Upper bound on the number of pixels used for seeding and reseeding centers.
pub const MAX_SAMPLE: usize = 50_000;
/// Maximum number of assign/update rounds.
pub const MAX_ITERATIONS: usize = 12;

const SEED_STRIDE: usize = 997;
const RESEED_STRIDE: usize = 811;

/// Result of palette clustering: `k` centers plus a membership list per center.
///
/// Membership lists partition all pixel indices; each list is in scan order.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ClusterModel {
    centers: Vec<Rgb8>,
    members: Vec<Vec<PixelIndex>>,
    iterations: usize,
    converged: bool,
    reseeded: Vec<bool>,
}

impl ClusterModel {
    /// Model with no clusters, used for images without pixels.
    pub(crate) fn empty() -> Self {
        Self {
            centers: Vec::new(),
            members: Vec::new(),
            iterations: 0,
            converged: true,
            reseeded: Vec::new(),
        }
    }

    /// Number of clusters (`k`).
    pub fn k(&self) -> usize {
        self.centers.len()
    }

    /// Final center colors, indexed by cluster.
    pub fn centers(&self) -> &[Rgb8] {
        &self.centers
    }

    /// Center color of cluster `c`.
    pub fn center(&self, c: usize) -> Rgb8 {
        self.centers[c]
    }

    /// Membership lists, indexed by cluster.
    pub fn members(&self) -> &[Vec<PixelIndex>] {
        &self.members
    }

    /// Pixel indices assigned to cluster `c`, in scan order.
    pub fn cluster(&self, c: usize) -> &[PixelIndex] {
        &self.members[c]
    }

    /// Assign/update rounds actually executed.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// `true` when the loop stopped because no center moved.
    pub fn converged(&self) -> bool {
        self.converged
    }

    /// `true` when cluster `c` was empty in the last update and got reseeded from the sample.
    pub fn was_reseeded(&self, c: usize) -> bool {
        self.reseeded[c]
    }
}

/// Fixed-stride sample of pixel indices, at most [`MAX_SAMPLE`] entries.
pub(crate) fn sample_indices(total: usize) -> Vec<usize> {
    if total <= MAX_SAMPLE {
        return (0..total).collect();
    }
    let stride = total / MAX_SAMPLE;
    (0..MAX_SAMPLE).map(|i| i * stride).collect()
}

/// Sample position that seeds center `c`.
pub(crate) fn seed_position(c: usize, sample_len: usize) -> usize {
    (c * SEED_STRIDE) % sample_len
}

/// Sample position that reseeds an empty center `c`.
pub(crate) fn reseed_position(c: usize, sample_len: usize) -> usize {
    (c * RESEED_STRIDE) % sample_len
}

#[derive(Clone, Copy, Default)]
struct ClusterAccum {
    r: u64,
    g: u64,
    b: u64,
    count: u64,
}

impl ClusterAccum {
    fn add(&mut self, c: Rgb8) {
        self.r += u64::from(c.r);
        self.g += u64::from(c.g);
        self.b += u64::from(c.b);
        self.count += 1;
    }

    fn mean(&self) -> Option<Rgb8> {
        if self.count == 0 {
            return None;
        }
        Some(Rgb8::new(
            rounded_mean_u8(self.r, self.count),
            rounded_mean_u8(self.g, self.count),
            rounded_mean_u8(self.b, self.count),
        ))
    }
}

fn nearest_center(color: Rgb8, centers: &[Rgb8]) -> u32 {
    let mut best = 0u32;
    let mut best_d = u32::MAX;
    for (c, &center) in centers.iter().enumerate() {
        let d = dist_sq(color, center);
        if d < best_d {
            best_d = d;
            best = c as u32;
        }
    }
    best
}

/// Partition `pixels` into `k` color clusters with bounded k-means in RGB space.
///
/// Seeding is deterministic: center `c` starts at sample entry `(c * 997) mod n`, and an empty
/// cluster is reseeded from sample entry `(c * 811) mod n`. Identical inputs always produce
/// identical models.
///
/// Errors when `k == 0` or the buffer is empty.
#[tracing::instrument(skip(pixels), fields(width = pixels.width(), height = pixels.height()))]
pub fn cluster_palette(pixels: &PixelBuffer, k: usize) -> PixelprintResult<ClusterModel> {
    if k == 0 {
        return Err(PixelprintError::validation("cluster count must be > 0"));
    }
    if pixels.is_empty() {
        return Err(PixelprintError::validation(
            "cannot cluster an empty pixel buffer",
        ));
    }

    let colors: Vec<Rgb8> = pixels.colors().collect();
    let sample = sample_indices(colors.len());
    let sample_color = |pos: usize| colors[sample[pos]];

    let mut centers: Vec<Rgb8> = (0..k)
        .map(|c| sample_color(seed_position(c, sample.len())))
        .collect();
    let mut labels = vec![0u32; colors.len()];
    let mut reseeded = vec![false; k];
    let mut iterations = 0usize;
    let mut converged = false;

    while iterations < MAX_ITERATIONS {
        iterations += 1;

        colors
            .par_iter()
            .map(|&color| nearest_center(color, &centers))
            .collect_into_vec(&mut labels);

        let mut accums = vec![ClusterAccum::default(); k];
        for (&label, &color) in labels.iter().zip(&colors) {
            accums[label as usize].add(color);
        }

        let mut changed = false;
        for (c, acc) in accums.iter().enumerate() {
            let next = match acc.mean() {
                Some(mean) => {
                    reseeded[c] = false;
                    mean
                }
                None => {
                    reseeded[c] = true;
                    sample_color(reseed_position(c, sample.len()))
                }
            };
            if next != centers[c] {
                changed = true;
                centers[c] = next;
            }
        }

        if !changed {
            converged = true;
            break;
        }
    }

    let mut members: Vec<Vec<PixelIndex>> = vec![Vec::new(); k];
    for (idx, &label) in labels.iter().enumerate() {
        members[label as usize].push(PixelIndex(idx as u32));
    }

    tracing::debug!(
        k,
        iterations,
        converged,
        reseeded = reseeded.iter().filter(|&&r| r).count(),
        "palette clustered"
    );

    Ok(ClusterModel {
        centers,
        members,
        iterations,
        converged,
        reseeded,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/palette/cluster.rs"]
mod tests;
