use super::*;
use crate::render::plan::PaintOp;

struct Fixed {
    passes: Vec<Vec<PixelIndex>>,
    clear: bool,
}

impl PassSource for Fixed {
    fn pass_count(&self) -> usize {
        self.passes.len()
    }

    fn pass(&self, pass: usize) -> &[PixelIndex] {
        &self.passes[pass]
    }

    fn color(&self, pass: usize, _idx: PixelIndex) -> Rgb8 {
        Rgb8::new(pass as u8, 0, 0)
    }

    fn clear_between(&self) -> bool {
        self.clear
    }
}

fn idx(v: &[u32]) -> Vec<PixelIndex> {
    v.iter().copied().map(PixelIndex).collect()
}

fn row(n: u32) -> PixelBuffer {
    let pixels: Vec<[u8; 4]> = (0..n).map(|i| [i as u8, 100, 200, 255]).collect();
    PixelBuffer::from_pixels(n, 1, &pixels).unwrap()
}

fn xs(plan: &FramePlan) -> Vec<u32> {
    plan.ops
        .iter()
        .filter_map(|op| match op {
            PaintOp::Pixel { x, .. } => Some(*x),
            PaintOp::Clear => None,
        })
        .collect()
}

#[test]
fn linear_resumes_across_steps() {
    let img = row(5);
    let mut offset = 0;
    let mut plan = FramePlan::new();
    assert!(!step_linear(&img, None, None, &mut offset, 2, &mut plan));
    assert!(!step_linear(&img, None, None, &mut offset, 2, &mut plan));
    assert!(step_linear(&img, None, None, &mut offset, 2, &mut plan));
    assert_eq!(xs(&plan), vec![0, 1, 2, 3, 4]);
    assert_eq!(offset, 5);

    let before = plan.ops.len();
    assert!(step_linear(&img, None, None, &mut offset, 2, &mut plan));
    assert_eq!(plan.ops.len(), before);
}

#[test]
fn linear_follows_permutation_and_isolates_channel() {
    let img = row(3);
    let order = idx(&[2, 0, 1]);
    let mut offset = 0;
    let mut plan = FramePlan::new();
    step_linear(
        &img,
        Some(&order),
        Some(Channel::Blue),
        &mut offset,
        10,
        &mut plan,
    );
    assert_eq!(xs(&plan), vec![2, 0, 1]);
    assert!(plan.ops.iter().all(|op| matches!(
        op,
        PaintOp::Pixel { rgb, .. } if *rgb == Rgb8::new(0, 0, 200)
    )));
}

#[test]
fn passes_skip_empty_and_complete_on_last_pixel() {
    let img = row(4);
    let src = Fixed {
        passes: vec![idx(&[]), idx(&[3, 1]), idx(&[]), idx(&[0, 2])],
        clear: false,
    };
    let (mut pass, mut pos, mut pending) = (0, 0, false);
    let mut plan = FramePlan::new();

    assert!(!step_passes(&src, &mut pass, &mut pos, &mut pending, 3, &mut plan, &img));
    assert_eq!(xs(&plan), vec![3, 1, 0]);
    assert_eq!(pass_progress(&src, pass, pos), 3);

    assert!(step_passes(&src, &mut pass, &mut pos, &mut pending, 3, &mut plan, &img));
    assert_eq!(xs(&plan), vec![3, 1, 0, 2]);
    assert_eq!(pass_progress(&src, pass, pos), 4);
}

#[test]
fn clear_is_emitted_once_between_non_empty_passes() {
    let img = row(4);
    let src = Fixed {
        passes: vec![idx(&[0, 1]), idx(&[]), idx(&[2, 3])],
        clear: true,
    };
    let (mut pass, mut pos, mut pending) = (0, 0, false);
    let mut plan = FramePlan::new();
    while !step_passes(&src, &mut pass, &mut pos, &mut pending, 1, &mut plan, &img) {}

    assert_eq!(plan.clear_count(), 1);
    assert_eq!(plan.ops[2], PaintOp::Clear);
    assert_eq!(xs(&plan), vec![0, 1, 2, 3]);
    assert!(!matches!(plan.ops.last(), Some(PaintOp::Clear)));
}

#[test]
fn advance_jumps_to_next_pass() {
    let img = row(4);
    let src = Fixed {
        passes: vec![idx(&[0, 1, 2]), idx(&[3])],
        clear: true,
    };
    let (mut pass, mut pos, mut pending) = (0, 0, false);
    let mut plan = FramePlan::new();
    step_passes(&src, &mut pass, &mut pos, &mut pending, 1, &mut plan, &img);

    assert!(!advance_pass(&src, &mut pass, &mut pos, &mut pending));
    assert_eq!((pass, pos), (1, 0));
    assert!(pending);
    assert_eq!(pass_progress(&src, pass, pos), 3);

    assert!(step_passes(&src, &mut pass, &mut pos, &mut pending, 5, &mut plan, &img));
    assert_eq!(xs(&plan), vec![0, 3]);
    assert_eq!(plan.clear_count(), 1);

    assert!(advance_pass(&src, &mut pass, &mut pos, &mut pending));
    assert_eq!(pass, 2);
}

#[test]
fn advancing_an_unpainted_pass_owes_no_clear() {
    let img = row(4);
    let src = Fixed {
        passes: vec![idx(&[0, 1]), idx(&[2]), idx(&[3])],
        clear: true,
    };
    let (mut pass, mut pos, mut pending) = (0, 0, false);
    let mut plan = FramePlan::new();

    assert!(!advance_pass(&src, &mut pass, &mut pos, &mut pending));
    assert_eq!(pass, 1);
    assert!(!pending);

    assert!(!step_passes(&src, &mut pass, &mut pos, &mut pending, 1, &mut plan, &img));
    assert!(step_passes(&src, &mut pass, &mut pos, &mut pending, 1, &mut plan, &img));
    assert_eq!(plan.ops[0], PaintOp::Pixel { x: 2, y: 0, rgb: Rgb8::new(1, 0, 0) });
    assert_eq!(plan.ops[1], PaintOp::Clear);
    assert_eq!(xs(&plan), vec![2, 3]);
    assert_eq!(plan.clear_count(), 1);
}
