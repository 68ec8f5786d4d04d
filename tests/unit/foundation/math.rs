use super::*;

#[test]
fn rng_is_deterministic() {
    let mut a = Rng64::new(123);
    let mut b = Rng64::new(123);
    for _ in 0..10 {
        assert_eq!(a.next_u64(), b.next_u64());
    }
}

#[test]
fn next_below_stays_in_range() {
    let mut rng = Rng64::new(9);
    for bound in 1..50 {
        assert!(rng.next_below(bound) < bound);
    }
}

#[test]
fn shuffle_is_a_permutation() {
    let mut v: Vec<u32> = (0..100).collect();
    shuffle(&mut v, &mut Rng64::new(42));
    assert_ne!(v, (0..100).collect::<Vec<_>>());
    let mut sorted = v.clone();
    sorted.sort_unstable();
    assert_eq!(sorted, (0..100).collect::<Vec<_>>());
}

#[test]
fn rounded_mean_rounds_half_up() {
    assert_eq!(rounded_mean_u8(3, 2), 2);
    assert_eq!(rounded_mean_u8(5, 4), 1);
    assert_eq!(rounded_mean_u8(255 * 3, 3), 255);
}

#[test]
fn dist_sq_is_symmetric() {
    let a = Rgb8::new(0, 10, 255);
    let b = Rgb8::new(3, 6, 250);
    assert_eq!(dist_sq(a, b), 9 + 16 + 25);
    assert_eq!(dist_sq(a, b), dist_sq(b, a));
}
