use super::*;

fn gradient(width: u32, height: u32) -> PixelBuffer {
    let mut data = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            data.extend_from_slice(&[
                (x * 255 / width.max(1)) as u8,
                (y * 255 / height.max(1)) as u8,
                ((x * 7 + y * 13) % 256) as u8,
                255,
            ]);
        }
    }
    PixelBuffer::new(width, height, data).unwrap()
}

fn assert_partition(model: &ClusterModel, total: usize) {
    let mut seen = vec![false; total];
    for list in model.members() {
        for idx in list {
            assert!(!seen[idx.0 as usize], "pixel {} assigned twice", idx.0);
            seen[idx.0 as usize] = true;
        }
    }
    assert!(seen.iter().all(|&s| s), "some pixel has no cluster");
}

#[test]
fn rejects_zero_k_and_empty_buffer() {
    let img = gradient(2, 2);
    assert!(cluster_palette(&img, 0).is_err());
    let empty = PixelBuffer::new(0, 0, Vec::new()).unwrap();
    assert!(cluster_palette(&empty, 3).is_err());
}

#[test]
fn two_color_image_splits_cleanly() {
    let img = PixelBuffer::from_pixels(2, 1, &[[10, 200, 10, 255], [200, 10, 10, 255]]).unwrap();
    let model = cluster_palette(&img, 2).unwrap();
    assert_eq!(model.k(), 2);
    assert_eq!(model.centers(), &[Rgb8::new(10, 200, 10), Rgb8::new(200, 10, 10)]);
    assert_eq!(model.cluster(0), &[PixelIndex(0)]);
    assert_eq!(model.cluster(1), &[PixelIndex(1)]);
    assert!(model.converged());
    assert_eq!(model.iterations(), 1);
}

#[test]
fn memberships_partition_all_pixels() {
    let img = gradient(37, 23);
    for k in [1, 2, 5, 20] {
        let model = cluster_palette(&img, k).unwrap();
        assert_eq!(model.k(), k);
        assert_partition(&model, img.pixel_count());
        for list in model.members() {
            assert!(list.windows(2).all(|w| w[0] < w[1]), "members not in scan order");
        }
    }
}

#[test]
fn converged_centers_are_member_means() {
    let bases = [[20u8, 20, 20], [230, 30, 30], [30, 230, 30], [30, 30, 230]];
    let pixels: Vec<[u8; 4]> = (0..256usize)
        .map(|i| {
            let base = bases[i % 4];
            let noise = ((i / 4) % 5) as u8;
            [base[0] + noise, base[1] + noise, base[2] + noise, 255]
        })
        .collect();
    let img = PixelBuffer::from_pixels(16, 16, &pixels).unwrap();
    let model = cluster_palette(&img, 4).unwrap();
    assert!(model.converged());
    for c in 0..model.k() {
        if model.was_reseeded(c) {
            continue;
        }
        let list = model.cluster(c);
        let n = list.len() as u64;
        let (mut r, mut g, mut b) = (0u64, 0u64, 0u64);
        for &idx in list {
            let px = img.rgb(idx);
            r += u64::from(px.r);
            g += u64::from(px.g);
            b += u64::from(px.b);
        }
        assert_eq!(
            model.center(c),
            Rgb8::new(
                rounded_mean_u8(r, n),
                rounded_mean_u8(g, n),
                rounded_mean_u8(b, n)
            )
        );
    }
}

#[test]
fn clustering_is_deterministic() {
    let img = gradient(40, 30);
    let a = cluster_palette(&img, 6).unwrap();
    let b = cluster_palette(&img, 6).unwrap();
    assert_eq!(a, b);
}

#[test]
fn more_clusters_than_pixels_reseeds_empty_clusters() {
    let img = PixelBuffer::from_pixels(1, 1, &[[9, 8, 7, 255]]).unwrap();
    let model = cluster_palette(&img, 3).unwrap();
    assert_eq!(model.cluster(0), &[PixelIndex(0)]);
    assert!(model.cluster(1).is_empty());
    assert!(model.cluster(2).is_empty());
    assert!(model.was_reseeded(1));
    assert!(model.was_reseeded(2));
    assert!(!model.was_reseeded(0));
    assert_eq!(model.center(2), Rgb8::new(9, 8, 7));
    assert_partition(&model, 1);
}

#[test]
fn seed_and_reseed_positions_use_their_strides() {
    assert_eq!(
        (0..3).map(|c| seed_position(c, 7)).collect::<Vec<_>>(),
        [0, 3, 6]
    );
    assert_eq!(
        (0..3).map(|c| reseed_position(c, 7)).collect::<Vec<_>>(),
        [0, 6, 5]
    );
}

#[test]
fn duplicate_seed_is_reseeded_from_its_stride_position() {
    const A: [u8; 4] = [10, 10, 10, 255];
    const B: [u8; 4] = [200, 20, 20, 255];
    const C: [u8; 4] = [20, 20, 200, 255];
    // Centers start at pixels 0, 3 and 6, so clusters 1 and 2 both start on C. Cluster 2 ends
    // up empty and is reseeded from pixel 5, the only B pixel.
    let img = PixelBuffer::from_pixels(7, 1, &[A, A, A, C, A, B, C]).unwrap();
    let model = cluster_palette(&img, 3).unwrap();

    assert_eq!(
        model.centers(),
        &[
            Rgb8::new(10, 10, 10),
            Rgb8::new(20, 20, 200),
            Rgb8::new(200, 20, 20)
        ]
    );
    let ids = |v: &[u32]| v.iter().map(|&i| PixelIndex(i)).collect::<Vec<_>>();
    assert_eq!(model.cluster(0), ids(&[0, 1, 2, 4]).as_slice());
    assert_eq!(model.cluster(1), ids(&[3, 6]).as_slice());
    assert_eq!(model.cluster(2), ids(&[5]).as_slice());
    assert!(model.converged());
    assert_eq!(model.iterations(), 3);
}

#[test]
fn sample_uses_fixed_stride_above_limit() {
    assert_eq!(sample_indices(10), (0..10).collect::<Vec<_>>());
    assert_eq!(sample_indices(MAX_SAMPLE).len(), MAX_SAMPLE);

    let s = sample_indices(MAX_SAMPLE * 2 + 1);
    assert_eq!(s.len(), MAX_SAMPLE);
    assert_eq!(s[1], 2);
    assert_eq!(*s.last().unwrap(), (MAX_SAMPLE - 1) * 2);
}
