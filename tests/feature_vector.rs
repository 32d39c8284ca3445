// FeatureVector integration tests: histograms of synthetic pixel buffers.
//
// Invariants exercised:
// - Flattening is independent of probing: the same pixels counted with
//   either strategy produce the same feature vector.
// - Similarity of an image with itself is 1; unrelated palettes score 0.
use color_hash::{ColorKey, ColorTable, FeatureVector, ProbeStrategy, TableConfig};

const BPP: u8 = 6;

// Deterministic "image": a gradient whose palette depends on `seed`.
fn pixels(seed: u8, n: usize) -> Vec<(u8, u8, u8)> {
    (0..n)
        .map(|i| {
            let i = i as u8;
            (
                i.wrapping_mul(seed),
                i.wrapping_add(seed),
                (i ^ seed).wrapping_mul(3),
            )
        })
        .collect()
}

fn count(pixels: &[(u8, u8, u8)], strategy: ProbeStrategy) -> ColorTable<ColorKey> {
    // Valid for both strategies.
    let mut table = ColorTable::new(
        TableConfig::new(11)
            .strategy(strategy)
            .growth_threshold(0.4)
            .bits_per_pixel(BPP),
    )
    .unwrap();
    let keys = pixels
        .iter()
        .map(|&(r, g, b)| ColorKey::from_rgb(r, g, b, BPP).unwrap());
    let stats = table.increment_all(keys).unwrap();
    assert_eq!(stats.keys, pixels.len() as u64);
    table
}

#[test]
fn strategies_flatten_identically() {
    let image = pixels(37, 400);
    let linear = FeatureVector::from_table(&count(&image, ProbeStrategy::Linear)).unwrap();
    let quadratic = FeatureVector::from_table(&count(&image, ProbeStrategy::Quadratic)).unwrap();
    assert_eq!(linear, quadratic);
    assert_eq!(linear.counts().iter().sum::<u64>(), 400);
    assert_eq!(linear.len(), 1 << BPP);
}

#[test]
fn self_similarity_is_one() {
    let image = pixels(91, 256);
    let fv = FeatureVector::from_table(&count(&image, ProbeStrategy::Linear)).unwrap();
    let s = fv.cosine_similarity(&fv).unwrap();
    assert!((s - 1.0).abs() < 1e-9, "{s}");
}

#[test]
fn similarity_is_symmetric_and_bounded() {
    let a = FeatureVector::from_table(&count(&pixels(5, 300), ProbeStrategy::Linear)).unwrap();
    let b = FeatureVector::from_table(&count(&pixels(77, 300), ProbeStrategy::Quadratic)).unwrap();
    let ab = a.cosine_similarity(&b).unwrap();
    let ba = b.cosine_similarity(&a).unwrap();
    assert!((ab - ba).abs() < 1e-12);
    assert!((0.0..=1.0 + 1e-12).contains(&ab), "{ab}");
}

#[test]
fn unrelated_palettes_score_zero() {
    let reds = vec![(255u8, 0u8, 0u8); 50];
    let blues = vec![(0u8, 0u8, 255u8); 80];
    let a = FeatureVector::from_table(&count(&reds, ProbeStrategy::Linear)).unwrap();
    let b = FeatureVector::from_table(&count(&blues, ProbeStrategy::Linear)).unwrap();
    assert_eq!(a.cosine_similarity(&b).unwrap(), 0.0);
}
