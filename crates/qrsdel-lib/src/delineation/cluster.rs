/// Maximum number of Lloyd iterations.
const MAX_ITER: usize = 10;

/// Scales every feature to unit variance. Constant features are left as is.
pub fn whiten(features: &[[f64; 2]]) -> Vec<[f64; 2]> {
    let n = features.len() as f64;
    let mut std = [1.0; 2];
    for (d, s) in std.iter_mut().enumerate() {
        let mean = features.iter().map(|f| f[d]).sum::<f64>() / n;
        let var = features.iter().map(|f| (f[d] - mean).powi(2)).sum::<f64>() / n;
        if var > 0.0 {
            *s = var.sqrt();
        }
    }
    features
        .iter()
        .map(|f| [f[0] / std[0], f[1] / std[1]])
        .collect()
}

/// Splits `[log-slope, distance]` descriptors into a steep/near class and a
/// flat/far class, returning `true` for members of the steep/near one.
///
/// Features are whitened, then the centroids are seeded at the opposite
/// corners of the feature space (`[min slope, max distance]` and
/// `[max slope, min distance]`) so the result is deterministic.
pub fn steep_segments(features: &[[f64; 2]]) -> Vec<bool> {
    if features.is_empty() {
        return Vec::new();
    }
    let data = whiten(features);
    let (mut lo, mut hi) = ([f64::INFINITY; 2], [f64::NEG_INFINITY; 2]);
    for f in &data {
        for d in 0..2 {
            lo[d] = lo[d].min(f[d]);
            hi[d] = hi[d].max(f[d]);
        }
    }
    let mut centroids = [[lo[0], hi[1]], [hi[0], lo[1]]];
    let mut labels = assign(&data, &centroids);
    for _ in 0..MAX_ITER {
        for (c, centroid) in centroids.iter_mut().enumerate() {
            let members: Vec<&[f64; 2]> = data
                .iter()
                .zip(&labels)
                .filter(|(_, &l)| l == c)
                .map(|(f, _)| f)
                .collect();
            // Empty clusters keep their previous centroid.
            if !members.is_empty() {
                let m = members.len() as f64;
                *centroid = [
                    members.iter().map(|f| f[0]).sum::<f64>() / m,
                    members.iter().map(|f| f[1]).sum::<f64>() / m,
                ];
            }
        }
        let next = assign(&data, &centroids);
        if next == labels {
            break;
        }
        labels = next;
    }
    labels.into_iter().map(|l| l == 1).collect()
}

fn assign(data: &[[f64; 2]], centroids: &[[f64; 2]; 2]) -> Vec<usize> {
    data.iter()
        .map(|f| {
            let d0 = dist2(f, &centroids[0]);
            let d1 = dist2(f, &centroids[1]);
            usize::from(d1 < d0)
        })
        .collect()
}

fn dist2(a: &[f64; 2], b: &[f64; 2]) -> f64 {
    (a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2)
}
