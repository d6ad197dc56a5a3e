/// Indices of the local extrema of a series, i.e. the interior positions
/// where the first difference changes its sign.
///
/// Flat runs inherit the sign of the preceding slope, so a plateau reports
/// its last sample. A completely flat series reports its middle sample, and
/// series shorter than three values have no extrema.
pub fn get_peaks(values: &[f64]) -> Vec<usize> {
    if values.len() < 3 {
        return Vec::new();
    }
    let mut signs: Vec<i8> = values
        .windows(2)
        .map(|w| sign_of(w[1] - w[0]))
        .collect();
    let Some(first) = signs.iter().copied().find(|&s| s != 0) else {
        return vec![values.len() / 2];
    };
    let mut prev = first;
    for s in signs.iter_mut() {
        if *s == 0 {
            *s = prev;
        } else {
            prev = *s;
        }
    }
    signs
        .windows(2)
        .enumerate()
        .filter(|(_, w)| w[0] != w[1])
        .map(|(i, _)| i + 1)
        .collect()
}

fn sign_of(v: f64) -> i8 {
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_maxima_and_minima() {
        assert_eq!(get_peaks(&[0.0, 2.0, 1.0, -3.0, 0.0]), vec![1, 3]);
        assert_eq!(get_peaks(&[0.0, 1.0, 2.0, 3.0]), Vec::<usize>::new());
    }

    #[test]
    fn plateaus_count_once() {
        assert_eq!(get_peaks(&[0.0, 2.0, 2.0, 2.0, 0.0]), vec![3]);
        assert_eq!(get_peaks(&[1.0, 1.0, 3.0, 0.0]), vec![2]);
    }

    #[test]
    fn degenerate_series() {
        assert_eq!(get_peaks(&[1.0, 1.0, 1.0, 1.0, 1.0]), vec![2]);
        assert!(get_peaks(&[1.0, 2.0]).is_empty());
    }
}
