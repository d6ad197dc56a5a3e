use crate::constants::Constants;
use crate::error::InconsistencyError;
use crate::model::{QrsShape, Wave};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// The closed set of recognized QRS shapes.
///
/// Names follow the European Heart Journal (1985) measurement standards:
/// upper case letters for large deflections, lower case for small ones.
#[allow(non_camel_case_types, clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QrsTag {
    R,
    r,
    RS,
    Rs,
    rs,
    RSR,
    rsr,
    RsR,
    RrS,
    RR,
    Rr,
    rr,
    Q,
    Qr,
    QS,
    qRs,
    QRs,
    rS,
    rSr,
    rR,
    qR,
    QR,
    qr,
    Qs,
    qS,
    QrS,
    rsR,
}

impl QrsTag {
    pub const ALL: [QrsTag; 27] = [
        QrsTag::R,
        QrsTag::r,
        QrsTag::RS,
        QrsTag::Rs,
        QrsTag::rs,
        QrsTag::RSR,
        QrsTag::rsr,
        QrsTag::RsR,
        QrsTag::RrS,
        QrsTag::RR,
        QrsTag::Rr,
        QrsTag::rr,
        QrsTag::Q,
        QrsTag::Qr,
        QrsTag::QS,
        QrsTag::qRs,
        QrsTag::QRs,
        QrsTag::rS,
        QrsTag::rSr,
        QrsTag::rR,
        QrsTag::qR,
        QrsTag::QR,
        QrsTag::qr,
        QrsTag::Qs,
        QrsTag::qS,
        QrsTag::QrS,
        QrsTag::rsR,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QrsTag::R => "R",
            QrsTag::r => "r",
            QrsTag::RS => "RS",
            QrsTag::Rs => "Rs",
            QrsTag::rs => "rs",
            QrsTag::RSR => "RSR",
            QrsTag::rsr => "rsr",
            QrsTag::RsR => "RsR",
            QrsTag::RrS => "RrS",
            QrsTag::RR => "RR",
            QrsTag::Rr => "Rr",
            QrsTag::rr => "rr",
            QrsTag::Q => "Q",
            QrsTag::Qr => "Qr",
            QrsTag::QS => "QS",
            QrsTag::qRs => "qRs",
            QrsTag::QRs => "QRs",
            QrsTag::rS => "rS",
            QrsTag::rSr => "rSr",
            QrsTag::rR => "rR",
            QrsTag::qR => "qR",
            QrsTag::QR => "QR",
            QrsTag::qr => "qr",
            QrsTag::Qs => "Qs",
            QrsTag::qS => "qS",
            QrsTag::QrS => "QrS",
            QrsTag::rsR => "rsR",
        }
    }

    /// Position of the wave that sets the peak of a complex with this shape,
    /// used when no wave clearly dominates the energy of the complex.
    pub fn reference_position(&self, nwaves: usize) -> usize {
        match self {
            QrsTag::QS => nwaves.saturating_sub(1),
            QrsTag::R
            | QrsTag::r
            | QrsTag::RS
            | QrsTag::Rs
            | QrsTag::rs
            | QrsTag::RSR
            | QrsTag::rsr
            | QrsTag::RsR
            | QrsTag::RrS
            | QrsTag::RR
            | QrsTag::Rr
            | QrsTag::rr
            | QrsTag::Q
            | QrsTag::Qr => 0,
            QrsTag::qRs
            | QrsTag::QRs
            | QrsTag::rS
            | QrsTag::rSr
            | QrsTag::rR
            | QrsTag::qR
            | QrsTag::QR
            | QrsTag::qr
            | QrsTag::Qs
            | QrsTag::qS => 1,
            QrsTag::QrS | QrsTag::rsR => 2,
        }
    }
}

impl FromStr for QrsTag {
    type Err = InconsistencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QrsTag::ALL
            .iter()
            .copied()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| InconsistencyError::UnknownShape(s.to_string()))
    }
}

impl fmt::Display for QrsTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for QrsTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Builds the textual tag of a sequence of waves.
///
/// A leading negative wave is a Q wave (a QS complex if it is the only
/// wave); every other wave is an R or S wave depending on its sign.
pub fn tag_waves(waves: &[Wave], c: &Constants) -> String {
    let mut result = String::new();
    for (i, wave) in waves.iter().enumerate() {
        let amp = wave.amplitude.abs();
        if i == 0 && !wave.is_positive() {
            result.push_str(if waves.len() == 1 {
                if amp > c.mv(0.5) {
                    "QS"
                } else {
                    "Q"
                }
            } else if amp > c.mv(0.2) {
                "Q"
            } else {
                "q"
            });
        } else {
            let letter = if wave.is_positive() { 'r' } else { 's' };
            result.push(if amp > c.mv(0.5) {
                letter.to_ascii_uppercase()
            } else {
                letter
            });
        }
    }
    result
}

/// Recognized shape of a sequence of waves, if any.
pub fn classify(waves: &[Wave], c: &Constants) -> Option<QrsTag> {
    tag_waves(waves, c).parse().ok()
}

/// True iff the waves are consecutive and form a recognized shape.
pub fn is_qrs_complex(waves: &[Wave], c: &Constants) -> bool {
    waves.windows(2).all(|w| w[1].left == w[0].right) && classify(waves, c).is_some()
}

/// Index of the wave whose midpoint marks the peak of the complex.
///
/// A wave holding more than twice the energy of every other wave is the
/// reference; otherwise the position depends on the shape tag.
pub fn reference_wave(shape: &QrsShape) -> usize {
    let max_energy = shape.waves.iter().map(|w| w.energy).fold(0.0, f64::max);
    let mut dominant = None;
    for (i, wave) in shape.waves.iter().enumerate() {
        if wave.energy == max_energy {
            dominant = Some(i);
        } else if wave.energy / max_energy > 0.5 {
            dominant = None;
            break;
        }
    }
    dominant.unwrap_or_else(|| shape.tag.reference_position(shape.waves.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wave(left: usize, right: usize, sign: i8, mv: f64, energy: f64) -> Wave {
        Wave {
            left,
            mid: (left + right) / 2,
            right,
            sign,
            amplitude: mv * 200.0,
            energy,
        }
    }

    #[test]
    fn tags_classic_morphologies() {
        let c = Constants::default();
        let qrs = [
            wave(0, 4, -1, 0.15, 1.0),
            wave(4, 10, 1, 0.8, 5.0),
            wave(10, 14, -1, 0.3, 1.0),
        ];
        assert_eq!(tag_waves(&qrs, &c), "qRs");
        assert_eq!(classify(&qrs, &c), Some(QrsTag::qRs));

        let deep_q = [
            wave(0, 4, -1, 0.3, 1.0),
            wave(4, 10, 1, 0.8, 5.0),
            wave(10, 14, -1, 0.3, 1.0),
        ];
        assert_eq!(tag_waves(&deep_q, &c), "QRs");

        assert_eq!(tag_waves(&[wave(0, 20, -1, 0.6, 9.0)], &c), "QS");
        assert_eq!(tag_waves(&[wave(0, 20, -1, 0.4, 9.0)], &c), "Q");
        assert_eq!(
            tag_waves(&[wave(0, 5, 1, 1.2, 9.0), wave(5, 9, -1, 0.9, 5.0)], &c),
            "RS"
        );
    }

    #[test]
    fn rejects_unknown_or_disjoint_sequences() {
        let c = Constants::default();
        let waves = [
            wave(0, 4, 1, 1.0, 1.0),
            wave(4, 8, -1, 1.0, 1.0),
            wave(8, 12, 1, 1.0, 1.0),
            wave(12, 16, -1, 1.0, 1.0),
        ];
        assert_eq!(tag_waves(&waves, &c), "RSRS");
        assert!(!is_qrs_complex(&waves, &c));
        assert!(is_qrs_complex(&waves[..3], &c));
        let gap = [wave(0, 4, 1, 1.0, 1.0), wave(5, 8, -1, 1.0, 1.0)];
        assert!(!is_qrs_complex(&gap, &c));
        assert_eq!(
            "RSRS".parse::<QrsTag>(),
            Err(InconsistencyError::UnknownShape("RSRS".into()))
        );
    }

    #[test]
    fn every_tag_round_trips_through_its_name() {
        for tag in QrsTag::ALL {
            assert_eq!(tag.as_str().parse::<QrsTag>(), Ok(tag));
        }
    }

    fn shape(tag: QrsTag, energies: &[f64]) -> QrsShape {
        let waves = energies
            .iter()
            .enumerate()
            .map(|(i, &e)| wave(i * 4, i * 4 + 4, 1, 1.0, e))
            .collect();
        QrsShape {
            waves,
            tag,
            energy: energies.iter().sum(),
            amplitude: 0.0,
            max_slope: 0.0,
            signal: Vec::new(),
        }
    }

    #[test]
    fn dominant_wave_is_reference() {
        assert_eq!(reference_wave(&shape(QrsTag::qRs, &[1.0, 1.5, 5.0])), 2);
    }

    #[test]
    fn reference_falls_back_to_shape_rule() {
        assert_eq!(reference_wave(&shape(QrsTag::qRs, &[1.0, 3.0, 2.0])), 1);
        assert_eq!(reference_wave(&shape(QrsTag::RS, &[3.0, 2.0])), 0);
        assert_eq!(reference_wave(&shape(QrsTag::rsR, &[2.0, 2.0, 3.0])), 2);
        assert_eq!(reference_wave(&shape(QrsTag::QS, &[2.0])), 0);
    }
}
