use crate::shape::QrsTag;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Everything the delineator needs to know about one lead inside the
/// analysis window around a beat.
#[derive(Debug, Clone, PartialEq)]
pub struct LeadBundle {
    /// Lead name.
    pub lead: String,
    /// Signal samples of the analysis window, in digital units.
    pub signal: Vec<f64>,
    /// Sorted indices of the representative points of `signal`.
    pub points: Vec<usize>,
    /// Baseline level, in the same units as `signal`.
    pub baseline: f64,
    /// Signal quality estimate, higher is better.
    pub quality: f64,
}

impl LeadBundle {
    pub fn new(
        lead: impl Into<String>,
        signal: Vec<f64>,
        points: Vec<usize>,
        baseline: f64,
        quality: f64,
    ) -> Self {
        Self {
            lead: lead.into(),
            signal,
            points,
            baseline,
            quality,
        }
    }
}

/// A single deflection of the signal between two boundary samples.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Wave {
    pub left: usize,
    /// Extreme sample of the deflection.
    pub mid: usize,
    pub right: usize,
    /// +1 for positive deflections, -1 for negative ones.
    pub sign: i8,
    /// Peak-to-peak amplitude over the wave span.
    pub amplitude: f64,
    /// Sum of the squared deviations from the baseline.
    pub energy: f64,
}

impl Wave {
    pub fn contains(&self, idx: usize) -> bool {
        self.left <= idx && idx <= self.right
    }

    pub fn is_positive(&self) -> bool {
        self.sign > 0
    }

    /// Re-bases the temporal references of the wave.
    pub fn translate(&mut self, offset: isize) {
        self.left = self.left.saturating_add_signed(offset);
        self.mid = self.mid.saturating_add_signed(offset);
        self.right = self.right.saturating_add_signed(offset);
    }
}

/// Shape of a QRS complex in one lead.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct QrsShape {
    pub waves: Vec<Wave>,
    pub tag: QrsTag,
    pub energy: f64,
    pub amplitude: f64,
    pub max_slope: f64,
    /// Signal fragment spanned by the waves, relative to its first sample.
    #[serde(skip)]
    pub signal: Vec<f64>,
}

impl QrsShape {
    /// Builds the shape on the waves of `signal`, measuring the fragment
    /// they span. Returns `None` for fragments of less than two samples.
    pub fn from_waves(signal: &[f64], waves: Vec<Wave>, tag: QrsTag) -> Option<Self> {
        let first = waves.first()?;
        let last = waves.last()?;
        let fragment = signal.get(first.left..=last.right)?;
        if fragment.len() < 2 {
            return None;
        }
        let origin = fragment[0];
        let sig: Vec<f64> = fragment.iter().map(|v| v - origin).collect();
        let max_slope = sig
            .windows(2)
            .map(|w| (w[1] - w[0]).abs())
            .fold(0.0, f64::max);
        let energy = waves.iter().map(|w| w.energy).sum();
        Some(Self {
            waves,
            tag,
            energy,
            amplitude: ptp(&sig),
            max_slope,
            signal: sig,
        })
    }

    pub fn start(&self) -> usize {
        self.waves.first().map_or(0, |w| w.left)
    }

    pub fn end(&self) -> usize {
        self.waves.last().map_or(0, |w| w.right)
    }

    pub fn translate(&mut self, offset: isize) {
        for wave in &mut self.waves {
            wave.translate(offset);
        }
    }
}

/// Delineation result of a single QRS complex.
///
/// `start`, `peak` and `end` are relative to the analysis window.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize)]
pub struct Qrs {
    pub start: usize,
    pub peak: usize,
    pub end: usize,
    pub paced: bool,
    pub shape: LeadMap<QrsShape>,
}

/// Mapping from lead name to a value that iterates in insertion order.
///
/// Leads are inserted by decreasing signal quality, so the first entry is
/// always the most reliable one.
#[derive(Debug, Clone, PartialEq)]
pub struct LeadMap<V> {
    entries: Vec<(String, V)>,
}

impl<V> Default for LeadMap<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<V> LeadMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the value of a lead, keeping its position.
    pub fn insert(&mut self, lead: impl Into<String>, value: V) {
        let lead = lead.into();
        match self.entries.iter_mut().find(|(k, _)| *k == lead) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((lead, value)),
        }
    }

    pub fn get(&self, lead: &str) -> Option<&V> {
        self.entries.iter().find(|(k, _)| k == lead).map(|(_, v)| v)
    }

    pub fn remove(&mut self, lead: &str) -> Option<V> {
        let pos = self.entries.iter().position(|(k, _)| k == lead)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn contains_key(&self, lead: &str) -> bool {
        self.get(lead).is_some()
    }

    pub fn first(&self) -> Option<(&str, &V)> {
        self.entries.first().map(|(k, v)| (k.as_str(), v))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, v)| v)
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut V> {
        self.entries.iter_mut().map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V: Serialize> Serialize for LeadMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Peak-to-peak range of a slice, zero if empty.
pub(crate) fn ptp(values: &[f64]) -> f64 {
    let (lo, hi) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    if values.is_empty() {
        0.0
    } else {
        hi - lo
    }
}
