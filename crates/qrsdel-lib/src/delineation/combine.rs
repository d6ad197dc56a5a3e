use crate::constants::Constants;
use crate::delineation::limits::qrs_limits;
use crate::error::{verify, InconsistencyError as E, Result};
use crate::interval::Interval;
use crate::model::{LeadBundle, LeadMap};
use log::debug;

/// QRS limits estimated in a single lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeadLimits {
    pub paced: bool,
    pub limits: Interval<usize>,
}

fn diff(a: usize, b: usize) -> isize {
    a as isize - b as isize
}

/// Joint limits of a paced beat, if the leads are consistent with it.
///
/// All spikes must start within the temporal margin, and all the non-paced
/// leads must start within that margin of the first spike.
fn paced_consensus(limits: &LeadMap<LeadLimits>, c: &Constants) -> Result<(usize, usize)> {
    let tm = c.tmargin as isize;
    let spikes: Vec<usize> = limits
        .values()
        .filter(|l| l.paced)
        .map(|l| l.limits.start())
        .collect();
    let (Some(&first), Some(&latest)) = (spikes.iter().min(), spikes.iter().max()) else {
        return Err(E::LeadsDisagree);
    };
    verify(latest - first <= c.tmargin, E::LeadsDisagree)?;
    verify(
        limits
            .values()
            .filter(|l| !l.paced)
            .all(|l| diff(l.limits.start(), first).abs() <= tm),
        E::LeadsDisagree,
    )?;
    let start = first;
    let mut end = limits
        .values()
        .filter(|l| l.paced)
        .map(|l| l.limits.end())
        .max()
        .unwrap_or(start);
    for l in limits.values() {
        let ext = diff(l.limits.end(), end);
        if 0 < ext && ext <= tm && l.limits.end() - start <= c.qrs_eann_dmax {
            end = l.limits.end();
        }
    }
    Ok((start, end))
}

/// Combines the limits of every lead into a single `(start, end)` pair.
///
/// Paced detections are accepted only if all leads agree with them; if
/// they do not, every paced lead is delineated again as a regular beat and
/// discarded if that fails. Regular limits are joined by order of quality,
/// extending the first lead's limits with those within the temporal margin.
pub fn combine_limits(
    limits: &mut LeadMap<LeadLimits>,
    leads: &[LeadBundle],
    peak: usize,
    c: &Constants,
) -> Result<(usize, usize)> {
    if limits.values().any(|l| l.paced) {
        match paced_consensus(limits, c) {
            Ok(joint) => return Ok(joint),
            Err(_) => {
                debug!("paced detections are not consistent across leads");
                for lead in leads {
                    if !limits.get(&lead.lead).is_some_and(|l| l.paced) {
                        continue;
                    }
                    match qrs_limits(&lead.signal, &lead.points, peak) {
                        Ok(iv) => limits.insert(
                            lead.lead.clone(),
                            LeadLimits {
                                paced: false,
                                limits: iv,
                            },
                        ),
                        Err(err) => {
                            debug!("discarding lead {}: {err}", lead.lead);
                            limits.remove(&lead.lead);
                        }
                    }
                }
            }
        }
    }
    let Some((_, seed)) = limits.first() else {
        return Err(E::LeadsDisagree);
    };
    let tm = c.tmargin as isize;
    let dmax = c.qrs_eann_dmax as isize;
    let (mut start, mut end) = (seed.limits.start(), seed.limits.end());
    for l in limits.values() {
        let (s, e) = (l.limits.start(), l.limits.end());
        let ext = diff(start, s);
        if 0 < ext && ext <= tm && diff(end, s) <= dmax {
            start = s;
        }
        let ext = diff(e, end);
        if 0 < ext && ext <= tm && diff(e, start) <= dmax {
            end = e;
        }
    }
    Ok((start, end))
}
