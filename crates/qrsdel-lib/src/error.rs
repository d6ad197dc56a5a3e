use thiserror::Error;

/// A precondition of the delineation process that did not hold.
///
/// These failures are structural: repeating the call on the same input
/// yields the same error, and callers are expected to skip the beat.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InconsistencyError {
    #[error("no lead information was provided")]
    NoLeads,
    #[error("not enough representative points: expected at least {expected}, got {actual}")]
    TooFewPoints { expected: usize, actual: usize },
    #[error("no local extremum found in {0}")]
    NoExtremum(&'static str),
    #[error("no peak could be estimated in any lead")]
    NoPeak,
    #[error("clustering produced no valid segment")]
    EmptyCluster,
    #[error("{0}")]
    Rejected(&'static str),
    #[error("lead limits could not be reconciled")]
    LeadsDisagree,
    #[error("invalid QRS limits [{start},{end}]")]
    InvalidLimits { start: usize, end: usize },
    #[error("no recognizable QRS shape")]
    NoShape,
    #[error("unrecognized QRS shape tag {0}")]
    UnknownShape(String),
    #[error("QRS amplitude {0} out of the physiological range")]
    AmplitudeOutOfRange(f64),
}

pub type Result<T> = std::result::Result<T, InconsistencyError>;

/// Fails with `err` unless `cond` holds.
pub fn verify(cond: bool, err: InconsistencyError) -> Result<()> {
    if cond {
        Ok(())
    } else {
        Err(err)
    }
}
