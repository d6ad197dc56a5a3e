pub mod characterize;
pub mod constants;
pub mod delineation;
pub mod error;
pub mod interval;
pub mod io;
pub mod model;
pub mod shape;
pub mod signal;
pub mod units;

pub use characterize::{characterize_window, BeatWindow, LeadSignal, Record};
pub use constants::Constants;
pub use delineation::{delineate_qrs, Delineator};
pub use error::InconsistencyError;
pub use interval::Interval;
pub use model::{LeadBundle, LeadMap, Qrs, QrsShape, Wave};
pub use shape::QrsTag;
pub use units::ScaleConfig;
