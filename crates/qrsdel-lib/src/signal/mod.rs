pub mod baseline;
pub mod peaks;
pub mod simplify;
pub mod waves;

pub use baseline::characterize_baseline;
pub use peaks::get_peaks;
pub use simplify::simplify;
pub use waves::extract_waves;
