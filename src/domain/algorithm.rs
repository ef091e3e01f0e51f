//! Algorithm enum for selecting how a generation is computed.
//!
//! Both variants produce identical generations; they differ only in
//! whether rows of the next buffer are filled on one thread or spread
//! across the rayon pool.

/// Available step strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Algorithm {
    /// Cell-by-cell on the calling thread
    Serial,
    /// Rows of the next buffer filled in parallel with rayon
    #[default]
    Parallel,
}

impl Algorithm {
    /// Get all available algorithms
    pub fn all() -> Vec<Algorithm> {
        vec![Algorithm::Serial, Algorithm::Parallel]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Serial => "Serial",
            Algorithm::Parallel => "Parallel",
        }
    }
}
