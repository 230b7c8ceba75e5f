//! Browser-side service runners.

pub(crate) mod socket;
