//! Location classification
//!
//! The classifier is a trait so a real vision model can replace the stub
//! without touching handler logic. The shipped implementation ignores the
//! image entirely and picks a label uniformly at random.

use crate::tags::{Location, LOCATIONS};
use rand::seq::SliceRandom;

/// Classifier seam: image bytes in, location label out
pub trait ClassifyLocation: Send + Sync {
    fn classify(&self, image_bytes: &[u8]) -> Location;
}

/// Placeholder classifier: uniform random choice over the label set
pub struct RandomClassifier;

impl ClassifyLocation for RandomClassifier {
    fn classify(&self, _image_bytes: &[u8]) -> Location {
        *LOCATIONS
            .choose(&mut rand::thread_rng())
            .expect("label set is non-empty")
    }
}
