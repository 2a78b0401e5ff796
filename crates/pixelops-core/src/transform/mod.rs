//! Geometric transformations: rotation, flipping and cropping.
//!
//! Every function borrows its input and returns a new `RasterImage`.
//!
//! # Coordinate System
//!
//! - Rotation angles are whole degrees, positive = clockwise
//! - Crop coordinates are pixel indices, half-open on the right and bottom
//! - Origin is top-left corner

mod crop;
mod flip;
mod rotation;

pub use crop::{crop, CropRect};
pub use flip::{flip, FlipMode};
pub use rotation::{
    compute_rotated_bounds, rotate, rotate_counter_clockwise, rotate_with_filter,
    InterpolationFilter, RotationAngle, BACKGROUND_SAMPLE,
};
