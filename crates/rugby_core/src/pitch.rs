//! # Pitch Geometry
//!
//! Canonical pitch coordinate system shared by extraction and every
//! downstream consumer of positions.
//!
//! The tracking tool reports positions with the origin on the goal line
//! and the y axis pointing toward the far touchline. The canonical system
//! used here is "attacking left-to-right, y increasing toward the near
//! touchline": x is offset by the try-zone depth and y is mirrored across
//! the field width.

/// Full pitch length in canonical units, try zones included.
pub const FIELD_LENGTH: f64 = 140.0;

/// Pitch width in canonical units.
pub const FIELD_WIDTH: f64 = 68.0;

/// Depth of each try zone.
pub const TRY_ZONE: f64 = 20.0;

/// Halfway line in canonical x.
pub const HALFWAY_LINE: f64 = FIELD_LENGTH / 2.0;

/// Canonical x of the opposition 22m line (attacking direction).
pub const OPPOSITION_22_X: f64 = FIELD_LENGTH - 42.0;

/// Raw tracking x -> canonical x (try-zone offset).
pub fn canonical_x(raw_x: f64) -> f64 {
    raw_x + TRY_ZONE
}

/// Raw tracking y -> canonical y (axis inversion across the field width).
pub fn canonical_y(raw_y: f64) -> f64 {
    FIELD_WIDTH - raw_y
}

/// Canonical x -> raw tracking x.
pub fn raw_x(x: f64) -> f64 {
    x - TRY_ZONE
}

/// Canonical y -> raw tracking y. The mirror is an involution, so this is
/// the same formula as [`canonical_y`].
pub fn raw_y(y: f64) -> f64 {
    FIELD_WIDTH - y
}

/// Project a canonical x onto the attacking half-pitch view used for
/// attacking-kick analysis. Positions behind the halfway line are not part
/// of that view.
pub fn attacking_half_x(x: f64) -> Option<f64> {
    if x < HALFWAY_LINE {
        None
    } else {
        Some((x - HALFWAY_LINE) * 2.0)
    }
}
