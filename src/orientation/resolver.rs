use serde::Serialize;
use tracing::debug;

use super::rotation::RotationAngle;

/// Rotation and mirroring applied at one end of the pipeline.
///
/// A resolved state never pairs a 180° rotation with both flips set; that
/// combination is the same picture as no rotation and no flips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrientationState {
    pub rotation: RotationAngle,
    pub horizontally_flipped: bool,
    pub vertically_flipped: bool,
}

/// Orientation for both pipeline stages, computed once per session start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedOrientation {
    /// Session rotation in image space, i.e. the display rotation after
    /// conversion. Stored by the caller; nothing here mutates it.
    pub image_rotation: RotationAngle,
    pub input: OrientationState,
    pub output: OrientationState,
}

/// Fold a half turn into the flags whenever the state is a half turn or
/// flips both axes. Applied once, never iterated.
fn normalize(
    rotation: RotationAngle,
    horizontally_flipped: bool,
    vertically_flipped: bool,
) -> OrientationState {
    match (rotation, horizontally_flipped, vertically_flipped) {
        (RotationAngle::Rotation180, h, v) | (_, h @ true, v @ true) => OrientationState {
            rotation: rotation.compose(RotationAngle::Rotation180),
            horizontally_flipped: !h,
            vertically_flipped: !v,
        },
        (_, h, v) => OrientationState {
            rotation,
            horizontally_flipped: h,
            vertically_flipped: v,
        },
    }
}

/// Orientation for interpreting incoming camera frames.
///
/// Returns the session's new image-space rotation alongside the state so
/// the caller owns the update.
pub fn resolve_input(
    display_rotation: RotationAngle,
    expected_mirror: bool,
) -> (RotationAngle, OrientationState) {
    let rotation = display_rotation.invert();
    let is_inverted = rotation.is_inverted();
    let should_mirror = expected_mirror;

    let state = normalize(rotation, is_inverted ^ should_mirror, !is_inverted);
    (rotation, state)
}

/// Orientation for presenting pipeline output back in display space.
///
/// Starts from unflipped axes regardless of `is_inverted`, unlike the input
/// stage.
pub fn resolve_output(display_rotation: RotationAngle) -> OrientationState {
    normalize(display_rotation.invert(), false, false)
}

/// Resolve both stages and log the result.
pub fn resolve(display_rotation: RotationAngle, expected_mirror: bool) -> ResolvedOrientation {
    let (image_rotation, input) = resolve_input(display_rotation, expected_mirror);
    let output = resolve_output(display_rotation);

    debug!(
        "orientation resolved for display {display_rotation} (mirror={expected_mirror}): \
         input=({}, h={}, v={}) output=({}, h={}, v={})",
        input.rotation,
        input.horizontally_flipped,
        input.vertically_flipped,
        output.rotation,
        output.horizontally_flipped,
        output.vertically_flipped,
    );

    ResolvedOrientation {
        image_rotation,
        input,
        output,
    }
}
