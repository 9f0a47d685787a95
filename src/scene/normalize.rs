use crate::scene::model::Model;
use log::debug;
use nalgebra::Point3;

/// Recentres the model at the origin and rescales it uniformly so every
/// position lands inside the unit cube.
///
/// Returns the original center and the divisor that was applied. Only
/// positions move; normals and texture coordinates are untouched. An empty
/// model is returned untouched as `(origin, 1.0)`. When every vertex
/// coincides on all axes the extent is zero; the model is recentred but not
/// scaled, so no NaN or infinity can escape.
///
/// Running this twice on a non-degenerate model is a no-op the second time:
/// after the first pass the largest half-extent is exactly 0.5, which makes
/// the next divisor 1.0 and the next center the origin.
pub fn normalize_model(model: &mut Model) -> (Point3<f32>, f32) {
    if model.positions.is_empty() {
        return (Point3::origin(), 1.0);
    }

    let mut min_bound = Point3::new(f32::MAX, f32::MAX, f32::MAX);
    let mut max_bound = Point3::new(f32::MIN, f32::MIN, f32::MIN);
    for p in &model.positions {
        min_bound.x = min_bound.x.min(p.x);
        min_bound.y = min_bound.y.min(p.y);
        min_bound.z = min_bound.z.min(p.z);

        max_bound.x = max_bound.x.max(p.x);
        max_bound.y = max_bound.y.max(p.y);
        max_bound.z = max_bound.z.max(p.z);
    }

    let center = nalgebra::center(&min_bound, &max_bound);

    // Half-extent per axis, taken as the larger distance from the midpoint
    // so rounding in `center` cannot shrink the box.
    let hx = (max_bound.x - center.x).abs().max((min_bound.x - center.x).abs());
    let hy = (max_bound.y - center.y).abs().max((min_bound.y - center.y).abs());
    let hz = (max_bound.z - center.z).abs().max((min_bound.z - center.z).abs());

    // One shared divisor keeps the proportions of the model.
    let scale = 2.0 * hx.max(hy).max(hz);

    if scale == 0.0 {
        for p in &mut model.positions {
            *p = Point3::from(*p - center);
        }
        debug!("Model is a single point; recentred without scaling");
        return (center, 1.0);
    }

    for p in &mut model.positions {
        *p = Point3::from((*p - center) / scale);
    }

    debug!(
        "Model normalized. Center: {:?}, Scale: {:.4}",
        center, scale
    );
    (center, scale)
}
