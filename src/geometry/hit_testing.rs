use super::{Bounds, Point};
use crate::config::TransformConfig;

/// Which part of a selected element's decoration a pointer is over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    Resize,
    Rotate,
}

/// Square resize handle centered on the bottom-right corner of the bounds
pub fn resize_handle_rect(bounds: &Bounds, config: &TransformConfig) -> Bounds {
    let size = config.resize_handle_size;
    Bounds::from_center_size(Point::new(bounds.max_x(), bounds.max_y()), size, size)
}

/// Center of the rotate handle, offset above the top-center of the bounds
pub fn rotate_handle_center(bounds: &Bounds, config: &TransformConfig) -> Point {
    Point::new(bounds.center_x, bounds.min_y - config.rotate_handle_offset)
}

/// Tests the handles of a selected element. The rotate handle wins if both overlap.
pub fn handle_at(bounds: &Bounds, point: Point, config: &TransformConfig) -> Option<Handle> {
    let rotate_center = rotate_handle_center(bounds, config);
    if point.distance(rotate_center) <= config.rotate_handle_radius + config.hit_padding / 2.0 {
        return Some(Handle::Rotate);
    }

    let resize = resize_handle_rect(bounds, config).expand(config.hit_padding / 2.0);
    if resize.contains(point) {
        return Some(Handle::Resize);
    }

    None
}

/// Body hit test against the padded bounds
pub fn body_contains(bounds: &Bounds, point: Point, config: &TransformConfig) -> bool {
    bounds.expand(config.hit_padding).contains(point)
}
