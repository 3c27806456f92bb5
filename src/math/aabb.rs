use glam::Vec3;

/// Axis-aligned bounding box.
///
/// `AABB::empty()` is the absorbing sentinel: extending it with any point or
/// box yields that point's or box's bounds. Once non-empty, `min <= max`
/// holds componentwise.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AABB {
    pub min: Vec3,
    pub max: Vec3,
}

impl AABB {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    pub fn empty() -> Self {
        Self {
            min: Vec3::INFINITY,
            max: Vec3::NEG_INFINITY,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Grows the box to contain `point`.
    pub fn extend(&self, point: Vec3) -> AABB {
        AABB {
            min: self.min.min(point),
            max: self.max.max(point),
        }
    }

    pub fn union(&self, other: &AABB) -> AABB {
        AABB {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn centroid(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Returns 0 for the empty sentinel instead of a garbage value.
    pub fn surface_area(&self) -> f32 {
        if self.is_empty() {
            return 0.0;
        }
        let d = self.max - self.min;
        2.0 * (d.x * d.y + d.y * d.z + d.z * d.x)
    }

    /// Index (0/1/2) of the axis with the largest extent. Ties resolve to
    /// the lower axis index, which keeps builds reproducible.
    pub fn longest_axis(&self) -> usize {
        let d = self.max - self.min;
        if d.x >= d.y && d.x >= d.z {
            0
        } else if d.y >= d.z {
            1
        } else {
            2
        }
    }

    /// True if `other` lies inside this box, allowing `eps` of slack per
    /// component.
    pub fn contains(&self, other: &AABB, eps: f32) -> bool {
        (self.min - Vec3::splat(eps)).cmple(other.min).all()
            && (self.max + Vec3::splat(eps)).cmpge(other.max).all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_absorbing_under_extend() {
        let p = Vec3::new(1.0, -2.0, 3.0);
        let aabb = AABB::empty().extend(p);
        assert_eq!(aabb.min, p);
        assert_eq!(aabb.max, p);
    }

    #[test]
    fn test_empty_is_absorbing_under_union() {
        let other = AABB::new(Vec3::new(-1.0, 0.0, 1.0), Vec3::new(2.0, 3.0, 4.0));
        let union = AABB::empty().union(&other);
        assert_eq!(union, other);
    }

    #[test]
    fn test_empty_surface_area_is_zero() {
        assert_eq!(AABB::empty().surface_area(), 0.0);
    }

    #[test]
    fn test_surface_area_unit_cube() {
        let aabb = AABB::new(Vec3::ZERO, Vec3::ONE);
        assert!((aabb.surface_area() - 6.0).abs() < 0.01);
    }

    #[test]
    fn test_surface_area_rectangular() {
        let aabb = AABB::new(Vec3::ZERO, Vec3::new(2.0, 3.0, 4.0));
        // 2*(2*3 + 3*4 + 4*2) = 52
        assert!((aabb.surface_area() - 52.0).abs() < 0.01);
    }

    #[test]
    fn test_centroid() {
        let aabb = AABB::new(Vec3::new(-2.0, -4.0, -6.0), Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(aabb.centroid(), Vec3::ZERO);
    }

    #[test]
    fn test_union_non_overlapping() {
        let a = AABB::new(Vec3::ZERO, Vec3::ONE);
        let b = AABB::new(Vec3::splat(2.0), Vec3::splat(3.0));
        let union = a.union(&b);
        assert_eq!(union.min, Vec3::ZERO);
        assert_eq!(union.max, Vec3::splat(3.0));
    }

    #[test]
    fn test_longest_axis() {
        let aabb = AABB::new(Vec3::ZERO, Vec3::new(1.0, 5.0, 2.0));
        assert_eq!(aabb.longest_axis(), 1);

        let aabb = AABB::new(Vec3::ZERO, Vec3::new(1.0, 2.0, 5.0));
        assert_eq!(aabb.longest_axis(), 2);

        // Ties pick the lower axis
        let aabb = AABB::new(Vec3::ZERO, Vec3::ONE);
        assert_eq!(aabb.longest_axis(), 0);
    }

    #[test]
    fn test_contains() {
        let outer = AABB::new(Vec3::ZERO, Vec3::splat(10.0));
        let inner = AABB::new(Vec3::splat(2.0), Vec3::splat(8.0));
        assert!(outer.contains(&inner, 0.0));
        assert!(!inner.contains(&outer, 0.0));
    }
}
