/// Linear remap of raw depth-buffer values, mirroring the compositor's
/// map-range plus invert stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthRemap {
    pub min_height: f32,
    pub max_height: f32,
    pub map_min: f32,
    pub map_max: f32,
}

impl DepthRemap {
    /// Remap `depth` from `[min_height, max_height]` to `[map_min, map_max]`.
    /// Values outside the input range extrapolate, no clamping.
    pub fn map(&self, depth: f32) -> f32 {
        let t = (depth - self.min_height) / (self.max_height - self.min_height);
        self.map_min + t * (self.map_max - self.map_min)
    }

    /// The compositor invert of the mapped value.
    pub fn inverted(&self, depth: f32) -> f32 {
        1.0 - self.map(depth)
    }

    /// Both composite outputs for a raw depth value: the primary channel is
    /// the inverted mapped depth, the secondary is the mapped depth itself.
    pub fn channels(&self, depth: f32) -> (f32, f32) {
        let mapped = self.map(depth);
        (1.0 - mapped, mapped)
    }
}

#[cfg(test)]
mod tests {
    use super::DepthRemap;

    const UNIT: DepthRemap = DepthRemap {
        min_height: 0.0,
        max_height: 10.0,
        map_min: 0.0,
        map_max: 1.0,
    };

    #[test]
    fn midpoint_is_symmetric() {
        assert_eq!(UNIT.map(5.0), 0.5);
        assert_eq!(UNIT.inverted(5.0), 0.5);
    }

    #[test]
    fn far_bound() {
        assert_eq!(UNIT.map(10.0), 1.0);
        assert_eq!(UNIT.inverted(10.0), 0.0);
        assert_eq!(UNIT.channels(10.0), (0.0, 1.0));
    }

    #[test]
    fn near_bound() {
        assert_eq!(UNIT.channels(0.0), (1.0, 0.0));
    }

    #[test]
    fn out_of_range_extrapolates() {
        assert_eq!(UNIT.map(20.0), 2.0);
        assert_eq!(UNIT.map(-10.0), -1.0);
    }

    #[test]
    fn shifted_output_range() {
        let remap = DepthRemap {
            min_height: 2.0,
            max_height: 4.0,
            map_min: 1.0,
            map_max: 3.0,
        };
        assert_eq!(remap.map(3.0), 2.0);
        assert_eq!(remap.inverted(3.0), -1.0);
    }
}
