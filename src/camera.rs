/// Pixel-space camera offset that keeps a focus point centered, clamped to
/// the map bounds.
#[derive(Debug, Default, Clone, Copy)]
pub struct Camera {
    pub x: i32,
    pub y: i32,
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Center the view on `focus` (pixels), clamping so the view never
    /// scrolls past the map edge. A map smaller than the screen pins the
    /// camera to the origin.
    pub fn follow(
        &mut self,
        focus: (i32, i32),
        screen: (u32, u32),
        map_size: (i32, i32),
    ) {
        let (sw, sh) = (screen.0 as i32, screen.1 as i32);
        self.x = (focus.0 - sw / 2).clamp(0, (map_size.0 - sw).max(0));
        self.y = (focus.1 - sh / 2).clamp(0, (map_size.1 - sh).max(0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follow_centers_on_focus() {
        let mut cam = Camera::new();
        cam.follow((1200, 1200), (800, 600), (2400, 2400));
        assert_eq!((cam.x, cam.y), (800, 900));
    }

    #[test]
    fn test_follow_clamps_to_map_edges() {
        let mut cam = Camera::new();
        cam.follow((0, 0), (800, 600), (2400, 2400));
        assert_eq!((cam.x, cam.y), (0, 0));
        cam.follow((2400, 2400), (800, 600), (2400, 2400));
        assert_eq!((cam.x, cam.y), (1600, 1800));
    }

    #[test]
    fn test_map_smaller_than_screen_pins_origin() {
        let mut cam = Camera::new();
        cam.follow((100, 100), (800, 600), (400, 300));
        assert_eq!((cam.x, cam.y), (0, 0));
    }
}
