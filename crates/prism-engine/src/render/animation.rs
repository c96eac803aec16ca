/// Constant-speed rotation angle, in degrees, kept within `[0, 360)`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Spin {
    pub angle_deg: f32,
    pub degrees_per_second: f32,
}

impl Spin {
    pub const fn new(degrees_per_second: f32) -> Self {
        Self {
            angle_deg: 0.0,
            degrees_per_second,
        }
    }

    /// Advances by `dt` seconds and returns the new angle.
    pub fn advance(&mut self, dt: f32) -> f32 {
        let next = self.angle_deg + self.degrees_per_second * dt;
        self.angle_deg = if next.is_finite() {
            // rem_euclid rounds up to exactly 360 for tiny negative inputs.
            let wrapped = next.rem_euclid(360.0);
            if wrapped >= 360.0 { 0.0 } else { wrapped }
        } else {
            0.0
        };
        self.angle_deg
    }
}
