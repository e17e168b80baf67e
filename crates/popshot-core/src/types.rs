//! Fundamental geometric and simulation types.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// World-space position (meters).
/// x = right, y = up, z = toward the viewer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position(pub Vec3);

/// World-space velocity (m/s).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity(pub Vec3);

/// An RGB color packed as `0xRRGGBB`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color(pub u32);

/// Opaque identifier of a renderer-side visual.
///
/// Issued by a `VisualBackend`; the simulation never interprets the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VisualHandle(pub u64);

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of simulated frames.
    pub frame: u64,
    /// Sum of all simulated frame deltas, in seconds.
    pub elapsed_secs: f64,
    /// Host timestamp of the latest frame (monotonic milliseconds).
    pub now_ms: u64,
}

/// A world-space ray, as cast by a controller or pointer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ray {
    pub origin: Vec3,
    /// Need not be normalized.
    pub direction: Vec3,
}

impl Position {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self(Vec3::new(x, y, z))
    }

    /// Distance to another position.
    pub fn distance_to(&self, other: &Position) -> f32 {
        self.0.distance(other.0)
    }

    /// Explicit Euler step: advance by `velocity * dt`.
    pub fn advance(&mut self, velocity: &Velocity, dt: f32) {
        self.0 += velocity.0 * dt;
    }
}

impl Velocity {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self(Vec3::new(x, y, z))
    }

    /// Speed magnitude (m/s).
    pub fn speed(&self) -> f32 {
        self.0.length()
    }
}

impl Color {
    pub const WHITE: Color = Color(0xFF_FFFF);

    /// Build from 8-bit channels.
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    /// 8-bit channels as `[r, g, b]`.
    pub fn rgb(&self) -> [u8; 3] {
        [(self.0 >> 16) as u8, (self.0 >> 8) as u8, self.0 as u8]
    }

    /// Channels as linear floats in `0.0..=1.0`.
    pub fn to_vec3(&self) -> Vec3 {
        let [r, g, b] = self.rgb();
        Vec3::new(r as f32, g as f32, b as f32) / 255.0
    }
}

impl SimTime {
    /// Advance by one frame of `dt` seconds, stamped at `now_ms`.
    pub fn advance(&mut self, dt: f32, now_ms: u64) {
        self.frame += 1;
        self.elapsed_secs += dt as f64;
        self.now_ms = now_ms;
    }
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Point at parameter `t` along the normalized direction.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction.normalize_or_zero() * t
    }

    /// Nearest non-negative intersection distance with a sphere, if any.
    ///
    /// A ray starting inside the sphere reports the exit point.
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let dir = self.direction.normalize_or_zero();
        if dir == Vec3::ZERO {
            return None;
        }

        let oc = self.origin - center;
        let b = oc.dot(dir);
        let c = oc.length_squared() - radius * radius;
        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrt_d = discriminant.sqrt();
        let near = -b - sqrt_d;
        let far = -b + sqrt_d;
        if near >= 0.0 {
            Some(near)
        } else if far >= 0.0 {
            Some(far)
        } else {
            None
        }
    }
}
