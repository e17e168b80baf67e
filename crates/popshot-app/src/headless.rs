//! Headless implementations of the external services.
//!
//! Used by the `popshot` binary when no real renderer is attached, and as
//! the reference for what a real backend must honour.

use std::collections::HashMap;

use popshot_core::enums::Shape;
use popshot_core::services::{
    Intersection, Material, PickCandidate, ScoreDisplay, SelectEvent, TargetPicker, VisualBackend,
};
use popshot_core::types::VisualHandle;

/// One visual known to the headless renderer.
#[derive(Debug, Clone, Copy)]
pub struct VisualRecord {
    pub shape: Shape,
    pub material: Material,
    pub in_scene: bool,
}

/// Renderer stand-in that only keeps handle bookkeeping.
///
/// Panics on any lifecycle misuse: adding twice, removing what is not in
/// the scene, disposing a handle still in the scene, or touching a handle
/// that was never issued or is already disposed.
#[derive(Debug, Default)]
pub struct HeadlessVisuals {
    next_id: u64,
    live: HashMap<VisualHandle, VisualRecord>,
    disposed: u64,
}

impl HeadlessVisuals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles created and not yet disposed.
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Handles currently in the scene.
    pub fn scene_count(&self) -> usize {
        self.live.values().filter(|r| r.in_scene).count()
    }

    /// Handles disposed so far.
    pub fn disposed_count(&self) -> u64 {
        self.disposed
    }

    pub fn record(&self, handle: VisualHandle) -> Option<&VisualRecord> {
        self.live.get(&handle)
    }

    fn record_mut(&mut self, handle: VisualHandle, op: &str) -> &mut VisualRecord {
        match self.live.get_mut(&handle) {
            Some(record) => record,
            None => panic!("{op}: {handle:?} is unknown or already disposed"),
        }
    }
}

impl VisualBackend for HeadlessVisuals {
    fn create(&mut self, shape: Shape, material: Material) -> VisualHandle {
        self.next_id += 1;
        let handle = VisualHandle(self.next_id);
        self.live.insert(
            handle,
            VisualRecord {
                shape,
                material,
                in_scene: false,
            },
        );
        handle
    }

    fn add_to_scene(&mut self, handle: VisualHandle) {
        let record = self.record_mut(handle, "add_to_scene");
        assert!(!record.in_scene, "add_to_scene: {handle:?} already in scene");
        record.in_scene = true;
    }

    fn remove_from_scene(&mut self, handle: VisualHandle) {
        let record = self.record_mut(handle, "remove_from_scene");
        assert!(record.in_scene, "remove_from_scene: {handle:?} not in scene");
        record.in_scene = false;
    }

    fn dispose(&mut self, handle: VisualHandle) {
        let record = self.record_mut(handle, "dispose");
        assert!(!record.in_scene, "dispose: {handle:?} still in scene");
        self.live.remove(&handle);
        self.disposed += 1;
    }
}

/// Score widget stand-in: logs every update and remembers the last text.
#[derive(Debug, Default)]
pub struct LogScoreDisplay {
    text: String,
}

impl LogScoreDisplay {
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl ScoreDisplay for LogScoreDisplay {
    fn set_text(&mut self, text: &str) {
        log::info!("{text}");
        self.text.clear();
        self.text.push_str(text);
    }
}

/// Geometric picker: intersects the selection ray with the target sphere.
#[derive(Debug, Clone, Copy, Default)]
pub struct RaySpherePicker;

impl TargetPicker for RaySpherePicker {
    fn intersect(&self, event: &SelectEvent, candidate: &PickCandidate) -> Option<Intersection> {
        let distance = event
            .ray
            .intersect_sphere(candidate.position.0, candidate.radius)?;
        Some(Intersection {
            point: event.ray.at(distance),
            distance,
        })
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;
    use popshot_core::enums::{InputSource, Shading};
    use popshot_core::types::{Color, Position, Ray};

    use super::*;

    fn sphere() -> (Shape, Material) {
        (
            Shape::Sphere { radius: 0.2 },
            Material {
                color: Color::WHITE,
                shading: Shading::Lit,
            },
        )
    }

    #[test]
    fn test_full_lifecycle() {
        let mut visuals = HeadlessVisuals::new();
        let (shape, material) = sphere();

        let a = visuals.create(shape, material);
        let b = visuals.create(shape, material);
        assert_ne!(a, b);
        visuals.add_to_scene(a);
        visuals.add_to_scene(b);
        assert_eq!(visuals.scene_count(), 2);

        visuals.remove_from_scene(a);
        visuals.dispose(a);
        assert_eq!(visuals.live_count(), 1);
        assert_eq!(visuals.disposed_count(), 1);
        assert!(visuals.record(a).is_none());
        assert!(visuals.record(b).unwrap().in_scene);
    }

    #[test]
    #[should_panic(expected = "already disposed")]
    fn test_double_dispose_panics() {
        let mut visuals = HeadlessVisuals::new();
        let (shape, material) = sphere();
        let handle = visuals.create(shape, material);
        visuals.add_to_scene(handle);
        visuals.remove_from_scene(handle);
        visuals.dispose(handle);
        visuals.dispose(handle);
    }

    #[test]
    #[should_panic(expected = "still in scene")]
    fn test_dispose_in_scene_panics() {
        let mut visuals = HeadlessVisuals::new();
        let (shape, material) = sphere();
        let handle = visuals.create(shape, material);
        visuals.add_to_scene(handle);
        visuals.dispose(handle);
    }

    #[test]
    fn test_score_display_keeps_last_text() {
        let mut display = LogScoreDisplay::default();
        display.set_text("Score: 0");
        display.set_text("Score: 10");
        assert_eq!(display.text(), "Score: 10");
    }

    fn candidate(x: f32, y: f32, z: f32) -> PickCandidate {
        PickCandidate {
            handle: VisualHandle(1),
            position: Position::new(x, y, z),
            radius: 0.2,
        }
    }

    fn event(origin: Vec3, direction: Vec3) -> SelectEvent {
        SelectEvent {
            source: InputSource::RightController,
            ray: Ray::new(origin, direction),
        }
    }

    #[test]
    fn test_picker_hits_front_of_sphere() {
        let hit = RaySpherePicker
            .intersect(
                &event(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Z),
                &candidate(0.0, 1.0, -3.0),
            )
            .unwrap();
        assert!((hit.distance - 2.8).abs() < 1e-5);
        assert!((hit.point - Vec3::new(0.0, 1.0, -2.8)).length() < 1e-5);
    }

    #[test]
    fn test_picker_misses_outside_radius() {
        let miss = RaySpherePicker.intersect(
            &event(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Z),
            &candidate(0.25, 1.0, -3.0),
        );
        assert!(miss.is_none());
    }

    #[test]
    fn test_picker_ignores_targets_behind_ray() {
        let miss = RaySpherePicker.intersect(
            &event(Vec3::new(0.0, 1.0, 0.0), Vec3::Z),
            &candidate(0.0, 1.0, -3.0),
        );
        assert!(miss.is_none());
    }
}
