//! Window-side helpers for the painter demo: sample scene, input mapping and
//! drawing of ordered screen faces.

use macroquad::prelude::*;
use nalgebra::{Point3, Vector3};
use painter_bsp::{Camera, ColorScheme, Frame, Rgb, Scene, Shape, ShapeKind};

/// Narrowest and widest field of view reachable by zooming, in degrees.
pub const FOV_RANGE: (f32, f32) = (30.0, 120.0);

/// Builds the demo scene: a cross of cuboids, intersecting boxes, pairs of
/// every primitive, a platform group, a column group and a far-right cluster.
///
/// With `only` set, objects of other kinds are left out.
pub fn sample_scene(only: Option<ShapeKind>) -> Scene {
    let origin = Point3::origin();
    let standard = Shape::cuboid(Vector3::new(1.0, 1.0, 1.0), origin);
    let large = Shape::cuboid(Vector3::new(2.0, 2.0, 2.0), origin);
    let flat = Shape::cuboid(Vector3::new(3.0, 0.2, 3.0), origin);
    let tall = Shape::cuboid(Vector3::new(0.5, 3.0, 0.5), origin);
    let pyramid = Shape::pyramid(1.2, 1.5, origin);
    let prism = Shape::prism(1.0, 1.5, origin);
    let cylinder = Shape::cylinder(0.8, 1.6, 12, origin);
    let octahedron = Shape::octahedron(0.8, origin);

    // (prototype, position, rotation in degrees, uniform scale)
    let placements: [(&Shape, [f32; 3], [f32; 3], f32); 27] = [
        (&standard, [0.0, 0.0, 5.0], [0.0, 0.0, 0.0], 1.0),
        (&standard, [2.0, 0.0, 5.0], [0.0, 0.0, 0.0], 0.5),
        (&standard, [-2.0, 0.0, 5.0], [0.0, 0.0, 0.0], 0.5),
        (&standard, [0.0, 2.0, 5.0], [0.0, 0.0, 0.0], 0.5),
        (&standard, [0.0, -2.0, 5.0], [0.0, 0.0, 0.0], 0.5),
        (&standard, [0.0, 0.0, 8.0], [0.0, 0.0, 0.0], 0.5),
        // Intersecting pair, forces splits
        (&large, [3.0, 3.0, 7.0], [30.0, 45.0, 0.0], 0.7),
        (&standard, [3.0, 3.0, 6.0], [0.0, 0.0, 0.0], 1.0),
        (&pyramid, [-4.0, -2.0, 6.0], [0.0, 30.0, 0.0], 1.0),
        (&pyramid, [-4.0, -2.0, 8.0], [45.0, 0.0, 0.0], 0.8),
        (&prism, [4.0, -2.0, 6.0], [0.0, 45.0, 0.0], 1.0),
        (&prism, [4.0, -2.0, 8.0], [30.0, 60.0, 0.0], 0.8),
        (&cylinder, [-3.0, 2.0, 6.0], [30.0, 0.0, 0.0], 1.0),
        (&cylinder, [-3.0, 2.0, 8.0], [0.0, 30.0, 0.0], 0.8),
        (&octahedron, [3.0, 2.0, 6.0], [0.0, 45.0, 0.0], 1.0),
        (&octahedron, [3.0, 2.0, 8.0], [45.0, 45.0, 0.0], 0.8),
        // Platform
        (&flat, [0.0, -3.0, 10.0], [0.0, 0.0, 0.0], 1.0),
        (&pyramid, [-1.0, -2.0, 10.0], [0.0, 30.0, 0.0], 0.7),
        (&prism, [1.0, -2.0, 10.0], [0.0, -30.0, 0.0], 0.7),
        // Column
        (&tall, [-4.0, 0.0, 7.0], [0.0, 0.0, 0.0], 1.0),
        (&cylinder, [-4.0, 2.0, 7.0], [0.0, 0.0, 0.0], 0.6),
        (&octahedron, [-5.0, 0.0, 7.0], [0.0, 0.0, 0.0], 0.6),
        // Far right
        (&pyramid, [5.0, 0.0, 12.0], [0.0, 30.0, 0.0], 0.8),
        (&octahedron, [6.0, 0.0, 11.0], [45.0, 45.0, 0.0], 0.8),
        (&prism, [7.0, 0.0, 10.0], [30.0, 0.0, 0.0], 0.8),
        (&large, [-6.0, 1.0, 9.0], [0.0, 15.0, 0.0], 0.9),
        (&cylinder, [-7.0, 1.0, 8.0], [0.0, 0.0, 0.0], 0.6),
    ];

    let mut scene = Scene::new();
    for (prototype, position, rotation, scale) in placements {
        if only.is_none_or(|kind| kind == prototype.kind()) {
            scene.add_object(
                prototype,
                Vector3::from(position),
                Vector3::from(rotation),
                Vector3::repeat(scale),
            );
        }
    }
    scene
}

fn to_color(rgb: Rgb) -> Color {
    Color::from_rgba(rgb.r, rgb.g, rgb.b, 255)
}

/// Paints the frame's faces in order: fan-triangulated fill, white outline,
/// and optionally the layer index at the screen centroid.
pub fn draw_frame(frame: &Frame, show_layer_numbers: bool) {
    for face in &frame.faces {
        let points: Vec<Vec2> = face.screen_points.iter().map(|p| vec2(p.x, p.y)).collect();
        if points.len() < 3 {
            continue;
        }

        let color = to_color(face.color);
        for i in 1..points.len() - 1 {
            draw_triangle(points[0], points[i], points[i + 1], color);
        }
        for (i, a) in points.iter().enumerate() {
            let b = points[(i + 1) % points.len()];
            draw_line(a.x, a.y, b.x, b.y, 1.0, WHITE);
        }

        if show_layer_numbers {
            let centroid = points.iter().copied().sum::<Vec2>() / points.len() as f32;
            let label = face.layer_index.to_string();
            let size = measure_text(&label, None, 14, 1.0);
            draw_text(
                &label,
                centroid.x - size.width / 2.0,
                centroid.y + size.height / 2.0,
                14.0,
                to_color(face.color.inverted()),
            );
        }
    }
}

/// Faces and mean centroid distance for one back-to-front layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerSummary {
    pub layer: usize,
    pub faces: usize,
    pub avg_distance: f32,
    pub color: Rgb,
}

/// Groups the frame's faces by layer index, farthest layer first.
pub fn layer_summaries(frame: &Frame) -> Vec<LayerSummary> {
    let mut summaries: Vec<LayerSummary> = Vec::new();
    for face in &frame.faces {
        match summaries.last_mut() {
            Some(last) if last.layer == face.layer_index => {
                last.avg_distance += face.distance;
                last.faces += 1;
            }
            _ => summaries.push(LayerSummary {
                layer: face.layer_index,
                faces: 1,
                avg_distance: face.distance,
                color: face.color,
            }),
        }
    }
    for summary in &mut summaries {
        summary.avg_distance /= summary.faces as f32;
    }
    summaries
}

/// Smallest and largest face distance, `None` for an empty frame.
fn distance_range(frame: &Frame) -> Option<(f32, f32)> {
    let mut distances = frame.faces.iter().map(|f| f.distance);
    let first = distances.next()?;
    Some(distances.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d))))
}

/// Rows of the per-layer list shown before it is cut off.
const MAX_LAYER_ROWS: usize = 12;

/// Draws camera state, build statistics and the per-layer list on the left,
/// and the colour legend and layer-vs-distance plot on the right.
pub fn draw_debug_overlay(frame: &Frame, camera: &Camera, scheme: ColorScheme) {
    let stats = &frame.diagnostics;
    let position = camera.position();
    let rotation = camera.rotation();
    let layers = layer_summaries(frame);

    let mut lines = vec![
        format!(
            "Position: ({:.1}, {:.1}, {:.1})",
            position.x, position.y, position.z
        ),
        format!(
            "Rotation: pitch {:.1} yaw {:.1} roll {:.1}",
            rotation.x, rotation.y, rotation.z
        ),
        format!("FOV: {:.1}", camera.fov()),
        format!("FPS: {}", get_fps()),
        format!(
            "Faces: {} in tree, {} ordered, {} on screen",
            stats.total_faces,
            stats.layer_count,
            frame.faces.len()
        ),
        format!(
            "Tree depth: {} | Split fragments: {}",
            stats.tree_depth, stats.split_fragments
        ),
        match distance_range(frame) {
            Some((lo, hi)) => format!("Distance: {lo:.1} - {hi:.1}"),
            None => "Distance: -".to_string(),
        },
        format!(
            "Build: {:.2}ms | Traverse: {:.2}ms",
            stats.build_time_ms, stats.traverse_time_ms
        ),
        format!("Color scheme: {scheme} (C)"),
        String::new(),
        "Layers (back to front):".to_string(),
    ];
    for summary in layers.iter().take(MAX_LAYER_ROWS) {
        let Rgb { r, g, b } = summary.color;
        lines.push(format!(
            "  {}: {} faces, avg dist {:.1}, color ({r}, {g}, {b})",
            summary.layer, summary.faces, summary.avg_distance
        ));
    }
    if layers.len() > MAX_LAYER_ROWS {
        lines.push(format!("  ... {} more", layers.len() - MAX_LAYER_ROWS));
    }

    draw_rectangle(
        5.0,
        5.0,
        440.0,
        20.0 * lines.len() as f32 + 10.0,
        Color::new(0.0, 0.0, 0.0, 0.6),
    );
    for (i, line) in lines.iter().enumerate() {
        draw_text(line, 12.0, 25.0 + 20.0 * i as f32, 18.0, WHITE);
    }

    draw_color_legend(scheme);
    draw_layer_plot(&layers);

    draw_text(
        "WASD move | Shift/Ctrl up/down | arrows/mouse look | Alt+arrows roll",
        12.0,
        screen_height() - 30.0,
        16.0,
        GRAY,
    );
    draw_text(
        "+/- zoom | R reset | Space stabilize | F1 debug | F2 layers | C colors | Esc quit",
        12.0,
        screen_height() - 12.0,
        16.0,
        GRAY,
    );
}

/// Gradient of the scheme from the farthest layer (left) to the nearest.
fn draw_color_legend(scheme: ColorScheme) {
    const WIDTH: f32 = 200.0;
    const HEIGHT: f32 = 20.0;
    const STEPS: usize = 20;

    let x = screen_width() - WIDTH - 10.0;
    let y = 10.0;
    draw_rectangle(
        x - 5.0,
        y - 5.0,
        WIDTH + 10.0,
        HEIGHT + 50.0,
        Color::from_rgba(50, 50, 50, 220),
    );
    draw_text(&format!("BSP layers ({scheme})"), x, y + 12.0, 16.0, WHITE);

    let bar_y = y + 18.0;
    let segment = WIDTH / STEPS as f32;
    for i in 0..STEPS {
        let color = scheme.color(Rgb::new(128, 128, 128), i, STEPS);
        draw_rectangle(x + i as f32 * segment, bar_y, segment + 1.0, HEIGHT, to_color(color));
    }
    draw_rectangle_lines(x, bar_y, WIDTH, HEIGHT, 1.0, WHITE);
    draw_text("Back", x, bar_y + HEIGHT + 14.0, 16.0, WHITE);
    draw_text("Front", x + WIDTH - 36.0, bar_y + HEIGHT + 14.0, 16.0, WHITE);
}

/// Scatter of layer index (up) against face distance (right).
fn draw_layer_plot(layers: &[LayerSummary]) {
    const WIDTH: f32 = 250.0;
    const HEIGHT: f32 = 150.0;
    const AXIS: Color = Color::new(0.78, 0.78, 0.78, 1.0);

    let Some(last) = layers.last() else {
        return;
    };
    let x = screen_width() - WIDTH - 10.0;
    let y = 110.0;
    draw_rectangle(
        x - 5.0,
        y - 25.0,
        WIDTH + 10.0,
        HEIGHT + 50.0,
        Color::from_rgba(30, 30, 30, 220),
    );
    draw_text("Layer vs distance", x, y - 8.0, 16.0, WHITE);

    let (lo, hi) = layers
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), l| {
            (lo.min(l.avg_distance), hi.max(l.avg_distance))
        });
    let span = (hi - lo).max(0.1);
    let total = (last.layer + 1) as f32;

    for layer in layers {
        let px = x + (layer.avg_distance - lo) / span * WIDTH;
        let py = y + HEIGHT - (layer.layer + 1) as f32 / (total + 1.0) * HEIGHT;
        draw_circle(px, py, 3.0, to_color(layer.color));
    }

    draw_line(x, y + HEIGHT, x + WIDTH, y + HEIGHT, 1.0, AXIS);
    draw_line(x, y, x, y + HEIGHT, 1.0, AXIS);
    draw_text(&format!("{lo:.1}"), x - 5.0, y + HEIGHT + 16.0, 16.0, AXIS);
    draw_text("Distance", x + WIDTH / 2.0 - 28.0, y + HEIGHT + 16.0, 16.0, AXIS);
    draw_text(&format!("{hi:.1}"), x + WIDTH - 24.0, y + HEIGHT + 16.0, 16.0, AXIS);
}

/// Maps keyboard and mouse state to camera commands.
pub struct CameraController {
    /// World units per second.
    pub move_speed: f32,
    /// Degrees per second for arrow keys.
    pub rotate_speed: f32,
    /// Degrees per pixel of mouse drag.
    pub mouse_sensitivity: f32,
    /// Degrees of field of view per wheel step.
    pub wheel_zoom: f32,
    /// Degrees of field of view per frame with +/- held.
    pub key_zoom: f32,
    last_mouse: Option<Vec2>,
}

impl Default for CameraController {
    fn default() -> Self {
        Self {
            move_speed: 10.0,
            rotate_speed: 60.0,
            mouse_sensitivity: 0.2,
            wheel_zoom: 5.0,
            key_zoom: 2.0,
            last_mouse: None,
        }
    }
}

impl CameraController {
    /// Applies this frame's input to the camera. Returns true if it moved.
    pub fn update(&mut self, camera: &mut Camera) -> bool {
        let dt = get_frame_time();
        let mut changed = false;

        if is_key_pressed(KeyCode::R) {
            camera.reset();
            changed = true;
        }
        if is_key_pressed(KeyCode::Space) {
            camera.stabilize();
            changed = true;
        }

        changed |= self.walk(camera, dt);
        changed |= self.look(camera, dt);
        changed |= self.zoom(camera);
        changed
    }

    /// WASD walks on the horizontal plane along the yaw direction,
    /// Shift/Ctrl move straight up and down.
    fn walk(&self, camera: &mut Camera, dt: f32) -> bool {
        let yaw = camera.rotation().y.to_radians();
        let forward = Vector3::new(-yaw.sin(), 0.0, -yaw.cos());
        let right = Vector3::new(yaw.cos(), 0.0, -yaw.sin());

        let mut movement = Vector3::zeros();
        if is_key_down(KeyCode::W) {
            movement -= forward;
        }
        if is_key_down(KeyCode::S) {
            movement += forward;
        }
        if is_key_down(KeyCode::A) {
            movement += right;
        }
        if is_key_down(KeyCode::D) {
            movement -= right;
        }
        if is_key_down(KeyCode::LeftShift) {
            movement.y += 1.0;
        }
        if is_key_down(KeyCode::LeftControl) {
            movement.y -= 1.0;
        }

        match movement.try_normalize(f32::EPSILON) {
            Some(direction) => {
                camera.translate(direction * self.move_speed * dt);
                true
            }
            None => false,
        }
    }

    fn look(&mut self, camera: &mut Camera, dt: f32) -> bool {
        let step = self.rotate_speed * dt;
        let mut delta = Vector3::zeros();

        if is_key_down(KeyCode::LeftAlt) || is_key_down(KeyCode::RightAlt) {
            if is_key_down(KeyCode::Left) {
                delta.z += step;
            } else if is_key_down(KeyCode::Right) {
                delta.z -= step;
            }
        } else {
            if is_key_down(KeyCode::Up) {
                delta.x += step;
            } else if is_key_down(KeyCode::Down) {
                delta.x -= step;
            }
            if is_key_down(KeyCode::Left) {
                delta.y += step;
            } else if is_key_down(KeyCode::Right) {
                delta.y -= step;
            }
        }

        let mouse = Vec2::from(mouse_position());
        let drag = self.last_mouse.map_or(Vec2::ZERO, |last| mouse - last);
        self.last_mouse = Some(mouse);

        if is_mouse_button_down(MouseButton::Left) {
            delta.x -= drag.y * self.mouse_sensitivity;
            delta.y -= drag.x * self.mouse_sensitivity;
        } else if is_mouse_button_down(MouseButton::Middle) {
            delta.z += drag.x * self.mouse_sensitivity;
        }

        if delta == Vector3::zeros() {
            return false;
        }
        camera.rotate(delta);
        true
    }

    fn zoom(&self, camera: &mut Camera) -> bool {
        let mut fov = camera.fov();
        let wheel = mouse_wheel().1;
        if wheel != 0.0 {
            fov -= wheel.signum() * self.wheel_zoom;
        }
        if is_key_down(KeyCode::Equal) || is_key_down(KeyCode::KpAdd) {
            fov -= self.key_zoom;
        }
        if is_key_down(KeyCode::Minus) || is_key_down(KeyCode::KpSubtract) {
            fov += self.key_zoom;
        }

        let fov = fov.clamp(FOV_RANGE.0, FOV_RANGE.1);
        if fov == camera.fov() {
            return false;
        }
        camera.set_fov(fov);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_scene_has_every_kind() {
        let scene = sample_scene(None);
        assert_eq!(scene.len(), 27);
        for kind in ShapeKind::ALL {
            assert!(scene.objects().iter().any(|s| s.kind() == kind));
        }
    }

    #[test]
    fn sample_scene_filters_by_kind() {
        let scene = sample_scene(Some(ShapeKind::Cylinder));
        assert_eq!(scene.len(), 4);
        assert!(scene.objects().iter().all(|s| s.kind() == ShapeKind::Cylinder));
    }

    fn screen_face(layer_index: usize, distance: f32) -> painter_bsp::ScreenFace {
        painter_bsp::ScreenFace {
            screen_points: Vec::new(),
            color: Rgb::new(10, 20, 30),
            layer_index,
            distance,
        }
    }

    #[test]
    fn layer_summaries_average_each_layer_in_order() {
        let frame = Frame {
            faces: vec![
                screen_face(0, 9.0),
                screen_face(2, 4.0),
                screen_face(2, 6.0),
                screen_face(5, 1.5),
            ],
            ..Frame::default()
        };

        let summaries = layer_summaries(&frame);
        let rows: Vec<(usize, usize, f32)> = summaries
            .iter()
            .map(|s| (s.layer, s.faces, s.avg_distance))
            .collect();
        assert_eq!(rows, vec![(0, 1, 9.0), (2, 2, 5.0), (5, 1, 1.5)]);
        assert!(summaries.iter().all(|s| s.color == Rgb::new(10, 20, 30)));
        assert_eq!(distance_range(&frame), Some((1.5, 9.0)));
    }

    #[test]
    fn empty_frame_has_no_layers() {
        let frame = Frame::default();
        assert!(layer_summaries(&frame).is_empty());
        assert_eq!(distance_range(&frame), None);
    }
}
