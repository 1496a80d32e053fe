use clap::Parser;
use macroquad::prelude::*;
use painter_bsp::{Camera, ColorScheme, NearClip, Painter, PainterConfig, ShapeKind};
use painter_viz::{CameraController, FOV_RANGE, draw_debug_overlay, draw_frame, sample_scene};

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Painter's algorithm demo ordered by a BSP tree", long_about = None)]
struct Args {
    /// Window width in pixels
    #[arg(long, default_value_t = 1024)]
    width: i32,

    /// Window height in pixels
    #[arg(long, default_value_t = 768)]
    height: i32,

    /// Vertical field of view in degrees
    #[arg(long, default_value_t = 90.0)]
    fov: f32,

    /// Near clip plane distance
    #[arg(long, default_value_t = 0.1)]
    near: f32,

    /// Far clip plane distance
    #[arg(long, default_value_t = 100.0)]
    far: f32,

    /// Face colouring: base, rainbow, heatmap or blues
    #[arg(long, default_value_t = ColorScheme::Rainbow)]
    color_scheme: ColorScheme,

    /// Clip faces crossing the near plane: on or off
    #[arg(long, default_value_t = NearClip::Disabled)]
    near_clip: NearClip,

    /// Only place objects of this kind
    #[arg(long)]
    only: Option<ShapeKind>,

    /// Build the tree once and only re-run the traversal on camera moves
    #[arg(long)]
    static_tree: bool,
}

fn window_conf() -> Conf {
    let args = Args::parse();
    Conf {
        window_title: "Painter's Algorithm & BSP".to_owned(),
        window_width: args.width,
        window_height: args.height,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();
    let args = Args::parse();

    let scene = sample_scene(args.only);
    log::info!("sample scene with {} objects", scene.len());

    let mut camera = Camera::new(
        args.width as f32,
        args.height as f32,
        args.fov.clamp(FOV_RANGE.0, FOV_RANGE.1),
        args.near,
        args.far,
    );
    let mut painter = Painter::new(PainterConfig {
        color_scheme: args.color_scheme,
        near_clip: args.near_clip,
    });
    if args.static_tree {
        painter.build(&scene);
    }

    let mut controller = CameraController::default();
    let mut show_debug = false;
    let mut show_layer_numbers = false;

    loop {
        if is_key_pressed(KeyCode::Escape) {
            break;
        }
        if is_key_pressed(KeyCode::F1) {
            show_debug = !show_debug;
        }
        if is_key_pressed(KeyCode::F2) {
            show_layer_numbers = !show_layer_numbers;
        }
        if is_key_pressed(KeyCode::C) {
            let next = painter.config().color_scheme.next();
            log::info!("color scheme: {next}");
            painter.set_color_scheme(next);
        }

        if (screen_width(), screen_height()) != (camera.width(), camera.height()) {
            camera.set_viewport(screen_width(), screen_height());
        }
        controller.update(&mut camera);

        let frame = if args.static_tree {
            painter.render(&camera)
        } else {
            painter.evaluate_frame(&scene, &camera)
        };

        clear_background(BLACK);
        draw_frame(&frame, show_layer_numbers);
        if show_debug {
            draw_debug_overlay(&frame, &camera, painter.config().color_scheme);
        }

        next_frame().await
    }
}
