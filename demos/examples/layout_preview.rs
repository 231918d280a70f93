// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Preview a small layout: paint it, pick panes, pan and zoom.
//!
//! This example shows how a host shell drives:
//! - `understory_pane_tree` to describe a layout (pictures, a parts reference
//!   with an external sub-tree and an override pane, a window, a hidden pane),
//! - `understory_layout_viewer` for events, selection and painting,
//! - `understory_pane_render`'s `RecordingSurface` in place of a GPU backend.
//!
//! Run:
//! - `cargo run -p understory_demos --example layout_preview`
//! - `RUST_LOG=trace cargo run -p understory_demos --example layout_preview`

use kurbo::{Point, Size, Vec2};
use tracing_subscriber::EnvFilter;
use understory_layout_viewer::{
    LayoutViewer, Modifiers, PointerEvent, SettingsError, SettingsStore, ViewerConfig,
};
use understory_pane_render::{
    ChannelSwizzle, DrawCommand, RecordingSurface, TextureBinding, TextureError, TextureHandle,
    TextureResource,
};
use understory_pane_tree::{
    CornerColors, FilterMode, HorizontalOrigin, Layout, LocalPane, Material, Origin, PaneFlags,
    PaneId, PaneKind, PaneTransform, PaneTree, PartsRef, Picture, Rgba8, TexCoordSet, TextureRef,
    TextureTransform, Vec3, VerticalOrigin, Window, WrapMode,
};

/// Stand-in for a decoded texture; "uploading" just hands out its id.
#[derive(Debug)]
struct DemoTexture {
    id: u32,
    broken: bool,
}

impl TextureResource for DemoTexture {
    fn upload(&mut self) -> Result<TextureHandle, TextureError> {
        if self.broken {
            return Err(TextureError::Upload {
                name: format!("texture #{}", self.id),
                reason: "unsupported format".into(),
            });
        }
        Ok(TextureHandle(self.id))
    }

    fn channel_swizzle(&self) -> ChannelSwizzle {
        ChannelSwizzle::IDENTITY
    }

    fn dispose(&mut self) {
        tracing::debug!(id = self.id, "dispose texture");
    }
}

/// Prints instead of writing a settings file.
struct PrintSettings;

impl SettingsStore for PrintSettings {
    fn save(&mut self, config: &ViewerConfig) -> Result<(), SettingsError> {
        println!("settings saved: background = {:?}", config.background);
        Ok(())
    }
}

fn picture(texture: &str, colors: CornerColors) -> PaneKind {
    // Raw values as stored in the layout file: repeat, mirror, near.
    let mut map = TextureRef::new(texture);
    map.wrap_u = WrapMode::from_raw(1);
    map.wrap_v = WrapMode::from_raw(2);
    map.mag_filter = FilterMode::from_raw(0);
    PaneKind::Picture(Picture {
        corner_colors: colors,
        tex_coords: vec![TexCoordSet::default()],
        material: Some(Material {
            name: format!("{texture}_mat"),
            texture_maps: vec![map],
            texture_transforms: vec![TextureTransform {
                scale: Vec2::new(2.0, 2.0),
                ..TextureTransform::default()
            }],
        }),
    })
}

fn pane(name: &str, x: f64, y: f64, w: f64, h: f64, kind: PaneKind) -> LocalPane {
    LocalPane {
        name: name.into(),
        transform: PaneTransform::from_translate(x, y),
        size: Size::new(w, h),
        kind,
        ..LocalPane::default()
    }
}

struct Demo {
    layout: Layout,
    button: PaneId,
}

fn build_layout() -> Demo {
    let mut tree = PaneTree::new();
    let root = tree.insert(None, pane("RootPane", 0.0, 0.0, 1280.0, 720.0, PaneKind::Container));

    tree.insert(
        Some(root),
        pane(
            "P_Bg",
            0.0,
            0.0,
            1200.0,
            680.0,
            picture("bg", CornerColors::uniform(Rgba8::opaque(30, 60, 90))),
        ),
    );

    // A half-transparent menu whose children inherit its alpha.
    let menu = tree.insert(
        Some(root),
        LocalPane {
            alpha: 160,
            ..pane("N_Menu", -300.0, 0.0, 400.0, 500.0, PaneKind::Container)
        },
    );
    let button = tree.insert(
        Some(menu),
        LocalPane {
            origin: Origin::new(HorizontalOrigin::Left, VerticalOrigin::Top),
            alpha: 200,
            ..pane(
                "P_Button",
                -150.0,
                200.0,
                300.0,
                80.0,
                picture(
                    "button",
                    CornerColors {
                        top_left: Rgba8::WHITE,
                        top_right: Rgba8::WHITE,
                        bottom_right: Rgba8::opaque(180, 180, 180),
                        bottom_left: Rgba8::opaque(180, 180, 180),
                    },
                ),
            )
        },
    );

    // A parts pane whose external layout lives beside the main tree.
    let parts = tree.insert(
        Some(root),
        LocalPane {
            transform: PaneTransform {
                translate: Vec3::new(300.0, -100.0, 0.0),
                rotate: Vec3::new(0.0, 0.0, 10.0),
                ..PaneTransform::IDENTITY
            },
            ..pane(
                "L_Frame",
                0.0,
                0.0,
                200.0,
                200.0,
                PaneKind::PartsRef(PartsRef {
                    part_name: "frame_part".into(),
                    ..PartsRef::default()
                }),
            )
        },
    );
    let external = tree.insert(None, pane("frame_root", 0.0, 0.0, 200.0, 200.0, PaneKind::Container));
    tree.insert(
        Some(external),
        pane("P_Gem", 0.0, 40.0, 64.0, 64.0, picture("missing", CornerColors::default())),
    );
    let label = tree.insert(None, pane("T_Label", 300.0, -220.0, 160.0, 30.0, PaneKind::Container));
    tree.set_external_part(parts, Some(external))
        .expect("parts pane was just inserted");
    tree.add_part_property(parts, "T_Label", Some(label))
        .expect("parts pane was just inserted");

    tree.insert(
        Some(root),
        pane("W_Dialog", 0.0, -250.0, 300.0, 120.0, PaneKind::Window(Window { frame_count: 8 })),
    );
    tree.insert(
        Some(root),
        LocalPane {
            flags: PaneFlags::INFLUENCES_CHILD_ALPHA,
            ..pane("N_Debug", 0.0, 0.0, 50.0, 50.0, PaneKind::Container)
        },
    );

    let layout = Layout::new("demo.bflyt", tree, root).with_textures(["bg", "button", "missing"]);
    Demo { layout, button }
}

fn summarize(surface: &RecordingSurface) {
    let mut textured = 0;
    let mut placeholder = 0;
    for (_, quad) in surface.fills() {
        match quad.texture {
            TextureBinding::Texture { .. } => textured += 1,
            TextureBinding::Placeholder { .. } => placeholder += 1,
            TextureBinding::None => {}
        }
    }
    let lines = surface
        .commands()
        .iter()
        .filter(|c| matches!(c, DrawCommand::Line { .. }))
        .count();
    println!(
        "  {} draw calls: {} lines, {} textured quads, {} placeholder quads",
        surface.draw_count(),
        lines,
        textured,
        placeholder
    );
}

fn pane_name(viewer: &LayoutViewer<DemoTexture>, id: Option<PaneId>) -> String {
    id.and_then(|id| viewer.layout()?.tree.get(id))
        .map_or_else(|| "nothing".to_string(), |p| p.name.clone())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let Demo { layout, button } = build_layout();
    let viewport = Size::new(1280.0, 720.0);

    let mut viewer: LayoutViewer<DemoTexture> = LayoutViewer::new(ViewerConfig::default());
    viewer.on_resize(viewport);
    viewer
        .reset_layout(
            layout,
            [
                ("bg".to_string(), DemoTexture { id: 1, broken: false }),
                ("button".to_string(), DemoTexture { id: 2, broken: true }),
            ],
        )
        .expect("demo layout is acyclic");

    let mut surface = RecordingSurface::new();
    let stats = viewer.paint(&mut surface).expect("layout is loaded");
    println!("first frame: {stats:?}");
    summarize(&surface);

    // Click inside the button. Hits are first-match in tree order, so which
    // pane is picked depends on the mode.
    let button_world = viewer
        .layout()
        .and_then(|l| l.tree.world_transform(button))
        .expect("button is alive");
    let target = viewer
        .camera()
        .layout_to_device(button_world * Point::new(20.0, -20.0), viewport);
    for (mode, event) in [
        ("alt-pick", PointerEvent::primary(target).with_modifiers(Modifiers::ALT)),
        ("plain", PointerEvent::primary(target)),
    ] {
        let hit = viewer.on_pointer_down(event);
        viewer.on_pointer_up(event);
        println!("{mode} at {target:?}: {}", pane_name(&viewer, hit));
    }

    // Plain click outside every child: clears the selection and starts a drag.
    let start = Point::new(10.0, 10.0);
    let hit = viewer.on_pointer_down(PointerEvent::primary(start));
    println!(
        "plain click at {start:?}: {}, selected: {}",
        pane_name(&viewer, hit),
        viewer.selection().len()
    );
    viewer.on_pointer_move(start + Vec2::new(30.0, 10.0));
    viewer.on_pointer_move(start + Vec2::new(60.0, 20.0));
    viewer.on_pointer_up(PointerEvent::primary(start + Vec2::new(60.0, 20.0)));
    for _ in 0..3 {
        viewer.on_scroll(120.0);
    }
    println!(
        "camera: pan = {:?}, zoom = {:.1}",
        viewer.camera().pan(),
        viewer.camera().zoom()
    );

    viewer
        .update_background_color(Rgba8::opaque(0x20, 0x20, 0x28), &mut PrintSettings)
        .expect("printing never fails");
    if viewer.take_redraw_request() {
        surface.take();
        let stats = viewer.paint(&mut surface).expect("layout is loaded");
        println!("second frame: {stats:?}");
        summarize(&surface);
    }

    viewer.close();
}
