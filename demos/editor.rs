use anyhow::Context;
use macroquad::prelude::*;
use macroquad_tile_editor::spatial::coords::{anchor_bounds, cell_to_anchor, CELL_SIZE};
use macroquad_tile_editor::{Editor, EditorConfig, NoIcons, Tool};
use std::collections::HashMap;
use std::path::Path;

fn window_conf() -> Conf {
    Conf {
        window_title: "Tile Editor".into(),
        window_width: 1280,
        window_height: 720,
        ..Default::default()
    }
}

const SCROLL_SPEED: f32 = 400.0;

struct Textures {
    tiles: HashMap<u32, Texture2D>,
    objects: HashMap<String, Texture2D>,
}

async fn load_textures(editor: &Editor) -> Textures {
    let mut tiles = HashMap::new();
    for def in editor.tile_catalog().tiles().iter().filter(|t| !t.is_empty()) {
        if let Ok(tex) = load_texture(&def.asset_ref).await {
            tiles.entry(def.id).or_insert(tex);
        }
    }
    let mut objects = HashMap::new();
    for def in editor.object_catalog().defs() {
        if let Ok(tex) = load_texture(&def.icon_ref).await {
            objects.insert(def.key.clone(), tex);
        }
    }
    Textures { tiles, objects }
}

fn draw_map(editor: &Editor, tex: &Textures, camera: Vec2) {
    let map = editor.map();
    for (row, col, &id) in map.tiles().iter().filter(|(_, _, id)| **id != 0) {
        let x = col as f32 * CELL_SIZE - camera.x;
        let y = row as f32 * CELL_SIZE - camera.y;
        match tex.tiles.get(&id) {
            Some(t) => draw_texture(t, x, y, WHITE),
            None => draw_rectangle(x, y, CELL_SIZE, CELL_SIZE, DARKGRAY),
        }
    }
    let (w, h) = (map.cols() as f32 * CELL_SIZE, map.rows() as f32 * CELL_SIZE);
    draw_rectangle_lines(-camera.x, -camera.y, w, h, 2.0, GRAY);

    let selected = editor.selected_placed().map(|hit| hit.object.id);
    for hit in map.placed() {
        let (iw, ih) = editor.object_catalog().icon_size(&hit.object.key);
        let r = anchor_bounds(cell_to_anchor(hit.row, hit.col, hit.object.offset_x), iw, ih);
        let (x, y) = (r.x - camera.x, r.y - camera.y);
        match tex.objects.get(&hit.object.key) {
            Some(t) => draw_texture(t, x, y, WHITE),
            None => draw_rectangle(x, y, r.w, r.h, ORANGE),
        }
        if selected == Some(hit.object.id) {
            draw_rectangle_lines(x, y, r.w, r.h, 2.0, YELLOW);
        }
    }
}

fn draw_hud(editor: &Editor, status: &str) {
    let map = editor.map();
    let brush = match editor.tool() {
        Tool::Tiles => format!("tile {:?}", editor.selected_tile()),
        Tool::Objects => {
            let section = editor
                .selected_object()
                .and_then(|key| editor.object_catalog().get(key))
                .map_or("object", |def| def.category.label());
            format!("{section} {:?}", editor.selected_object())
        }
    };
    let attrs = editor.attrs();
    let lines = [
        format!("{} ({}x{})  {brush}", map.name, map.rows(), map.cols()),
        format!("patrol {}  direction {:?}", attrs.patrol_distance, attrs.direction),
        "LMB paint  RMB erase  MMB select  Tab next brush  1/2 tool".to_owned(),
        "Ctrl+Z undo  Ctrl+Y redo  Ctrl+S save  Ctrl+O open  +/- resize".to_owned(),
        status.to_owned(),
    ];
    let top = screen_height() - 24.0 * lines.len() as f32;
    for (i, line) in lines.iter().enumerate() {
        draw_text(line, 10.0, top + 24.0 * i as f32, 22.0, WHITE);
    }
}

fn next_brush(editor: &mut Editor) {
    match editor.tool() {
        Tool::Tiles => {
            let groups = editor.tile_catalog().palette_groups();
            let palette: Vec<u32> = groups
                .iter()
                .flatten()
                .filter(|t| !t.is_empty())
                .map(|t| t.visual_id)
                .collect();
            let current = palette
                .iter()
                .position(|&v| editor.tile_catalog().by_visual_id(v).map(|t| t.id) == editor.selected_tile());
            let next = current.map_or(0, |i| (i + 1) % palette.len());
            if let Some(&visual_id) = palette.get(next) {
                editor.select_tile(visual_id);
            }
        }
        Tool::Objects => {
            let keys: Vec<String> = editor
                .object_catalog()
                .sections()
                .into_iter()
                .flat_map(|(_, defs)| defs)
                .map(|d| d.key.clone())
                .collect();
            let current = keys.iter().position(|k| Some(k.as_str()) == editor.selected_object());
            let next = current.map_or(0, |i| (i + 1) % keys.len());
            if let Some(key) = keys.get(next) {
                editor.select_object(key);
            }
        }
    }
}

fn handle_shortcuts(editor: &mut Editor, status: &mut String) -> anyhow::Result<()> {
    let ctrl = is_key_down(KeyCode::LeftControl) || is_key_down(KeyCode::RightControl);
    if ctrl && is_key_pressed(KeyCode::Z) {
        editor.undo();
    }
    if ctrl && is_key_pressed(KeyCode::Y) {
        editor.redo();
    }
    if ctrl && is_key_pressed(KeyCode::S) {
        let (tiles, objects) = editor.save_to_dir(Path::new("."))?;
        *status = format!("saved {} and {}", tiles.display(), objects.display());
    }
    if ctrl && is_key_pressed(KeyCode::O) {
        let name = editor.map().name.clone();
        editor
            .load_from_dir(Path::new("."), &name)
            .with_context(|| format!("Opening '{name}'"))?;
        *status = format!("opened {name}");
    }
    if is_key_pressed(KeyCode::Key1) {
        editor.set_tool(Tool::Tiles);
    }
    if is_key_pressed(KeyCode::Key2) {
        editor.set_tool(Tool::Objects);
    }
    if is_key_pressed(KeyCode::Tab) {
        next_brush(editor);
    }
    if is_key_pressed(KeyCode::Equal) {
        editor.resize(editor.map().rows() + 1, editor.map().cols() + 1);
    }
    if is_key_pressed(KeyCode::Minus) {
        editor.resize(editor.map().rows().saturating_sub(1), editor.map().cols().saturating_sub(1));
    }
    Ok(())
}

fn handle_pointer(editor: &mut Editor, camera: Vec2) {
    let (mx, my) = mouse_position();
    let world = vec2(mx, my) + camera;

    if is_mouse_button_pressed(MouseButton::Left) || is_mouse_button_pressed(MouseButton::Right) {
        editor.begin_gesture();
    }
    if is_mouse_button_down(MouseButton::Left) {
        editor.apply_at_point(world.x, world.y, false);
    } else if is_mouse_button_down(MouseButton::Right) {
        editor.apply_at_point(world.x, world.y, true);
    }
    if is_mouse_button_pressed(MouseButton::Middle) {
        editor.select_object_at(world.x, world.y);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = if Path::new("editor.json").exists() {
        EditorConfig::load("editor.json").context("Reading editor.json")?
    } else {
        EditorConfig::default()
    };
    let mut editor = Editor::with_standard_catalogs(config, &NoIcons);
    editor.select_tile(1);
    let textures = load_textures(&editor).await;

    let mut camera = Vec2::ZERO;
    let mut status = String::new();
    loop {
        let dt = get_frame_time();
        if is_key_down(KeyCode::Left) {
            camera.x -= SCROLL_SPEED * dt;
        }
        if is_key_down(KeyCode::Right) {
            camera.x += SCROLL_SPEED * dt;
        }
        if is_key_down(KeyCode::Up) {
            camera.y -= SCROLL_SPEED * dt;
        }
        if is_key_down(KeyCode::Down) {
            camera.y += SCROLL_SPEED * dt;
        }

        if let Err(e) = handle_shortcuts(&mut editor, &mut status) {
            status = format!("{e:#}");
        }
        handle_pointer(&mut editor, camera);

        clear_background(BLACK);
        draw_map(&editor, &textures, camera);
        draw_hud(&editor, &status);

        next_frame().await;
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("{e:#}");
    }
}
