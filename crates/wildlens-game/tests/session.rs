//! Frame-stepped sessions through the full game world.

use std::path::Path;

use glam::Vec3;
use wildlens_config::Config;
use wildlens_ecs::{Action, InputState, Name, Position};
use wildlens_game::{
    AnimalDef, AudioCue, Autopilot, FrameReport, Game, GameError, ObstacleDef, PlayerStart,
    RouteDef, SceneDef, SceneError, SceneLibrary,
};
use wildlens_input::{ActionResolver, InputMap, KeyboardState, MouseState};
use wildlens_photo::{CaptureOutcome, IgnoreReason};
use wildlens_player::{RigState, ViewpointKind};

const DT: f32 = 1.0 / 60.0;

fn test_config(output: &Path) -> Config {
    let mut config = Config::default();
    config.capture.output_root = Some(output.to_path_buf());
    config.capture.width = 64;
    config.capture.height = 36;
    config.scene.start_scene = "range".to_string();
    config.scene.next_scene = "pond".to_string();
    config
}

fn animal(name: &str, position: Vec3, points: u32) -> AnimalDef {
    AnimalDef {
        name: name.to_string(),
        description: format!("{name} description"),
        points,
        position,
        half_extents: Vec3::splat(0.5),
        call_sound: Some(format!("{name}_call")),
        route: None,
    }
}

/// One stag straight ahead of the player at eye height.
fn range_scene() -> SceneDef {
    SceneDef {
        name: "range".to_string(),
        player: PlayerStart::default(),
        animals: vec![animal("stag", Vec3::new(0.0, 1.6, -10.0), 120)],
        obstacles: Vec::new(),
    }
}

/// A single animal behind the player.
fn pond_scene() -> SceneDef {
    SceneDef {
        name: "pond".to_string(),
        player: PlayerStart::default(),
        animals: vec![animal("newt", Vec3::new(0.0, 1.6, 10.0), 50)],
        obstacles: Vec::new(),
    }
}

fn library() -> SceneLibrary {
    let mut library = SceneLibrary::new(None);
    library.insert(range_scene());
    library.insert(pond_scene());
    library
}

fn new_game(output: &Path) -> Game {
    Game::with_library(test_config(output), library()).unwrap()
}

fn pressed(action: Action) -> InputState {
    let mut input = InputState::default();
    input.press(action);
    input
}

fn idle(game: &mut Game, frames: usize) -> Vec<FrameReport> {
    (0..frames)
        .map(|_| game.step(DT, &InputState::default()).unwrap())
        .collect()
}

/// Click the switch and wait for the rig to settle in photography.
fn enter_photography(game: &mut Game) {
    game.step(DT, &pressed(Action::SwitchView)).unwrap();
    for _ in 0..120 {
        if game.rig().state() == RigState::Photography {
            return;
        }
        game.step(DT, &InputState::default()).unwrap();
    }
    panic!("rig never reached photography");
}

fn photo_count(dir: &Path) -> usize {
    match std::fs::read_dir(dir) {
        Ok(entries) => entries.count(),
        Err(_) => 0,
    }
}

#[test]
fn test_capture_saves_photo_and_scores() {
    let dir = tempfile::tempdir().unwrap();
    let mut game = new_game(dir.path());
    enter_photography(&mut game);

    let report = game.step(DT, &pressed(Action::Capture)).unwrap();

    assert_eq!(report.score, 120);
    assert_eq!(report.saved_photos.len(), 1);
    let path = &report.saved_photos[0];
    assert!(path.exists());
    assert!(path.starts_with(dir.path().join("Fotos")));
    let name = path.file_name().unwrap().to_string_lossy();
    assert!(name.starts_with("Foto_") && name.ends_with(".png"));

    assert!(matches!(&report.captures[..], [CaptureOutcome::Captured(r)] if r.score == 120));
    assert_eq!(
        report.audio,
        vec![AudioCue::Shutter, AudioCue::AnimalCall("stag_call".to_string())]
    );
    assert_eq!(game.hud().score_text, "Score: 120");
    assert_eq!(game.hud().description.as_deref(), Some("stag description"));
}

#[test]
fn test_capture_during_cooldown_is_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let mut game = new_game(dir.path());
    enter_photography(&mut game);

    game.step(DT, &pressed(Action::Capture)).unwrap();
    let second = game.step(DT, &pressed(Action::Capture)).unwrap();
    assert_eq!(
        second.captures,
        vec![CaptureOutcome::Ignored(IgnoreReason::Busy)]
    );
    assert!(second.saved_photos.is_empty());
    assert_eq!(second.score, 120);

    idle(&mut game, 40);
    let third = game.step(DT, &pressed(Action::Capture)).unwrap();
    assert_eq!(third.saved_photos.len(), 1);
    assert_eq!(third.score, 240);
    assert_eq!(photo_count(&dir.path().join("Fotos")), 2);
}

#[test]
fn test_capture_needs_photography_viewpoint() {
    let dir = tempfile::tempdir().unwrap();
    let mut game = new_game(dir.path());

    let report = game.step(DT, &pressed(Action::Capture)).unwrap();
    assert_eq!(
        report.captures,
        vec![CaptureOutcome::Ignored(IgnoreReason::NotPhotographing)]
    );
    assert_eq!(report.score, 0);
    assert_eq!(photo_count(&dir.path().join("Fotos")), 0);
}

#[test]
fn test_empty_capture_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = test_config(dir.path());
    config.scene.start_scene = "pond".to_string();
    let mut game = Game::with_library(config, library()).unwrap();
    enter_photography(&mut game);

    let report = game.step(DT, &pressed(Action::Capture)).unwrap();
    assert_eq!(report.captures, vec![CaptureOutcome::Empty]);
    assert!(report.saved_photos.is_empty());
    assert!(report.audio.is_empty());
    assert_eq!(report.score, 0);
    assert_eq!(game.hud().flash_opacity, 0.0);
}

#[test]
fn test_occluded_animal_scores_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut scene = range_scene();
    scene.obstacles.push(ObstacleDef {
        name: "wall".to_string(),
        center: Vec3::new(0.0, 1.5, -5.0),
        half_extents: Vec3::new(2.0, 1.5, 0.2),
    });
    let mut library = library();
    library.insert(scene);
    let mut game = Game::with_library(test_config(dir.path()), library).unwrap();
    enter_photography(&mut game);

    let report = game.step(DT, &pressed(Action::Capture)).unwrap();
    assert_eq!(report.captures, vec![CaptureOutcome::Empty]);
    assert_eq!(report.score, 0);
}

#[test]
fn test_switch_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let mut game = new_game(dir.path());
    assert_eq!(game.rig().active_viewpoint(), ViewpointKind::Navigation);
    assert!(!game.hud().camera_hud_visible);

    enter_photography(&mut game);
    let rig = game.rig();
    assert_eq!(rig.fade_opacity(), 0.0);
    assert!(rig.viewpoint(ViewpointKind::Photography).active);
    assert!(!rig.viewpoint(ViewpointKind::Navigation).active);
    assert!(game.hud().camera_hud_visible);

    game.step(DT, &pressed(Action::SwitchView)).unwrap();
    assert_eq!(game.rig().state(), RigState::Transitioning);
    idle(&mut game, 90);
    let rig = game.rig();
    assert_eq!(rig.state(), RigState::Navigation);
    assert_eq!(rig.fade_opacity(), 0.0);
    assert!(rig.viewpoint(ViewpointKind::Navigation).active);
    assert!(!rig.viewpoint(ViewpointKind::Photography).active);
    assert!(!game.hud().camera_hud_visible);
}

#[test]
fn test_zoom_narrows_photography_fov() {
    let dir = tempfile::tempdir().unwrap();
    let mut game = new_game(dir.path());
    enter_photography(&mut game);

    let mut input = InputState::default();
    input.scroll_delta = (0.0, 4.0);
    game.step(DT, &input).unwrap();
    assert_eq!(game.rig().target_fov(), 40.0);

    idle(&mut game, 120);
    let fov = game.rig().viewpoint(ViewpointKind::Photography).fov;
    assert!((fov - 40.0).abs() < 0.01, "fov {fov}");
    assert!((game.hud().fov - fov).abs() < f32::EPSILON);
}

fn mover_position(game: &mut Game, name: &str) -> Vec3 {
    let world = game.world_mut();
    let mut query = world.query::<(&Name, &Position)>();
    query
        .iter(world)
        .find(|(n, _)| n.0 == name)
        .map(|(_, p)| p.0)
        .unwrap()
}

#[test]
fn test_pause_freezes_world_and_blocks_capture() {
    let dir = tempfile::tempdir().unwrap();
    let mut scene = range_scene();
    let mut walker = animal("hare", Vec3::new(-4.0, 0.5, -8.0), 80);
    walker.route = Some(RouteDef {
        waypoints: vec![Vec3::new(-4.0, 0.5, -8.0), Vec3::new(4.0, 0.5, -8.0)],
        speed: Some(1.0),
    });
    scene.animals.push(walker);
    let mut library = library();
    library.insert(scene);
    let mut game = Game::with_library(test_config(dir.path()), library).unwrap();
    enter_photography(&mut game);

    game.step(DT, &pressed(Action::Pause)).unwrap();
    assert!(game.is_paused());
    assert!(game.hud().pause_panel_visible);
    let frozen = mover_position(&mut game, "hare");

    idle(&mut game, 30);
    assert_eq!(mover_position(&mut game, "hare"), frozen);

    let report = game.step(DT, &pressed(Action::Capture)).unwrap();
    assert_eq!(
        report.captures,
        vec![CaptureOutcome::Ignored(IgnoreReason::Paused)]
    );
    assert!(report.saved_photos.is_empty());

    game.resume();
    assert!(!game.is_paused());
    assert_eq!(game.session().time_scale, 1.0);
    idle(&mut game, 30);
    assert!(mover_position(&mut game, "hare").x > frozen.x);
}

#[test]
fn test_pause_key_toggles_back() {
    let dir = tempfile::tempdir().unwrap();
    let mut game = new_game(dir.path());
    game.step(DT, &pressed(Action::Pause)).unwrap();
    assert!(game.is_paused());
    assert!(game.session().is_paused());
    game.step(DT, &pressed(Action::Pause)).unwrap();
    assert!(!game.is_paused());
    assert!(!game.hud().pause_panel_visible);
}

#[test]
fn test_reload_resets_scene_state() {
    let dir = tempfile::tempdir().unwrap();
    let mut game = new_game(dir.path());
    enter_photography(&mut game);
    game.step(DT, &pressed(Action::Capture)).unwrap();
    assert_eq!(game.scorer().score(), 120);

    game.reload_scene();
    let report = idle(&mut game, 1).remove(0);
    assert_eq!(report.scene_loaded.as_deref(), Some("range"));
    assert_eq!(game.active_scene(), "range");
    assert_eq!(game.scorer().score(), 0);
    assert_eq!(game.rig().active_viewpoint(), ViewpointKind::Navigation);
}

#[test]
fn test_change_scene_loads_next_scene() {
    let dir = tempfile::tempdir().unwrap();
    let mut game = new_game(dir.path());
    game.step(DT, &pressed(Action::Pause)).unwrap();

    game.change_scene();
    let report = idle(&mut game, 1).remove(0);
    assert_eq!(report.scene_loaded.as_deref(), Some("pond"));
    assert_eq!(game.active_scene(), "pond");
    assert!(!game.is_paused());
    assert_eq!(game.session().time_scale, 1.0);
}

#[test]
fn test_quit_request_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let mut game = new_game(dir.path());
    game.step(DT, &pressed(Action::Pause)).unwrap();

    game.quit();
    assert!(!game.quit_requested());
    let report = idle(&mut game, 1).remove(0);
    assert!(report.quit_requested);
    assert!(game.quit_requested());
    assert_eq!(game.session().time_scale, 1.0);
}

#[test]
fn test_scene_loaded_from_directory() {
    let dir = tempfile::tempdir().unwrap();
    let scenes = dir.path().join("scenes");
    std::fs::create_dir_all(&scenes).unwrap();
    let mut marsh = range_scene();
    marsh.name = "ignored".to_string();
    std::fs::write(scenes.join("marsh.ron"), marsh.to_ron().unwrap()).unwrap();

    let mut config = test_config(dir.path());
    config.scene.scenes_dir = Some(scenes);
    config.scene.start_scene = "marsh".to_string();
    let mut game = Game::new(config).unwrap();
    assert_eq!(game.active_scene(), "marsh");

    enter_photography(&mut game);
    let report = game.step(DT, &pressed(Action::Capture)).unwrap();
    assert_eq!(report.score, 120);
}

#[test]
fn test_unknown_start_scene_fails() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = test_config(dir.path());
    config.scene.start_scene = "atlantis".to_string();
    let result = Game::with_library(config, library());
    assert!(matches!(
        result,
        Err(GameError::Scene(SceneError::Unknown(name))) if name == "atlantis"
    ));
}

#[test]
fn test_autopilot_session_in_builtin_meadow() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = Config::default();
    config.capture.output_root = Some(dir.path().to_path_buf());
    config.capture.width = 64;
    config.capture.height = 36;
    let mut game = Game::new(config).unwrap();

    let autopilot = Autopilot::default();
    let map = InputMap::default();
    let mut keyboard = KeyboardState::new();
    let mut mouse = MouseState::new();
    let mut input = InputState::default();
    let mut saved = 0;
    let mut paused_frames = 0;

    for frame in 0..700 {
        mouse.set_captured(!game.session().is_paused());
        autopilot.feed(frame, &mut keyboard, &mut mouse);
        ActionResolver::resolve(&map, &keyboard, &mouse, &mut input);
        keyboard.clear_transients();
        mouse.clear_transients();
        let report = game.step(DT, &input).unwrap();
        saved += report.saved_photos.len();
        if game.is_paused() {
            paused_frames += 1;
        }
    }

    assert!(game.scorer().score() > 0);
    assert!(saved > 0);
    assert_eq!(saved as u32, game.scorer().photos_taken());
    assert_eq!(photo_count(&dir.path().join("Fotos")), saved);
    assert_eq!(paused_frames, 60);
    assert!(!game.is_paused());
}
