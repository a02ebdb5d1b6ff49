//! The frame driver: builds a world from a scene, runs one frame per
//! [`Game::step`], and performs the end-of-frame work (photo render and
//! save, draining cues and scene requests).

use std::path::PathBuf;

use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemState;
use chrono::Local;
use wildlens_config::Config;
use wildlens_ecs::{
    GameSchedule, GameSchedules, InputState, Name, Position, SessionState, TimeRes, create_world,
};
use wildlens_photo::{
    CaptureOutcome, CaptureSettings, PhotoRenderer, PhotoScorer, PhotoWriter, RaycastRenderer,
    ScorableEntity, Scorables,
};
use wildlens_player::{
    CameraRig, MoverCollider, RouteEvents, WaypointMover, camera_rig_system, waypoint_mover_system,
};
use wildlens_spatial::{Aabb, Collider, PhysicsWorld};

use crate::audio::{AudioCue, AudioQueue, route_audio_system};
use crate::capture::{CaptureLog, photo_capture_system};
use crate::error::GameError;
use crate::hud::{HudState, hud_sync_system};
use crate::pause::{PauseController, pause_system};
use crate::scene::{SceneDef, SceneDirector, SceneLibrary, SceneRequest, SceneTransition};

/// Collider layer for static scenery.
const OBSTACLE_LAYER: u32 = 0;

/// What happened during one frame.
#[derive(Clone, Debug, Default)]
pub struct FrameReport {
    /// Frame number, starting at 1.
    pub frame: u64,
    /// Outcome of each capture trigger this frame.
    pub captures: Vec<CaptureOutcome>,
    /// Photos written at the end of the frame.
    pub saved_photos: Vec<PathBuf>,
    /// Sounds to play.
    pub audio: Vec<AudioCue>,
    /// Running score after the frame.
    pub score: u64,
    /// Scene that replaced the world at the end of the frame.
    pub scene_loaded: Option<String>,
    pub quit_requested: bool,
}

/// One play session over a sequence of scenes.
pub struct Game {
    config: Config,
    library: SceneLibrary,
    renderer: Box<dyn PhotoRenderer>,
    writer: PhotoWriter,
    world: World,
    schedules: GameSchedules,
    quit_requested: bool,
}

impl Game {
    /// Start in the configured start scene, looking up scenes in the
    /// configured scenes directory and the built-ins.
    pub fn new(config: Config) -> Result<Self, GameError> {
        let library = SceneLibrary::new(config.scene.scenes_dir.clone());
        Self::with_library(config, library)
    }

    pub fn with_library(config: Config, library: SceneLibrary) -> Result<Self, GameError> {
        let scene = library.load(&config.scene.start_scene)?;
        let renderer = RaycastRenderer {
            animal_layer: config.capture.animal_layer,
            ..RaycastRenderer::default()
        };
        let writer = PhotoWriter::new(config.capture.photo_dir());
        let (world, schedules) = build_world(&config, &scene);
        Ok(Self {
            config,
            library,
            renderer: Box::new(renderer),
            writer,
            world,
            schedules,
            quit_requested: false,
        })
    }

    /// Replace the photo renderer.
    pub fn set_renderer(&mut self, renderer: Box<dyn PhotoRenderer>) {
        self.renderer = renderer;
    }

    /// Throw away the current world and build the named scene.
    pub fn load_scene(&mut self, name: &str) -> Result<(), GameError> {
        let scene = self.library.load(name)?;
        let (world, schedules) = build_world(&self.config, &scene);
        self.world = world;
        self.schedules = schedules;
        Ok(())
    }

    /// Run one frame of `dt` real seconds with the given resolved input.
    ///
    /// Photo I/O errors abort the step; scene requests recorded during the
    /// frame are applied before returning.
    pub fn step(&mut self, dt: f32, input: &InputState) -> Result<FrameReport, GameError> {
        *self.world.resource_mut::<InputState>() = input.clone();
        self.schedules.run(&mut self.world, dt);

        let frame = self.world.resource::<TimeRes>().frame;
        let captures = std::mem::take(&mut self.world.resource_mut::<CaptureLog>().0);
        let saved_photos = self.save_pending_photo()?.into_iter().collect();
        let audio = self.world.resource_mut::<AudioQueue>().drain();
        let score = self.world.resource::<PhotoScorer>().score();
        let mut report = FrameReport {
            frame,
            captures,
            saved_photos,
            audio,
            score,
            ..FrameReport::default()
        };

        let requests = self.world.resource_mut::<SceneDirector>().drain();
        for request in requests {
            match request {
                SceneRequest::Load(name) => {
                    self.load_scene(&name)?;
                    report.scene_loaded = Some(name);
                }
                SceneRequest::Quit => {
                    self.quit_requested = true;
                    report.quit_requested = true;
                }
            }
        }
        Ok(report)
    }

    /// The end-of-frame render of a photo captured this frame.
    fn save_pending_photo(&mut self) -> Result<Option<PathBuf>, GameError> {
        let Some(photo) = self.world.resource_mut::<PhotoScorer>().take_pending_photo() else {
            return Ok(None);
        };
        let physics = self.world.resource::<PhysicsWorld>();
        let image = self
            .renderer
            .render(&photo.view, physics, photo.width, photo.height);
        let path = self.writer.save(&image, &Local::now())?;
        Ok(Some(path))
    }

    /// Pause menu "resume" button.
    pub fn resume(&mut self) {
        let mut state =
            SystemState::<(ResMut<PauseController>, ResMut<SessionState>)>::new(&mut self.world);
        let (mut pause, mut session) = state.get_mut(&mut self.world);
        pause.resume(&mut session);
    }

    /// Pause menu "quit" button. Takes effect at the end of the next step.
    pub fn quit(&mut self) {
        let mut state = SystemState::<(
            ResMut<PauseController>,
            ResMut<SessionState>,
            ResMut<SceneDirector>,
        )>::new(&mut self.world);
        let (mut pause, mut session, mut director) = state.get_mut(&mut self.world);
        pause.quit(&mut session, &mut director);
    }

    /// "Change scene" button. Takes effect at the end of the next step.
    pub fn change_scene(&mut self) {
        self.world
            .resource_scope(|world, transition: Mut<SceneTransition>| {
                transition.change_scene(&mut world.resource_mut::<SceneDirector>());
            });
    }

    /// "Reload" button. Takes effect at the end of the next step.
    pub fn reload_scene(&mut self) {
        self.world
            .resource_scope(|world, transition: Mut<SceneTransition>| {
                transition.reload_current(&mut world.resource_mut::<SceneDirector>());
            });
    }

    pub fn active_scene(&self) -> &str {
        self.world.resource::<SceneDirector>().active_scene()
    }

    pub fn session(&self) -> &SessionState {
        self.world.resource::<SessionState>()
    }

    pub fn rig(&self) -> &CameraRig {
        self.world.resource::<CameraRig>()
    }

    pub fn scorer(&self) -> &PhotoScorer {
        self.world.resource::<PhotoScorer>()
    }

    pub fn hud(&self) -> &HudState {
        self.world.resource::<HudState>()
    }

    pub fn is_paused(&self) -> bool {
        self.world.resource::<PauseController>().is_paused()
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}

/// A fresh world and schedules for `scene`.
fn build_world(config: &Config, scene: &SceneDef) -> (World, GameSchedules) {
    let mut world = create_world();
    let mut physics = PhysicsWorld::new();
    let mut scorables = Scorables::new();

    for obstacle in &scene.obstacles {
        physics.insert(Collider {
            bounds: Aabb::from_center_half_extents(obstacle.center, obstacle.half_extents),
            layer: OBSTACLE_LAYER,
        });
    }

    let mut movers = 0;
    for animal in &scene.animals {
        let handle = physics.insert(Collider {
            bounds: Aabb::from_center_half_extents(animal.position, animal.half_extents),
            layer: config.capture.animal_layer,
        });
        scorables.insert(ScorableEntity {
            name: animal.name.clone(),
            description: animal.description.clone(),
            point_value: animal.points,
            collider: handle,
            call_sound: animal.call_sound.clone(),
        });

        if let Some(route) = &animal.route {
            let mover = WaypointMover::new(
                route.waypoints.clone(),
                route.speed.unwrap_or(config.route.speed),
                config.route.arrival_tolerance,
            )
            .with_cues(config.route.audio_cues);
            world.spawn((
                Name::new(animal.name.as_str()),
                Position(animal.position),
                mover,
                MoverCollider(handle),
            ));
            movers += 1;
        }
    }

    tracing::info!(
        "Loaded scene '{}': {} animals ({} moving), {} obstacles",
        scene.name,
        scene.animals.len(),
        movers,
        scene.obstacles.len()
    );

    world.insert_resource(physics);
    world.insert_resource(scorables);
    world.insert_resource(CameraRig::new(
        config,
        scene.player.position,
        scene.player.yaw,
    ));
    world.insert_resource(PhotoScorer::new(CaptureSettings::from_config(
        &config.capture,
    )));
    world.insert_resource(HudState::default());
    world.insert_resource(AudioQueue::default());
    world.insert_resource(RouteEvents::default());
    world.insert_resource(CaptureLog::default());
    world.insert_resource(PauseController::new());
    world.insert_resource(SceneDirector::new(scene.name.as_str()));
    world.insert_resource(SceneTransition::new(config.scene.next_scene.as_str()));

    let mut schedules = GameSchedules::new();
    schedules.add_system(GameSchedule::PreUpdate, pause_system);
    schedules.add_system(
        GameSchedule::Update,
        (camera_rig_system, photo_capture_system, waypoint_mover_system).chain(),
    );
    schedules.add_system(
        GameSchedule::PostUpdate,
        (route_audio_system, hud_sync_system).chain(),
    );

    (world, schedules)
}
