//! Scene definitions and the requests that swap them.
//!
//! A scene is plain data: where the player stands, which animals are
//! placed (optionally on a route), and which static boxes block the view.
//! Scenes are read from `<scenes_dir>/<name>.ron` when present, otherwise
//! from the built-in library.

use std::path::PathBuf;

use bevy_ecs::prelude::*;
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::SceneError;

/// Contents of one scene.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneDef {
    pub name: String,
    #[serde(default)]
    pub player: PlayerStart,
    #[serde(default)]
    pub animals: Vec<AnimalDef>,
    #[serde(default)]
    pub obstacles: Vec<ObstacleDef>,
}

/// Where the rig starts.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerStart {
    /// Rig origin (feet).
    pub position: Vec3,
    /// Heading in degrees, positive turns right from -Z.
    pub yaw: f32,
}

/// A scorable animal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnimalDef {
    pub name: String,
    pub description: String,
    #[serde(default = "default_points")]
    pub points: u32,
    /// Centre of the animal's collider.
    pub position: Vec3,
    #[serde(default = "default_half_extents")]
    pub half_extents: Vec3,
    #[serde(default)]
    pub call_sound: Option<String>,
    #[serde(default)]
    pub route: Option<RouteDef>,
}

/// Waypoints an animal walks along.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteDef {
    pub waypoints: Vec<Vec3>,
    /// Units per second. Falls back to the configured route speed.
    #[serde(default)]
    pub speed: Option<f32>,
}

/// A static box that blocks line of sight.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObstacleDef {
    pub name: String,
    pub center: Vec3,
    pub half_extents: Vec3,
}

fn default_points() -> u32 {
    100
}

fn default_half_extents() -> Vec3 {
    Vec3::splat(0.5)
}

impl SceneDef {
    /// Parse a scene from RON text.
    pub fn from_ron(s: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(s)
    }

    pub fn to_ron(&self) -> Result<String, ron::Error> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
    }
}

/// Resolves scene names to definitions.
#[derive(Clone, Debug, Default)]
pub struct SceneLibrary {
    scenes_dir: Option<PathBuf>,
    custom: Vec<SceneDef>,
}

impl SceneLibrary {
    pub fn new(scenes_dir: Option<PathBuf>) -> Self {
        Self {
            scenes_dir,
            custom: Vec::new(),
        }
    }

    /// Register an in-memory scene. It shadows files and built-ins with
    /// the same name.
    pub fn insert(&mut self, scene: SceneDef) {
        self.custom.retain(|s| s.name != scene.name);
        self.custom.push(scene);
    }

    /// Find a scene: in-memory first, then `<scenes_dir>/<name>.ron`, then
    /// the built-ins.
    pub fn load(&self, name: &str) -> Result<SceneDef, SceneError> {
        if let Some(scene) = self.custom.iter().find(|s| s.name == name) {
            return Ok(scene.clone());
        }

        if let Some(dir) = &self.scenes_dir {
            let path = dir.join(format!("{name}.ron"));
            if path.exists() {
                let contents = std::fs::read_to_string(&path).map_err(|source| {
                    SceneError::Read {
                        path: path.clone(),
                        source,
                    }
                })?;
                let mut scene = SceneDef::from_ron(&contents)
                    .map_err(|source| SceneError::Parse { path, source })?;
                scene.name = name.to_string();
                return Ok(scene);
            }
        }

        builtin_scene(name).ok_or_else(|| SceneError::Unknown(name.to_string()))
    }
}

/// Names of the scenes compiled into the game.
pub const BUILTIN_SCENES: [&str; 2] = ["meadow", "riverbank"];

fn builtin_scene(name: &str) -> Option<SceneDef> {
    match name {
        "meadow" => Some(meadow()),
        "riverbank" => Some(riverbank()),
        _ => None,
    }
}

fn ground() -> ObstacleDef {
    ObstacleDef {
        name: "ground".to_string(),
        center: Vec3::new(0.0, -0.5, 0.0),
        half_extents: Vec3::new(200.0, 0.5, 200.0),
    }
}

fn meadow() -> SceneDef {
    SceneDef {
        name: "meadow".to_string(),
        player: PlayerStart::default(),
        animals: vec![
            AnimalDef {
                name: "roe deer".to_string(),
                description: "Roe deer. Shy browser of woodland edges, most active at dusk."
                    .to_string(),
                points: 100,
                position: Vec3::new(0.0, 0.9, -12.0),
                half_extents: Vec3::new(0.4, 0.9, 0.9),
                call_sound: Some("deer_bark".to_string()),
                route: None,
            },
            AnimalDef {
                name: "red fox".to_string(),
                description: "Red fox. Hunts voles by pouncing high over the grass.".to_string(),
                points: 150,
                position: Vec3::new(4.0, 0.35, -9.0),
                half_extents: Vec3::new(0.6, 0.35, 0.25),
                call_sound: Some("fox_scream".to_string()),
                route: None,
            },
            AnimalDef {
                name: "grey heron".to_string(),
                description: "Grey heron. Stalks the ditches with slow, deliberate steps."
                    .to_string(),
                points: 200,
                position: Vec3::new(-6.0, 0.8, -15.0),
                half_extents: Vec3::new(0.3, 0.8, 0.4),
                call_sound: None,
                route: Some(RouteDef {
                    waypoints: vec![
                        Vec3::new(-6.0, 0.8, -15.0),
                        Vec3::new(-2.0, 0.8, -15.0),
                        Vec3::new(2.0, 0.8, -16.0),
                    ],
                    speed: Some(1.5),
                }),
            },
            AnimalDef {
                name: "wild boar".to_string(),
                description: "Wild boar. Roots through the soil in family groups.".to_string(),
                points: 250,
                position: Vec3::new(-3.0, 0.5, -18.0),
                half_extents: Vec3::new(0.8, 0.5, 0.4),
                call_sound: Some("boar_grunt".to_string()),
                route: None,
            },
            AnimalDef {
                name: "eagle owl".to_string(),
                description: "Eagle owl. Europe's largest owl, rarely seen by day.".to_string(),
                points: 500,
                position: Vec3::new(0.0, 3.0, -40.0),
                half_extents: Vec3::splat(0.4),
                call_sound: None,
                route: None,
            },
        ],
        obstacles: vec![
            ground(),
            ObstacleDef {
                name: "boulder".to_string(),
                center: Vec3::new(-1.7, 1.0, -10.0),
                half_extents: Vec3::new(1.2, 1.0, 1.0),
            },
            ObstacleDef {
                name: "oak".to_string(),
                center: Vec3::new(8.0, 3.0, -14.0),
                half_extents: Vec3::new(0.5, 3.0, 0.5),
            },
        ],
    }
}

fn riverbank() -> SceneDef {
    SceneDef {
        name: "riverbank".to_string(),
        player: PlayerStart {
            position: Vec3::new(0.0, 0.0, 5.0),
            yaw: 20.0,
        },
        animals: vec![
            AnimalDef {
                name: "otter".to_string(),
                description: "Eurasian otter. Fishes at night along clean rivers.".to_string(),
                points: 300,
                position: Vec3::new(3.0, 0.25, -6.0),
                half_extents: Vec3::new(0.5, 0.25, 0.2),
                call_sound: Some("otter_whistle".to_string()),
                route: Some(RouteDef {
                    waypoints: vec![
                        Vec3::new(3.0, 0.25, -6.0),
                        Vec3::new(6.0, 0.25, -4.0),
                        Vec3::new(9.0, 0.25, -5.0),
                    ],
                    speed: None,
                }),
            },
            AnimalDef {
                name: "kingfisher".to_string(),
                description: "Kingfisher. A flash of blue low over the water.".to_string(),
                points: 400,
                position: Vec3::new(5.0, 1.2, -3.0),
                half_extents: Vec3::splat(0.15),
                call_sound: Some("kingfisher_call".to_string()),
                route: None,
            },
        ],
        obstacles: vec![
            ground(),
            ObstacleDef {
                name: "reeds".to_string(),
                center: Vec3::new(1.5, 0.75, -2.0),
                half_extents: Vec3::new(0.6, 0.75, 0.6),
            },
        ],
    }
}

/// A scene-level request recorded during the frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SceneRequest {
    /// Replace the world with the named scene.
    Load(String),
    /// Stop the game loop.
    Quit,
}

/// Collects scene requests for the game loop to act on after the frame.
#[derive(Resource, Clone, Debug)]
pub struct SceneDirector {
    active_scene: String,
    requests: Vec<SceneRequest>,
}

impl SceneDirector {
    pub fn new(active_scene: impl Into<String>) -> Self {
        Self {
            active_scene: active_scene.into(),
            requests: Vec::new(),
        }
    }

    pub fn active_scene(&self) -> &str {
        &self.active_scene
    }

    pub fn request(&mut self, request: SceneRequest) {
        tracing::debug!("Scene request: {request:?}");
        self.requests.push(request);
    }

    pub fn drain(&mut self) -> Vec<SceneRequest> {
        std::mem::take(&mut self.requests)
    }

    pub fn has_pending(&self) -> bool {
        !self.requests.is_empty()
    }
}

/// Menu buttons that move between scenes.
#[derive(Resource, Clone, Debug)]
pub struct SceneTransition {
    /// Scene loaded by "change scene".
    pub target_scene: String,
}

impl SceneTransition {
    pub fn new(target_scene: impl Into<String>) -> Self {
        Self {
            target_scene: target_scene.into(),
        }
    }

    /// Request the configured scene.
    pub fn change_scene(&self, director: &mut SceneDirector) {
        director.request(SceneRequest::Load(self.target_scene.clone()));
    }

    /// Request the active scene again from scratch.
    pub fn reload_current(&self, director: &mut SceneDirector) {
        let name = director.active_scene().to_string();
        director.request(SceneRequest::Load(name));
    }

    /// Request process termination.
    pub fn quit(&self, director: &mut SceneDirector) {
        tracing::info!("Quitting the game");
        director.request(SceneRequest::Quit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_resolve() {
        let library = SceneLibrary::default();
        for name in BUILTIN_SCENES {
            let scene = library.load(name).unwrap();
            assert_eq!(scene.name, name);
            assert!(!scene.animals.is_empty());
        }
        assert!(matches!(
            library.load("moon"),
            Err(SceneError::Unknown(name)) if name == "moon"
        ));
    }

    #[test]
    fn test_ron_defaults() {
        let scene = SceneDef::from_ron(
            r#"(
                name: "tiny",
                animals: [(
                    name: "hare",
                    description: "Brown hare",
                    position: (1.0, 0.3, -5.0),
                )],
            )"#,
        )
        .unwrap();
        let hare = &scene.animals[0];
        assert_eq!(hare.points, 100);
        assert_eq!(hare.half_extents, Vec3::splat(0.5));
        assert!(hare.route.is_none());
        assert_eq!(scene.player, PlayerStart::default());
        assert!(scene.obstacles.is_empty());
    }

    #[test]
    fn test_file_shadows_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let mut scene = meadow();
        scene.animals.truncate(1);
        std::fs::write(dir.path().join("meadow.ron"), scene.to_ron().unwrap()).unwrap();

        let library = SceneLibrary::new(Some(dir.path().to_path_buf()));
        assert_eq!(library.load("meadow").unwrap().animals.len(), 1);
        // Built-ins still resolve when no file exists.
        assert_eq!(library.load("riverbank").unwrap().name, "riverbank");
    }

    #[test]
    fn test_bad_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("broken.ron"), "(name: ").unwrap();
        let library = SceneLibrary::new(Some(dir.path().to_path_buf()));
        assert!(matches!(
            library.load("broken"),
            Err(SceneError::Parse { .. })
        ));
    }

    #[test]
    fn test_transition_requests() {
        let mut director = SceneDirector::new("meadow");
        let transition = SceneTransition::new("riverbank");

        transition.change_scene(&mut director);
        transition.reload_current(&mut director);
        transition.quit(&mut director);

        assert_eq!(
            director.drain(),
            vec![
                SceneRequest::Load("riverbank".to_string()),
                SceneRequest::Load("meadow".to_string()),
                SceneRequest::Quit,
            ]
        );
        assert!(!director.has_pending());
    }
}
