//! Input abstraction: keyboard and mouse frame state mapped through
//! configurable action bindings into the ECS [`InputState`](wildlens_ecs::InputState).

pub mod action_map;
pub mod keyboard;
pub mod mouse;

pub use action_map::{ActionResolver, InputBinding, InputMap, MouseButtonBinding};
pub use keyboard::{KeyboardState, RawKeyEvent};
pub use mouse::MouseState;
pub use wildlens_ecs::Action;
