//! ECS world setup, frame schedules, and the shared per-frame resources:
//! time, session state (time scale and cursor mode), and resolved input.
//!
//! Also provides [`Timer`] and [`Tween`], the explicit stand-ins for
//! wait-for-seconds and ramp coroutines that components advance once per
//! frame.

mod components;
mod input;
mod schedule;
mod session;
mod task;
mod time;
mod world;

pub use components::{Name, Position};
pub use input::{Action, InputState};
pub use schedule::{GameSchedule, GameSchedules};
pub use session::{CursorMode, SessionState};
pub use task::{Timer, Tween};
pub use time::TimeRes;
pub use world::{create_world, register_core_resources};
