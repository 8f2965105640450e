// Reveal module - stages, per-card transitions and the scheduler that drives them

pub mod scheduler;
pub mod stage;
pub mod transition;

pub use scheduler::{
    cards_to_done, completion_index, FrameLayout, ListenerId, NotifyOutcome, Playback,
    RevealEvent, RevealScheduler,
};
pub use stage::Stage;
pub use transition::{CellTransition, EasingType};
