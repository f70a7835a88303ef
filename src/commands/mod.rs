mod down;
mod plan;
mod up;
mod validate;

pub use down::run_down;
pub use plan::run_plan;
pub use up::run_up;
pub use validate::run_validate;
