pub mod event_loop;

pub use event_loop::CalloopScheduler;
