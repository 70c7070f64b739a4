mod app;
mod listeners;
mod monitor;
mod objc2_wrapper;
mod sampler;

pub use app::run_app;
