pub mod dispatch;
pub mod extract;
pub mod languages;

pub use dispatch::dispatch;
