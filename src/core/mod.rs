pub mod engine;
pub mod generator;
pub mod history;
pub mod pipeline;
pub mod targets;
pub mod writer;

pub use crate::domain::model::{GeneratedWeek, PlanInputs};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
