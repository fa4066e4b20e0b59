pub mod collector;
pub mod etl;
pub mod export;
pub mod pipeline;

pub use crate::domain::model::{Collection, NormalizedRecord};
pub use crate::domain::ports::{ConfigProvider, PageSource, Pipeline, Storage};
pub use crate::utils::error::Result;
