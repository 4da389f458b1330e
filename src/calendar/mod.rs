pub mod date_key;
pub mod grid;
pub mod store;
pub mod task;

pub use date_key::DateKey;
pub use store::TaskStore;
pub use task::{TaskColor, TaskItem, TaskTime};
