mod date_picker;
mod publisher;
pub mod selectors;

pub use date_picker::{DatePicker, PickerViewport};
pub use publisher::{PublishPlan, Publisher};
