pub mod catalog;
pub mod media_item;
pub mod preference_store;
pub mod view_state;

pub use catalog::*;
pub use media_item::*;
pub use preference_store::*;
pub use view_state::*;
