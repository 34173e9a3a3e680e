pub mod gallery_grid;
pub mod help;
pub mod keybindings;
pub mod media_cache;
pub mod modal_view;
pub mod window;

pub use window::MainWindow;
