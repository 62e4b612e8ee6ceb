pub mod album;
pub mod camera_button;
pub mod explore;
pub mod navigation;
pub mod photos;

pub use album::AlbumScreen;
pub use camera_button::CameraButton;
pub use explore::ExploreScreen;
pub use navigation::NavigationBar;
pub use photos::PhotosScreen;
