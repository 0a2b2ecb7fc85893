pub mod app;
pub mod camera_view;
pub mod error_banner;
pub mod gallery_view;
pub mod image_viewer;
