pub mod text;
pub mod wallpaper;
pub mod waves;
