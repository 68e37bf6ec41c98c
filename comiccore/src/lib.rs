//! comiccore — shared library for the comicView applications

pub mod storage;
pub mod theme;
pub mod widgets;

pub use theme::ComicTheme;
