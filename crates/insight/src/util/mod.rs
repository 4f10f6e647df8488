pub mod export;
pub mod format;
pub mod io;
