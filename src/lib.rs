//! Terminal quote reader: a persisted quote collection with category
//! filtering, JSON import/export and best-effort sync with a remote endpoint.

pub mod app;
pub mod config;
pub mod quotes;
pub mod storage;
pub mod sync;
pub mod theme;
pub mod ui;
pub mod util;
