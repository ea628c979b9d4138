pub mod backup;
pub mod catalog;
pub mod draft_store;
pub mod history;
pub mod log;
pub mod numbering;

pub use catalog::Catalog;
pub use draft_store::DraftStore;
pub use history::HistoryLog;
pub use numbering::{NumberingService, Scope};
