pub mod account;
pub mod draft;
pub mod finalized;
pub mod line_item;
pub mod technician;

pub use account::Account;
pub use draft::{HeaderChange, HeaderField, InvoiceDraft};
pub use finalized::FinalizedInvoice;
pub use line_item::{ItemField, ItemInput, LineItem};
pub use technician::Technician;
