pub mod credit_note_repository;
pub mod return_repository;

pub use credit_note_repository::CreditNoteRepository;
pub use return_repository::ReturnRepository;
