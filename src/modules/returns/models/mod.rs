pub mod credit_note;
pub mod sale_return;

pub use credit_note::{CreditNote, NoteStatus, RedeemCreditNoteRequest};
pub use sale_return::{
    CreateReturnRequest, ExchangeItemInput, RefundChannel, ReturnDetail, ReturnItemInput,
    ReturnOutcome, ReturnedItem, SaleReturn,
};
