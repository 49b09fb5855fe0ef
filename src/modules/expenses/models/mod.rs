pub mod expense;

pub use expense::{
    CreateCategoryRequest, CreateExpenseRequest, Expense, ExpenseCategory, ExpenseDetail,
};
