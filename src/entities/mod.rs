// Entity Models
// Closed tag sets (category, owner) and the two persisted entry kinds.

pub mod category;
pub mod entry;
pub mod owner;

pub use category::Category;
pub use entry::{
    parse_date, validate_amount, validate_date, validate_description, Entry, ExpenseEntry,
    IncomeEntry, DATE_FORMAT, MAX_AMOUNT,
};
pub use owner::{Owner, OwnerFilter};
