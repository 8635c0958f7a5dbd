mod completion;

mod explore;
pub(crate) use explore::explore;

mod product;
pub use product::ProductIndex;

mod quotient;
