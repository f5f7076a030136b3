pub mod evaluate;
pub mod expression;
pub mod filter;
