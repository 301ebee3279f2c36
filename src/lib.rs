pub mod expression;
pub mod syntax;
pub mod util;
pub mod validation;
