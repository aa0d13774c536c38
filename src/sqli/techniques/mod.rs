//! Detection strategies.

pub mod boolean;
pub mod error;
pub mod time;
pub mod union;

pub use boolean::BooleanBased;
pub use error::ErrorBased;
pub use time::TimeBased;
pub use union::UnionBased;

use crate::sqli::InjectionStrategy;

/// The fixed strategy roster, in trial order.
pub fn strategies() -> Vec<Box<dyn InjectionStrategy>> {
    vec![
        Box::new(ErrorBased),
        Box::new(UnionBased),
        Box::new(BooleanBased),
        Box::new(TimeBased),
    ]
}
