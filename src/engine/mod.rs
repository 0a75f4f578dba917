pub mod backend;
mod schema;
pub mod types;

pub use backend::{BuiltinValidator, FixedValidator, Validator};
pub use types::{ActionType, NestedState, ParseErrorLocation, ValidationError, ValidationState};
