pub mod extractor;
pub mod test_utils;
pub mod validation;

pub use extractor::{ApiPath, ApiQuery, ValidatedJson};
pub use validation::{Validate, Validator};
