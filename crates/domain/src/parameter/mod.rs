//! Step parameter types and conversion results

mod converted;
mod kind;

pub use converted::{ConvertedParameter, DataWrapper, SubSteps};
pub use kind::ParameterType;
