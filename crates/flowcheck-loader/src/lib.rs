//! Reads `zofar` questionnaire XML documents into the data model consumed
//! by the rest of flowcheck (§3, §6).

mod error;
mod model;
mod tree;
mod xml;

pub use error::{LoadError, LoadResult};
pub use model::{AnswerOption, EnumValues, Page, Questionnaire, Transition, VarRef, VarType, Variable};
pub use xml::{load, questionnaire_from_xml};
