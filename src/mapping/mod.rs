//! Name mapping: byte-sequence translation, encoding verification and the
//! verify-first / fall-back-to-original policy that combines them.

mod mapper;
mod table;
mod validator;

pub use mapper::{Mapping, NameMapper};
pub use table::{Rule, TableError, TranslationTable};
pub use validator::EncodingValidator;
