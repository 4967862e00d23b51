// Internal modules
pub mod config;
pub mod lexical;
#[macro_use]
pub mod logging;
pub mod registry;
pub mod tokens;
pub mod utils;

// Re-export key types for library consumers
pub use lexical::{LexError, LexErrorKind, LexWarning, ScanOutput, Scanner};
pub use registry::{RegistryBuilder, RegistryError, TokenRegistry, TokenType};
pub use tokens::{Comment, Literal, Token};
