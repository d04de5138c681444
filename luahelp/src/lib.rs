//! luagen-luahelp
//!
//! Reader for the LuaHelp plain-text API documentation:
//!  1) A line lexer that classifies each line by indentation and shape,
//!  2) A parser that collects the `Events` section into a [`LuaHelp`] AST.
//!
//! Only events are read. Other sections (functions, enums, tables) are skipped.
//!
//! ```
//! let text = "Events :\n\teventLoop (elapsed)\n\t\tCalled every 500ms.\n\t\tArguments :\n\t\t\t- elapsed (Int) : time since start\n";
//! let ast = luagen_luahelp::parse(text).unwrap();
//! assert_eq!(ast.events[0].name, "eventLoop");
//! assert_eq!(ast.events[0].parameters[0].type_, "Int");
//! ```

pub mod error;
pub mod types;
pub mod utils;
pub mod lexer;
pub mod parser;

pub use error::LuaHelpError;
pub use parser::parse_luahelp;
pub use types::{LuaHelp, LuaHelpEvent, LuaHelpEventParameter};

/// Lex and parse LuaHelp text in one step.
pub fn parse(text: &str) -> Result<LuaHelp, LuaHelpError> {
    let lines = lexer::tokenize_luahelp(text);
    parse_luahelp(&lines)
}
