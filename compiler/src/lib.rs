//! luagen-compiler
//!
//! This crate implements:
//!  1) The translation compiler (exports → `translations-gen.lua` + term key alias),
//!  2) The event-documentation compiler (LuaHelp AST → `--- @field on` overloads),
//!  3) Override rules that retype or rename event parameters before rendering,
//!  4) The legacy `key = [[value]]` asset reader and its resync helper,
//!  5) Error types (`GenError`), and the `Converter` trait.

pub mod error;
pub mod utils;
pub mod translations;
pub mod events;
pub mod overrides;
pub mod traits;
pub mod converters;
pub mod legacy;

pub use converters::{generate_all, write_all, EventEnumConverter, EventFieldsConverter};
pub use error::GenError;
pub use translations::{compile_translations, render_term_keys, render_translations};
pub use utils::escape_lua_string;
