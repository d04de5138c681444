use crate::error::GenError;
use luagen_luahelp::LuaHelp;

/// Turns a LuaHelp AST into the lines of one generated annotation file.
pub trait Converter {
    /// File name of the generated output, e.g. `eventFields.generated.txt`.
    fn name(&self) -> &str;

    fn convert(&self, ast: &LuaHelp) -> Result<Vec<String>, GenError>;
}
