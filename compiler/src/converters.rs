use std::path::{Path, PathBuf};

use luagen_luahelp::LuaHelp;
use serde::Deserialize;
use tracing::info;

use crate::{
    error::GenError,
    events::{events_from_ast, public_event_name, Event},
    overrides::OverrideTable,
    traits::Converter,
    utils::write_text,
};

pub const DEFAULT_SELF_TYPE: &str = "mousebase.TfmEvents";
pub const DEFAULT_EVENTS_ALIAS: &str = "mousebase.TfmEvents.Events";

/// Type names the generated annotations refer to.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnnotationNames {
    /// Class the `on` field is declared on.
    pub self_type:    String,
    /// Alias listing every public event name.
    pub events_alias: String,
}

impl Default for AnnotationNames {
    fn default() -> Self {
        AnnotationNames {
            self_type:    DEFAULT_SELF_TYPE.to_string(),
            events_alias: DEFAULT_EVENTS_ALIAS.to_string(),
        }
    }
}

/// Emits one `--- @field on fun(...)` overload per event.
#[derive(Debug, Clone)]
pub struct EventFieldsConverter {
    pub names:     AnnotationNames,
    pub overrides: OverrideTable,
}

impl EventFieldsConverter {
    pub fn new(names: AnnotationNames, overrides: OverrideTable) -> Self {
        EventFieldsConverter { names, overrides }
    }

    /// Generic overload; completion needs at least one that accepts any event.
    pub fn preamble(&self) -> String {
        format!(
            "--- @field on fun(self:{s}, eventName:{e}, listener:function):{s}",
            s = self.names.self_type,
            e = self.names.events_alias
        )
    }

    pub fn render_event(&self, event: Event) -> Result<String, GenError> {
        let public = event.public_name()?.to_string();
        let event = self.overrides.apply(event)?;
        Ok(format!(
            "--- @field on fun(self:{s}, eventName:'\"{name}\"', listener:fun({params})):{s}",
            s = self.names.self_type,
            name = public,
            params = event.listener_params()
        ))
    }
}

impl Default for EventFieldsConverter {
    fn default() -> Self {
        EventFieldsConverter::new(AnnotationNames::default(), OverrideTable::builtin())
    }
}

impl Converter for EventFieldsConverter {
    fn name(&self) -> &str {
        "eventFields.generated.txt"
    }

    fn convert(&self, ast: &LuaHelp) -> Result<Vec<String>, GenError> {
        let mut lines = vec![self.preamble()];
        for event in events_from_ast(&ast.events)? {
            lines.push(self.render_event(event)?);
        }
        Ok(lines)
    }
}

/// Emits the alias enumerating public event names.
#[derive(Debug, Clone, Default)]
pub struct EventEnumConverter {
    pub names: AnnotationNames,
}

impl Converter for EventEnumConverter {
    fn name(&self) -> &str {
        "eventEnum.generated.txt"
    }

    fn convert(&self, ast: &LuaHelp) -> Result<Vec<String>, GenError> {
        let mut lines = vec![format!("--- @alias {}", self.names.events_alias)];
        for event in &ast.events {
            lines.push(format!("---| '\"{}\"'", public_event_name(&event.name)?));
        }
        Ok(lines)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedFile {
    pub name:     String,
    pub contents: String,
}

impl GeneratedFile {
    pub fn path_in(&self, dir: &Path) -> PathBuf {
        dir.join(&self.name)
    }
}

/// Run every converter. Nothing is written, so a failing converter leaves no output.
pub fn generate_all(ast: &LuaHelp, converters: &[&dyn Converter]) -> Result<Vec<GeneratedFile>, GenError> {
    converters
        .iter()
        .map(|converter| -> Result<GeneratedFile, GenError> {
            info!("Generating... {}", converter.name());
            Ok(GeneratedFile {
                name:     converter.name().to_string(),
                contents: converter.convert(ast)?.join("\n"),
            })
        })
        .collect()
}

/// Write generated files into `dir`, returning the written paths.
pub fn write_all(dir: &Path, files: &[GeneratedFile]) -> Result<Vec<PathBuf>, GenError> {
    let mut written = Vec::with_capacity(files.len());
    for file in files {
        let path = file.path_in(dir);
        write_text(&path, &file.contents)?;
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overrides::{OverrideRule, ParamPatch};
    use luagen_luahelp::{LuaHelpEvent, LuaHelpEventParameter};

    fn ast_event(name: &str, params: &[(&str, &str)]) -> LuaHelpEvent {
        LuaHelpEvent {
            name:        name.into(),
            arguments:   params.iter().map(|(n, _)| n.to_string()).collect(),
            description: Vec::new(),
            parameters:  params
                .iter()
                .map(|(n, t)| LuaHelpEventParameter {
                    name:                    n.to_string(),
                    type_:                   t.to_string(),
                    description:             String::new(),
                    additional_descriptions: Vec::new(),
                })
                .collect(),
            line:        0,
        }
    }

    #[test]
    fn test_event_fields_lines() {
        let ast = LuaHelp {
            events: vec![
                ast_event("eventNewPlayer", &[("playerName", "String")]),
                ast_event("eventKeyboard", &[("playerName", "String"), ("keyCode", "Int"), ("down", "Boolean")]),
                ast_event("eventLoop", &[]),
            ],
        };
        let lines = EventFieldsConverter::default().convert(&ast).unwrap();

        assert_eq!(
            lines,
            vec![
                "--- @field on fun(self:mousebase.TfmEvents, eventName:mousebase.TfmEvents.Events, listener:function):mousebase.TfmEvents",
                "--- @field on fun(self:mousebase.TfmEvents, eventName:'\"NewPlayer\"', listener:fun(playerName:string)):mousebase.TfmEvents",
                "--- @field on fun(self:mousebase.TfmEvents, eventName:'\"Keyboard\"', listener:fun(playerName:string, keyCode:integer, down:boolean)):mousebase.TfmEvents",
                "--- @field on fun(self:mousebase.TfmEvents, eventName:'\"Loop\"', listener:fun()):mousebase.TfmEvents",
            ]
        );
    }

    #[test]
    fn test_preamble_only_for_empty_ast() {
        let lines = EventFieldsConverter::default().convert(&LuaHelp::default()).unwrap();
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn test_override_display_name() {
        let converter = EventFieldsConverter::new(
            AnnotationNames::default(),
            OverrideTable::empty().with_rules([OverrideRule::new("eventFoo", vec![ParamPatch::new("x").rename("y")])]),
        );
        let ast = LuaHelp { events: vec![ast_event("eventFoo", &[("x", "String")])] };

        let lines = converter.convert(&ast).unwrap();
        assert!(lines[1].contains("listener:fun(y:string)"), "got {}", lines[1]);
    }

    #[test]
    fn test_builtin_override_in_output() {
        let ast = LuaHelp {
            events: vec![ast_event(
                "eventContactListener",
                &[("playerName", "String"), ("groundId", "Int"), ("contactInfos", "Table")],
            )],
        };
        let lines = EventFieldsConverter::default().convert(&ast).unwrap();
        assert!(lines[1].contains("listener:fun(playerName:string, groundId:integer, contactInfos:tfm.ContactDef)"));
    }

    #[test]
    fn test_invalid_event_name_aborts() {
        let ast = LuaHelp {
            events: vec![ast_event("eventLoop", &[]), ast_event("onChat", &[])],
        };
        let err = generate_all(&ast, &[&EventFieldsConverter::default()]).unwrap_err();
        assert!(matches!(err, GenError::InvalidEventName(ref n) if n == "onChat"));
    }

    #[test]
    fn test_unknown_type_aborts() {
        let ast = LuaHelp { events: vec![ast_event("eventLoop", &[("elapsed", "Float")])] };
        let err = EventFieldsConverter::default().convert(&ast).unwrap_err();
        assert!(matches!(err, GenError::UnknownType(ref t) if t == "Float"));
    }

    #[test]
    fn test_event_enum() {
        let ast = LuaHelp {
            events: vec![ast_event("eventLoop", &[]), ast_event("eventNewGame", &[])],
        };
        let files = generate_all(&ast, &[&EventEnumConverter::default()]).unwrap();
        assert_eq!(files[0].name, "eventEnum.generated.txt");
        assert_eq!(
            files[0].contents,
            "--- @alias mousebase.TfmEvents.Events\n---| '\"Loop\"'\n---| '\"NewGame\"'"
        );
    }
}
