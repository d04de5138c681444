use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use luagen_luahelp::{LuaHelpEvent, LuaHelpEventParameter};
use regex::Regex;

use crate::error::GenError;

lazy_static! {
    static ref EVENT_NAME: Regex = Regex::new(r"^event([A-Za-z0-9_]+)$").unwrap();
}

/// Coarse parameter type as written in LuaHelp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceType {
    String,
    Int,
    Number,
    Boolean,
    Table,
    Function,
    Object,
}

impl SourceType {
    /// The LuaDoc type this tag is documented as.
    pub fn doc_type(self) -> &'static str {
        match self {
            SourceType::String   => "string",
            SourceType::Int      => "integer",
            SourceType::Number   => "number",
            SourceType::Boolean  => "boolean",
            SourceType::Table    => "table",
            SourceType::Function => "function",
            SourceType::Object   => "any",
        }
    }
}

impl FromStr for SourceType {
    type Err = GenError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "String"   => Ok(SourceType::String),
            "Int"      => Ok(SourceType::Int),
            "Number"   => Ok(SourceType::Number),
            "Boolean"  => Ok(SourceType::Boolean),
            "Table"    => Ok(SourceType::Table),
            "Function" => Ok(SourceType::Function),
            "Object"   => Ok(SourceType::Object),
            other      => Err(GenError::UnknownType(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventParam {
    pub name:                   String,
    /// Documentation type, already mapped from the source tag.
    pub type_:                  String,
    pub description:            String,
    pub additional_description: Vec<String>,
    /// Shown instead of `name`; lookups still use `name`.
    pub override_name:          Option<String>,
}

impl EventParam {
    pub fn new(name: impl Into<String>, type_: impl Into<String>) -> Self {
        EventParam {
            name:                   name.into(),
            type_:                  type_.into(),
            description:            String::new(),
            additional_description: Vec::new(),
            override_name:          None,
        }
    }

    pub fn from_ast(ast: &LuaHelpEventParameter) -> Result<Self, GenError> {
        let source: SourceType = ast.type_.parse()?;
        Ok(EventParam {
            name:                   ast.name.clone(),
            type_:                  source.doc_type().to_string(),
            description:            ast.description.clone(),
            additional_description: ast.additional_descriptions.clone(),
            override_name:          None,
        })
    }

    pub fn display_name(&self) -> &str {
        self.override_name.as_deref().unwrap_or(&self.name)
    }
}

impl fmt::Display for EventParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.display_name(), self.type_)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub name:        String,
    pub description: Vec<String>,
    params:          Vec<EventParam>,
}

impl Event {
    pub fn new(name: impl Into<String>) -> Self {
        Event {
            name:        name.into(),
            description: Vec::new(),
            params:      Vec::new(),
        }
    }

    pub fn from_ast(ast: &LuaHelpEvent) -> Result<Self, GenError> {
        let mut event = Event::new(ast.name.clone());
        event.description = ast.description.clone();
        for p in &ast.parameters {
            event.add_param(EventParam::from_ast(p)?);
        }
        Ok(event)
    }

    /// Add a parameter; one with the same name is replaced in place.
    pub fn add_param(&mut self, param: EventParam) -> &mut Self {
        match self.params.iter().position(|p| p.name == param.name) {
            Some(i) => self.params[i] = param,
            None => self.params.push(param),
        }
        self
    }

    pub fn with_param(mut self, param: EventParam) -> Self {
        self.add_param(param);
        self
    }

    pub fn param(&self, name: &str) -> Option<&EventParam> {
        self.params.iter().find(|p| p.name == name)
    }

    pub fn param_mut(&mut self, name: &str) -> Option<&mut EventParam> {
        self.params.iter_mut().find(|p| p.name == name)
    }

    /// Parameters in declaration order.
    pub fn params(&self) -> impl Iterator<Item = &EventParam> {
        self.params.iter()
    }

    /// Name without the `event` prefix, as scripts refer to it.
    pub fn public_name(&self) -> Result<&str, GenError> {
        public_event_name(&self.name)
    }

    /// `a:string, b:integer`
    pub fn listener_params(&self) -> String {
        self.params.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
    }
}

pub fn public_event_name(name: &str) -> Result<&str, GenError> {
    EVENT_NAME
        .captures(name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| GenError::InvalidEventName(name.to_string()))
}

pub fn events_from_ast(ast: &[LuaHelpEvent]) -> Result<Vec<Event>, GenError> {
    ast.iter().map(Event::from_ast).collect()
}
