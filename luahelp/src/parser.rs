use crate::{
    error::LuaHelpError,
    lexer::{Line, LineKind},
    types::{LuaHelp, LuaHelpEvent, LuaHelpEventParameter},
    utils::{error, quote},
};

const EVENTS_SECTION: &str = "Events";
const ARGUMENT_LABELS: [&str; 2] = ["Arguments", "Parameters"];

#[derive(Debug, Clone, Copy, PartialEq)]
enum Block {
    Description,
    Arguments,
    Other,
}

/// Build the event AST from lexed lines. Only the `Events` section is read.
pub fn parse_luahelp(lines: &[Line]) -> Result<LuaHelp, LuaHelpError> {
    let mut events: Vec<LuaHelpEvent> = Vec::new();
    let mut in_events = false;
    let mut block = Block::Description;

    for line in lines {
        if line.kind == LineKind::Blank {
            continue;
        }

        if line.depth == 0 {
            // Top-level prose between sections is ignored
            if let LineKind::Label(title) = &line.kind {
                in_events = title == EVENTS_SECTION;
            }
            continue;
        }

        if !in_events {
            continue;
        }

        if line.depth == 1 {
            match &line.kind {
                LineKind::Signature { name, arguments } => {
                    events.push(LuaHelpEvent {
                        name:        name.clone(),
                        arguments:   arguments.clone(),
                        description: Vec::new(),
                        parameters:  Vec::new(),
                        line:        line.line,
                    });
                    block = Block::Description;
                }
                _ => {
                    return Err(error(
                        &format!("Expected event signature but found {}", quote(&line.text)),
                        line.line,
                        line.column,
                    ))
                }
            }
            continue;
        }

        let event = events.last_mut().ok_or_else(|| {
            error(
                &format!("Unexpected {} before any event signature", quote(&line.text)),
                line.line,
                line.column,
            )
        })?;

        if line.depth == 2 {
            match &line.kind {
                LineKind::Label(label) if ARGUMENT_LABELS.contains(&label.as_str()) => {
                    block = Block::Arguments;
                }
                LineKind::Label(_) => {
                    block = Block::Other;
                    event.description.push(line.text.clone());
                }
                _ => {
                    block = Block::Description;
                    event.description.push(line.text.clone());
                }
            }
            continue;
        }

        if block != Block::Arguments {
            event.description.push(line.text.clone());
            continue;
        }

        match &line.kind {
            LineKind::Parameter { name, type_, description } if line.depth == 3 => {
                event.parameters.push(LuaHelpEventParameter {
                    name:                    name.clone(),
                    type_:                   type_.clone(),
                    description:             description.clone(),
                    additional_descriptions: Vec::new(),
                });
            }
            _ => {
                let param = event.parameters.last_mut().ok_or_else(|| {
                    error(
                        &format!("Expected parameter but found {}", quote(&line.text)),
                        line.line,
                        line.column,
                    )
                })?;
                param.additional_descriptions.push(line.text.clone());
            }
        }
    }

    Ok(LuaHelp { events })
}
