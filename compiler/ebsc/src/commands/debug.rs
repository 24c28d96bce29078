//! Debug commands: `parse` and `lex` for inspecting the front end.

use std::io::Write;

use ebs_ir::{Program, Token};
use ebs_parse::SyntaxError;

use super::read_file;
use crate::DriverError;

fn syntax_error(path: &str, text: String, error: impl Into<SyntaxError>) -> DriverError {
    DriverError::Syntax {
        path: path.to_string(),
        text,
        error: error.into(),
    }
}

fn output_error(source: std::io::Error) -> DriverError {
    DriverError::Write {
        path: "<stdout>".to_string(),
        source,
    }
}

/// Parse a file and display a summary of its blocks and statements.
pub fn parse_file(path: &str, out: &mut dyn Write) -> Result<(), DriverError> {
    let text = read_file(path)?;
    let program = match ebs_parse::parse(path, &text) {
        Ok(program) => program,
        Err(error) => return Err(syntax_error(path, text, error)),
    };
    write_summary(path, &program, out).map_err(output_error)
}

fn write_summary(
    path: &str,
    program: &Program,
    out: &mut dyn Write,
) -> std::io::Result<()> {
    writeln!(out, "Parse result for '{path}':")?;
    writeln!(out, "  Named blocks: {}", program.blocks.len())?;
    writeln!(out, "  Statements: {}", program.statements.len())?;

    let names = program.block_names();
    if !names.is_empty() {
        writeln!(out)?;
        writeln!(out, "Named blocks:")?;
        for name in names {
            let Some(block) = program.block(name) else {
                continue;
            };
            let params: Vec<&str> = block.params.iter().map(|p| p.name.as_str()).collect();
            let returns = if block.return_type.is_some() {
                " returns a value"
            } else {
                ""
            };
            writeln!(
                out,
                "  {name}({}) at line {}{returns}",
                params.join(", "),
                block.line
            )?;
        }
    }
    Ok(())
}

/// Lex a file and display the token stream.
pub fn lex_file(path: &str, out: &mut dyn Write) -> Result<(), DriverError> {
    let text = read_file(path)?;
    let tokens = match ebs_lexer::tokenize(&text) {
        Ok(tokens) => tokens,
        Err(error) => return Err(syntax_error(path, text, error)),
    };
    write_tokens(path, &tokens, out).map_err(output_error)
}

fn write_tokens(path: &str, tokens: &[Token], out: &mut dyn Write) -> std::io::Result<()> {
    writeln!(out, "Tokens for '{}' ({} tokens):", path, tokens.len())?;
    for token in tokens {
        writeln!(out, "  {}:{} {:?}", token.line, token.column, token.kind)?;
    }
    Ok(())
}
