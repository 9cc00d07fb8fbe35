//! Recursive descent parser for rmscript.
//!
//! Single pass over the token stream, dispatched on the statement's head
//! keyword. On a syntax error the parser records a diagnostic and resumes
//! after the next newline, so one bad line never hides the rest of the
//! script. Direction/keyword combinations and `and`-chain shape are
//! validated here; numeric ranges are the semantic phase's job (except the
//! antenna clock position, which is part of the grammar).

mod stream;

use stream::TokenStream;

use crate::ast::{
    ActionKeyword, ActionPart, ActionStmt, AntennaSelector, DirectionArg, DurationLevel,
    DurationSpec, LoopSoundStmt, PictureStmt, PlaySoundStmt, Program, QualLevel, RepeatStmt,
    Statement, Strength, WaitStmt, is_backward_word, is_center_word,
};
use crate::error::Diagnostic;
use crate::ir::PlayMode;
use crate::lexer::{Token, TokenKind};

/// Seconds a `loop` plays when no duration is given.
const DEFAULT_LOOP_SECONDS: f64 = 10.0;

/// Parses a token stream into a program. The program is always produced;
/// statements that failed to parse are dropped and reported.
pub fn parse(tokens: &[Token]) -> (Program, Vec<Diagnostic>) {
    let mut stream = TokenStream::new(tokens);
    let mut diagnostics = Vec::new();
    let mut program = Program::default();

    stream.skip_newlines();
    program.description = parse_description(&mut stream);

    loop {
        let statements = parse_statements(&mut stream, &mut diagnostics);
        program.statements.extend(statements);
        // A stray dedent only remains after recovering inside a block.
        if stream.at(TokenKind::Dedent) {
            stream.advance();
        } else {
            break;
        }
    }

    (program, diagnostics)
}

/// Consecutive `DESCRIPTION` header lines, joined with single spaces.
fn parse_description(stream: &mut TokenStream) -> Option<String> {
    let mut pieces: Vec<String> = Vec::new();
    while stream.at(TokenKind::Description) {
        stream.advance();
        if stream.at(TokenKind::DescriptionText) {
            pieces.push(stream.advance().text);
        }
        stream.skip_newlines();
    }
    if pieces.is_empty() {
        None
    } else {
        Some(pieces.join(" "))
    }
}

fn parse_statements(stream: &mut TokenStream, diagnostics: &mut Vec<Diagnostic>) -> Vec<Statement> {
    let mut statements = Vec::new();
    loop {
        stream.skip_newlines();
        if stream.at(TokenKind::Eof) || stream.at(TokenKind::Dedent) {
            break;
        }
        match parse_statement(stream, diagnostics) {
            Ok(statement) => statements.push(statement),
            Err(diagnostic) => {
                diagnostics.push(diagnostic);
                stream.synchronize_to_newline();
            }
        }
    }
    statements
}

fn parse_statement(
    stream: &mut TokenStream,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<Statement, Diagnostic> {
    if stream.at(TokenKind::Repeat) {
        // Repeat consumes its own block structure, including line ends.
        return parse_repeat(stream, diagnostics);
    }

    let token = stream.current().clone();
    let statement = match token.kind {
        TokenKind::Wait => Statement::Wait(parse_wait(stream)?),
        TokenKind::Picture => {
            stream.advance();
            Statement::Picture(PictureStmt {
                line: token.line,
                column: token.column,
            })
        }
        TokenKind::Play => Statement::PlaySound(parse_play(stream)?),
        TokenKind::Loop => Statement::LoopSound(parse_loop(stream)?),
        TokenKind::Turn
        | TokenKind::Look
        | TokenKind::Head
        | TokenKind::Tilt
        | TokenKind::Antenna => Statement::Action(parse_action_chain(stream, diagnostics)?),
        TokenKind::Indent => {
            stream.skip_block();
            return Err(Diagnostic::error(
                token.line,
                token.column,
                "Unexpected indented block",
            ));
        }
        TokenKind::Identifier => {
            return Err(Diagnostic::error(
                token.line,
                token.column,
                format!("Unknown keyword '{}'", token.text),
            ));
        }
        _ => {
            return Err(Diagnostic::error(
                token.line,
                token.column,
                format!("Unexpected token '{}'", token.text),
            ));
        }
    };
    expect_line_end(stream)?;
    Ok(statement)
}

fn expect_line_end(stream: &mut TokenStream) -> Result<(), Diagnostic> {
    match stream.current().kind {
        TokenKind::Newline => {
            stream.advance();
            Ok(())
        }
        TokenKind::Eof | TokenKind::Dedent => Ok(()),
        _ => {
            let token = stream.current();
            Err(Diagnostic::error(
                token.line,
                token.column,
                format!("Unexpected token '{}'", token.text),
            ))
        }
    }
}

fn parse_number(token: &Token) -> Result<f64, Diagnostic> {
    token.text.parse::<f64>().map_err(|_| {
        Diagnostic::error(
            token.line,
            token.column,
            format!("Malformed number literal '{}'", token.text),
        )
    })
}

fn parse_duration_literal(token: &Token) -> Result<f64, Diagnostic> {
    let digits = token.text.trim_end_matches(['s', 'S']);
    digits.parse::<f64>().map_err(|_| {
        Diagnostic::error(
            token.line,
            token.column,
            format!("Malformed duration literal '{}'", token.text),
        )
    })
}

fn parse_wait(stream: &mut TokenStream) -> Result<WaitStmt, Diagnostic> {
    let keyword = stream.advance();
    let token = stream.current().clone();
    match token.kind {
        TokenKind::Duration => {
            stream.advance();
            Ok(WaitStmt {
                seconds: parse_duration_literal(&token)?,
                line: keyword.line,
                column: keyword.column,
            })
        }
        TokenKind::Number => Err(Diagnostic::error(
            token.line,
            token.column,
            format!("Expected 's' after wait duration (e.g., 'wait {}s')", token.text),
        )),
        _ => Err(Diagnostic::error(
            token.line,
            token.column,
            "Expected duration after 'wait' (e.g., 'wait 1s')",
        )),
    }
}

fn parse_play(stream: &mut TokenStream) -> Result<PlaySoundStmt, Diagnostic> {
    let keyword = stream.advance();
    let name = stream.current().clone();
    if name.kind != TokenKind::Identifier {
        return Err(Diagnostic::error(
            name.line,
            name.column,
            format!("Expected sound name after 'play', got '{}'", name.text),
        ));
    }
    stream.advance();

    let mode = match stream.current().kind {
        TokenKind::Duration => {
            let token = stream.advance();
            PlayMode::BlockForSeconds(parse_duration_literal(&token)?)
        }
        // "wait" doubles as a blocking modifier; the keyword token covers it.
        TokenKind::SoundBlocking | TokenKind::Wait => {
            stream.advance();
            PlayMode::BlockUntilDone
        }
        _ => PlayMode::Async,
    };

    Ok(PlaySoundStmt {
        name: name.text,
        mode,
        line: keyword.line,
        column: keyword.column,
    })
}

fn parse_loop(stream: &mut TokenStream) -> Result<LoopSoundStmt, Diagnostic> {
    let keyword = stream.advance();
    let name = stream.current().clone();
    if name.kind != TokenKind::Identifier {
        return Err(Diagnostic::error(
            name.line,
            name.column,
            format!("Expected sound name after 'loop', got '{}'", name.text),
        ));
    }
    stream.advance();

    let seconds = if stream.at(TokenKind::Duration) {
        let token = stream.advance();
        parse_duration_literal(&token)?
    } else {
        DEFAULT_LOOP_SECONDS
    };

    Ok(LoopSoundStmt {
        name: name.text,
        seconds,
        line: keyword.line,
        column: keyword.column,
    })
}

fn parse_repeat(
    stream: &mut TokenStream,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<Statement, Diagnostic> {
    let keyword = stream.advance();
    let count_token = stream.current().clone();
    if count_token.kind != TokenKind::Number {
        return Err(Diagnostic::error(
            count_token.line,
            count_token.column,
            "Expected number after 'repeat'",
        ));
    }
    stream.advance();
    let count = count_token.text.parse::<u32>().map_err(|_| {
        Diagnostic::error(
            count_token.line,
            count_token.column,
            "Repeat count must be a non-negative integer",
        )
    })?;

    stream.skip_newlines();
    if !stream.at(TokenKind::Indent) {
        let token = stream.current();
        return Err(Diagnostic::error(
            token.line,
            token.column,
            "Expected indented block after 'repeat'",
        ));
    }
    stream.advance();

    let body = parse_statements(stream, diagnostics);
    if stream.at(TokenKind::Dedent) {
        stream.advance();
    }

    Ok(Statement::Repeat(RepeatStmt {
        count,
        body,
        line: keyword.line,
        column: keyword.column,
    }))
}

fn movement_keyword(kind: TokenKind) -> Option<ActionKeyword> {
    Some(match kind {
        TokenKind::Turn => ActionKeyword::Turn,
        TokenKind::Look => ActionKeyword::Look,
        TokenKind::Head => ActionKeyword::Head,
        TokenKind::Tilt => ActionKeyword::Tilt,
        TokenKind::Antenna => ActionKeyword::Antenna,
        _ => return None,
    })
}

fn parse_action_chain(
    stream: &mut TokenStream,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<ActionStmt, Diagnostic> {
    let start = stream.position();
    let head_token = stream.current().clone();

    let first = parse_action_part(stream, None, diagnostics)?;
    let head = first.keyword;
    let mut parts = vec![first];

    while stream.at(TokenKind::And) {
        stream.advance();
        // Parts without an explicit keyword reuse the chain head's.
        parts.push(parse_action_part(stream, Some(head), diagnostics)?);
    }

    let source_text = stream
        .tokens_since(start)
        .iter()
        .map(Token::folded)
        .collect::<Vec<_>>()
        .join(" ");

    Ok(ActionStmt {
        head,
        parts,
        line: head_token.line,
        column: head_token.column,
        source_text,
    })
}

fn parse_action_part(
    stream: &mut TokenStream,
    inherited: Option<ActionKeyword>,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<ActionPart, Diagnostic> {
    let token = stream.current().clone();
    let keyword = if let Some(keyword) = movement_keyword(token.kind) {
        stream.advance();
        keyword
    } else if let Some(previous) = inherited {
        if matches!(
            token.kind,
            TokenKind::Picture | TokenKind::Play | TokenKind::Loop | TokenKind::Wait
        ) {
            return Err(Diagnostic::error(
                token.line,
                token.column,
                format!(
                    "Cannot combine movement with '{}' using 'and'. Use separate lines instead.",
                    token.folded()
                ),
            ));
        }
        previous
    } else {
        return Err(Diagnostic::error(
            token.line,
            token.column,
            format!("Expected movement keyword, got '{}'", token.text),
        ));
    };

    let mut part = ActionPart {
        keyword,
        selector: None,
        direction: DirectionArg::Named(String::new()),
        strength: None,
        duration: None,
        line: token.line,
        column: token.column,
    };

    if keyword == ActionKeyword::Antenna {
        parse_antenna_target(stream, &mut part)?;
    } else {
        let direction = stream.current().clone();
        if direction.kind != TokenKind::Direction {
            return Err(Diagnostic::error(
                direction.line,
                direction.column,
                format!(
                    "Expected direction after '{}', got '{}'",
                    keyword.as_str(),
                    direction.text
                ),
            ));
        }
        let word = direction.folded();
        validate_direction(keyword, &word, &direction)?;
        stream.advance();
        part.direction = DirectionArg::Named(word);
    }

    parse_part_parameters(stream, &mut part, diagnostics)?;
    Ok(part)
}

/// Antenna grammar: a selector (`left`/`right`/`both`), then a target given
/// as a numeric clock position, a clock keyword, or a directional keyword.
fn parse_antenna_target(
    stream: &mut TokenStream,
    part: &mut ActionPart,
) -> Result<(), Diagnostic> {
    let selector_token = stream.current().clone();
    let selector = match (selector_token.kind, selector_token.folded().as_str()) {
        (TokenKind::Direction, "left") => AntennaSelector::Left,
        (TokenKind::Direction, "right") => AntennaSelector::Right,
        (TokenKind::Direction, "both") => AntennaSelector::Both,
        _ => {
            return Err(Diagnostic::error(
                selector_token.line,
                selector_token.column,
                format!(
                    "Antenna command requires a modifier (left/right/both), got '{}'",
                    selector_token.text
                ),
            ));
        }
    };
    stream.advance();
    part.selector = Some(selector);

    let target = stream.current().clone();
    part.direction = match target.kind {
        TokenKind::Number => {
            stream.advance();
            let clock = parse_number(&target)?;
            if !(0.0..=12.0).contains(&clock) {
                return Err(Diagnostic::error(
                    target.line,
                    target.column,
                    format!(
                        "Antenna clock position must be between 0 and 12, got {}",
                        target.text
                    ),
                ));
            }
            DirectionArg::Clock(clock)
        }
        TokenKind::ClockKeyword => {
            stream.advance();
            DirectionArg::Named(target.folded())
        }
        TokenKind::Direction
            if matches!(target.folded().as_str(), "up" | "down" | "left" | "right") =>
        {
            stream.advance();
            DirectionArg::Named(target.folded())
        }
        _ => {
            return Err(Diagnostic::error(
                target.line,
                target.column,
                format!(
                    "Antenna command requires a position (0-12, high/low/ext/int, or up/down/left/right), got '{}'",
                    target.text
                ),
            ));
        }
    };
    Ok(())
}

fn validate_direction(
    keyword: ActionKeyword,
    word: &str,
    token: &Token,
) -> Result<(), Diagnostic> {
    let (valid, hint) = match keyword {
        ActionKeyword::Turn => (
            matches!(word, "left" | "right") || is_center_word(word),
            "left/right/center",
        ),
        ActionKeyword::Look => (
            matches!(word, "left" | "right" | "up" | "down") || is_center_word(word),
            "left/right/up/down/center",
        ),
        ActionKeyword::Head => (
            matches!(word, "forward" | "left" | "right" | "up" | "down")
                || is_backward_word(word),
            "forward/back/left/right/up/down",
        ),
        ActionKeyword::Tilt => (
            matches!(word, "left" | "right") || is_center_word(word),
            "left/right/center",
        ),
        // Antenna targets are validated by parse_antenna_target.
        ActionKeyword::Antenna => (true, ""),
    };
    if valid {
        Ok(())
    } else {
        Err(Diagnostic::error(
            token.line,
            token.column,
            format!(
                "Invalid direction '{}' for keyword '{}' (use {})",
                word,
                keyword.as_str(),
                hint
            ),
        ))
    }
}

/// Optional strength and duration, in any order. When both a qualitative
/// word and a number are given, the number wins and a warning is recorded.
fn parse_part_parameters(
    stream: &mut TokenStream,
    part: &mut ActionPart,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<(), Diagnostic> {
    let mut qualitative_word: Option<String> = None;
    loop {
        let token = stream.current().clone();
        match token.kind {
            TokenKind::Number => {
                stream.advance();
                let value = parse_number(&token)?;
                if let Some(word) = &qualitative_word {
                    diagnostics.push(Diagnostic::warning(
                        token.line,
                        token.column,
                        format!(
                            "Both qualitative '{}' and quantitative '{}' strength specified, using {}",
                            word, token.text, token.text
                        ),
                    ));
                }
                part.strength = Some(Strength::Numeric(value));
            }
            TokenKind::Qualitative => {
                stream.advance();
                let word = token.folded();
                match part.strength {
                    Some(Strength::Numeric(value)) => {
                        diagnostics.push(Diagnostic::warning(
                            token.line,
                            token.column,
                            format!(
                                "Both qualitative '{}' and quantitative '{}' strength specified, using {}",
                                word, value, value
                            ),
                        ));
                    }
                    _ => {
                        if let Some(level) = QualLevel::from_word(&word) {
                            part.strength = Some(Strength::Qualitative(level));
                            qualitative_word = Some(word);
                        }
                    }
                }
            }
            TokenKind::Duration => {
                stream.advance();
                part.duration = Some(DurationSpec::Seconds(parse_duration_literal(&token)?));
            }
            TokenKind::DurationKeyword => {
                stream.advance();
                if let Some(level) = DurationLevel::from_word(&token.folded()) {
                    part.duration = Some(DurationSpec::Keyword(level));
                }
            }
            _ => break,
        }
    }
    Ok(())
}
