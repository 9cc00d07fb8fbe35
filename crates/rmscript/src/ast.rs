//! Abstract syntax tree for rmscript programs.
//!
//! Statements, directions, strengths, and durations are finite closed sets
//! and are modeled as sum types with exhaustive matching. Every node keeps
//! its 1-indexed source position for diagnostics and IR metadata.

use crate::ir::PlayMode;

/// Movement keyword heading an action part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKeyword {
    Turn,
    Look,
    Head,
    Tilt,
    Antenna,
}

impl ActionKeyword {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionKeyword::Turn => "turn",
            ActionKeyword::Look => "look",
            ActionKeyword::Head => "head",
            ActionKeyword::Tilt => "tilt",
            ActionKeyword::Antenna => "antenna",
        }
    }
}

/// Which antenna(s) an antenna command drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AntennaSelector {
    Left,
    Right,
    Both,
}

/// Direction argument of an action part.
#[derive(Debug, Clone, PartialEq)]
pub enum DirectionArg {
    /// A direction or clock-keyword word, lowercased.
    Named(String),
    /// Numeric antenna clock position in `0..=12`.
    Clock(f64),
}

/// Qualitative strength level, resolved per channel by the semantic phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualLevel {
    VerySmall,
    Small,
    Medium,
    Large,
    VeryLarge,
}

impl QualLevel {
    /// Classifies a lowercased word, `None` if it is not a strength word.
    pub(crate) fn from_word(word: &str) -> Option<Self> {
        Some(match word {
            "minuscule" | "mini" | "verysmall" | "tiny" => QualLevel::VerySmall,
            "little" | "slightly" | "small" | "alittle" => QualLevel::Small,
            "medium" | "normal" | "regular" | "standard" | "normally" => QualLevel::Medium,
            "lot" | "big" | "large" | "very" | "alot" | "huge" | "strong" | "strongly" => {
                QualLevel::Large
            }
            "verybig" | "enormous" | "verylarge" | "maximum" => QualLevel::VeryLarge,
            _ => return None,
        })
    }
}

/// Strength argument: a raw number (degrees or millimeters, depending on
/// the keyword) or a qualitative level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Strength {
    Numeric(f64),
    Qualitative(QualLevel),
}

/// Named movement speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationLevel {
    SuperFast,
    Fast,
    Slow,
    SuperSlow,
}

impl DurationLevel {
    /// Classifies a lowercased word, `None` if it is not a speed word.
    pub(crate) fn from_word(word: &str) -> Option<Self> {
        Some(match word {
            "superfast" | "veryfast" => DurationLevel::SuperFast,
            "fast" => DurationLevel::Fast,
            "slow" | "slowly" => DurationLevel::Slow,
            "superslow" | "veryslow" => DurationLevel::SuperSlow,
            _ => return None,
        })
    }
}

/// Duration argument.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DurationSpec {
    Seconds(f64),
    Keyword(DurationLevel),
}

/// One action of a movement statement. In an `and` chain a part without
/// its own keyword inherits the chain head's keyword.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionPart {
    pub keyword: ActionKeyword,
    /// Present only for `antenna` parts.
    pub selector: Option<AntennaSelector>,
    pub direction: DirectionArg,
    pub strength: Option<Strength>,
    pub duration: Option<DurationSpec>,
    pub line: u32,
    pub column: u32,
}

/// Movement statement: one or more parts joined by `and`, merged into a
/// single IR movement by the semantic phase.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionStmt {
    pub head: ActionKeyword,
    pub parts: Vec<ActionPart>,
    pub line: u32,
    pub column: u32,
    /// Normalized (lowercased, space-joined) statement text for IR
    /// metadata.
    pub source_text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WaitStmt {
    pub seconds: f64,
    pub line: u32,
    pub column: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PictureStmt {
    pub line: u32,
    pub column: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaySoundStmt {
    /// Sound name, original spelling preserved.
    pub name: String,
    pub mode: PlayMode,
    pub line: u32,
    pub column: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoopSoundStmt {
    pub name: String,
    pub seconds: f64,
    pub line: u32,
    pub column: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RepeatStmt {
    pub count: u32,
    pub body: Vec<Statement>,
    pub line: u32,
    pub column: u32,
}

/// A top-level or repeat-body statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Action(ActionStmt),
    Wait(WaitStmt),
    Picture(PictureStmt),
    PlaySound(PlaySoundStmt),
    LoopSound(LoopSoundStmt),
    Repeat(RepeatStmt),
}

/// Root of a parsed script.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    /// Script name; filled in by the driver (filename stem or
    /// caller-supplied), not by the parser.
    pub name: String,
    /// Concatenated `DESCRIPTION` header lines.
    pub description: Option<String>,
    pub statements: Vec<Statement>,
}

/// Words that reset a rotation channel to zero.
pub(crate) fn is_center_word(word: &str) -> bool {
    matches!(word, "center" | "straight" | "forward" | "neutral")
}

/// Synonyms for backward head translation.
pub(crate) fn is_backward_word(word: &str) -> bool {
    matches!(word, "back" | "backward" | "backwards")
}
