//! Semantic analysis: AST → IR.
//!
//! Pure function of the program. Per statement, in order: repeat blocks are
//! expanded, context-aware defaults and qualitative strengths resolved,
//! physical limits validated (warnings only; requested values are never
//! clamped here), channels assigned in SI units, and all parts of one
//! action statement merged into at most one movement. Two sibling parts
//! writing the same channel slot are an error and drop the statement.

mod pose;
mod tables;

pub use pose::head_pose;

use crate::ast::{
    ActionKeyword, ActionPart, ActionStmt, AntennaSelector, DirectionArg, DurationSpec, Program,
    RepeatStmt, Statement, Strength, is_backward_word, is_center_word,
};
use crate::error::Diagnostic;
use crate::ir::{Interp, IrLoopSound, IrMovement, IrOp, IrPicture, IrPlaySound, IrWait};
use tables::{
    DEFAULT_DURATION_SEC, MAX_BODY_YAW_DEG, MAX_HEAD_PITCH_DEG, MAX_HEAD_ROLL_DEG,
    MAX_HEAD_TRANSLATION_X_MM, MAX_HEAD_TRANSLATION_Y_MM, MAX_HEAD_TRANSLATION_Z_DOWN_MM,
    MAX_HEAD_TRANSLATION_Z_UP_MM, MAX_HEAD_YAW_DEG, MIN_SMOOTH_DURATION_SEC, SAFE_ANTENNA_DEG,
    StrengthContext, default_strength, duration_keyword_seconds, qualitative_strength,
};

/// Analyzes a program and produces IR. IR is always produced; statements
/// with errors are dropped and reported.
pub fn analyze(program: &Program) -> (Vec<IrOp>, Vec<Diagnostic>) {
    let mut analyzer = SemanticAnalyzer {
        diagnostics: Vec::new(),
    };
    let mut ir = Vec::new();
    for statement in &program.statements {
        analyzer.analyze_statement(statement, &mut ir);
    }
    (ir, analyzer.diagnostics)
}

/// Converts a clock position (`0..=12`, each hour 30°) to degrees,
/// normalized to `(-180, 180]`: 0 o'clock = 0°, 3 = 90°, 6 = 180°,
/// 9 = -90°.
fn clock_to_angle_deg(clock: f64) -> f64 {
    let angle = clock * 30.0;
    if angle > 180.0 { angle - 360.0 } else { angle }
}

/// Resolved antenna target angle in degrees.
fn antenna_angle_deg(direction: &DirectionArg) -> f64 {
    let clock = match direction {
        DirectionArg::Clock(hours) => *hours,
        DirectionArg::Named(word) => match word.as_str() {
            "high" | "up" => 0.0,
            "ext" | "right" => 3.0,
            "low" | "down" => 6.0,
            "int" | "left" => 9.0,
            _ => 0.0,
        },
    };
    clock_to_angle_deg(clock)
}

/// An action part with defaults applied and units still in source form
/// (degrees, millimeters).
struct ResolvedPart {
    keyword: ActionKeyword,
    selector: Option<AntennaSelector>,
    direction: DirectionArg,
    strength: f64,
    duration: f64,
}

impl ResolvedPart {
    fn direction_word(&self) -> &str {
        match &self.direction {
            DirectionArg::Named(word) => word.as_str(),
            DirectionArg::Clock(_) => "",
        }
    }
}

/// Per-statement channel slots. Conflict detection works on these, the
/// finest addressable outputs: a merged statement may write each at most
/// once.
#[derive(Default)]
struct ChannelSlots {
    body_yaw: Option<f64>,
    head_yaw: Option<f64>,
    head_pitch: Option<f64>,
    head_roll: Option<f64>,
    head_x: Option<f64>,
    head_y: Option<f64>,
    head_z: Option<f64>,
    left_antenna: Option<f64>,
    right_antenna: Option<f64>,
}

impl ChannelSlots {
    fn write(&mut self, slot: Slot, value: f64, conflict: &mut Option<&'static str>) {
        let (cell, name) = match slot {
            Slot::BodyYaw => (&mut self.body_yaw, "body yaw"),
            Slot::HeadYaw => (&mut self.head_yaw, "head yaw"),
            Slot::HeadPitch => (&mut self.head_pitch, "head pitch"),
            Slot::HeadRoll => (&mut self.head_roll, "head roll"),
            Slot::HeadX => (&mut self.head_x, "head x"),
            Slot::HeadY => (&mut self.head_y, "head y"),
            Slot::HeadZ => (&mut self.head_z, "head z"),
            Slot::LeftAntenna => (&mut self.left_antenna, "left antenna"),
            Slot::RightAntenna => (&mut self.right_antenna, "right antenna"),
        };
        if cell.is_some() {
            if conflict.is_none() {
                *conflict = Some(name);
            }
        } else {
            *cell = Some(value);
        }
    }

    fn has_head_pose(&self) -> bool {
        self.head_yaw.is_some()
            || self.head_pitch.is_some()
            || self.head_roll.is_some()
            || self.head_x.is_some()
            || self.head_y.is_some()
            || self.head_z.is_some()
    }

    fn has_antennas(&self) -> bool {
        self.left_antenna.is_some() || self.right_antenna.is_some()
    }
}

#[derive(Clone, Copy)]
enum Slot {
    BodyYaw,
    HeadYaw,
    HeadPitch,
    HeadRoll,
    HeadX,
    HeadY,
    HeadZ,
    LeftAntenna,
    RightAntenna,
}

struct SemanticAnalyzer {
    diagnostics: Vec<Diagnostic>,
}

impl SemanticAnalyzer {
    fn error(&mut self, line: u32, message: String) {
        self.diagnostics.push(Diagnostic::error(line, 0, message));
    }

    fn warn(&mut self, line: u32, message: String) {
        self.diagnostics.push(Diagnostic::warning(line, 0, message));
    }

    fn analyze_statement(&mut self, statement: &Statement, out: &mut Vec<IrOp>) {
        match statement {
            Statement::Wait(wait) => out.push(IrOp::Wait(IrWait {
                duration_sec: wait.seconds,
                source_line: wait.line,
            })),
            Statement::Picture(picture) => out.push(IrOp::Picture(IrPicture {
                source_line: picture.line,
            })),
            Statement::PlaySound(play) => out.push(IrOp::PlaySound(IrPlaySound {
                name: play.name.clone(),
                mode: play.mode,
                source_line: play.line,
            })),
            Statement::LoopSound(sound) => out.push(IrOp::LoopSound(IrLoopSound {
                name: sound.name.clone(),
                duration_sec: sound.seconds,
                source_line: sound.line,
            })),
            Statement::Repeat(repeat) => self.analyze_repeat(repeat, out),
            Statement::Action(action) => {
                if let Some(movement) = self.analyze_action(action) {
                    out.push(IrOp::Movement(movement));
                }
            }
        }
    }

    fn analyze_repeat(&mut self, repeat: &RepeatStmt, out: &mut Vec<IrOp>) {
        if repeat.count == 0 {
            self.warn(
                repeat.line,
                "Repeat count is 0, block will not execute".to_string(),
            );
            return;
        }
        // Analyze the body once so its diagnostics appear once.
        let mut body = Vec::new();
        for statement in &repeat.body {
            self.analyze_statement(statement, &mut body);
        }
        for _ in 0..repeat.count {
            out.extend(body.iter().cloned());
        }
    }

    fn analyze_action(&mut self, statement: &ActionStmt) -> Option<IrMovement> {
        if statement.parts.is_empty() {
            return None;
        }
        let resolved: Vec<ResolvedPart> = statement
            .parts
            .iter()
            .map(|part| self.resolve_part(part))
            .collect();
        self.merge_parts(statement, &resolved)
    }

    fn resolve_part(&mut self, part: &ActionPart) -> ResolvedPart {
        let context = strength_context(part);
        let strength = match part.strength {
            Some(Strength::Numeric(value)) => value,
            Some(Strength::Qualitative(level)) => qualitative_strength(context, level),
            None => default_strength(context),
        };
        let duration = self.resolve_duration(part);
        self.validate_limits(part, strength);

        ResolvedPart {
            keyword: part.keyword,
            selector: part.selector,
            direction: part.direction.clone(),
            strength,
            duration,
        }
    }

    fn resolve_duration(&mut self, part: &ActionPart) -> f64 {
        match part.duration {
            Some(DurationSpec::Seconds(seconds)) => {
                if seconds < MIN_SMOOTH_DURATION_SEC {
                    self.warn(
                        part.line,
                        format!("Very short duration ({seconds}s) may cause jerky motion"),
                    );
                }
                seconds
            }
            Some(DurationSpec::Keyword(level)) => duration_keyword_seconds(level),
            None => DEFAULT_DURATION_SEC,
        }
    }

    fn validate_limits(&mut self, part: &ActionPart, strength: f64) {
        let line = part.line;
        let word = match &part.direction {
            DirectionArg::Named(word) => word.as_str(),
            DirectionArg::Clock(_) => "",
        };
        match part.keyword {
            ActionKeyword::Turn => {
                if strength.abs() > MAX_BODY_YAW_DEG {
                    self.warn(
                        line,
                        format!(
                            "Body yaw {strength:.1}° exceeds safe range (±{MAX_BODY_YAW_DEG:.1}°), will be clamped"
                        ),
                    );
                }
            }
            ActionKeyword::Look => match word {
                "up" | "down" => {
                    if strength.abs() > MAX_HEAD_PITCH_DEG {
                        self.warn(
                            line,
                            format!(
                                "Head pitch {strength:.1}° exceeds limit (±{MAX_HEAD_PITCH_DEG:.1}°), will be clamped"
                            ),
                        );
                    }
                }
                "left" | "right" => {
                    if strength.abs() > MAX_HEAD_YAW_DEG {
                        self.warn(
                            line,
                            format!(
                                "Head yaw {strength:.1}° exceeds safe range (±{MAX_HEAD_YAW_DEG:.1}°), will be clamped"
                            ),
                        );
                    }
                }
                _ => {}
            },
            ActionKeyword::Tilt => {
                if strength.abs() > MAX_HEAD_ROLL_DEG {
                    self.warn(
                        line,
                        format!(
                            "Head roll {strength:.1}° exceeds limit (±{MAX_HEAD_ROLL_DEG:.1}°), will be clamped"
                        ),
                    );
                }
            }
            ActionKeyword::Head => {
                if word == "forward" || is_backward_word(word) {
                    if strength.abs() > MAX_HEAD_TRANSLATION_X_MM {
                        self.warn(
                            line,
                            format!(
                                "Head X translation {strength:.1}mm exceeds typical range (±{MAX_HEAD_TRANSLATION_X_MM:.1}mm)"
                            ),
                        );
                    }
                } else if word == "left" || word == "right" {
                    if strength.abs() > MAX_HEAD_TRANSLATION_Y_MM {
                        self.warn(
                            line,
                            format!(
                                "Head Y translation {strength:.1}mm exceeds typical range (±{MAX_HEAD_TRANSLATION_Y_MM:.1}mm)"
                            ),
                        );
                    }
                } else if word == "up" {
                    if strength > MAX_HEAD_TRANSLATION_Z_UP_MM {
                        self.warn(
                            line,
                            format!(
                                "Head Z translation {strength:.1}mm exceeds typical range ({MAX_HEAD_TRANSLATION_Z_UP_MM:.1}mm max)"
                            ),
                        );
                    }
                } else if word == "down" && strength > MAX_HEAD_TRANSLATION_Z_DOWN_MM {
                    self.warn(
                        line,
                        format!(
                            "Head Z translation {strength:.1}mm exceeds typical range (-{MAX_HEAD_TRANSLATION_Z_DOWN_MM:.1}mm min)"
                        ),
                    );
                }
            }
            ActionKeyword::Antenna => {
                let angle = antenna_angle_deg(&part.direction);
                if angle.abs() > SAFE_ANTENNA_DEG {
                    self.warn(
                        line,
                        format!(
                            "Antenna angle {angle:.1}° exceeds recommended safe range (±{SAFE_ANTENNA_DEG:.1}°), may cause collision"
                        ),
                    );
                }
            }
        }
    }

    fn merge_parts(&mut self, statement: &ActionStmt, parts: &[ResolvedPart]) -> Option<IrMovement> {
        let mut slots = ChannelSlots::default();
        let mut conflict: Option<&'static str> = None;

        for part in parts {
            let word = part.direction_word();
            let strength = part.strength;
            match part.keyword {
                ActionKeyword::Turn => {
                    let value = if is_center_word(word) {
                        0.0
                    } else if word == "left" {
                        strength
                    } else {
                        -strength
                    };
                    slots.write(Slot::BodyYaw, value, &mut conflict);
                }
                ActionKeyword::Look => {
                    if is_center_word(word) {
                        slots.write(Slot::HeadYaw, 0.0, &mut conflict);
                        slots.write(Slot::HeadPitch, 0.0, &mut conflict);
                    } else {
                        match word {
                            "left" => slots.write(Slot::HeadYaw, strength, &mut conflict),
                            "right" => slots.write(Slot::HeadYaw, -strength, &mut conflict),
                            "up" => slots.write(Slot::HeadPitch, -strength, &mut conflict),
                            "down" => slots.write(Slot::HeadPitch, strength, &mut conflict),
                            _ => {}
                        }
                    }
                }
                ActionKeyword::Tilt => {
                    let value = if is_center_word(word) {
                        0.0
                    } else if word == "left" {
                        strength
                    } else {
                        -strength
                    };
                    slots.write(Slot::HeadRoll, value, &mut conflict);
                }
                ActionKeyword::Head => {
                    if word == "forward" {
                        slots.write(Slot::HeadX, strength, &mut conflict);
                    } else if is_backward_word(word) {
                        slots.write(Slot::HeadX, -strength, &mut conflict);
                    } else {
                        match word {
                            "left" => slots.write(Slot::HeadY, strength, &mut conflict),
                            "right" => slots.write(Slot::HeadY, -strength, &mut conflict),
                            "up" => slots.write(Slot::HeadZ, strength, &mut conflict),
                            "down" => slots.write(Slot::HeadZ, -strength, &mut conflict),
                            _ => {}
                        }
                    }
                }
                ActionKeyword::Antenna => {
                    let angle = antenna_angle_deg(&part.direction);
                    match part.selector.unwrap_or(AntennaSelector::Both) {
                        AntennaSelector::Both => {
                            slots.write(Slot::LeftAntenna, angle, &mut conflict);
                            slots.write(Slot::RightAntenna, angle, &mut conflict);
                        }
                        AntennaSelector::Left => {
                            slots.write(Slot::LeftAntenna, angle, &mut conflict)
                        }
                        AntennaSelector::Right => {
                            slots.write(Slot::RightAntenna, angle, &mut conflict)
                        }
                    }
                }
            }
        }

        if let Some(name) = conflict {
            self.error(
                statement.line,
                format!("Conflicting writes to channel {name}"),
            );
            return None;
        }

        let duration = parts
            .iter()
            .map(|part| part.duration)
            .fold(0.0_f64, f64::max);

        let head_pose = slots.has_head_pose().then(|| {
            head_pose(
                slots.head_x.unwrap_or(0.0) / 1000.0,
                slots.head_y.unwrap_or(0.0) / 1000.0,
                slots.head_z.unwrap_or(0.0) / 1000.0,
                slots.head_roll.unwrap_or(0.0).to_radians(),
                slots.head_pitch.unwrap_or(0.0).to_radians(),
                slots.head_yaw.unwrap_or(0.0).to_radians(),
            )
        });
        let antennas = slots.has_antennas().then(|| {
            (
                slots.left_antenna.unwrap_or(0.0).to_radians(),
                slots.right_antenna.unwrap_or(0.0).to_radians(),
            )
        });
        let body_yaw = slots.body_yaw.map(f64::to_radians);

        Some(IrMovement {
            head_pose,
            antennas,
            body_yaw,
            duration_sec: duration,
            interpolation: Interp::MinJerk,
            source_line: statement.line,
            source_text: statement.source_text.clone(),
        })
    }
}

/// Selects the qualitative column for a part; `look` splits by direction
/// into pitch (up/down) and yaw (left/right) ranges.
fn strength_context(part: &ActionPart) -> StrengthContext {
    match part.keyword {
        ActionKeyword::Turn => StrengthContext::BodyYaw,
        ActionKeyword::Tilt => StrengthContext::HeadPitchRoll,
        ActionKeyword::Head => StrengthContext::Translation,
        ActionKeyword::Antenna => StrengthContext::Antenna,
        ActionKeyword::Look => match &part.direction {
            DirectionArg::Named(word) if matches!(word.as_str(), "up" | "down") => {
                StrengthContext::HeadPitchRoll
            }
            _ => StrengthContext::HeadYaw,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;
    use crate::parser::parse;

    const EPS: f64 = 1e-9;

    fn analyze_source(source: &str) -> (Vec<IrOp>, Vec<Diagnostic>) {
        let (tokens, lex_diagnostics) = tokenize(source);
        assert!(lex_diagnostics.is_empty(), "lexer: {lex_diagnostics:?}");
        let (program, parse_diagnostics) = parse(&tokens);
        assert!(parse_diagnostics.is_empty(), "parser: {parse_diagnostics:?}");
        analyze(&program)
    }

    fn single_movement(source: &str) -> IrMovement {
        let (ir, diagnostics) = analyze_source(source);
        assert!(
            diagnostics.iter().all(|d| !d.is_error()),
            "errors: {diagnostics:?}"
        );
        assert_eq!(ir.len(), 1, "expected one entry: {ir:?}");
        match &ir[0] {
            IrOp::Movement(movement) => movement.clone(),
            other => panic!("expected movement, got {other:?}"),
        }
    }

    #[test]
    fn test_clock_to_angle() {
        assert!((clock_to_angle_deg(0.0) - 0.0).abs() < EPS);
        assert!((clock_to_angle_deg(3.0) - 90.0).abs() < EPS);
        assert!((clock_to_angle_deg(6.0) - 180.0).abs() < EPS);
        assert!((clock_to_angle_deg(9.0) + 90.0).abs() < EPS);
        assert!((clock_to_angle_deg(12.0) - 0.0).abs() < EPS);
    }

    #[test]
    fn test_look_left_defaults() {
        let movement = single_movement("look left\n");
        let expected = head_pose(0.0, 0.0, 0.0, 0.0, 0.0, 30f64.to_radians());
        let pose = movement.head_pose.expect("head pose");
        assert!((pose - expected).abs().max() < EPS);
        assert!((movement.duration_sec - 1.0).abs() < EPS);
        assert_eq!(movement.interpolation, Interp::MinJerk);
        assert!(movement.body_yaw.is_none());
        assert!(movement.antennas.is_none());
    }

    #[test]
    fn test_turn_drives_body_yaw_only() {
        let movement = single_movement("turn left 50\n");
        let yaw = movement.body_yaw.expect("body yaw");
        assert!((yaw - 50f64.to_radians()).abs() < EPS);
        assert!(movement.head_pose.is_none());
    }

    #[test]
    fn test_turn_right_is_negative() {
        let movement = single_movement("turn right 30\n");
        let yaw = movement.body_yaw.expect("body yaw");
        assert!((yaw + 30f64.to_radians()).abs() < EPS);
    }

    #[test]
    fn test_center_resets() {
        let movement = single_movement("turn center\n");
        assert!(movement.body_yaw.expect("body yaw").abs() < EPS);

        let movement = single_movement("look center\n");
        let pose = movement.head_pose.expect("head pose");
        assert!((pose - head_pose(0.0, 0.0, 0.0, 0.0, 0.0, 0.0)).abs().max() < EPS);
    }

    #[test]
    fn test_head_translation_axes() {
        let cases = [
            ("head forward 10\n", (0.010, 0.0, 0.0)),
            ("head back 10\n", (-0.010, 0.0, 0.0)),
            ("head left 10\n", (0.0, 0.010, 0.0)),
            ("head right 10\n", (0.0, -0.010, 0.0)),
            ("head up 15\n", (0.0, 0.0, 0.015)),
            ("head down 15\n", (0.0, 0.0, -0.015)),
        ];
        for (source, (x, y, z)) in cases {
            let movement = single_movement(source);
            let pose = movement.head_pose.expect("head pose");
            assert!((pose[(0, 3)] - x).abs() < EPS, "{source}");
            assert!((pose[(1, 3)] - y).abs() < EPS, "{source}");
            assert!((pose[(2, 3)] - z).abs() < EPS, "{source}");
        }
    }

    #[test]
    fn test_qualitative_is_context_aware() {
        // "maximum" resolves per channel.
        let movement = single_movement("turn left maximum\n");
        assert!((movement.body_yaw.expect("yaw") - 120f64.to_radians()).abs() < EPS);

        let movement = single_movement("look up maximum\n");
        let expected = head_pose(0.0, 0.0, 0.0, 0.0, -38f64.to_radians(), 0.0);
        assert!((movement.head_pose.expect("pose") - expected).abs().max() < EPS);

        let movement = single_movement("head forward maximum\n");
        let pose = movement.head_pose.expect("pose");
        assert!((pose[(0, 3)] - 0.028).abs() < EPS);
    }

    #[test]
    fn test_duration_keywords() {
        for (source, expected) in [
            ("look left superfast\n", 0.2),
            ("look left fast\n", 0.5),
            ("look left slow\n", 2.0),
            ("look left slowly\n", 2.0),
            ("look left superslow\n", 3.0),
        ] {
            let movement = single_movement(source);
            assert!((movement.duration_sec - expected).abs() < EPS, "{source}");
        }
    }

    #[test]
    fn test_merged_duration_is_maximum() {
        let movement = single_movement("look left 2s and up fast\n");
        assert!((movement.duration_sec - 2.0).abs() < EPS);
    }

    #[test]
    fn test_compound_movement_all_channels() {
        let movement = single_movement("antenna both up and look up 25 and turn left 30\n");
        let (left, right) = movement.antennas.expect("antennas");
        assert!(left.abs() < EPS);
        assert!(right.abs() < EPS);
        let expected = head_pose(0.0, 0.0, 0.0, 0.0, -25f64.to_radians(), 0.0);
        assert!((movement.head_pose.expect("pose") - expected).abs().max() < EPS);
        assert!((movement.body_yaw.expect("yaw") - 30f64.to_radians()).abs() < EPS);
    }

    #[test]
    fn test_conflicting_channel_writes() {
        let (ir, diagnostics) = analyze_source("look left and look right\n");
        assert!(ir.is_empty());
        assert!(
            diagnostics
                .iter()
                .any(|d| d.is_error() && d.message == "Conflicting writes to channel head yaw")
        );
    }

    #[test]
    fn test_disjoint_antenna_sides_merge() {
        let movement = single_movement("antenna left low and antenna right high\n");
        let (left, right) = movement.antennas.expect("antennas");
        assert!((left - 180f64.to_radians()).abs() < EPS);
        assert!(right.abs() < EPS);
    }

    #[test]
    fn test_antenna_directional_words() {
        let movement = single_movement("antenna both left\n");
        let (left, right) = movement.antennas.expect("antennas");
        assert!((left + 90f64.to_radians()).abs() < EPS);
        assert!((right + 90f64.to_radians()).abs() < EPS);

        let movement = single_movement("antenna left left\n");
        let (left, _) = movement.antennas.expect("antennas");
        assert!((left + 90f64.to_radians()).abs() < EPS);

        let movement = single_movement("antenna right right\n");
        let (_, right) = movement.antennas.expect("antennas");
        assert!((right - 90f64.to_radians()).abs() < EPS);
    }

    #[test]
    fn test_repeat_expansion() {
        let (ir, diagnostics) = analyze_source("repeat 2\n    look left\n    wait 0.5s\n");
        assert!(diagnostics.is_empty());
        assert_eq!(ir.len(), 4);
        assert!(matches!(&ir[0], IrOp::Movement(_)));
        assert!(matches!(&ir[1], IrOp::Wait(w) if (w.duration_sec - 0.5).abs() < EPS));
        assert_eq!(ir[0], ir[2]);
        assert_eq!(ir[1], ir[3]);
    }

    #[test]
    fn test_repeat_zero_warns_and_emits_nothing() {
        let (ir, diagnostics) = analyze_source("repeat 0\n    look left\n");
        assert!(ir.is_empty());
        assert!(
            diagnostics
                .iter()
                .any(|d| !d.is_error() && d.message.contains("Repeat count is 0"))
        );
    }

    #[test]
    fn test_body_yaw_limit_warning() {
        let (ir, diagnostics) = analyze_source("turn left 200\n");
        assert_eq!(ir.len(), 1);
        let IrOp::Movement(movement) = &ir[0] else {
            panic!("expected movement");
        };
        // The requested value survives; the adapter clamps.
        assert!((movement.body_yaw.expect("yaw") - 200f64.to_radians()).abs() < EPS);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].message,
            "Body yaw 200.0° exceeds safe range (±160.0°), will be clamped"
        );
        assert!(!diagnostics[0].is_error());
    }

    #[test]
    fn test_limit_warnings_per_channel() {
        let cases = [
            ("look up 50\n", "Head pitch 50.0° exceeds limit (±40.0°), will be clamped"),
            ("look left 80\n", "Head yaw 80.0° exceeds safe range (±65.0°), will be clamped"),
            ("tilt left 45\n", "Head roll 45.0° exceeds limit (±40.0°), will be clamped"),
            ("head forward 35\n", "Head X translation 35.0mm exceeds typical range (±30.0mm)"),
            ("head left 40\n", "Head Y translation 40.0mm exceeds typical range (±30.0mm)"),
            ("head up 25\n", "Head Z translation 25.0mm exceeds typical range (20.0mm max)"),
            ("head down 45\n", "Head Z translation 45.0mm exceeds typical range (-40.0mm min)"),
        ];
        for (source, expected) in cases {
            let (_, diagnostics) = analyze_source(source);
            assert_eq!(diagnostics.len(), 1, "{source}: {diagnostics:?}");
            assert_eq!(diagnostics[0].message, expected, "{source}");
            assert!(!diagnostics[0].is_error());
        }
    }

    #[test]
    fn test_antenna_safe_range_warning() {
        let (_, diagnostics) = analyze_source("antenna both ext\n");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].message,
            "Antenna angle 90.0° exceeds recommended safe range (±65.0°), may cause collision"
        );
    }

    #[test]
    fn test_within_limits_no_warning() {
        for source in ["turn left 160\n", "look up 40\n", "head forward 30\n", "antenna both 2\n"] {
            let (_, diagnostics) = analyze_source(source);
            assert!(diagnostics.is_empty(), "{source}: {diagnostics:?}");
        }
    }

    #[test]
    fn test_short_duration_warning() {
        let (_, diagnostics) = analyze_source("look left 0.05s\n");
        assert!(
            diagnostics
                .iter()
                .any(|d| d.message.contains("Very short duration"))
        );
    }

    #[test]
    fn test_source_metadata() {
        let (ir, _) = analyze_source("look left\nwait 1s\npicture\n");
        assert_eq!(ir[0].source_line(), 1);
        assert_eq!(ir[1].source_line(), 2);
        assert_eq!(ir[2].source_line(), 3);
        let IrOp::Movement(movement) = &ir[0] else {
            panic!("expected movement");
        };
        assert_eq!(movement.source_text, "look left");
    }

    #[test]
    fn test_non_movement_passthrough() {
        let (ir, diagnostics) = analyze_source("play chime\nloop engine 15s\npicture\n");
        assert!(diagnostics.is_empty());
        assert!(matches!(&ir[0], IrOp::PlaySound(p) if p.name == "chime"));
        assert!(
            matches!(&ir[1], IrOp::LoopSound(s) if s.name == "engine" && (s.duration_sec - 15.0).abs() < EPS)
        );
        assert!(matches!(&ir[2], IrOp::Picture(_)));
    }
}
