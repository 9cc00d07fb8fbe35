//! IR optimizer.
//!
//! Single pass over the IR list: runs of consecutive waits collapse into
//! one wait carrying the first entry's metadata, and movements that drive
//! no channel are dropped. Everything else keeps its position, count, and
//! metadata. Waits never merge across a non-wait entry, so the total wait
//! time between any two surviving entries is preserved.

use crate::ir::{IrOp, IrWait};

pub fn optimize(ir: &[IrOp]) -> Vec<IrOp> {
    let mut optimized = Vec::with_capacity(ir.len());
    let mut index = 0;
    while index < ir.len() {
        match &ir[index] {
            IrOp::Wait(first) => {
                let mut total = first.duration_sec;
                let mut end = index + 1;
                while let Some(IrOp::Wait(next)) = ir.get(end) {
                    total += next.duration_sec;
                    end += 1;
                }
                optimized.push(IrOp::Wait(IrWait {
                    duration_sec: total,
                    source_line: first.source_line,
                }));
                index = end;
            }
            IrOp::Movement(movement) if movement.is_noop() => {
                index += 1;
            }
            other => {
                optimized.push(other.clone());
                index += 1;
            }
        }
    }
    optimized
}
