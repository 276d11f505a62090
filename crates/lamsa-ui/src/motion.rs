//! # Motion
//!
//! The opacity/transform/transition triple every animated element on the
//! page goes through: hidden and offset at first, then visible at its
//! natural position once something releases it.

use serde::Serialize;

/// Where an element is drawn relative to its layout position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Offset {
    None,
    Y(i32),
    X(i32),
    /// Uniform scale in percent.
    Scale(u32),
}

impl Offset {
    pub fn css(&self) -> String {
        match self {
            Offset::None => String::new(),
            Offset::Y(px) => format!("translateY({px}px)"),
            Offset::X(px) => format!("translateX({px}px)"),
            Offset::Scale(pct) => format!("scale({})", percent_factor(*pct)),
        }
    }
}

/// Opacity and transform transitions sharing one duration and delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub duration_ms: u64,
    pub delay_ms: u64,
}

impl Transition {
    pub fn new(duration_ms: u64, delay_ms: u64) -> Self {
        Transition {
            duration_ms,
            delay_ms,
        }
    }
}

/// Visual state of one animated element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Motion {
    pub visible: bool,
    pub offset: Offset,
    pub transition: Option<Transition>,
}

impl Motion {
    /// Hidden and displaced, waiting to be released.
    pub fn hidden(offset: Offset, transition: Transition) -> Self {
        Motion {
            visible: false,
            offset,
            transition: Some(transition),
        }
    }

    /// Released: full opacity at the natural position. The transition stays
    /// so the change animates.
    pub fn release(&mut self) {
        self.visible = true;
        self.offset = match self.offset {
            Offset::X(_) => Offset::X(0),
            _ => Offset::Y(0),
        };
    }

    /// Fades out toward `offset`.
    pub fn dismiss(&mut self, offset: Offset, transition: Transition) {
        self.visible = false;
        self.offset = offset;
        self.transition = Some(transition);
    }
}

fn percent_factor(pct: u32) -> String {
    let whole = pct / 100;
    let frac = pct % 100;
    if frac == 0 {
        return whole.to_string();
    }
    let digits = format!("{frac:02}");
    format!("{whole}.{}", digits.trim_end_matches('0'))
}
