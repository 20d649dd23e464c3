//! Platform-neutral scene building.
//!
//! Each game state is turned into a flat list of draw commands; only the
//! browser glue knows about an actual canvas. Colors are CSS strings so the
//! glue can hand them straight to the 2D context.

use crate::consts::*;
use crate::sim::serving::CustomerStatus;
use crate::sim::{ServingGame, SlotMachine, SnakeGame};

/// One drawing primitive on a raster surface of known dimensions.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Clear {
        w: f32,
        h: f32,
        color: &'static str,
    },
    Rect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: &'static str,
    },
    Circle {
        x: f32,
        y: f32,
        r: f32,
        color: &'static str,
    },
    Text {
        x: f32,
        y: f32,
        text: String,
        color: &'static str,
        font: &'static str,
        align: &'static str,
    },
}

const BACKDROP: &str = "#10141f";
const HUD_COLOR: &str = "#e8e8e8";
const HUD_FONT: &str = "14px sans-serif";

/// Snake board: body cells, food, score line.
pub fn snake_scene(game: &SnakeGame) -> Vec<DrawCmd> {
    let cell = SNAKE_CELL_PX;
    let w = game.config().cols as f32 * cell;
    let h = game.config().rows as f32 * cell;
    let mut out = vec![DrawCmd::Clear {
        w,
        h,
        color: BACKDROP,
    }];

    out.push(DrawCmd::Circle {
        x: game.food().col as f32 * cell + cell / 2.0,
        y: game.food().row as f32 * cell + cell / 2.0,
        r: cell * 0.4,
        color: "#e74c3c",
    });

    for (i, seg) in game.body().iter().enumerate() {
        let color = if i == 0 { "#2ecc71" } else { "#27ae60" };
        out.push(DrawCmd::Rect {
            x: seg.col as f32 * cell + 1.0,
            y: seg.row as f32 * cell + 1.0,
            w: cell - 2.0,
            h: cell - 2.0,
            color,
        });
    }

    out.push(DrawCmd::Text {
        x: 6.0,
        y: 18.0,
        text: format!("{} / {}", game.score(), game.config().food_target),
        color: HUD_COLOR,
        font: HUD_FONT,
        align: "left",
    });
    out
}

/// Serving counter: customers with patience bars, served/upset tallies.
pub fn serving_scene(game: &ServingGame) -> Vec<DrawCmd> {
    let w = game.config().width;
    let h = game.config().height;
    let mut out = vec![DrawCmd::Clear {
        w,
        h,
        color: BACKDROP,
    }];

    for c in game.customers() {
        let color = match c.status {
            CustomerStatus::Walking => "#f1c40f",
            CustomerStatus::Served => "#27ae60",
            CustomerStatus::Upset => "#e74c3c",
        };
        out.push(DrawCmd::Circle {
            x: c.pos.x,
            y: c.pos.y,
            r: 14.0,
            color,
        });
        if c.status == CustomerStatus::Walking {
            let frac = (c.patience / PATIENCE_START).clamp(0.0, 1.0);
            out.push(DrawCmd::Rect {
                x: c.pos.x - 16.0,
                y: c.pos.y - 26.0,
                w: 32.0 * frac,
                h: 4.0,
                color: "#3498db",
            });
        }
    }

    out.push(DrawCmd::Text {
        x: 6.0,
        y: 18.0,
        text: format!(
            "served {}  upset {} / {}",
            game.served(),
            game.upset(),
            game.config().upset_limit
        ),
        color: HUD_COLOR,
        font: HUD_FONT,
        align: "left",
    });
    out
}

/// Reel window: three glyphs and the credit count.
pub fn slots_scene(game: &SlotMachine, w: f32, h: f32) -> Vec<DrawCmd> {
    let mut out = vec![DrawCmd::Clear {
        w,
        h,
        color: BACKDROP,
    }];

    for (i, symbol) in game.reels().iter().enumerate() {
        let x = w * (0.25 + 0.25 * i as f32);
        out.push(DrawCmd::Rect {
            x: x - w * 0.1,
            y: h * 0.2,
            w: w * 0.2,
            h: h * 0.45,
            color: "#1d2433",
        });
        out.push(DrawCmd::Text {
            x,
            y: h * 0.5,
            text: symbol.glyph().to_string(),
            color: HUD_COLOR,
            font: "32px sans-serif",
            align: "center",
        });
    }

    if let Some(outcome) = game.outcome() {
        out.push(DrawCmd::Text {
            x: w / 2.0,
            y: h * 0.75,
            text: outcome.label().to_string(),
            color: HUD_COLOR,
            font: HUD_FONT,
            align: "center",
        });
    }

    out.push(DrawCmd::Text {
        x: w / 2.0,
        y: h * 0.9,
        text: format!("credits: {}", game.credits()),
        color: HUD_COLOR,
        font: HUD_FONT,
        align: "center",
    });
    out
}
