/// Rendering layer — all terminal drawing lives here.
///
/// Each function receives a mutable writer, an immutable view of the game
/// state and the terminal viewport.  No game logic is performed; this module
/// only scales the 350 x 600 world onto the terminal grid and translates
/// state into terminal commands.

use std::cmp::Ordering;
use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use apple_catch::config::{APPLE_SIZE, FLOOR_TOP, PLAYER_WIDTH, WORLD_HEIGHT, WORLD_WIDTH};
use apple_catch::entities::{Apple, Difficulty, GameState, Phase};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_SKY: Color = Color::Rgb { r: 173, g: 216, b: 230 };
const C_FLOOR: Color = Color::Rgb { r: 96, g: 64, b: 32 };
const C_GRASS: Color = Color::DarkGreen;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_PLAYER: Color = Color::Black;
const C_APPLE: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;

/// Terminal size in cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
}

impl Viewport {
    /// First and one-past-last column of the play area (inside the side walls).
    fn inner_cols(&self) -> (u16, u16) {
        (1, self.cols.saturating_sub(1).max(2))
    }

    /// First and one-past-last row of the play area (below the HUD and top
    /// bar, above the bottom bar and the hint row).
    fn inner_rows(&self) -> (u16, u16) {
        (2, self.rows.saturating_sub(2).max(3))
    }

    fn col_of(&self, x: f32) -> u16 {
        let (lo, hi) = self.inner_cols();
        let span = (hi - lo) as f32;
        let c = lo as f32 + (x / WORLD_WIDTH) * span;
        (c.max(lo as f32) as u16).min(hi - 1)
    }

    /// `None` when `y` is above or below the visible world.
    fn row_of(&self, y: f32) -> Option<u16> {
        if !(0.0..WORLD_HEIGHT).contains(&y) {
            return None;
        }
        let (lo, hi) = self.inner_rows();
        let span = (hi - lo) as f32;
        Some((lo as f32 + (y / WORLD_HEIGHT) * span) as u16)
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &GameState, vp: Viewport) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_playfield(out, vp)?;

    for apple in &state.apples {
        draw_apple(out, apple, vp)?;
    }
    draw_player(out, state, vp)?;

    draw_hud(out, state, vp)?;
    draw_controls_hint(out, vp)?;

    match state.phase {
        Phase::NotStarted => draw_start_prompt(out, state, vp)?,
        Phase::Paused => draw_paused(out, vp)?,
        Phase::GameOver => draw_game_over(out, state, vp)?,
        Phase::Playing => {}
    }

    // Cursor rests on the hint row between frames.
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, vp.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Playfield ─────────────────────────────────────────────────────────────────

/// Sky, floor band and the frame around them, one viewport row at a time.
/// The frame hugs the inner area, so it follows the viewport on resize.
fn draw_playfield<W: Write>(out: &mut W, vp: Viewport) -> std::io::Result<()> {
    let (c0, c1) = vp.inner_cols();
    let (r0, r1) = vp.inner_rows();
    let width = (c1 - c0) as usize;
    let blank = " ".repeat(width);
    let floor_row = vp.row_of(FLOOR_TOP).unwrap_or(r1);

    out.queue(style::SetForegroundColor(C_BORDER))?;
    out.queue(cursor::MoveTo(c0 - 1, r0 - 1))?;
    out.queue(Print(format!("▗{}▖", "▄".repeat(width))))?;

    for row in r0..r1 {
        out.queue(cursor::MoveTo(c0 - 1, row))?;
        out.queue(style::SetForegroundColor(C_BORDER))?;
        out.queue(style::SetBackgroundColor(Color::Reset))?;
        out.queue(Print("▐"))?;
        match row.cmp(&floor_row) {
            Ordering::Less => {
                out.queue(style::SetBackgroundColor(C_SKY))?;
                out.queue(Print(&blank))?;
            }
            Ordering::Equal => {
                out.queue(style::SetBackgroundColor(C_FLOOR))?;
                out.queue(style::SetForegroundColor(C_GRASS))?;
                out.queue(Print("▀".repeat(width)))?;
            }
            Ordering::Greater => {
                out.queue(style::SetBackgroundColor(C_FLOOR))?;
                out.queue(Print(&blank))?;
            }
        }
        out.queue(style::SetBackgroundColor(Color::Reset))?;
        out.queue(style::SetForegroundColor(C_BORDER))?;
        out.queue(Print("▌"))?;
    }

    out.queue(cursor::MoveTo(c0 - 1, r1))?;
    out.queue(Print(format!("▝{}▘", "▀".repeat(width))))?;
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_player<W: Write>(out: &mut W, state: &GameState, vp: Viewport) -> std::io::Result<()> {
    // Sprite (2 rows, 3 cols), standing on the floor:
    //   (o)     ← head
    //   /█\     ← body + arms
    let centre = vp.col_of(state.player.x + PLAYER_WIDTH / 2.0);
    let left = centre.saturating_sub(1).max(1);
    let Some(floor_row) = vp.row_of(FLOOR_TOP) else {
        return Ok(());
    };

    out.queue(style::SetBackgroundColor(C_SKY))?;
    out.queue(style::SetForegroundColor(C_PLAYER))?;
    if floor_row >= 2 {
        out.queue(cursor::MoveTo(left, floor_row - 2))?;
        out.queue(Print("(o)"))?;
    }
    out.queue(cursor::MoveTo(left, floor_row.saturating_sub(1)))?;
    out.queue(Print("/█\\"))?;
    out.queue(style::SetBackgroundColor(Color::Reset))?;
    Ok(())
}

fn draw_apple<W: Write>(out: &mut W, apple: &Apple, vp: Viewport) -> std::io::Result<()> {
    // Still above the top of the world right after a spawn.
    let Some(row) = vp.row_of(apple.y + APPLE_SIZE / 2.0) else {
        return Ok(());
    };
    out.queue(cursor::MoveTo(vp.col_of(apple.x + APPLE_SIZE / 2.0), row))?;
    out.queue(style::SetBackgroundColor(C_SKY))?;
    out.queue(style::SetForegroundColor(C_APPLE))?;
    out.queue(Print("●"))?;
    out.queue(style::SetBackgroundColor(Color::Reset))?;
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState, vp: Viewport) -> std::io::Result<()> {
    // Score and high score — left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!(
        "Score:{:>4}  Hi:{:>4}",
        state.score, state.high_score
    )))?;

    // Difficulty, speed and mute — centre
    let settings = &state.settings;
    let mid = format!(
        "[ {} ] {:.1}{}",
        settings.difficulty.label(),
        settings.speed,
        if settings.mute { " MUTE" } else { "" }
    );
    let level_color = match settings.difficulty {
        Difficulty::Easy => Color::Green,
        Difficulty::Medium => Color::Yellow,
        Difficulty::Hard => Color::Red,
    };
    let mx = (vp.cols / 2).saturating_sub(mid.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(mx, 0))?;
    out.queue(style::SetForegroundColor(level_color))?;
    out.queue(Print(&mid))?;

    // Lives — right, one block per life
    let lives_text = format!("Lives: {}", "■ ".repeat(state.lives as usize).trim_end());
    let rx = vp
        .cols
        .saturating_sub(lives_text.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(&lives_text))?;

    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, vp: Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, vp.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → Move  P Pause  M Mute  +/- Speed  1/2/3 Level  Q Quit"))?;
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn draw_centered<W: Write>(
    out: &mut W,
    vp: Viewport,
    lines: &[(&str, Color)],
) -> std::io::Result<()> {
    let cx = vp.cols / 2;
    let start_row = (vp.rows / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }
    Ok(())
}

fn draw_start_prompt<W: Write>(out: &mut W, state: &GameState, vp: Viewport) -> std::io::Result<()> {
    let level_line = format!(
        "Level: {}  Speed: {:.1}",
        state.settings.difficulty.label(),
        state.settings.speed
    );
    draw_centered(
        out,
        vp,
        &[
            ("╔══════════════════╗", Color::Red),
            ("║   APPLE  CATCH   ║", Color::Red),
            ("╚══════════════════╝", Color::Red),
            (&level_line, Color::Yellow),
            ("SPACE - Start  Q - Quit", Color::White),
        ],
    )
}

fn draw_paused<W: Write>(out: &mut W, vp: Viewport) -> std::io::Result<()> {
    draw_centered(
        out,
        vp,
        &[
            ("╔══════════════════╗", Color::Cyan),
            ("║      PAUSED      ║", Color::Cyan),
            ("╚══════════════════╝", Color::Cyan),
            ("P - Resume  Q - Quit", Color::White),
        ],
    )
}

fn draw_game_over<W: Write>(out: &mut W, state: &GameState, vp: Viewport) -> std::io::Result<()> {
    let score_line = format!("Final Score: {:>4}", state.score);
    let new_best = state.score >= state.high_score && state.score > 0;
    let best_line = if new_best {
        format!("★ NEW BEST: {:>4} ★", state.high_score)
    } else {
        format!("Best Score:  {:>4}", state.high_score)
    };
    let best_color = if new_best { Color::Yellow } else { Color::DarkGrey };

    draw_centered(
        out,
        vp,
        &[
            ("╔══════════════════╗", Color::Red),
            ("║    GAME  OVER    ║", Color::Red),
            ("╚══════════════════╝", Color::Red),
            (&score_line, Color::Yellow),
            (&best_line, best_color),
            ("SPACE - Play Again  Q - Quit", Color::White),
        ],
    )
}
