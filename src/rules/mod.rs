//! Win and draw detection rules.

mod draw;
mod win;

pub use draw::forced_draw_move;
pub use win::winning_line;
