//! Standard Algebraic Notation for legal moves.

use crate::board::Position;
use crate::movegen::{has_legal_move, legal_moves};
use crate::types::*;

/// SAN for `mv`, which must be legal in `pos`. Includes the `+` / `#` suffix.
pub fn move_to_san(pos: &Position, mv: Move) -> String {
    let mut san = san_body(pos, mv);

    let mut after = pos.clone();
    if after.make_move(mv).is_some() && after.in_check(after.side_to_move) {
        san.push(if has_legal_move(&after) { '+' } else { '#' });
    }
    san
}

fn san_body(pos: &Position, mv: Move) -> String {
    let Some(piece) = pos.piece_at(mv.from) else {
        return format!("{}{}", mv.from, mv.to);
    };

    if mv.is_castle {
        return if mv.to.file() > mv.from.file() {
            "O-O".to_string()
        } else {
            "O-O-O".to_string()
        };
    }

    let is_capture = pos.piece_at(mv.to).is_some() || mv.is_en_passant;
    let mut san = String::new();

    if piece.kind == PieceKind::Pawn {
        if is_capture {
            san.push(mv.from.file_char());
        }
    } else {
        san.push(piece.kind.letter().to_ascii_uppercase());
        san.push_str(&disambiguation(pos, mv, piece));
    }

    if is_capture {
        san.push('x');
    }
    san.push_str(&mv.to.to_string());

    if let Some(promo) = mv.promo {
        san.push('=');
        san.push(promo.letter().to_ascii_uppercase());
    }
    san
}

/// File, rank or full square needed to tell `mv` apart from other moves of
/// the same piece kind landing on the same square.
fn disambiguation(pos: &Position, mv: Move, piece: Piece) -> String {
    let rivals: Vec<Square> = legal_moves(pos)
        .into_iter()
        .filter(|m| m.to == mv.to && m.from != mv.from)
        .filter(|m| pos.piece_at(m.from) == Some(piece))
        .map(|m| m.from)
        .collect();

    if rivals.is_empty() {
        String::new()
    } else if rivals.iter().all(|s| s.file() != mv.from.file()) {
        mv.from.file_char().to_string()
    } else if rivals.iter().all(|s| s.rank() != mv.from.rank()) {
        mv.from.rank_char().to_string()
    } else {
        mv.from.to_string()
    }
}

#[cfg(test)]
#[path = "san_tests.rs"]
mod san_tests;
