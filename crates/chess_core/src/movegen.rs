use crate::board::{DIAGONALS, KING_DELTAS, KNIGHT_DELTAS, ORTHOGONALS, Position};
use crate::types::*;

/// Generate all legal moves, returning a freshly allocated vector.
pub fn legal_moves(pos: &Position) -> Vec<Move> {
    let mut tmp = pos.clone();
    let mut out = Vec::with_capacity(64);
    legal_moves_into(&mut tmp, &mut out);
    out
}

/// Generate all legal moves into the provided buffer, reusing it across calls.
pub fn legal_moves_into(pos: &mut Position, out: &mut Vec<Move>) {
    out.clear();
    pseudo_moves(pos, out);

    let mover = pos.side_to_move;
    // Filter illegal moves in place by playing them on the mutable position.
    out.retain(|&mv| match pos.make_move(mv) {
        Some(undo) => {
            let illegal = pos.in_check(mover);
            pos.unmake_move(mv, undo);
            !illegal
        }
        None => false,
    });
}

/// Whether the side to move has at least one legal move.
pub fn has_legal_move(pos: &Position) -> bool {
    !legal_moves(pos).is_empty()
}

fn pseudo_moves(pos: &Position, out: &mut Vec<Move>) {
    for (from, pc) in pos.pieces(pos.side_to_move) {
        match pc.kind {
            PieceKind::Pawn => gen_pawn(pos, from, pc.color, out),
            PieceKind::Knight => gen_steps(pos, from, pc.color, &KNIGHT_DELTAS, out),
            PieceKind::Bishop => gen_slider(pos, from, pc.color, &DIAGONALS, out),
            PieceKind::Rook => gen_slider(pos, from, pc.color, &ORTHOGONALS, out),
            PieceKind::Queen => {
                gen_slider(pos, from, pc.color, &DIAGONALS, out);
                gen_slider(pos, from, pc.color, &ORTHOGONALS, out);
            }
            PieceKind::King => {
                gen_steps(pos, from, pc.color, &KING_DELTAS, out);
                gen_castle(pos, from, pc.color, out);
            }
        }
    }
}

/// Push a pawn move, expanding it into the four promotions on the last rank.
fn push_pawn_move(from: Square, to: Square, c: Color, out: &mut Vec<Move>) {
    if to.rank() == c.promotion_rank() {
        for pk in PieceKind::PROMOTIONS {
            let mut mv = Move::new(from, to);
            mv.promo = Some(pk);
            out.push(mv);
        }
    } else {
        out.push(Move::new(from, to));
    }
}

fn gen_pawn(pos: &Position, from: Square, c: Color, out: &mut Vec<Move>) {
    let dir = c.forward();
    let start_rank = match c {
        Color::White => 1,
        Color::Black => 6,
    };

    if let Some(one) = from.offset(0, dir)
        && pos.piece_at(one).is_none()
    {
        push_pawn_move(from, one, c, out);
        if from.rank() == start_rank
            && let Some(two) = from.offset(0, 2 * dir)
            && pos.piece_at(two).is_none()
        {
            out.push(Move::new(from, two));
        }
    }

    for df in [-1, 1] {
        let Some(to) = from.offset(df, dir) else {
            continue;
        };
        match pos.piece_at(to) {
            Some(target) if target.color != c => push_pawn_move(from, to, c, out),
            None if pos.en_passant == Some(to) => {
                let mut mv = Move::new(from, to);
                mv.is_en_passant = true;
                out.push(mv);
            }
            _ => {}
        }
    }
}

fn gen_steps(pos: &Position, from: Square, c: Color, deltas: &[(i8, i8)], out: &mut Vec<Move>) {
    for &(df, dr) in deltas {
        if let Some(to) = from.offset(df, dr) {
            match pos.piece_at(to) {
                Some(pc) if pc.color == c => {}
                _ => out.push(Move::new(from, to)),
            }
        }
    }
}

fn gen_slider(pos: &Position, from: Square, c: Color, dirs: &[(i8, i8)], out: &mut Vec<Move>) {
    for &(df, dr) in dirs {
        let mut cur = from.offset(df, dr);
        while let Some(to) = cur {
            match pos.piece_at(to) {
                None => out.push(Move::new(from, to)),
                Some(pc) => {
                    if pc.color != c {
                        out.push(Move::new(from, to));
                    }
                    break;
                }
            }
            cur = to.offset(df, dr);
        }
    }
}

/// One castling option: right held, squares that must be empty, squares the
/// king crosses that must not be attacked, and the king's destination file.
struct CastleLane {
    empty: &'static [i8],
    safe: &'static [i8],
    king_to: i8,
}

const KING_SIDE: CastleLane = CastleLane {
    empty: &[5, 6],
    safe: &[5, 6],
    king_to: 6,
};
const QUEEN_SIDE: CastleLane = CastleLane {
    empty: &[1, 2, 3],
    safe: &[2, 3],
    king_to: 2,
};

fn gen_castle(pos: &Position, from: Square, c: Color, out: &mut Vec<Move>) {
    let (home_rank, king_side, queen_side) = match c {
        Color::White => (0, pos.castling.wk, pos.castling.wq),
        Color::Black => (7, pos.castling.bk, pos.castling.bq),
    };
    if Square::at(4, home_rank) != Some(from) || pos.in_check(c) {
        return;
    }

    let enemy = c.other();
    for (allowed, lane) in [(king_side, KING_SIDE), (queen_side, QUEEN_SIDE)] {
        if !allowed {
            continue;
        }
        let clear = lane
            .empty
            .iter()
            .filter_map(|&f| Square::at(f, home_rank))
            .all(|s| pos.piece_at(s).is_none());
        let safe = lane
            .safe
            .iter()
            .filter_map(|&f| Square::at(f, home_rank))
            .all(|s| !pos.is_square_attacked(s, enemy));
        if clear
            && safe
            && let Some(to) = Square::at(lane.king_to, home_rank)
        {
            let mut mv = Move::new(from, to);
            mv.is_castle = true;
            out.push(mv);
        }
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
