use crate::{board::Position, movegen::legal_moves, types::*};

pub fn move_to_uci(mv: Move) -> String {
    let mut s = format!("{}{}", mv.from, mv.to);
    if let Some(p) = mv.promo {
        s.push(p.letter());
    }
    s
}

/// Split coordinate notation (`e2e4`, `e7e8q`) into its parts without
/// consulting any position.
pub fn parse_coordinates(txt: &str) -> Option<(Square, Square, Option<PieceKind>)> {
    let txt = txt.trim();
    if !(4..=5).contains(&txt.len()) || !txt.is_ascii() {
        return None;
    }
    let from = txt[0..2].parse().ok()?;
    let to = txt[2..4].parse().ok()?;
    let promo = match txt[4..].chars().next() {
        None => None,
        Some(c) => match PieceKind::from_letter(c)? {
            PieceKind::Pawn | PieceKind::King => return None,
            kind => Some(kind),
        },
    };
    Some((from, to, promo))
}

/// Resolve coordinate notation against the legal moves of `pos` so the
/// castle and en passant flags are set. A missing promotion piece means queen.
pub fn parse_uci_move(pos: &Position, txt: &str) -> Option<Move> {
    let (from, to, promo) = parse_coordinates(txt)?;
    find_legal(pos, from, to, promo)
}

pub fn find_legal(pos: &Position, from: Square, to: Square, promo: Option<PieceKind>) -> Option<Move> {
    legal_moves(pos).into_iter().find(|m| {
        m.from == from
            && m.to == to
            && (m.promo.is_none() || m.promo == Some(promo.unwrap_or(PieceKind::Queen)))
    })
}
