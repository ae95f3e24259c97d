use crate::error::FenError;
use crate::types::*;
use crate::zobrist::ZOBRIST;

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

pub(crate) const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];
pub(crate) const KING_DELTAS: [(i8, i8); 8] = [
    (1, 1),
    (1, 0),
    (1, -1),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];
pub(crate) const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub(crate) const ORTHOGONALS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CastlingRights {
    pub wk: bool,
    pub wq: bool,
    pub bk: bool,
    pub bq: bool,
}

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights {
        wk: false,
        wq: false,
        bk: false,
        bq: false,
    };

    pub const ALL: CastlingRights = CastlingRights {
        wk: true,
        wq: true,
        bk: true,
        bq: true,
    };

    /// Drop any right that depends on a piece standing on `sq`.
    /// Called for both the origin and the destination of every move.
    fn touch(&mut self, sq: Square) {
        match sq.index() {
            0 => self.wq = false,
            7 => self.wk = false,
            4 => {
                self.wk = false;
                self.wq = false;
            }
            56 => self.bq = false,
            63 => self.bk = false,
            60 => {
                self.bk = false;
                self.bq = false;
            }
            _ => {}
        }
    }

    fn as_array(&self) -> [bool; 4] {
        [self.wk, self.wq, self.bk, self.bq]
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    pub board: [Option<Piece>; 64],
    pub side_to_move: Color,
    pub castling: CastlingRights,
    pub en_passant: Option<Square>, // square behind a pawn that just advanced 2
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

#[derive(Clone, Debug)]
pub struct Undo {
    pub captured: Option<Piece>,
    pub castling: CastlingRights,
    pub en_passant: Option<Square>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
    pub moved_piece: Piece,
    pub rook_move: Option<(Square, Square)>,
    pub ep_captured_sq: Option<Square>, // square actually captured in en-passant
}

/// Rook hop for a castling king move, keyed by king origin and destination.
fn castle_rook_squares(from: Square, to: Square) -> Option<(Square, Square)> {
    let (rf, rt) = match (from.index(), to.index()) {
        (4, 6) => (7, 5),
        (4, 2) => (0, 3),
        (60, 62) => (63, 61),
        (60, 58) => (56, 59),
        _ => return None,
    };
    Some((Square::new(rf)?, Square::new(rt)?))
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

impl Position {
    pub fn empty() -> Self {
        Position {
            board: [None; 64],
            side_to_move: Color::White,
            castling: CastlingRights::NONE,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    pub fn startpos() -> Self {
        let mut p = Position {
            castling: CastlingRights::ALL,
            ..Position::empty()
        };
        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (file, kind) in back.into_iter().enumerate() {
            let f = file as i8;
            for (color, back_rank, pawn_rank) in [(Color::White, 0, 1), (Color::Black, 7, 6)] {
                p.put(f, back_rank, Piece::new(color, kind));
                p.put(f, pawn_rank, Piece::new(color, PieceKind::Pawn));
            }
        }
        p
    }

    fn put(&mut self, file: i8, rank: i8, pc: Piece) {
        if let Some(s) = Square::at(file, rank) {
            self.set_piece(s, Some(pc));
        }
    }

    /// Parse Forsyth-Edwards Notation. Move counters are optional.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(FenError::MissingFields(parts.len()));
        }

        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::RankCount(ranks.len()));
        }

        let mut pos = Position::empty();
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_idx as i8; // FEN lists rank 8 .. 1
            let mut file: i8 = 0;
            for ch in rank_str.chars() {
                if let Some(d) = ch.to_digit(10) {
                    file += d as i8;
                } else {
                    let pc = Piece::from_fen_char(ch).ok_or(FenError::Piece(ch))?;
                    let s = Square::at(file, rank).ok_or(FenError::RankWidth { rank: rank_idx })?;
                    pos.set_piece(s, Some(pc));
                    file += 1;
                }
                if file > 8 {
                    return Err(FenError::RankWidth { rank: rank_idx });
                }
            }
            if file != 8 {
                return Err(FenError::RankWidth { rank: rank_idx });
            }
        }

        pos.side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::SideToMove(other.to_string())),
        };

        if parts[2] != "-" {
            for c in parts[2].chars() {
                match c {
                    'K' => pos.castling.wk = true,
                    'Q' => pos.castling.wq = true,
                    'k' => pos.castling.bk = true,
                    'q' => pos.castling.bq = true,
                    _ => return Err(FenError::Castling(c)),
                }
            }
        }

        pos.en_passant = match parts[3] {
            "-" => None,
            ep => Some(
                ep.parse()
                    .map_err(|_| FenError::EnPassant(ep.to_string()))?,
            ),
        };

        let counter = |field: Option<&&str>, default: u32| -> Result<u32, FenError> {
            match field {
                None => Ok(default),
                Some(s) => s.parse().map_err(|_| FenError::Counter(s.to_string())),
            }
        };
        pos.halfmove_clock = counter(parts.get(4), 0)?;
        pos.fullmove_number = counter(parts.get(5), 1)?;

        for color in [Color::White, Color::Black] {
            let kings = pos
                .pieces(color)
                .filter(|(_, pc)| pc.kind == PieceKind::King)
                .count();
            if kings != 1 {
                return Err(FenError::Kings(color));
            }
        }

        Ok(pos)
    }

    pub fn to_fen(&self) -> String {
        let mut out = String::with_capacity(90);
        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                match Square::at(file, rank).and_then(|s| self.piece_at(s)) {
                    Some(pc) => {
                        if empty > 0 {
                            out.push_str(&empty.to_string());
                            empty = 0;
                        }
                        out.push(pc.fen_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push_str(&empty.to_string());
            }
            if rank > 0 {
                out.push('/');
            }
        }

        out.push(' ');
        out.push(match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        });

        out.push(' ');
        let rights: String = self
            .castling
            .as_array()
            .iter()
            .zip(['K', 'Q', 'k', 'q'])
            .filter(|(on, _)| **on)
            .map(|(_, c)| c)
            .collect();
        out.push_str(if rights.is_empty() { "-" } else { &rights });

        out.push(' ');
        match self.en_passant {
            Some(s) => out.push_str(&s.to_string()),
            None => out.push('-'),
        }
        out.push_str(&format!(" {} {}", self.halfmove_clock, self.fullmove_number));
        out
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board[sq.index()]
    }

    pub fn set_piece(&mut self, sq: Square, pc: Option<Piece>) {
        self.board[sq.index()] = pc;
    }

    /// Every piece of `color` with its square, a1 first.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |s| match self.piece_at(s) {
            Some(pc) if pc.color == color => Some((s, pc)),
            _ => None,
        })
    }

    pub fn king_sq(&self, c: Color) -> Option<Square> {
        self.pieces(c)
            .find(|(_, pc)| pc.kind == PieceKind::King)
            .map(|(s, _)| s)
    }

    pub fn in_check(&self, c: Color) -> bool {
        match self.king_sq(c) {
            Some(ksq) => self.is_square_attacked(ksq, c.other()),
            None => false,
        }
    }

    fn holds(&self, sq: Option<Square>, by: Color, kinds: &[PieceKind]) -> bool {
        match sq.and_then(|s| self.piece_at(s)) {
            Some(pc) => pc.color == by && kinds.contains(&pc.kind),
            None => false,
        }
    }

    fn ray_hits(&self, target: Square, by: Color, dirs: &[(i8, i8)], kinds: &[PieceKind]) -> bool {
        dirs.iter().any(|&(df, dr)| {
            let mut cur = target.offset(df, dr);
            while let Some(s) = cur {
                if let Some(pc) = self.piece_at(s) {
                    return pc.color == by && kinds.contains(&pc.kind);
                }
                cur = s.offset(df, dr);
            }
            false
        })
    }

    pub fn is_square_attacked(&self, target: Square, by: Color) -> bool {
        // A pawn of `by` attacks from one rank behind its direction of travel.
        let back = -by.forward();
        if [-1, 1]
            .iter()
            .any(|&df| self.holds(target.offset(df, back), by, &[PieceKind::Pawn]))
        {
            return true;
        }
        if KNIGHT_DELTAS
            .iter()
            .any(|&(df, dr)| self.holds(target.offset(df, dr), by, &[PieceKind::Knight]))
        {
            return true;
        }
        if KING_DELTAS
            .iter()
            .any(|&(df, dr)| self.holds(target.offset(df, dr), by, &[PieceKind::King]))
        {
            return true;
        }
        self.ray_hits(target, by, &DIAGONALS, &[PieceKind::Bishop, PieceKind::Queen])
            || self.ray_hits(target, by, &ORTHOGONALS, &[PieceKind::Rook, PieceKind::Queen])
    }

    /// Play `mv` on the board, `None` when no piece stands on `mv.from`.
    pub fn make_move(&mut self, mv: Move) -> Option<Undo> {
        let moved = self.piece_at(mv.from)?;
        let undo_base = (
            self.castling.clone(),
            self.en_passant,
            self.halfmove_clock,
            self.fullmove_number,
        );

        let mut captured = self.piece_at(mv.to);
        let mut ep_captured_sq = None;
        if mv.is_en_passant {
            // The captured pawn sits beside the origin, on the destination file.
            if let Some(cs) = Square::at(mv.to.file(), mv.from.rank()) {
                captured = self.piece_at(cs);
                self.set_piece(cs, None);
                ep_captured_sq = Some(cs);
            }
        }

        self.set_piece(mv.from, None);
        let landed = if moved.kind == PieceKind::Pawn && mv.to.rank() == moved.color.promotion_rank()
        {
            Piece::new(moved.color, mv.promo.unwrap_or(PieceKind::Queen))
        } else {
            moved
        };
        self.set_piece(mv.to, Some(landed));

        let mut rook_move = None;
        if mv.is_castle && moved.kind == PieceKind::King {
            if let Some((rf, rt)) = castle_rook_squares(mv.from, mv.to) {
                let rook = self.piece_at(rf);
                self.set_piece(rf, None);
                self.set_piece(rt, rook);
                rook_move = Some((rf, rt));
            }
        }

        self.castling.touch(mv.from);
        self.castling.touch(mv.to);

        self.en_passant = None;
        if moved.kind == PieceKind::Pawn && (mv.to.rank() - mv.from.rank()).abs() == 2 {
            self.en_passant = Square::at(mv.from.file(), (mv.from.rank() + mv.to.rank()) / 2);
        }

        if moved.kind == PieceKind::Pawn || captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }
        if self.side_to_move == Color::Black {
            self.fullmove_number += 1;
        }
        self.side_to_move = self.side_to_move.other();

        Some(Undo {
            captured,
            castling: undo_base.0,
            en_passant: undo_base.1,
            halfmove_clock: undo_base.2,
            fullmove_number: undo_base.3,
            moved_piece: moved,
            rook_move,
            ep_captured_sq,
        })
    }

    pub fn unmake_move(&mut self, mv: Move, undo: Undo) {
        self.side_to_move = self.side_to_move.other();
        self.castling = undo.castling;
        self.en_passant = undo.en_passant;
        self.halfmove_clock = undo.halfmove_clock;
        self.fullmove_number = undo.fullmove_number;

        if let Some((rf, rt)) = undo.rook_move {
            let rook = self.piece_at(rt);
            self.set_piece(rt, None);
            self.set_piece(rf, rook);
        }

        // The moved piece goes back as it was, which also reverts promotions.
        self.set_piece(mv.to, None);
        self.set_piece(mv.from, Some(undo.moved_piece));

        match undo.ep_captured_sq {
            Some(cs) => self.set_piece(cs, undo.captured),
            None => self.set_piece(mv.to, undo.captured),
        }
    }

    /// Fifty-move rule: 100 half-moves without a capture or pawn move.
    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= 100
    }

    /// Neither side can possibly deliver mate: bare kings, a single minor
    /// piece, or only bishops that all stand on one square color.
    pub fn is_insufficient_material(&self) -> bool {
        let mut minors = 0;
        let mut bishop_colors = [false; 2];
        for color in [Color::White, Color::Black] {
            for (s, pc) in self.pieces(color) {
                match pc.kind {
                    PieceKind::King => {}
                    PieceKind::Knight => minors += 1,
                    PieceKind::Bishop => {
                        minors += 1;
                        bishop_colors[((s.file() + s.rank()) % 2) as usize] = true;
                    }
                    PieceKind::Pawn | PieceKind::Rook | PieceKind::Queen => return false,
                }
            }
        }
        if minors <= 1 {
            return true;
        }
        let knights = self
            .board
            .iter()
            .flatten()
            .filter(|pc| pc.kind == PieceKind::Knight)
            .count();
        knights == 0 && !(bishop_colors[0] && bishop_colors[1])
    }

    /// Zobrist hash of the position, used for repetition detection.
    pub fn position_hash(&self) -> u64 {
        let mut h = 0u64;
        for s in Square::all() {
            if let Some(pc) = self.piece_at(s) {
                h ^= ZOBRIST.piece_key(pc, s);
            }
        }
        if self.side_to_move == Color::Black {
            h ^= ZOBRIST.side_to_move;
        }
        for (i, on) in self.castling.as_array().into_iter().enumerate() {
            if on {
                h ^= ZOBRIST.castling_key(i);
            }
        }
        if let Some(ep) = self.en_passant {
            h ^= ZOBRIST.ep_key(ep.file() as u8);
        }
        h
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
