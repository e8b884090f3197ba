//! Making and unmaking moves.

use super::attacks::pawn_attacks;
use super::state::{Board, NullMoveInfo, UnmakeInfo};
use super::types::{Color, Move, MoveFlag, Piece, Square};

impl Board {
    /// Apply a move, returning the snapshot needed to undo it.
    ///
    /// Works for pseudo-legal moves too; the legality filter makes, tests
    /// the king, and unmakes through this same path.
    pub fn make_move(&mut self, mv: Move) -> UnmakeInfo {
        let from = mv.from();
        let to = mv.to();
        let flag = mv.flag();
        let us = self.side_to_move;

        let mut info = UnmakeInfo {
            captured: None,
            captured_square: None,
            castling_rights: self.castling_rights,
            en_passant_square: self.en_passant_square,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
        };

        self.en_passant_square = None;

        if flag == MoveFlag::EnPassant {
            // The captured pawn sits behind the destination square
            let capture_rank = (to.rank() as isize - us.pawn_direction()) as usize;
            let capture_sq = Square::new(capture_rank, to.file());
            info.captured = self.piece_at(capture_sq);
            info.captured_square = Some(capture_sq);
            self.remove_piece(capture_sq);
        } else if let Some(victim) = self.piece_at(to) {
            info.captured = Some(victim);
            info.captured_square = Some(to);
            self.remove_piece(to);
        }

        if let Some(promoted) = mv.promoted() {
            self.remove_piece(from);
            self.set_piece(to, us, promoted);
        } else {
            self.move_piece(from, to);
        }

        if flag == MoveFlag::Castle {
            let rank = us.back_rank();
            if to.file() == 6 {
                self.move_piece(Square::new(rank, 7), Square::new(rank, 5));
            } else {
                self.move_piece(Square::new(rank, 0), Square::new(rank, 3));
            }
        }

        self.update_castling_rights(from, mv.piece(), info.captured, info.captured_square);

        if flag == MoveFlag::DoublePush {
            // Only record the jumped square when an enemy pawn can actually
            // capture there; this keeps hashes equal across transpositions.
            let passed_rank = (from.rank() as isize + us.pawn_direction()) as usize;
            let ep_square = Square::new(passed_rank, from.file());
            let enemy_pawns = self.pieces[us.opponent().index()][Piece::Pawn.index()];
            if pawn_attacks(us, ep_square).intersects(enemy_pawns) {
                self.en_passant_square = Some(ep_square);
            }
        }

        if mv.piece() == Some(Piece::Pawn) || info.captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }

        if us == Color::Black {
            self.fullmove_number += 1;
        }

        self.side_to_move = us.opponent();
        self.recompute_hash();
        info
    }

    /// Undo a move made with `make_move`, restoring the position exactly.
    pub fn unmake_move(&mut self, mv: Move, info: UnmakeInfo) {
        self.side_to_move = self.side_to_move.opponent();
        self.castling_rights = info.castling_rights;
        self.en_passant_square = info.en_passant_square;
        self.halfmove_clock = info.halfmove_clock;
        self.fullmove_number = info.fullmove_number;

        let from = mv.from();
        let to = mv.to();
        let us = self.side_to_move;

        if mv.promoted().is_some() {
            self.remove_piece(to);
            self.set_piece(from, us, Piece::Pawn);
        } else {
            self.move_piece(to, from);
        }

        if mv.flag() == MoveFlag::Castle {
            let rank = us.back_rank();
            if to.file() == 6 {
                self.move_piece(Square::new(rank, 5), Square::new(rank, 7));
            } else {
                self.move_piece(Square::new(rank, 3), Square::new(rank, 0));
            }
        }

        if let (Some((color, piece)), Some(sq)) = (info.captured, info.captured_square) {
            self.set_piece(sq, color, piece);
        }

        self.recompute_hash();
    }

    /// Pass the turn: flip side to move and clear the en passant square.
    pub(crate) fn make_null_move(&mut self) -> NullMoveInfo {
        let info = NullMoveInfo {
            en_passant_square: self.en_passant_square,
        };
        self.en_passant_square = None;
        self.side_to_move = self.side_to_move.opponent();
        self.recompute_hash();
        info
    }

    pub(crate) fn unmake_null_move(&mut self, info: NullMoveInfo) {
        self.en_passant_square = info.en_passant_square;
        self.side_to_move = self.side_to_move.opponent();
        self.recompute_hash();
    }

    /// Strip castling rights when a king or rook moves, or a rook is
    /// captured on its home square.
    fn update_castling_rights(
        &mut self,
        from: Square,
        moved: Option<Piece>,
        captured: Option<(Color, Piece)>,
        captured_square: Option<Square>,
    ) {
        let us = self.side_to_move;
        match moved {
            Some(Piece::King) => {
                self.castling_rights.remove_both(us);
            }
            Some(Piece::Rook) => {
                let rank = us.back_rank();
                if from == Square::new(rank, 0) {
                    self.castling_rights.remove(us, false);
                } else if from == Square::new(rank, 7) {
                    self.castling_rights.remove(us, true);
                }
            }
            _ => {}
        }

        if let (Some((victim_color, Piece::Rook)), Some(sq)) = (captured, captured_square) {
            let rank = victim_color.back_rank();
            if sq == Square::new(rank, 0) {
                self.castling_rights.remove(victim_color, false);
            } else if sq == Square::new(rank, 7) {
                self.castling_rights.remove(victim_color, true);
            }
        }
    }
}
