use crate::board::model::{Board, MoveOutcome, Piece, PieceId};
use crate::board::types::{Color, Square};

/// クリック1回に対する状態遷移の結果。
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum ClickOutcome {
    /// 移動先の駒を取り除いて移動し、手番が交代した。
    Captured {
        /// 取り除かれた駒。
        taken: Piece,
    },
    /// 選択を解除した。
    Deselected,
    /// 何も起こらなかった。
    Ignored,
    /// 空きマスへ移動し、手番が交代した。
    Moved,
    /// 選択対象を別の駒へ切り替えた。
    Reselected,
    /// 駒を選択した。
    Selected,
}

impl ClickOutcome {
    /// 盤面または選択状態が変化したか（ビューの再描画判断用）。
    #[inline]
    #[must_use]
    pub const fn changed(self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

/// クリック操作で進行する1セッション。
///
/// 選択・移動・捕獲・手番交代のみを扱う。駒種ごとの動きの判定や
/// 王手などの終局判定は行わず、占有と手番の色だけを見る。
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Game {
    /// 盤面。
    board: Board,
    /// 選択中の駒。選択なしは `None` で表す。
    selection: Option<PieceId>,
    /// 次に指す側の色。確定した移動・捕獲でのみ交代する。
    turn: Color,
}

impl Game {
    /// 盤面への参照を返す。
    #[inline]
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// マスへのクリックを処理する。
    ///
    /// 駒のあるマスなら駒クリック、空きマスなら空きマスクリックとして扱う。
    #[inline]
    pub fn click(&mut self, square: Square) -> ClickOutcome {
        let occupant = match self.board.piece_at(square) {
            Some(piece) => Some(*piece),
            None => None,
        };

        match occupant {
            Some(piece) => self.on_piece(piece),
            None => self.on_empty(square),
        }
    }

    /// 選択中の駒を `destination` へ移動（または捕獲）して確定させる。
    fn commit(&mut self, mover: PieceId, destination: Square) -> ClickOutcome {
        let outcome = match self.board.move_or_capture(mover, destination) {
            Ok(value) => value,
            Err(err) => {
                // ガード済みの経路からは到達しない。状態を変えずに拒否する。
                tracing::warn!(?err, ?mover, ?destination, "move_or_capture rejected");
                return ClickOutcome::Ignored;
            }
        };

        self.selection = None;
        self.turn = self.turn.opponent();

        match outcome {
            MoveOutcome::Captured { taken } => {
                tracing::info!(?taken, ?destination, next = ?self.turn, "capture committed");
                ClickOutcome::Captured { taken }
            }
            MoveOutcome::Moved => {
                tracing::info!(?mover, ?destination, next = ?self.turn, "move committed");
                ClickOutcome::Moved
            }
        }
    }

    /// 標準配置・白番でセッションを開始する。
    #[inline]
    #[must_use]
    pub fn initial() -> Self {
        Self::new(Board::initial(), Color::White)
    }

    /// 任意の初期配置と手番でセッションを開始する。
    #[inline]
    #[must_use]
    pub const fn new(board: Board, turn: Color) -> Self {
        Self {
            board,
            selection: None,
            turn,
        }
    }

    /// 空きマスへのクリックを処理する。
    fn on_empty(&mut self, square: Square) -> ClickOutcome {
        match self.selection {
            Some(mover) => self.commit(mover, square),
            None => ClickOutcome::Ignored,
        }
    }

    /// 駒へのクリックを処理する。
    fn on_piece(&mut self, piece: Piece) -> ClickOutcome {
        match self.selection {
            None => {
                if piece.color() == self.turn {
                    self.selection = Some(piece.id());
                    tracing::debug!(id = ?piece.id(), "piece selected");
                    ClickOutcome::Selected
                } else {
                    ClickOutcome::Ignored
                }
            }
            Some(selected) if selected == piece.id() => {
                self.selection = None;
                tracing::debug!(id = ?piece.id(), "piece deselected");
                ClickOutcome::Deselected
            }
            Some(_selected) if piece.color() == self.turn => {
                self.selection = Some(piece.id());
                tracing::debug!(id = ?piece.id(), "selection switched");
                ClickOutcome::Reselected
            }
            Some(selected) => self.commit(selected, piece.square()),
        }
    }

    /// 駒識別子付きのクリックを処理する。
    ///
    /// すでに盤面から消えた駒を指す識別子（古い描画に由来する入力）は
    /// 何もせず `Ignored` を返す。
    #[inline]
    pub fn piece_clicked(&mut self, id: PieceId) -> ClickOutcome {
        let piece = match self.board.piece(id) {
            Some(value) => *value,
            None => {
                tracing::debug!(?id, "stale piece reference ignored");
                return ClickOutcome::Ignored;
            }
        };

        self.on_piece(piece)
    }

    /// 選択中の駒の識別子を返す。
    #[inline]
    #[must_use]
    pub const fn selected(&self) -> Option<PieceId> {
        self.selection
    }

    /// 選択中の駒を返す。
    #[inline]
    #[must_use]
    pub fn selected_piece(&self) -> Option<&Piece> {
        match self.selection {
            Some(id) => self.board.piece(id),
            None => None,
        }
    }

    /// 次に指す側の色を返す。
    #[inline]
    #[must_use]
    pub const fn side_to_move(&self) -> Color {
        self.turn
    }
}

#[cfg(test)]
mod tests {
    use super::{ClickOutcome, Game};
    use crate::board::model::Board;
    use crate::board::types::{Color, Kind, Square};

    /// テスト用に `Square` を生成する。
    fn square_at(rank: u8, file: u8) -> Square {
        match Square::from_rank_file(rank, file) {
            Some(value) => value,
            None => Square::from_index_unchecked(u8::MIN),
        }
    }

    /// 白ポーン(1,0)と黒ポーン(1,1)だけを置いた白番のセッションを作る。
    fn two_pawn_session() -> Game {
        let mut board = Board::empty();

        let white = board.spawn(Color::White, Kind::Pawn, square_at(1, 0));
        assert!(white.is_ok());
        let black = board.spawn(Color::Black, Kind::Pawn, square_at(1, 1));
        assert!(black.is_ok());

        Game::new(board, Color::White)
    }

    /// 手番側の駒のクリックで選択状態に入ることを確認する。
    #[test]
    fn clicking_own_piece_selects_it() {
        let mut game = two_pawn_session();
        let square = square_at(1, 0);

        assert_eq!(game.click(square), ClickOutcome::Selected);

        let selected = game.selected_piece();
        assert!(
            matches!(selected, Some(piece) if piece.square() == square),
            "selection must reference the clicked piece, got={selected:?}"
        );
        assert_eq!(game.side_to_move(), Color::White);
    }

    /// 非手番側の駒のクリックが無視されることを確認する。
    #[test]
    fn clicking_enemy_piece_from_idle_is_ignored() {
        let mut game = two_pawn_session();

        assert_eq!(game.click(square_at(1, 1)), ClickOutcome::Ignored);
        assert_eq!(game.selected(), None);
        assert_eq!(game.side_to_move(), Color::White);
    }

    /// 選択なしでの空きマスクリックが無視されることを確認する。
    #[test]
    fn clicking_empty_square_from_idle_is_ignored() {
        let mut game = two_pawn_session();

        assert_eq!(game.click(square_at(4, 4)), ClickOutcome::Ignored);
        assert_eq!(game.selected(), None);
    }

    /// 選択中の駒の再クリックで選択が解除され、盤面と手番が変わらないことを確認する。
    #[test]
    fn clicking_selected_piece_again_deselects() {
        let mut game = two_pawn_session();
        let before = game.board().clone();
        let square = square_at(1, 0);

        assert_eq!(game.click(square), ClickOutcome::Selected);
        assert_eq!(game.click(square), ClickOutcome::Deselected);

        assert_eq!(game.selected(), None);
        assert_eq!(game.board(), &before);
        assert_eq!(game.side_to_move(), Color::White);
    }

    /// 別の手番側の駒のクリックで選択が切り替わることを確認する。
    #[test]
    fn clicking_other_friendly_piece_reselects() {
        let mut board = Board::empty();
        let first_square = square_at(0, 0);
        let second_square = square_at(0, 7);

        let first = board.spawn(Color::White, Kind::Rook, first_square);
        assert!(first.is_ok());
        let second = board.spawn(Color::White, Kind::Rook, second_square);
        assert!(second.is_ok());

        let mut game = Game::new(board, Color::White);
        let before = game.board().clone();

        assert_eq!(game.click(first_square), ClickOutcome::Selected);
        assert_eq!(game.click(second_square), ClickOutcome::Reselected);

        let selected = game.selected_piece();
        assert!(
            matches!(selected, Some(piece) if piece.square() == second_square),
            "selection must follow the reselect, got={selected:?}"
        );
        assert_eq!(game.board(), &before);
        assert_eq!(game.side_to_move(), Color::White);
    }

    /// 白ポーン(1,0)→黒ポーン(1,1)の捕獲シナリオを確認する。
    #[test]
    fn capturing_enemy_piece_commits_and_flips_turn() {
        let mut game = two_pawn_session();
        let victim_square = square_at(1, 1);

        assert_eq!(game.click(square_at(1, 0)), ClickOutcome::Selected);

        let outcome = game.click(victim_square);
        assert!(
            matches!(outcome, ClickOutcome::Captured { taken } if taken.color() == Color::Black),
            "black pawn must be the capture victim, got={outcome:?}"
        );

        assert_eq!(game.board().pieces().len(), 1);
        assert_eq!(game.board().counts(), (u32::MIN, 1));
        assert_eq!(game.selected(), None);
        assert_eq!(game.side_to_move(), Color::Black);

        let survivor = game.board().piece_at(victim_square);
        assert!(
            matches!(survivor, Some(piece) if piece.color() == Color::White),
            "white pawn must occupy the victim's square, got={survivor:?}"
        );
    }

    /// 空きマスへの移動が確定し、駒数が変わらないことを確認する。
    #[test]
    fn moving_to_empty_square_commits_and_flips_turn() {
        let mut game = two_pawn_session();
        let destination = square_at(3, 0);

        assert_eq!(game.click(square_at(1, 0)), ClickOutcome::Selected);
        assert_eq!(game.click(destination), ClickOutcome::Moved);

        assert_eq!(game.board().pieces().len(), 2);
        assert_eq!(game.selected(), None);
        assert_eq!(game.side_to_move(), Color::Black);

        let moved = game.board().piece_at(destination);
        assert!(
            matches!(moved, Some(piece) if piece.color() == Color::White),
            "mover must sit on the destination, got={moved:?}"
        );
    }

    /// 確定した手の間で手番が厳密に交互することを確認する。
    #[test]
    fn turn_alternates_only_on_commits() {
        let mut game = two_pawn_session();

        // 選択と解除は手番を変えない。
        assert_eq!(game.click(square_at(1, 0)), ClickOutcome::Selected);
        assert_eq!(game.click(square_at(1, 0)), ClickOutcome::Deselected);
        assert_eq!(game.side_to_move(), Color::White);

        // 白の移動 → 黒番。
        assert_eq!(game.click(square_at(1, 0)), ClickOutcome::Selected);
        assert_eq!(game.click(square_at(2, 0)), ClickOutcome::Moved);
        assert_eq!(game.side_to_move(), Color::Black);

        // 黒の移動 → 白番。
        assert_eq!(game.click(square_at(1, 1)), ClickOutcome::Selected);
        assert_eq!(game.click(square_at(4, 1)), ClickOutcome::Moved);
        assert_eq!(game.side_to_move(), Color::White);
    }

    /// 盤面から消えた駒への参照が無視されることを確認する。
    #[test]
    fn stale_piece_reference_is_ignored() {
        let mut game = two_pawn_session();

        let victim = match game.board().piece_at(square_at(1, 1)) {
            Some(piece) => piece.id(),
            None => return,
        };

        assert_eq!(game.click(square_at(1, 0)), ClickOutcome::Selected);
        let outcome = game.click(square_at(1, 1));
        assert!(matches!(outcome, ClickOutcome::Captured { .. }));

        // 捕獲済みの駒を指す古い識別子は無視され、状態は変わらない。
        assert_eq!(game.piece_clicked(victim), ClickOutcome::Ignored);
        assert_eq!(game.selected(), None);
        assert_eq!(game.side_to_move(), Color::Black);
    }

    /// インデックス 0 のマスの駒が他と同様に選択・移動できることを確認する。
    ///
    /// 「選択なし」を偽値の番兵で表す実装ではインデックス 0 が壊れるため、
    /// その退行を防ぐ。
    #[test]
    fn piece_on_square_index_zero_behaves_normally() {
        let corner = match Square::from_index(u8::MIN) {
            Some(value) => value,
            None => return,
        };

        let mut board = Board::empty();
        let id = match board.spawn(Color::White, Kind::Rook, corner) {
            Ok(value) => value,
            Err(_err) => return,
        };

        let mut game = Game::new(board, Color::White);

        // 最初に生成された駒（識別子の連番の先頭）も通常どおり選択できる。
        assert_eq!(game.piece_clicked(id), ClickOutcome::Selected);
        assert_eq!(game.selected(), Some(id));

        let destination = square_at(0, 7);
        assert_eq!(game.click(destination), ClickOutcome::Moved);

        let moved = game.board().piece(id);
        assert!(
            matches!(moved, Some(piece) if piece.square() == destination),
            "corner piece must move like any other, got={moved:?}"
        );
    }
}
