use crate::board::types::{Color, Kind, Square};

/// 初期配置の後列（描画上の左の筋から右の筋へ）。
const BACK_RANK: [Kind; 8] = [
    Kind::Rook,
    Kind::Knight,
    Kind::Bishop,
    Kind::Queen,
    Kind::King,
    Kind::Bishop,
    Kind::Knight,
    Kind::Rook,
];

/// 黒の後列の段。
const BLACK_BACK_RANK: u8 = 7;

/// 黒のポーンの段。
const BLACK_PAWN_RANK: u8 = 6;

/// 白の後列の段。
const WHITE_BACK_RANK: u8 = 0;

/// 白のポーンの段。
const WHITE_PAWN_RANK: u8 = 1;

/// 盤面操作に失敗した理由。
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum ModelError {
    /// 移動先を占有しているのが移動する駒自身である。
    CaptureSelf,
    /// 指定された駒が盤面上に存在しない。
    NotOnBoard,
    /// 対象のマスが別の駒に占有されている。
    Occupied,
}

/// `Board::move_or_capture` が適用した結果。
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum MoveOutcome {
    /// 移動先の駒を取り除いて移動した。
    Captured {
        /// 取り除かれた駒。
        taken: Piece,
    },
    /// 空きマスへ移動した。
    Moved,
}

/// 駒の安定した識別子。
///
/// 盤面が駒を生成した時点で割り当てられ、セッション中に再利用されない。
/// 座標や配列インデックスとは独立で、値 0 も通常の識別子である。
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct PieceId(
    /// 生成順に割り当てられる連番。
    u32,
);

/// 盤面上の駒。
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Piece {
    /// 駒の色。
    color: Color,
    /// 識別子。
    id: PieceId,
    /// 駒の種類。
    kind: Kind,
    /// 現在のマス。
    square: Square,
}

impl Piece {
    /// 駒の色を返す。
    #[inline]
    #[must_use]
    pub const fn color(self) -> Color {
        self.color
    }

    /// 識別子を返す。
    #[inline]
    #[must_use]
    pub const fn id(self) -> PieceId {
        self.id
    }

    /// 駒の種類を返す。
    #[inline]
    #[must_use]
    pub const fn kind(self) -> Kind {
        self.kind
    }

    /// 現在のマスを返す。
    #[inline]
    #[must_use]
    pub const fn square(self) -> Square {
        self.square
    }
}

/// 駒の順序付き集合（盤面モデル）。
///
/// 不変条件: 確定した操作の後、2つの駒が同じマスを占有することはない。
/// 駒の削除後も列の順序は保たれる。
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Board {
    /// 次に割り当てる識別子。
    next_id: u32,
    /// 駒の列（生成順）。
    pieces: Vec<Piece>,
}

impl Board {
    /// 指定された識別子の駒が盤面上に存在するかを返す。
    #[inline]
    #[must_use]
    pub fn contains(&self, id: PieceId) -> bool {
        self.piece(id).is_some()
    }

    /// 駒数（黒、白）を返す。
    #[inline]
    #[must_use]
    pub fn counts(&self) -> (u32, u32) {
        let mut black = u32::MIN;
        let mut white = u32::MIN;

        for piece in &self.pieces {
            match piece.color {
                Color::Black => black = black.saturating_add(1),
                Color::White => white = white.saturating_add(1),
            }
        }

        (black, white)
    }

    /// 駒のない盤面を返す。
    #[inline]
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            next_id: u32::MIN,
            pieces: Vec::new(),
        }
    }

    /// 標準配置の盤面を返す。
    ///
    /// 白が段 0..=1、黒が段 6..=7 を占める。
    #[must_use]
    pub fn initial() -> Self {
        let mut board = Self::empty();

        let mut file = u8::MIN;
        for kind in BACK_RANK {
            let _: Result<PieceId, ModelError> =
                board.spawn_at(Color::White, kind, WHITE_BACK_RANK, file);
            let _: Result<PieceId, ModelError> =
                board.spawn_at(Color::White, Kind::Pawn, WHITE_PAWN_RANK, file);
            let _: Result<PieceId, ModelError> =
                board.spawn_at(Color::Black, kind, BLACK_BACK_RANK, file);
            let _: Result<PieceId, ModelError> =
                board.spawn_at(Color::Black, Kind::Pawn, BLACK_PAWN_RANK, file);

            file = file.saturating_add(1);
        }

        board
    }

    /// 移動と捕獲を1つの確定操作として適用する。
    ///
    /// 移動先に別の駒がいればそれを取り除き、続けて `mover` を移動する。
    /// 検証はすべて変更前に行い、途中状態が観測されることはない。
    ///
    /// # Errors
    ///
    /// 次の場合にエラーを返す：
    /// - `ModelError::NotOnBoard`: `mover` が盤面上に存在しない場合
    /// - `ModelError::CaptureSelf`: 移動先を占有しているのが `mover` 自身の場合
    ///
    pub fn move_or_capture(
        &mut self,
        mover: PieceId,
        destination: Square,
    ) -> Result<MoveOutcome, ModelError> {
        if !self.contains(mover) {
            return Err(ModelError::NotOnBoard);
        }

        let occupant = match self.piece_at(destination) {
            Some(piece) => Some(*piece),
            None => None,
        };

        if let Some(target) = occupant {
            if target.id == mover {
                return Err(ModelError::CaptureSelf);
            }
        }

        let taken = match occupant {
            Some(target) => match self.remove(target.id) {
                Ok(piece) => Some(piece),
                Err(err) => return Err(err),
            },
            None => None,
        };

        match self.relocate(mover, destination) {
            Ok(()) => {}
            Err(err) => return Err(err),
        }

        match taken {
            Some(piece) => Ok(MoveOutcome::Captured { taken: piece }),
            None => Ok(MoveOutcome::Moved),
        }
    }

    /// 指定された識別子の駒を返す。
    #[inline]
    #[must_use]
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.iter().find(|piece| piece.id == id)
    }

    /// 指定されたマスの駒を返す。
    #[inline]
    #[must_use]
    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.pieces.iter().find(|piece| piece.square == square)
    }

    /// すべての駒を生成順で返す。
    #[inline]
    #[must_use]
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// 駒の座標をその場で変更する。
    ///
    /// # Errors
    ///
    /// 次の場合にエラーを返す：
    /// - `ModelError::NotOnBoard`: `id` の駒が盤面上に存在しない場合
    /// - `ModelError::Occupied`: 移動先を別の駒が占有している場合
    ///
    pub fn relocate(&mut self, id: PieceId, destination: Square) -> Result<(), ModelError> {
        if !self.contains(id) {
            return Err(ModelError::NotOnBoard);
        }

        let occupied = self
            .pieces
            .iter()
            .any(|piece| piece.square == destination && piece.id != id);
        if occupied {
            return Err(ModelError::Occupied);
        }

        match self.pieces.iter_mut().find(|piece| piece.id == id) {
            Some(piece) => {
                piece.square = destination;
                Ok(())
            }
            None => Err(ModelError::NotOnBoard),
        }
    }

    /// 指定された識別子の駒を盤面から取り除く。
    ///
    /// 取り除く対象は識別子でのみ決まり、座標の一致では決まらない。
    ///
    /// # Errors
    ///
    /// `id` の駒が盤面上に存在しない場合、`ModelError::NotOnBoard` を返す。
    ///
    pub fn remove(&mut self, id: PieceId) -> Result<Piece, ModelError> {
        let index = match self.pieces.iter().position(|piece| piece.id == id) {
            Some(value) => value,
            None => return Err(ModelError::NotOnBoard),
        };

        Ok(self.pieces.remove(index))
    }

    /// 駒を生成して配置する。
    ///
    /// # Errors
    ///
    /// `square` を別の駒が占有している場合、`ModelError::Occupied` を返す。
    ///
    pub fn spawn(&mut self, color: Color, kind: Kind, square: Square) -> Result<PieceId, ModelError> {
        if self.piece_at(square).is_some() {
            return Err(ModelError::Occupied);
        }

        let id = PieceId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        self.pieces.push(Piece {
            color,
            id,
            kind,
            square,
        });

        Ok(id)
    }

    /// 段と筋を指定して駒を生成する（`initial` 用）。
    fn spawn_at(
        &mut self,
        color: Color,
        kind: Kind,
        rank: u8,
        file: u8,
    ) -> Result<PieceId, ModelError> {
        match Square::from_rank_file(rank, file) {
            Some(square) => self.spawn(color, kind, square),
            None => Err(ModelError::NotOnBoard),
        }
    }
}
