/// クリック操作の状態機械（選択・移動・手番交代）の実装。
pub mod game;
/// 駒の順序付き集合（盤面モデル）の実装。
pub mod model;
pub mod types;

pub type Board = model::Board;
pub type ClickOutcome = game::ClickOutcome;
pub type Color = types::Color;
pub type Game = game::Game;
pub type Kind = types::Kind;
pub type ModelError = model::ModelError;
pub type MoveOutcome = model::MoveOutcome;
pub type Piece = model::Piece;
pub type PieceId = model::PieceId;
pub type Shade = types::Shade;
pub type Square = types::Square;
