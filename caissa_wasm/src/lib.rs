//! WASM (Canvas) 向けの最小 UI。
//!
//! - `wasm32` ターゲットのみで `wasm-bindgen` / `web-sys` を有効化する。
//! - それ以外のターゲットでは、workspace の `cargo test` / `cargo clippy` を通すためにスタブを提供する。

#[cfg(target_arch = "wasm32")]
mod wasm32_app {
    use caissa_core::board;
    use wasm_bindgen::JsValue;
    use wasm_bindgen::prelude::*;
    use web_sys::CanvasRenderingContext2d;

    /// 盤面描画のオフセット。
    const OFFSET: f64 = 8.0;

    /// 選択枠の線幅。
    const FRAME_WIDTH: f64 = 3.0;

    /// マスに対するグリフの大きさの比率。
    const GLYPH_SCALE: f64 = 0.75;

    /// 駒種ごとの表示グリフ。
    const fn glyph(kind: board::Kind) -> &'static str {
        match kind {
            board::Kind::Bishop => "♝",
            board::Kind::King => "♚",
            board::Kind::Knight => "♞",
            board::Kind::Pawn => "♟",
            board::Kind::Queen => "♛",
            board::Kind::Rook => "♜",
            _ => "?",
        }
    }

    /// ブラウザ上で進行するアプリ状態。
    #[wasm_bindgen]
    #[derive(Debug)]
    pub struct App {
        game: board::Game,
    }

    #[wasm_bindgen]
    impl App {
        /// 標準配置・白番でセッションを開始する。
        #[wasm_bindgen(constructor)]
        pub fn new() -> Self {
            Self {
                game: board::Game::initial(),
            }
        }

        /// クリック入力（盤面のマス座標、左上原点）。状態が変化したら true。
        pub fn click(&mut self, x: u8, y: u8) -> bool {
            if x >= board::Square::BOARD_LEN || y >= board::Square::BOARD_LEN {
                return false;
            }

            // 描画上の行は段の上下反転。
            let rank = board::Square::BOARD_LEN - 1 - y;
            let square = match board::Square::from_rank_file(rank, x) {
                Some(value) => value,
                None => return false,
            };

            self.game.click(square).changed()
        }

        /// 状態表示用の文字列を返す。
        pub fn status_text(&self) -> String {
            let (black, white) = self.game.board().counts();
            let side = self.game.side_to_move();
            let side_text = match side {
                board::Color::Black => "Black",
                board::Color::White => "White",
                _ => "Unknown",
            };

            match self.game.selected_piece() {
                Some(piece) => {
                    let rank = piece.square().rank();
                    let file = piece.square().file();
                    format!("{side_text} to move | W={white} B={black} | selected ({rank}, {file})")
                }
                None => format!("{side_text} to move | W={white} B={black}"),
            }
        }

        /// Canvas へ盤面を描画する。
        ///
        /// - `cell_size`: 1マスのピクセルサイズ（例: 64.0）
        pub fn render(&self, ctx: &CanvasRenderingContext2d, cell_size: f64) {
            let board_len: f64 = 8.0;
            let board_px = board_len * cell_size;
            let full = board_px + OFFSET * 2.0;

            ctx.set_fill_style(&JsValue::from_str("#201810"));
            ctx.fill_rect(0.0, 0.0, full, full);

            let selected_square = self.game.selected_piece().map(|piece| piece.square());

            ctx.set_font(&format!("{}px serif", cell_size * GLYPH_SCALE));
            ctx.set_text_align("center");
            ctx.set_text_baseline("middle");

            for y in 0..board::Square::BOARD_LEN {
                for x in 0..board::Square::BOARD_LEN {
                    let rank = board::Square::BOARD_LEN - 1 - y;
                    let square = match board::Square::from_rank_file(rank, x) {
                        Some(value) => value,
                        None => continue,
                    };

                    let left = OFFSET + f64::from(x) * cell_size;
                    let top = OFFSET + f64::from(y) * cell_size;

                    let fill = match square.shade() {
                        board::Shade::Light => "#fdba74",
                        board::Shade::Dark => "#92400e",
                        _ => "#808080",
                    };
                    ctx.set_fill_style(&JsValue::from_str(fill));
                    ctx.fill_rect(left, top, cell_size, cell_size);

                    ctx.set_line_width(1.0);
                    ctx.set_stroke_style(&JsValue::from_str("#000000"));
                    ctx.stroke_rect(left, top, cell_size, cell_size);

                    // 選択中のマスは黄色の枠で強調する。
                    if selected_square == Some(square) {
                        ctx.set_line_width(FRAME_WIDTH);
                        ctx.set_stroke_style(&JsValue::from_str("#e0e040"));
                        ctx.stroke_rect(
                            left + FRAME_WIDTH,
                            top + FRAME_WIDTH,
                            cell_size - FRAME_WIDTH * 2.0,
                            cell_size - FRAME_WIDTH * 2.0,
                        );
                    }

                    // 駒。
                    if let Some(piece) = self.game.board().piece_at(square) {
                        let ink = match piece.color() {
                            board::Color::Black => "#101010",
                            board::Color::White => "#f8f8f8",
                            _ => "#808080",
                        };
                        ctx.set_fill_style(&JsValue::from_str(ink));

                        let cx = left + cell_size / 2.0;
                        let cy = top + cell_size / 2.0;
                        let _: Result<(), JsValue> = ctx.fill_text(glyph(piece.kind()), cx, cy);
                    }
                }
            }
        }
    }

    impl Default for App {
        fn default() -> Self {
            Self::new()
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm32_app::App;

#[cfg(not(target_arch = "wasm32"))]
mod non_wasm_stub {
    #[derive(Debug, Default)]
    pub struct App;

    impl App {
        pub fn new() -> Self {
            Self
        }

        pub fn click(&mut self, _x: u8, _y: u8) -> bool {
            false
        }

        pub fn status_text(&self) -> String {
            "wasm App is available only on wasm32".to_string()
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use non_wasm_stub::App;
