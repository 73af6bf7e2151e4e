//! SDL で動作する最小 UI。

use caissa_core::board;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::mouse::MouseButton;
use sdl2::pixels::Color as SdlColor;
use sdl2::rect::Rect;

/// 盤面のオフセット（左上）。
const OFFSET: i32 = 16;

/// 1マスのピクセルサイズ。
const CELL_SIZE: i32 = 64;

/// 盤面の一辺の長さ（マス）。
const BOARD_LEN: i32 = 8;

/// 盤面の一辺の長さ（ピクセル）。
const BOARD_PX: i32 = BOARD_LEN * CELL_SIZE;

/// ウィンドウ幅（ピクセル）。
const WINDOW_W: u32 = (OFFSET + BOARD_PX + OFFSET) as u32;

/// ウィンドウ高さ（ピクセル）。
const WINDOW_H: u32 = (OFFSET + BOARD_PX + OFFSET) as u32;

/// スプライトの一辺のドット数。
const SPRITE_LEN: i32 = 5;

/// スプライト1ドットのピクセルサイズ。
const DOT_SIZE: i32 = CELL_SIZE / 10;

/// 選択枠の内側オフセット（開始）。
const FRAME_INSET_MIN: i32 = 2;

/// 選択枠の内側オフセット（終了、排他）。
const FRAME_INSET_MAX: i32 = 5;

#[derive(Debug)]
struct App {
    game: board::Game,
}

impl App {
    fn new() -> Self {
        Self {
            game: board::Game::initial(),
        }
    }

    fn status_text(&self) -> String {
        let (black, white) = self.game.board().counts();
        let side = self.game.side_to_move();
        let side_text = match side {
            board::Color::Black => "Black",
            board::Color::White => "White",
            _ => "Unknown",
        };

        match self.game.selected_piece() {
            Some(piece) => {
                let label = square_label(piece.square());
                format!("{side_text} to move | W={white} B={black} | selected {label}")
            }
            None => format!("{side_text} to move | W={white} B={black}"),
        }
    }

    fn try_click(&mut self, x: i32, y: i32) -> bool {
        let px = x - OFFSET;
        let py = y - OFFSET;
        if px < 0 || py < 0 {
            return false;
        }

        let col = px / CELL_SIZE;
        let row = py / CELL_SIZE;
        if !(0..BOARD_LEN).contains(&col) || !(0..BOARD_LEN).contains(&row) {
            return false;
        }

        let col_u8 = match u8::try_from(col) {
            Ok(value) => value,
            Err(_err) => return false,
        };
        let row_u8 = match u8::try_from(row) {
            Ok(value) => value,
            Err(_err) => return false,
        };

        // 描画上の行は段の上下反転。
        let rank = board::Square::BOARD_LEN - 1 - row_u8;
        let square = match board::Square::from_rank_file(rank, col_u8) {
            Some(value) => value,
            None => return false,
        };

        self.game.click(square).changed()
    }
}

/// マスの代数式表記（a1..h8）を返す。
fn square_label(square: board::Square) -> String {
    let file_char = char::from(b'a'.saturating_add(square.file()));
    let rank_number = square.rank().saturating_add(1);
    format!("{file_char}{rank_number}")
}

/// 駒種ごとの 5x5 スプライト（各行の下位 5 ビットがドット）。
const fn sprite(kind: board::Kind) -> [u8; 5] {
    match kind {
        board::Kind::Bishop => [0b0_0100, 0b0_1110, 0b0_1110, 0b0_0100, 0b0_1110],
        board::Kind::King => [0b0_0100, 0b0_1110, 0b0_0100, 0b0_0100, 0b0_1110],
        board::Kind::Knight => [0b0_1110, 0b1_1110, 0b0_0110, 0b0_1110, 0b1_1111],
        board::Kind::Pawn => [0b0_0000, 0b0_0100, 0b0_1110, 0b0_0100, 0b0_1110],
        board::Kind::Queen => [0b1_0101, 0b0_1110, 0b0_1110, 0b0_0100, 0b1_1111],
        board::Kind::Rook => [0b1_0101, 0b1_1111, 0b0_1110, 0b0_1110, 0b1_1111],
        _ => [0b1_0101, 0b0_1010, 0b1_0101, 0b0_1010, 0b1_0101],
    }
}

/// マスの左上座標 `(xx, yy)` を基準にスプライトを描画する。
fn draw_sprite(
    canvas: &mut sdl2::render::Canvas<sdl2::video::Window>,
    xx: i32,
    yy: i32,
    rows: [u8; 5],
    color: SdlColor,
) {
    let margin = (CELL_SIZE - DOT_SIZE * SPRITE_LEN) / 2;
    canvas.set_draw_color(color);

    for (row_index, row) in rows.iter().copied().enumerate() {
        let row_i32 = row_index as i32;
        for col in 0..SPRITE_LEN {
            let bit = (row >> (SPRITE_LEN - 1 - col)) & 1;
            if bit == 0 {
                continue;
            }

            let dot = Rect::new(
                xx + margin + col * DOT_SIZE,
                yy + margin + row_i32 * DOT_SIZE,
                DOT_SIZE as u32,
                DOT_SIZE as u32,
            );
            let _: Result<(), String> = canvas.fill_rect(dot);
        }
    }
}

fn draw_board(canvas: &mut sdl2::render::Canvas<sdl2::video::Window>, app: &App) {
    let selected_square = app.game.selected_piece().map(|piece| piece.square());

    canvas.set_draw_color(SdlColor::RGB(32, 24, 16));
    canvas.clear();

    // マス。
    for row in 0..BOARD_LEN {
        for col in 0..BOARD_LEN {
            let xx = OFFSET + col * CELL_SIZE;
            let yy = OFFSET + row * CELL_SIZE;
            let rect = Rect::new(xx, yy, CELL_SIZE as u32, CELL_SIZE as u32);

            let col_u8 = match u8::try_from(col) {
                Ok(value) => value,
                Err(_err) => continue,
            };
            let row_u8 = match u8::try_from(row) {
                Ok(value) => value,
                Err(_err) => continue,
            };
            let rank = board::Square::BOARD_LEN - 1 - row_u8;
            let square = match board::Square::from_rank_file(rank, col_u8) {
                Some(value) => value,
                None => continue,
            };

            let square_color = match square.shade() {
                board::Shade::Light => SdlColor::RGB(253, 186, 116),
                board::Shade::Dark => SdlColor::RGB(146, 64, 14),
                _ => SdlColor::RGB(128, 128, 128),
            };
            canvas.set_draw_color(square_color);
            let _: Result<(), String> = canvas.fill_rect(rect);

            // 選択中のマスは黄色の枠で強調する。
            if selected_square == Some(square) {
                canvas.set_draw_color(SdlColor::RGB(224, 224, 64));
                for inset in FRAME_INSET_MIN..FRAME_INSET_MAX {
                    let frame = Rect::new(
                        xx + inset,
                        yy + inset,
                        (CELL_SIZE - inset * 2) as u32,
                        (CELL_SIZE - inset * 2) as u32,
                    );
                    let _: Result<(), String> = canvas.draw_rect(frame);
                }
            }

            // 駒。
            if let Some(piece) = app.game.board().piece_at(square) {
                let (body, marker) = match piece.color() {
                    board::Color::Black => {
                        (SdlColor::RGB(16, 16, 16), SdlColor::RGB(220, 220, 220))
                    }
                    board::Color::White => {
                        (SdlColor::RGB(240, 240, 240), SdlColor::RGB(40, 40, 40))
                    }
                    _ => (SdlColor::RGB(128, 128, 128), SdlColor::RGB(0, 0, 0)),
                };

                let inset = CELL_SIZE / 8;
                let body_rect = Rect::new(
                    xx + inset,
                    yy + inset,
                    (CELL_SIZE - inset * 2) as u32,
                    (CELL_SIZE - inset * 2) as u32,
                );
                canvas.set_draw_color(body);
                let _: Result<(), String> = canvas.fill_rect(body_rect);

                draw_sprite(canvas, xx, yy, sprite(piece.kind()), marker);
            }
        }
    }
}

fn main() -> Result<(), String> {
    let _: bool = caissa_core::logging::init();

    let sdl = sdl2::init()?;
    let video = sdl.video()?;

    let window = video
        .window("caissa", WINDOW_W, WINDOW_H)
        .position_centered()
        .build()
        .map_err(|e| e.to_string())?;

    let mut canvas = window
        .into_canvas()
        .present_vsync()
        .accelerated()
        .build()
        .map_err(|e| e.to_string())?;

    let mut app = App::new();
    let mut event_pump = sdl.event_pump()?;

    let draw_and_present = |canvas: &mut sdl2::render::Canvas<sdl2::video::Window>, app: &App| {
        let title = app.status_text();
        let _ = canvas.window_mut().set_title(&title);
        draw_board(canvas, app);
        canvas.present();
    };

    'running: loop {
        for event in event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => break 'running,
                Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'running,
                Event::MouseButtonDown {
                    mouse_btn: MouseButton::Left,
                    x,
                    y,
                    ..
                } => {
                    let _: bool = app.try_click(x, y);
                }
                _ => {}
            }
        }

        draw_and_present(&mut canvas, &app);
    }

    Ok(())
}
