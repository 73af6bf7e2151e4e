//! Click-to-move chess board core logic.
//!
//! このクレートは盤面とクリック操作の状態機械を提供する `board` と、
//! tracing の初期化ヘルパ `logging` を提供します。
//! UI（`sdl` / `wasm`）から利用されることを想定しています。

#![forbid(unsafe_code)]

/// 盤面・駒・クリック操作の状態機械を提供するモジュール。
pub mod board;

/// tracing の初期化ヘルパを提供するモジュール。
pub mod logging;
