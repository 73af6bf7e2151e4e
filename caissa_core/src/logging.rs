use tracing_subscriber::util::SubscriberInitExt as _;

/// JSON 形式の tracing サブスクライバをプロセス全体に設定する。
///
/// UI バイナリの起動時に一度だけ呼ぶ想定。すでにサブスクライバが
/// 設定されている場合は何もせず `false` を返す。
#[inline]
pub fn init() -> bool {
    let result = tracing_subscriber::fmt().json().finish().try_init();
    result.is_ok()
}
