//! 共通の定数
//!
//! 辞書とトークナイザーの両方から参照される定数を定義します。

/// 未知語処理の既定カテゴリ名
pub const DEFAULT_CATEGORY: &str = "DEFAULT";

/// BOSとEOSに用いる接続ID
pub const BOS_EOS_CONNECTION_ID: u16 = 0;

/// 文字カテゴリ表の要素数（UTF-16コードユニットの総数）
pub const NUM_UTF16_UNITS: usize = 0x10000;

/// 単語レコードのバイト長
pub const WORD_RECORD_LEN: usize = 10;

/// 文末とみなす句読点
pub const SENTENCE_DELIMITERS: &[char] = &['.', '?', '!', '。', '？', '！'];
